//! Disk usage queries for a workspace path

use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DiskError {
    #[error("Path contains an interior NUL byte: {0}")]
    InvalidPath(PathBuf),
    #[error("Failed to stat filesystem at {path}: {source}")]
    Stat {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Disk usage queries are not supported on this platform")]
    Unsupported,
}

/// Point-in-time disk usage for the filesystem holding a path
#[derive(Debug, Clone, PartialEq)]
pub struct UsageSnapshot {
    pub usage_percent: f64,
    pub used: String,
    pub available: String,
    pub total: String,
}

impl UsageSnapshot {
    /// Build a snapshot from raw byte counts.
    ///
    /// The percentage is taken over the space visible to unprivileged users
    /// (`used + available`), which is what `df` reports.
    pub fn from_bytes(total: u64, used: u64, available: u64) -> Self {
        let visible = used.saturating_add(available);
        let usage_percent = if visible == 0 {
            0.0
        } else {
            used as f64 / visible as f64 * 100.0
        };

        UsageSnapshot {
            usage_percent,
            used: format_size(used),
            available: format_size(available),
            total: format_size(total),
        }
    }
}

/// Source of disk usage snapshots
pub trait DiskUsageProvider {
    fn usage(&self, path: &Path) -> Result<UsageSnapshot, DiskError>;
}

/// A fixed reading, for callers that already measured the disk
impl DiskUsageProvider for UsageSnapshot {
    fn usage(&self, _path: &Path) -> Result<UsageSnapshot, DiskError> {
        Ok(self.clone())
    }
}

/// Queries the filesystem with `statvfs(3)`
#[derive(Debug, Clone, Copy, Default)]
pub struct StatvfsProvider;

#[cfg(unix)]
impl DiskUsageProvider for StatvfsProvider {
    fn usage(&self, path: &Path) -> Result<UsageSnapshot, DiskError> {
        use std::ffi::CString;
        use std::os::unix::ffi::OsStrExt;

        let c_path = CString::new(path.as_os_str().as_bytes())
            .map_err(|_| DiskError::InvalidPath(path.to_path_buf()))?;

        // SAFETY: c_path is NUL-terminated and stat is a valid out-pointer
        let mut stat: libc::statvfs = unsafe { std::mem::zeroed() };
        let rc = unsafe { libc::statvfs(c_path.as_ptr(), &mut stat) };
        if rc != 0 {
            return Err(DiskError::Stat {
                path: path.to_path_buf(),
                source: std::io::Error::last_os_error(),
            });
        }

        let (total, used, available) = byte_counts(
            stat.f_frsize as u64,
            stat.f_blocks as u64,
            stat.f_bfree as u64,
            stat.f_bavail as u64,
        );

        tracing::trace!(path = %path.display(), total, used, available, "statvfs");

        Ok(UsageSnapshot::from_bytes(total, used, available))
    }
}

/// Convert block counts to `(total, used, available)` bytes, saturating at
/// `u64::MAX`.
#[cfg_attr(not(unix), allow(dead_code))]
fn byte_counts(fragment: u64, blocks: u64, free: u64, avail: u64) -> (u64, u64, u64) {
    let total = blocks.saturating_mul(fragment);
    let free = free.saturating_mul(fragment);
    let available = avail.saturating_mul(fragment);
    (total, total.saturating_sub(free), available)
}

#[cfg(not(unix))]
impl DiskUsageProvider for StatvfsProvider {
    fn usage(&self, _path: &Path) -> Result<UsageSnapshot, DiskError> {
        Err(DiskError::Unsupported)
    }
}

const UNITS: [&str; 6] = ["K", "M", "G", "T", "P", "E"];

/// Format a byte count the way `df -h` does: 1024-based units, one decimal
/// below ten, always rounded up.
pub fn format_size(bytes: u64) -> String {
    if bytes < 1024 {
        return bytes.to_string();
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    value /= 1024.0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    if value < 10.0 {
        let tenths = (value * 10.0).ceil() / 10.0;
        if tenths < 10.0 {
            return format!("{:.1}{}", tenths, UNITS[unit]);
        }
        value = tenths;
    }

    let whole = value.ceil();
    if whole >= 1024.0 && unit < UNITS.len() - 1 {
        return format!("1.0{}", UNITS[unit + 1]);
    }
    format!("{}{}", whole as u64, UNITS[unit])
}

#[cfg(test)]
mod tests {
    use super::*;

    const GIB: u64 = 1024 * 1024 * 1024;

    #[test]
    fn test_format_size_small() {
        assert_eq!(format_size(0), "0");
        assert_eq!(format_size(512), "512");
        assert_eq!(format_size(1024), "1.0K");
    }

    #[test]
    fn test_format_size_rounds_up() {
        assert_eq!(format_size(GIB * 9 + GIB / 2 + 1), "9.6G");
        assert_eq!(format_size(GIB * 450), "450G");
        assert_eq!(format_size(GIB * 450 + 1), "451G");
    }

    #[test]
    fn test_format_size_unit_boundaries() {
        assert_eq!(format_size(1024 * 1024 - 1), "1.0M");
        assert_eq!(format_size(GIB * 1024), "1.0T");
        assert_eq!(format_size(GIB * 10), "10G");
    }

    #[test]
    fn test_snapshot_from_bytes() {
        let snap = UsageSnapshot::from_bytes(100 * GIB, 96 * GIB, 4 * GIB);
        assert!((snap.usage_percent - 96.0).abs() < 1e-9);
        assert_eq!(snap.used, "96G");
        assert_eq!(snap.available, "4.0G");
        assert_eq!(snap.total, "100G");
    }

    #[test]
    fn test_snapshot_ignores_reserved_blocks() {
        // 5G reserved for root: total 100, used 45, available 50
        let snap = UsageSnapshot::from_bytes(100 * GIB, 45 * GIB, 50 * GIB);
        assert!((snap.usage_percent - 900.0 / 19.0).abs() < 1e-9);
    }

    #[test]
    fn test_snapshot_empty_filesystem() {
        let snap = UsageSnapshot::from_bytes(0, 0, 0);
        assert_eq!(snap.usage_percent, 0.0);
        assert_eq!(snap.total, "0");
    }

    #[test]
    fn test_byte_counts() {
        assert_eq!(byte_counts(4096, 100, 40, 30), (409_600, 245_760, 122_880));
    }

    #[test]
    fn test_byte_counts_saturate() {
        let (total, used, available) = byte_counts(u64::MAX / 2, 4, 1, 3);
        assert_eq!(total, u64::MAX);
        assert_eq!(available, u64::MAX);
        assert_eq!(used, u64::MAX - (u64::MAX / 2));

        let snap = UsageSnapshot::from_bytes(total, used, available);
        assert!((0.0..=100.0).contains(&snap.usage_percent));
    }

    #[cfg(unix)]
    #[test]
    fn test_statvfs_current_dir() {
        let snap = StatvfsProvider.usage(Path::new(".")).unwrap();
        assert!((0.0..=100.0).contains(&snap.usage_percent));
        assert!(!snap.total.is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_statvfs_missing_path() {
        let err = StatvfsProvider
            .usage(Path::new("/definitely/not/a/real/path/xyz"))
            .unwrap_err();
        assert!(matches!(err, DiskError::Stat { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_statvfs_interior_nul() {
        let err = StatvfsProvider.usage(Path::new("a\0b")).unwrap_err();
        assert!(matches!(err, DiskError::InvalidPath(_)));
    }
}
