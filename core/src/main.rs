//! disk-status: print a disk space notice for a workspace.
//!
//! Meant to be run from a session-start hook. Always exits successfully when
//! checking; diagnostics go to stderr and are controlled by RUST_LOG.

use std::path::PathBuf;

use clap::Parser;
use disk_status_core::{config, Configuration, DiskMonitor, Terminal};

#[derive(Parser)]
#[command(name = "disk-status", version, about = "Warn when workspace disk usage is high")]
struct Cli {
    /// Workspace whose filesystem is checked (defaults to the current directory)
    workspace: Option<PathBuf>,

    /// Configuration file to use instead of the one under the home directory
    #[arg(long, env = "DISK_STATUS_CONFIG")]
    config: Option<PathBuf>,

    /// Respect behavior.check_on_session_start
    #[arg(long)]
    session_start: bool,

    /// Disable ANSI colors
    #[arg(long)]
    no_color: bool,

    /// Print the effective configuration as JSON and exit
    #[arg(long)]
    print_config: bool,
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();
}

fn load_config(path: Option<&PathBuf>) -> Configuration {
    match path {
        Some(p) => config::load(p),
        None => config::load_default(),
    }
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let config = load_config(cli.config.as_ref());

    if cli.print_config {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    if cli.session_start && !config.behavior.check_on_session_start {
        tracing::debug!("disk check not requested at session start");
        return Ok(());
    }

    let workspace = match cli.workspace {
        Some(w) => w,
        None => match std::env::current_dir() {
            Ok(dir) => dir,
            Err(e) => {
                tracing::debug!(error = %e, "no workspace to check");
                return Ok(());
            }
        },
    };

    let monitor = DiskMonitor::new(config);
    let mut out = Terminal::stdout(!cli.no_color);
    monitor.check(&workspace, &mut out);

    Ok(())
}
