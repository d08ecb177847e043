pub mod commands;
pub mod core;
pub mod models;

use anyhow::Context;
use clap::Parser;
use std::io::Write;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// SQLite file holding the upload_statistics_cli_cfg table
    #[arg(long, default_value = "data.db")]
    pub database: PathBuf,

    /// JSON file overriding the capability list and client types
    #[arg(long)]
    pub settings: Option<PathBuf>,
}

fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp_millis()
        .try_init();
}

pub fn run() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging();

    let settings = core::settings_store::load(args.settings.as_deref())
        .context("Failed to load settings")?;
    log::debug!(
        "using {} capabilities, client types {:?}",
        settings.capabilities.len(),
        settings
            .client_types
            .iter()
            .map(|ct| ct.cli_type.as_str())
            .collect::<Vec<_>>()
    );

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    commands::show_support(&args.database, &settings, &mut out)
        .with_context(|| format!("Failed to build support report from {}", args.database.display()))?;
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn args_default_to_local_data_db() {
        let args = Args::try_parse_from(["support-stats"]).expect("parse");
        assert_eq!(args.database, PathBuf::from("data.db"));
        assert!(args.settings.is_none());

        let args = Args::try_parse_from([
            "support-stats",
            "--database",
            "/tmp/uploads.db",
            "--settings",
            "caps.json",
        ])
        .expect("parse");
        assert_eq!(args.database, PathBuf::from("/tmp/uploads.db"));
        assert_eq!(args.settings, Some(PathBuf::from("caps.json")));
    }
}
