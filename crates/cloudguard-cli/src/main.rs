//! CLI entry point for cloudguard.
//!
//! This module is intentionally thin: it handles argument parsing, logging
//! setup, I/O, and exit codes. All orchestration lives in `cloudguard-app`.

use anyhow::Context;
use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};
use cloudguard_engine::LogProgress;
use cloudguard_provider::SnapshotClient;
use cloudguard_settings::{
    parse_config_toml, resolve_settings, CloudguardConfigV1, Overrides, Verbosity,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "cloudguard",
    version,
    about = "Compliance scanner for cloud accounts"
)]
struct Cli {
    /// Path to cloudguard config TOML.
    #[arg(long, default_value = "cloudguard.toml")]
    config: Utf8PathBuf,

    /// Region to scan, or "all".
    #[arg(long)]
    region: Option<String>,

    /// Named credential profile recorded on audit results.
    #[arg(long)]
    profile: Option<String>,

    /// Requested key-trust class (provider|customer).
    #[arg(long)]
    key_type: Option<String>,

    /// Log verbosity (quiet|normal|debug).
    #[arg(long)]
    verbosity: Option<String>,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run one rule across the resolved region scope.
    Scan {
        /// Rule identifier to execute.
        #[arg(long)]
        rule: Option<String>,

        /// Audit a single resource by its provider-assigned identifier.
        #[arg(long)]
        resource_id: Option<String>,

        /// Directory of canned provider responses (offline mode).
        #[arg(long)]
        snapshot: Utf8PathBuf,

        /// Where to write the JSON report.
        #[arg(long, default_value = "artifacts/cloudguard/report.json")]
        report_out: Utf8PathBuf,
    },

    /// List the rules this binary can execute.
    Rules,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.cmd {
        Commands::Scan {
            ref rule,
            ref resource_id,
            ref snapshot,
            ref report_out,
        } => cmd_scan(
            &cli,
            rule.clone(),
            resource_id.clone(),
            snapshot.clone(),
            report_out.clone(),
        ),
        Commands::Rules => cmd_rules(),
    }
}

fn cmd_scan(
    cli: &Cli,
    rule: Option<String>,
    resource_id: Option<String>,
    snapshot: Utf8PathBuf,
    report_out: Utf8PathBuf,
) -> anyhow::Result<()> {
    let result = (|| -> anyhow::Result<()> {
        // Load config if present; a missing file is allowed (defaults apply).
        let cfg_text = std::fs::read_to_string(&cli.config).unwrap_or_default();
        let cfg = if cfg_text.trim().is_empty() {
            CloudguardConfigV1::default()
        } else {
            parse_config_toml(&cfg_text).context("parse config")?
        };

        let overrides = Overrides {
            region: cli.region.clone(),
            profile: cli.profile.clone(),
            resource_id,
            key_type: cli.key_type.clone(),
            rule,
            verbosity: cli.verbosity.clone(),
        };
        let settings = resolve_settings(cfg, overrides).context("resolve settings")?;

        init_logging(settings.verbosity);

        let provider = SnapshotClient::open(snapshot).context("open snapshot directory")?;
        let report = cloudguard_app::run_scan(&settings, &provider, &LogProgress)?;

        write_text_file(&report_out, &cloudguard_render::serialize_report(&report)?)
            .context("write report json")?;
        print!("{}", cloudguard_render::render_text(&report));

        Ok(())
    })();

    match result {
        Ok(()) => Ok(()),
        Err(err) => {
            eprintln!("cloudguard error: {err:#}");
            std::process::exit(1);
        }
    }
}

fn cmd_rules() -> anyhow::Result<()> {
    for rule in cloudguard_rules::available() {
        println!("{rule}");
    }
    Ok(())
}

fn init_logging(verbosity: Verbosity) {
    let default_filter = match verbosity {
        Verbosity::Quiet => "warn",
        Verbosity::Normal => "info",
        Verbosity::Debug => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn write_text_file(path: &camino::Utf8Path, text: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).with_context(|| format!("create directory: {parent}"))?;
    }
    std::fs::write(path, text).with_context(|| format!("write report: {path}"))?;
    Ok(())
}
