use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use vestry::{
    format_report_json, format_report_text, run_admin_diagnostics, DiagReport, HostRuntime,
    HttpPlatform, VestryConfig,
};

#[derive(Parser)]
#[command(name = "vestry")]
#[command(version, about = "Admin diagnostics for the parish platform", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,
}

/// Diagnostics output format
#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
enum DiagOutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full admin diagnostic suite against the platform
    Diag {
        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: DiagOutputFormat,

        /// Strict mode (warnings count as failures for the exit code)
        #[arg(long)]
        strict: bool,

        /// Platform base URL (overrides VESTRY_PLATFORM_URL)
        #[arg(long)]
        url: Option<String>,
    },
}

fn init_tracing(verbose: bool, debug: bool) {
    let level = if debug {
        "debug"
    } else if verbose {
        "info"
    } else {
        "warn"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.debug);

    match cli.command {
        Commands::Diag {
            format,
            strict,
            url,
        } => cmd_diag(format, strict, url),
    }
}

fn cmd_diag(format: DiagOutputFormat, strict: bool, url: Option<String>) -> Result<()> {
    let mut config = VestryConfig::from_env();
    if let Some(url) = url {
        config.platform.base_url = url;
    }

    let platform = HttpPlatform::new(&config.platform.base_url, config.platform.anon_key.as_deref());
    let runtime = HostRuntime::new();

    let rt = tokio::runtime::Runtime::new()?;
    let results = rt.block_on(run_admin_diagnostics(&platform, &runtime, &config));
    let report = DiagReport::new(results);

    match format {
        DiagOutputFormat::Text => print!("{}", format_report_text(&report)),
        DiagOutputFormat::Json => println!("{}", format_report_json(&report)?),
    }

    let unhealthy = report.summary.failed > 0 || (strict && report.summary.warnings > 0);
    if unhealthy {
        eprintln!("{}", "Diagnostics detected problems".bright_red().bold());
        std::process::exit(1);
    }

    if report.summary.warnings > 0 {
        eprintln!("{}", "Diagnostics passed with warnings".bright_yellow());
    } else {
        eprintln!("{}", "All diagnostics passed".bright_green());
    }

    Ok(())
}
