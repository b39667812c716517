//! rotocarve CLI - rotary carving tool path generator

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rotocarve::{init_logging_with, run_job, LogFormat, MachiningDescriptor};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "rotocarve")]
#[command(version = rotocarve::VERSION, long_version = long_version())]
#[command(about = "4-axis rotary CNC carving tool paths from STL meshes", long_about = None)]
struct Cli {
    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a tool path for a machining descriptor
    Generate {
        /// Descriptor file (.json or .toml)
        #[arg(short, long)]
        descriptor: PathBuf,
        /// Directory holding the uploaded mesh (default: user data dir)
        #[arg(short, long)]
        upload_dir: Option<PathBuf>,
        /// Write the result here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Write per-layer diagnostics as JSON
        #[arg(short, long)]
        report: Option<PathBuf>,
    },
    /// Validate a descriptor and print the effective configuration
    Check {
        /// Descriptor file (.json or .toml)
        #[arg(short, long)]
        descriptor: PathBuf,
    },
}

fn long_version() -> &'static str {
    concat!(env!("CARGO_PKG_VERSION"), " (built ", env!("BUILD_DATE"), ")")
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let format = if cli.json_logs {
        LogFormat::Json
    } else {
        LogFormat::Pretty
    };
    init_logging_with(format)?;

    match cli.command {
        Commands::Generate {
            descriptor,
            upload_dir,
            output,
            report,
        } => {
            let upload_dir = upload_dir.unwrap_or_else(rotocarve::default_upload_dir);
            generate(&descriptor, &upload_dir, output.as_deref(), report.as_deref())?;
        }
        Commands::Check { descriptor } => {
            check(&descriptor)?;
        }
    }

    Ok(())
}

fn generate(
    descriptor: &Path,
    upload_dir: &Path,
    output: Option<&Path>,
    report_path: Option<&Path>,
) -> Result<()> {
    let (result, report) = run_job(descriptor, upload_dir)?;

    let json = result.to_json_pretty()?;
    match output {
        Some(path) => {
            std::fs::write(path, json)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!("Wrote tool path to {}", path.display());
        }
        None => println!("{}", json),
    }

    if let Some(path) = report_path {
        std::fs::write(path, serde_json::to_string_pretty(&report)?)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        tracing::info!("Wrote layer report to {}", path.display());
    }

    Ok(())
}

fn check(path: &Path) -> Result<()> {
    let descriptor = MachiningDescriptor::load_from_file(path)
        .with_context(|| format!("Invalid descriptor {}", path.display()))?;
    let cfg = &descriptor.gcode_config;

    println!("{}", serde_json::to_string_pretty(&descriptor)?);
    println!("sampling interval: {} mm", cfg.sampling_interval());
    println!("layer height: {} mm", cfg.effective_layer_height());
    println!("initial Z: {} mm", descriptor.initial_z());
    println!("resample mode: {}", cfg.resample_mode);
    Ok(())
}
