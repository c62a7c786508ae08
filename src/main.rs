//! forgekit CLI
//!
//! Command-line frontend for the engine build/asset pipeline: project
//! generation, schema code generation, data regeneration, asset
//! conversion, and cubemap generation.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::{info, Level};
use tracing_subscriber::{fmt, EnvFilter};

use forgekit_core::HostPlatform;
use forgekit_pipeline::{assets, cubemaps, data, invoke, projects, schemas};
use forgekit_pipeline::{PipelineManifest, Plan, Toolchain};

/// forgekit - build and asset pipeline orchestrator
#[derive(Parser)]
#[command(name = "forgekit")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Output format for planned invocations
    #[arg(long, global = true, default_value = "text")]
    format: OutputFormat,

    /// Path to a pipeline manifest (JSON); built-in defaults otherwise
    #[arg(long, global = true)]
    manifest: Option<PathBuf>,

    /// Engine root directory (overrides the manifest)
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    /// Plan for a platform other than the current host
    #[arg(long, global = true)]
    platform: Option<HostPlatform>,

    /// Print the planned command lines without running anything
    #[arg(long, global = true)]
    dry_run: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown format: {s}")),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Generate IDE/build-system project files
    Projects(ProjectsArgs),

    /// Compile schema files to source code
    Schemas(SchemasArgs),

    /// Regenerate JSON/binary data files from their schemas
    Data(DataArgs),

    /// Convert raw assets to their runtime formats
    Assets(AssetsArgs),

    /// Generate cubemaps from equirectangular HDR images
    Cubemaps(CubemapsArgs),
}

#[derive(Args)]
struct ProjectsArgs {
    /// Generator action keyword (default follows the host platform)
    #[arg(short, long)]
    action: Option<String>,
}

#[derive(Args)]
struct SchemasArgs {
    /// Directory scanned for schema files
    #[arg(long)]
    schema_dir: Option<PathBuf>,

    /// Root directory generated code is written under
    #[arg(short, long)]
    output_dir: Option<PathBuf>,
}

#[derive(Args)]
struct DataArgs {
    /// Directory holding the data files and their schemas
    #[arg(long)]
    data_dir: Option<PathBuf>,
}

#[derive(Args)]
struct AssetsArgs {
    /// Directory of raw source assets
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Directory converted assets are written to
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Args)]
struct CubemapsArgs {
    /// Root directory holding texture pack directories
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Number of importance samples
    #[arg(short = 'n', long)]
    samples: Option<u32>,

    /// Number of mip levels to generate
    #[arg(short = 'm', long)]
    mip_levels: Option<u32>,

    /// Suppress generator output
    #[arg(short, long)]
    quiet: bool,
}

fn setup_logging(verbosity: u8) {
    let level = match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    fmt()
        .with_env_filter(filter)
        .with_target(verbosity >= 2)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let mut manifest = match &cli.manifest {
        Some(path) => PipelineManifest::load(path)
            .with_context(|| format!("Failed to load manifest {}", path.display()))?,
        None => PipelineManifest::default(),
    };

    if let Some(root) = &cli.root {
        manifest.engine_root = root.clone();
    }

    let platform = cli.platform.unwrap_or_else(HostPlatform::current);
    let toolchain = Toolchain::new(&manifest, platform);
    info!(
        platform = %platform,
        root = %manifest.engine_root.display(),
        "Pipeline configured"
    );

    let plan = match &cli.command {
        Commands::Projects(args) => projects::plan(&toolchain, args.action.as_deref())
            .context("Failed to plan project generation")?,
        Commands::Schemas(args) => {
            if let Some(dir) = &args.schema_dir {
                manifest.schemas.schema_dir = dir.clone();
            }
            if let Some(dir) = &args.output_dir {
                manifest.schemas.code_output_dir = dir.clone();
            }
            schemas::plan(&toolchain, &manifest).context("Failed to plan schema compilation")?
        }
        Commands::Data(args) => {
            if let Some(dir) = &args.data_dir {
                manifest.data.data_dir = dir.clone();
            }
            data::plan(&toolchain, &manifest).context("Failed to plan data regeneration")?
        }
        Commands::Assets(args) => {
            if let Some(dir) = &args.input {
                manifest.assets.input_dir = dir.clone();
            }
            if let Some(dir) = &args.output {
                manifest.assets.output_dir = dir.clone();
            }
            assets::plan(&toolchain, &manifest).context("Failed to plan asset conversion")?
        }
        Commands::Cubemaps(args) => {
            if let Some(dir) = &args.input {
                manifest.cubemaps.input_root = dir.clone();
            }
            if let Some(samples) = args.samples {
                manifest.cubemaps.settings.samples = samples;
            }
            if let Some(mip_levels) = args.mip_levels {
                manifest.cubemaps.settings.mip_levels = mip_levels;
            }
            if args.quiet {
                manifest.cubemaps.settings.quiet = true;
            }
            cubemaps::plan(&toolchain, &manifest).context("Failed to plan cubemap generation")?
        }
    };

    report_plan(&plan, cli.format)?;

    if cli.dry_run || cli.format == OutputFormat::Json {
        return Ok(());
    }

    let summary = invoke::execute(&plan).context("Pipeline run failed")?;
    println!("Done: {summary}");
    Ok(())
}

fn report_plan(plan: &Plan, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(plan)?);
        }
        OutputFormat::Text => {
            if plan.is_empty() {
                println!("Nothing to do ({} skipped)", plan.skipped);
            } else {
                println!(
                    "Planned {} invocation(s), {} skipped:",
                    plan.invocations.len(),
                    plan.skipped
                );
                for invocation in &plan.invocations {
                    println!("  {invocation}");
                }
            }
        }
    }

    Ok(())
}
