//! appsettings-gen: reconcile appsettings.json files with configuration classes
//!
//! Stand-in host driver for build scripts and CI.

use anyhow::{bail, Context, Result};
use appsettings_gen::{
    cli::{self, CheckFormat, SchemaKind, SettingsInput},
    config::{self, GeneratorConfig},
    pipeline::exit_codes,
};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "appsettings-gen")]
#[command(version)]
#[command(
    about = "Check appsettings.json against *Configuration classes and generate the host type",
    long_about = None
)]
#[command(after_help = "EXIT CODES:
    0  Source generated, nothing to generate, or settings valid
    1  Settings do not match the configuration classes
    2  Error occurred

EXAMPLES:
    # Generate Host.cs from the project's settings
    appsettings-gen generate --model model.json --settings-dir . -O obj/Host.cs

    # Check settings in CI
    appsettings-gen check --model model.json --settings appsettings.json --format json

    # Show how several settings files merge
    appsettings-gen merge --settings appsettings.json --settings local/appsettings.json")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to configuration file
    #[arg(long, global = true, env = "APPSETTINGS_GEN_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Settings document selection shared by several subcommands
#[derive(clap::Args)]
struct SettingsArgs {
    /// Settings file to merge; repeat to merge several, first one wins on conflicts
    #[arg(long = "settings", value_name = "PATH")]
    settings: Vec<PathBuf>,

    /// Directory whose settings files (by configured name, any case) are merged after --settings
    #[arg(long, value_name = "DIR")]
    settings_dir: Option<PathBuf>,
}

impl SettingsArgs {
    fn into_input(self) -> SettingsInput {
        SettingsInput {
            files: self.settings,
            dir: self.settings_dir,
        }
    }
}

/// Arguments for the `generate` subcommand
#[derive(Parser)]
struct GenerateArgs {
    /// Semantic model document (JSON)
    #[arg(long)]
    model: PathBuf,

    #[command(flatten)]
    settings: SettingsArgs,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,
}

/// Arguments for the `check` subcommand
#[derive(Parser)]
struct CheckArgs {
    /// Semantic model document (JSON)
    #[arg(long)]
    model: PathBuf,

    #[command(flatten)]
    settings: SettingsArgs,

    /// Report format
    #[arg(long, value_enum, default_value = "text")]
    format: CheckFormat,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,
}

/// Arguments for the `merge` subcommand
#[derive(Parser)]
struct MergeArgs {
    #[command(flatten)]
    settings: SettingsArgs,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate settings and generate the aggregate host type
    Generate(GenerateArgs),

    /// Validate settings against the configuration classes only
    Check(CheckArgs),

    /// Print the merged settings tree
    Merge(MergeArgs),

    /// Print the JSON Schema of the model document or the config file
    Schema {
        /// Document to describe
        #[arg(value_enum, default_value = "model")]
        kind: SchemaKind,

        /// Write schema to file instead of stdout
        #[arg(short = 'O', long)]
        output_file: Option<PathBuf>,
    },

    /// Show or initialize configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Sub-subcommands for the `config` command
#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration (defaults merged with the file)
    Show,
    /// Write an example .appsettings-gen.yaml in the current directory
    Init,
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "warn"
    } else {
        "info"
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .init();

    match run(cli) {
        Ok(code) => {
            if code != exit_codes::SUCCESS {
                std::process::exit(code);
            }
        }
        Err(err) => {
            eprintln!("Error: {err:#}");
            std::process::exit(exit_codes::ERROR);
        }
    }
}

fn run(cli: Cli) -> Result<i32> {
    let quiet = cli.quiet;

    // Dispatch to command handlers
    match cli.command {
        Commands::Generate(args) => {
            let config = load_config(cli.config.as_deref())?;
            cli::run_generate(
                &args.model,
                &args.settings.into_input(),
                args.output_file,
                &config,
                quiet,
            )
        }

        Commands::Check(args) => {
            let config = load_config(cli.config.as_deref())?;
            cli::run_check(
                &args.model,
                &args.settings.into_input(),
                args.format,
                args.output_file,
                &config,
                quiet,
            )
        }

        Commands::Merge(args) => {
            let config = load_config(cli.config.as_deref())?;
            cli::run_merge(&args.settings.into_input(), args.output_file, &config, quiet)
        }

        Commands::Schema { kind, output_file } => cli::run_schema(kind, output_file, quiet),

        Commands::Config { action } => match action {
            ConfigAction::Show => {
                let (config, loaded_from) = config::load_or_default(cli.config.as_deref())
                    .context("Failed to load configuration")?;
                if let Some(path) = &loaded_from {
                    eprintln!("# Loaded from: {}", path.display());
                } else {
                    eprintln!("# No config file found; showing defaults");
                }
                let yaml = serde_yaml::to_string(&config).context("failed to serialize config")?;
                print!("{yaml}");
                Ok(exit_codes::SUCCESS)
            }
            ConfigAction::Init => {
                let target = std::env::current_dir()
                    .context("cannot determine current directory")?
                    .join(".appsettings-gen.yaml");
                if target.exists() {
                    bail!(
                        "{} already exists. Remove it first to re-initialize.",
                        target.display()
                    );
                }
                std::fs::write(&target, config::generate_example_config())
                    .with_context(|| format!("failed to write {}", target.display()))?;
                eprintln!("Created {}", target.display());
                Ok(exit_codes::SUCCESS)
            }
        },

        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "appsettings-gen", &mut io::stdout());
            Ok(exit_codes::SUCCESS)
        }
    }
}

/// Load the generator config; values are checked when the driver is built.
fn load_config(explicit: Option<&std::path::Path>) -> Result<GeneratorConfig> {
    let (config, loaded_from) =
        config::load_or_default(explicit).context("Failed to load configuration")?;
    if let Some(path) = &loaded_from {
        tracing::debug!("Loaded configuration from {}", path.display());
    }
    Ok(config)
}
