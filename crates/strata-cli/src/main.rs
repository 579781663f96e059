use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use std::fs;
use std::path::{Path, PathBuf};
use strata::PermissionCodec;
use strata_cli::commands::{self, Workspace};
use strata_config::SecurityConfig;
use strata_core::RolePermissions;
use strata_observability::{init_console_logging, init_metrics};
use strata_repository::RepositorySnapshot;
use tracing::error;

#[derive(Parser)]
#[command(name = "strata-cli")]
#[command(about = "Strata CLI - Inspect and apply document permissions", long_about = None)]
struct Cli {
    /// Write Prometheus metrics of the run to this file
    #[arg(long, global = true)]
    metrics: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the configured permission schema
    Schema,
    /// Print the permissions stored on a node as JSON
    Hydrate {
        /// Repository snapshot file
        #[arg(short = 'r', long)]
        repository: PathBuf,

        /// Absolute node path
        #[arg(short = 'p', long)]
        path: String,

        /// Workspace to read from
        #[arg(short = 'w', long, value_enum, default_value = "draft")]
        workspace: Workspace,
    },
    /// Write permissions to the draft node and its live counterpart
    Persist {
        /// Repository snapshot file
        #[arg(short = 'r', long)]
        repository: PathBuf,

        /// Absolute node path
        #[arg(short = 'p', long)]
        path: String,

        /// JSON file mapping role ids to permission flags
        #[arg(long)]
        permissions: PathBuf,

        /// Treat the document as unpublished and leave the live workspace alone
        #[arg(long)]
        unpublished: bool,

        /// Write the resulting snapshot here instead of stdout
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,
    },
}

fn main() {
    dotenv().ok();
    init_console_logging();

    let cli = Cli::parse();
    let metrics_output = cli.metrics.clone();
    let metrics = metrics_output.as_ref().and_then(|_| init_metrics());

    let mut result = run(cli);

    if let (Some(path), Some(handle)) = (metrics_output, metrics) {
        let written = fs::write(&path, handle.render())
            .with_context(|| format!("Failed to write metrics to {}", path.display()));
        result = result.and(written);
    }

    if let Err(e) = result {
        error!(error = %e, "Command failed");
        eprintln!("❌ {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = SecurityConfig::from_env().context("Invalid security configuration")?;
    let codec = PermissionCodec::from_config(&config).context("Invalid permission schema")?;

    match cli.command {
        Commands::Schema => {
            println!("{}", commands::schema_report(codec.schema()));
        }
        Commands::Hydrate {
            repository,
            path,
            workspace,
        } => {
            let snapshot = load_snapshot(&repository)?;
            let permissions = commands::hydrate(&snapshot, &codec, &path, workspace)?;
            println!("{}", serde_json::to_string_pretty(&permissions)?);
        }
        Commands::Persist {
            repository,
            path,
            permissions,
            unpublished,
            output,
        } => {
            let mut snapshot = load_snapshot(&repository)?;
            let permissions = load_permissions(&permissions)?;
            commands::persist(&mut snapshot, &codec, &path, permissions, !unpublished)?;

            let json = snapshot.to_json()?;
            match output {
                Some(output) => fs::write(&output, json)
                    .with_context(|| format!("Failed to write {}", output.display()))?,
                None => println!("{}", json),
            }
        }
    }

    Ok(())
}

fn load_snapshot(path: &Path) -> Result<RepositorySnapshot> {
    let json =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    RepositorySnapshot::from_json(&json)
        .with_context(|| format!("Invalid repository snapshot {}", path.display()))
}

fn load_permissions(path: &Path) -> Result<RolePermissions> {
    let json =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&json).with_context(|| format!("Invalid permissions {}", path.display()))
}
