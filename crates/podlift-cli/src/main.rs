//! podlift - rebuild a CocoaPods static framework as a dynamic
//! universal framework.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use podlift_core::Arch;
use tracing_subscriber::EnvFilter;

mod cmd;
mod ui;

#[derive(Parser)]
#[command(name = "podlift")]
#[command(
    author,
    version,
    about = "Rebuild a CocoaPods static framework as a dynamic universal framework"
)]
pub struct Cli {
    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the universal dynamic framework for a pod
    Build {
        /// Pod name as published in the registry
        pod: String,
        /// Property-list descriptor installed into the framework bundle
        #[arg(long, default_value = "./Info.plist")]
        plist: PathBuf,
        /// Directory the final archive is written to
        #[arg(long, default_value = ".")]
        output_dir: PathBuf,
        /// Toolchain configuration file (TOML)
        #[arg(long)]
        config: Option<PathBuf>,
        /// Minimum OS version baked into every link command
        #[arg(long)]
        min_os: Option<String>,
        /// Target architecture (repeatable; overrides the configured list)
        #[arg(long = "arch")]
        archs: Vec<Arch>,
        /// Keep the build workspace on disk for inspection
        #[arg(long)]
        keep_workspace: bool,
    },
    /// Resolve and print a pod's linker-relevant metadata
    Spec {
        /// Pod name as published in the registry
        pod: String,
        /// Emit machine-readable JSON
        #[arg(long)]
        json: bool,
    },
    /// Generate shell completions
    #[command(hide = true)]
    Completions {
        /// Shell to generate completions for
        shell: clap_complete::Shell,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let output = ui::Output::new(cli.quiet);

    let result = match cli.command {
        Commands::Build {
            pod,
            plist,
            output_dir,
            config,
            min_os,
            archs,
            keep_workspace,
        } => {
            cmd::build::build(
                &output,
                cmd::build::BuildOptions {
                    pod,
                    plist,
                    output_dir,
                    config,
                    min_os,
                    archs,
                    keep_workspace,
                },
            )
            .await
        }
        Commands::Spec { pod, json } => cmd::spec::spec(&pod, json).await,
        Commands::Completions { shell } => {
            cmd::completions::completions(shell);
            Ok(())
        }
    };

    if let Err(err) = result {
        output.failed(&format!("{err:#}"));
        std::process::exit(1);
    }

    Ok(())
}
