//! kdctl - create and inspect application Deployments from a YAML file.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use kdctl::commands;
use kdctl::config::{default_kubeconfig, DeploymentConfig};
use kdctl::{ApiErrorKind, Error, JsonSink, KubeClient, LabelPolicy, SummarySink, TableSink};

/// kdctl - Declarative application deployments on Kubernetes.
#[derive(Parser)]
#[command(name = "kdctl")]
#[command(about = "Create and inspect application Deployments from a YAML config")]
#[command(version)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long, global = true, default_value = "false")]
    verbose: bool,

    /// Log output format.
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Get Deployment info using team and app name.
    Get {
        /// Owning team (namespace).
        team: String,

        /// App name.
        app: String,

        /// Path to the kubeconfig file (defaults to `$HOME/.kube/config`).
        #[arg(long, env = "KDCTL_KUBECONFIG")]
        kubeconfig: Option<PathBuf>,

        /// Output format.
        #[arg(long, short, value_enum, default_value_t = OutputFormat::Table)]
        output: OutputFormat,
    },

    /// Create a Deployment using a config file spec.
    Create {
        /// Path to the Deployment config file.
        config: PathBuf,

        /// Path to the kubeconfig file (defaults to `$HOME/.kube/config`).
        #[arg(long, env = "KDCTL_KUBECONFIG")]
        kubeconfig: Option<PathBuf>,

        /// Reject config labels that collide with labels managed by kdctl.
        #[arg(long, default_value = "false")]
        strict_labels: bool,

        /// Print the Deployment manifest instead of creating it.
        #[arg(long, default_value = "false")]
        dry_run: bool,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.log_format);

    match run(cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %format!("{err:#}"), "Command failed");
            eprintln!("\n❌ {}", format!("{err:#}").red());
            if let Some(hint) = hint(&err) {
                eprintln!("💡 {hint}");
            }
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool, format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        }
    });

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    match format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

async fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Get {
            team,
            app,
            kubeconfig,
            output,
        } => {
            let client = connect(kubeconfig.as_deref()).await?;
            let stdout = std::io::stdout().lock();
            let mut sink: Box<dyn SummarySink> = match output {
                OutputFormat::Table => Box::new(TableSink::new(stdout)),
                OutputFormat::Json => Box::new(JsonSink::new(stdout)),
            };

            commands::get(&client, sink.as_mut(), &team, &app).await?;
        }

        Commands::Create {
            config,
            kubeconfig,
            strict_labels,
            dry_run,
        } => {
            let deploy_config = DeploymentConfig::load(&config)?;
            let policy = if strict_labels {
                LabelPolicy::RejectReserved
            } else {
                LabelPolicy::LastWins
            };

            if dry_run {
                print!("{}", commands::render(&deploy_config, policy)?);
                return Ok(());
            }

            let client = connect(kubeconfig.as_deref()).await?;
            let ack = commands::create(&client, &deploy_config, policy).await?;

            println!("\n{}", "✅ Deployment created successfully!".green());
            println!("   Name:      {}", ack.name);
            println!("   Namespace: {}", ack.namespace);
            if let Some(uid) = &ack.uid {
                println!("   UID:       {uid}");
            }
            println!(
                "\n💡 Run `kdctl get {} {}` to check its status",
                ack.namespace, ack.name
            );
        }
    }

    Ok(())
}

/// Build the Kubernetes client from an explicit or default kubeconfig.
async fn connect(kubeconfig: Option<&Path>) -> Result<KubeClient> {
    if let Some(path) = kubeconfig {
        return KubeClient::from_kubeconfig(path).await;
    }

    match default_kubeconfig() {
        Some(path) => {
            info!(kubeconfig = %path.display(), "Using default kubeconfig");
            KubeClient::from_kubeconfig(&path).await
        }
        None => KubeClient::from_env()
            .await
            .context("No kubeconfig found; pass --kubeconfig or set KDCTL_KUBECONFIG"),
    }
}

fn hint(err: &anyhow::Error) -> Option<&'static str> {
    match err.downcast_ref::<Error>()? {
        Error::Api(failure) => match failure.kind {
            ApiErrorKind::AlreadyExists => {
                Some("A Deployment with this name already exists in the team namespace.")
            }
            ApiErrorKind::InvalidSpec => Some("Check the config values, e.g. with `create --dry-run`."),
            ApiErrorKind::Unreachable => Some("Check that the cluster in your kubeconfig is reachable."),
            ApiErrorKind::Unknown => None,
        },
        Error::Validation(_) | Error::Parse(_) => {
            Some("Required keys: name, team, image, port, replicas (description and labels optional).")
        }
        _ => None,
    }
}
