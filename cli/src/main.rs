//! repodeploy CLI - deploy a git repository into a local directory
//!
//! Usage:
//!   repodeploy                          # Report the deployment and write .env
//!   repodeploy deploy --sync --lock     # Sync, report, write .env, make files read-only
//!   repodeploy sync                     # Clone or update the checkout only
//!   repodeploy lock | unlock            # Permission sweeps over local_dir
//!   repodeploy env                      # Write local_dir/.env only

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use repodeploy::config::DEFAULT_CONFIG_PATH;
use repodeploy::{
    load_config, run_deployment, set_full, set_readonly, write_env_file, DeployLog,
    DeploymentConfig, FlowEvent, FlowOptions, RepoSynchronizer, SyncRequest, SystemRunner,
};

/// Deploy a git repository and report it to a deployment server
#[derive(Parser, Debug)]
#[command(name = "repodeploy")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Deployment config file
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Log output format
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<SubCmd>,
}

#[derive(Subcommand, Debug)]
enum SubCmd {
    /// Report the deployment, then write the .env file
    Deploy(DeployArgs),
    /// Clone or update the checkout
    Sync {
        /// Print the outcome as JSON
        #[arg(long)]
        json: bool,
    },
    /// Make every file in local_dir read-only, except exclude_ext files
    Lock,
    /// Give every file in local_dir full permissions
    Unlock,
    /// Write local_dir/.env from the env section
    Env,
}

#[derive(clap::Args, Debug, Default)]
struct DeployArgs {
    /// Deployment server base URL (overrides server_url in the config)
    #[arg(long)]
    server_url: Option<String>,

    /// User reported as deploying (defaults to USERNAME, then USER)
    #[arg(long)]
    username: Option<String>,

    /// Clone or update the checkout before reporting
    #[arg(long)]
    sync: bool,

    /// Make files read-only once the deployment is done
    #[arg(long)]
    lock: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

fn init_logging(format: LogFormat, verbose: u8) -> Result<()> {
    let default_level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    match format {
        LogFormat::Text => tracing::subscriber::set_global_default(builder.finish()),
        LogFormat::Json => tracing::subscriber::set_global_default(builder.json().finish()),
    }
    .context("Failed to install tracing subscriber")?;

    // The library logs through the `log` facade.
    tracing_log::LogTracer::init().context("Failed to bridge log records")?;
    Ok(())
}

fn print_log(log: &DeployLog) {
    for message in log.messages() {
        println!("{}", message);
    }
}

async fn deploy(config: &DeploymentConfig, args: DeployArgs) -> Result<ExitCode> {
    let mut options = FlowOptions::from_config(config);
    if let Some(server_url) = args.server_url {
        options.server_url = server_url;
    }
    if args.username.is_some() {
        options.username = args.username;
    }
    options.sync = args.sync;
    options.lock = args.lock;

    // Printed as each step finishes so a later failure keeps earlier output.
    run_deployment(config, &options, SystemRunner, print_event)
        .await
        .context("Deployment failed")?;

    Ok(ExitCode::SUCCESS)
}

fn print_event(event: FlowEvent<'_>) {
    match event {
        FlowEvent::Synced(outcome) => {
            print_log(&outcome.log);
            if !outcome.result.success {
                println!("{}", outcome.result.message);
            }
        }
        FlowEvent::Reported(outcome) => println!("{}", outcome.render()),
        FlowEvent::EnvFileWritten(path) => {
            println!("Creating .env file at {}", path.display())
        }
        FlowEvent::Locked(log) => print_log(log),
    }
}

async fn sync(config: &DeploymentConfig, json: bool) -> Result<ExitCode> {
    let request = SyncRequest::from_config(config)?;
    let outcome = tokio::task::spawn_blocking(move || {
        RepoSynchronizer::new(SystemRunner).synchronize(&request)
    })
    .await
    .context("Git task did not complete")?
    .context("Failed to run git")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        print_log(&outcome.log);
        if !outcome.result.message.is_empty() {
            println!("{}", outcome.result.message);
        }
    }

    Ok(if outcome.result.success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = Args::parse();
    init_logging(args.log_format, args.verbose)?;

    tracing::debug!("Using config file {}", args.config.display());
    let config = load_config(&args.config)
        .with_context(|| format!("Failed to load config: {}", args.config.display()))?;

    match args.command.unwrap_or(SubCmd::Deploy(DeployArgs::default())) {
        SubCmd::Deploy(deploy_args) => deploy(&config, deploy_args).await,
        SubCmd::Sync { json } => sync(&config, json).await,
        SubCmd::Lock => {
            let log = set_readonly(config.local_dir(), &config.exclude_ext)?;
            print_log(&log);
            Ok(ExitCode::SUCCESS)
        }
        SubCmd::Unlock => {
            let log = set_full(config.local_dir())?;
            print_log(&log);
            Ok(ExitCode::SUCCESS)
        }
        SubCmd::Env => {
            let Some(env) = &config.env else {
                bail!("No env section in {}", args.config.display());
            };
            let path = write_env_file(config.local_dir(), env)?;
            println!("Creating .env file at {}", path.display());
            Ok(ExitCode::SUCCESS)
        }
    }
}
