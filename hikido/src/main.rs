mod app;
mod core;
mod desktop;
mod hotkey;
mod platform;

use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use argh::FromArgs;
use hikido_ipc::Rect;
use tracing_subscriber::EnvFilter;

use crate::app::App;
use crate::core::Config;
use crate::desktop::Desktop;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Hikido - keyboard and mouse window placement
#[derive(FromArgs)]
struct Cli {
    #[argh(subcommand)]
    command: Option<SubCommand>,
}

#[derive(FromArgs)]
#[argh(subcommand)]
enum SubCommand {
    Replay(ReplayCmd),
    ListBindings(ListBindingsCmd),
    Version(VersionCmd),
}

/// Replay JSON-lines events against a desktop and print a response per event
#[derive(FromArgs)]
#[argh(subcommand, name = "replay")]
struct ReplayCmd {
    /// desktop fixture (JSON); defaults to a single 1920x1080 screen
    #[argh(option)]
    desktop: Option<PathBuf>,
    /// config file; defaults to the user config directory
    #[argh(option)]
    config: Option<PathBuf>,
    /// event script; reads stdin when omitted
    #[argh(positional)]
    script: Option<PathBuf>,
}

/// List hotkey bindings
#[derive(FromArgs)]
#[argh(subcommand, name = "list-bindings")]
struct ListBindingsCmd {
    /// config file; defaults to the user config directory
    #[argh(option)]
    config: Option<PathBuf>,
}

/// Show version information
#[derive(FromArgs)]
#[argh(subcommand, name = "version")]
struct VersionCmd {}

fn main() -> Result<()> {
    let cli: Cli = argh::from_env();

    match cli.command {
        None => {
            // No subcommand - show help (simulate --help)
            let args: Vec<&str> = vec!["hikido", "--help"];
            if let Err(e) = Cli::from_args(&args[..1], &args[1..]) {
                println!("{}", e.output);
            }
            Ok(())
        }
        Some(SubCommand::Replay(cmd)) => {
            init_tracing();
            tracing::info!("hikido {} replaying", VERSION);
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_time()
                .build()?;
            runtime.block_on(replay(cmd))
        }
        Some(SubCommand::ListBindings(cmd)) => {
            init_tracing();
            list_bindings(cmd.config.as_deref())
        }
        Some(SubCommand::Version(_)) => {
            println!("hikido {}", VERSION);
            Ok(())
        }
    }
}

/// Logs go to stderr so stdout stays one JSON response per line.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();
}

async fn replay(cmd: ReplayCmd) -> Result<()> {
    let config = Config::load_or_default(cmd.config.as_deref())?;
    let desktop = match &cmd.desktop {
        Some(path) => Desktop::load(path)?,
        None => Desktop::new().with_screen(
            1,
            Rect::new(0, 0, 1920, 1080),
            Some(Rect::new(0, 25, 1920, 1055)),
        ),
    };
    let mut app = App::new(config)?;
    let mut stdout = io::stdout().lock();

    match &cmd.script {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open script {}", path.display()))?;
            app::run_replay(&mut app, &desktop, BufReader::new(file), &mut stdout).await?;
        }
        None => {
            let stdin = io::stdin().lock();
            app::run_replay(&mut app, &desktop, stdin, &mut stdout).await?;
        }
    }
    Ok(())
}

fn list_bindings(config: Option<&Path>) -> Result<()> {
    let app = App::new(Config::load_or_default(config)?)?;
    for (key, command) in app.bindings().list() {
        println!("{} -> {}", key, command.label());
    }
    Ok(())
}
