//! Blinc Select CLI
//!
//! Build a select widget from a native control description, replay an event
//! script against it and print the projection after every step.

use anyhow::{Context, Result};
use blinc_select::prelude::*;
use clap::{Parser, Subcommand};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod config;
mod script;

use script::Command;

#[derive(Parser)]
#[command(name = "blinc-select")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Drive a Blinc select widget from the command line", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay an event script and print a projection per step
    Run {
        /// Native control description (TOML)
        control: PathBuf,

        /// Widget configuration (TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Event script (reads stdin when omitted)
        #[arg(short, long)]
        script: Option<PathBuf>,

        /// Pretty-print projections
        #[arg(short, long)]
        pretty: bool,
    },

    /// Validate input files without running anything
    Check {
        /// Native control description (TOML)
        control: PathBuf,

        /// Widget configuration (TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Event script
        #[arg(short, long)]
        script: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    match cli.command {
        Commands::Run {
            control,
            config,
            script,
            pretty,
        } => cmd_run(&control, config.as_deref(), script.as_deref(), pretty),

        Commands::Check {
            control,
            config,
            script,
        } => cmd_check(&control, config.as_deref(), script.as_deref()),
    }
}

fn read_script(path: Option<&Path>) -> Result<Vec<Command>> {
    let source = match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read script {}", path.display()))?,
        None => {
            let mut source = String::new();
            std::io::stdin()
                .read_to_string(&mut source)
                .context("Failed to read script from stdin")?;
            source
        }
    };
    Ok(script::parse(&source)?)
}

fn cmd_check(control: &Path, config: Option<&Path>, script: Option<&Path>) -> Result<()> {
    let native = config::load_control(control)?;
    let config = config::load_config(config)?;
    info!(
        "Control OK: {} options (multiple: {}, searchable: {})",
        native.items.len(),
        native.attributes.multiple,
        config.searchable
    );

    if let Some(path) = script {
        let commands = read_script(Some(path))?;
        info!("Script OK: {} commands", commands.len());
    }

    Ok(())
}

fn cmd_run(
    control: &Path,
    config: Option<&Path>,
    script: Option<&Path>,
    pretty: bool,
) -> Result<()> {
    let mut native = config::load_control(control)?;
    let config = config::load_config(config)?;
    let commands = read_script(script)?;

    let mut host = ListenerRegistry::new();
    let mut select = SelectWidget::new(&native, config, &mut host);
    info!("Running {} commands", commands.len());

    print_projection(&select, pretty)?;

    for command in commands {
        apply(&mut select, &mut native, &mut host, command);

        // Mirror the widget's selection back into the native control
        if let Some(change) = select.take_change() {
            native.apply_change(&change);
            info!("change: {:?}", change.values);
        }

        print_projection(&select, pretty)?;
    }

    Ok(())
}

fn apply(
    select: &mut SelectWidget,
    native: &mut NativeSelect,
    host: &mut ListenerRegistry,
    command: Command,
) {
    let outcome = match command {
        Command::Click => select.handle_event(SelectEvent::ControlClick),
        Command::Outside => {
            // Only widgets holding a live subscription hear outside clicks
            let subscribed = host
                .listeners()
                .any(|listener| select.listener() == Some(listener));
            if subscribed {
                select.handle_event(SelectEvent::OutsideClick)
            } else {
                EventOutcome::Ignored
            }
        }
        Command::Key(code) => select.handle_event(SelectEvent::KeyDown(code)),
        Command::Search(text) => select.handle_event(SelectEvent::SearchInput(text)),
        Command::Option(value) => match select.option_id(&value) {
            Some(id) => select.handle_event(SelectEvent::OptionClick(id)),
            None => {
                warn!("No option with value '{}'", value);
                EventOutcome::Unchanged
            }
        },
        Command::Clear => {
            select.clear();
            EventOutcome::Changed
        }
        Command::Reload => {
            select.reload(&*native);
            EventOutcome::Changed
        }
        Command::Enable => {
            select.enable();
            EventOutcome::Changed
        }
        Command::Disable => {
            select.disable();
            EventOutcome::Changed
        }
        Command::Destroy => {
            select.destroy(host);
            EventOutcome::Changed
        }
        Command::Add { text, value } => {
            native.push(NativeOption::new(text, value));
            EventOutcome::Unchanged
        }
    };

    tracing::debug!("outcome: {:?} (re-render: {})", outcome, outcome.is_changed());
}

fn print_projection(select: &SelectWidget, pretty: bool) -> Result<()> {
    let projection = select.projection();
    let json = if pretty {
        serde_json::to_string_pretty(&projection)?
    } else {
        serde_json::to_string(&projection)?
    };
    println!("{}", json);
    Ok(())
}
