//! irrpkg - recipe driver for the irrlicht-engine package
//!
//! Parses the command line, loads configuration, runs the recipe phases and
//! turns the events they emit into log records.

mod cli;
mod error;
mod logging;

use crate::cli::{Cli, Commands, RecipeArgs};
use crate::error::CliError;
use clap::Parser;
use irrpkg_builder::{load_recipe, BuildContext, Phase, RecipeDriver, RecipeReport};
use irrpkg_config::Config;
use irrpkg_events::{EventReceiver, EventSender};
use irrpkg_types::ColorChoice;
use std::future::Future;
use std::io::IsTerminal;
use std::process;
use tokio::select;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        error!("Application error: {}", e);
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

/// Main application logic
async fn run(cli: Cli) -> Result<(), CliError> {
    // File config (or defaults), then environment, then CLI flags
    let mut config = Config::load_or_default(cli.global.config.as_deref()).await?;
    config.merge_env()?;

    init_tracing(
        cli.global.json,
        cli.global.debug,
        cli.global.color.unwrap_or(config.general.color),
    );
    info!("Starting irrpkg v{}", env!("CARGO_PKG_VERSION"));

    let (event_sender, event_receiver) = irrpkg_events::channel();
    let json = cli.global.json;

    match cli.command {
        Commands::Create(args) => {
            let mut driver = prepare_driver(&config, &args, event_sender).await?;
            let report = with_events(driver.run(), event_receiver).await?;
            render_create(&report, json)?;
        }
        Commands::Inspect { recipe, resolve } => {
            let mut driver = prepare_driver(&config, &recipe, event_sender).await?;
            if !resolve {
                driver = driver.declare_only();
            }
            let report = with_events(driver.run_phases(&Phase::METADATA), event_receiver).await?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    info!("Command completed successfully");
    Ok(())
}

/// Apply CLI flags on top of the loaded configuration and load the recipe
async fn prepare_driver(
    config: &Config,
    args: &RecipeArgs,
    event_sender: EventSender,
) -> Result<RecipeDriver, CliError> {
    let mut context = BuildContext::from_config(config, args.recipe_dir.clone())?
        .with_event_sender(event_sender);

    for (key, value) in &args.settings {
        context.settings.set(key, value)?;
    }
    for (name, value) in &args.options {
        context = context.with_option(name.clone(), value.clone());
    }
    if let Some(cache) = &args.cache {
        context.cache_root.clone_from(cache);
    }
    if let Some(build_folder) = &args.build_folder {
        context = context.with_build_root(build_folder.clone());
    }
    if let Some(jobs) = args.jobs {
        context = context.with_jobs(jobs);
    }
    if args.no_exports {
        context = context.with_exports(false);
    }

    let recipe = load_recipe(&args.recipe_dir, args.recipe.as_deref()).await?;
    Ok(RecipeDriver::new(recipe, context))
}

/// Drive `operation` while logging every event it emits
async fn with_events<T>(
    operation: impl Future<Output = Result<T, irrpkg_errors::Error>>,
    mut event_receiver: EventReceiver,
) -> Result<T, CliError> {
    let mut operation = Box::pin(operation);

    loop {
        select! {
            result = &mut operation => {
                // Drain any remaining events
                while let Ok(event) = event_receiver.try_recv() {
                    logging::log_event_with_tracing(&event);
                }
                return result.map_err(CliError::from);
            }

            event = event_receiver.recv() => {
                if let Some(event) = event {
                    logging::log_event_with_tracing(&event);
                }
            }
        }
    }
}

fn render_create(report: &RecipeReport, json: bool) -> Result<(), CliError> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    let version = report
        .version
        .as_ref()
        .map_or_else(|| "?".to_string(), ToString::to_string);
    println!("{}/{version}", report.name);
    if let Some(id) = &report.package_id {
        println!("  package id:     {id}");
    }
    if let Some(folder) = &report.package_folder {
        println!("  package folder: {}", folder.display());
    }
    if let Some(info) = &report.package_info {
        for (name, component) in &info.components {
            let target = component.cmake_target_name().unwrap_or(name);
            println!("  component {name}: {} ({target})", component.libs.join(", "));
        }
    }
    Ok(())
}

/// Initialize tracing/logging on stderr
fn init_tracing(json_mode: bool, debug_enabled: bool, color: ColorChoice) {
    let default_filter = if debug_enabled {
        "info,irrpkg=debug"
    } else {
        "warn,irrpkg=info"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter));

    let ansi = match color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => std::io::stderr().is_terminal(),
    };

    if json_mode {
        let _ = tracing_subscriber::fmt()
            .json()
            .with_writer(std::io::stderr)
            .with_env_filter(filter)
            .try_init();
    } else {
        let _ = tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_ansi(ansi)
            .with_target(debug_enabled)
            .with_env_filter(filter)
            .try_init();
    }
}
