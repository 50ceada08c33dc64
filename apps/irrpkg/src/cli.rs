//! Command line interface definition

use clap::{Args, Parser, Subcommand};
use irrpkg_types::ColorChoice;
use std::path::PathBuf;

/// irrpkg - build and package the irrlicht-engine recipe
#[derive(Parser)]
#[command(name = "irrpkg")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Build and package the irrlicht-engine recipe with CMake")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalArgs,
}

/// Global arguments available for all commands
#[derive(Parser)]
pub struct GlobalArgs {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Color output control
    #[arg(long, global = true, value_enum)]
    pub color: Option<ColorChoice>,

    /// Use alternate config file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Run every phase and create the package in the local cache
    Create(RecipeArgs),

    /// Evaluate version, options, requirements and package info only
    Inspect {
        #[command(flatten)]
        recipe: RecipeArgs,

        /// Locate requirements in the local cache as well
        #[arg(long)]
        resolve: bool,
    },
}

/// Where the recipe lives and what to evaluate it against
#[derive(Args)]
pub struct RecipeArgs {
    /// Folder holding CMakeLists.txt, LICENSE.md and the sources
    #[arg(value_name = "RECIPE_DIR")]
    pub recipe_dir: PathBuf,

    /// Recipe file to use instead of `<RECIPE_DIR>/irrpkg.yml`
    #[arg(long, value_name = "PATH")]
    pub recipe: Option<PathBuf>,

    /// Setting override, e.g. `-s os=Windows` (repeatable)
    #[arg(short = 's', long = "setting", value_name = "KEY=VALUE", value_parser = parse_key_value)]
    pub settings: Vec<(String, String)>,

    /// Option override, e.g. `-o shared=True` (repeatable)
    #[arg(short = 'o', long = "option", value_name = "NAME=VALUE", value_parser = parse_key_value)]
    pub options: Vec<(String, String)>,

    /// Build folder to use instead of one derived from the cache
    #[arg(long, value_name = "PATH")]
    pub build_folder: Option<PathBuf>,

    /// Package cache root
    #[arg(long, value_name = "PATH")]
    pub cache: Option<PathBuf>,

    /// Number of parallel build jobs
    #[arg(short = 'j', long)]
    pub jobs: Option<usize>,

    /// Build straight from the recipe folder without exporting sources
    #[arg(long)]
    pub no_exports: bool,
}

fn parse_key_value(input: &str) -> Result<(String, String), String> {
    let (key, value) = input
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got `{input}`"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("missing key in `{input}`"));
    }
    Ok((key.to_string(), value.trim().to_string()))
}
