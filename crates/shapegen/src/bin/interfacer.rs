//! interfacer: generate a Go interface from a named type's method set.

use std::path::PathBuf;

use clap::Parser;

use shapegen::commands::interfacer::{InterfacerArgs, handle_interfacer};
use shapegen::config::CliConfig;

#[derive(Parser)]
#[command(
    name = "interfacer",
    about = "Generate a Go interface for the methods of a named type",
    version
)]
struct Cli {
    /// Type to generate an interface for, e.g. "net/http".Client
    #[arg(long = "for", value_name = "QUERY")]
    query: String,

    /// Generated interface name, optionally package-qualified.
    #[arg(long = "as", default_value = "main.Interface")]
    as_name: String,

    /// Output file, - for stdout.
    #[arg(short, long, default_value = "-")]
    output: String,

    /// Include also unexported methods.
    #[arg(long)]
    all: bool,

    /// JSON or YAML catalog describing the packages to search.
    #[arg(long)]
    catalog: PathBuf,

    /// TOML file with default settings.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long)]
    log_level: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = CliConfig::load_optional(cli.config.as_deref())?;
    shapegen::init_tracing(&config.log_level(cli.log_level.as_deref()));

    let args = InterfacerArgs {
        query: cli.query,
        as_name: cli.as_name,
        output: cli.output,
        all: cli.all || config.unexported.unwrap_or(false),
        catalog: cli.catalog,
    };
    handle_interfacer(&args)?;
    Ok(())
}
