//! structer: generate a Go struct from a tabular sample.

use std::path::PathBuf;

use clap::Parser;

use shapegen::commands::structer::{StructerArgs, handle_structer};
use shapegen::config::CliConfig;
use shapegen_core::inference::{DEFAULT_TIME_FORMAT, FormatRegistry};

#[derive(Parser)]
#[command(
    name = "structer",
    about = "Generate a Go struct and CSV marshal methods from a sample file",
    version
)]
struct Cli {
    /// Name for a struct tag to add to each field.
    #[arg(long)]
    tag: Option<String>,

    /// Type of the input, overrides the one inferred from the file name.
    #[arg(long = "type", value_name = "FORMAT")]
    format: Option<String>,

    /// Generated struct name, optionally package-qualified.
    #[arg(long = "as", default_value = "main.Struct")]
    as_name: String,

    /// Input file, - for stdin.
    #[arg(short = 'f', long = "file", default_value = "-")]
    input: String,

    /// Output file, - for stdout.
    #[arg(short, long, default_value = "-")]
    output: String,

    /// Layout of timestamp values, in Go reference-time form.
    #[arg(long)]
    time_format: Option<String>,

    /// Infer column types from every record instead of only the first.
    #[arg(long)]
    all_records: bool,

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

    let args = StructerArgs {
        tag: cli.tag.or(config.tag),
        format: cli.format,
        as_name: cli.as_name,
        input: cli.input,
        output: cli.output,
        time_format: cli
            .time_format
            .or(config.time_format)
            .unwrap_or_else(|| DEFAULT_TIME_FORMAT.to_string()),
        all_records: cli.all_records,
    };
    handle_structer(&args, &FormatRegistry::with_defaults())?;
    Ok(())
}
