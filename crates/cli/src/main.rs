use anyhow::{Context as AnyhowContext, Result};
use clap::{Args, Parser, Subcommand};
use command::{classify_error, CommandHandler};
use retitle_chopper::{ChopperConfig, Item};
use retitle_protocol::{
    serialize_json, serialize_json_pretty, CommandAction, CommandRequest, CommandResponse,
    ResponseMeta, COMMAND_API_VERSION,
};
use serde_json::Value;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

mod command;

fn print_stdout(text: &str) -> Result<()> {
    use std::io::Write;

    let mut stdout = io::stdout().lock();
    if let Err(err) = stdout
        .write_all(text.as_bytes())
        .and_then(|_| stdout.write_all(b"\n"))
        .and_then(|_| stdout.flush())
    {
        if err.kind() == io::ErrorKind::BrokenPipe {
            return Ok(());
        }
        return Err(err.into());
    }
    Ok(())
}

#[derive(Parser)]
#[command(name = "retitle")]
#[command(about = "Shorten near-duplicate labels by dropping shared leading words", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors
    #[arg(long, global = true)]
    quiet: bool,

    /// Chopper configuration file (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute display labels for a set of items
    Compress(ItemsArgs),

    /// Show the per-group chop plan without rendering labels
    Plan(ItemsArgs),

    /// Restore every item's full label
    Reset(ItemsArgs),

    /// Execute a JSON Command API request
    Command(CommandArgs),
}

#[derive(Args)]
struct ItemsArgs {
    /// JSON file holding an array of items (reads stdin when omitted)
    #[arg(long)]
    input: Option<PathBuf>,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,
}

#[derive(Args)]
struct CommandArgs {
    /// Inline JSON payload (mutually exclusive with --file)
    #[arg(long, conflicts_with = "file")]
    json: Option<String>,

    /// Path to file containing JSON payload
    #[arg(long)]
    file: Option<PathBuf>,

    /// Pretty-print JSON response
    #[arg(long)]
    pretty: bool,
}

fn main() -> Result<()> {
    let mut cli = Cli::parse();

    // The command API is driven by other programs; keep stderr to warnings.
    if matches!(cli.command, Commands::Command(_)) {
        cli.quiet = true;
    }

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    let config_path = cli.config.as_deref();
    match cli.command {
        Commands::Compress(args) => run_items(CommandAction::Compress, args, config_path)?,
        Commands::Plan(args) => run_items(CommandAction::Plan, args, config_path)?,
        Commands::Reset(args) => run_items(CommandAction::Reset, args, config_path)?,
        Commands::Command(args) => run_command(args, config_path)?,
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<ChopperConfig> {
    let Some(path) = path else {
        return Ok(ChopperConfig::default());
    };
    let config = ChopperConfig::load(path)
        .with_context(|| format!("Failed to load config from {}", path.display()))?;
    log::debug!("Loaded config from {}: {config:?}", path.display());
    Ok(config)
}

fn run_items(action: CommandAction, args: ItemsArgs, config_path: Option<&Path>) -> Result<()> {
    let handler = CommandHandler::new(load_config(config_path)?)?;
    let raw = read_input(args.input.as_deref())?;
    let items: Vec<Item> =
        serde_json::from_str(&raw).context("Expected a JSON array of items")?;

    let data = handler.dispatch(action, &items)?;
    print_stdout(&render(&data, args.pretty)?)
}

fn run_command(args: CommandArgs, config_path: Option<&Path>) -> Result<()> {
    let raw = read_payload(&args)?;

    let response = match parse_request(&raw) {
        Ok(request) => {
            let action = request.action;
            match load_config(config_path).and_then(CommandHandler::new) {
                Ok(handler) => handler.execute(request),
                Err(err) => error_response(&err, Some(action)),
            }
        }
        Err(err) => error_response(&err, None),
    };

    let output = if args.pretty {
        serialize_json_pretty(&response)?
    } else {
        serialize_json(&response)?
    };
    print_stdout(&output)?;

    if response.is_error() {
        std::process::exit(1);
    }
    Ok(())
}

fn parse_request(raw: &str) -> Result<CommandRequest> {
    serde_json::from_str(raw).context("Invalid JSON passed to --json/--file")
}

fn error_response(err: &anyhow::Error, action: Option<CommandAction>) -> CommandResponse {
    CommandResponse::error(
        classify_error(err),
        ResponseMeta {
            api_version: COMMAND_API_VERSION,
            action,
            duration_ms: None,
        },
    )
}

fn render(data: &Value, pretty: bool) -> Result<String> {
    if pretty {
        serialize_json_pretty(data)
    } else {
        serialize_json(data)
    }
}

fn read_payload(args: &CommandArgs) -> Result<String> {
    if let Some(raw) = &args.json {
        return Ok(raw.clone());
    }
    read_input(args.file.as_deref())
}

fn read_input(path: Option<&Path>) -> Result<String> {
    if let Some(path) = path {
        return fs::read_to_string(path)
            .with_context(|| format!("Failed to read JSON from {}", path.display()));
    }

    let mut buffer = String::new();
    io::stdin()
        .read_to_string(&mut buffer)
        .context("Failed to read JSON from stdin")?;
    Ok(buffer)
}
