mod decl;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Parser)]
#[command(name = "argspec")]
#[command(version, about = "Parse argv and render help from argument declarations", long_about = None)]
#[command(disable_help_subcommand = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse tokens against the declarations and print the result as JSON
    Parse(ParseArgs),

    /// Print the full help screen
    Help(HelpArgs),

    /// Print the one-line usage summary
    Usage(SpecArgs),

    /// Validate the declaration file
    Check(SpecArgs),
}

#[derive(Parser)]
struct SpecArgs {
    /// Path to the declaration file (default: ./argspec.json)
    #[arg(short, long, value_name = "FILE")]
    spec: Option<PathBuf>,
}

#[derive(Parser)]
struct ParseArgs {
    #[command(flatten)]
    spec: SpecArgs,

    /// Print single-line JSON
    #[arg(long)]
    compact: bool,

    /// Tokens to parse, given after `--`
    #[arg(last = true, value_name = "TOKENS")]
    tokens: Vec<String>,
}

#[derive(Parser)]
struct HelpArgs {
    #[command(flatten)]
    spec: SpecArgs,

    /// Program name shown in the usage line
    #[arg(short = 'n', long, default_value = "program")]
    program: String,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Parse(args) => parse_command(args),
        Commands::Help(args) => help_command(args),
        Commands::Usage(args) => usage_command(args),
        Commands::Check(args) => check_command(args),
    }
}

fn load_spec(args: &SpecArgs) -> Result<argspec::Spec> {
    let (path, decls) = decl::load(args.spec.as_deref())?;
    decls.to_spec().map_err(|e| e.context(format!("invalid declarations in {}", path.display())))
}

fn parse_command(args: ParseArgs) -> Result<()> {
    tracing::debug!("executing parse command");

    let spec = load_spec(&args.spec)?;
    let matches = spec.parse(args.tokens.as_slice());

    let json = if args.compact {
        serde_json::to_string(&matches)?
    } else {
        serde_json::to_string_pretty(&matches)?
    };
    println!("{json}");

    if !matches.is_ok() {
        for error in matches.errors() {
            tracing::warn!("{error}");
        }
        std::process::exit(1);
    }

    Ok(())
}

fn help_command(args: HelpArgs) -> Result<()> {
    tracing::debug!("executing help command");

    let spec = load_spec(&args.spec)?;
    print!("{}", spec.help(&args.program));
    Ok(())
}

fn usage_command(args: SpecArgs) -> Result<()> {
    tracing::debug!("executing usage command");

    let spec = load_spec(&args)?;
    println!("{}", spec.arg_string());
    Ok(())
}

fn check_command(args: SpecArgs) -> Result<()> {
    tracing::debug!("executing check command");

    let spec = load_spec(&args)?;
    eprintln!(
        "OK: {} parameter(s), {} option(s)",
        spec.parameters().len(),
        spec.options().len()
    );
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
