use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Args as ClapArgs, Parser, Subcommand};
use regjson::{CodecOptions, RegistryEditor, TracingSink};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "regjson",
    about = "Convert between JSON registry trees and Windows .reg files",
    version
)]
struct Cli {
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Convert a JSON file to a Windows registry file
    Json2reg(ConvertArgs),
    /// Convert a Windows registry file to JSON
    Reg2json(ConvertArgs),
}

#[derive(ClapArgs, Debug)]
struct ConvertArgs {
    /// Input file
    #[arg(value_name = "InFilePath")]
    input: PathBuf,
    /// Output file (defaults to the input path with .reg / .json appended)
    #[arg(short, long, value_name = "OutFilePath")]
    output: Option<PathBuf>,
    /// Report every key and value found
    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let verbose = match &cli.cmd {
        Cmd::Json2reg(a) | Cmd::Reg2json(a) => a.verbose,
    };
    init_tracing(verbose);

    match run(cli.cmd) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

fn run(cmd: Cmd) -> anyhow::Result<()> {
    let mut sink = TracingSink;
    let report = match cmd {
        Cmd::Json2reg(args) => {
            let options = CodecOptions { verbose: args.verbose };
            RegistryEditor::convert_json_file(&args.input, args.output.as_deref(), options, &mut sink)
                .with_context(|| format!("converting {} to .reg", args.input.display()))?
        }
        Cmd::Reg2json(args) => {
            let options = CodecOptions { verbose: args.verbose };
            RegistryEditor::convert_reg_file(&args.input, args.output.as_deref(), options, &mut sink)
                .with_context(|| format!("converting {} to JSON", args.input.display()))?
        }
    };
    if !report.warnings.is_empty() {
        info!("{} item(s) skipped", report.warnings.len());
    }
    println!("Successfully wrote to {}", report.output.display());
    Ok(())
}
