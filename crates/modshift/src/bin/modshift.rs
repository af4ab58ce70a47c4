/// modshift CLI

use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use modshift::{ModuleFormat, TransformRequest, TransformResult, Transformer};
use serde_json::Value;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "modshift")]
#[command(about = "Convert JavaScript modules between ESM, AMD, CommonJS and SystemJS")]
#[command(version)]
struct Args {
    /// Input file, or `-` for stdin
    #[arg(value_name = "FILE", default_value = "-")]
    input: PathBuf,

    /// Target module format (esm, amd, cjs, sjs)
    #[arg(short, long, default_value_t = ModuleFormat::Esm)]
    format: ModuleFormat,

    /// Minify the output
    #[arg(short, long)]
    minify: bool,

    /// Source map of the input
    #[arg(long, value_name = "MAP")]
    source_map: Option<PathBuf>,

    /// Write code here instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Write the produced source map here
    #[arg(long, value_name = "FILE")]
    map_output: Option<PathBuf>,

    /// Read a JSON request and print a JSON result
    #[arg(long)]
    json: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let outcome = run(&args);
    if let Err(e) = &outcome {
        eprintln!("modshift: {:#}", e);
    }
    process::exit(exit_status(&outcome));
}

/// Exit status: 0 on success, 1 for any failure
fn exit_status(outcome: &Result<bool>) -> i32 {
    match outcome {
        Ok(true) => 0,
        Ok(false) | Err(_) => 1,
    }
}

/// Returns whether the transform succeeded
fn run(args: &Args) -> Result<bool> {
    let input = read_input(&args.input)?;
    let transformer: Transformer = Transformer::default();

    if args.json {
        let request: TransformRequest =
            serde_json::from_str(&input).context("Failed to parse JSON request")?;
        let result = transformer.transform(&request);
        println!("{}", serde_json::to_string(&result)?);
        return Ok(result.is_success());
    }

    let request = build_request(args, input)?;
    tracing::info!("Converting {} to {}", args.input.display(), args.format);

    match transformer.transform(&request) {
        TransformResult::Success { code, source_map } => {
            write_code(args.output.as_deref(), &code)?;
            if let (Some(path), Some(map)) = (&args.map_output, source_map) {
                std::fs::write(path, serde_json::to_string(&map)?)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
            }
            Ok(true)
        }
        TransformResult::Failure { errors } => {
            for error in errors {
                eprintln!("{}", error);
            }
            Ok(false)
        }
    }
}

fn build_request(args: &Args, code: String) -> Result<TransformRequest> {
    let mut request = TransformRequest::new(code)
        .format(args.format)
        .minify(args.minify);

    if let Some(path) = &args.source_map {
        request = request.source_map(read_source_map(path)?);
    }

    Ok(request)
}

fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf).context("Failed to read stdin")?;
        return Ok(buf);
    }

    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn read_source_map(path: &Path) -> Result<Value> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read source map {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("Invalid source map {}", path.display()))
}

fn write_code(path: Option<&Path>, code: &str) -> Result<()> {
    match path {
        Some(path) => std::fs::write(path, code)
            .with_context(|| format!("Failed to write {}", path.display())),
        None => {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{}", code)?;
            Ok(())
        }
    }
}
