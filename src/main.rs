//! Command-line entry point: encipher text on a configured machine.

use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{filter::Directive, fmt, prelude::*, EnvFilter};

use enigma_machine::{MachineConfig, TracingObserver};

#[derive(Parser)]
#[command(name = "enigma")]
#[command(about = "Encipher or decipher text on an Enigma I or M3 machine")]
struct Cli {
    /// TOML machine configuration; overrides the component flags
    #[arg(long)]
    config: Option<PathBuf>,
    /// Machine variant (ENIGMA_I, ENIGMA_M3)
    #[arg(long, default_value = "ENIGMA_I")]
    machine: String,
    /// Reflector (B, C)
    #[arg(long, default_value = "B")]
    reflector: String,
    /// Rotors left to right, comma separated
    #[arg(long, default_value = "I,II,III")]
    rotors: String,
    /// Starting positions, one letter per rotor
    #[arg(long, default_value = "")]
    positions: String,
    /// Ring settings, letters or comma separated numbers 1-26
    #[arg(long, default_value = "")]
    rings: String,
    /// Plugboard pairs, e.g. "AB CD EF"
    #[arg(long, default_value = "")]
    plugboard: String,
    /// Log every step and substitution to stderr
    #[arg(long)]
    trace: bool,
    /// Text to encipher; read from stdin when omitted
    text: Option<String>,
}

/// Filter directive that `--trace` adds on top of `RUST_LOG`.
const TRACE_DIRECTIVE: &str = "enigma_machine=debug";

/// Starts from `RUST_LOG` (or `warn` when unset or invalid) and raises this
/// crate to `debug` when `trace` is set.
fn env_filter(trace: bool, env: Option<&str>) -> EnvFilter {
    let filter = env
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new("warn"));
    match TRACE_DIRECTIVE.parse::<Directive>() {
        Ok(directive) if trace => filter.add_directive(directive),
        _ => filter,
    }
}

fn init_tracing(trace: bool) {
    let env = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr).with_target(false))
        .with(env_filter(trace, env.as_deref()))
        .init();
}

fn load_config(cli: &Cli) -> Result<MachineConfig> {
    match &cli.config {
        Some(path) => {
            let document = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config at {}", path.display()))?;
            Ok(MachineConfig::from_toml_str(&document)?)
        }
        None => Ok(MachineConfig::from_strings(
            &cli.machine,
            &cli.reflector,
            &cli.rotors,
            &cli.positions,
            &cli.rings,
            &cli.plugboard,
        )?),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.trace);

    let mut enigma = load_config(&cli)?.build()?;

    let raw = match &cli.text {
        Some(text) => text.clone(),
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read text from stdin")?;
            buffer
        }
    };
    let text: String = raw
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .map(|c| c.to_ascii_uppercase())
        .collect();

    let output = if cli.trace {
        enigma.encipher_with(&text, &mut TracingObserver)?
    } else {
        enigma.encipher(&text)?
    };
    println!("{}", output);
    Ok(())
}
