//! Phooey command-line interpreter.
//!
//! Usage: `phooey <file> [options]`. Program input comes from stdin and
//! program output goes to stdout; diagnostics and errors go to stderr.

use clap::{Parser, ValueEnum};
use phooey::{
    parse_program, BoundsPolicy, DivisionByZeroPolicy, Engine, EngineConfig, PhooeyError,
    StdinInput, SystemHost, TAPE_SIZE,
};
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "phooey", version)]
#[command(about = "Run a Phooey program")]
struct Cli {
    /// Path to the program source
    file: PathBuf,

    /// Number of tape cells
    #[arg(long, default_value_t = TAPE_SIZE)]
    tape_size: usize,

    /// What to do when the cursor leaves the tape
    #[arg(long, value_enum, default_value_t = Bounds::Error)]
    bounds: Bounds,

    /// What to do on division or modulo by zero
    #[arg(long, value_enum, default_value_t = DivZero::Error)]
    div_zero: DivZero,

    /// Stop with an error after this many instructions
    #[arg(long)]
    max_steps: Option<u64>,

    /// Seed for `~?` and `~r` (entropy when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Print the tokenized program and exit without running it
    #[arg(long)]
    tokens: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Bounds {
    Error,
    Wrap,
    Clamp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum DivZero {
    Error,
    Zero,
}

impl Cli {
    fn config(&self) -> EngineConfig {
        EngineConfig {
            tape_size: self.tape_size,
            bounds: match self.bounds {
                Bounds::Error => BoundsPolicy::Error,
                Bounds::Wrap => BoundsPolicy::Wrap,
                Bounds::Clamp => BoundsPolicy::Clamp,
            },
            division_by_zero: match self.div_zero {
                DivZero::Error => DivisionByZeroPolicy::Error,
                DivZero::Zero => DivisionByZeroPolicy::ReturnZero,
            },
            max_instructions: self.max_steps,
        }
    }
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: &Cli) -> Result<(), PhooeyError> {
    let source = fs::read(&cli.file)
        .map_err(|e| PhooeyError::io(format!("read {}", cli.file.display()), e))?;
    let program = parse_program(&source)?;
    debug!(file = %cli.file.display(), instructions = program.len(), "loaded program");

    if cli.tokens {
        let mut out = io::stdout().lock();
        for inst in &program.instructions {
            writeln!(out, "{}", inst).map_err(|e| PhooeyError::io("token dump", e))?;
        }
        return Ok(());
    }

    let host = match cli.seed {
        Some(seed) => SystemHost::seeded(seed),
        None => SystemHost::new(),
    };
    let mut engine = Engine::with_config(program, cli.config(), StdinInput::stdin(), io::stdout(), host);
    engine.run()?;
    Ok(())
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version exit 0; everything else is a usage error.
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            return ExitCode::from(code);
        }
    };
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            debug!(code = e.code(), category = ?e.category(), "run failed");
            eprintln!("{}", e);
            ExitCode::from(e.exit_code() as u8)
        }
    }
}
