//! unitr-cli - Evaluate quantities with SI prefixed units
//!
//! Usage:
//!   unitr-cli "5000 nN"                # Single expression, printed in simple form
//!   unitr-cli "1.5 km" --to m          # Conversion
//!   echo "7200 s" | unitr-cli          # Pipe mode
//!   unitr-cli -f quantities.txt --json # File mode, JSON records
//!   unitr-cli -i                       # Interactive REPL

mod output;

use std::io::{self, BufRead, IsTerminal, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use unitr_core::{parse_expression, parse_unit, FormatOptions, PrefixedUnit};

use output::Record;

#[derive(Parser, Debug)]
#[command(name = "unitr-cli")]
#[command(about = "Evaluate values with SI prefixed units", long_about = None)]
struct Args {
    /// Expression to evaluate, e.g. "5000 nN"
    expression: Option<String>,

    /// Read expressions from file, one per line
    #[arg(short, long, value_name = "FILE")]
    file: Option<PathBuf>,

    /// Interactive REPL mode
    #[arg(short, long)]
    interactive: bool,

    /// Convert every result into this unit
    #[arg(short, long, value_name = "UNIT")]
    to: Option<String>,

    /// Keep the unit as written instead of picking a simple form
    #[arg(short, long)]
    raw: bool,

    /// Render exponents as superscripts
    #[arg(short, long)]
    pretty: bool,

    /// Significant digits in printed values
    #[arg(short, long, default_value_t = 6)]
    digits: u32,

    /// Emit one JSON record per line
    #[arg(short, long)]
    json: bool,

    /// List candidate units whose total prefix exponent differs by MIN..MAX
    #[arg(long, value_name = "MIN..MAX", value_parser = parse_range, allow_hyphen_values = true)]
    derive: Option<(i32, i32)>,

    /// Show only the result (no input echo)
    #[arg(short, long)]
    quiet: bool,

    /// Log debug output to stderr
    #[arg(short, long)]
    verbose: bool,
}

/// Everything needed to evaluate one line
struct Settings {
    target: Option<PrefixedUnit>,
    raw: bool,
    derive: Option<(i32, i32)>,
    format: FormatOptions,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let settings = Settings {
        target: args
            .to
            .as_deref()
            .map(|unit| parse_unit(unit).with_context(|| format!("invalid --to unit {unit:?}")))
            .transpose()?,
        raw: args.raw,
        derive: args.derive,
        format: FormatOptions {
            significant_digits: args.digits,
            pretty: args.pretty,
        },
    };
    debug!(to = ?settings.target, derive = ?settings.derive, "settings");

    let mut failures = 0;
    let mut emit = |line: &str| -> Result<()> {
        if let Some(record) = evaluate_line(line, &settings) {
            if record.is_error() {
                failures += 1;
            }
            print_record(&record, args.json, args.quiet)?;
        }
        Ok(())
    };

    if let Some(expr) = &args.expression {
        emit(expr)?;
    } else if let Some(path) = &args.file {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        for line in content.lines() {
            emit(line)?;
        }
    } else if args.interactive {
        run_repl(&mut emit)?;
    } else if !io::stdin().is_terminal() {
        for line in io::stdin().lock().lines() {
            emit(&line?)?;
        }
    } else {
        eprintln!("Usage: unitr-cli <expression>");
        eprintln!("       unitr-cli -f <file>");
        eprintln!("       unitr-cli -i");
        eprintln!("       echo \"5000 nN\" | unitr-cli");
        std::process::exit(1);
    }

    if failures > 0 {
        bail!("{failures} expression(s) could not be evaluated");
    }
    Ok(())
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

/// Evaluate one input line; blank lines and `#` comments yield nothing.
/// Anything after `=>` is ignored so annotated example files can be fed in.
fn evaluate_line(line: &str, settings: &Settings) -> Option<Record> {
    let input = line.split_once("=>").map_or(line, |(lhs, _)| lhs).trim();
    if input.is_empty() || input.starts_with('#') {
        return None;
    }
    Some(match evaluate(input, settings) {
        Ok(record) => record,
        Err(err) => Record::error(input, &err),
    })
}

fn evaluate(input: &str, settings: &Settings) -> Result<Record> {
    let expr = parse_expression(input)?;
    let result = match &settings.target {
        Some(unit) => expr
            .derive(unit)
            .with_context(|| format!("cannot convert {input:?} to {unit}"))?,
        None if settings.raw => expr,
        None => expr.derive_simple_form(),
    };
    let candidates = settings
        .derive
        .map(|(min, max)| {
            result
                .unit()
                .derive_units(min, max)
                .iter()
                .map(|u| u.render(settings.format.pretty))
                .collect()
        })
        .unwrap_or_default();
    Ok(Record::expression(input, &result, candidates, &settings.format))
}

fn print_record(record: &Record, json: bool, quiet: bool) -> Result<()> {
    let mut stdout = io::stdout().lock();
    if json {
        writeln!(stdout, "{}", serde_json::to_string(record)?)?;
    } else {
        writeln!(stdout, "{}", record.to_text(quiet))?;
    }
    Ok(())
}

fn run_repl(emit: &mut impl FnMut(&str) -> Result<()>) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    println!("unitr - SI unit calculator");
    println!("Type a value with a unit. Press Ctrl+D to exit.\n");

    loop {
        print!("> ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            println!();
            break;
        }

        let line = line.trim();
        match line.to_lowercase().as_str() {
            "" => continue,
            "quit" | "exit" => break,
            "help" => {
                print_help();
                continue;
            }
            _ => {}
        }

        emit(line)?;
    }

    Ok(())
}

fn print_help() {
    println!(
        r#"
Commands:
  help     Show this help
  quit     Exit the REPL

Examples:
  5000 nN              Shown as 5 µN
  7200 s               Shown as 2 h
  2500 µm/V            Shown as 2.5 mm/V
  3 (kg m)/s^2         Products and powers
  1.5e-3 N·m           Scientific notation, · or * between units
"#
    );
}

/// Parse `MIN..MAX` (either bound may be negative)
fn parse_range(s: &str) -> std::result::Result<(i32, i32), String> {
    let (min, max) = s
        .split_once("..")
        .ok_or_else(|| format!("expected MIN..MAX, got {s:?}"))?;
    let min: i32 = min.trim().parse().map_err(|e| format!("invalid MIN {min:?}: {e}"))?;
    let max: i32 = max.trim().parse().map_err(|e| format!("invalid MAX {max:?}: {e}"))?;
    if min > max {
        return Err(format!("MIN {min} is larger than MAX {max}"));
    }
    Ok((min, max))
}
