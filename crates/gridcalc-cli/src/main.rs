//! gridcalc CLI - evaluate tokenized formulas against a sheet snapshot

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use gridcalc_core::SheetSnapshot;
use gridcalc_formula::{classify, evaluate, TokenKind};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "gridcalc")]
#[command(author, version, about = "Evaluate tokenized spreadsheet formulas")]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace); RUST_LOG overrides
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate one formula and print its value or error code
    Eval {
        /// JSON sheet snapshot to resolve cell references against
        #[arg(short, long)]
        sheet: Option<PathBuf>,

        /// Set a cell to a number before evaluating (e.g. A1=5), repeatable
        #[arg(
            short,
            long = "cell",
            value_name = "LABEL=NUMBER",
            value_parser = parse_cell_assignment
        )]
        cells: Vec<(String, f64)>,

        /// Formula tokens, e.g. `( A1 + 2 ) * 3`
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        tokens: Vec<String>,
    },

    /// Print how each token is classified
    Classify {
        /// Tokens to classify
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        tokens: Vec<String>,
    },
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Eval {
            sheet,
            cells,
            tokens,
        } => eval(sheet.as_deref(), &cells, &tokens),
        Commands::Classify { tokens } => classify_tokens(&tokens),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn eval(
    sheet_path: Option<&Path>,
    cells: &[(String, f64)],
    tokens: &[String],
) -> Result<ExitCode> {
    let mut sheet = match sheet_path {
        Some(path) => load_sheet(path)?,
        None => SheetSnapshot::new(),
    };

    for (label, value) in cells {
        sheet
            .set_value(label, *value)
            .with_context(|| format!("Invalid --cell '{}={}'", label, value))?;
    }

    log::debug!("evaluating {:?} against {} cells", tokens, sheet.len());

    match evaluate(tokens, &sheet) {
        Ok(value) => {
            println!("{}", format_number(value));
            Ok(ExitCode::SUCCESS)
        }
        Err(error) => {
            println!("{}", error.as_str());
            eprintln!("Error: {}", error);
            Ok(ExitCode::from(2))
        }
    }
}

fn classify_tokens(tokens: &[String]) -> Result<ExitCode> {
    let sheet = SheetSnapshot::new();
    let mut rejected = false;

    for token in tokens {
        let kind = match classify(token, &sheet) {
            Ok(TokenKind::Number(n)) => format!("number\t{}", format_number(n)),
            Ok(TokenKind::CellReference(label)) => format!("cell\t{}", label),
            Ok(TokenKind::Operator(op)) => {
                format!("operator\t{} (precedence {})", op, op.precedence())
            }
            Ok(TokenKind::LeftParen) => "open-paren".to_string(),
            Ok(TokenKind::RightParen) => "close-paren".to_string(),
            Err(error) => {
                rejected = true;
                format!("rejected\t{}", error.as_str())
            }
        };
        println!("{}\t{}", token, kind);
    }

    Ok(if rejected {
        ExitCode::from(2)
    } else {
        ExitCode::SUCCESS
    })
}

/// Load a JSON sheet snapshot
fn load_sheet(path: &Path) -> Result<SheetSnapshot> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read '{}'", path.display()))?;
    let sheet = serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse sheet snapshot '{}'", path.display()))?;
    Ok(sheet)
}

/// Parse a `LABEL=NUMBER` cell assignment
fn parse_cell_assignment(s: &str) -> Result<(String, f64)> {
    let Some((label, value)) = s.split_once('=') else {
        bail!("expected LABEL=NUMBER, got '{}'", s);
    };
    let value: f64 = value
        .trim()
        .parse()
        .with_context(|| format!("'{}' is not a number", value))?;
    if !value.is_finite() {
        bail!("'{}' is not a finite number", value);
    }
    Ok((label.trim().to_string(), value))
}

/// Format a number without a trailing `.0` for whole values
fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}
