//! Line-based console driver.
//!
//! ```text
//! B id price qty   -> buy limit
//! S id price qty   -> sell limit
//! M B id qty       -> market buy
//! M S id qty       -> market sell
//! C id             -> cancel order
//! P                -> print book
//! T                -> print trades
//! Q                -> quit
//! ```
//!
//! Bad input is reported on the output and the session continues.

use std::io::{self, BufRead, Write};
use std::str::{FromStr, SplitWhitespace};

use thiserror::Error;
use tracing::{debug, info};

use crate::engine::{CancelOutcome, MatchingEngine};
use crate::types::price::to_fixed;
use crate::types::Side;

pub const HELP: &str = "\
Commands:
  B id price qty   -> buy limit
  S id price qty   -> sell limit
  M B id qty       -> market buy
  M S id qty       -> market sell
  C id             -> cancel order
  P                -> print book
  T                -> print trades
  Q                -> quit
";

/// One parsed console command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Limit { side: Side, id: u64, price: u64, quantity: u64 },
    Market { side: Side, id: u64, quantity: u64 },
    Cancel { id: u64 },
    PrintBook,
    PrintTrades,
    Quit,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("empty command")]
    Empty,

    #[error("Unknown command")]
    Unknown(String),

    #[error("missing {0}")]
    MissingArgument(&'static str),

    #[error("invalid {field}: {value}")]
    InvalidNumber { field: &'static str, value: String },

    #[error("invalid price: {0}")]
    InvalidPrice(String),

    #[error("invalid side: {0} (expected B or S)")]
    InvalidSide(String),
}

fn next<'a>(tokens: &mut SplitWhitespace<'a>, field: &'static str) -> Result<&'a str, CommandError> {
    tokens.next().ok_or(CommandError::MissingArgument(field))
}

fn number(tokens: &mut SplitWhitespace<'_>, field: &'static str) -> Result<u64, CommandError> {
    let value = next(tokens, field)?;
    value.parse().map_err(|_| CommandError::InvalidNumber {
        field,
        value: value.to_string(),
    })
}

fn price(tokens: &mut SplitWhitespace<'_>) -> Result<u64, CommandError> {
    let value = next(tokens, "price")?;
    to_fixed(value).ok_or_else(|| CommandError::InvalidPrice(value.to_string()))
}

fn side(tokens: &mut SplitWhitespace<'_>) -> Result<Side, CommandError> {
    match next(tokens, "side")? {
        "B" | "b" => Ok(Side::Buy),
        "S" | "s" => Ok(Side::Sell),
        other => Err(CommandError::InvalidSide(other.to_string())),
    }
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut tokens = line.split_whitespace();
        let head = tokens.next().ok_or(CommandError::Empty)?;

        match head.to_ascii_uppercase().as_str() {
            verb @ ("B" | "S") => Ok(Command::Limit {
                side: if verb == "B" { Side::Buy } else { Side::Sell },
                id: number(&mut tokens, "id")?,
                price: price(&mut tokens)?,
                quantity: number(&mut tokens, "quantity")?,
            }),
            "M" => Ok(Command::Market {
                side: side(&mut tokens)?,
                id: number(&mut tokens, "id")?,
                quantity: number(&mut tokens, "quantity")?,
            }),
            "C" => Ok(Command::Cancel {
                id: number(&mut tokens, "id")?,
            }),
            "P" => Ok(Command::PrintBook),
            "T" => Ok(Command::PrintTrades),
            "Q" => Ok(Command::Quit),
            _ => Err(CommandError::Unknown(head.to_string())),
        }
    }
}

/// Whether the session should keep reading commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Apply one command to the engine, writing any response to `out`.
pub fn execute<W: Write>(engine: &mut MatchingEngine, command: Command, out: &mut W) -> io::Result<Flow> {
    match command {
        Command::Limit { side, id, price, quantity } => {
            if let Err(err) = engine.submit_limit_order(id, side, price, quantity) {
                writeln!(out, "Rejected: {err}")?;
            }
        }
        Command::Market { side, id, quantity } => {
            if let Err(err) = engine.submit_market_order(id, side, quantity) {
                writeln!(out, "Rejected: {err}")?;
            }
        }
        Command::Cancel { id } => match engine.cancel_order(id) {
            CancelOutcome::Cancelled(_) => writeln!(out, "Cancelled order {id}")?,
            CancelOutcome::NotFound(_) => writeln!(out, "Order {id} not found")?,
        },
        Command::PrintBook => write!(out, "{}", engine.book_snapshot())?,
        Command::PrintTrades => write!(out, "{}", engine.trade_summary())?,
        Command::Quit => return Ok(Flow::Quit),
    }
    Ok(Flow::Continue)
}

/// Read commands from `input` until `Q` or end of input.
///
/// Lines that are not valid UTF-8 are decoded lossily and reported like any
/// other unrecognized command.
pub fn run<R: BufRead, W: Write>(engine: &mut MatchingEngine, mut input: R, out: &mut W) -> io::Result<()> {
    let mut processed = 0u64;
    let mut buf = Vec::new();

    loop {
        buf.clear();
        if input.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        let line = String::from_utf8_lossy(&buf);
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(err) => {
                debug!(line = %line, error = %err, "unparsed command");
                writeln!(out, "{err}")?;
                continue;
            }
        };

        processed += 1;
        if execute(engine, command, out)? == Flow::Quit {
            break;
        }
    }

    out.flush()?;
    info!(processed, trades = engine.trades().len(), "session finished");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn session(script: &str) -> (MatchingEngine, String) {
        let mut engine = MatchingEngine::new();
        let mut out = Vec::new();
        run(&mut engine, Cursor::new(script), &mut out).unwrap();
        (engine, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_parse_limit() {
        assert_eq!(
            "B 1 10 5".parse::<Command>(),
            Ok(Command::Limit { side: Side::Buy, id: 1, price: 1_000_000_000, quantity: 5 })
        );
        assert_eq!(
            "S 2 10.5 3".parse::<Command>(),
            Ok(Command::Limit { side: Side::Sell, id: 2, price: 1_050_000_000, quantity: 3 })
        );
    }

    #[test]
    fn test_parse_market_and_simple() {
        assert_eq!(
            "M B 4 2".parse::<Command>(),
            Ok(Command::Market { side: Side::Buy, id: 4, quantity: 2 })
        );
        assert_eq!("C 9".parse::<Command>(), Ok(Command::Cancel { id: 9 }));
        assert_eq!("P".parse::<Command>(), Ok(Command::PrintBook));
        assert_eq!("t".parse::<Command>(), Ok(Command::PrintTrades));
        assert_eq!("Q".parse::<Command>(), Ok(Command::Quit));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("".parse::<Command>(), Err(CommandError::Empty));
        assert_eq!("X".parse::<Command>(), Err(CommandError::Unknown("X".into())));
        assert_eq!("B 1 10".parse::<Command>(), Err(CommandError::MissingArgument("quantity")));
        assert_eq!(
            "B one 10 5".parse::<Command>(),
            Err(CommandError::InvalidNumber { field: "id", value: "one".into() })
        );
        assert_eq!("S 1 -10 5".parse::<Command>(), Err(CommandError::InvalidPrice("-10".into())));
        assert_eq!("M X 1 5".parse::<Command>(), Err(CommandError::InvalidSide("X".into())));
    }

    #[test]
    fn test_session_output() {
        let (engine, out) = session("B 1 10 5\nS 2 10 3\nP\nT\nC 1\nC 1\nQ\nB 9 10 1\n");

        assert_eq!(
            out,
            "--- BIDS ---\nPrice 10: [id=1, qty=2] \n--- ASKS ---\n\
             === Trades ===\n\
             BUY 1 matched with SELL 2 qty=3 @ 10\n\
             Total traded volume: 3\n\
             VWAP: 10\n\
             Cancelled order 1\n\
             Order 1 not found\n"
        );
        // Nothing after Q is applied
        assert!(!engine.contains_order(9));
    }

    #[test]
    fn test_session_keeps_going_after_bad_input() {
        let (engine, out) = session("Z\nB 1 0 5\nS 2 10 1\n");

        assert_eq!(
            out,
            "Unknown command\nRejected: invalid price for order 1: must be greater than zero\n"
        );
        assert!(engine.contains_order(2));
    }

    #[test]
    fn test_session_survives_non_utf8_line() {
        let mut engine = MatchingEngine::new();
        let mut out = Vec::new();
        let script: &[u8] = b"B 1 10 5\n\xff\xfe\nS 2 10 3\n";

        run(&mut engine, script, &mut out).unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "Unknown command\n");
        assert_eq!(engine.trades().len(), 1);
        assert_eq!(engine.order(1).map(|o| o.remaining), Some(2));
    }
}
