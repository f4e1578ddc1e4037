use clap::Args;
use colored::Colorize;
use serde_json::Value;
use std::io::{self, BufRead, Write};

use loan_calc_core::calculator::{LoanCalculator, LoanDisplay};
use loan_calc_core::{LoanField, LoanInputs};

use crate::input;

const HELP: &str = "\
commands:
  amount <text>   set the loan amount
  rate <text>     set the annual interest rate (percent)
  term <text>     set the loan term (years)
  calculate       price the loan
  dismiss         hide the current notice
  clear           reset every field and total
  show            print the current totals
  quit            end the session";

/// Arguments for an interactive session
#[derive(Args)]
pub struct SessionArgs {
    /// Read actions from this file instead of stdin
    #[arg(long)]
    pub script: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionAction {
    Set(LoanField, String),
    Calculate,
    Dismiss,
    Clear,
    Show,
    Help,
    Quit,
}

impl SessionAction {
    /// Parse one input line. Blank lines and `#` comments yield `None`.
    pub fn parse(line: &str) -> Result<Option<Self>, String> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }

        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let action = match word.to_ascii_lowercase().as_str() {
            "amount" => SessionAction::Set(LoanField::Amount, rest.to_string()),
            "rate" => SessionAction::Set(LoanField::Rate, rest.to_string()),
            "term" => SessionAction::Set(LoanField::Term, rest.to_string()),
            "calculate" | "calc" => SessionAction::Calculate,
            "dismiss" => SessionAction::Dismiss,
            "clear" => SessionAction::Clear,
            "show" => SessionAction::Show,
            "help" | "?" => SessionAction::Help,
            "quit" | "exit" => SessionAction::Quit,
            other => return Err(format!("unknown command '{other}' (try 'help')")),
        };
        Ok(Some(action))
    }
}

/// Apply one action. Returns false when the session should end.
pub fn apply(calc: &mut LoanCalculator, action: SessionAction) -> bool {
    match action {
        SessionAction::Set(field, text) => calc.set_field(field, text),
        SessionAction::Calculate => {
            if let Err(e) = calc.calculate() {
                tracing::debug!(title = e.title(), "notice raised");
            }
        }
        SessionAction::Dismiss => {
            calc.dismiss();
        }
        SessionAction::Clear => calc.clear(),
        SessionAction::Show | SessionAction::Help => {}
        SessionAction::Quit => return false,
    }
    true
}

pub fn run_session(args: SessionArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let mut calc = LoanCalculator::new();

    match args.script {
        Some(ref path) => {
            let script = input::file::read_text(path)?;
            drive(&mut calc, script.lines().map(|l| Ok::<_, io::Error>(l.to_string())), false)?;
        }
        None => {
            let interactive = input::stdin::is_interactive();
            if interactive {
                println!("{}", HELP.dimmed());
            }
            drive(&mut calc, io::stdin().lock().lines(), interactive)?;
        }
    }

    Ok(serde_json::to_value(calc.display())?)
}

fn drive(
    calc: &mut LoanCalculator,
    lines: impl Iterator<Item = io::Result<String>>,
    interactive: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    prompt(interactive)?;
    for line in lines {
        let line = line?;
        match SessionAction::parse(&line) {
            Ok(Some(action)) => {
                tracing::debug!(?action, "session action");
                let show = matches!(
                    action,
                    SessionAction::Calculate
                        | SessionAction::Dismiss
                        | SessionAction::Clear
                        | SessionAction::Show
                );
                let help = action == SessionAction::Help;
                let list_inputs = action == SessionAction::Show;
                if !apply(calc, action) {
                    break;
                }
                if help {
                    println!("{HELP}");
                } else if show {
                    if list_inputs {
                        render_inputs(calc.inputs());
                    }
                    render(&calc.display());
                }
            }
            Ok(None) => {}
            Err(msg) => eprintln!("{}: {}", "error".red().bold(), msg),
        }
        prompt(interactive)?;
    }
    Ok(())
}

fn prompt(interactive: bool) -> io::Result<()> {
    if interactive {
        print!("> ");
        io::stdout().flush()?;
    }
    Ok(())
}

fn render_inputs(inputs: &LoanInputs) {
    for field in LoanField::ALL {
        println!("{}: {}", field.label().dimmed(), inputs.get(field));
    }
}

fn render(display: &LoanDisplay) {
    if let Some(ref notice) = display.notice {
        println!(
            "{} {}",
            notice.title.truecolor(255, 140, 0).bold(),
            notice.message
        );
    }
    println!(
        "monthly payment {}: {}",
        display.currency, display.monthly_payment
    );
    println!(
        "total interest {}: {}",
        display.currency, display.total_interest
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(script: &str) -> LoanCalculator {
        let mut calc = LoanCalculator::new();
        for line in script.lines() {
            if let Some(action) = SessionAction::parse(line).unwrap() {
                if !apply(&mut calc, action) {
                    break;
                }
            }
        }
        calc
    }

    #[test]
    fn test_parse_set_keeps_rest_of_line() {
        assert_eq!(
            SessionAction::parse("amount  1 000 ").unwrap(),
            Some(SessionAction::Set(LoanField::Amount, "1 000".into()))
        );
        assert_eq!(
            SessionAction::parse("rate").unwrap(),
            Some(SessionAction::Set(LoanField::Rate, String::new()))
        );
    }

    #[test]
    fn test_parse_skips_blank_and_comments() {
        assert_eq!(SessionAction::parse("   ").unwrap(), None);
        assert_eq!(SessionAction::parse("# note").unwrap(), None);
    }

    #[test]
    fn test_parse_unknown_command() {
        assert!(SessionAction::parse("borrow 5").is_err());
    }

    #[test]
    fn test_script_calculates() {
        let calc = run("amount 1000000\nrate 12\nterm 1\ncalculate\n");
        assert_eq!(calc.display().monthly_payment, "88848.79");
    }

    #[test]
    fn test_script_error_then_dismiss() {
        let calc = run("amount 1000000\nterm 1\ncalc\n");
        assert_eq!(
            calc.display().notice.map(|n| n.title),
            Some("Rate is Missing".to_string())
        );

        let calc = run("amount 1000000\nterm 1\ncalc\ndismiss\n");
        assert!(calc.display().notice.is_none());
        assert_eq!(calc.inputs().loan_amount, "1000000");
    }

    #[test]
    fn test_failed_calculate_keeps_session_running() {
        let mut calc = LoanCalculator::new();
        assert!(apply(&mut calc, SessionAction::Calculate));
        assert_eq!(
            calc.display().notice.map(|n| n.title),
            Some("Loan Amount Missing".to_string())
        );
    }

    #[test]
    fn test_script_stops_at_quit() {
        let calc = run("amount 5\nquit\namount 6\n");
        assert_eq!(calc.inputs().loan_amount, "5");
    }

    #[test]
    fn test_script_clear() {
        let calc = run("amount 1000000\nrate 12\nterm 1\ncalc\nclear\n");
        assert_eq!(calc.display().monthly_payment, "0");
        assert_eq!(calc.inputs().loan_amount, "");
    }
}
