// prefixtty: infix to prefix conversion with a step-through stack view

use std::io::{self, BufRead, Write};

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use prefixtty::converter::constants::DEFAULT_TRACE_LIMIT;
use prefixtty::converter::{infix_to_prefix, trace_conversion};
use prefixtty::eval::{evaluate, parse_binding, Bindings};
use prefixtty::ui::App;

/// Command-line options
#[derive(Debug, Default)]
struct Options {
    step: bool,
    help: bool,
    bindings: Bindings,
    /// Expression words joined by spaces; `None` means prompt for it
    expression: Option<String>,
}

impl Options {
    fn parse(args: &[String]) -> Result<Self, String> {
        let mut options = Options::default();
        let mut words: Vec<&str> = Vec::new();
        let mut iter = args.iter();

        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "-s" | "--step" => options.step = true,
                "-h" | "--help" => options.help = true,
                "-l" | "--let" => {
                    let binding = iter
                        .next()
                        .ok_or_else(|| format!("{} needs a NAME=VALUE argument", arg))?;
                    let (name, value) = parse_binding(binding).map_err(|e| e.to_string())?;
                    options.bindings.insert(name, value);
                }
                // Everything after `--` is expression text, even `-`
                "--" => {
                    words.extend(iter.by_ref().map(String::as_str));
                }
                flag if flag.starts_with("--") => {
                    return Err(format!("Unknown option '{}'", flag));
                }
                _ => words.push(arg),
            }
        }

        if !words.is_empty() {
            options.expression = Some(words.join(" "));
        }

        Ok(options)
    }
}

fn print_usage(program_name: &str) {
    eprintln!("Usage: {} [OPTIONS] [EXPRESSION...]", program_name);
    eprintln!();
    eprintln!("Converts a space-separated infix expression to prefix notation.");
    eprintln!("Without an expression, reads one line from standard input.");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -s, --step              Step through the conversion in a terminal UI");
    eprintln!("  -l, --let NAME=VALUE    Bind an operand and print the expression's value");
    eprintln!("  -h, --help              Show this message");
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  {} ( A + B ) * C", program_name);
    eprintln!("  {} --let A=2 --let B=3 -- A - B ^ 2", program_name);
    eprintln!("  {} --step A + B * C - D", program_name);
}

/// Character offset of word `index` in a single-spaced expression
fn word_offset(expression: &str, index: usize) -> usize {
    expression
        .split(' ')
        .take(index)
        .map(|word| word.chars().count() + 1)
        .sum()
}

fn prompt_expression() -> io::Result<String> {
    print!("Infix expression: ");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().collect();
    let program_name = args.first().map(|s| s.as_str()).unwrap_or("prefixtty");

    let options = match Options::parse(args.get(1..).unwrap_or_default()) {
        Ok(options) => options,
        Err(message) => {
            eprintln!("Error: {}", message);
            eprintln!();
            print_usage(program_name);
            std::process::exit(1);
        }
    };

    if options.help {
        print_usage(program_name);
        return Ok(());
    }

    let expression = match options.expression.clone() {
        Some(expression) => expression,
        None => prompt_expression()?,
    };

    if options.step {
        return run_stepper(&expression, &options.bindings);
    }

    let prefix = match infix_to_prefix(&expression) {
        Ok(prefix) => prefix,
        Err(e) => {
            eprintln!("Conversion error: {}", e);
            std::process::exit(1);
        }
    };

    println!("Prefix expression: {}", prefix);

    if !options.bindings.is_empty() {
        match evaluate(&prefix, &options.bindings) {
            Ok(value) => println!("Value: {}", value),
            Err(e) => {
                eprintln!("Evaluation error: {}", e);
                if let Some(index) = e.index() {
                    eprintln!("  {}", prefix);
                    eprintln!("  {}^", " ".repeat(word_offset(&prefix, index)));
                }
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

/// Record the conversion and open the stepping UI on it
fn run_stepper(expression: &str, bindings: &Bindings) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("Converting {:?}...", expression.trim());
    let trace = trace_conversion(expression, DEFAULT_TRACE_LIMIT);
    eprintln!("Tokenized {} tokens.", trace.tokens().len());

    let evaluation = match trace.outcome() {
        Ok(prefix) => {
            eprintln!(
                "Converted successfully. Recorded {} steps.",
                trace.total_steps()
            );
            (!bindings.is_empty()).then(|| evaluate(prefix, bindings))
        }
        Err(e) => {
            eprintln!("Conversion error: {}", e);
            eprintln!("Entering TUI with partial conversion history...");
            None
        }
    };

    if trace.history().is_empty() {
        eprintln!("Nothing to step through.");
        std::process::exit(1);
    }

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(trace, evaluation);
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_expression_words() {
        let options = Options::parse(&args(&["(", "A", "+", "B", ")"])).unwrap();
        assert_eq!(options.expression.as_deref(), Some("( A + B )"));
        assert!(!options.step);
    }

    #[test]
    fn test_parse_flags_and_bindings() {
        let options =
            Options::parse(&args(&["--step", "--let", "A=2", "-l", "B=0.5", "A", "*", "B"]))
                .unwrap();

        assert!(options.step);
        assert_eq!(options.bindings.get("A"), Some(&2.0));
        assert_eq!(options.bindings.get("B"), Some(&0.5));
        assert_eq!(options.expression.as_deref(), Some("A * B"));
    }

    #[test]
    fn test_double_dash_ends_options() {
        let options = Options::parse(&args(&["--", "A", "-", "--step"])).unwrap();
        assert!(!options.step);
        assert_eq!(options.expression.as_deref(), Some("A - --step"));
    }

    #[test]
    fn test_parse_errors() {
        assert!(Options::parse(&args(&["--let"])).is_err());
        assert!(Options::parse(&args(&["--let", "A"])).is_err());
    }

    #[test]
    fn test_unknown_long_option_is_rejected() {
        let err = Options::parse(&args(&["--stpe", "A", "+", "B"])).unwrap_err();
        assert_eq!(err, "Unknown option '--stpe'");

        // Single-dash words are still expression text
        let options = Options::parse(&args(&["A", "-", "B"])).unwrap();
        assert_eq!(options.expression.as_deref(), Some("A - B"));
    }

    #[test]
    fn test_word_offset() {
        assert_eq!(word_offset("+ A * B C", 0), 0);
        assert_eq!(word_offset("+ A * B C", 2), 4);
        assert_eq!(word_offset("+ αβ C", 2), 5);
    }

    #[test]
    fn test_no_expression_means_prompt() {
        let options = Options::parse(&[]).unwrap();
        assert!(options.expression.is_none());
    }
}
