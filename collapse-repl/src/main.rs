mod error;

use ariadne::Color;
use collapse_compute::symbolic::{
    expr::Expr,
    highlight::{Highlight, Style},
    simplify::{Outcome, Rewrite, Simplified},
    simplify_with_steps,
    NodeIds,
};
use collapse_error::EXPR;
use error::Error;
use rustyline::{error::ReadlineError, DefaultEditor};
use std::io::{self, IsTerminal, Read};

/// Parses and simplifies the given input string, returning the parsed tree, the result, and every
/// rewrite in between.
fn parse_simplify(input: &str) -> Result<(Expr, Simplified, Vec<Rewrite>), Error> {
    let ids = NodeIds::new();
    let expr = Expr::parse(input, &ids)?;
    let (simplified, rewrites) = simplify_with_steps(&expr, &ids)?;
    Ok((expr, simplified, rewrites))
}

/// Renders each rewrite as its rule, followed by the tree before and after it, with the consumed
/// and produced subtrees marked.
fn step_summary(start: &Expr, rewrites: &[Rewrite], before: Style, after: Style) -> String {
    let mut previous = start;
    let mut lines = Vec::with_capacity(rewrites.len() * 3);
    for rewrite in rewrites {
        lines.push(format!("- {}", rewrite.step.rule.description()));
        lines.push(format!("  {}", Highlight::new(previous, &rewrite.step.before, before)));
        lines.push(format!("  {}", Highlight::new(&rewrite.result, &rewrite.step.after, after)));
        previous = &rewrite.result;
    }
    lines.join("\n")
}

/// The state carried between lines of input.
#[derive(Debug, Default)]
struct Session {
    /// Whether to print every rewrite before the result.
    show_steps: bool,
}

impl Session {
    /// Handles one line of input, which is either a command or an expression.
    fn handle(&mut self, input: &str) {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return;
        }

        if trimmed.starts_with(':') {
            self.command(input);
        } else {
            self.read_simplify(input);
        }
    }

    fn command(&mut self, input: &str) {
        if input.trim() == ":steps" {
            self.show_steps = !self.show_steps;
            println!("step summary {}", if self.show_steps { "on" } else { "off" });
        } else {
            error::report_unknown_command(input);
        }
    }

    /// Parses and simplifies the input, printing the result or the failure.
    fn read_simplify(&self, input: &str) {
        match parse_simplify(input) {
            Ok((expr, simplified, rewrites)) => {
                if self.show_steps && !rewrites.is_empty() {
                    println!("{}", step_summary(&expr, &rewrites, Style::Color(Color::Red), Style::Color(EXPR)));
                }

                println!("{}", simplified.expr);
                if let Outcome::Cycle { first_seen } = simplified.outcome {
                    eprintln!(
                        "note: the rewrites started repeating after {} steps; this form was first reached after {}",
                        simplified.iterations,
                        first_seen,
                    );
                }
            },
            Err(err) => err.report_to_stderr(input),
        }
    }

    /// Handles every line of the given text in turn.
    fn run_lines(&mut self, text: &str) {
        text.lines().for_each(|line| self.handle(line));
    }
}

fn main() {
    env_logger::init();

    let mut args = std::env::args();
    args.next();
    let mut session = Session::default();

    if let Some(filename) = args.next() {
        // simplify every line of the file
        match std::fs::read_to_string(&filename) {
            Ok(input) => session.run_lines(&input),
            Err(err) => {
                eprintln!("could not read `{}`: {}", filename, err);
                std::process::exit(1);
            },
        }
    } else if !io::stdin().is_terminal() {
        // simplify every line of stdin
        let mut input = String::new();
        if let Err(err) = io::stdin().read_to_string(&mut input) {
            eprintln!("could not read stdin: {}", err);
            std::process::exit(1);
        }

        session.run_lines(&input);
    } else {
        // run the repl / interactive mode
        let mut rl = match DefaultEditor::new() {
            Ok(rl) => rl,
            Err(err) => {
                eprintln!("could not start the editor: {}", err);
                std::process::exit(1);
            },
        };

        fn process_line(rl: &mut DefaultEditor, session: &mut Session) -> Result<(), ReadlineError> {
            let input = rl.readline("> ")?;
            if input.trim().is_empty() {
                return Ok(());
            }

            rl.add_history_entry(&input)?;

            session.handle(&input);
            Ok(())
        }

        loop {
            if let Err(err) = process_line(&mut rl, &mut session) {
                match err {
                    ReadlineError::Eof | ReadlineError::Interrupted => (),
                    _ => eprintln!("{}", err),
                }
                break;
            }
        }
    }
}
