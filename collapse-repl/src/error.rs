use ariadne::{Fmt, Label, Report, ReportKind, Source};
use collapse_compute::symbolic::error::SimplifyError;
use collapse_error::{Error as ParseError, ErrorKind, EXPR};

/// Utility enum to package errors that can occur while parsing / simplifying.
#[derive(Debug)]
pub enum Error {
    /// The input could not be read as an expression.
    Parse(ParseError),

    /// Simplification gave up before reaching a normal form.
    Simplify(SimplifyError),
}

impl Error {
    /// Report this [`Error`] to stderr.
    ///
    /// The `ariadne` crate's [`Report`] type actually does not have a `Display` implementation, so
    /// we can only use its `eprint` method to print to stderr.
    pub fn report_to_stderr(&self, input: &str) {
        let report = match self {
            Self::Parse(err) => err.build_report("input"),
            // the whole input is to blame
            Self::Simplify(err) => err.build_report("input", &[0..input.len()]),
        };

        if let Err(err) = report.eprint(("input", Source::from(input))) {
            eprintln!("could not print error report: {}", err);
        }
    }
}

impl From<ParseError> for Error {
    fn from(err: ParseError) -> Self {
        Self::Parse(err)
    }
}

impl From<SimplifyError> for Error {
    fn from(err: SimplifyError) -> Self {
        Self::Simplify(err)
    }
}

/// Reports a REPL command that is not recognized.
pub fn report_unknown_command(input: &str) {
    let report = Report::build(ReportKind::Error, "input", 0)
        .with_message(format!("unknown command `{}`", input.trim()))
        .with_label(Label::new(("input", 0..input.len())).with_color(EXPR))
        .with_help(format!("the only command is {}", ":steps".fg(EXPR)))
        .finish();

    if let Err(err) = report.eprint(("input", Source::from(input))) {
        eprintln!("could not print error report: {}", err);
    }
}
