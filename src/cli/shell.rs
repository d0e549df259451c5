use std::{
    fmt,
    io::{self, BufRead},
};

use shell_words::split;

use crate::cli::{output, CliError, LoopControl, ShellContext};

pub fn run_cli() -> Result<(), CliError> {
    let context = ShellContext::new()?;
    let stdin = io::stdin();
    run_lines(&context, stdin.lock())
}

/// Executes each input line as a command until `exit` or end of input.
pub fn run_lines(context: &ShellContext, input: impl BufRead) -> Result<(), CliError> {
    for line in input.lines() {
        let line = line?;
        if handle_line(context, &line) == LoopControl::Exit {
            return Ok(());
        }
    }
    output::info("Exiting shell.");
    Ok(())
}

fn handle_line(context: &ShellContext, line: &str) -> LoopControl {
    let tokens = match parse_command_line(line) {
        Ok(tokens) => tokens,
        Err(err) => {
            output::warning(err);
            return LoopControl::Continue;
        }
    };

    let Some((raw, rest)) = tokens.split_first() else {
        return LoopControl::Continue;
    };
    let command = raw.to_lowercase();
    let args: Vec<&str> = rest.iter().map(String::as_str).collect();

    match context.dispatch(&command, &args) {
        Ok(control) => control,
        Err(err) => {
            context.report_error(err);
            LoopControl::Continue
        }
    }
}

pub(crate) fn parse_command_line(input: &str) -> Result<Vec<String>, ParseError> {
    split(input).map_err(|err| ParseError {
        message: err.to_string(),
    })
}

#[derive(Debug)]
pub(crate) struct ParseError {
    message: String,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::CommandError;
    use crate::config::Config;
    use crate::core::MutationPipeline;
    use crate::domain::{Category, TransactionKind};
    use crate::storage::MemoryStorage;
    use std::sync::Arc;

    fn context() -> ShellContext {
        let store = Arc::new(
            MemoryStorage::new().with_categories([Category::new("Food", TransactionKind::Expense)]),
        );
        let pipeline = MutationPipeline::load(store).unwrap();
        ShellContext::with_pipeline(pipeline, Config::default())
    }

    #[test]
    fn quoted_arguments_stay_together() {
        let tokens = parse_command_line("add expense 12.5 Food 2024-01-02 \"corner shop\"").unwrap();
        assert_eq!(tokens.last().map(String::as_str), Some("corner shop"));
        assert!(parse_command_line("add \"unterminated").is_err());
    }

    #[test]
    fn script_lines_drive_the_pipeline() {
        let context = context();
        let script = "add expense 12.50 Food 2024-01-02 lunch out\nadd expense -1 Food 2024-01-02 bad\nexit\nadd expense 3 Food 2024-01-03 ignored\n";
        run_lines(&context, script.as_bytes()).unwrap();
        let snapshot = context.pipeline().snapshot();
        assert_eq!(snapshot.ledger.len(), 1);
        assert_eq!(snapshot.ledger.all()[0].description, "lunch out");
    }

    #[test]
    fn listing_commands_accept_filters() {
        let context = context();
        assert!(context.dispatch("categories", &["expense"]).is_ok());
        assert!(context.dispatch("categories", &[]).is_ok());
        assert!(matches!(
            context.dispatch("categories", &["transfer"]),
            Err(CommandError::Input(_))
        ));
        assert!(matches!(
            context.dispatch("list", &["many"]),
            Err(CommandError::Input(_))
        ));
    }
}
