use thiserror::Error;

use crate::matcher::{subject, MatchError, SpecError};

mod interface;
mod middleware;
mod printer;

pub use interface::{ConsoleInterface, UserInterface};
pub(crate) use interface::{ColumnRenderer, LeftWidth, PaddingWidth, TotalWidth};
pub use middleware::Reader;
pub(crate) use printer::{FlagUsage, PositionalUsage, Printer};

#[cfg(test)]
pub(crate) use interface::util;

#[cfg(feature = "unit_test")]
pub use interface::util::InMemoryInterface;

/// An error in the [`Specification`](./struct.Specification.html) itself, detected when building the reader.
#[derive(Debug, Error)]
#[error("Config error: {0}")]
pub struct ConfigError(pub(crate) String);

impl From<SpecError> for ConfigError {
    fn from(error: SpecError) -> Self {
        ConfigError(error.to_string())
    }
}

/// The reasons a [`Reader`] does not produce options.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReadError {
    /// A flag or structured positional was given fewer tokens than its trigger requires.
    #[error("{} {name} requires {needed} args, {available} given.", subject(.name))]
    Arity {
        /// The flag (ex: `--name`) or positional (ex: `range`).
        name: String,
        /// The arity of the trigger.
        needed: usize,
        /// The tokens which remained.
        available: usize,
    },

    /// A token matched no flag, there was no positional left to take it, and extra tokens are not allowed.
    #[error("Unknown argument: {0}")]
    UnknownArgument(String),

    /// Positionals (by name) and required flags (by label) which were never satisfied.
    #[error("Expected required arguments {}.", .0.join(" "))]
    MissingRequired(Vec<String>),

    /// The validator rejected the options.
    #[error("{0}")]
    Validation(String),

    /// A trigger failed to extract its partial result.
    #[error("{name} failed: {message}")]
    Trigger {
        /// The flag or positional whose trigger failed.
        name: String,
        /// The [`TriggerError`](./struct.TriggerError.html) message.
        message: String,
    },

    /// The help flag was given; the usage message has been printed.
    #[error("Help requested.")]
    HelpRequested,
}

impl ReadError {
    /// The process exit code for this outcome: `0` for help, `1` otherwise.
    pub fn exit_code(&self) -> i32 {
        match self {
            ReadError::HelpRequested => 0,
            _ => 1,
        }
    }
}

impl From<MatchError> for ReadError {
    fn from(error: MatchError) -> Self {
        match error {
            MatchError::Arity {
                name,
                needed,
                available,
            } => ReadError::Arity {
                name,
                needed,
                available,
            },
            MatchError::UnknownArgument(token) => ReadError::UnknownArgument(token),
            MatchError::MissingRequired(names) => ReadError::MissingRequired(names),
            MatchError::Trigger { name, message } => ReadError::Trigger { name, message },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(MatchError::Arity { name: "--pair".to_string(), needed: 2, available: 1 })]
    #[case(MatchError::Arity { name: "range".to_string(), needed: 2, available: 0 })]
    #[case(MatchError::UnknownArgument("foo".to_string()))]
    #[case(MatchError::MissingRequired(vec!["to".to_string(), "-n | --name".to_string()]))]
    #[case(MatchError::Trigger { name: "-n".to_string(), message: "bad".to_string() })]
    fn read_error_from(#[case] error: MatchError) {
        let message = error.to_string();
        let read_error = ReadError::from(error);
        assert_eq!(read_error.to_string(), message);
        assert_eq!(read_error.exit_code(), 1);
    }

    #[test]
    fn read_error_exit_code() {
        assert_eq!(ReadError::HelpRequested.exit_code(), 0);
        assert_eq!(ReadError::Validation("no".to_string()).exit_code(), 1);
        assert_eq!(ReadError::Validation("no".to_string()).to_string(), "no");
    }

    #[test]
    fn config_error_from() {
        let error = ConfigError::from(SpecError::DuplicateKey('a'));
        assert_eq!(error.to_string(), "Config error: Cannot duplicate the flag '-a'.");
    }
}
