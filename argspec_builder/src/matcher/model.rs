use thiserror::Error;

use crate::model::Options;

#[derive(Debug, PartialEq)]
pub(crate) enum Action {
    Complete(Options),
    PrintHelp,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum MatchError {
    #[error("{} {name} requires {needed} args, {available} given.", subject(.name))]
    Arity {
        name: String,
        needed: usize,
        available: usize,
    },

    #[error("Unknown argument: {0}")]
    UnknownArgument(String),

    #[error("Expected required arguments {}.", .0.join(" "))]
    MissingRequired(Vec<String>),

    #[error("{name} failed: {message}")]
    Trigger { name: String, message: String },
}

pub(crate) fn subject(name: &str) -> &'static str {
    if name.starts_with('-') {
        "Option"
    } else {
        "Argument"
    }
}

/// The `length` tokens starting at `start`, or the number actually available when too few remain.
pub(crate) fn window(tokens: &[&str], start: usize, length: usize) -> Result<Vec<String>, usize> {
    let available = tokens.len().saturating_sub(start);

    if available < length {
        return Err(available);
    }

    Ok(tokens
        .iter()
        .skip(start)
        .take(length)
        .map(|token| token.to_string())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(vec![], 0, 0, Ok(vec![]))]
    #[case(vec![], 0, 1, Err(0))]
    #[case(vec![], 3, 0, Ok(vec![]))]
    #[case(vec!["a"], 1, 0, Ok(vec![]))]
    #[case(vec!["a"], 1, 1, Err(0))]
    #[case(vec!["a", "b", "c"], 0, 2, Ok(vec!["a", "b"]))]
    #[case(vec!["a", "b", "c"], 1, 2, Ok(vec!["b", "c"]))]
    #[case(vec!["a", "b", "c"], 2, 2, Err(1))]
    fn window_slice(
        #[case] tokens: Vec<&str>,
        #[case] start: usize,
        #[case] length: usize,
        #[case] expected: Result<Vec<&str>, usize>,
    ) {
        let expected = expected.map(|values| {
            values
                .into_iter()
                .map(|value| value.to_string())
                .collect::<Vec<String>>()
        });
        assert_eq!(window(tokens.as_slice(), start, length), expected);
    }

    #[test]
    fn match_error_display() {
        assert_eq!(
            MatchError::Arity {
                name: "--name".to_string(),
                needed: 2,
                available: 1,
            }
            .to_string(),
            "Option --name requires 2 args, 1 given."
        );
        assert_eq!(
            MatchError::Arity {
                name: "range".to_string(),
                needed: 2,
                available: 0,
            }
            .to_string(),
            "Argument range requires 2 args, 0 given."
        );
        assert_eq!(
            MatchError::UnknownArgument("foo".to_string()).to_string(),
            "Unknown argument: foo"
        );
        assert_eq!(
            MatchError::Trigger {
                name: "-n".to_string(),
                message: "'x' is not a number.".to_string(),
            }
            .to_string(),
            "-n failed: 'x' is not a number."
        );
        assert_eq!(
            MatchError::MissingRequired(vec!["to".to_string(), "-n | --name".to_string()])
                .to_string(),
            "Expected required arguments to -n | --name."
        );
    }
}
