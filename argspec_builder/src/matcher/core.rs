use std::collections::{HashSet, VecDeque};
use thiserror::Error;

use crate::api::{FlagAction, FlagSpec, PositionalSpec, Trigger};
use crate::matcher::model::*;
use crate::model::Options;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum SpecError {
    #[error("Flag key '{0}' must be a single alphanumeric character.")]
    InvalidKey(char),

    #[error("Cannot duplicate the flag '-{0}'.")]
    DuplicateKey(char),

    #[error("Flag '-{0}' cannot have an empty long name.")]
    EmptyLong(char),

    #[error("Cannot duplicate the long flag '--{0}'.")]
    DuplicateLong(String),

    #[error("Cannot duplicate the positional '{0}'.")]
    DuplicatePositional(String),

    #[error("Positional '{0}' must take at least one token.")]
    EmptyWindow(String),
}

pub(crate) struct Processor<'a> {
    flags: Vec<(char, FlagSpec<'a>)>,
    positionals: Vec<PositionalSpec<'a>>,
    allow_extra: bool,
}

impl<'a> std::fmt::Debug for Processor<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Processor{..}").finish()
    }
}

impl<'a> Processor<'a> {
    pub(crate) fn new(
        flags: Vec<(char, FlagSpec<'a>)>,
        positionals: Vec<PositionalSpec<'a>>,
        allow_extra: bool,
    ) -> Result<Self, SpecError> {
        let mut keys = HashSet::new();
        let mut longs = HashSet::new();
        let mut names = HashSet::new();

        for (key, flag) in &flags {
            if !key.is_ascii_alphanumeric() {
                return Err(SpecError::InvalidKey(*key));
            }

            if !keys.insert(*key) {
                return Err(SpecError::DuplicateKey(*key));
            }

            if let Some(long) = &flag.long {
                if long.is_empty() {
                    return Err(SpecError::EmptyLong(*key));
                }

                if !longs.insert(long.as_str()) {
                    return Err(SpecError::DuplicateLong(long.clone()));
                }
            }
        }

        for positional in &positionals {
            if !names.insert(positional.name.as_str()) {
                return Err(SpecError::DuplicatePositional(positional.name.clone()));
            }

            if let Some(trigger) = &positional.trigger {
                if trigger.arity() == 0 {
                    return Err(SpecError::EmptyWindow(positional.name.clone()));
                }
            }
        }

        Ok(Self {
            flags,
            positionals,
            allow_extra,
        })
    }

    fn find_flag(&self, token: &str) -> Option<&(char, FlagSpec<'a>)> {
        // Keys and long names are unique, so at most one flag can match.
        self.flags.iter().find(|(key, flag)| flag.matches(*key, token))
    }

    pub(crate) async fn consume(&self, tokens: &[&str]) -> Result<Action, MatchError> {
        let mut options = Options::new(self.allow_extra);

        // 1. Apply the defaults, in specification order.
        for (_key, flag) in &self.flags {
            if let Some(default) = &flag.default {
                #[cfg(feature = "tracing_debug")]
                {
                    debug!("Applying the default for '-{_key}'.");
                }

                options.apply(default.resolve().await);
            }
        }

        let mut pending: VecDeque<&PositionalSpec<'a>> = self.positionals.iter().collect();
        let mut matched: HashSet<char> = HashSet::new();
        let mut cursor = 0;

        // 2. Walk the tokens, left to right.
        while let Some(token) = tokens.get(cursor) {
            if let Some((key, flag)) = self.find_flag(token) {
                #[cfg(feature = "tracing_debug")]
                {
                    debug!("Token '{token}' at {cursor} matches flag '-{key}'.");
                }

                let trigger = match &flag.action {
                    FlagAction::Help => return Ok(Action::PrintHelp),
                    FlagAction::Trigger(trigger) => trigger,
                };
                matched.insert(*key);
                let name = flag.name(*key);
                options.apply(invoke(trigger, &name, tokens, cursor + 1).await?);
                cursor += 1 + trigger.arity();
            } else if let Some(positional) = pending.pop_front() {
                #[cfg(feature = "tracing_debug")]
                {
                    debug!(
                        "Token '{token}' at {cursor} matches positional '{}'.",
                        positional.name
                    );
                }

                match &positional.trigger {
                    Some(trigger) => {
                        options.apply(invoke(trigger, &positional.name, tokens, cursor).await?);
                        cursor += trigger.arity();
                    }
                    None => {
                        options.assign(positional.name.as_str(), *token);
                        cursor += 1;
                    }
                }
            } else if options.push_extra(*token) {
                #[cfg(feature = "tracing_debug")]
                {
                    debug!("Token '{token}' at {cursor} is extra.");
                }

                cursor += 1;
            } else {
                return Err(MatchError::UnknownArgument(token.to_string()));
            }
        }

        // 3. Check nothing required was left out.
        let mut missing: Vec<String> = pending
            .iter()
            .map(|positional| positional.name.clone())
            .collect();
        missing.extend(
            self.flags
                .iter()
                .filter(|(key, flag)| flag.required && !matched.contains(key))
                .map(|(key, flag)| flag.label(*key)),
        );

        if !missing.is_empty() {
            return Err(MatchError::MissingRequired(missing));
        }

        Ok(Action::Complete(options))
    }
}

async fn invoke(
    trigger: &Trigger<'_>,
    name: &str,
    tokens: &[&str],
    start: usize,
) -> Result<crate::model::Outcome, MatchError> {
    let arguments = window(tokens, start, trigger.arity()).map_err(|available| {
        MatchError::Arity {
            name: name.to_string(),
            needed: trigger.arity(),
            available,
        }
    })?;

    trigger
        .invoke(arguments)
        .await
        .map_err(|error| MatchError::Trigger {
            name: name.to_string(),
            message: error.to_string(),
        })
}
