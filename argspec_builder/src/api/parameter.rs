use crate::api::{Source, Trigger};
use crate::constant::*;
use crate::model::Outcome;

#[derive(Debug)]
pub(crate) enum FlagAction<'a> {
    Trigger(Trigger<'a>),
    Help,
}

/// A flag on the Cli, matched via `-x` (or `--long` when aliased).
/// Used with [`Specification::flag`](./struct.Specification.html#method.flag).
///
/// ### Example
/// ```
/// # use argspec_builder as argspec;
/// use argspec::{FlagSpec, Outcome, Trigger};
///
/// let flag = FlagSpec::new(
///     "The name to greet.",
///     Trigger::new(["name"], |args| Ok(Outcome::set("name", args[0].as_str()))),
/// )
/// .long("name")
/// .required()
/// .default_value(Outcome::set("name", "World"));
/// # let _ = flag;
/// ```
pub struct FlagSpec<'a> {
    pub(crate) long: Option<String>,
    pub(crate) description: String,
    pub(crate) required: bool,
    pub(crate) default: Option<Source<'a, Outcome>>,
    pub(crate) action: FlagAction<'a>,
}

impl<'a> FlagSpec<'a> {
    /// Create a flag, described by `description` and handled by `trigger`.
    pub fn new(description: impl Into<String>, trigger: Trigger<'a>) -> Self {
        Self {
            long: None,
            description: description.into(),
            required: false,
            default: None,
            action: FlagAction::Trigger(trigger),
        }
    }

    pub(crate) fn help() -> Self {
        Self {
            long: Some(HELP_NAME.to_string()),
            description: HELP_MESSAGE.to_string(),
            required: false,
            default: None,
            action: FlagAction::Help,
        }
    }

    /// Alias this flag with a long name, matched as `--long`.
    /// If repeated, only the final alias will apply.
    pub fn long(mut self, long: impl Into<String>) -> Self {
        self.long.replace(long.into());
        self
    }

    /// Require this flag to be present on the Cli.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// The partial options merged into the accumulator before any token is processed.
    /// This may be a literal [`Outcome`], or a (sync/async) [`Source`] thereof.
    pub fn default_value(mut self, default: impl Into<Source<'a, Outcome>>) -> Self {
        self.default.replace(default.into());
        self
    }

    pub(crate) fn params(&self) -> &[String] {
        match &self.action {
            FlagAction::Trigger(trigger) => trigger.params(),
            FlagAction::Help => &[],
        }
    }

    /// The flag as written in the usage message, ex: `-n | --name`.
    pub(crate) fn label(&self, key: char) -> String {
        match &self.long {
            Some(long) => format!("-{key} | --{long}"),
            None => format!("-{key}"),
        }
    }

    /// The flag as written in error messages, preferring the long form.
    pub(crate) fn name(&self, key: char) -> String {
        match &self.long {
            Some(long) => format!("--{long}"),
            None => format!("-{key}"),
        }
    }

    pub(crate) fn matches(&self, key: char, token: &str) -> bool {
        if let Some(long) = token.strip_prefix("--") {
            return matches!(&self.long, Some(l) if l == long);
        }

        match token.strip_prefix('-') {
            Some(short) => {
                let mut chars = short.chars();
                chars.next() == Some(key) && chars.next().is_none()
            }
            None => false,
        }
    }
}

/// A positional slot on the Cli, satisfied in declaration order.
/// Used with [`Specification::positional`](./struct.Specification.html#method.positional).
///
/// ### Example
/// ```
/// # use argspec_builder as argspec;
/// use argspec::{Outcome, PositionalSpec, Trigger};
///
/// // Assigns the matched token under "target".
/// let bare = PositionalSpec::named("target");
/// // Passes the matched token, and the one following it, to the trigger.
/// let structured = PositionalSpec::structured(
///     "range",
///     Trigger::new(["low", "high"], |args| {
///         Ok(Outcome::from_value(serde_json::json!({"range": [args[0], args[1]]}))?)
///     }),
/// )
/// .description("The inclusive range.");
/// # let _ = (bare, structured);
/// ```
pub struct PositionalSpec<'a> {
    pub(crate) name: String,
    pub(crate) description: Option<String>,
    pub(crate) trigger: Option<Trigger<'a>>,
}

impl<'a> PositionalSpec<'a> {
    /// A positional which assigns its token verbatim under `name`.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            trigger: None,
        }
    }

    /// A positional which passes a window of [`Trigger::arity`] tokens (starting at the matched token) to `trigger`.
    pub fn structured(name: impl Into<String>, trigger: Trigger<'a>) -> Self {
        Self {
            name: name.into(),
            description: None,
            trigger: Some(trigger),
        }
    }

    /// Document the positional in the usage message.
    /// If repeated, only the final description will apply.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description.replace(description.into());
        self
    }

    pub(crate) fn params(&self) -> &[String] {
        match &self.trigger {
            Some(trigger) => trigger.params(),
            None => &[],
        }
    }
}

impl<'a> From<&str> for PositionalSpec<'a> {
    fn from(name: &str) -> Self {
        PositionalSpec::named(name)
    }
}

impl<'a> From<String> for PositionalSpec<'a> {
    fn from(name: String) -> Self {
        PositionalSpec::named(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn flag(long: Option<&str>) -> FlagSpec<'static> {
        let flag = FlagSpec::new("description", Trigger::set("x", 1));
        match long {
            Some(l) => flag.long(l),
            None => flag,
        }
    }

    #[rstest]
    #[case(None, "-x", true)]
    #[case(None, "--x", false)]
    #[case(None, "-y", false)]
    #[case(None, "-xx", false)]
    #[case(None, "x", false)]
    #[case(None, "-", false)]
    #[case(None, "--", false)]
    #[case(Some("xlong"), "-x", true)]
    #[case(Some("xlong"), "--xlong", true)]
    #[case(Some("xlong"), "-xlong", false)]
    #[case(Some("xlong"), "--xlon", false)]
    #[case(Some("xlong"), "--xlong=1", false)]
    #[case(Some("xlong"), "xlong", false)]
    fn flag_matches(#[case] long: Option<&str>, #[case] token: &str, #[case] expected: bool) {
        assert_eq!(flag(long).matches('x', token), expected);
    }

    #[rstest]
    #[case(None, "-x", "-x")]
    #[case(Some("xlong"), "-x | --xlong", "--xlong")]
    fn flag_label(#[case] long: Option<&str>, #[case] label: &str, #[case] name: &str) {
        let flag = flag(long);
        assert_eq!(flag.label('x'), label);
        assert_eq!(flag.name('x'), name);
    }

    #[test]
    fn flag_builder() {
        let flag = FlagSpec::new(
            "description",
            Trigger::new(["a", "b"], |_| Ok(Outcome::NoChange)),
        )
        .long("first")
        .long("second")
        .required();

        assert_eq!(flag.long, Some("second".to_string()));
        assert!(flag.required);
        assert!(flag.default.is_none());
        assert_eq!(flag.params(), &["a", "b"]);
        assert_eq!(flag.description, "description");
    }

    #[test]
    fn flag_help() {
        let help = FlagSpec::help();
        assert_eq!(help.label(HELP_SHORT), "-h | --help");
        assert_eq!(help.params().len(), 0);
        assert!(help.matches(HELP_SHORT, "--help"));
        assert_matches!(help.action, FlagAction::Help);
    }

    #[test]
    fn positional_builder() {
        let bare: PositionalSpec = "target".into();
        assert_eq!(bare.name, "target");
        assert_eq!(bare.params().len(), 0);
        assert!(bare.trigger.is_none());

        let structured = PositionalSpec::structured(
            "range",
            Trigger::new(["low", "high"], |_| Ok(Outcome::NoChange)),
        )
        .description("The range.");
        assert_eq!(structured.params(), &["low", "high"]);
        assert_eq!(structured.description, Some("The range.".to_string()));
    }
}
