use crate::api::{FlagSpec, PositionalSpec, Source, Validator};
use crate::constant::*;
use crate::matcher::Processor;
use crate::parser::{
    ConfigError, ConsoleInterface, FlagUsage, PositionalUsage, Printer, Reader, UserInterface,
};

/// The declarative specification of a command line.
///
/// ### Example
/// ```
/// # use argspec_builder as argspec;
/// use argspec::Specification;
///
/// let reader = Specification::new()
///     .command("program")
///     // Configure with Specification::flag and Specification::positional.
///     .build();
/// reader.read_blocking(&[]).unwrap();
/// ```
pub struct Specification<'a> {
    command: Option<String>,
    description: Source<'a, String>,
    footer: Option<Source<'a, String>>,
    flags: Vec<(char, FlagSpec<'a>)>,
    positionals: Vec<PositionalSpec<'a>>,
    allow_extra: bool,
    validator: Option<Validator<'a>>,
}

impl<'a> Default for Specification<'a> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> Specification<'a> {
    /// Create an empty specification.
    pub fn new() -> Self {
        Self {
            command: None,
            description: Source::Value(String::default()),
            footer: None,
            flags: Vec::default(),
            positionals: Vec::default(),
            allow_extra: false,
            validator: None,
        }
    }

    /// The command name shown in the usage message.
    /// When omitted, the name comes from [`UserInterface::command_name`] (for the console: the path of the invoked program, relative to the working directory).
    pub fn command(mut self, command: impl Into<String>) -> Self {
        self.command.replace(command.into());
        self
    }

    /// Document the program, shown above the usage line.
    /// If repeated, only the final description will apply.
    ///
    /// ### Example
    /// ```
    /// # use argspec_builder as argspec;
    /// use argspec::{Source, Specification};
    ///
    /// let reader = Specification::new()
    ///     .command("program")
    ///     .description("--this will get discarded--")
    ///     .description(Source::with(|| format!("My program, version {}.", 3)))
    ///     .build();
    ///
    /// reader.read_blocking(&[]).unwrap();
    /// ```
    pub fn description(mut self, description: impl Into<Source<'a, String>>) -> Self {
        self.description = description.into();
        self
    }

    /// Text shown below the usage message.
    /// If repeated, only the final footer will apply.
    pub fn footer(mut self, footer: impl Into<Source<'a, String>>) -> Self {
        self.footer.replace(footer.into());
        self
    }

    /// Add a flag, matched via `-{key}` (and `--{long}` when aliased).
    ///
    /// The order of flags determines the order in which their defaults are applied, as well as their order in the usage message.
    /// Unless a flag with key `h` (or long `help`) is added, the specification includes `-h | --help`.
    ///
    /// ### Example
    /// ```
    /// # use argspec_builder as argspec;
    /// use argspec::{FlagSpec, Outcome, Specification, Trigger};
    /// use serde_json::json;
    ///
    /// let reader = Specification::new()
    ///     .command("program")
    ///     .flag('v', FlagSpec::new("Be verbose.", Trigger::set("verbose", true)).long("verbose"))
    ///     .flag(
    ///         's',
    ///         FlagSpec::new(
    ///             "The size.",
    ///             Trigger::new(["width", "height"], |args| {
    ///                 Outcome::from_value(json!({"size": {"width": args[0], "height": args[1]}}))
    ///             }),
    ///         ),
    ///     )
    ///     .build();
    ///
    /// let options = reader.read_blocking(&["--verbose", "-s", "3", "4"]).unwrap();
    ///
    /// assert_eq!(
    ///     options.into_value(),
    ///     json!({"verbose": true, "size": {"width": "3", "height": "4"}})
    /// );
    /// ```
    pub fn flag(mut self, key: char, flag: FlagSpec<'a>) -> Self {
        self.flags.push((key, flag));
        self
    }

    /// Add a positional slot.
    ///
    /// The order of positionals corresponds to their order during parsing.
    /// Every positional must be satisfied for the read to succeed.
    ///
    /// ### Example
    /// ```
    /// # use argspec_builder as argspec;
    /// use argspec::Specification;
    ///
    /// let reader = Specification::new()
    ///     .command("program")
    ///     .positional("from")
    ///     .positional("to")
    ///     .build();
    ///
    /// let options = reader.read_blocking(&["A", "B"]).unwrap();
    ///
    /// assert_eq!(options.get_str("from"), Some("A"));
    /// assert_eq!(options.get_str("to"), Some("B"));
    /// ```
    pub fn positional(mut self, positional: impl Into<PositionalSpec<'a>>) -> Self {
        self.positionals.push(positional.into());
        self
    }

    /// Collect the tokens which match neither a flag nor a positional into [`Options::extra`](./struct.Options.html#method.extra), rather than rejecting them.
    pub fn allow_extra(mut self) -> Self {
        self.allow_extra = true;
        self
    }

    /// Validate the parsed options.
    /// If repeated, only the final validator will apply.
    pub fn validate(mut self, validator: Validator<'a>) -> Self {
        self.validator.replace(validator);
        self
    }

    /// Build the reader with the provided user interface.
    /// This finalizes the configuration and checks for errors (ex: a repeated flag key).
    pub fn build_with_interface(
        self,
        user_interface: Box<dyn UserInterface + 'a>,
    ) -> Result<Reader<'a>, ConfigError> {
        self.build_with_terminal(user_interface, None)
    }

    fn build_with_terminal(
        self,
        user_interface: Box<dyn UserInterface + 'a>,
        terminal_width: Option<usize>,
    ) -> Result<Reader<'a>, ConfigError> {
        let Specification {
            command,
            description,
            footer,
            mut flags,
            positionals,
            allow_extra,
            validator,
        } = self;

        let has_help = flags.iter().any(|(key, flag)| {
            *key == HELP_SHORT || flag.long.as_deref() == Some(HELP_NAME)
        });

        if !has_help {
            flags.push((HELP_SHORT, FlagSpec::help()));
        }

        let flag_usages = flags
            .iter()
            .map(|(key, flag)| FlagUsage::new(*key, flag))
            .collect();
        let positional_usages = positionals.iter().map(PositionalUsage::from).collect();
        let command = command.unwrap_or_else(|| user_interface.command_name());
        let printer = Printer::new(
            command,
            description,
            footer,
            flag_usages,
            positional_usages,
            terminal_width,
        )
        .allow_extra(allow_extra);
        let processor = Processor::new(flags, positionals, allow_extra)?;

        Ok(Reader::new(processor, printer, validator, user_interface))
    }

    /// Build the reader as a Result.
    /// This finalizes the configuration and checks for errors (ex: a repeated flag key).
    pub fn build_reader(self) -> Result<Reader<'a>, ConfigError> {
        self.build_with_terminal(
            Box::new(ConsoleInterface::default()),
            Printer::terminal_width(),
        )
    }

    /// Build the reader.
    /// This finalizes the configuration and checks for errors (ex: a repeated flag key).
    /// If an error is encountered, exits with error code `1` (via [`std::process::exit`]).
    pub fn build(self) -> Reader<'a> {
        match self.build_reader() {
            Ok(reader) => reader,
            Err(e) => {
                eprintln!("{e}");
                std::process::exit(1);
            }
        }
    }
}
