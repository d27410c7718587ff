use futures::executor::block_on;

use crate::api::Validator;
use crate::matcher::{Action, Processor};
use crate::model::Options;
use crate::parser::interface::UserInterface;
use crate::parser::printer::Printer;
use crate::parser::ReadError;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// The configured command line reader.
/// Built via [`Specification::build`](./struct.Specification.html#method.build).
pub struct Reader<'a> {
    processor: Processor<'a>,
    printer: Printer<'a>,
    validator: Option<Validator<'a>>,
    user_interface: Box<dyn UserInterface + 'a>,
}

impl<'a> std::fmt::Debug for Reader<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reader{..}").finish()
    }
}

impl<'a> Reader<'a> {
    pub(crate) fn new(
        processor: Processor<'a>,
        printer: Printer<'a>,
        validator: Option<Validator<'a>>,
        user_interface: Box<dyn UserInterface + 'a>,
    ) -> Self {
        Self {
            processor,
            printer,
            validator,
            user_interface,
        }
    }

    /// Print the usage message, line by line, via [`UserInterface::print`].
    pub async fn usage(&self) {
        self.printer.print_help(&*self.user_interface).await;
    }

    /// The usage message as a single string.
    pub async fn usage_text(&self) -> String {
        self.printer.render().await.join("\n")
    }

    async fn process(&self, tokens: &[&str]) -> Result<Options, ReadError> {
        let mut options = match self.processor.consume(tokens).await? {
            Action::Complete(options) => options,
            Action::PrintHelp => return Err(ReadError::HelpRequested),
        };

        if let Some(validator) = &self.validator {
            let outcome = validator
                .invoke(&options)
                .await
                .map_err(|error| ReadError::Validation(error.to_string()))?;

            #[cfg(feature = "tracing_debug")]
            {
                debug!("Validation passed, applying {outcome:?}.");
            }

            options.apply(outcome);
        }

        Ok(options)
    }

    /// Read the input tokens into options.
    ///
    /// The reader proceeds as follows:
    /// 1. The defaults of every flag are merged, in specification order.
    /// 2. The tokens are matched left to right against the flags and then the positionals.
    /// Each trigger is awaited to completion, and its outcome merged, before the next token is matched.
    /// 3. The validator (if any) is awaited, and its outcome merged last.
    ///
    /// If the help flag (`-h` or `--help`) is encountered, the reader prints the usage message, terminates with code `0`, and returns [`ReadError::HelpRequested`].
    ///
    /// Any other failure (ex: an unknown token, a missing positional, a rejected validation) is printed via [`UserInterface::print_error`] followed by the usage message.
    /// The reader then terminates with code `1`, and returns the error.
    pub async fn read(&self, tokens: &[&str]) -> Result<Options, ReadError> {
        match self.process(tokens).await {
            Ok(options) => Ok(options),
            Err(ReadError::HelpRequested) => {
                self.usage().await;
                self.user_interface.terminate(0);
                Err(ReadError::HelpRequested)
            }
            Err(error) => {
                #[cfg(feature = "tracing_debug")]
                {
                    debug!("Read failed: {error:?}.");
                }

                self.user_interface.print_error(&error);
                self.usage().await;
                self.user_interface.terminate(error.exit_code());
                Err(error)
            }
        }
    }

    /// Run [`Reader::read`] to completion on the current thread.
    pub fn read_blocking(&self, tokens: &[&str]) -> Result<Options, ReadError> {
        block_on(self.read(tokens))
    }

    /// Run [`Reader::read_blocking`] against [`UserInterface::arguments`], skipping the program name.
    /// For the console, these are the [`std::env::args`].
    pub fn read_args(&self) -> Result<Options, ReadError> {
        let arguments = self.user_interface.arguments();
        let tokens: Vec<&str> = arguments.iter().skip(1).map(AsRef::as_ref).collect();
        self.read_blocking(tokens.as_slice())
    }
}
