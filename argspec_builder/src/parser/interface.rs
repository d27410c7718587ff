use std::env;
use std::path::Path;

use crate::parser::ReadError;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

#[derive(Debug)]
pub(crate) struct PaddingWidth(usize);

impl PaddingWidth {
    pub(crate) fn new(width: usize) -> Result<Self, ()> {
        // padding must be at least 1
        if width >= 1 {
            Ok(PaddingWidth(width))
        } else {
            Err(())
        }
    }
}

#[derive(Debug)]
pub(crate) struct LeftWidth(usize);

impl LeftWidth {
    pub(crate) fn new(width: usize) -> Self {
        LeftWidth(width)
    }
}

#[derive(Debug, PartialEq, Eq)]
pub(crate) struct MiddleWidth(usize);

impl MiddleWidth {
    pub(crate) fn new(width: usize) -> Result<Self, ()> {
        // middle must be at least 2 (so we can hyphenate)
        if width >= 2 {
            Ok(MiddleWidth(width))
        } else {
            Err(())
        }
    }
}

#[derive(Debug)]
pub(crate) struct TotalWidth(pub usize);

/// Renders `left` & `middle` columns.
/// The middle column is wrapped only when it has a width.
#[derive(Debug)]
pub(crate) struct ColumnRenderer {
    indent: usize,
    padding: PaddingWidth,
    left: LeftWidth,
    middle: Option<MiddleWidth>,
}

// We'll target 95% of the total width, to ensure the renderer doesn't literally use the full space.
const TARGET_TOTAL_FACTOR: f64 = 0.95;

// Let's assume the average word length is 5.
// Then 17 is a good minimum, because it allows precisely 3 words with a space between them.
pub(crate) const MINIMUM_MIDDLE_WIDTH: usize = 17;

impl ColumnRenderer {
    /// Produce a renderer which fits the middle column into the total width, where possible.
    pub(crate) fn guided(
        indent: usize,
        padding: PaddingWidth,
        left: LeftWidth,
        total_width: TotalWidth,
    ) -> Self {
        let non_middle = indent + left.0 + padding.0;
        let target_total_width = (total_width.0 as f64 * TARGET_TOTAL_FACTOR) as usize;
        let middle = if non_middle + MINIMUM_MIDDLE_WIDTH <= target_total_width {
            target_total_width - non_middle
        } else {
            MINIMUM_MIDDLE_WIDTH
        };

        #[cfg(feature = "tracing_debug")]
        {
            debug!("Columns {non_middle} within the total {}.  Selecting middle: {middle}.", total_width.0);
        }

        Self::new(indent, padding, left, MiddleWidth::new(middle).ok())
    }

    pub(crate) fn new(
        indent: usize,
        padding: PaddingWidth,
        left: LeftWidth,
        middle: Option<MiddleWidth>,
    ) -> Self {
        Self {
            indent,
            padding,
            left,
            middle,
        }
    }

    pub(crate) fn render(&self, left: &str, middle: &str) -> Vec<String> {
        let indent = self.indent;
        let left_column_width = self.left.0;
        let padding = self.padding.0;
        let prefix = format!("{:indent$}{left:left_column_width$}{:padding$}", "", "");
        let continuation = " ".repeat(prefix.chars().count());
        let parts = match &self.middle {
            Some(MiddleWidth(width)) => chunk(middle, *width),
            None => vec![middle.trim().to_string()],
        };
        let mut out = Vec::default();

        for (i, part) in parts.iter().enumerate() {
            let line = if i == 0 {
                format!("{prefix}{part}")
            } else {
                format!("{continuation}{part}")
            };
            out.push(line.trim_end().to_string());
        }

        if out.is_empty() {
            out.push(prefix.trim_end().to_string());
        }

        out
    }
}

fn chunk(paragraph: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::default();
    let mut current = String::default();

    for word in paragraph.split(' ').filter(|word| !word.is_empty()) {
        if current.is_empty() {
            hyphenate(width, &mut lines, &mut current, word);
        } else if current.chars().count() + word.chars().count() < width {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            hyphenate(width, &mut lines, &mut current, word);
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    lines
}

fn hyphenate(width: usize, lines: &mut Vec<String>, current: &mut String, word: &str) {
    let characters: Vec<char> = word.chars().collect();
    let increment = width - 1;
    let mut left = 0;

    while characters.len() - left > width {
        let piece: String = characters[left..left + increment].iter().collect();
        lines.push(format!("{piece}-"));
        left += increment;
    }

    current.extend(&characters[left..]);
}

/// The collaborator through which a [`Reader`](./struct.Reader.html) interacts with the outside world.
pub trait UserInterface {
    /// Emit a line of text (ex: a line of the usage message).
    fn print(&self, message: String);

    /// Emit the error which stopped the read.
    fn print_error(&self, error: &ReadError);

    /// Terminate the program with `code`.
    /// Implementations may return, in which case the reader returns the corresponding [`ReadError`].
    fn terminate(&self, code: i32);

    /// The raw argument list, including the program name.
    fn arguments(&self) -> Vec<String>;

    /// The command name shown in the usage message.
    fn command_name(&self) -> String;
}

/// The user interface of a console program: stderr, [`std::process::exit`] and [`std::env::args`].
#[derive(Debug, Default)]
pub struct ConsoleInterface {}

impl UserInterface for ConsoleInterface {
    fn print(&self, message: String) {
        eprintln!("{message}");
    }

    fn print_error(&self, error: &ReadError) {
        eprintln!("{error}");
    }

    fn terminate(&self, code: i32) {
        std::process::exit(code);
    }

    fn arguments(&self) -> Vec<String> {
        env::args().collect()
    }

    fn command_name(&self) -> String {
        let invoked = env::args().next().unwrap_or_default();
        let working = env::current_dir().ok();
        relative_name(&invoked, working.as_deref())
    }
}

fn relative_name(invoked: &str, working: Option<&Path>) -> String {
    let path = Path::new(invoked);
    let relative = match working {
        Some(working) => path.strip_prefix(working).unwrap_or(path),
        None => path,
    };
    let name = relative.to_string_lossy();

    if name.is_empty() {
        ".".to_string()
    } else {
        name.into_owned()
    }
}

#[cfg(any(test, feature = "unit_test"))]
pub(crate) mod util {
    use crate::parser::{ReadError, UserInterface};
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Debug, Default)]
    struct Record {
        messages: Vec<String>,
        error: Option<String>,
        exit_code: Option<i32>,
    }

    /// A user interface which records everything in memory.
    /// Clones share the same record, so one clone may be handed to the reader and another inspected afterwards.
    #[derive(Debug, Clone)]
    pub struct InMemoryInterface {
        record: Rc<RefCell<Record>>,
        arguments: Vec<String>,
        command_name: String,
    }

    impl Default for InMemoryInterface {
        fn default() -> Self {
            Self {
                record: Rc::new(RefCell::new(Record::default())),
                arguments: vec!["program".to_string()],
                command_name: "program".to_string(),
            }
        }
    }

    impl InMemoryInterface {
        /// Use `command_name` for the [`UserInterface::command_name`].
        pub fn with_command_name(mut self, command_name: impl Into<String>) -> Self {
            self.command_name = command_name.into();
            self
        }

        /// Use `arguments` for the [`UserInterface::arguments`], which starts with the program name.
        pub fn with_arguments(
            mut self,
            arguments: impl IntoIterator<Item = impl Into<String>>,
        ) -> Self {
            self.arguments = arguments.into_iter().map(Into::into).collect();
            self
        }

        /// The printed lines (joined by newlines), the printed error, and the termination code.
        pub fn consume(&self) -> (Option<String>, Option<String>, Option<i32>) {
            let mut record = self.record.borrow_mut();
            let messages = std::mem::take(&mut record.messages);
            let message = if messages.is_empty() {
                None
            } else {
                Some(messages.join("\n"))
            };

            (message, record.error.take(), record.exit_code.take())
        }

        /// The printed lines, asserting nothing else was recorded.
        #[cfg(test)]
        pub(crate) fn consume_message(&self) -> String {
            let (message, error, exit_code) = self.consume();
            assert_eq!(error, None);
            assert_eq!(exit_code, None);
            message.unwrap()
        }
    }

    impl UserInterface for InMemoryInterface {
        fn print(&self, message: String) {
            self.record.borrow_mut().messages.push(message);
        }

        fn print_error(&self, error: &ReadError) {
            // Assumes print_error() is only ever called once per read.
            self.record.borrow_mut().error.replace(error.to_string());
        }

        fn terminate(&self, code: i32) {
            self.record.borrow_mut().exit_code.replace(code);
        }

        fn arguments(&self) -> Vec<String> {
            self.arguments.clone()
        }

        fn command_name(&self) -> String {
            self.command_name.clone()
        }
    }
}
