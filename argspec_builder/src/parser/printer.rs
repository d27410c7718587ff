use terminal_size::{terminal_size, Width};

use crate::api::{FlagSpec, PositionalSpec, Source};
use crate::constant::*;
use crate::parser::interface::UserInterface;
use crate::parser::{ColumnRenderer, LeftWidth, PaddingWidth, TotalWidth};

pub(crate) struct FlagUsage {
    label: String,
    params: Vec<String>,
    description: String,
    required: bool,
}

impl FlagUsage {
    pub(crate) fn new(key: char, flag: &FlagSpec<'_>) -> Self {
        Self {
            label: flag.label(key),
            params: flag.params().to_vec(),
            description: flag.description.clone(),
            required: flag.required,
        }
    }

    fn summary(&self) -> String {
        let grammar: String = self.params.iter().map(|p| format!(" {{{p}}}")).collect();

        if self.required {
            format!("{{{}{grammar}}}", self.label)
        } else {
            format!("[{}{grammar}]", self.label)
        }
    }
}

pub(crate) struct PositionalUsage {
    name: String,
    params: Vec<String>,
    description: Option<String>,
}

impl PositionalUsage {
    fn summary(&self) -> String {
        let grammar: String = self.params.iter().map(|p| format!(" {p}")).collect();
        format!("{{{}{grammar}}}", self.name)
    }
}

impl From<&PositionalSpec<'_>> for PositionalUsage {
    fn from(positional: &PositionalSpec<'_>) -> Self {
        Self {
            name: positional.name.clone(),
            params: positional.params().to_vec(),
            description: positional.description.clone(),
        }
    }
}

pub(crate) struct Printer<'a> {
    command: String,
    description: Source<'a, String>,
    footer: Option<Source<'a, String>>,
    flags: Vec<FlagUsage>,
    positionals: Vec<PositionalUsage>,
    terminal_width: Option<usize>,
    allow_extra: bool,
}

const PADDING_WIDTH: usize = 2;
const MAIN_INDENT: usize = 2;

impl<'a> Printer<'a> {
    #[cfg(test)]
    pub(crate) fn empty() -> Self {
        Self::new(
            "program".to_string(),
            Source::Value(String::default()),
            None,
            Vec::default(),
            Vec::default(),
            None,
        )
    }

    pub(crate) fn terminal_width() -> Option<usize> {
        terminal_size().map(|(Width(terminal_width), _)| terminal_width as usize)
    }

    pub(crate) fn new(
        command: String,
        description: Source<'a, String>,
        footer: Option<Source<'a, String>>,
        flags: Vec<FlagUsage>,
        positionals: Vec<PositionalUsage>,
        terminal_width: Option<usize>,
    ) -> Self {
        Self {
            command,
            description,
            footer,
            flags,
            positionals,
            terminal_width,
            allow_extra: false,
        }
    }

    pub(crate) fn allow_extra(mut self, allow_extra: bool) -> Self {
        self.allow_extra = allow_extra;
        self
    }

    fn summary(&self) -> String {
        let mut summary = vec![format!("Usage: {}", self.command)];
        summary.extend(self.flags.iter().map(FlagUsage::summary));
        summary.extend(self.positionals.iter().map(PositionalUsage::summary));

        if self.allow_extra {
            summary.push(EXTRA_SUMMARY.to_string());
        }

        summary.join(" ")
    }

    fn column_renderer(&self) -> ColumnRenderer {
        let left_column_width = self
            .flags
            .iter()
            .map(|flag| flag.label.chars().count())
            .chain(self.positionals.iter().map(|p| p.name.chars().count()))
            .max()
            .unwrap_or_default();
        let padding = || {
            PaddingWidth::new(PADDING_WIDTH).expect("internal error - padding must be non-zero")
        };

        match self.terminal_width {
            Some(tw) => ColumnRenderer::guided(
                MAIN_INDENT,
                padding(),
                LeftWidth::new(left_column_width),
                TotalWidth(tw),
            ),
            None => ColumnRenderer::new(
                MAIN_INDENT,
                padding(),
                LeftWidth::new(left_column_width),
                None,
            ),
        }
    }

    pub(crate) async fn render(&self) -> Vec<String> {
        let mut lines = Vec::default();
        let description = self.description.resolve().await;

        if !description.is_empty() {
            lines.push(description);
            lines.push(String::default());
        }

        lines.push(self.summary());
        let column_renderer = self.column_renderer();

        for FlagUsage {
            label,
            description,
            required,
            ..
        } in &self.flags
        {
            let middle = if *required {
                format!("{REQUIRED_MARKER}{description}")
            } else {
                description.clone()
            };
            lines.extend(column_renderer.render(label, &middle));
        }

        for PositionalUsage {
            name, description, ..
        } in &self.positionals
        {
            lines.extend(column_renderer.render(name, description.as_deref().unwrap_or_default()));
        }

        if let Some(footer) = &self.footer {
            let footer = footer.resolve().await;

            if !footer.is_empty() {
                lines.push(String::default());
                lines.push(footer);
            }
        }

        lines
    }

    pub(crate) async fn print_help(&self, user_interface: &(impl UserInterface + ?Sized)) {
        for line in self.render().await {
            user_interface.print(line);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Trigger;
    use crate::model::Outcome;
    use crate::parser::util::InMemoryInterface;
    use futures::executor::block_on;
    use rstest::rstest;

    fn name_flag() -> FlagSpec<'static> {
        FlagSpec::new(
            "The name to greet.",
            Trigger::new(["name"], |args| Ok(Outcome::set("name", args[0].as_str()))),
        )
        .long("name")
        .required()
    }

    fn verbose_flag() -> FlagSpec<'static> {
        FlagSpec::new("Be verbose.", Trigger::set("verbose", true))
    }

    fn printer(
        flags: Vec<(char, FlagSpec<'static>)>,
        positionals: Vec<PositionalSpec<'static>>,
        terminal_width: Option<usize>,
    ) -> Printer<'static> {
        Printer::new(
            "program".to_string(),
            Source::Value(String::default()),
            None,
            flags
                .iter()
                .map(|(key, flag)| FlagUsage::new(*key, flag))
                .collect(),
            positionals.iter().map(PositionalUsage::from).collect(),
            terminal_width,
        )
    }

    #[test]
    fn print_help_empty() {
        // Setup
        let printer = Printer::empty();
        let interface = InMemoryInterface::default();

        // Execute
        block_on(printer.print_help(&interface));

        // Verify
        let message = interface.consume_message();
        assert_eq!(message, "Usage: program");
    }

    #[rstest]
    #[case(name_flag(), "{-n | --name {name}}")]
    #[case(verbose_flag(), "[-n]")]
    #[case(verbose_flag().long("verbose"), "[-n | --verbose]")]
    #[case(FlagSpec::new("", Trigger::new(["w", "h"], |_| Ok(()))), "[-n {w} {h}]")]
    #[case(FlagSpec::new("", Trigger::set("x", 1)).required(), "{-n}")]
    fn flag_summary(#[case] flag: FlagSpec<'static>, #[case] expected: &str) {
        assert_eq!(FlagUsage::new('n', &flag).summary(), expected);
    }

    #[rstest]
    #[case(PositionalSpec::named("target"), "{target}")]
    #[case(PositionalSpec::structured("range", Trigger::new(["low", "high"], |_| Ok(()))), "{range low high}")]
    fn positional_summary(#[case] positional: PositionalSpec<'static>, #[case] expected: &str) {
        assert_eq!(PositionalUsage::from(&positional).summary(), expected);
    }

    #[test]
    fn print_help() {
        // Setup
        let printer = Printer::new(
            "program".to_string(),
            "Greets people.".into(),
            Some(Source::with(|| "See the docs.".to_string())),
            vec![
                FlagUsage::new('n', &name_flag()),
                FlagUsage::new('v', &verbose_flag()),
                FlagUsage::new(HELP_SHORT, &FlagSpec::help()),
            ],
            vec![PositionalUsage::from(
                &PositionalSpec::named("target").description("The target file."),
            )],
            None,
        );
        let interface = InMemoryInterface::default();

        // Execute
        block_on(printer.print_help(&interface));

        // Verify
        let message = interface.consume_message();
        assert_eq!(
            message,
            r#"Greets people.

Usage: program {-n | --name {name}} [-v] [-h | --help] {target}
  -n | --name  (required) The name to greet.
  -v           Be verbose.
  -h | --help  This help message
  target       The target file.

See the docs."#
        );
    }

    #[test]
    fn print_help_positionals() {
        // Setup
        let printer = printer(
            vec![('v', verbose_flag())],
            vec![
                PositionalSpec::named("from"),
                PositionalSpec::structured(
                    "range",
                    Trigger::new(["low", "high"], |_| Ok(())),
                )
                .description("The inclusive range."),
            ],
            None,
        )
        .allow_extra(true);

        // Execute
        let lines = block_on(printer.render());

        // Verify
        assert_eq!(
            lines,
            vec![
                "Usage: program [-v] {from} {range low high} [...]",
                "  -v     Be verbose.",
                "  from",
                "  range  The inclusive range.",
            ]
        );
    }

    #[test]
    fn print_help_wrapped() {
        // Setup
        let printer = printer(
            vec![(
                'v',
                FlagSpec::new(
                    "Print every step of the computation, as well as the intermediate results.",
                    Trigger::set("verbose", true),
                ),
            )],
            Vec::default(),
            Some(30),
        );

        // Execute
        let lines = block_on(printer.render());

        // Verify
        assert_eq!(
            lines,
            vec![
                "Usage: program [-v]",
                "  -v  Print every step of",
                "      the computation, as",
                "      well as the",
                "      intermediate results.",
            ]
        );
    }

    #[test]
    fn print_help_async_sources() {
        // Setup
        let printer = Printer::new(
            "program".to_string(),
            Source::future(|| async { "Loaded description.".to_string() }),
            Some(Source::future(|| async { String::default() })),
            Vec::default(),
            Vec::default(),
            None,
        );

        // Execute
        let lines = block_on(printer.render());

        // Verify
        assert_eq!(lines, vec!["Loaded description.", "", "Usage: program"]);
    }
}
