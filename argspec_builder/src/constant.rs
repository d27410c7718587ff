pub(crate) const HELP_SHORT: char = 'h';
pub(crate) const HELP_NAME: &str = "help";
pub(crate) const HELP_MESSAGE: &str = "This help message";
pub(crate) const EXTRA_NAME: &str = "extra";
pub(crate) const REQUIRED_MARKER: &str = "(required) ";
pub(crate) const EXTRA_SUMMARY: &str = "[...]";
