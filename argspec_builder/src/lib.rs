//! Builder module for `argspec`.
//! See [documentation root](https://docs.rs/argspec/latest/argspec/index.html) for full details.
#![deny(missing_docs)]
mod api;
mod constant;
mod matcher;
mod merge;
mod model;
mod parser;

pub use api::*;
pub use merge::{merge, merge_all};
pub use model::*;
#[cfg(feature = "unit_test")]
pub use parser::InMemoryInterface;
pub use parser::{ConfigError, ConsoleInterface, ReadError, Reader, UserInterface};

#[cfg(test)]
#[macro_use]
extern crate assert_matches;
