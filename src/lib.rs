//! `argspec` is a declarative command line option parser for Rust.
//!
//! A program describes its Cli once, as a [`Specification`] of flags and positionals.
//! Each flag (or structured positional) carries a [`Trigger`]: a function, possibly async, which receives the tokens matched on the Cli and returns a partial result.
//! These partial results are deep merged into a single json object, the parsed [`Options`].
//! `argspec` prioritizes the following design concerns:
//! * *Declarative configuration*:
//! The usage message, the token matching, and the error reporting all come from the same specification.
//! * *Triggers over types*:
//! The user decides how tokens become values, and may reach for async work (ex: reading a file) while doing so.
//! * *Predictable merging*:
//! Defaults, triggers, and the validation hook all contribute through the same merge rule.
//! * *One failure path*:
//! Every malformed input is reported the same way: the error, the usage message, then a non-zero exit.
//!
//! # Usage
//! ```no_run
#![doc = include_str!("../demos/greet.rs")]
//! ```
//!
//! This generates the following Cli program:
//! ```console
//! $ greet -h
//! Greets a target, by name.
//!
//! Usage: greet {-n | --name {name}} [-l | --loud] [-h | --help] {target}
//!   -n | --name  (required) The name to greet with.
//!   -l | --loud  Greet loudly.
//!   -h | --help  This help message
//!   target       Who to greet.
//!
//! Exits with 1 on invalid input.
//!
//! $ greet --name Alice Bob
//! Hello Bob, from Alice.
//!
//! $ greet Bob
//! Expected required arguments -n | --name.
//! Greets a target, by name.
//! <truncated>
//! ```
//!
//! # Specification
//! Configure `argspec` by starting with a [`Specification`], and adding flags & positionals.
//!
//! ### Flags
//! A [`FlagSpec`] is keyed by a single alphanumeric character `x`, matched on the Cli as `-x`.
//! It may also be aliased with a long name, matched as `--long`.
//! The flag's trigger declares its parameter names up front: the number of names is the number of tokens the flag consumes.
//! * [`Trigger::new`]: a synchronous trigger.
//! * [`Trigger::future`]: an asynchronous trigger, awaited before the next token is matched.
//! * [`Trigger::switch`] & [`Trigger::set`]: triggers which consume no tokens.
//!
//! A flag may be `required`, in which case the read fails when it is absent.
//! A flag may also declare a `default_value`, which is merged before any token is matched.
//!
//! Unless a flag with key `h` (or long name `help`) is added, every specification includes `-h | --help`.
//!
//! ### Positionals
//! A [`PositionalSpec`] is satisfied by the tokens which match no flag, in declaration order.
//! * [`PositionalSpec::named`]: assigns the matched token, as a string, under its name.
//! * [`PositionalSpec::structured`]: passes a window of tokens (starting at the matched token) to its trigger.
//!
//! Every positional must be satisfied.
//! Any token left over is an error, unless the specification [`allow_extra`](./struct.Specification.html#method.allow_extra).
//! In that case, these tokens are collected into [`Options::extra`].
//!
//! ### Asynchronous
//! Triggers, defaults, the validator, and the description & footer may all be asynchronous.
//! They are awaited one at a time, in the order the tokens call for them.
//! The following demonstrates the asynchronous variants.
//!
//! ```no_run
#![doc = include_str!("../demos/summer.rs")]
//! ```
//!
//! # Merge Semantics
//! Every partial result is merged into the options as follows (see [`merge`]).
//! * Arrays are unioned with the current array, removing duplicates while keeping the order of first appearance.
//! * Objects are merged recursively.
//! * Anything else overwrites the current value.
//!
//! ```
//! use argspec::merge;
//! use serde_json::json;
//!
//! let mut target = json!({"tags": ["a"], "size": {"width": 1}, "name": "x"});
//! let source = json!({"tags": ["a", "b"], "size": {"height": 2}, "name": "y"});
//! merge(
//!     target.as_object_mut().unwrap(),
//!     source.as_object().unwrap().clone(),
//! );
//!
//! assert_eq!(
//!     target,
//!     json!({"tags": ["a", "b"], "size": {"width": 1, "height": 2}, "name": "y"})
//! );
//! ```
//!
//! # Cli Semantics
//! `argspec` reads the Cli tokens according to the following set of rules.
//! * A token matches a flag when it is precisely `-x` or `--long`.
//! There is no combining of short flags (`-abc`), nor `=` separated values (`--key=value`).
//! * Once matched, the flag consumes the subsequent tokens based off its trigger's parameters, even when these look like flags.
//! For example, `--range -1 5` passes `-1` and `5` to a flag with two parameters.
//! * A token which matches no flag goes to the next positional.
//! * Repeating a flag runs its trigger again; the results merge as above.
//! * The help flag prints the usage message and exits with `0`, regardless of the other tokens.
//!
//! # Features
//! * `unit_test`: For features that help with unit testing (see `InMemoryInterface`).
//! * `tracing_debug`: Emit `tracing` debug events while reading.
pub use argspec_builder::*;
