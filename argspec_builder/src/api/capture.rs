use std::future::Future;

use futures::future::{self, FutureExt, LocalBoxFuture};
use serde_json::Value;
use thiserror::Error;

use crate::model::{Options, Outcome};

type TriggerFn<'a> = dyn Fn(Vec<String>) -> LocalBoxFuture<'a, Result<Outcome, TriggerError>> + 'a;
type ValidatorFn<'a> =
    dyn Fn(Options) -> LocalBoxFuture<'a, Result<Outcome, ValidationError>> + 'a;
type ProducerFn<'a, T> = dyn Fn() -> LocalBoxFuture<'a, T> + 'a;

/// The failure of a [`Trigger`] to extract its partial result.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("{0}")]
pub struct TriggerError(String);

impl TriggerError {
    /// Create a trigger error.
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// The rejection of the parsed options by a [`Validator`].
#[derive(Debug, Error, PartialEq, Eq)]
#[error("{0}")]
pub struct ValidationError(String);

impl ValidationError {
    /// Create a validation error.
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// The extraction function bound to a flag or structured positional.
///
/// A trigger declares its parameter names up front.
/// The number of names is the trigger's arity: the number of tokens it consumes when matched.
/// The parameter names are also shown in the usage message.
///
/// ### Example
/// ```
/// # use argspec_builder as argspec;
/// use argspec::{Outcome, Trigger};
///
/// let trigger = Trigger::new(["width", "height"], |args| {
///     let width: u32 = args[0].parse().map_err(|_| argspec::TriggerError::new("bad width"))?;
///     let height: u32 = args[1].parse().map_err(|_| argspec::TriggerError::new("bad height"))?;
///     Ok(Outcome::set("area", width * height))
/// });
///
/// assert_eq!(trigger.arity(), 2);
/// assert_eq!(trigger.params(), &["width", "height"]);
/// ```
pub struct Trigger<'a> {
    params: Vec<String>,
    call: Box<TriggerFn<'a>>,
}

impl<'a> Trigger<'a> {
    /// Create a synchronous trigger.
    /// The closure receives precisely [`Trigger::arity`] tokens.
    pub fn new<F, O>(params: impl IntoIterator<Item = impl Into<String>>, trigger: F) -> Self
    where
        F: Fn(&[String]) -> Result<O, TriggerError> + 'a,
        O: Into<Outcome>,
    {
        Self {
            params: params.into_iter().map(Into::into).collect(),
            call: Box::new(move |args: Vec<String>| {
                future::ready(trigger(&args).map(Into::into)).boxed_local()
            }),
        }
    }

    /// Create an asynchronous trigger.
    /// The future is awaited to completion before any further token is processed.
    ///
    /// ### Example
    /// ```
    /// # use argspec_builder as argspec;
    /// use argspec::{Outcome, Trigger};
    ///
    /// let trigger = Trigger::future(["path"], |args| async move {
    ///     // Do some async work here.
    ///     Ok::<_, argspec::TriggerError>(Outcome::set("path", args[0].clone()))
    /// });
    ///
    /// assert_eq!(trigger.arity(), 1);
    /// ```
    pub fn future<F, Fut>(params: impl IntoIterator<Item = impl Into<String>>, trigger: F) -> Self
    where
        F: Fn(Vec<String>) -> Fut + 'a,
        Fut: Future<Output = Result<Outcome, TriggerError>> + 'a,
    {
        Self {
            params: params.into_iter().map(Into::into).collect(),
            call: Box::new(move |args: Vec<String>| trigger(args).boxed_local()),
        }
    }

    /// Create a trigger which takes no tokens.
    pub fn switch<F, O>(trigger: F) -> Self
    where
        F: Fn() -> Result<O, TriggerError> + 'a,
        O: Into<Outcome>,
    {
        Self::new(Vec::<String>::new(), move |_| trigger())
    }

    /// Create a trigger which takes no tokens and sets `key` to `value`.
    ///
    /// ### Example
    /// ```
    /// # use argspec_builder as argspec;
    /// use argspec::Trigger;
    ///
    /// let trigger = Trigger::set("verbose", true);
    /// assert_eq!(trigger.arity(), 0);
    /// ```
    pub fn set(key: impl Into<String>, value: impl Into<Value>) -> Self {
        let key = key.into();
        let value = value.into();
        Self::switch(move || Ok(Outcome::set(key.clone(), value.clone())))
    }

    /// The number of tokens this trigger consumes.
    pub fn arity(&self) -> usize {
        self.params.len()
    }

    /// The declared parameter names.
    pub fn params(&self) -> &[String] {
        &self.params
    }

    pub(crate) async fn invoke(&self, args: Vec<String>) -> Result<Outcome, TriggerError> {
        debug_assert_eq!(args.len(), self.arity());
        (self.call)(args).await
    }
}

impl<'a> std::fmt::Debug for Trigger<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Trigger")
            .field("params", &self.params)
            .finish()
    }
}

/// The validation hook, run over the fully parsed options.
///
/// It may return an [`Outcome::Override`], which is merged over the parsed options as the final word.
/// Reject the options by returning a [`ValidationError`].
///
/// ### Example
/// ```
/// # use argspec_builder as argspec;
/// use argspec::{Outcome, ValidationError, Validator};
///
/// let validator = Validator::new(|options| {
///     if options.contains("from") && !options.contains("to") {
///         Err(ValidationError::new("'from' requires 'to'."))
///     } else {
///         Ok(Outcome::NoChange)
///     }
/// });
/// # let _ = validator;
/// ```
pub struct Validator<'a> {
    call: Box<ValidatorFn<'a>>,
}

impl<'a> Validator<'a> {
    /// Create a synchronous validator.
    pub fn new<F, O>(validator: F) -> Self
    where
        F: Fn(&Options) -> Result<O, ValidationError> + 'a,
        O: Into<Outcome>,
    {
        Self {
            call: Box::new(move |options: Options| {
                future::ready(validator(&options).map(Into::into)).boxed_local()
            }),
        }
    }

    /// Create an asynchronous validator.
    pub fn future<F, Fut>(validator: F) -> Self
    where
        F: Fn(Options) -> Fut + 'a,
        Fut: Future<Output = Result<Outcome, ValidationError>> + 'a,
    {
        Self {
            call: Box::new(move |options: Options| validator(options).boxed_local()),
        }
    }

    pub(crate) async fn invoke(&self, options: &Options) -> Result<Outcome, ValidationError> {
        (self.call)(options.clone()).await
    }
}

/// A value which is either given up front, or produced (possibly asynchronously) each time it is needed.
///
/// Used for flag defaults, as well as the description & footer of the usage message.
///
/// ### Example
/// ```
/// # use argspec_builder as argspec;
/// use argspec::Source;
///
/// let literal: Source<String> = "My program.".into();
/// let computed: Source<String> = Source::with(|| format!("Version {}.", 3));
/// let deferred: Source<String> = Source::future(|| async { "Loaded later.".to_string() });
/// # let _ = (literal, computed, deferred);
/// ```
pub enum Source<'a, T> {
    /// A literal value.
    Value(T),
    /// A producer, invoked on every resolution.
    Producer(Box<ProducerFn<'a, T>>),
}

impl<'a, T: Clone + 'a> Source<'a, T> {
    /// A literal value.
    pub fn value(value: T) -> Self {
        Source::Value(value)
    }

    /// A synchronous producer.
    pub fn with<F>(producer: F) -> Self
    where
        F: Fn() -> T + 'a,
    {
        Source::Producer(Box::new(move || future::ready(producer()).boxed_local()))
    }

    /// An asynchronous producer.
    pub fn future<F, Fut>(producer: F) -> Self
    where
        F: Fn() -> Fut + 'a,
        Fut: Future<Output = T> + 'a,
    {
        Source::Producer(Box::new(move || producer().boxed_local()))
    }

    pub(crate) async fn resolve(&self) -> T {
        match self {
            Source::Value(value) => value.clone(),
            Source::Producer(producer) => producer().await,
        }
    }
}

impl<'a, T> From<T> for Source<'a, T> {
    fn from(value: T) -> Self {
        Source::Value(value)
    }
}

impl<'a> From<&str> for Source<'a, String> {
    fn from(value: &str) -> Self {
        Source::Value(value.to_string())
    }
}
