use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::api::TriggerError;
use crate::constant::EXTRA_NAME;
use crate::merge::merge;

/// The result of a [`Trigger`](./struct.Trigger.html) or [`Validator`](./struct.Validator.html).
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Outcome {
    /// Accept the accumulator as-is.
    #[default]
    NoChange,
    /// Merge the partial object into the accumulator.
    Override(Map<String, Value>),
}

impl Outcome {
    /// An override which sets a single key.
    ///
    /// ### Example
    /// ```
    /// # use argspec_builder as argspec;
    /// use argspec::Outcome;
    /// use serde_json::json;
    ///
    /// let outcome = Outcome::set("name", "Alice");
    /// assert_eq!(outcome, Outcome::from_value(json!({"name": "Alice"})).unwrap());
    /// ```
    pub fn set(key: impl Into<String>, value: impl Into<Value>) -> Self {
        let mut partial = Map::new();
        partial.insert(key.into(), value.into());
        Outcome::Override(partial)
    }

    /// Interpret a json value as an outcome.
    /// Objects become an `Override`, while `null` is `NoChange`.
    /// Any other value cannot be merged into the accumulator, and is rejected.
    pub fn from_value(value: Value) -> Result<Self, TriggerError> {
        match value {
            Value::Object(partial) => Ok(Outcome::Override(partial)),
            Value::Null => Ok(Outcome::NoChange),
            other => Err(TriggerError::new(format!(
                "expected an object to merge, found '{other}'"
            ))),
        }
    }
}

impl From<Map<String, Value>> for Outcome {
    fn from(partial: Map<String, Value>) -> Self {
        Outcome::Override(partial)
    }
}

impl From<Option<Map<String, Value>>> for Outcome {
    fn from(partial: Option<Map<String, Value>>) -> Self {
        match partial {
            Some(partial) => Outcome::Override(partial),
            None => Outcome::NoChange,
        }
    }
}

impl From<()> for Outcome {
    fn from(_: ()) -> Self {
        Outcome::NoChange
    }
}

/// The parsed options, as accumulated over defaults, triggers, and validation.
///
/// When the specification allows extra tokens, these are collected under the field `"extra"`.
/// This field merges like any other, so defaults, triggers and the validator may also contribute to it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Options {
    values: Map<String, Value>,
    allow_extra: bool,
}

impl Options {
    pub(crate) fn new(allow_extra: bool) -> Self {
        let mut values = Map::new();

        if allow_extra {
            values.insert(EXTRA_NAME.to_string(), Value::Array(Vec::new()));
        }

        Self {
            values,
            allow_extra,
        }
    }

    /// Get the value of field `key`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Get the value of field `key`, when it is a string.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.values.get(key).and_then(Value::as_str)
    }

    /// Whether field `key` has been set.
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// All the fields.
    pub fn values(&self) -> &Map<String, Value> {
        &self.values
    }

    /// The `"extra"` field: the tokens which matched neither a flag nor a positional, merged with anything else contributed under that name.
    /// `None` unless the specification allows extra tokens (or when the field was overwritten by a non-array).
    pub fn extra(&self) -> Option<&[Value]> {
        if !self.allow_extra {
            return None;
        }

        self.values
            .get(EXTRA_NAME)
            .and_then(Value::as_array)
            .map(Vec::as_slice)
    }

    /// Convert into a single json object.
    pub fn into_value(self) -> Value {
        Value::Object(self.values)
    }

    /// Deserialize into the type `T`, via [`Options::into_value`].
    ///
    /// ### Example
    /// ```
    /// # use argspec_builder as argspec;
    /// use argspec::{FlagSpec, Outcome, Specification, Trigger};
    /// use serde::Deserialize;
    ///
    /// #[derive(Deserialize)]
    /// struct Greet {
    ///     name: String,
    ///     loud: Option<bool>,
    /// }
    ///
    /// let reader = Specification::new()
    ///     .command("greet")
    ///     .flag(
    ///         'n',
    ///         FlagSpec::new(
    ///             "The name to greet.",
    ///             Trigger::new(["name"], |args| Ok(Outcome::set("name", args[0].as_str()))),
    ///         ),
    ///     )
    ///     .build();
    ///
    /// let greet: Greet = reader
    ///     .read_blocking(&["-n", "Alice"])
    ///     .unwrap()
    ///     .deserialize()
    ///     .unwrap();
    /// assert_eq!(greet.name, "Alice");
    /// assert_eq!(greet.loud, None);
    /// ```
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_value(self.clone().into_value())
    }

    pub(crate) fn apply(&mut self, outcome: Outcome) {
        if let Outcome::Override(partial) = outcome {
            merge(&mut self.values, partial);
        }
    }

    pub(crate) fn assign(&mut self, key: impl Into<String>, token: impl Into<String>) {
        self.values.insert(key.into(), Value::String(token.into()));
    }

    /// Append `token` to the `"extra"` field.
    /// Returns `false` (and does not collect the token) when extra tokens are not allowed.
    pub(crate) fn push_extra(&mut self, token: impl Into<String>) -> bool {
        if !self.allow_extra {
            return false;
        }

        let slot = self
            .values
            .entry(EXTRA_NAME.to_string())
            .or_insert_with(|| Value::Array(Vec::new()));

        // A non-array counts as empty, as when merging.
        if !slot.is_array() {
            *slot = Value::Array(Vec::new());
        }

        if let Value::Array(extra) = slot {
            extra.push(Value::String(token.into()));
        }

        true
    }
}
