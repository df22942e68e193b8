//! The parsing engine and its result type.
//!
//! Parsing runs in three passes over the tokens:
//! 1. options are extracted (unknown option-like tokens are left in place)
//! 2. the remaining plain tokens fill parameters in declaration order
//! 3. whatever is still left is reported as an error and kept as leftover

use std::collections::VecDeque;

use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::error::ArgError;
use crate::spec::{Parameter, Spec};
use crate::token::{classify, is_option_like};

/// Value recorded for a parameter or option.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(untagged)]
pub enum Value {
    Single(String),
    Multi(Vec<String>),
}

impl Value {
    /// The value itself, or the last one of a list.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Single(s) => Some(s.as_str()),
            Self::Multi(list) => list.last().map(|s| s.as_str()),
        }
    }

    /// All values in encounter order.
    pub fn as_slice(&self) -> &[String] {
        match self {
            Self::Single(s) => std::slice::from_ref(s),
            Self::Multi(list) => list.as_slice(),
        }
    }
}

/// Outcome of one [`Spec::parse`] call.
///
/// Values are keyed by parameter name or option full name, in the order they
/// were first recorded. Serializes to a flat map of those values plus
/// `*errors` and `*leftover` entries when either is non-empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Matches {
    values: IndexMap<String, Value>,
    errors: Vec<ArgError>,
    leftover: Vec<String>,
}

impl Matches {
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Single value for `name` (the last one for list values).
    pub fn value(&self, name: &str) -> Option<&str> {
        self.values.get(name).and_then(Value::as_str)
    }

    /// Every value for `name` in encounter order.
    pub fn values(&self, name: &str) -> Option<&[String]> {
        self.values.get(name).map(Value::as_slice)
    }

    /// Whether the switch `name` was given.
    pub fn is_on(&self, name: &str) -> bool {
        self.value(name) == Some("on")
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn errors(&self) -> &[ArgError] {
        &self.errors
    }

    pub fn error_messages(&self) -> Vec<String> {
        self.errors.iter().map(|e| e.to_string()).collect()
    }

    /// Tokens that were neither a known option nor used as a parameter.
    pub fn leftover(&self) -> &[String] {
        &self.leftover
    }

    /// No errors were recorded.
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

impl Matches {
    fn set_value(&mut self, name: &str, value: &str, multi: bool) {
        if !multi {
            self.values
                .insert(name.to_string(), Value::Single(value.to_string()));
            return;
        }
        match self.values.get_mut(name) {
            Some(Value::Multi(list)) => list.push(value.to_string()),
            _ => {
                self.values
                    .insert(name.to_string(), Value::Multi(vec![value.to_string()]));
            }
        }
    }

    fn push_error(&mut self, error: ArgError) {
        tracing::trace!(%error, "argument error");
        self.errors.push(error);
    }
}

impl Serialize for Matches {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let extra = usize::from(!self.errors.is_empty()) + usize::from(!self.leftover.is_empty());
        let mut map = serializer.serialize_map(Some(self.values.len() + extra))?;
        for (name, value) in &self.values {
            map.serialize_entry(name, value)?;
        }
        if !self.errors.is_empty() {
            map.serialize_entry("*errors", &self.error_messages())?;
        }
        if !self.leftover.is_empty() {
            map.serialize_entry("*leftover", &self.leftover)?;
        }
        map.end()
    }
}

impl Spec {
    /// Parse argv tokens (without the program name) against this spec.
    ///
    /// Never fails; problems with the input end up in [`Matches::errors`].
    pub fn parse<S: AsRef<str>>(&self, argv: &[S]) -> Matches {
        let tokens: Vec<&str> = argv.iter().map(|s| s.as_ref()).collect();
        let mut m = Matches::default();

        let remaining = self.parse_options(&tokens, &mut m);
        tracing::debug!(
            tokens = tokens.len(),
            remaining = remaining.len(),
            "option pass done"
        );

        let leftover = self.parse_parameters(remaining, &mut m);
        tracing::debug!(leftover = leftover.len(), "parameter pass done");

        for arg in leftover {
            if is_option_like(arg) {
                m.push_error(ArgError::UnrecognizedOption(arg.to_string()));
            } else {
                m.push_error(ArgError::UnexpectedParameter(arg.to_string()));
            }
            m.leftover.push(arg.to_string());
        }

        tracing::debug!(
            values = m.values.len(),
            errors = m.errors.len(),
            "parse finished"
        );
        m
    }

    fn parse_options<'a>(&self, tokens: &[&'a str], m: &mut Matches) -> Vec<&'a str> {
        let mut remaining = Vec::new();
        let mut i = 0usize;

        while i < tokens.len() {
            let arg = tokens[i];
            i += 1;

            let Some(token) = classify(arg) else {
                remaining.push(arg);
                continue;
            };
            let Some(option) = self.find_option(token.name) else {
                tracing::trace!(token = arg, "no matching option");
                remaining.push(arg);
                continue;
            };
            tracing::trace!(token = arg, option = option.full_name(), "matched option");

            if !option.requires_value() {
                m.set_value(option.full_name(), "on", false);
                continue;
            }

            // --name=value
            if token.using_equals {
                match token.value {
                    Some(value) if !value.is_empty() => {
                        m.set_value(option.full_name(), value, option.multi());
                    }
                    _ => m.push_error(ArgError::MissingValue(token.name.to_string())),
                }
                continue;
            }

            // The next token is taken as the value even when it looks like an
            // option; that case is still reported as a missing value.
            let next = tokens.get(i).copied();
            if next.is_none_or(is_option_like) {
                m.push_error(ArgError::MissingValue(token.name.to_string()));
            }
            if let Some(value) = next {
                m.set_value(option.full_name(), value, option.multi());
                i += 1;
            }
        }

        remaining
    }

    fn parse_parameters<'a>(&self, tokens: Vec<&'a str>, m: &mut Matches) -> Vec<&'a str> {
        let mut leftover = Vec::new();
        let mut unfilled: VecDeque<&Parameter> = self.parameters().iter().collect();
        let mut last: Option<&Parameter> = None;

        for arg in tokens {
            if is_option_like(arg) {
                leftover.push(arg);
            } else if let Some(param) = unfilled.pop_front() {
                m.set_value(param.name(), arg, param.multi());
                last = Some(param);
            } else if let Some(param) = last.filter(|p| p.multi()) {
                m.set_value(param.name(), arg, true);
            } else {
                leftover.push(arg);
            }
        }

        for param in unfilled {
            if param.required() {
                m.push_error(ArgError::MissingParameter(param.name().to_string()));
            }
        }

        leftover
    }
}
