//! Extra-parameter strings
//!
//! Grammar: `key:value[,key:value]*`. Keys and values are trimmed; every pair
//! must have exactly one `:` and two non-empty sides.

use std::collections::HashMap;

use serde::Serialize;
use serde_json::Value;

use crate::errors::{TranslateError, TranslateResult};
use crate::sql::MethodInvocation;

const PAIR_SEPARATOR: char = ',';
const KEY_VALUE_SEPARATOR: char = ':';

/// A typed extra-parameter value
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ParamValue {
    Number(u64),
    Text(String),
}

impl ParamValue {
    /// Digit-only text becomes a number; anything else stays text
    fn coerce(raw: String) -> Self {
        if !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(n) = raw.parse::<u64>() {
                return ParamValue::Number(n);
            }
        }
        ParamValue::Text(raw)
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self {
            ParamValue::Number(n) => Some(*n),
            ParamValue::Text(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::Text(s) => Some(s),
            ParamValue::Number(_) => None,
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            ParamValue::Number(n) => Value::from(*n),
            ParamValue::Text(s) => Value::from(s.as_str()),
        }
    }
}

fn split_pair(pair: &str) -> Option<(&str, &str)> {
    let mut parts = pair.split(KEY_VALUE_SEPARATOR);
    let key = parts.next()?.trim();
    let value = parts.next()?.trim();
    if parts.next().is_some() || key.is_empty() || value.is_empty() {
        return None;
    }
    Some((key, value))
}

/// Parses `raw` into a string map; blank input yields an empty map
pub fn parse(raw: &str) -> TranslateResult<HashMap<String, String>> {
    if raw.trim().is_empty() {
        return Ok(HashMap::new());
    }

    let mut params = HashMap::new();
    for pair in raw.split(PAIR_SEPARATOR) {
        let (key, value) = split_pair(pair)
            .ok_or_else(|| TranslateError::MalformedParameterString(pair.trim().to_string()))?;
        params.insert(key.to_string(), value.to_string());
    }
    Ok(params)
}

/// Parses `raw` and coerces digit-only values to numbers
pub fn parse_typed(raw: &str) -> TranslateResult<HashMap<String, ParamValue>> {
    Ok(parse(raw)?
        .into_iter()
        .map(|(key, value)| (key, ParamValue::coerce(value)))
        .collect())
}

/// Non-failing probe for the `key:value,...` grammar.
///
/// Blank input is not a parameter string.
pub fn looks_like_parameter_string(raw: &str) -> bool {
    !raw.trim().is_empty() && raw.split(PAIR_SEPARATOR).all(|pair| split_pair(pair).is_some())
}

/// A method whose invocation may carry an extra-parameter string
pub trait ParameterizedMethod {
    /// Returns the raw extra-parameter string of `invocation`, if it has one
    fn extra_param_string(&self, invocation: &MethodInvocation) -> TranslateResult<Option<String>>;

    fn parameter_map(&self, invocation: &MethodInvocation) -> TranslateResult<HashMap<String, String>> {
        match self.extra_param_string(invocation)? {
            Some(raw) => parse(&raw),
            None => Ok(HashMap::new()),
        }
    }

    fn typed_parameter_map(
        &self,
        invocation: &MethodInvocation,
    ) -> TranslateResult<HashMap<String, ParamValue>> {
        match self.extra_param_string(invocation)? {
            Some(raw) => parse_typed(&raw),
            None => Ok(HashMap::new()),
        }
    }
}
