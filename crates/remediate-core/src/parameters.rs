//! String-keyed, string-valued remediation parameters.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::InputError;

/// Parameter mapping supplied with a remediation request.
///
/// Values are always strings; flags such as `ApplyImmediately` are
/// string-encoded booleans and must be coerced with [`Parameters::bool`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Parameters(BTreeMap<String, String>);

impl Parameters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(name.into(), value.into())
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Get a parameter that must be present.
    pub fn require(&self, name: &str) -> Result<&str, InputError> {
        self.get(name)
            .ok_or_else(|| InputError::MissingParameter(name.to_string()))
    }

    /// Get a required parameter coerced to a boolean.
    pub fn bool(&self, name: &str) -> Result<bool, InputError> {
        parse_bool(name, self.require(name)?)
    }

    /// Fill every key missing from `self` with the value from `defaults`.
    pub fn with_defaults(&self, defaults: &Parameters) -> Parameters {
        let mut merged = defaults.0.clone();
        merged.extend(self.0.iter().map(|(k, v)| (k.clone(), v.clone())));
        Parameters(merged)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Parameters {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Parameters(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Coerce a string-encoded boolean.
///
/// Only `true` and `false` are accepted, compared ASCII case-insensitively.
/// No trimming, no numeric or yes/no forms.
pub fn parse_bool(name: &str, value: &str) -> Result<bool, InputError> {
    if value.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if value.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        Err(InputError::InvalidBoolean {
            name: name.to_string(),
            value: value.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_true_and_false() {
        assert!(parse_bool("ApplyImmediately", "true").unwrap());
        assert!(!parse_bool("ApplyImmediately", "false").unwrap());
        assert!(parse_bool("ApplyImmediately", "TRUE").unwrap());
        assert!(!parse_bool("ApplyImmediately", "False").unwrap());
    }

    #[test]
    fn rejects_truthy_values() {
        for value in ["1", "0", "yes", "no", "", " true", "true ", "t"] {
            let err = parse_bool("ApplyImmediately", value).unwrap_err();
            match err {
                InputError::InvalidBoolean { name, value: got } => {
                    assert_eq!(name, "ApplyImmediately");
                    assert_eq!(got, value);
                }
                other => panic!("unexpected error: {:?}", other),
            }
        }
    }

    #[test]
    fn missing_parameter() {
        let params = Parameters::new();
        let err = params.bool("ApplyImmediately").unwrap_err();
        assert!(matches!(err, InputError::MissingParameter(ref n) if n == "ApplyImmediately"));
    }

    #[test]
    fn explicit_values_win_over_defaults() {
        let defaults = Parameters::new()
            .with("ApplyImmediately", "true")
            .with("Other", "x");
        let given = Parameters::new().with("ApplyImmediately", "false");

        let merged = given.with_defaults(&defaults);
        assert_eq!(merged.get("ApplyImmediately"), Some("false"));
        assert_eq!(merged.get("Other"), Some("x"));
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn deserializes_from_flat_object() {
        let params: Parameters =
            serde_json::from_str(r#"{"ApplyImmediately": "true"}"#).unwrap();
        assert_eq!(params.iter().collect::<Vec<_>>(), vec![("ApplyImmediately", "true")]);

        // Values are string-encoded; native JSON booleans are rejected.
        assert!(serde_json::from_str::<Parameters>(r#"{"ApplyImmediately": true}"#).is_err());
    }
}
