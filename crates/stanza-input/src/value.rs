//! Option values before and after coercion.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A value bound to a flag name before coercion.
///
/// The tokenizer does not know option types, so it records only what the
/// command line literally said.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawValue {
    /// The flag appeared with no attached value.
    Present,
    /// The flag was given in its `--no-<name>` form.
    Negated,
    /// The flag, or an environment variable, carried text.
    Text(String),
}

impl From<String> for RawValue {
    fn from(s: String) -> Self {
        RawValue::Text(s)
    }
}

impl From<&str> for RawValue {
    fn from(s: &str) -> Self {
        RawValue::Text(s.to_string())
    }
}

/// A coerced option value as handlers receive it.
///
/// Serializes untagged, so a bag renders as plain JSON (`{"verbose": true}`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    Bool(bool),
    Str(String),
}

impl OptionValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            OptionValue::Str(s) => Some(s),
            OptionValue::Bool(_) => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            OptionValue::Bool(b) => Some(*b),
            OptionValue::Str(_) => None,
        }
    }

    /// `true` for `Bool(true)` and non-empty strings.
    pub fn is_truthy(&self) -> bool {
        match self {
            OptionValue::Bool(b) => *b,
            OptionValue::Str(s) => !s.is_empty(),
        }
    }
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionValue::Bool(b) => write!(f, "{}", b),
            OptionValue::Str(s) => f.write_str(s),
        }
    }
}

impl From<bool> for OptionValue {
    fn from(b: bool) -> Self {
        OptionValue::Bool(b)
    }
}

impl From<&str> for OptionValue {
    fn from(s: &str) -> Self {
        OptionValue::Str(s.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(s: String) -> Self {
        OptionValue::Str(s)
    }
}

/// Coerced options keyed by camelCase name, in catalog order.
///
/// Options that resolved to nothing are absent rather than stored as an
/// empty marker.
///
/// ```
/// use stanza_input::{OptionBag, OptionValue};
///
/// let mut bag = OptionBag::new();
/// bag.insert("name", "Ada");
/// bag.insert("verbose", true);
///
/// assert_eq!(bag.get_str("name"), Some("Ada"));
/// assert!(bag.flag("verbose"));
/// assert!(!bag.flag("quiet"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OptionBag(IndexMap<String, OptionValue>);

impl OptionBag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a value, replacing any previous one in place.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<OptionValue>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&OptionValue> {
        self.0.get(name)
    }

    /// Returns the string value of an option, if it resolved to one.
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(OptionValue::as_str)
    }

    /// Returns the boolean value of an option, `false` when absent.
    pub fn flag(&self, name: &str) -> bool {
        self.get(name).and_then(OptionValue::as_bool).unwrap_or(false)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<OptionValue> {
        self.0.shift_remove(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &OptionValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Returns a copy without the named entries, preserving order.
    pub fn without(&self, names: &[&str]) -> Self {
        self.0
            .iter()
            .filter(|(k, _)| !names.contains(&k.as_str()))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }
}

impl FromIterator<(String, OptionValue)> for OptionBag {
    fn from_iter<I: IntoIterator<Item = (String, OptionValue)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn option_value_truthiness() {
        assert!(OptionValue::Bool(true).is_truthy());
        assert!(!OptionValue::Bool(false).is_truthy());
        assert!(OptionValue::from("x").is_truthy());
        assert!(!OptionValue::from("").is_truthy());
    }

    #[test]
    fn option_value_display() {
        assert_eq!(OptionValue::Bool(true).to_string(), "true");
        assert_eq!(OptionValue::from("buff").to_string(), "buff");
    }

    #[test]
    fn bag_serializes_as_plain_object() {
        let mut bag = OptionBag::new();
        bag.insert("foo", "bar");
        bag.insert("verbose", false);
        assert_eq!(
            serde_json::to_value(&bag).unwrap(),
            json!({"foo": "bar", "verbose": false})
        );
    }

    #[test]
    fn bag_without_preserves_order() {
        let mut bag = OptionBag::new();
        bag.insert("a", "1");
        bag.insert("help", false);
        bag.insert("b", true);

        let trimmed = bag.without(&["help"]);
        assert_eq!(trimmed.names().collect::<Vec<_>>(), vec!["a", "b"]);
        assert!(bag.contains("help"));
    }

    #[test]
    fn bag_accessors_respect_types() {
        let mut bag = OptionBag::new();
        bag.insert("name", "Ada");
        bag.insert("force", true);

        assert_eq!(bag.get_str("force"), None);
        assert!(!bag.flag("name"));
        assert!(bag.flag("force"));
        assert_eq!(bag.remove("force"), Some(OptionValue::Bool(true)));
        assert_eq!(bag.len(), 1);
    }
}
