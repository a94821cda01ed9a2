//! Environment abstractions for testability.
//!
//! The binder reads the process environment through [`EnvReader`], so tests
//! can supply a [`MockEnv`] instead of mutating global process state.

use std::collections::BTreeMap;

/// Abstraction over environment variables.
pub trait EnvReader: Send + Sync {
    /// Get an environment variable value.
    fn var(&self, name: &str) -> Option<String>;

    /// List every variable with a unicode name and value.
    fn vars(&self) -> Vec<(String, String)>;
}

// === Real implementations ===

/// Real environment variable reader.
#[derive(Debug, Default, Clone, Copy)]
pub struct RealEnv;

impl EnvReader for RealEnv {
    fn var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }

    fn vars(&self) -> Vec<(String, String)> {
        std::env::vars_os()
            .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
            .collect()
    }
}

// === Mock implementations for testing ===

/// Mock environment variable reader for testing.
///
/// Variables are listed in name order.
#[derive(Debug, Clone, Default)]
pub struct MockEnv {
    vars: BTreeMap<String, String>,
}

impl MockEnv {
    /// Create an empty mock environment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an environment variable.
    pub fn with_var(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }
}

impl EnvReader for MockEnv {
    fn var(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }

    fn vars(&self) -> Vec<(String, String)> {
        self.vars
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn mock_env_empty() {
        let env = MockEnv::new();
        assert_eq!(env.var("MISSING"), None);
        assert!(env.vars().is_empty());
    }

    #[test]
    fn mock_env_with_vars() {
        let env = MockEnv::new()
            .with_var("MY_CLI_NAME", "ada")
            .with_var("HOME", "/home/user");

        assert_eq!(env.var("MY_CLI_NAME"), Some("ada".to_string()));
        assert_eq!(env.var("HOME"), Some("/home/user".to_string()));
        assert_eq!(env.var("MISSING"), None);
    }

    #[test]
    fn mock_env_lists_in_name_order() {
        let env = MockEnv::new().with_var("B", "2").with_var("A", "1");
        assert_eq!(
            env.vars(),
            vec![("A".to_string(), "1".to_string()), ("B".to_string(), "2".to_string())]
        );
    }

    #[test]
    #[serial]
    fn real_env_reads_process_environment() {
        std::env::set_var("STANZA_INPUT_TEST_VAR", "present");

        let env = RealEnv;
        assert_eq!(env.var("STANZA_INPUT_TEST_VAR"), Some("present".to_string()));
        assert!(env
            .vars()
            .iter()
            .any(|(k, v)| k == "STANZA_INPUT_TEST_VAR" && v == "present"));

        std::env::remove_var("STANZA_INPUT_TEST_VAR");
        assert_eq!(env.var("STANZA_INPUT_TEST_VAR"), None);
    }
}
