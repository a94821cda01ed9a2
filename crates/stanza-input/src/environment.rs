//! Environment binding.
//!
//! Two conventions map environment variables onto option names:
//!
//! - **Prefix**: with prefix `MY_CLI`, every `MY_CLI_<SUFFIX>` variable binds
//!   `camelCase(SUFFIX)`.
//! - **Explicit name**: an option may name one variable outright. Explicit
//!   names are applied after the prefix pass and win over it.
//!
//! Command-line values are layered on top of the result by the caller.

use indexmap::IndexMap;

use crate::case::camel_case;
use crate::env::EnvReader;

/// Collects option values from the environment.
///
/// # Example
///
/// ```
/// use stanza_input::{EnvironmentBinder, MockEnv};
///
/// let env = MockEnv::new()
///     .with_var("MY_CLI_FIRST_NAME", "from-prefix")
///     .with_var("EXPLICIT_FIRST_NAME", "from-name");
///
/// let bound = EnvironmentBinder::new()
///     .prefix("MY_CLI")
///     .named("firstName", "EXPLICIT_FIRST_NAME")
///     .bind(&env);
///
/// assert_eq!(bound["firstName"], "from-name");
/// ```
#[derive(Debug, Clone, Default)]
pub struct EnvironmentBinder {
    prefix: Option<String>,
    named: Vec<(String, String)>,
}

impl EnvironmentBinder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the variable prefix. The `_` separator is added automatically.
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Binds `option` to the exact variable `var_name`.
    pub fn named(mut self, option: impl Into<String>, var_name: impl Into<String>) -> Self {
        self.named.push((option.into(), var_name.into()));
        self
    }

    /// Reads the environment and returns option name to value.
    ///
    /// Explicitly named variables are only used when set and non-empty.
    pub fn bind(&self, env: &dyn EnvReader) -> IndexMap<String, String> {
        let mut bound = IndexMap::new();

        if let Some(prefix) = &self.prefix {
            let full_prefix = format!("{}_", prefix);
            for (key, value) in env.vars() {
                if let Some(suffix) = key.strip_prefix(&full_prefix) {
                    bound.insert(camel_case(suffix), value);
                }
            }
        }

        for (option, var_name) in &self.named {
            match env.var(var_name) {
                Some(value) if !value.is_empty() => {
                    bound.insert(option.clone(), value);
                }
                _ => {}
            }
        }

        tracing::debug!(names = ?bound.keys().collect::<Vec<_>>(), "bound environment");
        bound
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::MockEnv;

    #[test]
    fn no_conventions_binds_nothing() {
        let env = MockEnv::new().with_var("MY_CLI_NAME", "ada");
        assert!(EnvironmentBinder::new().bind(&env).is_empty());
    }

    #[test]
    fn prefix_binds_camel_cased_suffix() {
        let env = MockEnv::new()
            .with_var("MY_CLI_FIRST_NAME", "Ada")
            .with_var("MY_CLI_TOKEN", "secret")
            .with_var("OTHER_TOKEN", "ignored");

        let bound = EnvironmentBinder::new().prefix("MY_CLI").bind(&env);
        assert_eq!(bound.len(), 2);
        assert_eq!(bound["firstName"], "Ada");
        assert_eq!(bound["token"], "secret");
    }

    #[test]
    fn prefix_requires_separator() {
        let env = MockEnv::new().with_var("MY_CLIENT", "x");
        let bound = EnvironmentBinder::new().prefix("MY_CLI").bind(&env);
        assert!(bound.is_empty());
    }

    #[test]
    fn explicit_name_binds_without_prefix() {
        let env = MockEnv::new().with_var("EXPLICIT_NAME", "Ada");
        let bound = EnvironmentBinder::new()
            .named("name", "EXPLICIT_NAME")
            .bind(&env);
        assert_eq!(bound["name"], "Ada");
    }

    #[test]
    fn explicit_name_wins_over_prefix() {
        let env = MockEnv::new()
            .with_var("MY_CLI_NAME", "prefix")
            .with_var("EXPLICIT_NAME", "explicit");
        let bound = EnvironmentBinder::new()
            .prefix("MY_CLI")
            .named("name", "EXPLICIT_NAME")
            .bind(&env);
        assert_eq!(bound["name"], "explicit");
    }

    #[test]
    fn empty_explicit_value_is_skipped() {
        let env = MockEnv::new()
            .with_var("MY_CLI_NAME", "prefix")
            .with_var("EXPLICIT_NAME", "");
        let bound = EnvironmentBinder::new()
            .prefix("MY_CLI")
            .named("name", "EXPLICIT_NAME")
            .bind(&env);
        assert_eq!(bound["name"], "prefix");
    }
}
