//! Argument tokenizing and environment binding for declarative CLIs.
//!
//! `stanza-input` turns the raw material of a process invocation into named
//! values: the argument vector becomes positional tokens plus a flag map, and
//! the environment becomes a second flag map through prefix and explicit-name
//! conventions.
//!
//! # Quick Start
//!
//! ```
//! use stanza_input::{tokenize, EnvironmentBinder, MockEnv, RawValue};
//!
//! let parsed = tokenize(["users", "show", "--first-name", "Ada", "--no-color"]);
//! assert_eq!(parsed.commands, vec!["users", "show"]);
//! assert_eq!(parsed.options["firstName"], RawValue::Text("Ada".into()));
//! assert_eq!(parsed.options["color"], RawValue::Negated);
//!
//! let env = MockEnv::new().with_var("MY_CLI_TOKEN", "secret");
//! let bound = EnvironmentBinder::new().prefix("MY_CLI").bind(&env);
//! assert_eq!(bound["token"], "secret");
//! ```
//!
//! # Architecture
//!
//! ```text
//! argv ──► tokenize ──► ParsedArgs { commands, options: name → RawValue }
//! env  ──► EnvironmentBinder ──► name → String
//! ```
//!
//! Coercion of [`RawValue`]s into typed [`OptionValue`]s happens later, once
//! the option catalog for the invocation is known.
//!
//! # Testing
//!
//! The environment is read through [`EnvReader`], so tests can inject a
//! [`MockEnv`] instead of touching process state.

mod case;
pub mod env;
mod environment;
mod tokens;
mod value;

pub use case::{camel_case, kebab_case};
pub use env::{EnvReader, MockEnv, RealEnv};
pub use environment::EnvironmentBinder;
pub use tokens::{is_flag, tokenize, ParsedArgs, NEGATION_PREFIX};
pub use value::{OptionBag, OptionValue, RawValue};
