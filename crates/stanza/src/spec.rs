//! The app description.
//!
//! An [`AppSpec`] is plain data. It can be built with the fluent
//! constructors or deserialized from any serde source using camelCase keys:
//!
//! ```rust
//! use stanza::{AppSpec, OptionSpec, OptionType};
//!
//! let from_json: AppSpec = serde_json::from_value(serde_json::json!({
//!     "environmentPrefix": "MY_CLI",
//!     "options": [
//!         { "name": "verbose", "type": "boolean", "description": "Talk more" },
//!         { "name": "token", "environmentName": "API_TOKEN" }
//!     ]
//! })).unwrap();
//!
//! let built = AppSpec::new()
//!     .environment_prefix("MY_CLI")
//!     .option(OptionSpec::boolean("verbose").describe("Talk more"))
//!     .option(OptionSpec::string("token").env("API_TOKEN"));
//!
//! assert_eq!(from_json, built);
//! assert_eq!(from_json.options[1].kind, OptionType::String);
//! ```

use std::fmt;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use stanza_input::{camel_case, kebab_case, OptionValue};

/// The declared type of an option. Omitted types are `string`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionType {
    #[default]
    String,
    Boolean,
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OptionType::String => "string",
            OptionType::Boolean => "boolean",
        })
    }
}

/// One option of an app or command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionSpec {
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: OptionType,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub required: bool,
    /// Numbers are accepted and kept as their decimal text.
    #[serde(
        default,
        deserialize_with = "deserialize_default",
        skip_serializing_if = "Option::is_none"
    )]
    pub default: Option<OptionValue>,
    /// Exact environment variable bound to this option.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment_name: Option<String>,
    /// Short alias shown as `-alias` in usage.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    /// Built-in options (`help`, `version`) never reach handlers.
    #[serde(skip)]
    pub system: bool,
}

fn deserialize_default<'de, D>(deserializer: D) -> Result<Option<OptionValue>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Bool(b)) => Ok(Some(OptionValue::Bool(b))),
        Some(Value::String(s)) => Ok(Some(OptionValue::Str(s))),
        Some(Value::Number(n)) => Ok(Some(OptionValue::Str(n.to_string()))),
        Some(other) => Err(D::Error::custom(format!(
            "option default must be a boolean, string or number, got {}",
            other
        ))),
    }
}

impl OptionSpec {
    pub fn new(name: impl Into<String>, kind: OptionType) -> Self {
        Self {
            name: name.into(),
            kind,
            description: String::new(),
            required: false,
            default: None,
            environment_name: None,
            alias: None,
            system: false,
        }
    }

    pub fn string(name: impl Into<String>) -> Self {
        Self::new(name, OptionType::String)
    }

    pub fn boolean(name: impl Into<String>) -> Self {
        Self::new(name, OptionType::Boolean)
    }

    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn default_value(mut self, value: impl Into<OptionValue>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn env(mut self, var_name: impl Into<String>) -> Self {
        self.environment_name = Some(var_name.into());
        self
    }

    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    pub(crate) fn system(mut self) -> Self {
        self.system = true;
        self
    }

    /// The key this option is matched and stored under (`first-name` → `firstName`).
    pub fn key(&self) -> String {
        camel_case(&self.name)
    }

    /// The key a typed alias is recorded under (`-n` → `n`).
    pub fn alias_key(&self) -> Option<String> {
        self.alias.as_deref().map(camel_case)
    }

    /// Whether a tokenized flag name refers to this option, by key or alias.
    pub fn answers_to(&self, name: &str) -> bool {
        self.key() == name || self.alias_key().as_deref() == Some(name)
    }

    /// The flag as typed on the command line (`firstName` → `--first-name`).
    pub fn flag(&self) -> String {
        format!("--{}", kebab_case(&self.name))
    }

    /// The default, if it counts as set.
    ///
    /// `false` and the empty string behave as if no default was declared.
    pub fn truthy_default(&self) -> Option<&OptionValue> {
        self.default.as_ref().filter(|value| value.is_truthy())
    }
}

/// A command, either at the top level or inside a group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandSpec {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<OptionSpec>,
}

impl CommandSpec {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            options: Vec::new(),
        }
    }

    pub fn option(mut self, option: OptionSpec) -> Self {
        self.options.push(option);
        self
    }
}

/// A labeled set of commands addressed as `<group> <command>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupSpec {
    pub name: String,
    #[serde(alias = "description")]
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_command: Option<String>,
    #[serde(default)]
    pub commands: Vec<CommandSpec>,
}

impl GroupSpec {
    pub fn new(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            default_command: None,
            commands: Vec::new(),
        }
    }

    pub fn default_command(mut self, command: impl Into<String>) -> Self {
        self.default_command = Some(command.into());
        self
    }

    pub fn command(mut self, command: CommandSpec) -> Self {
        self.commands.push(command);
        self
    }

    pub fn find_command(&self, name: &str) -> Option<&CommandSpec> {
        self.commands.iter().find(|c| c.name == name)
    }

    pub fn is_default(&self, command: &str) -> bool {
        self.default_command.as_deref() == Some(command)
    }
}

/// How positional arguments are laid out, derived from the description.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// No commands: the app itself is the command.
    Single,
    /// `<command>`
    Commands,
    /// `<group> <command>`
    Groups,
}

/// One expected positional argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Group,
    Command,
}

impl Slot {
    pub fn name(&self) -> &'static str {
        match self {
            Slot::Group => "group",
            Slot::Command => "command",
        }
    }
}

impl Shape {
    pub fn slots(&self) -> Vec<Slot> {
        match self {
            Shape::Single => vec![],
            Shape::Commands => vec![Slot::Command],
            Shape::Groups => vec![Slot::Group, Slot::Command],
        }
    }
}

/// The whole app description.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Enables `--version` when set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment_prefix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_group: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_command: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<OptionSpec>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub commands: Vec<CommandSpec>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub groups: Vec<GroupSpec>,
}

impl AppSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn environment_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.environment_prefix = Some(prefix.into());
        self
    }

    pub fn default_group(mut self, group: impl Into<String>) -> Self {
        self.default_group = Some(group.into());
        self
    }

    pub fn default_command(mut self, command: impl Into<String>) -> Self {
        self.default_command = Some(command.into());
        self
    }

    pub fn option(mut self, option: OptionSpec) -> Self {
        self.options.push(option);
        self
    }

    pub fn command(mut self, command: CommandSpec) -> Self {
        self.commands.push(command);
        self
    }

    pub fn group(mut self, group: GroupSpec) -> Self {
        self.groups.push(group);
        self
    }

    /// Groups take precedence; the builder rejects declaring both.
    pub fn shape(&self) -> Shape {
        if !self.groups.is_empty() {
            Shape::Groups
        } else if !self.commands.is_empty() {
            Shape::Commands
        } else {
            Shape::Single
        }
    }

    pub fn find_group(&self, name: &str) -> Option<&GroupSpec> {
        self.groups.iter().find(|g| g.name == name)
    }

    pub fn find_command(&self, name: &str) -> Option<&CommandSpec> {
        self.commands.iter().find(|c| c.name == name)
    }

    pub fn is_default_command(&self, command: &str) -> bool {
        self.default_command.as_deref() == Some(command)
    }
}
