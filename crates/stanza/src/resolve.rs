//! Input resolution.
//!
//! Turns tokenized arguments into the inputs a handler sees:
//!
//! 1. Missing positional slots are filled from the default command and
//!    default group.
//! 2. The catalog is rebuilt for the completed path.
//! 3. Environment values are bound and the command line is laid over them.
//! 4. Every catalog option is coerced to its declared type.

use indexmap::IndexMap;
use stanza_input::{EnvReader, EnvironmentBinder, OptionBag, OptionValue, ParsedArgs, RawValue};

use crate::catalog::ResolvedConfig;
use crate::spec::{AppSpec, OptionSpec, OptionType, Slot};

/// Text values that coerce to `false` for boolean options.
const FALSE_WORDS: &[&str] = &["", "false", "0", "no", "off"];

/// Positional path and coerced options after resolution.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedArgs {
    pub commands: Vec<String>,
    pub options: OptionBag,
}

/// The outcome of [`resolve`]: the config for the completed path and the
/// resolved inputs.
#[derive(Debug, Clone)]
pub struct Resolution<'a> {
    pub config: ResolvedConfig<'a>,
    pub args: ResolvedArgs,
}

/// Resolves tokenized arguments against an app description.
pub fn resolve<'a>(spec: &'a AppSpec, parsed: &ParsedArgs, env: &dyn EnvReader) -> Resolution<'a> {
    let slots = spec.shape().slots();
    let commands = complete_positional(spec, &slots, &parsed.commands);
    let config = ResolvedConfig::new(spec, &commands);

    let environment = bind_environment(&config, env);
    let merged = parsed.overlay(
        environment
            .into_iter()
            .map(|(name, value)| (name, RawValue::Text(value))),
    );
    let options = coerce(&config.options, &merged.options);

    tracing::debug!(?commands, options = ?options.names().collect::<Vec<_>>(), "resolved inputs");

    Resolution {
        config,
        args: ResolvedArgs { commands, options },
    }
}

/// Reads the environment values for the options of a catalog.
pub fn bind_environment(config: &ResolvedConfig<'_>, env: &dyn EnvReader) -> IndexMap<String, String> {
    let mut binder = EnvironmentBinder::new();
    if let Some(prefix) = &config.spec.environment_prefix {
        binder = binder.prefix(prefix.clone());
    }
    for option in &config.options {
        if let Some(var_name) = &option.environment_name {
            binder = binder.named(option.key(), var_name.clone());
        }
    }
    binder.bind(env)
}

/// Fills missing positional slots from configured defaults.
///
/// Paths that already have one token per slot are returned unchanged.
/// Otherwise each slot takes the typed token, or the top-level default
/// command for the command slot, or the default command of the group named
/// by the first token. If that still leaves the path short, the default
/// group is put in front, followed by its default command when nothing else
/// was typed. Tokens beyond the last slot are dropped.
pub fn complete_positional(spec: &AppSpec, slots: &[Slot], commands: &[String]) -> Vec<String> {
    if commands.len() == slots.len() {
        return commands.to_vec();
    }

    let typed_group = commands.first().and_then(|name| spec.find_group(name));
    let mut completed = Vec::with_capacity(slots.len());

    for (index, slot) in slots.iter().enumerate() {
        if let Some(token) = commands.get(index) {
            completed.push(token.clone());
        } else if let (Slot::Command, Some(default)) = (slot, &spec.default_command) {
            completed.push(default.clone());
        } else if let Some(default) = typed_group.and_then(|g| g.default_command.as_ref()) {
            completed.push(default.clone());
        }
    }

    if completed.len() != slots.len() {
        if let Some(default_group) = &spec.default_group {
            completed.insert(0, default_group.clone());
            if completed.len() == 1 {
                if let Some(default) = spec
                    .find_group(default_group)
                    .and_then(|g| g.default_command.as_ref())
                {
                    completed.push(default.clone());
                }
            }
        }
    }

    completed
}

/// Coerces raw values to the catalog's declared types.
///
/// The bag holds one entry per catalog option that resolved to something,
/// keyed by the option's camelCase key, in catalog order. A value typed
/// under the option's alias is used when the full flag is absent.
pub fn coerce(catalog: &[OptionSpec], raw: &IndexMap<String, RawValue>) -> OptionBag {
    let mut bag = OptionBag::new();
    for option in catalog {
        let key = option.key();
        let given = raw
            .get(&key)
            .or_else(|| option.alias_key().and_then(|alias| raw.get(&alias)));
        let value = match option.kind {
            OptionType::Boolean => Some(coerce_boolean(option, given)),
            OptionType::String => coerce_string(option, given),
        };
        if let Some(value) = value {
            bag.insert(key, value);
        }
    }
    bag
}

fn coerce_boolean(option: &OptionSpec, raw: Option<&RawValue>) -> OptionValue {
    let value = match raw {
        None => option.truthy_default().is_some(),
        Some(RawValue::Present) => true,
        Some(RawValue::Negated) => false,
        Some(RawValue::Text(text)) => !FALSE_WORDS
            .iter()
            .any(|word| text.eq_ignore_ascii_case(word)),
    };
    OptionValue::Bool(value)
}

fn coerce_string(option: &OptionSpec, raw: Option<&RawValue>) -> Option<OptionValue> {
    match raw {
        Some(RawValue::Text(text)) if !text.is_empty() => Some(OptionValue::Str(text.clone())),
        _ => match option.truthy_default() {
            Some(default) => Some(default.clone()),
            // Present without a value: kept so validation can report it.
            None if raw.is_some() => Some(OptionValue::Str(String::new())),
            None => None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::{CommandSpec, GroupSpec};
    use stanza_input::{tokenize, MockEnv};

    fn path(segments: &[&str]) -> Vec<String> {
        segments.iter().map(|s| s.to_string()).collect()
    }

    fn raw(pairs: &[(&str, RawValue)]) -> IndexMap<String, RawValue> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    fn grouped() -> AppSpec {
        AppSpec::new()
            .group(
                GroupSpec::new("users", "Users")
                    .command(CommandSpec::new("show", "Show user"))
                    .command(CommandSpec::new("list", "List users")),
            )
            .group(
                GroupSpec::new("util", "Utilities")
                    .default_command("break")
                    .command(CommandSpec::new("fix", "Fix things"))
                    .command(CommandSpec::new("break", "Break things")),
            )
    }

    // === Boolean coercion ===

    #[test]
    fn boolean_absent_without_default_is_false() {
        let bag = coerce(&[OptionSpec::boolean("foo")], &raw(&[]));
        assert_eq!(bag.get("foo"), Some(&OptionValue::Bool(false)));
    }

    #[test]
    fn boolean_absent_with_default_true() {
        let bag = coerce(&[OptionSpec::boolean("foo").default_value(true)], &raw(&[]));
        assert_eq!(bag.get("foo"), Some(&OptionValue::Bool(true)));
    }

    #[test]
    fn boolean_present_and_negated() {
        let catalog = [OptionSpec::boolean("foo").default_value(true), OptionSpec::boolean("bar")];
        let bag = coerce(
            &catalog,
            &raw(&[("foo", RawValue::Negated), ("bar", RawValue::Present)]),
        );
        assert_eq!(bag.get("foo"), Some(&OptionValue::Bool(false)));
        assert_eq!(bag.get("bar"), Some(&OptionValue::Bool(true)));
    }

    #[test]
    fn boolean_text_values() {
        let catalog = [OptionSpec::boolean("foo")];
        for (text, expected) in [
            ("true", true),
            ("yes", true),
            ("1", true),
            ("anything", true),
            ("false", false),
            ("FALSE", false),
            ("0", false),
            ("no", false),
            ("Off", false),
            ("", false),
        ] {
            let bag = coerce(&catalog, &raw(&[("foo", RawValue::from(text))]));
            assert_eq!(bag.flag("foo"), expected, "text {:?}", text);
        }
    }

    // === String coercion ===

    #[test]
    fn string_value_wins_over_default() {
        let bag = coerce(
            &[OptionSpec::string("foo").default_value("dflt")],
            &raw(&[("foo", RawValue::from("bar"))]),
        );
        assert_eq!(bag.get_str("foo"), Some("bar"));
    }

    #[test]
    fn string_default_when_absent() {
        let bag = coerce(&[OptionSpec::string("foo").default_value("dflt")], &raw(&[]));
        assert_eq!(bag.get_str("foo"), Some("dflt"));
    }

    #[test]
    fn string_absent_is_omitted() {
        let bag = coerce(&[OptionSpec::string("foo")], &raw(&[]));
        assert!(!bag.contains("foo"));
        assert!(bag.is_empty());
    }

    #[test]
    fn string_present_without_value_is_empty() {
        let bag = coerce(&[OptionSpec::string("foo")], &raw(&[("foo", RawValue::Present)]));
        assert_eq!(bag.get_str("foo"), Some(""));
    }

    #[test]
    fn coerced_keys_are_camel_case_in_catalog_order() {
        let catalog = [OptionSpec::string("first-name"), OptionSpec::boolean("verbose")];
        let bag = coerce(
            &catalog,
            &raw(&[("verbose", RawValue::Present), ("firstName", RawValue::from("Ada"))]),
        );
        assert_eq!(bag.names().collect::<Vec<_>>(), vec!["firstName", "verbose"]);
    }

    #[test]
    fn alias_values_are_stored_under_the_key() {
        let catalog = [OptionSpec::string("first-name").alias("n"), OptionSpec::boolean("verbose").alias("v")];
        let bag = coerce(
            &catalog,
            &raw(&[("v", RawValue::Present), ("n", RawValue::from("Ada"))]),
        );
        assert_eq!(bag.get_str("firstName"), Some("Ada"));
        assert!(bag.flag("verbose"));
        assert!(!bag.contains("n"));
    }

    #[test]
    fn full_flag_beats_alias() {
        let catalog = [OptionSpec::string("first-name").alias("n")];
        let bag = coerce(
            &catalog,
            &raw(&[("n", RawValue::from("Grace")), ("firstName", RawValue::from("Ada"))]),
        );
        assert_eq!(bag.get_str("firstName"), Some("Ada"));
    }

    #[test]
    fn values_outside_catalog_are_dropped() {
        let bag = coerce(&[OptionSpec::string("foo")], &raw(&[("bar", RawValue::from("x"))]));
        assert!(bag.is_empty());
    }

    // === Positional completion ===

    #[test]
    fn complete_path_is_unchanged() {
        let spec = grouped();
        let slots = spec.shape().slots();
        assert_eq!(
            complete_positional(&spec, &slots, &path(&["users", "nope"])),
            vec!["users", "nope"]
        );
    }

    #[test]
    fn top_level_default_command() {
        let spec = AppSpec::new()
            .default_command("show")
            .command(CommandSpec::new("show", "Show"))
            .command(CommandSpec::new("list", "List"));
        let slots = spec.shape().slots();
        assert_eq!(complete_positional(&spec, &slots, &[]), vec!["show"]);
    }

    #[test]
    fn group_default_command() {
        let spec = grouped();
        let slots = spec.shape().slots();
        assert_eq!(
            complete_positional(&spec, &slots, &path(&["util"])),
            vec!["util", "break"]
        );
    }

    #[test]
    fn group_without_default_stays_short() {
        let spec = grouped();
        let slots = spec.shape().slots();
        assert_eq!(complete_positional(&spec, &slots, &path(&["users"])), vec!["users"]);
    }

    #[test]
    fn default_group_goes_in_front_of_typed_group() {
        let spec = grouped().default_group("util");
        let slots = spec.shape().slots();
        assert_eq!(
            complete_positional(&spec, &slots, &path(&["users"])),
            vec!["util", "users"]
        );
    }

    #[test]
    fn default_group_with_its_default_command() {
        let spec = grouped().default_group("util");
        let slots = spec.shape().slots();
        assert_eq!(complete_positional(&spec, &slots, &[]), vec!["util", "break"]);
    }

    #[test]
    fn default_group_prefixes_bare_command() {
        let spec = grouped().default_group("util");
        let slots = spec.shape().slots();
        assert_eq!(
            complete_positional(&spec, &slots, &path(&["fix"])),
            vec!["util", "fix"]
        );
    }

    #[test]
    fn no_defaults_leaves_path_empty() {
        let spec = grouped();
        let slots = spec.shape().slots();
        assert!(complete_positional(&spec, &slots, &[]).is_empty());
    }

    #[test]
    fn extra_tokens_are_dropped() {
        let spec = AppSpec::new();
        assert!(complete_positional(&spec, &[], &path(&["foo"])).is_empty());

        let spec = AppSpec::new().command(CommandSpec::new("show", "Show"));
        let slots = spec.shape().slots();
        assert_eq!(
            complete_positional(&spec, &slots, &path(&["show", "extra"])),
            vec!["show"]
        );
    }

    // === Full resolution ===

    #[test]
    fn resolve_rebuilds_catalog_for_completed_path() {
        let spec = AppSpec::new()
            .default_command("show")
            .command(CommandSpec::new("show", "Show").option(OptionSpec::string("id").default_value("1")))
            .command(CommandSpec::new("list", "List"));

        let resolution = resolve(&spec, &tokenize(Vec::<String>::new()), &MockEnv::new());
        assert_eq!(resolution.args.commands, vec!["show"]);
        assert!(resolution.config.contains("id"));
        assert_eq!(resolution.args.options.get_str("id"), Some("1"));
    }

    #[test]
    fn resolve_layers_command_line_over_environment() {
        let spec = AppSpec::new()
            .environment_prefix("MY_CLI")
            .option(OptionSpec::string("foo"))
            .option(OptionSpec::string("bar").env("EXPLICIT_BAR"))
            .option(OptionSpec::string("baz"));
        let env = MockEnv::new()
            .with_var("MY_CLI_FOO", "env-foo")
            .with_var("MY_CLI_BAR", "prefix-bar")
            .with_var("EXPLICIT_BAR", "explicit-bar")
            .with_var("MY_CLI_BAZ", "env-baz");

        let resolution = resolve(&spec, &tokenize(["--baz", "cli-baz"]), &env);
        let options = &resolution.args.options;
        assert_eq!(options.get_str("foo"), Some("env-foo"));
        assert_eq!(options.get_str("bar"), Some("explicit-bar"));
        assert_eq!(options.get_str("baz"), Some("cli-baz"));
    }

    #[test]
    fn resolve_coerces_boolean_from_environment() {
        let spec = AppSpec::new()
            .environment_prefix("MY_CLI")
            .option(OptionSpec::boolean("verbose"))
            .option(OptionSpec::boolean("quiet").default_value(true));
        let env = MockEnv::new()
            .with_var("MY_CLI_VERBOSE", "1")
            .with_var("MY_CLI_QUIET", "false");

        let resolution = resolve(&spec, &tokenize(Vec::<String>::new()), &env);
        assert!(resolution.args.options.flag("verbose"));
        assert!(!resolution.args.options.flag("quiet"));
    }
}
