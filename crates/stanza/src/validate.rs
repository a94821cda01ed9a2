//! Input validation.
//!
//! Validation runs in two passes. [`pre_validate`] only checks that every
//! flag the user typed exists in the catalog for the typed path, before
//! anything is coerced. [`validate`] runs after resolution and checks the
//! positional path and the option values.

use stanza_input::ParsedArgs;

use crate::catalog::ResolvedConfig;
use crate::error::CliError;
use crate::resolve::ResolvedArgs;
use crate::spec::{OptionType, Shape, Slot};

/// Reports every typed flag that is neither a key nor an alias in the
/// catalog, in the order the tokenizer recorded them.
pub fn pre_validate(config: &ResolvedConfig<'_>, parsed: &ParsedArgs) -> Vec<CliError> {
    parsed
        .options
        .keys()
        .filter(|name| !config.contains(name))
        .map(|name| CliError::UnknownOption(name.clone()))
        .collect()
}

/// Checks resolved inputs against the catalog for the resolved path.
pub fn validate(config: &ResolvedConfig<'_>, args: &ResolvedArgs) -> Vec<CliError> {
    let mut errors = Vec::new();
    let spec = config.spec;
    let shape = spec.shape();

    if shape == Shape::Groups {
        match (args.commands.first(), args.commands.get(1)) {
            (None, None) => {
                errors.push(CliError::MissingGroupArgument);
                errors.push(CliError::MissingCommandArgument);
                return errors;
            }
            (Some(group_name), command_name) => match spec.find_group(group_name) {
                None => {
                    errors.push(CliError::UnknownGroup(group_name.clone()));
                    return errors;
                }
                Some(group) => {
                    if let Some(command_name) = command_name {
                        if group.find_command(command_name).is_none() {
                            errors.push(CliError::UnknownCommandInGroup {
                                command: command_name.clone(),
                                group: group.name.clone(),
                            });
                            return errors;
                        }
                    }
                }
            },
            // Completion never leaves a hole before the last token.
            (None, Some(_)) => {}
        }
    }

    let missing: Vec<CliError> = config
        .positional
        .iter()
        .skip(args.commands.len())
        .map(|slot| match slot {
            Slot::Group => CliError::MissingGroupArgument,
            Slot::Command => CliError::MissingCommandArgument,
        })
        .collect();
    if !missing.is_empty() {
        return missing;
    }

    if shape == Shape::Commands {
        if let Some(command_name) = args.commands.first() {
            if spec.find_command(command_name).is_none() {
                errors.push(CliError::UnknownCommand(command_name.clone()));
            }
        }
    }

    for option in &config.options {
        let value = args.options.get(&option.key());
        if option.required && value.is_none() {
            errors.push(CliError::RequiredOptionMissing(option.name.clone()));
        }
        if option.kind == OptionType::String && value.is_some_and(|v| !v.is_truthy()) {
            errors.push(CliError::OptionRequiresValue(option.name.clone()));
        }
    }

    tracing::debug!(errors = errors.len(), "validated resolved inputs");
    errors
}
