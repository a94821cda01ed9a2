//! Usage rendering.
//!
//! [`render_usage`] is a pure function of the binary name, a positional
//! path, a catalog and an error list. The app calls it with the typed path
//! and catalog for pre-resolution failures and help, and with the resolved
//! ones for validation and handler failures.
//!
//! Layout, top to bottom:
//!
//! - `Usage: <bin> <slots> [options]`
//! - the app description
//! - the command listing, by group when the app has groups
//! - the option listing with right-aligned type annotations
//! - the error list

mod layout;
mod writer;

use crate::catalog::ResolvedConfig;
use crate::error::CliError;
use crate::spec::{GroupSpec, Shape};

use layout::{command_rows, option_rows};
use writer::UsageWriter;

/// Title for a listing: singular when it holds exactly one entry.
fn heading(count: usize, singular: &'static str, plural: &'static str) -> &'static str {
    if count == 1 {
        singular
    } else {
        plural
    }
}

/// Renders the usage report as lines, without trailing newlines.
pub fn render_usage(
    bin: &str,
    commands: &[String],
    config: &ResolvedConfig<'_>,
    errors: &[CliError],
) -> Vec<String> {
    let spec = config.spec;
    let mut out = UsageWriter::new();

    out.line(usage_line(bin, commands, config, errors));
    out.blank();

    if let Some(description) = &spec.description {
        out.line(description);
        out.blank();
    }

    match spec.shape() {
        Shape::Groups => {
            let unknown_group = errors
                .iter()
                .any(|e| matches!(e, CliError::UnknownGroup(_)));
            let typed_group = commands
                .first()
                .filter(|name| !unknown_group && spec.find_group(name).is_some());

            out.section("Commands", |out| {
                for group in ordered_groups(config) {
                    if typed_group.is_some_and(|name| *name != group.name) {
                        continue;
                    }
                    let is_base = spec.default_group.as_deref() == Some(group.name.as_str());
                    let (title, prefix) = if is_base {
                        ("Base", bin.to_string())
                    } else {
                        (group.label.as_str(), format!("{} {}", bin, group.name))
                    };
                    out.section(title, |out| {
                        for row in command_rows(&prefix, &group.commands, |c| group.is_default(&c.name)) {
                            out.line(row);
                        }
                    });
                }
            });
            out.blank();
        }
        Shape::Commands => {
            out.section(heading(spec.commands.len(), "Command", "Commands"), |out| {
                for row in command_rows(bin, &spec.commands, |c| spec.is_default_command(&c.name)) {
                    out.line(row);
                }
            });
            out.blank();
        }
        Shape::Single => {}
    }

    if !config.options.is_empty() {
        out.section(heading(config.options.len(), "Option", "Options"), |out| {
            for row in option_rows(&config.options, out.indent_width()) {
                out.line(row);
            }
        });
        out.blank();
    }

    if !errors.is_empty() {
        out.section(heading(errors.len(), "Error", "Errors"), |out| {
            for error in errors {
                out.line(error.to_string());
            }
        });
    }

    out.finish()
}

/// `Usage: <bin> <slot>... [options]`, showing typed tokens in place of
/// slot placeholders unless an error rejected them.
fn usage_line(
    bin: &str,
    commands: &[String],
    config: &ResolvedConfig<'_>,
    errors: &[CliError],
) -> String {
    let rejected = errors.iter().any(CliError::rejects_positional);
    let positional: String = config
        .positional
        .iter()
        .enumerate()
        .map(|(index, slot)| match commands.get(index) {
            Some(token) if !rejected => format!(" {}", token),
            _ => format!(" <{}>", slot.name()),
        })
        .collect();
    let options = if config.options.is_empty() {
        ""
    } else {
        " [options]"
    };
    format!("Usage: {}{}{}", bin, positional, options)
}

/// Groups in declaration order with the default group moved to the front.
fn ordered_groups<'a>(config: &ResolvedConfig<'a>) -> Vec<&'a GroupSpec> {
    let spec = config.spec;
    let (mut ordered, rest): (Vec<&GroupSpec>, Vec<&GroupSpec>) = spec
        .groups
        .iter()
        .partition(|group| spec.default_group.as_deref() == Some(group.name.as_str()));
    ordered.extend(rest);
    ordered
}
