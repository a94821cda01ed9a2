//! Two-column row layout for command and option listings.

use console::measure_text_width;

use crate::spec::{CommandSpec, OptionSpec};

/// Column where option type annotations end.
pub(crate) const ANNOTATION_COLUMN: usize = 80;

/// Pads every label to the widest one plus a trailing space.
pub(crate) fn pad_labels(labels: &[String]) -> Vec<String> {
    let width = labels
        .iter()
        .map(|label| measure_text_width(label) + 1)
        .max()
        .unwrap_or(0);
    labels
        .iter()
        .map(|label| {
            let fill = width.saturating_sub(measure_text_width(label));
            format!("{}{}", label, " ".repeat(fill))
        })
        .collect()
}

/// Rows for a command listing: `<prefix> <name>  <description> (default)`.
pub(crate) fn command_rows<F>(prefix: &str, commands: &[CommandSpec], is_default: F) -> Vec<String>
where
    F: Fn(&CommandSpec) -> bool,
{
    let labels: Vec<String> = commands
        .iter()
        .map(|command| format!("{} {}", prefix, command.name))
        .collect();
    pad_labels(&labels)
        .into_iter()
        .zip(commands)
        .map(|(label, command)| {
            let marker = if is_default(command) { " (default)" } else { "" };
            format!("{} {}{}", label, command.description, marker)
                .trim_end()
                .to_string()
        })
        .collect()
}

fn option_label(option: &OptionSpec) -> String {
    match &option.alias {
        Some(alias) => format!("{}, -{}", option.flag(), alias),
        None => option.flag(),
    }
}

/// `[type]` or `[type] [default: value]`.
pub(crate) fn annotation(option: &OptionSpec) -> String {
    match option.truthy_default() {
        Some(default) => format!("[{}] [default: {}]", option.kind, default),
        None => format!("[{}]", option.kind),
    }
}

/// Rows for the option listing.
///
/// The annotation is right-aligned so that, once the rows are indented by
/// `indent` columns, it ends at [`ANNOTATION_COLUMN`].
pub(crate) fn option_rows(options: &[OptionSpec], indent: usize) -> Vec<String> {
    let labels: Vec<String> = options.iter().map(option_label).collect();
    pad_labels(&labels)
        .into_iter()
        .zip(options)
        .map(|(label, option)| {
            let left = format!("{} {}", label, option.description);
            let right = annotation(option);
            let used = indent + measure_text_width(&left) + measure_text_width(&right);
            let fill = ANNOTATION_COLUMN.saturating_sub(used).max(1);
            format!("{}{}{}", left, " ".repeat(fill), right)
        })
        .collect()
}
