//! Option catalog.
//!
//! The catalog is the ordered list of options in effect for one command
//! path: app options, then the matched command's options, then the system
//! options. It is rebuilt whenever the path changes, so the same
//! description can yield different catalogs before and after positional
//! defaults are filled in.

use crate::spec::{AppSpec, OptionSpec, Shape, Slot};

/// Key of the built-in help option.
pub const HELP: &str = "help";
/// Key of the built-in version option.
pub const VERSION: &str = "version";

/// The built-in options for an app. `version` only exists when the app
/// declares a version.
pub fn system_options(spec: &AppSpec) -> Vec<OptionSpec> {
    let mut options = vec![OptionSpec::boolean(HELP)
        .describe("Show usage")
        .default_value(false)
        .system()];
    if spec.version.is_some() {
        options.push(
            OptionSpec::boolean(VERSION)
                .describe("Show version")
                .default_value(false)
                .system(),
        );
    }
    options
}

/// The command options selected by a positional path, if the path names a
/// command.
fn command_options<'a>(spec: &'a AppSpec, commands: &[String]) -> &'a [OptionSpec] {
    let matched = match spec.shape() {
        Shape::Single => None,
        Shape::Commands => commands.first().and_then(|name| spec.find_command(name)),
        Shape::Groups => match (commands.first(), commands.get(1)) {
            (Some(group), Some(command)) => spec
                .find_group(group)
                .and_then(|group| group.find_command(command)),
            _ => None,
        },
    };
    matched.map(|command| command.options.as_slice()).unwrap_or(&[])
}

/// Builds the catalog for a positional path.
pub fn build_catalog(spec: &AppSpec, commands: &[String]) -> Vec<OptionSpec> {
    spec.options
        .iter()
        .chain(command_options(spec, commands))
        .cloned()
        .chain(system_options(spec))
        .collect()
}

/// An app description paired with the positional slots and catalog for
/// one command path.
#[derive(Debug, Clone)]
pub struct ResolvedConfig<'a> {
    pub spec: &'a AppSpec,
    pub positional: Vec<Slot>,
    pub options: Vec<OptionSpec>,
}

impl<'a> ResolvedConfig<'a> {
    pub fn new(spec: &'a AppSpec, commands: &[String]) -> Self {
        let options = build_catalog(spec, commands);
        tracing::trace!(?commands, options = options.len(), "built option catalog");
        Self {
            spec,
            positional: spec.shape().slots(),
            options,
        }
    }

    /// Finds a catalog option by its camelCase key or its alias.
    pub fn option(&self, name: &str) -> Option<&OptionSpec> {
        self.options.iter().find(|option| option.answers_to(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.option(name).is_some()
    }

    /// Keys of the system options in this catalog.
    pub fn system_keys(&self) -> Vec<String> {
        self.options
            .iter()
            .filter(|option| option.system)
            .map(OptionSpec::key)
            .collect()
    }
}
