//! Error types.
//!
//! [`CliError`] is what the user of a built app sees: every variant renders
//! as one line of the usage error section. [`SetupError`] is what the
//! developer sees when the app description and handlers do not fit.

use thiserror::Error;

/// An input or handler error, rendered in the usage error section.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("`{0}` option does not exist")]
    UnknownOption(String),

    #[error("`group` argument is required")]
    MissingGroupArgument,

    #[error("`command` argument is required")]
    MissingCommandArgument,

    #[error("`{0}` group does not exist")]
    UnknownGroup(String),

    #[error("`{0}` command does not exist")]
    UnknownCommand(String),

    #[error("`{command}` command does not exist in `{group}` group")]
    UnknownCommandInGroup { command: String, group: String },

    #[error("`{0}` option is required")]
    RequiredOptionMissing(String),

    #[error("`{0}` option requires a value")]
    OptionRequiresValue(String),

    /// A handler failed. Displays the handler's own message.
    #[error("{0}")]
    Handler(String),
}

impl CliError {
    /// True for errors that make the typed positional tokens meaningless.
    ///
    /// The usage line falls back to `<slot>` placeholders when one is present.
    pub fn rejects_positional(&self) -> bool {
        matches!(
            self,
            CliError::UnknownGroup(_)
                | CliError::UnknownCommand(_)
                | CliError::UnknownCommandInGroup { .. }
        )
    }
}

/// Error type for app construction.
#[derive(Debug)]
pub enum SetupError {
    /// Both `commands` and `groups` were declared.
    ConflictingShape,
    /// Two options with the same key in one catalog.
    DuplicateOption { option: String, scope: String },
    /// A default group or command that names nothing.
    UnknownDefault(String),
    /// The handler registry does not match the description's shape.
    HandlerShape { expected: String, found: String },
    /// No handlers were given to the builder.
    NoHandlers,
    /// A command path without a registered handler.
    MissingHandler(String),
    /// The runtime for blocking execution could not be started.
    Runtime(std::io::Error),
}

impl std::fmt::Display for SetupError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SetupError::ConflictingShape => {
                write!(f, "configuration error: declare either commands or groups, not both")
            }
            SetupError::DuplicateOption { option, scope } => {
                write!(f, "duplicate option: `{}` in {}", option, scope)
            }
            SetupError::UnknownDefault(msg) => write!(f, "unknown default: {}", msg),
            SetupError::HandlerShape { expected, found } => {
                write!(f, "handler mismatch: expected {}, found {}", expected, found)
            }
            SetupError::NoHandlers => write!(f, "no handlers registered"),
            SetupError::MissingHandler(path) => write!(f, "missing handler: {}", path),
            SetupError::Runtime(err) => write!(f, "runtime error: {}", err),
        }
    }
}

impl std::error::Error for SetupError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SetupError::Runtime(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for SetupError {
    fn from(e: std::io::Error) -> Self {
        SetupError::Runtime(e)
    }
}
