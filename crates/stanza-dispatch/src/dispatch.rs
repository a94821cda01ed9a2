//! Dispatch of a resolved command path to its handler.
//!
//! Dispatch happens after validation, so a missing handler at this point
//! means the registry and the app description disagree. The app builder
//! checks this up front; [`DispatchError::NoHandler`] covers what slips by.

use serde_json::Value;
use stanza_input::OptionBag;
use thiserror::Error;

use crate::handler::CommandContext;
use crate::registry::Handlers;

/// Error produced by [`dispatch`].
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("no handler registered for `{0}`")]
    NoHandler(String),

    /// The handler ran and failed. Displays the handler's own message.
    #[error("{0}")]
    Handler(anyhow::Error),
}

impl DispatchError {
    /// The message shown to the user for this error.
    pub fn message(&self) -> String {
        self.to_string()
    }
}

/// Joins a command path for display and logging.
///
/// For example, `["users", "show"]` becomes `"users.show"`.
pub fn path_to_string(path: &[String]) -> String {
    path.join(".")
}

/// Runs the handler for `ctx.commands` with the given options.
///
/// The handler is awaited on the caller's task.
pub async fn dispatch(
    handlers: &Handlers,
    options: &OptionBag,
    ctx: &CommandContext,
) -> Result<Value, DispatchError> {
    let path = path_to_string(&ctx.commands);
    let handler = handlers
        .resolve(&ctx.commands)
        .ok_or_else(|| DispatchError::NoHandler(path.clone()))?;

    tracing::debug!(command = %path, options = ?options.names().collect::<Vec<_>>(), "dispatching");

    match handler.handle(options, ctx).await {
        Ok(value) => Ok(value),
        Err(err) => {
            tracing::debug!(command = %path, error = %format!("{:#}", err), "handler failed");
            Err(DispatchError::Handler(err))
        }
    }
}
