//! Command handler types.
//!
//! A handler receives the coerced option bag (system options removed) and a
//! [`CommandContext`] describing where it was dispatched, and produces any
//! serializable value or an error.
//!
//! # Core Types
//!
//! - [`Handler`]: the trait every handler implements, async by signature
//! - [`FnHandler`]: wraps a synchronous closure
//! - [`AsyncFnHandler`]: wraps a closure returning a future
//! - [`HandlerResult`]: `Result<serde_json::Value, anyhow::Error>`
//!
//! Handler errors are ordinary `anyhow` errors. Their top-level message is
//! what the user sees in the rendered error section.

use std::future::Future;
use std::marker::PhantomData;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use stanza_input::OptionBag;

/// Context passed to command handlers alongside the option bag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CommandContext {
    /// The fully resolved positional path, defaults substituted
    /// (e.g. `["users", "show"]`).
    pub commands: Vec<String>,
}

impl CommandContext {
    pub fn new(commands: Vec<String>) -> Self {
        Self { commands }
    }
}

/// The result type produced by handlers after serialization.
pub type HandlerResult = Result<Value, anyhow::Error>;

fn into_handler_result<T: Serialize>(result: anyhow::Result<T>) -> HandlerResult {
    Ok(serde_json::to_value(result?)?)
}

/// Trait for command handlers.
///
/// Handlers run one at a time on the caller's task, so neither the trait
/// nor its futures need to be `Send`.
///
/// # Example
///
/// ```rust
/// use stanza_dispatch::{CommandContext, Handler, HandlerResult};
/// use stanza_input::OptionBag;
///
/// struct Greeter;
///
/// #[async_trait::async_trait(?Send)]
/// impl Handler for Greeter {
///     async fn handle(&self, options: &OptionBag, _ctx: &CommandContext) -> HandlerResult {
///         let name = options.get_str("name").unwrap_or("world");
///         Ok(serde_json::json!({ "greeting": format!("hello {}", name) }))
///     }
/// }
/// ```
#[async_trait(?Send)]
pub trait Handler {
    /// Execute the handler with the coerced options and dispatch context.
    async fn handle(&self, options: &OptionBag, ctx: &CommandContext) -> HandlerResult;
}

/// A wrapper that implements [`Handler`] for synchronous closures.
///
/// The closure returns `anyhow::Result<T>` for any serializable `T`; the
/// value is converted to JSON on success.
///
/// ```rust
/// use stanza_dispatch::handler;
///
/// let show = handler(|options, ctx| {
///     Ok(serde_json::json!({ "path": ctx.commands, "args": options }))
/// });
/// ```
pub struct FnHandler<F, T> {
    f: F,
    _phantom: PhantomData<fn() -> T>,
}

impl<F, T> FnHandler<F, T>
where
    F: Fn(&OptionBag, &CommandContext) -> anyhow::Result<T>,
    T: Serialize,
{
    pub fn new(f: F) -> Self {
        Self {
            f,
            _phantom: PhantomData,
        }
    }
}

#[async_trait(?Send)]
impl<F, T> Handler for FnHandler<F, T>
where
    F: Fn(&OptionBag, &CommandContext) -> anyhow::Result<T>,
    T: Serialize,
{
    async fn handle(&self, options: &OptionBag, ctx: &CommandContext) -> HandlerResult {
        into_handler_result((self.f)(options, ctx))
    }
}

/// A wrapper that implements [`Handler`] for closures returning futures.
///
/// The closure receives owned copies of the options and context so the
/// returned future does not borrow from the dispatcher.
///
/// ```rust
/// use stanza_dispatch::async_handler;
///
/// let fetch = async_handler(|options, _ctx| async move {
///     let id = options.get_str("id").unwrap_or_default().to_string();
///     Ok(id)
/// });
/// ```
pub struct AsyncFnHandler<F, Fut> {
    f: F,
    _phantom: PhantomData<fn() -> Fut>,
}

impl<F, Fut, T> AsyncFnHandler<F, Fut>
where
    F: Fn(OptionBag, CommandContext) -> Fut,
    Fut: Future<Output = anyhow::Result<T>>,
    T: Serialize,
{
    pub fn new(f: F) -> Self {
        Self {
            f,
            _phantom: PhantomData,
        }
    }
}

#[async_trait(?Send)]
impl<F, Fut, T> Handler for AsyncFnHandler<F, Fut>
where
    F: Fn(OptionBag, CommandContext) -> Fut,
    Fut: Future<Output = anyhow::Result<T>>,
    T: Serialize,
{
    async fn handle(&self, options: &OptionBag, ctx: &CommandContext) -> HandlerResult {
        into_handler_result((self.f)(options.clone(), ctx.clone()).await)
    }
}

/// Wraps a synchronous closure as a [`Handler`].
pub fn handler<F, T>(f: F) -> FnHandler<F, T>
where
    F: Fn(&OptionBag, &CommandContext) -> anyhow::Result<T>,
    T: Serialize,
{
    FnHandler::new(f)
}

/// Wraps an async closure as a [`Handler`].
pub fn async_handler<F, Fut, T>(f: F) -> AsyncFnHandler<F, Fut>
where
    F: Fn(OptionBag, CommandContext) -> Fut,
    Fut: Future<Output = anyhow::Result<T>>,
    T: Serialize,
{
    AsyncFnHandler::new(f)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_options() -> OptionBag {
        let mut bag = OptionBag::new();
        bag.insert("foo", "bar");
        bag
    }

    #[test]
    fn test_command_context_creation() {
        let ctx = CommandContext::new(vec!["users".into(), "show".into()]);
        assert_eq!(ctx.commands, vec!["users", "show"]);
    }

    #[test]
    fn test_command_context_default() {
        let ctx = CommandContext::default();
        assert!(ctx.commands.is_empty());
    }

    #[test]
    fn test_command_context_serializes() {
        let ctx = CommandContext::new(vec!["show".into()]);
        assert_eq!(serde_json::to_value(&ctx).unwrap(), json!({"commands": ["show"]}));
    }

    #[tokio::test]
    async fn test_fn_handler_returns_serialized_value() {
        let h = handler(|options, ctx| Ok(json!({ "args": options, "positional": ctx })));
        let ctx = CommandContext::new(vec!["show".into()]);

        let value = h.handle(&sample_options(), &ctx).await.unwrap();
        assert_eq!(
            value,
            json!({ "args": {"foo": "bar"}, "positional": {"commands": ["show"]} })
        );
    }

    #[tokio::test]
    async fn test_fn_handler_unit_is_null() {
        let h = handler(|_options, _ctx| Ok(()));
        let value = h
            .handle(&OptionBag::new(), &CommandContext::default())
            .await
            .unwrap();
        assert_eq!(value, Value::Null);
    }

    #[tokio::test]
    async fn test_fn_handler_error_passes_through() {
        let h = handler(|_options, _ctx| -> anyhow::Result<()> {
            anyhow::bail!("Everything is ruined!")
        });
        let err = h
            .handle(&OptionBag::new(), &CommandContext::default())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Everything is ruined!");
    }

    #[tokio::test]
    async fn test_async_handler_awaits_future() {
        let h = async_handler(|options: OptionBag, _ctx| async move {
            tokio::task::yield_now().await;
            Ok(options.get_str("foo").map(str::to_uppercase))
        });
        let value = h
            .handle(&sample_options(), &CommandContext::default())
            .await
            .unwrap();
        assert_eq!(value, json!("BAR"));
    }

    #[tokio::test]
    async fn test_async_handler_rejection() {
        let h = async_handler(|_options, _ctx| async move {
            Err::<(), _>(anyhow::anyhow!("rejected"))
        });
        let err = h
            .handle(&OptionBag::new(), &CommandContext::default())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "rejected");
    }
}
