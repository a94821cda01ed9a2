//! Handler registry and dispatch for declarative CLIs.
//!
//! `stanza-dispatch` owns the handler side of a stanza app: the [`Handler`]
//! trait, closure adapters for sync and async handlers, the [`Handlers`]
//! registry keyed by command path, and [`dispatch`], which runs the handler
//! for a resolved path.
//!
//! # Registry Shapes
//!
//! The registry follows the shape of the app description:
//!
//! - one handler for an app without commands ([`Handlers::single`])
//! - one handler per command ([`CommandHandlers`])
//! - one handler per command inside each group ([`GroupHandlers`])
//!
//! ```rust
//! use stanza_dispatch::{dispatch, handler, CommandContext, CommandHandlers, Handlers};
//! use stanza_input::OptionBag;
//!
//! # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
//! let handlers: Handlers = CommandHandlers::new()
//!     .on("show", handler(|options, _ctx| Ok(options.get_str("name").map(String::from))))
//!     .into();
//!
//! let mut options = OptionBag::new();
//! options.insert("name", "ada");
//! let ctx = CommandContext::new(vec!["show".to_string()]);
//!
//! let value = dispatch(&handlers, &options, &ctx).await.unwrap();
//! assert_eq!(value, serde_json::json!("ada"));
//! # });
//! ```

mod dispatch;
mod handler;
mod registry;

pub use dispatch::{dispatch, path_to_string, DispatchError};

pub use handler::{
    async_handler, handler, AsyncFnHandler, CommandContext, FnHandler, Handler, HandlerResult,
};

pub use registry::{CommandHandlers, GroupHandlers, HandlerShape, Handlers};
