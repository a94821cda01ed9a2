//! # Stanza - Declarative Command-Line Apps
//!
//! Stanza builds a command-line app from one description of its options,
//! commands and command groups. From that description it:
//!
//! - tokenizes the arguments (`--no-x` negation included)
//! - binds environment variables by prefix or by explicit name
//! - fills in default commands and groups
//! - coerces options to their declared types
//! - validates everything and renders a usage report on failure or `--help`
//! - dispatches to the handler registered for the resolved command
//!
//! ## Core Concepts
//!
//! - [`AppSpec`]: the app description (options, commands or groups, defaults)
//! - [`App`] / [`AppBuilder`]: the description paired with its handlers
//! - [`Outcome`]: how one invocation ended, with its exit status
//! - [`CliError`]: the errors shown in the usage report
//! - [`Console`]: where usage and version text goes
//!
//! ## Quick Start
//!
//! ```rust
//! use stanza::{App, AppSpec, CommandSpec, GroupSpec, MockConsole};
//! use stanza_dispatch::{handler, GroupHandlers};
//! use stanza_input::MockEnv;
//!
//! let spec = AppSpec::new()
//!     .group(
//!         GroupSpec::new("users", "Users")
//!             .command(CommandSpec::new("show", "Show user"))
//!             .command(CommandSpec::new("list", "List users")),
//!     );
//!
//! let app = App::builder(spec)
//!     .handlers(GroupHandlers::new().group("users", |g| {
//!         g.on("show", handler(|_o, _c| Ok("shown")))
//!             .on("list", handler(|_o, _c| Ok("listed")))
//!     }))
//!     .build()
//!     .unwrap();
//!
//! let console = MockConsole::new();
//! let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
//! let outcome = runtime.block_on(app.execute(["example-app"], &MockEnv::new(), &console));
//!
//! assert_eq!(outcome.code(), 1);
//! assert_eq!(console.lines()[0], "Usage: example-app <group> <command> [options]");
//! ```
//!
//! In a binary, [`App::run`] reads the process arguments and environment,
//! writes to stdout and returns the [`Outcome`] to turn into an exit code.

mod app;
mod catalog;
mod error;
mod output;
mod resolve;
mod spec;
mod usage;
mod validate;

pub use app::{App, AppBuilder, Outcome};
pub use catalog::{build_catalog, system_options, ResolvedConfig, HELP, VERSION};
pub use error::{CliError, SetupError};
pub use output::{Console, MockConsole, RealConsole};
pub use resolve::{coerce, complete_positional, resolve, Resolution, ResolvedArgs};
pub use spec::{AppSpec, CommandSpec, GroupSpec, OptionSpec, OptionType, Shape, Slot};
pub use usage::render_usage;
pub use validate::{pre_validate, validate};

// Handler-side types, re-exported so apps can depend on `stanza` alone.
pub use stanza_dispatch::{
    async_handler, handler, CommandContext, CommandHandlers, GroupHandlers, Handler,
    HandlerResult, Handlers,
};
pub use stanza_input::{EnvReader, MockEnv, OptionBag, OptionValue, RealEnv};
