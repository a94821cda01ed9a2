//! Handler registry.
//!
//! The registry mirrors the three configuration shapes: one handler for a
//! single-command app, one per command, or one per command within each
//! group. Keys are stored camelCased and looked up the same way, so a
//! command named `list-all` is registered and resolved as `listAll`.

use std::fmt;

use indexmap::IndexMap;
use stanza_input::camel_case;

use crate::handler::Handler;

type BoxedHandler = Box<dyn Handler>;

/// The shape of a [`Handlers`] registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerShape {
    Single,
    ByCommand,
    ByGroup,
}

impl fmt::Display for HandlerShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            HandlerShape::Single => "single handler",
            HandlerShape::ByCommand => "handlers by command",
            HandlerShape::ByGroup => "handlers by group",
        })
    }
}

/// All handlers of an app, keyed by camelCased command path.
///
/// # Example
///
/// ```rust
/// use stanza_dispatch::{handler, CommandHandlers, GroupHandlers, Handlers};
///
/// let flat: Handlers = CommandHandlers::new()
///     .on("show", handler(|_o, _c| Ok("shown")))
///     .on("list", handler(|_o, _c| Ok("listed")))
///     .into();
///
/// let grouped: Handlers = GroupHandlers::new()
///     .group("users", |g| g.on("show", handler(|_o, _c| Ok(()))))
///     .into();
///
/// assert!(flat.resolve(&["show".to_string()]).is_some());
/// assert!(grouped.resolve(&["users".to_string(), "show".to_string()]).is_some());
/// ```
pub enum Handlers {
    Single(BoxedHandler),
    ByCommand(IndexMap<String, BoxedHandler>),
    ByGroup(IndexMap<String, IndexMap<String, BoxedHandler>>),
}

impl Handlers {
    /// A registry for a single-command app.
    pub fn single(handler: impl Handler + 'static) -> Self {
        Handlers::Single(Box::new(handler))
    }

    pub fn shape(&self) -> HandlerShape {
        match self {
            Handlers::Single(_) => HandlerShape::Single,
            Handlers::ByCommand(_) => HandlerShape::ByCommand,
            Handlers::ByGroup(_) => HandlerShape::ByGroup,
        }
    }

    /// Finds the handler for a resolved command path.
    ///
    /// A single handler answers every path. Otherwise the first segment
    /// selects the command (or group, then the second segment the command).
    pub fn resolve(&self, path: &[String]) -> Option<&dyn Handler> {
        match self {
            Handlers::Single(handler) => Some(handler.as_ref()),
            Handlers::ByCommand(commands) => commands
                .get(&camel_case(path.first()?))
                .map(|h| h.as_ref()),
            Handlers::ByGroup(groups) => groups
                .get(&camel_case(path.first()?))?
                .get(&camel_case(path.get(1)?))
                .map(|h| h.as_ref()),
        }
    }
}

impl fmt::Debug for Handlers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Handlers::Single(_) => f.write_str("Handlers::Single"),
            Handlers::ByCommand(commands) => f
                .debug_struct("Handlers::ByCommand")
                .field("commands", &commands.keys().collect::<Vec<_>>())
                .finish(),
            Handlers::ByGroup(groups) => f
                .debug_struct("Handlers::ByGroup")
                .field(
                    "groups",
                    &groups
                        .iter()
                        .map(|(g, cmds)| (g, cmds.keys().collect::<Vec<_>>()))
                        .collect::<Vec<_>>(),
                )
                .finish(),
        }
    }
}

/// Builder for handlers keyed by command name.
#[derive(Default)]
pub struct CommandHandlers {
    handlers: IndexMap<String, BoxedHandler>,
}

impl CommandHandlers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the handler for a command, replacing any previous one.
    pub fn on(mut self, command: &str, handler: impl Handler + 'static) -> Self {
        self.handlers.insert(camel_case(command), Box::new(handler));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl From<CommandHandlers> for Handlers {
    fn from(builder: CommandHandlers) -> Self {
        Handlers::ByCommand(builder.handlers)
    }
}

/// Builder for handlers keyed by group, then command name.
#[derive(Default)]
pub struct GroupHandlers {
    groups: IndexMap<String, IndexMap<String, BoxedHandler>>,
}

impl GroupHandlers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the command handlers of one group.
    ///
    /// Calling this twice for the same group merges the registrations.
    pub fn group<F>(mut self, name: &str, configure: F) -> Self
    where
        F: FnOnce(CommandHandlers) -> CommandHandlers,
    {
        let commands = configure(CommandHandlers::new()).handlers;
        self.groups
            .entry(camel_case(name))
            .or_default()
            .extend(commands);
        self
    }
}

impl From<GroupHandlers> for Handlers {
    fn from(builder: GroupHandlers) -> Self {
        Handlers::ByGroup(builder.groups)
    }
}

impl<F, T> From<crate::handler::FnHandler<F, T>> for Handlers
where
    F: Fn(&stanza_input::OptionBag, &crate::CommandContext) -> anyhow::Result<T> + 'static,
    T: serde::Serialize + 'static,
{
    fn from(handler: crate::handler::FnHandler<F, T>) -> Self {
        Handlers::single(handler)
    }
}
