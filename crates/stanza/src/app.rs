//! The app: builder, setup checks and the execution pipeline.
//!
//! ```rust
//! use stanza::{App, AppSpec, CommandSpec, MockConsole, OptionSpec, Outcome};
//! use stanza_dispatch::{handler, CommandHandlers};
//! use stanza_input::MockEnv;
//!
//! let spec = AppSpec::new()
//!     .command(CommandSpec::new("greet", "Say hello").option(OptionSpec::string("name")));
//!
//! let app = App::builder(spec)
//!     .handlers(CommandHandlers::new().on("greet", handler(|options, _ctx| {
//!         Ok(format!("hello {}", options.get_str("name").unwrap_or("world")))
//!     })))
//!     .build()
//!     .unwrap();
//!
//! let console = MockConsole::new();
//! let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
//! let outcome = runtime.block_on(app.execute(
//!     ["app", "greet", "--name", "ada"],
//!     &MockEnv::new(),
//!     &console,
//! ));
//!
//! assert_eq!(outcome.response(), Some(&serde_json::json!("hello ada")));
//! assert_eq!(outcome.code(), 0);
//! ```

use std::collections::HashSet;
use std::path::Path;
use std::process::ExitCode;

use serde_json::Value;
use stanza_dispatch::{
    dispatch, path_to_string, CommandContext, DispatchError, HandlerShape, Handlers,
};
use stanza_input::{tokenize, EnvReader, RealEnv};

use crate::catalog::{system_options, ResolvedConfig, HELP, VERSION};
use crate::error::{CliError, SetupError};
use crate::output::{emit, Console, RealConsole};
use crate::resolve::resolve;
use crate::spec::{AppSpec, OptionSpec, Shape};
use crate::usage::render_usage;
use crate::validate::{pre_validate, validate};

/// How an invocation ended.
#[derive(Debug)]
pub enum Outcome {
    /// The handler ran; carries its serialized return value.
    Success(Value),
    /// `--version` printed the version.
    Version(String),
    /// Usage was shown. Help requests carry no errors.
    Failure(Vec<CliError>),
}

impl Outcome {
    /// The process exit status: 0 for success and version, 1 otherwise.
    pub fn code(&self) -> u8 {
        match self {
            Outcome::Success(_) | Outcome::Version(_) => 0,
            Outcome::Failure(_) => 1,
        }
    }

    pub fn exit_code(&self) -> ExitCode {
        ExitCode::from(self.code())
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    pub fn response(&self) -> Option<&Value> {
        match self {
            Outcome::Success(value) => Some(value),
            _ => None,
        }
    }

    pub fn errors(&self) -> &[CliError] {
        match self {
            Outcome::Failure(errors) => errors,
            _ => &[],
        }
    }
}

/// A built app, ready to run against argument vectors.
#[derive(Debug)]
pub struct App {
    spec: AppSpec,
    handlers: Handlers,
    bin_name: Option<String>,
}

impl App {
    pub fn builder(spec: AppSpec) -> AppBuilder {
        AppBuilder::new(spec)
    }

    pub fn spec(&self) -> &AppSpec {
        &self.spec
    }

    /// Runs against the process arguments, environment and stdout on a
    /// current-thread runtime.
    pub fn run(&self) -> Result<Outcome, SetupError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        let console = RealConsole::new();
        Ok(runtime.block_on(self.execute(std::env::args(), &RealEnv, &console)))
    }

    /// Runs one invocation.
    ///
    /// `args` includes the program name. Usage, errors and version text go
    /// to `console`; the handler's value is returned in the outcome.
    pub async fn execute<I, S>(&self, args: I, env: &dyn EnvReader, console: &dyn Console) -> Outcome
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut args = args.into_iter();
        let program = args.next();
        let bin = match (&self.bin_name, &program) {
            (Some(name), _) => name.clone(),
            (None, Some(program)) => bin_name_from(program.as_ref()),
            (None, None) => String::new(),
        };

        let parsed = tokenize(args);
        let typed = ResolvedConfig::new(&self.spec, &parsed.commands);

        let errors = pre_validate(&typed, &parsed);
        if !errors.is_empty() {
            tracing::debug!(errors = errors.len(), "unknown options");
            emit(console, &render_usage(&bin, &parsed.commands, &typed, &errors));
            return Outcome::Failure(errors);
        }

        let resolution = resolve(&self.spec, &parsed, env);
        let options = &resolution.args.options;

        if options.flag(HELP) {
            emit(console, &render_usage(&bin, &parsed.commands, &typed, &[]));
            return Outcome::Failure(Vec::new());
        }

        if options.flag(VERSION) {
            if let Some(version) = &self.spec.version {
                emit(console, std::slice::from_ref(version));
                return Outcome::Version(version.clone());
            }
        }

        let errors = validate(&resolution.config, &resolution.args);
        if !errors.is_empty() {
            emit(
                console,
                &render_usage(&bin, &resolution.args.commands, &resolution.config, &errors),
            );
            return Outcome::Failure(errors);
        }

        let system = resolution.config.system_keys();
        let system: Vec<&str> = system.iter().map(String::as_str).collect();
        let bag = options.without(&system);
        let ctx = CommandContext::new(resolution.args.commands.clone());

        match dispatch(&self.handlers, &bag, &ctx).await {
            Ok(value) => Outcome::Success(value),
            Err(err) => {
                if let DispatchError::NoHandler(path) = &err {
                    tracing::warn!(command = %path, "no handler for resolved command");
                }
                let errors = vec![CliError::Handler(err.message())];
                emit(
                    console,
                    &render_usage(&bin, &resolution.args.commands, &resolution.config, &errors),
                );
                Outcome::Failure(errors)
            }
        }
    }
}

/// The file name of a program path (`/usr/bin/example-app` → `example-app`).
fn bin_name_from(program: &str) -> String {
    Path::new(program)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(program)
        .to_string()
}

/// Builder for [`App`].
pub struct AppBuilder {
    spec: AppSpec,
    handlers: Option<Handlers>,
    bin_name: Option<String>,
}

impl AppBuilder {
    pub fn new(spec: AppSpec) -> Self {
        Self {
            spec,
            handlers: None,
            bin_name: None,
        }
    }

    /// Sets the handlers. A single handler serves every command.
    pub fn handlers(mut self, handlers: impl Into<Handlers>) -> Self {
        self.handlers = Some(handlers.into());
        self
    }

    /// Overrides the binary name shown in usage.
    pub fn bin_name(mut self, name: impl Into<String>) -> Self {
        self.bin_name = Some(name.into());
        self
    }

    /// Checks the description and handlers, then builds the app.
    pub fn build(self) -> Result<App, SetupError> {
        check_spec(&self.spec)?;
        let handlers = self.handlers.ok_or(SetupError::NoHandlers)?;
        check_handlers(&self.spec, &handlers)?;

        Ok(App {
            spec: self.spec,
            handlers,
            bin_name: self.bin_name,
        })
    }
}

fn check_spec(spec: &AppSpec) -> Result<(), SetupError> {
    if !spec.commands.is_empty() && !spec.groups.is_empty() {
        return Err(SetupError::ConflictingShape);
    }

    let base: Vec<&OptionSpec> = spec.options.iter().collect();
    let system = system_options(spec);
    let system: Vec<&OptionSpec> = system.iter().collect();
    check_unique(&[&base, &system], "app options")?;

    for command in &spec.commands {
        let own: Vec<&OptionSpec> = command.options.iter().collect();
        check_unique(&[&base, &own, &system], &format!("command `{}`", command.name))?;
    }
    for group in &spec.groups {
        for command in &group.commands {
            let own: Vec<&OptionSpec> = command.options.iter().collect();
            check_unique(
                &[&base, &own, &system],
                &format!("command `{} {}`", group.name, command.name),
            )?;
        }
        if let Some(default) = &group.default_command {
            if group.find_command(default).is_none() {
                return Err(SetupError::UnknownDefault(format!(
                    "group `{}` has no command `{}`",
                    group.name, default
                )));
            }
        }
    }

    if let Some(default) = &spec.default_group {
        if spec.find_group(default).is_none() {
            return Err(SetupError::UnknownDefault(format!("no group `{}`", default)));
        }
    }

    if let Some(default) = &spec.default_command {
        let known = match spec.shape() {
            Shape::Single => false,
            Shape::Commands => spec.find_command(default).is_some(),
            Shape::Groups => spec.groups.iter().any(|g| g.find_command(default).is_some()),
        };
        if !known {
            return Err(SetupError::UnknownDefault(format!("no command `{}`", default)));
        }
    }

    Ok(())
}

fn check_unique(parts: &[&Vec<&OptionSpec>], scope: &str) -> Result<(), SetupError> {
    let mut seen = HashSet::new();
    for option in parts.iter().flat_map(|part| part.iter()) {
        if !seen.insert(option.key()) {
            return Err(SetupError::DuplicateOption {
                option: option.name.clone(),
                scope: scope.to_string(),
            });
        }
    }
    Ok(())
}

fn check_handlers(spec: &AppSpec, handlers: &Handlers) -> Result<(), SetupError> {
    let expected = match spec.shape() {
        Shape::Single => HandlerShape::Single,
        Shape::Commands => HandlerShape::ByCommand,
        Shape::Groups => HandlerShape::ByGroup,
    };
    let found = handlers.shape();
    if found != HandlerShape::Single && found != expected {
        return Err(SetupError::HandlerShape {
            expected: expected.to_string(),
            found: found.to_string(),
        });
    }

    let paths: Vec<Vec<String>> = match spec.shape() {
        Shape::Single => vec![Vec::new()],
        Shape::Commands => spec
            .commands
            .iter()
            .map(|c| vec![c.name.clone()])
            .collect(),
        Shape::Groups => spec
            .groups
            .iter()
            .flat_map(|g| g.commands.iter().map(|c| vec![g.name.clone(), c.name.clone()]))
            .collect(),
    };
    for path in paths {
        if handlers.resolve(&path).is_none() {
            return Err(SetupError::MissingHandler(path_to_string(&path)));
        }
    }
    Ok(())
}
