//! In-process test harness for stanza apps.
//!
//! [`TestCli`] runs an app against a command line string with a mock
//! environment and a capturing console, and hands back everything an
//! assertion needs: the printed output, the exit status and the outcome.
//!
//! ```rust
//! use stanza::{AppSpec, OptionSpec};
//! use stanza_dispatch::Handlers;
//! use stanza_test::{echo_args, TestCli};
//!
//! let spec = AppSpec::new().option(OptionSpec::string("foo"));
//! let cli = TestCli::build(spec, Handlers::single(echo_args())).unwrap();
//!
//! let result = cli.run_blocking("example-app --foo bar");
//! assert_eq!(result.exit_code, 0);
//! assert_eq!(result.args()["foo"], "bar");
//! ```

use serde_json::{json, Value};
use stanza::{App, AppSpec, MockConsole, Outcome, SetupError};
use stanza_dispatch::{handler, Handler, Handlers};
use stanza_input::MockEnv;

/// Builds an app and runs command lines against it.
#[derive(Debug)]
pub struct TestCli {
    app: App,
    env: MockEnv,
}

impl TestCli {
    /// Wraps an already built app.
    pub fn new(app: App) -> Self {
        Self {
            app,
            env: MockEnv::new(),
        }
    }

    /// Builds the app from a description and its handlers.
    pub fn build(spec: AppSpec, handlers: impl Into<Handlers>) -> Result<Self, SetupError> {
        let app = App::builder(spec).handlers(handlers).build()?;
        Ok(Self::new(app))
    }

    /// Sets an environment variable visible to every run.
    pub fn env(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.env = self.env.with_var(name, value);
        self
    }

    /// Runs one command line. Words are split on single spaces and the first
    /// one is the program name.
    pub async fn run(&self, command: &str) -> TestResult {
        let console = MockConsole::new();
        let outcome = self
            .app
            .execute(command.split(' '), &self.env, &console)
            .await;

        TestResult {
            output: console.output().trim_end().to_string(),
            exit_code: outcome.code(),
            outcome,
        }
    }

    /// [`run`](Self::run) on a fresh current-thread runtime.
    ///
    /// # Panics
    ///
    /// Panics if the runtime cannot be started.
    pub fn run_blocking(&self, command: &str) -> TestResult {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("failed to start test runtime");
        runtime.block_on(self.run(command))
    }
}

/// What one run produced.
#[derive(Debug)]
pub struct TestResult {
    /// Everything written to the console, joined by newlines, trailing
    /// whitespace removed.
    pub output: String,
    pub exit_code: u8,
    pub outcome: Outcome,
}

impl TestResult {
    /// The handler's value, or `Value::Null` when no handler ran.
    pub fn response(&self) -> &Value {
        self.outcome.response().unwrap_or(&Value::Null)
    }

    /// The `args` field of an [`echo_args`] response.
    pub fn args(&self) -> &Value {
        &self.response()["args"]
    }

    /// The `positional` field of an [`echo_args`] response.
    pub fn positional(&self) -> &Value {
        &self.response()["positional"]
    }

    /// The error messages of a failed run.
    pub fn errors(&self) -> Vec<String> {
        self.outcome.errors().iter().map(|e| e.to_string()).collect()
    }
}

/// A handler that returns what it received:
/// `{ "args": <options>, "positional": { "commands": [...] } }`.
pub fn echo_args() -> impl Handler + 'static {
    handler(|options, ctx| Ok(json!({ "args": options, "positional": ctx })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use stanza::{CommandSpec, OptionSpec};
    use stanza_dispatch::CommandHandlers;

    #[tokio::test]
    async fn run_captures_response() {
        let cli = TestCli::build(AppSpec::new(), Handlers::single(echo_args())).unwrap();
        let result = cli.run("example-app").await;

        assert_eq!(result.exit_code, 0);
        assert_eq!(result.args(), &json!({}));
        assert_eq!(result.positional(), &json!({ "commands": [] }));
        assert!(result.output.is_empty());
    }

    #[tokio::test]
    async fn run_captures_output() {
        let spec = AppSpec::new().option(OptionSpec::string("foo").required());
        let cli = TestCli::build(spec, Handlers::single(echo_args())).unwrap();
        let result = cli.run("example-app").await;

        assert_eq!(result.exit_code, 1);
        assert_eq!(result.response(), &Value::Null);
        assert_eq!(result.errors(), vec!["`foo` option is required"]);
        assert!(result.output.ends_with("`foo` option is required"));
    }

    #[tokio::test]
    async fn env_is_visible_to_runs() {
        let spec = AppSpec::new()
            .environment_prefix("MY_CLI")
            .command(CommandSpec::new("show", "Show").option(OptionSpec::string("name")));
        let cli = TestCli::build(spec, CommandHandlers::new().on("show", echo_args()))
            .unwrap()
            .env("MY_CLI_NAME", "ada");
        let result = cli.run("example-app show").await;

        assert_eq!(result.args(), &json!({ "name": "ada" }));
    }

    #[test]
    fn run_blocking_matches_run() {
        let cli = TestCli::build(AppSpec::new(), Handlers::single(echo_args())).unwrap();
        let result = cli.run_blocking("example-app");
        assert!(result.outcome.is_success());
    }
}
