//! `example-app`: a two-group demo of a stanza app.
//!
//! ```text
//! example-app users show --name ada
//! MY_CLI_NAME=ada example-app users show
//! EXPLICIT_NAME=ada example-app users show
//! example-app util fix
//! example-app --help
//! ```
//!
//! Diagnostics go to stderr; set `RUST_LOG=debug` to follow the pipeline.

use std::process::ExitCode;

use serde_json::{json, Value};
use stanza::{handler, App, AppSpec, GroupHandlers, Outcome};
use tracing_subscriber::EnvFilter;

fn spec() -> Result<AppSpec, serde_json::Error> {
    let spec: AppSpec = serde_json::from_value(json!({
        "description": "My cli",
        "environmentPrefix": "MY_CLI",
        "groups": [
            {
                "name": "users",
                "description": "Users",
                "commands": [
                    {
                        "name": "show",
                        "description": "Show thing",
                        "options": [{
                            "name": "name",
                            "description": "Name of thing",
                            "required": true,
                            "environmentName": "EXPLICIT_NAME"
                        }]
                    },
                    { "name": "list", "description": "List things" }
                ]
            },
            {
                "name": "util",
                "description": "Utils",
                "commands": [
                    { "name": "fix", "description": "Fix things" },
                    { "name": "break", "description": "Break things" }
                ]
            }
        ]
    }))?;
    Ok(spec.version(env!("CARGO_PKG_VERSION")))
}

fn handlers() -> GroupHandlers {
    GroupHandlers::new()
        .group("users", |g| {
            g.on(
                "show",
                handler(|options, _ctx| {
                    let name = options.get_str("name").unwrap_or_default();
                    Ok(format!("showing {}!", name))
                }),
            )
            .on("list", handler(|_options, _ctx| Ok(vec!["ada", "grace"])))
        })
        .group("util", |g| {
            g.on("fix", handler(|_options, _ctx| Ok("fixed things")))
                .on("break", handler(|_options, _ctx| Ok("broke things")))
        })
}

fn app() -> anyhow::Result<App> {
    Ok(App::builder(spec()?).handlers(handlers()).build()?)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

fn print_response(value: &Value) {
    match value {
        Value::Null => {}
        Value::String(text) => println!("{}", text),
        other => match serde_json::to_string_pretty(other) {
            Ok(text) => println!("{}", text),
            Err(err) => tracing::warn!(error = %err, "could not print response"),
        },
    }
}

fn main() -> ExitCode {
    init_tracing();

    let app = match app() {
        Ok(app) => app,
        Err(err) => {
            eprintln!("example-app: {:#}", err);
            return ExitCode::FAILURE;
        }
    };

    match app.run() {
        Ok(outcome) => {
            if let Outcome::Success(value) = &outcome {
                print_response(value);
            }
            outcome.exit_code()
        }
        Err(err) => {
            eprintln!("example-app: {}", err);
            ExitCode::FAILURE
        }
    }
}
