pub mod commands;
pub mod goal;
pub mod graph;
pub mod init;
pub mod log;
pub mod now;
pub mod stats;
pub mod status;
pub mod task;

pub use commands::*;

use serde_json::Value;

use crate::app::App;
use crate::config::Config;
use crate::error::TasquestError;
use crate::output;
use crate::store::JsonFileStore;

/// Per-invocation settings shared by every subcommand.
#[derive(Debug, Clone)]
pub struct Context {
    pub json: bool,
    pub config: Config,
}

impl Context {
    pub fn store(&self) -> JsonFileStore {
        JsonFileStore::new(&self.config.data_path)
    }

    pub fn open_app(&self) -> App {
        App::open(Box::new(self.store()))
    }
}

pub fn print_json(v: &Value) {
    println!("{}", serde_json::to_string_pretty(v).unwrap_or_default());
}

/// Turn a command result into an exit code, reporting errors in the chosen format.
pub fn finish(result: Result<i32, TasquestError>, json_output: bool) -> i32 {
    match result {
        Ok(code) => code,
        Err(e) => {
            if e.code.is_rejection() {
                tracing::debug!(code = e.code.as_str(), "change rejected");
            } else {
                tracing::info!(code = e.code.as_str(), error = %e, "command failed");
            }
            if json_output {
                print_json(&output::json::error(&e));
            } else {
                eprintln!("Error: {}", e.message);
            }
            1
        }
    }
}
