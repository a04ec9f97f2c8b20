pub mod config;
pub mod logging;
pub mod request;
pub mod response;

use std::io::Read;
use std::path::Path;

use crate::config::Config;
use crate::request::{handle_recommend, handle_replay, RecommendRequest, ReplayRequest};
use crate::response::CliError;

pub const USAGE: &str = "bkt-cli <recommend|replay> [FILE]  (reads stdin when FILE is omitted)";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Recommend,
    Replay,
}

impl Command {
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "recommend" => Some(Command::Recommend),
            "replay" => Some(Command::Replay),
            _ => None,
        }
    }
}

/// Read the request body from `path`, or from stdin when absent
pub fn read_input(path: Option<&Path>) -> Result<String, CliError> {
    match path {
        Some(path) => Ok(std::fs::read_to_string(path)?),
        None => {
            let mut body = String::new();
            std::io::stdin().read_to_string(&mut body)?;
            Ok(body)
        }
    }
}

/// Run one command against a JSON request body and return the JSON result
pub fn run(command: Command, body: &str, config: &Config) -> Result<String, CliError> {
    let output = match command {
        Command::Recommend => {
            let request: RecommendRequest = serde_json::from_str(body)?;
            serde_json::to_string(&handle_recommend(request, &config.recommend)?)?
        }
        Command::Replay => {
            let request: ReplayRequest = serde_json::from_str(body)?;
            serde_json::to_string(&handle_replay(request)?)?
        }
    };
    Ok(output)
}
