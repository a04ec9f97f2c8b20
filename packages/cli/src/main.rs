use std::path::PathBuf;
use std::process::ExitCode;

use bkt_cli::config::Config;
use bkt_cli::logging::init_tracing;
use bkt_cli::response::CliError;
use bkt_cli::{read_input, run, Command, USAGE};

fn parse_args() -> Result<(Command, Option<PathBuf>), CliError> {
    let mut args = std::env::args().skip(1);
    let command = args
        .next()
        .as_deref()
        .and_then(Command::from_str)
        .ok_or_else(|| CliError::Usage(USAGE.to_string()))?;
    let path = args.next().map(PathBuf::from);
    if args.next().is_some() {
        return Err(CliError::Usage(USAGE.to_string()));
    }
    Ok((command, path))
}

fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    let config = Config::from_env();
    let _log_guard = init_tracing(&config.log_level);

    let result = parse_args().and_then(|(command, path)| {
        let body = read_input(path.as_deref())?;
        tracing::debug!(?command, bytes = body.len(), "request received");
        run(command, &body, &config)
    });

    match result {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!(error = %err, code = err.code(), "request failed");
            match serde_json::to_string(&err.to_response()) {
                Ok(body) => println!("{body}"),
                Err(_) => eprintln!("{err}"),
            }
            ExitCode::from(err.exit_code() as u8)
        }
    }
}
