//! tailwatch - tail every file in a directory

use cli_lib::{logging, Cli, Settings};
use std::process::ExitCode;
use tracing::error;

fn main() -> ExitCode {
    let cli = Cli::parse_args();

    let settings = match Settings::load(&cli) {
        Ok(settings) => settings,
        Err(err) => {
            let _ = logging::init(cli.debug, None);
            error!("{err:#}");
            return ExitCode::FAILURE;
        }
    };

    let _guard = match logging::init(settings.debug, settings.log_file.as_deref()) {
        Ok(guard) => guard,
        Err(err) => {
            eprintln!("{err:#}");
            return ExitCode::FAILURE;
        }
    };

    match cli_lib::run(settings) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}
