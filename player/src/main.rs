use clap::error::ErrorKind;
use clap::Parser;
use csrt_player::{exit_code, failure_message, run, Args};
use playtrack::PlaybackOutcome;
use std::panic;
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => {
            let _ = e.print();
            return ExitCode::from(1);
        }
    };

    match panic::catch_unwind(|| run(&args)) {
        Ok(result) => {
            if let Ok(PlaybackOutcome::Finished { frames_shown }) = &result {
                log::info!("Played {} frames", frames_shown);
            }
            if let Some(message) = failure_message(&result) {
                println!("{}", message);
            }
            ExitCode::from(exit_code(&result))
        }
        Err(_) => {
            println!("ERROR: unknown failure");
            ExitCode::from(2)
        }
    }
}
