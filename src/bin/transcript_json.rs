use clap::Parser;
use std::process::ExitCode;

use yt_transcript::output::{self, JsonEnvelope};
use yt_transcript::{fetch_from_youtube, utils, Config, JsonCli, Outcome, TranscriptError};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = match JsonCli::try_parse() {
        Ok(cli) => cli,
        Err(err) if !err.use_stderr() => err.exit(),
        Err(err) => {
            let rendered = err.to_string();
            let message = rendered.lines().next().unwrap_or_default().trim_start_matches("error: ");
            return report(&JsonEnvelope::failure(message));
        }
    };

    utils::init_tracing("yt_transcript=warn", cli.verbose);

    let outcome = fetch(&cli).await;
    report(&JsonEnvelope::from_outcome(&outcome))
}

async fn fetch(cli: &JsonCli) -> Outcome {
    let config = Config::load().map_err(|err| TranscriptError::Other(format!("{:#}", err)))?;
    let policy = cli.selection.policy(&config.defaults.json_policy);
    let video = cli.video_id.as_deref().unwrap_or(&config.defaults.json_video_id);

    fetch_from_youtube(&config.http, video, &policy).await
}

fn report(envelope: &JsonEnvelope) -> ExitCode {
    if let Err(err) = output::print_json(envelope) {
        eprintln!("Failed to print result: {:#}", err);
        return ExitCode::FAILURE;
    }

    if envelope.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
