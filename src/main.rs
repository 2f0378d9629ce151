use anyhow::Result;
use clap::Parser;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use yt_transcript::{fetch_from_youtube, output, utils, Config, FileCli, Outcome, TranscriptError};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = match FileCli::try_parse() {
        Ok(cli) => cli,
        Err(err) if !err.use_stderr() => err.exit(),
        Err(err) => {
            err.print()?;
            std::process::exit(1);
        }
    };

    utils::init_tracing("yt_transcript=info", cli.verbose);

    let progress = spinner(cli.quiet);
    progress.set_message(format!("Fetching transcript for {}...", cli.video_id));

    let outcome = fetch(&cli).await;
    progress.finish_and_clear();

    output::save_to_file(&outcome, &cli.output_file)?;

    let status = output::file_status(&outcome);
    match outcome {
        Ok(Some(_)) => println!("{}", style(status).green()),
        _ => println!("{}", style(status).yellow()),
    }

    Ok(())
}

async fn fetch(cli: &FileCli) -> Outcome {
    let config = Config::load().map_err(|err| TranscriptError::Other(format!("{:#}", err)))?;
    let policy = cli.selection.policy(&config.defaults.file_policy);

    tracing::info!("Starting transcript fetch for: {}", cli.video_id);
    fetch_from_youtube(&config.http, &cli.video_id, &policy).await
}

fn spinner(quiet: bool) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }

    let progress = ProgressBar::new_spinner();
    if let Ok(template) = ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed_precise}] {msg}") {
        progress.set_style(template);
    }
    progress.enable_steady_tick(Duration::from_millis(120));
    progress
}
