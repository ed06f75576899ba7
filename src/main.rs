use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use pwmsound::{convert_all, Ffmpeg};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Convert the MP3 files of a directory into C headers of PWM tables.
#[derive(Parser)]
#[command(name = "convert", version, about)]
struct Opts {
    /// Directory containing the .mp3 files.
    sounds_dir: PathBuf,
    /// Directory receiving sound_<name>.h and sounds.h. Created if missing.
    output_dir: PathBuf,
    /// Transcoder executable.
    #[arg(long, env = "PWMSOUND_DECODER", default_value = pwmsound::decoder::DEFAULT_PROGRAM)]
    decoder: PathBuf,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let opts = match Opts::try_parse() {
        Ok(opts) => opts,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => {
            tracing::debug!(error = %e, "invalid arguments");
            println!("{}", Opts::command().render_usage());
            std::process::exit(1);
        }
    };

    let decoder = Ffmpeg::new(opts.decoder);
    let mut stdout = std::io::stdout().lock();
    convert_all(&opts.sounds_dir, &opts.output_dir, &decoder, &mut stdout).with_context(|| {
        format!(
            "converting {} into {}",
            opts.sounds_dir.display(),
            opts.output_dir.display()
        )
    })?;
    Ok(())
}
