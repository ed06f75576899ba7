//! External transcoder invocation.
//!
//! The transcoder writes mono, 22050 Hz, signed 16-bit little endian PCM into a
//! scratch file which is read back and removed again, whatever the outcome.

use crate::error::DecodeError;
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::thread;
use std::time::Duration;

/// Output sample rate in Hz.
pub const SAMPLE_RATE: u32 = 22050;

/// Output channel count.
pub const NUM_CHANNELS: u16 = 1;

/// Volume multiplier applied by the transcoder before quantization.
pub const DECODER_GAIN: u32 = 2;

/// Default transcoder program, looked up on `PATH`.
pub const DEFAULT_PROGRAM: &str = "ffmpeg";

/// Decodes an audio file into raw signed 16-bit little endian PCM bytes.
pub trait Decode {
    fn decode(&self, input: &Path) -> Result<Vec<u8>, DecodeError>;
}

/// Decoder backed by an `ffmpeg` compatible command line tool.
#[derive(Debug, Clone)]
pub struct Ffmpeg {
    program: PathBuf,
}

impl Default for Ffmpeg {
    fn default() -> Self {
        Ffmpeg::new(DEFAULT_PROGRAM)
    }
}

impl Ffmpeg {
    /// * 'program' - Name or path of the transcoder executable.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Ffmpeg {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Arguments requesting the fixed output format, writing to `output`.
    pub fn args(input: &Path, output: &Path) -> Vec<OsString> {
        vec![
            "-i".into(),
            input.into(),
            "-ar".into(),
            SAMPLE_RATE.to_string().into(),
            "-ac".into(),
            NUM_CHANNELS.to_string().into(),
            "-af".into(),
            format!("volume={DECODER_GAIN}").into(),
            "-f".into(),
            "s16le".into(),
            "-y".into(),
            output.into(),
        ]
    }
}

impl Decode for Ffmpeg {
    fn decode(&self, input: &Path) -> Result<Vec<u8>, DecodeError> {
        // Removed when dropped, on every return path below.
        let scratch = tempfile::Builder::new()
            .prefix("pwmsound-")
            .suffix(".pcm")
            .tempfile()
            .map_err(DecodeError::Scratch)?
            .into_temp_path();

        let args = Ffmpeg::args(input, &scratch);
        tracing::debug!(
            program = %self.program.display(),
            ?args,
            "running decoder"
        );

        let mut command = Command::new(&self.program);
        command.args(&args);
        let output = run(&mut command).map_err(|source| DecodeError::Spawn {
            program: self.program.clone(),
            source,
        })?;

        if !output.status.success() {
            return Err(DecodeError::Failed {
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        fs::read(&scratch).map_err(|source| DecodeError::ReadScratch {
            path: scratch.to_path_buf(),
            source,
        })
    }
}

/// Run `command` to completion, capturing its output.
///
/// Retries a few times on `ETXTBUSY`, which a freshly written executable can
/// report while another process still holds it open for writing.
fn run(command: &mut Command) -> io::Result<Output> {
    let mut attempts = 0u32;
    loop {
        match command.output() {
            Ok(output) => return Ok(output),
            Err(err) => {
                #[cfg(unix)]
                let should_retry = err.raw_os_error() == Some(26); // ETXTBUSY
                #[cfg(not(unix))]
                let should_retry = false;

                if should_retry && attempts < 3 {
                    attempts += 1;
                    thread::sleep(Duration::from_millis(10 * u64::from(attempts)));
                    continue;
                }
                return Err(err);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn argument_order() {
        let args = Ffmpeg::args(Path::new("sounds/01.mp3"), Path::new("/tmp/x.pcm"));
        let args: Vec<&str> = args.iter().map(|a| a.to_str().unwrap()).collect();
        assert_eq!(
            args,
            [
                "-i",
                "sounds/01.mp3",
                "-ar",
                "22050",
                "-ac",
                "1",
                "-af",
                "volume=2",
                "-f",
                "s16le",
                "-y",
                "/tmp/x.pcm",
            ]
        );
    }

    #[test]
    fn missing_program_is_a_spawn_error() {
        let decoder = Ffmpeg::new("/nonexistent/pwmsound-no-such-decoder");
        let r = decoder.decode(Path::new("01.mp3"));
        assert!(matches!(r, Err(DecodeError::Spawn { .. })));
    }

    #[test]
    fn default_program() {
        assert_eq!(Ffmpeg::default().program(), Path::new("ffmpeg"));
    }

    #[cfg(unix)]
    mod script {
        use super::*;
        use std::os::unix::fs::PermissionsExt;

        /// Writes a stand-in transcoder that records its output path in `seen`.
        fn fake_decoder(dir: &Path, body: &str) -> (PathBuf, PathBuf) {
            let seen = dir.join("seen");
            let script = dir.join("fake-ffmpeg");
            let text = format!(
                "#!/bin/sh\nfor last; do :; done\necho \"$last\" > '{}'\n{body}\n",
                seen.display()
            );
            fs::write(&script, text).unwrap();
            fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();
            (script, seen)
        }

        fn recorded_scratch(seen: &Path) -> PathBuf {
            PathBuf::from(fs::read_to_string(seen).unwrap().trim_end())
        }

        #[test]
        fn success_returns_bytes_and_removes_scratch() {
            let dir = tempfile::tempdir().unwrap();
            let (script, seen) =
                fake_decoder(dir.path(), "printf '\\000\\200\\377\\177' > \"$last\"");

            let bytes = Ffmpeg::new(&script).decode(Path::new("a.mp3")).unwrap();
            assert_eq!(bytes, [0x00, 0x80, 0xff, 0x7f]);

            let scratch = recorded_scratch(&seen);
            assert!(scratch.to_string_lossy().ends_with(".pcm"));
            assert!(!scratch.exists());
        }

        #[test]
        fn failure_carries_stderr_and_removes_scratch() {
            let dir = tempfile::tempdir().unwrap();
            let (script, seen) = fake_decoder(
                dir.path(),
                "printf 'partial' > \"$last\"\necho 'b.MP3: Invalid data found' >&2\nexit 1",
            );

            let r = Ffmpeg::new(&script).decode(Path::new("b.MP3"));
            match r {
                Err(DecodeError::Failed { status, stderr }) => {
                    assert_eq!(status.code(), Some(1));
                    assert_eq!(stderr, "b.MP3: Invalid data found\n");
                }
                other => panic!("expected decoder failure, got {other:?}"),
            }
            assert!(!recorded_scratch(&seen).exists());
        }

        #[test]
        fn unreadable_output_removes_scratch() {
            let dir = tempfile::tempdir().unwrap();
            let (script, seen) = fake_decoder(dir.path(), "rm -f \"$last\"");

            let r = Ffmpeg::new(&script).decode(Path::new("a.mp3"));
            assert!(matches!(r, Err(DecodeError::ReadScratch { .. })));
            assert!(!recorded_scratch(&seen).exists());
        }
    }
}
