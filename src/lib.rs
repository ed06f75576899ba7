//! pwmsound converts sound files into C headers of PWM duty-cycle tables.
//!
//! Firmware without an audio codec can play the tables back directly: every
//! value is a duty cycle in `0..=1088`, one per sample at 22050 Hz.
//! Decoding is delegated to an external transcoder (`ffmpeg` by default).
//!
//! # Examples
//!
//! Quantize raw PCM and render the header text.
//! ```
//! use pwmsound::{parse_s16le, to_pwm_samples, SoundHeader};
//!
//! let pcm = [0x00, 0x80, 0x00, 0x00, 0xff, 0x7f];
//! let samples = parse_s16le(&pcm).unwrap();
//! let values = to_pwm_samples(&samples);
//! let text = SoundHeader::new("01.mp3").render(&values);
//!
//! assert!(text.contains("    0x0000, 0x0220, 0x0440\n"));
//! assert!(text.contains("const size_t sound_01_size = 3;"));
//! ```
//!
//! Convert a whole directory.
//! ```no_run
//! use pwmsound::{convert_all, Ffmpeg};
//! use std::path::Path;
//!
//! # fn main() -> anyhow::Result<()> {
//! let summary = convert_all(
//!     Path::new("sounds"),
//!     Path::new("include"),
//!     &Ffmpeg::default(),
//!     &mut std::io::stdout(),
//! )?;
//! println!("{summary:?}");
//! # Ok(())
//! # }
//! ```

pub mod batch;
pub mod decoder;
mod error;
pub mod header;
pub mod pcm;
pub mod pwm;

pub use batch::{convert_all, convert_file, discover, Converted, Summary};
pub use decoder::{Decode, Ffmpeg, DECODER_GAIN, SAMPLE_RATE};
pub use error::{ConvertError, DecodeError, PcmError};
pub use header::{render_index, SoundHeader, INDEX_ENTRIES};
pub use pcm::parse_s16le;
pub use pwm::{to_pwm, to_pwm_samples, PwmValue, PWM_MAX};
