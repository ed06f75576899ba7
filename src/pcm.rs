//! Raw PCM buffers as written by the transcoder.

use crate::error::PcmError;
use winnow::binary::le_i16;
use winnow::combinator::repeat;
use winnow::error::ModalResult;
use winnow::Parser;

/// Bytes per sample of signed 16-bit PCM.
pub const BYTES_PER_SAMPLE: usize = 2;

fn parse_samples(input: &mut &[u8]) -> ModalResult<Vec<i16>> {
    repeat(0.., le_i16).parse_next(input)
}

/// Split a mono signed 16-bit little endian buffer into samples.
///
/// A trailing half sample is an error rather than being dropped.
pub fn parse_s16le(bytes: &[u8]) -> Result<Vec<i16>, PcmError> {
    if bytes.len() % BYTES_PER_SAMPLE != 0 {
        return Err(PcmError::OddLength { len: bytes.len() });
    }

    let mut input = bytes;
    let Ok(samples) = parse_samples(&mut input) else {
        return Err(PcmError::Malformed);
    };
    if !input.is_empty() {
        return Err(PcmError::Malformed);
    }
    Ok(samples)
}
