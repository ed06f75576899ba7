//! Converting a directory of sounds.

use crate::decoder::Decode;
use crate::error::ConvertError;
use crate::header::{render_index, SoundHeader, INDEX_FILE_NAME};
use crate::pcm::parse_s16le;
use crate::pwm::to_pwm_samples;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Extension of the input files, compared case-insensitively.
pub const INPUT_EXTENSION: &str = ".mp3";

/// One successfully written header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Converted {
    pub header_path: PathBuf,
    /// Size of the decoded PCM in bytes.
    pub pcm_len: usize,
    pub num_samples: usize,
}

/// Counts of one batch run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub attempted: usize,
    pub succeeded: usize,
}

/// List the input files of `sounds_dir`, sorted by file name.
pub fn discover(sounds_dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut names = Vec::new();
    for entry in fs::read_dir(sounds_dir)? {
        let name = entry?.file_name();
        if name
            .to_string_lossy()
            .to_lowercase()
            .ends_with(INPUT_EXTENSION)
        {
            names.push(name);
        }
    }
    names.sort();
    Ok(names.into_iter().map(|n| sounds_dir.join(n)).collect())
}

/// Decode `input` and write its header into `output_dir`.
pub fn convert_file(
    input: &Path,
    output_dir: &Path,
    decoder: &impl Decode,
) -> Result<Converted, ConvertError> {
    let Some(source_name) = input.file_name() else {
        return Err(ConvertError::NoFileName {
            path: input.to_path_buf(),
        });
    };
    let header = SoundHeader::new(&source_name.to_string_lossy());

    let pcm = decoder.decode(input)?;
    let samples = parse_s16le(&pcm)?;
    let values = to_pwm_samples(&samples);

    let header_path = output_dir.join(header.file_name());
    fs::write(&header_path, header.render(&values)).map_err(|source| {
        ConvertError::WriteHeader {
            path: header_path.clone(),
            source,
        }
    })?;

    Ok(Converted {
        header_path,
        pcm_len: pcm.len(),
        num_samples: values.len(),
    })
}

/// Convert every input file of `sounds_dir`, then write the index header.
///
/// Progress lines go to `report`. A file that fails is reported and skipped.
pub fn convert_all(
    sounds_dir: &Path,
    output_dir: &Path,
    decoder: &impl Decode,
    report: &mut impl Write,
) -> Result<Summary, ConvertError> {
    fs::create_dir_all(output_dir).map_err(|source| ConvertError::CreateOutputDir {
        path: output_dir.to_path_buf(),
        source,
    })?;

    let inputs = match discover(sounds_dir) {
        Ok(inputs) => inputs,
        Err(e) => {
            tracing::warn!(dir = %sounds_dir.display(), error = %e, "cannot list sounds directory");
            Vec::new()
        }
    };
    tracing::debug!(count = inputs.len(), "found input files");

    let mut summary = Summary::default();
    for input in &inputs {
        summary.attempted += 1;
        match convert_file(input, output_dir, decoder) {
            Ok(converted) => {
                summary.succeeded += 1;
                let name = converted
                    .header_path
                    .file_name()
                    .map(|n| n.to_string_lossy())
                    .unwrap_or_default();
                writeln!(report, "Generated {name} ({} bytes)", converted.pcm_len)
                    .map_err(ConvertError::Report)?;
            }
            Err(e) => {
                tracing::debug!(input = %input.display(), error = ?e, "skipping");
                writeln!(report, "Error converting {}: {e}", input.display())
                    .map_err(ConvertError::Report)?;
            }
        }
    }
    writeln!(report, "{}/{} converted", summary.succeeded, summary.attempted)
        .map_err(ConvertError::Report)?;

    let index_path = output_dir.join(INDEX_FILE_NAME);
    fs::write(&index_path, render_index()).map_err(|source| ConvertError::WriteIndex {
        path: index_path.clone(),
        source,
    })?;
    writeln!(report, "Generated {INDEX_FILE_NAME} index header").map_err(ConvertError::Report)?;

    Ok(summary)
}
