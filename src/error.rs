use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;

/// Error type for raw PCM buffers.
#[derive(Debug, thiserror::Error)]
pub enum PcmError {
    #[error("PCM buffer has an odd length ({len} bytes); 16-bit samples need an even byte count")]
    OddLength { len: usize },
    #[error("PCM buffer could not be parsed as 16-bit little endian samples")]
    Malformed,
}

/// Error type for the external transcoder.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("failed to create scratch file: {0}")]
    Scratch(#[source] io::Error),
    #[error("failed to run {program}: {source}")]
    Spawn {
        program: PathBuf,
        #[source]
        source: io::Error,
    },
    /// The decoder exited with a non-zero status. Displays the tool's own diagnostics.
    #[error("{stderr}")]
    Failed { status: ExitStatus, stderr: String },
    #[error("failed to read decoded PCM from {path}: {source}")]
    ReadScratch {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Error type for converting sound files into headers.
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error(transparent)]
    Pcm(#[from] PcmError),
    #[error("{path} has no file name")]
    NoFileName { path: PathBuf },
    #[error("failed to write {path}: {source}")]
    WriteHeader {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to create output directory {path}: {source}")]
    CreateOutputDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write index header {path}: {source}")]
    WriteIndex {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write report: {0}")]
    Report(#[source] io::Error),
}
