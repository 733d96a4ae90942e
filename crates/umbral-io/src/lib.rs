//! Audio file I/O for the umbral crusher.
//!
//! This crate provides:
//!
//! - **WAV file I/O**: [`read_wav_stereo`] / [`write_wav_stereo`] for the
//!   stereo pipeline, [`read_wav`] / [`write_wav`] for mono utility work
//! - **[`StereoSamples`]**: deinterleaved stereo buffers, the native
//!   in-memory format of the crusher
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use umbral_io::{read_wav_stereo, write_wav_stereo};
//!
//! let (samples, spec) = read_wav_stereo("input.wav")?;
//! // ... process samples.left / samples.right ...
//! write_wav_stereo("output.wav", &samples, spec)?;
//! ```

mod stereo;
mod wav;

pub use stereo::StereoSamples;
pub use wav::{
    WavFormat, WavInfo, WavSpec, read_wav, read_wav_info, read_wav_stereo, write_wav,
    write_wav_stereo,
};

/// Error types for audio I/O operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// WAV file read/write error.
    #[error("WAV file error: {0}")]
    Wav(#[from] hound::Error),

    /// Standard I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type for audio I/O operations.
pub type Result<T> = std::result::Result<T, Error>;
