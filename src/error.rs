//! Shared error taxonomy.
//!
//! Every fallible operation in the crate returns [`VoiceAuthError`]. Keeping
//! one enum here — rather than a per-component exception hierarchy — avoids
//! the cyclic `Phoneme` ↔ validator reference the original implementation
//! had: the phoneme type stays a plain value and never needs to name its own
//! error type.

use thiserror::Error;

use crate::phoneme::Phoneme;

/// Categorical error for every stage of the enroll/verify pipeline.
#[derive(Debug, Error)]
pub enum VoiceAuthError {
    #[error("audio path not found: {0}")]
    NotFound(String),

    #[error("unsupported audio format: {0}")]
    UnsupportedFormat(String),

    #[error("failed to decode audio: {0}")]
    DecodeError(String),

    #[error("audio sample is empty")]
    EmptyAudio,

    #[error("insufficient speech duration: {actual:.3}s < {min:.3}s")]
    InsufficientDuration { actual: f32, min: f32 },

    #[error("passphrase transcript is empty")]
    EmptyPassphrase,

    #[error(
        "insufficient unique phonemes: {} < {min_required}",
        phoneme.unique_count()
    )]
    InsufficientPhoneme { phoneme: Phoneme, min_required: usize },

    #[error("phoneme sequences {i} and {j} disagree: normalized edit distance {distance:.3}")]
    PhonemeInconsistency { i: usize, j: usize, distance: f32 },

    #[error("model load failed: {0}")]
    ModelLoadError(String),

    #[error("embedding extraction failed: {0}")]
    EmbeddingExtraction(String),

    #[error("speech recognition failed: {0}")]
    RecognitionError(String),

    #[error("no samples have been enrolled")]
    NoSamples,
}
