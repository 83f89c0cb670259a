//! Text-dependent (passphrase) speaker verification for short Japanese
//! utterances.
//!
//! An enrolling application records a handful of samples of a speaker
//! reading a fixed passphrase, hands each to an [`Enroller`], then later
//! verifies a claimed speaker by handing one more sample to a [`Verifier`]
//! built from the resulting [`EnrollmentArtifact`]. Both stages run the
//! same pipeline: decode audio, isolate speech with voice activity
//! detection, optionally transcribe and phonemize the passphrase content,
//! and extract a speaker embedding.
//!
//! Every pipeline stage sits behind a trait (`AudioDecoder`,
//! `VoiceActivityDetector`, `SpeechRecognizer`, `PhonemeExtractor`,
//! `SpeakerEmbedderModel`) so enrollment/verification logic can be tested
//! without loading real ONNX models. [`models::Models::load`] wires up the
//! shipped ONNX-backed implementations from a resolved model directory.
//!
//! The crate emits [`tracing`] events but never initializes a subscriber —
//! that's left to the embedding application.

pub mod asr;
pub mod audio;
mod auth;
pub mod embedding;
pub mod enroller;
pub mod error;
pub mod math;
pub mod models;
pub mod phoneme;
pub mod policy;
pub mod vad;
pub mod validators;
pub mod verifier;

pub use auth::PassphraseAuth;
pub use enroller::{Enroller, EnrollmentArtifact};
pub use error::VoiceAuthError;
pub use models::Models;
pub use policy::PolicyConfig;
pub use verifier::{VerificationResult, Verifier};
