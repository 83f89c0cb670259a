use serde::{Deserialize, Serialize};
use tracing::info;

use crate::audio::AudioInput;
use crate::auth::FeaturePipeline;
use crate::enroller::EnrollmentArtifact;
use crate::error::VoiceAuthError;
use crate::math::{cosine_similarity, normalized_edit_distance};

/// Outcome of one verification attempt.
///
/// `phoneme_score` and `passphrase_accepted` are `None` whenever the
/// phonetic policy isn't active, or the enrollment artifact carries no
/// reference phoneme sequence to compare against — in that case `accepted`
/// reflects speaker identity alone.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VerificationResult {
    pub accepted: bool,
    pub speaker_score: f32,
    pub phoneme_score: Option<f32>,
    pub passphrase_accepted: Option<bool>,
}

/// Verifies one sample against a previously enrolled speaker.
pub struct Verifier {
    pipeline: FeaturePipeline,
    artifact: EnrollmentArtifact,
}

impl Verifier {
    pub(crate) fn new(pipeline: FeaturePipeline, artifact: EnrollmentArtifact) -> Self {
        Self { pipeline, artifact }
    }

    /// Runs the shared feature pipeline over `input` and compares it
    /// against the enrolled artifact: cosine similarity for speaker
    /// identity (inclusive `>=` threshold), and — when both a
    /// `phoneme_threshold` policy and a stored reference phoneme sequence
    /// are present — normalized edit distance for passphrase content
    /// (inclusive `<=` threshold). Both checks must pass for overall
    /// acceptance.
    pub fn verify(&self, input: AudioInput) -> Result<VerificationResult, VoiceAuthError> {
        let (embedding, phoneme) = self.pipeline.extract_passphrase(input)?;

        let speaker_score = cosine_similarity(embedding.values(), self.artifact.mean_embedding.values());
        let speaker_accepted = speaker_score >= self.pipeline.policy.cosine_threshold;

        let (phoneme_score, passphrase_accepted) = match (
            self.pipeline.policy.phoneme_threshold,
            &self.artifact.reference_phonemes,
            &phoneme,
        ) {
            (Some(threshold), Some(reference), Some(phoneme)) => {
                let score = normalized_edit_distance(phoneme.values(), reference.values());
                (Some(score), Some(score <= threshold))
            }
            _ => (None, None),
        };

        let accepted = speaker_accepted && passphrase_accepted.unwrap_or(true);

        info!(accepted, speaker_score, "verification complete");
        Ok(VerificationResult { accepted, speaker_score, phoneme_score, passphrase_accepted })
    }
}
