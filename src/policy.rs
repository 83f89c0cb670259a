use serde::{Deserialize, Serialize};

/// Acceptance thresholds and duration/phoneme floors shared by enrollment
/// and verification.
///
/// Holds no heap state, so cloning it into an [`Enroller`](crate::Enroller)
/// or [`Verifier`](crate::Verifier) is free, and a policy change after an
/// `Enroller`/`Verifier` is created can never retroactively affect a
/// session already in flight.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PolicyConfig {
    /// Minimum cosine similarity between a verification sample and the
    /// enrolled mean embedding for the speaker to be accepted.
    pub cosine_threshold: f32,
    /// Minimum speech duration, after VAD, required from any sample.
    pub min_speech_seconds: f32,
    /// Minimum distinct phonemes an enrollment sample's transcript must
    /// contain. `None` disables the phonetic (passphrase-content) policy
    /// entirely — verification then checks speaker identity only.
    pub min_unique_phonemes: Option<usize>,
    /// Maximum normalized edit distance between a verification sample's
    /// phoneme sequence and the enrolled reference for the passphrase to
    /// be accepted. Only consulted when the phonetic policy is active.
    pub phoneme_threshold: Option<f32>,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            cosine_threshold: 0.5,
            min_speech_seconds: 3.0,
            min_unique_phonemes: Some(5),
            phoneme_threshold: None,
        }
    }
}

impl PolicyConfig {
    /// Whether any passphrase-content (phonetic) check is active — either
    /// the unique-phoneme floor or the verification-time edit-distance
    /// threshold is enough to require running ASR and phoneme extraction
    /// on every sample.
    pub fn phonetic_policy_active(&self) -> bool {
        self.min_unique_phonemes.is_some() || self.phoneme_threshold.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_policy_enables_phonetic_check() {
        let policy = PolicyConfig::default();
        assert!(policy.phonetic_policy_active());
    }
}
