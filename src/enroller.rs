use serde::{Deserialize, Serialize};
use tracing::info;

use crate::audio::AudioInput;
use crate::auth::FeaturePipeline;
use crate::embedding::Embedding;
use crate::error::VoiceAuthError;
use crate::math::{medoid, pairwise_distance_matrix};
use crate::phoneme::Phoneme;
use crate::validators::check_phoneme_consistency;

/// The opaque, persistable result of enrollment: a mean speaker embedding
/// and, when the phonetic policy is active, a reference phoneme sequence
/// to compare future verification attempts against.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrollmentArtifact {
    pub mean_embedding: Embedding,
    pub reference_phonemes: Option<Phoneme>,
}

/// Accumulates samples for one speaker and produces an [`EnrollmentArtifact`].
///
/// Not thread-safe for a single instance — `add_sample` takes `&mut self`,
/// so the borrow checker rejects concurrent calls at compile time. Separate
/// `Enroller` instances (e.g. one per speaker being enrolled concurrently)
/// are independent and safe to run on different threads.
pub struct Enroller {
    pipeline: FeaturePipeline,
    embeddings: Vec<Embedding>,
    phonemes: Vec<Phoneme>,
}

impl Enroller {
    pub(crate) fn new(pipeline: FeaturePipeline) -> Self {
        Self { pipeline, embeddings: Vec::new(), phonemes: Vec::new() }
    }

    /// Runs the shared feature pipeline over one more sample and keeps its
    /// embedding (and, if the phonetic policy is active, its phoneme
    /// sequence) for [`Enroller::finalize`].
    pub fn add_sample(&mut self, input: AudioInput) -> Result<(), VoiceAuthError> {
        let (embedding, phoneme) = self.pipeline.extract_passphrase(input)?;
        self.embeddings.push(embedding);
        if let Some(phoneme) = phoneme {
            self.phonemes.push(phoneme);
        }
        Ok(())
    }

    pub fn sample_count(&self) -> usize {
        self.embeddings.len()
    }

    /// Produces the enrollment artifact from every sample collected so far.
    ///
    /// The mean embedding is a plain elementwise average, deliberately not
    /// renormalized to unit length: cosine similarity is scale-invariant,
    /// so renormalizing would change nothing about verification outcomes
    /// while adding a step that could only introduce numerical error.
    ///
    /// When `phoneme_threshold` is configured, enrollment samples must
    /// mutually agree (via [`check_phoneme_consistency`]) before a medoid
    /// phoneme sequence is chosen as the stored reference.
    pub fn finalize(self) -> Result<EnrollmentArtifact, VoiceAuthError> {
        if self.embeddings.is_empty() {
            return Err(VoiceAuthError::NoSamples);
        }

        let mean_embedding = mean_embedding(&self.embeddings);

        let reference_phonemes = if let Some(max_distance) = self.pipeline.policy.phoneme_threshold {
            check_phoneme_consistency(&self.phonemes, max_distance)?;
            select_reference_phoneme(&self.phonemes)
        } else {
            None
        };

        info!(
            sample_count = self.embeddings.len(),
            has_reference_phonemes = reference_phonemes.is_some(),
            "enrollment finalized"
        );
        Ok(EnrollmentArtifact { mean_embedding, reference_phonemes })
    }
}

fn mean_embedding(embeddings: &[Embedding]) -> Embedding {
    let dim = embeddings[0].values().len();
    let mut sum = vec![0.0f32; dim];
    for embedding in embeddings {
        for (acc, v) in sum.iter_mut().zip(embedding.values()) {
            *acc += v;
        }
    }
    let n = embeddings.len() as f32;
    for v in sum.iter_mut() {
        *v /= n;
    }
    Embedding::new(sum)
}

/// The phoneme sequence minimizing total normalized edit distance to every
/// other sample, i.e. the most representative reading of the passphrase.
fn select_reference_phoneme(phonemes: &[Phoneme]) -> Option<Phoneme> {
    if phonemes.is_empty() {
        return None;
    }
    let values: Vec<Vec<String>> = phonemes.iter().map(|p| p.values().to_vec()).collect();
    let matrix = pairwise_distance_matrix(&values);
    medoid(&matrix).map(|idx| phonemes[idx].clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_embedding_averages_elementwise() {
        let a = Embedding::new(vec![1.0, 2.0, 3.0]);
        let b = Embedding::new(vec![3.0, 4.0, 5.0]);
        let mean = mean_embedding(&[a, b]);
        assert_eq!(mean.values(), &[2.0, 3.0, 4.0]);
    }

    #[test]
    fn select_reference_phoneme_picks_medoid() {
        let a = Phoneme::new(vec!["a".into(), "i".into(), "u".into()]);
        let b = Phoneme::new(vec!["a".into(), "i".into(), "u".into()]);
        let c = Phoneme::new(vec!["x".into(), "y".into(), "z".into()]);
        let chosen = select_reference_phoneme(&[a.clone(), b, c]).unwrap();
        assert_eq!(chosen, a);
    }

    #[test]
    fn select_reference_phoneme_on_empty_is_none() {
        assert!(select_reference_phoneme(&[]).is_none());
    }
}
