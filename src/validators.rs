//! Passphrase-content policy checks over extracted phoneme sequences.

use crate::error::VoiceAuthError;
use crate::math::normalized_edit_distance;
use crate::phoneme::Phoneme;

/// Rejects a phoneme sequence with fewer than `min_required` distinct
/// phonemes. Equality passes.
pub fn check_unique_phonemes(phoneme: &Phoneme, min_required: usize) -> Result<(), VoiceAuthError> {
    if phoneme.unique_count() < min_required {
        return Err(VoiceAuthError::InsufficientPhoneme {
            phoneme: phoneme.clone(),
            min_required,
        });
    }
    Ok(())
}

/// Rejects an enrollment sample set whose phoneme sequences disagree with
/// each other by more than `max_distance`.
///
/// Scans pairs in row-major `(i, j)` order with `i < j` and returns on the
/// first violation found, naming the offending pair.
pub fn check_phoneme_consistency(phonemes: &[Phoneme], max_distance: f32) -> Result<(), VoiceAuthError> {
    for i in 0..phonemes.len() {
        for j in (i + 1)..phonemes.len() {
            let distance = normalized_edit_distance(phonemes[i].values(), phonemes[j].values());
            if distance > max_distance {
                return Err(VoiceAuthError::PhonemeInconsistency { i, j, distance });
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unique_phoneme_check_passes_at_exact_minimum() {
        let p = Phoneme::new(vec!["a".into(), "i".into(), "u".into()]);
        assert!(check_unique_phonemes(&p, 3).is_ok());
    }

    #[test]
    fn unique_phoneme_check_fails_below_minimum() {
        let p = Phoneme::new(vec!["a".into(), "i".into()]);
        let err = check_unique_phonemes(&p, 3).unwrap_err();
        assert!(matches!(err, VoiceAuthError::InsufficientPhoneme { min_required: 3, .. }));
    }

    #[test]
    fn phoneme_consistency_passes_for_identical_sequences() {
        let p = Phoneme::new(vec!["a".into(), "i".into(), "u".into()]);
        let phonemes = vec![p.clone(), p.clone(), p];
        assert!(check_phoneme_consistency(&phonemes, 0.3).is_ok());
    }

    #[test]
    fn phoneme_consistency_flags_first_divergent_pair() {
        let a = Phoneme::new(vec!["a".into(), "i".into(), "u".into()]);
        let b = Phoneme::new(vec!["a".into(), "i".into(), "u".into()]);
        let c = Phoneme::new(vec!["x".into(), "y".into(), "z".into()]);
        let err = check_phoneme_consistency(&[a, b, c], 0.5).unwrap_err();
        assert!(matches!(err, VoiceAuthError::PhonemeInconsistency { i: 0, j: 2, .. }));
    }
}
