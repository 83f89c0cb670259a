use serde::{Deserialize, Serialize};

/// An ordered phoneme sequence extracted from a transcript.
///
/// Fillers (`pau`, silence) and the geminate marker (`cl`) have already been
/// filtered out by the extractor that produced this value — downstream code
/// never needs to re-filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Phoneme {
    values: Vec<String>,
}

impl Phoneme {
    /// Wraps an already-filtered phoneme sequence.
    pub fn new(values: Vec<String>) -> Self {
        Self { values }
    }

    /// The sequence in utterance order, duplicates included.
    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// Distinct phoneme labels, order not significant.
    pub fn unique(&self) -> std::collections::HashSet<&str> {
        self.values.iter().map(String::as_str).collect()
    }

    /// Count of distinct phoneme labels.
    pub fn unique_count(&self) -> usize {
        self.unique().len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unique_count_deduplicates() {
        let p = Phoneme::new(vec!["a".into(), "i".into(), "a".into(), "u".into()]);
        assert_eq!(p.unique_count(), 3);
    }

    #[test]
    fn empty_phoneme_has_zero_unique() {
        let p = Phoneme::new(vec![]);
        assert_eq!(p.unique_count(), 0);
        assert!(p.is_empty());
    }
}
