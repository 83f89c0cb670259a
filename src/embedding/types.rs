/// A 192-dimensional speaker embedding vector.
///
/// The wire format is raw little-endian float32, with no header or length
/// prefix — the caller is expected to track dimensionality out of band
/// (it's fixed by the embedding model), mirroring the original's plain
/// `numpy` `tobytes()`/`frombuffer()` round-trip.
#[derive(Debug, Clone, PartialEq)]
pub struct Embedding(Vec<f32>);

impl Embedding {
    pub fn new(values: Vec<f32>) -> Self {
        Self(values)
    }

    pub fn values(&self) -> &[f32] {
        &self.0
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.0.len() * 4);
        for v in &self.0 {
            bytes.extend_from_slice(&v.to_le_bytes());
        }
        bytes
    }

    pub fn from_bytes(bytes: &[u8]) -> Self {
        let values = bytes
            .chunks_exact(4)
            .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
            .collect();
        Self(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bytes_round_trip_preserves_values() {
        let embedding = Embedding::new(vec![0.1, -0.2, 3.5, 0.0]);
        let bytes = embedding.to_bytes();
        let restored = Embedding::from_bytes(&bytes);
        assert_eq!(embedding, restored);
    }

    #[test]
    fn byte_length_is_four_times_dimension() {
        let embedding = Embedding::new(vec![0.0; 192]);
        assert_eq!(embedding.to_bytes().len(), 192 * 4);
    }
}
