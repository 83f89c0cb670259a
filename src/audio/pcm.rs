/// The canonical sample rate every loaded clip is resampled to.
pub const TARGET_SAMPLE_RATE: u32 = 16_000;

/// Mono 16-bit PCM audio at [`TARGET_SAMPLE_RATE`].
///
/// Every [`AudioDecoder`](crate::audio::AudioDecoder) implementation is
/// expected to hand back audio already in this shape — downstream stages
/// (VAD, ASR, the embedder) never resample or remix.
#[derive(Debug, Clone)]
pub struct PcmAudio {
    pub samples: Vec<i16>,
    pub sample_rate: u32,
}

impl PcmAudio {
    pub fn new(samples: Vec<i16>, sample_rate: u32) -> Self {
        Self { samples, sample_rate }
    }

    /// Samples normalized to `[-1.0, 1.0]`, computed on demand rather than
    /// cached alongside the `i16` buffer.
    pub fn samples_f32(&self) -> Vec<f32> {
        self.samples.iter().map(|&s| s as f32 / 32768.0).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn duration_seconds(&self) -> f32 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.samples.len() as f32 / self.sample_rate as f32
    }
}
