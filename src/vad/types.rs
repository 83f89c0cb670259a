use crate::audio::PcmAudio;

/// One contiguous run of detected speech, in samples and seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeechSegment {
    pub start: usize,
    pub end: usize,
    pub start_sec: f32,
    pub end_sec: f32,
}

/// An ordered, non-overlapping run of [`SpeechSegment`]s.
#[derive(Debug, Clone, Default)]
pub struct SpeechSegments {
    pub segments: Vec<SpeechSegment>,
}

impl SpeechSegments {
    pub fn new(segments: Vec<SpeechSegment>) -> Self {
        Self { segments }
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Concatenates the speech-bearing slices of `audio` into one clip.
    ///
    /// Returns empty [`PcmAudio`] (not an error) when there are no
    /// segments — the caller's own duration check is what turns "no
    /// speech" into a rejected clip.
    pub fn extract_speech(&self, audio: &PcmAudio) -> PcmAudio {
        let mut samples = Vec::new();
        for segment in &self.segments {
            let end = segment.end.min(audio.samples.len());
            let start = segment.start.min(end);
            samples.extend_from_slice(&audio.samples[start..end]);
        }
        PcmAudio::new(samples, audio.sample_rate)
    }
}

/// Tunables for [`super::SileroVad`].
#[derive(Debug, Clone, Copy)]
pub struct VadConfig {
    pub threshold: f32,
    pub min_speech_duration: f32,
    pub min_silence_duration: f32,
}

impl Default for VadConfig {
    fn default() -> Self {
        Self {
            threshold: 0.5,
            min_speech_duration: 0.25,
            min_silence_duration: 0.5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_speech_concatenates_segments() {
        let audio = PcmAudio::new((0..100i16).collect(), 16_000);
        let segments = SpeechSegments::new(vec![
            SpeechSegment { start: 0, end: 10, start_sec: 0.0, end_sec: 0.0 },
            SpeechSegment { start: 50, end: 60, start_sec: 0.0, end_sec: 0.0 },
        ]);
        let extracted = segments.extract_speech(&audio);
        assert_eq!(extracted.samples.len(), 20);
        assert_eq!(extracted.samples[0], 0);
        assert_eq!(extracted.samples[10], 50);
    }

    #[test]
    fn extract_speech_with_no_segments_is_empty_not_error() {
        let audio = PcmAudio::new(vec![1, 2, 3], 16_000);
        let segments = SpeechSegments::default();
        let extracted = segments.extract_speech(&audio);
        assert!(extracted.is_empty());
    }

    #[test]
    fn extract_speech_clamps_end_past_audio_length() {
        let audio = PcmAudio::new(vec![1, 2, 3], 16_000);
        let segments = SpeechSegments::new(vec![SpeechSegment { start: 1, end: 100, start_sec: 0.0, end_sec: 0.0 }]);
        let extracted = segments.extract_speech(&audio);
        assert_eq!(extracted.samples, vec![2, 3]);
    }
}
