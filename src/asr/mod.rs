//! Offline speech recognition over a fixed token table.

mod recognizer;

pub use recognizer::{OfflineRecognizer, SpeechRecognizer};
