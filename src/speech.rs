//! Speech synthesis settings and voice selection.
//!
//! The synthesizer itself is external; this module only decides what to
//! ask it for. Text is prepared with [`crate::to_speech_text`].

use serde::{Deserialize, Serialize};

/// Settings for one utterance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeechConfig {
    /// Preferred voice id; falls back to the built-in priority when absent
    pub voice_id: Option<String>,

    /// Speaking rate (0.1 - 10)
    pub rate: f32,

    /// Voice pitch (0 - 2)
    pub pitch: f32,

    /// Volume (0 - 1)
    pub volume: f32,
}

impl SpeechConfig {
    /// Create a config with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the preferred voice.
    pub fn with_voice(mut self, voice_id: impl Into<String>) -> Self {
        self.voice_id = Some(voice_id.into());
        self
    }

    /// Set the speaking rate.
    pub fn with_rate(mut self, rate: f32) -> Self {
        self.rate = rate;
        self
    }

    /// Set the pitch.
    pub fn with_pitch(mut self, pitch: f32) -> Self {
        self.pitch = pitch;
        self
    }

    /// Set the volume.
    pub fn with_volume(mut self, volume: f32) -> Self {
        self.volume = volume;
        self
    }

    /// Copy of the config with every value inside the synthesizer's range.
    /// Non-finite values fall back to the defaults.
    pub fn clamped(&self) -> Self {
        let defaults = Self::default();
        let clamp = |value: f32, fallback: f32, min: f32, max: f32| {
            if value.is_finite() {
                value.clamp(min, max)
            } else {
                fallback
            }
        };
        Self {
            voice_id: self.voice_id.clone(),
            rate: clamp(self.rate, defaults.rate, 0.1, 10.0),
            pitch: clamp(self.pitch, defaults.pitch, 0.0, 2.0),
            volume: clamp(self.volume, defaults.volume, 0.0, 1.0),
        }
    }

    /// Overlay the values set in `update`, keeping the rest.
    pub fn merge(&self, update: &SpeechConfigUpdate) -> Self {
        Self {
            voice_id: update.voice_id.clone().or_else(|| self.voice_id.clone()),
            rate: update.rate.unwrap_or(self.rate),
            pitch: update.pitch.unwrap_or(self.pitch),
            volume: update.volume.unwrap_or(self.volume),
        }
    }
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            voice_id: None,
            rate: 0.9,
            pitch: 1.0,
            volume: 0.8,
        }
    }
}

/// A partial settings change; unset fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeechConfigUpdate {
    /// New voice id
    pub voice_id: Option<String>,
    /// New rate
    pub rate: Option<f32>,
    /// New pitch
    pub pitch: Option<f32>,
    /// New volume
    pub volume: Option<f32>,
}

/// A voice offered by the synthesizer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Voice {
    /// Stable identifier
    pub id: String,
    /// Display name ("Google US English")
    pub name: String,
    /// BCP 47 language tag ("en-US")
    pub lang: String,
}

impl Voice {
    /// Create a voice description.
    pub fn new(id: impl Into<String>, name: impl Into<String>, lang: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            lang: lang.into(),
        }
    }
}

/// Pick the voice to speak with.
///
/// Priority: the configured voice id, a Google `en-US` voice, any Google
/// voice, any Microsoft voice, any English voice.
pub fn select_voice<'a>(voices: &'a [Voice], config: &SpeechConfig) -> Option<&'a Voice> {
    if let Some(ref id) = config.voice_id {
        if let Some(voice) = voices.iter().find(|v| &v.id == id) {
            return Some(voice);
        }
        log::debug!("Configured voice '{}' not available", id);
    }

    voices
        .iter()
        .find(|v| v.name.to_lowercase().contains("google") && v.lang.contains("en-US"))
        .or_else(|| voices.iter().find(|v| v.name.contains("Google")))
        .or_else(|| voices.iter().find(|v| v.name.contains("Microsoft")))
        .or_else(|| voices.iter().find(|v| v.lang.contains("en")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn voices() -> Vec<Voice> {
        vec![
            Voice::new("ms-david", "Microsoft David", "en-US"),
            Voice::new("g-de", "Google Deutsch", "de-DE"),
            Voice::new("g-us", "Google US English", "en-US"),
            Voice::new("alex", "Alex", "en-GB"),
        ]
    }

    #[test]
    fn test_defaults() {
        let config = SpeechConfig::default();
        assert_eq!(config.rate, 0.9);
        assert_eq!(config.pitch, 1.0);
        assert_eq!(config.volume, 0.8);
        assert!(config.voice_id.is_none());
    }

    #[test]
    fn test_select_configured_voice() {
        let voices = voices();
        let config = SpeechConfig::new().with_voice("alex");
        assert_eq!(select_voice(&voices, &config).unwrap().id, "alex");
    }

    #[test]
    fn test_select_priority() {
        let mut voices = voices();
        let config = SpeechConfig::new().with_voice("missing");
        assert_eq!(select_voice(&voices, &config).unwrap().id, "g-us");

        voices.retain(|v| v.id != "g-us");
        assert_eq!(select_voice(&voices, &config).unwrap().id, "g-de");

        voices.retain(|v| v.id != "g-de");
        assert_eq!(select_voice(&voices, &config).unwrap().id, "ms-david");

        voices.retain(|v| v.id != "ms-david");
        assert_eq!(select_voice(&voices, &config).unwrap().id, "alex");

        assert!(select_voice(&[], &config).is_none());
    }

    #[test]
    fn test_clamped() {
        let config = SpeechConfig::new()
            .with_rate(50.0)
            .with_pitch(f32::NAN)
            .with_volume(-1.0)
            .clamped();
        assert_eq!(config.rate, 10.0);
        assert_eq!(config.pitch, 1.0);
        assert_eq!(config.volume, 0.0);
    }

    #[test]
    fn test_merge_and_partial_json() {
        let update: SpeechConfigUpdate = serde_json::from_str(r#"{"rate": 1.2}"#).unwrap();
        let merged = SpeechConfig::default().merge(&update);
        assert_eq!(merged.rate, 1.2);
        assert_eq!(merged.volume, 0.8);

        let config: SpeechConfig = serde_json::from_str(r#"{"pitch": 1.5}"#).unwrap();
        assert_eq!(config.rate, 0.9);
        assert_eq!(config.pitch, 1.5);
    }
}
