//! Encoding configuration for rendered clips.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// FFmpeg encoding parameters for intermediate clip renders.
///
/// Intermediate clips must share these settings so the assembler can
/// stream-copy them into one file without re-encoding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct EncodingConfig {
    /// Video codec (e.g. "libx264").
    #[serde(default = "default_codec")]
    pub codec: String,
    /// Encoder preset.
    #[serde(default = "default_preset")]
    pub preset: String,
    /// Constant rate factor (quality, lower is better).
    #[serde(default = "default_crf")]
    pub crf: u8,
    /// Audio codec (e.g. "aac").
    #[serde(default = "default_audio_codec")]
    pub audio_codec: String,
    /// Audio bitrate (e.g. "128k").
    #[serde(default = "default_audio_bitrate")]
    pub audio_bitrate: String,
    /// Container format tag for outputs (e.g. "mp4").
    #[serde(default = "default_container")]
    pub container: String,
}

fn default_codec() -> String {
    "libx264".to_string()
}

fn default_preset() -> String {
    "veryfast".to_string()
}

fn default_crf() -> u8 {
    20
}

fn default_audio_codec() -> String {
    "aac".to_string()
}

fn default_audio_bitrate() -> String {
    "128k".to_string()
}

fn default_container() -> String {
    "mp4".to_string()
}

impl Default for EncodingConfig {
    fn default() -> Self {
        Self {
            codec: default_codec(),
            preset: default_preset(),
            crf: default_crf(),
            audio_codec: default_audio_codec(),
            audio_bitrate: default_audio_bitrate(),
            container: default_container(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EncodingConfig::default();
        assert_eq!(config.codec, "libx264");
        assert_eq!(config.crf, 20);
        assert_eq!(config.container, "mp4");
    }

    #[test]
    fn test_partial_payload_fills_defaults() {
        let config: EncodingConfig = serde_json::from_str(r#"{"crf": 18}"#).unwrap();
        assert_eq!(config.crf, 18);
        assert_eq!(config.preset, "veryfast");
    }
}
