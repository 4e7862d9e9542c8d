use std::path::Path;

use mot_core::{DecoderConfig, InvalidCorrection};
use mot_core::protocol::HUMIDITY_CORRECTION;
use serde::Deserialize;

use crate::payload::PayloadFormat;

#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub decoder: DecoderSection,
    pub input: InputConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct DecoderSection {
    /// Multiplier applied to decoded humidity (sensor calibration)
    pub humidity_correction: f64,
}

#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct InputConfig {
    /// Text encoding of incoming payloads
    pub format: PayloadFormat,
}

#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    /// Pretty-print JSON documents
    pub pretty: bool,
    /// Shape of each emitted document
    pub envelope: Envelope,
}

#[derive(Debug, Default, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Envelope {
    /// Bare `data`/`warnings`/`errors` object
    #[default]
    Outcome,
    /// Outcome wrapped with an id and receive timestamp
    Record,
}

impl Default for DecoderSection {
    fn default() -> Self {
        Self {
            humidity_correction: HUMIDITY_CORRECTION,
        }
    }
}

impl TryFrom<&DecoderSection> for DecoderConfig {
    type Error = InvalidCorrection;

    fn try_from(section: &DecoderSection) -> Result<Self, Self::Error> {
        DecoderConfig::new(section.humidity_correction)
    }
}

impl Config {
    pub fn load(path: &Path) -> color_eyre::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> color_eyre::Result<()> {
        self.decoder_config()?;
        Ok(())
    }

    pub fn decoder_config(&self) -> color_eyre::Result<DecoderConfig> {
        DecoderConfig::try_from(&self.decoder)
            .map_err(|e| color_eyre::eyre::eyre!("invalid [decoder] section: {e}"))
    }
}
