use serde::{Deserialize, Serialize};

pub mod protocol;

pub use protocol::{
    DecodeError, DecodeResult, Decoder, DecoderConfig, FrameBuilder, InvalidCorrection,
    MOT_PAYLOAD_SIZE, decode, decode_uplink,
};

/// Fields extracted from one MoT uplink frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DecodedReading {
    /// TRANSP layer uplink counter (byte 12). Wraps at 255.
    pub packet_counter: u8,
    /// Air temperature in degrees Celsius, two decimals.
    pub temperature_celsius: f64,
    /// Corrected relative humidity in percent, two decimals.
    pub humidity_percent: f64,
    /// RED layer destination address (byte 8).
    pub end_dest: u8,
    /// RED layer origin address (byte 10).
    pub end_orig: u8,
}

/// The `data` slot of a [`DecodeOutcome`]. Serializes as the reading's
/// fields or as `{}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FrameData {
    Reading(DecodedReading),
    Empty(NoData),
}

/// Placeholder for a rejected frame's `data`. Only `{}` deserializes into it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NoData {}

/// Result envelope handed back to the network server.
///
/// Either `data` holds a reading and `errors` is empty, or `data` is empty
/// and `errors` says why. There is no partial decode, and deserializing an
/// envelope that mixes the two fails.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawOutcome")]
pub struct DecodeOutcome {
    data: FrameData,
    warnings: Vec<String>,
    errors: Vec<String>,
}

#[derive(Deserialize)]
struct RawOutcome {
    data: FrameData,
    warnings: Vec<String>,
    errors: Vec<String>,
}

impl TryFrom<RawOutcome> for DecodeOutcome {
    type Error = &'static str;

    fn try_from(raw: RawOutcome) -> Result<Self, Self::Error> {
        match (&raw.data, raw.errors.is_empty()) {
            (FrameData::Reading(_), false) => Err("decoded data must not carry errors"),
            (FrameData::Empty(_), true) => Err("empty data must carry at least one error"),
            _ => Ok(Self {
                data: raw.data,
                warnings: raw.warnings,
                errors: raw.errors,
            }),
        }
    }
}

impl DecodeOutcome {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn data(&self) -> &FrameData {
        &self.data
    }

    pub fn reading(&self) -> Option<&DecodedReading> {
        match &self.data {
            FrameData::Reading(reading) => Some(reading),
            FrameData::Empty(_) => None,
        }
    }

    /// Advisory, non-fatal conditions. Always empty for now.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Outcome for input that never became a frame (e.g. unparsable text).
    pub fn rejected(error: impl Into<String>) -> Self {
        Self {
            data: FrameData::Empty(NoData {}),
            warnings: Vec::new(),
            errors: vec![error.into()],
        }
    }
}

impl From<DecodeResult<DecodedReading>> for DecodeOutcome {
    fn from(result: DecodeResult<DecodedReading>) -> Self {
        match result {
            Ok(reading) => Self {
                data: FrameData::Reading(reading),
                warnings: Vec::new(),
                errors: Vec::new(),
            },
            Err(e) => Self::rejected(e.to_string()),
        }
    }
}
