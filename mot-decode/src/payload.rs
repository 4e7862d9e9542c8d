use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::Deserialize;

/// Text encodings an uplink payload may arrive in.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum PayloadFormat {
    /// Hexadecimal, e.g. `0000...0190001770`
    #[default]
    Hex,
    /// Standard base64, as in a network server's `frm_payload`
    Base64,
    /// Decimal byte list, e.g. `[0, 0, 7]`
    Bytes,
}

#[derive(Debug, thiserror::Error)]
pub enum PayloadError {
    #[error("Invalid hex payload: {0}")]
    Hex(#[from] hex::FromHexError),

    #[error("Invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("Invalid byte {token:?} at position {position}: expected 0-255")]
    Byte { position: usize, token: String },
}

impl PayloadFormat {
    pub fn parse(self, input: &str) -> Result<Vec<u8>, PayloadError> {
        match self {
            PayloadFormat::Hex => parse_hex(input),
            PayloadFormat::Base64 => Ok(STANDARD.decode(input.trim())?),
            PayloadFormat::Bytes => parse_byte_list(input),
        }
    }

    /// Inverse of [`PayloadFormat::parse`]: hex is lowercase, bytes render as
    /// `[0, 1, 255]`.
    pub fn render(self, bytes: &[u8]) -> String {
        match self {
            PayloadFormat::Hex => hex::encode(bytes),
            PayloadFormat::Base64 => STANDARD.encode(bytes),
            PayloadFormat::Bytes => format!("{bytes:?}"),
        }
    }
}

fn parse_hex(input: &str) -> Result<Vec<u8>, PayloadError> {
    let trimmed = input.trim();
    let trimmed = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);

    let digits: String = trimmed
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ':' && *c != '-')
        .collect();

    Ok(hex::decode(digits)?)
}

fn parse_byte_list(input: &str) -> Result<Vec<u8>, PayloadError> {
    let inner = input.trim();
    let inner = inner
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
        .unwrap_or(inner);

    inner
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .enumerate()
        .map(|(position, token)| {
            token.parse::<u8>().map_err(|_| PayloadError::Byte {
                position,
                token: token.to_string(),
            })
        })
        .collect()
}
