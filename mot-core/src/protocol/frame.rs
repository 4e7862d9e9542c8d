use super::*;
use crate::{DecodeOutcome, DecodedReading};

/// Decoder settings that are not carried by the frame itself.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecoderConfig {
    /// Multiplier applied to the humidity channel after scaling. Always finite.
    humidity_correction: f64,
}

impl DecoderConfig {
    pub fn new(humidity_correction: f64) -> Result<Self, InvalidCorrection> {
        if !humidity_correction.is_finite() {
            return Err(InvalidCorrection(humidity_correction));
        }
        Ok(Self {
            humidity_correction,
        })
    }

    pub fn humidity_correction(&self) -> f64 {
        self.humidity_correction
    }
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            humidity_correction: HUMIDITY_CORRECTION,
        }
    }
}

/// Stateless MoT uplink decoder.
///
/// A `Decoder` only holds its [`DecoderConfig`], so it is `Copy` and can be
/// shared freely between threads.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Decoder {
    config: DecoderConfig,
}

impl Decoder {
    pub fn new(config: DecoderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Decode one uplink frame.
    ///
    /// Frames shorter than [`MOT_PAYLOAD_SIZE`] are rejected before any
    /// field is read. Any byte pattern of sufficient length decodes.
    pub fn decode(&self, frame: &[u8]) -> DecodeResult<DecodedReading> {
        let frame: &[u8; MOT_PAYLOAD_SIZE] = frame
            .get(..MOT_PAYLOAD_SIZE)
            .and_then(|head| head.try_into().ok())
            .ok_or(DecodeError::FrameTooShort {
                expected: MOT_PAYLOAD_SIZE,
                actual: frame.len(),
            })?;

        let temp_raw = i16::from_be_bytes([
            frame[TEMPERATURE_OFFSET],
            frame[TEMPERATURE_OFFSET + 1],
        ]);
        let hum_raw = u16::from_be_bytes([frame[HUMIDITY_OFFSET], frame[HUMIDITY_OFFSET + 1]]);

        Ok(DecodedReading {
            packet_counter: frame[PACKET_COUNTER_OFFSET],
            temperature_celsius: round_hundredths(f64::from(temp_raw) / 100.0),
            humidity_percent: round_hundredths(
                f64::from(hum_raw) / 100.0 * self.config.humidity_correction,
            ),
            end_dest: frame[END_DEST_OFFSET],
            end_orig: frame[END_ORIG_OFFSET],
        })
    }

    /// Decode one uplink frame into the `data`/`warnings`/`errors` envelope
    /// handed to the network server.
    pub fn decode_uplink(&self, frame: &[u8]) -> DecodeOutcome {
        self.decode(frame).into()
    }
}

/// Decode with the default calibration.
pub fn decode(frame: &[u8]) -> DecodeResult<DecodedReading> {
    Decoder::default().decode(frame)
}

/// [`decode`], wrapped in a [`DecodeOutcome`].
pub fn decode_uplink(frame: &[u8]) -> DecodeOutcome {
    Decoder::default().decode_uplink(frame)
}

/// Round to two decimal places, half away from zero.
///
/// This is the only rounding rule used for scaled fields.
#[inline]
pub fn round_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame_with(patch: &[(usize, u8)]) -> [u8; MOT_PAYLOAD_SIZE] {
        let mut frame = [0u8; MOT_PAYLOAD_SIZE];
        for &(offset, value) in patch {
            frame[offset] = value;
        }
        frame
    }

    #[test]
    fn rejects_short_frames_before_reading_fields() {
        for len in 0..MOT_PAYLOAD_SIZE {
            let bytes = vec![0xFF; len];
            assert_eq!(
                decode(&bytes),
                Err(DecodeError::FrameTooShort {
                    expected: MOT_PAYLOAD_SIZE,
                    actual: len,
                })
            );
        }
    }

    #[test]
    fn boundary_lengths() {
        assert!(decode(&[0u8; 24]).is_err());
        assert!(decode(&[0u8; 25]).is_ok());
        assert!(decode(&[0u8; 64]).is_ok());
    }

    #[test]
    fn trailing_bytes_are_ignored() {
        let frame = frame_with(&[(12, 9), (20, 0x01), (21, 0x90)]);
        let mut long = frame.to_vec();
        long.extend_from_slice(&[0xAA; 16]);
        assert_eq!(decode(&frame), decode(&long));
    }

    #[test]
    fn temperature_is_signed() {
        let warm = decode(&frame_with(&[(20, 0x01), (21, 0x90)])).unwrap();
        assert_eq!(warm.temperature_celsius, 4.0);

        let cold = decode(&frame_with(&[(20, 0xFF), (21, 0x38)])).unwrap();
        assert_eq!(cold.temperature_celsius, -2.0);

        let min = decode(&frame_with(&[(20, 0x80), (21, 0x00)])).unwrap();
        assert_eq!(min.temperature_celsius, -327.68);

        let max = decode(&frame_with(&[(20, 0x7F), (21, 0xFF)])).unwrap();
        assert_eq!(max.temperature_celsius, 327.67);
    }

    #[test]
    fn humidity_applies_correction() {
        // 6000 -> 60.00 % * 0.91
        let reading = decode(&frame_with(&[(23, 0x17), (24, 0x70)])).unwrap();
        assert_eq!(reading.humidity_percent, 54.6);
    }

    #[test]
    fn humidity_ties_round_away_from_zero() {
        // 550 -> 5.50 % * 0.91 = 5.005. A decimal-string rounding of the
        // binary product gives 5.00; the fixed rule gives 5.01.
        let reading = decode(&frame_with(&[(23, 0x02), (24, 0x26)])).unwrap();
        assert_eq!(reading.humidity_percent, 5.01);
    }

    #[test]
    fn humidity_is_unsigned() {
        let reading = decode(&frame_with(&[(23, 0xFF), (24, 0xFF)])).unwrap();
        // 655.35 * 0.91 = 596.3685
        assert_eq!(reading.humidity_percent, 596.37);
    }

    #[test]
    fn correction_is_configurable() {
        let frame = frame_with(&[(23, 0x17), (24, 0x70)]);

        let identity = Decoder::new(DecoderConfig::new(1.0).unwrap());
        assert_eq!(identity.decode(&frame).unwrap().humidity_percent, 60.0);
        assert_eq!(identity.config().humidity_correction(), 1.0);
        assert_eq!(Decoder::default().config().humidity_correction(), 0.91);
    }

    #[test]
    fn non_finite_correction_is_refused() {
        for factor in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let err = DecoderConfig::new(factor).unwrap_err();
            assert!(err.to_string().starts_with("humidity correction must be"));
        }
        assert!(DecoderConfig::new(0.0).is_ok());
    }

    #[test]
    fn rounding_is_half_away_from_zero() {
        assert_eq!(round_hundredths(0.125), 0.13);
        assert_eq!(round_hundredths(-0.125), -0.13);
        assert_eq!(round_hundredths(1.0), 1.0);
        assert_eq!(round_hundredths(-2.004), -2.0);
    }

    #[test]
    fn routing_bytes_are_copied_verbatim() {
        let reading = decode(&frame_with(&[(8, 255), (10, 128), (12, 0)])).unwrap();
        assert_eq!(reading.end_dest, 255);
        assert_eq!(reading.end_orig, 128);
        assert_eq!(reading.packet_counter, 0);
    }

    #[test]
    fn reserved_bytes_do_not_affect_fields() {
        let base = frame_with(&[
            (8, 7),
            (10, 3),
            (12, 42),
            (20, 1),
            (21, 144),
            (23, 23),
            (24, 112),
        ]);
        let mut noisy = base;
        for offset in [0, 1, 2, 3, 4, 5, 6, 7, 9, 11, 13, 14, 15, 16, 17, 18, 19, 22] {
            noisy[offset] = 0xA5;
        }
        assert_eq!(decode(&base), decode(&noisy));
    }
}
