mod builder;
mod error;
mod frame;

pub use builder::{DEFAULT_END_DEST, DEFAULT_END_ORIG, FrameBuilder};
pub use error::{DecodeError, DecodeResult, InvalidCorrection};
pub use frame::{Decoder, DecoderConfig, decode, decode_uplink, round_hundredths};

// MoT frame layout: RED(8..12) + TRANSP(12..20) + APP(20..25). The layers are
// not parsed, only the offsets below are read.

/// Minimum frame length. The last field read ends at offset 24.
pub const MOT_PAYLOAD_SIZE: usize = 25;

/// RED layer: destination address.
pub const END_DEST_OFFSET: usize = 8;
/// RED layer: origin address.
pub const END_ORIG_OFFSET: usize = 10;
/// TRANSP layer: uplink packet counter.
pub const PACKET_COUNTER_OFFSET: usize = 12;
/// APP layer: temperature, big-endian i16, hundredths of a degree.
pub const TEMPERATURE_OFFSET: usize = 20;
/// APP layer: relative humidity, big-endian u16, hundredths of a percent.
pub const HUMIDITY_OFFSET: usize = 23;

/// Calibration factor applied to the humidity channel of the DHT22 boards
/// currently deployed. Provisional: override through [`DecoderConfig`]
/// rather than editing it.
pub const HUMIDITY_CORRECTION: f64 = 0.91;
