use super::*;

/// Default RED destination address used by the end device firmware.
pub const DEFAULT_END_DEST: u8 = 50;
/// Default RED origin address used by the end device firmware.
pub const DEFAULT_END_ORIG: u8 = 1;

/// Builds the 25-byte MoT uplink frame the way the DHT22 end device does.
///
/// The humidity written is the raw sensor value. The decoder-side
/// correction factor is not inverted here.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameBuilder {
    pub end_dest: u8,
    pub end_orig: u8,
    pub packet_counter: u8,
    pub temperature_celsius: f64,
    pub humidity_percent: f64,
}

impl Default for FrameBuilder {
    fn default() -> Self {
        Self {
            end_dest: DEFAULT_END_DEST,
            end_orig: DEFAULT_END_ORIG,
            packet_counter: 0,
            temperature_celsius: 0.0,
            humidity_percent: 0.0,
        }
    }
}

impl FrameBuilder {
    pub fn new(temperature_celsius: f64, humidity_percent: f64, packet_counter: u8) -> Self {
        Self {
            packet_counter,
            temperature_celsius,
            humidity_percent,
            ..Self::default()
        }
    }

    pub fn end_dest(mut self, end_dest: u8) -> Self {
        self.end_dest = end_dest;
        self
    }

    pub fn end_orig(mut self, end_orig: u8) -> Self {
        self.end_orig = end_orig;
        self
    }

    pub fn build(&self) -> [u8; MOT_PAYLOAD_SIZE] {
        let mut bytes = [0u8; MOT_PAYLOAD_SIZE];

        bytes[END_DEST_OFFSET] = self.end_dest;
        bytes[END_ORIG_OFFSET] = self.end_orig;
        bytes[PACKET_COUNTER_OFFSET] = self.packet_counter;

        // `as` saturates on overflow and maps NaN to 0.
        let temp = (self.temperature_celsius * 100.0).round() as i16;
        let hum = (self.humidity_percent * 100.0).round() as u16;

        bytes[TEMPERATURE_OFFSET..TEMPERATURE_OFFSET + 2].copy_from_slice(&temp.to_be_bytes());
        bytes[HUMIDITY_OFFSET..HUMIDITY_OFFSET + 2].copy_from_slice(&hum.to_be_bytes());

        bytes
    }
}
