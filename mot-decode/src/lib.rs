pub mod config;
pub mod payload;
pub mod record;
pub mod uplink;

pub use config::{Config, DecoderSection, Envelope, InputConfig, OutputConfig};
pub use payload::{PayloadError, PayloadFormat};
pub use record::{ReadingId, UplinkRecord};
pub use uplink::{UplinkProcessor, encode};
