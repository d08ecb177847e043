pub mod settings;
pub mod statistics;
pub mod upload;

pub use settings::{ClientType, Settings};
pub use statistics::{CapabilityCount, CapabilityCounters, SegmentTally};
pub use upload::{DailyUploadCount, UploadRecord};
