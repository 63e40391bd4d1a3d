//! Sampling core: scheduler state machine, shared boost/mark state, and
//! append-only persistence.

pub mod boost;
pub mod config;
pub mod marks;
pub mod record;
pub mod recorder;
pub mod sampler;
pub mod status;

pub use boost::BoostController;
pub use config::TrackerConfig;
pub use marks::MarkHistory;
pub use record::{LogRecord, Mark, Measurement, VpnStatus};
pub use recorder::JsonlRecorder;
pub use sampler::Sampler;
pub use status::{Indicator, SnapshotCell, StatusSnapshot};
