// Domain models: one tick's worth of telemetry

mod hardware;
mod media;
mod network;
mod snapshot;

pub use hardware::{CpuVendor, HardwareIdentity, HardwareSample};
pub use media::MediaState;
pub use network::{NetCounterSample, NetRates};
pub use snapshot::MetricSnapshot;
