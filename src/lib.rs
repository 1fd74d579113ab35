// Library for tests and the dump_sensors tool to access modules

pub mod config;
pub mod error;
pub mod hardware;
pub mod lhm;
pub mod media;
pub mod models;
pub mod osc;
pub mod rate;
pub mod render;
pub mod sources;
pub mod sysinfo_repo;
pub mod version;
pub mod worker;
