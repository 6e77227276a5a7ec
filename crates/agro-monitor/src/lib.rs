pub mod config;
pub mod directory;
pub mod service;

pub use config::MonitorConfig;
pub use directory::{MemoryDirectory, SubjectDirectory};
pub use service::{MonitorService, MonitorTaskHandle, PassSummary};
