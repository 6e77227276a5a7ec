pub mod engine;
pub mod evaluator;
pub mod store;

pub use engine::{AlertEngine, RecordOutcome};
pub use evaluator::{evaluate, Breach};
pub use store::{AlertStore, MemoryAlertStore};
