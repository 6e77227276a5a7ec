pub mod error;

pub use error::{AgroError, Result};
