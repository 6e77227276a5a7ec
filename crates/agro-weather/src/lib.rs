pub mod client;
pub mod history;
pub mod provider;

pub use client::HttpWeatherProvider;
pub use history::{MemoryReadingStore, ReadingStore};
pub use provider::{MockWeatherProvider, WeatherProvider};
