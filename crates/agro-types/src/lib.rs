pub mod alert;
pub mod crop;
pub mod farmer;
pub mod notification;
pub mod weather;

pub use alert::{AlertEvent, AlertType};
pub use crop::CropProfile;
pub use farmer::Farmer;
pub use notification::NotificationLog;
pub use weather::{WeatherReading, WeatherSample};
