pub mod alarm_handle;
pub mod bluetooth_handle;
pub mod config_handle;
pub mod hue_handle;
pub mod spotify_handle;
pub mod status_handle;

pub use alarm_handle::alarm_router;
pub use bluetooth_handle::bluetooth_router;
pub use config_handle::config_router;
pub use hue_handle::hue_router;
pub use spotify_handle::spotify_router;
pub use status_handle::status_router;
