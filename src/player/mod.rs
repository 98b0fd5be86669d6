pub mod session;
pub mod video;

pub use session::{PlaybackState, PlayerConfig, PlayerSession};
pub use video::{format_time, resolve_source, VideoFormat};
