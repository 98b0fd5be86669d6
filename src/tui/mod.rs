pub mod app;
pub mod indicator;
pub mod surface;
pub mod theme;
pub mod view;

pub use app::{Media, MovieDetails, NowPlaying, Section, TvApp, remote_key};
pub use indicator::AreaIndicator;
pub use surface::TerminalSurface;
pub use theme::Theme;
