//! Remote-control focus navigation across the sidebar, content grid, search
//! field and chat panel.

pub mod engine;
pub mod grid;
pub mod registry;
pub mod surface;
pub mod types;

pub use engine::{NavigationConfig, NavigationEngine, DEFAULT_SETTLE_DELAY};
pub use grid::{next_target, DEFAULT_COLUMNS};
pub use registry::NavigationRegistry;
pub use surface::FocusSurface;
pub use types::{Area, Direction, ElementRef, NavigationItem, NavigationState, RemoteKey};
