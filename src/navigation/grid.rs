//! Directional transition table.
//!
//! The content area is a row-major grid `columns` wide; every other
//! area is a flat single-column list. Returns `None` when a move has nowhere
//! to go, which callers treat as a no-op.

use super::registry::NavigationRegistry;
use super::types::{Area, Direction};

pub const DEFAULT_COLUMNS: usize = 6;

pub fn next_target(
    registry: &NavigationRegistry,
    area: Area,
    index: usize,
    direction: Direction,
    columns: usize,
) -> Option<(Area, usize)> {
    let columns = columns.max(1);
    let sidebar_len = registry.len(Area::Sidebar);
    let content_len = registry.len(Area::Content);

    match (area, direction) {
        (Area::Sidebar, Direction::Up) => (index > 0).then(|| (Area::Sidebar, index - 1)),
        (Area::Sidebar, Direction::Down) => {
            if index + 1 < sidebar_len {
                Some((Area::Sidebar, index + 1))
            } else if content_len > 0 {
                Some((Area::Content, index.min(content_len - 1)))
            } else {
                None
            }
        }
        (Area::Sidebar, Direction::Left) => None,
        // Sidebar position is read as a virtual grid row
        (Area::Sidebar, Direction::Right) => {
            (content_len > 0).then(|| (Area::Content, (index * columns).min(content_len - 1)))
        }

        (Area::Content, Direction::Up) => {
            if index >= columns {
                Some((Area::Content, index - columns))
            } else if sidebar_len > 0 {
                Some((Area::Sidebar, index.min(sidebar_len - 1)))
            } else {
                None
            }
        }
        (Area::Content, Direction::Down) => {
            (index + columns < content_len).then(|| (Area::Content, index + columns))
        }
        (Area::Content, Direction::Left) => {
            if index % columns > 0 {
                Some((Area::Content, index - 1))
            } else if sidebar_len > 0 {
                Some((Area::Sidebar, (index / columns).min(sidebar_len - 1)))
            } else {
                None
            }
        }
        (Area::Content, Direction::Right) => {
            (index % columns < columns - 1 && index + 1 < content_len)
                .then(|| (Area::Content, index + 1))
        }

        (Area::Search | Area::Chat, Direction::Left) => {
            (sidebar_len > 0).then_some((Area::Sidebar, 0))
        }
        (Area::Search | Area::Chat, _) => None,
    }
}
