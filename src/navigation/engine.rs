use std::time::{Duration, Instant};

use super::grid::{self, DEFAULT_COLUMNS};
use super::registry::NavigationRegistry;
use super::surface::FocusSurface;
use super::types::{Area, Direction, NavigationItem, NavigationState, RemoteKey};

pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_millis(50);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigationConfig {
    /// Width of the content grid
    pub columns: usize,
    /// Pause between committing a move and applying focus
    pub settle_delay: Duration,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            columns: DEFAULT_COLUMNS,
            settle_delay: DEFAULT_SETTLE_DELAY,
        }
    }
}

/// Focus application waiting for the settle delay
#[derive(Debug, Clone, Copy)]
struct PendingFocus {
    area: Area,
    index: usize,
    due: Instant,
}

/// TV-remote style focus navigation across named areas.
///
/// Owns the item registry and the selection, and drives focus side effects
/// through a [`FocusSurface`]. A move commits the new area/index right away
/// and applies focus once the settle delay has passed; moves requested while
/// one is in flight are dropped.
pub struct NavigationEngine<S: FocusSurface> {
    registry: NavigationRegistry,
    state: NavigationState,
    config: NavigationConfig,
    pending: Option<PendingFocus>,
    surface: S,
}

fn clamp_index(index: usize, len: usize) -> usize {
    if len == 0 { 0 } else { index.min(len - 1) }
}

impl<S: FocusSurface> NavigationEngine<S> {
    pub fn new(surface: S) -> Self {
        Self::with_config(surface, NavigationConfig::default())
    }

    pub fn with_config(surface: S, config: NavigationConfig) -> Self {
        Self {
            registry: NavigationRegistry::new(),
            state: NavigationState::default(),
            config,
            pending: None,
            surface,
        }
    }

    pub fn config(&self) -> &NavigationConfig {
        &self.config
    }

    pub fn state(&self) -> NavigationState {
        self.state
    }

    pub fn current_area(&self) -> Area {
        self.state.current_area
    }

    pub fn current_index(&self) -> usize {
        self.state.current_index
    }

    pub fn is_navigating(&self) -> bool {
        self.state.is_navigating
    }

    pub fn current_item(&self) -> Option<&NavigationItem> {
        self.registry.get(self.state.current_area, self.state.current_index)
    }

    pub fn registry(&self) -> &NavigationRegistry {
        &self.registry
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// When the pending focus application is due, if any
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.map(|p| p.due)
    }

    pub fn register(&mut self, item: NavigationItem) {
        log::trace!("register {}/{}", item.area, item.id);
        self.registry.register(item);
    }

    pub fn unregister(&mut self, id: &str, area: Area) {
        log::trace!("unregister {}/{}", area, id);
        self.registry.unregister(id, area);
    }

    /// Drop every item of an area, e.g. before re-registering a rebuilt grid
    pub fn clear_area(&mut self, area: Area) {
        log::trace!("clear {}", area);
        self.registry.clear_area(area);
    }

    pub fn navigate(&mut self, direction: Direction) -> bool {
        self.navigate_at(direction, Instant::now())
    }

    /// Move the selection one step. Returns false when the move was dropped
    /// (another move in flight) or had nowhere to go.
    pub fn navigate_at(&mut self, direction: Direction, now: Instant) -> bool {
        if self.state.is_navigating {
            log::trace!("dropping {:?}: navigation in flight", direction);
            return false;
        }

        let area = self.state.current_area;
        let index = clamp_index(self.state.current_index, self.registry.len(area));
        self.state.current_index = index;

        let Some((new_area, new_index)) =
            grid::next_target(&self.registry, area, index, direction, self.config.columns)
        else {
            log::trace!("{:?} from {}/{} has no target", direction, area, index);
            return false;
        };

        log::debug!("navigate {:?}: {}/{} -> {}/{}", direction, area, index, new_area, new_index);

        self.blur_current();
        self.state.current_area = new_area;
        self.state.current_index = new_index;

        if self.config.settle_delay.is_zero() {
            self.focus_item(new_area, new_index);
        } else {
            self.state.is_navigating = true;
            self.pending = Some(PendingFocus {
                area: new_area,
                index: new_index,
                due: now + self.config.settle_delay,
            });
        }
        true
    }

    pub fn poll_timers(&mut self) -> bool {
        self.poll_timers_at(Instant::now())
    }

    /// Apply pending focus if its settle delay has elapsed
    pub fn poll_timers_at(&mut self, now: Instant) -> bool {
        match self.pending {
            Some(pending) if now >= pending.due => {
                self.pending = None;
                self.focus_item(pending.area, pending.index);
                self.state.is_navigating = false;
                true
            }
            _ => false,
        }
    }

    /// Drop any pending focus application and release the guard
    pub fn cancel_pending(&mut self) {
        self.pending = None;
        self.state.is_navigating = false;
    }

    /// Jump straight to an area without the settle delay
    pub fn switch_to_area(&mut self, area: Area, index: usize) {
        self.cancel_pending();
        self.blur_current();

        let index = clamp_index(index, self.registry.len(area));
        log::debug!("switch to {}/{}", area, index);
        self.state.current_area = area;
        self.state.current_index = index;
        self.focus_item(area, index);
    }

    /// Focus the first sidebar entry, if there is one
    pub fn focus_initial(&mut self) {
        if !self.registry.is_empty(Area::Sidebar) {
            self.switch_to_area(Area::Sidebar, 0);
        }
    }

    /// Re-apply focus to the current item, e.g. after its area was rebuilt
    pub fn refocus(&mut self) {
        let area = self.state.current_area;
        self.state.current_index = clamp_index(self.state.current_index, self.registry.len(area));
        if self.pending.is_none() {
            self.focus_item(area, self.state.current_index);
        }
    }

    pub fn handle_remote_input(&mut self, key: RemoteKey) -> bool {
        self.handle_remote_input_at(key, Instant::now())
    }

    pub fn handle_remote_input_at(&mut self, key: RemoteKey, now: Instant) -> bool {
        match key.direction() {
            Some(direction) => self.navigate_at(direction, now),
            None => self.activate_current(),
        }
    }

    /// Route a raw key name (`"ArrowUp"`, `"Enter"`, ...); unknown names are ignored
    pub fn handle_key_name(&mut self, name: &str) -> bool {
        match name.parse::<RemoteKey>() {
            Ok(key) => self.handle_remote_input(key),
            Err(()) => false,
        }
    }

    /// Click the current item
    pub fn activate_current(&mut self) -> bool {
        let Some(item) = self.registry.get(self.state.current_area, self.state.current_index) else {
            return false;
        };
        if !self.surface.is_mounted(&item.element) {
            log::debug!("activate: element {} is gone", item.element);
            return false;
        }
        self.surface.activate(&item.element);
        true
    }

    fn blur_current(&mut self) {
        if let Some(item) = self.registry.get(self.state.current_area, self.state.current_index) {
            if self.surface.is_mounted(&item.element) {
                self.surface.set_focus_marker(&item.element, false);
            }
        }
    }

    fn focus_item(&mut self, area: Area, index: usize) {
        let Some(item) = self.registry.get(area, index) else {
            return;
        };
        if !self.surface.is_mounted(&item.element) {
            log::debug!("focus: element {} is gone", item.element);
            return;
        }
        self.surface.scroll_into_view(&item.element);
        self.surface.set_focus_marker(&item.element, true);
        if item.can_receive_focus {
            self.surface.focus_input(&item.element);
        }
    }
}
