use std::time::{Duration, Instant};

use crate::navigation::Area;

/// Transient badge naming the area the remote is driving
#[derive(Debug, Clone)]
pub struct AreaIndicator {
    area: Option<Area>,
    hide_due: Option<Instant>,
    hide_after: Duration,
}

impl AreaIndicator {
    pub fn new(hide_after: Duration) -> Self {
        Self {
            area: None,
            hide_due: None,
            hide_after,
        }
    }

    pub fn show_at(&mut self, area: Area, now: Instant) {
        self.area = Some(area);
        self.hide_due = Some(now + self.hide_after);
    }

    pub fn poll_at(&mut self, now: Instant) -> bool {
        if self.hide_due.is_some_and(|due| now >= due) {
            self.hide_due = None;
            self.area = None;
            return true;
        }
        false
    }

    pub fn label(&self) -> Option<&'static str> {
        self.area.map(|area| area.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indicator_hides_after_delay() {
        let t0 = Instant::now();
        let mut indicator = AreaIndicator::new(Duration::from_secs(2));
        assert_eq!(indicator.label(), None);

        indicator.show_at(Area::Content, t0);
        assert_eq!(indicator.label(), Some("Contenido"));
        assert!(!indicator.poll_at(t0 + Duration::from_secs(1)));

        // Showing again restarts the countdown
        indicator.show_at(Area::Sidebar, t0 + Duration::from_secs(1));
        assert!(!indicator.poll_at(t0 + Duration::from_secs(2)));
        assert_eq!(indicator.label(), Some("Menú"));
        assert!(indicator.poll_at(t0 + Duration::from_secs(3)));
        assert_eq!(indicator.label(), None);
    }
}
