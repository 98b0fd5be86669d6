use std::time::{Duration, Instant};

use super::video::{resolve_source, VideoFormat};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Loading,
    Playing,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerConfig {
    pub load_delay: Duration,
    pub controls_hide: Duration,
    pub info_hide: Duration,
    pub seek_step: f64,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            load_delay: Duration::from_secs(2),
            controls_hide: Duration::from_secs(3),
            info_hide: Duration::from_secs(5),
            seek_step: 10.0,
        }
    }
}

/// Playback overlay for one channel or video.
///
/// The stream itself is outside this type; it only tracks what the overlay
/// shows. Timers are deadlines fired from [`poll_timers_at`](Self::poll_timers_at).
#[derive(Debug, Clone)]
pub struct PlayerSession {
    title: String,
    source: String,
    format: VideoFormat,
    state: PlaybackState,
    muted: bool,
    paused: bool,
    show_info: bool,
    show_controls: bool,
    position: f64,
    duration: Option<f64>,
    config: PlayerConfig,
    load_due: Option<Instant>,
    controls_hide_due: Option<Instant>,
    info_hide_due: Option<Instant>,
}

impl PlayerSession {
    pub fn open(title: impl Into<String>, url: &str, config: PlayerConfig) -> Self {
        Self::open_at(title, url, config, Instant::now())
    }

    pub fn open_at(title: impl Into<String>, url: &str, config: PlayerConfig, now: Instant) -> Self {
        let source = resolve_source(url);
        let title = title.into();
        log::info!("player: opening '{}' ({:?})", title, VideoFormat::detect(&source));
        Self {
            title,
            format: VideoFormat::detect(&source),
            source,
            state: PlaybackState::Loading,
            muted: false,
            paused: false,
            show_info: true,
            show_controls: true,
            position: 0.0,
            duration: None,
            load_due: Some(now + config.load_delay),
            controls_hide_due: Some(now + config.controls_hide),
            info_hide_due: Some(now + config.info_hide),
            config,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn format(&self) -> VideoFormat {
        self.format
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn info_visible(&self) -> bool {
        self.show_info
    }

    pub fn controls_visible(&self) -> bool {
        self.show_controls
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn duration(&self) -> Option<f64> {
        self.duration
    }

    pub fn poll_timers(&mut self) -> bool {
        self.poll_timers_at(Instant::now())
    }

    /// Fire due timers. Returns true if anything visible changed.
    pub fn poll_timers_at(&mut self, now: Instant) -> bool {
        let mut changed = false;

        if self.load_due.is_some_and(|due| now >= due) {
            self.load_due = None;
            self.state = if self.source.is_empty() {
                PlaybackState::Error
            } else {
                PlaybackState::Playing
            };
            log::info!("player: '{}' -> {:?}", self.title, self.state);
            changed = true;
        }

        if self.controls_hide_due.is_some_and(|due| now >= due) {
            self.controls_hide_due = None;
            // Controls stay up while paused or showing an error
            if self.state == PlaybackState::Playing && !self.paused && self.show_controls {
                self.show_controls = false;
                changed = true;
            }
        }

        if self.info_hide_due.is_some_and(|due| now >= due) {
            self.info_hide_due = None;
            if self.show_info {
                self.show_info = false;
                changed = true;
            }
        }

        changed
    }

    pub fn retry(&mut self) -> bool {
        self.retry_at(Instant::now())
    }

    /// Reconnect from `Playing` or `Error`
    pub fn retry_at(&mut self, now: Instant) -> bool {
        if self.state == PlaybackState::Loading {
            return false;
        }
        log::info!("player: retrying '{}'", self.title);
        self.state = PlaybackState::Loading;
        self.paused = false;
        self.position = 0.0;
        self.load_due = Some(now + self.config.load_delay);
        true
    }

    pub fn toggle_mute(&mut self) {
        self.muted = !self.muted;
    }

    pub fn toggle_info(&mut self) {
        self.show_info = !self.show_info;
        self.info_hide_due = None;
    }

    pub fn show_controls_temporarily(&mut self) {
        self.show_controls_temporarily_at(Instant::now())
    }

    pub fn show_controls_temporarily_at(&mut self, now: Instant) {
        self.show_controls = true;
        self.controls_hide_due = Some(now + self.config.controls_hide);
    }

    pub fn toggle_pause(&mut self) -> bool {
        if self.state != PlaybackState::Playing {
            return false;
        }
        self.paused = !self.paused;
        true
    }

    /// Known once the stream reports its metadata; live channels never do
    pub fn set_duration(&mut self, seconds: f64) {
        if seconds.is_finite() && seconds > 0.0 {
            self.duration = Some(seconds);
            self.position = self.position.min(seconds);
        }
    }

    /// Jump by `delta` seconds, clamped to the stream bounds
    pub fn seek(&mut self, delta: f64) -> bool {
        match (self.state, self.duration) {
            (PlaybackState::Playing, Some(duration)) => {
                self.position = (self.position + delta).clamp(0.0, duration);
                true
            }
            _ => false,
        }
    }

    pub fn seek_forward(&mut self) -> bool {
        self.seek(self.config.seek_step)
    }

    pub fn seek_backward(&mut self) -> bool {
        self.seek(-self.config.seek_step)
    }

    /// Advance the playback position while playing
    pub fn tick(&mut self, elapsed: Duration) {
        if self.state != PlaybackState::Playing || self.paused {
            return;
        }
        let next = self.position + elapsed.as_secs_f64();
        self.position = match self.duration {
            Some(duration) => next.min(duration),
            None => next,
        };
    }
}
