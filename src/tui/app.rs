use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::{debug, info};
use std::time::Instant;

use crate::catalog::{ALL_CATEGORIES, Channel, ChannelCatalog};
use crate::config::Config;
use crate::movies::{Episode, Movie, MovieCatalog, parse_duration};
use crate::navigation::{Area, ElementRef, NavigationEngine, NavigationItem, RemoteKey};
use crate::player::{PlaybackState, PlayerConfig, PlayerSession};
use crate::tui::indicator::AreaIndicator;
use crate::tui::surface::TerminalSurface;
use crate::tui::theme::Theme;

pub const SEARCH_INPUT_ID: &str = "search-input";
pub const CHAT_INPUT_ID: &str = "chat-input";
const CATEGORY_PREFIX: &str = "category-";

/// Map terminal keys onto the remote's keys
pub fn remote_key(code: KeyCode) -> Option<RemoteKey> {
    match code {
        KeyCode::Up => Some(RemoteKey::ArrowUp),
        KeyCode::Down => Some(RemoteKey::ArrowDown),
        KeyCode::Left => Some(RemoteKey::ArrowLeft),
        KeyCode::Right => Some(RemoteKey::ArrowRight),
        KeyCode::Enter => Some(RemoteKey::Enter),
        _ => None,
    }
}

pub fn category_element_id(index: usize) -> String {
    format!("{}{}", CATEGORY_PREFIX, index)
}

/// What the grid is browsing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Section {
    #[default]
    Channels,
    Movies,
}

impl Section {
    pub fn label(&self) -> &'static str {
        match self {
            Section::Channels => "TV en vivo",
            Section::Movies => "Películas y series",
        }
    }

    fn toggled(self) -> Self {
        match self {
            Section::Channels => Section::Movies,
            Section::Movies => Section::Channels,
        }
    }
}

/// Something the player can show
#[derive(Debug, Clone)]
pub enum Media {
    Channel(Channel),
    Movie { movie: Movie, episode: Option<Episode> },
}

impl Media {
    pub fn title(&self) -> &str {
        match self {
            Media::Channel(channel) => &channel.nombre,
            Media::Movie { episode: Some(episode), .. } => &episode.title,
            Media::Movie { movie, .. } => &movie.title,
        }
    }

    pub fn subtitle(&self) -> String {
        match self {
            Media::Channel(channel) => format!("Canal {} • {}", channel.numero, channel.categoria),
            Media::Movie { movie, episode: Some(episode) } => format!(
                "{} • Temporada {} • Episodio {}",
                movie.title, episode.season, episode.episode_number
            ),
            Media::Movie { movie, episode: None } => match movie.year {
                Some(year) => format!("{} • {} • {}", movie.kind.label(), year, movie.genre),
                None => format!("{} • {}", movie.kind.label(), movie.genre),
            },
        }
    }

    pub fn description(&self) -> &str {
        match self {
            Media::Channel(channel) => &channel.descripcion,
            Media::Movie { episode: Some(episode), .. } if !episode.description.is_empty() => {
                &episode.description
            }
            Media::Movie { movie, .. } => &movie.description,
        }
    }

    pub fn source(&self) -> &str {
        match self {
            Media::Channel(channel) => &channel.url,
            Media::Movie { episode: Some(episode), .. } => &episode.video_url,
            Media::Movie { movie, .. } => &movie.video_url,
        }
    }

    /// Runtime in seconds; live channels have none
    pub fn duration_secs(&self) -> Option<f64> {
        match self {
            Media::Channel(_) => None,
            Media::Movie { movie, episode: Some(episode) } => {
                parse_duration(&episode.duration).or_else(|| movie.duration_secs())
            }
            Media::Movie { movie, episode: None } => movie.duration_secs(),
        }
    }

    pub fn is_live(&self) -> bool {
        matches!(self, Media::Channel(_))
    }

    pub fn channel(&self) -> Option<&Channel> {
        match self {
            Media::Channel(channel) => Some(channel),
            Media::Movie { .. } => None,
        }
    }
}

/// Media on screen in the player overlay
#[derive(Debug, Clone)]
pub struct NowPlaying {
    pub media: Media,
    pub session: PlayerSession,
}

/// Details panel for a movie or series, with the episode picker
#[derive(Debug, Clone)]
pub struct MovieDetails {
    movie: Movie,
    episodes: Vec<Episode>,
    selected: usize,
    show_episodes: bool,
}

impl MovieDetails {
    fn new(movie: Movie) -> Self {
        let episodes = if movie.is_series() { movie.episodes_in_order() } else { Vec::new() };
        Self {
            movie,
            episodes,
            selected: 0,
            show_episodes: false,
        }
    }

    pub fn movie(&self) -> &Movie {
        &self.movie
    }

    pub fn episodes(&self) -> &[Episode] {
        &self.episodes
    }

    pub fn show_episodes(&self) -> bool {
        self.show_episodes
    }

    /// Episode Enter would play; the first one until another is picked
    pub fn selected_episode(&self) -> Option<&Episode> {
        self.episodes.get(self.selected)
    }

    fn select_next(&mut self) {
        if self.episodes.is_empty() {
            return;
        }
        self.show_episodes = true;
        self.selected = (self.selected + 1).min(self.episodes.len() - 1);
    }

    fn select_previous(&mut self) {
        if self.episodes.is_empty() {
            return;
        }
        self.show_episodes = true;
        self.selected = self.selected.saturating_sub(1);
    }

    fn toggle_episodes(&mut self) {
        if !self.episodes.is_empty() {
            self.show_episodes = !self.show_episodes;
        }
    }
}

/// State of the browser: sidebar of filters, content grid, search field,
/// chat panel, the movie details panel and the player overlay.
pub struct TvApp {
    catalog: ChannelCatalog,
    movies: MovieCatalog,
    section: Section,
    categories: Vec<String>,
    selected_category: String,
    search_query: String,
    visible: Vec<Channel>,
    visible_movies: Vec<Movie>,
    chat_input: String,
    chat_log: Vec<String>,
    nav: NavigationEngine<TerminalSurface>,
    indicator: AreaIndicator,
    player_config: PlayerConfig,
    details: Option<MovieDetails>,
    now_playing: Option<NowPlaying>,
    should_quit: bool,
    last_tick: Instant,
    theme: Theme,
}

impl TvApp {
    pub fn new(config: &Config, catalog: ChannelCatalog) -> Self {
        let categories = catalog.categories();
        let mut app = Self {
            catalog,
            movies: MovieCatalog::default(),
            section: Section::Channels,
            categories,
            selected_category: ALL_CATEGORIES.to_string(),
            search_query: String::new(),
            visible: Vec::new(),
            visible_movies: Vec::new(),
            chat_input: String::new(),
            chat_log: Vec::new(),
            nav: NavigationEngine::with_config(TerminalSurface::new(), config.navigation()),
            indicator: AreaIndicator::new(config.indicator_hide()),
            player_config: config.player(),
            details: None,
            now_playing: None,
            should_quit: false,
            last_tick: Instant::now(),
            theme: Theme::default(),
        };

        app.mount_sidebar();
        app.mount(NavigationItem::new(SEARCH_INPUT_ID, Area::Search).with_focus(true));
        app.mount(NavigationItem::new(CHAT_INPUT_ID, Area::Chat).with_focus(true));

        app.rebuild_grid();
        app.nav.focus_initial();
        app
    }

    /// Attach the movie and series catalog browsed with Tab
    pub fn with_movies(mut self, movies: MovieCatalog) -> Self {
        self.movies = movies;
        self
    }

    pub fn nav(&self) -> &NavigationEngine<TerminalSurface> {
        &self.nav
    }

    pub fn catalog(&self) -> &ChannelCatalog {
        &self.catalog
    }

    pub fn movies(&self) -> &MovieCatalog {
        &self.movies
    }

    pub fn section(&self) -> Section {
        self.section
    }

    /// Sidebar filters: channel categories or movie genres
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn selected_category(&self) -> &str {
        &self.selected_category
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn visible_channels(&self) -> &[Channel] {
        &self.visible
    }

    pub fn visible_movies(&self) -> &[Movie] {
        &self.visible_movies
    }

    /// Cards in the grid for the current section
    pub fn grid_len(&self) -> usize {
        match self.section {
            Section::Channels => self.visible.len(),
            Section::Movies => self.visible_movies.len(),
        }
    }

    pub fn chat_input(&self) -> &str {
        &self.chat_input
    }

    pub fn chat_log(&self) -> &[String] {
        &self.chat_log
    }

    pub fn details(&self) -> Option<&MovieDetails> {
        self.details.as_ref()
    }

    pub fn now_playing(&self) -> Option<&NowPlaying> {
        self.now_playing.as_ref()
    }

    pub fn indicator_label(&self) -> Option<&'static str> {
        self.indicator.label()
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Whether the element currently carries the focus marker
    pub fn is_focused(&self, element_id: &str) -> bool {
        self.nav.surface().is_marked(&ElementRef::new(element_id))
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        self.handle_key_at(key, Instant::now())
    }

    /// Handle one key press. Returns false once the app should exit.
    pub fn handle_key_at(&mut self, key: KeyEvent, now: Instant) -> bool {
        if key.kind != KeyEventKind::Press {
            return true;
        }

        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return false;
        }

        if self.now_playing.is_some() {
            self.handle_player_key(key.code, now);
            return true;
        }

        if self.details.is_some() {
            self.handle_details_key(key.code, now);
            return true;
        }

        let area = self.nav.current_area();
        if matches!(area, Area::Search | Area::Chat) && self.handle_text_key(area, key) {
            return true;
        }

        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('/') => self.nav.switch_to_area(Area::Search, 0),
            KeyCode::Char('c') => self.nav.switch_to_area(Area::Chat, 0),
            KeyCode::Tab => self.switch_section(),
            code => {
                if let Some(remote) = remote_key(code) {
                    self.nav.handle_remote_input_at(remote, now);
                    if remote.direction().is_some() {
                        self.indicator.show_at(self.nav.current_area(), now);
                    }
                    self.process_activations(now);
                }
            }
        }

        !self.should_quit
    }

    pub fn tick(&mut self) {
        self.tick_at(Instant::now())
    }

    /// Fire due timers across the engine, indicator and player
    pub fn tick_at(&mut self, now: Instant) {
        let elapsed = now.saturating_duration_since(self.last_tick);
        self.last_tick = now;

        self.nav.poll_timers_at(now);
        self.indicator.poll_at(now);
        if let Some(now_playing) = self.now_playing.as_mut() {
            // Advance first so time spent loading never counts as playback
            now_playing.session.tick(elapsed);
            now_playing.session.poll_timers_at(now);
        }
    }

    fn mount(&mut self, item: NavigationItem) {
        self.nav.surface_mut().mount(item.element.clone());
        self.nav.register(item);
    }

    /// Unregister every item of an area and drop its elements from the surface
    fn clear_area(&mut self, area: Area) {
        let stale: Vec<ElementRef> = self
            .nav
            .registry()
            .items(area)
            .iter()
            .map(|item| item.element.clone())
            .collect();
        for element in &stale {
            self.nav.surface_mut().unmount(element);
        }
        self.nav.clear_area(area);
    }

    fn mount_sidebar(&mut self) {
        for i in 0..self.categories.len() {
            self.mount(NavigationItem::new(category_element_id(i), Area::Sidebar));
        }
    }

    /// Swap between live channels and movies, resetting the filters
    fn switch_section(&mut self) {
        self.section = self.section.toggled();
        info!("Browsing {}", self.section.label());

        self.clear_area(Area::Sidebar);
        self.categories = match self.section {
            Section::Channels => self.catalog.categories(),
            Section::Movies => self.movies.genres(),
        };
        self.mount_sidebar();

        self.selected_category = ALL_CATEGORIES.to_string();
        self.search_query.clear();
        self.rebuild_grid();
        self.nav.switch_to_area(Area::Sidebar, 0);
    }

    /// Swap the grid's cards for the items matching the filter and query
    fn rebuild_grid(&mut self) {
        self.clear_area(Area::Content);

        let ids: Vec<String> = match self.section {
            Section::Channels => {
                self.visible_movies.clear();
                self.visible = self
                    .catalog
                    .search(&self.selected_category, &self.search_query)
                    .into_iter()
                    .cloned()
                    .collect();
                self.visible.iter().map(Channel::element_id).collect()
            }
            Section::Movies => {
                self.visible.clear();
                self.visible_movies = self
                    .movies
                    .search(&self.selected_category, &self.search_query)
                    .into_iter()
                    .cloned()
                    .collect();
                self.visible_movies.iter().map(Movie::element_id).collect()
            }
        };

        let columns = self.nav.config().columns;
        let movie_cards = self.section == Section::Movies;
        for (index, id) in ids.into_iter().enumerate() {
            self.mount(
                NavigationItem::new(id, Area::Content)
                    .in_grid(index, columns)
                    .with_focus(movie_cards),
            );
        }
        debug!(
            "grid rebuilt: {} cards in '{}' matching '{}'",
            self.grid_len(),
            self.selected_category,
            self.search_query
        );

        if self.nav.current_area() == Area::Content {
            self.nav.refocus();
        }
    }

    fn handle_text_key(&mut self, area: Area, key: KeyEvent) -> bool {
        match key.code {
            // Shortcuts are swallowed, not typed
            KeyCode::Char(_) if key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => true,
            KeyCode::Char(c) => {
                if area == Area::Search {
                    self.search_query.push(c);
                    self.rebuild_grid();
                } else {
                    self.chat_input.push(c);
                }
                true
            }
            KeyCode::Backspace => {
                if area == Area::Search {
                    if self.search_query.pop().is_some() {
                        self.rebuild_grid();
                    }
                } else {
                    self.chat_input.pop();
                }
                true
            }
            KeyCode::Esc => {
                self.nav.switch_to_area(Area::Sidebar, 0);
                true
            }
            KeyCode::Enter if area == Area::Search => {
                if self.grid_len() > 0 {
                    self.nav.switch_to_area(Area::Content, 0);
                }
                true
            }
            _ => false,
        }
    }

    fn process_activations(&mut self, now: Instant) {
        for element in self.nav.surface_mut().take_activations() {
            let key = element.key();
            if let Some(index) = key.strip_prefix(CATEGORY_PREFIX).and_then(|i| i.parse::<usize>().ok()) {
                self.select_category(index);
            } else if key == CHAT_INPUT_ID {
                self.send_chat_message();
            } else if let Some(channel) = self.catalog.find_by_element_id(key).cloned() {
                self.open_media(Media::Channel(channel), now);
            } else if let Some(movie) = self.movies.find_by_element_id(key).cloned() {
                debug!("Opening details for '{}'", movie.title);
                self.details = Some(MovieDetails::new(movie));
            }
        }
    }

    fn select_category(&mut self, index: usize) {
        if let Some(category) = self.categories.get(index).cloned() {
            info!("Filtering {} by '{}'", self.section.label(), category);
            self.selected_category = category;
            self.rebuild_grid();
        }
    }

    fn send_chat_message(&mut self) {
        let message = self.chat_input.trim();
        if message.is_empty() {
            return;
        }
        self.chat_log.push(message.to_string());
        self.chat_input.clear();
    }

    fn open_media(&mut self, media: Media, now: Instant) {
        let mut session = PlayerSession::open_at(media.title(), media.source(), self.player_config, now);
        if let Some(duration) = media.duration_secs() {
            session.set_duration(duration);
        }
        self.now_playing = Some(NowPlaying { media, session });
    }

    fn close_player(&mut self) {
        if let Some(now_playing) = self.now_playing.take() {
            info!("Closing player for '{}'", now_playing.media.title());
        }
        self.nav.refocus();
    }

    fn handle_details_key(&mut self, code: KeyCode, now: Instant) {
        let Some(details) = self.details.as_mut() else {
            return;
        };
        match code {
            KeyCode::Esc | KeyCode::Backspace => {
                self.details = None;
                self.nav.refocus();
            }
            KeyCode::Up => details.select_previous(),
            KeyCode::Down => details.select_next(),
            KeyCode::Char('e') | KeyCode::Char('E') => details.toggle_episodes(),
            KeyCode::Enter => {
                let episode = details.selected_episode().cloned();
                let movie = details.movie.clone();
                self.details = None;
                self.open_media(Media::Movie { movie, episode }, now);
            }
            _ => {}
        }
    }

    fn handle_player_key(&mut self, code: KeyCode, now: Instant) {
        if matches!(code, KeyCode::Esc | KeyCode::Backspace) {
            self.close_player();
            return;
        }

        let Some(now_playing) = self.now_playing.as_mut() else {
            return;
        };
        let session = &mut now_playing.session;
        match code {
            KeyCode::Char('m') | KeyCode::Char('M') => session.toggle_mute(),
            KeyCode::Char('i') | KeyCode::Char('I') => session.toggle_info(),
            KeyCode::Char(' ') | KeyCode::Up | KeyCode::Down => session.show_controls_temporarily_at(now),
            KeyCode::Left => {
                session.seek_backward();
                session.show_controls_temporarily_at(now);
            }
            KeyCode::Right => {
                session.seek_forward();
                session.show_controls_temporarily_at(now);
            }
            KeyCode::Enter => {
                if session.state() == PlaybackState::Error {
                    session.retry_at(now);
                } else {
                    session.toggle_pause();
                }
            }
            KeyCode::Char('r') | KeyCode::Char('R') => {
                session.retry_at(now);
            }
            _ => {}
        }
    }
}
