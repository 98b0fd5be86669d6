use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use guty_tv::catalog::ChannelCatalog;
use guty_tv::config::Config;
use guty_tv::movies::MovieCatalog;
use guty_tv::navigation::Area;
use guty_tv::player::PlaybackState;
use guty_tv::tui::{Section, TvApp};
use std::time::{Duration, Instant};

const CHANNELS: &str = r#"{
    "canales": [
        {"id": 1, "numero": "01", "nombre": "Uno", "categoria": "Nacional", "url": ""},
        {"id": 2, "numero": "02", "nombre": "Dos", "categoria": "Deportes", "url": "https://streams.example.com/dos/index.m3u8"},
        {"id": 3, "numero": "03", "nombre": "Tres", "categoria": "Nacional", "url": "https://streams.example.com/tres/index.m3u8"},
        {"id": 4, "numero": "04", "nombre": "Cuatro", "categoria": "Deportes", "url": ""},
        {"id": 5, "numero": "05", "nombre": "Cinco", "categoria": "Películas", "url": "https://streams.example.com/cinco.mp4"},
        {"id": 6, "numero": "06", "nombre": "Seis", "categoria": "Nacional", "url": "https://streams.example.com/seis/index.m3u8"},
        {"id": 7, "numero": "07", "nombre": "Siete", "categoria": "Películas", "url": "https://streams.example.com/siete/index.m3u8"},
        {"id": 8, "numero": "08", "nombre": "Ocho", "categoria": "Nacional", "url": "https://streams.example.com/ocho/index.m3u8"}
    ]
}"#;

const MOVIES: &str = r#"{
    "peliculas": [
        {"id": 1, "title": "Roma", "duration": "2h 15min", "genre": "Drama", "type": "movie",
         "videoUrl": "https://cdn.example.com/roma.mp4"},
        {"id": 2, "title": "Coco", "duration": "1h 45min", "genre": "Animación", "type": "movie",
         "videoUrl": "https://cdn.example.com/coco.mp4"},
        {"id": 3, "title": "La Casa de Papel", "duration": "50 min", "genre": "Suspenso", "type": "series",
         "episodes": [
            {"id": 32, "title": "La Casa de Papel - T1E2", "season": 1, "episodeNumber": 2,
             "duration": "48 min", "videoUrl": "https://cdn.example.com/casa/t1e2.mp4"},
            {"id": 31, "title": "La Casa de Papel - T1E1", "season": 1, "episodeNumber": 1,
             "duration": "50 min", "videoUrl": "https://cdn.example.com/casa/t1e1.mp4"}
         ]}
    ]
}"#;

/// App with focus applied immediately so each key lands at once
fn app() -> TvApp {
    let mut config = Config::default();
    config.settings.settle_delay_ms = 0;
    TvApp::new(&config, ChannelCatalog::from_json(CHANNELS).unwrap())
        .with_movies(MovieCatalog::from_json(MOVIES).unwrap())
}

fn press(app: &mut TvApp, code: KeyCode, now: Instant) -> bool {
    app.handle_key_at(KeyEvent::new(code, KeyModifiers::NONE), now)
}

fn type_text(app: &mut TvApp, text: &str, now: Instant) {
    for c in text.chars() {
        press(app, KeyCode::Char(c), now);
    }
}

fn visible_ids(app: &TvApp) -> Vec<u32> {
    app.visible_channels().iter().map(|c| c.id).collect()
}

#[test]
fn test_starts_on_first_category() {
    let app = app();
    assert_eq!(app.categories(), ["Todos", "Nacional", "Deportes", "Películas"]);
    assert_eq!(app.nav().current_area(), Area::Sidebar);
    assert_eq!(app.nav().current_index(), 0);
    assert!(app.is_focused("category-0"));
    assert_eq!(app.visible_channels().len(), 8);
    assert_eq!(app.nav().registry().len(Area::Content), 8);
}

#[test]
fn test_category_filter_rebuilds_grid() {
    let mut app = app();
    let now = Instant::now();
    press(&mut app, KeyCode::Down, now);
    press(&mut app, KeyCode::Down, now);
    assert!(app.is_focused("category-2"));

    press(&mut app, KeyCode::Enter, now);
    assert_eq!(app.selected_category(), "Deportes");
    assert_eq!(visible_ids(&app), vec![2, 4]);
    assert_eq!(app.nav().registry().len(Area::Content), 2);
    assert_eq!(app.nav().registry().get(Area::Content, 1).unwrap().id, "tv-channel-4");

    // Sidebar row 2 maps to grid index 12, clamped to the last card
    press(&mut app, KeyCode::Right, now);
    assert_eq!(app.nav().current_area(), Area::Content);
    assert_eq!(app.nav().current_index(), 1);
    assert!(app.is_focused("tv-channel-4"));
    assert!(!app.is_focused("category-2"));
}

#[test]
fn test_channel_without_stream_shows_error_and_retries() {
    let mut app = app();
    let now = Instant::now();
    press(&mut app, KeyCode::Right, now);
    assert!(app.is_focused("tv-channel-1"));

    press(&mut app, KeyCode::Enter, now);
    let playing = app.now_playing().unwrap();
    assert_eq!(playing.media.channel().unwrap().id, 1);
    assert_eq!(playing.session.state(), PlaybackState::Loading);

    app.tick_at(now + Duration::from_secs(2));
    assert_eq!(app.now_playing().unwrap().session.state(), PlaybackState::Error);

    // Arrows drive the player, not the grid
    press(&mut app, KeyCode::Right, now + Duration::from_secs(3));
    assert_eq!(app.nav().current_index(), 0);

    press(&mut app, KeyCode::Enter, now + Duration::from_secs(3));
    assert_eq!(app.now_playing().unwrap().session.state(), PlaybackState::Loading);

    press(&mut app, KeyCode::Esc, now + Duration::from_secs(4));
    assert!(app.now_playing().is_none());
    assert!(app.is_focused("tv-channel-1"));
}

#[test]
fn test_player_controls() {
    let mut app = app();
    let now = Instant::now();
    press(&mut app, KeyCode::Right, now);
    press(&mut app, KeyCode::Right, now);
    press(&mut app, KeyCode::Enter, now);
    assert_eq!(app.now_playing().unwrap().media.channel().unwrap().id, 2);

    app.tick_at(now + Duration::from_secs(2));
    let session = &app.now_playing().unwrap().session;
    assert_eq!(session.state(), PlaybackState::Playing);
    assert!(session.controls_visible());

    app.tick_at(now + Duration::from_secs(3));
    assert!(!app.now_playing().unwrap().session.controls_visible());

    press(&mut app, KeyCode::Char(' '), now + Duration::from_secs(4));
    press(&mut app, KeyCode::Char('m'), now + Duration::from_secs(4));
    let session = &app.now_playing().unwrap().session;
    assert!(session.controls_visible());
    assert!(session.is_muted());

    press(&mut app, KeyCode::Enter, now + Duration::from_secs(4));
    assert!(app.now_playing().unwrap().session.is_paused());

    press(&mut app, KeyCode::Backspace, now + Duration::from_secs(5));
    assert!(app.now_playing().is_none());
}

#[test]
fn test_search_filters_and_jumps_into_grid() {
    let mut app = app();
    let now = Instant::now();
    press(&mut app, KeyCode::Char('/'), now);
    assert_eq!(app.nav().current_area(), Area::Search);
    assert!(app.is_focused("search-input"));

    // 'q' is text here, not quit
    type_text(&mut app, "sq", now);
    assert!(app.visible_channels().is_empty());
    press(&mut app, KeyCode::Backspace, now);
    assert_eq!(app.search_query(), "s");
    assert_eq!(visible_ids(&app), vec![2, 3, 6, 7]);

    type_text(&mut app, "ie", now);
    assert_eq!(visible_ids(&app), vec![7]);

    press(&mut app, KeyCode::Enter, now);
    assert_eq!(app.nav().current_area(), Area::Content);
    assert!(app.is_focused("tv-channel-7"));
}

#[test]
fn test_chat_messages_and_leaving_with_left() {
    let mut app = app();
    let now = Instant::now();
    press(&mut app, KeyCode::Char('c'), now);
    assert_eq!(app.nav().current_area(), Area::Chat);

    type_text(&mut app, "hola a todos", now);
    press(&mut app, KeyCode::Enter, now);
    assert_eq!(app.chat_log(), ["hola a todos"]);
    assert_eq!(app.chat_input(), "");

    // Blank messages are not sent
    type_text(&mut app, "   ", now);
    press(&mut app, KeyCode::Enter, now);
    assert_eq!(app.chat_log().len(), 1);

    press(&mut app, KeyCode::Left, now);
    assert_eq!(app.nav().current_area(), Area::Sidebar);
    assert_eq!(app.nav().current_index(), 0);
}

#[test]
fn test_escape_leaves_text_areas() {
    let mut app = app();
    let now = Instant::now();
    press(&mut app, KeyCode::Char('/'), now);
    press(&mut app, KeyCode::Esc, now);
    assert_eq!(app.nav().current_area(), Area::Sidebar);
    assert!(app.is_focused("category-0"));
}

#[test]
fn test_area_indicator_follows_arrows() {
    let mut app = app();
    let now = Instant::now();
    assert_eq!(app.indicator_label(), None);

    press(&mut app, KeyCode::Right, now);
    assert_eq!(app.indicator_label(), Some("Contenido"));

    app.tick_at(now + Duration::from_secs(2));
    assert_eq!(app.indicator_label(), None);
}

#[test]
fn test_settle_delay_applies_on_tick() {
    let config = Config::default();
    let mut app = TvApp::new(&config, ChannelCatalog::from_json(CHANNELS).unwrap());
    let now = Instant::now();

    press(&mut app, KeyCode::Right, now);
    assert!(app.nav().is_navigating());
    assert!(!app.is_focused("tv-channel-1"));

    // Dropped while the first move settles
    press(&mut app, KeyCode::Right, now + Duration::from_millis(10));
    assert_eq!(app.nav().current_index(), 0);

    app.tick_at(now + Duration::from_millis(50));
    assert!(!app.nav().is_navigating());
    assert!(app.is_focused("tv-channel-1"));
}

#[test]
fn test_quit_keys() {
    let mut first = app();
    assert!(!press(&mut first, KeyCode::Char('q'), Instant::now()));
    assert!(first.should_quit());

    let mut other = app();
    assert!(!other.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
}

#[test]
fn test_tab_switches_between_channels_and_movies() {
    let mut app = app();
    let now = Instant::now();
    press(&mut app, KeyCode::Tab, now);
    assert_eq!(app.section(), Section::Movies);
    assert_eq!(app.categories(), ["Todos", "Drama", "Animación", "Suspenso"]);
    assert_eq!(app.visible_movies().len(), 3);
    assert!(app.visible_channels().is_empty());
    assert_eq!(app.nav().registry().len(Area::Content), 3);
    assert!(app.is_focused("category-0"));

    press(&mut app, KeyCode::Tab, now);
    assert_eq!(app.section(), Section::Channels);
    assert_eq!(app.categories(), ["Todos", "Nacional", "Deportes", "Películas"]);
    assert_eq!(app.nav().registry().len(Area::Content), 8);
    assert_eq!(app.nav().registry().len(Area::Sidebar), 4);
}

#[test]
fn test_movie_playback_seeks_within_duration() {
    let mut app = app();
    let now = Instant::now();
    press(&mut app, KeyCode::Tab, now);
    press(&mut app, KeyCode::Right, now);
    assert!(app.is_focused("movie-1"));

    press(&mut app, KeyCode::Enter, now);
    assert_eq!(app.details().unwrap().movie().title, "Roma");
    assert!(app.now_playing().is_none());

    press(&mut app, KeyCode::Enter, now);
    assert!(app.details().is_none());
    let session = &app.now_playing().unwrap().session;
    assert_eq!(session.duration(), Some(8100.0));
    assert_eq!(session.state(), PlaybackState::Loading);

    // Time spent loading is not playback
    app.tick_at(now + Duration::from_secs(2));
    let session = &app.now_playing().unwrap().session;
    assert_eq!(session.state(), PlaybackState::Playing);
    assert_eq!(session.position(), 0.0);

    press(&mut app, KeyCode::Right, now + Duration::from_secs(2));
    assert_eq!(app.now_playing().unwrap().session.position(), 10.0);
    press(&mut app, KeyCode::Left, now + Duration::from_secs(2));
    press(&mut app, KeyCode::Left, now + Duration::from_secs(2));
    assert_eq!(app.now_playing().unwrap().session.position(), 0.0);

    app.tick_at(now + Duration::from_secs(5));
    assert_eq!(app.now_playing().unwrap().session.position(), 3.0);

    press(&mut app, KeyCode::Esc, now + Duration::from_secs(6));
    assert!(app.now_playing().is_none());
    assert!(app.is_focused("movie-1"));
}

#[test]
fn test_series_details_play_selected_episode() {
    let mut app = app();
    let now = Instant::now();
    press(&mut app, KeyCode::Tab, now);
    press(&mut app, KeyCode::Char('/'), now);
    type_text(&mut app, "casa", now);
    press(&mut app, KeyCode::Enter, now);
    assert!(app.is_focused("movie-3"));

    press(&mut app, KeyCode::Enter, now);
    let details = app.details().unwrap();
    assert!(!details.show_episodes());
    assert_eq!(details.selected_episode().unwrap().id, 31);

    press(&mut app, KeyCode::Down, now);
    press(&mut app, KeyCode::Down, now);
    let details = app.details().unwrap();
    assert!(details.show_episodes());
    assert_eq!(details.selected_episode().unwrap().id, 32);

    press(&mut app, KeyCode::Enter, now);
    let playing = app.now_playing().unwrap();
    assert_eq!(playing.media.title(), "La Casa de Papel - T1E2");
    assert_eq!(playing.session.duration(), Some(2880.0));
    assert!(playing.media.channel().is_none());
}

#[test]
fn test_details_close_without_playing() {
    let mut app = app();
    let now = Instant::now();
    press(&mut app, KeyCode::Tab, now);
    press(&mut app, KeyCode::Right, now);
    press(&mut app, KeyCode::Enter, now);
    assert!(app.details().is_some());

    press(&mut app, KeyCode::Esc, now);
    assert!(app.details().is_none());
    assert!(app.now_playing().is_none());
    assert!(app.is_focused("movie-1"));
}

#[test]
fn test_modified_keys_are_not_typed() {
    let mut app = app();
    let now = Instant::now();
    press(&mut app, KeyCode::Char('/'), now);
    app.handle_key_at(KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL), now);
    app.handle_key_at(KeyEvent::new(KeyCode::Char('x'), KeyModifiers::ALT), now);
    assert_eq!(app.search_query(), "");

    app.handle_key_at(KeyEvent::new(KeyCode::Char('S'), KeyModifiers::SHIFT), now);
    assert_eq!(app.search_query(), "S");

    press(&mut app, KeyCode::Esc, now);
    press(&mut app, KeyCode::Char('c'), now);
    assert_eq!(app.nav().current_area(), Area::Chat);
    app.handle_key_at(KeyEvent::new(KeyCode::Char('a'), KeyModifiers::ALT), now);
    assert_eq!(app.chat_input(), "");
}
