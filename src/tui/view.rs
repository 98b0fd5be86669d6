use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::catalog::Channel;
use crate::movies::Movie;
use crate::navigation::Area;
use crate::player::{PlaybackState, format_time};
use crate::tui::app::{
    CHAT_INPUT_ID, MovieDetails, NowPlaying, SEARCH_INPUT_ID, Section, TvApp, category_element_id,
};
use crate::tui::theme::Theme;

const SIDEBAR_WIDTH: u16 = 24;
const CARD_HEIGHT: u16 = 5;
const CHAT_HEIGHT: u16 = 8;

/// First grid row to draw so the focused row sits in the middle when possible
pub fn grid_scroll_offset(focused_row: usize, total_rows: usize, visible_rows: usize) -> usize {
    if visible_rows == 0 || total_rows <= visible_rows {
        return 0;
    }
    focused_row
        .saturating_sub(visible_rows / 2)
        .min(total_rows - visible_rows)
}

pub fn render(frame: &mut Frame, app: &TvApp) {
    let theme = app.theme();
    let [header, body, footer] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    render_header(frame, app, header);

    let [sidebar, main] =
        Layout::horizontal([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(0)]).areas(body);
    render_sidebar(frame, app, sidebar);

    let [search, grid, chat] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(CARD_HEIGHT),
        Constraint::Length(CHAT_HEIGHT),
    ])
    .areas(main);
    render_search(frame, app, search);
    render_grid(frame, app, grid);
    render_chat(frame, app, chat);

    frame.render_widget(
        Paragraph::new("↑↓←→ navegar • Enter seleccionar • Tab sección • / buscar • c chat • Esc volver • q salir")
            .style(theme.muted_style())
            .alignment(Alignment::Center),
        footer,
    );

    if let Some(label) = app.indicator_label() {
        render_indicator(frame, theme, label);
    }

    if let Some(details) = app.details() {
        render_details(frame, theme, details);
    }

    if let Some(now_playing) = app.now_playing() {
        render_player(frame, theme, now_playing);
    }
}

fn bordered(theme: &Theme, title: &str, focused: bool) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .title(title.to_string())
        .border_style(if focused { theme.focus_border() } else { theme.idle_border() })
}

fn render_header(frame: &mut Frame, app: &TvApp, area: Rect) {
    let theme = app.theme();
    let line = Line::from(vec![
        Span::styled(" 365GUTY💙-TV ", theme.header_style()),
        Span::raw("  "),
        Span::styled(app.section().label(), theme.info_style()),
        Span::raw("  "),
        Span::styled(
            match app.section() {
                Section::Channels => format!("{} canales", app.grid_len()),
                Section::Movies => format!("{} títulos", app.grid_len()),
            },
            theme.muted_style(),
        ),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_sidebar(frame: &mut Frame, app: &TvApp, area: Rect) {
    let theme = app.theme();
    let in_area = app.nav().current_area() == Area::Sidebar;
    let lines: Vec<Line> = app
        .categories()
        .iter()
        .enumerate()
        .map(|(i, category)| {
            let style = if app.is_focused(&category_element_id(i)) {
                theme.focus_row()
            } else if category == app.selected_category() {
                theme.active_row()
            } else {
                Style::default().fg(theme.text)
            };
            Line::styled(format!(" {} ", category), style)
        })
        .collect();

    frame.render_widget(
        Paragraph::new(lines).block(bordered(theme, sidebar_title(app.section()), in_area)),
        area,
    );
}

fn sidebar_title(section: Section) -> &'static str {
    match section {
        Section::Channels => " Categorías ",
        Section::Movies => " Géneros ",
    }
}

fn render_search(frame: &mut Frame, app: &TvApp, area: Rect) {
    let theme = app.theme();
    let focused = app.is_focused(SEARCH_INPUT_ID);
    let text = if app.search_query().is_empty() && !focused {
        Span::styled("Buscar canal…", theme.muted_style())
    } else {
        Span::styled(format!("{}▏", app.search_query()), Style::default().fg(theme.text))
    };
    frame.render_widget(
        Paragraph::new(Line::from(text)).block(bordered(theme, " 🔍 Búsqueda ", focused)),
        area,
    );
}

fn render_grid(frame: &mut Frame, app: &TvApp, area: Rect) {
    let theme = app.theme();
    let title = match app.section() {
        Section::Channels => " 📺 Canales ",
        Section::Movies => " 🎬 Películas y series ",
    };
    let block = bordered(theme, title, app.nav().current_area() == Area::Content);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let ids: Vec<String> = match app.section() {
        Section::Channels => app.visible_channels().iter().map(Channel::element_id).collect(),
        Section::Movies => app.visible_movies().iter().map(Movie::element_id).collect(),
    };
    if ids.is_empty() {
        frame.render_widget(
            Paragraph::new("No hay contenido en esta categoría")
                .style(theme.muted_style())
                .alignment(Alignment::Center),
            inner,
        );
        return;
    }

    let columns = app.nav().config().columns;
    let total_rows = ids.len().div_ceil(columns);
    let visible_rows = (inner.height / CARD_HEIGHT) as usize;
    let focused_row = app
        .nav()
        .surface()
        .scroll_target()
        .and_then(|target| ids.iter().position(|id| id == target.key()))
        .map(|index| index / columns)
        .unwrap_or(0);
    let offset = grid_scroll_offset(focused_row, total_rows, visible_rows);

    let row_areas = Layout::vertical(vec![Constraint::Length(CARD_HEIGHT); visible_rows.max(1)]).split(inner);
    for (slot, row_area) in row_areas.iter().enumerate() {
        let row = offset + slot;
        if row >= total_rows {
            break;
        }
        let cells = Layout::horizontal(vec![Constraint::Ratio(1, columns as u32); columns]).split(*row_area);
        for (col, cell) in cells.iter().enumerate() {
            let index = row * columns + col;
            let Some(id) = ids.get(index) else {
                continue;
            };
            let focused = app.is_focused(id);
            match app.section() {
                Section::Channels => {
                    if let Some(channel) = app.visible_channels().get(index) {
                        render_card(frame, theme, channel, focused, *cell);
                    }
                }
                Section::Movies => {
                    if let Some(movie) = app.visible_movies().get(index) {
                        render_movie_card(frame, theme, movie, focused, *cell);
                    }
                }
            }
        }
    }
}

fn render_card(frame: &mut Frame, theme: &Theme, channel: &Channel, focused: bool, area: Rect) {
    let live = if channel.has_stream() {
        Span::styled("● VIVO", theme.live_style())
    } else {
        Span::styled("○ sin señal", theme.muted_style())
    };
    let lines = vec![
        Line::styled(channel.nombre.clone(), Style::default().fg(theme.text).add_modifier(Modifier::BOLD)),
        Line::styled(channel.categoria.clone(), Style::default().fg(theme.blue)),
        Line::from(live),
    ];
    let block = bordered(theme, &format!(" {} ", channel.numero), focused);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_movie_card(frame: &mut Frame, theme: &Theme, movie: &Movie, focused: bool, area: Rect) {
    let mut meta = vec![Span::styled(format!("★ {}", movie.rating), Style::default().fg(theme.yellow))];
    if let Some(year) = movie.year {
        meta.push(Span::styled(format!(" • {}", year), theme.muted_style()));
    }
    let lines = vec![
        Line::styled(movie.title.clone(), Style::default().fg(theme.text).add_modifier(Modifier::BOLD)),
        Line::from(meta),
        Line::styled(movie.genre.clone(), Style::default().fg(theme.blue)),
    ];
    let block = bordered(theme, &format!(" {} ", movie.kind.label()), focused);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_chat(frame: &mut Frame, app: &TvApp, area: Rect) {
    let theme = app.theme();
    let focused = app.is_focused(CHAT_INPUT_ID);
    let block = bordered(theme, " 💬 Chat ", focused);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [log_area, input_area] = Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(inner);
    let skip = app.chat_log().len().saturating_sub(log_area.height as usize);
    let lines: Vec<Line> = app
        .chat_log()
        .iter()
        .skip(skip)
        .map(|message| {
            Line::from(vec![
                Span::styled("Tú: ", theme.info_style()),
                Span::raw(message.clone()),
            ])
        })
        .collect();
    frame.render_widget(Paragraph::new(lines), log_area);

    let prompt = if focused {
        Line::from(vec![Span::styled("> ", theme.focus_border()), Span::raw(format!("{}▏", app.chat_input()))])
    } else {
        Line::styled("Presiona c para escribir", theme.muted_style())
    };
    frame.render_widget(Paragraph::new(prompt), input_area);
}

fn render_indicator(frame: &mut Frame, theme: &Theme, label: &str) {
    let full = frame.area();
    // Sits on the second row; tiny terminals have no room for it
    if full.height < 2 {
        return;
    }
    let width = (label.chars().count() as u16 + 4).min(full.width);
    let area = Rect::new(full.x + full.width.saturating_sub(width + 1), full.y + 1, width, 1).intersection(full);
    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(format!(" {} ", label))
            .style(Style::default().fg(theme.crust).bg(theme.red).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center),
        area,
    );
}

fn render_details(frame: &mut Frame, theme: &Theme, details: &MovieDetails) {
    let area = frame.area();
    frame.render_widget(Clear, area);

    let movie = details.movie();
    let label = Style::default().fg(theme.overlay0).add_modifier(Modifier::BOLD);
    let body = Style::default().fg(theme.text);

    let mut meta = Vec::new();
    if let Some(year) = movie.year {
        meta.push(year.to_string());
    }
    if !movie.duration.is_empty() {
        meta.push(movie.duration.clone());
    }
    if !movie.rating.is_empty() {
        meta.push(format!("★ {}", movie.rating));
    }
    if !movie.genre.is_empty() {
        meta.push(movie.genre.clone());
    }

    let play = match details.selected_episode() {
        Some(episode) if details.show_episodes() => format!("▶ Reproducir {}", episode.title),
        Some(_) => "▶ Ver primer episodio".to_string(),
        None => "▶ Reproducir".to_string(),
    };

    let mut lines = vec![
        Line::styled(
            format!("{} {}", if movie.is_series() { "📺" } else { "🎬" }, movie.title),
            body.add_modifier(Modifier::BOLD),
        ),
        Line::styled(meta.join(" • "), theme.info_style()),
        Line::raw(""),
        Line::styled(play, theme.error_style().add_modifier(Modifier::BOLD)),
        Line::raw(""),
        Line::styled("Sinopsis", label),
        Line::styled(
            if movie.description.is_empty() {
                "Sinopsis no disponible para este contenido.".to_string()
            } else {
                movie.description.clone()
            },
            body,
        ),
    ];
    if !movie.director.is_empty() {
        lines.push(Line::raw(""));
        lines.push(Line::styled("Director", label));
        lines.push(Line::styled(movie.director.clone(), body));
    }
    lines.push(Line::raw(""));
    lines.push(Line::styled("Reparto", label));
    lines.push(Line::styled(movie.cast_preview(), body));

    let mut selected_line = 0;
    if !details.episodes().is_empty() {
        lines.push(Line::raw(""));
        lines.push(Line::styled(
            format!(
                "Episodios ({}) • E para {}",
                details.episodes().len(),
                if details.show_episodes() { "ocultar" } else { "mostrar" }
            ),
            label,
        ));
        if details.show_episodes() {
            let selected_id = details.selected_episode().map(|e| e.id);
            for (season, episodes) in movie.episodes_by_season() {
                lines.push(Line::styled(format!("Temporada {}", season), Style::default().fg(theme.blue)));
                for episode in episodes {
                    let selected = Some(episode.id) == selected_id;
                    if selected {
                        selected_line = lines.len();
                    }
                    let text = format!(
                        "{} {}. {}  {}",
                        if selected { "▶" } else { " " },
                        episode.episode_number,
                        episode.title,
                        episode.duration
                    );
                    lines.push(if selected {
                        Line::styled(text, theme.focus_row())
                    } else {
                        Line::styled(text, body)
                    });
                }
            }
        }
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", movie.kind.label()))
        .border_style(theme.focus_border())
        .style(Style::default().bg(theme.base));
    let visible = block.inner(area).height as usize;
    let scroll = selected_line.saturating_sub(visible.saturating_sub(2));
    frame.render_widget(
        Paragraph::new(Text::from(lines))
            .block(block)
            .wrap(Wrap { trim: true })
            .scroll((scroll as u16, 0)),
        area,
    );

    if area.height < 3 {
        return;
    }
    let hint = Rect::new(area.x, area.y + area.height - 2, area.width, 1);
    frame.render_widget(
        Paragraph::new("Presiona ESC o Retroceso para volver • Enter para reproducir • ↑↓ episodios")
            .style(theme.muted_style())
            .alignment(Alignment::Center),
        hint,
    );
}

fn render_player(frame: &mut Frame, theme: &Theme, now_playing: &NowPlaying) {
    let area = frame.area();
    frame.render_widget(Clear, area);

    let media = &now_playing.media;
    let session = &now_playing.session;
    let subtitle = media.subtitle();

    let mut lines = match session.state() {
        PlaybackState::Loading => vec![
            Line::styled(format!("Conectando con {}...", media.title()), Style::default().fg(theme.text)),
            Line::styled(subtitle.clone(), theme.info_style()),
        ],
        PlaybackState::Error => vec![
            Line::styled("📺 Señal no disponible", theme.error_style().add_modifier(Modifier::BOLD)),
            Line::styled(
                if media.is_live() {
                    format!("El canal {} no está transmitiendo en este momento", media.title())
                } else {
                    format!("No se pudo cargar {}", media.title())
                },
                Style::default().fg(theme.subtext0),
            ),
            Line::styled(subtitle.clone(), theme.info_style()),
            Line::raw(""),
            Line::styled("Enter/R reintentar • Esc volver", Style::default().fg(theme.yellow)),
        ],
        PlaybackState::Playing => {
            let mut lines = vec![
                Line::styled(media.title().to_string(), Style::default().fg(theme.text).add_modifier(Modifier::BOLD)),
                Line::styled(subtitle.clone(), theme.info_style()),
                if session.is_paused() {
                    Line::styled("⏸ EN PAUSA", Style::default().fg(theme.yellow))
                } else if media.is_live() {
                    Line::styled("● EN VIVO", theme.success_style())
                } else {
                    Line::styled("▶ Reproduciendo", theme.success_style())
                },
            ];
            if let Some(duration) = session.duration() {
                lines.push(Line::raw(format!(
                    "{} / {}",
                    format_time(session.position()),
                    format_time(duration)
                )));
            }
            lines
        }
    };

    if session.info_visible() && session.state() != PlaybackState::Loading && !media.description().is_empty() {
        lines.push(Line::raw(""));
        lines.push(Line::styled(media.description().to_string(), Style::default().fg(theme.subtext0)));
    }

    if session.controls_visible() && session.state() != PlaybackState::Loading {
        lines.push(Line::raw(""));
        lines.push(Line::styled(
            format!(
                "{}  •  {}  •  {}",
                if session.is_muted() { "🔇 Silenciado" } else { "🔊 Sonido" },
                media.title(),
                session.format().mime_type().unwrap_or("directo")
            ),
            Style::default().fg(theme.lavender),
        ));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.focus_border())
        .style(Style::default().bg(theme.base));
    frame.render_widget(
        Paragraph::new(Text::from(lines))
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        area,
    );

    if area.height < 3 {
        return;
    }
    let hint = Rect::new(area.x, area.y + area.height - 2, area.width, 1);
    frame.render_widget(
        Paragraph::new("Presiona ESC para volver • M para silenciar • I para información • ←→ para adelantar o retroceder")
            .style(theme.muted_style())
            .alignment(Alignment::Center),
        hint,
    );
}
