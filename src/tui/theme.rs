/*
Catppuccin Mocha, the subset the channel grid uses

Red,f38ba8
Peach,fab387
Yellow,f9e2af
Green,a6e3a1
Teal,94e2d5
Sky,89dceb
Blue,89b4fa
Lavender,b4befe
Text,cdd6f4
Subtext 0,a6adc8
Overlay 0,6c7086
Surface 1,45475a
Surface 0,313244
Base,1e1e2e
Crust,11111b
*/

use ratatui::style::{Color, Modifier, Style};

#[derive(Debug, Clone)]
pub struct Theme {
    pub red: Color,
    pub peach: Color,
    pub yellow: Color,
    pub green: Color,
    pub teal: Color,
    pub sky: Color,
    pub blue: Color,
    pub lavender: Color,
    pub text: Color,
    pub subtext0: Color,
    pub overlay0: Color,
    pub surface1: Color,
    pub surface0: Color,
    pub base: Color,
    pub crust: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::mocha()
    }
}

impl Theme {
    pub fn mocha() -> Self {
        Self {
            red: Color::Rgb(0xf3, 0x8b, 0xa8),
            peach: Color::Rgb(0xfa, 0xb3, 0x87),
            yellow: Color::Rgb(0xf9, 0xe2, 0xaf),
            green: Color::Rgb(0xa6, 0xe3, 0xa1),
            teal: Color::Rgb(0x94, 0xe2, 0xd5),
            sky: Color::Rgb(0x89, 0xdc, 0xeb),
            blue: Color::Rgb(0x89, 0xb4, 0xfa),
            lavender: Color::Rgb(0xb4, 0xbe, 0xfe),
            text: Color::Rgb(0xcd, 0xd6, 0xf4),
            subtext0: Color::Rgb(0xa6, 0xad, 0xc8),
            overlay0: Color::Rgb(0x6c, 0x70, 0x86),
            surface1: Color::Rgb(0x45, 0x47, 0x5a),
            surface0: Color::Rgb(0x31, 0x32, 0x44),
            base: Color::Rgb(0x1e, 0x1e, 0x2e),
            crust: Color::Rgb(0x11, 0x11, 0x1b),
        }
    }

    pub fn error_style(&self) -> Style {
        Style::default().fg(self.red)
    }

    pub fn success_style(&self) -> Style {
        Style::default().fg(self.green)
    }

    pub fn info_style(&self) -> Style {
        Style::default().fg(self.sky)
    }

    pub fn muted_style(&self) -> Style {
        Style::default().fg(self.overlay0)
    }

    /// Border of an element carrying the focus marker
    pub fn focus_border(&self) -> Style {
        Style::default().fg(self.peach).add_modifier(Modifier::BOLD)
    }

    pub fn idle_border(&self) -> Style {
        Style::default().fg(self.surface1)
    }

    /// Highlighted row in a flat list
    pub fn focus_row(&self) -> Style {
        Style::default()
            .fg(self.crust)
            .bg(self.peach)
            .add_modifier(Modifier::BOLD)
    }

    /// Row that is selected but not focused (the active category)
    pub fn active_row(&self) -> Style {
        Style::default().fg(self.blue).add_modifier(Modifier::BOLD)
    }

    pub fn live_style(&self) -> Style {
        Style::default().fg(self.green).add_modifier(Modifier::BOLD)
    }

    pub fn header_style(&self) -> Style {
        Style::default().fg(self.text).bg(self.blue).add_modifier(Modifier::BOLD)
    }
}
