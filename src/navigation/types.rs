use std::fmt;
use std::str::FromStr;

/// Named region of the screen that owns its own traversal order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Area {
    #[default]
    Sidebar,
    Content,
    Search,
    Chat,
}

impl Area {
    pub const ALL: [Area; 4] = [Area::Sidebar, Area::Content, Area::Search, Area::Chat];

    /// Short label shown by the area indicator
    pub fn label(&self) -> &'static str {
        match self {
            Area::Sidebar => "Menú",
            Area::Content => "Contenido",
            Area::Search => "Búsqueda",
            Area::Chat => "Chat",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Area::Sidebar => "sidebar",
            Area::Content => "content",
            Area::Search => "search",
            Area::Chat => "chat",
        }
    }
}

impl fmt::Display for Area {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Keys a TV remote can send to the navigation engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RemoteKey {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Enter,
}

impl RemoteKey {
    /// Direction for arrow keys, None for Enter
    pub fn direction(&self) -> Option<Direction> {
        match self {
            RemoteKey::ArrowUp => Some(Direction::Up),
            RemoteKey::ArrowDown => Some(Direction::Down),
            RemoteKey::ArrowLeft => Some(Direction::Left),
            RemoteKey::ArrowRight => Some(Direction::Right),
            RemoteKey::Enter => None,
        }
    }
}

impl FromStr for RemoteKey {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ArrowUp" => Ok(RemoteKey::ArrowUp),
            "ArrowDown" => Ok(RemoteKey::ArrowDown),
            "ArrowLeft" => Ok(RemoteKey::ArrowLeft),
            "ArrowRight" => Ok(RemoteKey::ArrowRight),
            "Enter" => Ok(RemoteKey::Enter),
            _ => Err(()),
        }
    }
}

/// Non-owning handle to a rendered element.
///
/// The UI layer owns the element itself; the handle is only a lookup key that
/// a [`FocusSurface`](super::FocusSurface) may or may not resolve.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ElementRef(String);

impl ElementRef {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn key(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ElementRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One focusable element registered with the navigation engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationItem {
    pub id: String,
    pub area: Area,
    pub element: ElementRef,
    pub row: Option<usize>,
    pub col: Option<usize>,
    pub can_receive_focus: bool,
}

impl NavigationItem {
    /// Item whose element handle shares its id
    pub fn new(id: impl Into<String>, area: Area) -> Self {
        let id = id.into();
        Self {
            element: ElementRef::new(id.clone()),
            id,
            area,
            row: None,
            col: None,
            can_receive_focus: true,
        }
    }

    pub fn with_element(mut self, element: ElementRef) -> Self {
        self.element = element;
        self
    }

    pub fn at(mut self, row: usize, col: usize) -> Self {
        self.row = Some(row);
        self.col = Some(col);
        self
    }

    /// Place the item in a wrapping grid of the given width
    pub fn in_grid(self, index: usize, columns: usize) -> Self {
        let columns = columns.max(1);
        self.at(index / columns, index % columns)
    }

    pub fn with_focus(mut self, can_receive_focus: bool) -> Self {
        self.can_receive_focus = can_receive_focus;
        self
    }
}

/// Snapshot of where the selection currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NavigationState {
    pub current_area: Area,
    pub current_index: usize,
    pub is_navigating: bool,
}
