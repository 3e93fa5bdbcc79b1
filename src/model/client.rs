use serde::{Deserialize, Serialize};

use crate::model::group::GroupId;
use crate::model::screen::ScreenId;
use crate::model::size_hints::SizeHints;
use crate::model::title_history::TitleHistory;
use crate::sys::geometry::{Point, Rect};
use crate::sys::window_system::{ClassHint, Protocols, WindowId, WmState};

/// Temporary border emphasis shown while editing groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Highlight {
    #[default]
    None,
    Group,
    Ungroup,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ClientFlags {
    pub hidden: bool,
    pub ignore: bool,
    pub freeze: bool,
    pub vmaximized: bool,
    pub hmaximized: bool,
    pub expanded: bool,
    /// The client accepts input focus through `SetInputFocus`.
    pub input: bool,
    pub highlight: Highlight,
}

impl ClientFlags {
    pub fn maximized(&self) -> bool { self.vmaximized && self.hmaximized }

    pub fn any_maximized(&self) -> bool { self.vmaximized || self.hmaximized }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Client {
    pub id: WindowId,
    pub screen: ScreenId,
    pub group: Option<GroupId>,

    pub geometry: Rect,
    pub border_width: i32,
    /// Border width the client returns to when it leaves a maximized state.
    pub default_border: i32,
    /// Only meaningful on the axes currently maximized, or all of it while
    /// expanded.
    pub saved_geometry: Rect,
    /// Index into the screen's physical regions of the region holding the
    /// window centre.
    pub region: Option<usize>,

    pub state: WmState,
    pub flags: ClientFlags,
    pub active: bool,
    pub protocols: Protocols,
    pub hints: SizeHints,

    /// Pointer position relative to the window, recorded when focus leaves it.
    pub saved_pointer: Option<Point>,

    pub titles: TitleHistory,
    pub class: ClassHint,
    pub colormap: u32,
    /// False when the application asked for no decorations.
    pub decorated: bool,
}

impl Client {
    pub fn new(id: WindowId, screen: ScreenId, geometry: Rect, default_border: i32) -> Client {
        Client {
            id,
            screen,
            group: None,
            geometry,
            border_width: default_border,
            default_border,
            saved_geometry: geometry,
            region: None,
            state: WmState::Normal,
            flags: ClientFlags::default(),
            active: false,
            protocols: Protocols::empty(),
            hints: SizeHints::default(),
            saved_pointer: None,
            titles: TitleHistory::new(),
            class: ClassHint::default(),
            colormap: 0,
            decorated: true,
        }
    }

    /// Geometry including the border on every side.
    pub fn outer(&self) -> Rect { self.geometry.outer(self.border_width) }

    pub fn center(&self) -> Point { self.geometry.center() }

    pub fn is_visible(&self) -> bool { !self.flags.hidden }

    /// Visible and not excluded from cycling and tiling.
    pub fn is_eligible(&self) -> bool { !self.flags.hidden && !self.flags.ignore }

    pub fn title(&self) -> &str { self.titles.current() }

    /// Remembers `position` if it lies inside the window, otherwise forgets any
    /// saved position.
    pub fn save_pointer(&mut self, position: Point) {
        let inside = position.x >= 0
            && position.x < self.geometry.w
            && position.y >= 0
            && position.y < self.geometry.h;
        self.saved_pointer = inside.then_some(position);
    }

    /// Where the pointer goes when warped to this client, relative to the
    /// window.
    pub fn pointer_target(&self) -> Point {
        self.saved_pointer
            .unwrap_or_else(|| Point::new(self.geometry.w / 2, self.geometry.h / 2))
    }

    /// Drops both maximize flags and returns to the default border.
    pub fn reset_maximize(&mut self) {
        self.flags.vmaximized = false;
        self.flags.hmaximized = false;
        self.border_width = self.default_border;
    }
}
