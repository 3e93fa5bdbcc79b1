//! The primitives the window manager core needs from the windowing system.
//!
//! Everything the core knows about the display server goes through
//! [`WindowSystem`]. Queries return `Option` when the server may not have the
//! data; callers fall back to defaults. Mutations are fire-and-forget: the
//! implementation reports its own failures.

use std::fmt;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::sys::geometry::{Point, Rect};

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(transparent)]
pub struct WindowId(u32);

impl WindowId {
    pub const fn new(id: u32) -> WindowId { WindowId(id) }

    pub fn get(&self) -> u32 { self.0 }
}

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{:#x}", self.0) }
}

/// ICCCM `WM_STATE` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WmState {
    Withdrawn,
    #[default]
    Normal,
    Iconic,
}

impl WmState {
    pub fn to_raw(self) -> u32 {
        match self {
            WmState::Withdrawn => 0,
            WmState::Normal => 1,
            WmState::Iconic => 3,
        }
    }

    pub fn from_raw(raw: u32) -> Option<WmState> {
        match raw {
            0 => Some(WmState::Withdrawn),
            1 => Some(WmState::Normal),
            3 => Some(WmState::Iconic),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowAttributes {
    pub geometry: Rect,
    pub viewable: bool,
    pub override_redirect: bool,
    pub colormap: u32,
}

bitflags! {
    /// `WM_NORMAL_HINTS` flags (ICCCM 4.1.2.3).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
    pub struct SizeHintFlags: u32 {
        const US_POSITION = 1 << 0;
        const US_SIZE = 1 << 1;
        const P_POSITION = 1 << 2;
        const P_SIZE = 1 << 3;
        const P_MIN_SIZE = 1 << 4;
        const P_MAX_SIZE = 1 << 5;
        const P_RESIZE_INC = 1 << 6;
        const P_ASPECT = 1 << 7;
        const P_BASE_SIZE = 1 << 8;
        const P_WIN_GRAVITY = 1 << 9;
    }
}

/// `WM_NORMAL_HINTS` as stored on the window. Fields are only meaningful when
/// the matching flag is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RawSizeHints {
    pub flags: SizeHintFlags,
    pub min_width: i32,
    pub min_height: i32,
    pub max_width: i32,
    pub max_height: i32,
    pub width_inc: i32,
    pub height_inc: i32,
    /// (numerator, denominator) as (x, y).
    pub min_aspect: (i32, i32),
    pub max_aspect: (i32, i32),
    pub base_width: i32,
    pub base_height: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WmHints {
    pub input: Option<bool>,
    pub initial_state: Option<WmState>,
}

bitflags! {
    /// Optional `WM_PROTOCOLS` the client advertises.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
    pub struct Protocols: u8 {
        const DELETE_WINDOW = 1 << 0;
        const TAKE_FOCUS = 1 << 1;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProtocolMessage {
    DeleteWindow,
    TakeFocus,
}

/// The subset of `_MOTIF_WM_HINTS` the manager honours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MotifHints {
    pub flags: u32,
    pub decorations: u32,
}

impl MotifHints {
    pub const HINTS_DECORATIONS: u32 = 1 << 1;
    pub const DECOR_ALL: u32 = 1 << 0;
    pub const DECOR_BORDER: u32 = 1 << 1;

    /// The client asked for no border at all.
    pub fn disables_border(&self) -> bool {
        self.flags & Self::HINTS_DECORATIONS != 0
            && self.decorations & Self::DECOR_ALL == 0
            && self.decorations & Self::DECOR_BORDER == 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ClassHint {
    pub name: String,
    pub class: String,
}

/// The EWMH `_NET_WM_STATE` bits the manager publishes and restores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NetWmState {
    pub maximized_vert: bool,
    pub maximized_horz: bool,
    pub hidden: bool,
}

pub trait WindowSystem {
    fn window_attributes(&self, window: WindowId) -> Option<WindowAttributes>;
    fn size_hints(&self, window: WindowId) -> Option<RawSizeHints>;
    fn wm_hints(&self, window: WindowId) -> Option<WmHints>;
    fn protocols(&self, window: WindowId) -> Protocols;
    fn motif_hints(&self, window: WindowId) -> Option<MotifHints>;
    fn class_hint(&self, window: WindowId) -> Option<ClassHint>;
    /// `_NET_WM_NAME`, falling back to `WM_NAME`.
    fn title(&self, window: WindowId) -> Option<String>;
    fn transient_for(&self, window: WindowId) -> Option<WindowId>;
    fn wm_state(&self, window: WindowId) -> Option<WmState>;
    fn net_wm_state(&self, window: WindowId) -> NetWmState;

    /// Pointer position relative to `window`, or to the root when `None`.
    fn query_pointer(&self, window: Option<WindowId>) -> Point;
    /// Physical display regions; empty when the server reports none.
    fn physical_regions(&self) -> Vec<Rect>;
    /// Bounds of the whole virtual desktop.
    fn view(&self) -> Rect;

    fn set_wm_state(&mut self, window: WindowId, state: WmState);
    fn move_resize(&mut self, window: WindowId, geometry: Rect);
    fn move_window(&mut self, window: WindowId, origin: Point);
    fn raise(&mut self, window: WindowId);
    fn lower(&mut self, window: WindowId);
    fn map(&mut self, window: WindowId);
    fn unmap(&mut self, window: WindowId);
    fn set_border(&mut self, window: WindowId, width: i32, pixel: u32);
    fn send_configure_notify(&mut self, window: WindowId, geometry: Rect, border_width: i32);
    fn send_protocol_message(&mut self, window: WindowId, message: ProtocolMessage);
    fn kill_client(&mut self, window: WindowId);
    fn set_input_focus(&mut self, window: WindowId);
    fn install_colormap(&mut self, colormap: u32);
    fn warp_pointer(&mut self, window: WindowId, position: Point);
    fn grab_server(&mut self);
    fn ungrab_server(&mut self);
    fn grab_keyboard(&mut self);
    fn ungrab_keyboard(&mut self);
    fn select_client_events(&mut self, window: WindowId);
    fn add_to_save_set(&mut self, window: WindowId);
    fn remove_from_save_set(&mut self, window: WindowId);

    fn set_client_list(&mut self, windows: &[WindowId]);
    fn set_active_window(&mut self, window: Option<WindowId>);
    fn set_net_wm_state(&mut self, window: WindowId, state: NetWmState);
}
