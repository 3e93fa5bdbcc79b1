//! An in-memory window system that records every request made of it.

use super::Reactor;
use crate::common::collections::HashMap;
use crate::common::config::Config;
use crate::layout_engine::LayoutEngine;
use crate::sys::geometry::{Point, Rect};
use crate::sys::window_system::{
    ClassHint, MotifHints, NetWmState, ProtocolMessage, Protocols, RawSizeHints, WindowAttributes,
    WindowId, WindowSystem, WmHints, WmState,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    SetWmState(WindowId, WmState),
    MoveResize(WindowId, Rect),
    Move(WindowId, Point),
    Raise(WindowId),
    Lower(WindowId),
    Map(WindowId),
    Unmap(WindowId),
    SetBorder(WindowId, i32, u32),
    ConfigureNotify(WindowId, Rect, i32),
    Protocol(WindowId, ProtocolMessage),
    Kill(WindowId),
    Focus(WindowId),
    InstallColormap(u32),
    WarpPointer(WindowId, Point),
    GrabServer,
    UngrabServer,
    GrabKeyboard,
    UngrabKeyboard,
    SelectEvents(WindowId),
    AddToSaveSet(WindowId),
    RemoveFromSaveSet(WindowId),
    ClientList(Vec<WindowId>),
    ActiveWindow(Option<WindowId>),
    NetWmState(WindowId, NetWmState),
}

#[derive(Debug, Clone)]
pub struct StubWindow {
    pub attributes: WindowAttributes,
    pub size_hints: Option<RawSizeHints>,
    pub wm_hints: Option<WmHints>,
    pub protocols: Protocols,
    pub motif_hints: Option<MotifHints>,
    pub class_hint: Option<ClassHint>,
    pub title: Option<String>,
    pub transient_for: Option<WindowId>,
    pub wm_state: Option<WmState>,
    pub net_wm_state: NetWmState,
}

impl StubWindow {
    pub fn new(geometry: Rect) -> StubWindow {
        StubWindow {
            attributes: WindowAttributes {
                geometry,
                viewable: true,
                override_redirect: false,
                colormap: 0x20,
            },
            size_hints: None,
            wm_hints: Some(WmHints { input: Some(true), initial_state: None }),
            protocols: Protocols::empty(),
            motif_hints: None,
            class_hint: Some(ClassHint { name: "xterm".into(), class: "XTerm".into() }),
            title: Some("xterm".into()),
            transient_for: None,
            wm_state: None,
            net_wm_state: NetWmState::default(),
        }
    }
}

pub struct StubSystem {
    pub view: Rect,
    pub regions: Vec<Rect>,
    pub pointer: Point,
    pub windows: HashMap<WindowId, StubWindow>,
    pub calls: Vec<Call>,
}

impl StubSystem {
    pub fn new(view: Rect) -> StubSystem {
        StubSystem {
            view,
            regions: Vec::new(),
            pointer: Point::new(0, 0),
            windows: HashMap::default(),
            calls: Vec::new(),
        }
    }

    pub fn add_window(&mut self, id: u32, window: StubWindow) -> WindowId {
        let id = WindowId::new(id);
        self.windows.insert(id, window);
        id
    }

    pub fn take_calls(&mut self) -> Vec<Call> { std::mem::take(&mut self.calls) }

    pub fn called(&self, call: &Call) -> bool { self.calls.contains(call) }
}

impl WindowSystem for StubSystem {
    fn window_attributes(&self, window: WindowId) -> Option<WindowAttributes> {
        self.windows.get(&window).map(|w| w.attributes)
    }

    fn size_hints(&self, window: WindowId) -> Option<RawSizeHints> {
        self.windows.get(&window).and_then(|w| w.size_hints)
    }

    fn wm_hints(&self, window: WindowId) -> Option<WmHints> {
        self.windows.get(&window).and_then(|w| w.wm_hints)
    }

    fn protocols(&self, window: WindowId) -> Protocols {
        self.windows.get(&window).map(|w| w.protocols).unwrap_or_default()
    }

    fn motif_hints(&self, window: WindowId) -> Option<MotifHints> {
        self.windows.get(&window).and_then(|w| w.motif_hints)
    }

    fn class_hint(&self, window: WindowId) -> Option<ClassHint> {
        self.windows.get(&window).and_then(|w| w.class_hint.clone())
    }

    fn title(&self, window: WindowId) -> Option<String> {
        self.windows.get(&window).and_then(|w| w.title.clone())
    }

    fn transient_for(&self, window: WindowId) -> Option<WindowId> {
        self.windows.get(&window).and_then(|w| w.transient_for)
    }

    fn wm_state(&self, window: WindowId) -> Option<WmState> {
        self.windows.get(&window).and_then(|w| w.wm_state)
    }

    fn net_wm_state(&self, window: WindowId) -> NetWmState {
        self.windows.get(&window).map(|w| w.net_wm_state).unwrap_or_default()
    }

    fn query_pointer(&self, window: Option<WindowId>) -> Point {
        let origin = window
            .and_then(|w| self.windows.get(&w))
            .map(|w| Point::new(w.attributes.geometry.x, w.attributes.geometry.y))
            .unwrap_or_default();
        Point::new(self.pointer.x - origin.x, self.pointer.y - origin.y)
    }

    fn physical_regions(&self) -> Vec<Rect> { self.regions.clone() }

    fn view(&self) -> Rect { self.view }

    fn set_wm_state(&mut self, window: WindowId, state: WmState) {
        if let Some(w) = self.windows.get_mut(&window) {
            w.wm_state = Some(state);
        }
        self.calls.push(Call::SetWmState(window, state));
    }

    fn move_resize(&mut self, window: WindowId, geometry: Rect) {
        if let Some(w) = self.windows.get_mut(&window) {
            w.attributes.geometry = geometry;
        }
        self.calls.push(Call::MoveResize(window, geometry));
    }

    fn move_window(&mut self, window: WindowId, origin: Point) {
        if let Some(w) = self.windows.get_mut(&window) {
            w.attributes.geometry.x = origin.x;
            w.attributes.geometry.y = origin.y;
        }
        self.calls.push(Call::Move(window, origin));
    }

    fn raise(&mut self, window: WindowId) { self.calls.push(Call::Raise(window)); }

    fn lower(&mut self, window: WindowId) { self.calls.push(Call::Lower(window)); }

    fn map(&mut self, window: WindowId) {
        if let Some(w) = self.windows.get_mut(&window) {
            w.attributes.viewable = true;
        }
        self.calls.push(Call::Map(window));
    }

    fn unmap(&mut self, window: WindowId) {
        if let Some(w) = self.windows.get_mut(&window) {
            w.attributes.viewable = false;
        }
        self.calls.push(Call::Unmap(window));
    }

    fn set_border(&mut self, window: WindowId, width: i32, pixel: u32) {
        self.calls.push(Call::SetBorder(window, width, pixel));
    }

    fn send_configure_notify(&mut self, window: WindowId, geometry: Rect, border_width: i32) {
        self.calls.push(Call::ConfigureNotify(window, geometry, border_width));
    }

    fn send_protocol_message(&mut self, window: WindowId, message: ProtocolMessage) {
        self.calls.push(Call::Protocol(window, message));
    }

    fn kill_client(&mut self, window: WindowId) { self.calls.push(Call::Kill(window)); }

    fn set_input_focus(&mut self, window: WindowId) { self.calls.push(Call::Focus(window)); }

    fn install_colormap(&mut self, colormap: u32) { self.calls.push(Call::InstallColormap(colormap)); }

    fn warp_pointer(&mut self, window: WindowId, position: Point) {
        if let Some(w) = self.windows.get(&window) {
            let g = w.attributes.geometry;
            self.pointer = Point::new(g.x + position.x, g.y + position.y);
        }
        self.calls.push(Call::WarpPointer(window, position));
    }

    fn grab_server(&mut self) { self.calls.push(Call::GrabServer); }

    fn ungrab_server(&mut self) { self.calls.push(Call::UngrabServer); }

    fn grab_keyboard(&mut self) { self.calls.push(Call::GrabKeyboard); }

    fn ungrab_keyboard(&mut self) { self.calls.push(Call::UngrabKeyboard); }

    fn select_client_events(&mut self, window: WindowId) { self.calls.push(Call::SelectEvents(window)); }

    fn add_to_save_set(&mut self, window: WindowId) { self.calls.push(Call::AddToSaveSet(window)); }

    fn remove_from_save_set(&mut self, window: WindowId) {
        self.calls.push(Call::RemoveFromSaveSet(window));
    }

    fn set_client_list(&mut self, windows: &[WindowId]) {
        self.calls.push(Call::ClientList(windows.to_vec()));
    }

    fn set_active_window(&mut self, window: Option<WindowId>) {
        self.calls.push(Call::ActiveWindow(window));
    }

    fn set_net_wm_state(&mut self, window: WindowId, state: NetWmState) {
        if let Some(w) = self.windows.get_mut(&window) {
            w.net_wm_state = state;
        }
        self.calls.push(Call::NetWmState(window, state));
    }
}

impl Reactor<StubSystem> {
    pub fn new_for_test(system: StubSystem) -> Self {
        let mut config = Config::default();
        config.settings.border_width = 1;
        let layout_engine = LayoutEngine::new(&config.settings);
        Reactor::new(config, layout_engine, system, None)
    }
}
