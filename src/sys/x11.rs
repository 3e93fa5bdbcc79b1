//! [`WindowSystem`] on top of an X11 connection.
//!
//! Queries swallow protocol errors and return `None` or defaults; mutations
//! are queued without waiting for a reply and log when they cannot be sent.
//! Asynchronous X errors surface in [`X11::next_event`].

use thiserror::Error;
use tracing::{debug, info, trace, warn};
use x11rb::connection::{Connection, RequestConnection};
use x11rb::errors::{ConnectError, ConnectionError, ReplyError};
use x11rb::protocol::Event as XEvent;
use x11rb::protocol::randr::{self, ConnectionExt as _};
use x11rb::protocol::xproto::{
    Atom, AtomEnum, ChangeWindowAttributesAux, ClientMessageEvent, ConfigWindow,
    ConfigureNotifyEvent, ConfigureRequestEvent, ConfigureWindowAux, ConnectionExt as _,
    EventMask, GrabMode, InputFocus, MapState, PropMode, SetMode, StackMode, Window,
    CONFIGURE_NOTIFY_EVENT,
};
use x11rb::rust_connection::RustConnection;
use x11rb::wrapper::ConnectionExt as _;
use x11rb::{CURRENT_TIME, NONE};

use crate::actor::reactor::{
    Command, ConfigureRequest, Event, Property, ReactorCommand, StateAction,
};
use crate::sys::geometry::{Point, Rect};
use crate::sys::window_system::{
    ClassHint, MotifHints, NetWmState, ProtocolMessage, Protocols, RawSizeHints, SizeHintFlags,
    WindowAttributes, WindowId, WindowSystem, WmHints, WmState,
};

x11rb::atom_manager! {
    pub Atoms: AtomsCookie {
        WM_STATE,
        WM_PROTOCOLS,
        WM_DELETE_WINDOW,
        WM_TAKE_FOCUS,
        WM_CHANGE_STATE,
        UTF8_STRING,
        _MOTIF_WM_HINTS,
        _NET_SUPPORTED,
        _NET_WM_NAME,
        _NET_CLIENT_LIST,
        _NET_ACTIVE_WINDOW,
        _NET_CLOSE_WINDOW,
        _NET_WM_STATE,
        _NET_WM_STATE_MAXIMIZED_VERT,
        _NET_WM_STATE_MAXIMIZED_HORZ,
        _NET_WM_STATE_HIDDEN,
    }
}

#[derive(Debug, Error)]
pub enum X11Error {
    #[error("cannot connect to the X server: {0}")]
    Connect(#[from] ConnectError),
    #[error("X connection failed: {0}")]
    Connection(#[from] ConnectionError),
    #[error("X request failed: {0}")]
    Reply(#[from] ReplyError),
    #[error("another window manager is already running")]
    AlreadyRunning,
}

pub type Result<T> = std::result::Result<T, X11Error>;

const ICONIC_STATE: u32 = 3;

pub struct X11 {
    conn: RustConnection,
    root: Window,
    atoms: Atoms,
    randr: bool,
}

impl X11 {
    /// Connects to `display` (or `$DISPLAY`) and takes over the root window.
    pub fn connect(display: Option<&str>) -> Result<X11> {
        let (conn, screen_num) = x11rb::connect(display)?;
        let root = conn.setup().roots[screen_num].root;
        let atoms = Atoms::new(&conn)?.reply()?;
        let randr = conn.extension_information(randr::X11_EXTENSION_NAME)?.is_some();
        let x11 = X11 { conn, root, atoms, randr };
        x11.become_wm()?;
        info!(root = x11.root, randr, "connected to X server");
        Ok(x11)
    }

    fn become_wm(&self) -> Result<()> {
        let mask = EventMask::SUBSTRUCTURE_REDIRECT
            | EventMask::SUBSTRUCTURE_NOTIFY
            | EventMask::PROPERTY_CHANGE;
        let aux = ChangeWindowAttributesAux::new().event_mask(mask);
        match self.conn.change_window_attributes(self.root, &aux)?.check() {
            Ok(()) => {}
            Err(ReplyError::X11Error(_)) => return Err(X11Error::AlreadyRunning),
            Err(err) => return Err(err.into()),
        }

        if self.randr {
            self.conn.randr_select_input(self.root, randr::NotifyMask::SCREEN_CHANGE)?;
        }

        let supported = [
            self.atoms._NET_SUPPORTED,
            self.atoms._NET_WM_NAME,
            self.atoms._NET_CLIENT_LIST,
            self.atoms._NET_ACTIVE_WINDOW,
            self.atoms._NET_CLOSE_WINDOW,
            self.atoms._NET_WM_STATE,
            self.atoms._NET_WM_STATE_MAXIMIZED_VERT,
            self.atoms._NET_WM_STATE_MAXIMIZED_HORZ,
            self.atoms._NET_WM_STATE_HIDDEN,
        ];
        self.conn.change_property32(
            PropMode::REPLACE,
            self.root,
            self.atoms._NET_SUPPORTED,
            AtomEnum::ATOM,
            &supported,
        )?;
        self.conn.flush()?;
        Ok(())
    }

    /// Top-level windows present at startup that should be managed, with
    /// whether each is currently mapped.
    pub fn existing_windows(&self) -> Result<Vec<(WindowId, bool)>> {
        let tree = self.conn.query_tree(self.root)?.reply()?;
        let mut windows = Vec::new();
        for child in tree.children {
            let Ok(attrs) = self.conn.get_window_attributes(child)?.reply() else { continue };
            if attrs.override_redirect {
                continue;
            }
            let id = WindowId::new(child);
            let mapped = attrs.map_state == MapState::VIEWABLE;
            if mapped || self.wm_state(id) == Some(WmState::Iconic) {
                windows.push((id, mapped));
            }
        }
        debug!(count = windows.len(), "found existing windows");
        Ok(windows)
    }

    /// Blocks for the next X event that means something to the reactor.
    pub fn next_event(&mut self) -> Result<Option<Event>> {
        self.conn.flush()?;
        let event = self.conn.wait_for_event()?;
        Ok(self.translate(event))
    }

    fn translate(&self, event: XEvent) -> Option<Event> {
        match event {
            XEvent::MapRequest(e) => Some(Event::WindowAppeared {
                window: WindowId::new(e.window),
                mapped: false,
            }),
            XEvent::DestroyNotify(e) => Some(Event::WindowDestroyed(WindowId::new(e.window))),
            XEvent::UnmapNotify(e) => Some(Event::WindowUnmapped {
                window: WindowId::new(e.window),
                synthetic: e.response_type & 0x80 != 0,
            }),
            XEvent::EnterNotify(e) => Some(Event::PointerEntered(WindowId::new(e.event))),
            XEvent::ConfigureRequest(e) => Some(Event::ConfigureRequest {
                window: WindowId::new(e.window),
                request: configure_request(&e),
            }),
            XEvent::PropertyNotify(e) => {
                let property = self.property_kind(e.atom)?;
                Some(Event::PropertyChanged { window: WindowId::new(e.window), property })
            }
            XEvent::ClientMessage(e) => self.client_message(&e),
            XEvent::RandrScreenChangeNotify(_) => Some(Event::ScreenParametersChanged {
                view: self.view(),
                regions: self.physical_regions(),
            }),
            XEvent::Error(err) => {
                debug!(?err, "X error");
                None
            }
            other => {
                trace!(?other, "ignoring X event");
                None
            }
        }
    }

    fn property_kind(&self, atom: Atom) -> Option<Property> {
        if atom == u32::from(AtomEnum::WM_NAME) || atom == self.atoms._NET_WM_NAME {
            Some(Property::Title)
        } else if atom == u32::from(AtomEnum::WM_NORMAL_HINTS) {
            Some(Property::NormalHints)
        } else if atom == u32::from(AtomEnum::WM_HINTS) {
            Some(Property::WmHints)
        } else {
            None
        }
    }

    fn client_message(&self, e: &ClientMessageEvent) -> Option<Event> {
        let data = e.data.as_data32();
        let command = if e.type_ == self.atoms._NET_CLOSE_WINDOW {
            ReactorCommand::Delete
        } else if e.type_ == self.atoms._NET_ACTIVE_WINDOW {
            ReactorCommand::Focus
        } else if e.type_ == self.atoms.WM_CHANGE_STATE && data[0] == ICONIC_STATE {
            ReactorCommand::Hide
        } else if e.type_ == self.atoms._NET_WM_STATE {
            let action = StateAction::from_raw(data[0])?;
            let requested = [data[1], data[2]];
            let has = |atom: Atom| requested.contains(&atom);
            ReactorCommand::ChangeState {
                action,
                vertical: has(self.atoms._NET_WM_STATE_MAXIMIZED_VERT),
                horizontal: has(self.atoms._NET_WM_STATE_MAXIMIZED_HORZ),
                hidden: has(self.atoms._NET_WM_STATE_HIDDEN),
            }
        } else {
            trace!(type_ = e.type_, "unhandled client message");
            return None;
        };
        Some(Event::Command {
            window: Some(WindowId::new(e.window)),
            command: Command::Reactor(command),
        })
    }

    fn property32(&self, window: WindowId, property: Atom, type_: Atom, len: u32) -> Option<Vec<u32>> {
        let reply = self
            .conn
            .get_property(false, window.get(), property, type_, 0, len)
            .ok()?
            .reply()
            .ok()?;
        let values: Vec<u32> = reply.value32()?.collect();
        (!values.is_empty()).then_some(values)
    }

    fn property_bytes(&self, window: WindowId, property: Atom, type_: Atom) -> Option<Vec<u8>> {
        let reply = self
            .conn
            .get_property(false, window.get(), property, type_, 0, 1024)
            .ok()?
            .reply()
            .ok()?;
        (!reply.value.is_empty()).then_some(reply.value)
    }

    fn log_failure<T>(&self, request: &str, result: std::result::Result<T, ConnectionError>) {
        if let Err(err) = result {
            warn!(request, %err, "failed to send X request");
        }
    }
}

fn configure_request(e: &ConfigureRequestEvent) -> ConfigureRequest {
    let has = |flag: ConfigWindow| e.value_mask.contains(flag);
    ConfigureRequest {
        x: has(ConfigWindow::X).then_some(e.x.into()),
        y: has(ConfigWindow::Y).then_some(e.y.into()),
        w: has(ConfigWindow::WIDTH).then_some(e.width.into()),
        h: has(ConfigWindow::HEIGHT).then_some(e.height.into()),
    }
}

/// Decodes `WM_NORMAL_HINTS`. Pre-ICCCM clients send 15 words without the
/// base size and gravity.
pub fn parse_size_hints(values: &[u32]) -> Option<RawSizeHints> {
    if values.len() < 15 {
        return None;
    }
    let int = |i: usize| values.get(i).map_or(0, |&v| v as i32);
    Some(RawSizeHints {
        flags: SizeHintFlags::from_bits_truncate(values[0]),
        min_width: int(5),
        min_height: int(6),
        max_width: int(7),
        max_height: int(8),
        width_inc: int(9),
        height_inc: int(10),
        min_aspect: (int(11), int(12)),
        max_aspect: (int(13), int(14)),
        base_width: int(15),
        base_height: int(16),
    })
}

/// Decodes the input and initial state fields of `WM_HINTS`.
pub fn parse_wm_hints(values: &[u32]) -> Option<WmHints> {
    const INPUT_HINT: u32 = 1 << 0;
    const STATE_HINT: u32 = 1 << 1;
    let flags = *values.first()?;
    let input = (flags & INPUT_HINT != 0).then(|| values.get(1).is_some_and(|&v| v != 0));
    let initial_state = if flags & STATE_HINT != 0 {
        values.get(2).and_then(|&v| WmState::from_raw(v))
    } else {
        None
    };
    Some(WmHints { input, initial_state })
}

/// Splits `WM_CLASS` into instance name and class.
pub fn parse_class_hint(bytes: &[u8]) -> ClassHint {
    let mut parts = bytes.split(|&b| b == 0).map(|s| String::from_utf8_lossy(s).into_owned());
    ClassHint {
        name: parts.next().unwrap_or_default(),
        class: parts.next().unwrap_or_default(),
    }
}

fn to_u32(v: i32) -> u32 { v.max(1) as u32 }

impl WindowSystem for X11 {
    fn window_attributes(&self, window: WindowId) -> Option<WindowAttributes> {
        let attrs = self.conn.get_window_attributes(window.get()).ok()?.reply().ok()?;
        let geo = self.conn.get_geometry(window.get()).ok()?.reply().ok()?;
        Some(WindowAttributes {
            geometry: Rect::new(geo.x.into(), geo.y.into(), geo.width.into(), geo.height.into()),
            viewable: attrs.map_state == MapState::VIEWABLE,
            override_redirect: attrs.override_redirect,
            colormap: attrs.colormap,
        })
    }

    fn size_hints(&self, window: WindowId) -> Option<RawSizeHints> {
        let values = self.property32(
            window,
            AtomEnum::WM_NORMAL_HINTS.into(),
            AtomEnum::WM_SIZE_HINTS.into(),
            18,
        )?;
        parse_size_hints(&values)
    }

    fn wm_hints(&self, window: WindowId) -> Option<WmHints> {
        let values =
            self.property32(window, AtomEnum::WM_HINTS.into(), AtomEnum::WM_HINTS.into(), 9)?;
        parse_wm_hints(&values)
    }

    fn protocols(&self, window: WindowId) -> Protocols {
        let Some(atoms) =
            self.property32(window, self.atoms.WM_PROTOCOLS, AtomEnum::ATOM.into(), 32)
        else {
            return Protocols::empty();
        };
        let mut protocols = Protocols::empty();
        protocols.set(Protocols::DELETE_WINDOW, atoms.contains(&self.atoms.WM_DELETE_WINDOW));
        protocols.set(Protocols::TAKE_FOCUS, atoms.contains(&self.atoms.WM_TAKE_FOCUS));
        protocols
    }

    fn motif_hints(&self, window: WindowId) -> Option<MotifHints> {
        let values =
            self.property32(window, self.atoms._MOTIF_WM_HINTS, AtomEnum::ANY.into(), 5)?;
        Some(MotifHints {
            flags: values[0],
            decorations: values.get(2).copied().unwrap_or(0),
        })
    }

    fn class_hint(&self, window: WindowId) -> Option<ClassHint> {
        let bytes =
            self.property_bytes(window, AtomEnum::WM_CLASS.into(), AtomEnum::STRING.into())?;
        Some(parse_class_hint(&bytes))
    }

    fn title(&self, window: WindowId) -> Option<String> {
        let bytes = self
            .property_bytes(window, self.atoms._NET_WM_NAME, self.atoms.UTF8_STRING)
            .or_else(|| {
                self.property_bytes(window, AtomEnum::WM_NAME.into(), AtomEnum::ANY.into())
            })?;
        Some(String::from_utf8_lossy(&bytes).into_owned())
    }

    fn transient_for(&self, window: WindowId) -> Option<WindowId> {
        let values = self.property32(
            window,
            AtomEnum::WM_TRANSIENT_FOR.into(),
            AtomEnum::WINDOW.into(),
            1,
        )?;
        values.first().copied().filter(|&w| w != NONE).map(WindowId::new)
    }

    fn wm_state(&self, window: WindowId) -> Option<WmState> {
        let values = self.property32(window, self.atoms.WM_STATE, self.atoms.WM_STATE, 2)?;
        WmState::from_raw(values[0])
    }

    fn net_wm_state(&self, window: WindowId) -> NetWmState {
        let atoms = self
            .property32(window, self.atoms._NET_WM_STATE, AtomEnum::ATOM.into(), 32)
            .unwrap_or_default();
        NetWmState {
            maximized_vert: atoms.contains(&self.atoms._NET_WM_STATE_MAXIMIZED_VERT),
            maximized_horz: atoms.contains(&self.atoms._NET_WM_STATE_MAXIMIZED_HORZ),
            hidden: atoms.contains(&self.atoms._NET_WM_STATE_HIDDEN),
        }
    }

    fn query_pointer(&self, window: Option<WindowId>) -> Point {
        let target = window.map_or(self.root, |w| w.get());
        let Some(reply) = self.conn.query_pointer(target).ok().and_then(|c| c.reply().ok()) else {
            return Point::default();
        };
        match window {
            Some(_) => Point::new(reply.win_x.into(), reply.win_y.into()),
            None => Point::new(reply.root_x.into(), reply.root_y.into()),
        }
    }

    fn physical_regions(&self) -> Vec<Rect> {
        if !self.randr {
            return Vec::new();
        }
        let reply = match self.conn.randr_get_monitors(self.root, true) {
            Ok(cookie) => cookie.reply(),
            Err(err) => Err(err.into()),
        };
        match reply {
            Ok(reply) => reply
                .monitors
                .iter()
                .map(|m| Rect::new(m.x.into(), m.y.into(), m.width.into(), m.height.into()))
                .collect(),
            Err(err) => {
                warn!(%err, "cannot query monitors");
                Vec::new()
            }
        }
    }

    fn view(&self) -> Rect {
        match self.conn.get_geometry(self.root).ok().and_then(|c| c.reply().ok()) {
            Some(geo) => Rect::new(0, 0, geo.width.into(), geo.height.into()),
            None => {
                warn!("cannot query root geometry");
                Rect::default()
            }
        }
    }

    fn set_wm_state(&mut self, window: WindowId, state: WmState) {
        let result = self.conn.change_property32(
            PropMode::REPLACE,
            window.get(),
            self.atoms.WM_STATE,
            self.atoms.WM_STATE,
            &[state.to_raw(), NONE],
        );
        self.log_failure("set WM_STATE", result);
    }

    fn move_resize(&mut self, window: WindowId, geometry: Rect) {
        let aux = ConfigureWindowAux::new()
            .x(geometry.x)
            .y(geometry.y)
            .width(to_u32(geometry.w))
            .height(to_u32(geometry.h));
        let result = self.conn.configure_window(window.get(), &aux);
        self.log_failure("move/resize", result);
    }

    fn move_window(&mut self, window: WindowId, origin: Point) {
        let aux = ConfigureWindowAux::new().x(origin.x).y(origin.y);
        let result = self.conn.configure_window(window.get(), &aux);
        self.log_failure("move", result);
    }

    fn raise(&mut self, window: WindowId) {
        let aux = ConfigureWindowAux::new().stack_mode(StackMode::ABOVE);
        let result = self.conn.configure_window(window.get(), &aux);
        self.log_failure("raise", result);
    }

    fn lower(&mut self, window: WindowId) {
        let aux = ConfigureWindowAux::new().stack_mode(StackMode::BELOW);
        let result = self.conn.configure_window(window.get(), &aux);
        self.log_failure("lower", result);
    }

    fn map(&mut self, window: WindowId) {
        let result = self.conn.map_window(window.get());
        self.log_failure("map", result);
    }

    fn unmap(&mut self, window: WindowId) {
        let result = self.conn.unmap_window(window.get());
        self.log_failure("unmap", result);
    }

    fn set_border(&mut self, window: WindowId, width: i32, pixel: u32) {
        let aux = ConfigureWindowAux::new().border_width(width.max(0) as u32);
        let result = self.conn.configure_window(window.get(), &aux);
        self.log_failure("set border width", result);
        let aux = ChangeWindowAttributesAux::new().border_pixel(pixel);
        let result = self.conn.change_window_attributes(window.get(), &aux);
        self.log_failure("set border colour", result);
    }

    fn send_configure_notify(&mut self, window: WindowId, geometry: Rect, border_width: i32) {
        let event = ConfigureNotifyEvent {
            response_type: CONFIGURE_NOTIFY_EVENT,
            sequence: 0,
            event: window.get(),
            window: window.get(),
            above_sibling: NONE,
            x: geometry.x as i16,
            y: geometry.y as i16,
            width: geometry.w.max(1) as u16,
            height: geometry.h.max(1) as u16,
            border_width: border_width.max(0) as u16,
            override_redirect: false,
        };
        let result = self.conn.send_event(false, window.get(), EventMask::STRUCTURE_NOTIFY, event);
        self.log_failure("configure notify", result);
    }

    fn send_protocol_message(&mut self, window: WindowId, message: ProtocolMessage) {
        let protocol = match message {
            ProtocolMessage::DeleteWindow => self.atoms.WM_DELETE_WINDOW,
            ProtocolMessage::TakeFocus => self.atoms.WM_TAKE_FOCUS,
        };
        let event = ClientMessageEvent::new(
            32,
            window.get(),
            self.atoms.WM_PROTOCOLS,
            [protocol, CURRENT_TIME, 0, 0, 0],
        );
        let result = self.conn.send_event(false, window.get(), EventMask::NO_EVENT, event);
        self.log_failure("protocol message", result);
    }

    fn kill_client(&mut self, window: WindowId) {
        let result = self.conn.kill_client(window.get());
        self.log_failure("kill client", result);
    }

    fn set_input_focus(&mut self, window: WindowId) {
        let result = self.conn.set_input_focus(InputFocus::POINTER_ROOT, window.get(), CURRENT_TIME);
        self.log_failure("set input focus", result);
    }

    fn install_colormap(&mut self, colormap: u32) {
        if colormap == NONE {
            return;
        }
        let result = self.conn.install_colormap(colormap);
        self.log_failure("install colormap", result);
    }

    fn warp_pointer(&mut self, window: WindowId, position: Point) {
        let result = self.conn.warp_pointer(
            NONE,
            window.get(),
            0,
            0,
            0,
            0,
            position.x as i16,
            position.y as i16,
        );
        self.log_failure("warp pointer", result);
    }

    fn grab_server(&mut self) {
        let result = self.conn.grab_server();
        self.log_failure("grab server", result);
    }

    fn ungrab_server(&mut self) {
        let result = self.conn.ungrab_server();
        self.log_failure("ungrab server", result);
    }

    fn grab_keyboard(&mut self) {
        let result = self.conn.grab_keyboard(
            true,
            self.root,
            CURRENT_TIME,
            GrabMode::ASYNC,
            GrabMode::ASYNC,
        );
        self.log_failure("grab keyboard", result);
    }

    fn ungrab_keyboard(&mut self) {
        let result = self.conn.ungrab_keyboard(CURRENT_TIME);
        self.log_failure("ungrab keyboard", result);
    }

    fn select_client_events(&mut self, window: WindowId) {
        let mask = EventMask::ENTER_WINDOW | EventMask::PROPERTY_CHANGE;
        let aux = ChangeWindowAttributesAux::new().event_mask(mask);
        let result = self.conn.change_window_attributes(window.get(), &aux);
        self.log_failure("select client events", result);
    }

    fn add_to_save_set(&mut self, window: WindowId) {
        let result = self.conn.change_save_set(SetMode::INSERT, window.get());
        self.log_failure("add to save set", result);
    }

    fn remove_from_save_set(&mut self, window: WindowId) {
        let result = self.conn.change_save_set(SetMode::DELETE, window.get());
        self.log_failure("remove from save set", result);
    }

    fn set_client_list(&mut self, windows: &[WindowId]) {
        let ids: Vec<u32> = windows.iter().map(WindowId::get).collect();
        let result = self.conn.change_property32(
            PropMode::REPLACE,
            self.root,
            self.atoms._NET_CLIENT_LIST,
            AtomEnum::WINDOW,
            &ids,
        );
        self.log_failure("set _NET_CLIENT_LIST", result);
    }

    fn set_active_window(&mut self, window: Option<WindowId>) {
        let id = window.map_or(NONE, |w| w.get());
        let result = self.conn.change_property32(
            PropMode::REPLACE,
            self.root,
            self.atoms._NET_ACTIVE_WINDOW,
            AtomEnum::WINDOW,
            &[id],
        );
        self.log_failure("set _NET_ACTIVE_WINDOW", result);
    }

    fn set_net_wm_state(&mut self, window: WindowId, state: NetWmState) {
        let managed = [
            (self.atoms._NET_WM_STATE_MAXIMIZED_VERT, state.maximized_vert),
            (self.atoms._NET_WM_STATE_MAXIMIZED_HORZ, state.maximized_horz),
            (self.atoms._NET_WM_STATE_HIDDEN, state.hidden),
        ];
        // Keep states set by others.
        let mut atoms: Vec<u32> = self
            .property32(window, self.atoms._NET_WM_STATE, AtomEnum::ATOM.into(), 32)
            .unwrap_or_default()
            .into_iter()
            .filter(|atom| !managed.iter().any(|(m, _)| m == atom))
            .collect();
        atoms.extend(managed.iter().filter(|(_, set)| *set).map(|(atom, _)| *atom));
        let result = self.conn.change_property32(
            PropMode::REPLACE,
            window.get(),
            self.atoms._NET_WM_STATE,
            AtomEnum::ATOM,
            &atoms,
        );
        self.log_failure("set _NET_WM_STATE", result);
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn parses_full_size_hints() {
        let flags = (SizeHintFlags::P_MIN_SIZE | SizeHintFlags::P_RESIZE_INC | SizeHintFlags::P_BASE_SIZE)
            .bits();
        let values = [flags, 0, 0, 0, 0, 20, 10, 0, 0, 7, 13, 0, 0, 0, 0, 4, 2, 1];
        let hints = parse_size_hints(&values).unwrap();
        assert_eq!(hints.flags, SizeHintFlags::P_MIN_SIZE | SizeHintFlags::P_RESIZE_INC | SizeHintFlags::P_BASE_SIZE);
        assert_eq!((hints.min_width, hints.min_height), (20, 10));
        assert_eq!((hints.width_inc, hints.height_inc), (7, 13));
        assert_eq!((hints.base_width, hints.base_height), (4, 2));
    }

    #[test]
    fn parses_short_size_hints() {
        let values = [SizeHintFlags::P_ASPECT.bits(), 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 2, 3, 1];
        let hints = parse_size_hints(&values).unwrap();
        assert_eq!(hints.min_aspect, (1, 2));
        assert_eq!(hints.max_aspect, (3, 1));
        assert_eq!(hints.base_width, 0);
        assert_eq!(parse_size_hints(&values[..10]), None);
    }

    #[test]
    fn oversized_hint_words_stay_usable() {
        let flags = (SizeHintFlags::P_MIN_SIZE | SizeHintFlags::P_BASE_SIZE).bits();
        let mut values = [0u32; 18];
        values[0] = flags;
        values[5] = u32::MAX;
        values[15] = 0x8000_0000;
        let raw = parse_size_hints(&values).unwrap();
        let hints = crate::model::size_hints::SizeHints::from_raw(Some(&raw));
        assert_eq!(hints.base_w, 0);
        assert_eq!(hints.min_w, 0);
        assert_eq!(hints.apply(100, 100), (100, 100));
    }

    #[test]
    fn parses_wm_hints() {
        assert_eq!(parse_wm_hints(&[0b11, 0, 3]), Some(WmHints {
            input: Some(false),
            initial_state: Some(WmState::Iconic),
        }));
        assert_eq!(parse_wm_hints(&[0, 1, 3]), Some(WmHints::default()));
        assert_eq!(parse_wm_hints(&[]), None);
    }

    #[test]
    fn parses_class_hint() {
        assert_eq!(parse_class_hint(b"xterm\0XTerm\0"), ClassHint {
            name: "xterm".into(),
            class: "XTerm".into(),
        });
        assert_eq!(parse_class_hint(b"lonely"), ClassHint {
            name: "lonely".into(),
            class: String::new(),
        });
    }
}
