//! The Reactor's job is to keep the client registry coherent with the window
//! system and to carry out user commands.
//!
//! Window system events and commands arrive as [`Event`]s. Handlers update the
//! registry, ask the layout engine for geometry changes and push the resulting
//! state back out through [`WindowSystem`]. All of this runs to completion on
//! one thread, one event at a time.

mod border;
mod events;
mod focus;
mod lifecycle;

#[cfg(test)]
mod testing;

pub use border::border_pixel;
use events::command::CommandEventHandler;
use events::window::WindowEventHandler;
pub use focus::find_cycle_target;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, trace};

use crate::actor::broadcast::{BroadcastEvent, BroadcastSender};
use crate::common::config::Config;
use crate::layout_engine::{self as layout, LayoutCommand, LayoutEngine};
use crate::model::registry::ClientRegistry;
use crate::model::screen::{Screen, ScreenId};
use crate::sys::geometry::{Point, Rect};
use crate::sys::window_system::{NetWmState, WindowId, WindowSystem};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum Event {
    /// The root window or its outputs changed size.
    ScreenParametersChanged { view: Rect, regions: Vec<Rect> },

    /// A window asked to be mapped, or was found already mapped at startup.
    WindowAppeared { window: WindowId, mapped: bool },
    WindowDestroyed(WindowId),
    /// `synthetic` is set for the ICCCM withdraw notification a client sends
    /// itself.
    WindowUnmapped { window: WindowId, synthetic: bool },
    PointerEntered(WindowId),
    ConfigureRequest { window: WindowId, request: ConfigureRequest },
    PropertyChanged { window: WindowId, property: Property },

    /// A user or client command. `None` targets the active client.
    Command { window: Option<WindowId>, command: Command },
}

/// The fields of a configure request the client actually set.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ConfigureRequest {
    pub x: Option<i32>,
    pub y: Option<i32>,
    pub w: Option<i32>,
    pub h: Option<i32>,
}

impl ConfigureRequest {
    pub fn apply_to(&self, geometry: Rect) -> Rect {
        Rect::new(
            self.x.unwrap_or(geometry.x),
            self.y.unwrap_or(geometry.y),
            self.w.unwrap_or(geometry.w),
            self.h.unwrap_or(geometry.h),
        )
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Property {
    Title,
    NormalHints,
    WmHints,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    Layout(LayoutCommand),
    Reactor(ReactorCommand),
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ReactorCommand {
    Focus,
    Cycle { reverse: bool, in_group: bool },
    CycleEnd,
    Hide,
    Raise,
    Lower,
    Delete,
    PointerWarp,
    ToggleGroup { shortcut: u32 },
    Ungroup,
    /// An EWMH `_NET_WM_STATE` request.
    ChangeState {
        action: StateAction,
        vertical: bool,
        horizontal: bool,
        hidden: bool,
    },
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StateAction {
    Remove,
    Add,
    Toggle,
}

impl StateAction {
    pub fn from_raw(raw: u32) -> Option<StateAction> {
        match raw {
            0 => Some(StateAction::Remove),
            1 => Some(StateAction::Add),
            2 => Some(StateAction::Toggle),
            _ => None,
        }
    }

    /// The state requested given the current one.
    pub fn target(self, current: bool) -> bool {
        match self {
            StateAction::Remove => false,
            StateAction::Add => true,
            StateAction::Toggle => !current,
        }
    }
}

impl From<LayoutCommand> for Command {
    fn from(command: LayoutCommand) -> Self { Command::Layout(command) }
}

impl From<ReactorCommand> for Command {
    fn from(command: ReactorCommand) -> Self { Command::Reactor(command) }
}

pub struct Reactor<S: WindowSystem> {
    config: Config,
    layout_engine: LayoutEngine,
    registry: ClientRegistry,
    screen: ScreenId,
    system: S,
    event_broadcaster: Option<BroadcastSender>,
}

impl<S: WindowSystem> Reactor<S> {
    pub fn new(
        config: Config,
        layout_engine: LayoutEngine,
        system: S,
        event_broadcaster: Option<BroadcastSender>,
    ) -> Self {
        let mut registry = ClientRegistry::new();
        let screen = registry.add_screen(Screen::new(
            system.view(),
            system.physical_regions(),
            config.settings.gap,
        ));
        Reactor {
            config,
            layout_engine,
            registry,
            screen,
            system,
            event_broadcaster,
        }
    }

    pub fn config(&self) -> &Config { &self.config }

    pub fn registry(&self) -> &ClientRegistry { &self.registry }

    pub fn screen_id(&self) -> ScreenId { self.screen }

    pub fn system(&self) -> &S { &self.system }

    pub fn system_mut(&mut self) -> &mut S { &mut self.system }

    fn log_event(&self, event: &Event) {
        match event {
            Event::PointerEntered(..) | Event::PropertyChanged { .. } => trace!(?event, "Event"),
            _ => debug!(?event, "Event"),
        }
    }

    #[instrument(name = "reactor::handle_event", skip(self), fields(event=?event))]
    pub fn handle_event(&mut self, event: Event) {
        self.log_event(&event);
        match event {
            Event::ScreenParametersChanged { view, regions } => {
                WindowEventHandler::handle_screen_parameters_changed(self, view, regions)
            }
            Event::WindowAppeared { window, mapped } => {
                WindowEventHandler::handle_window_appeared(self, window, mapped)
            }
            Event::WindowDestroyed(window) => {
                WindowEventHandler::handle_window_destroyed(self, window)
            }
            Event::WindowUnmapped { window, synthetic } => {
                WindowEventHandler::handle_window_unmapped(self, window, synthetic)
            }
            Event::PointerEntered(window) => {
                WindowEventHandler::handle_pointer_entered(self, window)
            }
            Event::ConfigureRequest { window, request } => {
                WindowEventHandler::handle_configure_request(self, window, request)
            }
            Event::PropertyChanged { window, property } => {
                WindowEventHandler::handle_property_changed(self, window, property)
            }
            Event::Command { window, command } => {
                CommandEventHandler::handle_command(self, window, command)
            }
        }
    }

    /// Pushes geometry and state changes computed by the layout engine to the
    /// window system.
    fn handle_layout_response(&mut self, response: layout::EventResponse) {
        let layout::EventResponse {
            resized,
            moved,
            state_changed,
            warp_pointer,
        } = response;

        for window in resized {
            let Some(client) = self.registry.get(window) else { continue };
            let geometry = client.geometry;
            self.system.move_resize(window, geometry);
            self.draw_border(window);
            self.send_configure(window);
        }
        for window in moved {
            let Some(client) = self.registry.get(window) else { continue };
            let origin = Point::new(client.geometry.x, client.geometry.y);
            self.system.move_window(window, origin);
            self.send_configure(window);
        }
        for window in state_changed {
            self.publish_state(window);
        }
        if let Some(window) = warp_pointer {
            self.warp_pointer_to(window);
        }
    }

    /// Tells the client where it ended up and refreshes its region.
    fn send_configure(&mut self, window: WindowId) {
        let Some((client, screen)) = self.registry.client_and_screen_mut(window) else {
            return;
        };
        client.region = screen.region_index(client.center());
        let (geometry, border_width) = (client.geometry, client.border_width);
        self.system.send_configure_notify(window, geometry, border_width);
    }

    fn publish_state(&mut self, window: WindowId) {
        let Some(client) = self.registry.get(window) else { return };
        let state = NetWmState {
            maximized_vert: client.flags.vmaximized,
            maximized_horz: client.flags.hmaximized,
            hidden: client.flags.hidden,
        };
        self.system.set_net_wm_state(window, state);
        self.broadcast(BroadcastEvent::StateChanged { window, state });
    }

    fn publish_client_list(&mut self) {
        let windows = self.registry.windows().to_vec();
        self.system.set_client_list(&windows);
        self.broadcast(BroadcastEvent::ClientListChanged { windows });
    }

    fn broadcast(&self, event: BroadcastEvent) {
        if let Some(tx) = &self.event_broadcaster {
            tx.send(event);
        }
    }
}
