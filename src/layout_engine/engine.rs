use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::common::config::Settings;
use crate::layout_engine::{expand, maximize, placement, snap, tile};
use crate::model::client::Client;
use crate::model::registry::ClientRegistry;
use crate::model::screen::Screen;
use crate::sys::geometry::{Direction, Orientation, Point, Rect};
use crate::sys::window_system::WindowId;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LayoutCommand {
    ToggleMaximize,
    ToggleVMaximize,
    ToggleHMaximize,
    ToggleExpand,
    HTile,
    VTile,
    ToggleFreeze,
    Move { direction: Direction, big: bool },
    Resize { direction: Direction, big: bool },
}

/// Windows whose records changed and must be pushed to the window system.
#[must_use]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventResponse {
    /// Needs a move-resize followed by a synthetic configure notify.
    pub resized: Vec<WindowId>,
    /// Needs a move followed by a synthetic configure notify.
    pub moved: Vec<WindowId>,
    /// Maximize flags changed; the published state must be refreshed.
    pub state_changed: Vec<WindowId>,
    pub warp_pointer: Option<WindowId>,
}

impl EventResponse {
    pub fn is_empty(&self) -> bool {
        self.resized.is_empty()
            && self.moved.is_empty()
            && self.state_changed.is_empty()
            && self.warp_pointer.is_none()
    }

    fn resized_with_state(window: WindowId) -> Self {
        EventResponse {
            resized: vec![window],
            state_changed: vec![window],
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutSettings {
    pub move_amount: i32,
    pub snap_distance: i32,
}

impl From<&Settings> for LayoutSettings {
    fn from(settings: &Settings) -> Self {
        LayoutSettings {
            move_amount: settings.move_amount.max(1),
            snap_distance: settings.snap_distance.max(0),
        }
    }
}

pub struct LayoutEngine {
    settings: LayoutSettings,
}

impl LayoutEngine {
    pub fn new(settings: &Settings) -> Self { LayoutEngine { settings: settings.into() } }

    pub fn settings(&self) -> LayoutSettings { self.settings }

    pub fn set_settings(&mut self, settings: &Settings) { self.settings = settings.into(); }

    /// Initial position for a window that was not yet viewable when managed.
    pub fn place(&self, registry: &mut ClientRegistry, window: WindowId, pointer: Point) -> EventResponse {
        let Some((client, screen)) = registry.client_and_screen_mut(window) else {
            debug!(?window, "place: unknown window");
            return EventResponse::default();
        };
        placement::place(client, screen, pointer);
        EventResponse { moved: vec![window], ..Default::default() }
    }

    pub fn handle_command(
        &self,
        registry: &mut ClientRegistry,
        window: WindowId,
        command: LayoutCommand,
    ) -> EventResponse {
        debug!(?window, ?command, "layout command");
        match command {
            LayoutCommand::ToggleMaximize => {
                self.toggle_with_area(registry, window, maximize::toggle_maximize)
            }
            LayoutCommand::ToggleVMaximize => {
                self.toggle_with_area(registry, window, maximize::toggle_vmaximize)
            }
            LayoutCommand::ToggleHMaximize => {
                self.toggle_with_area(registry, window, maximize::toggle_hmaximize)
            }
            LayoutCommand::ToggleExpand => self.expand(registry, window),
            LayoutCommand::HTile => self.tile(registry, window, Orientation::Vertical),
            LayoutCommand::VTile => self.tile(registry, window, Orientation::Horizontal),
            LayoutCommand::ToggleFreeze => {
                if let Some(client) = registry.get_mut(window) {
                    client.flags.freeze = !client.flags.freeze;
                    debug!(?window, frozen = client.flags.freeze, "toggled freeze");
                }
                EventResponse::default()
            }
            LayoutCommand::Move { direction, big } => self.move_by(registry, window, direction, big),
            LayoutCommand::Resize { direction, big } => {
                self.resize_by(registry, window, direction, big)
            }
        }
    }

    fn toggle_with_area(
        &self,
        registry: &mut ClientRegistry,
        window: WindowId,
        toggle: fn(&mut Client, Rect) -> bool,
    ) -> EventResponse {
        let Some((client, screen)) = registry.client_and_screen_mut(window) else {
            debug!(?window, "unknown window");
            return EventResponse::default();
        };
        let area = screen.area_at(client.center());
        if toggle(client, area) {
            EventResponse::resized_with_state(window)
        } else {
            EventResponse::default()
        }
    }

    fn expand(&self, registry: &mut ClientRegistry, window: WindowId) -> EventResponse {
        let Some(client) = registry.get(window) else {
            debug!(?window, "expand: unknown window");
            return EventResponse::default();
        };
        let Some(screen) = registry.screen(client.screen) else {
            return EventResponse::default();
        };
        let region = screen.region_index(client.center());
        let area = screen.area_at(client.center());
        let neighbours: Vec<Rect> = match client.group {
            Some(group) => registry
                .group_members(group)
                .iter()
                .filter(|&&w| w != window)
                .filter_map(|&w| registry.get(w))
                .filter(|c| c.is_eligible() && screen.region_index(c.center()) == region)
                .map(Client::outer)
                .collect(),
            None => Vec::new(),
        };

        let Some(client) = registry.get_mut(window) else {
            return EventResponse::default();
        };
        if expand::toggle_expand(client, &neighbours, area) {
            EventResponse::resized_with_state(window)
        } else {
            EventResponse::default()
        }
    }

    fn tile(&self, registry: &mut ClientRegistry, window: WindowId, stacking: Orientation) -> EventResponse {
        let Some(client) = registry.get(window) else {
            debug!(?window, "tile: unknown window");
            return EventResponse::default();
        };
        let Some(group) = client.group else {
            trace!(?window, "tile: not in a group");
            return EventResponse::default();
        };
        let Some(screen) = registry.screen(client.screen) else {
            return EventResponse::default();
        };
        let area = screen.area_at(client.center());
        let members: Vec<(WindowId, i32)> = registry
            .group_members(group)
            .iter()
            .filter(|&&w| w != window)
            .filter_map(|&w| registry.get(w))
            .filter(|c| c.is_eligible())
            .map(|c| (c.id, c.default_border))
            .collect();
        let trigger = tile::TileTrigger {
            geometry: client.geometry,
            border_width: client.border_width,
            default_border: client.default_border,
            maximized_across: match stacking {
                Orientation::Vertical => client.flags.vmaximized,
                Orientation::Horizontal => client.flags.hmaximized,
            },
        };

        let Some(plan) = tile::plan(trigger, &members, area, stacking) else {
            trace!(?window, "tile: nothing to do");
            return EventResponse::default();
        };

        let mut response = EventResponse {
            warp_pointer: Some(window),
            ..Default::default()
        };
        let placements = std::iter::once((window, plan.trigger)).chain(plan.members);
        for (w, geometry) in placements {
            if let Some(c) = registry.get_mut(w) {
                c.reset_maximize();
                c.geometry = geometry;
                response.resized.push(w);
                response.state_changed.push(w);
            }
        }
        response
    }

    fn step(&self, big: bool) -> i32 {
        if big { self.settings.move_amount * 10 } else { self.settings.move_amount }
    }

    fn move_by(
        &self,
        registry: &mut ClientRegistry,
        window: WindowId,
        direction: Direction,
        big: bool,
    ) -> EventResponse {
        let Some((client, screen)) = registry.client_and_screen_mut(window) else {
            debug!(?window, "move: unknown window");
            return EventResponse::default();
        };
        if client.flags.freeze {
            trace!(?window, "frozen, not moving");
            return EventResponse::default();
        }

        let (dx, dy) = direction.delta();
        let amount = self.step(big);
        let bw = client.border_width;
        let g = &mut client.geometry;
        g.x += dx * amount;
        g.y += dy * amount;
        keep_reachable(g, bw, screen);

        let area = screen.area_at(g.center());
        let dist = self.settings.snap_distance;
        g.x += snap::snap(g.x, g.x + g.w + bw * 2, area.x, area.max_x(), dist);
        g.y += snap::snap(g.y, g.y + g.h + bw * 2, area.y, area.max_y(), dist);

        EventResponse { moved: vec![window], ..Default::default() }
    }

    fn resize_by(
        &self,
        registry: &mut ClientRegistry,
        window: WindowId,
        direction: Direction,
        big: bool,
    ) -> EventResponse {
        let Some(client) = registry.get_mut(window) else {
            debug!(?window, "resize: unknown window");
            return EventResponse::default();
        };
        if client.flags.freeze {
            trace!(?window, "frozen, not resizing");
            return EventResponse::default();
        }

        let (dx, dy) = direction.delta();
        let amount = self.step(big);
        let (w, h) = client.hints.apply(
            (client.geometry.w + dx * amount).max(1),
            (client.geometry.h + dy * amount).max(1),
        );
        client.geometry.w = w;
        client.geometry.h = h;
        client.reset_maximize();
        EventResponse::resized_with_state(window)
    }
}

/// Keeps at least one pixel of the window on the virtual desktop.
fn keep_reachable(g: &mut Rect, bw: i32, screen: &Screen) {
    let view = screen.view;
    g.x = g.x.max(view.x - (g.w + bw - 1)).min(view.max_x() - bw - 1);
    g.y = g.y.max(view.y - (g.h + bw - 1)).min(view.max_y() - bw - 1);
}
