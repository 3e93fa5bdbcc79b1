//! The active client and MRU cycling.

use tracing::{debug, trace};

use super::Reactor;
use crate::actor::broadcast::BroadcastEvent;
use crate::model::client::Highlight;
use crate::model::registry::ClientRegistry;
use crate::model::screen::ScreenId;
use crate::sys::window_system::{ProtocolMessage, Protocols, WindowId, WindowSystem, WmState};

/// Finds the client a cycle step lands on, returned together with the client
/// it starts from.
///
/// The walk starts at the active client, or at the MRU head (tail when
/// reversed) when nothing on `screen` is active, and wraps around. Hidden and
/// ignored clients are skipped, as are clients outside the starting client's
/// group when `in_group` is set. Returns `None` when nothing is eligible.
pub fn find_cycle_target(
    registry: &ClientRegistry,
    screen: ScreenId,
    reverse: bool,
    in_group: bool,
) -> Option<(WindowId, WindowId)> {
    let mru = &registry.screen(screen)?.mru;
    let start = registry.active().filter(|&w| mru.contains(w));
    let old = match start {
        Some(window) => window,
        None if reverse => mru.back()?,
        None => mru.front()?,
    };
    let old_group = registry.get(old).and_then(|c| c.group);

    let mut current = old;
    loop {
        current = if reverse { mru.prev_wrapping(current)? } else { mru.next_wrapping(current)? };
        let skip = registry
            .get(current)
            .is_none_or(|c| !c.is_eligible() || (in_group && c.group != old_group));
        if current == old {
            return (!skip).then_some((old, old));
        }
        if !skip {
            return Some((old, current));
        }
    }
}

impl<S: WindowSystem> Reactor<S> {
    /// Makes `window` the active client, or redraws it as inactive.
    ///
    /// Deactivating never clears the registry's active client; that only
    /// happens through [`Reactor::clear_active`].
    pub(super) fn set_active(&mut self, window: WindowId, active: bool) {
        if !active {
            if let Some(client) = self.registry.get_mut(window) {
                client.active = false;
            }
            self.draw_border(window);
            return;
        }

        let Some(client) = self.registry.get(window) else {
            debug!(?window, "set_active: unknown window");
            return;
        };
        let screen = client.screen;
        let colormap = client.colormap;
        let input = client.flags.input;
        let take_focus = client.protocols.contains(Protocols::TAKE_FOCUS);

        let previous = self.registry.active();
        if let Some(previous) = previous.filter(|&p| p != window) {
            self.set_active(previous, false);
        }

        self.system.install_colormap(colormap);
        if input {
            self.system.set_input_focus(window);
        }
        if take_focus {
            self.system.send_protocol_message(window, ProtocolMessage::TakeFocus);
        }
        if let Some(screen) = self.registry.screen_mut(screen) {
            if !screen.cycling {
                screen.mru.move_to_front(window);
            }
        }

        if previous != Some(window) {
            self.registry.set_active(Some(window));
            self.system.set_active_window(Some(window));
            self.broadcast(BroadcastEvent::ActiveWindowChanged { window: Some(window) });
        }

        if let Some(client) = self.registry.get_mut(window) {
            client.active = true;
        }
        self.draw_border(window);
    }

    /// The "no active client" transition.
    pub(super) fn clear_active(&mut self) {
        if let Some(previous) = self.registry.active() {
            self.set_active(previous, false);
        }
        self.registry.set_active(None);
        self.system.set_active_window(None);
        self.broadcast(BroadcastEvent::ActiveWindowChanged { window: None });
    }

    pub(super) fn cycle(&mut self, reverse: bool, in_group: bool) {
        let screen = self.screen;
        let Some((old, new)) = find_cycle_target(&self.registry, screen, reverse, in_group) else {
            debug!("cycle: no visible windows");
            return;
        };

        if let Some(s) = self.registry.screen_mut(screen) {
            if !s.cycling {
                s.cycling = true;
                self.system.grab_keyboard();
            }
        }

        self.save_pointer(old);
        self.warp_pointer_to(new);
        self.set_active(new, true);
    }

    /// Ends a cycle: the finally active client goes to the MRU front once and
    /// group highlights are cleared. Repeating it changes nothing.
    pub(super) fn cycle_end(&mut self, screen: ScreenId) {
        let Some(s) = self.registry.screen_mut(screen) else { return };
        let was_cycling = std::mem::replace(&mut s.cycling, false);

        if let Some(active) = self.registry.active() {
            if let Some((client, s)) = self.registry.client_and_screen_mut(active) {
                if client.screen == screen {
                    s.mru.move_to_front(active);
                }
            }
        }

        let highlighted: Vec<WindowId> = self
            .registry
            .iter()
            .filter(|c| c.screen == screen && c.flags.highlight != Highlight::None)
            .map(|c| c.id)
            .collect();
        for window in highlighted {
            if let Some(client) = self.registry.get_mut(window) {
                client.flags.highlight = Highlight::None;
            }
            self.draw_border(window);
        }

        if was_cycling {
            self.system.ungrab_keyboard();
        }
    }

    pub(super) fn save_pointer(&mut self, window: WindowId) {
        if !self.registry.contains(window) {
            return;
        }
        let position = self.system.query_pointer(Some(window));
        if let Some(client) = self.registry.get_mut(window) {
            client.save_pointer(position);
        }
    }

    /// Brings `window` up and moves the pointer onto it.
    pub(super) fn warp_pointer_to(&mut self, window: WindowId) {
        let Some(client) = self.registry.get(window) else {
            trace!(?window, "warp: unknown window");
            return;
        };
        let target = client.pointer_target();
        if client.state == WmState::Iconic {
            self.unhide(window);
        } else {
            self.raise(window);
        }
        self.system.warp_pointer(window, target);
    }
}
