//! Taking windows under management, letting them go, and the per-client
//! operations that do not involve geometry.

use tracing::{debug, info, trace};

use super::Reactor;
use crate::layout_engine::LayoutCommand;
use crate::model::client::{Client, Highlight};
use crate::model::size_hints::SizeHints;
use crate::sys::window_system::{
    NetWmState, ProtocolMessage, Protocols, WindowId, WindowSystem, WmState,
};

impl<S: WindowSystem> Reactor<S> {
    /// Starts managing `window`. `mapped` is whether it was already mapped
    /// when found.
    pub(super) fn manage(&mut self, window: WindowId, mapped: bool) {
        let Some(attributes) = self.system.window_attributes(window) else {
            debug!(?window, "manage: window vanished");
            return;
        };
        if attributes.override_redirect {
            trace!(?window, "manage: override-redirect, ignoring");
            return;
        }

        self.system.grab_server();

        // Read before anything we publish overwrites it.
        let net_state = self.system.net_wm_state(window);
        let undecorated = self.system.motif_hints(window).is_some_and(|m| m.disables_border());
        let border = if undecorated { 0 } else { self.config.settings.border_width };
        let mut client = Client::new(window, self.screen, attributes.geometry, border);
        client.decorated = !undecorated;
        client.state = if mapped { WmState::Normal } else { WmState::Iconic };
        client.hints = SizeHints::from_raw(self.system.size_hints(window).as_ref());
        if let Some(title) = self.system.title(window) {
            client.titles.record(title);
        }
        client.class = self.system.class_hint(window).unwrap_or_default();
        client.colormap = attributes.colormap;
        client.protocols = self.system.protocols(window);
        let wm_hints = self.system.wm_hints(window).unwrap_or_default();
        client.flags.input = wm_hints.input == Some(true);
        self.registry.insert(client);

        if !attributes.viewable {
            let pointer = self.system.query_pointer(None);
            let response = self.layout_engine.place(&mut self.registry, window, pointer);
            self.handle_layout_response(response);
            if let Some(state) = wm_hints.initial_state {
                self.system.set_wm_state(window, state);
            }
        }

        self.draw_border(window);
        self.system.select_client_events(window);
        self.system.add_to_save_set(window);

        if let Some(parent) = self.system.transient_for(window) {
            self.adopt_transient(window, parent);
        }

        self.send_configure(window);

        match self.system.wm_state(window).unwrap_or(WmState::Normal) {
            WmState::Iconic => self.hide(window),
            _ => self.unhide(window),
        }

        self.publish_client_list();
        self.restore_net_wm_state(window, net_state);
        self.system.ungrab_server();

        if let Some(client) = self.registry.get(window) {
            info!(?window, title = client.title(), class = %client.class.class, "managing window");
        }
    }

    fn adopt_transient(&mut self, window: WindowId, parent: WindowId) {
        let Some(parent) = self.registry.get(parent) else {
            trace!(?window, ?parent, "transient for an unmanaged window");
            return;
        };
        let ignore = parent.flags.ignore;
        let shortcut = parent.group.and_then(|g| self.registry.group(g)).map(|g| g.shortcut);
        if let Some(shortcut) = shortcut {
            self.registry.move_to_group(window, shortcut);
        }
        if let Some(client) = self.registry.get_mut(window) {
            client.flags.ignore |= ignore;
        }
    }

    fn restore_net_wm_state(&mut self, window: WindowId, state: NetWmState) {
        let command = match (state.maximized_vert, state.maximized_horz) {
            (true, true) => Some(LayoutCommand::ToggleMaximize),
            (true, false) => Some(LayoutCommand::ToggleVMaximize),
            (false, true) => Some(LayoutCommand::ToggleHMaximize),
            (false, false) => None,
        };
        if let Some(command) = command {
            let response = self.layout_engine.handle_command(&mut self.registry, window, command);
            self.handle_layout_response(response);
        }
        let hidden = self.registry.get(window).is_some_and(|c| c.flags.hidden);
        if state.hidden && !hidden {
            self.hide(window);
        }
    }

    /// Stops managing `window`. `withdrawn` is set when the window still
    /// exists and should be handed back to the root.
    pub(super) fn unmanage(&mut self, window: WindowId, withdrawn: bool) {
        if !self.registry.contains(window) {
            return;
        }
        if withdrawn {
            self.system.grab_server();
            self.system.set_wm_state(window, WmState::Withdrawn);
            self.system.remove_from_save_set(window);
            self.system.ungrab_server();
        }

        let was_active = self.registry.active() == Some(window);
        let client = self.registry.remove(window);
        self.publish_client_list();
        if was_active {
            self.clear_active();
        }
        if let Some(client) = client {
            info!(?window, title = client.title(), "released window");
        }
    }

    pub(super) fn hide(&mut self, window: WindowId) {
        let Some(client) = self.registry.get_mut(window) else { return };
        client.active = false;
        client.flags.hidden = true;
        client.state = WmState::Iconic;
        self.system.unmap(window);
        self.system.set_wm_state(window, WmState::Iconic);
        if self.registry.active() == Some(window) {
            self.clear_active();
        }
        self.publish_state(window);
    }

    pub(super) fn unhide(&mut self, window: WindowId) {
        let Some(client) = self.registry.get_mut(window) else { return };
        client.flags.hidden = false;
        client.state = WmState::Normal;
        self.system.map(window);
        self.system.raise(window);
        self.system.set_wm_state(window, WmState::Normal);
        self.publish_state(window);
    }

    pub(super) fn raise(&mut self, window: WindowId) {
        if self.registry.contains(window) {
            self.system.raise(window);
        }
    }

    pub(super) fn lower(&mut self, window: WindowId) {
        if self.registry.contains(window) {
            self.system.lower(window);
        }
    }

    /// Asks the client to close, or kills it when it does not speak
    /// `WM_DELETE_WINDOW`.
    pub(super) fn delete(&mut self, window: WindowId) {
        let Some(client) = self.registry.get(window) else { return };
        if client.protocols.contains(Protocols::DELETE_WINDOW) {
            self.system.send_protocol_message(window, ProtocolMessage::DeleteWindow);
        } else {
            debug!(?window, "no WM_DELETE_WINDOW, killing client");
            self.system.kill_client(window);
        }
    }

    /// Moves `window` into the group with `shortcut`, or out of it when it is
    /// already there. The border shows which way it went until the next cycle
    /// ends.
    pub(super) fn toggle_group(&mut self, window: WindowId, shortcut: u32) {
        let Some(client) = self.registry.get(window) else { return };
        let current = self.registry.group_by_shortcut(shortcut);
        let highlight = if current.is_some() && client.group == current {
            self.registry.leave_group(window);
            Highlight::Ungroup
        } else {
            self.registry.move_to_group(window, shortcut);
            Highlight::Group
        };
        if let Some(client) = self.registry.get_mut(window) {
            client.flags.highlight = highlight;
        }
        self.draw_border(window);
    }

    pub(super) fn ungroup(&mut self, window: WindowId) {
        let Some(group) = self.registry.get(window).and_then(|c| c.group) else {
            trace!(?window, "ungroup: not in a group");
            return;
        };
        self.registry.ungroup(group);
    }
}
