//! Every managed client, keyed by window id, together with the screens and
//! groups they point into.

use slotmap::SlotMap;
use tracing::trace;

use crate::common::collections::HashMap;
use crate::model::client::Client;
use crate::model::group::{Group, GroupId};
use crate::model::screen::{Screen, ScreenId};
use crate::sys::window_system::WindowId;

#[derive(Debug, Default)]
pub struct ClientRegistry {
    clients: HashMap<WindowId, Client>,
    /// Management order, oldest first.
    order: Vec<WindowId>,
    screens: SlotMap<ScreenId, Screen>,
    groups: SlotMap<GroupId, Group>,
    active: Option<WindowId>,
}

impl ClientRegistry {
    pub fn new() -> Self { Self::default() }

    pub fn add_screen(&mut self, screen: Screen) -> ScreenId { self.screens.insert(screen) }

    pub fn screen(&self, id: ScreenId) -> Option<&Screen> { self.screens.get(id) }

    pub fn screen_mut(&mut self, id: ScreenId) -> Option<&mut Screen> { self.screens.get_mut(id) }

    pub fn screens(&self) -> impl Iterator<Item = (ScreenId, &Screen)> { self.screens.iter() }

    pub fn screen_ids(&self) -> Vec<ScreenId> { self.screens.keys().collect() }

    pub fn len(&self) -> usize { self.clients.len() }

    pub fn is_empty(&self) -> bool { self.clients.is_empty() }

    pub fn contains(&self, window: WindowId) -> bool { self.clients.contains_key(&window) }

    pub fn get(&self, window: WindowId) -> Option<&Client> { self.clients.get(&window) }

    pub fn get_mut(&mut self, window: WindowId) -> Option<&mut Client> {
        self.clients.get_mut(&window)
    }

    /// Client ids in management order.
    pub fn windows(&self) -> &[WindowId] { &self.order }

    pub fn iter(&self) -> impl Iterator<Item = &Client> {
        self.order.iter().filter_map(|w| self.clients.get(w))
    }

    /// Windows of `screen` in management order.
    pub fn windows_on(&self, screen: ScreenId) -> Vec<WindowId> {
        self.iter().filter(|c| c.screen == screen).map(|c| c.id).collect()
    }

    pub fn client_and_screen_mut(&mut self, window: WindowId) -> Option<(&mut Client, &mut Screen)> {
        let client = self.clients.get_mut(&window)?;
        let screen = self.screens.get_mut(client.screen)?;
        Some((client, screen))
    }

    /// Registers `client`, appending it to the management order and to the
    /// back of its screen's MRU queue.
    pub fn insert(&mut self, client: Client) {
        let window = client.id;
        if self.clients.contains_key(&window) {
            trace!(?window, "client already registered");
            return;
        }
        if let Some(screen) = self.screens.get_mut(client.screen) {
            screen.mru.push_back(window);
        }
        self.order.push(window);
        self.clients.insert(window, client);
    }

    /// Drops `window` from the registry, its screen's MRU queue and its group.
    /// Does not touch the active client; callers run the focus transition.
    pub fn remove(&mut self, window: WindowId) -> Option<Client> {
        let mut client = self.clients.remove(&window)?;
        self.order.retain(|&w| w != window);
        if let Some(screen) = self.screens.get_mut(client.screen) {
            screen.mru.remove(window);
        }
        if let Some(group) = client.group.take() {
            self.detach_from_group(group, window);
        }
        Some(client)
    }

    pub fn active(&self) -> Option<WindowId> { self.active }

    pub fn active_client(&self) -> Option<&Client> { self.active.and_then(|w| self.clients.get(&w)) }

    pub(crate) fn set_active(&mut self, window: Option<WindowId>) { self.active = window; }

    pub fn group(&self, id: GroupId) -> Option<&Group> { self.groups.get(id) }

    pub fn group_by_shortcut(&self, shortcut: u32) -> Option<GroupId> {
        self.groups.iter().find(|(_, g)| g.shortcut == shortcut).map(|(id, _)| id)
    }

    pub fn group_members(&self, id: GroupId) -> &[WindowId] {
        self.groups.get(id).map(Group::members).unwrap_or(&[])
    }

    /// Puts `window` into the group with `shortcut`, creating the group when
    /// needed and leaving any previous group.
    pub fn move_to_group(&mut self, window: WindowId, shortcut: u32) -> Option<GroupId> {
        let previous = self.clients.get(&window)?.group;
        let target = match self.group_by_shortcut(shortcut) {
            Some(id) => id,
            None => self.groups.insert(Group::new(shortcut)),
        };
        if previous == Some(target) {
            return Some(target);
        }
        if let Some(previous) = previous {
            self.detach_from_group(previous, window);
        }
        if let Some(group) = self.groups.get_mut(target) {
            group.add(window);
        }
        if let Some(client) = self.clients.get_mut(&window) {
            client.group = Some(target);
        }
        Some(target)
    }

    /// Takes `window` out of its group. Returns whether it was in one.
    pub fn leave_group(&mut self, window: WindowId) -> bool {
        let Some(group) = self.clients.get_mut(&window).and_then(|c| c.group.take()) else {
            return false;
        };
        self.detach_from_group(group, window);
        true
    }

    /// Dissolves the group, clearing every member's back-reference.
    pub fn ungroup(&mut self, id: GroupId) {
        let Some(mut group) = self.groups.remove(id) else { return };
        for member in group.take_members() {
            if let Some(client) = self.clients.get_mut(&member) {
                client.group = None;
            }
        }
    }

    fn detach_from_group(&mut self, id: GroupId, window: WindowId) {
        let Some(group) = self.groups.get_mut(id) else { return };
        group.remove(window);
        if group.is_empty() {
            trace!(shortcut = group.shortcut, "destroying empty group");
            self.groups.remove(id);
        }
    }
}
