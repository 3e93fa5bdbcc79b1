use serde::{Deserialize, Serialize};
use slotmap::new_key_type;

use crate::sys::window_system::WindowId;

new_key_type! {
    pub struct GroupId;
}

/// A set of clients sharing a shortcut number. Members are referenced by id;
/// the registry owns the clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub shortcut: u32,
    members: Vec<WindowId>,
}

impl Group {
    pub fn new(shortcut: u32) -> Group { Group { shortcut, members: Vec::new() } }

    pub fn members(&self) -> &[WindowId] { &self.members }

    pub fn is_empty(&self) -> bool { self.members.is_empty() }

    pub fn contains(&self, window: WindowId) -> bool { self.members.contains(&window) }

    pub(crate) fn add(&mut self, window: WindowId) {
        if !self.contains(window) {
            self.members.push(window);
        }
    }

    pub(crate) fn remove(&mut self, window: WindowId) -> bool {
        let before = self.members.len();
        self.members.retain(|&m| m != window);
        self.members.len() != before
    }

    pub(crate) fn take_members(&mut self) -> Vec<WindowId> { std::mem::take(&mut self.members) }
}
