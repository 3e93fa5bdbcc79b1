//! Most-recently-used ordering of the clients on one screen.
//!
//! Stored as a doubly linked list threaded through a hash map so that
//! move-to-front, removal and neighbour lookup are all O(1).

use crate::common::collections::HashMap;
use crate::sys::window_system::WindowId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Links {
    prev: Option<WindowId>,
    next: Option<WindowId>,
}

#[derive(Debug, Clone, Default)]
pub struct MruQueue {
    links: HashMap<WindowId, Links>,
    head: Option<WindowId>,
    tail: Option<WindowId>,
}

impl MruQueue {
    pub fn new() -> Self { Self::default() }

    pub fn len(&self) -> usize { self.links.len() }

    pub fn is_empty(&self) -> bool { self.links.is_empty() }

    pub fn contains(&self, window: WindowId) -> bool { self.links.contains_key(&window) }

    pub fn front(&self) -> Option<WindowId> { self.head }

    pub fn back(&self) -> Option<WindowId> { self.tail }

    pub fn push_back(&mut self, window: WindowId) {
        if self.contains(window) {
            return;
        }
        self.links.insert(window, Links { prev: self.tail, next: None });
        match self.tail {
            Some(tail) => self.set_next(tail, Some(window)),
            None => self.head = Some(window),
        }
        self.tail = Some(window);
    }

    pub fn push_front(&mut self, window: WindowId) {
        if self.contains(window) {
            return;
        }
        self.links.insert(window, Links { prev: None, next: self.head });
        match self.head {
            Some(head) => self.set_prev(head, Some(window)),
            None => self.tail = Some(window),
        }
        self.head = Some(window);
    }

    pub fn remove(&mut self, window: WindowId) -> bool {
        let Some(links) = self.links.remove(&window) else { return false };
        match links.prev {
            Some(prev) => self.set_next(prev, links.next),
            None => self.head = links.next,
        }
        match links.next {
            Some(next) => self.set_prev(next, links.prev),
            None => self.tail = links.prev,
        }
        true
    }

    /// Moves `window` to the front. Unknown windows are inserted.
    pub fn move_to_front(&mut self, window: WindowId) {
        if self.head == Some(window) {
            return;
        }
        self.remove(window);
        self.push_front(window);
    }

    /// The entry after `window`, wrapping to the front.
    pub fn next_wrapping(&self, window: WindowId) -> Option<WindowId> {
        let links = self.links.get(&window)?;
        links.next.or(self.head)
    }

    /// The entry before `window`, wrapping to the back.
    pub fn prev_wrapping(&self, window: WindowId) -> Option<WindowId> {
        let links = self.links.get(&window)?;
        links.prev.or(self.tail)
    }

    pub fn iter(&self) -> Iter<'_> { Iter { queue: self, cursor: self.head } }

    fn set_next(&mut self, window: WindowId, next: Option<WindowId>) {
        if let Some(links) = self.links.get_mut(&window) {
            links.next = next;
        }
    }

    fn set_prev(&mut self, window: WindowId, prev: Option<WindowId>) {
        if let Some(links) = self.links.get_mut(&window) {
            links.prev = prev;
        }
    }
}

pub struct Iter<'a> {
    queue: &'a MruQueue,
    cursor: Option<WindowId>,
}

impl Iterator for Iter<'_> {
    type Item = WindowId;

    fn next(&mut self) -> Option<WindowId> {
        let current = self.cursor?;
        self.cursor = self.queue.links.get(&current).and_then(|l| l.next);
        Some(current)
    }
}
