use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

/// Number of distinct titles remembered per client.
pub const MAX_TITLES: usize = 5;

/// Recently seen titles of one window, oldest first. The current title is the
/// last entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TitleHistory {
    titles: VecDeque<String>,
}

impl TitleHistory {
    pub fn new() -> Self { Self::default() }

    pub fn record(&mut self, title: impl Into<String>) {
        let title = title.into();
        if let Some(pos) = self.titles.iter().position(|t| *t == title) {
            if let Some(existing) = self.titles.remove(pos) {
                self.titles.push_back(existing);
            }
            return;
        }
        self.titles.push_back(title);
        if self.titles.len() > MAX_TITLES {
            self.titles.pop_front();
        }
    }

    pub fn current(&self) -> &str { self.titles.back().map(String::as_str).unwrap_or("") }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &str> + '_ {
        self.titles.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize { self.titles.len() }

    pub fn is_empty(&self) -> bool { self.titles.is_empty() }
}
