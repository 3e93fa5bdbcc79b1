use slotmap::new_key_type;

use crate::model::mru::MruQueue;
use crate::sys::geometry::{Gap, Point, Rect};

new_key_type! {
    pub struct ScreenId;
}

/// One managed root window and the outputs that make it up.
#[derive(Debug, Clone)]
pub struct Screen {
    /// Bounds of the whole virtual desktop.
    pub view: Rect,
    /// Physical outputs. Empty means the view is the only region.
    pub regions: Vec<Rect>,
    pub gap: Gap,
    pub mru: MruQueue,
    /// Set while a cycle is in progress; activation must not reorder `mru`.
    pub cycling: bool,
}

impl Screen {
    pub fn new(view: Rect, regions: Vec<Rect>, gap: Gap) -> Screen {
        Screen {
            view,
            regions,
            gap,
            mru: MruQueue::new(),
            cycling: false,
        }
    }

    /// The view minus the configured gap.
    pub fn work_area(&self) -> Rect { self.view.inset(&self.gap) }

    pub fn region_index(&self, point: Point) -> Option<usize> {
        self.regions.iter().position(|r| r.contains(point))
    }

    /// Usable area of the region containing `point`, falling back to the work
    /// area when no region contains it.
    pub fn area_at(&self, point: Point) -> Rect {
        match self.region_index(point) {
            Some(idx) => self.regions[idx].inset(&self.gap),
            None => self.work_area(),
        }
    }

    pub fn update_geometry(&mut self, view: Rect, regions: Vec<Rect>) {
        self.view = view;
        self.regions = regions;
    }
}
