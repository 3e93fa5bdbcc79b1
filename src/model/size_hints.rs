//! Application supplied sizing constraints and their projection onto window
//! geometry.

use serde::{Deserialize, Serialize};

use crate::sys::window_system::{RawSizeHints, SizeHintFlags};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SizeHints {
    pub flags: SizeHintFlags,
    pub base_w: i32,
    pub base_h: i32,
    pub min_w: i32,
    pub min_h: i32,
    /// 0 means unbounded.
    pub max_w: i32,
    pub max_h: i32,
    pub inc_w: i32,
    pub inc_h: i32,
    /// Maximum height / width ratio, 0 when unconstrained.
    pub min_aspect: f64,
    /// Maximum width / height ratio, 0 when unconstrained.
    pub max_aspect: f64,
}

impl Default for SizeHints {
    fn default() -> Self {
        Self {
            flags: SizeHintFlags::empty(),
            base_w: 0,
            base_h: 0,
            min_w: 0,
            min_h: 0,
            max_w: 0,
            max_h: 0,
            inc_w: 1,
            inc_h: 1,
            min_aspect: 0.0,
            max_aspect: 0.0,
        }
    }
}

impl SizeHints {
    pub fn from_raw(raw: Option<&RawSizeHints>) -> Self {
        let Some(raw) = raw else { return Self::default() };
        let raw = &raw.clamped();
        let flags = raw.flags;
        let mut hints = SizeHints { flags, ..Default::default() };

        if flags.contains(SizeHintFlags::P_BASE_SIZE) {
            (hints.base_w, hints.base_h) = (raw.base_width, raw.base_height);
        } else if flags.contains(SizeHintFlags::P_MIN_SIZE) {
            (hints.base_w, hints.base_h) = (raw.min_width, raw.min_height);
        }

        if flags.contains(SizeHintFlags::P_MIN_SIZE) {
            (hints.min_w, hints.min_h) = (raw.min_width, raw.min_height);
        } else if flags.contains(SizeHintFlags::P_BASE_SIZE) {
            (hints.min_w, hints.min_h) = (raw.base_width, raw.base_height);
        }

        if flags.contains(SizeHintFlags::P_MAX_SIZE) {
            (hints.max_w, hints.max_h) = (raw.max_width, raw.max_height);
        }

        if flags.contains(SizeHintFlags::P_RESIZE_INC) {
            (hints.inc_w, hints.inc_h) = (raw.width_inc, raw.height_inc);
        }
        hints.inc_w = hints.inc_w.max(1);
        hints.inc_h = hints.inc_h.max(1);

        if flags.contains(SizeHintFlags::P_ASPECT) {
            let (min_x, min_y) = raw.min_aspect;
            let (max_x, max_y) = raw.max_aspect;
            if min_x > 0 && min_y > 0 {
                hints.min_aspect = min_y as f64 / min_x as f64;
            }
            if max_y > 0 && max_x > 0 {
                hints.max_aspect = max_x as f64 / max_y as f64;
            }
        }

        hints
    }

    /// The application asked for a specific position.
    pub fn has_position(&self) -> bool {
        self.flags.intersects(SizeHintFlags::US_POSITION | SizeHintFlags::P_POSITION)
    }

    /// Projects `(w, h)` onto the sizes the application accepts.
    ///
    /// The result is a fixed point: applying the hints to it again returns it
    /// unchanged.
    pub fn apply(&self, w: i32, h: i32) -> (i32, i32) {
        let mut current = self.apply_once(w, h);
        loop {
            let next = self.apply_once(current.0, current.1);
            if next == current {
                return current;
            }
            current = next;
        }
    }

    fn apply_once(&self, mut w: i32, mut h: i32) -> (i32, i32) {
        let base_is_min = self.base_w == self.min_w && self.base_h == self.min_h;

        // ICCCM 4.1.2.3: base size is removed before the aspect check unless
        // it doubles as the minimum size.
        if !base_is_min {
            w -= self.base_w;
            h -= self.base_h;
        }

        if self.min_aspect > 0.0 && self.max_aspect > 0.0 && w > 0 && h > 0 {
            if w as f64 > h as f64 * self.max_aspect {
                w = (h as f64 * self.max_aspect).floor() as i32;
            } else if h as f64 > w as f64 * self.min_aspect {
                h = (w as f64 * self.min_aspect).floor() as i32;
            }
        }

        if base_is_min {
            w -= self.base_w;
            h -= self.base_h;
        }

        w -= w.rem_euclid(self.inc_w);
        h -= h.rem_euclid(self.inc_h);

        w += self.base_w;
        h += self.base_h;

        w = w.max(self.min_w);
        h = h.max(self.min_h);

        if self.max_w > 0 {
            w = w.min(self.aligned_max(self.max_w, self.base_w, self.inc_w, self.min_w));
        }
        if self.max_h > 0 {
            h = h.min(self.aligned_max(self.max_h, self.base_h, self.inc_h, self.min_h));
        }

        (w.max(1), h.max(1))
    }

    /// Largest size not above `max` reachable from `base` in `inc` steps, as
    /// long as that keeps the minimum satisfied.
    fn aligned_max(&self, max: i32, base: i32, inc: i32, min: i32) -> i32 {
        let aligned = max - (max - base).rem_euclid(inc);
        if aligned >= min { aligned } else { max }
    }
}

/// Sizes outside the X geometry range are never meaningful.
const MAX_DIMENSION: i32 = u16::MAX as i32;

fn dimension(v: i32) -> i32 { v.clamp(0, MAX_DIMENSION) }

impl RawSizeHints {
    fn clamped(&self) -> RawSizeHints {
        RawSizeHints {
            min_width: dimension(self.min_width),
            min_height: dimension(self.min_height),
            max_width: dimension(self.max_width),
            max_height: dimension(self.max_height),
            width_inc: dimension(self.width_inc),
            height_inc: dimension(self.height_inc),
            base_width: dimension(self.base_width),
            base_height: dimension(self.base_height),
            ..*self
        }
    }
}
