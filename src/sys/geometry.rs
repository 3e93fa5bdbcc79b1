use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self { Self { x, y } }
}

/// An axis-aligned rectangle in root window coordinates.
///
/// `w` and `h` describe the inner size of a window; borders are accounted for
/// separately by callers that know the border width.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self { Self { x, y, w, h } }

    pub fn max_x(&self) -> i32 { self.x + self.w }

    pub fn max_y(&self) -> i32 { self.y + self.h }

    pub fn center(&self) -> Point { Point::new(self.x + self.w / 2, self.y + self.h / 2) }

    /// Half-open containment: the right and bottom edges are outside.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x < self.max_x() && p.y >= self.y && p.y < self.max_y()
    }

    /// The rectangle grown by `border` on every side.
    pub fn outer(&self, border: i32) -> Rect {
        Rect::new(self.x, self.y, self.w + border * 2, self.h + border * 2)
    }

    pub fn inset(&self, gap: &Gap) -> Rect {
        Rect::new(
            self.x + gap.left,
            self.y + gap.top,
            (self.w - gap.left - gap.right).max(0),
            (self.h - gap.top - gap.bottom).max(0),
        )
    }

    pub fn span(&self, orientation: Orientation) -> (i32, i32) {
        match orientation {
            Orientation::Horizontal => (self.x, self.w),
            Orientation::Vertical => (self.y, self.h),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    pub fn flip(self) -> Self {
        match self {
            Orientation::Horizontal => Orientation::Vertical,
            Orientation::Vertical => Orientation::Horizontal,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    pub fn orientation(self) -> Orientation {
        match self {
            Direction::Left | Direction::Right => Orientation::Horizontal,
            Direction::Up | Direction::Down => Orientation::Vertical,
        }
    }

    /// Unit step along the direction in root coordinates (y grows downwards).
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
        }
    }
}

/// Space reserved at the edges of every display region (panels, docks).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gap {
    pub top: i32,
    pub bottom: i32,
    pub left: i32,
    pub right: i32,
}

impl std::fmt::Display for Gap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{},{},{}", self.top, self.bottom, self.left, self.right)
    }
}

impl std::str::FromStr for Gap {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts = s
            .split(',')
            .map(|p| p.trim().parse::<i32>().map_err(|e| format!("invalid gap value {p:?}: {e}")))
            .collect::<Result<Vec<_>, _>>()?;
        match parts.as_slice() {
            &[top, bottom, left, right] => Ok(Gap { top, bottom, left, right }),
            _ => Err(format!("gap must have four comma separated values, got {s:?}")),
        }
    }
}

/// Whether the 1-D intervals `[a0, a0 + len0)` and `[a1, a1 + len1)` overlap.
pub fn overlaps(a0: i32, len0: i32, a1: i32, len1: i32) -> bool { a0 < a1 + len1 && a1 < a0 + len0 }
