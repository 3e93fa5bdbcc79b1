use tracing::trace;

use crate::model::client::Client;
use crate::sys::geometry::{Rect, overlaps};

/// Grows `client` until it touches its nearest neighbours, or toggles back to
/// the saved geometry when already expanded.
///
/// `neighbours` are the outer rectangles (border included) of the windows that
/// may stop the growth. `area` bounds the growth when no neighbour does.
pub fn toggle_expand(client: &mut Client, neighbours: &[Rect], area: Rect) -> bool {
    if client.flags.freeze {
        trace!(window = ?client.id, "frozen, not expanding");
        return false;
    }

    if client.flags.expanded {
        client.flags.expanded = false;
        client.geometry = client.saved_geometry;
        client.border_width = client.default_border;
        return true;
    }

    if client.flags.any_maximized() {
        trace!(window = ?client.id, "maximized, not expanding");
        return false;
    }

    client.saved_geometry = client.geometry;
    let own = client.outer();

    let mut top = area.y;
    let mut bottom = area.max_y();
    let mut left = area.x;
    let mut right = area.max_x();

    for n in neighbours {
        if overlaps(own.x, own.w, n.x, n.w) {
            if n.max_y() <= own.y {
                top = top.max(n.max_y());
            }
            if n.y >= own.max_y() {
                bottom = bottom.min(n.y);
            }
        }
        if overlaps(own.y, own.h, n.y, n.h) {
            if n.max_x() <= own.x {
                left = left.max(n.max_x());
            }
            if n.x >= own.max_x() {
                right = right.min(n.x);
            }
        }
    }

    let bw2 = client.border_width * 2;
    client.geometry = Rect::new(left, top, right - left - bw2, bottom - top - bw2);
    client.flags.expanded = true;
    true
}
