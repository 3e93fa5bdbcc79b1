use crate::model::client::Client;
use crate::model::screen::Screen;
use crate::sys::geometry::Point;

/// Initial position for a window that is not yet viewable.
///
/// Windows that requested a position keep it, pulled back only far enough to
/// stay on the virtual desktop. Everything else is centred under `pointer`
/// inside the region the pointer is on. An axis on which the window does not
/// fit is pinned to the region origin and stretched to the region.
pub fn place(client: &mut Client, screen: &Screen, pointer: Point) {
    let bw2 = client.border_width * 2;
    let g = &mut client.geometry;

    if client.hints.has_position() {
        let view = screen.view;
        g.x = g.x.min(view.max_x() - g.w - bw2).max(view.x);
        g.y = g.y.min(view.max_y() - g.h - bw2).max(view.y);
        return;
    }

    let area = screen.area_at(pointer);

    let x = (pointer.x.max(area.x) - g.w / 2).max(area.x);
    let x_slack = area.max_x() - g.w - bw2;
    if x_slack >= area.x {
        g.x = x.min(x_slack).max(area.x);
    } else {
        g.x = area.x;
        g.w = area.w - bw2;
    }

    let y = (pointer.y.max(area.y) - g.h / 2).max(area.y);
    let y_slack = area.max_y() - g.h - bw2;
    if y_slack >= area.y {
        g.y = y.min(y_slack).max(area.y);
    } else {
        g.y = area.y;
        g.h = area.h - bw2;
    }
}
