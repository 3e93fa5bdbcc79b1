//! Full and partial maximize toggles.
//!
//! Each function takes the usable area of the region under the client's
//! current centre and returns whether the client changed. Frozen clients are
//! left alone.

use tracing::trace;

use crate::model::client::Client;
use crate::sys::geometry::Rect;

pub fn toggle_maximize(client: &mut Client, area: Rect) -> bool {
    if client.flags.freeze {
        trace!(window = ?client.id, "frozen, not maximizing");
        return false;
    }

    if client.flags.maximized() {
        client.flags.vmaximized = false;
        client.flags.hmaximized = false;
        client.geometry = client.saved_geometry;
        client.border_width = client.default_border;
        return true;
    }

    if !client.flags.vmaximized {
        client.saved_geometry.y = client.geometry.y;
        client.saved_geometry.h = client.geometry.h;
    }
    if !client.flags.hmaximized {
        client.saved_geometry.x = client.geometry.x;
        client.saved_geometry.w = client.geometry.w;
    }

    client.geometry = area;
    client.border_width = 0;
    client.flags.vmaximized = true;
    client.flags.hmaximized = true;
    true
}

pub fn toggle_vmaximize(client: &mut Client, area: Rect) -> bool {
    if client.flags.freeze {
        trace!(window = ?client.id, "frozen, not maximizing vertically");
        return false;
    }

    if client.flags.vmaximized {
        client.geometry.y = client.saved_geometry.y;
        client.geometry.h = client.saved_geometry.h;
        client.border_width = client.default_border;
        if client.flags.hmaximized {
            client.geometry.w -= client.border_width * 2;
        }
        client.flags.vmaximized = false;
        return true;
    }

    client.saved_geometry.y = client.geometry.y;
    client.saved_geometry.h = client.geometry.h;

    // Becoming fully maximized: the border goes away.
    if client.flags.hmaximized {
        client.geometry.w += client.border_width * 2;
        client.border_width = 0;
    }

    client.geometry.y = area.y;
    client.geometry.h = area.h - client.border_width * 2;
    client.flags.vmaximized = true;
    true
}

pub fn toggle_hmaximize(client: &mut Client, area: Rect) -> bool {
    if client.flags.freeze {
        trace!(window = ?client.id, "frozen, not maximizing horizontally");
        return false;
    }

    if client.flags.hmaximized {
        client.geometry.x = client.saved_geometry.x;
        client.geometry.w = client.saved_geometry.w;
        client.border_width = client.default_border;
        if client.flags.vmaximized {
            client.geometry.h -= client.border_width * 2;
        }
        client.flags.hmaximized = false;
        return true;
    }

    client.saved_geometry.x = client.geometry.x;
    client.saved_geometry.w = client.geometry.w;

    if client.flags.vmaximized {
        client.geometry.h += client.border_width * 2;
        client.border_width = 0;
    }

    client.geometry.x = area.x;
    client.geometry.w = area.w - client.border_width * 2;
    client.flags.hmaximized = true;
    true
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::screen::ScreenId;
    use crate::sys::window_system::WindowId;

    const AREA: Rect = Rect::new(0, 0, 800, 600);
    const START: Rect = Rect::new(10, 20, 200, 100);

    fn client() -> Client { Client::new(WindowId::new(1), ScreenId::default(), START, 4) }

    #[test]
    fn vmaximize_twice_restores_geometry_and_border() {
        let mut c = client();
        assert!(toggle_vmaximize(&mut c, AREA));
        assert_eq!(c.geometry, Rect::new(10, 0, 200, 592));
        assert_eq!(c.border_width, 4);
        assert!(toggle_vmaximize(&mut c, AREA));
        assert_eq!(c.geometry, START);
        assert_eq!(c.border_width, 4);
        assert!(!c.flags.vmaximized);
    }

    #[test]
    fn full_maximize_drops_the_border_and_restores_it() {
        let mut c = client();
        toggle_maximize(&mut c, AREA);
        assert_eq!(c.geometry, AREA);
        assert_eq!(c.border_width, 0);
        assert!(c.flags.maximized());
        toggle_maximize(&mut c, AREA);
        assert_eq!(c.geometry, START);
        assert_eq!(c.border_width, 4);
        assert!(!c.flags.any_maximized());
    }

    #[test]
    fn partial_maximizes_combine_into_full_maximize() {
        let mut c = client();
        toggle_hmaximize(&mut c, AREA);
        assert_eq!(c.geometry, Rect::new(0, 20, 792, 100));
        assert!(!c.flags.maximized());

        toggle_vmaximize(&mut c, AREA);
        assert_eq!(c.geometry, AREA);
        assert_eq!(c.border_width, 0);
        assert!(c.flags.maximized());

        // Leaving the vertical axis only gives back that axis.
        toggle_vmaximize(&mut c, AREA);
        assert_eq!(c.geometry, Rect::new(0, 20, 792, 100));
        assert_eq!(c.border_width, 4);
        assert!(c.flags.hmaximized && !c.flags.vmaximized);

        toggle_hmaximize(&mut c, AREA);
        assert_eq!(c.geometry, START);
    }

    #[test]
    fn full_maximize_keeps_saved_axis_of_a_partial_maximize() {
        let mut c = client();
        toggle_vmaximize(&mut c, AREA);
        toggle_maximize(&mut c, AREA);
        assert!(c.flags.maximized());
        toggle_maximize(&mut c, AREA);
        assert_eq!(c.geometry, START);
    }

    #[test]
    fn frozen_clients_do_not_move() {
        let mut c = client();
        c.flags.freeze = true;
        assert!(!toggle_maximize(&mut c, AREA));
        assert!(!toggle_vmaximize(&mut c, AREA));
        assert!(!toggle_hmaximize(&mut c, AREA));
        assert_eq!(c.geometry, START);
    }

    #[test]
    fn maximized_tracks_both_partial_flags_through_any_sequence() {
        let mut c = client();
        let ops: [fn(&mut Client, Rect) -> bool; 3] = [toggle_maximize, toggle_vmaximize, toggle_hmaximize];
        for step in 0..30usize {
            ops[(step * 7 + step / 3) % 3](&mut c, AREA);
            assert_eq!(c.flags.maximized(), c.flags.vmaximized && c.flags.hmaximized);
            assert_eq!(c.border_width == 0, c.flags.maximized());
        }
    }
}
