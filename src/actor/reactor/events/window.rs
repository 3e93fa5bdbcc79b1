use tracing::{debug, info, trace};

use crate::actor::reactor::{ConfigureRequest, Property, Reactor};
use crate::model::size_hints::SizeHints;
use crate::sys::geometry::Rect;
use crate::sys::window_system::{WindowId, WindowSystem};

pub struct WindowEventHandler;

impl WindowEventHandler {
    pub fn handle_screen_parameters_changed<S: WindowSystem>(
        reactor: &mut Reactor<S>,
        view: Rect,
        regions: Vec<Rect>,
    ) {
        let screen = reactor.screen;
        let Some(s) = reactor.registry.screen_mut(screen) else { return };
        info!(?view, regions = regions.len(), "screen geometry changed");
        s.update_geometry(view, regions);

        for window in reactor.registry.windows_on(screen) {
            if let Some((client, s)) = reactor.registry.client_and_screen_mut(window) {
                client.region = s.region_index(client.center());
            }
        }
    }

    pub fn handle_window_appeared<S: WindowSystem>(
        reactor: &mut Reactor<S>,
        window: WindowId,
        mapped: bool,
    ) {
        let Some(client) = reactor.registry.get(window) else {
            reactor.manage(window, mapped);
            return;
        };
        let (hidden, ignore) = (client.flags.hidden, client.flags.ignore);
        if hidden {
            reactor.unhide(window);
        }
        if !ignore {
            reactor.warp_pointer_to(window);
        }
    }

    pub fn handle_window_destroyed<S: WindowSystem>(reactor: &mut Reactor<S>, window: WindowId) {
        if !reactor.registry.contains(window) {
            trace!(?window, "destroyed window was not managed");
            return;
        }
        reactor.unmanage(window, false);
    }

    pub fn handle_window_unmapped<S: WindowSystem>(
        reactor: &mut Reactor<S>,
        window: WindowId,
        synthetic: bool,
    ) {
        let Some(client) = reactor.registry.get(window) else { return };
        // Our own hide unmaps too; only a client-initiated unmap withdraws.
        if synthetic || !client.flags.hidden {
            reactor.unmanage(window, true);
        }
    }

    pub fn handle_pointer_entered<S: WindowSystem>(reactor: &mut Reactor<S>, window: WindowId) {
        if !reactor.registry.contains(window) {
            trace!(?window, "pointer entered an unmanaged window");
            return;
        }
        reactor.set_active(window, true);
    }

    pub fn handle_configure_request<S: WindowSystem>(
        reactor: &mut Reactor<S>,
        window: WindowId,
        request: ConfigureRequest,
    ) {
        let Some(client) = reactor.registry.get_mut(window) else {
            // Not ours to manage; grant it as asked.
            let Some(attributes) = reactor.system.window_attributes(window) else { return };
            reactor.system.move_resize(window, request.apply_to(attributes.geometry));
            return;
        };

        let requested = request.apply_to(client.geometry);
        let (w, h) = client.hints.apply(requested.w.max(1), requested.h.max(1));
        client.geometry = Rect::new(requested.x, requested.y, w, h);
        let geometry = client.geometry;
        debug!(?window, ?geometry, "configure request");
        reactor.system.move_resize(window, geometry);
        reactor.send_configure(window);
    }

    pub fn handle_property_changed<S: WindowSystem>(
        reactor: &mut Reactor<S>,
        window: WindowId,
        property: Property,
    ) {
        if !reactor.registry.contains(window) {
            return;
        }
        match property {
            Property::Title => {
                let Some(title) = reactor.system.title(window) else { return };
                if let Some(client) = reactor.registry.get_mut(window) {
                    client.titles.record(title);
                }
            }
            Property::NormalHints => {
                let hints = SizeHints::from_raw(reactor.system.size_hints(window).as_ref());
                if let Some(client) = reactor.registry.get_mut(window) {
                    client.hints = hints;
                }
            }
            Property::WmHints => {
                let Some(wm_hints) = reactor.system.wm_hints(window) else { return };
                if let Some(client) = reactor.registry.get_mut(window) {
                    client.flags.input = wm_hints.input == Some(true);
                }
            }
        }
    }
}
