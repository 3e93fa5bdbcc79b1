use super::Reactor;
use crate::common::config::BorderColors;
use crate::model::client::Highlight;
use crate::sys::window_system::{WindowId, WindowSystem};

/// Pixel value for a client's border. Group highlights only show on the
/// active client.
pub fn border_pixel(colors: &BorderColors, active: bool, highlight: Highlight) -> u32 {
    let color = if !active {
        colors.inactive
    } else {
        match highlight {
            Highlight::Group => colors.group,
            Highlight::Ungroup => colors.ungroup,
            Highlight::None => colors.active,
        }
    };
    color.pixel()
}

impl<S: WindowSystem> Reactor<S> {
    pub(super) fn draw_border(&mut self, window: WindowId) {
        let Some(client) = self.registry.get(window) else { return };
        let pixel = border_pixel(&self.config.colors, client.active, client.flags.highlight);
        self.system.set_border(window, client.border_width, pixel);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inactive_border_ignores_highlight() {
        let colors = BorderColors::default();
        for highlight in [Highlight::None, Highlight::Group, Highlight::Ungroup] {
            assert_eq!(border_pixel(&colors, false, highlight), colors.inactive.pixel());
        }
    }

    #[test]
    fn active_border_shows_highlight() {
        let colors = BorderColors::default();
        assert_eq!(border_pixel(&colors, true, Highlight::None), colors.active.pixel());
        assert_eq!(border_pixel(&colors, true, Highlight::Group), colors.group.pixel());
        assert_eq!(border_pixel(&colors, true, Highlight::Ungroup), colors.ungroup.pixel());
    }
}
