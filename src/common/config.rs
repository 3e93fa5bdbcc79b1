use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, serde_as};

use crate::sys::geometry::Gap;

pub fn config_dir() -> PathBuf {
    dirs::config_dir().unwrap_or_else(|| PathBuf::from(".")).join("stackwm")
}
pub fn config_file() -> PathBuf { config_dir().join("config.toml") }

/// An RGB border colour written as `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color(pub u32);

impl Color {
    /// The value the X server expects as a TrueColor pixel.
    pub fn pixel(self) -> u32 { self.0 }
}

impl FromStr for Color {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s
            .strip_prefix('#')
            .ok_or_else(|| format!("colour {s:?} must start with '#'"))?;
        if hex.len() != 6 {
            return Err(format!("colour {s:?} must have six hex digits"));
        }
        u32::from_str_radix(hex, 16).map(Color).map_err(|e| format!("colour {s:?}: {e}"))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "#{:06x}", self.0) }
}

#[serde_as]
#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// Border width in pixels for decorated clients.
    #[serde(default = "default_border_width")]
    pub border_width: i32,
    /// Step in pixels for keyboard moves and resizes.
    #[serde(default = "default_move_amount")]
    pub move_amount: i32,
    /// Distance at which moved windows stick to the work area edges. 0 disables.
    #[serde(default)]
    pub snap_distance: i32,
    /// Reserved space as "top,bottom,left,right".
    #[serde_as(as = "DisplayFromStr")]
    #[serde(default)]
    pub gap: Gap,
}

#[serde_as]
#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
#[serde(deny_unknown_fields)]
pub struct BorderColors {
    #[serde_as(as = "DisplayFromStr")]
    #[serde(default = "default_active_color")]
    pub active: Color,
    #[serde_as(as = "DisplayFromStr")]
    #[serde(default = "default_inactive_color")]
    pub inactive: Color,
    #[serde_as(as = "DisplayFromStr")]
    #[serde(default = "default_group_color")]
    pub group: Color,
    #[serde_as(as = "DisplayFromStr")]
    #[serde(default = "default_ungroup_color")]
    pub ungroup: Color,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone, Default)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub settings: Settings,
    #[serde(default)]
    pub colors: BorderColors,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            border_width: default_border_width(),
            move_amount: default_move_amount(),
            snap_distance: 0,
            gap: Gap::default(),
        }
    }
}

impl Default for BorderColors {
    fn default() -> Self {
        Self {
            active: default_active_color(),
            inactive: default_inactive_color(),
            group: default_group_color(),
            ungroup: default_ungroup_color(),
        }
    }
}

fn default_border_width() -> i32 { 4 }

fn default_move_amount() -> i32 { 1 }

fn default_active_color() -> Color { Color(0xcccccc) }

fn default_inactive_color() -> Color { Color(0x666666) }

fn default_group_color() -> Color { Color(0x0000ff) }

fn default_ungroup_color() -> Color { Color(0xff0000) }

impl Settings {
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();

        if self.border_width < 0 {
            issues.push(format!("border_width must be non-negative, got {}", self.border_width));
        }

        if self.move_amount < 1 {
            issues.push(format!("move_amount must be at least 1, got {}", self.move_amount));
        }

        if self.snap_distance < 0 {
            issues.push(format!(
                "snap_distance must be non-negative, got {}",
                self.snap_distance
            ));
        }

        let gap = self.gap;
        if gap.top < 0 || gap.bottom < 0 || gap.left < 0 || gap.right < 0 {
            issues.push(format!("gap values must be non-negative, got {gap}"));
        }

        issues
    }

    pub fn auto_fix_values(&mut self) -> usize {
        let mut fixes = 0;

        if self.border_width < 0 {
            self.border_width = 0;
            fixes += 1;
        }

        if self.move_amount < 1 {
            self.move_amount = 1;
            fixes += 1;
        }

        if self.snap_distance < 0 {
            self.snap_distance = 0;
            fixes += 1;
        }

        for side in [
            &mut self.gap.top,
            &mut self.gap.bottom,
            &mut self.gap.left,
            &mut self.gap.right,
        ] {
            if *side < 0 {
                *side = 0;
                fixes += 1;
            }
        }

        fixes
    }
}

impl Config {
    pub fn read(path: &Path) -> anyhow::Result<Config> {
        let buf = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        Self::parse(&buf)
    }

    /// Reads `path` when it exists, otherwise returns the defaults.
    pub fn load_or_default(path: &Path) -> anyhow::Result<Config> {
        if path.exists() { Self::read(path) } else { Ok(Config::default()) }
    }

    pub fn parse(buf: &str) -> anyhow::Result<Config> {
        let config: Config = toml::from_str(buf)?;
        Ok(config)
    }

    /// Validates the entire configuration and returns a list of issues found.
    pub fn validate(&self) -> Vec<String> { self.settings.validate() }

    /// Clamps out-of-range values. Returns the number of fixes applied.
    pub fn auto_fix_values(&mut self) -> usize { self.settings.auto_fix_values() }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let config = Config::parse("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.settings.border_width, 4);
        assert_eq!(config.settings.move_amount, 1);
        assert!(config.validate().is_empty());
    }

    #[test]
    fn full_config_parses() {
        let config = Config::parse(
            r##"
            [settings]
            border_width = 2
            move_amount = 10
            snap_distance = 8
            gap = "24,0,0,0"

            [colors]
            active = "#ffaa00"
            inactive = "#101010"
            "##,
        )
        .unwrap();
        assert_eq!(config.settings.border_width, 2);
        assert_eq!(config.settings.snap_distance, 8);
        assert_eq!(config.settings.gap, Gap { top: 24, bottom: 0, left: 0, right: 0 });
        assert_eq!(config.colors.active.pixel(), 0xffaa00);
        assert_eq!(config.colors.group, Color(0x0000ff));
    }

    #[test]
    fn malformed_values_are_rejected() {
        assert!(Config::parse("[settings]\ngap = \"1,2\"").is_err());
        assert!(Config::parse("[colors]\nactive = \"red\"").is_err());
        assert!(Config::parse("[settings]\nunknown = 1").is_err());
    }

    #[test]
    fn auto_fix_clamps_out_of_range_values() {
        let mut config = Config::parse(
            "[settings]\nborder_width = -1\nmove_amount = 0\nsnap_distance = -3\ngap = \"-1,0,0,-2\"",
        )
        .unwrap();
        assert_eq!(config.validate().len(), 4);
        assert_eq!(config.auto_fix_values(), 5);
        assert!(config.validate().is_empty());
        assert_eq!(config.settings.move_amount, 1);
    }

    #[test]
    fn color_round_trips_through_text() {
        let color: Color = "#0a0B0c".parse().unwrap();
        assert_eq!(color, Color(0x0a0b0c));
        assert_eq!(color.to_string(), "#0a0b0c");
        assert!("#12345".parse::<Color>().is_err());
    }
}
