use std::num::NonZeroUsize;

use clap::Parser;
use cushy::figures::units::UPx;
use cushy::figures::Size;
use cushy::styles::Color;

use crate::cli::Arguments;

pub const DEFAULT_WIDTH: u32 = 2048;
pub const DEFAULT_HEIGHT: u32 = 2048;
pub const DEFAULT_BRUSH_RADIUS: f32 = 10.;
pub const DEFAULT_BACKGROUND: Color = Color(0xFFFF_FFFF);
pub const DEFAULT_BRUSH_COLOR: Color = Color(0x0000_00FF);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasConfig {
    pub size: Size<UPx>,
    pub background: Color,
    pub brush_radius: f32,
    pub brush_color: Color,
    /// Maximum number of edits kept per stack. `None` keeps everything.
    pub history_limit: Option<NonZeroUsize>,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            size: Size::new(UPx::new(DEFAULT_WIDTH), UPx::new(DEFAULT_HEIGHT)),
            background: DEFAULT_BACKGROUND,
            brush_radius: DEFAULT_BRUSH_RADIUS,
            brush_color: DEFAULT_BRUSH_COLOR,
            history_limit: None,
        }
    }
}

impl CanvasConfig {
    /// Returns the defaults overridden by the command line and any
    /// `REFDRAW_*` environment variables. Invalid values print clap's usage
    /// error and exit.
    #[must_use]
    pub fn from_args() -> Self {
        let mut config = Self::default();
        Arguments::parse().update_settings(&mut config);
        config
    }
}
