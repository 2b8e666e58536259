use std::num::NonZeroUsize;

use cushy::figures::units::UPx;
use cushy::figures::Size;

use crate::CanvasConfig;

#[derive(clap::Parser, Debug)]
#[command(name = "refdraw", version, about = "A free-hand drawing canvas", long_about = None)]
pub struct Arguments {
    /// Canvas dimensions, as WIDTHxHEIGHT
    #[arg(long, env = "REFDRAW_CANVAS_SIZE", value_parser = parse_size)]
    canvas_size: Option<Size<UPx>>,

    /// Brush radius in pixels
    #[arg(long, env = "REFDRAW_BRUSH_RADIUS", value_parser = parse_radius)]
    brush_radius: Option<f32>,

    /// Edits kept per undo/redo stack, or "none" to keep everything
    #[arg(long, env = "REFDRAW_HISTORY_LIMIT", value_parser = parse_history_limit)]
    history_limit: Option<HistoryLimit>,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
struct HistoryLimit(Option<NonZeroUsize>);

impl Arguments {
    pub(crate) fn update_settings(self, config: &mut CanvasConfig) {
        if let Some(size) = self.canvas_size {
            config.size = size;
        }

        if let Some(radius) = self.brush_radius {
            config.brush_radius = radius;
        }

        if let Some(HistoryLimit(limit)) = self.history_limit {
            config.history_limit = limit;
        }
    }
}

fn parse_size(s: &str) -> Result<Size<UPx>, String> {
    let (width, height) = s
        .trim()
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got {s:?}"))?;
    let dimension = |value: &str| {
        value
            .trim()
            .parse::<u32>()
            .ok()
            .filter(|value| *value > 0)
            .ok_or_else(|| format!("{value:?} is not a positive dimension"))
    };
    Ok(Size::new(
        UPx::new(dimension(width)?),
        UPx::new(dimension(height)?),
    ))
}

fn parse_radius(s: &str) -> Result<f32, String> {
    s.trim()
        .parse::<f32>()
        .ok()
        .filter(|radius| radius.is_finite() && *radius > 0.)
        .ok_or_else(|| format!("{s:?} is not a positive radius"))
}

fn parse_history_limit(s: &str) -> Result<HistoryLimit, String> {
    let s = s.trim();
    if s.is_empty() || s.eq_ignore_ascii_case("none") {
        Ok(HistoryLimit(None))
    } else {
        s.parse::<NonZeroUsize>()
            .map(|limit| HistoryLimit(Some(limit)))
            .map_err(|e| format!("{e}"))
    }
}
