use cushy::figures::units::UPx;
use cushy::figures::{Point, Size};
use cushy::styles::Color;

mod cli;
mod config;
mod history;
mod session;
mod stroke;
mod surface;

pub use config::{
    CanvasConfig, DEFAULT_BACKGROUND, DEFAULT_BRUSH_COLOR, DEFAULT_BRUSH_RADIUS, DEFAULT_HEIGHT,
    DEFAULT_WIDTH,
};
pub use history::{Edit, History, PixelRecord};
pub use session::{Brush, Modifiers, Session, Shortcut, SHIFT_LANE};
pub use stroke::{DirtyMap, StrokeSample};
pub use surface::{BufferSizeMismatch, PixelSurface};

/// A pixel surface that strokes are painted onto, along with the history
/// needed to undo and redo them.
///
/// Every sample of a stroke is stamped immediately. The first time a stroke
/// touches a pixel its previous color is captured, so undoing the stroke
/// restores the image as it was before the stroke began, no matter how many
/// of the stroke's stamps overlapped.
#[derive(Debug)]
pub struct Canvas<Buffer = Vec<u8>> {
    surface: PixelSurface<Buffer>,
    dirty: DirtyMap,
    stage: Edit,
    last_sample: Option<StrokeSample>,
    history: History,
}

impl Canvas<Vec<u8>> {
    pub fn new(config: &CanvasConfig) -> Self {
        let mut canvas = Self::from_surface(PixelSurface::new(config.size, config.background));
        canvas.history = History::new(config.history_limit);
        canvas
    }
}

impl<Buffer> Canvas<Buffer>
where
    Buffer: AsRef<[u8]> + AsMut<[u8]>,
{
    pub fn from_surface(surface: PixelSurface<Buffer>) -> Self {
        Self {
            surface,
            dirty: DirtyMap::default(),
            stage: Edit::default(),
            last_sample: None,
            history: History::default(),
        }
    }

    pub fn surface(&self) -> &PixelSurface<Buffer> {
        &self.surface
    }

    pub fn size(&self) -> Size<UPx> {
        self.surface.size()
    }

    pub fn pixel(&self, coord: Point<u32>) -> Color {
        self.surface.get(coord)
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// The pixels captured so far by the stroke in progress.
    pub fn stage(&self) -> &Edit {
        &self.stage
    }

    pub fn last_sample(&self) -> Option<&StrokeSample> {
        self.last_sample.as_ref()
    }

    pub const fn in_stroke(&self) -> bool {
        self.last_sample.is_some()
    }

    /// Stamps `sample` onto the surface as part of the current stroke.
    ///
    /// When `is_final` is true, the stroke is sealed into a single undoable
    /// edit after stamping.
    pub fn apply_sample(&mut self, sample: StrokeSample, is_final: bool) {
        self.dirty.ensure_size(self.surface.size());

        for (y, columns) in sample.spans(self.surface.size()) {
            for x in columns {
                let coord = Point::new(x, y);
                if self.dirty.mark(coord) {
                    self.stage.record(coord, self.surface.get(coord));
                }
                self.surface.set(coord, sample.color);
            }
        }

        if is_final {
            self.seal_stroke();
        } else {
            self.last_sample = Some(sample);
        }
    }

    fn seal_stroke(&mut self) {
        let stage = std::mem::take(&mut self.stage);
        for pixel in stage.pixels() {
            self.dirty.unmark(pixel.position);
        }
        self.last_sample = None;

        if stage.is_empty() {
            log::trace!("stroke ended without touching any pixels");
        } else {
            log::debug!("sealed stroke covering {} pixels", stage.len());
            self.history.push_undo(stage);
        }
    }

    // History is never applied underneath pixels the stage has captured.
    fn seal_pending_stroke(&mut self) {
        if self.in_stroke() {
            log::debug!("sealing the stroke in progress before changing history");
            self.seal_stroke();
        }
    }

    /// Reverts the most recent edit and makes it redoable from `lane`.
    ///
    /// A stroke still in progress is sealed first, so it is the edit that
    /// gets reverted. Returns false when there is nothing to undo.
    pub fn undo(&mut self, lane: u32) -> bool {
        self.seal_pending_stroke();
        match self.history.undo(&mut self.surface, lane) {
            Some(restored) => {
                log::debug!("undo restored {restored} pixels into redo lane {lane}");
                true
            }
            None => {
                log::trace!("nothing to undo");
                false
            }
        }
    }

    /// Replays the most recent edit undone into `lane`.
    ///
    /// A stroke still in progress is sealed first. Returns false when `lane`
    /// has nothing to redo.
    pub fn redo(&mut self, lane: u32) -> bool {
        self.seal_pending_stroke();
        match self.history.redo(&mut self.surface, lane) {
            Some(replayed) => {
                log::debug!("redo replayed {replayed} pixels from lane {lane}");
                true
            }
            None => {
                log::trace!("nothing to redo in lane {lane}");
                false
            }
        }
    }
}
