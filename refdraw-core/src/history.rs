use std::collections::VecDeque;
use std::num::NonZeroUsize;

use cushy::figures::Point;
use cushy::styles::Color;
use kempt::Map;

use crate::PixelSurface;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelRecord {
    pub position: Point<u32>,
    pub color: Color,
}

/// A set of pixels along with the colors that restore them.
///
/// Each position appears at most once. Applying an edit writes its colors to
/// a surface and produces the edit that undoes that write.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Edit {
    pixels: Vec<PixelRecord>,
}

impl Edit {
    pub fn record(&mut self, position: Point<u32>, color: Color) {
        self.pixels.push(PixelRecord { position, color });
    }

    pub fn pixels(&self) -> &[PixelRecord] {
        &self.pixels
    }

    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    pub fn apply<Buffer>(&self, surface: &mut PixelSurface<Buffer>) -> Edit
    where
        Buffer: AsRef<[u8]> + AsMut<[u8]>,
    {
        let mut inverse = Edit {
            pixels: Vec::with_capacity(self.pixels.len()),
        };
        for pixel in &self.pixels {
            inverse.record(pixel.position, surface.get(pixel.position));
            surface.set(pixel.position, pixel.color);
        }
        inverse
    }
}

/// One undo stack shared by every lane, plus an independent redo stack per
/// lane.
#[derive(Debug)]
pub struct History {
    undo: VecDeque<Edit>,
    redo: Map<u32, VecDeque<Edit>>,
    limit: Option<NonZeroUsize>,
}

impl History {
    pub fn new(limit: Option<NonZeroUsize>) -> Self {
        Self {
            undo: VecDeque::new(),
            redo: Map::new(),
            limit,
        }
    }

    pub fn push_undo(&mut self, edit: Edit) {
        push_bounded(&mut self.undo, edit, self.limit);
    }

    pub fn push_redo(&mut self, lane: u32, edit: Edit) {
        if let Some(stack) = self.redo.get_mut(&lane) {
            push_bounded(stack, edit, self.limit);
        } else {
            self.redo.insert(lane, VecDeque::from([edit]));
        }
    }

    pub fn undo_len(&self) -> usize {
        self.undo.len()
    }

    pub fn redo_len(&self, lane: u32) -> usize {
        self.redo.get(&lane).map_or(0, VecDeque::len)
    }

    pub fn has_lane(&self, lane: u32) -> bool {
        self.redo.get(&lane).is_some()
    }

    pub fn latest_undo(&self) -> Option<&Edit> {
        self.undo.back()
    }

    /// Reverts the newest edit, remembering how to replay it in `lane`.
    ///
    /// Returns the number of pixels restored, or `None` when there was
    /// nothing to undo.
    pub fn undo<Buffer>(&mut self, surface: &mut PixelSurface<Buffer>, lane: u32) -> Option<usize>
    where
        Buffer: AsRef<[u8]> + AsMut<[u8]>,
    {
        let edit = self.undo.pop_back()?;
        let redo = edit.apply(surface);
        let restored = redo.len();
        self.push_redo(lane, redo);
        Some(restored)
    }

    /// Replays the newest edit undone in `lane`, making it undoable again.
    pub fn redo<Buffer>(&mut self, surface: &mut PixelSurface<Buffer>, lane: u32) -> Option<usize>
    where
        Buffer: AsRef<[u8]> + AsMut<[u8]>,
    {
        let edit = self.redo.get_mut(&lane)?.pop_back()?;
        let undo = edit.apply(surface);
        let replayed = undo.len();
        self.push_undo(undo);
        Some(replayed)
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new(None)
    }
}

fn push_bounded(stack: &mut VecDeque<Edit>, edit: Edit, limit: Option<NonZeroUsize>) {
    stack.push_back(edit);
    if let Some(limit) = limit {
        while stack.len() > limit.get() {
            if let Some(evicted) = stack.pop_front() {
                log::trace!("history full, dropping edit of {} pixels", evicted.len());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use cushy::figures::units::UPx;
    use cushy::figures::Size;

    use super::*;

    const WHITE: Color = Color(0xFFFF_FFFF);
    const RED: Color = Color(0xFF00_00FF);

    fn surface() -> PixelSurface {
        PixelSurface::new(Size::new(UPx::new(4), UPx::new(4)), WHITE)
    }

    fn paint(surface: &mut PixelSurface, at: Point<u32>, color: Color) -> Edit {
        let mut edit = Edit::default();
        edit.record(at, surface.get(at));
        surface.set(at, color);
        edit
    }

    #[test]
    fn apply_returns_inverse() {
        let mut surface = surface();
        let edit = paint(&mut surface, Point::new(1, 1), RED);

        let inverse = edit.apply(&mut surface);
        assert_eq!(surface.get(Point::new(1, 1)), WHITE);
        assert_eq!(
            inverse.pixels(),
            &[PixelRecord {
                position: Point::new(1, 1),
                color: RED
            }]
        );

        inverse.apply(&mut surface);
        assert_eq!(surface.get(Point::new(1, 1)), RED);
    }

    #[test]
    fn redo_lanes_are_independent() {
        let mut surface = surface();
        let mut history = History::default();
        history.push_undo(paint(&mut surface, Point::new(0, 0), RED));
        history.push_undo(paint(&mut surface, Point::new(1, 0), RED));

        assert_eq!(history.undo(&mut surface, 1), Some(1));
        assert_eq!(history.undo(&mut surface, 2), Some(1));
        assert_eq!(history.redo_len(1), 1);
        assert_eq!(history.redo_len(2), 1);

        assert_eq!(history.redo(&mut surface, 2), Some(1));
        assert_eq!(history.redo_len(1), 1);
        assert_eq!(history.redo_len(2), 0);
        assert_eq!(surface.get(Point::new(0, 0)), RED);
        assert_eq!(surface.get(Point::new(1, 0)), WHITE);
    }

    #[test]
    fn empty_stacks_do_nothing() {
        let mut surface = surface();
        let mut history = History::default();
        assert_eq!(history.undo(&mut surface, 3), None);
        assert_eq!(history.redo(&mut surface, 3), None);
        assert!(!history.has_lane(3));
        assert_eq!(history.undo_len(), 0);
    }

    #[test]
    fn limit_drops_oldest() {
        let mut surface = surface();
        let mut history = History::new(NonZeroUsize::new(2));
        for x in 0..3 {
            history.push_undo(paint(&mut surface, Point::new(x, 0), RED));
        }
        assert_eq!(history.undo_len(), 2);

        history.undo(&mut surface, 0);
        history.undo(&mut surface, 0);
        assert_eq!(history.undo(&mut surface, 0), None);
        assert_eq!(surface.get(Point::new(0, 0)), RED);
        assert_eq!(surface.get(Point::new(1, 0)), WHITE);
        assert_eq!(surface.get(Point::new(2, 0)), WHITE);
    }
}
