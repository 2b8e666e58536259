use std::ops::RangeInclusive;

use cushy::figures::units::UPx;
use cushy::figures::{Point, Size};
use cushy::styles::Color;

/// One reported brush position during a stroke.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeSample {
    pub position: Point<f32>,
    pub radius: f32,
    pub color: Color,
}

impl StrokeSample {
    pub const fn new(position: Point<f32>, radius: f32, color: Color) -> Self {
        Self {
            position,
            radius,
            color,
        }
    }

    /// A zero-radius sample, used to end a stroke without painting anything.
    pub fn end() -> Self {
        Self::new(Point::new(0., 0.), 0., Color::new(0, 0, 0, 0))
    }

    /// Returns the horizontal pixel span covered by this sample's circle on
    /// each row, clipped to `size`.
    ///
    /// Pixel centers lie on integer coordinates, so a pixel is covered when
    /// its distance to `position` is at most `radius`. Rows whose span is
    /// empty after clipping are skipped, as is the whole stamp when the radius
    /// is not positive or the position is not finite.
    pub fn spans(&self, size: Size<UPx>) -> impl Iterator<Item = (u32, RangeInclusive<u32>)> {
        let Self {
            position, radius, ..
        } = *self;
        let max_x = size.width.get().saturating_sub(1) as f32;
        let max_y = size.height.get().saturating_sub(1) as f32;

        let rows = if radius > 0.
            && position.x.is_finite()
            && position.y.is_finite()
            && size.width.get() > 0
            && size.height.get() > 0
        {
            let top = (position.y - radius).ceil().max(0.);
            let bottom = (position.y + radius).floor().min(max_y);
            if top <= bottom {
                top as u32..=bottom as u32
            } else {
                empty_range()
            }
        } else {
            empty_range()
        };

        rows.filter_map(move |row| {
            let dy = row as f32 - position.y;
            let half = (radius * radius - dy * dy).max(0.).sqrt();
            let left = (position.x - half).ceil().max(0.);
            let right = (position.x + half).floor().min(max_x);
            (left <= right).then(|| (row, left as u32..=right as u32))
        })
    }
}

#[allow(clippy::reversed_empty_ranges)]
fn empty_range() -> RangeInclusive<u32> {
    1..=0
}

/// Tracks which pixels have been captured by the stroke in progress.
#[derive(Debug, Default)]
pub struct DirtyMap {
    width: u32,
    flags: Vec<bool>,
}

impl DirtyMap {
    /// Sizes the map to `size`, keeping the current flags when it already
    /// matches.
    pub fn ensure_size(&mut self, size: Size<UPx>) {
        let width = size.width.get();
        let len = width as usize * size.height.get() as usize;
        if self.width != width || self.flags.len() != len {
            self.width = width;
            self.flags.clear();
            self.flags.resize(len, false);
        }
    }

    /// Marks `coord`, returning true if it was not yet marked.
    pub fn mark(&mut self, coord: Point<u32>) -> bool {
        let index = self.index(coord);
        !std::mem::replace(&mut self.flags[index], true)
    }

    pub fn unmark(&mut self, coord: Point<u32>) {
        let index = self.index(coord);
        self.flags[index] = false;
    }

    #[cfg(test)]
    pub(crate) fn is_clear(&self) -> bool {
        !self.flags.contains(&true)
    }

    fn index(&self, coord: Point<u32>) -> usize {
        coord.y as usize * self.width as usize + coord.x as usize
    }
}
