use std::error::Error;
use std::fmt::{self, Display};

use cushy::figures::units::UPx;
use cushy::figures::{Point, Size};
use cushy::styles::Color;
use rayon::iter::ParallelIterator;
use rayon::slice::ParallelSliceMut;

/// A fixed-size grid of RGBA8 pixels stored channel-interleaved.
///
/// The backing bytes can be owned (`Vec<u8>`) or borrowed from whoever
/// presents the image (`&mut [u8]`). Coordinates are never clamped: accessing
/// a pixel outside of the surface is a bug in the caller and panics.
#[derive(Debug, Clone)]
pub struct PixelSurface<Buffer = Vec<u8>> {
    size: Size<UPx>,
    data: Buffer,
}

impl PixelSurface<Vec<u8>> {
    pub fn new(size: Size<UPx>, background: Color) -> Self {
        let mut surface = Self {
            size,
            data: vec![0; byte_len(size)],
        };
        surface.fill(background);
        surface
    }
}

impl<Buffer> PixelSurface<Buffer>
where
    Buffer: AsRef<[u8]> + AsMut<[u8]>,
{
    pub fn from_buffer(size: Size<UPx>, data: Buffer) -> Result<Self, BufferSizeMismatch> {
        let expected = byte_len(size);
        let actual = data.as_ref().len();
        if expected == actual {
            Ok(Self { size, data })
        } else {
            Err(BufferSizeMismatch { expected, actual })
        }
    }

    pub fn size(&self) -> Size<UPx> {
        self.size
    }

    pub fn width(&self) -> u32 {
        self.size.width.get()
    }

    pub fn height(&self) -> u32 {
        self.size.height.get()
    }

    pub fn contains(&self, coord: Point<u32>) -> bool {
        coord.x < self.width() && coord.y < self.height()
    }

    fn offset(&self, coord: Point<u32>) -> usize {
        assert!(
            self.contains(coord),
            "pixel {coord:?} is outside of a {}x{} surface",
            self.width(),
            self.height()
        );
        (coord.y as usize * self.width() as usize + coord.x as usize) * 4
    }

    pub fn get(&self, coord: Point<u32>) -> Color {
        let offset = self.offset(coord);
        let rgba = &self.data.as_ref()[offset..offset + 4];
        Color::new(rgba[0], rgba[1], rgba[2], rgba[3])
    }

    pub fn set(&mut self, coord: Point<u32>, color: Color) {
        let offset = self.offset(coord);
        self.data.as_mut()[offset..offset + 4].copy_from_slice(&rgba_bytes(color));
    }

    /// Overwrites every pixel with `color`.
    pub fn fill(&mut self, color: Color) {
        let rgba = rgba_bytes(color);
        self.data
            .as_mut()
            .par_chunks_exact_mut(4)
            .for_each(|pixel| pixel.copy_from_slice(&rgba));
    }

    /// The interleaved RGBA bytes, row-major, `width * 4` bytes per row.
    pub fn as_bytes(&self) -> &[u8] {
        self.data.as_ref()
    }
}

fn byte_len(size: Size<UPx>) -> usize {
    size.width.get() as usize * size.height.get() as usize * 4
}

fn rgba_bytes(color: Color) -> [u8; 4] {
    [color.red(), color.green(), color.blue(), color.alpha()]
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct BufferSizeMismatch {
    pub expected: usize,
    pub actual: usize,
}

impl Display for BufferSizeMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "surface needs {} bytes of rgba data, but the buffer holds {}",
            self.expected, self.actual
        )
    }
}

impl Error for BufferSizeMismatch {}
