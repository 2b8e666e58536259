use cushy::figures::Point;
use cushy::styles::Color;

use crate::{Canvas, CanvasConfig, StrokeSample};

pub const RED: Color = Color(0xFF00_00FF);
pub const GREEN: Color = Color(0x00FF_00FF);
pub const BLUE: Color = Color(0x0000_FFFF);
pub const BLACK: Color = Color(0x0000_00FF);

/// The redo lane used while shift is held.
pub const SHIFT_LANE: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Brush {
    pub radius: f32,
    pub color: Color,
}

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct Modifiers {
    /// Control, or command on macOS.
    pub primary: bool,
    pub shift: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shortcut {
    Undo { lane: u32 },
    Redo { lane: u32 },
    SelectColor(Color),
}

impl Shortcut {
    pub fn from_key(key: char, modifiers: Modifiers) -> Option<Self> {
        let lane = if modifiers.shift { SHIFT_LANE } else { 0 };
        match key.to_ascii_lowercase() {
            'z' if modifiers.primary => Some(Self::Undo { lane }),
            'y' if modifiers.primary => Some(Self::Redo { lane }),
            'r' => Some(Self::SelectColor(RED)),
            'g' => Some(Self::SelectColor(GREEN)),
            'b' => Some(Self::SelectColor(BLUE)),
            'k' => Some(Self::SelectColor(BLACK)),
            _ => None,
        }
    }
}

/// Turns pointer and keyboard input into strokes and history commands.
#[derive(Debug)]
pub struct Session<Buffer = Vec<u8>> {
    canvas: Canvas<Buffer>,
    brush: Brush,
    pressed: bool,
    changed: bool,
}

impl Session<Vec<u8>> {
    pub fn new(config: &CanvasConfig) -> Self {
        Self::from_canvas(
            Canvas::new(config),
            Brush {
                radius: config.brush_radius,
                color: config.brush_color,
            },
        )
    }
}

impl<Buffer> Session<Buffer>
where
    Buffer: AsRef<[u8]> + AsMut<[u8]>,
{
    pub fn from_canvas(canvas: Canvas<Buffer>, brush: Brush) -> Self {
        Self {
            canvas,
            brush,
            pressed: false,
            changed: true,
        }
    }

    pub fn canvas(&self) -> &Canvas<Buffer> {
        &self.canvas
    }

    pub const fn brush(&self) -> Brush {
        self.brush
    }

    pub const fn is_drawing(&self) -> bool {
        self.pressed
    }

    pub fn pointer_down(&mut self, position: Point<f32>) {
        self.pressed = true;
        self.paint(position);
    }

    pub fn pointer_moved(&mut self, position: Point<f32>) {
        if self.pressed {
            self.paint(position);
        }
    }

    pub fn pointer_up(&mut self) {
        if self.pressed {
            self.pressed = false;
            self.canvas.apply_sample(StrokeSample::end(), true);
        } else {
            log::trace!("pointer released outside of a stroke");
        }
    }

    fn paint(&mut self, position: Point<f32>) {
        self.canvas.apply_sample(
            StrokeSample::new(position, self.brush.radius, self.brush.color),
            false,
        );
        self.changed = true;
    }

    /// Handles a key press, returning true if it was a shortcut.
    pub fn key(&mut self, key: char, modifiers: Modifiers) -> bool {
        match Shortcut::from_key(key, modifiers) {
            Some(shortcut) => {
                self.shortcut(shortcut);
                true
            }
            None => false,
        }
    }

    pub fn shortcut(&mut self, shortcut: Shortcut) {
        match shortcut {
            Shortcut::Undo { lane } => self.changed |= self.canvas.undo(lane),
            Shortcut::Redo { lane } => self.changed |= self.canvas.redo(lane),
            Shortcut::SelectColor(color) => {
                log::debug!("brush color set to {:08x}", color.0);
                self.brush.color = color;
            }
        }
    }

    /// Returns true if the surface changed since the last call.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::replace(&mut self.changed, false)
    }
}
