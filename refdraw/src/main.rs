use std::sync::OnceLock;

use cushy::context::{EventContext, GraphicsContext};
use cushy::figures::units::Px;
use cushy::figures::{FloatConversion, IntoSigned, Point, Rect, Zero};
use cushy::kludgine::app::winit::event::MouseButton;
use cushy::kludgine::app::winit::keyboard::Key;
use cushy::kludgine::app::winit::window::CursorIcon;
use cushy::kludgine::{wgpu, Texture};
use cushy::value::Dynamic;
use cushy::widget::{EventHandling, MakeWidget, Widget, HANDLED, IGNORED};
use cushy::window::{DeviceId, KeyEvent};
use cushy::{ModifiersExt, Run};
use refdraw_core::{CanvasConfig, Modifiers, Session};

mod logging;

fn main() {
    let config = CanvasConfig::from_args();
    logging::init();

    log::info!(
        "opening {}x{} canvas",
        config.size.width.get(),
        config.size.height.get()
    );

    let state = Dynamic::new(EditState {
        session: Session::new(&config),
        texture: OnceLock::new(),
    });

    CanvasArea { state }
        .make_widget()
        .into_window()
        .run()
        .expect("error running refdraw window");
}

#[derive(Debug)]
struct EditState {
    session: Session,
    texture: OnceLock<Texture>,
}

#[derive(Debug)]
struct CanvasArea {
    state: Dynamic<EditState>,
}

fn canvas_coordinate(location: Point<Px>) -> Point<f32> {
    location.map(|c| c.into_float())
}

impl Widget for CanvasArea {
    fn redraw(&mut self, context: &mut GraphicsContext<'_, '_, '_, '_>) {
        let mut state = self.state.lock();
        let state = &mut *state;
        let size = state.session.canvas().size();

        let mut created = false;
        let texture = state.texture.get_or_init(|| {
            created = true;
            Texture::new_with_data(
                context.gfx.inner_graphics(),
                size,
                wgpu::TextureFormat::Rgba8UnormSrgb,
                wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
                wgpu::FilterMode::Nearest,
                state.session.canvas().surface().as_bytes(),
            )
        });

        // Uploads happen between frames, while the canvas is locked.
        if state.session.take_dirty() && !created {
            context.gfx.inner_graphics().queue().write_texture(
                wgpu::ImageCopyTexture {
                    texture: texture.wgpu(),
                    mip_level: 0,
                    origin: wgpu::Origin3d::default(),
                    aspect: wgpu::TextureAspect::default(),
                },
                state.session.canvas().surface().as_bytes(),
                wgpu::ImageDataLayout {
                    offset: 0,
                    bytes_per_row: Some(size.width.get() * 4),
                    rows_per_image: None,
                },
                size.into(),
            );
        }

        context
            .gfx
            .draw_texture(texture, Rect::new(Point::<Px>::ZERO, size.into_signed()));
    }

    fn accept_focus(&mut self, _context: &mut EventContext<'_>) -> bool {
        true
    }

    fn mouse_down(
        &mut self,
        location: Point<Px>,
        _device_id: DeviceId,
        button: MouseButton,
        context: &mut EventContext<'_>,
    ) -> EventHandling {
        if button != MouseButton::Left {
            return IGNORED;
        }

        context.focus();
        self.state
            .lock()
            .session
            .pointer_down(canvas_coordinate(location));
        context.set_needs_redraw();
        HANDLED
    }

    fn mouse_drag(
        &mut self,
        location: Point<Px>,
        _device_id: DeviceId,
        _button: MouseButton,
        context: &mut EventContext<'_>,
    ) {
        let mut state = self.state.lock();
        if state.session.is_drawing() {
            state.session.pointer_moved(canvas_coordinate(location));
            context.set_needs_redraw();
        }
    }

    fn mouse_up(
        &mut self,
        _location: Option<Point<Px>>,
        _device_id: DeviceId,
        _button: MouseButton,
        _context: &mut EventContext<'_>,
    ) {
        self.state.lock().session.pointer_up();
    }

    fn keyboard_input(
        &mut self,
        _device_id: DeviceId,
        input: KeyEvent,
        _is_synthetic: bool,
        context: &mut EventContext<'_>,
    ) -> EventHandling {
        if !input.state.is_pressed() {
            return IGNORED;
        }
        let Key::Character(text) = &input.logical_key else {
            return IGNORED;
        };
        let Some(key) = text.chars().next() else {
            return IGNORED;
        };

        let modifiers = context.modifiers().state();
        let modifiers = Modifiers {
            primary: modifiers.primary(),
            shift: modifiers.shift_key(),
        };
        if self.state.lock().session.key(key, modifiers) {
            context.set_needs_redraw();
            HANDLED
        } else {
            IGNORED
        }
    }

    fn hit_test(&mut self, _location: Point<Px>, _context: &mut EventContext<'_>) -> bool {
        true
    }

    fn hover(
        &mut self,
        location: Point<Px>,
        _context: &mut EventContext<'_>,
    ) -> Option<CursorIcon> {
        let size = self.state.lock().session.canvas().size().into_signed();
        (location.x >= 0 && location.y >= 0 && location.x < size.width && location.y < size.height)
            .then_some(CursorIcon::Crosshair)
    }
}
