use cushy::figures::units::UPx;
use cushy::figures::{Point, Size};
use cushy::styles::Color;
use refdraw_core::{Canvas, CanvasConfig, StrokeSample};

const WHITE: Color = Color(0xFFFF_FFFF);
const BLACK: Color = Color(0x0000_00FF);
const RED: Color = Color(0xFF00_00FF);
const BLUE: Color = Color(0x0000_FFFF);
const GREEN: Color = Color(0x00FF_00FF);

fn white_canvas(width: u32, height: u32) -> Canvas {
    Canvas::new(&CanvasConfig {
        size: Size::new(UPx::new(width), UPx::new(height)),
        background: WHITE,
        ..CanvasConfig::default()
    })
}

fn sample(x: f32, y: f32, radius: f32, color: Color) -> StrokeSample {
    StrokeSample::new(Point::new(x, y), radius, color)
}

fn snapshot(canvas: &Canvas) -> Vec<u8> {
    canvas.surface().as_bytes().to_vec()
}

fn within(x: u32, y: u32, center: (f32, f32), radius: f32) -> bool {
    let dx = x as f32 - center.0;
    let dy = y as f32 - center.1;
    dx * dx + dy * dy <= radius * radius
}

#[test]
fn single_stamp_fills_disk() {
    let mut canvas = white_canvas(8, 8);
    canvas.apply_sample(sample(4., 4., 2., BLACK), true);

    for y in 0..8 {
        for x in 0..8 {
            let expected = if within(x, y, (4., 4.), 2.) {
                BLACK
            } else {
                WHITE
            };
            assert_eq!(canvas.pixel(Point::new(x, y)), expected, "pixel {x},{y}");
        }
    }
    for corner in [(0, 0), (7, 0), (0, 7), (7, 7)] {
        assert_eq!(canvas.pixel(Point::new(corner.0, corner.1)), WHITE);
    }
}

#[test]
fn large_stamp_coverage() {
    let mut canvas = white_canvas(64, 48);
    let center = (30.3, 21.7);
    let radius = 9.6;
    canvas.apply_sample(sample(center.0, center.1, radius, GREEN), true);

    for y in 0..48 {
        for x in 0..64 {
            let painted = canvas.pixel(Point::new(x, y)) == GREEN;
            assert_eq!(painted, within(x, y, center, radius), "pixel {x},{y}");
        }
    }
}

#[test]
fn overlapping_samples_merge_into_one_edit() {
    let mut canvas = white_canvas(8, 8);
    canvas.apply_sample(sample(4., 4., 2., RED), false);
    canvas.apply_sample(sample(4., 5., 2., BLUE), true);

    assert_eq!(canvas.pixel(Point::new(4, 4)), BLUE);
    assert_eq!(canvas.pixel(Point::new(4, 2)), RED);
    assert_eq!(canvas.pixel(Point::new(4, 7)), BLUE);
    assert_eq!(canvas.history().undo_len(), 1);

    let edit = canvas.history().latest_undo().expect("stroke recorded");
    assert!(edit.pixels().iter().all(|pixel| pixel.color == WHITE));
    let mut positions = edit
        .pixels()
        .iter()
        .map(|pixel| (pixel.position.x, pixel.position.y))
        .collect::<Vec<_>>();
    let captured = positions.len();
    positions.sort_unstable();
    positions.dedup();
    assert_eq!(positions.len(), captured);

    assert!(canvas.undo(0));
    assert!(canvas
        .surface()
        .as_bytes()
        .chunks_exact(4)
        .all(|pixel| pixel == [255, 255, 255, 255]));
}

#[test]
fn undo_twice_redo_once() {
    let mut canvas = white_canvas(16, 16);
    canvas.apply_sample(sample(4., 4., 3., RED), true);
    let after_first = snapshot(&canvas);
    canvas.apply_sample(sample(6., 6., 3., BLUE), false);
    canvas.apply_sample(sample(10., 6., 3., BLUE), true);

    assert!(canvas.undo(0));
    assert!(canvas.undo(0));
    assert!(canvas
        .surface()
        .as_bytes()
        .chunks_exact(4)
        .all(|pixel| pixel == [255, 255, 255, 255]));

    assert!(canvas.redo(0));
    assert_eq!(snapshot(&canvas), after_first);
    assert_eq!(canvas.history().undo_len(), 1);
    assert_eq!(canvas.history().redo_len(0), 1);
}

#[test]
fn undo_on_fresh_canvas_is_noop() {
    let mut canvas = white_canvas(8, 8);
    let before = snapshot(&canvas);
    assert!(!canvas.undo(5));
    assert_eq!(snapshot(&canvas), before);
    assert!(!canvas.history().has_lane(5));
    assert_eq!(canvas.history().redo_len(5), 0);

    assert!(!canvas.redo(5));
    assert_eq!(snapshot(&canvas), before);
}

#[test]
fn redo_inverts_undo() {
    let mut canvas = white_canvas(20, 20);
    let strokes = [
        [sample(3., 3., 2.5, RED), sample(5., 4., 2.5, RED)],
        [sample(10., 10., 4., BLUE), sample(12., 9., 1., GREEN)],
        [sample(18., 1., 6., BLACK), sample(-2., 19., 5., RED)],
    ];
    for [first, last] in strokes {
        canvas.apply_sample(first, false);
        canvas.apply_sample(last, true);
    }

    for lane in [0, 3] {
        let before = snapshot(&canvas);
        assert!(canvas.undo(lane));
        assert_ne!(snapshot(&canvas), before);
        assert!(canvas.redo(lane));
        assert_eq!(snapshot(&canvas), before);
    }
}

#[test]
fn lanes_do_not_interfere() {
    let mut canvas = white_canvas(12, 12);
    canvas.apply_sample(sample(3., 3., 2., RED), true);
    let after_red = snapshot(&canvas);
    canvas.apply_sample(sample(8., 8., 2., BLUE), true);
    let after_blue = snapshot(&canvas);

    assert!(canvas.undo(1));
    assert!(canvas.undo(0));
    assert_eq!(canvas.history().redo_len(0), 1);
    assert_eq!(canvas.history().redo_len(1), 1);

    assert!(canvas.redo(0));
    assert_eq!(snapshot(&canvas), after_red);
    assert_eq!(canvas.history().redo_len(1), 1);
    assert!(!canvas.redo(0));

    assert!(canvas.redo(1));
    assert_eq!(snapshot(&canvas), after_blue);
}

#[test]
fn samples_outside_the_surface_are_clipped() {
    let mut canvas = white_canvas(8, 8);
    canvas.apply_sample(sample(-1., -1., 2., RED), false);
    canvas.apply_sample(sample(100., 100., 5., RED), false);
    canvas.apply_sample(sample(8., 3., 1.5, RED), true);

    assert_eq!(canvas.pixel(Point::new(0, 0)), RED);
    assert_eq!(canvas.pixel(Point::new(7, 3)), RED);
    assert_eq!(canvas.pixel(Point::new(7, 7)), WHITE);

    assert!(canvas.undo(0));
    assert_eq!(canvas.pixel(Point::new(0, 0)), WHITE);
    assert_eq!(canvas.pixel(Point::new(7, 3)), WHITE);
}
