use std::f64::consts::FRAC_PI_2;

use unlock_indicator::indicator::geometry::{dot_angles, IconGeometry, DOT_STEP};
use unlock_indicator::indicator::{
    compose, AuthState, Backdrop, BackdropSpec, ChannelOrder, FrameOutcome, FrameScheduler,
    IndicatorPainter, IndicatorStyle, LockState, MemoryDisplay, Modifiers, MonitorRect, Palette,
    RenderContext, Rgba, RgbaBuffer, Rgb, ScreenMetrics, VisibilityState, VisualFormat,
};

fn painter() -> IndicatorPainter {
    IndicatorPainter::new(Palette::default(), IndicatorStyle::classic(), true)
}

fn typed(auth: AuthState, password_len: usize, caps_lock: bool) -> LockState {
    LockState {
        auth,
        password_len,
        modifiers: Modifiers { caps_lock },
        visibility: VisibilityState::for_password_len(password_len),
    }
}

fn pixel_at(canvas: &RgbaBuffer, point: (f64, f64)) -> Rgba {
    canvas.pixel(point.0 as u32, point.1 as u32)
}

#[test]
fn scenario_a_idle_without_input_shows_only_the_glyph() {
    let palette = Palette::default();
    let canvas = painter().paint(&LockState::default(), 1.0);
    let geometry = IconGeometry::new(1.0, &IndicatorStyle::classic());

    assert_eq!(canvas.pixel(7, 32), palette.base.opaque());
    assert_eq!(pixel_at(&canvas, geometry.keyhole_center), palette.base.opaque());

    // nothing on the dot circle
    for step in 0..100 {
        let theta = step as f64 * std::f64::consts::TAU / 100.0;
        assert_eq!(
            pixel_at(&canvas, geometry.dot_position(theta)),
            Rgba::TRANSPARENT,
            "theta {theta}"
        );
    }
}

#[test]
fn scenario_b_wrong_with_caps_lock_draws_three_warning_dots() {
    let palette = Palette::default();
    let wrong = palette.wrong.opaque();
    let canvas = painter().paint(&typed(AuthState::Wrong, 3, true), 1.0);
    let geometry = IconGeometry::new(1.0, &IndicatorStyle::classic());

    assert_eq!(canvas.pixel(7, 32), wrong);
    assert_eq!(pixel_at(&canvas, geometry.keyhole_center), wrong);

    let angles = dot_angles(3);
    assert!((angles[1] - FRAC_PI_2).abs() < 1e-12);
    for theta in &angles {
        assert_eq!(pixel_at(&canvas, geometry.dot_position(*theta)), wrong);
    }
    for theta in [angles[0] - DOT_STEP, angles[2] + DOT_STEP] {
        assert_eq!(
            pixel_at(&canvas, geometry.dot_position(theta)),
            Rgba::TRANSPARENT
        );
    }
}

#[test]
fn scenario_c_two_monitors_get_one_copy_each() {
    let palette = Palette::default();
    let canvas = painter().paint(&LockState::default(), 1.0);
    let monitors = [
        MonitorRect {
            x: 0,
            y: 0,
            width: 1920,
            height: 1080,
        },
        MonitorRect {
            x: 1920,
            y: 0,
            width: 1920,
            height: 1080,
        },
    ];
    let frame = compose(
        (3840, 1080),
        &Backdrop::Solid(palette.background),
        &canvas,
        &monitors,
    );

    assert_eq!(frame.size(), (3840, 1080));
    let r = 32;
    for origin_x in [960 - r, 2880 - r] {
        let origin_y = 540 - r;
        // leftmost ring pixel of each copy
        assert_eq!(
            frame.pixel(origin_x + 7, origin_y + 32),
            palette.base.opaque()
        );
        // canvas corner keeps the backdrop
        assert_eq!(frame.pixel(origin_x, origin_y), palette.background.opaque());
    }
    assert_eq!(frame.pixel(1920, 540), palette.background.opaque());
}

#[test]
fn scenario_d_tiled_image_repeats_across_the_frame() {
    let mut tile = RgbaBuffer::new(3, 2, Rgba::rgba(10, 20, 30, 255));
    tile.set_pixel(2, 1, Rgba::rgba(200, 100, 50, 255));
    tile.set_pixel(0, 1, Rgba::rgba(1, 2, 3, 255));

    let hidden = IndicatorPainter::new(Palette::default(), IndicatorStyle::classic(), false);
    let context = RenderContext::new(
        hidden,
        1.0,
        BackdropSpec::Image {
            image: tile.clone(),
            tile: true,
        },
    );
    let mut scheduler = FrameScheduler::new(
        MemoryDisplay::new(ScreenMetrics::at_dpi(1080, 96.0)),
        context,
        (64, 40),
    );
    let outcome = scheduler.redraw(&LockState::default(), &Vec::<MonitorRect>::new());
    assert_eq!(
        outcome,
        FrameOutcome::Presented {
            diameter: 64,
            copies: 1
        }
    );

    let frame = scheduler.display().background_rgba().unwrap();
    for y in 0..40 {
        for x in 0..64 {
            assert_eq!(frame.pixel(x, y), tile.pixel(x % 3, y % 2), "({x}, {y})");
        }
    }
}

#[test]
fn high_dpi_screen_doubles_the_indicator() {
    let context = RenderContext::new(painter(), 1.0, BackdropSpec::Solid);
    let mut scheduler = FrameScheduler::new(
        MemoryDisplay::new(ScreenMetrics::at_dpi(2160, 192.0)),
        context,
        (3840, 2160),
    );
    let outcome = scheduler.redraw(&LockState::default(), &Vec::<MonitorRect>::new());
    assert_eq!(
        outcome,
        FrameOutcome::Presented {
            diameter: 128,
            copies: 1
        }
    );
}

#[test]
fn skipped_frame_keeps_previous_background() {
    let context = RenderContext::new(painter(), 1.0, BackdropSpec::Solid);
    let mut scheduler = FrameScheduler::new(
        MemoryDisplay::new(ScreenMetrics::at_dpi(1080, 96.0)),
        context,
        (100, 100),
    );
    let layout = vec![MonitorRect::full_screen((100, 100))];
    scheduler.redraw(&typed(AuthState::Idle, 2, false), &layout);
    let installed = scheduler.display().background_rgba();

    scheduler.display_mut().set_fail_allocations(true);
    assert_eq!(
        scheduler.redraw(&typed(AuthState::Wrong, 5, true), &layout),
        FrameOutcome::Skipped
    );
    assert_eq!(scheduler.display().background_rgba(), installed);

    scheduler.display_mut().set_fail_allocations(false);
    assert!(matches!(
        scheduler.redraw(&typed(AuthState::Wrong, 5, true), &layout),
        FrameOutcome::Presented { .. }
    ));
}

#[test]
fn bgra_visual_receives_swapped_channels() {
    let palette = Palette {
        background: Rgb::from_hex("102030").unwrap(),
        ..Palette::default()
    };
    let painter = IndicatorPainter::new(palette, IndicatorStyle::classic(), true);
    let display = MemoryDisplay::new(ScreenMetrics::at_dpi(1080, 96.0)).with_visual(VisualFormat {
        order: ChannelOrder::Bgra,
        ..VisualFormat::default()
    });
    let mut scheduler = FrameScheduler::new(
        display,
        RenderContext::new(painter, 1.0, BackdropSpec::Solid),
        (80, 80),
    );
    scheduler.redraw(&LockState::default(), &Vec::<MonitorRect>::new());

    let bytes = scheduler.display().background_bytes().unwrap();
    assert_eq!(&bytes[..4], &[0x30, 0x20, 0x10, 0xff]);
    assert_eq!(
        scheduler.display().background_rgba().unwrap().pixel(0, 0),
        Rgba::rgba(0x10, 0x20, 0x30, 0xff)
    );
}

#[test]
fn desktop_wallpaper_shows_through_around_the_indicator() {
    let wallpaper = RgbaBuffer::new(50, 50, Rgba::rgba(5, 6, 7, 255));
    let display = MemoryDisplay::new(ScreenMetrics::at_dpi(1080, 96.0)).with_wallpaper(wallpaper);
    let mut scheduler = FrameScheduler::new(
        display,
        RenderContext::new(painter(), 1.0, BackdropSpec::Desktop),
        (100, 100),
    );
    scheduler.redraw(&LockState::default(), &Vec::<MonitorRect>::new());
    let frame = scheduler.display().background_rgba().unwrap();
    assert_eq!(frame.pixel(0, 0), Rgba::rgba(5, 6, 7, 255));
    // outside the wallpaper the background color remains
    assert_eq!(frame.pixel(99, 99), Palette::default().background.opaque());
}
