use std::convert::Infallible;

use analog_face::{
    display::LedMatrix, ClockState, ClockWidget, FaceConfig, Monochrome, RepaintTimer, WallClock,
    REPAINT_INTERVAL,
};
use embedded_graphics::prelude::*;
use fugit::MillisDurationU32;

/// Single pending slot, like a hardware alarm.
#[derive(Debug, Default)]
struct OneShot {
    pending: Option<MillisDurationU32>,
    requests: u32,
}

impl OneShot {
    fn fire(&mut self) -> bool {
        self.pending.take().is_some()
    }
}

impl RepaintTimer for OneShot {
    type Error = Infallible;

    fn schedule(&mut self, delay: MillisDurationU32) -> Result<(), Infallible> {
        assert!(self.pending.is_none(), "repaint requested twice");
        self.pending = Some(delay);
        self.requests += 1;
        Ok(())
    }

    fn cancel(&mut self) -> Result<(), Infallible> {
        self.pending = None;
        Ok(())
    }
}

fn led_face() -> FaceConfig {
    FaceConfig {
        numeral_font: None,
        ..FaceConfig::compact()
    }
}

#[test]
fn repaint_loop_keeps_a_software_clock_on_screen() {
    let mut frame = LedMatrix::new();
    let mut clock = ClockState::new(3, 0, 0);
    let mut widget = ClockWidget::attach(led_face(), frame.size(), OneShot::default());

    widget.draw(&mut frame, &Monochrome, &clock).unwrap();

    // Drive one minute worth of alarms.
    for _ in 0..60 {
        assert_eq!(widget.repaint().timer().pending, Some(REPAINT_INTERVAL));
        assert!(widget.repaint_mut().timer_mut().fire());
        clock.tick();
        widget.draw(&mut frame, &Monochrome, &clock).unwrap();
    }

    assert_eq!(widget.repaint().timer().requests, 61);
    assert_eq!(clock.now().minute(), 1);
    let [_, minute, _] = widget.face().needles(&clock.now());
    assert!((minute.angle + 84.0).abs() < 1e-4);
    assert!(frame.is_lit(Point::new(8, 8)));

    let timer = widget.detach().unwrap();
    assert_eq!(timer.pending, None);
}

#[test]
fn hub_is_lit_in_the_middle_of_the_tile() {
    let mut frame = LedMatrix::new();
    let mut widget = ClockWidget::attach(led_face(), frame.size(), OneShot::default());

    widget
        .draw(&mut frame, &Monochrome, &ClockState::new(9, 0, 30))
        .unwrap();

    assert!(frame.is_lit(Point::new(8, 8)));
    // 9 o'clock hour needle reaches left of the hub.
    assert!(frame.is_lit(Point::new(5, 8)));
}

#[test]
fn detached_widget_requests_nothing_more() {
    let mut frame = LedMatrix::new();
    let mut widget = ClockWidget::attach(led_face(), frame.size(), OneShot::default());
    widget
        .draw(&mut frame, &Monochrome, &ClockState::new(0, 0, 0))
        .unwrap();

    widget.repaint_mut().stop().unwrap();
    assert!(!widget.repaint().is_running());
    widget
        .draw(&mut frame, &Monochrome, &ClockState::new(0, 0, 1))
        .unwrap();

    assert_eq!(widget.repaint().timer().requests, 1);
    assert_eq!(widget.repaint().timer().pending, None);
}
