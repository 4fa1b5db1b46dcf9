use embedded_graphics::{draw_target::DrawTarget, prelude::Size};

use crate::{
    clock::WallClock,
    config::FaceConfig,
    face::ClockFace,
    repaint::{RepaintLoop, RepaintTimer},
    theme::Theme,
};

/// Failure while drawing a frame or requesting the next one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetError<D, T> {
    Draw(D),
    Schedule(T),
}

/// A clock face bound to a surface and a repaint timer.
///
/// Attaching starts the repaint loop, [`ClockWidget::detach`] stops it and hands
/// the timer back. In between the host forwards size changes and draw requests.
pub struct ClockWidget<T> {
    face: ClockFace,
    repaint: RepaintLoop<T>,
}

impl<T: RepaintTimer> ClockWidget<T> {
    pub fn attach(config: FaceConfig, size: Size, timer: T) -> Self {
        let mut face = ClockFace::new(config);
        face.on_size_changed(size);

        let mut repaint = RepaintLoop::new(timer);
        repaint.start();

        Self { face, repaint }
    }

    pub fn face(&self) -> &ClockFace {
        &self.face
    }

    pub fn repaint(&self) -> &RepaintLoop<T> {
        &self.repaint
    }

    pub fn repaint_mut(&mut self) -> &mut RepaintLoop<T> {
        &mut self.repaint
    }

    pub fn resize(&mut self, size: Size) -> bool {
        self.face.on_size_changed(size)
    }

    /// Renders one frame, then asks for the next one.
    pub fn draw<D, Th, C>(
        &mut self,
        target: &mut D,
        theme: &Th,
        clock: &C,
    ) -> Result<(), WidgetError<D::Error, T::Error>>
    where
        D: DrawTarget<Color = Th::Color>,
        Th: Theme,
        C: WallClock + ?Sized,
    {
        self.face
            .render(target, theme, clock)
            .map_err(WidgetError::Draw)?;
        self.repaint.rendered().map_err(WidgetError::Schedule)
    }

    /// Stops the repaint loop and returns the timer.
    pub fn detach(mut self) -> Result<T, T::Error> {
        self.repaint.stop()?;
        Ok(self.repaint.into_timer())
    }
}

#[cfg(test)]
mod tests {
    use embedded_graphics::{mock_display::MockDisplay, pixelcolor::BinaryColor};

    use super::*;
    use crate::{
        clock::TimeOfDay,
        repaint::{tests::RecordingTimer, REPAINT_INTERVAL},
        theme::Monochrome,
    };

    fn display() -> MockDisplay<BinaryColor> {
        let mut display = MockDisplay::new();
        display.set_allow_overdraw(true);
        display.set_allow_out_of_bounds_drawing(true);
        display
    }

    #[test]
    fn n_draws_request_n_repaints() {
        let mut widget = ClockWidget::attach(
            FaceConfig::compact(),
            Size::new(64, 64),
            RecordingTimer::default(),
        );
        let mut display = display();
        assert!(widget.repaint().timer().scheduled.is_empty());

        for second in 0..7 {
            widget
                .draw(&mut display, &Monochrome, &TimeOfDay::from_hms(9, 15, second))
                .unwrap();
        }

        assert_eq!(widget.repaint().timer().scheduled, vec![REPAINT_INTERVAL; 7]);
    }

    #[test]
    fn detach_cancels_the_pending_repaint() {
        let mut widget = ClockWidget::attach(
            FaceConfig::compact(),
            Size::new(64, 64),
            RecordingTimer::default(),
        );
        let mut display = display();
        widget
            .draw(&mut display, &Monochrome, &TimeOfDay::from_hms(0, 0, 0))
            .unwrap();

        let timer = widget.detach().unwrap();
        assert_eq!(timer.scheduled.len(), 1);
        assert_eq!(timer.cancels, 1);
    }

    #[test]
    fn resize_is_forwarded_to_the_face() {
        let mut widget = ClockWidget::attach(
            FaceConfig::default(),
            Size::new(40, 40),
            RecordingTimer::default(),
        );
        assert!(!widget.resize(Size::new(40, 90)));
        assert!(widget.resize(Size::new(60, 90)));
        assert_eq!(widget.face().radius(), 30.0);
        assert_eq!(widget.face().tick_rebuilds(), 2);
    }
}
