use fugit::MillisDurationU32;

/// Delay between a render and the repaint it requests.
pub const REPAINT_INTERVAL: MillisDurationU32 = MillisDurationU32::millis(1000);

/// One-shot timer able to request a future repaint.
pub trait RepaintTimer {
    type Error;

    /// Arms the timer; a later call replaces a still pending request.
    fn schedule(&mut self, delay: MillisDurationU32) -> Result<(), Self::Error>;

    /// Drops the pending request, if any.
    fn cancel(&mut self) -> Result<(), Self::Error>;
}

/// Keeps a face refreshing at 1 Hz for as long as it is running.
///
/// Every render reports back through [`RepaintLoop::rendered`], which asks the
/// timer for exactly one follow-up repaint. Stopping cancels the pending request
/// and silences later reports.
#[derive(Debug)]
pub struct RepaintLoop<T> {
    timer: T,
    running: bool,
}

impl<T: RepaintTimer> RepaintLoop<T> {
    /// A stopped loop around `timer`.
    pub fn new(timer: T) -> Self {
        Self {
            timer,
            running: false,
        }
    }

    /// Lets the next render schedule a follow-up. Does not schedule by itself.
    pub fn start(&mut self) {
        if !self.running {
            log::debug!("repaint loop started");
        }
        self.running = true;
    }

    pub fn stop(&mut self) -> Result<(), T::Error> {
        if !self.running {
            return Ok(());
        }
        self.running = false;
        log::debug!("repaint loop stopped");
        self.timer.cancel()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Called once after every render.
    pub fn rendered(&mut self) -> Result<(), T::Error> {
        if self.running {
            self.timer.schedule(REPAINT_INTERVAL)?;
        }
        Ok(())
    }

    pub fn timer(&self) -> &T {
        &self.timer
    }

    pub fn timer_mut(&mut self) -> &mut T {
        &mut self.timer
    }

    pub fn into_timer(self) -> T {
        self.timer
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use core::convert::Infallible;

    use super::*;

    /// Remembers every request it receives.
    #[derive(Debug, Default)]
    pub(crate) struct RecordingTimer {
        pub scheduled: Vec<MillisDurationU32>,
        pub cancels: u32,
    }

    impl RepaintTimer for RecordingTimer {
        type Error = Infallible;

        fn schedule(&mut self, delay: MillisDurationU32) -> Result<(), Infallible> {
            self.scheduled.push(delay);
            Ok(())
        }

        fn cancel(&mut self) -> Result<(), Infallible> {
            self.cancels += 1;
            Ok(())
        }
    }

    #[test]
    fn every_render_schedules_one_second_ahead() {
        let mut repaint = RepaintLoop::new(RecordingTimer::default());
        repaint.start();
        for _ in 0..5 {
            repaint.rendered().unwrap();
        }
        assert_eq!(repaint.timer().scheduled, vec![REPAINT_INTERVAL; 5]);
        assert_eq!(REPAINT_INTERVAL.to_millis(), 1000);
    }

    #[test]
    fn start_alone_schedules_nothing() {
        let mut repaint = RepaintLoop::new(RecordingTimer::default());
        repaint.start();
        repaint.start();
        assert!(repaint.is_running());
        assert!(repaint.timer().scheduled.is_empty());
    }

    #[test]
    fn stopped_loop_cancels_once_and_goes_quiet() {
        let mut repaint = RepaintLoop::new(RecordingTimer::default());
        repaint.start();
        repaint.rendered().unwrap();
        repaint.stop().unwrap();
        repaint.stop().unwrap();
        repaint.rendered().unwrap();

        let timer = repaint.into_timer();
        assert_eq!(timer.scheduled.len(), 1);
        assert_eq!(timer.cancels, 1);
    }

    #[test]
    fn never_started_loop_never_schedules() {
        let mut repaint = RepaintLoop::new(RecordingTimer::default());
        repaint.rendered().unwrap();
        assert!(repaint.timer().scheduled.is_empty());
    }
}
