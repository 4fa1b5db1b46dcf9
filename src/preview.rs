use std::{
    convert::Infallible,
    io::Write,
    thread,
    time::{Duration, Instant},
};

use analog_face::{
    ClockWidget, FaceConfig, Monochrome, RepaintTimer, TimeOfDay, WallClock, WidgetError,
};
use anyhow::{anyhow, Context};
use chrono::Timelike;
use clap::Parser;
use embedded_graphics::{pixelcolor::BinaryColor, prelude::*};
use fugit::MillisDurationU32;

#[derive(Debug, Parser)]
#[command(about = "Render the analog clock face in the terminal.")]
struct Args {
    #[arg(long, default_value_t = 48, help = "Surface width in pixels.")]
    width: u32,
    #[arg(long, default_value_t = 48, help = "Surface height in pixels.")]
    height: u32,
    #[arg(long, help = "Stop after <FRAMES> frames instead of running forever.")]
    frames: Option<u64>,
    #[arg(long, help = "Use full size needles instead of the compact preset.")]
    full: bool,
}

/// Local time from the system clock.
struct LocalClock;

impl WallClock for LocalClock {
    fn now(&self) -> TimeOfDay {
        let now = chrono::Local::now();
        TimeOfDay::from_hms(now.hour() as u8, now.minute() as u8, now.second() as u8)
    }
}

/// Remembers when the next repaint is due.
#[derive(Debug, Default)]
struct DeadlineTimer {
    due: Option<Instant>,
}

impl RepaintTimer for DeadlineTimer {
    type Error = Infallible;

    fn schedule(&mut self, delay: MillisDurationU32) -> Result<(), Infallible> {
        self.due = Some(Instant::now() + Duration::from_millis(delay.to_millis().into()));
        Ok(())
    }

    fn cancel(&mut self) -> Result<(), Infallible> {
        self.due = None;
        Ok(())
    }
}

/// 1 bpp surface printed as text, two characters per pixel.
struct TextCanvas {
    size: Size,
    pixels: Vec<bool>,
}

impl TextCanvas {
    fn new(size: Size) -> Self {
        Self {
            size,
            pixels: vec![false; (size.width * size.height) as usize],
        }
    }

    fn render(&self) -> String {
        let width = self.size.width as usize;
        let mut out = String::with_capacity(self.pixels.len() * 2 + self.size.height as usize);
        for row in self.pixels.chunks(width.max(1)) {
            for &lit in row {
                out.push_str(if lit { "##" } else { "  " });
            }
            out.push('\n');
        }
        out
    }
}

impl OriginDimensions for TextCanvas {
    fn size(&self) -> Size {
        self.size
    }
}

impl DrawTarget for TextCanvas {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let bounds = self.bounding_box();
        for Pixel(point, color) in pixels {
            if bounds.contains(point) {
                let index = point.y as usize * self.size.width as usize + point.x as usize;
                self.pixels[index] = color.is_on();
            }
        }
        Ok(())
    }
}

/// Whether another frame fits in the optional `--frames` budget.
fn frames_left(limit: Option<u64>, drawn: u64) -> bool {
    limit.map_or(true, |limit| drawn < limit)
}

fn init_logging() {
    let mut builder = env_logger::Builder::new();
    if let Ok(filter) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filter);
    } else {
        builder.filter_level(log::LevelFilter::Info);
    }
    builder.init();
}

pub fn run() -> anyhow::Result<()> {
    init_logging();
    let args = Args::parse();

    let size = Size::new(args.width, args.height);
    let config = if args.full {
        FaceConfig::default()
    } else {
        FaceConfig::compact()
    };
    log::info!("previewing a {}x{} face", size.width, size.height);

    let mut canvas = TextCanvas::new(size);
    let mut widget = ClockWidget::attach(config, size, DeadlineTimer::default());
    let mut stdout = std::io::stdout().lock();
    let mut frame = 0u64;

    while frames_left(args.frames, frame) {
        if let Err(WidgetError::Draw(never) | WidgetError::Schedule(never)) =
            widget.draw(&mut canvas, &Monochrome, &LocalClock)
        {
            match never {}
        }
        frame += 1;

        write!(stdout, "\x1b[2J\x1b[H{}", canvas.render()).context("writing frame")?;
        stdout.flush().context("flushing frame")?;
        log::debug!("frame {frame} drawn");

        if !frames_left(args.frames, frame) {
            break;
        }

        let due = widget
            .repaint()
            .timer()
            .due
            .ok_or_else(|| anyhow!("repaint loop stopped without a pending frame"))?;
        thread::sleep(due.saturating_duration_since(Instant::now()));
    }

    if let Err(never) = widget.detach() {
        match never {}
    }
    log::info!("stopped after {frame} frames");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_frame_budget_draws_nothing() {
        assert!(!frames_left(Some(0), 0));
    }

    #[test]
    fn frame_budget_counts_drawn_frames() {
        assert!(frames_left(Some(2), 1));
        assert!(!frames_left(Some(2), 2));
        assert!(frames_left(None, u64::MAX));
    }

    #[test]
    fn text_canvas_drops_pixels_outside_the_surface() {
        let mut canvas = TextCanvas::new(Size::new(2, 1));
        canvas
            .draw_iter([
                Pixel(Point::new(1, 0), BinaryColor::On),
                Pixel(Point::new(2, 0), BinaryColor::On),
                Pixel(Point::new(0, -1), BinaryColor::On),
            ])
            .unwrap();
        assert_eq!(canvas.render(), "  ##\n");
    }
}
