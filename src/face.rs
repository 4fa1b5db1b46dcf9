//! Clock face geometry and drawing.
//!
//! Everything is laid out around a [`Dial`]: ticks are cached per radius,
//! needles and numerals are derived on demand, and [`ClockFace::render`]
//! turns them into `embedded-graphics` primitives.

use embedded_graphics::{
    mono_font::MonoTextStyle,
    prelude::*,
    primitives::{Circle, Line},
    text::{Alignment, Baseline, Text, TextStyleBuilder},
};

use crate::{
    clock::{TimeOfDay, WallClock},
    config::{FaceConfig, NeedleConfig},
    geometry::{tick_marks, Dial, TickMark, TickMarks, Vec2},
    theme::{Stroke, Theme},
};

/// Labels in dial order, starting at 3 o'clock.
pub const NUMERALS: [&str; 12] = [
    "03", "04", "05", "06", "07", "08", "09", "10", "11", "12", "01", "02",
];
pub const NUMERAL_STEP_DEGREES: f32 = 30.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hand {
    Hour,
    Minute,
    Second,
}

impl Hand {
    /// Later hands are drawn over earlier ones.
    pub const DRAW_ORDER: [Hand; 3] = [Hand::Second, Hand::Minute, Hand::Hour];

    pub fn angle(self, time: &TimeOfDay) -> f32 {
        match self {
            Hand::Hour => time.hour_angle(),
            Hand::Minute => time.minute_angle(),
            Hand::Second => time.second_angle(),
        }
    }

    fn config(self, config: &FaceConfig) -> NeedleConfig {
        match self {
            Hand::Hour => config.hour,
            Hand::Minute => config.minute,
            Hand::Second => config.second,
        }
    }

    fn color<T: Theme>(self, theme: &T) -> T::Color {
        match self {
            Hand::Hour => theme.hour_needle(),
            Hand::Minute => theme.minute_needle(),
            Hand::Second => theme.second_needle(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Needle {
    pub hand: Hand,
    pub angle: f32,
    /// Absolute surface coordinates of the tip.
    pub end: Vec2,
    pub stroke_width: u32,
    pub opacity: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Numeral {
    pub label: &'static str,
    /// Point the label is vertically centered on.
    pub anchor: Vec2,
}

pub struct ClockFace {
    config: FaceConfig,
    dial: Dial,
    ticks: TickMarks,
    tick_rebuilds: u32,
}

impl ClockFace {
    /// A face with no known size yet; nothing but the background is drawn until
    /// [`ClockFace::on_size_changed`] is called.
    pub fn new(config: FaceConfig) -> Self {
        Self {
            config,
            dial: Dial::default(),
            ticks: TickMarks::new(),
            tick_rebuilds: 0,
        }
    }

    pub fn config(&self) -> &FaceConfig {
        &self.config
    }

    pub fn radius(&self) -> f32 {
        self.dial.radius
    }

    pub fn center(&self) -> Vec2 {
        self.dial.center
    }

    pub fn ticks(&self) -> &[TickMark] {
        &self.ticks
    }

    /// How many times the tick cache has been regenerated.
    pub fn tick_rebuilds(&self) -> u32 {
        self.tick_rebuilds
    }

    /// Refits the dial. A size with the same radius is ignored entirely, center
    /// included. Returns whether the dial and its tick cache were regenerated.
    pub fn on_size_changed(&mut self, size: Size) -> bool {
        let dial = Dial::fit(size);
        if dial.radius == self.dial.radius {
            return false;
        }
        self.dial = dial;

        self.ticks = tick_marks(dial.radius, self.config.tick_inner_ratio);
        self.tick_rebuilds += 1;
        log::debug!(
            "rebuilt {} tick marks for radius {}",
            self.ticks.len(),
            dial.radius
        );
        true
    }

    /// Needles for `time`, in draw order.
    pub fn needles(&self, time: &TimeOfDay) -> [Needle; 3] {
        Hand::DRAW_ORDER.map(|hand| {
            let needle = hand.config(&self.config);
            let angle = hand.angle(time);
            Needle {
                hand,
                angle,
                end: self.dial.center
                    + Vec2::polar(angle, self.dial.radius * needle.length_ratio),
                stroke_width: needle.stroke_width,
                opacity: needle.opacity,
            }
        })
    }

    pub fn numerals(&self) -> impl Iterator<Item = Numeral> + '_ {
        let distance = self.dial.radius * self.config.numeral_radius_ratio;
        NUMERALS.iter().enumerate().map(move |(index, &label)| Numeral {
            label,
            anchor: self.dial.center
                + Vec2::polar(index as f32 * NUMERAL_STEP_DEGREES, distance),
        })
    }

    pub fn hub_radius(&self) -> f32 {
        self.dial.radius * self.config.hub_radius_ratio
    }

    /// Paints the whole face for the time read from `clock`.
    ///
    /// The clock is sampled exactly once per call.
    pub fn render<D, T, C>(&self, target: &mut D, theme: &T, clock: &C) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = T::Color>,
        T: Theme,
        C: WallClock + ?Sized,
    {
        let background = theme.background();
        target.clear(background)?;

        self.draw_ticks(target, theme)?;

        let time = clock.now();
        self.draw_needles(target, theme, &time)?;
        self.draw_numerals(target, theme)?;
        self.draw_hub(target, theme)
    }

    fn draw_ticks<D, T>(&self, target: &mut D, theme: &T) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = T::Color>,
        T: Theme,
    {
        let background = theme.background();
        let major = Stroke::new(theme.tick(), self.config.tick_width);
        let minor = major.with_opacity(self.config.minor_tick_opacity);
        let center = self.dial.center;

        for tick in &self.ticks {
            let stroke = if tick.highlighted { major } else { minor };
            Line::new(
                (center + tick.start).to_point(),
                (center + tick.end).to_point(),
            )
            .into_styled(stroke.resolve(background))
            .draw(target)?;
        }
        Ok(())
    }

    fn draw_needles<D, T>(&self, target: &mut D, theme: &T, time: &TimeOfDay) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = T::Color>,
        T: Theme,
    {
        let background = theme.background();
        let center = self.dial.center.to_point();

        for needle in self.needles(time) {
            let stroke = Stroke::new(needle.hand.color(theme), needle.stroke_width)
                .with_opacity(needle.opacity);
            Line::new(center, needle.end.to_point())
                .into_styled(stroke.resolve(background))
                .draw(target)?;
        }
        Ok(())
    }

    fn draw_numerals<D, T>(&self, target: &mut D, theme: &T) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = T::Color>,
        T: Theme,
    {
        let Some(font) = self.config.numeral_font else {
            return Ok(());
        };

        let character_style = MonoTextStyle::new(font, theme.numeral());
        let text_style = TextStyleBuilder::new()
            .alignment(Alignment::Center)
            .baseline(Baseline::Bottom)
            .build();
        // Bottom baseline pushed down by half a glyph centers the label.
        let lift = Vec2::new(0.0, font.character_size.height as f32 / 2.0);

        for numeral in self.numerals() {
            Text::with_text_style(
                numeral.label,
                (numeral.anchor + lift).to_point(),
                character_style,
                text_style,
            )
            .draw(target)?;
        }
        Ok(())
    }

    fn draw_hub<D, T>(&self, target: &mut D, theme: &T) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = T::Color>,
        T: Theme,
    {
        let diameter = (libm::roundf(self.hub_radius() * 2.0) as u32).max(1);
        let style = Stroke::new(theme.hub_outline(), self.config.hub_outline_width)
            .outline(theme.hub_fill(), theme.background());

        Circle::with_center(self.dial.center.to_point(), diameter)
            .into_styled(style)
            .draw(target)
    }
}
