use embedded_graphics::{
    pixelcolor::{BinaryColor, Rgb565, Rgb888, RgbColor},
    prelude::PixelColor,
    primitives::{PrimitiveStyle, PrimitiveStyleBuilder},
};

/// Colors that can be drawn at partial opacity over a background.
pub trait Blend: PixelColor {
    /// `self` at `opacity` (0.0..=1.0) composited over `background`.
    fn blend(self, background: Self, opacity: f32) -> Self;
}

impl Blend for BinaryColor {
    fn blend(self, background: Self, opacity: f32) -> Self {
        if opacity >= 0.5 {
            self
        } else {
            background
        }
    }
}

fn mix(fg: u8, bg: u8, opacity: f32) -> u8 {
    let opacity = opacity.clamp(0.0, 1.0);
    libm::roundf(bg as f32 + (fg as f32 - bg as f32) * opacity) as u8
}

impl Blend for Rgb888 {
    fn blend(self, background: Self, opacity: f32) -> Self {
        Rgb888::new(
            mix(self.r(), background.r(), opacity),
            mix(self.g(), background.g(), opacity),
            mix(self.b(), background.b(), opacity),
        )
    }
}

impl Blend for Rgb565 {
    fn blend(self, background: Self, opacity: f32) -> Self {
        Rgb565::new(
            mix(self.r(), background.r(), opacity),
            mix(self.g(), background.g(), opacity),
            mix(self.b(), background.b(), opacity),
        )
    }
}

/// Immutable description of one stroke, built fresh for each draw call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke<C> {
    pub color: C,
    pub width: u32,
    pub opacity: f32,
}

impl<C: Blend> Stroke<C> {
    pub const fn new(color: C, width: u32) -> Self {
        Self {
            color,
            width,
            opacity: 1.0,
        }
    }

    pub fn with_opacity(self, opacity: f32) -> Self {
        Self { opacity, ..self }
    }

    pub fn resolve(&self, background: C) -> PrimitiveStyle<C> {
        PrimitiveStyle::with_stroke(self.color.blend(background, self.opacity), self.width)
    }

    /// Fill in `fill`, outlined by this stroke.
    pub fn outline(&self, fill: C, background: C) -> PrimitiveStyle<C> {
        PrimitiveStyleBuilder::new()
            .fill_color(fill)
            .stroke_color(self.color.blend(background, self.opacity))
            .stroke_width(self.width)
            .build()
    }
}

/// Palette used to paint a clock face.
pub trait Theme {
    type Color: Blend;

    fn background(&self) -> Self::Color;

    fn tick(&self) -> Self::Color;

    fn hour_needle(&self) -> Self::Color {
        self.tick()
    }

    fn minute_needle(&self) -> Self::Color {
        self.tick()
    }

    fn second_needle(&self) -> Self::Color {
        self.tick()
    }

    fn numeral(&self) -> Self::Color {
        self.tick()
    }

    fn hub_fill(&self) -> Self::Color {
        self.tick()
    }

    fn hub_outline(&self) -> Self::Color {
        self.tick()
    }
}

/// Lit pixels on a dark panel.
#[derive(Debug, Clone, Copy, Default)]
pub struct Monochrome;

impl Theme for Monochrome {
    type Color = BinaryColor;

    fn background(&self) -> BinaryColor {
        BinaryColor::Off
    }

    fn tick(&self) -> BinaryColor {
        BinaryColor::On
    }
}
