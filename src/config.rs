use embedded_graphics::mono_font::{
    ascii::{FONT_4X6, FONT_6X10},
    MonoFont,
};

/// Length and stroke of one needle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NeedleConfig {
    /// Fraction of the dial radius.
    pub length_ratio: f32,
    pub stroke_width: u32,
    pub opacity: f32,
}

/// Proportions of a clock face, all relative to the dial radius.
#[derive(Clone, Copy)]
pub struct FaceConfig {
    /// Where a tick starts; ticks end on the rim.
    pub tick_inner_ratio: f32,
    pub tick_width: u32,
    /// Opacity of the ticks between hour markers.
    pub minor_tick_opacity: f32,
    pub hour: NeedleConfig,
    pub minute: NeedleConfig,
    pub second: NeedleConfig,
    pub numeral_radius_ratio: f32,
    /// `None` leaves the numerals out.
    pub numeral_font: Option<&'static MonoFont<'static>>,
    pub hub_radius_ratio: f32,
    pub hub_outline_width: u32,
}

impl FaceConfig {
    /// Thin needles and a tiny font for low resolution panels.
    pub fn compact() -> Self {
        Self {
            hour: NeedleConfig {
                stroke_width: 3,
                ..Self::default().hour
            },
            minute: NeedleConfig {
                stroke_width: 2,
                ..Self::default().minute
            },
            second: NeedleConfig {
                stroke_width: 1,
                ..Self::default().second
            },
            numeral_font: Some(&FONT_4X6),
            ..Self::default()
        }
    }
}

impl Default for FaceConfig {
    fn default() -> Self {
        Self {
            tick_inner_ratio: 0.95,
            tick_width: 1,
            minor_tick_opacity: 0.5,
            hour: NeedleConfig {
                length_ratio: 0.40,
                stroke_width: 12,
                opacity: 1.0,
            },
            minute: NeedleConfig {
                length_ratio: 0.60,
                stroke_width: 8,
                opacity: 1.0,
            },
            second: NeedleConfig {
                length_ratio: 0.80,
                stroke_width: 4,
                opacity: 0.5,
            },
            numeral_radius_ratio: 0.85,
            numeral_font: Some(&FONT_6X10),
            hub_radius_ratio: 0.02,
            hub_outline_width: 1,
        }
    }
}
