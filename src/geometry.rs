use core::ops::{Add, Mul};

use embedded_graphics::prelude::{Point, Size};
use libm::{cosf, roundf, sinf, sqrtf};

/// Number of tick marks around the dial.
pub const TICK_COUNT: usize = 60;
/// Angular distance between two neighbouring ticks.
pub const TICK_STEP_DEGREES: f32 = 360.0 / TICK_COUNT as f32;
/// Every fifth tick marks an hour.
pub const HOUR_TICK_EVERY: usize = 5;

/// 2D vector in surface units, y pointing down.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Unit-free direction scaled to `length`, at `degrees` clockwise from 3 o'clock.
    pub fn polar(degrees: f32, length: f32) -> Self {
        let radians = degrees.to_radians();
        Self::new(cosf(radians) * length, sinf(radians) * length)
    }

    #[inline]
    pub fn length(self) -> f32 {
        sqrtf(self.x * self.x + self.y * self.y)
    }

    /// Nearest pixel.
    pub fn to_point(self) -> Point {
        Point::new(roundf(self.x) as i32, roundf(self.y) as i32)
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    #[inline]
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;
    #[inline]
    fn mul(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

/// Radius and center derived from a drawable area.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Dial {
    pub radius: f32,
    pub center: Vec2,
}

impl Dial {
    pub fn fit(size: Size) -> Self {
        let width = size.width as f32;
        let height = size.height as f32;
        Self {
            radius: width.min(height) / 2.0,
            center: Vec2::new(width / 2.0, height / 2.0),
        }
    }
}

/// One rim segment, stored relative to the dial center.
///
/// Keeping ticks center-relative means they only depend on the radius.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TickMark {
    pub angle: f32,
    pub start: Vec2,
    pub end: Vec2,
    pub highlighted: bool,
}

impl TickMark {
    pub fn at(index: usize, radius: f32, inner_ratio: f32) -> Self {
        let angle = index as f32 * TICK_STEP_DEGREES;
        Self {
            angle,
            start: Vec2::polar(angle, radius * inner_ratio),
            end: Vec2::polar(angle, radius),
            highlighted: index % HOUR_TICK_EVERY == 0,
        }
    }
}

pub type TickMarks = heapless::Vec<TickMark, TICK_COUNT>;

/// All 60 ticks for a dial of the given radius.
pub fn tick_marks(radius: f32, inner_ratio: f32) -> TickMarks {
    (0..TICK_COUNT)
        .map(|index| TickMark::at(index, radius, inner_ratio))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dial_fits_the_shorter_side() {
        let dial = Dial::fit(Size::new(200, 120));
        assert_eq!(dial.radius, 60.0);
        assert_eq!(dial.center, Vec2::new(100.0, 60.0));
    }

    #[test]
    fn polar_follows_screen_orientation() {
        let down = Vec2::polar(90.0, 10.0);
        assert!(down.x.abs() < 1e-5);
        assert!((down.y - 10.0).abs() < 1e-5);

        let left = Vec2::polar(180.0, 10.0);
        assert!((left.x + 10.0).abs() < 1e-5);
        assert_eq!(left.to_point(), Point::new(-10, 0));
    }

    #[test]
    fn sixty_ticks_six_degrees_apart() {
        let ticks = tick_marks(100.0, 0.95);
        assert_eq!(ticks.len(), TICK_COUNT);
        for (index, tick) in ticks.iter().enumerate() {
            assert_eq!(tick.angle, index as f32 * 6.0);
            assert_eq!(tick.highlighted, index % 5 == 0, "tick {index}");
            assert!((tick.start.length() - 95.0).abs() < 1e-3);
            assert!((tick.end.length() - 100.0).abs() < 1e-3);
        }
        assert_eq!(ticks.last().map(|t| t.angle), Some(354.0));
        assert_eq!(ticks.iter().filter(|t| t.highlighted).count(), 12);
    }
}
