use core::convert::Infallible;

use embedded_graphics::{pixelcolor::BinaryColor, prelude::*};

/// Number of chained MAX7219 devices.
pub const DEVICES: usize = 4;
/// Side of one FC16 module in pixels.
pub const MODULE_SIZE: usize = 8;
/// Side of the square tile the four modules form.
pub const SIDE: usize = 2 * MODULE_SIZE;

/// One 8x8 row buffer per device, as expected by `MAX7219::write_raw`.
pub type DeviceBuffers = [[u8; MODULE_SIZE]; DEVICES];

/// Frame buffer for four FC16 modules wired as a 2x2 tile.
///
/// Devices 0 and 1 form the top row, 2 and 3 the bottom row, left to right.
/// Pixels outside the tile are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LedMatrix {
    // bit 15 is the leftmost column
    rows: [u16; SIDE],
}

impl LedMatrix {
    pub const fn new() -> Self {
        Self { rows: [0; SIDE] }
    }

    pub fn is_lit(&self, point: Point) -> bool {
        Self::bit(point).is_some_and(|(row, mask)| self.rows[row] & mask != 0)
    }

    /// Splits the frame into per-device buffers.
    pub fn device_buffers(&self) -> DeviceBuffers {
        let mut device_buffers = [[0u8; MODULE_SIZE]; DEVICES];
        for (dev_idx, buffer) in device_buffers.iter_mut().enumerate() {
            let row_block = dev_idx / 2;
            let shift = MODULE_SIZE * (1 - dev_idx % 2);
            for (r, byte) in buffer.iter_mut().enumerate() {
                *byte = ((self.rows[row_block * MODULE_SIZE + r] >> shift) & 0xFF) as u8;
            }
        }
        device_buffers
    }

    fn bit(point: Point) -> Option<(usize, u16)> {
        let x = usize::try_from(point.x).ok().filter(|&x| x < SIDE)?;
        let y = usize::try_from(point.y).ok().filter(|&y| y < SIDE)?;
        Some((y, 1 << (SIDE - 1 - x)))
    }
}

impl OriginDimensions for LedMatrix {
    fn size(&self) -> Size {
        Size::new(SIDE as u32, SIDE as u32)
    }
}

impl DrawTarget for LedMatrix {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if let Some((row, mask)) = Self::bit(point) {
                match color {
                    BinaryColor::On => self.rows[row] |= mask,
                    BinaryColor::Off => self.rows[row] &= !mask,
                }
            }
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        let fill = match color {
            BinaryColor::On => u16::MAX,
            BinaryColor::Off => 0,
        };
        self.rows = [fill; SIDE];
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use embedded_graphics::primitives::{Line, PrimitiveStyle};

    use super::*;

    #[test]
    fn corners_land_on_their_devices() {
        let mut matrix = LedMatrix::new();
        Pixel(Point::new(0, 0), BinaryColor::On).draw(&mut matrix).unwrap();
        Pixel(Point::new(15, 0), BinaryColor::On).draw(&mut matrix).unwrap();
        Pixel(Point::new(0, 15), BinaryColor::On).draw(&mut matrix).unwrap();
        Pixel(Point::new(15, 15), BinaryColor::On).draw(&mut matrix).unwrap();

        let buffers = matrix.device_buffers();
        assert_eq!(buffers[0][0], 0b1000_0000);
        assert_eq!(buffers[1][0], 0b0000_0001);
        assert_eq!(buffers[2][7], 0b1000_0000);
        assert_eq!(buffers[3][7], 0b0000_0001);
        assert_eq!(buffers.iter().flatten().filter(|b| **b != 0).count(), 4);
    }

    #[test]
    fn out_of_bounds_pixels_are_dropped() {
        let mut matrix = LedMatrix::new();
        Line::new(Point::new(-5, 3), Point::new(30, 3))
            .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
            .draw(&mut matrix)
            .unwrap();

        let buffers = matrix.device_buffers();
        assert_eq!(buffers[0][3], 0xFF);
        assert_eq!(buffers[1][3], 0xFF);
        assert!(matrix.is_lit(Point::new(7, 3)));
        assert!(!matrix.is_lit(Point::new(16, 3)));
        assert!(!matrix.is_lit(Point::new(7, 4)));
    }

    #[test]
    fn clear_resets_every_row() {
        let mut matrix = LedMatrix::new();
        matrix.clear(BinaryColor::On).unwrap();
        assert!(matrix.device_buffers().iter().flatten().all(|b| *b == 0xFF));
        matrix.clear(BinaryColor::Off).unwrap();
        assert_eq!(matrix, LedMatrix::new());
    }
}
