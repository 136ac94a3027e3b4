//! Frame buffer with embedded-graphics support
//!
//! Holds the two bit planes the IL0373 refreshes from and maps
//! [`embedded_graphics`] drawing onto them, including rotation: the panel
//! is wired in portrait, the calendar is drawn in landscape.

use core::convert::Infallible;

use embedded_graphics::prelude::*;
use embedded_graphics::Pixel;

use crate::il0373::color::Grey;
use crate::il0373::{HEIGHT, PLANE_BYTES, WIDTH};

/// Rotation applied to incoming draw coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayRotation {
    /// Native portrait orientation
    #[default]
    Rotate0,
    /// Rotated 90 degrees clockwise
    Rotate90,
    /// Upside down portrait
    Rotate180,
    /// Rotated 270 degrees clockwise (landscape, connector on the left)
    Rotate270,
}

/// Full-frame buffer for the 2.9" panel.
///
/// Planes are heap allocated; at two times 4736 bytes the frame would not
/// be safe on the default main task stack.
pub struct Display2in9 {
    plane1: Vec<u8>,
    plane2: Vec<u8>,
    rotation: DisplayRotation,
}

impl Default for Display2in9 {
    fn default() -> Self {
        Self::new()
    }
}

impl Display2in9 {
    /// Fresh all-white frame in the native orientation
    pub fn new() -> Self {
        Display2in9 {
            plane1: vec![0xFF; PLANE_BYTES],
            plane2: vec![0xFF; PLANE_BYTES],
            rotation: DisplayRotation::default(),
        }
    }

    /// Set the rotation for subsequent drawing
    pub fn set_rotation(&mut self, rotation: DisplayRotation) {
        self.rotation = rotation;
    }

    /// Current rotation
    pub fn rotation(&self) -> DisplayRotation {
        self.rotation
    }

    /// First bit plane, sent via Data Start Transmission 1
    pub fn plane1(&self) -> &[u8] {
        &self.plane1
    }

    /// Second bit plane, sent via Data Start Transmission 2
    pub fn plane2(&self) -> &[u8] {
        &self.plane2
    }

    fn set_pixel(&mut self, x: i32, y: i32, color: Grey) {
        let (nx, ny) = match self.rotation {
            DisplayRotation::Rotate0 => (x, y),
            DisplayRotation::Rotate90 => (y, HEIGHT as i32 - 1 - x),
            DisplayRotation::Rotate180 => (WIDTH as i32 - 1 - x, HEIGHT as i32 - 1 - y),
            DisplayRotation::Rotate270 => (WIDTH as i32 - 1 - y, x),
        };

        // Out of range pixels are dropped, embedded-graphics primitives may
        // overshoot the canvas
        if nx < 0 || ny < 0 || nx >= WIDTH as i32 || ny >= HEIGHT as i32 {
            return;
        }

        let index = ny as usize * (WIDTH as usize / 8) + nx as usize / 8;
        let mask = 0x80 >> (nx as usize % 8);

        let (bit1, bit2) = color.bits();
        if bit1 {
            self.plane1[index] |= mask;
        } else {
            self.plane1[index] &= !mask;
        }
        if bit2 {
            self.plane2[index] |= mask;
        } else {
            self.plane2[index] &= !mask;
        }
    }
}

impl DrawTarget for Display2in9 {
    type Color = Grey;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            self.set_pixel(point.x, point.y, color);
        }
        Ok(())
    }
}

impl OriginDimensions for Display2in9 {
    fn size(&self) -> Size {
        match self.rotation {
            DisplayRotation::Rotate0 | DisplayRotation::Rotate180 => {
                Size::new(WIDTH as u32, HEIGHT as u32)
            }
            DisplayRotation::Rotate90 | DisplayRotation::Rotate270 => {
                Size::new(HEIGHT as u32, WIDTH as u32)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};

    #[test]
    fn starts_white() {
        let display = Display2in9::new();
        assert!(display.plane1().iter().all(|&b| b == 0xFF));
        assert!(display.plane2().iter().all(|&b| b == 0xFF));
    }

    #[test]
    fn black_pixel_clears_both_planes() {
        let mut display = Display2in9::new();
        display.set_pixel(0, 0, Grey::Black);
        assert_eq!(display.plane1()[0], 0x7F);
        assert_eq!(display.plane2()[0], 0x7F);
    }

    #[test]
    fn light_grey_splits_the_planes() {
        let mut display = Display2in9::new();
        display.set_pixel(0, 0, Grey::Light);
        assert_eq!(display.plane1()[0], 0xFF);
        assert_eq!(display.plane2()[0], 0x7F);
    }

    #[test]
    fn rotate270_maps_landscape_origin_to_the_native_right_edge() {
        let mut display = Display2in9::new();
        display.set_rotation(DisplayRotation::Rotate270);
        assert_eq!(display.size(), Size::new(296, 128));

        display.set_pixel(0, 0, Grey::Black);
        // (0,0) landscape -> native (127, 0): last byte of row 0, lowest bit
        assert_eq!(display.plane1()[15], 0xFE);
    }

    #[test]
    fn out_of_bounds_is_dropped() {
        let mut display = Display2in9::new();
        display.set_pixel(-1, 5000, Grey::Black);
        assert!(display.plane1().iter().all(|&b| b == 0xFF));
    }

    #[test]
    fn rectangles_fill_the_expected_area() {
        let mut display = Display2in9::new();
        Rectangle::new(Point::new(0, 0), Size::new(8, 2))
            .into_styled(PrimitiveStyle::with_fill(Grey::Black))
            .draw(&mut display)
            .unwrap();
        assert_eq!(display.plane1()[0], 0x00);
        assert_eq!(display.plane1()[16], 0x00); // second row, same column byte
        assert_eq!(display.plane1()[32], 0xFF); // third row untouched
    }
}
