//! 1-bit frame buffer for the SSD1306 status panels.
//!
//! Pixels are packed the way the controller's GDDRAM expects them: one byte
//! per 8-pixel vertical column slice, pages of `width` bytes top to bottom,
//! LSB = top row of the page.  A flush is a straight copy of [`Frame::as_bytes`].
//!
//! Implements embedded-graphics [`DrawTarget`] so callers can draw text and
//! primitives directly; out-of-range pixels are clipped.

use core::convert::Infallible;

use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::mono_font::ascii::FONT_6X10;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Ellipse, PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Baseline, Text};

use super::state::Side;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    width: u32,
    height: u32,
    buf: Vec<u8>,
}

impl Frame {
    /// All-off frame.  `height` is rounded up to a whole page.
    pub fn new(width: u32, height: u32) -> Self {
        let pages = height.div_ceil(8);
        Self {
            width,
            height,
            buf: vec![0; (width * pages) as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Number of 8-row pages.
    pub fn pages(&self) -> u32 {
        self.height.div_ceil(8)
    }

    /// Page-packed GDDRAM image.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    pub fn fill(&mut self, on: bool) {
        self.buf.fill(if on { 0xFF } else { 0x00 });
    }

    pub fn is_blank(&self) -> bool {
        self.buf.iter().all(|&b| b == 0)
    }

    pub fn lit_pixels(&self) -> u32 {
        self.buf.iter().map(|b| b.count_ones()).sum()
    }

    pub fn pixel(&self, x: u32, y: u32) -> bool {
        match self.index(x, y) {
            Some((i, bit)) => self.buf[i] & bit != 0,
            None => false,
        }
    }

    pub fn set_pixel(&mut self, x: u32, y: u32, on: bool) {
        if let Some((i, bit)) = self.index(x, y) {
            if on {
                self.buf[i] |= bit;
            } else {
                self.buf[i] &= !bit;
            }
        }
    }

    /// Overwrite with `other`.  Geometry must already match.
    pub fn copy_from(&mut self, other: &Frame) {
        debug_assert_eq!(self.dimensions(), other.dimensions());
        self.buf.copy_from_slice(&other.buf);
    }

    fn index(&self, x: u32, y: u32) -> Option<(usize, u8)> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (x + (y / 8) * self.width) as usize;
        Some((i, 1 << (y % 8)))
    }

    /// Bring-up pattern: border, caption, and a filled rectangle (left) or
    /// ellipse (right) so the two panels are distinguishable at a glance.
    pub fn test_pattern(side: Side, width: u32, height: u32) -> Self {
        let mut frame = Self::new(width, height);
        let on = BinaryColor::On;

        let _ = Rectangle::new(Point::zero(), Size::new(width, height))
            .into_styled(PrimitiveStyle::with_stroke(on, 1))
            .draw(&mut frame);

        let caption = match side {
            Side::Left => "Left Display",
            Side::Right => "Right Display",
        };
        let _ = Text::with_baseline(
            caption,
            Point::new(5, 5),
            MonoTextStyle::new(&FONT_6X10, on),
            Baseline::Top,
        )
        .draw(&mut frame);

        let shape_style = PrimitiveStyle::with_fill(on);
        let shape_origin = Point::new(20, 30);
        let shape_size = Size::new(89, 21);
        let _ = match side {
            Side::Left => Rectangle::new(shape_origin, shape_size)
                .into_styled(shape_style)
                .draw(&mut frame),
            Side::Right => Ellipse::new(shape_origin, shape_size)
                .into_styled(shape_style)
                .draw(&mut frame),
        };

        frame
    }
}

// embedded-graphics integration

impl OriginDimensions for Frame {
    fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

impl DrawTarget for Frame {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(coord, color) in pixels {
            if coord.x < 0 || coord.y < 0 {
                continue;
            }
            self.set_pixel(coord.x as u32, coord.y as u32, color.is_on());
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.fill(color.is_on());
        Ok(())
    }
}
