//! Peripheral drivers, generic over embedded-hal 1.0 traits.

pub mod ssd1306;
