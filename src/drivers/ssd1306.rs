//! SSD1306 OLED controller over I2C (128x64 / 128x32 panels).
//!
//! Buffered driver: [`fill`](Ssd1306::fill) and
//! [`set_image`](Ssd1306::set_image) only touch the local [`Frame`];
//! [`show`](Ssd1306::show) streams the whole GDDRAM image in horizontal
//! addressing mode.
//!
//! Generic over any embedded-hal 1.0 [`I2c`] implementation, so the same
//! driver runs on rppal, on an `embedded-hal-bus` device, or on a test double.

use embedded_hal::i2c::I2c;

use crate::hal::frame::Frame;

/// Control byte: command stream follows.
const CTRL_CMD: u8 = 0x00;
/// Control byte: GDDRAM data stream follows.
const CTRL_DATA: u8 = 0x40;
/// Data bytes per I2C write during `show`.
const DATA_CHUNK: usize = 32;

mod cmd {
    pub const DISPLAY_OFF: u8 = 0xAE;
    pub const DISPLAY_ON: u8 = 0xAF;
    pub const CLOCK_DIV: u8 = 0xD5;
    pub const MULTIPLEX: u8 = 0xA8;
    pub const DISPLAY_OFFSET: u8 = 0xD3;
    pub const START_LINE: u8 = 0x40;
    pub const CHARGE_PUMP: u8 = 0x8D;
    pub const MEMORY_MODE: u8 = 0x20;
    pub const SEG_REMAP: u8 = 0xA1;
    pub const COM_SCAN_DEC: u8 = 0xC8;
    pub const COM_PINS: u8 = 0xDA;
    pub const CONTRAST: u8 = 0x81;
    pub const PRECHARGE: u8 = 0xD9;
    pub const VCOM_DETECT: u8 = 0xDB;
    pub const RESUME_RAM: u8 = 0xA4;
    pub const NORMAL: u8 = 0xA6;
    pub const SCROLL_OFF: u8 = 0x2E;
    pub const COLUMN_ADDR: u8 = 0x21;
    pub const PAGE_ADDR: u8 = 0x22;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ssd1306Error<E> {
    /// Bus transaction failed (NACK, arbitration loss, ...).
    I2c(E),
    /// Image geometry differs from the panel.
    FrameSize,
    /// The controller cannot drive a panel of this size.
    Geometry { width: u32, height: u32 },
}

/// Largest panel the controller's GDDRAM holds.
const MAX_WIDTH: u32 = 128;
const MAX_HEIGHT: u32 = 64;

pub struct Ssd1306<I> {
    i2c: I,
    address: u8,
    buffer: Frame,
}

impl<I: I2c> Ssd1306<I> {
    pub fn new(i2c: I, address: u8, width: u32, height: u32) -> Self {
        Self {
            i2c,
            address,
            buffer: Frame::new(width, height),
        }
    }

    /// Run the power-up sequence and blank the panel.
    ///
    /// This is the first bus traffic to the address, so an absent panel
    /// shows up here as an I2C error.
    pub fn init(&mut self) -> Result<(), Ssd1306Error<I::Error>> {
        self.check_geometry()?;
        let height = self.buffer.height();
        let tall = height > 32;
        let (com_pins, contrast) = if tall { (0x12, 0xCF) } else { (0x02, 0x8F) };

        self.command(&[
            cmd::DISPLAY_OFF,
            cmd::CLOCK_DIV,
            0x80,
            cmd::MULTIPLEX,
            (height - 1) as u8,
            cmd::DISPLAY_OFFSET,
            0x00,
            cmd::START_LINE,
            cmd::CHARGE_PUMP,
            0x14, // internal VCC
            cmd::MEMORY_MODE,
            0x00, // horizontal addressing
            cmd::SEG_REMAP,
            cmd::COM_SCAN_DEC,
            cmd::COM_PINS,
            com_pins,
            cmd::CONTRAST,
            contrast,
            cmd::PRECHARGE,
            0xF1,
            cmd::VCOM_DETECT,
            0x40,
            cmd::RESUME_RAM,
            cmd::NORMAL,
            cmd::SCROLL_OFF,
        ])?;

        self.buffer.fill(false);
        self.show()?;
        self.command(&[cmd::DISPLAY_ON])
    }

    pub fn fill(&mut self, on: bool) {
        self.buffer.fill(on);
    }

    pub fn set_image(&mut self, image: &Frame) -> Result<(), Ssd1306Error<I::Error>> {
        if image.dimensions() != self.buffer.dimensions() {
            return Err(Ssd1306Error::FrameSize);
        }
        self.buffer.copy_from(image);
        Ok(())
    }

    /// Push the local buffer to GDDRAM.
    pub fn show(&mut self) -> Result<(), Ssd1306Error<I::Error>> {
        self.check_geometry()?;
        let width = self.buffer.width();
        // 64-wide panels are wired to the centre of the 128-column RAM.
        let col_start = if width == 64 { 32 } else { 0 };
        let col_end = col_start + width - 1;
        let last_page = self.buffer.pages() - 1;

        self.command(&[
            cmd::COLUMN_ADDR,
            col_start as u8,
            col_end as u8,
            cmd::PAGE_ADDR,
            0,
            last_page as u8,
        ])?;

        let mut packet = [0u8; DATA_CHUNK + 1];
        packet[0] = CTRL_DATA;
        for chunk in self.buffer.as_bytes().chunks(DATA_CHUNK) {
            packet[1..=chunk.len()].copy_from_slice(chunk);
            self.i2c
                .write(self.address, &packet[..=chunk.len()])
                .map_err(Ssd1306Error::I2c)?;
        }
        Ok(())
    }

    /// Non-empty, at most 128x64, whole pages.
    fn check_geometry(&self) -> Result<(), Ssd1306Error<I::Error>> {
        let (width, height) = self.buffer.dimensions();
        let fits = (1..=MAX_WIDTH).contains(&width)
            && (8..=MAX_HEIGHT).contains(&height)
            && height % 8 == 0;
        if fits {
            Ok(())
        } else {
            Err(Ssd1306Error::Geometry { width, height })
        }
    }

    fn command(&mut self, cmds: &[u8]) -> Result<(), Ssd1306Error<I::Error>> {
        let mut packet = Vec::with_capacity(cmds.len() + 1);
        packet.push(CTRL_CMD);
        packet.extend_from_slice(cmds);
        self.i2c
            .write(self.address, &packet)
            .map_err(Ssd1306Error::I2c)
    }
}
