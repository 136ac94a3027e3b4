//! IL0373 Display Driver Implementation
//!
//! High-level control of the panel: initialization, two-plane frame upload,
//! refresh, and sleep.
//!
//! ## Grey levels
//!
//! The controller refreshes from two RAM planes. With the register LUTs
//! below, each pixel's bit pair selects one of four grey levels:
//!
//! | plane 1 | plane 2 | level      |
//! |---------|---------|------------|
//! | 1       | 1       | white      |
//! | 1       | 0       | light grey |
//! | 0       | 1       | dark grey  |
//! | 0       | 0       | black      |
//!
//! Plane 1 goes out through Data Start Transmission 1 (0x10), plane 2
//! through Data Start Transmission 2 (0x13).
//!
//! ## BUSY pin
//!
//! BUSY is active low on this controller. After `DISPLAY_REFRESH` and
//! `POWER_ON`/`POWER_OFF` the driver **must** wait for BUSY to return HIGH;
//! a full grey refresh takes 3-4 seconds.

pub use display_interface::DisplayError;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};
use embedded_hal::spi::SpiDevice;

use crate::il0373::interface::DisplayInterface;
use crate::il0373::{cmd::Cmd, flag::Flag, HEIGHT, PLANE_BYTES, WIDTH};

/// IL0373 E-Paper Display Driver
///
/// ## Type Parameters
///
/// - `SPI` - SPI device for communication
/// - `BSY` - BUSY input pin (LOW while the controller is busy)
/// - `DC` - Data/Command output pin
/// - `RST` - Reset output pin
/// - `DELAY` - Delay provider for timing
pub struct Il0373<SPI, BSY, DC, RST, DELAY> {
    /// The display interface
    pub interface: DisplayInterface<SPI, BSY, DC, RST, DELAY>,
}

impl<SPI, BSY, DC, RST, DELAY> Il0373<SPI, BSY, DC, RST, DELAY>
where
    SPI: SpiDevice,
    BSY: InputPin,
    DC: OutputPin,
    RST: OutputPin,
    DELAY: DelayNs,
{
    /// VCOM waveform for the four-grey refresh, from the GoodDisplay
    /// reference tables for this panel family
    const LUT_VCOM_GREY: [u8; 44] = [
        0x00, 0x0A, 0x00, 0x00, 0x00, 0x01, // phase 0
        0x60, 0x14, 0x14, 0x00, 0x00, 0x01, // phase 1
        0x00, 0x14, 0x00, 0x00, 0x00, 0x01, // phase 2
        0x00, 0x13, 0x0A, 0x01, 0x00, 0x01, // phase 3
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // phase 4
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // phase 5
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // phase 6
        0x00, 0x00,
    ];

    /// White-to-white transition waveform
    const LUT_WW_GREY: [u8; 42] = [
        0x40, 0x0A, 0x00, 0x00, 0x00, 0x01, // phase 0
        0x90, 0x14, 0x14, 0x00, 0x00, 0x01, // phase 1
        0x10, 0x14, 0x0A, 0x00, 0x00, 0x01, // phase 2
        0xA0, 0x13, 0x01, 0x00, 0x00, 0x01, // phase 3
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // phase 4
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // phase 5
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // phase 6
    ];

    /// Black-to-white transition waveform, drives the light grey level
    const LUT_BW_GREY: [u8; 42] = [
        0x40, 0x0A, 0x00, 0x00, 0x00, 0x01, // phase 0
        0x90, 0x14, 0x14, 0x00, 0x00, 0x01, // phase 1
        0x00, 0x14, 0x0A, 0x00, 0x00, 0x01, // phase 2
        0x99, 0x0C, 0x01, 0x03, 0x04, 0x01, // phase 3
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // phase 4
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // phase 5
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // phase 6
    ];

    /// White-to-black transition waveform, drives the dark grey level
    const LUT_WB_GREY: [u8; 42] = [
        0x40, 0x0A, 0x00, 0x00, 0x00, 0x01, // phase 0
        0x90, 0x14, 0x14, 0x00, 0x00, 0x01, // phase 1
        0x00, 0x14, 0x0A, 0x00, 0x00, 0x01, // phase 2
        0x99, 0x0B, 0x04, 0x04, 0x01, 0x01, // phase 3
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // phase 4
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // phase 5
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // phase 6
    ];

    /// Black-to-black transition waveform
    const LUT_BB_GREY: [u8; 42] = [
        0x80, 0x0A, 0x00, 0x00, 0x00, 0x01, // phase 0
        0x90, 0x14, 0x14, 0x00, 0x00, 0x01, // phase 1
        0x20, 0x14, 0x0A, 0x00, 0x00, 0x01, // phase 2
        0x50, 0x13, 0x01, 0x00, 0x00, 0x01, // phase 3
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // phase 4
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // phase 5
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // phase 6
    ];

    /// Create and initialize the display driver
    pub fn new(spi: SPI, busy: BSY, dc: DC, rst: RST, delay: DELAY) -> Result<Self, DisplayError>
    where
        Self: Sized,
    {
        let interface = DisplayInterface::new(spi, busy, dc, rst, delay);
        let mut il0373 = Il0373 { interface };
        il0373.init()?;
        Ok(il0373)
    }

    /// Power-on initialization for the four-grey mode
    pub fn init(&mut self) -> Result<(), DisplayError> {
        log::info!("Initializing e-paper display for four grey levels");

        self.interface.reset()?;

        self.interface.cmd_with_data(
            Cmd::POWER_SETTING,
            &[
                Flag::POWER_VDS_VDG_INTERNAL,
                Flag::POWER_VCOM_VGHL_LV,
                Flag::POWER_VDH_11V,
                Flag::POWER_VDL_11V,
                Flag::POWER_VDHR_4V2,
            ],
        )?;

        self.interface.cmd_with_data(
            Cmd::BOOSTER_SOFT_START,
            &[
                Flag::BOOSTER_PHASE_DEFAULT,
                Flag::BOOSTER_PHASE_DEFAULT,
                Flag::BOOSTER_PHASE_DEFAULT,
            ],
        )?;

        self.interface.cmd(Cmd::POWER_ON)?;
        self.interface.wait_busy_high();

        // Register LUTs, required for the grey waveforms
        self.interface
            .cmd_with_data(Cmd::PANEL_SETTING, &[Flag::PANEL_LUT_FROM_REGISTER])?;

        self.interface
            .cmd_with_data(Cmd::PLL_CONTROL, &[Flag::PLL_100_HZ])?;

        // Native portrait resolution: width, then height as two bytes
        self.interface.cmd_with_data(
            Cmd::RESOLUTION_SETTING,
            &[WIDTH as u8, (HEIGHT >> 8) as u8, (HEIGHT & 0xFF) as u8],
        )?;

        self.interface
            .cmd_with_data(Cmd::VCM_DC_SETTING, &[Flag::VCM_DC_MINUS_1V0])?;

        self.interface.cmd_with_data(
            Cmd::VCOM_DATA_INTERVAL,
            &[Flag::VCOM_DATA_INTERVAL_GREY],
        )?;

        self.set_grey_lut()?;

        Ok(())
    }

    /// Upload the waveform tables for the four-grey refresh
    fn set_grey_lut(&mut self) -> Result<(), DisplayError> {
        self.interface
            .cmd_with_data(Cmd::LUT_VCOM, &Self::LUT_VCOM_GREY)?;
        self.interface
            .cmd_with_data(Cmd::LUT_WHITE_TO_WHITE, &Self::LUT_WW_GREY)?;
        self.interface
            .cmd_with_data(Cmd::LUT_BLACK_TO_WHITE, &Self::LUT_BW_GREY)?;
        self.interface
            .cmd_with_data(Cmd::LUT_WHITE_TO_BLACK, &Self::LUT_WB_GREY)?;
        self.interface
            .cmd_with_data(Cmd::LUT_BLACK_TO_BLACK, &Self::LUT_BB_GREY)
    }

    /// Send both bit planes to controller RAM.
    ///
    /// Each plane must be exactly one frame, `PLANE_BYTES` long. Nothing
    /// shows until [`Il0373::display_frame`] runs.
    pub fn update_frame(&mut self, plane1: &[u8], plane2: &[u8]) -> Result<(), DisplayError> {
        if plane1.len() != PLANE_BYTES || plane2.len() != PLANE_BYTES {
            log::error!(
                "Bad plane size: {} / {} bytes, expected {}",
                plane1.len(),
                plane2.len(),
                PLANE_BYTES
            );
            return Err(DisplayError::OutOfBoundsError);
        }

        self.interface.cmd(Cmd::DATA_START_TRANSMISSION_1)?;
        self.interface.data_chunked(plane1)?;
        self.interface.delay.delay_ms(2);

        self.interface.cmd(Cmd::DATA_START_TRANSMISSION_2)?;
        self.interface.data_chunked(plane2)?;
        self.interface.delay.delay_ms(2);

        Ok(())
    }

    /// Trigger a full refresh and wait for it to finish
    pub fn display_frame(&mut self) -> Result<(), DisplayError> {
        self.interface.cmd(Cmd::DISPLAY_REFRESH)?;
        // Datasheet asks for >=200us between refresh and the busy poll
        self.interface.delay.delay_ms(1);
        self.interface.wait_busy_high();
        Ok(())
    }

    /// Blank both RAM planes to white without refreshing
    pub fn clear_frame(&mut self) -> Result<(), DisplayError> {
        self.interface.cmd(Cmd::DATA_START_TRANSMISSION_1)?;
        self.interface.data_x_times(0xFF, PLANE_BYTES as u32)?;
        self.interface.delay.delay_ms(2);

        self.interface.cmd(Cmd::DATA_START_TRANSMISSION_2)?;
        self.interface.data_x_times(0xFF, PLANE_BYTES as u32)?;
        self.interface.delay.delay_ms(2);

        Ok(())
    }

    /// Power down the panel and enter deep sleep.
    ///
    /// The controller stops responding afterwards; `wake_up` runs the full
    /// reset and init sequence again.
    pub fn sleep(&mut self) -> Result<(), DisplayError> {
        // Float the border and disconnect the source before power off,
        // otherwise the panel greys out over a long sleep
        self.interface.cmd_with_data(
            Cmd::VCOM_DATA_INTERVAL,
            &[Flag::VCOM_DATA_INTERVAL_DEFAULT],
        )?;
        self.interface.cmd(Cmd::POWER_OFF)?;
        self.interface.wait_busy_high();
        self.interface.deep_sleep()
    }

    /// Wake from deep sleep and reinitialize
    pub fn wake_up(&mut self) -> Result<(), DisplayError> {
        self.init()
    }
}
