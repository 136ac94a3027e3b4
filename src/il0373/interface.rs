//! Display interface using SPI
use crate::il0373::cmd::Cmd;
use crate::il0373::flag::Flag;
use display_interface::DisplayError;
use embedded_hal::{
    delay::DelayNs,
    digital::{InputPin, OutputPin},
    spi::SpiDevice,
};

/// SPI transport and control pins for the IL0373.
///
/// BUSY on this controller is active low: the pin sits LOW while a refresh
/// or power transition runs and returns HIGH when the chip is idle.
pub struct DisplayInterface<SPI, BSY, DC, RST, DELAY> {
    /// SPI device
    spi: SPI,
    /// Low while busy, wait until high before the next command
    busy: BSY,
    /// Data/Command Control Pin (High for data, Low for command)
    dc: DC,
    /// Pin for resetting
    rst: RST,
    /// Delay provider, shared with the driver
    pub(crate) delay: DELAY,
}

impl<SPI, BSY, DC, RST, DELAY> DisplayInterface<SPI, BSY, DC, RST, DELAY>
where
    SPI: SpiDevice,
    BSY: InputPin,
    DC: OutputPin,
    RST: OutputPin,
    DELAY: DelayNs,
{
    /// Create the interface; nothing is sent until the driver initializes
    pub fn new(spi: SPI, busy: BSY, dc: DC, rst: RST, delay: DELAY) -> Self {
        DisplayInterface {
            spi,
            busy,
            dc,
            rst,
            delay,
        }
    }

    /// Basic function for sending commands
    pub(crate) fn cmd(&mut self, command: u8) -> Result<(), DisplayError> {
        // low for commands
        self.dc.set_low().map_err(|_| DisplayError::DCError)?;

        match self.spi.write(&[command]) {
            Ok(_) => Ok(()),
            Err(e) => {
                log::error!("SPI write error for command 0x{:02X}: {:?}", command, e);
                Err(DisplayError::BusWriteError)
            }
        }
    }

    /// Basic function for sending an array of u8-values of data over spi
    pub(crate) fn data(&mut self, data: &[u8]) -> Result<(), DisplayError> {
        // high for data
        self.dc.set_high().map_err(|_| DisplayError::DCError)?;
        self.spi.write(data).map_err(|_| DisplayError::BusWriteError)
    }

    /// Basic function for sending a command and the data belonging to it.
    pub(crate) fn cmd_with_data(&mut self, command: u8, data: &[u8]) -> Result<(), DisplayError> {
        self.cmd(command)?;
        self.data(data)
    }

    /// Send a full bit plane in chunks.
    ///
    /// Chunking keeps single SPI transactions short so the task watchdog
    /// stays fed during the ~4.7 KiB transfer.
    pub(crate) fn data_chunked(&mut self, data: &[u8]) -> Result<(), DisplayError> {
        const CHUNK_SIZE: usize = 64;

        self.dc.set_high().map_err(|_| DisplayError::DCError)?;
        for chunk in data.chunks(CHUNK_SIZE) {
            self.spi
                .write(chunk)
                .map_err(|_| DisplayError::BusWriteError)?;
        }
        Ok(())
    }

    /// Basic function for sending the same byte of data multiple times,
    /// used for blanking a whole plane
    pub(crate) fn data_x_times(&mut self, val: u8, repetitions: u32) -> Result<(), DisplayError> {
        const CHUNK_SIZE: usize = 64;
        let buffer = [val; CHUNK_SIZE];

        self.dc.set_high().map_err(|_| DisplayError::DCError)?;

        let full_chunks = (repetitions as usize) / CHUNK_SIZE;
        let remainder = (repetitions as usize) % CHUNK_SIZE;

        for _ in 0..full_chunks {
            self.spi
                .write(&buffer)
                .map_err(|_| DisplayError::BusWriteError)?;
        }
        if remainder > 0 {
            self.spi
                .write(&buffer[0..remainder])
                .map_err(|_| DisplayError::BusWriteError)?;
        }
        Ok(())
    }

    /// Wait for the busy pin to return HIGH with a safety timeout
    pub(crate) fn wait_busy_high(&mut self) {
        // A full refresh on this panel takes up to ~4 seconds. Poll with a
        // millisecond delay instead of spinning so the idle task runs.
        const MAX_WAIT_MS: u32 = 10_000;

        let mut waited = 0u32;
        while waited < MAX_WAIT_MS {
            match self.busy.is_high() {
                Ok(true) => return,
                Ok(false) => {
                    self.delay.delay_ms(1);
                    waited += 1;
                }
                Err(_) => {
                    log::error!("Error reading BUSY pin state - assuming not busy to continue");
                    return;
                }
            }
        }

        log::error!("Timeout waiting for BUSY pin to go HIGH after {} ms", waited);
        // Don't hang the program - just continue and hope for the best
    }

    /// Resets the device
    pub(crate) fn reset(&mut self) -> Result<(), DisplayError> {
        self.rst.set_high().map_err(|_| DisplayError::RSError)?;
        self.delay.delay_ms(20);
        self.rst.set_low().map_err(|_| DisplayError::RSError)?;
        self.delay.delay_ms(2);
        self.rst.set_high().map_err(|_| DisplayError::RSError)?;
        self.delay.delay_ms(20);
        Ok(())
    }

    /// Enter deep sleep; only a hardware reset wakes the controller again
    pub(crate) fn deep_sleep(&mut self) -> Result<(), DisplayError> {
        self.cmd_with_data(Cmd::DEEP_SLEEP, &[Flag::DEEP_SLEEP_CHECK])
    }
}
