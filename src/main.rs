use anyhow::Result;

use embedded_graphics::prelude::*;

use log::{error, info};

mod config;
mod github;
mod graph;
mod il0373;
mod render;
mod synthetic;
mod wifi;

pub use crate::il0373::driver::Il0373;
pub use crate::il0373::graphics::{Display2in9, DisplayRotation};
pub use crate::il0373::pins::Pins;

use crate::il0373::color::Grey;

use esp_idf_svc::hal::delay::Delay;
use esp_idf_svc::hal::modem::Modem;
use esp_idf_svc::hal::peripherals::Peripherals;

use esp_idf_svc::hal::gpio;
use esp_idf_svc::hal::prelude::*;
use esp_idf_svc::hal::spi;

// Include the pre-converted logo image binary data (generated at build time)
const LOGO_IMAGE: &[u8] = include_bytes!(concat!(env!("OUT_DIR"), "/logo.bin"));

/// Microseconds since boot, used to seed the fallback generator so the
/// picture still varies from wake to wake
fn boot_seed() -> u64 {
    unsafe { esp_idf_svc::sys::esp_timer_get_time() as u64 }
}

/// Fetch the real calendar, or explain why not.
///
/// Takes the modem by value: WiFi only exists while this runs, and the
/// radio is down again before the display starts drawing.
fn fetch_series(modem: Modem) -> Result<Vec<u32>> {
    let token = config::github_token()
        .ok_or_else(|| anyhow::anyhow!("no GitHub token configured, see config.rs"))?;

    let networks: Vec<wifi::WifiNetwork> = config::WIFI_NETWORKS
        .iter()
        .map(|&(ssid, password)| wifi::WifiNetwork::new(ssid, password))
        .collect();

    let connection = wifi::connect_any(modem, &networks)?;
    info!("Fetching over {}", connection.network.ssid);

    let data = github::fetch_contributions(config::GITHUB_USER, token)?;
    Ok(data.series)
}

/// Contribution counts for this wake cycle, one per day, oldest first
fn acquire_series(modem: Modem) -> Vec<u32> {
    if config::USE_FAKE_DATA {
        info!("Networking disabled, generating fake contribution data");
        return synthetic::contribution_series(boot_seed());
    }

    match fetch_series(modem) {
        Ok(series) => series,
        Err(e) => {
            error!("Failed to fetch data, falling back to fake data: {:#}", e);
            synthetic::contribution_series(boot_seed())
        }
    }
}

// https://docs.esp-rs.org/esp-idf-svc/esp_idf_svc/
fn main() -> Result<()> {
    // It is necessary to call this function once. Otherwise some patches to the runtime
    // implemented by esp-idf-sys might not link properly. See https://github.com/esp-rs/esp-idf-template/issues/71
    esp_idf_svc::sys::link_patches();

    // Bind the log crate to the ESP Logging facilities
    esp_idf_svc::log::EspLogger::initialize_default();

    info!("GitHub contribution graph for {}", config::GITHUB_USER);

    let wakeup_reason = esp_idf_svc::hal::reset::WakeupReason::get();
    info!("Wakeup reason: {:?}", wakeup_reason);

    let peripherals = Peripherals::take().expect("Could not take peripherals");
    let pins = peripherals.pins;

    // Data first: the fetch happens before the panel powers up, so a slow
    // network never shows a half-initialized screen
    let series = acquire_series(peripherals.modem);
    let (cells, stats) = graph::layout(&series, &config::GEOMETRY);
    info!(
        "Stats - Streak: {}, Total: {}, Best: {}",
        stats.streak, stats.total, stats.best
    );

    let mut driver = spi::SpiDeviceDriver::new_single(
        peripherals.spi2,
        pins.gpio12,                    // SCK - Pins::SCK
        pins.gpio11,                    // MOSI - Pins::MOSI
        Option::<gpio::AnyIOPin>::None, // No MISO needed for display
        Some(pins.gpio45),              // CS - Pins::CS
        &spi::SpiDriverConfig::new(),
        &spi::SpiConfig::new().baudrate(4.MHz().into()),
    )
    .expect("Could not create SPI device driver");

    // Enable display power explicitly
    info!("Enabling display power (pin {})", Pins::PWR);
    let mut power_pin = gpio::PinDriver::output(pins.gpio7).expect("Failed to set pin 7 as output");
    power_pin.set_high().expect("Failed to set power pin high");

    let delay = Delay::default();
    delay.delay_ms(100); // Wait for power to stabilize

    info!("Creating display driver");
    let mut epd = Il0373::new(
        &mut driver,
        gpio::PinDriver::input(pins.gpio48).expect("Failed to set busy pin as input"), // Pins::BSY
        gpio::PinDriver::output(pins.gpio46).expect("Failed to set dc pin as output"), // Pins::DC
        gpio::PinDriver::output(pins.gpio47).expect("Failed to set rst pin as output"), // Pins::RST
        delay,
    )
    .map_err(|e| anyhow::anyhow!("Could not create EPD driver: {:?}", e))?;

    // Draw in landscape; the panel RAM is portrait
    let mut display = Display2in9::new();
    display.set_rotation(DisplayRotation::Rotate270);
    display.clear(Grey::White)?;

    render::draw_calendar(
        &mut display,
        &cells,
        &stats,
        config::GITHUB_USER,
        LOGO_IMAGE,
        &config::GEOMETRY,
        config::EXTENDED_OVERLAY,
    )?;

    info!("Writing frame to display");
    epd.update_frame(display.plane1(), display.plane2())
        .map_err(|e| anyhow::anyhow!("Failed to write frame: {:?}", e))?;
    epd.display_frame()
        .map_err(|e| anyhow::anyhow!("Failed to refresh display: {:?}", e))?;

    info!("Display updated successfully");

    epd.sleep()
        .map_err(|e| anyhow::anyhow!("Failed to put display to sleep: {:?}", e))?;

    info!(
        "Going to deep sleep for {} seconds",
        config::UPDATE_INTERVAL_SECS
    );
    unsafe {
        esp_idf_svc::sys::esp_sleep_enable_timer_wakeup(config::UPDATE_INTERVAL_SECS * 1_000_000);
        esp_idf_svc::sys::esp_deep_sleep_start();
        // Software reset on wake!
    }
}
