//! IL0373 ePaper Display Driver
//!
//! Drives the 2.9" 296x128 greyscale panel found on MagTag-class boards.
//!
//! This driver is losely modeled after the
//! [epd-waveshare](https://github.com/caemor/epd-waveshare) drivers but built for my needs.
//! The IL0373 runs four grey levels by uploading two bit planes and a
//! register LUT, so the frame workflow is:
//!
//! 1. draw onto a [`graphics::Display2in9`] buffer, preferably
//! with [`embedded_graphics`](https://github.com/jamwaffles/embedded-graphics).
//! 1. send both planes to the controller using [`driver::Il0373::update_frame`]
//! 1. kick off a refresh using [`driver::Il0373::display_frame`]
//!
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]

pub mod color;
pub mod driver;

mod cmd;
mod flag;
pub mod graphics;

/// Display height, pixels vertically in the native portrait orientation
pub const HEIGHT: u16 = 296;

/// Display width, pixels horizontally in the native portrait orientation
pub const WIDTH: u16 = 128;

/// Bytes in one bit plane of the frame buffer
pub const PLANE_BYTES: usize = (WIDTH as usize / 8) * HEIGHT as usize;

pub mod interface;
pub mod pins;
