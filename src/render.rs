//! Presentation layer
//!
//! Paints the laid-out calendar onto a frame buffer: the cell grid, the
//! username pill with the GitHub logo above it, and optionally the
//! streak/total/best numbers. Everything here draws into memory; one
//! hardware refresh happens afterwards in main.

use core::convert::Infallible;

use embedded_graphics::image::{Image, ImageRaw};
use embedded_graphics::mono_font::iso_8859_15::{FONT_10X20 as ISO15_10, FONT_5X8};
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{
    PrimitiveStyle, PrimitiveStyleBuilder, Rectangle, RoundedRectangle,
};
use embedded_graphics::text::{Alignment, Text};
use log::{info, warn};

use crate::graph::{Cell, DisplayGeometry, Stats};
use crate::il0373::color::Grey;

/// Logo bitmap edge length in pixels, 2 bits per pixel
pub const LOGO_SIZE: u32 = 40;

/// Approximate glyph advance of the pill font, used to size the pill
const PILL_CHAR_WIDTH: u32 = 6;

/// Paint the full calendar page.
///
/// `logo` is the build-time converted bitmap; an empty slice (logo missing
/// at build time) just skips it. With `extended` off only the grid and the
/// username pill are drawn.
pub fn draw_calendar<D>(
    display: &mut D,
    cells: &[Cell],
    stats: &Stats,
    username: &str,
    logo: &[u8],
    geometry: &DisplayGeometry,
    extended: bool,
) -> Result<(), Infallible>
where
    D: DrawTarget<Color = Grey, Error = Infallible>,
{
    draw_cells(display, cells)?;
    draw_logo(display, logo, username, geometry)?;
    draw_username_pill(display, username, geometry)?;
    if extended {
        draw_stats(display, stats, geometry)?;
    }
    Ok(())
}

/// Paint every cell as a filled rectangle
fn draw_cells<D>(display: &mut D, cells: &[Cell]) -> Result<(), Infallible>
where
    D: DrawTarget<Color = Grey, Error = Infallible>,
{
    info!("Drawing {} cells", cells.len());
    for cell in cells {
        Rectangle::new(
            Point::new(cell.x, cell.y),
            Size::new(cell.width, cell.height),
        )
        .into_styled(PrimitiveStyle::with_fill(Grey::from_rgb(cell.color)))
        .draw(display)?;
    }
    Ok(())
}

/// White rounded pill with the `@username` label, bottom left corner
fn draw_username_pill<D>(
    display: &mut D,
    username: &str,
    geometry: &DisplayGeometry,
) -> Result<(), Infallible>
where
    D: DrawTarget<Color = Grey, Error = Infallible>,
{
    let label = format!("@{}", username);
    let pill_width = label.len() as u32 * PILL_CHAR_WIDTH + 14;
    let pill_y = geometry.canvas_height as i32 - 15;

    let style = PrimitiveStyleBuilder::new()
        .fill_color(Grey::White)
        .stroke_color(Grey::Black)
        .stroke_width(1)
        .build();

    RoundedRectangle::with_equal_corners(
        Rectangle::new(Point::new(2, pill_y), Size::new(pill_width, 14)),
        Size::new(5, 5),
    )
    .into_styled(style)
    .draw(display)?;

    let text_style = MonoTextStyle::new(&FONT_5X8, Grey::Black);
    Text::new(
        &label,
        Point::new(6, geometry.canvas_height as i32 - 4),
        text_style,
    )
    .draw(display)?;

    Ok(())
}

/// GitHub logo centered above the pill, overlapping 4px into it
fn draw_logo<D>(
    display: &mut D,
    logo: &[u8],
    username: &str,
    geometry: &DisplayGeometry,
) -> Result<(), Infallible>
where
    D: DrawTarget<Color = Grey, Error = Infallible>,
{
    if logo.is_empty() {
        warn!("Logo bitmap not available, skipping");
        return Ok(());
    }

    let pill_width = (username.len() as u32 + 1) * PILL_CHAR_WIDTH + 14;
    let pill_center_x = 2 + pill_width as i32 / 2;
    let logo_x = pill_center_x - LOGO_SIZE as i32 / 2;
    let logo_y = geometry.canvas_height as i32 - 15 - LOGO_SIZE as i32 + 4;

    let raw = ImageRaw::<Grey>::new(logo, LOGO_SIZE);
    Image::new(&raw, Point::new(logo_x, logo_y)).draw(display)?;

    Ok(())
}

/// Streak / total / best as number-over-label pairs, bottom right
fn draw_stats<D>(
    display: &mut D,
    stats: &Stats,
    geometry: &DisplayGeometry,
) -> Result<(), Infallible>
where
    D: DrawTarget<Color = Grey, Error = Infallible>,
{
    let number_style = MonoTextStyle::new(&ISO15_10, Grey::Black);
    let label_style = MonoTextStyle::new(&FONT_5X8, Grey::Black);

    let number_y = geometry.canvas_height as i32 - 16;
    let label_y = geometry.canvas_height as i32 - 5;

    let columns = [
        (
            geometry.canvas_width as i32 - 96,
            stats.streak,
            "streak",
            Alignment::Center,
        ),
        (
            geometry.canvas_width as i32 - 46,
            stats.total,
            "total",
            Alignment::Center,
        ),
        (
            geometry.canvas_width as i32 - 6,
            stats.best,
            "best",
            Alignment::Right,
        ),
    ];

    for (x, value, label, alignment) in columns {
        Text::with_alignment(
            &value.to_string(),
            Point::new(x, number_y),
            number_style,
            alignment,
        )
        .draw(display)?;
        Text::with_alignment(label, Point::new(x, label_y), label_style, alignment)
            .draw(display)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{layout, DisplayGeometry, Shade};
    use crate::il0373::graphics::{Display2in9, DisplayRotation};

    fn landscape_display() -> Display2in9 {
        let mut display = Display2in9::new();
        display.set_rotation(DisplayRotation::Rotate270);
        display
    }

    #[test]
    fn cells_reach_the_buffer() {
        let mut display = landscape_display();
        let cells = [Cell {
            x: 0,
            y: 0,
            width: 8,
            height: 8,
            color: Shade::MAX,
        }];
        draw_cells(&mut display, &cells).unwrap();
        // Landscape origin maps to the last byte of the native first row
        assert_eq!(display.plane1()[15], 0x00);
    }

    #[test]
    fn empty_logo_is_skipped() {
        let mut display = landscape_display();
        draw_logo(&mut display, &[], "someone", &DisplayGeometry::WIDE).unwrap();
        assert!(display.plane1().iter().all(|&b| b == 0xFF));
    }

    #[test]
    fn full_page_draws_without_panicking() {
        let mut display = landscape_display();
        let series: Vec<u32> = (0..224).map(|d| (d % 9) as u32).collect();
        let (cells, stats) = layout(&series, &DisplayGeometry::WIDE);
        draw_calendar(
            &mut display,
            &cells,
            &stats,
            "ehippy",
            &[],
            &DisplayGeometry::WIDE,
            true,
        )
        .unwrap();
        // Something visible landed on the frame
        assert!(display.plane1().iter().any(|&b| b != 0xFF));
    }
}
