//! Contribution graph layout
//!
//! Turns a flat series of daily contribution counts into a grid of shaded
//! cells sized for a fixed e-paper canvas, plus the derived stats shown in
//! the overlay (current streak, total, best day).
//!
//! The layout itself is pure: it touches no hardware and allocates only the
//! cell list. Painting the cells is the render module's job.

/// Shades for the five activity tiers, packed RGB.
///
/// The panel only has four grey levels; the render layer quantizes these by
/// luminance when painting. Keeping packed RGB here means the layout output
/// is independent of any particular panel.
pub struct Shade;
#[allow(missing_docs)]
impl Shade {
    pub const NONE: u32 = 0xEEEEEE;
    pub const LOW: u32 = 0xAAAAAA;
    pub const MEDIUM: u32 = 0x777777;
    pub const HIGH: u32 = 0x333333;
    pub const MAX: u32 = 0x000000;
}

/// Grid dimensions and placement for one panel.
///
/// All fields are pixel counts except `weeks` and `days_per_week`. The
/// horizontal origin is derived by centering the grid on the canvas; the
/// vertical origin is the fixed `top_margin`. Nothing is clamped: a grid
/// wider than the canvas starts at a negative x and simply runs off the
/// panel edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayGeometry {
    /// Week columns kept on screen; older weeks are dropped
    pub weeks: usize,
    /// Day rows per column
    pub days_per_week: usize,
    /// Cell width in pixels
    pub cell_width: u32,
    /// Cell height in pixels
    pub cell_height: u32,
    /// Horizontal and vertical spacing between cells
    pub gap: u32,
    /// Canvas width in pixels
    pub canvas_width: u32,
    /// Canvas height in pixels
    pub canvas_height: u32,
    /// Fixed vertical offset of the first row
    pub top_margin: i32,
}

impl DisplayGeometry {
    /// 8x8 cells, 32 weeks (~7.5 months). Fills the 296x128 panel width.
    pub const WIDE: DisplayGeometry = DisplayGeometry {
        weeks: 32,
        days_per_week: 7,
        cell_width: 8,
        cell_height: 8,
        gap: 1,
        canvas_width: 296,
        canvas_height: 128,
        top_margin: 3,
    };

    /// 16x16 cells, 17 weeks (~4 months), for a 400x300 panel.
    pub const LARGE: DisplayGeometry = DisplayGeometry {
        weeks: 17,
        days_per_week: 7,
        cell_width: 16,
        cell_height: 16,
        gap: 1,
        canvas_width: 400,
        canvas_height: 300,
        top_margin: 3,
    };

    /// Total grid width in pixels, gaps included.
    pub const fn graph_width(&self) -> u32 {
        self.weeks as u32 * self.cell_width + (self.weeks as u32 - 1) * self.gap
    }

    /// Total grid height in pixels, gaps included.
    pub const fn graph_height(&self) -> u32 {
        self.days_per_week as u32 * self.cell_height + (self.days_per_week as u32 - 1) * self.gap
    }

    /// Days the grid can show at most.
    pub const fn window_days(&self) -> usize {
        self.weeks * self.days_per_week
    }
}

/// One day on the grid: a filled rectangle in panel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
    /// Packed RGB fill, one of the [`Shade`] values
    pub color: u32,
}

/// Scalars derived from the full series, shown in the overlay.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    /// Sum over every day of the input
    pub total: u32,
    /// Highest single-day count, 0 for an empty series
    pub best: u32,
    /// Consecutive non-zero days ending at the most recent day
    pub streak: u32,
}

impl Stats {
    /// Compute stats over a full series, oldest day first.
    ///
    /// Always covers the whole input, never the display window: a long
    /// streak keeps counting even when its older days have scrolled off
    /// the grid.
    pub fn of(series: &[u32]) -> Stats {
        let total = series.iter().sum();
        let best = series.iter().copied().max().unwrap_or(0);
        let streak = series.iter().rev().take_while(|&&count| count > 0).count() as u32;
        Stats {
            total,
            best,
            streak,
        }
    }
}

/// Pick the shade tier for one day.
///
/// Tiers are relative to the highest count visible on the grid, not to any
/// global scale. Boundaries are inclusive, so a count sitting exactly on a
/// quarter of the maximum takes the lighter tier.
pub fn shade(count: u32, max_value: u32) -> u32 {
    let c = count as f64;
    let m = max_value as f64;
    if count == 0 {
        Shade::NONE
    } else if c <= 0.25 * m {
        Shade::LOW
    } else if c <= 0.50 * m {
        Shade::MEDIUM
    } else if c <= 0.75 * m {
        Shade::HIGH
    } else {
        Shade::MAX
    }
}

/// Lay the series out as week columns on the given panel geometry.
///
/// The series is oldest-first, one count per day. Only the most recent
/// `weeks * days_per_week` days become cells; the stats still cover the
/// whole input. Cells come back week-major then day-minor, matching the
/// left-to-right, top-to-bottom column scan an observer reads.
pub fn layout(series: &[u32], geometry: &DisplayGeometry) -> (Vec<Cell>, Stats) {
    let stats = Stats::of(series);

    // Chunk into week columns; the last column may be short, no padding.
    let mut week_data: Vec<&[u32]> = series.chunks(geometry.days_per_week).collect();

    // Keep only the newest columns that fit.
    if week_data.len() > geometry.weeks {
        week_data.drain(..week_data.len() - geometry.weeks);
    }

    // Shade tiers scale against the windowed maximum. An empty or all-zero
    // window divides by 1 so the zero tier is the only one ever hit.
    let max_value = week_data
        .iter()
        .flat_map(|week| week.iter().copied())
        .max()
        .filter(|&m| m > 0)
        .unwrap_or(1);

    let start_x = (geometry.canvas_width as i32 - geometry.graph_width() as i32).div_euclid(2);
    let start_y = geometry.top_margin;

    let step_x = (geometry.cell_width + geometry.gap) as i32;
    let step_y = (geometry.cell_height + geometry.gap) as i32;

    let mut cells = Vec::with_capacity(series.len().min(geometry.window_days()));
    for (week_idx, week) in week_data.iter().enumerate() {
        for (day_idx, &count) in week.iter().enumerate() {
            cells.push(Cell {
                x: start_x + week_idx as i32 * step_x,
                y: start_y + day_idx as i32 * step_y,
                width: geometry.cell_width,
                height: geometry.cell_height,
                color: shade(count, max_value),
            });
        }
    }

    (cells, stats)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn one_week_geometry() -> DisplayGeometry {
        DisplayGeometry {
            weeks: 1,
            days_per_week: 7,
            cell_width: 8,
            cell_height: 8,
            gap: 1,
            canvas_width: 63,
            canvas_height: 128,
            top_margin: 3,
        }
    }

    #[test]
    fn empty_series_renders_nothing() {
        let (cells, stats) = layout(&[], &DisplayGeometry::WIDE);
        assert!(cells.is_empty());
        assert_eq!(
            stats,
            Stats {
                total: 0,
                best: 0,
                streak: 0
            }
        );
    }

    #[test]
    fn stats_cover_the_whole_series() {
        let series = [4, 0, 9, 1, 1];
        let stats = Stats::of(&series);
        assert_eq!(stats.total, 15);
        assert_eq!(stats.best, 9);
        assert_eq!(stats.streak, 2);
    }

    #[test]
    fn streak_stops_at_first_zero_from_the_end() {
        assert_eq!(Stats::of(&[7, 0, 3, 5]).streak, 2);
        assert_eq!(Stats::of(&[3, 0]).streak, 0);
        assert_eq!(Stats::of(&[1, 2, 3, 4]).streak, 4);
    }

    #[test]
    fn truncation_keeps_the_newest_window_but_not_for_stats() {
        // 20 weeks of data on a 17 week panel: 21 days fall off the front.
        let mut series = vec![1u32; 140];
        series[0] = 50; // oldest day, outside the window
        let (cells, stats) = layout(&series, &DisplayGeometry::LARGE);

        assert_eq!(cells.len(), 17 * 7);
        assert_eq!(stats.total, 139 + 50);
        assert_eq!(stats.best, 50);
        assert_eq!(stats.streak, 140);

        // The dropped 50 must not affect shading: windowed max is 1, so
        // every remaining day is at the full tier.
        assert!(cells.iter().all(|c| c.color == Shade::MAX));
    }

    #[test]
    fn shade_boundaries_are_inclusive() {
        assert_eq!(shade(0, 20), Shade::NONE);
        assert_eq!(shade(5, 20), Shade::LOW); // exactly 0.25 * 20
        assert_eq!(shade(6, 20), Shade::MEDIUM);
        assert_eq!(shade(10, 20), Shade::MEDIUM); // exactly 0.50 * 20
        assert_eq!(shade(15, 20), Shade::HIGH); // exactly 0.75 * 20
        assert_eq!(shade(16, 20), Shade::MAX);
        assert_eq!(shade(20, 20), Shade::MAX);
    }

    #[test]
    fn all_zero_window_stays_on_the_empty_shade() {
        let series = vec![0u32; 64];
        let (cells, _) = layout(&series, &DisplayGeometry::WIDE);
        assert_eq!(cells.len(), 64);
        assert!(cells.iter().all(|c| c.color == Shade::NONE));
    }

    #[test]
    fn one_week_column_lays_out_top_to_bottom() {
        let series = [0, 1, 2, 3, 4, 5, 6];
        let (cells, stats) = layout(&series, &one_week_geometry());

        assert_eq!(stats.best, 6);
        assert_eq!(cells.len(), 7);

        // Centered: (63 - 8) / 2 = 27.
        assert!(cells.iter().all(|c| c.x == 27));
        let ys: Vec<i32> = cells.iter().map(|c| c.y).collect();
        assert_eq!(ys, vec![3, 12, 21, 30, 39, 48, 57]);

        // max = 6: quarter points at 1.5 / 3.0 / 4.5.
        let colors: Vec<u32> = cells.iter().map(|c| c.color).collect();
        assert_eq!(
            colors,
            vec![
                Shade::NONE,
                Shade::LOW,
                Shade::MEDIUM,
                Shade::MEDIUM,
                Shade::HIGH,
                Shade::MAX,
                Shade::MAX,
            ]
        );
    }

    #[test]
    fn emission_order_is_week_major() {
        let series = [1u32; 14];
        let geometry = DisplayGeometry {
            weeks: 2,
            canvas_width: 100,
            ..one_week_geometry()
        };
        let (cells, _) = layout(&series, &geometry);
        assert_eq!(cells.len(), 14);
        // First seven cells share the first column's x, then it advances.
        assert!(cells[..7].iter().all(|c| c.x == cells[0].x));
        assert_eq!(cells[7].x, cells[0].x + 9);
        assert_eq!(cells[7].y, cells[0].y);
    }

    #[test]
    fn oversized_grid_goes_negative_without_clamping() {
        let geometry = DisplayGeometry {
            canvas_width: 40,
            ..one_week_geometry()
        };
        let (cells, _) = layout(&[1, 1, 1, 1, 1, 1, 1], &geometry);
        // (40 - 8) / 2 = 16 for a single column; widen to force negative:
        let wide = DisplayGeometry {
            weeks: 8,
            canvas_width: 40,
            ..one_week_geometry()
        };
        let (wide_cells, _) = layout(&vec![1u32; 56], &wide);
        assert_eq!(cells[0].x, 16);
        // graph is 8*8 + 7 = 71 wide: (40 - 71) floor-div 2 = -16.
        assert_eq!(wide_cells[0].x, -16);
    }

    #[test]
    fn short_last_week_is_not_padded() {
        let series = [1u32; 10];
        let geometry = DisplayGeometry {
            weeks: 4,
            canvas_width: 100,
            ..one_week_geometry()
        };
        let (cells, _) = layout(&series, &geometry);
        assert_eq!(cells.len(), 10);
    }
}
