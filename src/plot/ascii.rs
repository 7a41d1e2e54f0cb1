//! ASCII plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - samples: `o`
//! - best fitted curve: `*`
//! - second-best fitted curve: `.`

use crate::domain::{Factor, Sample};
use crate::models;

/// Curve glyphs, best fit first.
const CURVE_GLYPHS: [char; 2] = ['*', '.'];

/// Render samples with up to two fitted curves from `factors` (best first).
pub fn render_ascii_plot(samples: &[Sample], factors: &[Factor], width: usize, height: usize) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let (x_min, x_max) = size_range(samples).unwrap_or((0.0, 1.0));
    // The y-range follows the samples; curves that leave it are clipped.
    let (y_min, y_max) = duration_range(samples).unwrap_or((0.0, 1.0));
    let (y_min, y_max) = pad_range(y_min, y_max, 0.05);

    let mut grid = vec![vec![' '; width]; height];

    // Best curve first: later curves only fill blank cells.
    let curves: Vec<(&Factor, char)> = factors.iter().zip(CURVE_GLYPHS).collect();
    for &(factor, glyph) in &curves {
        let points = sample_curve(factor, x_min, x_max, width);
        draw_curve(&mut grid, &points, x_min, x_max, y_min, y_max, glyph);
    }

    for s in samples {
        let x = map_x(s.size as f64, x_min, x_max, width);
        let y = map_y(s.duration, y_min, y_max, height);
        grid[y][x] = 'o';
    }

    let mut out = String::new();
    out.push_str(&format!(
        "Plot: size=[{x_min:.0}, {x_max:.0}] | time=[{y_min:.6}, {y_max:.6}]s\n"
    ));

    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }

    out.push_str("o samples\n");
    for (factor, glyph) in curves {
        out.push_str(&format!("{glyph} {}\n", factor.model.description()));
    }

    out
}

fn size_range(samples: &[Sample]) -> Option<(f64, f64)> {
    let min = samples.iter().map(|s| s.size).min()? as f64;
    let max = samples.iter().map(|s| s.size).max()? as f64;
    if max > min {
        Some((min, max))
    } else {
        Some((min - 0.5, max + 0.5))
    }
}

fn duration_range(samples: &[Sample]) -> Option<(f64, f64)> {
    let mut min_y = f64::INFINITY;
    let mut max_y = f64::NEG_INFINITY;
    for s in samples {
        min_y = min_y.min(s.duration);
        max_y = max_y.max(s.duration);
    }
    if min_y.is_finite() && max_y.is_finite() && max_y >= min_y {
        Some((min_y, max_y))
    } else {
        None
    }
}

fn sample_curve(factor: &Factor, x_min: f64, x_max: f64, n: usize) -> Vec<(f64, f64)> {
    let n = n.max(2);
    let mut out = Vec::with_capacity(n);
    for i in 0..n {
        let u = i as f64 / (n as f64 - 1.0);
        let x = x_min + u * (x_max - x_min);
        out.push((x, models::time(factor.model, x, factor.a1, factor.a0)));
    }
    out
}

fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    let span = (max - min).abs();
    let pad = (span * frac).max(1e-12);
    (min - pad, max + pad)
}

fn map_x(x: f64, x_min: f64, x_max: f64, width: usize) -> usize {
    let width = width.max(2);
    let u = ((x - x_min) / (x_max - x_min)).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(y: f64, y_min: f64, y_max: f64, height: usize) -> usize {
    let height = height.max(2);
    let u = ((y - y_min) / (y_max - y_min)).clamp(0.0, 1.0);
    // y=top is max -> row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

fn draw_curve(
    grid: &mut [Vec<char>],
    curve: &[(f64, f64)],
    x_min: f64,
    x_max: f64,
    y_min: f64,
    y_max: f64,
    glyph: char,
) {
    let height = grid.len();
    let width = grid[0].len();

    let mut prev = None;
    for &(x, y) in curve {
        // Overflowed predictions break the line.
        if !y.is_finite() {
            prev = None;
            continue;
        }
        let xx = map_x(x, x_min, x_max, width);
        let yy = map_y(y, y_min, y_max, height);
        match prev {
            Some((x0, y0)) => draw_line(grid, x0, y0, xx, yy, glyph),
            None if grid[yy][xx] == ' ' => grid[yy][xx] = glyph,
            None => {}
        }
        prev = Some((xx, yy));
    }
}

/// Integer line drawing (Bresenham-ish).
fn draw_line(grid: &mut [Vec<char>], x0: usize, y0: usize, x1: usize, y1: usize, ch: char) {
    let mut x0 = x0 as isize;
    let mut y0 = y0 as isize;
    let x1 = x1 as isize;
    let y1 = y1 as isize;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if y0 >= 0
            && (y0 as usize) < grid.len()
            && x0 >= 0
            && (x0 as usize) < grid[0].len()
            && grid[y0 as usize][x0 as usize] == ' '
        {
            grid[y0 as usize][x0 as usize] = ch;
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}
