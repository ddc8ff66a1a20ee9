// ============================================================
// Layer 6 — Learning Curve
// ============================================================
// Renders the run log as a PNG line chart: training loss in blue,
// validation loss in red, both against the iteration counter.
// The y axis spans [0, max loss]; an empty log still produces a
// chart with bare axes so the file always exists after a run.

use anyhow::{Context, Result};
use image::{Rgb, RgbImage};
use std::path::Path;

use crate::infra::metrics::LogEntry;

pub const WIDTH:  u32 = 640;
pub const HEIGHT: u32 = 400;
const MARGIN: u32 = 40;

const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
const AXIS:       Rgb<u8> = Rgb([0, 0, 0]);
const GRID:       Rgb<u8> = Rgb([225, 225, 225]);
const TRAIN:      Rgb<u8> = Rgb([31, 119, 180]);
const VAL:        Rgb<u8> = Rgb([214, 39, 40]);

pub fn render_learning_curve(entries: &[LogEntry], path: &Path) -> Result<()> {
    let img = draw(entries);
    img.save(path)
        .with_context(|| format!("Cannot write learning curve to '{}'", path.display()))?;
    tracing::debug!("Learning curve written to '{}'", path.display());
    Ok(())
}

pub fn draw(entries: &[LogEntry]) -> RgbImage {
    let mut img = RgbImage::from_pixel(WIDTH, HEIGHT, BACKGROUND);
    let (left, right)  = (MARGIN as i64, (WIDTH - MARGIN / 2) as i64);
    let (top, bottom)  = ((MARGIN / 2) as i64, (HEIGHT - MARGIN) as i64);

    for i in 1..5 {
        let y = bottom - (bottom - top) * i / 5;
        line(&mut img, (left, y), (right, y), GRID);
    }
    line(&mut img, (left, bottom), (right, bottom), AXIS);
    line(&mut img, (left, bottom), (left, top), AXIS);

    let finite = |v: f64| v.is_finite().then_some(v);
    let max_loss = entries
        .iter()
        .flat_map(|e| [finite(e.train_loss), finite(e.val_loss)])
        .flatten()
        .fold(0.0f64, f64::max);
    let max_iter = entries.iter().map(|e| e.iteration).max().unwrap_or(0);
    if max_loss <= 0.0 || max_iter == 0 {
        return img;
    }

    let to_px = |iteration: usize, loss: f64| -> (i64, i64) {
        let x = left + ((right - left) as f64 * iteration as f64 / max_iter as f64).round() as i64;
        let y = bottom - ((bottom - top) as f64 * loss / max_loss).round() as i64;
        (x, y)
    };

    for (series, colour) in [
        (entries.iter().map(|e| (e.iteration, e.train_loss)).collect::<Vec<_>>(), TRAIN),
        (entries.iter().map(|e| (e.iteration, e.val_loss)).collect::<Vec<_>>(), VAL),
    ] {
        let points: Vec<(i64, i64)> = series
            .into_iter()
            .filter(|(_, loss)| loss.is_finite())
            .map(|(it, loss)| to_px(it, loss))
            .collect();
        for p in &points {
            marker(&mut img, *p, colour);
        }
        for pair in points.windows(2) {
            line(&mut img, pair[0], pair[1], colour);
        }
    }
    img
}

/// Bresenham line, clipped to the canvas.
fn line(img: &mut RgbImage, (x0, y0): (i64, i64), (x1, y1): (i64, i64), colour: Rgb<u8>) {
    let (dx, dy) = ((x1 - x0).abs(), -(y1 - y0).abs());
    let (sx, sy) = (if x0 < x1 { 1 } else { -1 }, if y0 < y1 { 1 } else { -1 });
    let (mut x, mut y, mut err) = (x0, y0, dx + dy);
    loop {
        put(img, x, y, colour);
        if x == x1 && y == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}

fn marker(img: &mut RgbImage, (cx, cy): (i64, i64), colour: Rgb<u8>) {
    for y in cy - 2..=cy + 2 {
        for x in cx - 2..=cx + 2 {
            put(img, x, y, colour);
        }
    }
}

fn put(img: &mut RgbImage, x: i64, y: i64, colour: Rgb<u8>) {
    if x >= 0 && y >= 0 && (x as u32) < img.width() && (y as u32) < img.height() {
        img.put_pixel(x as u32, y as u32, colour);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(iteration: usize, train_loss: f64, val_loss: f64) -> LogEntry {
        LogEntry { epoch: 1, iteration, train_loss, val_loss, val_psnr: 0.0, val_ssim: 0.0 }
    }

    fn count(img: &RgbImage, colour: Rgb<u8>) -> usize {
        img.pixels().filter(|p| **p == colour).count()
    }

    #[test]
    fn test_empty_log_draws_axes_only() {
        let img = draw(&[]);
        assert_eq!(img.dimensions(), (WIDTH, HEIGHT));
        assert!(count(&img, AXIS) > 0);
        assert_eq!(count(&img, TRAIN), 0);
    }

    #[test]
    fn test_both_series_are_drawn() {
        let img = draw(&[entry(10, 0.4, 0.5), entry(20, 0.2, 0.3)]);
        assert!(count(&img, TRAIN) > 0);
        assert!(count(&img, VAL) > 0);
    }

    #[test]
    fn test_nan_losses_are_skipped() {
        let img = draw(&[entry(5, f64::NAN, 0.5)]);
        assert_eq!(count(&img, TRAIN), 0);
        assert!(count(&img, VAL) > 0);
    }

    #[test]
    fn test_png_is_written() {
        let tmp  = tempfile::tempdir().unwrap();
        let path = tmp.path().join("curve.png");
        render_learning_curve(&[entry(1, 0.1, 0.2)], &path).unwrap();
        assert_eq!(image::open(&path).unwrap().to_rgb8().dimensions(), (WIDTH, HEIGHT));
    }
}
