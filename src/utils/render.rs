//! PNG rendering of filled grids

use crate::generate::Solution;
use anyhow::{Context, Result};
use image::{ImageFormat, Rgb, RgbImage};
use std::path::Path;

/// Side of one cell in pixels, border included
pub const CELL_SIZE: u32 = 100;
/// Dark gap drawn around every cell
pub const CELL_BORDER: u32 = 2;
/// Pixels per glyph dot
const GLYPH_SCALE: u32 = 8;
const GLYPH_WIDTH: u32 = 5;
const GLYPH_HEIGHT: u32 = 7;

const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
const BLACK: Rgb<u8> = Rgb([0, 0, 0]);

/// 5x7 dot patterns for A-Z, one byte per row, high bit on the left
const LETTERS: [[u8; 7]; 26] = [
    [0x0E, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11],
    [0x1E, 0x11, 0x11, 0x1E, 0x11, 0x11, 0x1E],
    [0x0E, 0x11, 0x10, 0x10, 0x10, 0x11, 0x0E],
    [0x1C, 0x12, 0x11, 0x11, 0x11, 0x12, 0x1C],
    [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x1F],
    [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x10],
    [0x0E, 0x11, 0x10, 0x17, 0x11, 0x11, 0x0F],
    [0x11, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11],
    [0x0E, 0x04, 0x04, 0x04, 0x04, 0x04, 0x0E],
    [0x07, 0x02, 0x02, 0x02, 0x02, 0x12, 0x0C],
    [0x11, 0x12, 0x14, 0x18, 0x14, 0x12, 0x11],
    [0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x1F],
    [0x11, 0x1B, 0x15, 0x15, 0x11, 0x11, 0x11],
    [0x11, 0x11, 0x19, 0x15, 0x13, 0x11, 0x11],
    [0x0E, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E],
    [0x1E, 0x11, 0x11, 0x1E, 0x10, 0x10, 0x10],
    [0x0E, 0x11, 0x11, 0x11, 0x15, 0x12, 0x0D],
    [0x1E, 0x11, 0x11, 0x1E, 0x14, 0x12, 0x11],
    [0x0F, 0x10, 0x10, 0x0E, 0x01, 0x01, 0x1E],
    [0x1F, 0x04, 0x04, 0x04, 0x04, 0x04, 0x04],
    [0x11, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E],
    [0x11, 0x11, 0x11, 0x11, 0x11, 0x0A, 0x04],
    [0x11, 0x11, 0x11, 0x15, 0x15, 0x15, 0x0A],
    [0x11, 0x11, 0x0A, 0x04, 0x0A, 0x11, 0x11],
    [0x11, 0x11, 0x0A, 0x04, 0x04, 0x04, 0x04],
    [0x1F, 0x01, 0x02, 0x04, 0x08, 0x10, 0x1F],
];

/// Outline box for characters without a pattern
const UNKNOWN: [u8; 7] = [0x1F, 0x11, 0x11, 0x11, 0x11, 0x11, 0x1F];

fn glyph(ch: char) -> &'static [u8; 7] {
    match ch.to_ascii_uppercase() {
        c @ 'A'..='Z' => &LETTERS[(c as u8 - b'A') as usize],
        _ => &UNKNOWN,
    }
}

/// Draw the grid: white open cells with centred letters, black blocked cells
pub fn render_grid(solution: &Solution) -> RgbImage {
    let width = solution.width as u32 * CELL_SIZE;
    let height = solution.height as u32 * CELL_SIZE;
    let mut img = RgbImage::from_pixel(width, height, BLACK);

    for row in 0..solution.height {
        for col in 0..solution.width {
            let open = solution.structure.get(row).and_then(|r| r.get(col)).copied().unwrap_or(false);
            if !open {
                continue;
            }

            let x0 = col as u32 * CELL_SIZE;
            let y0 = row as u32 * CELL_SIZE;
            let inner = CELL_SIZE - 2 * CELL_BORDER;
            fill_rect(&mut img, x0 + CELL_BORDER, y0 + CELL_BORDER, inner, inner, WHITE);

            if let Some(ch) = solution.letter(row, col) {
                draw_glyph(&mut img, x0, y0, glyph(ch));
            }
        }
    }

    img
}

/// Render the grid and write it as PNG, regardless of the file extension
pub fn save_png<P: AsRef<Path>>(solution: &Solution, path: P) -> Result<()> {
    let path = path.as_ref();
    render_grid(solution)
        .save_with_format(path, ImageFormat::Png)
        .with_context(|| format!("Failed to write image: {}", path.display()))
}

fn fill_rect(img: &mut RgbImage, x: u32, y: u32, width: u32, height: u32, color: Rgb<u8>) {
    for py in y..y + height {
        for px in x..x + width {
            img.put_pixel(px, py, color);
        }
    }
}

fn draw_glyph(img: &mut RgbImage, cell_x: u32, cell_y: u32, pattern: &[u8; 7]) {
    let left = cell_x + (CELL_SIZE - GLYPH_WIDTH * GLYPH_SCALE) / 2;
    let top = cell_y + (CELL_SIZE - GLYPH_HEIGHT * GLYPH_SCALE) / 2;

    for (dy, bits) in pattern.iter().enumerate() {
        for dx in 0..GLYPH_WIDTH {
            if bits & (1 << (GLYPH_WIDTH - 1 - dx)) != 0 {
                let x = left + dx * GLYPH_SCALE;
                let y = top + dy as u32 * GLYPH_SCALE;
                fill_rect(img, x, y, GLYPH_SCALE, GLYPH_SCALE, BLACK);
            }
        }
    }
}
