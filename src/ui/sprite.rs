//! Sprite rendering
//!
//! Decodes a sprite PNG, crops the transparent padding PokéAPI sprites ship
//! with, and draws it with upper-half-block cells (two pixels per cell).

use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Color;
use ratatui::widgets::Widget;
use thiserror::Error;

/// Pixels with alpha below this are treated as background
const ALPHA_CUTOFF: u8 = 128;

#[derive(Error, Debug)]
pub enum SpriteError {
    #[error("Could not decode sprite: {0}")]
    Decode(#[from] image::ImageError),

    #[error("Sprite is fully transparent")]
    Empty,
}

/// Decoded, cropped RGBA pixels
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpriteThumb {
    pub width: u32,
    pub height: u32,
    image: RgbaImage,
}

impl SpriteThumb {
    /// Decode PNG bytes and crop to the visible bounding box
    pub fn decode(bytes: &[u8]) -> Result<Self, SpriteError> {
        let img = image::load_from_memory(bytes)?.to_rgba8();

        let (mut min_x, mut min_y) = (u32::MAX, u32::MAX);
        let (mut max_x, mut max_y) = (0u32, 0u32);
        for (x, y, p) in img.enumerate_pixels() {
            if p[3] >= ALPHA_CUTOFF {
                min_x = min_x.min(x);
                min_y = min_y.min(y);
                max_x = max_x.max(x);
                max_y = max_y.max(y);
            }
        }
        if min_x == u32::MAX {
            return Err(SpriteError::Empty);
        }

        let width = max_x - min_x + 1;
        let height = max_y - min_y + 1;
        let image = imageops::crop_imm(&img, min_x, min_y, width, height).to_image();

        Ok(Self {
            width,
            height,
            image,
        })
    }

    /// RGBA at (x, y), `None` when out of bounds
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        self.image.get_pixel_checked(x, y).map(|p| p.0)
    }

    /// Size in cells when scaled to fit `area`, preserving aspect ratio
    pub fn fit(&self, area: Rect) -> (u16, u16) {
        if self.width == 0 || self.height == 0 || area.width == 0 || area.height == 0 {
            return (0, 0);
        }
        let scale_x = area.width as f32 / self.width as f32;
        let scale_y = (area.height as f32 * 2.0) / self.height as f32;
        let scale = scale_x.min(scale_y);
        let cols = ((self.width as f32 * scale).floor() as u16).clamp(1, area.width);
        let rows = (((self.height as f32 * scale) / 2.0).ceil() as u16).clamp(1, area.height);
        (cols, rows)
    }

    /// Pixels resized to `cols` x `rows * 2`, one pair per cell
    fn scaled(&self, cols: u16, rows: u16) -> RgbaImage {
        imageops::resize(
            &self.image,
            cols as u32,
            rows as u32 * 2,
            FilterType::Nearest,
        )
    }
}

/// Widget drawing a sprite centered in its area
pub struct SpriteView<'a> {
    pub sprite: &'a SpriteThumb,
    /// Color used where the sprite is transparent
    pub background: Color,
}

impl<'a> SpriteView<'a> {
    pub fn new(sprite: &'a SpriteThumb, background: Color) -> Self {
        Self { sprite, background }
    }

    fn color(&self, pixel: &Rgba<u8>) -> Color {
        match pixel.0 {
            [r, g, b, a] if a >= ALPHA_CUTOFF => Color::Rgb(r, g, b),
            _ => self.background,
        }
    }
}

impl Widget for SpriteView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (cols, rows) = self.sprite.fit(area);
        if cols == 0 || rows == 0 {
            return;
        }

        let scaled = self.sprite.scaled(cols, rows);
        let x0 = area.x + (area.width - cols) / 2;
        let y0 = area.y + (area.height - rows) / 2;

        for row in 0..rows {
            for col in 0..cols {
                let top = self.color(scaled.get_pixel(col as u32, row as u32 * 2));
                let bottom = self.color(scaled.get_pixel(col as u32, row as u32 * 2 + 1));
                if let Some(cell) = buf.cell_mut((x0 + col, y0 + row)) {
                    cell.set_char('▀').set_fg(top).set_bg(bottom);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::ImageFormat;
    use std::io::Cursor;

    fn png(img: &RgbaImage) -> Vec<u8> {
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, ImageFormat::Png).unwrap();
        out.into_inner()
    }

    /// 8x8 transparent canvas with an opaque 2x4 red block at (3, 2)
    fn padded_block() -> Vec<u8> {
        let mut img = RgbaImage::from_pixel(8, 8, Rgba([0, 0, 0, 0]));
        for y in 2..6 {
            for x in 3..5 {
                img.put_pixel(x, y, Rgba([255, 0, 0, 255]));
            }
        }
        png(&img)
    }

    #[test]
    fn test_decode_crops_transparent_padding() {
        let sprite = SpriteThumb::decode(&padded_block()).unwrap();
        assert_eq!((sprite.width, sprite.height), (2, 4));
        assert_eq!(sprite.pixel(0, 0), Some([255, 0, 0, 255]));
        assert_eq!(sprite.pixel(1, 3), Some([255, 0, 0, 255]));
        assert_eq!(sprite.pixel(2, 0), None);
    }

    #[test]
    fn test_decode_fully_transparent_is_error() {
        let img = RgbaImage::from_pixel(4, 4, Rgba([10, 10, 10, 0]));
        assert!(matches!(
            SpriteThumb::decode(&png(&img)),
            Err(SpriteError::Empty)
        ));
    }

    #[test]
    fn test_decode_garbage_is_error() {
        assert!(matches!(
            SpriteThumb::decode(b"definitely not a png"),
            Err(SpriteError::Decode(_))
        ));
    }

    #[test]
    fn test_fit_preserves_aspect() {
        let sprite = SpriteThumb::decode(&padded_block()).unwrap();
        // 2x4 pixels into 10 cols x 4 rows (8 pixel rows): scale 2, 4 cols x 4 rows
        assert_eq!(sprite.fit(Rect::new(0, 0, 10, 4)), (4, 4));
        assert_eq!(sprite.fit(Rect::new(0, 0, 0, 4)), (0, 0));
    }

    #[test]
    fn test_render_draws_half_blocks() {
        let sprite = SpriteThumb::decode(&padded_block()).unwrap();
        let area = Rect::new(0, 0, 6, 2);
        let mut buf = Buffer::empty(area);
        SpriteView::new(&sprite, Color::Black).render(area, &mut buf);

        // Scale 1: 2 cols x 2 rows centered at x = 2
        let cell = buf.cell((2, 0)).unwrap();
        assert_eq!(cell.symbol(), "▀");
        assert_eq!(cell.fg, Color::Rgb(255, 0, 0));
        assert_eq!(cell.bg, Color::Rgb(255, 0, 0));

        // Outside the sprite nothing is drawn
        assert_eq!(buf.cell((0, 0)).unwrap().symbol(), " ");
    }

    #[test]
    fn test_render_upscales_with_nearest_neighbour() {
        // Left column red, right column blue, 2x2 opaque
        let mut img = RgbaImage::new(2, 2);
        for y in 0..2 {
            img.put_pixel(0, y, Rgba([255, 0, 0, 255]));
            img.put_pixel(1, y, Rgba([0, 0, 255, 255]));
        }
        let sprite = SpriteThumb::decode(&png(&img)).unwrap();

        // Scale 2: 4 cols x 2 rows, each source pixel becomes a 2x2 block
        let area = Rect::new(0, 0, 4, 2);
        let mut buf = Buffer::empty(area);
        SpriteView::new(&sprite, Color::Black).render(area, &mut buf);

        for y in 0..2 {
            for x in 0..2 {
                assert_eq!(buf.cell((x, y)).unwrap().fg, Color::Rgb(255, 0, 0));
                assert_eq!(buf.cell((x, y)).unwrap().bg, Color::Rgb(255, 0, 0));
            }
            for x in 2..4 {
                assert_eq!(buf.cell((x, y)).unwrap().fg, Color::Rgb(0, 0, 255));
                assert_eq!(buf.cell((x, y)).unwrap().bg, Color::Rgb(0, 0, 255));
            }
        }
    }
}
