//! Canvas frame rendering and preview overlays

use crate::io::configuration::{CANVAS_SIZE, OUTLINE_COLOR, PAD_COLOR};
use crate::session::region::{CanvasRect, DraftRect, Region};
use image::imageops::{self, FilterType};
use image::{DynamicImage, Rgb, RgbImage};

/// Scaled size of a `width`×`height` source fitted into the canvas
///
/// The dominant side becomes exactly [`CANVAS_SIZE`]; the other is scaled by
/// the aspect ratio and floored, never below one pixel.
pub fn fitted_dimensions(width: u32, height: u32) -> (u32, u32) {
    let size = f64::from(CANVAS_SIZE);
    let aspect_ratio = f64::from(width) / f64::from(height.max(1));

    let (new_width, new_height) = if aspect_ratio > 1.0 {
        (size, (size / aspect_ratio).floor())
    } else {
        ((size * aspect_ratio).floor(), size)
    };

    (
        (new_width as u32).clamp(1, CANVAS_SIZE),
        (new_height as u32).clamp(1, CANVAS_SIZE),
    )
}

/// Render the padded canvas frame for a source image
///
/// The source is resized with Lanczos3 and placed at the top-left corner of
/// a square canvas filled with [`PAD_COLOR`].
pub fn render_canvas(source: &DynamicImage) -> RgbImage {
    let (new_width, new_height) = fitted_dimensions(source.width(), source.height());
    let resized = source
        .resize_exact(new_width, new_height, FilterType::Lanczos3)
        .to_rgb8();

    let mut canvas = RgbImage::from_pixel(CANVAS_SIZE, CANVAS_SIZE, Rgb(PAD_COLOR));
    imageops::replace(&mut canvas, &resized, 0, 0);
    canvas
}

/// Copy of `frame` with saved regions and the draft outlined
pub fn render_overlay(frame: &RgbImage, regions: &[Region], draft: Option<&DraftRect>) -> RgbImage {
    let mut overlay = frame.clone();
    for region in regions {
        draw_outline(&mut overlay, &region.rect);
    }
    if let Some(draft) = draft {
        draw_outline(&mut overlay, &draft.rect());
    }
    overlay
}

/// Draw a one-pixel rectangle outline, skipping parts off the image
///
/// Only the visible span of each edge is visited, so the cost is bounded by
/// the image size whatever the rectangle's extent.
pub fn draw_outline(image: &mut RgbImage, rect: &CanvasRect) {
    let rect = rect.normalized();
    let color = Rgb(OUTLINE_COLOR);
    let (width, height) = (i64::from(image.width()), i64::from(image.height()));
    let (x1, y1, x2, y2) = (
        i64::from(rect.x1),
        i64::from(rect.y1),
        i64::from(rect.x2),
        i64::from(rect.y2),
    );

    let visible_x = x1.max(0)..=x2.min(width - 1);
    let visible_y = y1.max(0)..=y2.min(height - 1);

    for y in [y1, y2] {
        if (0..height).contains(&y) {
            for x in visible_x.clone() {
                put_pixel_at(image, x, y, color);
            }
        }
    }
    for x in [x1, x2] {
        if (0..width).contains(&x) {
            for y in visible_y.clone() {
                put_pixel_at(image, x, y, color);
            }
        }
    }
}

fn put_pixel_at(image: &mut RgbImage, x: i64, y: i64, color: Rgb<u8>) {
    let (Ok(x), Ok(y)) = (u32::try_from(x), u32::try_from(y)) else {
        return;
    };
    if let Some(pixel) = image.get_pixel_mut_checked(x, y) {
        *pixel = color;
    }
}
