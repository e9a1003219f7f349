//! Tests for canvas frame rendering and outline overlays

#[cfg(test)]
mod tests {
    use image::{DynamicImage, Rgb, RgbImage};
    use rx_annotate::canvas::render::{
        draw_outline, fitted_dimensions, render_canvas, render_overlay,
    };
    use rx_annotate::io::configuration::{CANVAS_SIZE, OUTLINE_COLOR, PAD_COLOR};
    use rx_annotate::session::region::{CanvasPoint, CanvasRect, DraftRect, Region};
    use std::time::{Duration, Instant};

    const WHITE: Rgb<u8> = Rgb([255, 255, 255]);

    fn solid(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, WHITE))
    }

    // Tests width-dominant sources fill the canvas width
    // Verified by rounding instead of flooring the scaled side
    #[test]
    fn test_fitted_dimensions_landscape() {
        assert_eq!(fitted_dimensions(1280, 720), (640, 360));
        assert_eq!(fitted_dimensions(1000, 333), (640, 213));
    }

    // Tests height-dominant and square sources fill the canvas height
    // Verified by treating square sources as width-dominant with a different floor
    #[test]
    fn test_fitted_dimensions_portrait_and_square() {
        assert_eq!(fitted_dimensions(720, 1280), (360, 640));
        assert_eq!(fitted_dimensions(333, 1000), (213, 640));
        assert_eq!(fitted_dimensions(50, 50), (640, 640));
    }

    // Tests extreme aspect ratios never produce an empty side
    // Verified by removing the lower clamp
    #[test]
    fn test_fitted_dimensions_minimum_one_pixel() {
        assert_eq!(fitted_dimensions(5000, 1), (640, 1));
        assert_eq!(fitted_dimensions(1, 5000), (1, 640));
    }

    // Tests the frame is square, anchored top-left, and padded gray
    // Verified by centering the scaled image
    #[test]
    fn test_render_canvas_anchors_top_left() {
        let frame = render_canvas(&solid(1280, 720));

        assert_eq!(frame.dimensions(), (CANVAS_SIZE, CANVAS_SIZE));
        assert_eq!(*frame.get_pixel(0, 0), WHITE);
        assert_eq!(*frame.get_pixel(639, 359), WHITE);
        assert_eq!(*frame.get_pixel(0, 360), Rgb(PAD_COLOR));
        assert_eq!(*frame.get_pixel(639, 639), Rgb(PAD_COLOR));
    }

    // Tests portrait sources pad on the right
    // Verified by swapping width and height in the fit
    #[test]
    fn test_render_canvas_portrait_padding() {
        let frame = render_canvas(&solid(300, 600));

        assert_eq!(frame.dimensions(), (CANVAS_SIZE, CANVAS_SIZE));
        assert_eq!(*frame.get_pixel(319, 639), WHITE);
        assert_eq!(*frame.get_pixel(320, 0), Rgb(PAD_COLOR));
    }

    // Tests small sources are upscaled to fill the dominant side
    // Verified by skipping the resize for small images
    #[test]
    fn test_render_canvas_upscales() {
        let frame = render_canvas(&solid(64, 32));

        assert_eq!(*frame.get_pixel(639, 319), WHITE);
        assert_eq!(*frame.get_pixel(639, 320), Rgb(PAD_COLOR));
    }

    // Tests the overlay outlines regions and leaves the frame untouched
    // Verified by drawing on the input frame
    #[test]
    fn test_render_overlay_outlines_regions_and_draft() {
        let frame = RgbImage::from_pixel(CANVAS_SIZE, CANVAS_SIZE, Rgb(PAD_COLOR));
        let regions = vec![Region::new(CanvasRect::new(10, 10, 20, 20), "a")];
        let draft = DraftRect::start(CanvasPoint::new(100, 100)).drag_to(CanvasPoint::new(50, 60));

        let overlay = render_overlay(&frame, &regions, Some(&draft));

        assert_eq!(*overlay.get_pixel(10, 15), Rgb(OUTLINE_COLOR));
        assert_eq!(*overlay.get_pixel(15, 15), Rgb(PAD_COLOR));
        assert_eq!(*overlay.get_pixel(50, 80), Rgb(OUTLINE_COLOR));
        assert_eq!(*overlay.get_pixel(75, 60), Rgb(OUTLINE_COLOR));
        assert_eq!(*frame.get_pixel(10, 15), Rgb(PAD_COLOR));
    }

    // Tests outlines partly off the canvas are clipped rather than panicking
    // Verified by removing the bounds check
    #[test]
    fn test_draw_outline_clips() {
        let mut image = RgbImage::from_pixel(8, 8, WHITE);

        draw_outline(&mut image, &CanvasRect::new(-4, -4, 3, 20));

        assert_eq!(*image.get_pixel(3, 0), Rgb(OUTLINE_COLOR));
        assert_eq!(*image.get_pixel(1, 1), WHITE);
    }

    // Tests outlines far beyond the canvas only visit visible pixels
    // Verified by iterating the full unclamped edge span
    #[test]
    fn test_draw_outline_huge_rect_is_bounded() {
        let mut image = RgbImage::from_pixel(640, 640, WHITE);
        let started = Instant::now();

        draw_outline(&mut image, &CanvasRect::new(0, 0, 400_000_000, 400_000_000));
        draw_outline(
            &mut image,
            &CanvasRect::new(i32::MIN, i32::MIN, i32::MAX, i32::MAX),
        );

        assert!(started.elapsed() < Duration::from_secs(1));
        assert_eq!(*image.get_pixel(639, 0), Rgb(OUTLINE_COLOR));
        assert_eq!(*image.get_pixel(0, 639), Rgb(OUTLINE_COLOR));
        assert_eq!(*image.get_pixel(639, 639), WHITE);
    }

    // Tests a rectangle entirely off the image draws nothing
    // Verified by drawing edges whose row lies outside the image
    #[test]
    fn test_draw_outline_off_image() {
        let mut image = RgbImage::from_pixel(8, 8, WHITE);

        draw_outline(&mut image, &CanvasRect::new(20, -50, 90, -10));

        assert!(image.pixels().all(|pixel| *pixel == WHITE));
    }
}
