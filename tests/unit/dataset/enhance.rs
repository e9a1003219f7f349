//! Tests for ink enhancement of pixels, images and folders

#[cfg(test)]
mod tests {
    use image::{Rgb, RgbImage};
    use rx_annotate::dataset::enhance::{enhance_folder, enhance_image, enhance_pixel};
    use rx_annotate::io::progress::ProgressManager;
    use std::fs;
    use tempfile::TempDir;

    // Tests dark low-saturation pixels become white
    // Verified by skipping the dark mask
    #[test]
    fn test_dark_pixels_whitened() {
        assert_eq!(enhance_pixel(Rgb([0, 0, 0])), Rgb([255, 255, 255]));
        assert_eq!(enhance_pixel(Rgb([40, 40, 40])), Rgb([255, 255, 255]));
    }

    // Tests blue ink is brightened and saturates at 255
    // Verified by wrapping instead of saturating
    #[test]
    fn test_blue_pixels_boosted() {
        assert_eq!(enhance_pixel(Rgb([20, 40, 200])), Rgb([70, 90, 250]));
        assert_eq!(enhance_pixel(Rgb([0, 0, 255])), Rgb([50, 50, 255]));
    }

    // Tests other colors pass through unchanged
    // Verified by widening the blue hue range
    #[test]
    fn test_other_pixels_unchanged() {
        assert_eq!(enhance_pixel(Rgb([200, 30, 30])), Rgb([200, 30, 30]));
        assert_eq!(enhance_pixel(Rgb([240, 240, 240])), Rgb([240, 240, 240]));
        assert_eq!(enhance_pixel(Rgb([30, 200, 30])), Rgb([30, 200, 30]));
    }

    // Tests dark but saturated ink matches neither mask
    // Verified by dropping the saturation bound from the dark range
    #[test]
    fn test_dark_saturated_pixel_unchanged() {
        assert_eq!(enhance_pixel(Rgb([20, 25, 45])), Rgb([20, 25, 45]));
    }

    // Tests whole images are mapped pixel by pixel
    // Verified by returning the source unchanged
    #[test]
    fn test_enhance_image_dimensions() {
        let mut source = RgbImage::from_pixel(4, 3, Rgb([240, 240, 240]));
        source.put_pixel(1, 1, Rgb([0, 0, 0]));

        let output = enhance_image(&source);

        assert_eq!(output.dimensions(), (4, 3));
        assert_eq!(*output.get_pixel(1, 1), Rgb([255, 255, 255]));
        assert_eq!(*output.get_pixel(0, 0), Rgb([240, 240, 240]));
    }

    // Tests folders: only .jpg processed, sidecars copied, gaps reported
    // Verified by matching extensions case-insensitively
    #[test]
    fn test_enhance_folder() {
        let input = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();
        let target = output.path().join("enhanced");

        RgbImage::from_pixel(8, 8, Rgb([0, 0, 255]))
            .save(input.path().join("a.jpg"))
            .unwrap();
        fs::write(input.path().join("a.gt.txt"), "text a").unwrap();
        RgbImage::from_pixel(8, 8, Rgb([10, 10, 10]))
            .save(input.path().join("b.jpg"))
            .unwrap();
        RgbImage::from_pixel(8, 8, Rgb([10, 10, 10]))
            .save(input.path().join("c.png"))
            .unwrap();
        fs::write(input.path().join("broken.jpg"), "not a jpeg").unwrap();

        let mut progress = ProgressManager::new();
        let report = enhance_folder(input.path(), &target, Some(&mut progress)).unwrap();

        assert_eq!(report.processed, 2);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.missing_ground_truth.len(), 1);
        assert_eq!(progress.completed(), 3);
        assert!(target.join("a.jpg").exists());
        assert!(target.join("b.jpg").exists());
        assert!(!target.join("c.png").exists());
        assert_eq!(fs::read_to_string(target.join("a.gt.txt")).unwrap(), "text a");
        assert!(input.path().join("a.jpg").exists());
    }

    // Tests a missing input folder is an error
    // Verified by returning an empty report
    #[test]
    fn test_enhance_folder_missing_input() {
        let output = TempDir::new().unwrap();
        let result = enhance_folder(&output.path().join("missing"), output.path(), None);

        assert!(result.is_err());
    }
}
