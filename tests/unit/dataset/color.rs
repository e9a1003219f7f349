//! Tests for 8-bit HSV conversion and range checks

#[cfg(test)]
mod tests {
    use image::Rgb;
    use rx_annotate::dataset::color::Hsv;

    fn hsv(r: u8, g: u8, b: u8) -> Hsv {
        Hsv::from_rgb(Rgb([r, g, b]))
    }

    // Tests primaries land on the halved hue scale
    // Verified by leaving hue in degrees
    #[test]
    fn test_primary_hues() {
        assert_eq!(hsv(255, 0, 0), Hsv { h: 0, s: 255, v: 255 });
        assert_eq!(hsv(0, 255, 0), Hsv { h: 60, s: 255, v: 255 });
        assert_eq!(hsv(0, 0, 255), Hsv { h: 120, s: 255, v: 255 });
    }

    // Tests greys have no hue or saturation
    // Verified by dividing by a zero chroma
    #[test]
    fn test_greys() {
        assert_eq!(hsv(0, 0, 0), Hsv { h: 0, s: 0, v: 0 });
        assert_eq!(hsv(128, 128, 128), Hsv { h: 0, s: 0, v: 128 });
        assert_eq!(hsv(255, 255, 255), Hsv { h: 0, s: 0, v: 255 });
    }

    // Tests negative hues wrap into range
    // Verified by removing the wrap
    #[test]
    fn test_negative_hue_wraps() {
        assert_eq!(hsv(255, 0, 255).h, 150);
        assert_eq!(hsv(255, 0, 20).h, 178);
    }

    // Tests saturation rounds half up
    // Verified by truncating saturation
    #[test]
    fn test_saturation_rounding() {
        // 255 * 1 / 2 = 127.5
        assert_eq!(hsv(2, 1, 1).s, 128);
    }

    // Tests inclusive bounds on every channel
    // Verified by making the upper bound exclusive
    #[test]
    fn test_in_range_inclusive() {
        let value = Hsv { h: 90, s: 50, v: 255 };

        assert!(value.in_range([90, 50, 50], [130, 255, 255]));
        assert!(!value.in_range([91, 50, 50], [130, 255, 255]));
        assert!(!value.in_range([0, 0, 0], [180, 49, 255]));
    }
}
