//! Normalized detection-box encoding of canvas regions

use crate::io::configuration::{CANVAS_SIZE, DETECTION_CLASS_ID};
use crate::session::region::{CanvasRect, Region};
use std::fmt;

/// Center-format box with every quantity divided by the canvas size
///
/// Values are nominally in `[0, 1]`; coordinates off the canvas are encoded
/// as-is.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetectionBox {
    /// Object class, constant for this dataset
    pub class_id: u32,
    /// Horizontal center
    pub x_center: f64,
    /// Vertical center
    pub y_center: f64,
    /// Box width
    pub width: f64,
    /// Box height
    pub height: f64,
}

impl DetectionBox {
    /// Encode a canvas rectangle
    pub fn from_rect(rect: &CanvasRect) -> Self {
        let size = f64::from(CANVAS_SIZE);
        let width = rect.width() as f64;
        let height = rect.height() as f64;
        let x_center = f64::from(rect.x1) + width / 2.0;
        let y_center = f64::from(rect.y1) + height / 2.0;

        Self {
            class_id: DETECTION_CLASS_ID,
            x_center: x_center / size,
            y_center: y_center / size,
            width: width / size,
            height: height / size,
        }
    }

    /// Reconstruct canvas corners, rounded to the nearest pixel
    ///
    /// Corners beyond the `i32` range saturate at its bounds; only encodings
    /// of rectangles far off the canvas get there.
    pub fn to_rect(&self) -> CanvasRect {
        let size = f64::from(CANVAS_SIZE);
        let half_width = self.width * size / 2.0;
        let half_height = self.height * size / 2.0;
        let x_center = self.x_center * size;
        let y_center = self.y_center * size;

        CanvasRect::new(
            (x_center - half_width).round() as i32,
            (y_center - half_height).round() as i32,
            (x_center + half_width).round() as i32,
            (y_center + half_height).round() as i32,
        )
    }
}

impl fmt::Display for DetectionBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {}",
            self.class_id, self.x_center, self.y_center, self.width, self.height
        )
    }
}

/// Label file body for a region sequence, one newline-terminated line each
pub fn encode_label_file(regions: &[Region]) -> String {
    let mut body = String::new();
    for region in regions {
        body.push_str(&DetectionBox::from_rect(&region.rect).to_string());
        body.push('\n');
    }
    body
}
