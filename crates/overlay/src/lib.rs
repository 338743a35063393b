//! Frame annotation
//!
//! Draws detection boxes and captions onto frames for the display sink:
//! - dangerous detections get a thick red box and a label+confidence caption
//! - everything else gets a thin green box and a label caption
//! - dangerous frames additionally carry a red running-total banner
//!
//! Annotation is display-only and independent of alert dispatch.

mod font;

use imageproc::drawing::draw_hollow_rect_mut;
use imageproc::rect::Rect;
use tracing::debug;
use video_source::VideoFrame;

use detection::{DangerSet, Detection};

const RED: [u8; 3] = [255, 0, 0];
const GREEN: [u8; 3] = [0, 255, 0];

/// Annotate a frame in place with detection boxes and, when any dangerous
/// detection is present, the cumulative danger banner.
pub fn annotate(
    frame: &mut VideoFrame,
    detections: &[Detection],
    danger_set: &DangerSet,
    total_dangerous: u64,
) {
    let Some(mut img) = frame.to_image() else {
        debug!("Skipping annotation: frame buffer size mismatch");
        return;
    };

    let mut any_dangerous = false;
    for detection in detections {
        let dangerous = danger_set.is_dangerous(&detection.label);
        any_dangerous |= dangerous;

        let (color, thickness) = if dangerous { (RED, 3) } else { (GREEN, 2) };
        draw_box(&mut img, detection, color, thickness);
    }

    frame.data = img.into_raw();

    for detection in detections {
        let dangerous = danger_set.is_dangerous(&detection.label);
        let caption = if dangerous {
            format!("{} ({:.2})", detection.label, detection.confidence)
        } else {
            detection.label.clone()
        };
        let color = if dangerous { RED } else { GREEN };
        font::draw_text(
            frame,
            &caption,
            detection.bbox.x1,
            detection.bbox.y1 - 10,
            1,
            color,
        );
    }

    if any_dangerous {
        let banner = format!("DANGER! Total: {total_dangerous}");
        font::draw_text(frame, &banner, 20, 30, 2, RED);
    }
}

fn draw_box(img: &mut image::RgbImage, detection: &Detection, color: [u8; 3], thickness: i32) {
    let bbox = &detection.bbox;
    for inset in 0..thickness {
        let w = bbox.width() - 2 * inset;
        let h = bbox.height() - 2 * inset;
        if w <= 0 || h <= 0 {
            break;
        }
        let rect = Rect::at(bbox.x1 + inset, bbox.y1 + inset).of_size(w as u32, h as u32);
        draw_hollow_rect_mut(img, rect, image::Rgb(color));
    }
}
