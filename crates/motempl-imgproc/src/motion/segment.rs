use std::collections::VecDeque;

use motempl_image::{Image, ImageError, Rect};

/// A connected motion component found by [`segment_motion`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MotionSegment {
    /// The label of the component in the segmentation mask.
    pub label: u32,
    /// Bounding rectangle of the component in pixel coordinates.
    pub rect: Rect,
    /// Number of pixels belonging to the component.
    pub area: usize,
}

/// Segment a motion history image into connected motion components.
///
/// A pixel belongs to a component when its recorded motion is non-zero and
/// not older than `timestamp - seg_thresh`; components are 8-connected.
/// Each component's label is written into `seg_mask` (zero means
/// background).
///
/// # Arguments
///
/// * `mhi` - The motion history image.
/// * `seg_mask` - Output segmentation mask, one label per component.
/// * `timestamp` - The current time in seconds.
/// * `seg_thresh` - The maximal motion age to include, in seconds.
///
/// # Returns
///
/// One [`MotionSegment`] per connected component, in label order.
pub fn segment_motion(
    mhi: &Image<f32, 1>,
    seg_mask: &mut Image<f32, 1>,
    timestamp: f32,
    seg_thresh: f32,
) -> Result<Vec<MotionSegment>, ImageError> {
    if mhi.size() != seg_mask.size() {
        return Err(ImageError::InvalidImageSize(
            seg_mask.cols(),
            seg_mask.rows(),
            mhi.cols(),
            mhi.rows(),
        ));
    }

    let cols = mhi.cols();
    let rows = mhi.rows();
    let cutoff = timestamp - seg_thresh;

    let mhi_data = mhi.as_slice();
    seg_mask.fill(0.0);
    let seg_data = seg_mask.as_slice_mut();

    let is_active = |idx: usize| mhi_data[idx] > 0.0 && mhi_data[idx] >= cutoff;

    let mut segments = Vec::new();
    let mut queue = VecDeque::new();
    let mut label = 0u32;

    for start in 0..mhi_data.len() {
        if !is_active(start) || seg_data[start] != 0.0 {
            continue;
        }

        label += 1;
        seg_data[start] = label as f32;
        queue.push_back(start);

        let (mut min_x, mut min_y) = (start % cols, start / cols);
        let (mut max_x, mut max_y) = (min_x, min_y);
        let mut area = 0usize;

        while let Some(idx) = queue.pop_front() {
            area += 1;
            let x = idx % cols;
            let y = idx / cols;
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x);
            max_y = max_y.max(y);

            for ny in y.saturating_sub(1)..=(y + 1).min(rows - 1) {
                for nx in x.saturating_sub(1)..=(x + 1).min(cols - 1) {
                    let nidx = ny * cols + nx;
                    if is_active(nidx) && seg_data[nidx] == 0.0 {
                        seg_data[nidx] = label as f32;
                        queue.push_back(nidx);
                    }
                }
            }
        }

        segments.push(MotionSegment {
            label,
            rect: Rect {
                x: min_x,
                y: min_y,
                width: max_x - min_x + 1,
                height: max_y - min_y + 1,
            },
            area,
        });
    }

    Ok(segments)
}
