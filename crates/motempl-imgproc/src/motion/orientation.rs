use motempl_image::{ImageError, ImageView};

/// Number of bins of the base-orientation histogram.
const ORIENT_BINS: usize = 12;

/// Compute the dominant motion direction of a region.
///
/// A coarse histogram over the valid orientation pixels selects a base
/// direction; the result shifts the base by the circular mean of the
/// per-pixel deviations, weighted by motion recency: a pixel stamped at the
/// current timestamp weighs 1, one at the oldest retained age weighs 0.
///
/// The inputs are views so the computation can be restricted to a region
/// window of the full images. Returns an angle in degrees in `[0, 360)`;
/// a region without any valid pixel yields 0.
///
/// # Arguments
///
/// * `orientation` - Per-pixel motion direction in degrees.
/// * `mask` - Validity mask of the orientation field, non-zero where reliable.
/// * `mhi` - The motion history image.
/// * `timestamp` - The current time in seconds.
/// * `duration` - The maximal age of motion tracked by the history, in seconds.
pub fn global_orientation(
    orientation: &ImageView<'_, f32, 1>,
    mask: &ImageView<'_, u8, 1>,
    mhi: &ImageView<'_, f32, 1>,
    timestamp: f32,
    duration: f32,
) -> Result<f32, ImageError> {
    for other in [
        (mask.width(), mask.height()),
        (mhi.width(), mhi.height()),
    ] {
        if other != (orientation.width(), orientation.height()) {
            return Err(ImageError::InvalidImageSize(
                other.0,
                other.1,
                orientation.width(),
                orientation.height(),
            ));
        }
    }

    // base orientation from the histogram peak
    let mut hist = [0u32; ORIENT_BINS];
    let bin_width = 360.0 / ORIENT_BINS as f32;

    for (angle, m) in orientation.iter().zip(mask.iter()) {
        if *m != 0 {
            let bin = ((*angle / bin_width) as usize).min(ORIENT_BINS - 1);
            hist[bin] += 1;
        }
    }

    let mut base_bin = 0usize;
    for (bin, &count) in hist.iter().enumerate() {
        if count > hist[base_bin] {
            base_bin = bin;
        }
    }

    if hist[base_bin] == 0 {
        return Ok(0.0);
    }

    let base_orient = base_bin as f32 * bin_width;

    // recency-weighted circular mean of the deviations from the base
    let cutoff = timestamp - duration;
    let mut shift_sum = 0.0f32;
    let mut weight_sum = 0.0f32;

    for ((angle, m), t) in orientation.iter().zip(mask.iter()).zip(mhi.iter()) {
        if *m == 0 {
            continue;
        }
        let mut rel = *angle - base_orient;
        if rel < -180.0 {
            rel += 360.0;
        } else if rel > 180.0 {
            rel -= 360.0;
        }
        let weight = ((*t - cutoff) / duration).clamp(0.0, 1.0);
        shift_sum += weight * rel;
        weight_sum += weight;
    }

    let mut global = if weight_sum > f32::EPSILON {
        base_orient + shift_sum / weight_sum
    } else {
        base_orient
    };

    global = global.rem_euclid(360.0);

    Ok(global)
}
