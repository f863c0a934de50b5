use rayon::prelude::*;

use motempl_image::{Image, ImageError};

/// Estimate the per-pixel motion direction from a motion history image.
///
/// The orientation of each pixel is computed from the 3x3 Sobel derivatives
/// of the MHI (with replicated borders) as an angle in degrees in `[0, 360)`.
/// A pixel is marked valid in `mask` only when the spread between the
/// minimal and maximal MHI value in its 3x3 neighborhood lies within
/// `[min_delta, max_delta]` and the gradient is not degenerate; invalid
/// pixels get a zero orientation.
///
/// # Arguments
///
/// * `mhi` - The motion history image.
/// * `mask` - Output validity mask, non-zero where the orientation is reliable.
/// * `orientation` - Output orientation field in degrees.
/// * `min_delta` - The minimal reliable motion-age spread, in seconds.
/// * `max_delta` - The maximal reliable motion-age spread, in seconds.
pub fn motion_gradient(
    mhi: &Image<f32, 1>,
    mask: &mut Image<u8, 1>,
    orientation: &mut Image<f32, 1>,
    min_delta: f32,
    max_delta: f32,
) -> Result<(), ImageError> {
    if mhi.size() != mask.size() {
        return Err(ImageError::InvalidImageSize(
            mask.cols(),
            mask.rows(),
            mhi.cols(),
            mhi.rows(),
        ));
    }

    if mhi.size() != orientation.size() {
        return Err(ImageError::InvalidImageSize(
            orientation.cols(),
            orientation.rows(),
            mhi.cols(),
            mhi.rows(),
        ));
    }

    let cols = mhi.cols();
    let rows = mhi.rows();
    if cols == 0 || rows == 0 {
        return Ok(());
    }
    let mhi_data = mhi.as_slice();

    orientation
        .as_slice_mut()
        .par_chunks_exact_mut(cols)
        .zip(mask.as_slice_mut().par_chunks_exact_mut(cols))
        .enumerate()
        .for_each(|(y, (orient_row, mask_row))| {
            let y0 = y.saturating_sub(1);
            let y1 = (y + 1).min(rows - 1);
            for x in 0..cols {
                let x0 = x.saturating_sub(1);
                let x1 = (x + 1).min(cols - 1);

                // 3x3 neighborhood with replicated borders
                let nw = mhi_data[y0 * cols + x0];
                let n = mhi_data[y0 * cols + x];
                let ne = mhi_data[y0 * cols + x1];
                let w = mhi_data[y * cols + x0];
                let c = mhi_data[y * cols + x];
                let e = mhi_data[y * cols + x1];
                let sw = mhi_data[y1 * cols + x0];
                let s = mhi_data[y1 * cols + x];
                let se = mhi_data[y1 * cols + x1];

                let dx = (ne + 2.0 * e + se) - (nw + 2.0 * w + sw);
                let dy = (sw + 2.0 * s + se) - (nw + 2.0 * n + ne);

                let vmin = nw.min(n).min(ne).min(w).min(c).min(e).min(sw).min(s).min(se);
                let vmax = nw.max(n).max(ne).max(w).max(c).max(e).max(sw).max(s).max(se);
                let spread = vmax - vmin;

                let valid = spread >= min_delta
                    && spread <= max_delta
                    && (dx.abs() > f32::EPSILON || dy.abs() > f32::EPSILON);

                if valid {
                    let mut angle = dy.atan2(dx).to_degrees();
                    if angle < 0.0 {
                        angle += 360.0;
                    }
                    orient_row[x] = angle;
                    mask_row[x] = 1;
                } else {
                    orient_row[x] = 0.0;
                    mask_row[x] = 0;
                }
            }
        });

    Ok(())
}
