use motempl_image::{Image, ImageError};

use crate::parallel;

/// Update a motion history image from a silhouette mask.
///
/// Pixels where the silhouette is non-zero are stamped with `timestamp`;
/// pixels whose recorded motion is older than `timestamp - duration` are
/// reset to zero; all other pixels keep their previous timestamp.
///
/// # Arguments
///
/// * `silhouette` - The binary silhouette mask of the current frame.
/// * `mhi` - The motion history image, updated in place.
/// * `timestamp` - The current time in seconds.
/// * `duration` - The maximal age of motion tracked by the history, in seconds.
///
/// # Examples
///
/// ```
/// use motempl_image::{Image, ImageSize};
/// use motempl_imgproc::motion::update_motion_history;
///
/// let size = ImageSize { width: 2, height: 1 };
/// let silhouette = Image::<u8, 1>::new(size, vec![1u8, 0]).unwrap();
/// let mut mhi = Image::<f32, 1>::new(size, vec![0.0, 0.2]).unwrap();
///
/// update_motion_history(&silhouette, &mut mhi, 2.0, 1.0).unwrap();
///
/// // first pixel stamped, second aged out (0.2 < 2.0 - 1.0)
/// assert_eq!(mhi.as_slice(), &[2.0, 0.0]);
/// ```
pub fn update_motion_history(
    silhouette: &Image<u8, 1>,
    mhi: &mut Image<f32, 1>,
    timestamp: f32,
    duration: f32,
) -> Result<(), ImageError> {
    if silhouette.size() != mhi.size() {
        return Err(ImageError::InvalidImageSize(
            mhi.cols(),
            mhi.rows(),
            silhouette.cols(),
            silhouette.rows(),
        ));
    }

    let cutoff = timestamp - duration;

    parallel::par_iter_rows_val(silhouette, mhi, |silh_pixel, mhi_pixel| {
        if *silh_pixel != 0 {
            *mhi_pixel = timestamp;
        } else if *mhi_pixel < cutoff {
            *mhi_pixel = 0.0;
        }
    });

    Ok(())
}
