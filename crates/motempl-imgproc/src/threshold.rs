use num_traits::Zero;
use std::cmp::PartialOrd;

use motempl_image::{Image, ImageError};

use crate::parallel;

/// Apply a binary threshold to an image.
///
/// Pixels strictly greater than `threshold` are set to `max_value`, all
/// others to zero.
///
/// # Arguments
///
/// * `src` - The input image of an arbitrary number of channels and type.
/// * `dst` - The output image, same size and type as `src`.
/// * `threshold` - The threshold value. Must be the same type as the image.
/// * `max_value` - The value assigned to pixels above the threshold.
///
/// # Examples
///
/// ```
/// use motempl_image::{Image, ImageSize};
/// use motempl_imgproc::threshold::threshold_binary;
///
/// let data = vec![100u8, 200, 50, 150, 200, 250];
/// let image = Image::<_, 1>::new(ImageSize { width: 2, height: 3 }, data).unwrap();
///
/// let mut thresholded = Image::<_, 1>::from_size_val(image.size(), 0).unwrap();
///
/// threshold_binary(&image, &mut thresholded, 100, 255).unwrap();
/// assert_eq!(thresholded.as_slice(), &[0u8, 255, 0, 255, 255, 255]);
/// ```
pub fn threshold_binary<T, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<T, C>,
    threshold: T,
    max_value: T,
) -> Result<(), ImageError>
where
    T: Copy + Send + Sync + PartialOrd + Zero,
{
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            dst.cols(),
            dst.rows(),
            src.cols(),
            src.rows(),
        ));
    }

    parallel::par_iter_rows_val(src, dst, |src_pixel, dst_pixel| {
        *dst_pixel = if *src_pixel > threshold {
            max_value
        } else {
            T::zero()
        };
    });

    Ok(())
}

#[cfg(test)]
mod tests {
    use motempl_image::{Image, ImageError, ImageSize};

    #[test]
    fn threshold_binary() -> Result<(), ImageError> {
        let data = vec![100u8, 200, 50, 150, 200, 250];
        let image = Image::<_, 1>::new(
            ImageSize {
                width: 2,
                height: 3,
            },
            data,
        )?;

        let mut thresholded = Image::<_, 1>::from_size_val(image.size(), 0)?;

        super::threshold_binary(&image, &mut thresholded, 100, 1)?;

        assert_eq!(thresholded.as_slice(), &[0u8, 1, 0, 1, 1, 1]);

        Ok(())
    }

    #[test]
    fn threshold_binary_f32() -> Result<(), ImageError> {
        let data = vec![0.1f32, 0.6, 0.4, 0.9];
        let image = Image::<_, 1>::new(
            ImageSize {
                width: 2,
                height: 2,
            },
            data,
        )?;

        let mut thresholded = Image::<_, 1>::from_size_val(image.size(), 0.0)?;

        super::threshold_binary(&image, &mut thresholded, 0.5, 1.0)?;

        assert_eq!(thresholded.as_slice(), &[0.0, 1.0, 0.0, 1.0]);

        Ok(())
    }
}
