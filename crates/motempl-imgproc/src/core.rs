use motempl_image::{Image, ImageError};

use crate::parallel;

/// Compute the pixelwise absolute difference between two images.
///
/// # Arguments
///
/// * `src1` - The first input image of an arbitrary number of channels and type.
/// * `src2` - The second input image, same size and type as `src1`.
/// * `dst` - The output image, same size and type as the inputs.
///
/// # Examples
///
/// ```
/// use motempl_image::{Image, ImageSize};
/// use motempl_imgproc::core::abs_diff;
///
/// let a = Image::<u8, 1>::new(ImageSize { width: 2, height: 1 }, vec![10u8, 200]).unwrap();
/// let b = Image::<u8, 1>::new(ImageSize { width: 2, height: 1 }, vec![30u8, 150]).unwrap();
///
/// let mut diff = Image::<u8, 1>::from_size_val(a.size(), 0).unwrap();
/// abs_diff(&a, &b, &mut diff).unwrap();
///
/// assert_eq!(diff.as_slice(), &[20u8, 50]);
/// ```
pub fn abs_diff<T, const C: usize>(
    src1: &Image<T, C>,
    src2: &Image<T, C>,
    dst: &mut Image<T, C>,
) -> Result<(), ImageError>
where
    T: Copy + Send + Sync + PartialOrd + std::ops::Sub<Output = T>,
{
    if src1.size() != src2.size() {
        return Err(ImageError::InvalidImageSize(
            src2.cols(),
            src2.rows(),
            src1.cols(),
            src1.rows(),
        ));
    }

    if src1.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            dst.cols(),
            dst.rows(),
            src1.cols(),
            src1.rows(),
        ));
    }

    // unsigned-safe absolute difference
    parallel::par_iter_rows_val_two(src1, src2, dst, |a, b, d| {
        *d = if *a > *b { *a - *b } else { *b - *a };
    });

    Ok(())
}
