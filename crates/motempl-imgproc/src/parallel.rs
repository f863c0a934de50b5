use rayon::prelude::*;

use motempl_image::Image;

/// Apply a function to each pixel value of an image in parallel.
///
/// The destination value is passed mutably, so in-place accumulation rules
/// that read the previous destination value are supported.
pub fn par_iter_rows_val<T1, const C1: usize, T2, const C2: usize>(
    src: &Image<T1, C1>,
    dst: &mut Image<T2, C2>,
    f: impl Fn(&T1, &mut T2) + Send + Sync,
) where
    T1: Copy + Send + Sync,
    T2: Copy + Send + Sync,
{
    let cols = src.cols();
    if cols == 0 {
        return;
    }
    src.as_slice()
        .par_chunks_exact(C1 * cols)
        .zip(dst.as_slice_mut().par_chunks_exact_mut(C2 * cols))
        .for_each(|(src_chunk, dst_chunk)| {
            src_chunk
                .iter()
                .zip(dst_chunk.iter_mut())
                .for_each(|(src_pixel, dst_pixel)| {
                    f(src_pixel, dst_pixel);
                });
        });
}

/// Apply a function to each pixel value of two images in parallel.
pub fn par_iter_rows_val_two<T1, const C1: usize, T2, const C2: usize, T3, const C3: usize>(
    src1: &Image<T1, C1>,
    src2: &Image<T2, C2>,
    dst: &mut Image<T3, C3>,
    f: impl Fn(&T1, &T2, &mut T3) + Send + Sync,
) where
    T1: Copy + Send + Sync,
    T2: Copy + Send + Sync,
    T3: Copy + Send + Sync,
{
    let cols = src1.cols();
    if cols == 0 {
        return;
    }
    src1.as_slice()
        .par_chunks_exact(C1 * cols)
        .zip(src2.as_slice().par_chunks_exact(C2 * cols))
        .zip(dst.as_slice_mut().par_chunks_exact_mut(C3 * cols))
        .for_each(|((src1_chunk, src2_chunk), dst_chunk)| {
            src1_chunk
                .iter()
                .zip(src2_chunk.iter())
                .zip(dst_chunk.iter_mut())
                .for_each(|((src1_pixel, src2_pixel), dst_pixel)| {
                    f(src1_pixel, src2_pixel, dst_pixel);
                });
        });
}

#[cfg(test)]
mod tests {
    use motempl_image::{Image, ImageError, ImageSize};

    #[test]
    fn par_iter_rows_val() -> Result<(), ImageError> {
        let src = Image::<u8, 1>::new(
            ImageSize {
                width: 2,
                height: 2,
            },
            vec![1u8, 2, 3, 4],
        )?;
        let mut dst = Image::<u8, 1>::from_size_val(src.size(), 0)?;

        super::par_iter_rows_val(&src, &mut dst, |s, d| *d = *s * 2);
        assert_eq!(dst.as_slice(), &[2u8, 4, 6, 8]);

        Ok(())
    }

    #[test]
    fn par_iter_rows_val_mixed_types() -> Result<(), ImageError> {
        let src = Image::<u8, 1>::new(
            ImageSize {
                width: 2,
                height: 1,
            },
            vec![3u8, 5],
        )?;
        let mut dst = Image::<f32, 1>::from_size_val(src.size(), 0.0)?;

        super::par_iter_rows_val(&src, &mut dst, |s, d| *d = f32::from(*s) * 0.5);
        assert_eq!(dst.as_slice(), &[1.5f32, 2.5]);

        Ok(())
    }

    #[test]
    fn zero_width_image_is_a_no_op() -> Result<(), ImageError> {
        let src = Image::<u8, 1>::new(
            ImageSize {
                width: 0,
                height: 3,
            },
            vec![],
        )?;
        let mut dst = Image::<u8, 1>::new(
            ImageSize {
                width: 0,
                height: 3,
            },
            vec![],
        )?;

        super::par_iter_rows_val(&src, &mut dst, |s, d| *d = *s);
        super::par_iter_rows_val_two(&src.clone(), &src, &mut dst, |a, b, d| *d = *a + *b);

        Ok(())
    }

    #[test]
    fn par_iter_rows_val_two() -> Result<(), ImageError> {
        let src1 = Image::<u8, 1>::new(
            ImageSize {
                width: 2,
                height: 2,
            },
            vec![1u8, 2, 3, 4],
        )?;
        let src2 = Image::<u8, 1>::new(
            ImageSize {
                width: 2,
                height: 2,
            },
            vec![4u8, 3, 2, 1],
        )?;
        let mut dst = Image::<u8, 1>::from_size_val(src1.size(), 0)?;

        super::par_iter_rows_val_two(&src1, &src2, &mut dst, |a, b, d| *d = *a + *b);
        assert_eq!(dst.as_slice(), &[5u8; 4]);

        Ok(())
    }
}
