use crate::error::ImageError;
use crate::image::{Image, ImageSize};

/// A rectangular region of an image, in pixel coordinates.
///
/// The origin is the top-left corner of the image.
///
/// # Examples
///
/// ```
/// use motempl_image::{ImageSize, Rect};
///
/// let rect = Rect { x: 1, y: 1, width: 2, height: 2 };
/// assert!(rect.fits(ImageSize { width: 4, height: 4 }));
/// assert!(!rect.fits(ImageSize { width: 2, height: 4 }));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    /// The x-coordinate of the top-left corner.
    pub x: usize,
    /// The y-coordinate of the top-left corner.
    pub y: usize,
    /// Width of the rectangle in pixels.
    pub width: usize,
    /// Height of the rectangle in pixels.
    pub height: usize,
}

impl Rect {
    /// Check whether the rectangle lies fully inside an image of the given size.
    pub fn fits(&self, size: ImageSize) -> bool {
        self.x + self.width <= size.width && self.y + self.height <= size.height
    }

    /// The number of pixels covered by the rectangle.
    pub fn area(&self) -> usize {
        self.width * self.height
    }
}

impl std::fmt::Display for Rect {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "Rect {{ x: {}, y: {}, width: {}, height: {} }}",
            self.x, self.y, self.width, self.height
        )
    }
}

/// A borrowed rectangular window into an [`Image`].
///
/// A view borrows the pixel data of its parent image for the duration of
/// one computation; dropping it leaves the image untouched, so narrowing an
/// operation to a region can never leak into subsequent calls.
#[derive(Clone, Copy)]
pub struct ImageView<'a, T, const C: usize> {
    data: &'a [T],
    row_stride: usize,
    rect: Rect,
}

impl<'a, T, const C: usize> ImageView<'a, T, C> {
    /// The rectangle this view covers, in parent image coordinates.
    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Width of the view in pixels.
    pub fn width(&self) -> usize {
        self.rect.width
    }

    /// Height of the view in pixels.
    pub fn height(&self) -> usize {
        self.rect.height
    }

    /// Iterate over the rows of the view as contiguous slices of length
    /// `width * C`.
    pub fn rows(&self) -> impl Iterator<Item = &'a [T]> + '_ {
        (0..self.rect.height).map(move |i| {
            let offset = (self.rect.y + i) * self.row_stride + self.rect.x * C;
            &self.data[offset..offset + self.rect.width * C]
        })
    }

    /// Iterate over all elements of the view in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = &'a T> + '_ {
        self.rows().flat_map(|row| row.iter())
    }
}

impl<T, const C: usize> Image<T, C>
where
    T: Copy,
{
    /// Create a borrowed view over a rectangular region of the image.
    ///
    /// # Errors
    ///
    /// If the rectangle does not fit inside the image bounds, an error is
    /// returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use motempl_image::{Image, ImageSize, Rect};
    ///
    /// let image = Image::<u8, 1>::new(
    ///     ImageSize { width: 4, height: 4 },
    ///     (0u8..16).collect(),
    /// ).unwrap();
    ///
    /// let view = image.view(Rect { x: 1, y: 1, width: 2, height: 2 }).unwrap();
    /// let pixels = view.iter().copied().collect::<Vec<_>>();
    /// assert_eq!(pixels, vec![5u8, 6, 9, 10]);
    /// ```
    pub fn view(&self, rect: Rect) -> Result<ImageView<'_, T, C>, ImageError> {
        if !rect.fits(self.size()) {
            return Err(ImageError::RectOutOfBounds(
                rect.width,
                rect.height,
                rect.x,
                rect.y,
                self.width(),
                self.height(),
            ));
        }

        Ok(ImageView {
            data: self.as_slice(),
            row_stride: self.width() * C,
            rect,
        })
    }

    /// Create a borrowed view covering the whole image.
    pub fn full_view(&self) -> ImageView<'_, T, C> {
        ImageView {
            data: self.as_slice(),
            row_stride: self.width() * C,
            rect: Rect {
                x: 0,
                y: 0,
                width: self.width(),
                height: self.height(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Rect;
    use crate::error::ImageError;
    use crate::image::{Image, ImageSize};

    #[test]
    fn rect_fits() {
        let size = ImageSize {
            width: 4,
            height: 3,
        };
        assert!(Rect {
            x: 0,
            y: 0,
            width: 4,
            height: 3
        }
        .fits(size));
        assert!(!Rect {
            x: 1,
            y: 0,
            width: 4,
            height: 3
        }
        .fits(size));
        assert!(!Rect {
            x: 0,
            y: 2,
            width: 1,
            height: 2
        }
        .fits(size));
    }

    #[test]
    fn view_rows() -> Result<(), ImageError> {
        let image = Image::<u8, 1>::new(
            ImageSize {
                width: 4,
                height: 4,
            },
            (0u8..16).collect(),
        )?;

        let view = image.view(Rect {
            x: 2,
            y: 1,
            width: 2,
            height: 3,
        })?;

        let rows = view.rows().collect::<Vec<_>>();
        assert_eq!(rows, vec![&[6u8, 7][..], &[10u8, 11][..], &[14u8, 15][..]]);

        Ok(())
    }

    #[test]
    fn view_out_of_bounds() -> Result<(), ImageError> {
        let image = Image::<u8, 1>::new(
            ImageSize {
                width: 2,
                height: 2,
            },
            vec![0u8; 4],
        )?;

        let res = image.view(Rect {
            x: 1,
            y: 1,
            width: 2,
            height: 1,
        });
        assert!(res.is_err());

        Ok(())
    }

    #[test]
    fn full_view_covers_image() -> Result<(), ImageError> {
        let image = Image::<f32, 1>::new(
            ImageSize {
                width: 3,
                height: 2,
            },
            vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0],
        )?;

        let view = image.full_view();
        assert_eq!(view.width(), 3);
        assert_eq!(view.height(), 2);
        let sum = view.iter().sum::<f32>();
        assert_eq!(sum, 21.0);

        Ok(())
    }
}
