use std::collections::VecDeque;

use log::debug;

use motempl_image::{Image, ImageError, ImageSize, Rect};
use motempl_imgproc::core::abs_diff;
use motempl_imgproc::motion::{
    global_orientation, motion_gradient, segment_motion, update_motion_history, MotionSegment,
};
use motempl_imgproc::parallel;
use motempl_imgproc::threshold::threshold_binary;

use crate::error::TrackerError;

/// Configuration of a [`MotionHistoryTracker`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrackerConfig {
    /// Number of recent frames retained for silhouette differencing.
    pub buffer_count: usize,
    /// Pixel-intensity delta considered motion, in `[0, 255]`.
    pub diff_threshold: u8,
    /// Seconds of history retained before a pixel's motion ages out.
    pub mhi_duration: f64,
    /// Maximal reliable motion-age spread for orientation estimation, in seconds.
    pub max_time_delta: f64,
    /// Minimal reliable motion-age spread for orientation estimation, in seconds.
    pub min_time_delta: f64,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            buffer_count: 20,
            diff_threshold: 30,
            mhi_duration: 1.0,
            max_time_delta: 0.5,
            min_time_delta: 0.05,
        }
    }
}

impl TrackerConfig {
    fn validate(&self) -> Result<(), TrackerError> {
        if self.buffer_count == 0 {
            return Err(TrackerError::InvalidConfiguration(
                "buffer_count must hold at least one frame".to_string(),
            ));
        }
        if self.mhi_duration <= 0.0 {
            return Err(TrackerError::InvalidConfiguration(
                "mhi_duration must be positive".to_string(),
            ));
        }
        if self.min_time_delta <= 0.0 || self.max_time_delta <= 0.0 {
            return Err(TrackerError::InvalidConfiguration(
                "time deltas must be positive".to_string(),
            ));
        }
        if self.min_time_delta > self.max_time_delta {
            return Err(TrackerError::InvalidConfiguration(
                "min_time_delta must not exceed max_time_delta".to_string(),
            ));
        }
        Ok(())
    }
}

/// Dominant direction and motion pixel count of a queried region.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MotionInfo {
    /// Dominant motion direction in degrees in `[0, 360)`, measured in the
    /// image coordinate system (top-left origin).
    pub angle: f64,
    /// Number of silhouette pixels flagged as motion inside the region by
    /// the most recent update.
    pub pixel_count: usize,
}

/// The derived images, allocated once from the first frame's size and
/// mutated in place for the tracker's lifetime.
struct DerivedImages {
    diff: Image<u8, 1>,
    silhouette: Image<u8, 1>,
    mhi: Image<f32, 1>,
    motion_mask: Image<u8, 1>,
    grad_mask: Image<u8, 1>,
    orientation: Image<f32, 1>,
    seg_mask: Option<Image<f32, 1>>,
}

impl DerivedImages {
    fn allocate(size: ImageSize) -> Result<Self, ImageError> {
        Ok(Self {
            diff: Image::from_size_val(size, 0u8)?,
            silhouette: Image::from_size_val(size, 0u8)?,
            mhi: Image::from_size_val(size, 0.0f32)?,
            motion_mask: Image::from_size_val(size, 0u8)?,
            grad_mask: Image::from_size_val(size, 0u8)?,
            orientation: Image::from_size_val(size, 0.0f32)?,
            seg_mask: None,
        })
    }
}

/// Tracks the motion of frames over time.
///
/// The tracker keeps a bounded buffer of the most recent frames, compares
/// every new frame against the oldest buffered one, accumulates the binary
/// silhouette into a decaying motion history image and derives a motion
/// mask and a motion-direction field from it. Connected motion components
/// and per-region direction statistics can then be queried.
///
/// All operations are synchronous and must be serialized by the caller;
/// `update` and `motion_components` take `&mut self`, so exclusive access
/// is enforced at compile time.
///
/// # Examples
///
/// ```
/// use motempl_image::{Image, ImageSize, Rect};
/// use motempl_tracking::{MotionHistoryTracker, TrackerConfig};
///
/// let size = ImageSize { width: 4, height: 4 };
/// let mut tracker = MotionHistoryTracker::new(TrackerConfig::default(), 0.0).unwrap();
///
/// tracker.update(Image::from_size_val(size, 50u8).unwrap(), 0.0).unwrap();
/// tracker.update(Image::from_size_val(size, 200u8).unwrap(), 0.1).unwrap();
///
/// let info = tracker
///     .motion_info(Rect { x: 0, y: 0, width: 4, height: 4 })
///     .unwrap();
/// assert_eq!(info.pixel_count, 16);
/// ```
pub struct MotionHistoryTracker {
    config: TrackerConfig,
    init_time: f64,
    last_time: f64,
    frames: VecDeque<Image<u8, 1>>,
    images: Option<DerivedImages>,
}

impl MotionHistoryTracker {
    /// Create a new tracker.
    ///
    /// # Arguments
    ///
    /// * `config` - The tracker configuration.
    /// * `init_time` - The construction instant in seconds, in the same
    ///   clock as the timestamps later passed to [`update`](Self::update).
    ///   All motion ages are expressed relative to this origin.
    ///
    /// # Errors
    ///
    /// Fails with [`TrackerError::InvalidConfiguration`] when the buffer
    /// capacity is zero or a duration parameter is non-positive.
    pub fn new(config: TrackerConfig, init_time: f64) -> Result<Self, TrackerError> {
        config.validate()?;
        Ok(Self {
            config,
            init_time,
            last_time: 0.0,
            frames: VecDeque::with_capacity(config.buffer_count),
            images: None,
        })
    }

    /// The tracker configuration.
    pub fn config(&self) -> TrackerConfig {
        self.config
    }

    /// Number of frames currently held in the rolling buffer.
    pub fn buffered_frames(&self) -> usize {
        self.frames.len()
    }

    /// Elapsed seconds (since `init_time`) of the most recent update.
    pub fn last_time(&self) -> f64 {
        self.last_time
    }

    /// Submit a new frame to the tracker.
    ///
    /// Runs the full accumulation pipeline: the frame is admitted into the
    /// rolling buffer (evicting the oldest frame when at capacity), the
    /// binary silhouette against the oldest buffered frame is computed, the
    /// motion history image is stamped and decayed, and the motion mask and
    /// orientation field are refreshed.
    ///
    /// Timestamps must be non-decreasing across calls and are expressed in
    /// the same clock as `init_time`. The frame is moved into the tracker
    /// and retained for up to `buffer_count` subsequent calls.
    ///
    /// # Errors
    ///
    /// Fails with [`TrackerError::EmptyFrame`] when the frame has zero
    /// area, and with [`TrackerError::DimensionMismatch`] when the frame
    /// size differs from the size established by the first submitted
    /// frame; in either case no tracker state is modified.
    pub fn update(&mut self, frame: Image<u8, 1>, timestamp: f64) -> Result<(), TrackerError> {
        let size = frame.size();
        if size.width == 0 || size.height == 0 {
            return Err(TrackerError::EmptyFrame(size));
        }
        if let Some(images) = &self.images {
            if size != images.mhi.size() {
                return Err(TrackerError::DimensionMismatch(size, images.mhi.size()));
            }
        }

        let ts = (timestamp - self.init_time) as f32;
        let duration = self.config.mhi_duration as f32;

        if self.images.is_none() {
            self.images = Some(DerivedImages::allocate(size)?);
        }
        let images = self.images.as_mut().ok_or(TrackerError::NotReady)?;

        // admit the frame, evicting the oldest one first when at capacity
        if self.frames.len() == self.config.buffer_count {
            self.frames.pop_front();
        }

        // the reference frame is the buffer front after insertion: until the
        // buffer fills this is the first frame ever seen, afterwards the
        // frame exactly buffer_count updates behind
        let reference = self.frames.front().unwrap_or(&frame);
        abs_diff(&frame, reference, &mut images.diff)?;
        threshold_binary(
            &images.diff,
            &mut images.silhouette,
            self.config.diff_threshold,
            1,
        )?;
        self.frames.push_back(frame);

        update_motion_history(&images.silhouette, &mut images.mhi, ts, duration)?;

        // rescale motion recency into [0, 255]; pixels without recorded
        // motion stay at zero
        let floor = ts - duration;
        parallel::par_iter_rows_val(&images.mhi, &mut images.motion_mask, |t, m| {
            *m = if *t <= 0.0 {
                0
            } else {
                ((*t - floor) * 255.0 / duration).clamp(0.0, 255.0) as u8
            };
        });

        motion_gradient(
            &images.mhi,
            &mut images.grad_mask,
            &mut images.orientation,
            self.config.min_time_delta as f32,
            self.config.max_time_delta as f32,
        )?;

        self.last_time = f64::from(ts);
        debug!(
            "motion history updated: ts={:.3}s, buffered frames={}",
            ts,
            self.frames.len()
        );

        Ok(())
    }

    /// The current motion mask: per-pixel motion recency rescaled into
    /// `[0, 255]`, 255 being motion at the latest update.
    ///
    /// # Errors
    ///
    /// Fails with [`TrackerError::NotReady`] before the first update.
    pub fn mask(&self) -> Result<&Image<u8, 1>, TrackerError> {
        let images = self.images.as_ref().ok_or(TrackerError::NotReady)?;
        Ok(&images.motion_mask)
    }

    /// The accumulated motion history image: per-pixel elapsed seconds of
    /// the most recent detected motion, zero where no recent motion exists.
    ///
    /// # Errors
    ///
    /// Fails with [`TrackerError::NotReady`] before the first update.
    pub fn motion_history(&self) -> Result<&Image<f32, 1>, TrackerError> {
        let images = self.images.as_ref().ok_or(TrackerError::NotReady)?;
        Ok(&images.mhi)
    }

    /// Segment the current motion history into connected motion components.
    ///
    /// Only pixels whose motion age falls within `max_time_delta` of the
    /// most recent update are considered. The segmentation mask is
    /// allocated lazily on the first call and reused afterwards. Ownership
    /// of the returned components is handed to the caller.
    ///
    /// # Errors
    ///
    /// Fails with [`TrackerError::NotReady`] before the first update.
    pub fn motion_components(&mut self) -> Result<Vec<MotionSegment>, TrackerError> {
        let images = self.images.as_mut().ok_or(TrackerError::NotReady)?;

        if images.seg_mask.is_none() {
            images.seg_mask = Some(Image::from_size_val(images.mhi.size(), 0.0f32)?);
        }
        let seg_mask = images.seg_mask.as_mut().ok_or(TrackerError::NotReady)?;

        let segments = segment_motion(
            &images.mhi,
            seg_mask,
            self.last_time as f32,
            self.config.max_time_delta as f32,
        )?;
        debug!("segmented {} motion components", segments.len());

        Ok(segments)
    }

    /// Compute the dominant motion direction and the motion pixel count of
    /// a rectangular region, typically one returned by
    /// [`motion_components`](Self::motion_components).
    ///
    /// The direction is the recency-weighted global orientation of the
    /// region, converted to the top-left image origin (`360 - angle` of the
    /// estimator's bottom-left convention). The computation runs over
    /// borrowed region views, so the full-image state is untouched on every
    /// exit path.
    ///
    /// # Errors
    ///
    /// Fails with [`TrackerError::NotReady`] before the first update and
    /// with [`TrackerError::InvalidRegion`] when the rectangle does not fit
    /// the tracked image bounds.
    pub fn motion_info(&self, rect: Rect) -> Result<MotionInfo, TrackerError> {
        let images = self.images.as_ref().ok_or(TrackerError::NotReady)?;

        if !rect.fits(images.mhi.size()) {
            return Err(TrackerError::InvalidRegion(rect, images.mhi.size()));
        }

        let raw = global_orientation(
            &images.orientation.view(rect)?,
            &images.grad_mask.view(rect)?,
            &images.mhi.view(rect)?,
            self.last_time as f32,
            self.config.mhi_duration as f32,
        )?;

        // the estimator works in the mathematical convention (y up); flip
        // for the top-left image origin
        let angle = (360.0 - f64::from(raw)).rem_euclid(360.0);

        let pixel_count = images
            .silhouette
            .view(rect)?
            .iter()
            .map(|&v| v as usize)
            .sum();

        Ok(MotionInfo { angle, pixel_count })
    }
}

#[cfg(test)]
mod tests {
    use super::{MotionHistoryTracker, TrackerConfig};
    use crate::error::TrackerError;
    use motempl_image::{Image, ImageSize, Rect};

    fn gray_frame(size: ImageSize, val: u8) -> Image<u8, 1> {
        Image::from_size_val(size, val).unwrap()
    }

    #[test]
    fn rejects_zero_buffer_count() {
        let config = TrackerConfig {
            buffer_count: 0,
            ..Default::default()
        };
        assert!(matches!(
            MotionHistoryTracker::new(config, 0.0),
            Err(TrackerError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn rejects_non_positive_durations() {
        let config = TrackerConfig {
            mhi_duration: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            MotionHistoryTracker::new(config, 0.0),
            Err(TrackerError::InvalidConfiguration(_))
        ));

        let config = TrackerConfig {
            min_time_delta: -0.1,
            ..Default::default()
        };
        assert!(MotionHistoryTracker::new(config, 0.0).is_err());
    }

    #[test]
    fn queries_before_first_update_fail() -> Result<(), TrackerError> {
        let mut tracker = MotionHistoryTracker::new(TrackerConfig::default(), 0.0)?;

        assert_eq!(tracker.mask().err(), Some(TrackerError::NotReady));
        assert_eq!(
            tracker.motion_components().err(),
            Some(TrackerError::NotReady)
        );
        let rect = Rect {
            x: 0,
            y: 0,
            width: 1,
            height: 1,
        };
        assert_eq!(tracker.motion_info(rect).err(), Some(TrackerError::NotReady));

        Ok(())
    }

    #[test]
    fn rejects_resized_frames() -> Result<(), TrackerError> {
        let size = ImageSize {
            width: 4,
            height: 4,
        };
        let other = ImageSize {
            width: 4,
            height: 2,
        };
        let mut tracker = MotionHistoryTracker::new(TrackerConfig::default(), 0.0)?;
        tracker.update(gray_frame(size, 100), 0.0)?;

        let res = tracker.update(gray_frame(other, 100), 0.1);
        assert_eq!(
            res,
            Err(TrackerError::DimensionMismatch(other, size))
        );
        // the failed update left the buffer untouched
        assert_eq!(tracker.buffered_frames(), 1);

        Ok(())
    }

    #[test]
    fn rejects_zero_area_frames() -> Result<(), TrackerError> {
        let mut tracker = MotionHistoryTracker::new(TrackerConfig::default(), 0.0)?;

        for empty in [
            ImageSize {
                width: 0,
                height: 0,
            },
            ImageSize {
                width: 0,
                height: 3,
            },
            ImageSize {
                width: 3,
                height: 0,
            },
        ] {
            let res = tracker.update(gray_frame(empty, 0), 0.0);
            assert_eq!(res, Err(TrackerError::EmptyFrame(empty)));
        }

        // the rejected frames left no state behind; a well-formed frame is
        // still accepted and establishes the tracked size
        assert_eq!(tracker.buffered_frames(), 0);
        let size = ImageSize {
            width: 4,
            height: 4,
        };
        tracker.update(gray_frame(size, 100), 0.1)?;
        assert_eq!(tracker.mask()?.size(), size);

        Ok(())
    }

    #[test]
    fn buffer_never_exceeds_capacity() -> Result<(), TrackerError> {
        let size = ImageSize {
            width: 4,
            height: 4,
        };
        let config = TrackerConfig {
            buffer_count: 3,
            ..Default::default()
        };
        let mut tracker = MotionHistoryTracker::new(config, 0.0)?;

        for i in 0..10 {
            tracker.update(gray_frame(size, 100), i as f64 * 0.1)?;
            assert!(tracker.buffered_frames() <= 3);
        }
        assert_eq!(tracker.buffered_frames(), 3);

        Ok(())
    }

    #[test]
    fn invalid_region_is_rejected() -> Result<(), TrackerError> {
        let size = ImageSize {
            width: 4,
            height: 4,
        };
        let mut tracker = MotionHistoryTracker::new(TrackerConfig::default(), 0.0)?;
        tracker.update(gray_frame(size, 100), 0.0)?;

        let rect = Rect {
            x: 3,
            y: 3,
            width: 2,
            height: 2,
        };
        assert_eq!(
            tracker.motion_info(rect).err(),
            Some(TrackerError::InvalidRegion(rect, size))
        );

        // a failed region query leaves full-image queries intact
        let full = Rect {
            x: 0,
            y: 0,
            width: 4,
            height: 4,
        };
        assert!(tracker.motion_info(full).is_ok());

        Ok(())
    }
}
