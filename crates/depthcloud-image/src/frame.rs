use crate::error::FrameError;

/// Frame size in pixels
///
/// A struct to represent the size of a sensor frame in pixels.
///
/// # Examples
///
/// ```
/// use depthcloud_image::FrameSize;
///
/// let frame_size = FrameSize {
///   width: 640,
///   height: 480,
/// };
///
/// assert_eq!(frame_size.width, 640);
/// assert_eq!(frame_size.height, 480);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameSize {
    /// Width of the frame in pixels
    pub width: usize,
    /// Height of the frame in pixels
    pub height: usize,
}

impl std::fmt::Display for FrameSize {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "FrameSize {{ width: {}, height: {} }}",
            self.width, self.height
        )
    }
}

impl From<[usize; 2]> for FrameSize {
    fn from(size: [usize; 2]) -> Self {
        FrameSize {
            width: size[0],
            height: size[1],
        }
    }
}

/// Represents a single frame delivered by a sensor stream.
///
/// The frame is stored row-major with shape (H, W, C). A frame with zero
/// width or height stands for an absent stream and is passed through by
/// every operation that consumes frames.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame<T, const CHANNELS: usize> {
    size: FrameSize,
    data: Vec<T>,
}

/// A depth frame in sensor depth units. A zero sample marks an invalid pixel.
pub type DepthFrame = Frame<u16, 1>;

/// An RGB color frame with 8 bits per channel.
pub type ColorFrame = Frame<u8, 3>;

impl<T, const CHANNELS: usize> Frame<T, CHANNELS> {
    /// Create a new frame from pixel data.
    ///
    /// # Arguments
    ///
    /// * `size` - The size of the frame in pixels.
    /// * `data` - The pixel data of the frame, row-major, channels interleaved.
    ///
    /// # Errors
    ///
    /// If the length of the pixel data does not match the frame size, an error is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use depthcloud_image::{DepthFrame, FrameSize};
    ///
    /// let frame = DepthFrame::new(
    ///     FrameSize {
    ///         width: 4,
    ///         height: 2,
    ///     },
    ///     vec![0u16; 4 * 2],
    /// )
    /// .unwrap();
    ///
    /// assert_eq!(frame.size().width, 4);
    /// assert_eq!(frame.size().height, 2);
    /// ```
    pub fn new(size: FrameSize, data: Vec<T>) -> Result<Self, FrameError> {
        if data.len() != size.width * size.height * CHANNELS {
            return Err(FrameError::InvalidChannelShape(
                data.len(),
                size.width * size.height * CHANNELS,
            ));
        }

        Ok(Self { size, data })
    }

    /// Create a new frame with the given size and a constant pixel value.
    pub fn from_size_val(size: FrameSize, val: T) -> Result<Self, FrameError>
    where
        T: Clone,
    {
        let data = vec![val; size.width * size.height * CHANNELS];
        Frame::new(size, data)
    }

    /// Create an empty frame, the degenerate value standing for an absent stream.
    pub fn empty() -> Self {
        Self {
            size: FrameSize {
                width: 0,
                height: 0,
            },
            data: Vec::new(),
        }
    }

    /// Get the size of the frame in pixels.
    pub fn size(&self) -> FrameSize {
        self.size
    }

    /// Get the width of the frame in pixels.
    pub fn width(&self) -> usize {
        self.size.width
    }

    /// Get the height of the frame in pixels.
    pub fn height(&self) -> usize {
        self.size.height
    }

    /// Get the number of channels in the frame.
    pub fn num_channels(&self) -> usize {
        CHANNELS
    }

    /// Check if the frame has no pixels.
    pub fn is_empty(&self) -> bool {
        self.size.width == 0 || self.size.height == 0
    }

    /// Get the pixel data as a flat slice.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Get the pixel data as a mutable flat slice.
    pub fn as_slice_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Consume the frame and return the underlying pixel data.
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Get one row of pixel data, `width * CHANNELS` samples long.
    pub fn row(&self, y: usize) -> Option<&[T]> {
        if y >= self.size.height {
            return None;
        }
        let stride = self.size.width * CHANNELS;
        Some(&self.data[y * stride..(y + 1) * stride])
    }

    /// Get the channel values of the pixel at (x, y).
    pub fn pixel(&self, x: usize, y: usize) -> Option<&[T]> {
        if x >= self.size.width || y >= self.size.height {
            return None;
        }
        let offset = (y * self.size.width + x) * CHANNELS;
        Some(&self.data[offset..offset + CHANNELS])
    }
}
