use crate::{Frame, FrameError};

/// Cast the pixel data of a frame to a different type.
///
/// # Arguments
///
/// * `src` - The source frame.
/// * `dst` - The destination frame, same size as the source.
/// * `scale` - The scale to multiply the pixel data with.
///
/// Example:
///
/// ```
/// use depthcloud_image::{Frame, FrameSize};
/// use depthcloud_image::ops::cast_and_scale;
///
/// let frame = Frame::<u8, 1>::new(
///     FrameSize {
///         width: 2,
///         height: 1,
///     },
///     vec![0u8, 255],
/// )
/// .unwrap();
///
/// let mut frame_f32 = Frame::from_size_val(frame.size(), 0.0f32).unwrap();
///
/// cast_and_scale(&frame, &mut frame_f32, 1. / 255.0).unwrap();
///
/// assert_eq!(frame_f32.as_slice(), &[0.0f32, 1.0]);
/// ```
pub fn cast_and_scale<T, U, const C: usize>(
    src: &Frame<T, C>,
    dst: &mut Frame<U, C>,
    scale: U,
) -> Result<(), FrameError>
where
    T: Copy + num_traits::NumCast,
    U: Copy + num_traits::NumCast + std::ops::Mul<U, Output = U>,
{
    if src.size() != dst.size() {
        return Err(FrameError::InvalidFrameSize(
            src.width(),
            src.height(),
            dst.width(),
            dst.height(),
        ));
    }

    dst.as_slice_mut()
        .iter_mut()
        .zip(src.as_slice().iter())
        .try_for_each(|(out, &inp)| {
            let x = U::from(inp).ok_or(FrameError::CastError(std::any::type_name::<U>()))?;
            *out = x * scale;
            Ok::<(), FrameError>(())
        })?;

    Ok(())
}
