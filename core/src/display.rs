use crate::state::FrameBuffer;

/// Formats a FrameBuffer as packed RGB24, the layout most texture APIs accept.
///
/// This creates a black and white rendering by:
/// - Flattening the 2D frame buffer into a 1D array by concatenating its rows
/// - Triplicating each pixel to represent its RGB values
/// - Mapping lit pixels to full intensity and unlit ones to zero
///
/// # Arguments
/// * `frame` the frame buffer to convert
pub fn frame_to_rgb24(frame: &FrameBuffer) -> Vec<u8> {
    frame
        .iter()
        .flat_map(|row| row.iter())
        .flat_map(|lit| std::iter::repeat(if *lit { 0xFF } else { 0x00 }).take(3))
        .collect()
}

/// Number of lit pixels in the frame.
pub fn lit_pixels(frame: &FrameBuffer) -> usize {
    frame.iter().flatten().filter(|lit| **lit).count()
}
