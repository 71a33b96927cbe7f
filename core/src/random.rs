use rand::RngCore;

/// Supplies the bytes consumed by `RND Vx, kk`.
///
/// Any `rand` generator works out of the box; tests hand in a deterministic one
/// such as `rand::rngs::mock::StepRng`.
pub trait RandomSource {
    fn next_byte(&mut self) -> u8;
}

impl<R: RngCore> RandomSource for R {
    fn next_byte(&mut self) -> u8 {
        (self.next_u32() & 0xFF) as u8
    }
}
