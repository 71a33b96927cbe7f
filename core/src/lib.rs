//! An interpreter for the Chip-8 virtual machine.
//!
//! The host owns the window, audio, input polling and pacing; it feeds key state in,
//! calls `Chip8::advance_cpu` at whatever rate it likes and reads the frame buffer out.

pub use chip8::Chip8;
pub use display::{frame_to_rgb24, lit_pixels};
pub use error::Chip8Error;
pub use instruction::{decode, mnemonic, Instruction};
pub use keymap::keymap;
pub use opcode::Opcode;
pub use operations::{Operation, Peripherals};
pub use random::RandomSource;
pub use state::{FrameBuffer, Keypad};

mod chip8;
pub mod constants;
mod display;
mod error;
mod instruction;
mod keymap;
mod opcode;
mod operations;
mod random;
pub mod state;
