use thiserror::Error;

/// Everything that can stop a program from loading or an instruction from executing.
#[derive(Debug, Error)]
pub enum Chip8Error {
    #[error("unable to read program: {0}")]
    Io(#[from] std::io::Error),

    #[error("program is {size} bytes but only {max} bytes are available")]
    CapacityExceeded { size: usize, max: usize },

    #[error("call stack overflow at pc {pc:#05X}")]
    StackOverflow { pc: u16 },

    #[error("return with an empty call stack at pc {pc:#05X}")]
    StackUnderflow { pc: u16 },

    #[error("address {address:#06X} is outside of addressable memory")]
    AddressOutOfRange { address: usize },

    #[error("key {key:#04X} does not exist on the keypad")]
    KeyOutOfRange { key: u8 },
}
