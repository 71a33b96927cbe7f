/// Bytes of addressable memory.
pub const MEMORY_SIZE: usize = 4096;

/// Highest valid memory address.
pub const MAX_ADDRESS: u16 = (MEMORY_SIZE - 1) as u16;

/// Programs are loaded here and execution begins here.
/// Everything below is reserved for the interpreter and its font.
pub const PROGRAM_START: u16 = 0x200;

/// Largest program image that fits between `PROGRAM_START` and the end of memory.
pub const MAX_PROGRAM_SIZE: usize = MEMORY_SIZE - PROGRAM_START as usize;

/// Where `SPRITE_SHEET` lives in memory.
pub const FONT_START: u16 = 0x50;

/// Every glyph in `SPRITE_SHEET` is 5 rows tall.
pub const GLYPH_HEIGHT: u16 = 5;

pub const DISPLAY_WIDTH: usize = 64;
pub const DISPLAY_HEIGHT: usize = 32;

pub const REGISTER_COUNT: usize = 16;
pub const KEY_COUNT: usize = 16;
pub const STACK_DEPTH: usize = 16;

/// VF doubles as the carry, borrow, shift-out and collision flag.
pub const FLAG_REGISTER: usize = 0xF;

/// Width in bytes of every instruction.
pub const INSTRUCTION_SIZE: u16 = 2;

/// Number of past states kept around for rewinding by default.
pub const MAX_SAVED_STATES: usize = 600;

/// # Sprite Sheet
/// Hexadecimal digits 0..F, each 8 pixels wide (only the high nibble is used) and 5 rows tall.
///
/// ```text
/// 0xF0  ####
/// 0x90  #  #
/// 0x90  #  #
/// 0x90  #  #
/// 0xF0  ####
/// ```
pub const SPRITE_SHEET: [u8; 80] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];
