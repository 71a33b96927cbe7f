use std::ops::Range;

use crate::constants::{
    DISPLAY_HEIGHT, DISPLAY_WIDTH, FONT_START, INSTRUCTION_SIZE, KEY_COUNT, MEMORY_SIZE,
    PROGRAM_START, REGISTER_COUNT, SPRITE_SHEET, STACK_DEPTH,
};
use crate::error::Chip8Error;
use crate::opcode::Opcode;

/// The FrameBuffer is indexed as [y][x]; `true` is a lit pixel.
pub type FrameBuffer = [[bool; DISPLAY_WIDTH]; DISPLAY_HEIGHT];

/// Pressed status of keys 0..F, owned by the host.
pub type Keypad = [bool; KEY_COUNT];

/// A snapshot of the interpreter's internal state
///
/// ## CPU
/// Registers
/// - (v) 16 primary 8-bit registers (V0..VF)
///     - the first 15 (V0..VE) are general purpose registers
///     - the 16th (VF) is the carry/borrow/collision flag
/// - (i) a 16-bit memory address register
///
/// Counter
/// - (pc) a 16-bit program counter, already past the current instruction while it executes
///
/// Stack
/// - (stack) 16 return addresses
/// - (sp) the number of occupied stack slots
///
/// Timers
/// - 2 8-bit timers (delay & sound), decremented once per executed instruction
///
/// ## Memory
/// - 4096 bytes of addressable memory
///     - the font lives at `FONT_START`
///     - programs are loaded at `PROGRAM_START`
/// - 64x32 frame buffer
///     - `draw_flag` is raised whenever an instruction touches it
#[derive(Copy, Clone, Debug)]
pub struct State {
    pub v: [u8; REGISTER_COUNT],
    pub i: u16,
    pub pc: u16,
    pub sp: u8,
    pub stack: [u16; STACK_DEPTH],
    pub delay_timer: u8,
    pub sound_timer: u8,
    pub memory: [u8; MEMORY_SIZE],
    pub frame_buffer: FrameBuffer,
    pub draw_flag: bool,
}

impl State {
    pub fn new() -> Self {
        let mut memory = [0; MEMORY_SIZE];
        let font = FONT_START as usize;
        memory[font..font + SPRITE_SHEET.len()].copy_from_slice(&SPRITE_SHEET);

        State {
            v: [0; REGISTER_COUNT],
            i: 0,
            pc: PROGRAM_START,
            sp: 0,
            stack: [0; STACK_DEPTH],
            delay_timer: 0,
            sound_timer: 0,
            memory,
            frame_buffer: [[false; DISPLAY_WIDTH]; DISPLAY_HEIGHT],
            draw_flag: false,
        }
    }

    /// Reads the opcode currently pointed at by the pc.
    /// Memory is stored as bytes, but opcodes are 16 bits so we combine two subsequent bytes.
    pub fn fetch(&self) -> Result<Opcode, Chip8Error> {
        let range = self.memory_range(self.pc, 2)?;
        Ok(Opcode::from_bytes(
            self.memory[range.start],
            self.memory[range.start + 1],
        ))
    }

    /// The memory indices `start..start + len`, if all of them are addressable.
    /// Otherwise the error names the first byte that is not.
    pub fn memory_range(&self, start: u16, len: usize) -> Result<Range<usize>, Chip8Error> {
        let start = usize::from(start);
        let end = start + len;
        if end > MEMORY_SIZE {
            return Err(Chip8Error::AddressOutOfRange {
                address: start.max(MEMORY_SIZE),
            });
        }
        Ok(start..end)
    }

    /// Pushes a return address, failing instead of writing past the last slot.
    ///
    /// Stack errors are raised mid-instruction, after pc has moved past the
    /// opcode, so they report the address of the instruction itself.
    pub fn push(&mut self, address: u16) -> Result<(), Chip8Error> {
        let slot = usize::from(self.sp);
        if slot >= STACK_DEPTH {
            return Err(Chip8Error::StackOverflow {
                pc: self.executing_address(),
            });
        }
        self.stack[slot] = address;
        self.sp += 1;
        Ok(())
    }

    pub fn pop(&mut self) -> Result<u16, Chip8Error> {
        if self.sp == 0 {
            return Err(Chip8Error::StackUnderflow {
                pc: self.executing_address(),
            });
        }
        self.sp -= 1;
        Ok(self.stack[usize::from(self.sp)])
    }

    fn executing_address(&self) -> u16 {
        self.pc.wrapping_sub(INSTRUCTION_SIZE)
    }

    /// Decrements both timers toward zero.
    pub fn tick_timers(&mut self) {
        self.delay_timer = self.delay_timer.saturating_sub(1);
        self.sound_timer = self.sound_timer.saturating_sub(1);
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}
