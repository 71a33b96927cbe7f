use std::collections::VecDeque;
use std::io::Read;

use log::{debug, trace, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::constants::{
    INSTRUCTION_SIZE, KEY_COUNT, MAX_PROGRAM_SIZE, MAX_SAVED_STATES, MEMORY_SIZE, PROGRAM_START,
    REGISTER_COUNT,
};
use crate::error::Chip8Error;
use crate::instruction::{decode, mnemonic};
use crate::operations::Peripherals;
use crate::random::RandomSource;
use crate::state::{FrameBuffer, Keypad, State};

/// # Chip-8
/// Chip-8 is a virtual machine and corresponding interpreted language.
///
/// Tracks:
///  - current `state`
///  - `previous_states` for rewinding
///  - `pressed_keys` with public interfaces for manipulating them
///  - the `rng` feeding `RND`
///
/// Supplies interfaces for:
/// - loading roms
/// - pressing and releasing keys
/// - advancing and reversing the CPU
/// - inspecting its frame buffer for rendering by some display
///
/// Pacing is up to the host: every call to `advance_cpu` executes exactly one
/// instruction and then decrements both timers once.
pub struct Chip8 {
    state: State,
    previous_states: VecDeque<State>,
    max_saved_states: usize,
    pressed_keys: Keypad,
    rng: Box<dyn RandomSource>,
}

impl Chip8 {
    /// An interpreter whose `RND` draws from an entropy-seeded generator.
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// An interpreter whose `RND` draws from `rng`.
    pub fn with_rng(rng: impl RandomSource + 'static) -> Self {
        Chip8 {
            state: State::new(),
            previous_states: VecDeque::new(),
            max_saved_states: MAX_SAVED_STATES,
            pressed_keys: [false; KEY_COUNT],
            rng: Box::new(rng),
        }
    }

    /// Keep at most `depth` past states for `reverse_cpu`; 0 turns rewinding off.
    pub fn with_history(mut self, depth: usize) -> Self {
        self.max_saved_states = depth;
        self.previous_states.truncate(depth);
        self
    }

    /// Load a rom from a source file
    ///
    /// # Arguments
    /// * `reader` a file reader that contains a ROM
    pub fn load_rom(&mut self, reader: &mut dyn Read) -> Result<(), Chip8Error> {
        let mut rom = Vec::new();
        reader.read_to_end(&mut rom)?;
        self.load_program(&rom)
    }

    /// Copies a program image to `PROGRAM_START`.
    /// Nothing is written unless the whole image fits.
    pub fn load_program(&mut self, program: &[u8]) -> Result<(), Chip8Error> {
        if program.len() > MAX_PROGRAM_SIZE {
            return Err(Chip8Error::CapacityExceeded {
                size: program.len(),
                max: MAX_PROGRAM_SIZE,
            });
        }
        let start = usize::from(PROGRAM_START);
        self.state.memory[start..start + program.len()].copy_from_slice(program);
        debug!(
            "loaded {} byte program at {:#05X}",
            program.len(),
            PROGRAM_START
        );
        Ok(())
    }

    /// Returns the FrameBuffer if the display should be redrawn, lowering the draw flag
    pub fn take_frame(&mut self) -> Option<&FrameBuffer> {
        if self.state.draw_flag {
            self.state.draw_flag = false;
            Some(&self.state.frame_buffer)
        } else {
            None
        }
    }

    /// The current FrameBuffer, whether or not it changed
    pub fn frame(&self) -> &FrameBuffer {
        &self.state.frame_buffer
    }

    /// Set the pressed status of key
    ///
    /// # Arguments
    /// * `key` the 8-bit representation of the key that was pressed
    pub fn key_press(&mut self, key: u8) -> Result<(), Chip8Error> {
        self.set_key(key, true)
    }

    /// Unset the pressed status of key
    ///
    /// # Arguments
    /// * `key` the 8-bit representation of the key that was released
    pub fn key_release(&mut self, key: u8) -> Result<(), Chip8Error> {
        self.set_key(key, false)
    }

    /// Replace the pressed status of every key at once
    pub fn set_keys(&mut self, keys: Keypad) {
        self.pressed_keys = keys;
    }

    fn set_key(&mut self, key: u8, pressed: bool) -> Result<(), Chip8Error> {
        let slot = self
            .pressed_keys
            .get_mut(usize::from(key))
            .ok_or(Chip8Error::KeyOutOfRange { key })?;
        *slot = pressed;
        Ok(())
    }

    /// Advances the CPU by a single cycle
    /// - fetches the opcode at the pc and moves the pc past it
    /// - executes it; unrecognized opcodes do nothing
    /// - decrements the timers
    ///
    /// `LD Vx, K` waits for a key by rewinding the pc onto itself, so the host has to keep
    /// calling this while it updates the keypad for the wait to ever end.
    ///
    /// On error the interpreter is left exactly as it was before the call.
    pub fn advance_cpu(&mut self) -> Result<(), Chip8Error> {
        let mut next = self.state;
        let op = next.fetch()?;
        next.pc += INSTRUCTION_SIZE;

        let mut io = Peripherals {
            keys: &self.pressed_keys,
            rng: &mut *self.rng,
        };
        match decode(op) {
            Some(instruction) => {
                trace!(
                    "{:04X} {:<16} v{:02X?} i{:04X} pc{:04X}",
                    op.0,
                    instruction.format(op),
                    next.v,
                    next.i,
                    self.state.pc
                );
                (instruction.execute)(op, &mut next, &mut io)?;
            }
            None => warn!(
                "skipping unrecognized opcode {} at {:#05X}",
                op, self.state.pc
            ),
        }
        next.tick_timers();

        self.save_state();
        self.state = next;
        Ok(())
    }

    /// Reverses the CPU by a single cycle if possible
    /// - if there are previous_states, pops the last one and restores it
    /// - marks the restored frame as changed, since the host is showing a later one
    /// - returns whether there was anything to restore
    pub fn reverse_cpu(&mut self) -> bool {
        match self.previous_states.pop_front() {
            Some(state) => {
                self.state = state;
                self.state.draw_flag = true;
                debug!("rewound to pc {:#05X}", self.state.pc);
                true
            }
            None => false,
        }
    }

    /// Puts the current state in previous_states
    /// - if there are already `max_saved_states` saved then the oldest is dropped
    fn save_state(&mut self) {
        if self.max_saved_states == 0 {
            return;
        }
        if self.previous_states.len() == self.max_saved_states {
            self.previous_states.pop_back();
        }
        self.previous_states.push_front(self.state);
    }

    /// Disassembly of the instruction the next cycle will execute
    pub fn next_instruction(&self) -> Result<String, Chip8Error> {
        Ok(mnemonic(self.state.fetch()?))
    }

    /// Whether a tone should currently be playing
    pub fn sound_active(&self) -> bool {
        self.state.sound_timer > 0
    }

    pub fn registers(&self) -> &[u8; REGISTER_COUNT] {
        &self.state.v
    }

    pub fn index(&self) -> u16 {
        self.state.i
    }

    pub fn pc(&self) -> u16 {
        self.state.pc
    }

    pub fn sp(&self) -> u8 {
        self.state.sp
    }

    pub fn delay_timer(&self) -> u8 {
        self.state.delay_timer
    }

    pub fn sound_timer(&self) -> u8 {
        self.state.sound_timer
    }

    pub fn memory(&self) -> &[u8; MEMORY_SIZE] {
        &self.state.memory
    }

    pub fn keys(&self) -> &Keypad {
        &self.pressed_keys
    }
}

impl Default for Chip8 {
    fn default() -> Self {
        Self::new()
    }
}
