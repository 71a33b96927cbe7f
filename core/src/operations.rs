use crate::constants::{
    DISPLAY_HEIGHT, DISPLAY_WIDTH, FLAG_REGISTER, FONT_START, GLYPH_HEIGHT, INSTRUCTION_SIZE,
    KEY_COUNT, MAX_ADDRESS,
};
use crate::error::Chip8Error;
use crate::opcode::Opcode;
use crate::random::RandomSource;
use crate::state::{Keypad, State};

/// Everything an instruction may consult that isn't part of the machine's own state.
pub struct Peripherals<'a> {
    pub keys: &'a Keypad,
    pub rng: &'a mut dyn RandomSource,
}

/// Every operation runs after the pc has been moved past its own opcode.
pub type Operation =
    fn(op: Opcode, state: &mut State, io: &mut Peripherals<'_>) -> Result<(), Chip8Error>;

/// clear
pub fn clr(_op: Opcode, state: &mut State, _io: &mut Peripherals<'_>) -> Result<(), Chip8Error> {
    state.frame_buffer = [[false; DISPLAY_WIDTH]; DISPLAY_HEIGHT];
    state.draw_flag = true;
    Ok(())
}

/// PC = STACK.pop()
pub fn rts(_op: Opcode, state: &mut State, _io: &mut Peripherals<'_>) -> Result<(), Chip8Error> {
    state.pc = state.pop()?;
    Ok(())
}

/// PC = addr
pub fn jump(op: Opcode, state: &mut State, _io: &mut Peripherals<'_>) -> Result<(), Chip8Error> {
    state.pc = op.addr();
    Ok(())
}

/// STACK.push(PC); PC = addr
pub fn call(op: Opcode, state: &mut State, _io: &mut Peripherals<'_>) -> Result<(), Chip8Error> {
    state.push(state.pc)?;
    state.pc = op.addr();
    Ok(())
}

fn skip_if(state: &mut State, condition: bool) {
    if condition {
        state.pc += INSTRUCTION_SIZE;
    }
}

/// if Vx == kk then pc += 2
pub fn ske(op: Opcode, state: &mut State, _io: &mut Peripherals<'_>) -> Result<(), Chip8Error> {
    let condition = state.v[op.x()] == op.kk();
    skip_if(state, condition);
    Ok(())
}

/// if Vx != kk then pc += 2
pub fn skne(op: Opcode, state: &mut State, _io: &mut Peripherals<'_>) -> Result<(), Chip8Error> {
    let condition = state.v[op.x()] != op.kk();
    skip_if(state, condition);
    Ok(())
}

/// if Vx == Vy then pc += 2
pub fn skre(op: Opcode, state: &mut State, _io: &mut Peripherals<'_>) -> Result<(), Chip8Error> {
    let condition = state.v[op.x()] == state.v[op.y()];
    skip_if(state, condition);
    Ok(())
}

/// Vx = kk
pub fn load(op: Opcode, state: &mut State, _io: &mut Peripherals<'_>) -> Result<(), Chip8Error> {
    state.v[op.x()] = op.kk();
    Ok(())
}

/// Vx += kk
/// Add kk to Vx; allow for overflow but implicitly drop it
pub fn add(op: Opcode, state: &mut State, _io: &mut Peripherals<'_>) -> Result<(), Chip8Error> {
    state.v[op.x()] = state.v[op.x()].wrapping_add(op.kk());
    Ok(())
}

/// Vx = Vy
pub fn mv(op: Opcode, state: &mut State, _io: &mut Peripherals<'_>) -> Result<(), Chip8Error> {
    state.v[op.x()] = state.v[op.y()];
    Ok(())
}

/// Vx |= Vy
pub fn or(op: Opcode, state: &mut State, _io: &mut Peripherals<'_>) -> Result<(), Chip8Error> {
    state.v[op.x()] |= state.v[op.y()];
    Ok(())
}

/// Vx &= Vy
pub fn and(op: Opcode, state: &mut State, _io: &mut Peripherals<'_>) -> Result<(), Chip8Error> {
    state.v[op.x()] &= state.v[op.y()];
    Ok(())
}

/// Vx ^= Vy
pub fn xor(op: Opcode, state: &mut State, _io: &mut Peripherals<'_>) -> Result<(), Chip8Error> {
    state.v[op.x()] ^= state.v[op.y()];
    Ok(())
}

/// Writes VF and then Vx, so when x is F the result wins over the flag.
fn flag_then_store(state: &mut State, x: usize, flag: bool, result: u8) {
    state.v[FLAG_REGISTER] = u8::from(flag);
    state.v[x] = result;
}

/// Vx += Vy; VF = carry
pub fn addr(op: Opcode, state: &mut State, _io: &mut Peripherals<'_>) -> Result<(), Chip8Error> {
    let (res, carry) = state.v[op.x()].overflowing_add(state.v[op.y()]);
    flag_then_store(state, op.x(), carry, res);
    Ok(())
}

/// Vx -= Vy; VF = Vx > Vy
pub fn sub(op: Opcode, state: &mut State, _io: &mut Peripherals<'_>) -> Result<(), Chip8Error> {
    let (vx, vy) = (state.v[op.x()], state.v[op.y()]);
    flag_then_store(state, op.x(), vx > vy, vx.wrapping_sub(vy));
    Ok(())
}

/// Vx >>= 1; VF = shifted out bit
pub fn shr(op: Opcode, state: &mut State, _io: &mut Peripherals<'_>) -> Result<(), Chip8Error> {
    let vx = state.v[op.x()];
    flag_then_store(state, op.x(), vx & 0x01 == 0x01, vx >> 1);
    Ok(())
}

/// Vx = Vy - Vx; VF = Vy > Vx
pub fn subn(op: Opcode, state: &mut State, _io: &mut Peripherals<'_>) -> Result<(), Chip8Error> {
    let (vx, vy) = (state.v[op.x()], state.v[op.y()]);
    flag_then_store(state, op.x(), vy > vx, vy.wrapping_sub(vx));
    Ok(())
}

/// Vx <<= 1; VF = shifted out bit
pub fn shl(op: Opcode, state: &mut State, _io: &mut Peripherals<'_>) -> Result<(), Chip8Error> {
    let vx = state.v[op.x()];
    flag_then_store(state, op.x(), vx & 0x80 == 0x80, vx << 1);
    Ok(())
}

/// if Vx != Vy then pc += 2
pub fn skrne(op: Opcode, state: &mut State, _io: &mut Peripherals<'_>) -> Result<(), Chip8Error> {
    let condition = state.v[op.x()] != state.v[op.y()];
    skip_if(state, condition);
    Ok(())
}

/// I = addr
pub fn loadi(op: Opcode, state: &mut State, _io: &mut Peripherals<'_>) -> Result<(), Chip8Error> {
    state.i = op.addr();
    Ok(())
}

/// PC = V0 + addr
pub fn jumpi(op: Opcode, state: &mut State, _io: &mut Peripherals<'_>) -> Result<(), Chip8Error> {
    let target = u16::from(state.v[0x0]) + op.addr();
    if target > MAX_ADDRESS {
        return Err(Chip8Error::AddressOutOfRange {
            address: usize::from(target),
        });
    }
    state.pc = target;
    Ok(())
}

/// Vx = rand_byte & kk
pub fn rnd(op: Opcode, state: &mut State, io: &mut Peripherals<'_>) -> Result<(), Chip8Error> {
    state.v[op.x()] = io.rng.next_byte() & op.kk();
    Ok(())
}

/// draw_sprite(x=Vx y=Vy size=n)
/// XORs a sprite from memory i..i+n onto the FrameBuffer.
/// The origin wraps around the screen; the rest of the sprite is clipped at the edges.
/// Sets VF if any pixels were erased
pub fn draw(op: Opcode, state: &mut State, _io: &mut Peripherals<'_>) -> Result<(), Chip8Error> {
    let origin_x = usize::from(state.v[op.x()]) % DISPLAY_WIDTH;
    let origin_y = usize::from(state.v[op.y()]) % DISPLAY_HEIGHT;
    let sprite = state.memory_range(state.i, usize::from(op.n()))?;

    let mut collision = false;

    for (row, address) in sprite.enumerate() {
        let y = origin_y + row;
        if y >= DISPLAY_HEIGHT {
            break;
        }
        let line = state.memory[address];
        for bit in 0..8 {
            let x = origin_x + bit;
            if x >= DISPLAY_WIDTH {
                break;
            }
            if line & (0x80 >> bit) != 0 {
                let pixel = &mut state.frame_buffer[y][x];
                collision |= *pixel;
                *pixel = !*pixel;
            }
        }
    }

    state.v[FLAG_REGISTER] = u8::from(collision);
    state.draw_flag = true;
    Ok(())
}

fn key_pressed(keys: &Keypad, key: u8) -> Result<bool, Chip8Error> {
    if usize::from(key) >= KEY_COUNT {
        return Err(Chip8Error::KeyOutOfRange { key });
    }
    Ok(keys[usize::from(key)])
}

/// if Vx.pressed then pc += 2
pub fn skpr(op: Opcode, state: &mut State, io: &mut Peripherals<'_>) -> Result<(), Chip8Error> {
    let pressed = key_pressed(io.keys, state.v[op.x()])?;
    skip_if(state, pressed);
    Ok(())
}

/// if !Vx.pressed then pc += 2
pub fn skup(op: Opcode, state: &mut State, io: &mut Peripherals<'_>) -> Result<(), Chip8Error> {
    let pressed = key_pressed(io.keys, state.v[op.x()])?;
    skip_if(state, !pressed);
    Ok(())
}

/// Vx = DT
pub fn readdt(op: Opcode, state: &mut State, _io: &mut Peripherals<'_>) -> Result<(), Chip8Error> {
    state.v[op.x()] = state.delay_timer;
    Ok(())
}

/// Vx = lowest pressed key, otherwise run this instruction again next cycle
///
/// Nothing blocks here: the pc is wound back onto this opcode and the host has to keep
/// cycling while it updates the keypad.
pub fn keyd(op: Opcode, state: &mut State, io: &mut Peripherals<'_>) -> Result<(), Chip8Error> {
    match io.keys.iter().position(|pressed| *pressed) {
        Some(key) => state.v[op.x()] = key as u8,
        None => state.pc -= INSTRUCTION_SIZE,
    }
    Ok(())
}

/// DT = Vx
pub fn loaddt(op: Opcode, state: &mut State, _io: &mut Peripherals<'_>) -> Result<(), Chip8Error> {
    state.delay_timer = state.v[op.x()];
    Ok(())
}

/// ST = Vx
pub fn loadst(op: Opcode, state: &mut State, _io: &mut Peripherals<'_>) -> Result<(), Chip8Error> {
    state.sound_timer = state.v[op.x()];
    Ok(())
}

/// I += Vx
pub fn addi(op: Opcode, state: &mut State, _io: &mut Peripherals<'_>) -> Result<(), Chip8Error> {
    let i = state.i + u16::from(state.v[op.x()]);
    if i > MAX_ADDRESS {
        return Err(Chip8Error::AddressOutOfRange {
            address: usize::from(i),
        });
    }
    state.i = i;
    Ok(())
}

/// I = FONT_START + Vx * 5
/// Set I to the memory address of the glyph for the low nibble of Vx
/// See constants::SPRITE_SHEET for more details
pub fn ldspr(op: Opcode, state: &mut State, _io: &mut Peripherals<'_>) -> Result<(), Chip8Error> {
    let digit = u16::from(state.v[op.x()] & 0x0F);
    state.i = FONT_START + digit * GLYPH_HEIGHT;
    Ok(())
}

/// mem[I..I+3] = bcd(Vx)
/// Store BCD repr of Vx in memory starting at address i
pub fn bcd(op: Opcode, state: &mut State, _io: &mut Peripherals<'_>) -> Result<(), Chip8Error> {
    let value = state.v[op.x()];
    let digits = [value / 100, value / 10 % 10, value % 10];
    let range = state.memory_range(state.i, digits.len())?;
    state.memory[range].copy_from_slice(&digits);
    Ok(())
}

/// mem[I..=I+x] = V0..=Vx
pub fn stor(op: Opcode, state: &mut State, _io: &mut Peripherals<'_>) -> Result<(), Chip8Error> {
    let range = state.memory_range(state.i, op.x() + 1)?;
    state.memory[range].copy_from_slice(&state.v[..=op.x()]);
    Ok(())
}

/// V0..=Vx = mem[I..=I+x]
pub fn read(op: Opcode, state: &mut State, _io: &mut Peripherals<'_>) -> Result<(), Chip8Error> {
    let range = state.memory_range(state.i, op.x() + 1)?;
    state.v[..=op.x()].copy_from_slice(&state.memory[range]);
    Ok(())
}
