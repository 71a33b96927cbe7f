use crate::opcode::Opcode;
use crate::operations::*;

/// An entry in the dispatch tables: how to print an opcode and how to run it.
///
/// `syntax` is assembler text with the opcode's operands as placeholders:
/// `{x}` / `{y}` for register numbers, `{kk}` for the immediate byte,
/// `{nnn}` for the address and `{n}` for the sprite height.
#[derive(Copy, Clone)]
pub struct Instruction {
    pub syntax: &'static str,
    pub execute: Operation,
}

const fn ins(syntax: &'static str, execute: Operation) -> Option<Instruction> {
    Some(Instruction { syntax, execute })
}

impl Instruction {
    /// Renders the instruction with the operands encoded in `op`.
    pub fn format(&self, op: Opcode) -> String {
        self.syntax
            .replace("{x}", &format!("{:X}", op.x()))
            .replace("{y}", &format!("{:X}", op.y()))
            .replace("{kk}", &format!("{:#04X}", op.kk()))
            .replace("{nnn}", &format!("{:#05X}", op.addr()))
            .replace("{n}", &format!("{}", op.n()))
    }
}

/// # Dispatch
/// The family nibble `(n, _, _, _)` indexes `FAMILIES`. Most families hold exactly one
/// instruction; the rest route through a second table indexed by part of the opcode.
#[derive(Copy, Clone)]
enum Family {
    Single(Instruction),
    /// Selected by `(_, _, _, n)`
    ByNibble(&'static [Option<Instruction>; 16]),
    /// Selected by `(_, _, n, n)`
    ByByte(&'static [Option<Instruction>; 256]),
}

const fn table<const N: usize>(
    entries: &[(usize, Option<Instruction>)],
) -> [Option<Instruction>; N] {
    let mut table = [None; N];
    let mut entry = 0;
    while entry < entries.len() {
        table[entries[entry].0] = entries[entry].1;
        entry += 1;
    }
    table
}

static SYSTEM: [Option<Instruction>; 16] = table(&[
    (0x0, ins("CLS", clr)),
    (0xE, ins("RET", rts)),
]);

static ALU: [Option<Instruction>; 16] = table(&[
    (0x0, ins("LD V{x}, V{y}", mv)),
    (0x1, ins("OR V{x}, V{y}", or)),
    (0x2, ins("AND V{x}, V{y}", and)),
    (0x3, ins("XOR V{x}, V{y}", xor)),
    (0x4, ins("ADD V{x}, V{y}", addr)),
    (0x5, ins("SUB V{x}, V{y}", sub)),
    (0x6, ins("SHR V{x}", shr)),
    (0x7, ins("SUBN V{x}, V{y}", subn)),
    (0xE, ins("SHL V{x}", shl)),
]);

static KEYS: [Option<Instruction>; 16] = table(&[
    (0x1, ins("SKNP V{x}", skup)),
    (0xE, ins("SKP V{x}", skpr)),
]);

static MISC: [Option<Instruction>; 256] = table(&[
    (0x07, ins("LD V{x}, DT", readdt)),
    (0x0A, ins("LD V{x}, K", keyd)),
    (0x15, ins("LD DT, V{x}", loaddt)),
    (0x18, ins("LD ST, V{x}", loadst)),
    (0x1E, ins("ADD I, V{x}", addi)),
    (0x29, ins("LD F, V{x}", ldspr)),
    (0x33, ins("LD B, V{x}", bcd)),
    (0x55, ins("LD [I], V{x}", stor)),
    (0x65, ins("LD V{x}, [I]", read)),
]);

const fn single(syntax: &'static str, execute: Operation) -> Family {
    Family::Single(Instruction { syntax, execute })
}

static FAMILIES: [Family; 16] = [
    Family::ByNibble(&SYSTEM),
    single("JP {nnn}", jump),
    single("CALL {nnn}", call),
    single("SE V{x}, {kk}", ske),
    single("SNE V{x}, {kk}", skne),
    single("SE V{x}, V{y}", skre),
    single("LD V{x}, {kk}", load),
    single("ADD V{x}, {kk}", add),
    Family::ByNibble(&ALU),
    single("SNE V{x}, V{y}", skrne),
    single("LD I, {nnn}", loadi),
    single("JP V0, {nnn}", jumpi),
    single("RND V{x}, {kk}", rnd),
    single("DRW V{x}, V{y}, {n}", draw),
    Family::ByNibble(&KEYS),
    Family::ByByte(&MISC),
];

/// Selects the Instruction for a given Opcode, or `None` if no table has an entry for it.
pub fn decode(op: Opcode) -> Option<Instruction> {
    match FAMILIES[usize::from(op.family())] {
        Family::Single(instruction) => Some(instruction),
        Family::ByNibble(table) => table[usize::from(op.n())],
        Family::ByByte(table) => table[usize::from(op.kk())],
    }
}

/// Assembler text for any opcode; unrecognized words are shown as raw data.
pub fn mnemonic(op: Opcode) -> String {
    match decode(op) {
        Some(instruction) => instruction.format(op),
        None => format!("DW {:#06X}", op.0),
    }
}
