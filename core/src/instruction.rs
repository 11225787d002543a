use crate::opcode::Opcode;

/// A decoded Chip-8 instruction.
///
/// `x` and `y` are register indices (0x0..=0xF), `nn` an immediate byte,
/// `addr` a 12-bit address and `n` a sprite height.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    /// 0nnn: machine code routine; ignored
    Sys { addr: u16 },
    /// 00E0: clear the frame buffer
    Clear,
    /// 00EE: PC = STACK.pop()
    Return,
    /// 1nnn: PC = addr
    Jump { addr: u16 },
    /// 2nnn: STACK.push(PC); PC = addr
    Call { addr: u16 },
    /// 3xnn: skip if Vx == nn
    SkipEqImm { x: u8, nn: u8 },
    /// 4xnn: skip if Vx != nn
    SkipNeImm { x: u8, nn: u8 },
    /// 5xy0: skip if Vx == Vy
    SkipEqReg { x: u8, y: u8 },
    /// 6xnn: Vx = nn
    LoadImm { x: u8, nn: u8 },
    /// 7xnn: Vx += nn
    AddImm { x: u8, nn: u8 },
    /// 8xy0: Vx = Vy
    Move { x: u8, y: u8 },
    /// 8xy1: Vx |= Vy
    Or { x: u8, y: u8 },
    /// 8xy2: Vx &= Vy
    And { x: u8, y: u8 },
    /// 8xy3: Vx ^= Vy
    Xor { x: u8, y: u8 },
    /// 8xy4: Vx += Vy; VF = carry
    AddReg { x: u8, y: u8 },
    /// 8xy5: Vx -= Vy; VF = !borrow
    Sub { x: u8, y: u8 },
    /// 8xy6: Vx >>= 1; VF = dropped bit
    ShiftRight { x: u8, y: u8 },
    /// 8xy7: Vx = Vy - Vx; VF = !borrow
    SubReversed { x: u8, y: u8 },
    /// 8xyE: Vx <<= 1; VF = dropped bit
    ShiftLeft { x: u8, y: u8 },
    /// 9xy0: skip if Vx != Vy
    SkipNeReg { x: u8, y: u8 },
    /// Annn: I = addr
    LoadIndex { addr: u16 },
    /// Bnnn: PC = V0 + addr
    JumpOffset { addr: u16 },
    /// Cxnn: Vx = rand & nn
    Random { x: u8, nn: u8 },
    /// Dxyn: draw an n row sprite from I at (Vx, Vy)
    Draw { x: u8, y: u8, n: u8 },
    /// Ex9E: skip if key Vx is down
    SkipKeyDown { x: u8 },
    /// ExA1: skip if key Vx is up
    SkipKeyUp { x: u8 },
    /// Fx07: Vx = DT
    LoadDelay { x: u8 },
    /// Fx0A: wait for a key press and store it in Vx
    WaitKey { x: u8 },
    /// Fx15: DT = Vx
    SetDelay { x: u8 },
    /// Fx18: ST = Vx
    SetSound { x: u8 },
    /// Fx1E: I += Vx
    AddIndex { x: u8 },
    /// Fx29: I = address of the sprite for digit Vx
    LoadSprite { x: u8 },
    /// Fx33: mem[I..I+3] = bcd(Vx)
    StoreBcd { x: u8 },
    /// Fx55: mem[I..=I+x] = V0..=Vx
    StoreRegisters { x: u8 },
    /// Fx65: V0..=Vx = mem[I..=I+x]
    LoadRegisters { x: u8 },
    /// Anything else; executed as a no-op
    Unknown(Opcode),
}

impl Instruction {
    /// Selects the Instruction for a given Opcode
    pub fn decode(op: Opcode) -> Self {
        use Instruction::*;

        let (x, y, n, nn, addr) = (op.x(), op.y(), op.n(), op.nn(), op.nnn());
        match op.nibbles() {
            (0x0, 0x0, 0xE, 0x0) => Clear,
            (0x0, 0x0, 0xE, 0xE) => Return,
            (0x0, ..) => Sys { addr },
            (0x1, ..) => Jump { addr },
            (0x2, ..) => Call { addr },
            (0x3, ..) => SkipEqImm { x, nn },
            (0x4, ..) => SkipNeImm { x, nn },
            (0x5, .., 0x0) => SkipEqReg { x, y },
            (0x6, ..) => LoadImm { x, nn },
            (0x7, ..) => AddImm { x, nn },
            (0x8, .., 0x0) => Move { x, y },
            (0x8, .., 0x1) => Or { x, y },
            (0x8, .., 0x2) => And { x, y },
            (0x8, .., 0x3) => Xor { x, y },
            (0x8, .., 0x4) => AddReg { x, y },
            (0x8, .., 0x5) => Sub { x, y },
            (0x8, .., 0x6) => ShiftRight { x, y },
            (0x8, .., 0x7) => SubReversed { x, y },
            (0x8, .., 0xE) => ShiftLeft { x, y },
            (0x9, .., 0x0) => SkipNeReg { x, y },
            (0xA, ..) => LoadIndex { addr },
            (0xB, ..) => JumpOffset { addr },
            (0xC, ..) => Random { x, nn },
            (0xD, ..) => Draw { x, y, n },
            (0xE, _, 0x9, 0xE) => SkipKeyDown { x },
            (0xE, _, 0xA, 0x1) => SkipKeyUp { x },
            (0xF, _, 0x0, 0x7) => LoadDelay { x },
            (0xF, _, 0x0, 0xA) => WaitKey { x },
            (0xF, _, 0x1, 0x5) => SetDelay { x },
            (0xF, _, 0x1, 0x8) => SetSound { x },
            (0xF, _, 0x1, 0xE) => AddIndex { x },
            (0xF, _, 0x2, 0x9) => LoadSprite { x },
            (0xF, _, 0x3, 0x3) => StoreBcd { x },
            (0xF, _, 0x5, 0x5) => StoreRegisters { x },
            (0xF, _, 0x6, 0x5) => LoadRegisters { x },
            _ => Unknown(op),
        }
    }
}

#[cfg(test)]
mod test_instruction {
    use super::Instruction::*;
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0x00E0, Clear)]
    #[case(0x00EE, Return)]
    #[case(0x0123, Sys { addr: 0x123 })]
    #[case(0x1ABC, Jump { addr: 0xABC })]
    #[case(0x2ABC, Call { addr: 0xABC })]
    #[case(0x3122, SkipEqImm { x: 0x1, nn: 0x22 })]
    #[case(0x4122, SkipNeImm { x: 0x1, nn: 0x22 })]
    #[case(0x5120, SkipEqReg { x: 0x1, y: 0x2 })]
    #[case(0x6122, LoadImm { x: 0x1, nn: 0x22 })]
    #[case(0x7122, AddImm { x: 0x1, nn: 0x22 })]
    #[case(0x8120, Move { x: 0x1, y: 0x2 })]
    #[case(0x8121, Or { x: 0x1, y: 0x2 })]
    #[case(0x8122, And { x: 0x1, y: 0x2 })]
    #[case(0x8123, Xor { x: 0x1, y: 0x2 })]
    #[case(0x8124, AddReg { x: 0x1, y: 0x2 })]
    #[case(0x8125, Sub { x: 0x1, y: 0x2 })]
    #[case(0x8126, ShiftRight { x: 0x1, y: 0x2 })]
    #[case(0x8127, SubReversed { x: 0x1, y: 0x2 })]
    #[case(0x812E, ShiftLeft { x: 0x1, y: 0x2 })]
    #[case(0x9120, SkipNeReg { x: 0x1, y: 0x2 })]
    #[case(0xAABC, LoadIndex { addr: 0xABC })]
    #[case(0xBABC, JumpOffset { addr: 0xABC })]
    #[case(0xC1F0, Random { x: 0x1, nn: 0xF0 })]
    #[case(0xD125, Draw { x: 0x1, y: 0x2, n: 0x5 })]
    #[case(0xE19E, SkipKeyDown { x: 0x1 })]
    #[case(0xE1A1, SkipKeyUp { x: 0x1 })]
    #[case(0xF107, LoadDelay { x: 0x1 })]
    #[case(0xF10A, WaitKey { x: 0x1 })]
    #[case(0xF115, SetDelay { x: 0x1 })]
    #[case(0xF118, SetSound { x: 0x1 })]
    #[case(0xF11E, AddIndex { x: 0x1 })]
    #[case(0xF129, LoadSprite { x: 0x1 })]
    #[case(0xF133, StoreBcd { x: 0x1 })]
    #[case(0xF155, StoreRegisters { x: 0x1 })]
    #[case(0xF165, LoadRegisters { x: 0x1 })]
    fn test_decodes(#[case] word: u16, #[case] expected: Instruction) {
        assert_eq!(Instruction::decode(Opcode(word)), expected);
    }

    #[rstest]
    #[case(0x5121)]
    #[case(0x8128)]
    #[case(0x812F)]
    #[case(0x9121)]
    #[case(0xE19F)]
    #[case(0xF100)]
    #[case(0xF1FF)]
    fn test_unrecognized_opcodes_decode_to_unknown(#[case] word: u16) {
        assert_eq!(Instruction::decode(Opcode(word)), Unknown(Opcode(word)));
    }
}
