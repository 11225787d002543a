use rand::Rng;

use crate::constants::{
    DISPLAY_HEIGHT, DISPLAY_WIDTH, SPRITE_HEIGHT, SPRITE_SHEET_START, STACK_DEPTH,
};
use crate::error::Fault;
use crate::instruction::Instruction;
use crate::state::State;

/// What happens to the program counter once an instruction has run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// pc += 2
    Next,
    /// pc += 4
    Skip,
    /// pc = addr
    Jump(u16),
    /// pc is left pointing at the current instruction
    Wait,
}

impl Flow {
    fn skip_if(condition: bool) -> Self {
        if condition {
            Flow::Skip
        } else {
            Flow::Next
        }
    }
}

/// Executes a single instruction against `state`.
///
/// Everything except the program counter is updated here; the caller applies the
/// returned `Flow`. On a fault `state` is left untouched.
pub fn execute<R: Rng + ?Sized>(
    instruction: Instruction,
    state: &mut State,
    rng: &mut R,
) -> Result<Flow, Fault> {
    use Instruction::*;

    let flow = match instruction {
        Sys { .. } | Unknown(_) => Flow::Next,
        Clear => clr(state),
        Return => rts(state)?,
        Jump { addr } => Flow::Jump(addr),
        Call { addr } => call(state, addr)?,
        SkipEqImm { x, nn } => Flow::skip_if(state.reg(x) == nn),
        SkipNeImm { x, nn } => Flow::skip_if(state.reg(x) != nn),
        SkipEqReg { x, y } => Flow::skip_if(state.reg(x) == state.reg(y)),
        LoadImm { x, nn } => state.set(x, nn),
        AddImm { x, nn } => state.set(x, state.reg(x).wrapping_add(nn)),
        Move { x, y } => state.set(x, state.reg(y)),
        Or { x, y } => state.set(x, state.reg(x) | state.reg(y)),
        And { x, y } => state.set(x, state.reg(x) & state.reg(y)),
        Xor { x, y } => state.set(x, state.reg(x) ^ state.reg(y)),
        AddReg { x, y } => add_carry(state, x, y),
        Sub { x, y } => sub(state, x, x, y),
        ShiftRight { x, .. } => shr(state, x),
        SubReversed { x, y } => sub(state, x, y, x),
        ShiftLeft { x, .. } => shl(state, x),
        SkipNeReg { x, y } => Flow::skip_if(state.reg(x) != state.reg(y)),
        LoadIndex { addr } => {
            state.i = addr;
            Flow::Next
        }
        JumpOffset { addr } => Flow::Jump(addr.wrapping_add(u16::from(state.v[0x0]))),
        Random { x, nn } => {
            let rand_byte: u8 = rng.gen();
            state.set(x, rand_byte & nn)
        }
        Draw { x, y, n } => draw(state, x, y, n),
        SkipKeyDown { x } => Flow::skip_if(state.keypad.is_pressed(state.reg(x))),
        SkipKeyUp { x } => Flow::skip_if(!state.keypad.is_pressed(state.reg(x))),
        LoadDelay { x } => state.set(x, state.delay_timer),
        WaitKey { x } => keyd(state, x),
        SetDelay { x } => {
            state.delay_timer = state.reg(x);
            Flow::Next
        }
        SetSound { x } => {
            state.sound_timer = state.reg(x);
            Flow::Next
        }
        AddIndex { x } => {
            state.i = state.i.wrapping_add(u16::from(state.reg(x)));
            Flow::Next
        }
        LoadSprite { x } => {
            state.i = SPRITE_SHEET_START + u16::from(state.reg(x) & 0xF) * SPRITE_HEIGHT;
            Flow::Next
        }
        StoreBcd { x } => bcd(state, x),
        StoreRegisters { x } => stor(state, x),
        LoadRegisters { x } => read(state, x),
    };
    Ok(flow)
}

impl State {
    fn reg(&self, x: u8) -> u8 {
        self.v[usize::from(x)]
    }

    /// Vx = value
    fn set(&mut self, x: u8, value: u8) -> Flow {
        self.v[usize::from(x)] = value;
        Flow::Next
    }

    /// Writes Vx and then VF, so the flag wins when x is 0xF
    fn set_with_flag(&mut self, x: u8, value: u8, flag: bool) -> Flow {
        self.v[usize::from(x)] = value;
        self.v[0xF] = u8::from(flag);
        Flow::Next
    }
}

/// clear
fn clr(state: &mut State) -> Flow {
    state.frame_buffer = [[0; DISPLAY_WIDTH]; DISPLAY_HEIGHT];
    state.draw_flag = true;
    Flow::Next
}

/// PC = STACK.pop() + 2
/// The stack holds the address of the call itself, so step over it
fn rts(state: &mut State) -> Result<Flow, Fault> {
    if state.sp == 0 {
        return Err(Fault::StackUnderflow { pc: state.pc });
    }
    state.sp -= 1;
    Ok(Flow::Jump(state.stack[usize::from(state.sp)].wrapping_add(2)))
}

/// STACK.push(PC); PC = addr
fn call(state: &mut State, addr: u16) -> Result<Flow, Fault> {
    if usize::from(state.sp) >= STACK_DEPTH {
        return Err(Fault::StackOverflow { pc: state.pc });
    }
    state.stack[usize::from(state.sp)] = state.pc;
    state.sp += 1;
    Ok(Flow::Jump(addr))
}

/// Vx += Vy; VF = carry
fn add_carry(state: &mut State, x: u8, y: u8) -> Flow {
    let (res, carry) = state.reg(x).overflowing_add(state.reg(y));
    state.set_with_flag(x, res, carry)
}

/// Vx = minuend - subtrahend; VF = !borrow
/// Covers both 8xy5 (Vx - Vy) and 8xy7 (Vy - Vx)
fn sub(state: &mut State, x: u8, minuend: u8, subtrahend: u8) -> Flow {
    let (res, borrow) = state.reg(minuend).overflowing_sub(state.reg(subtrahend));
    state.set_with_flag(x, res, !borrow)
}

/// Vx >>= 1; VF = the bit shifted out
fn shr(state: &mut State, x: u8) -> Flow {
    let vx = state.reg(x);
    state.set_with_flag(x, vx >> 1, vx & 0x1 == 0x1)
}

/// Vx <<= 1; VF = the bit shifted out
fn shl(state: &mut State, x: u8) -> Flow {
    let vx = state.reg(x);
    state.set_with_flag(x, vx << 1, vx & 0x80 == 0x80)
}

/// draw_sprite(x=Vx y=Vy size=n)
/// XORs a sprite from memory I..I+n at position x, y on the FrameBuffer.
/// Columns wrap around the right edge; rows past the bottom edge are dropped.
/// Sets VF if any pixels were erased
fn draw(state: &mut State, x: u8, y: u8, n: u8) -> Flow {
    let origin_x = usize::from(state.reg(x));
    let origin_y = usize::from(state.reg(y));
    let mut collision = false;

    for row in 0..n {
        let py = origin_y + usize::from(row);
        if py >= DISPLAY_HEIGHT {
            continue;
        }
        let sprite = state.memory.read(state.i.wrapping_add(u16::from(row)));
        for bit in 0..8 {
            if sprite & (0x80 >> bit) == 0 {
                continue;
            }
            let px = (origin_x + bit) % DISPLAY_WIDTH;
            let pixel = &mut state.frame_buffer[py][px];
            collision |= *pixel == 1;
            *pixel ^= 1;
        }
    }

    state.v[0xF] = u8::from(collision);
    state.draw_flag = true;
    Flow::Next
}

/// Vx = first newly pressed key, or wait for one
fn keyd(state: &mut State, x: u8) -> Flow {
    match state.keypad.just_pressed() {
        Some(key) => {
            state.register_needing_key = None;
            state.set(x, key)
        }
        None => {
            state.register_needing_key = Some(x);
            Flow::Wait
        }
    }
}

/// mem[I..I+3] = bcd(Vx)
fn bcd(state: &mut State, x: u8) -> Flow {
    let vx = state.reg(x);
    state.memory.write_slice(state.i, &[vx / 100, vx / 10 % 10, vx % 10]);
    Flow::Next
}

/// mem[I..=I+x] = V0..=Vx
fn stor(state: &mut State, x: u8) -> Flow {
    let count = usize::from(x) + 1;
    state.memory.write_slice(state.i, &state.v[..count]);
    Flow::Next
}

/// V0..=Vx = mem[I..=I+x]
fn read(state: &mut State, x: u8) -> Flow {
    for offset in 0..=x {
        state.v[usize::from(offset)] = state.memory.read(state.i.wrapping_add(u16::from(offset)));
    }
    Flow::Next
}
