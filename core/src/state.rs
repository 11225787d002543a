use crate::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH, PROGRAM_START, STACK_DEPTH};
use crate::keypad::Keypad;
use crate::memory::Memory;

/// The FrameBuffer is indexed as [y][x]; each pixel is 0 (off) or 1 (on)
pub type FrameBuffer = [[u8; DISPLAY_WIDTH]; DISPLAY_HEIGHT];

/// The Chip8 internal state
///
/// ## CPU
/// Registers
/// - (v) 16 primary 8-bit registers (V0..VF)
///     - the first 15 (V0..VE) are general purpose registers
///     - the 16th (VF) is the carry, borrow and collision flag
/// - (i) a 16-bit memory address register
///
/// Counter
/// - (pc) a 16-bit program counter
///
/// Pointer
/// - (sp) the number of return addresses on the stack, 0..=16
///
/// Timers
/// - 2 8-bit timers (delay & sound), decremented at 60Hz
///
/// ## Memory
/// - 16 return addresses of stack
/// - 4096 bytes of addressable memory
/// - 64x32 byte frame buffer
///     - stores the contents of the next frame to be drawn
///
/// ## Input
/// - the current and previous keypad snapshots
/// - while Fx0A waits for a key, the register that will receive it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct State {
    pub v: [u8; 16],
    pub i: u16,
    pub pc: u16,
    pub sp: u8,
    pub delay_timer: u8,
    pub sound_timer: u8,
    pub stack: [u16; STACK_DEPTH],
    pub memory: Memory,
    pub frame_buffer: FrameBuffer,
    pub draw_flag: bool,
    pub keypad: Keypad,
    pub register_needing_key: Option<u8>,
}

impl State {
    pub fn new() -> Self {
        State {
            v: [0; 16],
            i: 0,
            pc: PROGRAM_START,
            sp: 0,
            delay_timer: 0,
            sound_timer: 0,
            stack: [0; STACK_DEPTH],
            memory: Memory::new(),
            frame_buffer: [[0; DISPLAY_WIDTH]; DISPLAY_HEIGHT],
            draw_flag: false,
            keypad: Keypad::new(),
            register_needing_key: None,
        }
    }

    /// Decrements both timers towards zero
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
