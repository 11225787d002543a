/// Width of the frame buffer in pixels
pub const DISPLAY_WIDTH: usize = 64;

/// Height of the frame buffer in pixels
pub const DISPLAY_HEIGHT: usize = 32;

/// Size of addressable memory in bytes
pub const MEMORY_SIZE: usize = 4096;

/// Every memory access is masked with this; addresses wrap at 0xFFF
pub const ADDRESS_MASK: u16 = 0x0FFF;

/// ROMs are loaded here and the program counter starts here
pub const PROGRAM_START: u16 = 0x200;

/// The largest ROM that fits between `PROGRAM_START` and the end of memory
pub const MAX_ROM_SIZE: usize = MEMORY_SIZE - PROGRAM_START as usize;

/// Number of return addresses the call stack can hold
pub const STACK_DEPTH: usize = 16;

/// Number of keys on the hexadecimal keypad
pub const KEY_COUNT: usize = 16;

/// Default CPU speed in Hz
pub const CLOCK_SPEED: u32 = 500;

/// Both timers count down at this rate in Hz regardless of the CPU speed
pub const TIMER_SPEED: u32 = 60;

/// Where the sprite sheet lives in memory
pub const SPRITE_SHEET_START: u16 = 0x050;

/// Height in bytes (rows) of a single sprite in the sheet
pub const SPRITE_HEIGHT: u16 = 5;

/// # Sprite Sheet
/// Hexadecimal digits 0..F, each 5 rows of 4 pixels wide.
/// The low nibble of each row is unused.
///
/// ```text
/// "0"  Binary   Hex
/// **** 11110000 0xF0
/// *  * 10010000 0x90
/// *  * 10010000 0x90
/// *  * 10010000 0x90
/// **** 11110000 0xF0
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
