use crate::constants::{ADDRESS_MASK, MEMORY_SIZE, SPRITE_SHEET, SPRITE_SHEET_START};

/// # Memory
/// 4096 bytes of addressable memory.
///
/// ```text
/// 0x000-0x04F  unused
/// 0x050-0x09F  sprite sheet (hex digits 0..F)
/// 0x0A0-0x1FF  unused
/// 0x200-0xFFF  program
/// ```
///
/// Addresses are u16 like the Chip-8 registers that produce them, but only the low
/// 12 bits are meaningful: every access is masked so that `0xFFF + 1` wraps to `0x000`.
#[derive(Clone, PartialEq, Eq)]
pub struct Memory {
    bytes: Box<[u8; MEMORY_SIZE]>,
}

impl Memory {
    /// Zeroed memory with the sprite sheet installed
    pub fn new() -> Self {
        let mut memory = Memory {
            bytes: Box::new([0; MEMORY_SIZE]),
        };
        memory.write_slice(SPRITE_SHEET_START, &SPRITE_SHEET);
        memory
    }

    pub fn read(&self, addr: u16) -> u8 {
        self.bytes[mask(addr)]
    }

    pub fn write(&mut self, addr: u16, value: u8) {
        self.bytes[mask(addr)] = value;
    }

    /// Reads the big-endian word at `addr` and `addr + 1`
    pub fn read_word(&self, addr: u16) -> u16 {
        let left = u16::from(self.read(addr));
        let right = u16::from(self.read(addr.wrapping_add(1)));
        left << 8 | right
    }

    /// Writes `data` byte by byte starting at `addr`, wrapping past 0xFFF
    pub fn write_slice(&mut self, addr: u16, data: &[u8]) {
        for (offset, byte) in data.iter().enumerate() {
            self.write(addr.wrapping_add(offset as u16), *byte);
        }
    }

    /// The raw contents of memory, for inspection
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes[..]
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Memory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Memory")
            .field("size", &self.bytes.len())
            .finish_non_exhaustive()
    }
}

fn mask(addr: u16) -> usize {
    (addr & ADDRESS_MASK) as usize
}
