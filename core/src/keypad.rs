use crate::constants::KEY_COUNT;

/// The pressed status of keys 0..F, one `bool` per key
pub type KeySnapshot = [bool; KEY_COUNT];

/// # Keypad
/// Chip-8 input is generated with a 16 key hexadecimal keypad.
///
/// Holds the current snapshot and the one before it. Both are only ever replaced
/// together by `update`, so a rising edge is seen exactly between two snapshots.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Keypad {
    current: KeySnapshot,
    previous: KeySnapshot,
}

impl Keypad {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shifts the current snapshot into `previous` and installs `snapshot`
    pub fn update(&mut self, snapshot: KeySnapshot) {
        self.previous = self.current;
        self.current = snapshot;
    }

    /// Whether `key` is down in the current snapshot.
    /// Only the low nibble of `key` is used.
    pub fn is_pressed(&self, key: u8) -> bool {
        self.current[usize::from(key & 0xF)]
    }

    /// The lowest key that was up in the previous snapshot and is down now
    pub fn just_pressed(&self) -> Option<u8> {
        self.current
            .iter()
            .zip(self.previous.iter())
            .position(|(now, before)| *now && !*before)
            .map(|key| key as u8)
    }
}
