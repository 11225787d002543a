use sdl2::keyboard::{KeyboardState, Scancode};

use chip8_core::KeySnapshot;

/// # Keymap
/// Chip-8 input is generated with a hexadecimal keypad.
///
/// The keypad is mapped to the left 4 alphanumeric columns.
/// Scancodes are used so the layout keeps its shape on non-QWERTY keyboards.
/// ```text
/// |1|2|3|C|      |1|2|3|4|
/// |4|5|6|D|  ->  |Q|W|E|R|
/// |7|8|9|E|  ->  |A|S|D|F|
/// |A|0|B|F|      |Z|X|C|V|
/// ```
pub fn keymap(scancode: Scancode) -> Option<usize> {
    match scancode {
        Scancode::X => Some(0x0),
        Scancode::Num1 => Some(0x1),
        Scancode::Num2 => Some(0x2),
        Scancode::Num3 => Some(0x3),
        Scancode::Q => Some(0x4),
        Scancode::W => Some(0x5),
        Scancode::E => Some(0x6),
        Scancode::A => Some(0x7),
        Scancode::S => Some(0x8),
        Scancode::D => Some(0x9),
        Scancode::Z => Some(0xA),
        Scancode::C => Some(0xB),
        Scancode::Num4 => Some(0xC),
        Scancode::R => Some(0xD),
        Scancode::F => Some(0xE),
        Scancode::V => Some(0xF),
        _ => None,
    }
}

/// The pressed status of every Chip-8 key in the current keyboard state
pub fn snapshot(keyboard: &KeyboardState<'_>) -> KeySnapshot {
    snapshot_of(keyboard.pressed_scancodes())
}

fn snapshot_of(pressed: impl Iterator<Item = Scancode>) -> KeySnapshot {
    let mut keys = [false; 16];
    for key in pressed.filter_map(keymap) {
        keys[key] = true;
    }
    keys
}
