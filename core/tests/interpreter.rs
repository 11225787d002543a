use std::collections::HashSet;

use chip8_core::constants::{
    DISPLAY_HEIGHT, DISPLAY_WIDTH, MAX_ROM_SIZE, SPRITE_SHEET, SPRITE_SHEET_START, STACK_DEPTH,
};
use chip8_core::{Chip8, Fault, Instruction, KeySnapshot, LoadError, Step};
use proptest::prelude::*;
use rstest::rstest;

fn load(program: &[u8]) -> Chip8 {
    let mut chip8 = Chip8::with_seed(0xC8);
    chip8.load_rom_bytes(program).expect("program fits in memory");
    chip8
}

fn run(program: &[u8], cycles: usize) -> Chip8 {
    let mut chip8 = load(program);
    for _ in 0..cycles {
        chip8.run_cycle().expect("no stack faults");
    }
    chip8
}

fn keys(pressed: &[usize]) -> KeySnapshot {
    let mut snapshot = [false; 16];
    for key in pressed {
        snapshot[*key] = true;
    }
    snapshot
}

fn font(chip8: &Chip8) -> &[u8] {
    let start = usize::from(SPRITE_SHEET_START);
    &chip8.state().memory.as_slice()[start..start + SPRITE_SHEET.len()]
}

proptest! {
    #[test]
    fn property_rom_load_is_verbatim(rom in prop::collection::vec(any::<u8>(), 0..=MAX_ROM_SIZE)) {
        let mut chip8 = Chip8::with_seed(0);
        prop_assert_eq!(chip8.load_rom_bytes(&rom).unwrap(), rom.len());
        let memory = chip8.state().memory.as_slice();
        prop_assert_eq!(&memory[0x200..0x200 + rom.len()], &rom[..]);
        prop_assert_eq!(font(&chip8), &SPRITE_SHEET[..]);
        prop_assert_eq!(chip8.state().pc, 0x200);
    }

    #[test]
    fn property_oversized_roms_are_rejected(extra in 1usize..64) {
        let mut chip8 = Chip8::with_seed(0);
        let rom = vec![0xAA; MAX_ROM_SIZE + extra];
        let result = chip8.load_rom_bytes(&rom);
        prop_assert!(matches!(result, Err(LoadError::RomTooLarge { .. })), "expected RomTooLarge");
        prop_assert!(chip8.state().memory.as_slice()[0x200..].iter().all(|b| *b == 0));
    }

    #[test]
    fn property_matched_calls_conserve_stack_depth(pairs in 1usize..32) {
        // `pairs` calls to a subroutine that just returns, then a halt loop
        let halt = 0x200 + 2 * pairs as u16;
        let sub = halt + 2;
        let mut program = Vec::new();
        for _ in 0..pairs {
            program.extend_from_slice(&(0x2000 | sub).to_be_bytes());
        }
        program.extend_from_slice(&(0x1000 | halt).to_be_bytes());
        program.extend_from_slice(&[0x00, 0xEE]);

        let mut chip8 = load(&program);
        for pair in 0..pairs {
            chip8.run_cycle().unwrap();
            prop_assert_eq!(chip8.state().sp, 1);
            prop_assert_eq!(chip8.state().pc, sub);
            chip8.run_cycle().unwrap();
            prop_assert_eq!(chip8.state().sp, 0);
            prop_assert_eq!(chip8.state().pc, 0x202 + 2 * pair as u16);
        }
        prop_assert_eq!(chip8.state().pc, halt);
    }
}

#[test]
fn font_survives_execution() {
    // LD I, 0x300; LD V0, 0xFF; LD [I], V0; draw a digit; CLS
    let chip8 = run(&[0xA3, 0x00, 0x60, 0xFF, 0xF0, 0x55, 0xF0, 0x29, 0xD0, 0x05, 0x00, 0xE0], 6);
    assert_eq!(font(&chip8), &SPRITE_SHEET[..]);
}

#[test]
fn clear_empties_frame_and_sets_draw_pending() {
    // LD I, font 0; DRW V0, V0, 5; CLS
    let mut chip8 = run(&[0xA0, 0x50, 0xD0, 0x05, 0x00, 0xE0], 2);
    chip8.clear_draw_flag();
    chip8.run_cycle().unwrap();
    assert_eq!(chip8.frame(), &[[0; DISPLAY_WIDTH]; DISPLAY_HEIGHT]);
    assert!(chip8.draw_pending());
}

#[test]
fn bcd_of_234() {
    // LD V0, 234; LD I, 0x300; LD B, V0
    let chip8 = run(&[0x60, 0xEA, 0xA3, 0x00, 0xF0, 0x33], 3);
    assert_eq!(chip8.state().memory.as_slice()[0x300..0x303], [2, 3, 4]);
}

#[test]
fn call_pushes_one_frame_and_return_resumes_after_call() {
    // 0x200: CALL 0x206; 0x202: JP 0x202; ...; 0x206: RET
    let mut chip8 = load(&[0x22, 0x06, 0x12, 0x02, 0x00, 0x00, 0x00, 0xEE]);
    chip8.run_cycle().unwrap();
    assert_eq!((chip8.state().pc, chip8.state().sp), (0x206, 1));
    chip8.run_cycle().unwrap();
    assert_eq!((chip8.state().pc, chip8.state().sp), (0x202, 0));
}

#[test]
fn stack_overflow_is_a_deterministic_fault() {
    // 0x200: CALL 0x200, forever
    let mut chip8 = load(&[0x22, 0x00]);
    for _ in 0..STACK_DEPTH {
        chip8.run_cycle().unwrap();
    }
    let before = chip8.state().clone();
    assert_eq!(chip8.run_cycle(), Err(Fault::StackOverflow { pc: 0x200 }));
    assert_eq!(chip8.run_cycle(), Err(Fault::StackOverflow { pc: 0x200 }));
    assert_eq!(chip8.state(), &before);
}

#[test]
fn stack_underflow_is_a_deterministic_fault() {
    let mut chip8 = load(&[0x00, 0xEE]);
    let before = chip8.state().clone();
    assert_eq!(chip8.run_cycle(), Err(Fault::StackUnderflow { pc: 0x200 }));
    assert_eq!(chip8.state(), &before);
}

#[test]
fn drawing_twice_erases_and_collides() {
    // LD I, font 0; LD V0, 5; LD V1, 6; DRW V0, V1, 5; DRW V0, V1, 5
    let mut chip8 = run(&[0xA0, 0x50, 0x60, 0x05, 0x61, 0x06, 0xD0, 0x15], 4);
    assert_eq!(chip8.state().v[0xF], 0);
    assert_eq!(chip8.frame()[6][5..9], [1, 1, 1, 1]);

    let mut chip8 = load(&[0xA0, 0x50, 0x60, 0x05, 0x61, 0x06, 0xD0, 0x15, 0xD0, 0x15]);
    for _ in 0..5 {
        chip8.run_cycle().unwrap();
    }
    assert_eq!(chip8.frame(), &[[0; DISPLAY_WIDTH]; DISPLAY_HEIGHT]);
    assert_eq!(chip8.state().v[0xF], 1);
}

#[test]
fn sprites_wrap_horizontally() {
    // LD V0, 60; LD V1, 0; LD I, 0x20A; DRW V0, V1, 1; JP 0x208; sprite 0xFF
    let chip8 = run(&[0x60, 0x3C, 0x61, 0x00, 0xA2, 0x0A, 0xD0, 0x11, 0x12, 0x08, 0xFF], 4);
    let row = chip8.frame()[0];
    let lit: Vec<usize> = (0..DISPLAY_WIDTH).filter(|x| row[*x] == 1).collect();
    assert_eq!(lit, vec![0, 1, 2, 3, 60, 61, 62, 63]);
}

#[test]
fn sprites_clip_vertically() {
    // LD V0, 0; LD V1, 30; LD I, 0x20A; DRW V0, V1, 8; JP 0x208; 8 rows of 0x80
    let mut program = vec![0x60, 0x00, 0x61, 0x1E, 0xA2, 0x0A, 0xD0, 0x18, 0x12, 0x08];
    program.extend_from_slice(&[0x80; 8]);
    let chip8 = run(&program, 4);

    let lit: Vec<usize> = (0..DISPLAY_HEIGHT)
        .filter(|y| chip8.frame()[*y][0] == 1)
        .collect();
    assert_eq!(lit, vec![30, 31]);
    assert_eq!(chip8.state().v[0xF], 0);
    assert_eq!(chip8.state().pc, 0x208);
}

#[test]
fn key_wait_blocks_until_rising_edge() {
    let mut chip8 = load(&[0xF5, 0x0A]);
    for _ in 0..10 {
        assert_eq!(chip8.run_cycle(), Ok(Step::AwaitingKey(0x5)));
        assert_eq!(chip8.state().pc, 0x200);
    }
    assert_eq!(chip8.awaiting_key(), Some(0x5));

    chip8.update_keypad(keys(&[0xB]));
    assert_eq!(
        chip8.run_cycle(),
        Ok(Step::Executed(Instruction::WaitKey { x: 0x5 }))
    );
    assert_eq!(chip8.state().v[0x5], 0xB);
    assert_eq!(chip8.state().pc, 0x202);
    assert_eq!(chip8.awaiting_key(), None);
}

#[test]
fn key_wait_ignores_keys_held_across_snapshots() {
    let mut chip8 = load(&[0xF5, 0x0A]);
    chip8.update_keypad(keys(&[0xB]));
    chip8.update_keypad(keys(&[0xB]));
    for _ in 0..10 {
        assert_eq!(chip8.run_cycle(), Ok(Step::AwaitingKey(0x5)));
    }
    assert_eq!(chip8.state().pc, 0x200);

    chip8.update_keypad(keys(&[0xB, 0x2]));
    chip8.run_cycle().unwrap();
    assert_eq!(chip8.state().v[0x5], 0x2);
}

#[test]
fn random_covers_every_byte() {
    // RND V0, 0xFF; JP 0x200
    let mut chip8 = load(&[0xC0, 0xFF, 0x12, 0x00]);
    let mut seen = HashSet::new();
    for _ in 0..10_000 {
        chip8.run_cycle().unwrap();
        seen.insert(chip8.state().v[0x0]);
        chip8.run_cycle().unwrap();
    }
    assert_eq!(seen.len(), 256);
}

#[test]
fn unknown_opcodes_are_skipped() {
    let mut chip8 = load(&[0x51, 0x21, 0x00, 0xE0]);
    assert_eq!(chip8.run_cycle(), Ok(Step::UnknownOpcode(0x5121)));
    assert_eq!(chip8.state().pc, 0x202);
    assert_eq!(chip8.run_cycle(), Ok(Step::Executed(Instruction::Clear)));
}

#[test]
fn bulk_store_wraps_past_end_of_memory() {
    // LD I, 0xFFF; LD V0, 1; LD V1, 2; LD [I], V1
    let chip8 = run(&[0xAF, 0xFF, 0x60, 0x01, 0x61, 0x02, 0xF1, 0x55], 4);
    let memory = chip8.state().memory.as_slice();
    assert_eq!((memory[0xFFF], memory[0x000]), (1, 2));
}

#[rstest]
#[case::se_match(&[0x60, 0x11, 0x30, 0x11], 0x206)]
#[case::se_miss(&[0x60, 0x11, 0x30, 0x12], 0x204)]
#[case::sne_match(&[0x60, 0x11, 0x40, 0x12], 0x206)]
#[case::sne_miss(&[0x60, 0x11, 0x40, 0x11], 0x204)]
#[case::sne_reg_match(&[0x60, 0x11, 0x90, 0x10], 0x206)]
#[case::sne_reg_miss(&[0x60, 0x00, 0x90, 0x10], 0x204)]
fn conditional_skips(#[case] program: &[u8], #[case] pc: u16) {
    let chip8 = run(program, 2);
    assert_eq!(chip8.state().pc, pc);
}

#[test]
fn timers_tick_independently_of_cycles() {
    // LD V0, 3; LD DT, V0; LD V1, DT
    let mut chip8 = run(&[0x60, 0x03, 0xF0, 0x15, 0xF1, 0x07], 2);
    chip8.tick_timers();
    chip8.run_cycle().unwrap();
    assert_eq!(chip8.state().v[0x1], 2);
    assert_eq!(chip8.state().pc, 0x206);
}
