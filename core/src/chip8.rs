use std::fs::File;
use std::io::Read;
use std::path::Path;

use log::{debug, trace, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::constants::{ADDRESS_MASK, MAX_ROM_SIZE, PROGRAM_START};
use crate::error::{Fault, LoadError};
use crate::instruction::Instruction;
use crate::keypad::KeySnapshot;
use crate::opcode::Opcode;
use crate::operations::{self, Flow};
use crate::state::{FrameBuffer, State};

/// The outcome of a single call to `Chip8::run_cycle`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// The instruction ran and the program counter moved on
    Executed(Instruction),
    /// Fx0A found no newly pressed key; the program counter did not move
    AwaitingKey(u8),
    /// The opcode is not part of the instruction set; it was skipped
    UnknownOpcode(u16),
}

/// # Chip-8
/// Chip-8 is a virtual machine and corresponding interpreted language.
///
/// Tracks:
///  - current `state`
///  - a random number generator for Cxnn
///
/// Supplies interfaces for:
/// - loading roms
/// - replacing the keypad snapshot
/// - advancing the CPU by a single cycle
/// - advancing its timers
/// - inspecting its frame buffer for rendering by some display
///
/// It does no timing of its own: a driver calls `run_cycle` at the CPU speed and
/// `tick_timers` at 60Hz.
pub struct Chip8 {
    state: State,
    rng: StdRng,
}

impl Chip8 {
    pub fn new() -> Self {
        Chip8 {
            state: State::new(),
            rng: StdRng::from_entropy(),
        }
    }

    /// A Chip-8 whose Cxnn sequence is reproducible
    pub fn with_seed(seed: u64) -> Self {
        Chip8 {
            state: State::new(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Copies a rom into memory at 0x200.
    ///
    /// Nothing else is reset, so roms should be loaded before the first cycle.
    /// Returns the number of bytes loaded.
    pub fn load_rom_bytes(&mut self, rom: &[u8]) -> Result<usize, LoadError> {
        if rom.len() > MAX_ROM_SIZE {
            return Err(LoadError::RomTooLarge {
                size: rom.len(),
                max: MAX_ROM_SIZE,
            });
        }
        self.state.memory.write_slice(PROGRAM_START, rom);
        debug!("loaded {} byte ROM at {:#05X}", rom.len(), PROGRAM_START);
        Ok(rom.len())
    }

    /// Load a rom from a reader
    ///
    /// At most one byte past the size limit is read, so an oversized or endless
    /// reader is rejected without being drained. Everything is read before
    /// anything is written, so a read error leaves memory untouched.
    ///
    /// # Arguments
    /// * `reader` a reader that contains a ROM
    pub fn load_rom(&mut self, reader: &mut dyn Read) -> Result<usize, LoadError> {
        let mut rom = Vec::with_capacity(MAX_ROM_SIZE + 1);
        reader.take(MAX_ROM_SIZE as u64 + 1).read_to_end(&mut rom)?;
        self.load_rom_bytes(&rom)
    }

    /// Load a rom from a file on disk
    pub fn load_rom_file(&mut self, path: impl AsRef<Path>) -> Result<usize, LoadError> {
        let mut file = File::open(path)?;
        self.load_rom(&mut file)
    }

    /// Replaces the keypad snapshot.
    ///
    /// The snapshot being replaced becomes the previous one; Fx0A waits for a key
    /// that is up in the previous snapshot and down in this one.
    ///
    /// # Arguments
    /// * `snapshot` the pressed status of keys 0..F
    pub fn update_keypad(&mut self, snapshot: KeySnapshot) {
        self.state.keypad.update(snapshot);
    }

    /// Advances the CPU by a single cycle
    /// - gets and decodes the opcode at the pc
    /// - executes it and moves the pc on
    ///
    /// While Fx0A waits for a key the pc stays put, so calling this again retries
    /// the wait. A stack fault leaves the state untouched.
    pub fn run_cycle(&mut self) -> Result<Step, Fault> {
        let op = self.get_op();
        let instruction = Instruction::decode(op);
        trace!(
            "{} v{:02X?} i{:04X} pc{:04X}",
            op,
            self.state.v,
            self.state.i,
            self.state.pc
        );

        let flow = operations::execute(instruction, &mut self.state, &mut self.rng)?;
        let pc = self.state.pc;
        let next = match flow {
            Flow::Next => pc.wrapping_add(2),
            Flow::Skip => pc.wrapping_add(4),
            Flow::Jump(addr) => addr,
            Flow::Wait => pc,
        };
        self.state.pc = next & ADDRESS_MASK;

        Ok(match instruction {
            Instruction::WaitKey { x } if flow == Flow::Wait => Step::AwaitingKey(x),
            Instruction::Unknown(op) => {
                warn!("unknown opcode {} at {:#05X}", op, pc);
                Step::UnknownOpcode(op.0)
            }
            Instruction::Sys { addr } => {
                debug!("ignoring machine code routine {:#05X} at {:#05X}", addr, pc);
                Step::Executed(instruction)
            }
            _ => Step::Executed(instruction),
        })
    }

    /// Decrements the delay and sound timers; called at 60Hz
    pub fn tick_timers(&mut self) {
        self.state.tick_timers();
    }

    pub fn frame(&self) -> &FrameBuffer {
        &self.state.frame_buffer
    }

    /// Whether the frame buffer changed since the flag was last cleared
    pub fn draw_pending(&self) -> bool {
        self.state.draw_flag
    }

    pub fn clear_draw_flag(&mut self) {
        self.state.draw_flag = false;
    }

    /// Returns the FrameBuffer if the display should be redrawn and clears the flag
    pub fn take_frame(&mut self) -> Option<&FrameBuffer> {
        if self.state.draw_flag {
            self.state.draw_flag = false;
            Some(&self.state.frame_buffer)
        } else {
            None
        }
    }

    /// The register Fx0A will write to, if it is waiting for a key
    pub fn awaiting_key(&self) -> Option<u8> {
        self.state.register_needing_key
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    /// Gets the opcode currently pointed at by the pc.
    /// Memory is stored as bytes, but opcodes are 16 bits so we combine two subsequent bytes.
    fn get_op(&self) -> Opcode {
        Opcode(self.state.memory.read_word(self.state.pc))
    }
}

impl Default for Chip8 {
    fn default() -> Self {
        Self::new()
    }
}
