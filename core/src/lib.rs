pub use chip8::{Chip8, Step};
pub use constants::{CLOCK_SPEED, TIMER_SPEED};
pub use error::{Fault, LoadError};
pub use instruction::Instruction;
pub use keypad::{KeySnapshot, Keypad};
pub use memory::Memory;
pub use opcode::Opcode;
pub use state::{FrameBuffer, State};

mod chip8;
pub mod constants;
mod error;
mod instruction;
mod keypad;
mod memory;
mod opcode;
mod operations;
pub mod state;
