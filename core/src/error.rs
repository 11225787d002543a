use thiserror::Error;

use crate::constants::PROGRAM_START;

/// Reasons a ROM could not be loaded. Memory is left untouched in every case.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error(
        "ROM is {size} bytes, at most {max} bytes fit above {start:#05X}",
        start = PROGRAM_START
    )]
    RomTooLarge { size: usize, max: usize },

    #[error("unable to read ROM")]
    RomUnreadable(#[from] std::io::Error),
}

/// Conditions that stop a cycle from executing.
///
/// The faulting instruction has no effect and the program counter stays on it,
/// so running another cycle reports the same fault again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Fault {
    #[error("call stack overflow at {pc:#05X}")]
    StackOverflow { pc: u16 },

    #[error("return with an empty call stack at {pc:#05X}")]
    StackUnderflow { pc: u16 },
}
