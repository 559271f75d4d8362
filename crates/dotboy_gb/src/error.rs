use thiserror::Error;

/// Fatal emulation faults.
///
/// Everything else the hardware can do (disabled cartridge RAM, locked
/// VRAM/OAM, out-of-range bank selects) has a defined fallback and never
/// surfaces as an error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EmulationError {
    #[error("unsupported instruction 0x{opcode:02X} at PC=0x{pc:04X}")]
    UnsupportedInstruction { opcode: u8, pc: u16 },
    #[error("address 0x{address:04X} is outside every mapped region (PC=0x{pc:04X})")]
    AddressRouting { address: u16, pc: u16 },
    #[error("unsupported cartridge type: 0x{cartridge_type:02X}")]
    UnsupportedCartridge { cartridge_type: u8 },
    #[error("ROM should be at least 0x150 bytes, was {len} bytes")]
    RomTooSmall { len: usize },
    #[error("ROM could not be loaded: {0}")]
    RomUnavailable(String),
}

pub type Result<T> = std::result::Result<T, EmulationError>;

impl EmulationError {
    /// Attach the program counter of the instruction that triggered a
    /// routing fault; bank controllers report the address alone.
    pub(crate) fn at_pc(self, pc: u16) -> Self {
        match self {
            EmulationError::AddressRouting { address, .. } => {
                EmulationError::AddressRouting { address, pc }
            }
            other => other,
        }
    }
}
