use crate::cpu::InterruptType;
use crate::memory::address;
use serde::{Deserialize, Serialize};

/// The I/O registers that the core reads or writes by name. Everything else
/// in 0xFF00-0xFF7F is plain RAM as far as this crate is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IoRegister {
    DIV,
    TIMA,
    TMA,
    TAC,
    IF,
    LCDC,
    STAT,
    SCY,
    SCX,
    LY,
    LYC,
    BGP,
    OBP0,
    OBP1,
    WY,
    WX,
}

impl IoRegister {
    pub fn from_address(address: u16) -> Option<Self> {
        let register = match address {
            address::DIV_REGISTER => Self::DIV,
            address::TIMA_REGISTER => Self::TIMA,
            address::TMA_REGISTER => Self::TMA,
            address::TAC_REGISTER => Self::TAC,
            address::IF_REGISTER => Self::IF,
            address::LCDC_REGISTER => Self::LCDC,
            address::STAT_REGISTER => Self::STAT,
            address::SCY_REGISTER => Self::SCY,
            address::SCX_REGISTER => Self::SCX,
            address::LY_REGISTER => Self::LY,
            address::LYC_REGISTER => Self::LYC,
            address::BGP_REGISTER => Self::BGP,
            address::OBP0_REGISTER => Self::OBP0,
            address::OBP1_REGISTER => Self::OBP1,
            address::WY_REGISTER => Self::WY,
            address::WX_REGISTER => Self::WX,
            _ => return None,
        };

        Some(register)
    }

    pub fn to_address(self) -> u16 {
        match self {
            Self::DIV => address::DIV_REGISTER,
            Self::TIMA => address::TIMA_REGISTER,
            Self::TMA => address::TMA_REGISTER,
            Self::TAC => address::TAC_REGISTER,
            Self::IF => address::IF_REGISTER,
            Self::LCDC => address::LCDC_REGISTER,
            Self::STAT => address::STAT_REGISTER,
            Self::SCY => address::SCY_REGISTER,
            Self::SCX => address::SCX_REGISTER,
            Self::LY => address::LY_REGISTER,
            Self::LYC => address::LYC_REGISTER,
            Self::BGP => address::BGP_REGISTER,
            Self::OBP0 => address::OBP0_REGISTER,
            Self::OBP1 => address::OBP1_REGISTER,
            Self::WY => address::WY_REGISTER,
            Self::WX => address::WX_REGISTER,
        }
    }
}

/// The 0xFF00-0xFF7F register file.
///
/// The memory map treats these as plain bytes; the timer, LCD, and interrupt
/// units give specific addresses their hardware meaning. The single exception
/// lives here: a CPU write to DIV resets it to 0 regardless of the value
/// written.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IoRegisters {
    #[serde(
        serialize_with = "crate::serialize::serialize_byte_array",
        deserialize_with = "crate::serialize::deserialize_byte_array"
    )]
    contents: [u8; 0x80],
}

impl IoRegisters {
    /// Create the register file with the post-boot values in place: LCDC=0x91,
    /// BGP=0xFC, OBP0=OBP1=0xFF, everything else (including the timer
    /// registers) zeroed.
    pub fn new() -> Self {
        let mut contents = [0; 0x80];
        contents[(address::LCDC_REGISTER - address::IO_REGISTERS_START) as usize] = 0x91;
        contents[(address::BGP_REGISTER - address::IO_REGISTERS_START) as usize] = 0xFC;
        contents[(address::OBP0_REGISTER - address::IO_REGISTERS_START) as usize] = 0xFF;
        contents[(address::OBP1_REGISTER - address::IO_REGISTERS_START) as usize] = 0xFF;

        Self { contents }
    }

    /// Read the byte at the given address from the perspective of the CPU.
    pub fn read_address(&self, address: u16) -> u8 {
        self.contents[(address - address::IO_REGISTERS_START) as usize]
    }

    /// Assign the byte at the given address from the perspective of the CPU.
    pub fn write_address(&mut self, address: u16, value: u8) {
        let value = match IoRegister::from_address(address) {
            // Any write to DIV zeroes it
            Some(IoRegister::DIV) => 0x00,
            _ => value,
        };

        self.contents[(address - address::IO_REGISTERS_START) as usize] = value;
    }

    /// Read a register by name.
    pub fn read_register(&self, register: IoRegister) -> u8 {
        self.contents[(register.to_address() - address::IO_REGISTERS_START) as usize]
    }

    /// Assign a register by name. This is the privileged path used by the
    /// timer and LCD units; it bypasses the DIV write behavior.
    pub fn write_register(&mut self, register: IoRegister, value: u8) {
        self.contents[(register.to_address() - address::IO_REGISTERS_START) as usize] = value;
    }

    /// Obtain a view over the IF register for requesting and clearing
    /// interrupts.
    pub fn interrupt_flags(&mut self) -> InterruptFlags<'_> {
        InterruptFlags { io_registers: self }
    }
}

impl Default for IoRegisters {
    fn default() -> Self {
        Self::new()
    }
}

/// A by-interrupt-type view over the IF register.
pub struct InterruptFlags<'a> {
    io_registers: &'a mut IoRegisters,
}

impl InterruptFlags<'_> {
    pub fn get(&self, interrupt_type: InterruptType) -> bool {
        self.io_registers.read_register(IoRegister::IF) & interrupt_type.bit() != 0
    }

    pub fn set(&mut self, interrupt_type: InterruptType) {
        let flags = self.io_registers.read_register(IoRegister::IF);
        self.io_registers.write_register(IoRegister::IF, flags | interrupt_type.bit());
    }

    pub fn clear(&mut self, interrupt_type: InterruptType) {
        let flags = self.io_registers.read_register(IoRegister::IF);
        self.io_registers.write_register(IoRegister::IF, flags & !interrupt_type.bit());
    }
}
