pub mod address;
pub mod ioregisters;

use crate::memory::ioregisters::IoRegisters;
use serde::{Deserialize, Serialize};

/// A cartridge ROM image.
///
/// The image is flat: no mapper is emulated, and addresses below 0x8000 index
/// the image directly. Reads past the end of the image return 0xFF, the
/// open-bus value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cartridge {
    rom: Vec<u8>,
}

impl Cartridge {
    pub fn new(rom: Vec<u8>) -> Self {
        log::info!("Initializing cartridge using {} bytes of data", rom.len());

        Self { rom }
    }

    /// Read a value from the given ROM address. ROM addresses are in the
    /// range \[0x0000, 0x7FFF\]; addresses past the end of the image read as
    /// 0xFF.
    pub fn read_rom_address(&self, address: u16) -> u8 {
        self.rom.get(address as usize).copied().unwrap_or(0xFF)
    }
}

/// The unified 16-bit address space: cartridge ROM, VRAM, external RAM,
/// working RAM (echoed at 0xE000-0xFDFF), OAM, the I/O register file, HRAM,
/// and the IE register.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddressSpace {
    cartridge: Cartridge,
    #[serde(
        serialize_with = "crate::serialize::serialize_byte_array",
        deserialize_with = "crate::serialize::deserialize_byte_array"
    )]
    vram: [u8; 8192],
    #[serde(
        serialize_with = "crate::serialize::serialize_byte_array",
        deserialize_with = "crate::serialize::deserialize_byte_array"
    )]
    external_ram: [u8; 8192],
    #[serde(
        serialize_with = "crate::serialize::serialize_byte_array",
        deserialize_with = "crate::serialize::deserialize_byte_array"
    )]
    working_ram: [u8; 8192],
    #[serde(
        serialize_with = "crate::serialize::serialize_byte_array",
        deserialize_with = "crate::serialize::deserialize_byte_array"
    )]
    oam: [u8; 160],
    io_registers: IoRegisters,
    #[serde(
        serialize_with = "crate::serialize::serialize_byte_array",
        deserialize_with = "crate::serialize::deserialize_byte_array"
    )]
    hram: [u8; 127],
    ie_register: u8,
}

impl AddressSpace {
    pub fn new(cartridge: Cartridge) -> Self {
        Self {
            cartridge,
            vram: [0; 8192],
            external_ram: [0; 8192],
            working_ram: [0; 8192],
            oam: [0; 160],
            io_registers: IoRegisters::new(),
            hram: [0; 127],
            ie_register: 0,
        }
    }

    /// Read the value at the given address from the perspective of the CPU.
    pub fn read_address_u8(&self, address: u16) -> u8 {
        match address {
            address @ address::ROM_START..=address::ROM_END => {
                self.cartridge.read_rom_address(address)
            }
            address @ address::VRAM_START..=address::VRAM_END => {
                self.vram[(address - address::VRAM_START) as usize]
            }
            address @ address::EXTERNAL_RAM_START..=address::EXTERNAL_RAM_END => {
                self.external_ram[(address - address::EXTERNAL_RAM_START) as usize]
            }
            address @ address::WORKING_RAM_START..=address::WORKING_RAM_END => {
                self.working_ram[(address - address::WORKING_RAM_START) as usize]
            }
            address @ address::ECHO_RAM_START..=address::ECHO_RAM_END => {
                self.working_ram[(address - address::ECHO_RAM_START) as usize]
            }
            address @ address::OAM_START..=address::OAM_END => {
                self.oam[(address - address::OAM_START) as usize]
            }
            address::UNUSABLE_START..=address::UNUSABLE_END => 0x00,
            address @ address::IO_REGISTERS_START..=address::IO_REGISTERS_END => {
                self.io_registers.read_address(address)
            }
            address @ address::HRAM_START..=address::HRAM_END => {
                self.hram[(address - address::HRAM_START) as usize]
            }
            address::IE_REGISTER => self.ie_register,
        }
    }

    /// Assign a value to the given address from the perspective of the CPU.
    /// Writes to ROM and to the unusable region are silently dropped.
    pub fn write_address_u8(&mut self, address: u16, value: u8) {
        match address {
            address::ROM_START..=address::ROM_END => {}
            address @ address::VRAM_START..=address::VRAM_END => {
                self.vram[(address - address::VRAM_START) as usize] = value;
            }
            address @ address::EXTERNAL_RAM_START..=address::EXTERNAL_RAM_END => {
                self.external_ram[(address - address::EXTERNAL_RAM_START) as usize] = value;
            }
            address @ address::WORKING_RAM_START..=address::WORKING_RAM_END => {
                self.working_ram[(address - address::WORKING_RAM_START) as usize] = value;
            }
            address @ address::ECHO_RAM_START..=address::ECHO_RAM_END => {
                self.working_ram[(address - address::ECHO_RAM_START) as usize] = value;
            }
            address @ address::OAM_START..=address::OAM_END => {
                self.oam[(address - address::OAM_START) as usize] = value;
            }
            address::UNUSABLE_START..=address::UNUSABLE_END => {}
            address @ address::IO_REGISTERS_START..=address::IO_REGISTERS_END => {
                self.io_registers.write_address(address, value);
            }
            address @ address::HRAM_START..=address::HRAM_END => {
                self.hram[(address - address::HRAM_START) as usize] = value;
            }
            address::IE_REGISTER => {
                self.ie_register = value;
            }
        }
    }

    /// Read the value at the given address and the following address as a
    /// little-endian 16-bit value. The address wraps at the end of the
    /// address space.
    pub fn read_address_u16(&self, address: u16) -> u16 {
        let lsb = self.read_address_u8(address);
        let msb = self.read_address_u8(address.wrapping_add(1));
        u16::from_le_bytes([lsb, msb])
    }

    /// Assign a 16-bit value to the given address and the following address,
    /// using little-endian. The address wraps at the end of the address
    /// space.
    pub fn write_address_u16(&mut self, address: u16, value: u16) {
        let [lsb, msb] = value.to_le_bytes();
        self.write_address_u8(address, lsb);
        self.write_address_u8(address.wrapping_add(1), msb);
    }

    pub fn get_io_registers(&self) -> &IoRegisters {
        &self.io_registers
    }

    pub fn get_io_registers_mut(&mut self) -> &mut IoRegisters {
        &mut self.io_registers
    }

    /// Retrieve the current value of the IE register (interrupts enabled).
    pub fn get_ie_register(&self) -> u8 {
        self.ie_register
    }
}
