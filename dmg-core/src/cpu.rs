pub(crate) mod instructions;
mod registers;


use crate::memory::ioregisters::IoRegister;
use crate::memory::AddressSpace;

pub use instructions::ParseError;
pub use registers::{CpuRegister, CpuRegisterPair, CpuRegisters, Flags};

/// The five interrupt sources, in priority order: the lowest IF/IE bit wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterruptType {
    VBlank,
    LcdStatus,
    Timer,
    Serial,
    Joypad,
}

impl InterruptType {
    pub const ALL: [Self; 5] =
        [Self::VBlank, Self::LcdStatus, Self::Timer, Self::Serial, Self::Joypad];

    /// The IF/IE bit for this interrupt.
    pub fn bit(self) -> u8 {
        match self {
            Self::VBlank => 1 << 0,
            Self::LcdStatus => 1 << 1,
            Self::Timer => 1 << 2,
            Self::Serial => 1 << 3,
            Self::Joypad => 1 << 4,
        }
    }

    /// The address that the CPU jumps to when servicing this interrupt.
    pub fn handler_address(self) -> u16 {
        match self {
            Self::VBlank => 0x0040,
            Self::LcdStatus => 0x0048,
            Self::Timer => 0x0050,
            Self::Serial => 0x0058,
            Self::Joypad => 0x0060,
        }
    }
}

/// Cycles consumed by the interrupt service routine: 2 idle machine cycles,
/// the PC push, and the jump to the handler address.
pub const ISR_CYCLES_REQUIRED: u32 = 20;

const INTERRUPT_MASK: u8 = 0x1F;

/// Whether an enabled interrupt is pending and the CPU will actually service
/// it: requires IME, and EI's one-instruction enable delay must have elapsed.
pub fn interrupt_triggered(cpu_registers: &CpuRegisters, address_space: &AddressSpace) -> bool {
    cpu_registers.ime
        && !cpu_registers.interrupt_delay
        && interrupt_triggered_no_ime_check(address_space)
}

/// Whether any interrupt is both requested and enabled, ignoring IME. This is
/// the condition that wakes a halted CPU.
pub fn interrupt_triggered_no_ime_check(address_space: &AddressSpace) -> bool {
    let interrupt_flags = address_space.get_io_registers().read_register(IoRegister::IF);
    let ie_register = address_space.get_ie_register();

    interrupt_flags & ie_register & INTERRUPT_MASK != 0
}

/// The highest-priority interrupt that is both requested and enabled, if any.
pub fn highest_priority_interrupt(address_space: &AddressSpace) -> Option<InterruptType> {
    let interrupt_flags = address_space.get_io_registers().read_register(IoRegister::IF);
    let ie_register = address_space.get_ie_register();
    let pending = interrupt_flags & ie_register & INTERRUPT_MASK;

    InterruptType::ALL.into_iter().find(|interrupt_type| pending & interrupt_type.bit() != 0)
}

/// Service the highest-priority pending-and-enabled interrupt: clear IME and
/// the IF bit, push PC (high byte first), and jump to the handler address.
/// Does nothing if no interrupt is pending.
pub fn execute_interrupt_service_routine(
    cpu_registers: &mut CpuRegisters,
    address_space: &mut AddressSpace,
) {
    let Some(interrupt_type) = highest_priority_interrupt(address_space) else {
        return;
    };

    log::trace!(
        "Servicing {interrupt_type:?} interrupt, jumping to {:04X}",
        interrupt_type.handler_address()
    );

    cpu_registers.ime = false;
    cpu_registers.halted = false;
    address_space.get_io_registers_mut().interrupt_flags().clear(interrupt_type);

    cpu_registers.sp = cpu_registers.sp.wrapping_sub(2);
    address_space.write_address_u16(cpu_registers.sp, cpu_registers.pc);
    cpu_registers.pc = interrupt_type.handler_address();
}
