use crate::cpu::instructions::{self, ParseError};
use crate::cpu::{self, CpuRegisters};
use crate::lcd::{LcdState, Renderer};
use crate::memory::{AddressSpace, Cartridge};
use crate::timer::TimerState;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Machine cycles per video frame: 154 scanlines of 456 cycles each.
pub const CYCLES_PER_FRAME: u64 = 154 * crate::lcd::CYCLES_PER_SCANLINE as u64;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepError {
    #[error("error parsing CPU instruction: {source}")]
    InstructionParse {
        #[from]
        source: ParseError,
    },
}

/// The emulator core: CPU registers, the address space, and the timer and
/// LCD units, advanced one instruction at a time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameBoy {
    address_space: AddressSpace,
    cpu_registers: CpuRegisters,
    timer: TimerState,
    lcd: LcdState,
}

impl GameBoy {
    /// Create a core in the post-boot state with the given cartridge mapped
    /// in.
    pub fn new(cartridge: Cartridge) -> Self {
        Self {
            address_space: AddressSpace::new(cartridge),
            cpu_registers: CpuRegisters::new(),
            timer: TimerState::new(),
            lcd: LcdState::new(),
        }
    }

    /// Execute one CPU step: run a single instruction (or idle for one
    /// machine cycle while halted), feed the consumed cycles to the timer
    /// and LCD units, then service the highest-priority pending-and-enabled
    /// interrupt if IME allows it.
    ///
    /// Returns the total number of cycles consumed, including the interrupt
    /// service routine when one ran.
    pub fn step<R: Renderer>(&mut self, renderer: &mut R) -> Result<u32, StepError> {
        let cycles = self.tick_cpu()?;
        self.timer.tick(self.address_space.get_io_registers_mut(), cycles);
        self.lcd.tick(self.address_space.get_io_registers_mut(), cycles, renderer);

        let mut total_cycles = cycles;
        if cpu::interrupt_triggered(&self.cpu_registers, &self.address_space) {
            cpu::execute_interrupt_service_routine(&mut self.cpu_registers, &mut self.address_space);

            self.timer.tick(self.address_space.get_io_registers_mut(), cpu::ISR_CYCLES_REQUIRED);
            self.lcd.tick(
                self.address_space.get_io_registers_mut(),
                cpu::ISR_CYCLES_REQUIRED,
                renderer,
            );
            total_cycles += cpu::ISR_CYCLES_REQUIRED;
        }

        Ok(total_cycles)
    }

    fn tick_cpu(&mut self) -> Result<u32, StepError> {
        if self.cpu_registers.halted {
            if cpu::interrupt_triggered_no_ime_check(&self.address_space) {
                self.cpu_registers.halted = false;
            } else {
                // Let the timer and LCD run for 1 M-cycle
                return Ok(4);
            }
        }

        let (instruction, pc) = instructions::parse_next_instruction(
            &self.address_space,
            self.cpu_registers.pc,
            self.cpu_registers.halt_bug_triggered,
        )?;

        self.cpu_registers.halt_bug_triggered = false;

        log::trace!("Updating PC from {:04X} to {pc:04X}", self.cpu_registers.pc);
        self.cpu_registers.pc = pc;

        let cycles_required = instruction.cycles_required(&self.cpu_registers);

        log::trace!("Executing instruction {instruction:02X?}, will take {cycles_required} cycles");
        instruction.execute(&mut self.address_space, &mut self.cpu_registers);

        Ok(cycles_required)
    }

    /// Step until one full frame's worth of cycles has elapsed. Returns the
    /// number of cycles actually consumed, which can slightly exceed the
    /// frame budget because the final instruction is not split.
    pub fn run_frame<R: Renderer>(&mut self, renderer: &mut R) -> Result<u64, StepError> {
        let mut frame_cycles = 0;
        while frame_cycles < CYCLES_PER_FRAME {
            frame_cycles += u64::from(self.step(renderer)?);
        }

        Ok(frame_cycles)
    }

    /// Whether any interrupt is both requested and enabled, regardless of
    /// IME. Drivers can use this to pace rendering or break out of HALT
    /// loops.
    pub fn interrupt_pending(&self) -> bool {
        cpu::interrupt_triggered_no_ime_check(&self.address_space)
    }

    /// Request an interrupt by setting its IF bit. Collaborators that live
    /// outside the core (serial, joypad) raise their interrupts through
    /// this.
    pub fn request_interrupt(&mut self, interrupt_type: cpu::InterruptType) {
        self.address_space.get_io_registers_mut().interrupt_flags().set(interrupt_type);
    }

    pub fn address_space(&self) -> &AddressSpace {
        &self.address_space
    }

    pub fn address_space_mut(&mut self) -> &mut AddressSpace {
        &mut self.address_space
    }

    pub fn cpu_registers(&self) -> &CpuRegisters {
        &self.cpu_registers
    }

    pub fn cpu_registers_mut(&mut self) -> &mut CpuRegisters {
        &mut self.cpu_registers
    }
}
