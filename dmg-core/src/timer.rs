use crate::cpu::InterruptType;
use crate::memory::ioregisters::{IoRegister, IoRegisters};
use serde::{Deserialize, Serialize};

const DIV_UPDATE_FREQUENCY: u32 = 256;

/// Internal state of the timer unit: the free-running DIV accumulator and the
/// TIMA accumulator. The visible DIV/TIMA/TMA/TAC registers live in the I/O
/// register file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerState {
    divider_counter: u32,
    tima_counter: u32,
    timer_frequency: u8,
}

impl TimerState {
    pub fn new() -> Self {
        Self { divider_counter: 0, tima_counter: 0, timer_frequency: 0 }
    }

    /// Advance the timer unit by the number of cycles the last instruction
    /// consumed.
    ///
    /// DIV increments once per 256 cycles regardless of TAC. TIMA, when
    /// enabled by TAC bit 2, ticks at the TAC-programmed period; on overflow
    /// it reloads from TMA and requests the Timer interrupt. Writing a new
    /// frequency to TAC restarts the TIMA accumulator so the next tick lands
    /// one full period later.
    pub fn tick(&mut self, io_registers: &mut IoRegisters, cycles: u32) {
        self.divider_counter += cycles;
        while self.divider_counter >= DIV_UPDATE_FREQUENCY {
            self.divider_counter -= DIV_UPDATE_FREQUENCY;

            let old_div = io_registers.read_register(IoRegister::DIV);
            io_registers.write_register(IoRegister::DIV, old_div.wrapping_add(1));
        }

        let timer_control = io_registers.read_register(IoRegister::TAC);

        let frequency = timer_control & 0x03;
        if frequency != self.timer_frequency {
            self.timer_frequency = frequency;
            self.tima_counter = 0;
        }

        if timer_control & 0x04 == 0 {
            // TIMA updates are disabled
            return;
        }

        let period = tima_period(frequency);

        self.tima_counter += cycles;
        while self.tima_counter >= period {
            self.tima_counter -= period;

            let old_tima = io_registers.read_register(IoRegister::TIMA);
            if old_tima == 0xFF {
                let timer_modulo = io_registers.read_register(IoRegister::TMA);
                io_registers.write_register(IoRegister::TIMA, timer_modulo);

                io_registers.interrupt_flags().set(InterruptType::Timer);
            } else {
                io_registers.write_register(IoRegister::TIMA, old_tima + 1);
            }
        }
    }
}

impl Default for TimerState {
    fn default() -> Self {
        Self::new()
    }
}

fn tima_period(frequency: u8) -> u32 {
    match frequency & 0x03 {
        0x00 => 1024, // 4096 Hz
        0x01 => 16,   // 262144 Hz
        0x02 => 64,   // 65536 Hz
        0x03 => 256,  // 16384 Hz
        _ => unreachable!("value was masked with 0x03"),
    }
}
