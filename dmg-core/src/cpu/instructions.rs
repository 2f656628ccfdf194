mod parse;

use crate::cpu;
use crate::cpu::registers::{CpuRegister, CpuRegisterPair, CpuRegisters, Flags};
use crate::memory::AddressSpace;

pub use parse::{parse_next_instruction, ParseError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpCondition {
    NZ,
    Z,
    NC,
    C,
}

impl JumpCondition {
    fn check(self, cpu_registers: &CpuRegisters) -> bool {
        let flags = cpu_registers.flags();
        match self {
            Self::NZ => !flags.z,
            Self::Z => flags.z,
            Self::NC => !flags.c,
            Self::C => flags.c,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadTarget {
    Register(CpuRegister),
    Immediate(u8),
    IndirectHL,
    IndirectHLInc,
    IndirectHLDec,
    IndirectBC,
    IndirectDE,
    Accumulator,
    FFIndirectC,
    FFDirect(u8),
    Direct(u16),
}

impl ReadTarget {
    fn read_value(self, cpu_registers: &mut CpuRegisters, address_space: &AddressSpace) -> u8 {
        match self {
            Self::Register(register) => cpu_registers.read_register(register),
            Self::Immediate(n) => n,
            Self::IndirectHL => address_space.read_address_u8(cpu_registers.hl()),
            Self::IndirectHLInc => {
                let hl = cpu_registers.hl();
                let value = address_space.read_address_u8(hl);
                cpu_registers.set_hl(hl.wrapping_add(1));
                value
            }
            Self::IndirectHLDec => {
                let hl = cpu_registers.hl();
                let value = address_space.read_address_u8(hl);
                cpu_registers.set_hl(hl.wrapping_sub(1));
                value
            }
            Self::IndirectBC => address_space.read_address_u8(cpu_registers.bc()),
            Self::IndirectDE => address_space.read_address_u8(cpu_registers.de()),
            Self::Accumulator => cpu_registers.a(),
            Self::FFIndirectC => {
                let address =
                    u16::from_be_bytes([0xFF, cpu_registers.read_register(CpuRegister::C)]);
                address_space.read_address_u8(address)
            }
            Self::FFDirect(n) => {
                let address = u16::from_be_bytes([0xFF, n]);
                address_space.read_address_u8(address)
            }
            Self::Direct(nn) => address_space.read_address_u8(nn),
        }
    }

    fn cycles_required(self) -> u32 {
        match self {
            Self::Register(..) | Self::Accumulator => 0,
            Self::Immediate(..)
            | Self::IndirectHL
            | Self::IndirectHLInc
            | Self::IndirectHLDec
            | Self::IndirectBC
            | Self::IndirectDE
            | Self::FFIndirectC => 4,
            Self::FFDirect(..) => 8,
            Self::Direct(..) => 12,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteTarget {
    Register(CpuRegister),
    IndirectHL,
    IndirectHLInc,
    IndirectHLDec,
    IndirectBC,
    IndirectDE,
    Accumulator,
    FFIndirectC,
    FFDirect(u8),
    Direct(u16),
}

impl WriteTarget {
    fn write_value(self, value: u8, cpu_registers: &mut CpuRegisters, address_space: &mut AddressSpace) {
        match self {
            Self::Register(register) => {
                cpu_registers.set_register(register, value);
            }
            Self::IndirectHL => {
                address_space.write_address_u8(cpu_registers.hl(), value);
            }
            Self::IndirectHLInc => {
                let hl = cpu_registers.hl();
                address_space.write_address_u8(hl, value);
                cpu_registers.set_hl(hl.wrapping_add(1));
            }
            Self::IndirectHLDec => {
                let hl = cpu_registers.hl();
                address_space.write_address_u8(hl, value);
                cpu_registers.set_hl(hl.wrapping_sub(1));
            }
            Self::IndirectBC => {
                address_space.write_address_u8(cpu_registers.bc(), value);
            }
            Self::IndirectDE => {
                address_space.write_address_u8(cpu_registers.de(), value);
            }
            Self::Accumulator => {
                cpu_registers.set_a(value);
            }
            Self::FFIndirectC => {
                let address =
                    u16::from_be_bytes([0xFF, cpu_registers.read_register(CpuRegister::C)]);
                address_space.write_address_u8(address, value);
            }
            Self::FFDirect(n) => {
                let address = u16::from_be_bytes([0xFF, n]);
                address_space.write_address_u8(address, value);
            }
            Self::Direct(nn) => {
                address_space.write_address_u8(nn, value);
            }
        }
    }

    fn cycles_required(self) -> u32 {
        match self {
            Self::Register(..) | Self::Accumulator => 0,
            Self::IndirectHL
            | Self::IndirectHLInc
            | Self::IndirectHLDec
            | Self::IndirectBC
            | Self::IndirectDE
            | Self::FFIndirectC => 4,
            Self::FFDirect(..) => 8,
            Self::Direct(..) => 12,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModifyTarget {
    Register(CpuRegister),
    IndirectHL,
    Accumulator,
}

impl ModifyTarget {
    fn read_value(self, cpu_registers: &CpuRegisters, address_space: &AddressSpace) -> u8 {
        match self {
            Self::Register(register) => cpu_registers.read_register(register),
            Self::IndirectHL => address_space.read_address_u8(cpu_registers.hl()),
            Self::Accumulator => cpu_registers.a(),
        }
    }

    fn write_value(self, value: u8, cpu_registers: &mut CpuRegisters, address_space: &mut AddressSpace) {
        match self {
            Self::Register(register) => {
                cpu_registers.set_register(register, value);
            }
            Self::IndirectHL => {
                address_space.write_address_u8(cpu_registers.hl(), value);
            }
            Self::Accumulator => {
                cpu_registers.set_a(value);
            }
        }
    }

    fn cycles_required(self) -> u32 {
        match self {
            Self::Register(..) | Self::Accumulator => 0,
            Self::IndirectHL => 4,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    // All 8-bit LD/LDH instructions
    Load(WriteTarget, ReadTarget),
    // LD rr, nn
    LoadRegisterPairImmediate(CpuRegisterPair, u16),
    // LD (nn), SP
    LoadDirectStackPointer(u16),
    // LD SP, HL
    LoadStackPointerHL,
    // LDHL SP, e
    LoadHLStackPointerOffset(i8),
    // PUSH rr
    PushStack(CpuRegisterPair),
    // POP rr
    PopStack(CpuRegisterPair),
    // ADD r / (HL) / n
    Add(ReadTarget),
    // ADC r / (HL) / n
    AddWithCarry(ReadTarget),
    // SUB r / (HL) / n
    Subtract(ReadTarget),
    // SBC r / (HL) / n
    SubtractWithCarry(ReadTarget),
    // CP r / (HL) / n
    Compare(ReadTarget),
    // INC r / (HL)
    Increment(ModifyTarget),
    // DEC r / (HL)
    Decrement(ModifyTarget),
    // AND r / (HL) / n
    And(ReadTarget),
    // OR r / (HL) / n
    Or(ReadTarget),
    // XOR r / (HL) / n
    Xor(ReadTarget),
    // ADD HL, rr
    AddHLRegister(CpuRegisterPair),
    // INC rr
    IncRegisterPair(CpuRegisterPair),
    // DEC rr
    DecRegisterPair(CpuRegisterPair),
    // ADD SP, e
    AddSPImmediate(i8),
    // RLCA / RLC r / RLC (HL)
    RotateLeft(ModifyTarget),
    // RLA / RL r / RL (HL)
    RotateLeftThruCarry(ModifyTarget),
    // RRCA / RRC r / RRC (HL)
    RotateRight(ModifyTarget),
    // RRA / RR r / RR (HL)
    RotateRightThruCarry(ModifyTarget),
    // SLA r / (HL)
    ShiftLeft(ModifyTarget),
    // SWAP r / (HL)
    Swap(ModifyTarget),
    // SRA r / (HL)
    ArithmeticShiftRight(ModifyTarget),
    // SRL r / (HL)
    LogicalShiftRight(ModifyTarget),
    // BIT n, r / (HL)
    TestBit(u8, ReadTarget),
    // RES n, r / (HL)
    ResetBit(u8, ModifyTarget),
    // SET n, r / (HL)
    SetBit(u8, ModifyTarget),
    // CCF
    ComplementCarryFlag,
    // SCF
    SetCarryFlag,
    // DAA
    DecimalAdjustAccumulator,
    // CPL
    ComplementAccumulator,
    // JP nn
    Jump(u16),
    // JP HL
    JumpHL,
    // JP cc, nn
    JumpCond(JumpCondition, u16),
    // JR e
    RelativeJump(i8),
    // JR cc, e
    RelativeJumpCond(JumpCondition, i8),
    // CALL nn
    Call(u16),
    // CALL cc, nn
    CallCond(JumpCondition, u16),
    // RET
    Return,
    // RET cc
    ReturnCond(JumpCondition),
    // RETI
    ReturnFromInterruptHandler,
    // RST n
    RestartCall(u8),
    // HALT
    Halt,
    // STOP
    Stop,
    // DI
    DisableInterrupts,
    // EI
    EnableInterrupts,
    // NOP
    NoOp,
}

impl Instruction {
    /// Execute the given CPU instruction, modifying CPU registers/flags and
    /// memory as needed.
    ///
    /// This method does *not* update the PC register for the given
    /// instruction. It expects that the PC register was updated before this
    /// method was called.
    pub fn execute(self, address_space: &mut AddressSpace, cpu_registers: &mut CpuRegisters) {
        match self {
            Self::Load(write_target, read_target) => {
                let value = read_target.read_value(cpu_registers, address_space);
                write_target.write_value(value, cpu_registers, address_space);
            }
            Self::LoadRegisterPairImmediate(rr, nn) => {
                cpu_registers.set_register_pair(rr, nn);
            }
            Self::LoadDirectStackPointer(nn) => {
                address_space.write_address_u16(nn, cpu_registers.sp);
            }
            Self::LoadStackPointerHL => {
                cpu_registers.sp = cpu_registers.hl();
            }
            Self::PushStack(rr) => {
                cpu_registers.sp = cpu_registers.sp.wrapping_sub(2);
                address_space.write_address_u16(cpu_registers.sp, cpu_registers.read_register_pair(rr));
            }
            Self::PopStack(rr) => {
                cpu_registers.set_register_pair(rr, address_space.read_address_u16(cpu_registers.sp));
                cpu_registers.sp = cpu_registers.sp.wrapping_add(2);
            }
            Self::Add(read_target) => {
                let (sum, half_carry, carry) = add(
                    cpu_registers.a(),
                    read_target.read_value(cpu_registers, address_space),
                    false,
                );
                cpu_registers.set_a(sum);
                cpu_registers.set_flags(Flags { z: sum == 0, n: false, h: half_carry, c: carry });
            }
            Self::AddWithCarry(read_target) => {
                let (sum, half_carry, carry) = add(
                    cpu_registers.a(),
                    read_target.read_value(cpu_registers, address_space),
                    cpu_registers.flags().c,
                );
                cpu_registers.set_a(sum);
                cpu_registers.set_flags(Flags { z: sum == 0, n: false, h: half_carry, c: carry });
            }
            Self::Subtract(read_target) => {
                let (difference, half_carry, carry) = sub(
                    cpu_registers.a(),
                    read_target.read_value(cpu_registers, address_space),
                    false,
                );
                cpu_registers.set_a(difference);
                cpu_registers
                    .set_flags(Flags { z: difference == 0, n: true, h: half_carry, c: carry });
            }
            Self::SubtractWithCarry(read_target) => {
                let (difference, half_carry, carry) = sub(
                    cpu_registers.a(),
                    read_target.read_value(cpu_registers, address_space),
                    cpu_registers.flags().c,
                );
                cpu_registers.set_a(difference);
                cpu_registers
                    .set_flags(Flags { z: difference == 0, n: true, h: half_carry, c: carry });
            }
            Self::Compare(read_target) => {
                let (difference, half_carry, carry) = sub(
                    cpu_registers.a(),
                    read_target.read_value(cpu_registers, address_space),
                    false,
                );
                cpu_registers
                    .set_flags(Flags { z: difference == 0, n: true, h: half_carry, c: carry });
            }
            Self::Increment(modify_target) => {
                let value = modify_target.read_value(cpu_registers, address_space);
                let (sum, half_carry, _) = add(value, 1, false);
                modify_target.write_value(sum, cpu_registers, address_space);
                cpu_registers.set_flags(Flags {
                    z: sum == 0,
                    n: false,
                    h: half_carry,
                    ..cpu_registers.flags()
                });
            }
            Self::Decrement(modify_target) => {
                let value = modify_target.read_value(cpu_registers, address_space);
                let (difference, half_carry, _) = sub(value, 1, false);
                modify_target.write_value(difference, cpu_registers, address_space);
                cpu_registers.set_flags(Flags {
                    z: difference == 0,
                    n: true,
                    h: half_carry,
                    ..cpu_registers.flags()
                });
            }
            Self::And(read_target) => {
                let value =
                    cpu_registers.a() & read_target.read_value(cpu_registers, address_space);
                cpu_registers.set_a(value);
                cpu_registers.set_flags(Flags { z: value == 0, n: false, h: true, c: false });
            }
            Self::Or(read_target) => {
                let value =
                    cpu_registers.a() | read_target.read_value(cpu_registers, address_space);
                cpu_registers.set_a(value);
                cpu_registers.set_flags(Flags { z: value == 0, n: false, h: false, c: false });
            }
            Self::Xor(read_target) => {
                let value =
                    cpu_registers.a() ^ read_target.read_value(cpu_registers, address_space);
                cpu_registers.set_a(value);
                cpu_registers.set_flags(Flags { z: value == 0, n: false, h: false, c: false });
            }
            Self::AddHLRegister(rr) => {
                let (sum, half_carry, carry) =
                    add_u16(cpu_registers.hl(), cpu_registers.read_register_pair(rr));
                cpu_registers.set_hl(sum);
                cpu_registers.set_flags(Flags {
                    n: false,
                    h: half_carry,
                    c: carry,
                    ..cpu_registers.flags()
                });
            }
            Self::IncRegisterPair(rr) => {
                cpu_registers
                    .set_register_pair(rr, cpu_registers.read_register_pair(rr).wrapping_add(1));
            }
            Self::DecRegisterPair(rr) => {
                cpu_registers
                    .set_register_pair(rr, cpu_registers.read_register_pair(rr).wrapping_sub(1));
            }
            Self::AddSPImmediate(e) => {
                let (sp, half_carry, carry) = add_sp_offset(cpu_registers.sp, e);
                cpu_registers.sp = sp;
                cpu_registers.set_flags(Flags { z: false, n: false, h: half_carry, c: carry });
            }
            Self::LoadHLStackPointerOffset(e) => {
                let (sp, half_carry, carry) = add_sp_offset(cpu_registers.sp, e);
                cpu_registers.set_hl(sp);
                cpu_registers.set_flags(Flags { z: false, n: false, h: half_carry, c: carry });
            }
            Self::RotateLeft(modify_target) => {
                let (value, carry) =
                    rotate_left(modify_target.read_value(cpu_registers, address_space));
                modify_target.write_value(value, cpu_registers, address_space);
                let z = modify_target != ModifyTarget::Accumulator && value == 0;
                cpu_registers.set_flags(Flags { z, n: false, h: false, c: carry });
            }
            Self::RotateLeftThruCarry(modify_target) => {
                let (value, carry) = rotate_left_thru_carry(
                    modify_target.read_value(cpu_registers, address_space),
                    cpu_registers.flags().c,
                );
                modify_target.write_value(value, cpu_registers, address_space);
                let z = modify_target != ModifyTarget::Accumulator && value == 0;
                cpu_registers.set_flags(Flags { z, n: false, h: false, c: carry });
            }
            Self::RotateRight(modify_target) => {
                let (value, carry) =
                    rotate_right(modify_target.read_value(cpu_registers, address_space));
                modify_target.write_value(value, cpu_registers, address_space);
                let z = modify_target != ModifyTarget::Accumulator && value == 0;
                cpu_registers.set_flags(Flags { z, n: false, h: false, c: carry });
            }
            Self::RotateRightThruCarry(modify_target) => {
                let (value, carry) = rotate_right_thru_carry(
                    modify_target.read_value(cpu_registers, address_space),
                    cpu_registers.flags().c,
                );
                modify_target.write_value(value, cpu_registers, address_space);
                let z = modify_target != ModifyTarget::Accumulator && value == 0;
                cpu_registers.set_flags(Flags { z, n: false, h: false, c: carry });
            }
            Self::ShiftLeft(modify_target) => {
                let (value, carry) =
                    shift_left(modify_target.read_value(cpu_registers, address_space));
                modify_target.write_value(value, cpu_registers, address_space);
                cpu_registers.set_flags(Flags { z: value == 0, n: false, h: false, c: carry });
            }
            Self::Swap(modify_target) => {
                let value = swap_bits(modify_target.read_value(cpu_registers, address_space));
                modify_target.write_value(value, cpu_registers, address_space);
                cpu_registers.set_flags(Flags { z: value == 0, n: false, h: false, c: false });
            }
            Self::ArithmeticShiftRight(modify_target) => {
                let (value, carry) =
                    shift_right_arithmetic(modify_target.read_value(cpu_registers, address_space));
                modify_target.write_value(value, cpu_registers, address_space);
                cpu_registers.set_flags(Flags { z: value == 0, n: false, h: false, c: carry });
            }
            Self::LogicalShiftRight(modify_target) => {
                let (value, carry) =
                    shift_right_logical(modify_target.read_value(cpu_registers, address_space));
                modify_target.write_value(value, cpu_registers, address_space);
                cpu_registers.set_flags(Flags { z: value == 0, n: false, h: false, c: carry });
            }
            Self::TestBit(n, read_target) => {
                let r_value = read_target.read_value(cpu_registers, address_space);
                cpu_registers.set_flags(Flags {
                    z: r_value & (1 << n) == 0,
                    n: false,
                    h: true,
                    ..cpu_registers.flags()
                });
            }
            Self::SetBit(n, modify_target) => {
                let value = (1 << n) | modify_target.read_value(cpu_registers, address_space);
                modify_target.write_value(value, cpu_registers, address_space);
            }
            Self::ResetBit(n, modify_target) => {
                let value = !(1 << n) & modify_target.read_value(cpu_registers, address_space);
                modify_target.write_value(value, cpu_registers, address_space);
            }
            Self::ComplementCarryFlag => {
                let flags = cpu_registers.flags();
                cpu_registers.set_flags(Flags { n: false, h: false, c: !flags.c, ..flags });
            }
            Self::SetCarryFlag => {
                cpu_registers.set_flags(Flags {
                    n: false,
                    h: false,
                    c: true,
                    ..cpu_registers.flags()
                });
            }
            Self::DecimalAdjustAccumulator => {
                decimal_adjust_accumulator(cpu_registers);
            }
            Self::ComplementAccumulator => {
                cpu_registers.set_a(!cpu_registers.a());
                cpu_registers.set_flags(Flags { n: true, h: true, ..cpu_registers.flags() });
            }
            Self::Jump(nn) => {
                cpu_registers.pc = nn;
            }
            Self::JumpHL => {
                cpu_registers.pc = cpu_registers.hl();
            }
            Self::JumpCond(cc, nn) => {
                if cc.check(cpu_registers) {
                    cpu_registers.pc = nn;
                }
            }
            Self::RelativeJump(e) => {
                cpu_registers.pc = relative_jump_target(cpu_registers.pc, e);
            }
            Self::RelativeJumpCond(cc, e) => {
                if cc.check(cpu_registers) {
                    cpu_registers.pc = relative_jump_target(cpu_registers.pc, e);
                }
            }
            Self::Call(nn) => {
                cpu_registers.sp = cpu_registers.sp.wrapping_sub(2);
                address_space.write_address_u16(cpu_registers.sp, cpu_registers.pc);
                cpu_registers.pc = nn;
            }
            Self::CallCond(cc, nn) => {
                if cc.check(cpu_registers) {
                    cpu_registers.sp = cpu_registers.sp.wrapping_sub(2);
                    address_space.write_address_u16(cpu_registers.sp, cpu_registers.pc);
                    cpu_registers.pc = nn;
                }
            }
            Self::Return => {
                cpu_registers.pc = address_space.read_address_u16(cpu_registers.sp);
                cpu_registers.sp = cpu_registers.sp.wrapping_add(2);
            }
            Self::ReturnCond(cc) => {
                if cc.check(cpu_registers) {
                    cpu_registers.pc = address_space.read_address_u16(cpu_registers.sp);
                    cpu_registers.sp = cpu_registers.sp.wrapping_add(2);
                }
            }
            Self::ReturnFromInterruptHandler => {
                cpu_registers.pc = address_space.read_address_u16(cpu_registers.sp);
                cpu_registers.sp = cpu_registers.sp.wrapping_add(2);
                cpu_registers.ime = true;
            }
            Self::RestartCall(rst_address) => {
                cpu_registers.sp = cpu_registers.sp.wrapping_sub(2);
                address_space.write_address_u16(cpu_registers.sp, cpu_registers.pc);
                cpu_registers.pc = rst_address.into();
            }
            Self::Halt => {
                if !cpu_registers.ime && cpu::interrupt_triggered_no_ime_check(address_space) {
                    // HALT bug: the CPU does not halt and the next opcode
                    // byte is fetched twice
                    cpu_registers.halt_bug_triggered = true;
                } else {
                    cpu_registers.halted = true;
                }
            }
            Self::Stop => {
                // No joypad matrix exists to wake from STOP, so it parks the
                // CPU the same way HALT does
                cpu_registers.halted = true;
            }
            Self::DisableInterrupts => {
                cpu_registers.ime = false;
            }
            Self::EnableInterrupts => {
                cpu_registers.ime = true;

                cpu_registers.interrupt_delay = true;
                // Return early because this is the only instruction that
                // should not unset interrupt delay
                return;
            }
            Self::NoOp => {}
        }

        cpu_registers.interrupt_delay = false;
    }

    /// Return the number of clock cycles that are required to execute this
    /// instruction.
    ///
    /// Requires CPU registers as a parameter because conditional control flow
    /// instructions can take different numbers of cycles depending on whether
    /// the condition is true or false.
    pub fn cycles_required(self, cpu_registers: &CpuRegisters) -> u32 {
        match self {
            Self::DecimalAdjustAccumulator
            | Self::ComplementAccumulator
            | Self::RotateLeft(ModifyTarget::Accumulator)
            | Self::RotateLeftThruCarry(ModifyTarget::Accumulator)
            | Self::RotateRight(ModifyTarget::Accumulator)
            | Self::RotateRightThruCarry(ModifyTarget::Accumulator)
            | Self::SetCarryFlag
            | Self::ComplementCarryFlag
            | Self::NoOp
            | Self::DisableInterrupts
            | Self::EnableInterrupts
            | Self::JumpHL
            | Self::Halt
            | Self::Stop => 4,

            Self::LoadStackPointerHL
            | Self::AddHLRegister(..)
            | Self::IncRegisterPair(..)
            | Self::DecRegisterPair(..) => 8,
            Self::LoadRegisterPairImmediate(..)
            | Self::PopStack(..)
            | Self::LoadHLStackPointerOffset(..)
            | Self::RelativeJump(..) => 12,
            Self::PushStack(..)
            | Self::AddSPImmediate(..)
            | Self::Jump(..)
            | Self::Return
            | Self::ReturnFromInterruptHandler
            | Self::RestartCall(..) => 16,
            Self::LoadDirectStackPointer(..) => 20,
            Self::Call(..) => 24,
            Self::JumpCond(cc, ..) => {
                if cc.check(cpu_registers) {
                    16
                } else {
                    12
                }
            }
            Self::RelativeJumpCond(cc, ..) => {
                if cc.check(cpu_registers) {
                    12
                } else {
                    8
                }
            }
            Self::CallCond(cc, ..) => {
                if cc.check(cpu_registers) {
                    24
                } else {
                    12
                }
            }
            Self::ReturnCond(cc) => {
                if cc.check(cpu_registers) {
                    20
                } else {
                    8
                }
            }
            Self::Load(write_target, read_target) => {
                4 + read_target.cycles_required() + write_target.cycles_required()
            }
            Self::Add(read_target)
            | Self::AddWithCarry(read_target)
            | Self::Subtract(read_target)
            | Self::SubtractWithCarry(read_target)
            | Self::And(read_target)
            | Self::Or(read_target)
            | Self::Xor(read_target)
            | Self::Compare(read_target) => 4 + read_target.cycles_required(),
            Self::TestBit(_, read_target) => 8 + read_target.cycles_required(),
            Self::Increment(modify_target) | Self::Decrement(modify_target) => {
                4 + 2 * modify_target.cycles_required()
            }
            Self::RotateLeft(modify_target)
            | Self::RotateRight(modify_target)
            | Self::RotateLeftThruCarry(modify_target)
            | Self::RotateRightThruCarry(modify_target)
            | Self::ShiftLeft(modify_target)
            | Self::ArithmeticShiftRight(modify_target)
            | Self::LogicalShiftRight(modify_target)
            | Self::Swap(modify_target)
            | Self::ResetBit(_, modify_target)
            | Self::SetBit(_, modify_target) => 8 + 2 * modify_target.cycles_required(),
        }
    }
}

// Arithmetic is done in a wider width than 8 bits with the carry folded in,
// then truncated; the carry and half-carry results fall out of the wide sum.
// Helpers return (value, half_carry, carry).

fn add(l_value: u8, r_value: u8, carry: bool) -> (u8, bool, bool) {
    let carry = u8::from(carry);
    let wide_sum = u16::from(l_value) + u16::from(r_value) + u16::from(carry);
    let half_carry = (l_value & 0x0F) + (r_value & 0x0F) + carry > 0x0F;

    (wide_sum as u8, half_carry, wide_sum > 0xFF)
}

fn sub(l_value: u8, r_value: u8, carry: bool) -> (u8, bool, bool) {
    let carry = u16::from(carry);
    let wide_difference = u16::from(l_value)
        .wrapping_sub(u16::from(r_value))
        .wrapping_sub(carry);
    let half_carry = u16::from(l_value & 0x0F) < u16::from(r_value & 0x0F) + carry;
    let borrow = u16::from(l_value) < u16::from(r_value) + carry;

    (wide_difference as u8, half_carry, borrow)
}

fn add_u16(l_value: u16, r_value: u16) -> (u16, bool, bool) {
    let (sum, carry) = l_value.overflowing_add(r_value);
    // H is carry out of bit 11
    let half_carry = (l_value & 0x0FFF) + (r_value & 0x0FFF) >= 0x1000;

    (sum, half_carry, carry)
}

fn rotate_left(value: u8) -> (u8, bool) {
    let leftmost_set = value & 0x80 != 0;
    let new_value = (value << 1) | u8::from(leftmost_set);

    (new_value, leftmost_set)
}

fn rotate_left_thru_carry(value: u8, carry: bool) -> (u8, bool) {
    let leftmost_set = value & 0x80 != 0;
    let new_value = (value << 1) | u8::from(carry);

    (new_value, leftmost_set)
}

fn rotate_right(value: u8) -> (u8, bool) {
    let rightmost_set = value & 0x01 != 0;
    let new_value = (value >> 1) | (u8::from(rightmost_set) << 7);

    (new_value, rightmost_set)
}

fn rotate_right_thru_carry(value: u8, carry: bool) -> (u8, bool) {
    let rightmost_set = value & 0x01 != 0;
    let new_value = (value >> 1) | (u8::from(carry) << 7);

    (new_value, rightmost_set)
}

fn shift_left(value: u8) -> (u8, bool) {
    (value << 1, value & 0x80 != 0)
}

fn shift_right_arithmetic(value: u8) -> (u8, bool) {
    ((value >> 1) | (value & 0x80), value & 0x01 != 0)
}

fn shift_right_logical(value: u8) -> (u8, bool) {
    (value >> 1, value & 0x01 != 0)
}

fn swap_bits(value: u8) -> u8 {
    (value >> 4) | (value << 4)
}

fn relative_jump_target(pc: u16, offset: i8) -> u16 {
    (i32::from(pc) + i32::from(offset)) as u16
}

fn decimal_adjust_accumulator(cpu_registers: &mut CpuRegisters) {
    let flags = cpu_registers.flags();
    let a = cpu_registers.a();

    // Each nibble needs a 0x06/0x60 correction if the previous op carried
    // out of it, or (after an addition) if it overflowed the BCD digit range
    // on its own. After a subtraction only the recorded carries matter, and
    // the carry flag is left as-is.
    let mut adjustment = 0x00;
    let mut carry = flags.c;
    if flags.h || (!flags.n && a & 0x0F > 0x09) {
        adjustment |= 0x06;
    }
    if flags.c || (!flags.n && a > 0x99) {
        adjustment |= 0x60;
        carry = true;
    }

    let value =
        if flags.n { a.wrapping_sub(adjustment) } else { a.wrapping_add(adjustment) };

    cpu_registers.set_a(value);
    cpu_registers.set_flags(Flags { z: value == 0, h: false, c: carry, ..flags });
}

fn add_sp_offset(sp: u16, offset: i8) -> (u16, bool, bool) {
    // H and C come from adding the low byte of SP to the unsigned byte of
    // the offset, regardless of the offset's sign
    let offset_byte = offset as u8;
    let half_carry = (sp & 0x000F) + u16::from(offset_byte & 0x0F) > 0x000F;
    let carry = (sp & 0x00FF) + u16::from(offset_byte) > 0x00FF;

    let result = (i32::from(sp) + i32::from(offset)) as u16;

    (result, half_carry, carry)
}
