use super::{hash_map, run_test, set_in_state, ExpectedState, ALL_REGISTERS};

use crate::cpu::registers::CpuRegister;

#[test]
fn ld_register_immediate() {
    for r in ALL_REGISTERS {
        let load_opcode = 0x06 | (r.to_opcode_bits() << 3);
        let load_opcode_hex = format!("{load_opcode:02x}");

        let mut expected_state = ExpectedState::empty();
        set_in_state(&mut expected_state, r, 0x47);

        run_test(
            // LD <r>, 0x47
            &format!("{load_opcode_hex}47"),
            &expected_state,
        );
    }
}

#[test]
fn ld_register_register() {
    for dst in ALL_REGISTERS {
        for src in ALL_REGISTERS {
            let load_src_opcode = 0x06 | (src.to_opcode_bits() << 3);
            let load_src_hex = format!("{load_src_opcode:02x}");

            let ld_opcode = 0x40 | (dst.to_opcode_bits() << 3) | src.to_opcode_bits();
            let ld_opcode_hex = format!("{ld_opcode:02x}");

            let mut expected_state = ExpectedState::empty();
            set_in_state(&mut expected_state, dst, 0x3D);

            run_test(
                // LD <src>, 0x3D; LD <dst>, <src>
                &format!("{load_src_hex}3D{ld_opcode_hex}"),
                &expected_state,
            );
        }
    }
}

#[test]
fn ld_register_indirect_hl() {
    for r in [CpuRegister::A, CpuRegister::B, CpuRegister::C, CpuRegister::D, CpuRegister::E] {
        let ld_opcode = 0x46 | (r.to_opcode_bits() << 3);
        let ld_opcode_hex = format!("{ld_opcode:02x}");

        let mut expected_state = ExpectedState::empty();
        set_in_state(&mut expected_state, r, 0x42);

        run_test(
            // LD HL, 0xCDA4; LD (HL), 0x42; LD <r>, (HL)
            &format!("21A4CD3642{ld_opcode_hex}"),
            &expected_state,
        );
    }
}

#[test]
fn ld_indirect_hl_register() {
    run_test(
        // LD HL, 0xCDA4; LD C, 0x57; LD (HL), C
        "21A4CD0E5771",
        &ExpectedState { memory: hash_map! { 0xCDA4: 0x57 }, ..ExpectedState::empty() },
    );

    // LD (HL), H / LD (HL), L store the pointer's own bytes
    run_test(
        // LD HL, 0xCDA4; LD (HL), H
        "21A4CD74",
        &ExpectedState { memory: hash_map! { 0xCDA4: 0xCD }, ..ExpectedState::empty() },
    );

    run_test(
        // LD HL, 0xCDA4; LD (HL), L
        "21A4CD75",
        &ExpectedState { memory: hash_map! { 0xCDA4: 0xA4 }, ..ExpectedState::empty() },
    );
}

#[test]
fn ld_accumulator_indirect_bc_de() {
    run_test(
        // LD BC, 0xC200; LD A, 0x66; LD (BC), A; XOR A; LD A, (BC)
        "0100C23E6602AF0A",
        &ExpectedState {
            a: Some(0x66),
            f: Some(0x80),
            memory: hash_map! { 0xC200: 0x66 },
            ..ExpectedState::empty()
        },
    );

    run_test(
        // LD DE, 0xC201; LD A, 0x67; LD (DE), A; XOR A; LD A, (DE)
        "1101C23E6712AF1A",
        &ExpectedState {
            a: Some(0x67),
            f: Some(0x80),
            memory: hash_map! { 0xC201: 0x67 },
            ..ExpectedState::empty()
        },
    );
}

#[test]
fn ld_accumulator_direct() {
    run_test(
        // LD A, 0x77; LD (0xC300), A; XOR A; LD A, (0xC300)
        "3E77EA00C3AFFA00C3",
        &ExpectedState {
            a: Some(0x77),
            f: Some(0x80),
            memory: hash_map! { 0xC300: 0x77 },
            ..ExpectedState::empty()
        },
    );
}

#[test]
fn ldh_direct() {
    run_test(
        // LD A, 0x88; LDH (0x5A), A; XOR A; LDH A, (0x5A)
        "3E88E05AAFF05A",
        &ExpectedState {
            a: Some(0x88),
            f: Some(0x80),
            memory: hash_map! { 0xFF5A: 0x88 },
            ..ExpectedState::empty()
        },
    );
}

#[test]
fn ldh_indirect_c() {
    run_test(
        // LD C, 0x5B; LD A, 0x99; LD (0xFF00+C), A; XOR A; LD A, (0xFF00+C)
        "0E5B3E99E2AFF2",
        &ExpectedState {
            a: Some(0x99),
            f: Some(0x80),
            memory: hash_map! { 0xFF5B: 0x99 },
            ..ExpectedState::empty()
        },
    );
}

#[test]
fn ld_indirect_hl_inc_dec() {
    run_test(
        // LD HL, 0xCDA4; LD A, 0x42; LD (HL+), A
        "21A4CD3E4222",
        &ExpectedState {
            h: Some(0xCD),
            l: Some(0xA5),
            memory: hash_map! { 0xCDA4: 0x42 },
            ..ExpectedState::empty()
        },
    );

    run_test(
        // LD HL, 0xCDA4; LD A, 0x42; LD (HL-), A
        "21A4CD3E4232",
        &ExpectedState {
            h: Some(0xCD),
            l: Some(0xA3),
            memory: hash_map! { 0xCDA4: 0x42 },
            ..ExpectedState::empty()
        },
    );

    run_test(
        // LD HL, 0xCDA4; LD (HL), 0x42; LD A, (HL+)
        "21A4CD36422A",
        &ExpectedState {
            a: Some(0x42),
            h: Some(0xCD),
            l: Some(0xA5),
            ..ExpectedState::empty()
        },
    );

    run_test(
        // LD HL, 0xCDA4; LD (HL), 0x42; LD A, (HL-)
        "21A4CD36423A",
        &ExpectedState {
            a: Some(0x42),
            h: Some(0xCD),
            l: Some(0xA3),
            ..ExpectedState::empty()
        },
    );
}

#[test]
fn ld_register_pair_immediate() {
    run_test(
        // LD BC, 0x1234
        "013412",
        &ExpectedState { b: Some(0x12), c: Some(0x34), ..ExpectedState::empty() },
    );

    run_test(
        // LD DE, 0x5678
        "117856",
        &ExpectedState { d: Some(0x56), e: Some(0x78), ..ExpectedState::empty() },
    );

    run_test(
        // LD HL, 0x9ABC
        "21BC9A",
        &ExpectedState { h: Some(0x9A), l: Some(0xBC), ..ExpectedState::empty() },
    );

    run_test(
        // LD SP, 0xCDAB
        "31ABCD",
        &ExpectedState { sp: Some(0xCDAB), ..ExpectedState::empty() },
    );
}

#[test]
fn ld_sp_hl() {
    run_test(
        // LD HL, 0xC578; LD SP, HL
        "2178C5F9",
        &ExpectedState { sp: Some(0xC578), h: Some(0xC5), l: Some(0x78), ..ExpectedState::empty() },
    );
}

#[test]
fn push_then_pop_other_pair() {
    // PUSH BC writes the high byte at SP-1 and the low byte at SP-2; POP DE
    // reads them back in the same order
    run_test(
        // LD BC, 0x1234; PUSH BC; POP DE
        "013412C5D1",
        &ExpectedState {
            d: Some(0x12),
            e: Some(0x34),
            sp: Some(0xFFFE),
            memory: hash_map! { 0xFFFD: 0x12, 0xFFFC: 0x34 },
            ..ExpectedState::empty()
        },
    );
}

#[test]
fn push_pop_round_trips() {
    run_test(
        // LD BC, 0xBEEF; PUSH BC; LD BC, 0x0000; POP BC
        "01EFBEC5010000C1",
        &ExpectedState { b: Some(0xBE), c: Some(0xEF), sp: Some(0xFFFE), ..ExpectedState::empty() },
    );

    run_test(
        // LD DE, 0xBEEF; PUSH DE; LD DE, 0x0000; POP DE
        "11EFBED5110000D1",
        &ExpectedState { d: Some(0xBE), e: Some(0xEF), sp: Some(0xFFFE), ..ExpectedState::empty() },
    );

    run_test(
        // LD HL, 0xBEEF; PUSH HL; LD HL, 0x0000; POP HL
        "21EFBEE5210000E1",
        &ExpectedState { h: Some(0xBE), l: Some(0xEF), sp: Some(0xFFFE), ..ExpectedState::empty() },
    );
}

#[test]
fn pop_af_masks_flag_low_nibble() {
    run_test(
        // LD BC, 0x12FF; PUSH BC; POP AF
        "01FF12C5F1",
        &ExpectedState { a: Some(0x12), f: Some(0xF0), sp: Some(0xFFFE), ..ExpectedState::empty() },
    );

    run_test(
        // LD BC, 0x12FF; PUSH BC; POP AF; PUSH AF; POP DE
        "01FF12C5F1F5D1",
        &ExpectedState {
            d: Some(0x12),
            e: Some(0xF0),
            sp: Some(0xFFFE),
            ..ExpectedState::empty()
        },
    );
}

#[test]
fn ld_direct_stack_pointer() {
    // Low byte first, then high byte; reading the two bytes back as a
    // little-endian word equals SP
    run_test(
        // LD SP, 0xFFF8; LD (0xC100), SP
        "31F8FF0800C1",
        &ExpectedState {
            sp: Some(0xFFF8),
            memory: hash_map! { 0xC100: 0xF8, 0xC101: 0xFF },
            ..ExpectedState::empty()
        },
    );
}

#[test]
fn ld_hl_sp_offset() {
    run_test(
        // LD SP, 0xFFF8; LDHL SP, 0x02
        "31F8FFF802",
        &ExpectedState {
            h: Some(0xFF),
            l: Some(0xFA),
            sp: Some(0xFFF8),
            f: Some(0x00),
            ..ExpectedState::empty()
        },
    );

    // Z stays clear even when the result is zero
    run_test(
        // LD SP, 0x0001; LDHL SP, -1
        "310100F8FF",
        &ExpectedState {
            h: Some(0x00),
            l: Some(0x00),
            sp: Some(0x0001),
            f: Some(0x30),
            ..ExpectedState::empty()
        },
    );
}
