use super::{hash_map, run_test, ExpectedState};

#[test]
fn jump_absolute() {
    run_test(
        // JP 0x0156; LD A, 0x11 (skipped); NOP; LD A, 0x22
        "C356013E11003E22",
        &ExpectedState { a: Some(0x22), ..ExpectedState::empty() },
    );
}

#[test]
fn jump_hl() {
    run_test(
        // LD HL, 0x0156; JP HL; LD A, 0x11 (skipped); LD A, 0x22
        "215601E93E113E22",
        &ExpectedState { a: Some(0x22), ..ExpectedState::empty() },
    );
}

#[test]
fn jump_cond_not_taken() {
    run_test(
        // XOR A; JP NZ, 0x0158 (not taken); LD A, 0x33
        "AFC258013E33",
        &ExpectedState { a: Some(0x33), ..ExpectedState::empty() },
    );
}

#[test]
fn jump_cond_taken() {
    run_test(
        // SCF; JP C, 0x0158 (taken); LD A, 0x33 (skipped); NOP; NOP
        "37DA58013E330000",
        &ExpectedState { a: Some(0x00), f: Some(0x10), ..ExpectedState::empty() },
    );
}

#[test]
fn relative_jump_forward() {
    run_test(
        // JR +2; LD A, 0x44 (skipped); LD A, 0x55
        "18023E443E55",
        &ExpectedState { a: Some(0x55), ..ExpectedState::empty() },
    );
}

#[test]
fn relative_jump_backward() {
    // JR +4 to 0x0156, JR -6 back to 0x0152, LD A, 0x88, JR +2 off the end
    run_test(
        "18043E88180218FA",
        &ExpectedState { a: Some(0x88), ..ExpectedState::empty() },
    );
}

#[test]
fn relative_jump_cond_loop() {
    // LD A, 0x02; then DEC A; JR NZ, -3 until A reaches zero
    run_test(
        "3E023D20FD",
        &ExpectedState { a: Some(0x00), f: Some(0xC0), ..ExpectedState::empty() },
    );
}

#[test]
fn call_and_return() {
    // CALL 0x0158; LD A, 0x99; JP 0x015B; subroutine: LD B, 0x42; RET
    run_test(
        "CD58013E99C35B010642C9",
        &ExpectedState {
            a: Some(0x99),
            b: Some(0x42),
            sp: Some(0xFFFE),
            // Return address 0x0153 was pushed high byte first
            memory: hash_map! { 0xFFFD: 0x01, 0xFFFC: 0x53 },
            ..ExpectedState::empty()
        },
    );
}

#[test]
fn call_cond_not_taken() {
    run_test(
        // XOR A; CALL NZ, 0x0158 (not taken); LD A, 0x55
        "AFC458013E55",
        &ExpectedState { a: Some(0x55), sp: Some(0xFFFE), ..ExpectedState::empty() },
    );
}

#[test]
fn return_cond() {
    // Main at 0x0157: SCF; CALL 0x0153 (RET C taken, B untouched); AND A;
    // CALL 0x0153 (RET C not taken, subroutine sets B); RET off the end.
    // Subroutine at 0x0153: RET C; LD B, 0x04; RET
    run_test(
        "C35701D80604C937CD5301A7CD5301",
        &ExpectedState {
            a: Some(0x00),
            b: Some(0x04),
            f: Some(0xA0),
            sp: Some(0xFFFE),
            ..ExpectedState::empty()
        },
    );
}
