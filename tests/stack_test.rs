//! Stack instructions and register transfers.

use emu6502::{FlatMemory, MemoryBus, CPU};

fn setup_cpu() -> CPU<FlatMemory> {
    let mut memory = FlatMemory::new();
    memory.write(0xFFFC, 0x00);
    memory.write(0xFFFD, 0x80);
    CPU::new(memory)
}

// ========== PHA / PLA ==========

#[test]
fn test_pha_pla_round_trip() {
    let mut cpu = setup_cpu();
    cpu.memory_mut()
        .load(0x8000, &[0x48, 0xA9, 0x00, 0x68]); // PHA; LDA #0; PLA
    cpu.set_a(0x99);

    cpu.step(1);
    assert_eq!(cpu.sp(), 0xFC);
    assert_eq!(cpu.memory_mut().read(0x01FD), 0x99);

    cpu.step(2);
    assert_eq!(cpu.a(), 0x99);
    assert_eq!(cpu.sp(), 0xFD);
    assert!(cpu.flag_n());
    assert!(!cpu.flag_z());
    assert_eq!(cpu.cycles(), 3 + 2 + 4);
}

#[test]
fn test_stack_pointer_wraps() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().load(0x8000, &[0x48, 0x68]); // PHA; PLA
    cpu.set_sp(0x00);
    cpu.set_a(0x12);

    cpu.step(1);
    assert_eq!(cpu.sp(), 0xFF);
    assert_eq!(cpu.memory_mut().read(0x0100), 0x12);

    cpu.step(1);
    assert_eq!(cpu.sp(), 0x00);
    assert_eq!(cpu.a(), 0x12);
}

// ========== PHP / PLP ==========

#[test]
fn test_php_sets_break_and_constant() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().write(0x8000, 0x08);
    cpu.set_flag_c(true);
    cpu.set_flag_d(true);

    cpu.step(1);

    assert_eq!(cpu.memory_mut().read(0x01FD), 0x39);
    // The live B flag is untouched
    assert!(!cpu.flag_b());
}

#[test]
fn test_plp_forces_constant_bit() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().write(0x8000, 0x28);
    cpu.set_sp(0xFC);
    cpu.memory_mut().write(0x01FD, 0xCB);

    cpu.step(1);

    assert_eq!(cpu.status(), 0xEB);
    assert!(cpu.flag_n());
    assert!(cpu.flag_v());
    assert!(cpu.flag_d());
    assert!(cpu.flag_z());
    assert!(cpu.flag_c());
    assert!(!cpu.flag_i());
}

#[test]
fn test_php_plp_round_trip() {
    let mut cpu = setup_cpu();
    cpu.memory_mut()
        .load(0x8000, &[0x08, 0x18, 0xB8, 0x28]); // PHP; CLC; CLV; PLP
    cpu.set_flag_c(true);
    cpu.set_flag_v(true);

    cpu.step(4);

    assert!(cpu.flag_c());
    assert!(cpu.flag_v());
    assert_eq!(cpu.sp(), 0xFD);
}

// ========== Transfers ==========

#[test]
fn test_transfers_set_nz() {
    let mut cpu = setup_cpu();
    cpu.memory_mut()
        .load(0x8000, &[0xAA, 0xA8, 0xA9, 0x00, 0x8A, 0x98]); // TAX TAY LDA#0 TXA TYA
    cpu.set_a(0x80);

    cpu.step(2);
    assert_eq!(cpu.x(), 0x80);
    assert_eq!(cpu.y(), 0x80);
    assert!(cpu.flag_n());

    cpu.step(1);
    assert!(cpu.flag_z());

    cpu.step(1);
    assert_eq!(cpu.a(), 0x80);
    assert!(!cpu.flag_z());
    assert!(cpu.flag_n());

    cpu.step(1);
    assert_eq!(cpu.a(), 0x80);
}

#[test]
fn test_tsx_sets_flags_txs_does_not() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().load(0x8000, &[0xBA, 0xA2, 0x00, 0x9A]); // TSX; LDX #0; TXS

    cpu.step(1);
    assert_eq!(cpu.x(), 0xFD);
    assert!(cpu.flag_n());

    cpu.step(1);
    assert!(cpu.flag_z());

    cpu.step(1);
    assert_eq!(cpu.sp(), 0x00);
    // TXS leaves Z as LDX set it
    assert!(cpu.flag_z());
}

// ========== Flag instructions ==========

#[test]
fn test_set_and_clear_flags() {
    let mut cpu = setup_cpu();
    cpu.memory_mut()
        .load(0x8000, &[0x38, 0xF8, 0x78, 0x18, 0xD8, 0x58, 0xB8]);
    cpu.set_flag_v(true);

    cpu.step(3); // SEC SED SEI
    assert!(cpu.flag_c());
    assert!(cpu.flag_d());
    assert!(cpu.flag_i());

    cpu.step(4); // CLC CLD CLI CLV
    assert!(!cpu.flag_c());
    assert!(!cpu.flag_d());
    assert!(!cpu.flag_i());
    assert!(!cpu.flag_v());
    assert_eq!(cpu.status(), 0x20);
    assert_eq!(cpu.cycles(), 14);
}
