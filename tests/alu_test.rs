//! Tests for the arithmetic and logic instructions.
//!
//! ADC and SBC are covered in both binary and decimal mode, followed by the
//! compare instructions, BIT and the three bitwise operations.

use emu6502::{FlatMemory, MemoryBus, CPU};

fn setup_cpu() -> CPU<FlatMemory> {
    let mut memory = FlatMemory::new();
    memory.write(0xFFFC, 0x00);
    memory.write(0xFFFD, 0x80);
    CPU::new(memory)
}

/// Places `program` at 0x8000 and executes its first instruction.
fn run_one(cpu: &mut CPU<FlatMemory>, program: &[u8]) {
    cpu.memory_mut().load(0x8000, program);
    cpu.set_pc(0x8000);
    assert_eq!(cpu.step(1), 1);
}

// ========== ADC (binary) ==========

#[test]
fn test_adc_immediate_basic() {
    let mut cpu = setup_cpu();
    cpu.set_a(0x10);

    run_one(&mut cpu, &[0x69, 0x22]); // ADC #$22

    assert_eq!(cpu.a(), 0x32);
    assert!(!cpu.flag_c());
    assert!(!cpu.flag_z());
    assert!(!cpu.flag_n());
    assert!(!cpu.flag_v());
    assert_eq!(cpu.pc(), 0x8002);
    assert_eq!(cpu.cycles(), 2);
}

#[test]
fn test_adc_adds_carry_in() {
    let mut cpu = setup_cpu();
    cpu.set_a(0x10);
    cpu.set_flag_c(true);

    run_one(&mut cpu, &[0x69, 0x01]);

    assert_eq!(cpu.a(), 0x12);
    assert!(!cpu.flag_c());
}

#[test]
fn test_adc_carry_out_and_zero() {
    let mut cpu = setup_cpu();
    cpu.set_a(0xFF);

    run_one(&mut cpu, &[0x69, 0x01]);

    assert_eq!(cpu.a(), 0x00);
    assert!(cpu.flag_c());
    assert!(cpu.flag_z());
    assert!(!cpu.flag_v());
}

#[test]
fn test_adc_signed_overflow_positive() {
    let mut cpu = setup_cpu();
    cpu.set_a(0x50);

    run_one(&mut cpu, &[0x69, 0x50]);

    assert_eq!(cpu.a(), 0xA0);
    assert!(cpu.flag_v());
    assert!(cpu.flag_n());
    assert!(!cpu.flag_c());
}

#[test]
fn test_adc_signed_overflow_negative() {
    let mut cpu = setup_cpu();
    cpu.set_a(0x90);

    run_one(&mut cpu, &[0x69, 0x90]);

    assert_eq!(cpu.a(), 0x20);
    assert!(cpu.flag_v());
    assert!(cpu.flag_c());
    assert!(!cpu.flag_n());
}

#[test]
fn test_adc_zero_page_operand() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().write(0x0042, 0x05);
    cpu.set_a(0x03);

    run_one(&mut cpu, &[0x65, 0x42]); // ADC $42

    assert_eq!(cpu.a(), 0x08);
    assert_eq!(cpu.cycles(), 3);
}

// ========== ADC (decimal) ==========

#[test]
fn test_adc_decimal_simple() {
    let mut cpu = setup_cpu();
    cpu.set_flag_d(true);
    cpu.set_a(0x15);

    run_one(&mut cpu, &[0x69, 0x27]);

    assert_eq!(cpu.a(), 0x42);
    assert!(!cpu.flag_c());
}

#[test]
fn test_adc_decimal_low_digit_adjust() {
    let mut cpu = setup_cpu();
    cpu.set_flag_d(true);
    cpu.set_a(0x79);

    run_one(&mut cpu, &[0x69, 0x01]);

    // 79 + 01 = 80; the result stays below 99 so no decimal carry
    assert_eq!(cpu.a(), 0x80);
    assert!(!cpu.flag_c());
    assert!(cpu.flag_n());
    assert!(cpu.flag_v());
    assert!(!cpu.flag_z());
}

#[test]
fn test_adc_decimal_wraps_to_zero_with_carry() {
    let mut cpu = setup_cpu();
    cpu.set_flag_d(true);
    cpu.set_a(0x99);

    run_one(&mut cpu, &[0x69, 0x01]);

    assert_eq!(cpu.a(), 0x00);
    assert!(cpu.flag_c());
    // Z comes from the binary sum (0x9A)
    assert!(!cpu.flag_z());
}

#[test]
fn test_adc_decimal_with_carry_in() {
    let mut cpu = setup_cpu();
    cpu.set_flag_d(true);
    cpu.set_flag_c(true);
    cpu.set_a(0x58);

    run_one(&mut cpu, &[0x69, 0x46]);

    // 58 + 46 + 1 = 105
    assert_eq!(cpu.a(), 0x05);
    assert!(cpu.flag_c());
}

// ========== SBC ==========

#[test]
fn test_sbc_binary_no_borrow() {
    let mut cpu = setup_cpu();
    cpu.set_flag_c(true);
    cpu.set_a(0x50);

    run_one(&mut cpu, &[0xE9, 0x20]); // SBC #$20

    assert_eq!(cpu.a(), 0x30);
    assert!(cpu.flag_c());
    assert!(!cpu.flag_v());
    assert!(!cpu.flag_n());
}

#[test]
fn test_sbc_binary_borrow_in() {
    let mut cpu = setup_cpu();
    cpu.set_flag_c(false);
    cpu.set_a(0x50);

    run_one(&mut cpu, &[0xE9, 0x20]);

    assert_eq!(cpu.a(), 0x2F);
    assert!(cpu.flag_c());
}

#[test]
fn test_sbc_binary_borrow_out() {
    let mut cpu = setup_cpu();
    cpu.set_flag_c(true);
    cpu.set_a(0x00);

    run_one(&mut cpu, &[0xE9, 0x01]);

    assert_eq!(cpu.a(), 0xFF);
    assert!(!cpu.flag_c());
    assert!(cpu.flag_n());
}

#[test]
fn test_sbc_binary_overflow() {
    let mut cpu = setup_cpu();
    cpu.set_flag_c(true);
    cpu.set_a(0x50);

    run_one(&mut cpu, &[0xE9, 0xB0]);

    // +80 - (-80) does not fit in a signed byte
    assert_eq!(cpu.a(), 0xA0);
    assert!(cpu.flag_v());
    assert!(!cpu.flag_c());
}

#[test]
fn test_sbc_equal_operands_zero() {
    let mut cpu = setup_cpu();
    cpu.set_flag_c(true);
    cpu.set_a(0x42);

    run_one(&mut cpu, &[0xE9, 0x42]);

    assert_eq!(cpu.a(), 0x00);
    assert!(cpu.flag_z());
    assert!(cpu.flag_c());
}

#[test]
fn test_sbc_decimal() {
    let mut cpu = setup_cpu();
    cpu.set_flag_d(true);
    cpu.set_flag_c(true);
    cpu.set_a(0x42);

    run_one(&mut cpu, &[0xE9, 0x13]);

    assert_eq!(cpu.a(), 0x29);
    assert!(cpu.flag_c());
}

#[test]
fn test_sbc_decimal_borrow_out() {
    let mut cpu = setup_cpu();
    cpu.set_flag_d(true);
    cpu.set_flag_c(true);
    cpu.set_a(0x00);

    run_one(&mut cpu, &[0xE9, 0x01]);

    // 00 - 01 = 99 with a borrow
    assert_eq!(cpu.a(), 0x99);
    assert!(!cpu.flag_c());
}

// ========== Compare ==========

#[test]
fn test_cmp_greater() {
    let mut cpu = setup_cpu();
    cpu.set_a(0x50);

    run_one(&mut cpu, &[0xC9, 0x30]); // CMP #$30

    assert!(cpu.flag_c());
    assert!(!cpu.flag_z());
    assert!(!cpu.flag_n());
    assert_eq!(cpu.a(), 0x50);
}

#[test]
fn test_cmp_equal() {
    let mut cpu = setup_cpu();
    cpu.set_a(0x42);

    run_one(&mut cpu, &[0xC9, 0x42]);

    assert!(cpu.flag_c());
    assert!(cpu.flag_z());
}

#[test]
fn test_cmp_less_sets_negative() {
    let mut cpu = setup_cpu();
    cpu.set_a(0x10);

    run_one(&mut cpu, &[0xC9, 0x20]);

    assert!(!cpu.flag_c());
    assert!(!cpu.flag_z());
    assert!(cpu.flag_n()); // 0x10 - 0x20 = 0xF0
}

#[test]
fn test_cpx_and_cpy() {
    let mut cpu = setup_cpu();
    cpu.set_x(0x05);
    run_one(&mut cpu, &[0xE0, 0x05]); // CPX #$05
    assert!(cpu.flag_z());
    assert!(cpu.flag_c());

    cpu.set_y(0x01);
    run_one(&mut cpu, &[0xC0, 0x02]); // CPY #$02
    assert!(!cpu.flag_z());
    assert!(!cpu.flag_c());
    assert!(cpu.flag_n());
}

// ========== BIT ==========

#[test]
fn test_bit_copies_operand_high_bits() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().write(0x0010, 0xC0);
    cpu.set_a(0x01);

    run_one(&mut cpu, &[0x24, 0x10]); // BIT $10

    assert!(cpu.flag_n());
    assert!(cpu.flag_v());
    assert!(cpu.flag_z()); // 0x01 & 0xC0 == 0
    assert_eq!(cpu.a(), 0x01);
}

#[test]
fn test_bit_nonzero_mask() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().write(0x1234, 0x0F);
    cpu.set_a(0x03);
    cpu.set_flag_n(true);
    cpu.set_flag_v(true);

    run_one(&mut cpu, &[0x2C, 0x34, 0x12]); // BIT $1234

    assert!(!cpu.flag_n());
    assert!(!cpu.flag_v());
    assert!(!cpu.flag_z());
}

// ========== Logic ==========

#[test]
fn test_and_ora_eor() {
    let mut cpu = setup_cpu();

    cpu.set_a(0xF0);
    run_one(&mut cpu, &[0x29, 0x0F]); // AND #$0F
    assert_eq!(cpu.a(), 0x00);
    assert!(cpu.flag_z());

    cpu.set_a(0x80);
    run_one(&mut cpu, &[0x09, 0x01]); // ORA #$01
    assert_eq!(cpu.a(), 0x81);
    assert!(cpu.flag_n());
    assert!(!cpu.flag_z());

    cpu.set_a(0xFF);
    run_one(&mut cpu, &[0x49, 0xAA]); // EOR #$AA
    assert_eq!(cpu.a(), 0x55);
    assert!(!cpu.flag_n());
}

#[test]
fn test_logic_indexed_indirect() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().write(0x0024, 0x00);
    cpu.memory_mut().write(0x0025, 0x30);
    cpu.memory_mut().write(0x3000, 0x3C);
    cpu.set_x(0x04);
    cpu.set_a(0x0F);

    run_one(&mut cpu, &[0x21, 0x20]); // AND ($20,X)

    assert_eq!(cpu.a(), 0x0C);
    assert_eq!(cpu.cycles(), 6);
}
