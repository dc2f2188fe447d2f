use crate::common::harness::TestContext;
use pretty_assertions::assert_eq;

#[test]
fn store_writes_memory_at_commit_not_before() {
    let mut ctx = TestContext::new()
        .load_asm("SW R1 0(R2)\nEOP\n")
        .with_int_reg(1, 0xDEAD_BEEF)
        .with_int_reg(2, 8);

    // Issue 0, execute 1, memory unit latency 5 -> write-result 6, commit 7.
    ctx.run(7);
    assert_eq!(&ctx.engine.memory()[8..12], &[0xFF, 0xFF, 0xFF, 0xFF]);
    assert_eq!(ctx.event_for(0).write_result, Some(6));

    ctx.run(1);
    assert_eq!(ctx.event_for(0).commit, Some(7));
    // Little-endian word at base + offset.
    assert_eq!(&ctx.engine.memory()[8..12], &[0xEF, 0xBE, 0xAD, 0xDE]);
}

#[test]
fn store_has_no_register_effect() {
    let mut ctx = TestContext::new()
        .load_asm("SWS F1 4(R2)\nEOP\n")
        .with_fp_reg(1, 1.0)
        .with_int_reg(2, 0);
    ctx.run_to_completion();

    // Only the seeded registers are defined afterwards.
    assert_eq!(ctx.engine.fp_register(1), 1.0);
    assert_eq!(ctx.engine.int_register(2), 0);
    for reg in [0usize, 3, 4, 5] {
        assert_eq!(ctx.engine.int_register(reg), 0xFFFF_FFFF);
        assert_eq!(ctx.engine.fp_register_bits(reg), 0xFFFF_FFFF);
    }
    assert_eq!(&ctx.engine.memory()[4..8], &1.0f32.to_bits().to_le_bytes());
}

#[test]
fn store_data_comes_from_the_architected_file_at_commit() {
    // The ADDS producing F4 commits before the store (in-order commit), so
    // the store picks up the computed value even though it never captured
    // F4 as an operand.
    let mut ctx = TestContext::new()
        .load_asm(
            "ADDS F4 F0 F1\n\
             SWS F4 0(R1)\n\
             EOP\n",
        )
        .with_fp_reg(0, 1.25)
        .with_fp_reg(1, 0.5)
        .with_int_reg(1, 16);
    ctx.run_to_completion();

    assert_eq!(
        &ctx.engine.memory()[16..20],
        &1.75f32.to_bits().to_le_bytes()
    );
}

#[test]
fn load_store_roundtrip_through_memory() {
    let mut ctx = TestContext::new()
        .load_asm(
            "LWS F2 0(R1)\n\
             MULTS F4 F2 F0\n\
             SWS F4 0(R1)\n\
             EOP\n",
        )
        .with_fp_reg(0, 3.0)
        .with_int_reg(1, 32)
        .with_memory_word(32, 2.0f32.to_bits());
    ctx.run_to_completion();

    assert_eq!(ctx.engine.fp_register(2), 2.0);
    assert_eq!(ctx.engine.fp_register(4), 6.0);
    assert_eq!(
        &ctx.engine.memory()[32..36],
        &6.0f32.to_bits().to_le_bytes()
    );
}
