use crate::common::harness::{TestContext, config, default_units};
use pretty_assertions::assert_eq;

fn taken_branch_ctx() -> TestContext {
    TestContext::with_config(config(
        16,
        (4, 3, 2, 2),
        &default_units(1, 4, 8, 16, 5),
        1,
    ))
    .load_asm(
        "BEQZ R1 SKIP\n\
         ADD R2 R3 R4\n\
         ADD R2 R2 R2\n\
         SKIP: ADD R5 R3 R4\n\
         EOP\n",
    )
    .with_int_reg(1, 0)
    .with_int_reg(3, 1)
    .with_int_reg(4, 2)
}

#[test]
fn taken_branch_flushes_and_redirects() {
    let mut ctx = taken_branch_ctx();

    // Cycle 3 commits the branch and detects the misprediction; one more
    // step later every station and unit must already be free and fetch must
    // sit at the resolved target.
    ctx.run(4);
    assert_eq!(ctx.engine.stations_in_use(), 0);
    assert_eq!(ctx.engine.units_in_use(), 0);
    assert_eq!(ctx.engine.rob_len(), 0);
    assert_eq!(ctx.engine.pc(), 12);

    ctx.run_to_completion();

    // Wrong-path work never architected.
    assert_eq!(ctx.engine.int_register(2), 0xFFFF_FFFF);
    assert_eq!(ctx.engine.int_register(5), 3);
    assert_eq!(ctx.engine.stats().branch_flushes, 1);
}

#[test]
fn squashed_instructions_are_logged_in_fetch_order() {
    let mut ctx = taken_branch_ctx();
    ctx.run_to_completion();

    let pcs: Vec<u32> = ctx.engine.events().iter().map(|e| e.pc).collect();
    // The branch, the squashed wrong path (including the speculatively
    // fetched target), then the refetched target.
    assert_eq!(pcs, vec![0, 4, 8, 12, 12]);

    let events = ctx.engine.events();
    // The mispredicted branch commits at flush time.
    assert_eq!(events[0].commit, Some(3));
    // Squashed entries keep their earned stamps and never commit.
    assert_eq!(events[1].issue, 1);
    assert_eq!(events[1].commit, None);
    assert_eq!(events[2].commit, None);
    assert_eq!(events[3].commit, None);
    // The refetched target issues the cycle after the flush.
    assert_eq!(events[4].issue, 4);
    assert!(events[4].commit.is_some());
}

#[test]
fn not_taken_branch_retires_normally() {
    let mut ctx = TestContext::new()
        .load_asm(
            "BNEZ R1 SKIP\n\
             ADD R2 R3 R4\n\
             SKIP: EOP\n",
        )
        .with_int_reg(1, 0)
        .with_int_reg(3, 5)
        .with_int_reg(4, 6);
    ctx.run_to_completion();

    assert_eq!(ctx.engine.stats().branch_flushes, 0);
    assert_eq!(ctx.engine.int_register(2), 11);
    assert!(ctx.engine.events().iter().all(|e| e.commit.is_some()));
}

#[test]
fn jump_always_redirects() {
    let mut ctx = TestContext::new()
        .load_asm(
            "JUMP SKIP\n\
             ADD R2 R3 R4\n\
             SKIP: ADD R5 R3 R4\n\
             EOP\n",
        )
        .with_int_reg(3, 10)
        .with_int_reg(4, 20);
    ctx.run_to_completion();

    assert_eq!(ctx.engine.stats().branch_flushes, 1);
    assert_eq!(ctx.engine.int_register(2), 0xFFFF_FFFF);
    assert_eq!(ctx.engine.int_register(5), 30);
}

#[test]
fn loop_reissues_flushed_pcs() {
    // Three trips through a decrement loop; every taken back-edge is a
    // full flush, and the loop body must be issuable again afterwards.
    let mut ctx = TestContext::new()
        .load_asm(
            "LOOP: ADD R3 R3 R2\n\
             SUBI R1 R1 1\n\
             BNEZ R1 LOOP\n\
             EOP\n",
        )
        .with_int_reg(1, 3)
        .with_int_reg(2, 5)
        .with_int_reg(3, 0);
    ctx.run_to_completion();

    assert_eq!(ctx.engine.int_register(3), 15);
    assert_eq!(ctx.engine.int_register(1), 0);
    assert_eq!(ctx.engine.stats().branch_flushes, 2);

    // Nine retirements: three per loop trip, nothing double-counted.
    let committed: Vec<u32> = ctx
        .engine
        .events()
        .iter()
        .filter(|e| e.commit.is_some())
        .map(|e| e.pc)
        .collect();
    assert_eq!(committed, vec![0, 4, 8, 0, 4, 8, 0, 4, 8]);
}
