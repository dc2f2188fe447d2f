use crate::common::harness::TestContext;
use proptest::prelude::*;
use tomasim_core::isa::{Instruction, Opcode};

const REGS: usize = 8;

/// Straightforward sequential interpretation of a branch-free ALU program.
fn run_sequential(program: &[Instruction], regs: &mut [u32; REGS]) {
    for instr in program {
        let (Some(dest), Some(s1)) = (instr.dest, instr.src1) else {
            continue;
        };
        let v1 = regs[s1];
        let v2 = instr.src2.map_or(instr.imm, |s2| regs[s2]);
        regs[dest] = match instr.opcode {
            Opcode::Add | Opcode::Addi => v1.wrapping_add(v2),
            Opcode::Sub | Opcode::Subi => v1.wrapping_sub(v2),
            Opcode::Xor => v1 ^ v2,
            Opcode::And => v1 & v2,
            Opcode::Mult => v1.wrapping_mul(v2),
            _ => unreachable!("branch-free ALU programs only"),
        };
    }
}

fn arb_instr() -> impl Strategy<Value = Instruction> {
    (
        0..6usize,
        0..REGS,
        0..REGS,
        0..REGS,
        0u32..1_000_000,
    )
        .prop_map(|(op, dest, s1, s2, imm)| match op {
            0 => Instruction::new(Opcode::Add, Some(s1), Some(s2), Some(dest), 0),
            1 => Instruction::new(Opcode::Sub, Some(s1), Some(s2), Some(dest), 0),
            2 => Instruction::new(Opcode::Xor, Some(s1), Some(s2), Some(dest), 0),
            3 => Instruction::new(Opcode::And, Some(s1), Some(s2), Some(dest), 0),
            4 => Instruction::new(Opcode::Mult, Some(s1), Some(s2), Some(dest), 0),
            _ => Instruction::new(Opcode::Addi, Some(s1), None, Some(dest), imm),
        })
}

proptest! {
    /// Any branch-free program retires with the same architected registers
    /// as a sequential interpretation of the same stream.
    #[test]
    fn branch_free_matches_sequential(
        body in prop::collection::vec(arb_instr(), 1..12),
        init in prop::array::uniform8(0u32..1_000_000),
    ) {
        let mut expected = init;
        run_sequential(&body, &mut expected);

        let mut ctx = TestContext::new();
        for (reg, &value) in init.iter().enumerate() {
            ctx.engine.set_int_register(reg, value);
        }
        let mut program = body;
        program.push(Instruction::new(Opcode::Eop, None, None, None, 0));
        ctx.engine.load_program(program, 0);
        ctx.engine.run_to_completion().unwrap();

        for (reg, &value) in expected.iter().enumerate() {
            prop_assert_eq!(ctx.engine.int_register(reg), value);
        }
    }

    /// Every retired instruction's stamps are strictly ordered:
    /// issue < execute < write-result < commit.
    #[test]
    fn event_stamps_are_strictly_ordered(
        body in prop::collection::vec(arb_instr(), 1..10),
        init in prop::array::uniform8(0u32..1_000),
    ) {
        let mut ctx = TestContext::new();
        for (reg, &value) in init.iter().enumerate() {
            ctx.engine.set_int_register(reg, value);
        }
        let mut program = body;
        program.push(Instruction::new(Opcode::Eop, None, None, None, 0));
        ctx.engine.load_program(program, 0);
        ctx.engine.run_to_completion().unwrap();

        for event in ctx.engine.events() {
            let execute = event.execute.unwrap();
            let write_result = event.write_result.unwrap();
            let commit = event.commit.unwrap();
            prop_assert!(event.issue < execute);
            prop_assert!(execute < write_result);
            prop_assert!(write_result < commit);
        }
    }
}
