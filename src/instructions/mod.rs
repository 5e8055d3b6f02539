//! # 6502 Instruction Implementations
//!
//! This module contains the implementations of all 6502 instructions, organized by category.
//! Each instruction is implemented as a standalone function that takes a mutable reference
//! to the CPU and the decoded addressing mode. The opcode byte has already been
//! consumed; handlers consume their own operand bytes.
//!
//! ## Categories
//!
//! - **alu**: Arithmetic and logic operations (ADC, SBC, AND, ORA, EOR, CMP, CPX, CPY, BIT)
//! - **branches**: Conditional branch instructions (BCC, BCS, BEQ, BNE, BMI, BPL, BVC, BVS)
//! - **shifts**: Shift and rotate operations (ASL, LSR, ROL, ROR)
//! - **load_store**: Load and store instructions (LDA, LDX, LDY, STA, STX, STY)
//! - **inc_dec**: Increment and decrement operations (INC, DEC, INX, INY, DEX, DEY)
//! - **control**: Control flow instructions (JMP, JSR, RTS, RTI, BRK, NOP) and the output pseudo-op
//! - **stack**: Stack operations (PHA, PHP, PLA, PLP)
//! - **flags**: Status flag manipulation (CLC, SEC, CLI, SEI, CLD, SED, CLV)
//! - **transfer**: Register transfer operations (TAX, TAY, TXA, TYA, TSX, TXS)

pub mod alu;
pub mod branches;
pub mod control;
pub mod flags;
pub mod inc_dec;
pub mod load_store;
pub mod shifts;
pub mod stack;
pub mod transfer;

use crate::opcodes::{Mnemonic, OpcodeMetadata};
use crate::{ExecutionError, MemoryBus, CPU};

/// Runs the handler for a decoded opcode.
pub(crate) fn execute<M: MemoryBus>(
    cpu: &mut CPU<M>,
    metadata: OpcodeMetadata,
) -> Result<(), ExecutionError> {
    use Mnemonic::*;

    let mode = metadata.addressing_mode;
    match metadata.mnemonic {
        Adc => alu::execute_adc(cpu, mode),
        And => alu::execute_and(cpu, mode),
        Asl => shifts::execute_asl(cpu, mode),
        Bit => alu::execute_bit(cpu, mode),
        Bpl => branches::execute_bpl(cpu, mode),
        Bmi => branches::execute_bmi(cpu, mode),
        Bvc => branches::execute_bvc(cpu, mode),
        Bvs => branches::execute_bvs(cpu, mode),
        Bcc => branches::execute_bcc(cpu, mode),
        Bcs => branches::execute_bcs(cpu, mode),
        Bne => branches::execute_bne(cpu, mode),
        Beq => branches::execute_beq(cpu, mode),
        Brk => control::execute_brk(cpu, mode),
        Cmp => alu::execute_cmp(cpu, mode),
        Cpx => alu::execute_cpx(cpu, mode),
        Cpy => alu::execute_cpy(cpu, mode),
        Dec => inc_dec::execute_dec(cpu, mode),
        Eor => alu::execute_eor(cpu, mode),
        Clc => flags::execute_clc(cpu, mode),
        Sec => flags::execute_sec(cpu, mode),
        Cli => flags::execute_cli(cpu, mode),
        Sei => flags::execute_sei(cpu, mode),
        Clv => flags::execute_clv(cpu, mode),
        Cld => flags::execute_cld(cpu, mode),
        Sed => flags::execute_sed(cpu, mode),
        Inc => inc_dec::execute_inc(cpu, mode),
        Jmp => control::execute_jmp(cpu, mode),
        Jsr => control::execute_jsr(cpu, mode),
        Lda => load_store::execute_lda(cpu, mode),
        Ldx => load_store::execute_ldx(cpu, mode),
        Ldy => load_store::execute_ldy(cpu, mode),
        Lsr => shifts::execute_lsr(cpu, mode),
        Nop => control::execute_nop(cpu, mode),
        Ora => alu::execute_ora(cpu, mode),
        Tax => transfer::execute_tax(cpu, mode),
        Txa => transfer::execute_txa(cpu, mode),
        Dex => inc_dec::execute_dex(cpu, mode),
        Inx => inc_dec::execute_inx(cpu, mode),
        Tay => transfer::execute_tay(cpu, mode),
        Tya => transfer::execute_tya(cpu, mode),
        Dey => inc_dec::execute_dey(cpu, mode),
        Iny => inc_dec::execute_iny(cpu, mode),
        Ror => shifts::execute_ror(cpu, mode),
        Rol => shifts::execute_rol(cpu, mode),
        Rti => control::execute_rti(cpu, mode),
        Rts => control::execute_rts(cpu, mode),
        Sbc => alu::execute_sbc(cpu, mode),
        Sta => load_store::execute_sta(cpu, mode),
        Txs => transfer::execute_txs(cpu, mode),
        Tsx => transfer::execute_tsx(cpu, mode),
        Pha => stack::execute_pha(cpu, mode),
        Pla => stack::execute_pla(cpu, mode),
        Php => stack::execute_php(cpu, mode),
        Plp => stack::execute_plp(cpu, mode),
        Stx => load_store::execute_stx(cpu, mode),
        Sty => load_store::execute_sty(cpu, mode),
    }
}
