//! Interpreter for the ICFP 2006 universal machine instruction set: an
//! abstract, stack-free register machine with eight registers and a
//! dynamically growing collection of word arrays.
//!
//! This crate is the execution engine only. Loading a program image from
//! disk and wiring the machine to real stdio lives in `um-runner`; this
//! crate knows nothing about files or processes, only [`ArraySpace`],
//! [`RegisterFile`] and the [`Machine`] dispatch loop built on top of them.

mod arrays;
mod decode;
mod error;
mod interpreter;
mod registers;

pub use arrays::ArraySpace;
pub use decode::{decode, Instruction};
pub use error::ProgramError;
pub use interpreter::Machine;
pub use registers::RegisterFile;

#[cfg(test)]
mod property_tests {
    use super::*;
    use quickcheck_macros::quickcheck;

    // §8.1: add/mul wrap to 32 bits, matching Rust's wrapping arithmetic.
    #[quickcheck]
    fn addition_wraps_modulo_2_32(b: u32, c: u32) -> bool {
        let expected = b.wrapping_add(c);
        let mut regs = RegisterFile::new();
        regs.set(1, b);
        regs.set(2, c);
        regs.set(0, regs.get(1).wrapping_add(regs.get(2)));
        regs.get(0) == expected
    }

    #[quickcheck]
    fn multiplication_wraps_modulo_2_32(b: u32, c: u32) -> bool {
        let expected = b.wrapping_mul(c);
        let mut regs = RegisterFile::new();
        regs.set(1, b);
        regs.set(2, c);
        regs.set(0, regs.get(1).wrapping_mul(regs.get(2)));
        regs.get(0) == expected
    }

    // §8.2: nand is exactly !(b & c).
    #[quickcheck]
    fn nand_matches_bitwise_law(b: u32, c: u32) -> bool {
        !(b & c) == 0xFFFF_FFFF ^ (b & c)
    }

    // §8.3/§8.4: every identifier returned by allocate is non-zero, live
    // identifiers stay distinct, and a freed identifier can be reused but is
    // then live again.
    #[quickcheck]
    fn allocate_never_returns_zero(sizes: Vec<u8>) -> bool {
        let mut space = ArraySpace::new(vec![0]);
        sizes
            .into_iter()
            .all(|size| space.allocate(u32::from(size)) != 0)
    }

    #[quickcheck]
    fn freed_identifier_is_live_again_after_reallocation(size: u8) -> bool {
        let mut space = ArraySpace::new(vec![0]);
        let id = space.allocate(u32::from(size));
        space.deallocate(id).unwrap();
        let reused = space.allocate(u32::from(size));
        reused == id && space.load(reused, 0).is_ok() == (size > 0)
    }

    // §8.5: load-program deep-copies; later mutation of the source does not
    // retroactively affect array 0.
    #[quickcheck]
    fn clone_into_zero_is_a_deep_copy(values: Vec<u32>, mutation: u32) -> bool {
        if values.is_empty() {
            return true;
        }
        let mut space = ArraySpace::new(vec![0]);
        let id = space.allocate(values.len() as u32);
        for (offset, value) in values.iter().enumerate() {
            space.store(id, offset as u32, *value).unwrap();
        }
        space.clone_into_zero(id).unwrap();
        let before: Vec<u32> = (0..values.len() as u32)
            .map(|offset| space.load(0, offset).unwrap())
            .collect();
        space.store(id, 0, mutation).unwrap();
        let after_zero = space.load(0, 0).unwrap();
        before == values && after_zero == values[0]
    }

    // The decoder is specified as a pure total function (§4.1): it must
    // never panic, for any 32-bit input, including the unassigned opcodes.
    #[quickcheck]
    fn decode_is_total_for_every_word(word: u32) -> bool {
        let _ = decode(word);
        true
    }
}
