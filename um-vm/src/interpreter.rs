//! The fetch/decode/execute dispatch loop.

use um_core::{ByteSink, ByteSource};

use crate::arrays::ArraySpace;
use crate::decode::{decode, Instruction};
use crate::error::ProgramError;
use crate::registers::RegisterFile;

/// The universal machine: array space, register file, program counter, and
/// the console streams instructions 10 and 11 talk to.
///
/// `O` and `I` are generic so the engine can be driven by real stdio in
/// `um-runner` and by in-memory buffers in tests, without this crate knowing
/// or caring which.
pub struct Machine<O: ByteSink, I: ByteSource> {
    arrays: ArraySpace,
    registers: RegisterFile,
    pc: u32,
    output: O,
    input: I,
}

impl<O: ByteSink, I: ByteSource> Machine<O, I> {
    /// Construct a machine whose program array (identifier 0) is `program`.
    /// Execution starts at offset 0.
    #[must_use]
    pub fn new(program: Vec<u32>, output: O, input: I) -> Self {
        Self {
            arrays: ArraySpace::new(program),
            registers: RegisterFile::new(),
            pc: 0,
            output,
            input,
        }
    }

    /// Run until halt (`Ok`) or a program error (`Err`).
    pub fn run(&mut self) -> Result<(), ProgramError> {
        loop {
            if let Some(()) = self.step()? {
                return Ok(());
            }
        }
    }

    /// Execute a single instruction. Returns `Ok(Some(()))` on halt,
    /// `Ok(None)` to keep running, `Err` on a program error.
    fn step(&mut self) -> Result<Option<()>, ProgramError> {
        let word = self.arrays.fetch(self.pc)?;
        self.pc = self.pc.wrapping_add(1);

        match decode(word) {
            Instruction::CMov { a, b, c } => {
                if self.registers.get(c) != 0 {
                    self.registers.set(a, self.registers.get(b));
                }
            }
            Instruction::ALoad { a, b, c } => {
                let id = self.registers.get(b);
                let offset = self.registers.get(c);
                let value = self.arrays.load(id, offset)?;
                self.registers.set(a, value);
            }
            Instruction::AStore { a, b, c } => {
                let id = self.registers.get(a);
                let offset = self.registers.get(b);
                let value = self.registers.get(c);
                self.arrays.store(id, offset, value)?;
            }
            Instruction::Add { a, b, c } => {
                let result = self.registers.get(b).wrapping_add(self.registers.get(c));
                self.registers.set(a, result);
            }
            Instruction::Mul { a, b, c } => {
                let result = self.registers.get(b).wrapping_mul(self.registers.get(c));
                self.registers.set(a, result);
            }
            Instruction::UDiv { a, b, c } => {
                let divisor = self.registers.get(c);
                if divisor == 0 {
                    return Err(ProgramError::DivisionByZero);
                }
                self.registers.set(a, self.registers.get(b) / divisor);
            }
            Instruction::NAnd { a, b, c } => {
                let result = !(self.registers.get(b) & self.registers.get(c));
                self.registers.set(a, result);
            }
            Instruction::Halt => {
                self.output.flush();
                return Ok(Some(()));
            }
            Instruction::Alloc { b, c } => {
                let size = self.registers.get(c);
                let id = self.arrays.allocate(size);
                self.registers.set(b, id);
            }
            Instruction::Free { c } => {
                let id = self.registers.get(c);
                self.arrays.deallocate(id)?;
            }
            Instruction::Out { c } => {
                let value = self.registers.get(c);
                let byte = u8::try_from(value).map_err(|_| ProgramError::OutputOutOfRange(value))?;
                self.output.write_byte(byte);
            }
            Instruction::In { c } => {
                let value = self.input.read_byte().map_or(0xFFFF_FFFF, u32::from);
                self.registers.set(c, value);
            }
            Instruction::LoadProgram { b, c } => {
                let source = self.registers.get(b);
                if source != 0 {
                    self.arrays.clone_into_zero(source)?;
                }
                self.pc = self.registers.get(c);
            }
            Instruction::LoadImmediate { a, value } => {
                self.registers.set(a, value);
            }
            Instruction::Unknown(op) => return Err(ProgramError::UnknownOpcode(op)),
        }

        Ok(None)
    }
}
