/// Faults a compiled module can report through the fault import.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RuntimeFault {
    General,
    OutOfMemory,
    Type,
    UnaryOperand,
    BinaryOperand,
    NotCallable,
    NonBooleanCondition,
    Unknown(u32),
}

impl RuntimeFault {
    pub fn from_code(code: u32) -> Self {
        match code {
            0x0 => RuntimeFault::General,
            0x1 => RuntimeFault::OutOfMemory,
            0x10 => RuntimeFault::Type,
            0x12 => RuntimeFault::UnaryOperand,
            0x13 => RuntimeFault::BinaryOperand,
            0x16 => RuntimeFault::NotCallable,
            0x17 => RuntimeFault::NonBooleanCondition,
            other => RuntimeFault::Unknown(other),
        }
    }

    pub fn code(&self) -> u32 {
        match self {
            RuntimeFault::General => 0x0,
            RuntimeFault::OutOfMemory => 0x1,
            RuntimeFault::Type => 0x10,
            RuntimeFault::UnaryOperand => 0x12,
            RuntimeFault::BinaryOperand => 0x13,
            RuntimeFault::NotCallable => 0x16,
            RuntimeFault::NonBooleanCondition => 0x17,
            RuntimeFault::Unknown(code) => *code,
        }
    }

    pub fn explain(&self) -> &'static str {
        match self {
            RuntimeFault::General => "General runtime error",
            RuntimeFault::OutOfMemory => "Out of memory",
            RuntimeFault::Type => "General runtime type error",
            RuntimeFault::UnaryOperand => "Unary operator given wrong argument type",
            RuntimeFault::BinaryOperand => "Binary operator given wrong argument type",
            RuntimeFault::NotCallable => "Call performed on a non-callable value",
            RuntimeFault::NonBooleanCondition => "Conditional given a non-boolean condition",
            RuntimeFault::Unknown(_) => "Unknown runtime error",
        }
    }

    pub fn elaborate(&self) -> &'static str {
        match self {
            RuntimeFault::General => "",
            RuntimeFault::OutOfMemory => {
                "The program exhausted its heap. Recompiling with a larger heap may let it finish."
            }
            RuntimeFault::Type => "A value had a type the operation does not accept.",
            RuntimeFault::UnaryOperand => {
                "The operand of a unary operator had a type the operator does not accept."
            }
            RuntimeFault::BinaryOperand => {
                "An operand of a binary operator had a type the operator does not accept."
            }
            RuntimeFault::NotCallable => "Only functions can be called.",
            RuntimeFault::NonBooleanCondition => {
                "The condition of an if or while must evaluate to a boolean."
            }
            RuntimeFault::Unknown(_) => "This is likely a bug in the compiler.",
        }
    }
}
