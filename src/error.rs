use std::fmt;

/// Errors the core can distinguish. `Not-found` is deliberately
/// absent: a `Remove` of an absent rule is a no-op and a `Get` of an
/// unmatched number returns the identity result, neither of which is an
/// error condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryError {
    /// The argument was not a valid phone number, or an `Add` was called
    /// with `num1 == num2`.
    InvalidInput,
    /// An allocation needed to complete the operation could not be
    /// satisfied. The operation is rolled back to its pre-call state.
    OutOfMemory,
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryError::InvalidInput => {
                write!(f, "Error: the argument is not a valid phone number.")
            }
            RegistryError::OutOfMemory => {
                write!(f, "Error: allocation failed while mutating the registry.")
            }
        }
    }
}

impl std::error::Error for RegistryError {}
