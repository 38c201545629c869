use std::fmt::Display;

use error_stack::Context;

/// Borrowing rules, listed in the order they are checked.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum ValidationError {
    InventoryExhausted,
    ExpectedDateBeforeBorrow,
    OpenClosedMismatch,
    ActualDateBeforeBorrow,
}

impl ValidationError {
    pub fn as_rule(&self) -> &'static str {
        match self {
            ValidationError::InventoryExhausted => "InventoryExhausted",
            ValidationError::ExpectedDateBeforeBorrow => "ExpectedDateBeforeBorrow",
            ValidationError::OpenClosedMismatch => "OpenClosedMismatch",
            ValidationError::ActualDateBeforeBorrow => "ActualDateBeforeBorrow",
        }
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::InventoryExhausted => write!(f, "Book inventory is exhausted"),
            ValidationError::ExpectedDateBeforeBorrow => {
                write!(f, "Expected return date cannot be before borrow date")
            }
            ValidationError::OpenClosedMismatch => {
                write!(f, "Active state does not match the actual return date")
            }
            ValidationError::ActualDateBeforeBorrow => {
                write!(f, "Actual return date cannot be before borrow date")
            }
        }
    }
}

impl Context for ValidationError {}

#[derive(Debug)]
pub enum KernelError {
    Validation(ValidationError),
    NotFound,
    AlreadyReturned,
    Unauthorized,
    Forbidden,
    Conflict,
    Timeout,
    Internal,
}

impl Display for KernelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KernelError::Validation(rule) => write!(f, "Validation failed: {rule}"),
            KernelError::NotFound => write!(f, "Record not found"),
            KernelError::AlreadyReturned => write!(f, "Borrowing is already returned"),
            KernelError::Unauthorized => write!(f, "Authentication required"),
            KernelError::Forbidden => write!(f, "Operation not permitted"),
            KernelError::Conflict => write!(f, "Conflicting record"),
            KernelError::Timeout => write!(f, "Process timed out"),
            KernelError::Internal => write!(f, "Internal kernel error"),
        }
    }
}

impl Context for KernelError {}

impl From<ValidationError> for KernelError {
    fn from(error: ValidationError) -> Self {
        KernelError::Validation(error)
    }
}
