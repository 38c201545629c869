mod date;
mod id;

pub use self::{date::*, id::*};
use destructure::Destructure;
use error_stack::Report;

use crate::entity::{Book, BookId, UserId};
use crate::error::{KernelError, ValidationError};

#[derive(Debug, Clone, Eq, PartialEq, Destructure)]
pub struct Borrowing {
    id: BorrowingId,
    borrow_date: BorrowDate,
    expected_return_date: ExpectedReturnDate,
    returned_date: Option<ReturnedDate>,
    book_id: BookId,
    user_id: UserId,
    is_active: bool,
}

impl Borrowing {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: BorrowingId,
        borrow_date: BorrowDate,
        expected_return_date: ExpectedReturnDate,
        returned_date: Option<ReturnedDate>,
        book_id: BookId,
        user_id: UserId,
        is_active: bool,
    ) -> Self {
        Self {
            id,
            borrow_date,
            expected_return_date,
            returned_date,
            book_id,
            user_id,
            is_active,
        }
    }

    /// Checks every borrowing rule and reports the first violated one.
    pub fn validate(
        borrow_date: &BorrowDate,
        expected_return_date: &ExpectedReturnDate,
        book: &Book,
        is_active: bool,
        returned_date: Option<&ReturnedDate>,
    ) -> error_stack::Result<(), ValidationError> {
        if book.inventory().is_exhausted() {
            return Err(Report::new(ValidationError::InventoryExhausted)
                .attach_printable(format!("Book({})", book.title().as_ref())));
        }
        if expected_return_date.as_ref() < borrow_date.as_ref() {
            return Err(Report::new(ValidationError::ExpectedDateBeforeBorrow));
        }
        if is_active == returned_date.is_some() {
            return Err(Report::new(ValidationError::OpenClosedMismatch));
        }
        if let Some(returned) = returned_date {
            if returned.as_ref() < borrow_date.as_ref() {
                return Err(Report::new(ValidationError::ActualDateBeforeBorrow));
            }
        }
        Ok(())
    }

    pub fn try_new(
        id: BorrowingId,
        borrow_date: BorrowDate,
        expected_return_date: ExpectedReturnDate,
        book: &Book,
        user_id: UserId,
    ) -> error_stack::Result<Self, ValidationError> {
        Self::validate(&borrow_date, &expected_return_date, book, true, None)?;
        Ok(Self {
            id,
            borrow_date,
            expected_return_date,
            returned_date: None,
            book_id: book.id().clone(),
            user_id,
            is_active: true,
        })
    }

    pub fn close(self, returned_date: ReturnedDate) -> error_stack::Result<Self, KernelError> {
        if !self.is_active || self.returned_date.is_some() {
            return Err(Report::new(KernelError::AlreadyReturned)
                .attach_printable(format!("Borrowing({})", self.id.as_ref())));
        }
        if returned_date.as_ref() < self.borrow_date.as_ref() {
            return Err(Report::new(KernelError::Validation(
                ValidationError::ActualDateBeforeBorrow,
            )));
        }
        Ok(Self {
            returned_date: Some(returned_date),
            is_active: false,
            ..self
        })
    }

    pub fn id(&self) -> &BorrowingId {
        &self.id
    }

    pub fn borrow_date(&self) -> &BorrowDate {
        &self.borrow_date
    }

    pub fn expected_return_date(&self) -> &ExpectedReturnDate {
        &self.expected_return_date
    }

    pub fn returned_date(&self) -> Option<&ReturnedDate> {
        self.returned_date.as_ref()
    }

    pub fn book_id(&self) -> &BookId {
        &self.book_id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }
}
