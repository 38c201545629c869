use time::Date;
use uuid::Uuid;

use kernel::prelude::entity::{AccessPolicy, Borrowing, DestructBorrowing};

#[derive(Debug, Clone)]
pub struct BorrowingDto {
    pub id: Uuid,
    pub borrow_date: Date,
    pub expected_return_date: Date,
    pub actual_return_date: Option<Date>,
    pub book_id: Uuid,
    pub user_id: Uuid,
    pub is_active: bool,
}

impl From<Borrowing> for BorrowingDto {
    fn from(value: Borrowing) -> Self {
        let DestructBorrowing {
            id,
            borrow_date,
            expected_return_date,
            returned_date,
            book_id,
            user_id,
            is_active,
        } = value.into_destruct();
        Self {
            id: id.into(),
            borrow_date: borrow_date.into(),
            expected_return_date: expected_return_date.into(),
            actual_return_date: returned_date.map(Into::into),
            book_id: book_id.into(),
            user_id: user_id.into(),
            is_active,
        }
    }
}

pub struct GetBorrowingDto {
    pub id: Uuid,
}

pub struct ListBorrowingDto {
    pub policy: AccessPolicy,
    pub user_id: Option<Uuid>,
    pub is_active: Option<bool>,
    pub limit: i32,
    pub offset: i32,
}

pub struct CreateBorrowingDto {
    pub borrow_date: Date,
    pub expected_return_date: Date,
    pub book_id: Uuid,
    pub user_id: Uuid,
}

pub struct ReturnBorrowingDto {
    pub id: Uuid,
    pub returned_date: Date,
}

pub struct NotifyOverdueDto {
    pub lookahead_days: i64,
}
