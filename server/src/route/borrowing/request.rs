use serde::Deserialize;
use time::Date;
use uuid::Uuid;

use application::transfer::{
    CreateBorrowingDto, GetBorrowingDto, ListBorrowingDto, ReturnBorrowingDto,
};
use kernel::prelude::entity::{parse_active_filter, PageLimit, PageOffset, ReturnedDate};

use crate::controller::Intake;
use crate::extractor::AuthorizedUser;

#[derive(Debug, Deserialize)]
pub struct CreateRequest {
    book_id: Uuid,
    borrow_date: Date,
    expected_return_date: Date,
}

#[derive(Debug, Deserialize)]
pub struct GetAllRequest {
    user_id: Option<Uuid>,
    is_active: Option<String>,
    #[serde(default)]
    limit: PageLimit,
    #[serde(default)]
    offset: PageOffset,
}

#[derive(Debug)]
pub struct GetRequest {
    id: Uuid,
}

impl GetRequest {
    pub fn new(id: Uuid) -> Self {
        Self { id }
    }
}

#[derive(Debug)]
pub struct ReturnRequest {
    id: Uuid,
}

impl ReturnRequest {
    pub fn new(id: Uuid) -> Self {
        Self { id }
    }
}

pub struct Transformer;

impl Intake<(AuthorizedUser, CreateRequest)> for Transformer {
    type To = CreateBorrowingDto;
    fn emit(&self, (user, input): (AuthorizedUser, CreateRequest)) -> Self::To {
        CreateBorrowingDto {
            borrow_date: input.borrow_date,
            expected_return_date: input.expected_return_date,
            book_id: input.book_id,
            user_id: user.0.id,
        }
    }
}

impl Intake<(AuthorizedUser, GetAllRequest)> for Transformer {
    type To = ListBorrowingDto;
    fn emit(&self, (user, input): (AuthorizedUser, GetAllRequest)) -> Self::To {
        ListBorrowingDto {
            policy: user.0.policy,
            user_id: input.user_id,
            is_active: parse_active_filter(input.is_active.as_deref()),
            limit: input.limit.into(),
            offset: input.offset.into(),
        }
    }
}

impl Intake<GetRequest> for Transformer {
    type To = GetBorrowingDto;
    fn emit(&self, input: GetRequest) -> Self::To {
        GetBorrowingDto { id: input.id }
    }
}

impl Intake<ReturnRequest> for Transformer {
    type To = ReturnBorrowingDto;
    fn emit(&self, input: ReturnRequest) -> Self::To {
        ReturnBorrowingDto {
            id: input.id,
            returned_date: ReturnedDate::today().into(),
        }
    }
}
