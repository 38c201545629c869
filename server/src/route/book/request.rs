use error_stack::Report;
use serde::Deserialize;
use uuid::Uuid;

use application::transfer::{
    CreateBookDto, DeleteBookDto, GetAllBookDto, GetBookDto, UpdateBookDto,
};
use kernel::prelude::entity::{BookCover, DailyFee, PageLimit, PageOffset};
use kernel::KernelError;

use crate::controller::{Intake, TryIntake};
use crate::extractor::AuthorizedUser;

#[derive(Debug, Deserialize)]
pub struct CreateRequest {
    title: String,
    author: String,
    cover: BookCover,
    inventory: i32,
    daily_fee: DailyFee,
}

#[derive(Debug, Deserialize)]
pub struct UpdateRequest {
    title: Option<String>,
    author: Option<String>,
    cover: Option<BookCover>,
    inventory: Option<i32>,
    daily_fee: Option<DailyFee>,
}

#[derive(Debug)]
pub struct DeleteRequest {
    id: Uuid,
}

impl DeleteRequest {
    pub fn new(id: Uuid) -> Self {
        Self { id }
    }
}

#[derive(Debug, Deserialize)]
pub struct GetAllRequest {
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

pub struct Transformer;

fn staff_only(user: &AuthorizedUser) -> Result<(), Report<KernelError>> {
    if user.0.policy.can_write_catalog() {
        Ok(())
    } else {
        Err(Report::new(KernelError::Forbidden)
            .attach_printable("Catalog writes are restricted to staff"))
    }
}

impl TryIntake<(AuthorizedUser, CreateRequest)> for Transformer {
    type To = CreateBookDto;
    type Error = Report<KernelError>;
    fn emit(&self, (user, input): (AuthorizedUser, CreateRequest)) -> Result<Self::To, Self::Error> {
        staff_only(&user)?;
        Ok(CreateBookDto {
            title: input.title,
            author: input.author,
            cover: input.cover,
            inventory: input.inventory,
            daily_fee: input.daily_fee,
        })
    }
}

impl TryIntake<(AuthorizedUser, Uuid, UpdateRequest)> for Transformer {
    type To = UpdateBookDto;
    type Error = Report<KernelError>;
    fn emit(
        &self,
        (user, id, input): (AuthorizedUser, Uuid, UpdateRequest),
    ) -> Result<Self::To, Self::Error> {
        staff_only(&user)?;
        Ok(UpdateBookDto {
            id,
            title: input.title,
            author: input.author,
            cover: input.cover,
            inventory: input.inventory,
            daily_fee: input.daily_fee,
        })
    }
}

impl TryIntake<(AuthorizedUser, DeleteRequest)> for Transformer {
    type To = DeleteBookDto;
    type Error = Report<KernelError>;
    fn emit(&self, (user, input): (AuthorizedUser, DeleteRequest)) -> Result<Self::To, Self::Error> {
        staff_only(&user)?;
        Ok(DeleteBookDto { id: input.id })
    }
}

impl Intake<GetRequest> for Transformer {
    type To = GetBookDto;
    fn emit(&self, input: GetRequest) -> Self::To {
        GetBookDto { id: input.id }
    }
}

impl Intake<GetAllRequest> for Transformer {
    type To = GetAllBookDto;
    fn emit(&self, input: GetAllRequest) -> Self::To {
        GetAllBookDto {
            limit: input.limit.into(),
            offset: input.offset.into(),
        }
    }
}
