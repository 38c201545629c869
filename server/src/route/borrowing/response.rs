use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use time::Date;
use uuid::Uuid;

use application::transfer::BorrowingDto;

use crate::controller::Exhaust;

#[derive(Debug, Serialize)]
pub struct BorrowingResponse {
    id: Uuid,
    borrow_date: Date,
    expected_return_date: Date,
    actual_return_date: Option<Date>,
    book_id: Uuid,
    user_id: Uuid,
    is_active: bool,
}

impl From<BorrowingDto> for BorrowingResponse {
    fn from(value: BorrowingDto) -> Self {
        Self {
            id: value.id,
            borrow_date: value.borrow_date,
            expected_return_date: value.expected_return_date,
            actual_return_date: value.actual_return_date,
            book_id: value.book_id,
            user_id: value.user_id,
            is_active: value.is_active,
        }
    }
}

impl IntoResponse for BorrowingResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

#[derive(Debug, Serialize)]
pub struct CreatedResponse(BorrowingResponse);

impl IntoResponse for CreatedResponse {
    fn into_response(self) -> Response {
        (StatusCode::CREATED, Json(self.0)).into_response()
    }
}

pub struct Presenter;

impl Exhaust<Option<BorrowingDto>> for Presenter {
    type To = Option<BorrowingResponse>;
    fn emit(&self, input: Option<BorrowingDto>) -> Self::To {
        input.map(BorrowingResponse::from)
    }
}

impl Exhaust<Vec<BorrowingDto>> for Presenter {
    type To = Json<Vec<BorrowingResponse>>;
    fn emit(&self, input: Vec<BorrowingDto>) -> Self::To {
        let result = input
            .into_iter()
            .map(BorrowingResponse::from)
            .collect::<Vec<_>>();

        Json::from(result)
    }
}

impl Exhaust<BorrowingDto> for Presenter {
    type To = BorrowingResponse;
    fn emit(&self, input: BorrowingDto) -> Self::To {
        BorrowingResponse::from(input)
    }
}

pub struct CreatedPresenter;

impl Exhaust<BorrowingDto> for CreatedPresenter {
    type To = CreatedResponse;
    fn emit(&self, input: BorrowingDto) -> Self::To {
        CreatedResponse(BorrowingResponse::from(input))
    }
}
