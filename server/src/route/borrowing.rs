mod request;
mod response;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use uuid::Uuid;

use application::service::{CreateBorrowingService, GetBorrowingService, ReturnBorrowingService};

use crate::controller::Controller;
use crate::error::ErrorStatus;
use crate::extractor::AuthorizedUser;
use crate::handler::AppModule;
use crate::route::borrowing::request::{
    CreateRequest, GetAllRequest, GetRequest, ReturnRequest, Transformer,
};
use crate::route::borrowing::response::{BorrowingResponse, CreatedPresenter, Presenter};

pub trait BorrowingRouter {
    fn route_borrowing(self) -> Self;
}

impl BorrowingRouter for Router<AppModule> {
    fn route_borrowing(self) -> Self {
        self.route(
            "/borrowings",
            get(
                |State(module): State<AppModule>,
                 user: AuthorizedUser,
                 Query(req): Query<GetAllRequest>| async move {
                    Controller::new(Transformer, Presenter)
                        .intake((user, req))
                        .handle(|dto| async move { module.get_all_borrowings(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            )
            .post(
                |State(module): State<AppModule>,
                 user: AuthorizedUser,
                 Json(req): Json<CreateRequest>| async move {
                    Controller::new(Transformer, CreatedPresenter)
                        .intake((user, req))
                        .handle(|dto| async move { module.create_borrowing(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/borrowings/:id",
            get(
                |State(module): State<AppModule>,
                 _user: AuthorizedUser,
                 Path(id): Path<Uuid>| async move {
                    Controller::new(Transformer, Presenter)
                        .intake(GetRequest::new(id))
                        .handle(|dto| async move { module.get_borrowing(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                        .map(|res| {
                            res.map(BorrowingResponse::into_response)
                                .unwrap_or_else(|| StatusCode::NOT_FOUND.into_response())
                        })
                },
            ),
        )
        .route(
            "/borrowings/:id/return",
            post(
                |State(module): State<AppModule>,
                 _user: AuthorizedUser,
                 Path(id): Path<Uuid>| async move {
                    Controller::new(Transformer, Presenter)
                        .intake(ReturnRequest::new(id))
                        .handle(|dto| async move { module.return_borrowing(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
    }
}
