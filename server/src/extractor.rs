use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::headers::authorization::Bearer;
use axum_extra::headers::Authorization;
use axum_extra::TypedHeader;
use error_stack::Report;

use application::service::AuthenticateService;
use application::transfer::AuthorizedUserDto;
use kernel::prelude::entity::AccessToken;
use kernel::KernelError;

use crate::error::ErrorStatus;
use crate::handler::AppModule;

/// Caller identity resolved from the `Authorization: Bearer` header.
pub struct AuthorizedUser(pub AuthorizedUserDto);

#[axum::async_trait]
impl FromRequestParts<AppModule> for AuthorizedUser {
    type Rejection = ErrorStatus;

    async fn from_request_parts(
        parts: &mut Parts,
        module: &AppModule,
    ) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, module)
                .await
                .map_err(|e| {
                    ErrorStatus::from(
                        Report::new(e)
                            .change_context(KernelError::Unauthorized)
                            .attach_printable("Missing bearer token"),
                    )
                })?;

        let authorized = module
            .authenticate(AccessToken::new(bearer.token()))
            .await
            .map_err(ErrorStatus::from)?;

        Ok(AuthorizedUser(authorized))
    }
}
