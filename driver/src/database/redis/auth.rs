use deadpool_redis::redis::AsyncCommands;
use error_stack::Report;
use uuid::Uuid;

use kernel::interface::query::AuthQuery;
use kernel::prelude::entity::{AccessToken, UserId};
use kernel::KernelError;

use crate::database::redis::RedisConnection;
use crate::error::ConvertError;

pub struct RedisAuthRepository;

fn token_key(token: &AccessToken) -> String {
    format!("token:{}", token.as_ref())
}

#[async_trait::async_trait]
impl AuthQuery<RedisConnection> for RedisAuthRepository {
    async fn find_user_by_token(
        &self,
        con: &mut RedisConnection,
        token: &AccessToken,
    ) -> error_stack::Result<Option<UserId>, KernelError> {
        let raw: Option<String> = con.get(token_key(token)).await.convert_error()?;
        raw.map(|raw| {
            Uuid::parse_str(&raw).map(UserId::new).map_err(|error| {
                Report::new(error)
                    .change_context(KernelError::Internal)
                    .attach_printable("Token entry does not hold a user id")
            })
        })
        .transpose()
    }
}
