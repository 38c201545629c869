use error_stack::Report;

use kernel::interface::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use kernel::interface::query::{AuthQuery, DependOnAuthQuery, DependOnUserQuery, UserQuery};
use kernel::prelude::entity::AccessToken;
use kernel::KernelError;

use crate::transfer::AuthorizedUserDto;

/// Token resolution runs against the key-value store first, the user row
/// itself lives in the relational store, hence the two connection parameters.
#[async_trait::async_trait]
pub trait AuthenticateService<Kv: Transaction + Send, Db: Transaction + Send>:
    'static
    + Sync
    + Send
    + DependOnDatabaseConnection<Kv>
    + DependOnDatabaseConnection<Db>
    + DependOnAuthQuery<Kv>
    + DependOnUserQuery<Db>
{
    async fn authenticate(
        &self,
        token: AccessToken,
    ) -> error_stack::Result<AuthorizedUserDto, KernelError> {
        let mut kv_connection = DependOnDatabaseConnection::<Kv>::database_connection(self)
            .transact()
            .await?;
        let user_id = self
            .auth_query()
            .find_user_by_token(&mut kv_connection, &token)
            .await?
            .ok_or_else(|| {
                Report::new(KernelError::Unauthorized).attach_printable("Unknown access token")
            })?;

        let mut db_connection = DependOnDatabaseConnection::<Db>::database_connection(self)
            .transact()
            .await?;
        let user = self
            .user_query()
            .find_by_id(&mut db_connection, &user_id)
            .await?
            .ok_or_else(|| {
                Report::new(KernelError::Unauthorized)
                    .attach_printable("Token refers to an unknown user")
            })?;

        Ok(AuthorizedUserDto::from(user))
    }
}

impl<Kv: Transaction + Send, Db: Transaction + Send, T> AuthenticateService<Kv, Db> for T where
    T: DependOnDatabaseConnection<Kv>
        + DependOnDatabaseConnection<Db>
        + DependOnAuthQuery<Kv>
        + DependOnUserQuery<Db>
{
}
