use crate::database::Transaction;
use crate::entity::{AccessToken, UserId};
use crate::KernelError;

#[async_trait::async_trait]
pub trait AuthQuery<Connection: Transaction>: Sync + Send + 'static {
    async fn find_user_by_token(
        &self,
        con: &mut Connection,
        token: &AccessToken,
    ) -> error_stack::Result<Option<UserId>, KernelError>;
}

pub trait DependOnAuthQuery<Connection: Transaction>: Sync + Send + 'static {
    type AuthQuery: AuthQuery<Connection>;
    fn auth_query(&self) -> &Self::AuthQuery;
}
