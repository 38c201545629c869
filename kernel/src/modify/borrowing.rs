use crate::database::Transaction;
use crate::entity::Borrowing;
use crate::KernelError;

#[async_trait::async_trait]
pub trait BorrowingModifier<Connection: Transaction>: Sync + Send + 'static {
    async fn create(
        &self,
        con: &mut Connection,
        borrowing: &Borrowing,
    ) -> error_stack::Result<(), KernelError>;
    async fn update(
        &self,
        con: &mut Connection,
        borrowing: &Borrowing,
    ) -> error_stack::Result<(), KernelError>;
}

pub trait DependOnBorrowingModifier<Connection: Transaction>: Sync + Send + 'static {
    type BorrowingModifier: BorrowingModifier<Connection>;
    fn borrowing_modifier(&self) -> &Self::BorrowingModifier;
}
