use crate::database::Transaction;
use crate::entity::{Borrowing, BorrowingId, ExpectedReturnDate, PageLimit, PageOffset, UserId};
use crate::KernelError;

#[async_trait::async_trait]
pub trait BorrowingQuery<Connection: Transaction>: Sync + Send + 'static {
    async fn find_by_id(
        &self,
        con: &mut Connection,
        id: &BorrowingId,
    ) -> error_stack::Result<Option<Borrowing>, KernelError>;
    async fn find_filtered(
        &self,
        con: &mut Connection,
        user_id: Option<&UserId>,
        is_active: Option<bool>,
        limit: &PageLimit,
        offset: &PageOffset,
    ) -> error_stack::Result<Vec<Borrowing>, KernelError>;

    async fn find_due(
        &self,
        con: &mut Connection,
        cutoff: &ExpectedReturnDate,
    ) -> error_stack::Result<Vec<Borrowing>, KernelError>;
}

pub trait DependOnBorrowingQuery<Connection: Transaction>: Sync + Send + 'static {
    type BorrowingQuery: BorrowingQuery<Connection>;
    fn borrowing_query(&self) -> &Self::BorrowingQuery;
}
