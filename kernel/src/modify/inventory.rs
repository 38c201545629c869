use crate::database::Transaction;
use crate::entity::BookId;
use crate::KernelError;

/// Stock movements for the copies of a book.
///
/// `reserve` takes one copy and fails with
/// [`ValidationError::InventoryExhausted`](crate::ValidationError) when none
/// is left. The check and the decrement happen in one statement so two
/// concurrent borrowers cannot both take the last copy.
#[async_trait::async_trait]
pub trait InventoryModifier<Connection: Transaction>: Sync + Send + 'static {
    async fn reserve(
        &self,
        con: &mut Connection,
        id: &BookId,
    ) -> error_stack::Result<(), KernelError>;
    async fn release(
        &self,
        con: &mut Connection,
        id: &BookId,
    ) -> error_stack::Result<(), KernelError>;
}

pub trait DependOnInventoryModifier<Connection: Transaction>: Sync + Send + 'static {
    type InventoryModifier: InventoryModifier<Connection>;
    fn inventory_modifier(&self) -> &Self::InventoryModifier;
}
