use error_stack::Report;
use uuid::Uuid;

use kernel::interface::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use kernel::interface::notify::{DependOnNotifier, Notifier};
use kernel::interface::query::{
    BookQuery, BorrowingQuery, DependOnBookQuery, DependOnBorrowingQuery, DependOnUserQuery,
    UserQuery,
};
use kernel::interface::update::{
    BorrowingModifier, DependOnBorrowingModifier, DependOnInventoryModifier, InventoryModifier,
};
use kernel::prelude::entity::{
    BookId, BorrowDate, Borrowing, BorrowingId, ExpectedReturnDate, PageLimit, PageOffset,
    ReturnedDate, UserId,
};
use kernel::{KernelError, ValidationError};

use crate::transfer::{
    BorrowingDto, CreateBorrowingDto, GetBorrowingDto, ListBorrowingDto, ReturnBorrowingDto,
};

fn to_kernel_error(report: Report<ValidationError>) -> Report<KernelError> {
    let rule = *report.current_context();
    report.change_context(KernelError::Validation(rule))
}

#[async_trait::async_trait]
pub trait GetBorrowingService<Connection: Transaction + Send>:
    'static
    + Sync
    + Send
    + DependOnDatabaseConnection<Connection>
    + DependOnBorrowingQuery<Connection>
{
    async fn get_borrowing(
        &self,
        dto: GetBorrowingDto,
    ) -> error_stack::Result<Option<BorrowingDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let id = BorrowingId::new(dto.id);
        let borrowing = self
            .borrowing_query()
            .find_by_id(&mut connection, &id)
            .await?;

        Ok(borrowing.map(BorrowingDto::from))
    }

    async fn get_all_borrowings(
        &self,
        dto: ListBorrowingDto,
    ) -> error_stack::Result<Vec<BorrowingDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let scope = dto.policy.narrow(dto.user_id.map(UserId::new));
        let limit = PageLimit::new(dto.limit);
        let offset = PageOffset::new(dto.offset);
        let borrowings = self
            .borrowing_query()
            .find_filtered(
                &mut connection,
                scope.as_ref(),
                dto.is_active,
                &limit,
                &offset,
            )
            .await?;

        Ok(borrowings.into_iter().map(BorrowingDto::from).collect())
    }
}

impl<Connection: Transaction + Send, T> GetBorrowingService<Connection> for T where
    T: DependOnDatabaseConnection<Connection> + DependOnBorrowingQuery<Connection>
{
}

#[async_trait::async_trait]
pub trait CreateBorrowingService<Connection: Transaction + Send>:
    'static
    + Sync
    + Send
    + DependOnDatabaseConnection<Connection>
    + DependOnBookQuery<Connection>
    + DependOnUserQuery<Connection>
    + DependOnBorrowingModifier<Connection>
    + DependOnInventoryModifier<Connection>
    + DependOnNotifier
{
    async fn create_borrowing(
        &self,
        dto: CreateBorrowingDto,
    ) -> error_stack::Result<BorrowingDto, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let book_id = BookId::new(dto.book_id);
        let book = self
            .book_query()
            .find_by_id(&mut connection, &book_id)
            .await?
            .ok_or_else(|| {
                Report::new(KernelError::NotFound)
                    .attach_printable(format!("Book({}) is not found", dto.book_id))
            })?;
        let user_id = UserId::new(dto.user_id);
        let user = self
            .user_query()
            .find_by_id(&mut connection, &user_id)
            .await?
            .ok_or_else(|| {
                Report::new(KernelError::NotFound)
                    .attach_printable(format!("User({}) is not found", dto.user_id))
            })?;

        let borrowing = Borrowing::try_new(
            BorrowingId::new(Uuid::new_v4()),
            BorrowDate::new(dto.borrow_date),
            ExpectedReturnDate::new(dto.expected_return_date),
            &book,
            user_id,
        )
        .map_err(to_kernel_error)?;

        self.inventory_modifier()
            .reserve(&mut connection, &book_id)
            .await?;
        self.borrowing_modifier()
            .create(&mut connection, &borrowing)
            .await?;

        let created = BorrowingDto::from(borrowing);
        connection.commit().await?;

        let message = format!(
            "New Borrowing:\nUser: {}\nBook: {}\nExpected Return Date: {}",
            user.name().as_ref(),
            book.title().as_ref(),
            created.expected_return_date
        );
        if let Err(report) = self.notifier().send(&message).await {
            tracing::warn!("Failed to send notification: {report:?}");
        }

        Ok(created)
    }
}

impl<Connection: Transaction + Send, T> CreateBorrowingService<Connection> for T where
    T: DependOnDatabaseConnection<Connection>
        + DependOnBookQuery<Connection>
        + DependOnUserQuery<Connection>
        + DependOnBorrowingModifier<Connection>
        + DependOnInventoryModifier<Connection>
        + DependOnNotifier
{
}

#[async_trait::async_trait]
pub trait ReturnBorrowingService<Connection: Transaction + Send>:
    'static
    + Sync
    + Send
    + DependOnDatabaseConnection<Connection>
    + DependOnBorrowingQuery<Connection>
    + DependOnBookQuery<Connection>
    + DependOnUserQuery<Connection>
    + DependOnBorrowingModifier<Connection>
    + DependOnInventoryModifier<Connection>
    + DependOnNotifier
{
    async fn return_borrowing(
        &self,
        dto: ReturnBorrowingDto,
    ) -> error_stack::Result<BorrowingDto, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let id = BorrowingId::new(dto.id);
        let borrowing = self
            .borrowing_query()
            .find_by_id(&mut connection, &id)
            .await?
            .ok_or_else(|| {
                Report::new(KernelError::NotFound)
                    .attach_printable(format!("Borrowing({}) is not found", dto.id))
            })?;

        let closed = borrowing.close(ReturnedDate::new(dto.returned_date))?;

        let book = self
            .book_query()
            .find_by_id(&mut connection, closed.book_id())
            .await?
            .ok_or_else(|| {
                Report::new(KernelError::Internal).attach_printable(format!(
                    "Book referenced by Borrowing({}) is missing",
                    dto.id
                ))
            })?;
        let user = self
            .user_query()
            .find_by_id(&mut connection, closed.user_id())
            .await?
            .ok_or_else(|| {
                Report::new(KernelError::Internal).attach_printable(format!(
                    "User referenced by Borrowing({}) is missing",
                    dto.id
                ))
            })?;

        self.inventory_modifier()
            .release(&mut connection, closed.book_id())
            .await?;
        self.borrowing_modifier()
            .update(&mut connection, &closed)
            .await?;

        let returned = BorrowingDto::from(closed);
        connection.commit().await?;

        let message = format!(
            "Borrowing Returned:\nUser: {}\nBook: {}\nReturned Date: {}",
            user.name().as_ref(),
            book.title().as_ref(),
            dto.returned_date
        );
        if let Err(report) = self.notifier().send(&message).await {
            tracing::warn!("Failed to send notification: {report:?}");
        }

        Ok(returned)
    }
}

impl<Connection: Transaction + Send, T> ReturnBorrowingService<Connection> for T where
    T: DependOnDatabaseConnection<Connection>
        + DependOnBorrowingQuery<Connection>
        + DependOnBookQuery<Connection>
        + DependOnUserQuery<Connection>
        + DependOnBorrowingModifier<Connection>
        + DependOnInventoryModifier<Connection>
        + DependOnNotifier
{
}
