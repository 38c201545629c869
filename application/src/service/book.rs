use error_stack::Report;
use uuid::Uuid;

use kernel::interface::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use kernel::interface::query::{BookQuery, DependOnBookQuery};
use kernel::interface::update::{BookModifier, DependOnBookModifier};
use kernel::prelude::entity::{
    Book, BookAuthor, BookId, BookInventory, BookTitle, PageLimit, PageOffset,
};
use kernel::KernelError;

use crate::transfer::{
    BookDto, CreateBookDto, DeleteBookDto, GetAllBookDto, GetBookDto, UpdateBookDto,
};

#[async_trait::async_trait]
pub trait GetBookService<Connection: Transaction + Send>:
    'static + Sync + Send + DependOnDatabaseConnection<Connection> + DependOnBookQuery<Connection>
{
    async fn get_book(&self, dto: GetBookDto) -> error_stack::Result<Option<BookDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let id = BookId::new(dto.id);
        let book = self.book_query().find_by_id(&mut connection, &id).await?;

        Ok(book.map(BookDto::from))
    }

    async fn get_all_books(
        &self,
        dto: GetAllBookDto,
    ) -> error_stack::Result<Vec<BookDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let limit = PageLimit::new(dto.limit);
        let offset = PageOffset::new(dto.offset);
        let books = self
            .book_query()
            .find_all(&mut connection, &limit, &offset)
            .await?;

        Ok(books.into_iter().map(BookDto::from).collect())
    }
}

impl<Connection: Transaction + Send, T> GetBookService<Connection> for T where
    T: DependOnDatabaseConnection<Connection> + DependOnBookQuery<Connection>
{
}

#[async_trait::async_trait]
pub trait CreateBookService<Connection: Transaction + Send>:
    'static + Sync + Send + DependOnDatabaseConnection<Connection> + DependOnBookModifier<Connection>
{
    async fn create_book(&self, dto: CreateBookDto) -> error_stack::Result<BookDto, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let book = Book::new(
            BookId::new(Uuid::new_v4()),
            BookTitle::new(dto.title),
            BookAuthor::new(dto.author),
            dto.cover,
            BookInventory::new(dto.inventory),
            dto.daily_fee,
        );
        self.book_modifier().create(&mut connection, &book).await?;

        connection.commit().await?;

        Ok(BookDto::from(book))
    }
}

impl<Connection: Transaction + Send, T> CreateBookService<Connection> for T where
    T: DependOnDatabaseConnection<Connection> + DependOnBookModifier<Connection>
{
}

#[async_trait::async_trait]
pub trait UpdateBookService<Connection: Transaction + Send>:
    'static
    + Sync
    + Send
    + DependOnDatabaseConnection<Connection>
    + DependOnBookQuery<Connection>
    + DependOnBookModifier<Connection>
{
    async fn update_book(&self, dto: UpdateBookDto) -> error_stack::Result<BookDto, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let id = BookId::new(dto.id);
        let book = self
            .book_query()
            .find_by_id(&mut connection, &id)
            .await?
            .ok_or_else(|| {
                Report::new(KernelError::NotFound)
                    .attach_printable(format!("Book({}) is not found", dto.id))
            })?;

        let book = book.reconstruct(|b| {
            if let Some(title) = dto.title {
                b.title = BookTitle::new(title);
            }
            if let Some(author) = dto.author {
                b.author = BookAuthor::new(author);
            }
            if let Some(cover) = dto.cover {
                b.cover = cover;
            }
            if let Some(inventory) = dto.inventory {
                b.inventory = BookInventory::new(inventory);
            }
            if let Some(daily_fee) = dto.daily_fee {
                b.daily_fee = daily_fee;
            }
        });
        self.book_modifier().update(&mut connection, &book).await?;

        connection.commit().await?;

        Ok(BookDto::from(book))
    }
}

impl<Connection: Transaction + Send, T> UpdateBookService<Connection> for T where
    T: DependOnDatabaseConnection<Connection>
        + DependOnBookQuery<Connection>
        + DependOnBookModifier<Connection>
{
}

#[async_trait::async_trait]
pub trait DeleteBookService<Connection: Transaction + Send>:
    'static
    + Sync
    + Send
    + DependOnDatabaseConnection<Connection>
    + DependOnBookQuery<Connection>
    + DependOnBookModifier<Connection>
{
    async fn delete_book(&self, dto: DeleteBookDto) -> error_stack::Result<(), KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let id = BookId::new(dto.id);
        self.book_query()
            .find_by_id(&mut connection, &id)
            .await?
            .ok_or_else(|| {
                Report::new(KernelError::NotFound)
                    .attach_printable(format!("Book({}) is not found", dto.id))
            })?;
        self.book_modifier().delete(&mut connection, &id).await?;

        connection.commit().await?;

        Ok(())
    }
}

impl<Connection: Transaction + Send, T> DeleteBookService<Connection> for T where
    T: DependOnDatabaseConnection<Connection>
        + DependOnBookQuery<Connection>
        + DependOnBookModifier<Connection>
{
}
