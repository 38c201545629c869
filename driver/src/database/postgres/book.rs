use error_stack::Report;
use sqlx::PgConnection;
use uuid::Uuid;

use kernel::interface::query::BookQuery;
use kernel::interface::update::{BookModifier, InventoryModifier};
use kernel::prelude::entity::{
    Book, BookAuthor, BookId, BookInventory, BookTitle, DailyFee, PageLimit, PageOffset,
};
use kernel::{KernelError, ValidationError};

use crate::database::postgres::PostgresConnection;
use crate::error::ConvertError;

pub struct PostgresBookRepository;

#[async_trait::async_trait]
impl BookQuery<PostgresConnection> for PostgresBookRepository {
    async fn find_by_id(
        &self,
        con: &mut PostgresConnection,
        id: &BookId,
    ) -> error_stack::Result<Option<Book>, KernelError> {
        PgBookInternal::find_by_id(con, id).await
    }

    async fn find_all(
        &self,
        con: &mut PostgresConnection,
        limit: &PageLimit,
        offset: &PageOffset,
    ) -> error_stack::Result<Vec<Book>, KernelError> {
        PgBookInternal::find_all(con, limit, offset).await
    }
}

#[async_trait::async_trait]
impl BookModifier<PostgresConnection> for PostgresBookRepository {
    async fn create(
        &self,
        con: &mut PostgresConnection,
        book: &Book,
    ) -> error_stack::Result<(), KernelError> {
        PgBookInternal::create(con, book).await
    }

    async fn update(
        &self,
        con: &mut PostgresConnection,
        book: &Book,
    ) -> error_stack::Result<(), KernelError> {
        PgBookInternal::update(con, book).await
    }

    async fn delete(
        &self,
        con: &mut PostgresConnection,
        id: &BookId,
    ) -> error_stack::Result<(), KernelError> {
        PgBookInternal::delete(con, id).await
    }
}

#[async_trait::async_trait]
impl InventoryModifier<PostgresConnection> for PostgresBookRepository {
    async fn reserve(
        &self,
        con: &mut PostgresConnection,
        id: &BookId,
    ) -> error_stack::Result<(), KernelError> {
        PgBookInternal::reserve(con, id).await
    }

    async fn release(
        &self,
        con: &mut PostgresConnection,
        id: &BookId,
    ) -> error_stack::Result<(), KernelError> {
        PgBookInternal::release(con, id).await
    }
}

#[derive(sqlx::FromRow)]
struct BookRow {
    id: Uuid,
    title: String,
    author: String,
    cover: String,
    inventory: i32,
    daily_fee: i64,
}

impl TryFrom<BookRow> for Book {
    type Error = Report<KernelError>;

    fn try_from(value: BookRow) -> Result<Self, Self::Error> {
        Ok(Book::new(
            BookId::new(value.id),
            BookTitle::new(value.title),
            BookAuthor::new(value.author),
            value.cover.parse()?,
            BookInventory::new(value.inventory),
            DailyFee::new(value.daily_fee),
        ))
    }
}

pub(in crate::database) struct PgBookInternal;

impl PgBookInternal {
    async fn find_by_id(
        con: &mut PgConnection,
        id: &BookId,
    ) -> error_stack::Result<Option<Book>, KernelError> {
        let row = sqlx::query_as::<_, BookRow>(
            // language=postgresql
            r#"
            SELECT id, title, author, cover, inventory, daily_fee
            FROM books
            WHERE id = $1
            "#,
        )
        .bind(id.as_ref())
        .fetch_optional(con)
        .await
        .convert_error()?;
        row.map(Book::try_from).transpose()
    }

    async fn find_all(
        con: &mut PgConnection,
        limit: &PageLimit,
        offset: &PageOffset,
    ) -> error_stack::Result<Vec<Book>, KernelError> {
        let rows = sqlx::query_as::<_, BookRow>(
            // language=postgresql
            r#"
            SELECT id, title, author, cover, inventory, daily_fee
            FROM books
            ORDER BY title
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(i64::from(*limit.as_ref()))
        .bind(i64::from(*offset.as_ref()))
        .fetch_all(con)
        .await
        .convert_error()?;
        rows.into_iter().map(Book::try_from).collect()
    }

    async fn create(con: &mut PgConnection, book: &Book) -> error_stack::Result<(), KernelError> {
        sqlx::query(
            // language=postgresql
            r#"
            INSERT INTO books (id, title, author, cover, inventory, daily_fee)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(book.id().as_ref())
        .bind(book.title().as_ref())
        .bind(book.author().as_ref())
        .bind(book.cover().to_string())
        .bind(book.inventory().as_ref())
        .bind(book.daily_fee().as_ref())
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }

    async fn update(con: &mut PgConnection, book: &Book) -> error_stack::Result<(), KernelError> {
        sqlx::query(
            // language=postgresql
            r#"
            UPDATE books
            SET title = $2, author = $3, cover = $4, inventory = $5, daily_fee = $6
            WHERE id = $1
            "#,
        )
        .bind(book.id().as_ref())
        .bind(book.title().as_ref())
        .bind(book.author().as_ref())
        .bind(book.cover().to_string())
        .bind(book.inventory().as_ref())
        .bind(book.daily_fee().as_ref())
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }

    async fn delete(con: &mut PgConnection, id: &BookId) -> error_stack::Result<(), KernelError> {
        sqlx::query(
            // language=postgresql
            r#"
            DELETE FROM books
            WHERE id = $1
            "#,
        )
        .bind(id.as_ref())
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }

    async fn reserve(con: &mut PgConnection, id: &BookId) -> error_stack::Result<(), KernelError> {
        let result = sqlx::query(
            // language=postgresql
            r#"
            UPDATE books
            SET inventory = inventory - 1
            WHERE id = $1 AND inventory > 0
            "#,
        )
        .bind(id.as_ref())
        .execute(con)
        .await
        .convert_error()?;
        if result.rows_affected() == 0 {
            return Err(Report::new(KernelError::Validation(
                ValidationError::InventoryExhausted,
            ))
            .attach_printable(format!("Book({}) has no copies left", id.as_ref())));
        }
        Ok(())
    }

    async fn release(con: &mut PgConnection, id: &BookId) -> error_stack::Result<(), KernelError> {
        sqlx::query(
            // language=postgresql
            r#"
            UPDATE books
            SET inventory = inventory + 1
            WHERE id = $1
            "#,
        )
        .bind(id.as_ref())
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }
}
