use sqlx::PgConnection;
use time::Date;
use uuid::Uuid;

use kernel::interface::query::BorrowingQuery;
use kernel::interface::update::BorrowingModifier;
use kernel::prelude::entity::{
    BookId, BorrowDate, Borrowing, BorrowingId, ExpectedReturnDate, PageLimit, PageOffset,
    ReturnedDate, UserId,
};
use kernel::KernelError;

use crate::database::postgres::PostgresConnection;
use crate::error::ConvertError;

pub struct PostgresBorrowingRepository;

#[async_trait::async_trait]
impl BorrowingQuery<PostgresConnection> for PostgresBorrowingRepository {
    async fn find_by_id(
        &self,
        con: &mut PostgresConnection,
        id: &BorrowingId,
    ) -> error_stack::Result<Option<Borrowing>, KernelError> {
        PgBorrowingInternal::find_by_id(con, id).await
    }

    async fn find_filtered(
        &self,
        con: &mut PostgresConnection,
        user_id: Option<&UserId>,
        is_active: Option<bool>,
        limit: &PageLimit,
        offset: &PageOffset,
    ) -> error_stack::Result<Vec<Borrowing>, KernelError> {
        PgBorrowingInternal::find_filtered(con, user_id, is_active, limit, offset).await
    }

    async fn find_due(
        &self,
        con: &mut PostgresConnection,
        cutoff: &ExpectedReturnDate,
    ) -> error_stack::Result<Vec<Borrowing>, KernelError> {
        PgBorrowingInternal::find_due(con, cutoff).await
    }
}

#[async_trait::async_trait]
impl BorrowingModifier<PostgresConnection> for PostgresBorrowingRepository {
    async fn create(
        &self,
        con: &mut PostgresConnection,
        borrowing: &Borrowing,
    ) -> error_stack::Result<(), KernelError> {
        PgBorrowingInternal::create(con, borrowing).await
    }

    async fn update(
        &self,
        con: &mut PostgresConnection,
        borrowing: &Borrowing,
    ) -> error_stack::Result<(), KernelError> {
        PgBorrowingInternal::update(con, borrowing).await
    }
}

#[derive(sqlx::FromRow)]
struct BorrowingRow {
    id: Uuid,
    borrow_date: Date,
    expected_return_date: Date,
    actual_return_date: Option<Date>,
    book_id: Uuid,
    user_id: Uuid,
    is_active: bool,
}

impl From<BorrowingRow> for Borrowing {
    fn from(value: BorrowingRow) -> Self {
        Borrowing::new(
            BorrowingId::new(value.id),
            BorrowDate::new(value.borrow_date),
            ExpectedReturnDate::new(value.expected_return_date),
            value.actual_return_date.map(ReturnedDate::new),
            BookId::new(value.book_id),
            UserId::new(value.user_id),
            value.is_active,
        )
    }
}

pub(in crate::database) struct PgBorrowingInternal;

impl PgBorrowingInternal {
    async fn find_by_id(
        con: &mut PgConnection,
        id: &BorrowingId,
    ) -> error_stack::Result<Option<Borrowing>, KernelError> {
        let row = sqlx::query_as::<_, BorrowingRow>(
            // language=postgresql
            r#"
            SELECT id, borrow_date, expected_return_date, actual_return_date,
                   book_id, user_id, is_active
            FROM borrowings
            WHERE id = $1
            "#,
        )
        .bind(id.as_ref())
        .fetch_optional(con)
        .await
        .convert_error()?;
        Ok(row.map(Borrowing::from))
    }

    async fn find_filtered(
        con: &mut PgConnection,
        user_id: Option<&UserId>,
        is_active: Option<bool>,
        limit: &PageLimit,
        offset: &PageOffset,
    ) -> error_stack::Result<Vec<Borrowing>, KernelError> {
        let rows = sqlx::query_as::<_, BorrowingRow>(
            // language=postgresql
            r#"
            SELECT id, borrow_date, expected_return_date, actual_return_date,
                   book_id, user_id, is_active
            FROM borrowings
            WHERE ($1::uuid IS NULL OR user_id = $1)
              AND ($2::boolean IS NULL OR is_active = $2)
            ORDER BY borrow_date DESC, id
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(user_id.map(|id| id.as_ref()))
        .bind(is_active)
        .bind(i64::from(*limit.as_ref()))
        .bind(i64::from(*offset.as_ref()))
        .fetch_all(con)
        .await
        .convert_error()?;
        Ok(rows.into_iter().map(Borrowing::from).collect())
    }

    async fn find_due(
        con: &mut PgConnection,
        cutoff: &ExpectedReturnDate,
    ) -> error_stack::Result<Vec<Borrowing>, KernelError> {
        let rows = sqlx::query_as::<_, BorrowingRow>(
            // language=postgresql
            r#"
            SELECT id, borrow_date, expected_return_date, actual_return_date,
                   book_id, user_id, is_active
            FROM borrowings
            WHERE is_active AND expected_return_date <= $1
            ORDER BY expected_return_date
            "#,
        )
        .bind(cutoff.as_ref())
        .fetch_all(con)
        .await
        .convert_error()?;
        Ok(rows.into_iter().map(Borrowing::from).collect())
    }

    async fn create(
        con: &mut PgConnection,
        borrowing: &Borrowing,
    ) -> error_stack::Result<(), KernelError> {
        sqlx::query(
            // language=postgresql
            r#"
            INSERT INTO borrowings (id, borrow_date, expected_return_date, actual_return_date,
                                    book_id, user_id, is_active)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(borrowing.id().as_ref())
        .bind(borrowing.borrow_date().as_ref())
        .bind(borrowing.expected_return_date().as_ref())
        .bind(borrowing.returned_date().map(|date| date.as_ref()))
        .bind(borrowing.book_id().as_ref())
        .bind(borrowing.user_id().as_ref())
        .bind(borrowing.is_active())
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }

    async fn update(
        con: &mut PgConnection,
        borrowing: &Borrowing,
    ) -> error_stack::Result<(), KernelError> {
        sqlx::query(
            // language=postgresql
            r#"
            UPDATE borrowings
            SET actual_return_date = $2, is_active = $3
            WHERE id = $1
            "#,
        )
        .bind(borrowing.id().as_ref())
        .bind(borrowing.returned_date().map(|date| date.as_ref()))
        .bind(borrowing.is_active())
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use time::macros::date;
    use uuid::Uuid;

    use kernel::interface::database::DatabaseConnection;
    use kernel::interface::query::BorrowingQuery;
    use kernel::interface::update::BorrowingModifier;
    use kernel::prelude::entity::{
        BookId, BorrowDate, Borrowing, BorrowingId, ExpectedReturnDate, PageLimit, PageOffset,
        ReturnedDate, UserId,
    };
    use kernel::KernelError;

    use crate::database::postgres::borrowing::PostgresBorrowingRepository;
    use crate::database::postgres::{PostgresConnection, PostgresDatabase};
    use crate::error::ConvertError;

    async fn seed_user(con: &mut PostgresConnection, id: &UserId) -> error_stack::Result<(), KernelError> {
        sqlx::query(
            // language=postgresql
            r#"
            INSERT INTO users (id, name, is_staff)
            VALUES ($1, $2, FALSE)
            "#,
        )
        .bind(id.as_ref())
        .bind("borrower")
        .execute(&mut **con)
        .await
        .convert_error()?;
        Ok(())
    }

    async fn seed_book(con: &mut PostgresConnection, id: &BookId) -> error_stack::Result<(), KernelError> {
        sqlx::query(
            // language=postgresql
            r#"
            INSERT INTO books (id, title, author, cover, inventory, daily_fee)
            VALUES ($1, $2, 'seed author', 'SOFT', 3, 100)
            "#,
        )
        .bind(id.as_ref())
        .bind(format!("seed-{}", Uuid::new_v4()))
        .execute(&mut **con)
        .await
        .convert_error()?;
        Ok(())
    }

    fn active_borrowing(book_id: &BookId, user_id: &UserId) -> Borrowing {
        Borrowing::new(
            BorrowingId::new(Uuid::new_v4()),
            BorrowDate::new(date!(2024 - 03 - 01)),
            ExpectedReturnDate::new(date!(2024 - 03 - 08)),
            None,
            book_id.clone(),
            user_id.clone(),
            true,
        )
    }

    #[test_with::env(POSTGRES_TEST)]
    #[tokio::test]
    async fn round_trip() -> error_stack::Result<(), KernelError> {
        let db = PostgresDatabase::new().await?;
        let mut con = db.transact().await?;
        let book_id = BookId::new(Uuid::new_v4());
        let user_id = UserId::new(Uuid::new_v4());
        seed_book(&mut con, &book_id).await?;
        seed_user(&mut con, &user_id).await?;

        let borrowing = active_borrowing(&book_id, &user_id);
        PostgresBorrowingRepository
            .create(&mut con, &borrowing)
            .await?;

        let found = PostgresBorrowingRepository
            .find_by_id(&mut con, borrowing.id())
            .await?;
        assert_eq!(found, Some(borrowing.clone()));

        let closed = borrowing.close(ReturnedDate::new(date!(2024 - 03 - 05)))?;
        PostgresBorrowingRepository.update(&mut con, &closed).await?;

        let found = PostgresBorrowingRepository
            .find_by_id(&mut con, closed.id())
            .await?;
        assert_eq!(found, Some(closed));

        Ok(())
    }

    #[test_with::env(POSTGRES_TEST)]
    #[tokio::test]
    async fn filters_apply() -> error_stack::Result<(), KernelError> {
        let db = PostgresDatabase::new().await?;
        let mut con = db.transact().await?;
        let book_id = BookId::new(Uuid::new_v4());
        let first_user = UserId::new(Uuid::new_v4());
        let second_user = UserId::new(Uuid::new_v4());
        seed_book(&mut con, &book_id).await?;
        seed_user(&mut con, &first_user).await?;
        seed_user(&mut con, &second_user).await?;

        let open = active_borrowing(&book_id, &first_user);
        PostgresBorrowingRepository.create(&mut con, &open).await?;
        let closed = active_borrowing(&book_id, &second_user)
            .close(ReturnedDate::new(date!(2024 - 03 - 05)))?;
        PostgresBorrowingRepository.create(&mut con, &closed).await?;

        let limit = PageLimit::new(30);
        let offset = PageOffset::new(0);
        let of_first = PostgresBorrowingRepository
            .find_filtered(&mut con, Some(&first_user), None, &limit, &offset)
            .await?;
        assert_eq!(of_first.len(), 1);
        assert_eq!(of_first[0].id(), open.id());

        let active_of_second = PostgresBorrowingRepository
            .find_filtered(&mut con, Some(&second_user), Some(true), &limit, &offset)
            .await?;
        assert!(active_of_second.is_empty());

        let closed_of_second = PostgresBorrowingRepository
            .find_filtered(&mut con, Some(&second_user), Some(false), &limit, &offset)
            .await?;
        assert_eq!(closed_of_second.len(), 1);

        Ok(())
    }

    #[test_with::env(POSTGRES_TEST)]
    #[tokio::test]
    async fn due_scan_skips_closed_rows() -> error_stack::Result<(), KernelError> {
        let db = PostgresDatabase::new().await?;
        let mut con = db.transact().await?;
        let book_id = BookId::new(Uuid::new_v4());
        let user_id = UserId::new(Uuid::new_v4());
        seed_book(&mut con, &book_id).await?;
        seed_user(&mut con, &user_id).await?;

        let open = active_borrowing(&book_id, &user_id);
        PostgresBorrowingRepository.create(&mut con, &open).await?;
        let closed = active_borrowing(&book_id, &user_id)
            .close(ReturnedDate::new(date!(2024 - 03 - 05)))?;
        PostgresBorrowingRepository.create(&mut con, &closed).await?;

        let due = PostgresBorrowingRepository
            .find_due(&mut con, &ExpectedReturnDate::new(date!(2024 - 03 - 09)))
            .await?;
        assert!(due.iter().any(|hit| hit.id() == open.id()));
        assert!(due.iter().all(|hit| hit.id() != closed.id()));

        let not_due = PostgresBorrowingRepository
            .find_due(&mut con, &ExpectedReturnDate::new(date!(2024 - 02 - 28)))
            .await?;
        assert!(not_due.iter().all(|hit| hit.id() != open.id()));

        Ok(())
    }
}
