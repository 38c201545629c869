use time::{Duration, OffsetDateTime};

use kernel::interface::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use kernel::interface::notify::{DependOnNotifier, Notifier};
use kernel::interface::query::{
    BookQuery, BorrowingQuery, DependOnBookQuery, DependOnBorrowingQuery, DependOnUserQuery,
    UserQuery,
};
use kernel::prelude::entity::ExpectedReturnDate;
use kernel::KernelError;

use crate::transfer::NotifyOverdueDto;

#[async_trait::async_trait]
pub trait NotifyOverdueService<Connection: Transaction + Send>:
    'static
    + Sync
    + Send
    + DependOnDatabaseConnection<Connection>
    + DependOnBorrowingQuery<Connection>
    + DependOnBookQuery<Connection>
    + DependOnUserQuery<Connection>
    + DependOnNotifier
{
    /// Reports every active borrowing whose expected return date falls within
    /// the lookahead window and returns the number of reports sent.
    async fn notify_overdue_borrowings(
        &self,
        dto: NotifyOverdueDto,
    ) -> error_stack::Result<usize, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let cutoff = OffsetDateTime::now_utc().date() + Duration::days(dto.lookahead_days);
        let due = self
            .borrowing_query()
            .find_due(&mut connection, &ExpectedReturnDate::new(cutoff))
            .await?;

        if due.is_empty() {
            self.notifier().send("No overdue borrowings today!").await?;
            return Ok(0);
        }

        let mut sent = 0;
        for borrowing in due {
            let book = self
                .book_query()
                .find_by_id(&mut connection, borrowing.book_id())
                .await?;
            let user = self
                .user_query()
                .find_by_id(&mut connection, borrowing.user_id())
                .await?;
            let (book, user) = match (book, user) {
                (Some(book), Some(user)) => (book, user),
                _ => {
                    tracing::warn!(
                        "Borrowing({}) references a missing book or user",
                        borrowing.id().as_ref()
                    );
                    continue;
                }
            };

            let message = format!(
                "Borrowing Overdue:\nUser: {}\nBook: {}\nExpected Return Date: {}",
                user.name().as_ref(),
                book.title().as_ref(),
                borrowing.expected_return_date().as_ref()
            );
            match self.notifier().send(&message).await {
                Ok(()) => sent += 1,
                Err(report) => tracing::warn!("Failed to send notification: {report:?}"),
            }
        }

        Ok(sent)
    }
}

impl<Connection: Transaction + Send, T> NotifyOverdueService<Connection> for T where
    T: DependOnDatabaseConnection<Connection>
        + DependOnBorrowingQuery<Connection>
        + DependOnBookQuery<Connection>
        + DependOnUserQuery<Connection>
        + DependOnNotifier
{
}

#[cfg(test)]
mod test {
    use time::{Duration, OffsetDateTime};

    use crate::service::testing::TestHandler;
    use crate::service::NotifyOverdueService;
    use crate::transfer::NotifyOverdueDto;

    #[tokio::test]
    async fn due_borrowings_are_reported() {
        let handler = TestHandler::default();
        let book_id = handler.seed_book("Dune", 5);
        let user_id = handler.seed_user("paul", false);
        let today = OffsetDateTime::now_utc().date();
        handler.seed_borrowing(book_id, user_id, today - Duration::days(10), today - Duration::days(3));
        handler.seed_borrowing(book_id, user_id, today, today + Duration::days(10));

        let sent = handler
            .notify_overdue_borrowings(NotifyOverdueDto { lookahead_days: 1 })
            .await
            .unwrap();

        assert_eq!(sent, 1);
        let messages = handler.sent_messages();
        assert_eq!(messages.len(), 1);
        assert_eq!(
            messages[0],
            format!(
                "Borrowing Overdue:\nUser: paul\nBook: Dune\nExpected Return Date: {}",
                today - Duration::days(3)
            )
        );
    }

    #[tokio::test]
    async fn due_tomorrow_is_included_while_returned_is_not() {
        let handler = TestHandler::default();
        let book_id = handler.seed_book("Dune", 5);
        let user_id = handler.seed_user("paul", false);
        let today = OffsetDateTime::now_utc().date();
        handler.seed_borrowing(book_id, user_id, today, today + Duration::days(1));
        let returned =
            handler.seed_borrowing(book_id, user_id, today - Duration::days(10), today - Duration::days(3));
        handler.close_borrowing(returned, today - Duration::days(2));

        let sent = handler
            .notify_overdue_borrowings(NotifyOverdueDto { lookahead_days: 1 })
            .await
            .unwrap();

        assert_eq!(sent, 1);
        let messages = handler.sent_messages();
        assert_eq!(messages.len(), 1);
        assert_eq!(
            messages[0],
            format!(
                "Borrowing Overdue:\nUser: paul\nBook: Dune\nExpected Return Date: {}",
                today + Duration::days(1)
            )
        );
    }

    #[tokio::test]
    async fn quiet_day_sends_a_single_summary() {
        let handler = TestHandler::default();
        let book_id = handler.seed_book("Dune", 5);
        let user_id = handler.seed_user("paul", false);
        let today = OffsetDateTime::now_utc().date();
        handler.seed_borrowing(book_id, user_id, today, today + Duration::days(10));

        let sent = handler
            .notify_overdue_borrowings(NotifyOverdueDto { lookahead_days: 1 })
            .await
            .unwrap();

        assert_eq!(sent, 0);
        assert_eq!(handler.sent_messages(), vec!["No overdue borrowings today!"]);
    }

    #[tokio::test]
    async fn closed_borrowings_are_ignored() {
        let handler = TestHandler::default();
        let book_id = handler.seed_book("Dune", 5);
        let user_id = handler.seed_user("paul", false);
        let today = OffsetDateTime::now_utc().date();
        let borrowing_id =
            handler.seed_borrowing(book_id, user_id, today - Duration::days(10), today - Duration::days(3));
        handler.close_borrowing(borrowing_id, today - Duration::days(2));

        let sent = handler
            .notify_overdue_borrowings(NotifyOverdueDto { lookahead_days: 1 })
            .await
            .unwrap();

        assert_eq!(sent, 0);
        assert_eq!(handler.sent_messages(), vec!["No overdue borrowings today!"]);
    }
}
