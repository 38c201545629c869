use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use error_stack::Report;
use time::Date;
use uuid::Uuid;

use kernel::interface::database::{DatabaseConnection, Transaction};
use kernel::interface::notify::{DependOnNotifier, Notifier};
use kernel::interface::query::{
    AuthQuery, BookQuery, BorrowingQuery, DependOnAuthQuery, DependOnBookQuery,
    DependOnBorrowingQuery, DependOnUserQuery, UserQuery,
};
use kernel::interface::update::{
    BookModifier, BorrowingModifier, DependOnBookModifier, DependOnBorrowingModifier,
    DependOnInventoryModifier, InventoryModifier,
};
use kernel::prelude::entity::{
    AccessToken, Book, BookAuthor, BookCover, BookId, BookInventory, BookTitle, BorrowDate,
    Borrowing, BorrowingId, DailyFee, ExpectedReturnDate, PageLimit, PageOffset, ReturnedDate,
    User, UserId, UserName,
};
use kernel::{KernelError, ValidationError};

type Shared<T> = Arc<Mutex<T>>;

/// Shared map handles standing in for a database session.
#[derive(Debug, Clone, Default)]
pub struct InMemoryConnection {
    books: Shared<HashMap<Uuid, Book>>,
    users: Shared<HashMap<Uuid, User>>,
    borrowings: Shared<HashMap<Uuid, Borrowing>>,
    tokens: Shared<HashMap<String, Uuid>>,
}

#[async_trait::async_trait]
impl Transaction for InMemoryConnection {
    async fn commit(self) -> error_stack::Result<(), KernelError> {
        Ok(())
    }

    async fn roll_back(self) -> error_stack::Result<(), KernelError> {
        Ok(())
    }
}

pub struct InMemoryRepository;

#[async_trait::async_trait]
impl BookQuery<InMemoryConnection> for InMemoryRepository {
    async fn find_by_id(
        &self,
        con: &mut InMemoryConnection,
        id: &BookId,
    ) -> error_stack::Result<Option<Book>, KernelError> {
        Ok(con.books.lock().unwrap().get(id.as_ref()).cloned())
    }

    async fn find_all(
        &self,
        con: &mut InMemoryConnection,
        limit: &PageLimit,
        offset: &PageOffset,
    ) -> error_stack::Result<Vec<Book>, KernelError> {
        let mut all = con
            .books
            .lock()
            .unwrap()
            .values()
            .cloned()
            .collect::<Vec<_>>();
        all.sort_by_key(|book| book.title().as_ref().to_string());
        Ok(all
            .into_iter()
            .skip(page(offset.as_ref()))
            .take(page(limit.as_ref()))
            .collect())
    }
}

#[async_trait::async_trait]
impl BorrowingQuery<InMemoryConnection> for InMemoryRepository {
    async fn find_by_id(
        &self,
        con: &mut InMemoryConnection,
        id: &BorrowingId,
    ) -> error_stack::Result<Option<Borrowing>, KernelError> {
        Ok(con.borrowings.lock().unwrap().get(id.as_ref()).cloned())
    }

    async fn find_filtered(
        &self,
        con: &mut InMemoryConnection,
        user_id: Option<&UserId>,
        is_active: Option<bool>,
        limit: &PageLimit,
        offset: &PageOffset,
    ) -> error_stack::Result<Vec<Borrowing>, KernelError> {
        let mut hits = con
            .borrowings
            .lock()
            .unwrap()
            .values()
            .filter(|borrowing| user_id.map_or(true, |scope| borrowing.user_id() == scope))
            .filter(|borrowing| is_active.map_or(true, |active| borrowing.is_active() == active))
            .cloned()
            .collect::<Vec<_>>();
        hits.sort_by_key(|borrowing| {
            (
                std::cmp::Reverse(*borrowing.borrow_date().as_ref()),
                *borrowing.id().as_ref(),
            )
        });
        Ok(hits
            .into_iter()
            .skip(page(offset.as_ref()))
            .take(page(limit.as_ref()))
            .collect())
    }

    async fn find_due(
        &self,
        con: &mut InMemoryConnection,
        cutoff: &ExpectedReturnDate,
    ) -> error_stack::Result<Vec<Borrowing>, KernelError> {
        let mut due = con
            .borrowings
            .lock()
            .unwrap()
            .values()
            .filter(|borrowing| borrowing.is_active())
            .filter(|borrowing| borrowing.expected_return_date().as_ref() <= cutoff.as_ref())
            .cloned()
            .collect::<Vec<_>>();
        due.sort_by_key(|borrowing| *borrowing.expected_return_date().as_ref());
        Ok(due)
    }
}

#[async_trait::async_trait]
impl UserQuery<InMemoryConnection> for InMemoryRepository {
    async fn find_by_id(
        &self,
        con: &mut InMemoryConnection,
        id: &UserId,
    ) -> error_stack::Result<Option<User>, KernelError> {
        Ok(con.users.lock().unwrap().get(id.as_ref()).cloned())
    }
}

#[async_trait::async_trait]
impl AuthQuery<InMemoryConnection> for InMemoryRepository {
    async fn find_user_by_token(
        &self,
        con: &mut InMemoryConnection,
        token: &AccessToken,
    ) -> error_stack::Result<Option<UserId>, KernelError> {
        Ok(con
            .tokens
            .lock()
            .unwrap()
            .get(token.as_ref())
            .map(|id| UserId::new(*id)))
    }
}

#[async_trait::async_trait]
impl BookModifier<InMemoryConnection> for InMemoryRepository {
    async fn create(
        &self,
        con: &mut InMemoryConnection,
        book: &Book,
    ) -> error_stack::Result<(), KernelError> {
        con.books
            .lock()
            .unwrap()
            .insert(*book.id().as_ref(), book.clone());
        Ok(())
    }

    async fn update(
        &self,
        con: &mut InMemoryConnection,
        book: &Book,
    ) -> error_stack::Result<(), KernelError> {
        con.books
            .lock()
            .unwrap()
            .insert(*book.id().as_ref(), book.clone());
        Ok(())
    }

    async fn delete(
        &self,
        con: &mut InMemoryConnection,
        id: &BookId,
    ) -> error_stack::Result<(), KernelError> {
        con.books.lock().unwrap().remove(id.as_ref());
        Ok(())
    }
}

#[async_trait::async_trait]
impl BorrowingModifier<InMemoryConnection> for InMemoryRepository {
    async fn create(
        &self,
        con: &mut InMemoryConnection,
        borrowing: &Borrowing,
    ) -> error_stack::Result<(), KernelError> {
        con.borrowings
            .lock()
            .unwrap()
            .insert(*borrowing.id().as_ref(), borrowing.clone());
        Ok(())
    }

    async fn update(
        &self,
        con: &mut InMemoryConnection,
        borrowing: &Borrowing,
    ) -> error_stack::Result<(), KernelError> {
        con.borrowings
            .lock()
            .unwrap()
            .insert(*borrowing.id().as_ref(), borrowing.clone());
        Ok(())
    }
}

#[async_trait::async_trait]
impl InventoryModifier<InMemoryConnection> for InMemoryRepository {
    async fn reserve(
        &self,
        con: &mut InMemoryConnection,
        id: &BookId,
    ) -> error_stack::Result<(), KernelError> {
        let mut books = con.books.lock().unwrap();
        let book = books.get(id.as_ref()).cloned().ok_or_else(|| {
            Report::new(KernelError::NotFound)
                .attach_printable(format!("Book({}) is not found", id.as_ref()))
        })?;
        if book.inventory().is_exhausted() {
            return Err(Report::new(KernelError::Validation(
                ValidationError::InventoryExhausted,
            )));
        }
        let current = i32::from(book.inventory().clone());
        let updated = book.reconstruct(|b| b.inventory = BookInventory::new(current - 1));
        books.insert(*updated.id().as_ref(), updated);
        Ok(())
    }

    async fn release(
        &self,
        con: &mut InMemoryConnection,
        id: &BookId,
    ) -> error_stack::Result<(), KernelError> {
        let mut books = con.books.lock().unwrap();
        let book = books.get(id.as_ref()).cloned().ok_or_else(|| {
            Report::new(KernelError::NotFound)
                .attach_printable(format!("Book({}) is not found", id.as_ref()))
        })?;
        let current = i32::from(book.inventory().clone());
        let updated = book.reconstruct(|b| b.inventory = BookInventory::new(current + 1));
        books.insert(*updated.id().as_ref(), updated);
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<String>>,
}

#[async_trait::async_trait]
impl Notifier for RecordingNotifier {
    async fn send(&self, message: &str) -> error_stack::Result<(), KernelError> {
        self.sent.lock().unwrap().push(message.to_string());
        Ok(())
    }
}

#[derive(Default)]
pub struct TestHandler {
    store: InMemoryConnection,
    notifier: RecordingNotifier,
}

impl TestHandler {
    pub fn seed_book(&self, title: &str, inventory: i32) -> Uuid {
        let id = Uuid::new_v4();
        let book = Book::new(
            BookId::new(id),
            BookTitle::new(title),
            BookAuthor::new("Unknown"),
            BookCover::Soft,
            BookInventory::new(inventory),
            DailyFee::new(100),
        );
        self.store.books.lock().unwrap().insert(id, book);
        id
    }

    pub fn seed_user(&self, name: &str, is_staff: bool) -> Uuid {
        let id = Uuid::new_v4();
        let user = User::new(UserId::new(id), UserName::new(name), is_staff);
        self.store.users.lock().unwrap().insert(id, user);
        id
    }

    pub fn seed_token(&self, token: &str, user_id: Uuid) {
        self.store
            .tokens
            .lock()
            .unwrap()
            .insert(token.to_string(), user_id);
    }

    pub fn seed_borrowing(
        &self,
        book_id: Uuid,
        user_id: Uuid,
        borrow_date: Date,
        expected_return_date: Date,
    ) -> Uuid {
        let id = Uuid::new_v4();
        let borrowing = Borrowing::new(
            BorrowingId::new(id),
            BorrowDate::new(borrow_date),
            ExpectedReturnDate::new(expected_return_date),
            None,
            BookId::new(book_id),
            UserId::new(user_id),
            true,
        );
        self.store.borrowings.lock().unwrap().insert(id, borrowing);
        id
    }

    pub fn close_borrowing(&self, id: Uuid, returned_date: Date) {
        let mut borrowings = self.store.borrowings.lock().unwrap();
        let closed = borrowings
            .remove(&id)
            .unwrap()
            .close(ReturnedDate::new(returned_date))
            .unwrap();
        borrowings.insert(id, closed);
    }

    pub fn inventory_of(&self, id: Uuid) -> i32 {
        i32::from(
            self.store
                .books
                .lock()
                .unwrap()
                .get(&id)
                .unwrap()
                .inventory()
                .clone(),
        )
    }

    pub fn sent_messages(&self) -> Vec<String> {
        self.notifier.sent.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl DatabaseConnection<InMemoryConnection> for TestHandler {
    async fn transact(&self) -> error_stack::Result<InMemoryConnection, KernelError> {
        Ok(self.store.clone())
    }
}

impl DependOnBookQuery<InMemoryConnection> for TestHandler {
    type BookQuery = InMemoryRepository;
    fn book_query(&self) -> &Self::BookQuery {
        &InMemoryRepository
    }
}

impl DependOnBorrowingQuery<InMemoryConnection> for TestHandler {
    type BorrowingQuery = InMemoryRepository;
    fn borrowing_query(&self) -> &Self::BorrowingQuery {
        &InMemoryRepository
    }
}

impl DependOnUserQuery<InMemoryConnection> for TestHandler {
    type UserQuery = InMemoryRepository;
    fn user_query(&self) -> &Self::UserQuery {
        &InMemoryRepository
    }
}

impl DependOnAuthQuery<InMemoryConnection> for TestHandler {
    type AuthQuery = InMemoryRepository;
    fn auth_query(&self) -> &Self::AuthQuery {
        &InMemoryRepository
    }
}

impl DependOnBookModifier<InMemoryConnection> for TestHandler {
    type BookModifier = InMemoryRepository;
    fn book_modifier(&self) -> &Self::BookModifier {
        &InMemoryRepository
    }
}

impl DependOnBorrowingModifier<InMemoryConnection> for TestHandler {
    type BorrowingModifier = InMemoryRepository;
    fn borrowing_modifier(&self) -> &Self::BorrowingModifier {
        &InMemoryRepository
    }
}

impl DependOnInventoryModifier<InMemoryConnection> for TestHandler {
    type InventoryModifier = InMemoryRepository;
    fn inventory_modifier(&self) -> &Self::InventoryModifier {
        &InMemoryRepository
    }
}

impl DependOnNotifier for TestHandler {
    type Notifier = RecordingNotifier;
    fn notifier(&self) -> &Self::Notifier {
        &self.notifier
    }
}

fn page(value: &i32) -> usize {
    usize::try_from(*value).unwrap_or_default()
}
