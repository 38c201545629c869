use std::ops::Deref;
use std::sync::Arc;

use driver::database::{
    PostgresBookRepository, PostgresBorrowingRepository, PostgresConnection, PostgresDatabase,
    PostgresUserRepository, RedisAuthRepository, RedisConnection, RedisDatabase,
};
use driver::notify::TelegramNotifier;
use kernel::interface::database::DatabaseConnection;
use kernel::interface::notify::DependOnNotifier;
use kernel::interface::query::{
    DependOnAuthQuery, DependOnBookQuery, DependOnBorrowingQuery, DependOnUserQuery,
};
use kernel::interface::update::{
    DependOnBookModifier, DependOnBorrowingModifier, DependOnInventoryModifier,
};
use kernel::KernelError;

#[derive(Clone)]
pub struct AppModule(Arc<Handler>);

impl AppModule {
    pub async fn new() -> error_stack::Result<Self, KernelError> {
        Ok(Self(Arc::new(Handler::init().await?)))
    }
}

impl Deref for AppModule {
    type Target = Handler;
    fn deref(&self) -> &Self::Target {
        Deref::deref(&self.0)
    }
}

pub struct Handler {
    pgpool: PostgresDatabase,
    kvpool: RedisDatabase,
    notifier: TelegramNotifier,
}

impl Handler {
    pub async fn init() -> error_stack::Result<Self, KernelError> {
        let pgpool = PostgresDatabase::new().await?;
        let kvpool = RedisDatabase::new()?;
        let notifier = TelegramNotifier::new()?;

        Ok(Self {
            pgpool,
            kvpool,
            notifier,
        })
    }
}

#[async_trait::async_trait]
impl DatabaseConnection<PostgresConnection> for Handler {
    async fn transact(&self) -> error_stack::Result<PostgresConnection, KernelError> {
        self.pgpool.transact().await
    }
}

#[async_trait::async_trait]
impl DatabaseConnection<RedisConnection> for Handler {
    async fn transact(&self) -> error_stack::Result<RedisConnection, KernelError> {
        self.kvpool.transact().await
    }
}

impl DependOnBookQuery<PostgresConnection> for Handler {
    type BookQuery = PostgresBookRepository;

    fn book_query(&self) -> &Self::BookQuery {
        &PostgresBookRepository
    }
}

impl DependOnBorrowingQuery<PostgresConnection> for Handler {
    type BorrowingQuery = PostgresBorrowingRepository;

    fn borrowing_query(&self) -> &Self::BorrowingQuery {
        &PostgresBorrowingRepository
    }
}

impl DependOnUserQuery<PostgresConnection> for Handler {
    type UserQuery = PostgresUserRepository;

    fn user_query(&self) -> &Self::UserQuery {
        &PostgresUserRepository
    }
}

impl DependOnAuthQuery<RedisConnection> for Handler {
    type AuthQuery = RedisAuthRepository;

    fn auth_query(&self) -> &Self::AuthQuery {
        &RedisAuthRepository
    }
}

impl DependOnBookModifier<PostgresConnection> for Handler {
    type BookModifier = PostgresBookRepository;

    fn book_modifier(&self) -> &Self::BookModifier {
        &PostgresBookRepository
    }
}

impl DependOnBorrowingModifier<PostgresConnection> for Handler {
    type BorrowingModifier = PostgresBorrowingRepository;

    fn borrowing_modifier(&self) -> &Self::BorrowingModifier {
        &PostgresBorrowingRepository
    }
}

impl DependOnInventoryModifier<PostgresConnection> for Handler {
    type InventoryModifier = PostgresBookRepository;

    fn inventory_modifier(&self) -> &Self::InventoryModifier {
        &PostgresBookRepository
    }
}

impl DependOnNotifier for Handler {
    type Notifier = TelegramNotifier;

    fn notifier(&self) -> &Self::Notifier {
        &self.notifier
    }
}
