mod auth;

use crate::env;
use crate::error::ConvertError;
use deadpool_redis::redis::RedisError;
use deadpool_redis::{Config, Connection, Pool, PoolError, Runtime};
use error_stack::{Report, ResultExt};
use kernel::interface::database::{DatabaseConnection, Transaction};
use kernel::KernelError;
use std::ops::{Deref, DerefMut};

pub use crate::database::redis::auth::*;

const REDIS_URL: &str = "REDIS_URL";

pub struct RedisDatabase {
    pool: Pool,
}

impl RedisDatabase {
    pub fn new() -> error_stack::Result<Self, KernelError> {
        let url = env(REDIS_URL)?;
        let cfg = Config::from_url(url);
        let pool = cfg
            .create_pool(Some(Runtime::Tokio1))
            .change_context_lazy(|| KernelError::Internal)?;
        Ok(Self { pool })
    }
}

impl Clone for RedisDatabase {
    fn clone(&self) -> Self {
        Self {
            pool: self.pool.clone(),
        }
    }
}

#[async_trait::async_trait]
impl DatabaseConnection<RedisConnection> for RedisDatabase {
    async fn transact(&self) -> error_stack::Result<RedisConnection, KernelError> {
        let con: Connection = self.pool.get().await.convert_error()?;
        Ok(RedisConnection(con))
    }
}

pub struct RedisConnection(Connection);

#[async_trait::async_trait]
impl Transaction for RedisConnection {
    async fn commit(self) -> error_stack::Result<(), KernelError> {
        Ok(())
    }

    async fn roll_back(self) -> error_stack::Result<(), KernelError> {
        Err(Report::new(KernelError::Internal)
            .attach_printable("roll_back is not supported in redis"))
    }
}

impl Deref for RedisConnection {
    type Target = Connection;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for RedisConnection {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<T> ConvertError for Result<T, PoolError> {
    type Ok = T;
    fn convert_error(self) -> error_stack::Result<T, KernelError> {
        self.map_err(|error| match error {
            PoolError::Timeout(_) => Report::new(error).change_context(KernelError::Timeout),
            _ => Report::new(error).change_context(KernelError::Internal),
        })
    }
}

impl<T> ConvertError for Result<T, RedisError> {
    type Ok = T;
    fn convert_error(self) -> error_stack::Result<T, KernelError> {
        self.map_err(|error| Report::new(error).change_context(KernelError::Internal))
    }
}
