use derive_more::{AsRef, From, Into};
use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

#[derive(Debug, Clone, Eq, PartialEq, Hash, From, Into, AsRef, Serialize, Deserialize)]
pub struct BorrowDate(Date);

impl BorrowDate {
    pub fn new(date: impl Into<Date>) -> Self {
        Self(date.into())
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Hash, From, Into, AsRef, Serialize, Deserialize)]
pub struct ExpectedReturnDate(Date);

impl ExpectedReturnDate {
    pub fn new(date: impl Into<Date>) -> Self {
        Self(date.into())
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Hash, From, Into, AsRef, Serialize, Deserialize)]
pub struct ReturnedDate(Date);

impl ReturnedDate {
    pub fn new(date: impl Into<Date>) -> Self {
        Self(date.into())
    }

    pub fn today() -> Self {
        Self(OffsetDateTime::now_utc().date())
    }
}
