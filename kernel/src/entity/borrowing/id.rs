use derive_more::{AsRef, From, Into};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Eq, PartialEq, Hash, From, Into, AsRef, Serialize, Deserialize)]
pub struct BorrowingId(Uuid);

impl BorrowingId {
    pub fn new(id: impl Into<Uuid>) -> Self {
        Self(id.into())
    }
}
