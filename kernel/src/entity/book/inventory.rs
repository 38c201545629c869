use derive_more::{AsRef, From, Into};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Eq, PartialEq, Hash, From, Into, AsRef, Serialize, Deserialize)]
pub struct BookInventory(i32);

impl BookInventory {
    pub fn new(inventory: impl Into<i32>) -> Self {
        Self(inventory.into())
    }

    pub fn is_exhausted(&self) -> bool {
        self.0 <= 0
    }
}
