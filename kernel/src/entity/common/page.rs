use derive_more::{AsRef, From, Into};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, From, Into, AsRef, Serialize, Deserialize)]
pub struct PageLimit(i32);

impl PageLimit {
    pub fn new(value: impl Into<i32>) -> Self {
        PageLimit(value.into())
    }
}

impl Default for PageLimit {
    fn default() -> Self {
        Self::new(30)
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Hash, From, Into, AsRef, Serialize, Deserialize)]
pub struct PageOffset(i32);

impl PageOffset {
    pub fn new(value: impl Into<i32>) -> Self {
        PageOffset(value.into())
    }
}
