use derive_more::{AsRef, From, Into};

#[derive(Debug, Clone, Eq, PartialEq, Hash, From, Into, AsRef)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }
}
