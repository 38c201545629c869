mod id;
mod name;
mod policy;
mod token;

pub use self::{id::*, name::*, policy::*, token::*};
use destructure::Destructure;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, Destructure)]
pub struct User {
    id: UserId,
    name: UserName,
    is_staff: bool,
}

impl User {
    pub fn new(id: UserId, name: UserName, is_staff: bool) -> Self {
        Self { id, name, is_staff }
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn name(&self) -> &UserName {
        &self.name
    }

    pub fn is_staff(&self) -> bool {
        self.is_staff
    }
}
