use uuid::Uuid;

use kernel::prelude::entity::{AccessPolicy, DestructUser, User};

#[derive(Debug, Clone)]
pub struct AuthorizedUserDto {
    pub id: Uuid,
    pub name: String,
    pub policy: AccessPolicy,
}

impl From<User> for AuthorizedUserDto {
    fn from(value: User) -> Self {
        let policy = AccessPolicy::new(value.id().clone(), value.is_staff());
        let DestructUser { id, name, .. } = value.into_destruct();
        Self {
            id: id.into(),
            name: name.into(),
            policy,
        }
    }
}
