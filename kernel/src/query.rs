mod auth;
mod book;
mod borrowing;
mod user;

pub use self::{auth::*, book::*, borrowing::*, user::*};
