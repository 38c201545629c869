mod book;
mod borrowing;
mod common;
mod user;

pub use self::{book::*, borrowing::*, common::*, user::*};
