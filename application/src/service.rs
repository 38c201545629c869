mod auth;
mod book;
mod borrowing;
mod overdue;

pub use self::{auth::*, book::*, borrowing::*, overdue::*};

#[cfg(test)]
mod testing;
