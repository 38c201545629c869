mod book;
mod borrowing;
mod inventory;

pub use self::{book::*, borrowing::*, inventory::*};
