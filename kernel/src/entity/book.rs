mod author;
mod cover;
mod fee;
mod id;
mod inventory;
mod title;

pub use self::{author::*, cover::*, fee::*, id::*, inventory::*, title::*};
use destructure::{Destructure, Mutation};

#[derive(Debug, Clone, Eq, PartialEq, Destructure, Mutation)]
pub struct Book {
    id: BookId,
    title: BookTitle,
    author: BookAuthor,
    cover: BookCover,
    inventory: BookInventory,
    daily_fee: DailyFee,
}

impl Book {
    pub fn new(
        id: BookId,
        title: BookTitle,
        author: BookAuthor,
        cover: BookCover,
        inventory: BookInventory,
        daily_fee: DailyFee,
    ) -> Self {
        Self {
            id,
            title,
            author,
            cover,
            inventory,
            daily_fee,
        }
    }

    pub fn id(&self) -> &BookId {
        &self.id
    }

    pub fn title(&self) -> &BookTitle {
        &self.title
    }

    pub fn author(&self) -> &BookAuthor {
        &self.author
    }

    pub fn cover(&self) -> &BookCover {
        &self.cover
    }

    pub fn inventory(&self) -> &BookInventory {
        &self.inventory
    }

    pub fn daily_fee(&self) -> &DailyFee {
        &self.daily_fee
    }
}
