use uuid::Uuid;

use kernel::prelude::entity::{Book, BookCover, DailyFee, DestructBook};

#[derive(Debug, Clone)]
pub struct BookDto {
    pub id: Uuid,
    pub title: String,
    pub author: String,
    pub cover: BookCover,
    pub inventory: i32,
    pub daily_fee: DailyFee,
}

impl From<Book> for BookDto {
    fn from(value: Book) -> Self {
        let DestructBook {
            id,
            title,
            author,
            cover,
            inventory,
            daily_fee,
        } = value.into_destruct();
        Self {
            id: id.into(),
            title: title.into(),
            author: author.into(),
            cover,
            inventory: inventory.into(),
            daily_fee,
        }
    }
}

pub struct GetBookDto {
    pub id: Uuid,
}

pub struct GetAllBookDto {
    pub limit: i32,
    pub offset: i32,
}

pub struct CreateBookDto {
    pub title: String,
    pub author: String,
    pub cover: BookCover,
    pub inventory: i32,
    pub daily_fee: DailyFee,
}

pub struct UpdateBookDto {
    pub id: Uuid,
    pub title: Option<String>,
    pub author: Option<String>,
    pub cover: Option<BookCover>,
    pub inventory: Option<i32>,
    pub daily_fee: Option<DailyFee>,
}

pub struct DeleteBookDto {
    pub id: Uuid,
}
