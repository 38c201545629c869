mod telegram;

pub use self::telegram::*;
