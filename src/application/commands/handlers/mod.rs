//! Command Handlers 实现

mod generate_book_handler;

pub use generate_book_handler::*;
