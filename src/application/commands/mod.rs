//! 应用层 - 命令（写操作）
//!
//! CQRS 命令侧：目前只有生成书籍一个命令

mod book_commands;

pub mod handlers;

pub use book_commands::*;
