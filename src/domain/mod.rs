//! Domain Layer - 领域层
//!
//! 包含一个限界上下文:
//! - Book Context: 选题、大纲、章节、书稿与成品
//!
//! 以及大纲解析、代码围栏清理、提示词模板等共享的纯函数

pub mod book;

mod code_fence;
mod outline_parser;
mod prompts;

pub use code_fence::strip_code_fences;
pub use outline_parser::{fallback_outline, parse_outline, OutlineParseError};
pub use prompts::{chapter_prompt, outline_prompt, proofread_prompt, SYSTEM_PROMPT};
