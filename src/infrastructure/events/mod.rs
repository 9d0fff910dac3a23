//! Events - 进度事件推送
//!
//! 把编排器产生的 ProgressEvent 通过有界通道交给 SSE 连接

mod publisher;

pub use publisher::ProgressPublisher;
