//! 命令记录领域层（commander-domain）
//!
//! 提供命令记录的实体模型与持久化端口：
//! - 实体（`entity`）：`Command` 及其标识约定
//! - 持久化（`persist`）：仓储 trait、按请求开启仓储的存储 trait，以及内存/Postgres 实现
//! - 错误（`error`）：`DomainError` 与 `DomainResult`
//!
//! 本 crate 与传输层解耦，仅定义领域层接口与最小必要的错误类型，
//! 具体存储后端通过 `CommandStore` 注入。
//!
pub mod entity;
pub mod error;
pub mod persist;
