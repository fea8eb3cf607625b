//! 持久化（persist）
//!
//! 定义命令记录的持久化端口及其实现，支持：
//! - 按请求开启的仓储单元（`CommandStore` -> `CommandRepository`）；
//! - 暂存变更（create/update/delete）与统一提交（`commit`）分离；
//! - 内存实现（`InMemoryCommandStore`）与 Postgres 实现（`PgCommandStore`，需 `infra-sqlx` 特性）。
//!
//! 该模块聚焦协议与前置条件检查，具体存储后端由上层选择并注入。
//!
mod command_repository;
mod in_memory;
#[cfg(feature = "infra-sqlx")]
mod postgres;

pub use command_repository::{CommandRepository, CommandStore};
pub use in_memory::{InMemoryCommandRepository, InMemoryCommandStore};
#[cfg(feature = "infra-sqlx")]
pub use postgres::{PgCommandRepository, PgCommandStore};

use crate::entity::{Command, Entity};
use crate::error::{DomainError, DomainResult};

// create 只接受尚未分配标识的实体
pub(crate) fn ensure_transient(command: &Command) -> DomainResult<()> {
    if command.is_transient() {
        Ok(())
    } else {
        Err(DomainError::InvalidArgument {
            reason: format!("command {} already has an identity", command.id()),
        })
    }
}

// update/delete 只接受已持久化的实体
pub(crate) fn ensure_persisted(command: &Command) -> DomainResult<()> {
    if command.is_transient() {
        Err(DomainError::InvalidArgument {
            reason: "command has no identity".to_string(),
        })
    } else {
        Ok(())
    }
}
