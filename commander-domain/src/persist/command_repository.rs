//! 命令仓储端口
//!
use crate::entity::{Command, CommandId};
use crate::error::DomainResult;
use async_trait::async_trait;
use std::sync::Arc;

/// 命令记录仓储
///
/// 变更操作（`create`/`update`/`delete`）只负责暂存，`commit` 统一落盘。
/// 读操作只观察已提交的数据。
#[async_trait]
pub trait CommandRepository: Send + Sync {
    /// 返回全部已存储的命令，按标识升序；无数据时返回空集合
    async fn get_all(&self) -> DomainResult<Vec<Command>>;

    /// 按标识查找；`None` 表示不存在
    async fn get_by_id(&self, id: CommandId) -> DomainResult<Option<Command>>;

    /// 暂存新增，并将分配的标识回写到 `command`
    ///
    /// 前置条件：`command` 为瞬态实体，否则返回 `InvalidArgument`。
    async fn create(&self, command: &mut Command) -> DomainResult<()>;

    /// 暂存对 `command.id()` 所指实体的整体替换
    async fn update(&self, command: &Command) -> DomainResult<()>;

    /// 暂存删除
    async fn delete(&self, command: &Command) -> DomainResult<()>;

    /// 提交已暂存的变更；受影响记录数非负即视为成功
    async fn commit(&self) -> DomainResult<bool>;
}

#[async_trait]
impl<T> CommandRepository for Arc<T>
where
    T: CommandRepository + ?Sized,
{
    async fn get_all(&self) -> DomainResult<Vec<Command>> {
        (**self).get_all().await
    }

    async fn get_by_id(&self, id: CommandId) -> DomainResult<Option<Command>> {
        (**self).get_by_id(id).await
    }

    async fn create(&self, command: &mut Command) -> DomainResult<()> {
        (**self).create(command).await
    }

    async fn update(&self, command: &Command) -> DomainResult<()> {
        (**self).update(command).await
    }

    async fn delete(&self, command: &Command) -> DomainResult<()> {
        (**self).delete(command).await
    }

    async fn commit(&self) -> DomainResult<bool> {
        (**self).commit().await
    }
}

/// 命令存储：为每次请求开启一个独立的仓储单元
///
/// 暂存的变更只属于该仓储单元，不会被并发请求的 `commit` 意外提交。
#[async_trait]
pub trait CommandStore: Send + Sync {
    type Repository: CommandRepository + 'static;

    async fn repository(&self) -> DomainResult<Self::Repository>;
}
