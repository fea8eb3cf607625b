//! 实体（Entity）基础抽象与命令记录
//!
//! 命令记录（`Command`）描述如何在特定平台上运行一条命令行。
//! 标识由持久化层在创建时分配，此后不可变；`TRANSIENT_ID` 表示尚未持久化。
//!
use bon::Builder;
use std::fmt::Display;

/// 命令记录标识
pub type CommandId = i32;

/// 瞬态实体（尚未持久化）使用的占位标识
pub const TRANSIENT_ID: CommandId = 0;

/// 具备唯一标识的实体抽象
pub trait Entity: Send + Sync {
    /// 实体标识类型
    type Id: Copy + Eq + Display;

    /// 获取实体标识
    fn id(&self) -> Self::Id;

    /// 是否尚未由持久化层分配标识
    fn is_transient(&self) -> bool;
}

/// 命令记录
///
/// ```
/// use commander_domain::entity::{Command, Entity};
///
/// let cmd = Command::builder()
///     .how_to("Run unit tests")
///     .platform("xUnit")
///     .command_line("dotnet test")
///     .build();
/// assert!(cmd.is_transient());
/// ```
#[derive(Builder, Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "infra-sqlx", derive(sqlx::FromRow))]
pub struct Command {
    #[builder(default = TRANSIENT_ID)]
    id: CommandId,
    /// 命令用途说明
    #[builder(into)]
    pub how_to: String,
    /// 目标平台/环境
    #[builder(into)]
    pub platform: String,
    /// 实际执行的命令行
    #[builder(into)]
    pub command_line: String,
}

impl Command {
    /// 由持久化层在创建时回写分配的标识
    pub(crate) fn assign_id(&mut self, id: CommandId) {
        self.id = id;
    }
}

impl Entity for Command {
    type Id = CommandId;

    fn id(&self) -> Self::Id {
        self.id
    }

    fn is_transient(&self) -> bool {
        self.id == TRANSIENT_ID
    }
}
