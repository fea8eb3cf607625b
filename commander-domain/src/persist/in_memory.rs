//! 基于内存的命令存储
//!
//! 已提交数据由互斥锁保护；标识由原子序列分配；每个仓储单元持有独立的暂存区。
//!
use super::{CommandRepository, CommandStore, ensure_persisted, ensure_transient};
use crate::entity::{Command, CommandId, Entity, TRANSIENT_ID};
use crate::error::{DomainError, DomainResult};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::{Arc, Mutex};
use tracing::debug;

#[derive(Debug)]
enum StagedChange {
    Insert(Command),
    Replace(Command),
    Remove(CommandId),
}

#[derive(Debug, Default)]
struct SharedState {
    rows: Mutex<BTreeMap<CommandId, Command>>,
    sequence: AtomicI32,
}

impl SharedState {
    fn next_id(&self) -> DomainResult<CommandId> {
        self.sequence
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_add(1))
            .map(|prev| prev + 1)
            .map_err(|_| DomainError::Repository {
                reason: "command id sequence exhausted".to_string(),
            })
    }
}

/// 内存命令存储，可在多个请求间共享（克隆共享同一份数据）
#[derive(Debug, Clone, Default)]
pub struct InMemoryCommandStore {
    state: Arc<SharedState>,
}

impl InMemoryCommandStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 以给定命令预置数据
    ///
    /// 已带标识的命令保留原标识；瞬态命令按序列分配新标识，序列耗尽时报错。
    pub fn with_commands(commands: impl IntoIterator<Item = Command>) -> DomainResult<Self> {
        let mut rows = BTreeMap::new();
        let mut pending = Vec::new();

        for command in commands {
            if command.is_transient() {
                pending.push(command);
            } else {
                rows.insert(command.id(), command);
            }
        }

        let max_id = rows.keys().next_back().copied().unwrap_or(TRANSIENT_ID);
        let mut state = SharedState {
            rows: Mutex::new(BTreeMap::new()),
            sequence: AtomicI32::new(max_id),
        };

        for mut command in pending {
            command.assign_id(state.next_id()?);
            rows.insert(command.id(), command);
        }

        state.rows = Mutex::new(rows);
        Ok(Self {
            state: Arc::new(state),
        })
    }

    /// 已提交的命令数量
    pub fn count(&self) -> DomainResult<usize> {
        Ok(self.state.rows.lock()?.len())
    }

    /// 已提交数据的只读快照（按标识升序）
    pub fn snapshot(&self) -> DomainResult<Vec<Command>> {
        Ok(self.state.rows.lock()?.values().cloned().collect())
    }
}

#[async_trait]
impl CommandStore for InMemoryCommandStore {
    type Repository = InMemoryCommandRepository;

    async fn repository(&self) -> DomainResult<Self::Repository> {
        Ok(InMemoryCommandRepository {
            state: Arc::clone(&self.state),
            staged: Mutex::new(Vec::new()),
        })
    }
}

/// 内存仓储单元
#[derive(Debug)]
pub struct InMemoryCommandRepository {
    state: Arc<SharedState>,
    staged: Mutex<Vec<StagedChange>>,
}

impl InMemoryCommandRepository {
    fn stage(&self, change: StagedChange) -> DomainResult<()> {
        self.staged.lock()?.push(change);
        Ok(())
    }
}

#[async_trait]
impl CommandRepository for InMemoryCommandRepository {
    async fn get_all(&self) -> DomainResult<Vec<Command>> {
        Ok(self.state.rows.lock()?.values().cloned().collect())
    }

    async fn get_by_id(&self, id: CommandId) -> DomainResult<Option<Command>> {
        Ok(self.state.rows.lock()?.get(&id).cloned())
    }

    async fn create(&self, command: &mut Command) -> DomainResult<()> {
        ensure_transient(command)?;
        command.assign_id(self.state.next_id()?);
        self.stage(StagedChange::Insert(command.clone()))
    }

    async fn update(&self, command: &Command) -> DomainResult<()> {
        ensure_persisted(command)?;
        self.stage(StagedChange::Replace(command.clone()))
    }

    async fn delete(&self, command: &Command) -> DomainResult<()> {
        ensure_persisted(command)?;
        self.stage(StagedChange::Remove(command.id()))
    }

    async fn commit(&self) -> DomainResult<bool> {
        let staged = std::mem::take(&mut *self.staged.lock()?);
        let mut rows = self.state.rows.lock()?;
        let mut affected: i64 = 0;

        for change in staged {
            match change {
                StagedChange::Insert(command) => {
                    rows.insert(command.id(), command);
                    affected += 1;
                }
                StagedChange::Replace(command) => {
                    // 已被并发删除的记录不再复活
                    if let Some(row) = rows.get_mut(&command.id()) {
                        *row = command;
                        affected += 1;
                    }
                }
                StagedChange::Remove(id) => {
                    if rows.remove(&id).is_some() {
                        affected += 1;
                    }
                }
            }
        }

        debug!(affected, "in-memory commit");
        Ok(affected >= 0)
    }
}
