//! 基于 Postgres（sqlx）的命令存储
//!
//! 变更在首次暂存时惰性开启的事务中执行，`commit` 提交该事务；
//! 仓储单元被丢弃而未提交时，事务随之回滚。读操作直接走连接池。
//!
use super::{CommandRepository, CommandStore, ensure_persisted, ensure_transient};
use crate::entity::{Command, CommandId, Entity};
use crate::error::{DomainError, DomainResult};
use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::{Postgres, Transaction};
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::{Mutex, MutexGuard};
use tracing::{debug, info};

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS commands (
    id SERIAL PRIMARY KEY,
    how_to TEXT NOT NULL,
    platform TEXT NOT NULL,
    command_line TEXT NOT NULL
)";

const SELECT_ALL: &str = "SELECT id, how_to, platform, command_line FROM commands ORDER BY id";
const SELECT_BY_ID: &str = "SELECT id, how_to, platform, command_line FROM commands WHERE id = $1";
const INSERT: &str =
    "INSERT INTO commands (how_to, platform, command_line) VALUES ($1, $2, $3) RETURNING id";
const UPDATE: &str =
    "UPDATE commands SET how_to = $2, platform = $3, command_line = $4 WHERE id = $1";
const DELETE: &str = "DELETE FROM commands WHERE id = $1";

/// Postgres 命令存储
#[derive(Debug, Clone)]
pub struct PgCommandStore {
    pool: PgPool,
}

impl PgCommandStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// 按连接串建立连接池
    pub async fn connect(database_url: &str, max_connections: u32) -> DomainResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        Ok(Self::new(pool))
    }

    /// 确保 `commands` 表存在
    pub async fn ensure_schema(&self) -> DomainResult<()> {
        sqlx::query(SCHEMA).execute(&self.pool).await?;
        info!("commands schema ready");
        Ok(())
    }
}

#[async_trait]
impl CommandStore for PgCommandStore {
    type Repository = PgCommandRepository;

    async fn repository(&self) -> DomainResult<Self::Repository> {
        Ok(PgCommandRepository {
            pool: self.pool.clone(),
            tx: Mutex::new(None),
            affected: AtomicU64::new(0),
        })
    }
}

type TxSlot = Option<Transaction<'static, Postgres>>;

/// Postgres 仓储单元
pub struct PgCommandRepository {
    pool: PgPool,
    tx: Mutex<TxSlot>,
    affected: AtomicU64,
}

impl PgCommandRepository {
    // 取得（必要时开启）本单元的事务
    async fn transaction(&self) -> DomainResult<MutexGuard<'_, TxSlot>> {
        let mut guard = self.tx.lock().await;
        if guard.is_none() {
            *guard = Some(self.pool.begin().await?);
        }
        Ok(guard)
    }
}

fn missing_transaction() -> DomainError {
    DomainError::Repository {
        reason: "transaction not started".to_string(),
    }
}

#[async_trait]
impl CommandRepository for PgCommandRepository {
    async fn get_all(&self) -> DomainResult<Vec<Command>> {
        let rows = sqlx::query_as::<_, Command>(SELECT_ALL)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn get_by_id(&self, id: CommandId) -> DomainResult<Option<Command>> {
        let row = sqlx::query_as::<_, Command>(SELECT_BY_ID)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn create(&self, command: &mut Command) -> DomainResult<()> {
        ensure_transient(command)?;
        let mut guard = self.transaction().await?;
        let tx = guard.as_mut().ok_or_else(missing_transaction)?;

        let id: CommandId = sqlx::query_scalar(INSERT)
            .bind(&command.how_to)
            .bind(&command.platform)
            .bind(&command.command_line)
            .fetch_one(&mut **tx)
            .await?;

        command.assign_id(id);
        self.affected.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    async fn update(&self, command: &Command) -> DomainResult<()> {
        ensure_persisted(command)?;
        let mut guard = self.transaction().await?;
        let tx = guard.as_mut().ok_or_else(missing_transaction)?;

        let result = sqlx::query(UPDATE)
            .bind(command.id())
            .bind(&command.how_to)
            .bind(&command.platform)
            .bind(&command.command_line)
            .execute(&mut **tx)
            .await?;

        self.affected
            .fetch_add(result.rows_affected(), Ordering::Relaxed);
        Ok(())
    }

    async fn delete(&self, command: &Command) -> DomainResult<()> {
        ensure_persisted(command)?;
        let mut guard = self.transaction().await?;
        let tx = guard.as_mut().ok_or_else(missing_transaction)?;

        let result = sqlx::query(DELETE)
            .bind(command.id())
            .execute(&mut **tx)
            .await?;

        self.affected
            .fetch_add(result.rows_affected(), Ordering::Relaxed);
        Ok(())
    }

    async fn commit(&self) -> DomainResult<bool> {
        let tx = self.tx.lock().await.take();
        if let Some(tx) = tx {
            tx.commit().await?;
        }
        let affected = self.affected.swap(0, Ordering::Relaxed);
        debug!(affected, "postgres commit");
        // rows_affected 为无符号计数，恒为非负
        Ok(true)
    }
}
