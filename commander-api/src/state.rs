use crate::config::ApiConfig;
use commander_application::{CommandMapper, GET_COMMAND_BY_ID_ROUTE};
use commander_domain::entity::CommandId;
use std::sync::Arc;
use std::sync::atomic::AtomicU64;

/// 具名路由到 URL 的解析表，用于生成 `Location`
#[derive(Debug, Clone)]
pub struct RouteTable {
    prefix: String,
}

impl RouteTable {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn url_for(&self, route_name: &str, id: CommandId) -> Option<String> {
        (route_name == GET_COMMAND_BY_ID_ROUTE).then(|| format!("{}/{id}", self.prefix))
    }
}

/// 共享的进程级依赖：存储、映射表与路由表在启动后只读
pub struct AppState<S> {
    pub store: Arc<S>,
    pub mapper: CommandMapper,
    pub routes: Arc<RouteTable>,
    pub max_body_bytes: usize,
    pub(crate) request_id_seed: Arc<AtomicU64>,
}

impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            mapper: self.mapper,
            routes: Arc::clone(&self.routes),
            max_body_bytes: self.max_body_bytes,
            request_id_seed: Arc::clone(&self.request_id_seed),
        }
    }
}

impl<S> AppState<S> {
    pub fn new(store: S, config: &ApiConfig) -> Self {
        Self {
            store: Arc::new(store),
            mapper: CommandMapper::new(),
            routes: Arc::new(RouteTable::new(config.route_prefix.clone())),
            max_body_bytes: config.max_body_bytes,
            request_id_seed: Arc::new(AtomicU64::new(1)),
        }
    }
}
