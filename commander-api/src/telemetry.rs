use std::sync::Once;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

static INIT_ONCE: Once = Once::new();

/// 安装全局 tracing 订阅者；重复调用无副作用
///
/// 过滤规则取自 `RUST_LOG`，缺省为 `info`；`log_json` 选择 JSON 或人类可读格式。
pub fn init_tracing(log_json: bool) {
    INIT_ONCE.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        let registry = tracing_subscriber::registry().with(filter);
        let installed = if log_json {
            registry.with(fmt::layer().json()).try_init()
        } else {
            registry.with(fmt::layer()).try_init()
        };
        if let Err(err) = installed {
            eprintln!("tracing subscriber not installed: {err}");
        }
    });
}
