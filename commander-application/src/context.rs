use bon::Builder;

/// 应用层上下文（Application Context）
///
/// 承载一次控制器调用所需的横切信息，目前为请求标识（`request_id`），
/// 用于日志关联；由接口层在请求进入时生成或透传。
///
/// 典型用法：
/// ```rust
/// use commander_application::context::AppContext;
///
/// let ctx = AppContext::builder()
///     .maybe_request_id(Some("req-0000000000000001".into()))
///     .build();
/// assert_eq!(ctx.request_id(), "req-0000000000000001");
/// ```
#[derive(Builder, Clone, Debug, Default)]
pub struct AppContext {
    /// 请求标识（可选）：为空时日志中记为 `-`
    request_id: Option<String>,
}

impl AppContext {
    pub fn request_id(&self) -> &str {
        self.request_id.as_deref().unwrap_or("-")
    }
}
