//! 命令记录应用层（commander-application）
//!
//! - `dto`：对外的读取/创建/更新形态
//! - `mapper`：实体与 DTO 的映射表
//! - `controller`：资源控制器，编排校验、仓储调用、提交与结果映射
//!
pub mod action_result;
pub mod context;
pub mod controller;
pub mod dto;
pub mod error;
pub mod mapper;
pub mod validation;

pub use action_result::ActionResult;
pub use controller::{CommandsController, GET_COMMAND_BY_ID_ROUTE};
pub use mapper::CommandMapper;
