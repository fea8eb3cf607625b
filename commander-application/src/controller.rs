//! 命令资源控制器
//!
//! 每个操作都是一次性的：校验 -> 经仓储读取或暂存变更 -> 提交（仅变更操作）-> 映射为结果。
//! 校验与不存在错误在触达存储之前就地短路；持久化错误原样向上传播。
//!
use crate::action_result::ActionResult;
use crate::context::AppContext;
use crate::dto::{CommandCreateDto, CommandReadDto, CommandUpdateDto};
use crate::error::{AppError, AppResult};
use crate::mapper::CommandMapper;
use crate::validation::Validate;
use commander_domain::entity::{Command, CommandId, Entity};
use commander_domain::persist::CommandRepository;
use tracing::{debug, info, warn};

/// 按标识获取单个命令的具名路由，用于创建成功后的位置引用
pub const GET_COMMAND_BY_ID_ROUTE: &str = "GetCommandById";

/// 命令资源控制器，以仓储单元与映射表构造，生命周期为单次请求
pub struct CommandsController<R> {
    repository: R,
    mapper: CommandMapper,
}

impl<R> CommandsController<R>
where
    R: CommandRepository,
{
    pub fn new(repository: R, mapper: CommandMapper) -> Self {
        Self { repository, mapper }
    }

    pub async fn get_all_commands(
        &self,
        ctx: &AppContext,
    ) -> AppResult<ActionResult<Vec<CommandReadDto>>> {
        let commands = self.repository.get_all().await?;
        debug!(
            request_id = ctx.request_id(),
            count = commands.len(),
            "listed commands"
        );

        let dtos = commands
            .iter()
            .map(|c| self.mapper.map_to::<_, CommandReadDto>(c))
            .collect();
        Ok(ActionResult::Ok(dtos))
    }

    pub async fn get_command_by_id(
        &self,
        ctx: &AppContext,
        id: CommandId,
    ) -> AppResult<ActionResult<CommandReadDto>> {
        let command = self.find(ctx, id).await?;
        Ok(ActionResult::Ok(self.mapper.map_to(&command)))
    }

    pub async fn create_command(
        &self,
        ctx: &AppContext,
        dto: CommandCreateDto,
    ) -> AppResult<ActionResult<CommandReadDto>> {
        if let Err(errors) = dto.validate() {
            debug!(request_id = ctx.request_id(), %errors, "rejected create payload");
            return Err(errors.into());
        }

        let mut command: Command = self.mapper.map_to(dto);
        self.repository.create(&mut command).await?;
        self.save_changes(ctx).await?;

        let read: CommandReadDto = self.mapper.map_to(&command);
        info!(
            request_id = ctx.request_id(),
            command_id = read.id,
            "created command"
        );
        Ok(ActionResult::CreatedAtRoute {
            route_name: GET_COMMAND_BY_ID_ROUTE,
            id: read.id,
            value: read,
        })
    }

    /// 整体替换；目标不存在时先报告不存在，再校验请求体；最后写入者生效
    pub async fn update_command(
        &self,
        ctx: &AppContext,
        id: CommandId,
        dto: CommandUpdateDto,
    ) -> AppResult<ActionResult<()>> {
        let mut command = self.find(ctx, id).await?;
        if let Err(errors) = dto.validate() {
            debug!(request_id = ctx.request_id(), command_id = id, %errors, "rejected update payload");
            return Err(errors.into());
        }

        self.mapper.map_onto(dto, &mut command);
        self.repository.update(&command).await?;
        self.save_changes(ctx).await?;

        info!(request_id = ctx.request_id(), command_id = id, "updated command");
        Ok(ActionResult::NoContent)
    }

    pub async fn delete_command(
        &self,
        ctx: &AppContext,
        id: CommandId,
    ) -> AppResult<ActionResult<()>> {
        let command = self.find(ctx, id).await?;
        self.repository.delete(&command).await?;
        self.save_changes(ctx).await?;

        info!(
            request_id = ctx.request_id(),
            command_id = command.id(),
            "deleted command"
        );
        Ok(ActionResult::NoContent)
    }

    async fn find(&self, ctx: &AppContext, id: CommandId) -> AppResult<Command> {
        match self.repository.get_by_id(id).await? {
            Some(command) => Ok(command),
            None => {
                debug!(request_id = ctx.request_id(), command_id = id, "command not found");
                Err(AppError::NotFound { id })
            }
        }
    }

    async fn save_changes(&self, ctx: &AppContext) -> AppResult<()> {
        if self.repository.commit().await? {
            Ok(())
        } else {
            warn!(request_id = ctx.request_id(), "commit reported failure");
            Err(AppError::Persistence("commit reported failure".to_string()))
        }
    }
}
