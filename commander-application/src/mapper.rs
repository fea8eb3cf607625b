//! 实体与 DTO 之间的映射
//!
//! `CommandMapper` 在进程启动时构造一次，此后只读，并通过构造函数注入控制器。
//! 每条映射规则都是一个 `Mapping<Src, Dst>` 实现；映射是全量且无损的，从不做校验。
//!
use crate::dto::{CommandCreateDto, CommandReadDto, CommandUpdateDto};
use commander_domain::entity::{Command, Entity};

/// 单向映射规则
pub trait Mapping<Src, Dst> {
    fn map(&self, src: Src) -> Dst;
}

/// 命令记录映射表
#[derive(Debug, Clone, Copy, Default)]
pub struct CommandMapper {
    _private: (),
}

impl CommandMapper {
    pub fn new() -> Self {
        Self::default()
    }

    /// 以显式目标类型调用映射，避免多条规则共享源类型时的推断歧义
    pub fn map_to<Src, Dst>(&self, src: Src) -> Dst
    where
        Self: Mapping<Src, Dst>,
    {
        self.map(src)
    }

    /// 将更新形态覆盖到已有实体上，保留其标识
    pub fn map_onto(&self, src: CommandUpdateDto, dst: &mut Command) {
        dst.how_to = src.how_to;
        dst.platform = src.platform;
        dst.command_line = src.command_line;
    }
}

impl Mapping<&Command, CommandReadDto> for CommandMapper {
    fn map(&self, src: &Command) -> CommandReadDto {
        CommandReadDto {
            id: src.id(),
            how_to: src.how_to.clone(),
            platform: src.platform.clone(),
            command_line: src.command_line.clone(),
        }
    }
}

// 标识保持瞬态，由持久化层在 create 时分配
impl Mapping<CommandCreateDto, Command> for CommandMapper {
    fn map(&self, src: CommandCreateDto) -> Command {
        Command::builder()
            .how_to(src.how_to)
            .platform(src.platform)
            .command_line(src.command_line)
            .build()
    }
}
