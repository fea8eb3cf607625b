//! 数据传输对象（DTO）
//!
//! 应用层的输入/输出载体，字段在线上使用 camelCase；与领域实体解耦，
//! 两者之间的转换由 [`CommandMapper`](crate::mapper::CommandMapper) 完成。
//!
use crate::validation::{Validate, ValidationErrors};
use commander_domain::entity::CommandId;
use serde::{Deserialize, Serialize};

/// 读取形态：完整投影
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandReadDto {
    pub id: CommandId,
    pub how_to: String,
    pub platform: String,
    pub command_line: String,
}

/// 创建形态：不含标识，由存储分配
///
/// 缺失字段反序列化为空字符串，由校验统一报告为必填错误。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CommandCreateDto {
    pub how_to: String,
    pub platform: String,
    pub command_line: String,
}

/// 更新形态：整体替换，标识来自路径
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CommandUpdateDto {
    pub how_to: String,
    pub platform: String,
    pub command_line: String,
}

fn validate_content(how_to: &str, platform: &str, command_line: &str) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    errors.require_text("howTo", how_to);
    errors.require_text("platform", platform);
    errors.require_text("commandLine", command_line);
    errors.into_result()
}

impl Validate for CommandCreateDto {
    fn validate(&self) -> Result<(), ValidationErrors> {
        validate_content(&self.how_to, &self.platform, &self.command_line)
    }
}

impl Validate for CommandUpdateDto {
    fn validate(&self) -> Result<(), ValidationErrors> {
        validate_content(&self.how_to, &self.platform, &self.command_line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn read_dto_uses_camel_case_on_the_wire() {
        let dto = CommandReadDto {
            id: 1,
            how_to: "How to generate a migration".into(),
            platform: ".Net Core EF".into(),
            command_line: "dotnet ef migrations add <Name>".into(),
        };
        assert_eq!(
            serde_json::to_value(&dto).unwrap(),
            json!({
                "id": 1,
                "howTo": "How to generate a migration",
                "platform": ".Net Core EF",
                "commandLine": "dotnet ef migrations add <Name>"
            })
        );
    }

    #[test]
    fn create_dto_missing_fields_fail_validation() {
        let dto: CommandCreateDto = serde_json::from_value(json!({ "howTo": "mock" })).unwrap();
        let errors = dto.validate().unwrap_err();
        let fields: Vec<_> = errors.errors().iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["platform", "commandLine"]);
    }

    #[test]
    fn complete_create_dto_is_valid() {
        let dto: CommandCreateDto = serde_json::from_value(json!({
            "howTo": "mock",
            "platform": "Mock",
            "commandLine": "Mock"
        }))
        .unwrap();
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn empty_update_dto_reports_every_field() {
        let errors = CommandUpdateDto::default().validate().unwrap_err();
        assert_eq!(errors.errors().len(), 3);
    }
}
