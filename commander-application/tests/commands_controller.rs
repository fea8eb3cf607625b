use async_trait::async_trait;
use commander_application::context::AppContext;
use commander_application::dto::{CommandCreateDto, CommandReadDto, CommandUpdateDto};
use commander_application::error::AppError;
use commander_application::{ActionResult, CommandMapper, CommandsController, GET_COMMAND_BY_ID_ROUTE};
use commander_domain::entity::{Command, CommandId};
use commander_domain::error::{DomainError, DomainResult};
use commander_domain::persist::{
    CommandRepository, CommandStore, InMemoryCommandRepository, InMemoryCommandStore,
};
use http::StatusCode;

fn migration_command() -> Command {
    Command::builder()
        .id(1)
        .how_to("How to generate a migration")
        .platform(".Net Core EF")
        .command_line("dotnet ef migrations add <Name>")
        .build()
}

fn mock_create() -> CommandCreateDto {
    CommandCreateDto {
        how_to: "mock".into(),
        platform: "Mock".into(),
        command_line: "Mock".into(),
    }
}

async fn controller_for(
    store: &InMemoryCommandStore,
) -> CommandsController<InMemoryCommandRepository> {
    let repo = store.repository().await.unwrap();
    CommandsController::new(repo, CommandMapper::new())
}

fn ctx() -> AppContext {
    AppContext::builder().request_id("req-test".to_string()).build()
}

#[tokio::test]
async fn get_all_returns_empty_list_when_store_is_empty() {
    let store = InMemoryCommandStore::new();
    let controller = controller_for(&store).await;

    let result = controller.get_all_commands(&ctx()).await.unwrap();
    assert_eq!(result.status(), StatusCode::OK);
    assert_eq!(result.into_value().unwrap(), Vec::<CommandReadDto>::new());
}

#[tokio::test]
async fn get_all_returns_one_item_when_store_has_one_resource() {
    let store = InMemoryCommandStore::with_commands([migration_command()]).unwrap();
    let controller = controller_for(&store).await;

    let result = controller.get_all_commands(&ctx()).await.unwrap();
    assert_eq!(result.status(), StatusCode::OK);
    let dtos = result.into_value().unwrap();
    assert_eq!(dtos.len(), 1);
    assert_eq!(
        dtos[0],
        CommandReadDto {
            id: 1,
            how_to: "How to generate a migration".into(),
            platform: ".Net Core EF".into(),
            command_line: "dotnet ef migrations add <Name>".into(),
        }
    );
}

#[tokio::test]
async fn get_all_matches_stored_entities_field_for_field() {
    for n in 0..5 {
        let commands: Vec<Command> = (0..n)
            .map(|i| {
                Command::builder()
                    .how_to(format!("how-{i}"))
                    .platform(format!("platform-{i}"))
                    .command_line(format!("line-{i}"))
                    .build()
            })
            .collect();
        let store = InMemoryCommandStore::with_commands(commands).unwrap();
        let controller = controller_for(&store).await;

        let dtos = controller
            .get_all_commands(&ctx())
            .await
            .unwrap()
            .into_value()
            .unwrap();
        let stored = store.snapshot().unwrap();
        assert_eq!(dtos.len(), n);
        for (dto, entity) in dtos.iter().zip(stored.iter()) {
            assert_eq!(dto.id, commander_domain::entity::Entity::id(entity));
            assert_eq!(dto.how_to, entity.how_to);
            assert_eq!(dto.platform, entity.platform);
            assert_eq!(dto.command_line, entity.command_line);
        }
    }
}

#[tokio::test]
async fn get_by_id_returns_404_when_id_does_not_exist() {
    let store = InMemoryCommandStore::with_commands([migration_command()]).unwrap();
    let controller = controller_for(&store).await;

    let err = controller.get_command_by_id(&ctx(), 2).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound { id: 2 }));
    assert_eq!(err.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn get_by_id_returns_200_with_matching_id() {
    let store = InMemoryCommandStore::with_commands([migration_command()]).unwrap();
    let controller = controller_for(&store).await;

    let result = controller.get_command_by_id(&ctx(), 1).await.unwrap();
    assert_eq!(result.status(), StatusCode::OK);
    assert_eq!(result.value().unwrap().id, 1);
}

#[tokio::test]
async fn create_returns_201_and_can_be_read_back() {
    let store = InMemoryCommandStore::new();
    let controller = controller_for(&store).await;

    let result = controller.create_command(&ctx(), mock_create()).await.unwrap();
    assert_eq!(result.status(), StatusCode::CREATED);

    let (route_name, id, value) = match result {
        ActionResult::CreatedAtRoute {
            route_name,
            id,
            value,
        } => (route_name, id, value),
        other => panic!("unexpected result: {other:?}"),
    };
    assert_eq!(route_name, GET_COMMAND_BY_ID_ROUTE);
    assert_ne!(id, 0);
    assert_eq!(value.id, id);
    assert_eq!(store.count().unwrap(), 1);

    let fetched = controller_for(&store)
        .await
        .get_command_by_id(&ctx(), id)
        .await
        .unwrap();
    assert_eq!(fetched.into_value().unwrap(), value);
}

#[tokio::test]
async fn create_with_missing_field_is_rejected_without_side_effects() {
    let store = InMemoryCommandStore::with_commands([migration_command()]).unwrap();
    let controller = controller_for(&store).await;

    for dto in [
        CommandCreateDto {
            how_to: String::new(),
            ..mock_create()
        },
        CommandCreateDto {
            platform: String::new(),
            ..mock_create()
        },
        CommandCreateDto {
            command_line: String::new(),
            ..mock_create()
        },
    ] {
        let err = controller.create_command(&ctx(), dto).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }
    assert_eq!(store.count().unwrap(), 1);
}

#[tokio::test]
async fn update_replaces_fields_of_existing_command() {
    let store = InMemoryCommandStore::with_commands([migration_command()]).unwrap();
    let controller = controller_for(&store).await;

    let result = controller
        .update_command(
            &ctx(),
            1,
            CommandUpdateDto {
                how_to: "How to apply migrations".into(),
                platform: ".Net Core EF".into(),
                command_line: "dotnet ef database update".into(),
            },
        )
        .await
        .unwrap();
    assert_eq!(result, ActionResult::NoContent);
    assert_eq!(result.status(), StatusCode::NO_CONTENT);

    let stored = store.snapshot().unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].how_to, "How to apply migrations");
    assert_eq!(stored[0].command_line, "dotnet ef database update");
}

#[tokio::test]
async fn update_of_missing_id_is_not_found_and_leaves_store_unchanged() {
    let store = InMemoryCommandStore::with_commands([migration_command()]).unwrap();
    let controller = controller_for(&store).await;
    let before = store.snapshot().unwrap();

    let err = controller
        .update_command(
            &ctx(),
            42,
            CommandUpdateDto {
                how_to: "x".into(),
                platform: "y".into(),
                command_line: "z".into(),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound { id: 42 }));
    assert_eq!(store.snapshot().unwrap(), before);
}

#[tokio::test]
async fn update_of_missing_id_is_not_found_even_with_empty_payload() {
    let store = InMemoryCommandStore::new();
    let controller = controller_for(&store).await;

    let err = controller
        .update_command(&ctx(), 42, CommandUpdateDto::default())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound { id: 42 }));
    assert_eq!(err.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_with_invalid_payload_is_rejected() {
    let store = InMemoryCommandStore::with_commands([migration_command()]).unwrap();
    let controller = controller_for(&store).await;
    let before = store.snapshot().unwrap();

    let err = controller
        .update_command(&ctx(), 1, CommandUpdateDto::default())
        .await
        .unwrap_err();
    assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    assert_eq!(store.snapshot().unwrap(), before);
}

#[tokio::test]
async fn delete_removes_command_and_subsequent_read_is_not_found() {
    let store = InMemoryCommandStore::with_commands([migration_command()]).unwrap();
    let controller = controller_for(&store).await;

    let result = controller.delete_command(&ctx(), 1).await.unwrap();
    assert_eq!(result.status(), StatusCode::NO_CONTENT);
    assert_eq!(store.count().unwrap(), 0);

    let err = controller.get_command_by_id(&ctx(), 1).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound { id: 1 }));
}

#[tokio::test]
async fn delete_of_missing_id_is_not_found_and_leaves_store_unchanged() {
    let store = InMemoryCommandStore::with_commands([migration_command()]).unwrap();
    let controller = controller_for(&store).await;

    let err = controller.delete_command(&ctx(), 9).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound { id: 9 }));
    assert_eq!(store.count().unwrap(), 1);
}

/// 提交总是报告失败的仓储替身
struct RejectingCommitRepository {
    inner: InMemoryCommandRepository,
}

#[async_trait]
impl CommandRepository for RejectingCommitRepository {
    async fn get_all(&self) -> DomainResult<Vec<Command>> {
        self.inner.get_all().await
    }

    async fn get_by_id(&self, id: CommandId) -> DomainResult<Option<Command>> {
        self.inner.get_by_id(id).await
    }

    async fn create(&self, command: &mut Command) -> DomainResult<()> {
        self.inner.create(command).await
    }

    async fn update(&self, command: &Command) -> DomainResult<()> {
        self.inner.update(command).await
    }

    async fn delete(&self, command: &Command) -> DomainResult<()> {
        self.inner.delete(command).await
    }

    async fn commit(&self) -> DomainResult<bool> {
        Ok(false)
    }
}

#[tokio::test]
async fn failed_commit_surfaces_as_persistence_failure() {
    let store = InMemoryCommandStore::with_commands([migration_command()]).unwrap();
    let repo = RejectingCommitRepository {
        inner: store.repository().await.unwrap(),
    };
    let controller = CommandsController::new(repo, CommandMapper::new());

    let err = controller.create_command(&ctx(), mock_create()).await.unwrap_err();
    assert!(matches!(err, AppError::Persistence(_)));
    assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let err = controller.delete_command(&ctx(), 1).await.unwrap_err();
    assert!(matches!(err, AppError::Persistence(_)));
    assert_eq!(store.count().unwrap(), 1);
}

/// 所有操作都报存储错误的仓储替身
struct BrokenRepository;

#[async_trait]
impl CommandRepository for BrokenRepository {
    async fn get_all(&self) -> DomainResult<Vec<Command>> {
        Err(DomainError::Database {
            reason: "connection refused".into(),
        })
    }

    async fn get_by_id(&self, _id: CommandId) -> DomainResult<Option<Command>> {
        Err(DomainError::Database {
            reason: "connection refused".into(),
        })
    }

    async fn create(&self, _command: &mut Command) -> DomainResult<()> {
        Err(DomainError::Database {
            reason: "connection refused".into(),
        })
    }

    async fn update(&self, _command: &Command) -> DomainResult<()> {
        Err(DomainError::Database {
            reason: "connection refused".into(),
        })
    }

    async fn delete(&self, _command: &Command) -> DomainResult<()> {
        Err(DomainError::Database {
            reason: "connection refused".into(),
        })
    }

    async fn commit(&self) -> DomainResult<bool> {
        Ok(true)
    }
}

#[tokio::test]
async fn store_errors_propagate_unmodified() {
    let controller = CommandsController::new(BrokenRepository, CommandMapper::new());

    let err = controller.get_all_commands(&ctx()).await.unwrap_err();
    assert!(matches!(err, AppError::Domain(DomainError::Database { .. })));
    assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(err.code(), "persistence_failure");

    // 校验先于存储
    let err = controller
        .create_command(&ctx(), CommandCreateDto::default())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}
