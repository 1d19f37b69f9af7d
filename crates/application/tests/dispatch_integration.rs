//! Integration tests for request dispatch.
//!
//! These tests wire a small user-management service the way a consuming
//! service would: commands and queries sent through the mediator, handlers
//! built from a repository, validator, and mapper, and aggregate events
//! drained into an outbox after each commit.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

use application::{
    AcceptAll, ApplicationError, HandlerContext, KernelConfig, MapSource, Mapper, MapperExt,
    Mediator, MemoryRepositoryError, RegistrationPolicy, Repository, Representation,
    RepresentationKind, Request, RequestHandler, TargetType, Validator,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use common::{ApiResponse, PageRequest, PagedResult, PaginatedResponse, ResponseCode};
use domain::{
    AggregateRoot, AuditFields, Auditable, Create, DomainError, DomainEvent, DomainEvents, Entity,
    EntityId, Identity,
};
use serde::{Deserialize, Serialize};

// =========================================================================
// Domain
// =========================================================================

#[derive(Debug, Clone, PartialEq)]
enum UserEvent {
    Registered {
        user_id: EntityId,
        email: String,
        at: DateTime<Utc>,
    },
    Renamed {
        user_id: EntityId,
        display_name: String,
        at: DateTime<Utc>,
    },
}

impl DomainEvent for UserEvent {
    fn event_type(&self) -> &'static str {
        match self {
            UserEvent::Registered { .. } => "UserRegistered",
            UserEvent::Renamed { .. } => "UserRenamed",
        }
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            UserEvent::Registered { at, .. } | UserEvent::Renamed { at, .. } => *at,
        }
    }
}

#[derive(Debug, Clone)]
struct User {
    identity: Identity<EntityId>,
    audit: AuditFields,
    email: String,
    display_name: String,
    events: DomainEvents<UserEvent>,
}

domain::impl_entity_identity!(User);

struct NewUser {
    email: String,
    display_name: String,
    registered_by: String,
}

impl User {
    fn rename(&mut self, display_name: String, actor: &str) -> Result<(), DomainError> {
        if display_name.trim().is_empty() {
            return Err(DomainError::invalid_value("display_name", "must not be blank"));
        }
        self.display_name = display_name.clone();
        self.mark_updated_by(actor);
        self.add_domain_event(UserEvent::Renamed {
            user_id: *self.id(),
            display_name,
            at: Utc::now(),
        });
        Ok(())
    }
}

impl Entity for User {
    type Id = EntityId;

    fn identity(&self) -> &Identity<EntityId> {
        &self.identity
    }

    fn identity_mut(&mut self) -> &mut Identity<EntityId> {
        &mut self.identity
    }
}

impl Create for User {
    type Input = NewUser;

    fn create(input: NewUser) -> Result<Self, DomainError> {
        if !input.email.contains('@') {
            return Err(DomainError::invalid_value("email", "must contain '@'"));
        }
        let mut user = Self {
            identity: Identity::new(EntityId::new()),
            audit: AuditFields::created_by(input.registered_by),
            email: input.email.clone(),
            display_name: input.display_name,
            events: DomainEvents::new(),
        };
        user.add_domain_event(UserEvent::Registered {
            user_id: *user.id(),
            email: input.email,
            at: Utc::now(),
        });
        Ok(user)
    }
}

impl Auditable for User {
    fn audit(&self) -> &AuditFields {
        &self.audit
    }

    fn audit_mut(&mut self) -> &mut AuditFields {
        &mut self.audit
    }
}

impl AggregateRoot for User {
    type Event = UserEvent;

    fn domain_events(&self) -> &DomainEvents<UserEvent> {
        &self.events
    }

    fn domain_events_mut(&mut self) -> &mut DomainEvents<UserEvent> {
        &mut self.events
    }
}

impl Representation for User {
    const KIND: RepresentationKind = RepresentationKind::DOMAIN;
}

// =========================================================================
// Persistence model, transfer object, mapper
// =========================================================================

#[derive(Debug, Clone, PartialEq)]
struct UserRecord {
    row_id: i64,
    id: EntityId,
    email: String,
    display_name: String,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
    created_by: Option<String>,
    updated_by: Option<String>,
}

impl Representation for UserRecord {
    const KIND: RepresentationKind = RepresentationKind::PERSISTENCE;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct UserDto {
    id: EntityId,
    email: String,
    display_name: String,
    created_at: DateTime<Utc>,
}

impl Representation for UserDto {
    const KIND: RepresentationKind = RepresentationKind::TRANSFER;
}

#[derive(Debug, Clone, Copy, Default)]
struct UserMapper;

impl Mapper for UserMapper {
    type Model = UserRecord;
    type Entity = User;
    type Dto = UserDto;
    type Error = ApplicationError;

    fn to_domain(&self, record: &UserRecord) -> Result<User, ApplicationError> {
        Ok(User {
            identity: Identity::restore(record.id, record.created_at, record.updated_at),
            audit: AuditFields {
                created_by: record.created_by.clone(),
                updated_by: record.updated_by.clone(),
            },
            email: record.email.clone(),
            display_name: record.display_name.clone(),
            events: DomainEvents::new(),
        })
    }

    fn to_db(&self, user: &User) -> Result<UserRecord, ApplicationError> {
        Ok(UserRecord {
            row_id: 0,
            id: *user.id(),
            email: user.email.clone(),
            display_name: user.display_name.clone(),
            created_at: user.created_at(),
            updated_at: user.updated_at(),
            created_by: user.created_by().map(str::to_owned),
            updated_by: user.updated_by().map(str::to_owned),
        })
    }

    fn to_db_update<'m>(
        &self,
        user: &User,
        record: &'m mut UserRecord,
    ) -> Result<&'m mut UserRecord, ApplicationError> {
        record.email = user.email.clone();
        record.display_name = user.display_name.clone();
        record.updated_at = user.updated_at();
        record.updated_by = user.updated_by().map(str::to_owned);
        Ok(record)
    }

    fn to_dto(&self, user: &User) -> Result<UserDto, ApplicationError> {
        Ok(UserDto {
            id: *user.id(),
            email: user.email.clone(),
            display_name: user.display_name.clone(),
            created_at: user.created_at(),
        })
    }

    fn from_dto(&self, dto: &UserDto) -> Result<User, ApplicationError> {
        Ok(User {
            identity: Identity::restore(dto.id, dto.created_at, None),
            audit: AuditFields::default(),
            email: dto.email.clone(),
            display_name: dto.display_name.clone(),
            events: DomainEvents::new(),
        })
    }
}

fn dto_of(mapper: &UserMapper, user: &User) -> Result<UserDto, ApplicationError> {
    mapper
        .map(MapSource::Domain(user), TargetType::of::<UserDto>())?
        .into_transfer()
        .ok_or_else(|| ApplicationError::mapping("expected a transfer object"))
}

// =========================================================================
// Row-backed repository
// =========================================================================

/// Repository storing `UserRecord` rows, converting through the mapper.
#[derive(Clone, Default)]
struct UserRows {
    rows: Arc<Mutex<HashMap<EntityId, UserRecord>>>,
    next_row_id: Arc<AtomicI64>,
    mapper: UserMapper,
}

impl UserRows {
    fn row(&self, id: &EntityId) -> Option<UserRecord> {
        self.rows.lock().unwrap().get(id).cloned()
    }

    fn all(&self) -> Result<Vec<User>, ApplicationError> {
        let rows = self.rows.lock().unwrap();
        let mut users = rows
            .values()
            .map(|row| self.mapper.to_domain(row))
            .collect::<Result<Vec<_>, _>>()?;
        users.sort_by(|a, b| a.display_name.cmp(&b.display_name));
        Ok(users)
    }
}

#[async_trait]
impl Repository for UserRows {
    type Entity = User;
    type Error = ApplicationError;

    async fn find_by_id(&self, id: &EntityId) -> Result<Option<User>, ApplicationError> {
        let row = self.row(id);
        row.map(|row| {
            self.mapper
                .map(MapSource::Persistence(&row), TargetType::of::<User>())?
                .into_domain()
                .ok_or_else(|| ApplicationError::mapping("expected a domain entity"))
        })
        .transpose()
    }

    async fn add(&self, user: &User) -> Result<(), ApplicationError> {
        let mut record = self.mapper.to_db(user)?;
        let mut rows = self.rows.lock().unwrap();
        if rows.contains_key(user.id()) {
            return Err(ApplicationError::repository(
                MemoryRepositoryError::AlreadyExists(user.id().to_string()),
            ));
        }
        record.row_id = self.next_row_id.fetch_add(1, Ordering::SeqCst) + 1;
        rows.insert(*user.id(), record);
        Ok(())
    }

    async fn update(&self, user: &User) -> Result<(), ApplicationError> {
        let mut rows = self.rows.lock().unwrap();
        let record = rows.get_mut(user.id()).ok_or_else(|| {
            ApplicationError::repository(MemoryRepositoryError::NotFound(user.id().to_string()))
        })?;
        self.mapper.to_db_update(user, record)?;
        Ok(())
    }

    async fn delete(&self, id: &EntityId) -> Result<(), ApplicationError> {
        self.rows.lock().unwrap().remove(id);
        Ok(())
    }

    async fn exists(&self, id: &EntityId) -> Result<bool, ApplicationError> {
        Ok(self.rows.lock().unwrap().contains_key(id))
    }
}

/// Events handed to the (simulated) infrastructure layer after commit.
#[derive(Clone, Default)]
struct Outbox(Arc<Mutex<Vec<UserEvent>>>);

impl Outbox {
    fn publish(&self, user: &mut User) {
        let events = user.get_domain_events();
        user.clear_domain_events();
        self.0.lock().unwrap().extend(events);
    }

    fn event_types(&self) -> Vec<&'static str> {
        self.0.lock().unwrap().iter().map(|e| e.event_type()).collect()
    }
}

// =========================================================================
// Requests, validators, handlers
// =========================================================================

struct RegisterUser {
    email: String,
    display_name: String,
    actor: String,
}

impl Request for RegisterUser {
    type Response = ApiResponse<UserDto>;
}

struct RegisterUserValidator;

impl Validator<RegisterUser> for RegisterUserValidator {
    fn validate(&self, request: &RegisterUser) -> Vec<String> {
        let mut errors = Vec::new();
        if request.email.is_empty() {
            errors.push("email is required".to_string());
        }
        if request.display_name.is_empty() {
            errors.push("display_name is required".to_string());
        }
        errors
    }
}

struct RegisterUserHandler {
    context: HandlerContext<UserRows, RegisterUserValidator, UserMapper>,
    outbox: Outbox,
}

#[async_trait]
impl RequestHandler<RegisterUser> for RegisterUserHandler {
    async fn handle(&self, request: RegisterUser) -> Result<ApiResponse<UserDto>, ApplicationError> {
        let errors = self.context.validation_errors(&request);
        if !errors.is_empty() {
            return Ok(ApiResponse::bad_request_with(errors.join("; ")));
        }

        let mut user = match User::create(NewUser {
            email: request.email,
            display_name: request.display_name,
            registered_by: request.actor,
        }) {
            Ok(user) => user,
            Err(err) => return Ok(ApiResponse::bad_request_with(err.to_string())),
        };

        self.context.repository().add(&user).await?;
        self.outbox.publish(&mut user);

        Ok(ApiResponse::success(dto_of(self.context.mapper(), &user)?))
    }
}

struct GetUser {
    id: EntityId,
}

impl Request for GetUser {
    type Response = ApiResponse<UserDto>;
}

struct GetUserHandler {
    context: HandlerContext<UserRows, AcceptAll, UserMapper>,
}

#[async_trait]
impl RequestHandler<GetUser> for GetUserHandler {
    async fn handle(&self, request: GetUser) -> Result<ApiResponse<UserDto>, ApplicationError> {
        match self.context.repository().find_by_id(&request.id).await? {
            Some(user) => Ok(ApiResponse::success(dto_of(self.context.mapper(), &user)?)),
            None => Ok(ApiResponse::not_found_with("User not found.")),
        }
    }
}

struct RenameUser {
    id: EntityId,
    display_name: String,
    actor: String,
}

impl Request for RenameUser {
    type Response = ApiResponse<UserDto>;
}

struct RenameUserValidator;

impl Validator<RenameUser> for RenameUserValidator {
    fn validate(&self, request: &RenameUser) -> Vec<String> {
        if request.display_name.len() > 32 {
            vec!["display_name must be at most 32 characters".to_string()]
        } else {
            Vec::new()
        }
    }
}

struct RenameUserHandler {
    context: HandlerContext<UserRows, RenameUserValidator, UserMapper>,
    outbox: Outbox,
}

#[async_trait]
impl RequestHandler<RenameUser> for RenameUserHandler {
    async fn handle(&self, request: RenameUser) -> Result<ApiResponse<UserDto>, ApplicationError> {
        self.context.ensure_valid(&request)?;

        let Some(mut user) = self.context.repository().find_by_id(&request.id).await? else {
            return Ok(ApiResponse::not_found());
        };

        user.rename(request.display_name, &request.actor)?;
        self.context.repository().update(&user).await?;
        self.outbox.publish(&mut user);

        Ok(ApiResponse::success(dto_of(self.context.mapper(), &user)?))
    }
}

struct DeleteUser {
    id: EntityId,
}

impl Request for DeleteUser {
    type Response = ApiResponse<()>;
}

struct DeleteUserHandler {
    context: HandlerContext<UserRows, AcceptAll, UserMapper>,
}

#[async_trait]
impl RequestHandler<DeleteUser> for DeleteUserHandler {
    async fn handle(&self, request: DeleteUser) -> Result<ApiResponse<()>, ApplicationError> {
        let repository = self.context.repository();
        if !repository.exists(&request.id).await? {
            return Ok(ApiResponse::not_found());
        }
        repository.delete(&request.id).await?;
        Ok(ApiResponse::success_empty())
    }
}

struct ListUsers {
    page: PageRequest,
}

impl Request for ListUsers {
    type Response = PaginatedResponse<UserDto>;
}

struct ListUsersHandler {
    context: HandlerContext<UserRows, AcceptAll, UserMapper>,
}

#[async_trait]
impl RequestHandler<ListUsers> for ListUsersHandler {
    async fn handle(
        &self,
        request: ListUsers,
    ) -> Result<PaginatedResponse<UserDto>, ApplicationError> {
        let users = self.context.repository().all()?;
        let total_count = users.len() as u64;
        let items = users
            .iter()
            .skip(request.page.offset() as usize)
            .take(request.page.limit() as usize)
            .map(|user| dto_of(self.context.mapper(), user))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(PaginatedResponse::from_page(PagedResult::for_request(
            items,
            total_count,
            request.page,
        )))
    }
}

// =========================================================================
// Wiring
// =========================================================================

struct Service {
    mediator: Mediator,
    rows: UserRows,
    outbox: Outbox,
}

fn build_service(config: &KernelConfig) -> Service {
    let rows = UserRows::default();
    let outbox = Outbox::default();
    let mut mediator = Mediator::with_config(config);

    mediator
        .register::<RegisterUser, _>(RegisterUserHandler {
            context: HandlerContext::new(rows.clone(), RegisterUserValidator, UserMapper),
            outbox: outbox.clone(),
        })
        .unwrap();
    mediator
        .register::<GetUser, _>(GetUserHandler {
            context: HandlerContext::new(rows.clone(), AcceptAll, UserMapper),
        })
        .unwrap();
    mediator
        .register::<RenameUser, _>(RenameUserHandler {
            context: HandlerContext::new(rows.clone(), RenameUserValidator, UserMapper),
            outbox: outbox.clone(),
        })
        .unwrap();
    mediator
        .register::<DeleteUser, _>(DeleteUserHandler {
            context: HandlerContext::new(rows.clone(), AcceptAll, UserMapper),
        })
        .unwrap();
    mediator
        .register::<ListUsers, _>(ListUsersHandler {
            context: HandlerContext::new(rows.clone(), AcceptAll, UserMapper),
        })
        .unwrap();

    Service {
        mediator,
        rows,
        outbox,
    }
}

fn service() -> Service {
    build_service(&KernelConfig::default())
}

fn register(email: &str, name: &str) -> RegisterUser {
    RegisterUser {
        email: email.to_string(),
        display_name: name.to_string(),
        actor: "admin".to_string(),
    }
}

async fn registered(service: &Service, email: &str, name: &str) -> UserDto {
    service
        .mediator
        .send(register(email, name))
        .await
        .unwrap()
        .data
        .unwrap()
}

// =========================================================================
// Tests
// =========================================================================

mod commands {
    use super::*;

    #[tokio::test]
    async fn register_user_persists_and_publishes() {
        let service = service();

        let response = service
            .mediator
            .send(register("ada@example.com", "Ada"))
            .await
            .unwrap();

        assert_eq!(response.code, ResponseCode::Success);
        let dto = response.data.unwrap();
        assert_eq!(dto.email, "ada@example.com");
        assert_eq!(dto.display_name, "Ada");

        let row = service.rows.row(&dto.id).unwrap();
        assert_eq!(row.row_id, 1);
        assert_eq!(row.created_by.as_deref(), Some("admin"));
        assert_eq!(service.outbox.event_types(), vec!["UserRegistered"]);
    }

    #[tokio::test]
    async fn invalid_registration_returns_bad_request() {
        let service = service();

        let response = service.mediator.send(register("", "")).await.unwrap();

        assert_eq!(response.code, ResponseCode::BadRequest);
        assert_eq!(
            response.message.as_deref(),
            Some("email is required; display_name is required")
        );
        assert!(response.data.is_none());
        assert!(service.rows.all().unwrap().is_empty());
        assert!(service.outbox.event_types().is_empty());
    }

    #[tokio::test]
    async fn domain_rejection_returns_bad_request() {
        let service = service();

        let response = service
            .mediator
            .send(register("not-an-email", "Ada"))
            .await
            .unwrap();

        assert_eq!(response.code, ResponseCode::BadRequest);
        assert!(response.message.unwrap().contains("email"));
    }

    #[tokio::test]
    async fn rename_updates_row_in_place() {
        let service = service();
        let dto = registered(&service, "grace@example.com", "Grace").await;

        let response = service
            .mediator
            .send(RenameUser {
                id: dto.id,
                display_name: "Grace Hopper".to_string(),
                actor: "grace".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(response.data.unwrap().display_name, "Grace Hopper");

        let row = service.rows.row(&dto.id).unwrap();
        assert_eq!(row.row_id, 1);
        assert_eq!(row.display_name, "Grace Hopper");
        assert_eq!(row.created_by.as_deref(), Some("admin"));
        assert_eq!(row.updated_by.as_deref(), Some("grace"));
        assert!(row.updated_at.is_some());
        assert_eq!(
            service.outbox.event_types(),
            vec!["UserRegistered", "UserRenamed"]
        );
    }

    #[tokio::test]
    async fn rename_validation_failure_is_raised() {
        let service = service();
        let dto = registered(&service, "alan@example.com", "Alan").await;

        let err = service
            .mediator
            .send(RenameUser {
                id: dto.id,
                display_name: "x".repeat(40),
                actor: "alan".to_string(),
            })
            .await
            .unwrap_err();

        assert_eq!(
            err.validation_errors(),
            Some(&["display_name must be at most 32 characters".to_string()][..])
        );
        assert_eq!(service.rows.row(&dto.id).unwrap().display_name, "Alan");
    }

    #[tokio::test]
    async fn blank_rename_surfaces_domain_error() {
        let service = service();
        let dto = registered(&service, "alan@example.com", "Alan").await;

        let err = service
            .mediator
            .send(RenameUser {
                id: dto.id,
                display_name: "   ".to_string(),
                actor: "alan".to_string(),
            })
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ApplicationError::Domain(DomainError::InvalidValue {
                field: "display_name",
                ..
            })
        ));
    }

    #[tokio::test]
    async fn rename_missing_user_is_not_found() {
        let service = service();

        let response = service
            .mediator
            .send(RenameUser {
                id: EntityId::new(),
                display_name: "Nobody".to_string(),
                actor: "admin".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(response.code, ResponseCode::NotFound);
        assert_eq!(response.message.as_deref(), Some("Not found."));
    }

    #[tokio::test]
    async fn delete_user_then_lookups_miss() {
        let service = service();
        let dto = registered(&service, "edsger@example.com", "Edsger").await;

        let deleted = service
            .mediator
            .send(DeleteUser { id: dto.id })
            .await
            .unwrap();
        assert!(deleted.is_success());

        let lookup = service.mediator.send(GetUser { id: dto.id }).await.unwrap();
        assert_eq!(lookup.code, ResponseCode::NotFound);

        let again = service
            .mediator
            .send(DeleteUser { id: dto.id })
            .await
            .unwrap();
        assert_eq!(again.code, ResponseCode::NotFound);
    }
}

mod queries {
    use super::*;

    #[tokio::test]
    async fn get_user_returns_transfer_object() {
        let service = service();
        let dto = registered(&service, "ada@example.com", "Ada").await;

        let response = service.mediator.send(GetUser { id: dto.id }).await.unwrap();

        assert_eq!(response.code, ResponseCode::Success);
        assert_eq!(response.data, Some(dto));
    }

    #[tokio::test]
    async fn get_missing_user_is_not_found() {
        let service = service();

        let response = service
            .mediator
            .send(GetUser { id: EntityId::new() })
            .await
            .unwrap();

        assert_eq!(response.code, ResponseCode::NotFound);
        assert_eq!(response.message.as_deref(), Some("User not found."));
        assert!(response.data.is_none());
    }

    #[tokio::test]
    async fn list_users_is_paginated() {
        let service = service();
        for name in ["Ada", "Barbara", "Claude", "Donald", "Edsger"] {
            registered(&service, &format!("{}@example.com", name.to_lowercase()), name).await;
        }

        let response = service
            .mediator
            .send(ListUsers {
                page: PageRequest::new(2, 2).unwrap(),
            })
            .await
            .unwrap();

        assert_eq!(response.code, ResponseCode::Success);
        assert_eq!(response.page_number, 2);
        assert_eq!(response.total_page, 3);
        assert_eq!(response.total_count, 5);
        assert!(response.has_previous_page());
        assert!(response.has_next_page());

        let page = response.data.unwrap();
        let names: Vec<_> = page.items().iter().map(|u| u.display_name.as_str()).collect();
        assert_eq!(names, vec!["Claude", "Donald"]);
        assert_eq!(page.next_page(), Some(3));
    }

    #[tokio::test]
    async fn response_envelope_serializes_by_code_name() {
        let service = service();
        let dto = registered(&service, "ada@example.com", "Ada").await;

        let response = service.mediator.send(GetUser { id: dto.id }).await.unwrap();
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["code"], "SUCCESS");
        assert_eq!(json["message"], serde_json::Value::Null);
        assert_eq!(json["data"]["display_name"], "Ada");
    }
}

mod wiring {
    use super::*;

    struct Unrouted;

    impl Request for Unrouted {
        type Response = ApiResponse<()>;
    }

    #[tokio::test]
    async fn unregistered_request_fails() {
        let service = service();

        let err = service.mediator.send(Unrouted).await.unwrap_err();

        assert!(matches!(
            err,
            ApplicationError::NoHandlerRegistered {
                request_type: "Unrouted"
            }
        ));
    }

    #[tokio::test]
    async fn reject_policy_from_config_blocks_rewiring() {
        let config = KernelConfig::from_lookup(|key| {
            (key == "KERNEL_HANDLER_REGISTRATION").then(|| "reject".to_string())
        });
        let mut service = build_service(&config);
        assert_eq!(service.mediator.policy(), RegistrationPolicy::Reject);

        let err = service
            .mediator
            .register::<GetUser, _>(GetUserHandler {
                context: HandlerContext::new(service.rows.clone(), AcceptAll, UserMapper),
            })
            .unwrap_err();

        assert!(matches!(
            err,
            ApplicationError::HandlerAlreadyRegistered { .. }
        ));
        assert_eq!(service.mediator.len(), 5);
    }

    #[tokio::test]
    async fn mapper_round_trips_through_every_representation() {
        let mapper = UserMapper;
        let user = User::create(NewUser {
            email: "ada@example.com".to_string(),
            display_name: "Ada".to_string(),
            registered_by: "admin".to_string(),
        })
        .unwrap();

        let record = mapper
            .map(MapSource::Domain(&user), TargetType::of::<UserRecord>())
            .unwrap()
            .into_persistence()
            .unwrap();
        let from_record = mapper
            .map(MapSource::Persistence(&record), TargetType::of::<User>())
            .unwrap()
            .into_domain()
            .unwrap();
        let dto = dto_of(&mapper, &from_record).unwrap();
        let from_dto = mapper
            .map(MapSource::Transfer(&dto), TargetType::of::<User>())
            .unwrap()
            .into_domain()
            .unwrap();

        assert_eq!(from_record, user);
        assert_eq!(from_dto, user);
        assert!(from_record.get_domain_events().is_empty());
        assert_eq!(user.get_domain_events().len(), 1);

        let err = mapper
            .map(MapSource::Transfer(&dto), TargetType::of::<UserDto>())
            .unwrap_err();
        assert!(matches!(err, ApplicationError::UnsupportedMapping(_)));
    }
}
