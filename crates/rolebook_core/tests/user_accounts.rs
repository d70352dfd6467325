use rolebook_core::db::SessionFactory;
use rolebook_core::service::SqliteUserService;
use rolebook_core::{
    open_store_in_memory, Argon2PasswordEncoder, Dao, Permission, PasswordEncoder,
    PermissionService, ServiceError, SqlitePermissionDao, SqliteUserDao, UserDao, UserDto,
    UserService, ValidationErrors,
};
use std::collections::HashSet;

fn user_service(sessions: &SessionFactory) -> SqliteUserService<'_> {
    UserService::init(
        SqliteUserDao::new(sessions),
        SqlitePermissionDao::new(sessions),
        Argon2PasswordEncoder::new(),
    )
    .unwrap()
}

fn stored_password(sessions: &SessionFactory, id: i64) -> String {
    SqliteUserDao::new(sessions)
        .get(id)
        .unwrap()
        .unwrap()
        .password
}

#[test]
fn create_encodes_password_before_storage() {
    let sessions = open_store_in_memory().unwrap();
    let service = user_service(&sessions);

    let id = service
        .create(UserDto::new("maria", "s3cret", ["ROLE_USER"]))
        .unwrap();

    let stored = stored_password(&sessions, id);
    assert_ne!(stored, "s3cret");
    assert!(Argon2PasswordEncoder::new().matches("s3cret", &stored));

    let dto = service.get(id).unwrap();
    assert_eq!(dto.username, "maria");
    assert_eq!(dto.permissions, vec!["ROLE_USER".to_string()]);
}

#[test]
fn update_with_blank_password_keeps_stored_hash() {
    let sessions = open_store_in_memory().unwrap();
    let service = user_service(&sessions);
    let id = service
        .create(UserDto::new("maria", "s3cret", ["ROLE_USER"]))
        .unwrap();
    let before = stored_password(&sessions, id);

    let mut update = UserDto::new("maria.c", "", ["ROLE_USER", "ROLE_READ"]);
    update.id = Some(id);
    service.update(update).unwrap();

    let after = SqliteUserDao::new(&sessions).get(id).unwrap().unwrap();
    assert_eq!(after.password, before);
    assert_eq!(after.username, "maria.c");
    assert_eq!(after.permissions.len(), 2);
}

#[test]
fn update_with_new_password_stores_its_encoding() {
    let sessions = open_store_in_memory().unwrap();
    let service = user_service(&sessions);
    let id = service
        .create(UserDto::new("maria", "s3cret", Vec::<String>::new()))
        .unwrap();
    let before = stored_password(&sessions, id);

    let mut update = UserDto::new("maria", "n3w-pass", Vec::<String>::new());
    update.id = Some(id);
    service.update(update).unwrap();

    let after = stored_password(&sessions, id);
    let encoder = Argon2PasswordEncoder::new();
    assert_ne!(after, before);
    assert!(encoder.matches("n3w-pass", &after));
    assert!(!encoder.matches("s3cret", &after));
}

#[test]
fn update_of_missing_user_is_not_found() {
    let sessions = open_store_in_memory().unwrap();
    let service = user_service(&sessions);

    let mut update = UserDto::new("ghost", "x", Vec::<String>::new());
    update.id = Some(41);
    let err = service.update(update).unwrap_err();

    let validation = err.validation().unwrap();
    assert_eq!(validation.message_key(), "user.validation.message.notFound");
    assert_eq!(validation.args(), ["41".to_string()]);
    assert_eq!(validation.target(), Some(&UserDto::default()));
}

#[test]
fn duplicate_username_is_a_validation_error_and_keeps_one_row() {
    let sessions = open_store_in_memory().unwrap();
    let service = user_service(&sessions);
    service
        .create(UserDto::new("maria", "first", Vec::<String>::new()))
        .unwrap();

    let err = service
        .create(UserDto::new("maria", "second", ["ROLE_USER"]))
        .unwrap_err();

    let validation = err.validation().unwrap();
    assert_eq!(
        validation.message_key(),
        "user.validation.message.duplicateEntry"
    );
    assert_eq!(validation.args(), ["maria".to_string()]);
    let target = validation.target().unwrap();
    assert_eq!(target.id, None);
    assert_eq!(target.username, "maria");
    assert_eq!(err.to_string(), "A user named \"maria\" already exists.");

    let users = service.list().unwrap();
    assert_eq!(
        users.iter().filter(|user| user.username == "maria").count(),
        1
    );
}

#[test]
fn renaming_onto_existing_username_is_duplicate_entry() {
    let sessions = open_store_in_memory().unwrap();
    let service = user_service(&sessions);
    service
        .create(UserDto::new("maria", "a", Vec::<String>::new()))
        .unwrap();
    let juan = service
        .create(UserDto::new("juan", "b", Vec::<String>::new()))
        .unwrap();

    let mut update = UserDto::new("maria", "", Vec::<String>::new());
    update.id = Some(juan);
    let err = service.update(update).unwrap_err();

    assert_eq!(
        err.validation().unwrap().message_key(),
        "user.validation.message.duplicateEntry"
    );
    assert_eq!(service.get(juan).unwrap().username, "juan");
}

#[test]
fn validate_accumulates_every_username_violation() {
    let sessions = open_store_in_memory().unwrap();
    let service = user_service(&sessions);

    let mut errors = ValidationErrors::new();
    service.validate(&UserDto::new("", "x", Vec::<String>::new()), &mut errors);
    assert_eq!(errors.len(), 1);

    let mut errors = ValidationErrors::new();
    service.validate(
        &UserDto::new("a".repeat(256), "x", Vec::<String>::new()),
        &mut errors,
    );
    assert_eq!(errors.len(), 1);
    assert_eq!(
        errors.to_string(),
        "Username must not exceed 255 characters."
    );

    let mut errors = ValidationErrors::new();
    service.validate(
        &UserDto::new(" ".repeat(300), "x", Vec::<String>::new()),
        &mut errors,
    );
    let keys: Vec<_> = errors
        .field_errors("username")
        .map(|error| error.message_key)
        .collect();
    assert_eq!(
        keys,
        vec!["validation.message.notEmpty", "validation.message.maxLength"]
    );

    let mut errors = ValidationErrors::new();
    service.validate(
        &UserDto::new("a".repeat(255), "x", Vec::<String>::new()),
        &mut errors,
    );
    assert!(!errors.has_errors());
}

#[test]
fn create_rejects_invalid_username_without_touching_store() {
    let sessions = open_store_in_memory().unwrap();
    let service = user_service(&sessions);

    let err = service
        .create(UserDto::new("", "x", Vec::<String>::new()))
        .unwrap_err();

    assert!(matches!(err, ServiceError::Rejected(ref errors) if errors.len() == 1));
    assert!(service.list().unwrap().is_empty());
}

#[test]
fn load_user_by_username_returns_none_for_unknown_user() {
    let sessions = open_store_in_memory().unwrap();
    let service = user_service(&sessions);

    assert!(service.load_user_by_username("nobody").unwrap().is_none());
}

#[test]
fn load_user_by_username_builds_principal_from_stored_hash() {
    let sessions = open_store_in_memory().unwrap();
    let service = user_service(&sessions);
    let id = service
        .create(UserDto::new("maria", "s3cret", ["ROLE_USER", "PERSON_READ"]))
        .unwrap();

    let principal = service.load_user_by_username("maria").unwrap().unwrap();

    assert_eq!(principal.username, "maria");
    assert_eq!(principal.password, stored_password(&sessions, id));
    let names: Vec<_> = principal
        .authorities
        .iter()
        .map(|authority| authority.as_str())
        .collect();
    assert_eq!(names, vec!["PERSON_READ", "ROLE_USER"]);
}

#[test]
fn admin_sentinel_expands_to_full_catalog() {
    let sessions = open_store_in_memory().unwrap();
    let service = user_service(&sessions);
    service
        .create(UserDto::new("root", "s3cret", ["ROLE_ADMIN", "PERSON_READ"]))
        .unwrap();

    let principal = service.load_user_by_username("root").unwrap().unwrap();

    let catalog: Vec<_> = SqlitePermissionDao::new(&sessions)
        .list()
        .unwrap()
        .into_iter()
        .map(|permission| permission.name)
        .collect();
    let granted: Vec<_> = principal
        .authorities
        .iter()
        .map(|authority| authority.to_string())
        .collect();
    assert_eq!(granted, catalog);
    assert!(principal.has_authority("ROLE_WRITE"));
}

#[test]
fn get_authorities_without_admin_maps_names_directly() {
    let sessions = open_store_in_memory().unwrap();
    let service = user_service(&sessions);

    let held: HashSet<Permission> = [Permission::new("ROLE_READ")].into_iter().collect();
    let authorities = service.get_authorities(&held);

    assert_eq!(authorities.len(), 1);
    assert_eq!(authorities[0].as_str(), "ROLE_READ");
}

#[test]
fn create_model_drops_unknown_permission_names() {
    let sessions = open_store_in_memory().unwrap();
    let service = user_service(&sessions);

    let model = service.create_model(&UserDto::new(
        "maria",
        "hash",
        ["ROLE_USER", "NOT_A_PERMISSION", "ROLE_USER"],
    ));

    assert_eq!(model.permissions.len(), 1);
    let permission = model.permissions.iter().next().unwrap();
    assert_eq!(permission.name, "ROLE_USER");
    assert!(permission.id.is_some());
}

#[test]
fn catalog_is_stale_until_refreshed() {
    let sessions = open_store_in_memory().unwrap();
    let mut service = user_service(&sessions);
    let permissions = PermissionService::new(SqlitePermissionDao::new(&sessions));
    permissions.create(&Permission::new("REPORT_READ")).unwrap();

    assert!(service.catalog().resolve("REPORT_READ").is_none());

    service.refresh_permissions().unwrap();
    assert!(service.catalog().resolve("REPORT_READ").is_some());
    assert_eq!(service.catalog().len(), 7);
}

#[test]
fn authenticate_checks_password_against_hash() {
    let sessions = open_store_in_memory().unwrap();
    let service = user_service(&sessions);
    service
        .create(UserDto::new("maria", "s3cret", ["ROLE_USER"]))
        .unwrap();

    assert!(service.authenticate("maria", "s3cret").unwrap().is_some());
    assert!(service.authenticate("maria", "wrong").unwrap().is_none());
    assert!(service.authenticate("nobody", "s3cret").unwrap().is_none());
}

#[test]
fn delete_user_removes_permission_links() {
    let sessions = open_store_in_memory().unwrap();
    let service = user_service(&sessions);
    let id = service
        .create(UserDto::new("maria", "s3cret", ["ROLE_USER"]))
        .unwrap();

    service.delete(id).unwrap();

    assert!(SqliteUserDao::new(&sessions)
        .get_by_username("maria")
        .unwrap()
        .is_none());
    let links: i64 = sessions
        .open_read_only_session()
        .unwrap()
        .connection()
        .query_row("SELECT COUNT(*) FROM user_permissions;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(links, 0);

    let err = service.delete(id).unwrap_err();
    assert_eq!(
        err.validation().unwrap().message_key(),
        "user.validation.message.notFound"
    );
}

#[test]
fn deleting_permission_drops_it_from_users() {
    let sessions = open_store_in_memory().unwrap();
    let service = user_service(&sessions);
    let id = service
        .create(UserDto::new("maria", "s3cret", ["ROLE_USER", "ROLE_READ"]))
        .unwrap();
    let permissions = SqlitePermissionDao::new(&sessions);
    let role_read = permissions
        .list()
        .unwrap()
        .into_iter()
        .find(|permission| permission.name == "ROLE_READ")
        .unwrap();

    permissions.delete(role_read.id.unwrap()).unwrap();

    assert_eq!(
        service.get(id).unwrap().permissions,
        vec!["ROLE_USER".to_string()]
    );
}

#[test]
fn user_dto_serialization_omits_password() {
    let mut dto = UserDto::new("maria", "s3cret", ["ROLE_USER"]);
    dto.id = Some(3);

    let json = serde_json::to_value(&dto).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "id": 3,
            "username": "maria",
            "permissions": ["ROLE_USER"]
        })
    );

    let parsed: UserDto =
        serde_json::from_str(r#"{"id":null,"username":"juan","password":"pw"}"#).unwrap();
    assert_eq!(parsed.password, "pw");
    assert!(parsed.permissions.is_empty());
}
