use rolebook_core::{
    open_store_in_memory, Dao, DaoError, DaoErrorKind, Name, Person, PersonService, Role,
    RoleService, ServiceError, SqlitePermissionDao, SqlitePersonDao, SqliteRoleDao,
};

#[test]
fn create_role_appends_exactly_one_row_in_id_order() {
    let sessions = open_store_in_memory().unwrap();
    let dao = SqliteRoleDao::new(&sessions);

    let first = dao.create(&Role::new("auditor")).unwrap();
    let second = dao.create(&Role::new("clerk")).unwrap();
    let before = dao.list().unwrap();

    let third = dao.create(&Role::new("manager")).unwrap();
    let after = dao.list().unwrap();

    assert_eq!(after.len(), before.len() + 1);
    let ids: Vec<_> = after.iter().map(|role| role.id.unwrap()).collect();
    assert_eq!(ids, vec![first, second, third]);
    assert!(first < second && second < third);
    assert_eq!(after.last().unwrap().name, "manager");
}

#[test]
fn create_ignores_client_supplied_identity() {
    let sessions = open_store_in_memory().unwrap();
    let dao = SqliteRoleDao::new(&sessions);

    let mut role = Role::new("auditor");
    role.id = Some(500);
    let id = dao.create(&role).unwrap();

    assert_ne!(id, 500);
    assert!(dao.get(500).unwrap().is_none());
    assert_eq!(dao.get(id).unwrap().unwrap().name, "auditor");
}

#[test]
fn update_forces_identity_to_target_id() {
    let sessions = open_store_in_memory().unwrap();
    let dao = SqliteRoleDao::new(&sessions);
    let target = dao.create(&Role::new("auditor")).unwrap();
    let other = dao.create(&Role::new("clerk")).unwrap();

    let mut stale = dao.get(other).unwrap().unwrap();
    stale.name = "senior auditor".to_string();
    dao.update(target, stale).unwrap();

    assert_eq!(dao.get(target).unwrap().unwrap().name, "senior auditor");
    assert_eq!(dao.get(other).unwrap().unwrap().name, "clerk");
}

#[test]
fn update_missing_role_returns_not_found() {
    let sessions = open_store_in_memory().unwrap();
    let dao = SqliteRoleDao::new(&sessions);

    let err = dao.update(77, Role::new("ghost")).unwrap_err();
    assert!(matches!(
        err,
        DaoError::NotFound {
            entity: "role",
            id: 77
        }
    ));
}

#[test]
fn delete_role_removes_row_from_listing() {
    let sessions = open_store_in_memory().unwrap();
    let dao = SqliteRoleDao::new(&sessions);
    let keep = dao.create(&Role::new("auditor")).unwrap();
    let drop_id = dao.create(&Role::new("clerk")).unwrap();

    dao.delete(drop_id).unwrap();

    let ids: Vec<_> = dao.list().unwrap().iter().map(|r| r.id.unwrap()).collect();
    assert_eq!(ids, vec![keep]);
}

#[test]
fn delete_missing_role_is_an_explicit_error() {
    let sessions = open_store_in_memory().unwrap();
    let dao = SqliteRoleDao::new(&sessions);
    dao.create(&Role::new("auditor")).unwrap();

    let err = dao.delete(404).unwrap_err();
    assert_eq!(err.kind(), DaoErrorKind::NotFound);
    assert_eq!(dao.list().unwrap().len(), 1);
}

#[test]
fn role_service_translates_missing_role_to_validation_error() {
    let sessions = open_store_in_memory().unwrap();
    let service = RoleService::new(SqliteRoleDao::new(&sessions));

    let err = service.delete(12).unwrap_err();
    let validation = err.validation().unwrap();
    assert_eq!(validation.message_key(), "role.validation.message.notFound");
    assert_eq!(validation.args(), ["12".to_string()]);
    assert_eq!(err.to_string(), "No role found with id 12.");

    assert!(service.get(12).unwrap_err().validation().is_some());
    assert!(service.update(12, Role::new("x")).unwrap_err().validation().is_some());
}

#[test]
fn role_service_rejects_blank_names_before_persisting() {
    let sessions = open_store_in_memory().unwrap();
    let service = RoleService::new(SqliteRoleDao::new(&sessions));

    let err = service.create(&Role::new("   ")).unwrap_err();
    match err {
        ServiceError::Rejected(errors) => {
            assert_eq!(errors.len(), 1);
            assert_eq!(errors.to_string(), "Role name must not be empty.");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(service.list().unwrap().is_empty());
}

#[test]
fn person_crud_roundtrip() {
    let sessions = open_store_in_memory().unwrap();
    let service = PersonService::new(SqlitePersonDao::new(&sessions));

    let id = service
        .create(&Person::new(Name::new("Rizal", "Jose", "Protacio")))
        .unwrap();
    let loaded = service.get(id).unwrap();
    assert_eq!(loaded.id, Some(id));
    assert_eq!(loaded.name.to_string(), "Rizal, Jose Protacio");

    service
        .update(id, Person::new(Name::new("Mercado", "Jose", "")))
        .unwrap();
    assert_eq!(service.get(id).unwrap().name.last(), "Mercado");

    service.delete(id).unwrap();
    assert!(service.list().unwrap().is_empty());

    let err = service.delete(id).unwrap_err();
    assert_eq!(
        err.validation().unwrap().message_key(),
        "person.validation.message.notFound"
    );
}

#[test]
fn permission_delete_requires_existing_row() {
    let sessions = open_store_in_memory().unwrap();
    let dao = SqlitePermissionDao::new(&sessions);

    let catalog = dao.list().unwrap();
    assert_eq!(catalog.len(), 6);
    let first_id = catalog[0].id.unwrap();

    dao.delete(first_id).unwrap();
    assert!(dao.get(first_id).unwrap().is_none());
    assert_eq!(dao.delete(first_id).unwrap_err().kind(), DaoErrorKind::NotFound);
}
