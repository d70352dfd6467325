//! Role console handlers.

use super::{read_id, Console, UiHandler, UiResult};
use crate::model::role::Role;
use crate::service::SqliteRoleService;

const ROLE_NAME_PROMPT: &str = "Please enter the role name: ";
const ROLE_ID_PROMPT: &str = "Please enter the role ID: ";

pub struct CreateRoleUiHandler<'a> {
    operation_name: String,
    service: &'a SqliteRoleService<'a>,
}

impl<'a> CreateRoleUiHandler<'a> {
    pub fn new(operation_name: impl Into<String>, service: &'a SqliteRoleService<'a>) -> Self {
        Self {
            operation_name: operation_name.into(),
            service,
        }
    }
}

impl UiHandler for CreateRoleUiHandler<'_> {
    fn operation_name(&self) -> &str {
        &self.operation_name
    }

    fn handle(&self, console: &mut dyn Console) -> UiResult<()> {
        let role = Role::new(console.read_line(ROLE_NAME_PROMPT)?);
        self.service.create(&role)?;
        console.write_line(&format!("Successfully created the role \"{}\"!", role.name))
    }

    fn relinquish_control(&self) -> bool {
        true
    }
}

pub struct ListRolesUiHandler<'a> {
    operation_name: String,
    service: &'a SqliteRoleService<'a>,
}

impl<'a> ListRolesUiHandler<'a> {
    pub fn new(operation_name: impl Into<String>, service: &'a SqliteRoleService<'a>) -> Self {
        Self {
            operation_name: operation_name.into(),
            service,
        }
    }
}

impl UiHandler for ListRolesUiHandler<'_> {
    fn operation_name(&self) -> &str {
        &self.operation_name
    }

    fn handle(&self, console: &mut dyn Console) -> UiResult<()> {
        let roles = self.service.list()?;
        if roles.is_empty() {
            return console.write_line("There are no roles.");
        }
        for role in roles {
            console.write_line(&role.to_string())?;
        }
        Ok(())
    }

    fn relinquish_control(&self) -> bool {
        true
    }
}

pub struct UpdateRoleUiHandler<'a> {
    operation_name: String,
    service: &'a SqliteRoleService<'a>,
}

impl<'a> UpdateRoleUiHandler<'a> {
    pub fn new(operation_name: impl Into<String>, service: &'a SqliteRoleService<'a>) -> Self {
        Self {
            operation_name: operation_name.into(),
            service,
        }
    }
}

impl UiHandler for UpdateRoleUiHandler<'_> {
    fn operation_name(&self) -> &str {
        &self.operation_name
    }

    fn handle(&self, console: &mut dyn Console) -> UiResult<()> {
        let id = read_id(console, ROLE_ID_PROMPT)?;
        self.service.get(id)?;
        let role = Role::new(console.read_line(ROLE_NAME_PROMPT)?);
        let name = role.name.clone();
        self.service.update(id, role)?;
        console.write_line(&format!("Successfully updated the role \"{name}\"!"))
    }

    fn relinquish_control(&self) -> bool {
        true
    }
}

pub struct DeleteRoleUiHandler<'a> {
    operation_name: String,
    service: &'a SqliteRoleService<'a>,
}

impl<'a> DeleteRoleUiHandler<'a> {
    pub fn new(operation_name: impl Into<String>, service: &'a SqliteRoleService<'a>) -> Self {
        Self {
            operation_name: operation_name.into(),
            service,
        }
    }
}

impl UiHandler for DeleteRoleUiHandler<'_> {
    fn operation_name(&self) -> &str {
        &self.operation_name
    }

    fn handle(&self, console: &mut dyn Console) -> UiResult<()> {
        let id = read_id(console, ROLE_ID_PROMPT)?;
        self.service.delete(id)?;
        console.write_line(&format!("Successfully deleted the role with ID {id}!"))
    }

    fn relinquish_control(&self) -> bool {
        true
    }
}
