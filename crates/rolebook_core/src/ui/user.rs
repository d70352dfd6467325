//! User, permission and sign-in console handlers.

use super::{read_id, split_list, Console, UiHandler, UiResult};
use crate::model::user::UserDto;
use crate::service::{SqlitePermissionService, SqliteUserService};

const USERNAME_PROMPT: &str = "Please enter the username: ";
const PASSWORD_PROMPT: &str = "Please enter the password: ";
const NEW_PASSWORD_PROMPT: &str = "Please enter the new password (leave blank to keep): ";
const PERMISSIONS_PROMPT: &str = "Please enter the permissions (comma separated): ";
const USER_ID_PROMPT: &str = "Please enter the user ID: ";

fn describe(user: &UserDto) -> String {
    let id = user.id.unwrap_or_default();
    if user.permissions.is_empty() {
        format!("[{id}] {}", user.username)
    } else {
        format!("[{id}] {} ({})", user.username, user.permissions.join(", "))
    }
}

pub struct CreateUserUiHandler<'a> {
    operation_name: String,
    service: &'a SqliteUserService<'a>,
}

impl<'a> CreateUserUiHandler<'a> {
    pub fn new(operation_name: impl Into<String>, service: &'a SqliteUserService<'a>) -> Self {
        Self {
            operation_name: operation_name.into(),
            service,
        }
    }
}

impl UiHandler for CreateUserUiHandler<'_> {
    fn operation_name(&self) -> &str {
        &self.operation_name
    }

    fn handle(&self, console: &mut dyn Console) -> UiResult<()> {
        let username = console.read_line(USERNAME_PROMPT)?;
        let password = console.read_line(PASSWORD_PROMPT)?;
        let permissions = split_list(&console.read_line(PERMISSIONS_PROMPT)?);

        self.service
            .create(UserDto::new(username.clone(), password, permissions))?;
        console.write_line(&format!("Successfully created the user \"{username}\"!"))
    }

    fn relinquish_control(&self) -> bool {
        true
    }
}

pub struct ListUsersUiHandler<'a> {
    operation_name: String,
    service: &'a SqliteUserService<'a>,
}

impl<'a> ListUsersUiHandler<'a> {
    pub fn new(operation_name: impl Into<String>, service: &'a SqliteUserService<'a>) -> Self {
        Self {
            operation_name: operation_name.into(),
            service,
        }
    }
}

impl UiHandler for ListUsersUiHandler<'_> {
    fn operation_name(&self) -> &str {
        &self.operation_name
    }

    fn handle(&self, console: &mut dyn Console) -> UiResult<()> {
        let users = self.service.list()?;
        if users.is_empty() {
            return console.write_line("There are no users.");
        }
        for user in &users {
            console.write_line(&describe(user))?;
        }
        Ok(())
    }

    fn relinquish_control(&self) -> bool {
        true
    }
}

pub struct UpdateUserUiHandler<'a> {
    operation_name: String,
    service: &'a SqliteUserService<'a>,
}

impl<'a> UpdateUserUiHandler<'a> {
    pub fn new(operation_name: impl Into<String>, service: &'a SqliteUserService<'a>) -> Self {
        Self {
            operation_name: operation_name.into(),
            service,
        }
    }
}

impl UiHandler for UpdateUserUiHandler<'_> {
    fn operation_name(&self) -> &str {
        &self.operation_name
    }

    fn handle(&self, console: &mut dyn Console) -> UiResult<()> {
        let id = read_id(console, USER_ID_PROMPT)?;
        self.service.get(id)?;
        let username = console.read_line(USERNAME_PROMPT)?;
        let password = console.read_line(NEW_PASSWORD_PROMPT)?;
        let permissions = split_list(&console.read_line(PERMISSIONS_PROMPT)?);

        let mut user = UserDto::new(username.clone(), password, permissions);
        user.id = Some(id);
        self.service.update(user)?;
        console.write_line(&format!("Successfully updated the user \"{username}\"!"))
    }

    fn relinquish_control(&self) -> bool {
        true
    }
}

pub struct DeleteUserUiHandler<'a> {
    operation_name: String,
    service: &'a SqliteUserService<'a>,
}

impl<'a> DeleteUserUiHandler<'a> {
    pub fn new(operation_name: impl Into<String>, service: &'a SqliteUserService<'a>) -> Self {
        Self {
            operation_name: operation_name.into(),
            service,
        }
    }
}

impl UiHandler for DeleteUserUiHandler<'_> {
    fn operation_name(&self) -> &str {
        &self.operation_name
    }

    fn handle(&self, console: &mut dyn Console) -> UiResult<()> {
        let id = read_id(console, USER_ID_PROMPT)?;
        let user = self.service.get(id)?;
        self.service.delete(id)?;
        console.write_line(&format!(
            "Successfully deleted the user \"{}\"!",
            user.username
        ))
    }

    fn relinquish_control(&self) -> bool {
        true
    }
}

/// Checks a username/password pair and prints the granted authorities.
pub struct SignInUiHandler<'a> {
    operation_name: String,
    service: &'a SqliteUserService<'a>,
}

impl<'a> SignInUiHandler<'a> {
    pub fn new(operation_name: impl Into<String>, service: &'a SqliteUserService<'a>) -> Self {
        Self {
            operation_name: operation_name.into(),
            service,
        }
    }
}

impl UiHandler for SignInUiHandler<'_> {
    fn operation_name(&self) -> &str {
        &self.operation_name
    }

    fn handle(&self, console: &mut dyn Console) -> UiResult<()> {
        let username = console.read_line(USERNAME_PROMPT)?;
        let password = console.read_line(PASSWORD_PROMPT)?;

        match self.service.authenticate(&username, &password)? {
            Some(principal) => {
                let authorities = principal
                    .authorities
                    .iter()
                    .map(|authority| authority.as_str())
                    .collect::<Vec<_>>()
                    .join(", ");
                console.write_line(&format!(
                    "Signed in as \"{}\" with authorities [{authorities}].",
                    principal.username
                ))
            }
            None => console.write_line("Invalid username or password."),
        }
    }

    fn relinquish_control(&self) -> bool {
        true
    }
}

pub struct ListPermissionsUiHandler<'a> {
    operation_name: String,
    service: &'a SqlitePermissionService<'a>,
}

impl<'a> ListPermissionsUiHandler<'a> {
    pub fn new(
        operation_name: impl Into<String>,
        service: &'a SqlitePermissionService<'a>,
    ) -> Self {
        Self {
            operation_name: operation_name.into(),
            service,
        }
    }
}

impl UiHandler for ListPermissionsUiHandler<'_> {
    fn operation_name(&self) -> &str {
        &self.operation_name
    }

    fn handle(&self, console: &mut dyn Console) -> UiResult<()> {
        for permission in self.service.list()? {
            console.write_line(&format!(
                "[{}] {}",
                permission.id.unwrap_or_default(),
                permission.name
            ))?;
        }
        Ok(())
    }

    fn relinquish_control(&self) -> bool {
        true
    }
}
