//! Person console handlers.

use super::{read_id, Console, UiHandler, UiResult};
use crate::model::name::Name;
use crate::model::person::Person;
use crate::service::SqlitePersonService;

const LAST_NAME_PROMPT: &str = "Please enter the last name: ";
const FIRST_NAME_PROMPT: &str = "Please enter the first name: ";
const MIDDLE_NAME_PROMPT: &str = "Please enter the middle name: ";
const PERSON_ID_PROMPT: &str = "Please enter the person ID: ";

fn read_name(console: &mut dyn Console) -> UiResult<Name> {
    Ok(Name::new(
        console.read_line(LAST_NAME_PROMPT)?,
        console.read_line(FIRST_NAME_PROMPT)?,
        console.read_line(MIDDLE_NAME_PROMPT)?,
    ))
}

pub struct CreatePersonUiHandler<'a> {
    operation_name: String,
    service: &'a SqlitePersonService<'a>,
}

impl<'a> CreatePersonUiHandler<'a> {
    pub fn new(operation_name: impl Into<String>, service: &'a SqlitePersonService<'a>) -> Self {
        Self {
            operation_name: operation_name.into(),
            service,
        }
    }
}

impl UiHandler for CreatePersonUiHandler<'_> {
    fn operation_name(&self) -> &str {
        &self.operation_name
    }

    fn handle(&self, console: &mut dyn Console) -> UiResult<()> {
        let name = read_name(console)?;
        self.service.create(&Person::new(name.clone()))?;
        console.write_line(&format!("Successfully created the person \"{name}\"!"))
    }

    fn relinquish_control(&self) -> bool {
        true
    }
}

pub struct ListPersonsUiHandler<'a> {
    operation_name: String,
    service: &'a SqlitePersonService<'a>,
}

impl<'a> ListPersonsUiHandler<'a> {
    pub fn new(operation_name: impl Into<String>, service: &'a SqlitePersonService<'a>) -> Self {
        Self {
            operation_name: operation_name.into(),
            service,
        }
    }
}

impl UiHandler for ListPersonsUiHandler<'_> {
    fn operation_name(&self) -> &str {
        &self.operation_name
    }

    fn handle(&self, console: &mut dyn Console) -> UiResult<()> {
        let persons = self.service.list()?;
        if persons.is_empty() {
            return console.write_line("There are no persons.");
        }
        for person in persons {
            let id = person.id.unwrap_or_default();
            console.write_line(&format!("[{id}] {person}"))?;
        }
        Ok(())
    }

    fn relinquish_control(&self) -> bool {
        true
    }
}

pub struct UpdatePersonUiHandler<'a> {
    operation_name: String,
    service: &'a SqlitePersonService<'a>,
}

impl<'a> UpdatePersonUiHandler<'a> {
    pub fn new(operation_name: impl Into<String>, service: &'a SqlitePersonService<'a>) -> Self {
        Self {
            operation_name: operation_name.into(),
            service,
        }
    }
}

impl UiHandler for UpdatePersonUiHandler<'_> {
    fn operation_name(&self) -> &str {
        &self.operation_name
    }

    fn handle(&self, console: &mut dyn Console) -> UiResult<()> {
        let id = read_id(console, PERSON_ID_PROMPT)?;
        self.service.get(id)?;
        let name = read_name(console)?;
        self.service.update(id, Person::new(name.clone()))?;
        console.write_line(&format!("Successfully updated the person \"{name}\"!"))
    }

    fn relinquish_control(&self) -> bool {
        true
    }
}

pub struct DeletePersonUiHandler<'a> {
    operation_name: String,
    service: &'a SqlitePersonService<'a>,
}

impl<'a> DeletePersonUiHandler<'a> {
    pub fn new(operation_name: impl Into<String>, service: &'a SqlitePersonService<'a>) -> Self {
        Self {
            operation_name: operation_name.into(),
            service,
        }
    }
}

impl UiHandler for DeletePersonUiHandler<'_> {
    fn operation_name(&self) -> &str {
        &self.operation_name
    }

    fn handle(&self, console: &mut dyn Console) -> UiResult<()> {
        let id = read_id(console, PERSON_ID_PROMPT)?;
        let person = self.service.get(id)?;
        self.service.delete(id)?;
        console.write_line(&format!("Successfully deleted the person \"{person}\"!"))
    }

    fn relinquish_control(&self) -> bool {
        true
    }
}
