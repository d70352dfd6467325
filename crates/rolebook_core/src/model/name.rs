//! Person name value object.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Three-part personal name.
///
/// Immutable once constructed; callers read parts through accessors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Name {
    last: String,
    first: String,
    middle: String,
}

impl Name {
    pub fn new(
        last: impl Into<String>,
        first: impl Into<String>,
        middle: impl Into<String>,
    ) -> Self {
        Self {
            last: last.into(),
            first: first.into(),
            middle: middle.into(),
        }
    }

    pub fn last(&self) -> &str {
        &self.last
    }

    pub fn first(&self) -> &str {
        &self.first
    }

    pub fn middle(&self) -> &str {
        &self.middle
    }
}

/// Renders `Last, First Middle`; blank parts are skipped.
impl Display for Name {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let given = [self.first.trim(), self.middle.trim()]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        match (self.last.trim(), given.is_empty()) {
            ("", _) => write!(f, "{given}"),
            (last, true) => write!(f, "{last}"),
            (last, false) => write!(f, "{last}, {given}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Name;

    #[test]
    fn display_joins_last_then_given_names() {
        let name = Name::new("Rizal", "Jose", "Protacio");
        assert_eq!(name.to_string(), "Rizal, Jose Protacio");
    }

    #[test]
    fn display_skips_blank_parts() {
        assert_eq!(Name::new("Rizal", "Jose", "").to_string(), "Rizal, Jose");
        assert_eq!(Name::new("", "Jose", " ").to_string(), "Jose");
        assert_eq!(Name::new("Rizal", "", "").to_string(), "Rizal");
    }
}
