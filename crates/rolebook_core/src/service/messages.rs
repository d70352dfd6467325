//! Message catalog for operator-facing validation text.
//!
//! Templates use positional `{0}`, `{1}` placeholders. An argument written
//! as `localize:<key>` is itself resolved through the catalog before it is
//! substituted.

const LOCALIZE_PREFIX: &str = "localize:";

const MESSAGES: &[(&str, &str)] = &[
    ("validation.message.notEmpty", "{0} must not be empty."),
    (
        "validation.message.maxLength",
        "{0} must not exceed {1} characters.",
    ),
    ("user.data.column.username", "Username"),
    ("role.data.column.name", "Role name"),
    ("permission.data.column.name", "Permission name"),
    (
        "user.validation.message.duplicateEntry",
        "A user named \"{0}\" already exists.",
    ),
    ("user.validation.message.notFound", "No user found with id {0}."),
    (
        "person.validation.message.notFound",
        "No person found with id {0}.",
    ),
    ("role.validation.message.notFound", "No role found with id {0}."),
    (
        "permission.validation.message.notFound",
        "No permission found with id {0}.",
    ),
    (
        "permission.validation.message.duplicateEntry",
        "A permission named \"{0}\" already exists.",
    ),
];

/// Returns the template for `key`, if the catalog knows it.
pub fn localize(key: &str) -> Option<&'static str> {
    MESSAGES
        .iter()
        .find(|(candidate, _)| *candidate == key)
        .map(|(_, template)| *template)
}

/// Formats `key` with `args`; unknown keys render as the key itself.
pub fn render(key: &str, args: &[String]) -> String {
    let mut message = localize(key).unwrap_or(key).to_string();
    for (index, arg) in args.iter().enumerate() {
        let value = match arg.strip_prefix(LOCALIZE_PREFIX) {
            Some(nested) => localize(nested).unwrap_or(nested),
            None => arg.as_str(),
        };
        message = message.replace(&format!("{{{index}}}"), value);
    }
    message
}

#[cfg(test)]
mod tests {
    use super::{localize, render};

    #[test]
    fn render_substitutes_positional_args() {
        let message = render(
            "validation.message.maxLength",
            &["Username".to_string(), "255".to_string()],
        );
        assert_eq!(message, "Username must not exceed 255 characters.");
    }

    #[test]
    fn render_resolves_localized_args() {
        let message = render(
            "validation.message.notEmpty",
            &["localize:user.data.column.username".to_string()],
        );
        assert_eq!(message, "Username must not be empty.");
    }

    #[test]
    fn unknown_key_falls_back_to_key() {
        assert!(localize("no.such.key").is_none());
        assert_eq!(render("no.such.key", &[]), "no.such.key");
    }
}
