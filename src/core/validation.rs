//! Input validation for ticket submissions and staff updates

use super::{NewTicket, TicketPatch};
use crate::error::{FieldError, HelpdeskError, Result};

/// Check a submission and return a trimmed copy
///
/// All offending fields are reported together, not just the first one.
pub fn validate_new_ticket(fields: &NewTicket) -> Result<NewTicket> {
    let cleaned = NewTicket {
        name: fields.name.trim().to_string(),
        phone: fields.phone.trim().to_string(),
        email: fields.email.trim().to_string(),
        device_name: fields.device_name.trim().to_string(),
        description: fields.description.trim().to_string(),
    };

    let mut errors = Vec::new();
    for (field, value) in [
        ("name", &cleaned.name),
        ("phone", &cleaned.phone),
        ("email", &cleaned.email),
        ("deviceName", &cleaned.device_name),
        ("description", &cleaned.description),
    ] {
        if value.is_empty() {
            errors.push(FieldError::new(field, "is required"));
        }
    }

    if !cleaned.email.is_empty() {
        if let Err(message) = check_email(&cleaned.email) {
            errors.push(FieldError::new("email", message));
        }
    }

    if errors.is_empty() {
        Ok(cleaned)
    } else {
        Err(HelpdeskError::Validation { fields: errors })
    }
}

/// An address needs exactly one `@` followed by a non-empty domain
pub fn check_email(email: &str) -> std::result::Result<(), &'static str> {
    if email.matches('@').count() != 1 {
        return Err("must contain exactly one '@'");
    }
    match email.split_once('@') {
        Some((_, domain)) if !domain.trim().is_empty() => Ok(()),
        _ => Err("must have a domain after '@'"),
    }
}

/// Reject patches that change nothing or carry a blank note
pub fn validate_patch(patch: &TicketPatch) -> Result<()> {
    if patch.is_empty() {
        return Err(HelpdeskError::invalid_field(
            "patch",
            "must change at least one of status, priority, assignedTo, note",
        ));
    }

    let mut errors = Vec::new();
    if let Some(note) = &patch.note {
        if note.text.trim().is_empty() {
            errors.push(FieldError::new("note", "must not be empty"));
        }
        if note.author.as_deref().is_some_and(|a| a.trim().is_empty()) {
            errors.push(FieldError::new("author", "must not be blank when given"));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(HelpdeskError::Validation { fields: errors })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> NewTicket {
        NewTicket {
            name: " Alice ".into(),
            phone: "555-444-3333".into(),
            email: "alice@example.com".into(),
            device_name: "iPhone 12".into(),
            description: "Screen cracked".into(),
        }
    }

    #[test]
    fn test_valid_submission_is_trimmed() {
        let cleaned = validate_new_ticket(&valid()).unwrap();
        assert_eq!(cleaned.name, "Alice");
    }

    #[test]
    fn test_all_missing_fields_reported() {
        let err = validate_new_ticket(&NewTicket::default()).unwrap_err();
        let fields: Vec<_> = err.fields().iter().map(|f| f.field.as_str()).collect();
        assert_eq!(
            fields,
            vec!["name", "phone", "email", "deviceName", "description"]
        );
    }

    #[test]
    fn test_whitespace_only_counts_as_missing() {
        let mut fields = valid();
        fields.device_name = "   ".into();
        let err = validate_new_ticket(&fields).unwrap_err();
        assert_eq!(err.fields()[0].field, "deviceName");
    }

    #[test]
    fn test_email_rules() {
        assert!(check_email("a@x.com").is_ok());
        assert!(check_email("a@x").is_ok());
        assert!(check_email("ax.com").is_err());
        assert!(check_email("a@@x.com").is_err());
        assert!(check_email("a@b@x.com").is_err());
        assert!(check_email("a@").is_err());
    }

    #[test]
    fn test_patch_rules() {
        assert!(validate_patch(&TicketPatch::new()).is_err());
        assert!(validate_patch(&TicketPatch::new().note("  ")).is_err());
        assert!(validate_patch(&TicketPatch::new().note_by("ok", " ")).is_err());
        assert!(validate_patch(&TicketPatch::new().assign("")).is_ok());
    }
}
