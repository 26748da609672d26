//! Handler for the `hash-password` command

use crate::auth::hash_password;
use crate::cli::OutputFormatter;
use crate::error::{HelpdeskError, Result};
use dialoguer::{Password, theme::ColorfulTheme};

/// Print an argon2 hash for the `auth.password_hash` setting
pub fn handle_hash_password_command(
    password: Option<String>,
    output: &OutputFormatter,
) -> Result<()> {
    let password = match password {
        Some(password) => password,
        None => Password::with_theme(&ColorfulTheme::default())
            .with_prompt("New staff password")
            .with_confirmation("Confirm password", "Passwords do not match")
            .interact()?,
    };

    if password.is_empty() {
        return Err(HelpdeskError::invalid_field("password", "must not be empty"));
    }

    let hash = hash_password(&password)?;

    if output.is_json() {
        output.print_json(&serde_json::json!({ "password_hash": hash }))?;
    } else {
        output.info(&hash);
        output.info("");
        output.info("Set it as auth.password_hash in config.toml or export it:");
        output.info(&format!("  HELPDESK_AUTH__PASSWORD_HASH='{hash}'"));
    }

    Ok(())
}
