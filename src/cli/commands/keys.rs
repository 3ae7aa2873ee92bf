use colored::Colorize;

use super::api_helpers::{self, ApiContext};
use crate::cli::KeysAction;
use crate::cli::output;
use crate::core::errors::{CdnwatchError, Result};
use crate::core::models::connection_check::ConnectionCheck;
use crate::core::models::credential::CredentialUpdate;
use crate::core::services::formatters::{format_date, mask_api_key};
use crate::core::services::key_service::require_non_empty;
use crate::core::traits::stats_api::StatsApi;

/// Execute the `cdnwatch keys` command.
pub fn execute(action: &KeysAction) -> Result<()> {
    match action {
        KeysAction::Add {
            name,
            key,
            no_verify,
        } => execute_add(name, key, *no_verify),
        KeysAction::List => execute_list(),
        KeysAction::Edit {
            id,
            name,
            key,
            no_verify,
        } => execute_edit(id, name.as_deref(), key.as_deref(), *no_verify),
        KeysAction::Remove { id } => execute_remove(id),
        KeysAction::Toggle { id } => execute_toggle(id),
        KeysAction::Test { target } => execute_test(target),
    }
}

/// Call the identity endpoint with `api_key` behind a spinner.
fn check_key(api_key: &str) -> Result<ConnectionCheck> {
    let api = ApiContext::load()?;
    let rt = api_helpers::runtime()?;

    let sp = output::spinner("Testing API key...");
    let check = rt.block_on(api.client(api_key.trim()).test_connection());
    output::clear_spinner(sp);
    Ok(check)
}

/// Refuse keys the API does not accept.
fn verify_key(api_key: &str) -> Result<()> {
    let check = check_key(api_key)?;
    if let Some(reason) = check.error() {
        return Err(CdnwatchError::KeyRejected {
            reason: reason.to_string(),
        });
    }
    output::success("API key accepted");
    Ok(())
}

/// Store a new key, testing it first unless `no_verify` is set.
fn execute_add(name: &str, key: &str, no_verify: bool) -> Result<()> {
    let service = api_helpers::key_service();

    require_non_empty(name, "account name")?;
    require_non_empty(key, "API key")?;
    if !no_verify {
        verify_key(key)?;
    }

    let record = service.add_key(name, key)?;
    output::success(&format!("Added '{}' (id {})", record.name, record.id));
    println!("\n  Run 'cdnwatch dashboard' to see its traffic.");
    Ok(())
}

/// List all stored keys.
fn execute_list() -> Result<()> {
    let service = api_helpers::key_service();
    let keys = service.list_keys()?;

    if keys.is_empty() {
        output::warning("No API keys stored.");
        println!("  Run 'cdnwatch keys add <name> <key>' to add one.");
        return Ok(());
    }

    output::header(&format!("Stored API keys ({})", keys.len()));
    for record in &keys {
        let status = if record.is_active {
            "Active".green()
        } else {
            "Inactive".dimmed()
        };
        println!("\n  {}  {}  {}", record.name.bold(), status, record.id.dimmed());
        println!("    API key: {}", mask_api_key(&record.api_key));
        println!("    Added:   {}", format_date(&record.created_at.to_rfc3339()));
        if let Some(updated) = record.updated_at {
            println!("    Updated: {}", format_date(&updated.to_rfc3339()));
        }
    }

    Ok(())
}

/// Rename or re-key a stored entry.
fn execute_edit(id: &str, name: Option<&str>, key: Option<&str>, no_verify: bool) -> Result<()> {
    let service = api_helpers::key_service();

    let update = CredentialUpdate {
        name: name.map(str::to_string),
        api_key: key.map(str::to_string),
        ..Default::default()
    };
    if update.is_empty() {
        return Err(CdnwatchError::InvalidInput {
            detail: "nothing to change; pass --name and/or --key".into(),
        });
    }

    if let Some(name) = name {
        require_non_empty(name, "account name")?;
    }
    if let Some(key) = key {
        require_non_empty(key, "API key")?;
    }

    // Fail on an unknown id before spending a network call on the key.
    service.get_key(id)?;
    if let Some(key) = key
        && !no_verify
    {
        verify_key(key)?;
    }

    let record = service.update_key(id, update)?;
    output::success(&format!("Updated '{}' (id {})", record.name, record.id));
    Ok(())
}

/// Delete a stored key. Unknown ids change nothing.
fn execute_remove(id: &str) -> Result<()> {
    let service = api_helpers::key_service();

    if service.remove_key(id)? {
        output::success(&format!("Removed API key {id}"));
    } else {
        output::warning(&format!("No API key with id {id}; nothing removed."));
    }
    Ok(())
}

/// Flip a key between active and inactive.
fn execute_toggle(id: &str) -> Result<()> {
    let service = api_helpers::key_service();
    let record = service.toggle_active(id)?;

    let state = if record.is_active { "active" } else { "inactive" };
    output::success(&format!("'{}' is now {state}", record.name));
    Ok(())
}

/// Test a stored key by id, or a raw key.
fn execute_test(target: &str) -> Result<()> {
    let service = api_helpers::key_service();
    let (label, api_key) = match service.list_keys()?.into_iter().find(|r| r.id == target) {
        Some(record) => (record.name, record.api_key),
        None => (mask_api_key(target), target.to_string()),
    };

    match check_key(&api_key)? {
        ConnectionCheck::Success { data } => {
            output::success(&format!("{label}: connection OK"));
            if let Some(email) = crate::core::models::account_summary::account_email(&data) {
                println!("    Account: {email}");
            }
            Ok(())
        }
        ConnectionCheck::Failure { error } => Err(CdnwatchError::KeyRejected { reason: error }),
    }
}
