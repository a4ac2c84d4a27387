use crate::auth::{AuthService, EMAIL_FIELD};
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::{Document, Fields};
use crate::store::backend::StorageBackend;

fn display_name(record: &Document) -> String {
    record
        .str_field("name")
        .or_else(|| record.str_field(EMAIL_FIELD))
        .unwrap_or(&record.id)
        .to_string()
}

pub fn register<B: StorageBackend>(
    auth: &mut AuthService<B>,
    email: &str,
    password: &str,
    profile: Fields,
) -> Result<CmdResult> {
    let record = auth.register(email, password, profile)?;
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Registered and signed in as {}",
        display_name(&record)
    )));
    Ok(result.with_documents(vec![record]))
}

pub fn login<B: StorageBackend>(
    auth: &mut AuthService<B>,
    email: &str,
    password: &str,
) -> Result<CmdResult> {
    let record = auth.login(email, password)?;
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Signed in as {}",
        display_name(&record)
    )));
    Ok(result.with_documents(vec![record]))
}

pub fn logout<B: StorageBackend>(auth: &mut AuthService<B>) -> Result<CmdResult> {
    let was_signed_in = auth.is_authenticated();
    auth.logout()?;
    let mut result = CmdResult::default();
    if was_signed_in {
        result.add_message(CmdMessage::success("Signed out"));
    } else {
        result.add_message(CmdMessage::info("Nobody is signed in"));
    }
    Ok(result)
}

pub fn whoami<B: StorageBackend>(auth: &AuthService<B>) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    match auth.current_user() {
        Some(record) => Ok(result.with_documents(vec![record.clone()])),
        None => {
            result.add_message(CmdMessage::info("Not signed in"));
            Ok(result)
        }
    }
}

pub fn change_password<B: StorageBackend>(
    auth: &mut AuthService<B>,
    user_id: &str,
    current: &str,
    new: &str,
) -> Result<CmdResult> {
    auth.change_password(user_id, current, new)?;
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success("Password changed"));
    Ok(result)
}
