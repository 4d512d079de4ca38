//! Sign-in state.

use std::io::BufRead;

use murti_admin::AdminApi;
use secrecy::SecretString;

use crate::error::CliError;
use crate::output::{print_json, print_line};

/// Sign in and persist the token. Prints the signed-in profile.
pub async fn login(api: &AdminApi, email: &str, password: Option<String>) -> Result<(), CliError> {
    let password = match password {
        Some(password) => SecretString::from(password),
        None => read_password()?,
    };

    let login = api.auth().login(email, &password).await?;
    match &login.user {
        Some(user) => print_json(user),
        None => print_line("Signed in"),
    }
}

/// Read one line from stdin as the password.
fn read_password() -> Result<SecretString, CliError> {
    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    let password = line.trim_end_matches(['\r', '\n']);
    if password.is_empty() {
        return Err(CliError::InvalidArgs(
            "a password is required (--password, MURTI_ADMIN_PASSWORD or stdin)",
        ));
    }
    Ok(SecretString::from(password.to_owned()))
}

pub fn logout(api: &AdminApi) -> Result<(), CliError> {
    api.auth().logout()?;
    print_line("Signed out")
}

pub async fn whoami(api: &AdminApi) -> Result<(), CliError> {
    let profile = api.auth().profile().await?;
    print_json(&profile)
}
