//! `campusride login`: Welcome -> Login -> OnBoard.

use anyhow::Result;
use campusride_app::{LoginTab, UserIntent};
use campusride_core::config::Config;
use campusride_core::validation::FieldKey;

use super::flow;

/// Which login tab to use, with its account value.
pub enum Account {
    Identifier(String),
    Email(String),
    Phone(String),
}

impl Account {
    fn into_fields(self, password: String) -> (LoginTab, Vec<(FieldKey, String)>) {
        match self {
            Account::Identifier(name) => (
                LoginTab::Identifier,
                vec![(FieldKey::EmailOrUsername, name), (FieldKey::Password, password)],
            ),
            Account::Email(email) => (
                LoginTab::Email,
                vec![(FieldKey::Email, email), (FieldKey::Password, password)],
            ),
            // Phone login has no password field.
            Account::Phone(phone) => (LoginTab::Phone, vec![(FieldKey::Phone, phone)]),
        }
    }
}

pub async fn run(config: &Config, account: Account, password: String) -> Result<()> {
    let (tab, fields) = account.into_fields(password);

    let mut rt = flow::boot(config).await?;
    rt.dispatch(UserIntent::OpenLogin.into());
    rt.dispatch(UserIntent::SelectLoginTab(tab).into());
    let outcome = flow::submit(&mut rt, fields).await;
    rt.shutdown();

    outcome?;
    println!("Signed in.");
    Ok(())
}
