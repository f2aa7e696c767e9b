//! `campusride signup`: Welcome -> Signup -> OnBoard.

use anyhow::Result;
use campusride_app::UserIntent;
use campusride_core::config::Config;
use campusride_core::validation::FieldKey;

use super::flow;

pub struct Profile {
    pub username: String,
    pub email: String,
    pub password: String,
}

pub async fn run(config: &Config, profile: Profile) -> Result<()> {
    let mut rt = flow::boot(config).await?;
    rt.dispatch(UserIntent::OpenSignup.into());
    let outcome = flow::submit(
        &mut rt,
        vec![
            (FieldKey::Username, profile.username),
            (FieldKey::Email, profile.email),
            (FieldKey::Password, profile.password),
        ],
    )
    .await;
    rt.shutdown();

    outcome?;
    println!("Account created.");
    Ok(())
}
