use anyhow::Result;
use campusride_core::config::Config;

use super::flow;

pub async fn run(config: &Config) -> Result<()> {
    let mut rt = flow::boot(config).await?;
    rt.shutdown();
    println!("Ready.");
    Ok(())
}
