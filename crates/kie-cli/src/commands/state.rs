use anyhow::Context;
use kie_core::ServerConfig;
use kie_state::StateRepository;

use crate::settings;

pub fn show(config: &ServerConfig) -> anyhow::Result<()> {
    let server_id = config
        .server_id()
        .context("no server id configured (use --server-id or [server].id)")?;
    let repository = settings::open_repository(config)?;
    let state = repository.load(server_id)?;
    println!("{}", serde_json::to_string_pretty(&state)?);
    Ok(())
}
