use kie_core::ServerConfig;
use kie_install::{InstallOutcome, Reconciler, install_target};

use crate::settings;

pub fn install(config: &ServerConfig, kjars: &[String]) -> anyhow::Result<()> {
    // Decide before opening anything: a skipped install must not touch state.
    if let Err(reason) = install_target(config.server_id(), config.controller(), kjars) {
        println!("Nothing installed: {reason}");
        return Ok(());
    }

    let repository = settings::open_repository(config)?;
    let reconciler = Reconciler::new(repository);
    match reconciler.reconcile_containers(config.server_id(), config.controller(), kjars) {
        Ok(outcome) => {
            print_outcome(&outcome);
            Ok(())
        }
        Err(e) => {
            eprintln!("Install failed: {e}");
            Err(e.into())
        }
    }
}

pub(crate) fn print_outcome(outcome: &InstallOutcome) {
    match outcome {
        InstallOutcome::Skipped(reason) => println!("Nothing installed: {reason}"),
        InstallOutcome::Installed(state) => {
            println!(
                "✓ Server {} now runs {} container(s)",
                state.server_id,
                state.containers.len()
            );
            for container in &state.containers {
                println!(
                    "  {} → {} ({})",
                    container.container_id, container.release_id, container.status
                );
            }
        }
    }
}
