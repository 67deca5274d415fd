use kie_bootstrap::{BootstrapSettings, SecurityDomain, SecurityProvisioner};
use kie_core::ServerConfig;
use kie_install::{Reconciler, install_target};
use tracing::{error, info};

use crate::commands::install::print_outcome;
use crate::settings;

/// Startup sequence: credentials first, then local kjars.
///
/// Neither step aborts the launch. A provisioning failure leaves the server
/// without a credentials folder; an install failure leaves the previously
/// persisted state in place. Both are logged.
pub fn launch(config: &ServerConfig, kjars: &[String]) -> anyhow::Result<()> {
    let flavor = config.server.flavor;
    let mut bootstrap_settings = BootstrapSettings {
        security_conf_dir: config.security.conf_dir.clone(),
    };
    let mut provisioner = SecurityProvisioner::new(settings::resource_provider(config), flavor);

    match provisioner.ensure_or_degrade(&mut bootstrap_settings) {
        Some(bundle) => {
            provisioner.retain();
            println!("\tConfiguration folder is {}", bundle.dir.display());
            let domain = SecurityDomain::users_roles(&bundle.dir);
            info!(domain = %domain.name, "security domain ready for the host");
            println!("{}", serde_json::to_string_pretty(&domain)?);
        }
        None => println!("\tConfiguration folder is not available"),
    }

    if let Err(reason) = install_target(config.server_id(), config.controller(), kjars) {
        println!("Nothing installed: {reason}");
        return Ok(());
    }

    let repository = match settings::open_repository(config) {
        Ok(repository) => repository,
        Err(e) => {
            error!(error = %e, "state repository unavailable; kjars not installed");
            return Ok(());
        }
    };
    match Reconciler::new(repository).reconcile_containers(
        config.server_id(),
        config.controller(),
        kjars,
    ) {
        Ok(outcome) => print_outcome(&outcome),
        Err(e) => error!(error = %e, "kjar install failed; persisted state left unchanged"),
    }
    Ok(())
}
