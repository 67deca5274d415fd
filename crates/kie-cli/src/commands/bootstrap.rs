use kie_bootstrap::{BootstrapSettings, SecurityBundle, SecurityDomain, SecurityProvisioner};
use kie_core::ServerConfig;

use crate::settings;

pub fn bootstrap(config: &ServerConfig, format: &str) -> anyhow::Result<()> {
    let flavor = config.server.flavor;
    let mut bootstrap_settings = BootstrapSettings {
        security_conf_dir: config.security.conf_dir.clone(),
    };
    let mut provisioner = SecurityProvisioner::new(settings::resource_provider(config), flavor);

    let bundle = match provisioner.ensure_security_config(&mut bootstrap_settings) {
        Ok(bundle) => bundle,
        Err(e) => {
            eprintln!("Bootstrap failed: {e}");
            return Err(e.into());
        }
    };
    // The server reads these files after this process exits.
    provisioner.retain();

    let domain = SecurityDomain::users_roles(&bundle.dir);
    match format {
        "json" => print_json(&bundle, &bootstrap_settings, flavor, &domain),
        _ => {
            print_text(&bundle, &bootstrap_settings, flavor, &domain);
            Ok(())
        }
    }
}

fn print_text(
    bundle: &SecurityBundle,
    bootstrap_settings: &BootstrapSettings,
    flavor: kie_core::ServerFlavor,
    domain: &SecurityDomain,
) {
    if bundle.reused() {
        println!("✓ Using existing configuration folder");
    } else {
        println!("✓ Provisioned configuration folder");
    }
    println!("  Folder: {}", bundle.dir.display());
    for file in &bundle.written {
        println!("  {} ({} bytes, sha256: {})", file.path.display(), file.size_bytes, file.sha256);
    }
    for (key, value) in bootstrap_settings.to_properties(flavor) {
        println!("  {key}={value}");
    }
    println!("  Security domain: {}", domain.name);
    for module in &domain.login_modules {
        println!("    login module {} ({:?})", module.code, module.flag);
        for (option, value) in &module.module_options {
            println!("      {option} = {value}");
        }
    }
}

fn print_json(
    bundle: &SecurityBundle,
    bootstrap_settings: &BootstrapSettings,
    flavor: kie_core::ServerFlavor,
    domain: &SecurityDomain,
) -> anyhow::Result<()> {
    let properties: serde_json::Map<String, serde_json::Value> = bootstrap_settings
        .to_properties(flavor)
        .into_iter()
        .map(|(key, value)| (key.to_string(), serde_json::Value::String(value)))
        .collect();
    let files: Vec<serde_json::Value> = bundle
        .written
        .iter()
        .map(|file| {
            serde_json::json!({
                "path": file.path.display().to_string(),
                "size_bytes": file.size_bytes,
                "sha256": file.sha256,
            })
        })
        .collect();
    let report = serde_json::json!({
        "conf_dir": bundle.dir.display().to_string(),
        "reused": bundle.reused(),
        "files": files,
        "properties": properties,
        "security_domain": domain,
    });
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
