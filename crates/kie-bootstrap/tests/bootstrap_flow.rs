//! End-to-end provisioning: operator-supplied resources, idempotence, and
//! the descriptor the host receives.

use std::io;

use kie_bootstrap::{
    BootstrapError, BootstrapSettings, DirectoryResources, SecurityDomain, SecurityProvisioner,
    ROLES_FILE, USERS_FILE,
};
use kie_core::ServerFlavor;

#[test]
fn operator_resources_are_copied_byte_for_byte() {
    let source = tempfile::tempdir().unwrap();
    std::fs::write(source.path().join(USERS_FILE), b"alice=abc\n").unwrap();
    std::fs::write(source.path().join(ROLES_FILE), b"alice=kie-server\n").unwrap();

    let mut provisioner =
        SecurityProvisioner::new(DirectoryResources::new(source.path()), ServerFlavor::Kie);
    let mut settings = BootstrapSettings::default();
    let bundle = provisioner.ensure_security_config(&mut settings).unwrap();

    assert_eq!(std::fs::read(bundle.users_file()).unwrap(), b"alice=abc\n");
    assert_eq!(std::fs::read(bundle.roles_file()).unwrap(), b"alice=kie-server\n");

    let domain = SecurityDomain::users_roles(&bundle.dir);
    let options = &domain.login_modules[0].module_options;
    assert_eq!(
        options["usersProperties"],
        bundle.users_file().display().to_string()
    );
}

#[test]
fn repeated_calls_return_identical_path_and_contents() {
    let mut provisioner =
        SecurityProvisioner::new(kie_bootstrap::BundledResources, ServerFlavor::Kie);
    let mut settings = BootstrapSettings::default();

    let first = provisioner.ensure_security_config(&mut settings).unwrap();
    let first_digests: Vec<_> = first.written.iter().map(|f| f.sha256.clone()).collect();
    let users = std::fs::read(first.users_file()).unwrap();
    let roles = std::fs::read(first.roles_file()).unwrap();

    for _ in 0..3 {
        let again = provisioner.ensure_security_config(&mut settings).unwrap();
        assert_eq!(again.dir, first.dir);
        assert_eq!(std::fs::read(again.users_file()).unwrap(), users);
        assert_eq!(std::fs::read(again.roles_file()).unwrap(), roles);
    }
    assert_eq!(first_digests.len(), 2);
}

#[test]
fn empty_resource_directory_degrades() {
    let source = tempfile::tempdir().unwrap();
    let mut provisioner =
        SecurityProvisioner::new(DirectoryResources::new(source.path()), ServerFlavor::Drools);
    let mut settings = BootstrapSettings::default();

    match provisioner.ensure_security_config(&mut settings) {
        Err(BootstrapError::ResourceRead { source: err, .. }) => {
            assert_eq!(err.kind(), io::ErrorKind::NotFound);
        }
        other => panic!("expected ResourceRead, got {other:?}"),
    }
    assert!(provisioner.ensure_or_degrade(&mut settings).is_none());
    assert_eq!(settings, BootstrapSettings::default());
}
