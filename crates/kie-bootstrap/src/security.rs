//! Security-domain descriptor handed to the host's security configurator.
//!
//! The host wires a `UsersRoles` login module against the two provisioned
//! property files. This module only describes that wiring as data.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{ROLES_FILE, USERS_FILE};

/// Name of the security domain the KIE server endpoints authenticate against.
pub const SECURITY_DOMAIN: &str = "other-drools";

/// Control flag of a login module within its domain's stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoginFlag {
    Required,
    Requisite,
    Sufficient,
    Optional,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginModule {
    pub name: String,
    pub code: String,
    pub flag: LoginFlag,
    pub module_options: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityDomain {
    pub name: String,
    pub login_modules: Vec<LoginModule>,
}

impl SecurityDomain {
    /// Properties-file authentication against the credentials in `conf_dir`.
    pub fn users_roles(conf_dir: &Path) -> Self {
        let mut module_options = BTreeMap::new();
        module_options.insert(
            "usersProperties".to_string(),
            conf_dir.join(USERS_FILE).display().to_string(),
        );
        module_options.insert(
            "rolesProperties".to_string(),
            conf_dir.join(ROLES_FILE).display().to_string(),
        );
        Self {
            name: SECURITY_DOMAIN.to_string(),
            login_modules: vec![LoginModule {
                name: "UsersRoles".to_string(),
                code: "UsersRoles".to_string(),
                flag: LoginFlag::Required,
                module_options,
            }],
        }
    }
}
