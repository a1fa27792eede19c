//! Environment-driven configuration.
//!
//! Every value has a default matching the local docker-compose deployment;
//! `COMANDA_*` environment variables override them.

use crate::keycloak::KeycloakConfig;

/// Settings for one harness process.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base address of the API gateway, e.g. `http://localhost:8080/api/v1`.
    pub api_base_url: String,
    pub keycloak: KeycloakConfig,
    /// Pre-configured realm user for the login smoke story.
    pub test_username: String,
    pub test_password: String,
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

impl Config {
    pub fn from_env() -> Self {
        let keycloak_base = env_or("COMANDA_KEYCLOAK_BASE_URL", "http://localhost:8090");
        Config {
            api_base_url: env_or("COMANDA_API_BASE_URL", "http://localhost:8080/api/v1"),
            keycloak: KeycloakConfig {
                base_url: keycloak_base,
                realm: "comandalivre".into(),
                client_id: "backend".into(),
                client_secret: env_or("COMANDA_KEYCLOAK_CLIENT_SECRET", "backend-secret-fixa-123"),
                admin_realm: "master".into(),
                admin_client_id: "admin-cli".into(),
                admin_username: env_or("COMANDA_KEYCLOAK_ADMIN_USERNAME", "admin"),
                admin_password: env_or("COMANDA_KEYCLOAK_ADMIN_PASSWORD", "admin"),
            },
            test_username: env_or("COMANDA_TEST_USERNAME", "teste@comandalivre.com.br"),
            test_password: env_or("COMANDA_TEST_PASSWORD", "teste123"),
        }
    }
}
