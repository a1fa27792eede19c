//! Per-role identity and token management.
//!
//! The remote system enforces per-identity authorization, and stories
//! deliberately switch the acting identity (owner vs. waiter) between
//! calls. Credentials and tokens are therefore cached per role, never as a
//! single global value: refreshing one role's token leaves every other
//! role's cache untouched.

use std::collections::BTreeMap;

use comanda_client::{IdentityError, KeycloakClient, UserProfile};
use comanda_datagen::Generator;

/// A logical identity participating in a story.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Role {
    Owner,
    Waiter,
}

impl Role {
    pub fn label(&self) -> &'static str {
        match self {
            Role::Owner => "owner",
            Role::Waiter => "waiter",
        }
    }
}

/// One provisioned identity: realm credentials plus the most recently
/// issued bearer token.
#[derive(Debug, Clone)]
pub struct ActorCredential {
    pub username: String,
    pub password: String,
    pub email: String,
    pub display_name: String,
    pub token: Option<String>,
}

/// Lazily-provisioned credential cache, keyed by role.
#[derive(Debug, Default)]
pub struct ActorManager {
    credentials: BTreeMap<Role, ActorCredential>,
}

impl ActorManager {
    pub fn new() -> Self {
        ActorManager::default()
    }

    pub fn credential(&self, role: Role) -> Option<&ActorCredential> {
        self.credentials.get(&role)
    }

    pub fn token(&self, role: Role) -> Option<&str> {
        self.credentials.get(&role).and_then(|c| c.token.as_deref())
    }

    /// Return the cached credential for `role`, provisioning a fresh
    /// identity on first need. Provisioning tolerates the identity
    /// already existing on the provider side.
    pub fn ensure_identity(
        &mut self,
        role: Role,
        idp: &KeycloakClient,
        datagen: &mut Generator,
    ) -> Result<&ActorCredential, IdentityError> {
        if !self.credentials.contains_key(&role) {
            let user = datagen.user_data();
            let (first_name, last_name) = split_name(&user.name);
            let profile = UserProfile {
                username: user.email.clone(),
                email: user.email.clone(),
                first_name,
                last_name,
                password: user.password.clone(),
            };
            idp.provision_user(&profile)?;
            tracing::info!(role = role.label(), username = %user.email, "provisioned identity");
            self.credentials.insert(
                role,
                ActorCredential {
                    username: user.email.clone(),
                    password: user.password,
                    email: user.email,
                    display_name: user.name,
                    token: None,
                },
            );
        }
        Ok(&self.credentials[&role])
    }

    /// Re-authenticate `role` with its cached credentials and cache the
    /// fresh token. Idempotent: repeating the call is always safe.
    pub fn refresh_token(
        &mut self,
        role: Role,
        idp: &KeycloakClient,
    ) -> Result<String, IdentityError> {
        let credential =
            self.credentials
                .get_mut(&role)
                .ok_or_else(|| IdentityError::Malformed {
                    operation: "refresh_token",
                    detail: format!("no cached credential for role '{}'", role.label()),
                })?;
        let token = idp.authenticate(&credential.username, &credential.password)?;
        credential.token = Some(token.clone());
        Ok(token)
    }

    /// Cache a token obtained out-of-band (e.g. the first login).
    pub fn set_token(&mut self, role: Role, token: impl Into<String>) {
        if let Some(credential) = self.credentials.get_mut(&role) {
            credential.token = Some(token.into());
        }
    }
}

/// Split a display name into (first, last), with the provider's required
/// non-empty fallbacks.
pub fn split_name(full_name: &str) -> (String, String) {
    let mut parts = full_name.split_whitespace();
    match parts.next() {
        None => ("Usuario".into(), "Teste".into()),
        Some(first) => {
            let rest: Vec<&str> = parts.collect();
            if rest.is_empty() {
                (first.into(), "Teste".into())
            } else {
                (first.into(), rest.join(" "))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_name_handles_all_shapes() {
        assert_eq!(split_name(""), ("Usuario".into(), "Teste".into()));
        assert_eq!(split_name("Ana"), ("Ana".into(), "Teste".into()));
        assert_eq!(
            split_name("Ana Clara Souza"),
            ("Ana".into(), "Clara Souza".into())
        );
    }

    #[test]
    fn token_isolation_between_roles() {
        let mut actors = ActorManager::new();
        actors.credentials.insert(
            Role::Owner,
            ActorCredential {
                username: "owner@x".into(),
                password: "p".into(),
                email: "owner@x".into(),
                display_name: "Owner".into(),
                token: Some("owner-tok".into()),
            },
        );
        actors.credentials.insert(
            Role::Waiter,
            ActorCredential {
                username: "waiter@x".into(),
                password: "p".into(),
                email: "waiter@x".into(),
                display_name: "Waiter".into(),
                token: Some("waiter-tok".into()),
            },
        );
        actors.set_token(Role::Waiter, "waiter-tok-2");
        assert_eq!(actors.token(Role::Owner), Some("owner-tok"));
        assert_eq!(actors.token(Role::Waiter), Some("waiter-tok-2"));
    }
}
