//! Collaborator wiring for one story run.
//!
//! Steps receive everything through `&mut StoryEnv` — API client, identity
//! provider, payload generator, context and actor cache — so test doubles
//! can be injected without process-wide state. One env serves exactly one
//! run; loop modes build a fresh env per iteration.

use comanda_client::{ApiClient, Config, KeycloakClient, UreqTransport};
use comanda_datagen::Generator;

use crate::actors::{ActorCredential, ActorManager, Role};
use crate::context::Context;

pub struct StoryEnv {
    pub api: ApiClient,
    pub idp: KeycloakClient,
    pub datagen: Generator,
    pub ctx: Context,
    pub actors: ActorManager,
    /// Pre-configured realm user for the login smoke story.
    pub test_username: String,
    pub test_password: String,
}

impl StoryEnv {
    pub fn new(
        api: ApiClient,
        idp: KeycloakClient,
        datagen: Generator,
        test_username: impl Into<String>,
        test_password: impl Into<String>,
    ) -> Self {
        StoryEnv {
            api,
            idp,
            datagen,
            ctx: Context::new(),
            actors: ActorManager::new(),
            test_username: test_username.into(),
            test_password: test_password.into(),
        }
    }

    /// Production wiring: `ureq` transports for both the API gateway and
    /// the identity provider.
    pub fn from_config(config: &Config) -> Self {
        let api = ApiClient::new(config.api_base_url.clone(), Box::new(UreqTransport::new()));
        let idp = KeycloakClient::new(config.keycloak.clone(), Box::new(UreqTransport::new()));
        StoryEnv::new(
            api,
            idp,
            Generator::new(),
            config.test_username.clone(),
            config.test_password.clone(),
        )
    }

    /// Cached credential for `role`, provisioning a fresh identity on
    /// first need. `None` when provisioning fails; the step converts that
    /// into a failure outcome.
    pub fn ensure_identity(&mut self, role: Role) -> Option<ActorCredential> {
        match self
            .actors
            .ensure_identity(role, &self.idp, &mut self.datagen)
        {
            Ok(credential) => Some(credential.clone()),
            Err(e) => {
                tracing::error!(role = role.label(), error = %e, "identity provisioning failed");
                None
            }
        }
    }

    /// Re-authenticate `role` and install the fresh token as the API
    /// client's bearer. Returns `false` on any failure.
    pub fn refresh_token(&mut self, role: Role) -> bool {
        match self.actors.refresh_token(role, &self.idp) {
            Ok(token) => {
                self.api.set_token(Some(token));
                true
            }
            Err(e) => {
                tracing::error!(role = role.label(), error = %e, "token refresh failed");
                false
            }
        }
    }

    /// Switch the acting identity to `role`'s cached token (clearing the
    /// bearer when none is cached yet).
    pub fn act_as(&mut self, role: Role) {
        let token = self.actors.token(role).map(str::to_string);
        self.api.set_token(token);
    }
}
