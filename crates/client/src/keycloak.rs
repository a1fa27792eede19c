//! Keycloak identity-provider client.
//!
//! Three capabilities, all blocking:
//! - password-grant authentication for test identities,
//! - admin-cli token issuance against the master realm,
//! - user provisioning that tolerates an already-existing user (409) by
//!   resolving to the existing identifier instead of failing.

use serde_json::{json, Value};

use crate::transport::{ApiRequest, Method, NoResponse, Transport};

/// Connection settings for both the application realm and the admin realm.
#[derive(Debug, Clone)]
pub struct KeycloakConfig {
    pub base_url: String,
    pub realm: String,
    pub client_id: String,
    pub client_secret: String,
    pub admin_realm: String,
    pub admin_client_id: String,
    pub admin_username: String,
    pub admin_password: String,
}

/// Profile of a user to provision.
#[derive(Debug, Clone)]
pub struct UserProfile {
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
}

/// Errors from identity-provider operations.
#[derive(Debug, thiserror::Error)]
pub enum IdentityError {
    #[error(transparent)]
    NoResponse(#[from] NoResponse),

    /// The provider answered, but not with the expected status.
    #[error("identity provider rejected {operation}: status {status}")]
    Rejected { operation: &'static str, status: u16 },

    /// A 2xx response whose body lacks the expected field.
    #[error("malformed identity response for {operation}: {detail}")]
    Malformed {
        operation: &'static str,
        detail: String,
    },
}

pub struct KeycloakClient {
    config: KeycloakConfig,
    transport: Box<dyn Transport>,
}

impl KeycloakClient {
    pub fn new(config: KeycloakConfig, transport: Box<dyn Transport>) -> Self {
        KeycloakClient { config, transport }
    }

    fn token_endpoint(&self, realm: &str) -> String {
        format!(
            "{}/realms/{}/protocol/openid-connect/token",
            self.config.base_url.trim_end_matches('/'),
            realm
        )
    }

    fn admin_users_endpoint(&self) -> String {
        format!(
            "{}/admin/realms/{}/users",
            self.config.base_url.trim_end_matches('/'),
            self.config.realm
        )
    }

    /// Password-grant authentication. Returns the access token.
    ///
    /// Re-authenticating with unchanged credentials is always safe to
    /// repeat; callers use this both for first login and token refresh.
    pub fn authenticate(&self, username: &str, password: &str) -> Result<String, IdentityError> {
        tracing::info!(username, "authenticating with Keycloak");
        let request = ApiRequest::new(Method::Post, self.token_endpoint(&self.config.realm)).form(
            vec![
                ("grant_type".into(), "password".into()),
                ("client_id".into(), self.config.client_id.clone()),
                ("client_secret".into(), self.config.client_secret.clone()),
                ("username".into(), username.into()),
                ("password".into(), password.into()),
            ],
        );
        let response = self.transport.send(&request)?;
        if response.status != 200 {
            return Err(IdentityError::Rejected {
                operation: "authenticate",
                status: response.status,
            });
        }
        access_token(&response.body, "authenticate")
    }

    /// Admin-cli token against the admin realm.
    fn admin_token(&self) -> Result<String, IdentityError> {
        let request = ApiRequest::new(Method::Post, self.token_endpoint(&self.config.admin_realm))
            .form(vec![
                ("grant_type".into(), "password".into()),
                ("client_id".into(), self.config.admin_client_id.clone()),
                ("username".into(), self.config.admin_username.clone()),
                ("password".into(), self.config.admin_password.clone()),
            ]);
        let response = self.transport.send(&request)?;
        if response.status != 200 {
            return Err(IdentityError::Rejected {
                operation: "admin_token",
                status: response.status,
            });
        }
        access_token(&response.body, "admin_token")
    }

    /// Create a realm user and return its identifier.
    ///
    /// 201 resolves the ID from the `Location` header; 409 means the user
    /// already exists and resolves to the existing identifier, so calling
    /// this twice with the same profile yields the same ID.
    pub fn provision_user(&self, profile: &UserProfile) -> Result<String, IdentityError> {
        let admin_token = self.admin_token()?;
        let payload = json!({
            "username": profile.username,
            "email": profile.email,
            "enabled": true,
            "emailVerified": true,
            "firstName": profile.first_name,
            "lastName": profile.last_name,
            "credentials": [
                { "type": "password", "value": profile.password, "temporary": false }
            ],
        });
        let request = ApiRequest::new(Method::Post, self.admin_users_endpoint())
            .json(payload)
            .bearer(Some(&admin_token));
        let response = self.transport.send(&request)?;

        match response.status {
            201 => {
                let location = response.location().unwrap_or_default();
                location
                    .rsplit('/')
                    .next()
                    .filter(|segment| !segment.is_empty())
                    .map(str::to_string)
                    .ok_or_else(|| IdentityError::Malformed {
                        operation: "provision_user",
                        detail: "creation response carries no Location id".into(),
                    })
            }
            409 => self
                .find_user_id(&profile.username, &admin_token)?
                .ok_or_else(|| IdentityError::Malformed {
                    operation: "provision_user",
                    detail: "user reported as existing but not found by username".into(),
                }),
            status => Err(IdentityError::Rejected {
                operation: "provision_user",
                status,
            }),
        }
    }

    /// Look a user up by exact username.
    fn find_user_id(
        &self,
        username: &str,
        admin_token: &str,
    ) -> Result<Option<String>, IdentityError> {
        let request = ApiRequest::new(Method::Get, self.admin_users_endpoint())
            .query("username", username)
            .bearer(Some(admin_token));
        let response = self.transport.send(&request)?;
        if response.status != 200 {
            return Err(IdentityError::Rejected {
                operation: "find_user_id",
                status: response.status,
            });
        }
        let users: Vec<Value> = response
            .json()
            .and_then(|v| v.as_array().cloned())
            .ok_or_else(|| IdentityError::Malformed {
                operation: "find_user_id",
                detail: "user listing is not a JSON array".into(),
            })?;
        Ok(users
            .first()
            .and_then(|u| u.get("id"))
            .and_then(Value::as_str)
            .map(str::to_string))
    }
}

fn access_token(body: &str, operation: &'static str) -> Result<String, IdentityError> {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| {
            v.get("access_token")
                .and_then(Value::as_str)
                .map(str::to_string)
        })
        .ok_or_else(|| IdentityError::Malformed {
            operation,
            detail: "token response lacks access_token".into(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::response::ApiResponse;
    use std::cell::RefCell;
    use std::collections::BTreeMap;

    fn config() -> KeycloakConfig {
        KeycloakConfig {
            base_url: "http://kc:8090".into(),
            realm: "comandalivre".into(),
            client_id: "backend".into(),
            client_secret: "secret".into(),
            admin_realm: "master".into(),
            admin_client_id: "admin-cli".into(),
            admin_username: "admin".into(),
            admin_password: "admin".into(),
        }
    }

    fn reply(status: u16, body: &str) -> ApiResponse {
        ApiResponse {
            status,
            headers: BTreeMap::new(),
            body: body.to_string(),
        }
    }

    /// Scripted transport: answers requests in order from a queue.
    struct Script {
        replies: RefCell<Vec<ApiResponse>>,
    }

    impl Script {
        fn new(mut replies: Vec<ApiResponse>) -> Box<Self> {
            replies.reverse();
            Box::new(Script {
                replies: RefCell::new(replies),
            })
        }
    }

    impl Transport for Script {
        fn send(&self, request: &ApiRequest) -> Result<ApiResponse, NoResponse> {
            self.replies.borrow_mut().pop().ok_or_else(|| NoResponse {
                url: request.url.clone(),
                message: "script exhausted".into(),
            })
        }
    }

    #[test]
    fn authenticate_returns_access_token() {
        let client = KeycloakClient::new(
            config(),
            Script::new(vec![reply(200, r#"{"access_token":"tok-abc"}"#)]),
        );
        assert_eq!(client.authenticate("u", "p").unwrap(), "tok-abc");
    }

    #[test]
    fn authenticate_maps_rejection_status() {
        let client = KeycloakClient::new(
            config(),
            Script::new(vec![reply(401, r#"{"error":"invalid_grant"}"#)]),
        );
        match client.authenticate("u", "bad") {
            Err(IdentityError::Rejected { status: 401, .. }) => {}
            other => panic!("unexpected: {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn provision_user_reads_location_on_created() {
        let mut created = reply(201, "");
        created.headers.insert(
            "location".into(),
            "http://kc:8090/admin/realms/comandalivre/users/user-42".into(),
        );
        let client = KeycloakClient::new(
            config(),
            Script::new(vec![reply(200, r#"{"access_token":"admin-tok"}"#), created]),
        );
        let profile = UserProfile {
            username: "ana@example.com".into(),
            email: "ana@example.com".into(),
            first_name: "Ana".into(),
            last_name: "Silva".into(),
            password: "pw".into(),
        };
        assert_eq!(client.provision_user(&profile).unwrap(), "user-42");
    }

    #[test]
    fn provision_user_resolves_conflict_to_existing_id() {
        // First call creates, second call hits 409 and looks the user up;
        // both resolve to the same identifier.
        let mut created = reply(201, "");
        created
            .headers
            .insert("location".into(), "/admin/realms/x/users/user-7".into());
        let replies = vec![
            reply(200, r#"{"access_token":"admin-tok"}"#),
            created,
            reply(200, r#"{"access_token":"admin-tok"}"#),
            reply(409, r#"{"errorMessage":"User exists"}"#),
            reply(200, r#"[{"id":"user-7","username":"ana@example.com"}]"#),
        ];
        let client = KeycloakClient::new(config(), Script::new(replies));
        let profile = UserProfile {
            username: "ana@example.com".into(),
            email: "ana@example.com".into(),
            first_name: "Ana".into(),
            last_name: "Silva".into(),
            password: "pw".into(),
        };
        let first = client.provision_user(&profile).unwrap();
        let second = client.provision_user(&profile).unwrap();
        assert_eq!(first, "user-7");
        assert_eq!(first, second);
    }
}
