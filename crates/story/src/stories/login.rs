//! Login smoke story: direct-grant authentication with the
//! pre-configured realm user, then a profile load to prove the token is
//! honored by the API.

use crate::env::StoryEnv;
use crate::outcome::Outcome;
use crate::runner::Step;
use crate::steps::is_ok_or_created;

pub const STEPS: &[Step] = &[Step {
    description: "Authenticate test user with Keycloak",
    reads: &[],
    writes: &[],
    run: direct_grant_login,
}];

fn direct_grant_login(env: &mut StoryEnv) -> Outcome {
    let username = env.test_username.clone();
    let password = env.test_password.clone();
    match env.idp.authenticate(&username, &password) {
        Ok(token) => {
            env.api.set_token(Some(token));
            let profile = env.api.auth();
            if is_ok_or_created(&profile) {
                Outcome::success(format!("Authenticated '{}' and loaded profile.", username))
            } else {
                Outcome::failure("Token received but profile load failed.")
            }
        }
        Err(e) => Outcome::failure(format!("Authentication failed: {}", e)),
    }
}
