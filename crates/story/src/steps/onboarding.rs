//! Onboarding steps: identities, company, catalog seed, waiter invite.

use serde_json::Value;

use crate::actors::Role;
use crate::context::{
    COMPANY_ID, CURRENT_TABLE_ID, INVITE_ALREADY_EMPLOYEE, INVITE_ID, PRODUCT_CATEGORY_ID,
    PRODUCT_IDS, TABLE_IDS,
};
use crate::env::StoryEnv;
use crate::extract::extract_default_id;
use crate::lifecycle::ALREADY_EMPLOYEE_MESSAGE;
use crate::outcome::Outcome;
use crate::steps::{has_status, is_ok_or_created, status_detail};

/// Step 1: provision the owner identity and authenticate it.
pub fn owner_authentication(env: &mut StoryEnv) -> Outcome {
    let Some(credential) = env.ensure_identity(Role::Owner) else {
        return Outcome::failure("Failed to create owner in Keycloak.");
    };
    match env.idp.authenticate(&credential.username, &credential.password) {
        Ok(token) => {
            env.actors.set_token(Role::Owner, token.clone());
            env.api.set_token(Some(token));
            Outcome::success("Token received.")
        }
        Err(e) => Outcome::failure(format!("Authentication failed: {}", e)),
    }
}

/// Step 2: create or load the owner's profile in the API.
pub fn owner_profile(env: &mut StoryEnv) -> Outcome {
    let result = env.api.auth();
    if is_ok_or_created(&result) {
        Outcome::success("Owner profile loaded.")
    } else {
        Outcome::failure(status_detail(&result))
    }
}

/// Step 3: the owner creates a restaurant company.
pub fn create_company(env: &mut StoryEnv) -> Outcome {
    let company = env.datagen.company_data();
    let result = env.api.create_company(&company);
    if let Ok(response) = &result {
        if response.status == 201 {
            if let Some(company_id) = extract_default_id(response) {
                env.ctx.set_id(COMPANY_ID, company_id);
                return Outcome::success(format!("Company '{}' created.", company.name));
            }
        }
    }
    Outcome::failure(format!(
        "Failed to create company. {}",
        status_detail(&result)
    ))
}

/// Step 4: the owner seeds three products and three tables.
pub fn seed_products_and_tables(env: &mut StoryEnv) -> Outcome {
    let Some(company_id) = env.ctx.id(COMPANY_ID).map(str::to_string) else {
        return Outcome::failure("Missing company ID.");
    };

    let categories_result = env.api.get_product_categories();
    let categories: Vec<Value> = match &categories_result {
        Ok(response) if response.status == 200 => response
            .json()
            .and_then(|v| v.as_array().cloned())
            .unwrap_or_default(),
        _ => Vec::new(),
    };
    let Some(category_id) = categories.first().and_then(|c| super::value_id(c)) else {
        return Outcome::failure("Could not fetch product categories.");
    };
    env.ctx.set_id(PRODUCT_CATEGORY_ID, category_id.clone());

    for _ in 0..3 {
        let product = env.datagen.product_data(&company_id, &category_id);
        let result = env.api.create_product(&product);
        if !has_status(&result, 201) {
            return Outcome::failure("Failed to create a product.");
        }
        if let Ok(response) = &result {
            if let Some(product_id) = extract_default_id(response) {
                env.ctx.push_id(PRODUCT_IDS, product_id);
            }
        }
    }

    for index in 0..3 {
        let name = format!("Mesa {}", index + 1);
        let table = env.datagen.table_data(&company_id, &name);
        let result = env.api.create_table(&table);
        if !has_status(&result, 201) {
            return Outcome::failure("Failed to create a table.");
        }
        if let Ok(response) = &result {
            if let Some(table_id) = extract_default_id(response) {
                env.ctx.push_id(TABLE_IDS, table_id);
            }
        }
    }

    if env.ctx.ids(PRODUCT_IDS).is_empty() || env.ctx.ids(TABLE_IDS).is_empty() {
        return Outcome::failure("Failed to capture created IDs.");
    }
    let first_table = env.ctx.ids(TABLE_IDS)[0].clone();
    env.ctx.set_id(CURRENT_TABLE_ID, first_table);
    Outcome::success("Seeded products and tables.")
}

/// Step 5: the owner invites the waiter identity as an employee.
///
/// The waiter must exist as an API profile before the invite, so the step
/// briefly authenticates as the waiter, loads the profile, then switches
/// back to the owner. An invite answered with the "already employee"
/// message is tolerated and recorded for step 6.
pub fn invite_waiter(env: &mut StoryEnv) -> Outcome {
    env.act_as(Role::Owner);
    let Some(company_id) = env.ctx.id(COMPANY_ID).map(str::to_string) else {
        return Outcome::failure("Missing company ID.");
    };

    let Some(waiter) = env.ensure_identity(Role::Waiter) else {
        return Outcome::failure("Failed to create waiter in Keycloak.");
    };
    let token = match env.idp.authenticate(&waiter.username, &waiter.password) {
        Ok(token) => token,
        Err(_) => return Outcome::failure("Failed to authenticate waiter before invite."),
    };
    env.actors.set_token(Role::Waiter, token.clone());
    env.api.set_token(Some(token));
    if !is_ok_or_created(&env.api.auth()) {
        return Outcome::failure("Failed to create waiter profile before invite.");
    }

    env.act_as(Role::Owner);

    let roles_result = env.api.get_role_types_list();
    if !has_status(&roles_result, 200) {
        return Outcome::failure("Could not fetch role types.");
    }
    let roles: Vec<Value> = roles_result
        .ok()
        .and_then(|r| r.json())
        .and_then(|v| v.as_array().cloned())
        .unwrap_or_default();
    let Some(role_id) = roles
        .iter()
        .find(|role| role.get("key").and_then(Value::as_str) == Some("waiter"))
        .and_then(|role| super::value_id(role))
    else {
        return Outcome::failure("Could not find role 'waiter'.");
    };

    let invite = env
        .datagen
        .employee_invite_data(&company_id, &role_id, &waiter.email);
    let result = env.api.invite_employee(&invite);
    match &result {
        Ok(response) if response.status == 201 => {
            let invite_id = extract_default_id(response)
                .or_else(|| fetch_invite_id_by_company(env, &company_id, &waiter.email));
            match invite_id {
                Some(invite_id) => {
                    env.ctx.set_id(INVITE_ID, invite_id);
                    Outcome::success(format!("Invite sent to {}.", waiter.email))
                }
                None => Outcome::failure("Invite created but ID not found."),
            }
        }
        Ok(response)
            if response.status == 400
                && response.message().as_deref() == Some(ALREADY_EMPLOYEE_MESSAGE) =>
        {
            env.ctx.set_flag(INVITE_ALREADY_EMPLOYEE, true);
            Outcome::success("User already employee; invite skipped.")
        }
        Ok(response) => Outcome::failure(format!(
            "Failed to send invite. Status: {}. {}",
            response.status,
            response.message().unwrap_or_else(|| response.body.clone())
        )),
        Err(_) => Outcome::failure("Failed to send invite. No response (request error)."),
    }
}

/// Step 6: the waiter authenticates and accepts the invite.
pub fn waiter_accepts_invite(env: &mut StoryEnv) -> Outcome {
    let Some(waiter) = env.actors.credential(Role::Waiter).cloned() else {
        return Outcome::failure("Missing waiter credentials.");
    };

    let token = match env.idp.authenticate(&waiter.username, &waiter.password) {
        Ok(token) => token,
        Err(_) => return Outcome::failure("Waiter failed to authenticate with Keycloak."),
    };
    env.actors.set_token(Role::Waiter, token.clone());
    env.api.set_token(Some(token));

    if !is_ok_or_created(&env.api.auth()) {
        return Outcome::failure("Waiter profile load failed.");
    }

    if env.ctx.flag(INVITE_ALREADY_EMPLOYEE) {
        return Outcome::success("Invite acceptance skipped (already employee).");
    }

    let invite_id = match env.ctx.id(INVITE_ID).map(str::to_string) {
        Some(invite_id) => invite_id,
        // Step 5 can create an invite whose ID was not returned; fall back
        // to the waiter's own invite listing, matched by company.
        None => {
            let company_id = env.ctx.id(COMPANY_ID).unwrap_or_default().to_string();
            let invites = env
                .api
                .get_my_employee_invites(vec![
                    ("pageNumber".into(), "0".into()),
                    ("pageSize".into(), "10".into()),
                ])
                .ok()
                .map(|response| response.page_content())
                .unwrap_or_default();
            let found = invites
                .iter()
                .find(|invite| {
                    invite
                        .get("company")
                        .and_then(|company| company.get("id"))
                        .and_then(Value::as_str)
                        == Some(company_id.as_str())
                })
                .and_then(|invite| super::value_id(invite));
            match found {
                Some(invite_id) => {
                    env.ctx.set_id(INVITE_ID, invite_id.clone());
                    invite_id
                }
                None => return Outcome::failure("Invite not found for waiter."),
            }
        }
    };

    let result = env.api.accept_employee_invite(&invite_id);
    if has_status(&result, 200) {
        Outcome::success("Invite accepted successfully.")
    } else {
        Outcome::failure(format!(
            "Failed to accept invite. {}",
            status_detail(&result)
        ))
    }
}

/// Find the waiter's invite in the company's invite listing by email.
fn fetch_invite_id_by_company(env: &StoryEnv, company_id: &str, email: &str) -> Option<String> {
    let response = env
        .api
        .get_employee_invites_by_company(
            company_id,
            vec![
                ("pageNumber".into(), "0".into()),
                ("pageSize".into(), "10".into()),
            ],
        )
        .ok()?;
    let email_lower = email.to_lowercase();
    response
        .page_content()
        .iter()
        .find(|invite| {
            invite
                .get("user")
                .and_then(|user| user.get("email"))
                .and_then(Value::as_str)
                .map(|e| e.to_lowercase())
                == Some(email_lower.clone())
        })
        .and_then(|invite| super::value_id(invite))
}
