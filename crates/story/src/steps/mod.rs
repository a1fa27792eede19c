//! The step library: one function per business operation or assertion.
//!
//! Every step is a pure function of the shared env: it reads its
//! preconditions from the context, calls the collaborators, writes its
//! effects back and returns an [`Outcome`]. No step panics on a bad
//! response — structural surprises become failure outcomes.
//!
//! Positive steps follow an act-then-verify discipline: the initiating
//! call must be accepted AND a follow-up read must confirm the resulting
//! state, so an API that accepts a request but silently no-ops it cannot
//! produce a false positive. Negative steps assert the remote system's
//! rejection signature via [`expect_rejection`].

pub mod commands;
pub mod onboarding;
pub mod orders;
pub mod products;
pub mod tables;

use comanda_client::ApiResult;
use serde_json::Value;

use crate::context;
use crate::env::StoryEnv;
use crate::lifecycle::{CommandStatus, RejectSignature, SignatureMatch};
use crate::outcome::Outcome;

/// `Status 200` / `Status N/A` detail fragment, as shown in reports.
pub(crate) fn status_detail(result: &ApiResult) -> String {
    match result {
        Ok(response) => format!("Status {}", response.status),
        Err(_) => "Status N/A".to_string(),
    }
}

pub(crate) fn has_status(result: &ApiResult, expected: u16) -> bool {
    matches!(result, Ok(response) if response.status == expected)
}

/// 200 or 201 — profile upsert endpoints answer either.
pub(crate) fn is_ok_or_created(result: &ApiResult) -> bool {
    matches!(result, Ok(response) if response.status == 200 || response.status == 201)
}

/// Evaluate a negative step's response against its expected rejection
/// signature. A divergent message with the right status passes
/// second-tier, with the divergence kept in the detail.
pub(crate) fn expect_rejection(
    result: &ApiResult,
    signature: &RejectSignature,
    accepted_detail: &str,
) -> Outcome {
    match result {
        Err(e) => Outcome::failure(format!("No response. {}", e)),
        Ok(response) => match signature.check(response) {
            SignatureMatch::Full => Outcome::success(accepted_detail),
            SignatureMatch::Divergent { got } => Outcome::success(format!(
                "{} (status matched; message diverged: {})",
                accepted_detail,
                got.unwrap_or_else(|| "<none>".into())
            )),
            SignatureMatch::Mismatch { detail } => {
                Outcome::failure(format!("Unexpected response. {}", detail))
            }
        },
    }
}

/// Current `status.key` of the story's command, re-read from the API.
pub(crate) fn command_status_key(env: &StoryEnv) -> Option<String> {
    let command_id = env.ctx.id(context::COMMAND_ID)?;
    let response = env.api.get_command_by_id(command_id).ok()?;
    if response.status != 200 {
        return None;
    }
    response
        .json()?
        .get("status")?
        .get("key")?
        .as_str()
        .map(str::to_string)
}

/// PATCH the command's status, optionally closing all open orders.
pub(crate) fn update_command_status(
    env: &StoryEnv,
    command_id: &str,
    status: CommandStatus,
    close_all: bool,
) -> ApiResult {
    let mut body = serde_json::json!({ "status": status.request_value() });
    if close_all {
        body["closeAll"] = Value::Bool(true);
    }
    env.api.update_command_status(command_id, &body)
}

/// Public products of a company; `None` when the listing cannot be read.
pub(crate) fn public_products(
    env: &StoryEnv,
    company_id: &str,
    page_size: Option<u32>,
) -> Option<Vec<Value>> {
    let query = match page_size {
        Some(size) => vec![("pageSize".to_string(), size.to_string())],
        None => Vec::new(),
    };
    let response = env.api.get_public_products(company_id, query).ok()?;
    if response.status != 200 {
        return None;
    }
    let products = response.page_content();
    if products.is_empty() {
        None
    } else {
        Some(products)
    }
}

/// Orders currently attached to a command.
pub(crate) fn orders_for_command(env: &StoryEnv, command_id: &str) -> Option<Vec<Value>> {
    let response = env
        .api
        .get_orders(vec![("commandId".into(), command_id.into())])
        .ok()?;
    if response.status != 200 {
        return None;
    }
    Some(response.page_content())
}

pub(crate) fn value_id(value: &Value) -> Option<String> {
    value.get("id").and_then(Value::as_str).map(str::to_string)
}
