//! Command lifecycle steps: creation, status transitions, table changes,
//! bill data and the negative guards around them.

use serde_json::Value;

use crate::actors::Role;
use crate::context::{COMMAND_ID, COMPANY_ID, CURRENT_TABLE_ID, NEW_TABLE_ID, WAITER_EMPLOYEE_ID};
use crate::env::StoryEnv;
use crate::extract::extract_default_id;
use crate::lifecycle::{
    cross_company_table_rejection, same_table_rejection, self_transition_rejection,
    table_change_requires_open_rejection, CommandStatus, RejectSignature,
};
use crate::outcome::Outcome;
use crate::steps::{
    command_status_key, expect_rejection, has_status, status_detail, update_command_status,
};

/// Step 7: the waiter opens a command on the company's first table.
pub fn waiter_creates_command(env: &mut StoryEnv) -> Outcome {
    env.act_as(Role::Waiter);
    let Some(company_id) = env.ctx.id(COMPANY_ID).map(str::to_string) else {
        return Outcome::failure("Missing company ID.");
    };

    let employees_result = env.api.get_employees_for_company(&company_id);
    let tables_result = env.api.get_tables(vec![
        ("companyId".into(), company_id.clone()),
        ("pageSize".into(), "1".into()),
    ]);

    // The employees endpoint either returns the caller's own record or a
    // page of records; match the waiter by email in the latter case.
    let employees_body = employees_result.ok().and_then(|r| r.json());
    let mut employee_id = employees_body
        .as_ref()
        .and_then(|body| body.get("id"))
        .and_then(Value::as_str)
        .map(str::to_string);
    if employee_id.is_none() {
        let waiter_email = env
            .actors
            .credential(Role::Waiter)
            .map(|c| c.email.clone())
            .unwrap_or_default();
        employee_id = employees_body
            .as_ref()
            .and_then(|body| body.get("content"))
            .and_then(Value::as_array)
            .and_then(|content| {
                content
                    .iter()
                    .find(|item| {
                        item.get("user")
                            .and_then(|user| user.get("email"))
                            .and_then(Value::as_str)
                            == Some(waiter_email.as_str())
                    })
                    .and_then(|item| super::value_id(item))
            });
    }

    let tables = tables_result
        .ok()
        .map(|response| response.page_content())
        .unwrap_or_default();
    let (Some(employee_id), Some(table_id)) =
        (employee_id, tables.first().and_then(|t| super::value_id(t)))
    else {
        return Outcome::failure("Could not fetch employees or tables for the company.");
    };

    env.ctx.set_id(CURRENT_TABLE_ID, table_id.clone());
    env.ctx.set_id(WAITER_EMPLOYEE_ID, employee_id.clone());

    let command = env.datagen.command_data(&table_id, &employee_id);
    let result = env.api.create_command(&command);
    match &result {
        Ok(response) if response.status == 201 => {
            if let Some(command_id) = extract_default_id(response) {
                env.ctx.set_id(COMMAND_ID, command_id);
            }
            Outcome::success("Command created successfully.")
        }
        _ => Outcome::failure(format!(
            "Failed to create command. {}",
            status_detail(&result)
        )),
    }
}

/// Step 9: the owner moves the command to PAYING and re-reads the status.
pub fn owner_sets_command_paying(env: &mut StoryEnv) -> Outcome {
    if !env.refresh_token(Role::Owner) {
        return Outcome::failure("Failed to refresh owner token.");
    }
    transition_and_verify(env, CommandStatus::Paying, false, "Failed to set PAYING.")
}

/// Step 10: the owner closes the command.
pub fn owner_closes_command(env: &mut StoryEnv) -> Outcome {
    env.act_as(Role::Owner);
    transition_and_verify(env, CommandStatus::Closed, true, "Failed to close command.")
}

/// Step 11: the owner reopens the closed command.
pub fn owner_reopens_command(env: &mut StoryEnv) -> Outcome {
    env.act_as(Role::Owner);
    transition_and_verify(env, CommandStatus::Open, false, "Failed to reopen command.")
}

/// Step 12: the waiter moves the command to a newly created table and
/// verifies the table reference actually changed.
pub fn waiter_changes_table(env: &mut StoryEnv) -> Outcome {
    env.act_as(Role::Waiter);
    let (Some(company_id), Some(command_id)) = (
        env.ctx.id(COMPANY_ID).map(str::to_string),
        env.ctx.id(COMMAND_ID).map(str::to_string),
    ) else {
        return Outcome::failure("Missing company or command ID.");
    };

    let table = env.datagen.table_data(&company_id, "Mesa Nova 1");
    let table_result = env.api.create_table(&table);
    if !has_status(&table_result, 201) {
        return Outcome::failure("Failed to create new table.");
    }
    let Some(new_table_id) = table_result.ok().as_ref().and_then(extract_default_id) else {
        return Outcome::failure("Failed to extract new table ID.");
    };
    env.ctx.set_id(NEW_TABLE_ID, new_table_id.clone());

    let change_result = env.api.change_command_table(
        &command_id,
        &serde_json::json!({ "newTableId": new_table_id }),
    );
    if !has_status(&change_result, 200) {
        return Outcome::failure(format!(
            "Failed to change table. {}",
            status_detail(&change_result)
        ));
    }

    let table_after = env
        .api
        .get_command_by_id(&command_id)
        .ok()
        .and_then(|response| response.json())
        .and_then(|body| {
            body.get("table")
                .and_then(|table| table.get("id"))
                .and_then(Value::as_str)
                .map(str::to_string)
        });
    if table_after.as_deref() == Some(new_table_id.as_str()) {
        Outcome::success("Table changed successfully.")
    } else {
        Outcome::failure("Command table did not update.")
    }
}

/// Step 13: changing to the table the command already sits on must be
/// rejected — but only the second, redundant change; the first change
/// back to the original table is legal.
pub fn cannot_change_to_same_table_twice(env: &mut StoryEnv) -> Outcome {
    if !env.refresh_token(Role::Waiter) {
        return Outcome::failure("Failed to refresh waiter token.");
    }
    let (Some(command_id), Some(current_table_id)) = (
        env.ctx.id(COMMAND_ID).map(str::to_string),
        env.ctx.id(CURRENT_TABLE_ID).map(str::to_string),
    ) else {
        return Outcome::failure("Missing command or table ID.");
    };

    // Table changes require an open command; earlier steps may have left
    // it closed.
    if command_status_key(env).as_deref() != Some(CommandStatus::Open.key()) {
        if !env.refresh_token(Role::Owner) {
            return Outcome::failure("Failed to refresh owner token.");
        }
        let reopen = update_command_status(env, &command_id, CommandStatus::Open, false);
        if !has_status(&reopen, 200) {
            return Outcome::failure(format!(
                "Failed to reopen command. {}",
                status_detail(&reopen)
            ));
        }
        env.refresh_token(Role::Waiter);
    }

    let change = serde_json::json!({ "newTableId": current_table_id });
    let first = env.api.change_command_table(&command_id, &change);
    match &first {
        Err(_) => {
            return Outcome::failure("Failed to change back to original table. No response.")
        }
        Ok(response) if response.status != 200 => {
            return Outcome::failure(format!(
                "Failed to change back to original table. Status: {}. {}",
                response.status,
                response.message().unwrap_or_else(|| response.body.clone())
            ));
        }
        Ok(_) => {}
    }

    let second = env.api.change_command_table(&command_id, &change);
    expect_rejection(
        &second,
        &same_table_rejection(),
        "Rejected duplicate table change.",
    )
}

/// Step 14: a table belonging to a different company must be rejected as
/// a change target regardless of status.
pub fn cannot_change_to_other_company_table(env: &mut StoryEnv) -> Outcome {
    env.act_as(Role::Waiter);
    let Some(command_id) = env.ctx.id(COMMAND_ID).map(str::to_string) else {
        return Outcome::failure("Missing command ID.");
    };

    let other_company = env.datagen.company_data();
    let company_result = env.api.create_company(&other_company);
    if !has_status(&company_result, 201) {
        return Outcome::failure("Failed to create other company.");
    }
    let Some(other_company_id) = company_result.ok().as_ref().and_then(extract_default_id) else {
        return Outcome::failure("Failed to extract other company ID.");
    };

    let other_table = env
        .datagen
        .table_data(&other_company_id, "Mesa Outra Empresa");
    let table_result = env.api.create_table(&other_table);
    if !has_status(&table_result, 201) {
        return Outcome::failure("Failed to create table for other company.");
    }
    let Some(other_table_id) = table_result.ok().as_ref().and_then(extract_default_id) else {
        return Outcome::failure("Failed to extract other table ID.");
    };

    let result = env.api.change_command_table(
        &command_id,
        &serde_json::json!({ "newTableId": other_table_id }),
    );
    expect_rejection(
        &result,
        &cross_company_table_rejection(),
        "Rejected cross-company table change.",
    )
}

/// Step 15: table changes are rejected while the command is closed.
pub fn cannot_change_table_when_closed(env: &mut StoryEnv) -> Outcome {
    env.act_as(Role::Owner);
    let (Some(company_id), Some(command_id), Some(current_table_id)) = (
        env.ctx.id(COMPANY_ID).map(str::to_string),
        env.ctx.id(COMMAND_ID).map(str::to_string),
        env.ctx.id(CURRENT_TABLE_ID).map(str::to_string),
    ) else {
        return Outcome::failure("Missing company, command or table ID.");
    };

    let paying = update_command_status(env, &command_id, CommandStatus::Paying, false);
    let closed = update_command_status(env, &command_id, CommandStatus::Closed, false);
    if !(has_status(&paying, 200) && has_status(&closed, 200)) {
        return Outcome::failure("Failed to close command before change table attempt.");
    }

    env.act_as(Role::Waiter);
    let tables = env
        .api
        .get_tables(vec![
            ("companyId".into(), company_id.clone()),
            ("pageSize".into(), "5".into()),
        ])
        .ok()
        .map(|response| response.page_content())
        .unwrap_or_default();
    let mut target_table_id = tables
        .iter()
        .filter_map(|table| super::value_id(table))
        .find(|id| id != &current_table_id);

    if target_table_id.is_none() {
        let extra = env.datagen.table_data(&company_id, "Mesa Extra");
        let result = env.api.create_table(&extra);
        if !has_status(&result, 201) {
            return Outcome::failure("Failed to create extra table.");
        }
        target_table_id = result.ok().as_ref().and_then(extract_default_id);
    }

    let result = env.api.change_command_table(
        &command_id,
        &serde_json::json!({ "newTableId": target_table_id }),
    );
    expect_rejection(
        &result,
        &table_change_requires_open_rejection(),
        "Rejected change when closed.",
    )
}

/// Step 16: reopening a command that is already open is an illegal
/// self-transition.
pub fn cannot_reopen_open_command(env: &mut StoryEnv) -> Outcome {
    env.act_as(Role::Owner);
    let Some(command_id) = env.ctx.id(COMMAND_ID).map(str::to_string) else {
        return Outcome::failure("Missing command ID.");
    };

    let open = update_command_status(env, &command_id, CommandStatus::Open, false);
    if !has_status(&open, 200) {
        return Outcome::failure("Failed to open command before validation.");
    }

    let repeat = update_command_status(env, &command_id, CommandStatus::Open, false);
    expect_rejection(
        &repeat,
        &self_transition_rejection(CommandStatus::Open),
        "Rejected duplicate open status.",
    )
}

/// Step 22: the commands count endpoint is not exposed to tenant tokens.
pub fn commands_count_unauthorized(env: &mut StoryEnv) -> Outcome {
    env.act_as(Role::Owner);
    let result = env.api.get_commands_count();
    expect_rejection(
        &result,
        &RejectSignature::status_only(401),
        "Received 401 as expected.",
    )
}

/// Step 23: the bill read returns command, company and item references.
pub fn get_bill_data(env: &mut StoryEnv) -> Outcome {
    env.act_as(Role::Owner);
    let Some(command_id) = env.ctx.id(COMMAND_ID).map(str::to_string) else {
        return Outcome::failure("Missing command ID.");
    };

    let result = env.api.get_command_bill_data(&command_id);
    if let Ok(response) = &result {
        if response.status == 200 {
            if let Some(body) = response.json() {
                let has_command = body.get("command").map_or(false, |v| !v.is_null());
                let has_company = body.get("company").map_or(false, |v| !v.is_null());
                let has_items = body.get("items").map_or(false, |v| !v.is_null());
                if has_command && has_company && has_items {
                    return Outcome::success("Bill data returned.");
                }
            }
        }
    }
    Outcome::failure(format!(
        "Failed to fetch bill data. {}",
        status_detail(&result)
    ))
}

/// Step 26: after closing with `closeAll`, the command reports fully
/// closed. The endpoint answers a bare boolean body.
pub fn check_command_fully_closed(env: &mut StoryEnv) -> Outcome {
    env.act_as(Role::Owner);
    let Some(command_id) = env.ctx.id(COMMAND_ID).map(str::to_string) else {
        return Outcome::failure("Missing command ID.");
    };

    let paying = update_command_status(env, &command_id, CommandStatus::Paying, false);
    let closed = update_command_status(env, &command_id, CommandStatus::Closed, true);
    if !(has_status(&paying, 200) && has_status(&closed, 200)) {
        return Outcome::failure("Failed to close command.");
    }

    let result = env.api.is_command_fully_closed(&command_id);
    if let Ok(response) = &result {
        if response.status == 200 {
            let literal_true = response.body.trim().eq_ignore_ascii_case("true");
            let json_true = response.json() == Some(Value::Bool(true));
            if literal_true || json_true {
                return Outcome::success("Command fully closed.");
            }
        }
    }
    Outcome::failure(format!("Unexpected response. {}", status_detail(&result)))
}

/// Transition the story's command and confirm the persisted status via an
/// authoritative re-read; a 2xx alone is not proof of effect.
fn transition_and_verify(
    env: &mut StoryEnv,
    to: CommandStatus,
    close_all: bool,
    failure_prefix: &str,
) -> Outcome {
    let Some(command_id) = env.ctx.id(COMMAND_ID).map(str::to_string) else {
        return Outcome::failure("Missing command ID.");
    };
    let result = update_command_status(env, &command_id, to, close_all);
    if !has_status(&result, 200) {
        return Outcome::failure(format!("{} {}", failure_prefix, status_detail(&result)));
    }
    match command_status_key(env) {
        Some(key) if key == to.key() => {
            Outcome::success(format!("Command status is {}.", to.key()))
        }
        other => Outcome::failure(format!("Unexpected status: {:?}", other)),
    }
}
