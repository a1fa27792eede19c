//! Table steps: listings, bulk creation, update, deletion.

use serde_json::Value;

use crate::actors::Role;
use crate::context::COMPANY_ID;
use crate::env::StoryEnv;
use crate::extract::extract_default_id;
use crate::outcome::Outcome;
use crate::steps::{has_status, status_detail};

/// Step 31: the full table listing is non-empty.
pub fn get_table_list(env: &mut StoryEnv) -> Outcome {
    env.act_as(Role::Owner);
    let Some(company_id) = env.ctx.id(COMPANY_ID).map(str::to_string) else {
        return Outcome::failure("Missing company ID.");
    };

    let result = env
        .api
        .get_tables_list(vec![("companyId".into(), company_id)]);
    let tables = list_payload(&result);
    if has_status(&result, 200) && !tables.is_empty() {
        Outcome::success("Tables listed.")
    } else {
        Outcome::failure(format!("Failed to list tables. {}", status_detail(&result)))
    }
}

/// Step 32: a table can be fetched back by its identifier.
pub fn get_table_by_id(env: &mut StoryEnv) -> Outcome {
    env.act_as(Role::Owner);
    let Some(company_id) = env.ctx.id(COMPANY_ID).map(str::to_string) else {
        return Outcome::failure("Missing company ID.");
    };

    let listing = env
        .api
        .get_tables_list(vec![("companyId".into(), company_id)]);
    let tables = list_payload(&listing);
    let Some(table_id) = tables.first().and_then(|t| super::value_id(t)) else {
        return Outcome::failure("No tables available.");
    };

    let result = env.api.get_table_by_id(&table_id);
    let fetched_id = result
        .as_ref()
        .ok()
        .filter(|response| response.status == 200)
        .and_then(|response| response.json())
        .and_then(|body| body.get("id").and_then(Value::as_str).map(str::to_string));
    if fetched_id.as_deref() == Some(table_id.as_str()) {
        Outcome::success("Table retrieved.")
    } else {
        Outcome::failure(format!("Failed to fetch table. {}", status_detail(&result)))
    }
}

/// Step 33: bulk creation covers a numbered range, verified by searching
/// for one table inside the range.
pub fn create_tables_bulk(env: &mut StoryEnv) -> Outcome {
    env.act_as(Role::Owner);
    let Some(company_id) = env.ctx.id(COMPANY_ID).map(str::to_string) else {
        return Outcome::failure("Missing company ID.");
    };

    let bulk = env
        .datagen
        .table_bulk_data(&company_id, 10, 99, 4, Some("Mesas criadas em lote"));
    let bulk_result = env.api.create_tables_bulk(&bulk);
    if !has_status(&bulk_result, 200) {
        return Outcome::failure(format!(
            "Failed to create bulk tables. {}",
            status_detail(&bulk_result)
        ));
    }

    let search_result = env.api.get_tables(vec![
        ("companyId".into(), company_id),
        ("search".into(), "Mesa 42".into()),
    ]);
    let found = search_result
        .as_ref()
        .ok()
        .filter(|response| response.status == 200)
        .map(|response| response.page_content())
        .unwrap_or_default();
    if !found.is_empty() {
        Outcome::success("Bulk tables created.")
    } else {
        Outcome::failure(format!(
            "Failed to verify bulk tables. {}",
            status_detail(&search_result)
        ))
    }
}

/// Step 34: the owner updates a table and verifies the new name stuck.
pub fn update_table(env: &mut StoryEnv) -> Outcome {
    env.act_as(Role::Owner);
    let Some(company_id) = env.ctx.id(COMPANY_ID).map(str::to_string) else {
        return Outcome::failure("Missing company ID.");
    };

    let listing = env.api.get_tables(vec![
        ("companyId".into(), company_id),
        ("pageSize".into(), "1".into()),
    ]);
    let tables = listing
        .as_ref()
        .ok()
        .map(|response| response.page_content())
        .unwrap_or_default();
    let Some(table_id) = tables.first().and_then(|t| super::value_id(t)) else {
        return Outcome::failure("No tables to update.");
    };

    let update = env.datagen.table_update_data();
    let update_result = env.api.update_table(&table_id, &update);
    if !has_status(&update_result, 200) {
        return Outcome::failure(format!(
            "Failed to update table. {}",
            status_detail(&update_result)
        ));
    }

    let lookup = env.api.get_table_by_id(&table_id);
    let name_after = lookup
        .as_ref()
        .ok()
        .filter(|response| response.status == 200)
        .and_then(|response| response.json())
        .and_then(|body| body.get("name").and_then(Value::as_str).map(str::to_string));
    if name_after.as_deref() == Some(update.name.as_str()) {
        Outcome::success("Table updated.")
    } else {
        Outcome::failure(format!(
            "Failed to verify table update. {}",
            status_detail(&lookup)
        ))
    }
}

/// Step 35: a deleted table stops resolving. Creates a throwaway table
/// first so seeded tables keep serving the command steps.
pub fn delete_table(env: &mut StoryEnv) -> Outcome {
    env.act_as(Role::Owner);
    let Some(company_id) = env.ctx.id(COMPANY_ID).map(str::to_string) else {
        return Outcome::failure("Missing company ID.");
    };

    let table = env.datagen.table_data(&company_id, "Mesa para Deletar");
    let create_result = env.api.create_table(&table);
    if !has_status(&create_result, 201) {
        return Outcome::failure("Failed to create table for deletion.");
    }
    let Some(table_id) = create_result.ok().as_ref().and_then(extract_default_id) else {
        return Outcome::failure("Failed to extract table ID.");
    };

    let deletion = env.api.delete_table(&table_id);
    if !has_status(&deletion, 204) {
        return Outcome::failure(format!(
            "Failed to delete table. {}",
            status_detail(&deletion)
        ));
    }

    let lookup = env.api.get_table_by_id(&table_id);
    if has_status(&lookup, 404) {
        Outcome::success("Table deleted and not found.")
    } else {
        Outcome::failure(format!("Unexpected response. {}", status_detail(&lookup)))
    }
}

/// The tables listing endpoint answers either a bare array or a paginated
/// envelope; accept both.
fn list_payload(result: &comanda_client::ApiResult) -> Vec<Value> {
    let Some(response) = result.as_ref().ok() else {
        return Vec::new();
    };
    match response.json() {
        Some(Value::Array(items)) => items,
        Some(_) => response.page_content(),
        None => Vec::new(),
    }
}
