//! Order steps: placing line items, status updates, removal, and the
//! guards that protect closed commands and foreign products.

use serde_json::Value;

use crate::actors::Role;
use crate::context::{COMMAND_ID, COMPANY_ID, WAITER_EMPLOYEE_ID};
use crate::env::StoryEnv;
use crate::extract::extract_default_id;
use crate::lifecycle::{
    order_on_closed_command_rejection, product_not_found_rejection, CommandStatus,
    MessageExpectation, RejectSignature,
};
use crate::outcome::Outcome;
use crate::steps::{
    expect_rejection, has_status, orders_for_command, public_products, status_detail,
    update_command_status,
};

/// Step 8: the waiter adds the first order to the command.
pub fn waiter_adds_order(env: &mut StoryEnv) -> Outcome {
    env.act_as(Role::Waiter);
    let (Some(company_id), Some(command_id)) = (
        env.ctx.id(COMPANY_ID).map(str::to_string),
        env.ctx.id(COMMAND_ID).map(str::to_string),
    ) else {
        return Outcome::failure("Missing company or command ID.");
    };

    let Some(products) = public_products(env, &company_id, Some(2)) else {
        return Outcome::failure("Could not fetch products to add to order.");
    };
    let product_ids: Vec<String> = products.iter().filter_map(super::value_id).collect();

    let order = env.datagen.order_form(&command_id, &product_ids, None);
    let result = env.api.add_order_to_command(&order);
    if has_status(&result, 201) {
        Outcome::success(format!("{} items added to command.", product_ids.len()))
    } else {
        Outcome::failure(format!("Failed to add order. {}", status_detail(&result)))
    }
}

/// Step 17: adding more products grows the command's order list.
pub fn waiter_adds_more_products(env: &mut StoryEnv) -> Outcome {
    env.act_as(Role::Waiter);
    let (Some(company_id), Some(command_id)) = (
        env.ctx.id(COMPANY_ID).map(str::to_string),
        env.ctx.id(COMMAND_ID).map(str::to_string),
    ) else {
        return Outcome::failure("Missing company or command ID.");
    };

    let initial_count = orders_for_command(env, &command_id)
        .map(|orders| orders.len())
        .unwrap_or(0);

    let Some(products) = public_products(env, &company_id, Some(2)) else {
        return Outcome::failure("Could not fetch products.");
    };
    let product_ids: Vec<String> = products.iter().take(2).filter_map(super::value_id).collect();

    let order = env.datagen.order_form(&command_id, &product_ids, None);
    let result = env.api.add_order_to_command(&order);
    if !has_status(&result, 201) {
        return Outcome::failure(format!("Failed to add order. {}", status_detail(&result)));
    }

    let updated_count = orders_for_command(env, &command_id)
        .map(|orders| orders.len())
        .unwrap_or(0);
    if updated_count > initial_count {
        Outcome::success("Order count increased.")
    } else {
        Outcome::failure("Order count did not increase.")
    }
}

/// Step 18: a closed command refuses new orders.
pub fn cannot_add_products_to_closed_command(env: &mut StoryEnv) -> Outcome {
    env.act_as(Role::Owner);
    let (Some(company_id), Some(command_id)) = (
        env.ctx.id(COMPANY_ID).map(str::to_string),
        env.ctx.id(COMMAND_ID).map(str::to_string),
    ) else {
        return Outcome::failure("Missing company or command ID.");
    };

    let paying = update_command_status(env, &command_id, CommandStatus::Paying, false);
    let closed = update_command_status(env, &command_id, CommandStatus::Closed, true);
    if !(has_status(&paying, 200) && has_status(&closed, 200)) {
        return Outcome::failure("Failed to close command.");
    }

    env.act_as(Role::Waiter);
    let Some(products) = public_products(env, &company_id, Some(1)) else {
        return Outcome::failure("Could not fetch products.");
    };
    let product_ids: Vec<String> = products.iter().take(1).filter_map(super::value_id).collect();

    let order = env.datagen.order_form(&command_id, &product_ids, None);
    let result = env.api.add_order_to_command(&order);
    expect_rejection(
        &result,
        &order_on_closed_command_rejection(),
        "Rejected order on closed command.",
    )
}

/// Step 19: empty notes are a legal order payload.
pub fn waiter_adds_product_with_empty_notes(env: &mut StoryEnv) -> Outcome {
    env.act_as(Role::Owner);
    let (Some(company_id), Some(command_id)) = (
        env.ctx.id(COMPANY_ID).map(str::to_string),
        env.ctx.id(COMMAND_ID).map(str::to_string),
    ) else {
        return Outcome::failure("Missing company or command ID.");
    };

    let reopen = update_command_status(env, &command_id, CommandStatus::Open, false);
    if !has_status(&reopen, 200) {
        return Outcome::failure("Failed to reopen command.");
    }

    env.act_as(Role::Waiter);
    let initial_count = orders_for_command(env, &command_id)
        .map(|orders| orders.len())
        .unwrap_or(0);

    let Some(products) = public_products(env, &company_id, Some(1)) else {
        return Outcome::failure("Could not fetch products.");
    };
    let product_ids: Vec<String> = products.iter().take(1).filter_map(super::value_id).collect();

    let order = env
        .datagen
        .order_form(&command_id, &product_ids, Some(vec![String::new()]));
    let result = env.api.add_order_to_command(&order);
    if !has_status(&result, 201) {
        return Outcome::failure(format!("Failed to add order. {}", status_detail(&result)));
    }

    let updated_count = orders_for_command(env, &command_id)
        .map(|orders| orders.len())
        .unwrap_or(0);
    if updated_count > initial_count {
        Outcome::success("Order added with empty notes.")
    } else {
        Outcome::failure("Order count did not increase.")
    }
}

/// Step 20: ordering a product that does not exist is a 404.
pub fn cannot_add_nonexistent_product(env: &mut StoryEnv) -> Outcome {
    env.act_as(Role::Waiter);
    let Some(command_id) = env.ctx.id(COMMAND_ID).map(str::to_string) else {
        return Outcome::failure("Missing command ID.");
    };

    let product_id = env.datagen.random_entity_id();
    let notes = env.datagen.order_notes(1);
    let order = env
        .datagen
        .order_form(&command_id, &[product_id], Some(notes));
    let result = env.api.add_order_to_command(&order);
    expect_rejection(
        &result,
        &product_not_found_rejection(),
        "Rejected nonexistent product.",
    )
}

/// Step 21: ordering another company's product is rejected. The remote
/// message varies here, so any error message satisfies the signature.
pub fn cannot_add_product_from_other_company(env: &mut StoryEnv) -> Outcome {
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

    let categories_result = env.api.get_product_categories();
    if !has_status(&categories_result, 200) {
        return Outcome::failure("Failed to fetch product categories.");
    }
    let categories: Vec<Value> = categories_result
        .ok()
        .and_then(|response| response.json())
        .and_then(|v| v.as_array().cloned())
        .unwrap_or_default();
    let category_id = categories
        .iter()
        .find(|c| c.get("key").and_then(Value::as_str) == Some("appetizers"))
        .or_else(|| categories.first())
        .and_then(|c| super::value_id(c));
    let Some(category_id) = category_id else {
        return Outcome::failure("Failed to fetch product categories.");
    };

    let other_product = env.datagen.product_data(&other_company_id, &category_id);
    let product_result = env.api.create_product(&other_product);
    if !has_status(&product_result, 201) {
        return Outcome::failure("Failed to create other company product.");
    }
    let Some(other_product_id) = product_result.ok().as_ref().and_then(extract_default_id) else {
        return Outcome::failure("Failed to extract other product ID.");
    };

    let order = env
        .datagen
        .order_form(&command_id, &[other_product_id], None);
    let result = env.api.add_order_to_command(&order);
    expect_rejection(
        &result,
        &RejectSignature::new(400, MessageExpectation::Present),
        "Rejected product from other company.",
    )
}

/// Step 24: an order can be fetched back by its identifier.
pub fn get_order_by_id(env: &mut StoryEnv) -> Outcome {
    env.act_as(Role::Waiter);
    let Some(command_id) = env.ctx.id(COMMAND_ID).map(str::to_string) else {
        return Outcome::failure("Missing command ID.");
    };

    let orders = orders_for_command(env, &command_id).unwrap_or_default();
    let Some(order_id) = orders.first().and_then(|o| super::value_id(o)) else {
        return Outcome::failure("No orders found for command.");
    };

    let result = env.api.get_order_by_id(&order_id);
    let fetched_id = result
        .as_ref()
        .ok()
        .filter(|response| response.status == 200)
        .and_then(|response| response.json())
        .and_then(|body| body.get("id").and_then(Value::as_str).map(str::to_string));
    if fetched_id.as_deref() == Some(order_id.as_str()) {
        Outcome::success("Order retrieved.")
    } else {
        Outcome::failure(format!("Failed to fetch order. {}", status_detail(&result)))
    }
}

/// Step 25: the waiter moves an order to `in_preparation` and verifies
/// the persisted status.
pub fn update_order_status(env: &mut StoryEnv) -> Outcome {
    env.act_as(Role::Waiter);
    let Some(command_id) = env.ctx.id(COMMAND_ID).map(str::to_string) else {
        return Outcome::failure("Missing command ID.");
    };

    let orders = orders_for_command(env, &command_id).unwrap_or_default();
    let Some(order_id) = orders.first().and_then(|o| super::value_id(o)) else {
        return Outcome::failure("No orders found for command.");
    };

    let update = env.api.update_order_status(
        &order_id,
        &serde_json::json!({ "status": "in_preparation" }),
    );
    if !has_status(&update, 200) {
        return Outcome::failure(format!(
            "Failed to update order status. {}",
            status_detail(&update)
        ));
    }

    let status_key = env
        .api
        .get_order_by_id(&order_id)
        .ok()
        .and_then(|response| response.json())
        .and_then(|body| {
            body.get("status")
                .and_then(|status| status.get("key"))
                .and_then(Value::as_str)
                .map(str::to_string)
        });
    if status_key.as_deref() == Some("in_preparation") {
        Outcome::success("Order status updated.")
    } else {
        Outcome::failure(format!("Unexpected status: {:?}", status_key))
    }
}

/// Step 27: a removed order stops resolving. Adds a marked order first so
/// there is something unambiguous to delete.
pub fn remove_order(env: &mut StoryEnv) -> Outcome {
    env.act_as(Role::Owner);
    let (Some(company_id), Some(command_id)) = (
        env.ctx.id(COMPANY_ID).map(str::to_string),
        env.ctx.id(COMMAND_ID).map(str::to_string),
    ) else {
        return Outcome::failure("Missing company or command ID.");
    };

    let reopen = update_command_status(env, &command_id, CommandStatus::Open, false);
    if !has_status(&reopen, 200) {
        return Outcome::failure("Failed to open command.");
    }

    env.act_as(Role::Waiter);
    let Some(products) = public_products(env, &company_id, Some(1)) else {
        return Outcome::failure("Could not fetch products.");
    };
    let product_ids: Vec<String> = products.iter().take(1).filter_map(super::value_id).collect();

    const MARKER: &str = "Pedido para remover";
    let order = env
        .datagen
        .order_form(&command_id, &product_ids, Some(vec![MARKER.to_string()]));
    let result = env.api.add_order_to_command(&order);
    if !has_status(&result, 201) {
        return Outcome::failure(format!("Failed to add order. {}", status_detail(&result)));
    }

    let orders = orders_for_command(env, &command_id).unwrap_or_default();
    let Some(order_id) = orders
        .iter()
        .find(|o| o.get("notes").and_then(Value::as_str) == Some(MARKER))
        .and_then(|o| super::value_id(o))
    else {
        return Outcome::failure("Could not find order to remove.");
    };

    let deletion = env.api.delete_order(&order_id);
    match &deletion {
        Err(_) => return Outcome::failure("Failed to delete order. No response."),
        Ok(response) if response.status != 204 => {
            return Outcome::failure(format!(
                "Failed to delete order. Status: {}. {}",
                response.status,
                response.message().unwrap_or_else(|| response.body.clone())
            ));
        }
        Ok(_) => {}
    }

    let lookup = env.api.get_order_by_id(&order_id);
    if has_status(&lookup, 404) {
        Outcome::success("Order removed and not found.")
    } else {
        Outcome::failure(format!("Unexpected response. {}", status_detail(&lookup)))
    }
}

/// Step 36: deleting a table with an open command and orders must not
/// break the order listing. Exercises the full create → order → delete →
/// list chain on fresh entities.
pub fn delete_table_then_list_orders(env: &mut StoryEnv) -> Outcome {
    env.act_as(Role::Owner);
    let Some(company_id) = env.ctx.id(COMPANY_ID).map(str::to_string) else {
        return Outcome::failure("Missing company ID.");
    };

    let table = env.datagen.table_data(&company_id, "Mesa Fluxo");
    let table_result = env.api.create_table(&table);
    if !has_status(&table_result, 201) {
        return Outcome::failure("Failed to create flow table.");
    }
    let Some(flow_table_id) = table_result.ok().as_ref().and_then(extract_default_id) else {
        return Outcome::failure("Failed to extract flow table ID.");
    };

    let Some(employee_id) = env.ctx.id(WAITER_EMPLOYEE_ID).map(str::to_string) else {
        return Outcome::failure("Missing waiter employee ID.");
    };

    env.act_as(Role::Waiter);
    let command = env.datagen.command_data(&flow_table_id, &employee_id);
    let command_result = env.api.create_command(&command);
    if !has_status(&command_result, 201) {
        return Outcome::failure(format!(
            "Failed to create flow command. {}",
            status_detail(&command_result)
        ));
    }
    let Some(flow_command_id) = command_result.ok().as_ref().and_then(extract_default_id) else {
        return Outcome::failure("Failed to extract flow command ID.");
    };

    let Some(products) = public_products(env, &company_id, None) else {
        return Outcome::failure("Could not fetch products for flow.");
    };
    let product_ids: Vec<String> = products.iter().take(1).filter_map(super::value_id).collect();
    let order = env.datagen.order_form(
        &flow_command_id,
        &product_ids,
        Some(vec!["Pedido de fluxo".to_string()]),
    );
    let order_result = env.api.add_order_to_command(&order);
    if !has_status(&order_result, 201) {
        return Outcome::failure(format!(
            "Failed to add flow order. {}",
            status_detail(&order_result)
        ));
    }

    env.act_as(Role::Owner);
    let deletion = env.api.delete_table(&flow_table_id);
    if !has_status(&deletion, 204) {
        return Outcome::failure(format!(
            "Failed to delete flow table. {}",
            status_detail(&deletion)
        ));
    }

    env.act_as(Role::Waiter);
    let listing = env
        .api
        .get_orders(vec![("companyId".into(), company_id.clone())]);
    if has_status(&listing, 200) {
        Outcome::success("Orders getAll returned 200.")
    } else {
        Outcome::failure(format!("Orders getAll failed. {}", status_detail(&listing)))
    }
}
