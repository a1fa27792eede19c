//! Product maintenance steps: update, availability toggle, deletion.

use serde_json::Value;

use crate::actors::Role;
use crate::context::{COMPANY_ID, PRODUCT_CATEGORY_ID};
use crate::env::StoryEnv;
use crate::extract::extract_default_id;
use crate::outcome::Outcome;
use crate::steps::{has_status, public_products, status_detail};

/// Step 28: the owner updates a product and verifies the new name stuck.
pub fn update_product(env: &mut StoryEnv) -> Outcome {
    env.act_as(Role::Owner);
    let Some(company_id) = env.ctx.id(COMPANY_ID).map(str::to_string) else {
        return Outcome::failure("Missing company ID.");
    };

    let Some(products) = public_products(env, &company_id, Some(1)) else {
        return Outcome::failure("Could not fetch products.");
    };
    let product = &products[0];
    let Some(product_id) = super::value_id(product) else {
        return Outcome::failure("Could not fetch products.");
    };
    let category_id = product
        .get("category")
        .and_then(|category| category.get("id"))
        .and_then(Value::as_str)
        .map(str::to_string)
        .or_else(|| env.ctx.id(PRODUCT_CATEGORY_ID).map(str::to_string))
        .unwrap_or_default();

    let update = env.datagen.product_update_data(&company_id, &category_id);
    let update_result = env.api.update_product(&product_id, &update);
    if !has_status(&update_result, 200) {
        return Outcome::failure(format!(
            "Failed to update product. {}",
            status_detail(&update_result)
        ));
    }

    let lookup = env.api.get_public_product_by_id(&product_id);
    let name_after = lookup
        .as_ref()
        .ok()
        .filter(|response| response.status == 200)
        .and_then(|response| response.json())
        .and_then(|body| body.get("name").and_then(Value::as_str).map(str::to_string));
    if name_after.as_deref() == Some(update.name.as_str()) {
        Outcome::success("Product updated.")
    } else {
        Outcome::failure(format!(
            "Failed to verify product update. {}",
            status_detail(&lookup)
        ))
    }
}

/// Step 29: availability toggles and the toggle persists.
pub fn update_product_availability(env: &mut StoryEnv) -> Outcome {
    env.act_as(Role::Owner);
    let Some(company_id) = env.ctx.id(COMPANY_ID).map(str::to_string) else {
        return Outcome::failure("Missing company ID.");
    };

    let Some(products) = public_products(env, &company_id, Some(1)) else {
        return Outcome::failure("Could not fetch products.");
    };
    let product = &products[0];
    let Some(product_id) = super::value_id(product) else {
        return Outcome::failure("Could not fetch products.");
    };
    let current = product
        .get("availability")
        .and_then(Value::as_bool)
        .unwrap_or(false);
    let target = !current;

    let update_result = env.api.update_product_status(&product_id, target);
    if !has_status(&update_result, 200) {
        return Outcome::failure(format!(
            "Failed to update availability. {}",
            status_detail(&update_result)
        ));
    }

    let lookup = env.api.get_public_product_by_id(&product_id);
    let availability_after = lookup
        .as_ref()
        .ok()
        .filter(|response| response.status == 200)
        .and_then(|response| response.json())
        .and_then(|body| body.get("availability").and_then(Value::as_bool));
    if availability_after == Some(target) {
        Outcome::success("Availability updated.")
    } else {
        Outcome::failure(format!(
            "Failed to verify availability. {}",
            status_detail(&lookup)
        ))
    }
}

/// Step 30: a deleted product stops resolving. Creates a throwaway
/// product first so the catalog seeded for orders stays intact.
pub fn delete_product(env: &mut StoryEnv) -> Outcome {
    env.act_as(Role::Owner);
    let (Some(company_id), Some(category_id)) = (
        env.ctx.id(COMPANY_ID).map(str::to_string),
        env.ctx.id(PRODUCT_CATEGORY_ID).map(str::to_string),
    ) else {
        return Outcome::failure("Missing company or category ID.");
    };

    let product = env.datagen.product_data(&company_id, &category_id);
    let create_result = env.api.create_product(&product);
    if !has_status(&create_result, 201) {
        return Outcome::failure("Failed to create product for deletion.");
    }
    let Some(product_id) = create_result.ok().as_ref().and_then(extract_default_id) else {
        return Outcome::failure("Failed to extract product ID.");
    };

    let deletion = env.api.delete_product(&product_id);
    if !has_status(&deletion, 204) {
        return Outcome::failure(format!(
            "Failed to delete product. {}",
            status_detail(&deletion)
        ));
    }

    let lookup = env.api.get_public_product_by_id(&product_id);
    if has_status(&lookup, 404) {
        Outcome::success("Product deleted and not found.")
    } else {
        Outcome::failure(format!("Unexpected response. {}", status_detail(&lookup)))
    }
}
