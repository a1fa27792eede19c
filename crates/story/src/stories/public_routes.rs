//! Public-routes story: walks the unauthenticated endpoints, chaining
//! identifiers between them. A step with nothing to chain from reports
//! `Skipped` rather than failing the run.

use serde_json::Value;

use crate::context::{PUBLIC_COMPANY_ID, PUBLIC_PRODUCT_ID};
use crate::env::StoryEnv;
use crate::outcome::Outcome;
use crate::runner::Step;
use crate::steps::status_detail;

pub const STEPS: &[Step] = &[
    Step {
        description: "GET /company/companies",
        reads: &[],
        writes: &[PUBLIC_COMPANY_ID],
        run: fetch_companies,
    },
    Step {
        description: "GET /company/companies/{id}",
        reads: &[PUBLIC_COMPANY_ID],
        writes: &[],
        run: fetch_company_by_id,
    },
    Step {
        description: "GET /comandalivre/products?companyId={id}",
        reads: &[PUBLIC_COMPANY_ID],
        writes: &[PUBLIC_PRODUCT_ID],
        run: fetch_products_for_company,
    },
    Step {
        description: "GET /comandalivre/products/{id}",
        reads: &[PUBLIC_PRODUCT_ID],
        writes: &[],
        run: fetch_product_by_id,
    },
];

fn fetch_companies(env: &mut StoryEnv) -> Outcome {
    let result = env.api.get_public_companies(vec![
        ("page".into(), "0".into()),
        ("size".into(), "1".into()),
    ]);
    match &result {
        Ok(response) if response.status == 200 => match response.json() {
            Some(body) => {
                let first_id = body
                    .get("content")
                    .and_then(Value::as_array)
                    .and_then(|content| content.first().cloned())
                    .and_then(|company| {
                        company.get("id").and_then(Value::as_str).map(str::to_string)
                    });
                match first_id {
                    Some(company_id) => {
                        env.ctx.set_id(PUBLIC_COMPANY_ID, company_id);
                        Outcome::success("Found a public company.")
                    }
                    None => Outcome::skipped("Companies listing returned no content."),
                }
            }
            None => Outcome::failure("Failed to parse JSON from companies listing."),
        },
        Ok(response) if response.status == 404 => {
            Outcome::skipped("Companies listing returned 404.")
        }
        _ => Outcome::failure(status_detail(&result)),
    }
}

fn fetch_company_by_id(env: &mut StoryEnv) -> Outcome {
    let Some(company_id) = env.ctx.id(PUBLIC_COMPANY_ID).map(str::to_string) else {
        return Outcome::skipped("No company ID available.");
    };
    let result = env.api.get_public_company_by_id(&company_id);
    if matches!(&result, Ok(response) if response.status == 200) {
        Outcome::success("Company retrieved.")
    } else {
        Outcome::failure(status_detail(&result))
    }
}

fn fetch_products_for_company(env: &mut StoryEnv) -> Outcome {
    let Some(company_id) = env.ctx.id(PUBLIC_COMPANY_ID).map(str::to_string) else {
        return Outcome::skipped("No company ID available.");
    };
    let result = env.api.get_public_products(&company_id, Vec::new());
    match &result {
        Ok(response) if response.status == 200 => match response.json() {
            Some(_) => {
                let first_id = response
                    .page_content()
                    .first()
                    .and_then(|product| {
                        product.get("id").and_then(Value::as_str).map(str::to_string)
                    });
                match first_id {
                    Some(product_id) => {
                        env.ctx.set_id(PUBLIC_PRODUCT_ID, product_id);
                        Outcome::success("Found a public product.")
                    }
                    None => Outcome::skipped("Products listing returned no content."),
                }
            }
            None => Outcome::failure("Failed to parse JSON from products listing."),
        },
        Ok(response) if response.status == 404 => {
            Outcome::skipped("Products listing returned 404.")
        }
        _ => Outcome::failure(status_detail(&result)),
    }
}

fn fetch_product_by_id(env: &mut StoryEnv) -> Outcome {
    let Some(product_id) = env.ctx.id(PUBLIC_PRODUCT_ID).map(str::to_string) else {
        return Outcome::skipped("No product ID available.");
    };
    let result = env.api.get_public_product_by_id(&product_id);
    if matches!(&result, Ok(response) if response.status == 200) {
        Outcome::success("Product retrieved.")
    } else {
        Outcome::failure(status_detail(&result))
    }
}
