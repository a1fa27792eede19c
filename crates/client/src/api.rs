//! Per-endpoint wrappers over the transport.
//!
//! One thin method per route the stories consume, mirroring the gateway's
//! path layout (`company/…`, `comandalivre/…`, `shared/…`). The client
//! holds the current bearer token; [`set_token`](ApiClient::set_token)
//! switches the acting identity for all subsequent calls.

use serde::Serialize;
use serde_json::Value;

use crate::response::ApiResponse;
use crate::transport::{ApiRequest, Method, NoResponse, Transport};

/// Result of one API call: a structured response (any status) or the
/// transport's "no response" failure.
pub type ApiResult = Result<ApiResponse, NoResponse>;

/// Query pairs for paginated/filtered listings.
pub type Query = Vec<(String, String)>;

pub struct ApiClient {
    base_url: String,
    token: Option<String>,
    transport: Box<dyn Transport>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, transport: Box<dyn Transport>) -> Self {
        ApiClient {
            base_url: base_url.into(),
            token: None,
            transport,
        }
    }

    /// Install the bearer token attached to subsequent calls. `None`
    /// makes the client unauthenticated.
    pub fn set_token(&mut self, token: Option<String>) {
        if token.is_none() {
            tracing::warn!("clearing auth token; subsequent requests are unauthenticated");
        }
        self.token = token;
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }

    fn request(&self, method: Method, path: &str) -> ApiRequest {
        ApiRequest::new(method, self.url(path)).bearer(self.token.as_deref())
    }

    fn get(&self, path: &str, query: Query) -> ApiResult {
        let mut request = self.request(Method::Get, path);
        request.query = query;
        self.transport.send(&request)
    }

    fn post<T: Serialize>(&self, path: &str, body: &T) -> ApiResult {
        let request = self.request(Method::Post, path).json(to_value(body));
        self.transport.send(&request)
    }

    fn put<T: Serialize>(&self, path: &str, body: &T) -> ApiResult {
        let request = self.request(Method::Put, path).json(to_value(body));
        self.transport.send(&request)
    }

    fn patch<T: Serialize>(&self, path: &str, body: &T) -> ApiResult {
        let request = self.request(Method::Patch, path).json(to_value(body));
        self.transport.send(&request)
    }

    fn delete(&self, path: &str) -> ApiResult {
        self.transport.send(&self.request(Method::Delete, path))
    }

    // ──────────────────────────────────────────────
    // Users
    // ──────────────────────────────────────────────

    /// Create or load the authenticated user's profile.
    pub fn auth(&self) -> ApiResult {
        self.post("shared/users/auth", &serde_json::json!({}))
    }

    // ──────────────────────────────────────────────
    // Companies
    // ──────────────────────────────────────────────

    pub fn get_public_companies(&self, query: Query) -> ApiResult {
        self.get("company/companies", query)
    }

    pub fn get_public_company_by_id(&self, company_id: &str) -> ApiResult {
        self.get(&format!("company/companies/{}", company_id), Vec::new())
    }

    pub fn create_company<T: Serialize>(&self, company: &T) -> ApiResult {
        self.post("company/companies", company)
    }

    // ──────────────────────────────────────────────
    // Products
    // ──────────────────────────────────────────────

    pub fn get_product_categories(&self) -> ApiResult {
        self.get("comandalivre/product-categories/list", Vec::new())
    }

    pub fn get_public_products(&self, company_id: &str, mut query: Query) -> ApiResult {
        query.push(("companyId".into(), company_id.into()));
        self.get("comandalivre/products", query)
    }

    pub fn get_public_product_by_id(&self, product_id: &str) -> ApiResult {
        self.get(&format!("comandalivre/products/{}", product_id), Vec::new())
    }

    pub fn create_product<T: Serialize>(&self, product: &T) -> ApiResult {
        self.post("comandalivre/products", product)
    }

    pub fn update_product<T: Serialize>(&self, product_id: &str, product: &T) -> ApiResult {
        self.put(&format!("comandalivre/products/{}", product_id), product)
    }

    pub fn update_product_status(&self, product_id: &str, available: bool) -> ApiResult {
        self.patch(
            &format!("comandalivre/products/{}/status/{}", product_id, available),
            &serde_json::json!({}),
        )
    }

    pub fn delete_product(&self, product_id: &str) -> ApiResult {
        self.delete(&format!("comandalivre/products/{}", product_id))
    }

    // ──────────────────────────────────────────────
    // Tables
    // ──────────────────────────────────────────────

    pub fn create_table<T: Serialize>(&self, table: &T) -> ApiResult {
        self.post("comandalivre/tables", table)
    }

    pub fn create_tables_bulk<T: Serialize>(&self, bulk: &T) -> ApiResult {
        self.post("comandalivre/tables/bulk", bulk)
    }

    pub fn get_tables(&self, query: Query) -> ApiResult {
        self.get("comandalivre/tables", query)
    }

    pub fn get_tables_list(&self, query: Query) -> ApiResult {
        self.get("comandalivre/tables/list", query)
    }

    pub fn get_table_by_id(&self, table_id: &str) -> ApiResult {
        self.get(&format!("comandalivre/tables/{}", table_id), Vec::new())
    }

    pub fn update_table<T: Serialize>(&self, table_id: &str, table: &T) -> ApiResult {
        self.put(&format!("comandalivre/tables/{}", table_id), table)
    }

    pub fn delete_table(&self, table_id: &str) -> ApiResult {
        self.delete(&format!("comandalivre/tables/{}", table_id))
    }

    // ──────────────────────────────────────────────
    // Employees & invites
    // ──────────────────────────────────────────────

    pub fn get_role_types_list(&self) -> ApiResult {
        self.get("company/role-types/list", Vec::new())
    }

    pub fn invite_employee<T: Serialize>(&self, invite: &T) -> ApiResult {
        self.post("company/employees/invites", invite)
    }

    pub fn accept_employee_invite(&self, invite_id: &str) -> ApiResult {
        self.patch(
            &format!("company/employees/invites/{}/accept", invite_id),
            &serde_json::json!({}),
        )
    }

    pub fn get_employees_for_company(&self, company_id: &str) -> ApiResult {
        self.get(
            &format!("company/employees/by-company/{}", company_id),
            Vec::new(),
        )
    }

    pub fn get_employee_invites_by_company(&self, company_id: &str, query: Query) -> ApiResult {
        self.get(
            &format!("company/employees/invites/company/{}", company_id),
            query,
        )
    }

    pub fn get_my_employee_invites(&self, query: Query) -> ApiResult {
        self.get("company/employees/invites/", query)
    }

    // ──────────────────────────────────────────────
    // Commands
    // ──────────────────────────────────────────────

    pub fn create_command<T: Serialize>(&self, command: &T) -> ApiResult {
        self.post("comandalivre/commands", command)
    }

    pub fn get_command_by_id(&self, command_id: &str) -> ApiResult {
        self.get(&format!("comandalivre/commands/{}", command_id), Vec::new())
    }

    pub fn update_command_status(&self, command_id: &str, status: &Value) -> ApiResult {
        self.patch(&format!("comandalivre/commands/{}/status", command_id), status)
    }

    pub fn change_command_table(&self, command_id: &str, change: &Value) -> ApiResult {
        self.patch(
            &format!("comandalivre/commands/{}/change-table", command_id),
            change,
        )
    }

    pub fn get_commands_count(&self) -> ApiResult {
        self.get("comandalivre/commands/count", Vec::new())
    }

    pub fn get_command_bill_data(&self, command_id: &str) -> ApiResult {
        self.get(
            &format!("comandalivre/commands/{}/bill-data", command_id),
            Vec::new(),
        )
    }

    // ──────────────────────────────────────────────
    // Orders
    // ──────────────────────────────────────────────

    pub fn add_order_to_command<T: Serialize>(&self, order: &T) -> ApiResult {
        self.post("comandalivre/orders", order)
    }

    pub fn get_orders(&self, query: Query) -> ApiResult {
        self.get("comandalivre/orders", query)
    }

    pub fn get_order_by_id(&self, order_id: &str) -> ApiResult {
        self.get(&format!("comandalivre/orders/{}", order_id), Vec::new())
    }

    pub fn update_order_status(&self, order_id: &str, status: &Value) -> ApiResult {
        self.patch(&format!("comandalivre/orders/{}/status", order_id), status)
    }

    pub fn delete_order(&self, order_id: &str) -> ApiResult {
        self.delete(&format!("comandalivre/orders/{}", order_id))
    }

    pub fn is_command_fully_closed(&self, command_id: &str) -> ApiResult {
        self.get(
            "comandalivre/orders/is-command-fully-closed",
            vec![("commandId".into(), command_id.into())],
        )
    }
}

fn to_value<T: Serialize>(body: &T) -> Value {
    // Payload types are plain data; serialization cannot fail for them.
    serde_json::to_value(body).unwrap_or(Value::Null)
}
