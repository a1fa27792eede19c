//! In-memory double of the ComandaLivre deployment: the API gateway and
//! the identity provider behind a single shared state, exposed as two
//! [`Transport`] handles.
//!
//! The double models exactly the behavior the stories depend on,
//! including the remote system's identifier inconsistencies (companies,
//! tables and commands answer with a `Location` header; products echo a
//! `publicId`; invites echo an `id`) and its rejection signatures.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use comanda_client::{ApiRequest, ApiResponse, Method, NoResponse, RequestBody, Transport};
use serde_json::{json, Value};

pub const API_BASE: &str = "http://fake-gateway/api/v1";
pub const KC_BASE: &str = "http://fake-keycloak";

// ──────────────────────────────────────────────
// State
// ──────────────────────────────────────────────

#[derive(Debug, Clone)]
struct RealmUser {
    id: String,
    username: String,
    password: String,
}

#[derive(Debug, Clone)]
struct Company {
    id: String,
    name: String,
}

#[derive(Debug, Clone)]
struct Product {
    id: String,
    company_id: String,
    category_id: String,
    name: String,
    availability: bool,
}

#[derive(Debug, Clone)]
struct TableRecord {
    id: String,
    company_id: String,
    name: String,
    num_people: u32,
    description: String,
}

#[derive(Debug, Clone)]
struct Invite {
    id: String,
    company_id: String,
    email: String,
}

#[derive(Debug, Clone)]
struct Employee {
    id: String,
    company_id: String,
    email: String,
}

#[derive(Debug, Clone)]
struct CommandRecord {
    id: String,
    company_id: String,
    table_id: String,
    status: String,
}

#[derive(Debug, Clone)]
struct OrderRecord {
    id: String,
    command_id: String,
    company_id: String,
    product_id: String,
    notes: String,
    status: String,
}

#[derive(Debug, Default)]
pub struct State {
    next_id: u64,
    next_token: u64,
    realm_users: Vec<RealmUser>,
    /// token → username
    tokens: BTreeMap<String, String>,
    companies: Vec<Company>,
    products: Vec<Product>,
    tables: Vec<TableRecord>,
    invites: Vec<Invite>,
    employees: Vec<Employee>,
    commands: Vec<CommandRecord>,
    orders: Vec<OrderRecord>,
    /// Test hook: makes company creation answer 500.
    pub reject_company_creation: bool,
}

impl State {
    fn next_id(&mut self) -> String {
        self.next_id += 1;
        format!("00000000-0000-4000-8000-{:012x}", self.next_id)
    }

    fn issue_token(&mut self, username: &str) -> String {
        self.next_token += 1;
        let token = format!("tok-{}-{}", self.next_token, username);
        self.tokens.insert(token.clone(), username.to_string());
        token
    }
}

/// Two transports over one shared state: one for the API client, one for
/// the identity-provider client.
pub fn fake_deployment() -> (Box<FakeTransport>, Box<FakeTransport>, Rc<RefCell<State>>) {
    let state = Rc::new(RefCell::new(State::default()));
    (
        Box::new(FakeTransport(state.clone())),
        Box::new(FakeTransport(state.clone())),
        state,
    )
}

pub struct FakeTransport(pub Rc<RefCell<State>>);

impl Transport for FakeTransport {
    fn send(&self, request: &ApiRequest) -> Result<ApiResponse, NoResponse> {
        let mut state = self.0.borrow_mut();
        if let Some(path) = request.url.strip_prefix(KC_BASE) {
            return Ok(route_keycloak(&mut state, request, path));
        }
        if let Some(path) = request.url.strip_prefix(API_BASE) {
            return Ok(route_api(&mut state, request, path));
        }
        Err(NoResponse {
            url: request.url.clone(),
            message: "unroutable url".into(),
        })
    }
}

// ──────────────────────────────────────────────
// Reply helpers
// ──────────────────────────────────────────────

fn reply(status: u16, body: Value) -> ApiResponse {
    ApiResponse {
        status,
        headers: BTreeMap::new(),
        body: body.to_string(),
    }
}

fn reply_text(status: u16, body: &str) -> ApiResponse {
    ApiResponse {
        status,
        headers: BTreeMap::new(),
        body: body.to_string(),
    }
}

fn rejection(status: u16, message: &str) -> ApiResponse {
    reply(status, json!({ "message": message }))
}

fn created_at(base: &str, id: &str) -> ApiResponse {
    let mut response = reply_text(201, "");
    response
        .headers
        .insert("location".into(), format!("{}/{}", base, id));
    response
}

fn page(items: Vec<Value>) -> Value {
    let total = items.len();
    json!({ "content": items, "totalElements": total })
}

fn query_value<'a>(request: &'a ApiRequest, key: &str) -> Option<&'a str> {
    request
        .query
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

fn page_size(request: &ApiRequest) -> usize {
    query_value(request, "pageSize")
        .and_then(|v| v.parse().ok())
        .unwrap_or(20)
}

fn json_body(request: &ApiRequest) -> Value {
    match &request.body {
        Some(RequestBody::Json(value)) => value.clone(),
        _ => Value::Null,
    }
}

fn form_value<'a>(request: &'a ApiRequest, key: &str) -> Option<&'a str> {
    match &request.body {
        Some(RequestBody::Form(pairs)) => pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str()),
        _ => None,
    }
}

fn field<'a>(body: &'a Value, key: &str) -> Option<&'a str> {
    body.get(key).and_then(Value::as_str)
}

// ──────────────────────────────────────────────
// Keycloak routes
// ──────────────────────────────────────────────

fn route_keycloak(state: &mut State, request: &ApiRequest, path: &str) -> ApiResponse {
    let segments: Vec<&str> = path.trim_matches('/').split('/').collect();
    match (request.method, segments.as_slice()) {
        (Method::Post, ["realms", "master", "protocol", "openid-connect", "token"]) => {
            // Admin-cli grant; accept the configured admin credentials.
            if form_value(request, "username") == Some("admin") {
                let token = state.issue_token("admin");
                reply(200, json!({ "access_token": token }))
            } else {
                rejection(401, "invalid admin credentials")
            }
        }
        (Method::Post, ["realms", _, "protocol", "openid-connect", "token"]) => {
            let username = form_value(request, "username").unwrap_or_default();
            let password = form_value(request, "password").unwrap_or_default();
            let valid = state
                .realm_users
                .iter()
                .any(|u| u.username == username && u.password == password);
            if valid {
                let token = state.issue_token(username);
                reply(200, json!({ "access_token": token }))
            } else {
                reply(401, json!({ "error": "invalid_grant" }))
            }
        }
        (Method::Post, ["admin", "realms", _, "users"]) => {
            let body = json_body(request);
            let username = field(&body, "username").unwrap_or_default().to_string();
            if state.realm_users.iter().any(|u| u.username == username) {
                return rejection(409, "User exists with same username");
            }
            let id = state.next_id();
            let password = body
                .get("credentials")
                .and_then(Value::as_array)
                .and_then(|c| c.first())
                .and_then(|c| c.get("value"))
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string();
            state.realm_users.push(RealmUser {
                id: id.clone(),
                username,
                password,
            });
            created_at(&format!("{}/admin/realms/comandalivre/users", KC_BASE), &id)
        }
        (Method::Get, ["admin", "realms", _, "users"]) => {
            let username = query_value(request, "username").unwrap_or_default();
            let users: Vec<Value> = state
                .realm_users
                .iter()
                .filter(|u| u.username == username)
                .map(|u| json!({ "id": u.id, "username": u.username }))
                .collect();
            reply(200, Value::Array(users))
        }
        _ => rejection(404, "unknown keycloak route"),
    }
}

// ──────────────────────────────────────────────
// API gateway routes
// ──────────────────────────────────────────────

fn bearer_user(state: &State, request: &ApiRequest) -> Option<String> {
    let token = request.bearer.as_deref()?;
    state.tokens.get(token).cloned()
}

fn route_api(state: &mut State, request: &ApiRequest, path: &str) -> ApiResponse {
    let segments: Vec<&str> = path.trim_matches('/').split('/').collect();

    // Public routes first; everything else requires a valid bearer.
    match (request.method, segments.as_slice()) {
        (Method::Get, ["company", "companies"]) => {
            let companies: Vec<Value> = state
                .companies
                .iter()
                .map(|c| json!({ "id": c.id, "name": c.name }))
                .collect();
            return reply(200, page(companies));
        }
        (Method::Get, ["company", "companies", company_id]) => {
            return match state.companies.iter().find(|c| c.id == *company_id) {
                Some(c) => reply(200, json!({ "id": c.id, "name": c.name })),
                None => rejection(404, "Empresa não encontrada"),
            };
        }
        (Method::Get, ["comandalivre", "product-categories", "list"]) => {
            return reply(
                200,
                json!([
                    { "id": "00000000-0000-4000-8000-0000000000c1", "key": "appetizers", "name": "Entradas" },
                    { "id": "00000000-0000-4000-8000-0000000000c2", "key": "main_courses", "name": "Pratos Principais" },
                    { "id": "00000000-0000-4000-8000-0000000000c3", "key": "desserts", "name": "Sobremesas" },
                ]),
            );
        }
        (Method::Get, ["comandalivre", "products"]) => {
            let company_id = query_value(request, "companyId").unwrap_or_default();
            let limit = page_size(request);
            let products: Vec<Value> = state
                .products
                .iter()
                .filter(|p| p.company_id == company_id)
                .take(limit)
                .map(product_json)
                .collect();
            return reply(200, page(products));
        }
        (Method::Get, ["comandalivre", "products", product_id]) => {
            return match state.products.iter().find(|p| p.id == *product_id) {
                Some(p) => reply(200, product_json(p)),
                None => rejection(404, "Produto não encontrado"),
            };
        }
        _ => {}
    }

    let Some(user) = bearer_user(state, request) else {
        return rejection(401, "Unauthorized");
    };

    match (request.method, segments.as_slice()) {
        (Method::Post, ["shared", "users", "auth"]) => reply(201, json!({ "email": user })),

        (Method::Post, ["company", "companies"]) => {
            if state.reject_company_creation {
                return rejection(500, "Erro interno");
            }
            let body = json_body(request);
            let id = state.next_id();
            state.companies.push(Company {
                id: id.clone(),
                name: field(&body, "name").unwrap_or_default().to_string(),
            });
            created_at(&format!("{}/company/companies", API_BASE), &id)
        }

        (Method::Post, ["comandalivre", "products"]) => {
            let body = json_body(request);
            let id = state.next_id();
            state.products.push(Product {
                id: id.clone(),
                company_id: field(&body, "companyId").unwrap_or_default().to_string(),
                category_id: field(&body, "categoryId").unwrap_or_default().to_string(),
                name: field(&body, "name").unwrap_or_default().to_string(),
                availability: body
                    .get("availability")
                    .and_then(Value::as_bool)
                    .unwrap_or(true),
            });
            // Products echo the created object instead of a Location.
            reply(201, json!({ "publicId": id }))
        }
        (Method::Put, ["comandalivre", "products", product_id]) => {
            let body = json_body(request);
            match state.products.iter_mut().find(|p| p.id == *product_id) {
                Some(p) => {
                    if let Some(name) = field(&body, "name") {
                        p.name = name.to_string();
                    }
                    reply(200, json!({ "publicId": p.id }))
                }
                None => rejection(404, "Produto não encontrado"),
            }
        }
        (Method::Patch, ["comandalivre", "products", product_id, "status", flag]) => {
            let available = *flag == "true";
            match state.products.iter_mut().find(|p| p.id == *product_id) {
                Some(p) => {
                    p.availability = available;
                    reply(200, json!({ "publicId": p.id }))
                }
                None => rejection(404, "Produto não encontrado"),
            }
        }
        (Method::Delete, ["comandalivre", "products", product_id]) => {
            let before = state.products.len();
            state.products.retain(|p| p.id != *product_id);
            if state.products.len() < before {
                reply_text(204, "")
            } else {
                rejection(404, "Produto não encontrado")
            }
        }

        (Method::Post, ["comandalivre", "tables"]) => {
            let body = json_body(request);
            let id = state.next_id();
            state.tables.push(TableRecord {
                id: id.clone(),
                company_id: field(&body, "companyId").unwrap_or_default().to_string(),
                name: field(&body, "name").unwrap_or_default().to_string(),
                num_people: body.get("numPeople").and_then(Value::as_u64).unwrap_or(4) as u32,
                description: field(&body, "description").unwrap_or_default().to_string(),
            });
            created_at(&format!("{}/comandalivre/tables", API_BASE), &id)
        }
        (Method::Post, ["comandalivre", "tables", "bulk"]) => {
            let body = json_body(request);
            let company_id = field(&body, "companyId").unwrap_or_default().to_string();
            let start = body.get("start").and_then(Value::as_u64).unwrap_or(0);
            let end = body.get("end").and_then(Value::as_u64).unwrap_or(0);
            let num_people = body.get("numPeople").and_then(Value::as_u64).unwrap_or(4) as u32;
            let description = field(&body, "description").unwrap_or_default().to_string();
            for n in start..=end {
                let id = state.next_id();
                state.tables.push(TableRecord {
                    id,
                    company_id: company_id.clone(),
                    name: format!("Mesa {}", n),
                    num_people,
                    description: description.clone(),
                });
            }
            reply(200, json!({ "created": end.saturating_sub(start) + 1 }))
        }
        (Method::Get, ["comandalivre", "tables"]) => {
            let company_id = query_value(request, "companyId").unwrap_or_default();
            let search = query_value(request, "search");
            let limit = page_size(request);
            let tables: Vec<Value> = state
                .tables
                .iter()
                .filter(|t| t.company_id == company_id)
                .filter(|t| search.map_or(true, |needle| t.name.contains(needle)))
                .take(limit)
                .map(table_json)
                .collect();
            reply(200, page(tables))
        }
        (Method::Get, ["comandalivre", "tables", "list"]) => {
            let company_id = query_value(request, "companyId").unwrap_or_default();
            let tables: Vec<Value> = state
                .tables
                .iter()
                .filter(|t| t.company_id == company_id)
                .map(table_json)
                .collect();
            // The list endpoint answers a bare array, not a page.
            reply(200, Value::Array(tables))
        }
        (Method::Get, ["comandalivre", "tables", table_id]) => {
            match state.tables.iter().find(|t| t.id == *table_id) {
                Some(t) => reply(200, table_json(t)),
                None => rejection(404, "Mesa não encontrada"),
            }
        }
        (Method::Put, ["comandalivre", "tables", table_id]) => {
            let body = json_body(request);
            match state.tables.iter_mut().find(|t| t.id == *table_id) {
                Some(t) => {
                    if let Some(name) = field(&body, "name") {
                        t.name = name.to_string();
                    }
                    if let Some(num) = body.get("numPeople").and_then(Value::as_u64) {
                        t.num_people = num as u32;
                    }
                    reply(200, json!({ "id": t.id }))
                }
                None => rejection(404, "Mesa não encontrada"),
            }
        }
        (Method::Delete, ["comandalivre", "tables", table_id]) => {
            let before = state.tables.len();
            state.tables.retain(|t| t.id != *table_id);
            if state.tables.len() < before {
                reply_text(204, "")
            } else {
                rejection(404, "Mesa não encontrada")
            }
        }

        (Method::Get, ["company", "role-types", "list"]) => reply(
            200,
            json!([
                { "id": "00000000-0000-4000-8000-0000000000b1", "key": "owner", "name": "Proprietário" },
                { "id": "00000000-0000-4000-8000-0000000000b2", "key": "waiter", "name": "Garçom" },
            ]),
        ),

        (Method::Post, ["company", "employees", "invites"]) => {
            let body = json_body(request);
            let company_id = field(&body, "companyId").unwrap_or_default().to_string();
            let email = field(&body, "email").unwrap_or_default().to_string();
            let already = state
                .employees
                .iter()
                .any(|e| e.company_id == company_id && e.email == email);
            if already {
                return rejection(400, "Usuário já é funcionário do restaurante");
            }
            let id = state.next_id();
            state.invites.push(Invite {
                id: id.clone(),
                company_id,
                email,
            });
            reply(201, json!({ "id": id }))
        }
        (Method::Patch, ["company", "employees", "invites", invite_id, "accept"]) => {
            let Some(invite) = state.invites.iter().find(|i| i.id == *invite_id).cloned() else {
                return rejection(404, "Convite não encontrado");
            };
            let id = state.next_id();
            state.employees.push(Employee {
                id,
                company_id: invite.company_id,
                email: invite.email,
            });
            reply(200, json!({ "id": invite_id }))
        }
        (Method::Get, ["company", "employees", "by-company", company_id]) => {
            let employees: Vec<Value> = state
                .employees
                .iter()
                .filter(|e| e.company_id == *company_id)
                .map(|e| json!({ "id": e.id, "user": { "email": e.email } }))
                .collect();
            reply(200, page(employees))
        }
        (Method::Get, ["company", "employees", "invites", "company", company_id]) => {
            let invites: Vec<Value> = state
                .invites
                .iter()
                .filter(|i| i.company_id == *company_id)
                .map(|i| json!({ "id": i.id, "user": { "email": i.email } }))
                .collect();
            reply(200, page(invites))
        }
        (Method::Get, ["company", "employees", "invites"]) => {
            let invites: Vec<Value> = state
                .invites
                .iter()
                .filter(|i| i.email == user)
                .map(|i| json!({ "id": i.id, "company": { "id": i.company_id } }))
                .collect();
            reply(200, page(invites))
        }

        (Method::Post, ["comandalivre", "commands"]) => {
            let body = json_body(request);
            let table_id = field(&body, "tableId").unwrap_or_default().to_string();
            let employee_id = field(&body, "employeeId").unwrap_or_default().to_string();
            let Some(table) = state.tables.iter().find(|t| t.id == table_id) else {
                return rejection(404, "Mesa não encontrada");
            };
            if !state.employees.iter().any(|e| e.id == employee_id) {
                return rejection(404, "Funcionário não encontrado");
            }
            let company_id = table.company_id.clone();
            let id = state.next_id();
            state.commands.push(CommandRecord {
                id: id.clone(),
                company_id,
                table_id,
                status: "open".into(),
            });
            created_at(&format!("{}/comandalivre/commands", API_BASE), &id)
        }
        (Method::Get, ["comandalivre", "commands", "count"]) => {
            // Observed gateway gap: the count route rejects tenant tokens.
            rejection(401, "Unauthorized")
        }
        (Method::Get, ["comandalivre", "commands", command_id]) => {
            match state.commands.iter().find(|c| c.id == *command_id) {
                Some(c) => reply(200, command_json(c)),
                None => rejection(404, "Comanda não encontrada"),
            }
        }
        (Method::Patch, ["comandalivre", "commands", command_id, "status"]) => {
            let body = json_body(request);
            let target = field(&body, "status").unwrap_or_default().to_lowercase();
            let close_all = body
                .get("closeAll")
                .and_then(Value::as_bool)
                .unwrap_or(false);
            let Some(index) = state.commands.iter().position(|c| c.id == *command_id) else {
                return rejection(404, "Comanda não encontrada");
            };
            let current = state.commands[index].status.clone();
            if current == target {
                return rejection(
                    400,
                    &format!(
                        "Transição de status de '{}' para '{}' não é permitida.",
                        current, target
                    ),
                );
            }
            let legal = matches!(
                (current.as_str(), target.as_str()),
                ("open", "paying") | ("paying", "closed") | ("closed", "open")
            );
            if !legal {
                return rejection(
                    400,
                    &format!(
                        "Transição de status de '{}' para '{}' não é permitida.",
                        current, target
                    ),
                );
            }
            state.commands[index].status = target.clone();
            if close_all && target == "closed" {
                for order in &mut state.orders {
                    if order.command_id == *command_id {
                        order.status = "closed".into();
                    }
                }
            }
            reply(200, command_json(&state.commands[index]))
        }
        (Method::Patch, ["comandalivre", "commands", command_id, "change-table"]) => {
            let body = json_body(request);
            let new_table_id = field(&body, "newTableId").unwrap_or_default().to_string();
            let Some(index) = state.commands.iter().position(|c| c.id == *command_id) else {
                return rejection(404, "Comanda não encontrada");
            };
            if state.commands[index].status != "open" {
                return rejection(400, "A comanda deve estar aberta para ter sua mesa alterada.");
            }
            let Some(table) = state.tables.iter().find(|t| t.id == new_table_id) else {
                return rejection(404, "Mesa não encontrada");
            };
            if table.company_id != state.commands[index].company_id {
                return rejection(
                    400,
                    "A comanda e a mesa de destino devem pertencer à mesma empresa.",
                );
            }
            if state.commands[index].table_id == new_table_id {
                return rejection(400, "A comanda já está na mesa de destino.");
            }
            state.commands[index].table_id = new_table_id;
            reply(200, command_json(&state.commands[index]))
        }
        (Method::Get, ["comandalivre", "commands", command_id, "bill-data"]) => {
            let Some(command) = state.commands.iter().find(|c| c.id == *command_id) else {
                return rejection(404, "Comanda não encontrada");
            };
            let company = state
                .companies
                .iter()
                .find(|c| c.id == command.company_id)
                .map(|c| json!({ "id": c.id, "name": c.name }))
                .unwrap_or(Value::Null);
            let items: Vec<Value> = state
                .orders
                .iter()
                .filter(|o| o.command_id == *command_id)
                .map(order_json)
                .collect();
            reply(
                200,
                json!({ "command": command_json(command), "company": company, "items": items }),
            )
        }

        (Method::Post, ["comandalivre", "orders"]) => {
            let body = json_body(request);
            let command_id = field(&body, "commandId").unwrap_or_default().to_string();
            let Some(command) = state.commands.iter().find(|c| c.id == command_id).cloned() else {
                return rejection(404, "Comanda não encontrada");
            };
            if command.status == "closed" {
                return rejection(
                    400,
                    "Não é possível adicionar um pedido para um comando fechado",
                );
            }
            let items = body
                .get("items")
                .and_then(Value::as_array)
                .cloned()
                .unwrap_or_default();
            let mut pending = Vec::new();
            for item in &items {
                let product_id = field(item, "productId").unwrap_or_default().to_string();
                let Some(product) = state.products.iter().find(|p| p.id == product_id) else {
                    return rejection(404, "Produto não encontrado");
                };
                if product.company_id != command.company_id {
                    return rejection(400, "Produto não pertence à empresa da comanda");
                }
                pending.push((
                    product_id,
                    field(item, "notes").unwrap_or_default().to_string(),
                ));
            }
            for (product_id, notes) in pending {
                let id = state.next_id();
                state.orders.push(OrderRecord {
                    id,
                    command_id: command_id.clone(),
                    company_id: command.company_id.clone(),
                    product_id,
                    notes,
                    status: "pending".into(),
                });
            }
            reply_text(201, "")
        }
        (Method::Get, ["comandalivre", "orders", "is-command-fully-closed"]) => {
            let command_id = query_value(request, "commandId").unwrap_or_default();
            let fully_closed = state
                .orders
                .iter()
                .filter(|o| o.command_id == command_id)
                .all(|o| o.status == "closed");
            // Bare boolean body, not a JSON envelope.
            reply_text(200, if fully_closed { "true" } else { "false" })
        }
        (Method::Get, ["comandalivre", "orders"]) => {
            let command_id = query_value(request, "commandId");
            let company_id = query_value(request, "companyId");
            let orders: Vec<Value> = state
                .orders
                .iter()
                .filter(|o| command_id.map_or(true, |id| o.command_id == id))
                .filter(|o| company_id.map_or(true, |id| o.company_id == id))
                .map(order_json)
                .collect();
            reply(200, page(orders))
        }
        (Method::Get, ["comandalivre", "orders", order_id]) => {
            match state.orders.iter().find(|o| o.id == *order_id) {
                Some(o) => reply(200, order_json(o)),
                None => rejection(404, "Pedido não encontrado"),
            }
        }
        (Method::Patch, ["comandalivre", "orders", order_id, "status"]) => {
            let body = json_body(request);
            let target = field(&body, "status").unwrap_or_default().to_string();
            match state.orders.iter_mut().find(|o| o.id == *order_id) {
                Some(o) => {
                    o.status = target;
                    reply(200, json!({ "id": o.id }))
                }
                None => rejection(404, "Pedido não encontrado"),
            }
        }
        (Method::Delete, ["comandalivre", "orders", order_id]) => {
            let before = state.orders.len();
            state.orders.retain(|o| o.id != *order_id);
            if state.orders.len() < before {
                reply_text(204, "")
            } else {
                rejection(404, "Pedido não encontrado")
            }
        }

        _ => rejection(404, "unknown route"),
    }
}

fn product_json(product: &Product) -> Value {
    json!({
        "id": product.id,
        "name": product.name,
        "availability": product.availability,
        "category": { "id": product.category_id },
    })
}

fn table_json(table: &TableRecord) -> Value {
    json!({
        "id": table.id,
        "name": table.name,
        "numPeople": table.num_people,
        "description": table.description,
    })
}

fn command_json(command: &CommandRecord) -> Value {
    json!({
        "id": command.id,
        "status": { "key": command.status },
        "table": { "id": command.table_id },
    })
}

fn order_json(order: &OrderRecord) -> Value {
    json!({
        "id": order.id,
        "notes": order.notes,
        "status": { "key": order.status },
        "product": { "id": order.product_id },
    })
}
