//! Wire payload types for the ComandaLivre API.
//!
//! Field names follow the API's camelCase contract; prices travel as
//! decimal strings.

use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRegistration {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    pub password_confirmation: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyCreate {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub cnpj: String,
    pub description: String,
    #[serde(rename = "type")]
    pub company_type: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductCreate {
    pub name: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub price: Decimal,
    pub description: String,
    pub ingredients: Vec<String>,
    pub serves_persons: u32,
    pub company_id: String,
    pub category_id: String,
    pub availability: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductUpdate {
    pub name: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub price: Decimal,
    pub description: String,
    pub company_id: String,
    pub category_id: String,
    pub availability: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableCreate {
    pub name: String,
    pub num_people: u32,
    pub description: String,
    pub company_id: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableUpdate {
    pub name: String,
    pub num_people: u32,
    pub description: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableBulkCreate {
    pub company_id: String,
    pub start: u32,
    pub end: u32,
    pub num_people: u32,
    pub description: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeInvite {
    pub company_id: String,
    pub role_id: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandCreate {
    pub name: String,
    pub number_of_people: u32,
    pub table_id: String,
    pub employee_id: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub product_id: String,
    pub notes: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderForm {
    pub command_id: String,
    pub items: Vec<OrderItem>,
}
