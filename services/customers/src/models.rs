//! Customer model and related payloads

use serde::{Deserialize, Serialize};

/// Customer entity, decoded from a `clientes` row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    pub id: i64,
    pub name: String,
    pub email: String,
}

/// New customer creation payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCustomer {
    pub name: String,
    pub email: String,
}

/// Form body posted to the save route
#[derive(Debug, Deserialize)]
pub struct CustomerForm {
    pub name: String,
    pub email: String,
}
