//! User record types
//!
//! Defines the stored record and the partial payload accepted by create/update.
//! Field values are kept as arbitrary JSON; only well-formedness is checked.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single user record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct User {
    pub id: u64,
    /// Absent names are stored as-is and omitted from JSON output
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<Value>,
}

impl User {
    pub fn new(id: u64, name: &str, email: &str) -> Self {
        Self {
            id,
            name: Some(Value::from(name)),
            email: Some(Value::from(email)),
        }
    }

    /// Apply a partial update.
    ///
    /// A field is replaced only when the payload value is truthy; `null`,
    /// `false`, `0` and `""` leave the old value in place.
    pub fn apply(&mut self, payload: UserPayload) {
        if let Some(name) = payload.name.filter(is_truthy) {
            self.name = Some(name);
        }
        if let Some(email) = payload.email.filter(is_truthy) {
            self.email = Some(email);
        }
    }
}

/// Loose truthiness: everything except null, false, zero and the empty string
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Request body for create and update
///
/// Any JSON value except `null` is accepted. Objects contribute their `name`
/// and `email` keys as-is; arrays, strings, numbers and booleans carry no
/// fields.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(try_from = "Value")]
pub struct UserPayload {
    pub name: Option<Value>,
    pub email: Option<Value>,
}

impl TryFrom<Value> for UserPayload {
    type Error = &'static str;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Null => Err("request body is null"),
            Value::Object(mut fields) => Ok(Self {
                name: fields.remove("name"),
                email: fields.remove("email"),
            }),
            _ => Ok(Self::default()),
        }
    }
}

/// Records present when the process starts
pub fn seed_users() -> Vec<User> {
    vec![
        User::new(1, "Nagendra", "nagendra@yopmail.com"),
        User::new(2, "Babu", "babu@yopmail.com"),
    ]
}
