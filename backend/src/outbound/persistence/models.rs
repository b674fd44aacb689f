//! Internal Diesel row structs.
//!
//! These types stay inside the persistence layer; repositories convert them to
//! domain types before returning.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{calculations, users};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password_digest: String,
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for creating user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub username: &'a str,
    pub email: &'a str,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub password_digest: String,
    pub created_at: DateTime<Utc>,
}

/// Row struct for reading from the calculations table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = calculations)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CalculationRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub operation: String,
    pub inputs: Vec<f64>,
    pub result: f64,
    pub revision: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable struct for creating calculation records.
///
/// `revision`, `seq` and the timestamps take their column defaults.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = calculations)]
pub(crate) struct NewCalculationRow<'a> {
    pub id: Uuid,
    pub user_id: Uuid,
    pub operation: &'a str,
    pub inputs: Vec<f64>,
    pub result: f64,
}

/// Changeset for revision-guarded updates. `None` fields are left untouched.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = calculations)]
pub(crate) struct CalculationChangeset<'a> {
    pub operation: Option<&'a str>,
    pub inputs: Option<Vec<f64>>,
    pub result: Option<f64>,
    pub revision: i32,
    pub updated_at: DateTime<Utc>,
}
