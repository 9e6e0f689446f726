//! Request/query types (Deserialize)

use serde::Deserialize;

/// Window sizes arrive as text so a non-numeric value becomes a field issue
/// instead of an opaque query rejection.
#[derive(Debug, Deserialize)]
pub struct PivotQuery {
    pub days: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct HistogramQuery {
    pub hours: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct StatusQuery {
    pub date: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateMedicineRequest {
    pub habit_name: String,
    pub dose: f64,
}

#[derive(Debug, Deserialize)]
pub struct UpdateMedicineRequest {
    pub id: i64,
    pub name: String,
    pub dose: f64,
    pub created_at: String,
}

/// Body of both delete routes.
#[derive(Debug, Deserialize)]
pub struct DeleteRequest {
    pub id: i64,
}

#[derive(Debug, Deserialize)]
pub struct CreateEntryRequest {
    pub text: String,
    #[serde(default)]
    pub completed: bool,
}

#[derive(Debug, Deserialize)]
pub struct UpdateEntryRequest {
    pub id: i64,
    pub text: String,
    pub completed: bool,
    #[serde(default)]
    pub completed_at: Option<String>,
}
