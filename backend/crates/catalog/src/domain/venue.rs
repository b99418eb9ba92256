//! Locations and the tables customers scan in at

use chrono::{DateTime, Utc};
use kernel::id::{LocationId, TableId};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Location {
    pub id: LocationId,
    pub name: String,
    pub address: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Table {
    pub id: TableId,
    pub location_id: LocationId,
    /// Printed on the table's QR code; globally unique
    pub code: String,
    pub label: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl Table {
    pub fn new(location_id: LocationId, code: String, label: String) -> Self {
        Self {
            id: TableId::new(),
            location_id,
            code,
            label,
            is_active: true,
            created_at: Utc::now(),
        }
    }
}

/// An active table joined with its location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSite {
    pub table_id: TableId,
    pub code: String,
    pub label: String,
    pub location_id: LocationId,
    pub location_name: String,
}

/// Partial edit; `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TablePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl TablePatch {
    pub fn apply(&self, table: &mut Table) {
        if let Some(code) = &self.code {
            table.code = code.clone();
        }
        if let Some(label) = &self.label {
            table.label = label.clone();
        }
        if let Some(is_active) = self.is_active {
            table.is_active = is_active;
        }
    }
}
