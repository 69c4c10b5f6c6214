//! Library DTOs
//!
//! Libraries are store-only: there is no wire shape, only repository inputs.

use crate::entities::Library;
use crate::entities::schema::{FieldRule, FieldValue, LIBRARY_RULES, Record};

#[derive(Debug, Clone)]
pub struct CreateLibraryDTO {
    pub title: String,
    pub address: String,
    pub working_hours: String,
    pub owner_id: Option<i64>,
}

impl Record for CreateLibraryDTO {
    const RULES: &'static [FieldRule] = LIBRARY_RULES;

    fn values(&self) -> Vec<(&'static str, FieldValue<'_>)> {
        vec![
            ("title", FieldValue::Text(&self.title)),
            ("address", FieldValue::Text(&self.address)),
            ("working_hours", FieldValue::Text(&self.working_hours)),
        ]
    }
}

#[derive(Debug, Clone, Default)]
pub struct UpdateLibraryDTO {
    pub title: Option<String>,
    pub address: Option<String>,
    pub working_hours: Option<String>,
}

impl UpdateLibraryDTO {
    pub fn apply_to(&self, current: &Library) -> CreateLibraryDTO {
        CreateLibraryDTO {
            title: self.title.clone().unwrap_or_else(|| current.title.clone()),
            address: self.address.clone().unwrap_or_else(|| current.address.clone()),
            working_hours: self
                .working_hours
                .clone()
                .unwrap_or_else(|| current.working_hours.clone()),
            owner_id: current.owner_id,
        }
    }
}
