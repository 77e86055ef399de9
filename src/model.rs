//! Student record as stored and as exchanged over HTTP.

use serde::{Deserialize, Serialize};

/// A student row. `id` is assigned by the store on insert; a client-supplied id
/// is ignored on create and checked against the path on update.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub registration_number: Option<i32>,
}

impl Student {
    pub fn new(name: impl Into<String>, registration_number: i32) -> Self {
        Student {
            id: None,
            name: Some(name.into()),
            registration_number: Some(registration_number),
        }
    }

    /// Same record with the given id.
    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }
}
