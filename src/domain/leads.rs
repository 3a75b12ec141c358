//! Lead requests received through the public forms

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::forms::FormKind;

/// Response DTO for an accepted form submission
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadReceipt {
    pub id: Uuid,
    pub kind: FormKind,
    pub received_at: DateTime<Utc>,
}
