use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One concrete occurrence of a [`YogaClass`](super::YogaClass).
///
/// `yoga_class_id` is a soft reference: it is stored as given and never
/// checked against the classes table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ClassInstance {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yoga_class_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub teacher: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
}
