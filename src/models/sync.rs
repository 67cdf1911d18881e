use serde::Deserialize;

use super::{ClassInstance, YogaClass};

/// Full replacement dataset sent by the client.
///
/// Both collections are optional at the decoding level so that a missing
/// array is reported as a validation error rather than a decoder error.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncPayload {
    #[serde(default)]
    pub yoga_classes: Option<Vec<YogaClass>>,
    #[serde(default)]
    pub class_instances: Option<Vec<ClassInstance>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRequest {
    #[serde(default)]
    pub class_ids: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncStats {
    pub yoga_classes: usize,
    pub class_instances: usize,
    pub orphaned_instances: usize,
}
