use std::sync::Arc;

use crate::settings::Settings;
use crate::store::RecordStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RecordStore>,
    pub settings: Settings,
}
