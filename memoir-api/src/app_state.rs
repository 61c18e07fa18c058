use std::sync::Arc;

use crate::domain::search::RecordingSearch;

#[derive(Clone)]
pub struct AppState {
    search: Arc<dyn RecordingSearch>,
}

impl AppState {
    pub fn new(search: Arc<dyn RecordingSearch>) -> Self {
        Self { search }
    }

    pub fn search_service(&self) -> &dyn RecordingSearch {
        self.search.as_ref()
    }
}
