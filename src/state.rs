use crate::vision::VisionModel;

/// Application state shared across HTTP handlers
pub struct AppState {
    /// Vision backend, built once at startup
    pub vision: Box<dyn VisionModel>,
}

impl AppState {
    pub fn new(vision: impl VisionModel + 'static) -> Self {
        Self {
            vision: Box::new(vision),
        }
    }
}
