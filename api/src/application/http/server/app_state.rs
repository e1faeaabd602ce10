use std::sync::Arc;

use nutriscale_core::application::NutriscaleService;

use crate::args::Args;

#[derive(Clone)]
pub struct AppState {
    pub args: Arc<Args>,
    pub service: NutriscaleService,
}

impl AppState {
    pub fn new(args: Arc<Args>, service: NutriscaleService) -> Self {
        Self { args, service }
    }
}
