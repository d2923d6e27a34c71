use crate::resolver::ProviderQueryResolver;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub resolver: Arc<ProviderQueryResolver>,
}
