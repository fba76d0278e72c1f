use std::sync::Arc;

use crate::config::Config;
use crate::db::{ProductStore, UserStore};
use crate::lifecycle::{ProductLifecycle, Registration};

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub config: Config,
    pub products: Arc<dyn ProductStore>,
    pub users: Arc<dyn UserStore>,
    pub catalog: ProductLifecycle,
    pub registration: Registration,
}
