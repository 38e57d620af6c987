use std::sync::Arc;

use crate::application::services::{AuthService, LinkService, RedirectService};
use crate::domain::stores::LinkStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn LinkStore>,
    pub link_service: Arc<LinkService>,
    pub redirect_service: Arc<RedirectService>,
    pub auth_service: Arc<AuthService>,
}
