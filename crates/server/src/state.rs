use std::sync::Arc;

use service::client::{ClientRepository, ClientService};

/// Shared handler state; cheap to clone.
#[derive(Clone)]
pub struct ServerState {
    pub clients: ClientService<dyn ClientRepository>,
}

impl ServerState {
    pub fn new(repo: Arc<dyn ClientRepository>) -> Self {
        Self { clients: ClientService::new(repo) }
    }
}
