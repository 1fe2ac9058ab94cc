use std::sync::Arc;

use tokio::sync::RwLock;

use super::auth::AuthData;

/// Mutable per-request state shared between the http middleware and the gql
/// resolvers. Login mutations write back into it so the rest of the request
/// sees the new identity.
#[derive(Default, Clone)]
pub struct RequestContext(Arc<RwLock<ContextData>>);

#[derive(Default)]
struct ContextData {
    auth: Option<AuthData>,
}

impl RequestContext {
    pub async fn set_auth(&self, data: AuthData) {
        let mut guard = self.0.write().await;
        guard.auth = Some(data);
    }

    pub async fn reset_auth(&self) {
        let mut guard = self.0.write().await;
        guard.auth = None;
    }

    pub async fn auth(&self) -> Option<AuthData> {
        let guard = self.0.read().await;
        guard.auth.clone()
    }
}
