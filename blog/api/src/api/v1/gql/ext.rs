use std::sync::Arc;

use async_graphql::Context;

use crate::api::request_context::RequestContext;
use crate::global::GlobalState;

pub trait ContextExt {
    fn get_global(&self) -> &Arc<GlobalState>;
    fn get_req_context(&self) -> &RequestContext;
}

impl ContextExt for Context<'_> {
    fn get_global(&self) -> &Arc<GlobalState> {
        // The handler provides this on every execution, if it is missing the
        // request never went through the http layer.
        self.data_unchecked::<Arc<GlobalState>>()
    }

    fn get_req_context(&self) -> &RequestContext {
        self.data_unchecked::<RequestContext>()
    }
}
