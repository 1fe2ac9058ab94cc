use std::sync::{Arc, Weak};

use hyper::StatusCode;
use routerify::ext::RequestExt as _;

use super::error::{ApiError, Result};
use crate::global::GlobalState;

pub trait RequestExt {
    fn get_global(&self) -> Result<Arc<GlobalState>>;
}

impl RequestExt for hyper::Request<hyper::Body> {
    fn get_global(&self) -> Result<Arc<GlobalState>> {
        match self.data::<Weak<GlobalState>>().and_then(|g| g.upgrade()) {
            Some(global) => Ok(global),
            None => Err(Box::new(ApiError::Http(
                StatusCode::INTERNAL_SERVER_ERROR,
                "failed to get global state",
            ))),
        }
    }
}
