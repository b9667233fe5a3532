use std::sync::Arc;

use caltrax_core::application::CaltraxService;

use crate::{application::auth::JwtVerifier, args::Args};

#[derive(Clone)]
pub struct AppState {
    pub args: Arc<Args>,
    pub service: CaltraxService,
    pub verifier: Arc<JwtVerifier>,
}

impl AppState {
    pub fn new(args: Arc<Args>, service: CaltraxService, verifier: JwtVerifier) -> Self {
        Self {
            args,
            service,
            verifier: Arc::new(verifier),
        }
    }
}
