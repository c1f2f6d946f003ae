use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::service::{RenderPass, ServiceState};

impl FromRequestParts<ServiceState> for RenderPass {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ServiceState,
    ) -> Result<Self, Self::Rejection> {
        let pass = state.render_pass();

        tracing::debug!(
            target: crate::service::TRACING_TARGET_RENDER,
            pass_id = %pass.id(),
            method = %parts.method,
            path = parts.uri.path(),
            "Render pass created"
        );

        Ok(pass)
    }
}
