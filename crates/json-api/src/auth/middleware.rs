//! Auth middleware.
//!
//! [`required`] rejects requests without a valid bearer token. [`optional`]
//! treats a missing, expired or unknown token as an anonymous request, so the
//! caller can still fall back to a session id.

use std::sync::Arc;

use boutique_app::auth::{AccessClaims, AuthServiceError};
use salvo::{http::header::AUTHORIZATION, prelude::*};
use tracing::{debug, error};

use crate::{extensions::*, state::State};

#[salvo::handler]
pub(crate) async fn required(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    identify(req, depot, res, ctrl, true).await;
}

#[salvo::handler]
pub(crate) async fn optional(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    identify(req, depot, res, ctrl, false).await;
}

async fn identify(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
    is_required: bool,
) {
    match extract_bearer_token(req) {
        Some(token) => match authenticate(depot, token).await {
            Ok(claims) => depot.insert_claims(claims),
            Err(status) if !is_required && status.code == StatusCode::UNAUTHORIZED => {
                debug!("ignoring unusable bearer token on optional route");
            }
            Err(status) => {
                res.render(status);
                ctrl.skip_rest();

                return;
            }
        },
        None if is_required => {
            res.render(
                StatusError::unauthorized().brief("Missing or invalid Authorization header"),
            );
            ctrl.skip_rest();

            return;
        }
        None => {}
    }

    ctrl.call_next(req, depot, res).await;
}

async fn authenticate(depot: &Depot, token: &str) -> Result<AccessClaims, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    match state.app.auth.authenticate(token).await {
        Ok(claims) => Ok(claims),
        Err(AuthServiceError::InvalidToken(_) | AuthServiceError::NotFound) => {
            Err(StatusError::unauthorized().brief("Invalid or expired token"))
        }
        Err(source) => {
            error!("failed to authenticate bearer token: {source}");

            Err(StatusError::internal_server_error())
        }
    }
}

fn extract_bearer_token(req: &Request) -> Option<&str> {
    let value = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let mut parts = value.splitn(2, ' ');

    let scheme = parts.next()?;
    let token = parts.next()?.trim();

    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return None;
    }

    Some(token)
}
