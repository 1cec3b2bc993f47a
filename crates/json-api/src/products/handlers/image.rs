//! Product Image Handler

use std::sync::Arc;

use salvo::{fs::NamedFile, oapi::extract::PathParam, prelude::*};

use crate::{extensions::*, products::images::resolve_image_path, state::State};

/// Product Image Handler
///
/// Serves a product image from the upload directory.
#[endpoint(
    tags("products"),
    summary = "Get Product Image",
    responses(
        (status_code = StatusCode::OK, description = "Image file"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid image path"),
        (status_code = StatusCode::NOT_FOUND, description = "Image not found"),
    ),
)]
pub(crate) async fn handler(
    path: PathParam<String>,
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<(), StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let file = resolve_image_path(&state.upload_dir, &path.into_inner())
        .ok_or_else(|| StatusError::bad_request().brief("invalid image path"))?;

    let is_file = tokio::fs::metadata(&file)
        .await
        .is_ok_and(|metadata| metadata.is_file());

    if !is_file {
        return Err(StatusError::not_found().brief("image not found"));
    }

    NamedFile::builder(file).send(req.headers(), res).await;

    Ok(())
}
