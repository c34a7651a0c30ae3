use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::shared::error::ApiError;
use crate::shared::state::AppState;

use super::store::ListQuery;
use super::{Contact, ContactPatch, ContactReplacement, NewContact};

pub async fn list_contacts(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Contact>>, ApiError> {
    let contacts = state.repo.list(&query)?;
    Ok(Json(contacts))
}

pub async fn get_contact(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<Contact>, ApiError> {
    let contact = state.repo.get(id)?;
    Ok(Json(contact))
}

pub async fn create_contact(
    State(state): State<Arc<AppState>>,
    Json(new): Json<NewContact>,
) -> Result<impl IntoResponse, ApiError> {
    let created = state.repo.create(new)?;
    let location = format!("/api/contacts/{}", created.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(created),
    ))
}

pub async fn replace_contact(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(update): Json<ContactReplacement>,
) -> Result<Json<Contact>, ApiError> {
    let updated = state.repo.replace(id, update)?;
    Ok(Json(updated))
}

pub async fn patch_contact(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(patch): Json<ContactPatch>,
) -> Result<Json<Contact>, ApiError> {
    let updated = state.repo.patch(id, patch)?;
    Ok(Json(updated))
}

/// Idempotent: deleting an absent id still reports 204. The repository
/// says whether a row actually went away; that only feeds the log.
pub async fn delete_contact(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    let existed = state.repo.delete(id)?;
    if !existed {
        tracing::debug!(id, "delete for absent contact");
    }
    Ok(StatusCode::NO_CONTENT)
}

pub fn configure_contacts_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/contacts", get(list_contacts).post(create_contact))
        .route(
            "/contacts/:id",
            get(get_contact)
                .put(replace_contact)
                .patch(patch_contact)
                .delete(delete_contact),
        )
}
