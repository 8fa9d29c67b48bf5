//! Request handlers for `/recipes`.
//!
//! Bodies are parsed and validated here, before the store is touched.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::{NewRecipe, Recipe, RecipeError, RecipeId, RecipeStore, RecipeUpdate};
use crate::{IntoResponse, Json, Method, Request, Response, Router, Status};

/// Registers the four recipe routes.
pub fn routes(router: Router<RecipeStore>) -> Router<RecipeStore> {
    router
        .on(Method::Get, "/recipes", list)
        .on(Method::Post, "/recipes", create)
        .on(Method::Put, "/recipes/{id}", update)
        .on(Method::Delete, "/recipes/{id}", delete)
}

/// `GET /recipes`
pub async fn list(store: Arc<RecipeStore>, _req: Request) -> Json<Vec<Recipe>> {
    Json(store.list())
}

/// `POST /recipes`
pub async fn create(store: Arc<RecipeStore>, req: Request) -> Result<Response, RecipeError> {
    let new = parse_body::<NewRecipe>(&req)?
        .validate()
        .inspect_err(|e| warn!(path = req.path(), "rejected recipe: {e}"))?;
    let recipe = store.create(new);
    let location = format!("/recipes/{}", recipe.id);

    let mut res = (Status::Created, Json(recipe)).into_response();
    res.headers.push(("location".to_owned(), location));
    Ok(res)
}

/// `PUT /recipes/{id}`
pub async fn update(store: Arc<RecipeStore>, req: Request) -> Result<Json<Recipe>, RecipeError> {
    let id = path_id(&req)?;
    let fields = parse_body::<RecipeUpdate>(&req)?
        .validate_for(id)
        .inspect_err(|e| warn!(%id, "rejected update: {e}"))?;
    store
        .update(id, fields)
        .inspect_err(|e| debug!("update failed: {e}"))
        .map(Json)
}

/// `DELETE /recipes/{id}`
pub async fn delete(store: Arc<RecipeStore>, req: Request) -> Result<Status, RecipeError> {
    let id = path_id(&req)?;
    store.delete(id).inspect_err(|e| debug!("delete failed: {e}"))?;
    Ok(Status::NoContent)
}

/// Resolves the `{id}` segment.
///
/// Only the canonical hyphenated lowercase form names a recipe, so every
/// record has exactly one URL. Anything else is a 404.
fn path_id(req: &Request) -> Result<RecipeId, RecipeError> {
    let raw = req.param("id").unwrap_or_default();
    match raw.parse::<RecipeId>() {
        Ok(id) if id.to_string() == raw => Ok(id),
        _ => {
            debug!(id = raw, "path id does not name a recipe");
            Err(RecipeError::NotFound(raw.to_owned()))
        }
    }
}

fn parse_body<T: DeserializeOwned>(req: &Request) -> Result<T, RecipeError> {
    serde_json::from_slice(req.body()).map_err(|e| {
        warn!(path = req.path(), "rejected request body: {e}");
        RecipeError::validation(format!("invalid request body: {e}"))
    })
}
