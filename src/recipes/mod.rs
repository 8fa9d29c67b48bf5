//! The recipe collection and its HTTP surface.
//!
//! | Method | Path | Success | Failure |
//! |---|---|---|---|
//! | `GET` | `/recipes` | `200` array of recipes | |
//! | `POST` | `/recipes` | `201` stored recipe | `400` bad body |
//! | `PUT` | `/recipes/{id}` | `200` updated recipe | `400` bad body, `404` unknown id |
//! | `DELETE` | `/recipes/{id}` | `204` empty | `404` unknown id |

mod error;
mod model;
mod store;

pub mod http;

pub use error::RecipeError;
pub use model::{NewRecipe, Recipe, RecipeId, RecipeUpdate};
pub use store::RecipeStore;
