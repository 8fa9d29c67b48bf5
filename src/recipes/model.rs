use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::RecipeError;

/// System-assigned recipe identifier, serialized as a hyphenated UUID string.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecipeId(Uuid);

impl RecipeId {
    /// A fresh random id. v4 UUIDs make reuse within a process negligible.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RecipeId {
    fn default() -> Self { Self::new() }
}

impl fmt::Display for RecipeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for RecipeId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

/// A stored recipe.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: RecipeId,
    pub name: String,
    /// Caller order, preserved verbatim.
    pub ingredients: Vec<String>,
}

/// Body of `POST /recipes`, and the replaceable part of a recipe.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct NewRecipe {
    pub name: String,
    pub ingredients: Vec<String>,
}

impl NewRecipe {
    pub fn new<I>(name: impl Into<String>, ingredients: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Self {
            name: name.into(),
            ingredients: ingredients.into_iter().map(Into::into).collect(),
        }
    }

    /// Checks the rules serde cannot express.
    pub fn validate(self) -> Result<Self, RecipeError> {
        if self.name.trim().is_empty() {
            return Err(RecipeError::validation("`name` must not be empty"));
        }
        Ok(self)
    }
}

/// Body of `PUT /recipes/{id}`.
///
/// `id` may be omitted; the path decides which recipe is replaced.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct RecipeUpdate {
    #[serde(default)]
    pub id: Option<RecipeId>,
    #[serde(flatten)]
    pub fields: NewRecipe,
}

impl RecipeUpdate {
    /// Validates the body against the recipe addressed by the path.
    pub fn validate_for(self, path_id: RecipeId) -> Result<NewRecipe, RecipeError> {
        match self.id {
            Some(body_id) if body_id != path_id => Err(RecipeError::validation(format!(
                "body id `{body_id}` does not match path id `{path_id}`"
            ))),
            _ => self.fields.validate(),
        }
    }
}
