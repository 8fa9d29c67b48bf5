use parking_lot::Mutex;
use tracing::debug;

use super::{NewRecipe, Recipe, RecipeError, RecipeId};

/// In-memory, insertion-ordered recipe collection.
///
/// Every operation takes the one lock for its whole duration, so a create,
/// update, or delete is never observed half-applied.
#[derive(Debug, Default)]
pub struct RecipeStore {
    recipes: Mutex<Vec<Recipe>>,
}

impl RecipeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-filled with two sample recipes, so a fresh server has
    /// something to list.
    pub fn with_samples() -> Self {
        let store = Self::new();
        store.create(NewRecipe::new(
            "boiled white rice",
            ["1 cup white rice", "2 cups water", "pinch of salt"],
        ));
        store.create(NewRecipe::new(
            "milkshake",
            ["2 tbsp cocoa", "2 cups vanilla ice cream", "1 cup milk"],
        ));
        store
    }

    /// All live recipes in insertion order.
    pub fn list(&self) -> Vec<Recipe> {
        self.recipes.lock().clone()
    }

    pub fn get(&self, id: RecipeId) -> Option<Recipe> {
        self.recipes.lock().iter().find(|r| r.id == id).cloned()
    }

    pub fn len(&self) -> usize {
        self.recipes.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Stores `new` under a fresh id at the end of the collection.
    pub fn create(&self, new: NewRecipe) -> Recipe {
        let recipe = Recipe { id: RecipeId::new(), name: new.name, ingredients: new.ingredients };
        self.recipes.lock().push(recipe.clone());
        debug!(id = %recipe.id, name = %recipe.name, "recipe created");
        recipe
    }

    /// Replaces name and ingredients of `id` in place, keeping its position.
    pub fn update(&self, id: RecipeId, fields: NewRecipe) -> Result<Recipe, RecipeError> {
        let mut recipes = self.recipes.lock();
        let recipe = recipes
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| RecipeError::NotFound(id.to_string()))?;

        recipe.name = fields.name;
        recipe.ingredients = fields.ingredients;
        debug!(%id, "recipe updated");
        Ok(recipe.clone())
    }

    pub fn delete(&self, id: RecipeId) -> Result<(), RecipeError> {
        let mut recipes = self.recipes.lock();
        let index = recipes
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| RecipeError::NotFound(id.to_string()))?;

        // `remove` rather than `swap_remove`: listing order must survive.
        recipes.remove(index);
        debug!(%id, "recipe deleted");
        Ok(())
    }
}
