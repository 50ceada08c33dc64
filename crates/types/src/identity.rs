//! Static package identity

use serde::{Deserialize, Serialize};

/// Who and what a recipe packages.
///
/// Built once when the recipe is loaded and passed by reference to every
/// phase that needs it; nothing mutates it afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeIdentity {
    pub name: String,
    pub author: String,
    pub license: String,
    pub homepage: String,
    pub description: String,
}

impl RecipeIdentity {
    /// Identity of the irrlicht-based engine package
    #[must_use]
    pub fn irrlicht_engine() -> Self {
        Self {
            name: "irrlicht-engine".to_string(),
            author: "Train IT".to_string(),
            license: "MIT License".to_string(),
            homepage: "https://train-it.eu".to_string(),
            description: "Modern C++ Design: Part 1 Workshop - engine".to_string(),
        }
    }
}
