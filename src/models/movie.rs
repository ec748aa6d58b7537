use serde::{Deserialize, Serialize};

/// Catalog identifier for a movie
pub type MovieId = u32;

/// A catalog movie with the static attributes used for content similarity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Movie {
    /// Unique identifier within the catalog
    pub id: MovieId,
    pub title: String,
    /// Release year
    pub year: i32,
    /// Genre labels in display order; never empty for a loaded catalog
    pub genres: Vec<String>,
    pub director: String,
    /// Intrinsic quality score on a 0-10 scale
    pub rating: f64,
    #[serde(default)]
    pub description: String,
}

impl Movie {
    /// Checks whether the movie is tagged with the given genre (exact match)
    pub fn has_genre(&self, genre: &str) -> bool {
        self.genres.iter().any(|g| g == genre)
    }

    /// Case-insensitive title match used by catalog search
    pub fn title_contains(&self, needle_lowercase: &str) -> bool {
        self.title.to_lowercase().contains(needle_lowercase)
    }
}
