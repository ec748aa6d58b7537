use std::collections::BTreeSet;

use rand::seq::SliceRandom;
use rand::Rng;

use super::round_to_tenth;
use crate::models::{CatalogStatistics, Movie, MovieId};

/// Read-only lookups over the movie catalog
pub struct CatalogQueryService<'a> {
    catalog: &'a [Movie],
}

impl<'a> CatalogQueryService<'a> {
    pub fn new(catalog: &'a [Movie]) -> Self {
        Self { catalog }
    }

    /// Every movie, in catalog order
    pub fn all(&self) -> &'a [Movie] {
        self.catalog
    }

    pub fn get(&self, id: MovieId) -> Option<&'a Movie> {
        self.catalog.iter().find(|m| m.id == id)
    }

    /// Movies tagged with `genre`. No genre, or an empty one, returns the whole catalog.
    pub fn by_genre(&self, genre: Option<&str>) -> Vec<&'a Movie> {
        match genre {
            Some(genre) if !genre.is_empty() => {
                self.catalog.iter().filter(|m| m.has_genre(genre)).collect()
            }
            _ => self.catalog.iter().collect(),
        }
    }

    /// Case-insensitive substring search over titles
    pub fn search(&self, query: &str) -> Vec<&'a Movie> {
        let needle = query.to_lowercase();
        self.catalog
            .iter()
            .filter(|m| m.title_contains(&needle))
            .collect()
    }

    /// Title search narrowed to one genre. Either filter may be absent or
    /// empty, in which case it matches everything.
    pub fn browse(&self, query: Option<&str>, genre: Option<&str>) -> Vec<&'a Movie> {
        let movies = self.by_genre(genre);
        match query.filter(|q| !q.is_empty()).map(str::to_lowercase) {
            Some(needle) => movies
                .into_iter()
                .filter(|m| m.title_contains(&needle))
                .collect(),
            None => movies,
        }
    }

    /// Distinct genres across the catalog, sorted
    pub fn genres(&self) -> Vec<&'a str> {
        self.catalog
            .iter()
            .flat_map(|m| m.genres.iter().map(String::as_str))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn statistics(&self) -> CatalogStatistics {
        let total_movies = self.catalog.len();
        let average = if total_movies == 0 {
            0.0
        } else {
            self.catalog.iter().map(|m| m.rating).sum::<f64>() / total_movies as f64
        };

        CatalogStatistics {
            total_movies,
            total_genres: self.genres().len(),
            average_rating: format!("{:.1}", round_to_tenth(average)),
        }
    }

    /// Up to `n` distinct movies drawn uniformly at random, in random order,
    /// for a new user to rate. Asking for more than the catalog holds returns
    /// the whole catalog shuffled.
    pub fn sample_for_rating<R: Rng + ?Sized>(&self, n: usize, rng: &mut R) -> Vec<&'a Movie> {
        let mut pool: Vec<&'a Movie> = self.catalog.iter().collect();
        let (picked, _) = pool.partial_shuffle(rng, n);
        picked.to_vec()
    }
}
