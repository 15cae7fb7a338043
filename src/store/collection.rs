//! In-memory movie collection
//!
//! An ordered `Vec<Movie>` behind a lock. Every operation is a linear scan;
//! insertion order is preserved and is the order `all()` returns.

use std::collections::HashSet;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use uuid::Uuid;

use crate::schema::{Movie, MoviePatch, NewMovie};

use super::errors::{StoreError, StoreResult};
use super::seed::seed_movies;

/// Process-lifetime movie collection.
///
/// Each method holds the lock only for its own duration, so mutations are
/// applied one at a time in arrival order.
#[derive(Debug, Default)]
pub struct MovieStore {
    movies: RwLock<Vec<Movie>>,
}

impl MovieStore {
    /// Creates a store holding `movies`. Ids must be unique.
    pub fn new(movies: Vec<Movie>) -> StoreResult<Self> {
        if let Some(id) = duplicate_id(&movies) {
            return Err(StoreError::DuplicateId(id.to_string()));
        }

        Ok(Self {
            movies: RwLock::new(movies),
        })
    }

    /// Creates an empty store
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates a store from the embedded seed collection
    pub fn seeded() -> StoreResult<Self> {
        Self::new(seed_movies()?)
    }

    /// Every record, in insertion order
    pub fn all(&self) -> Vec<Movie> {
        self.read().clone()
    }

    /// Records with a genre equal to `genre`, ignoring case
    pub fn filter_by_genre(&self, genre: &str) -> Vec<Movie> {
        self.read()
            .iter()
            .filter(|m| m.has_genre(genre))
            .cloned()
            .collect()
    }

    pub fn find(&self, id: &str) -> Option<Movie> {
        self.read().iter().find(|m| m.id == id).cloned()
    }

    /// Appends a record built from validated input and a fresh id
    pub fn create(&self, new: NewMovie) -> Movie {
        let mut movies = self.write();

        let mut id = Uuid::new_v4().to_string();
        while movies.iter().any(|m| m.id == id) {
            id = Uuid::new_v4().to_string();
        }

        let movie = Movie::from_new(id, new);
        movies.push(movie.clone());
        movie
    }

    /// Merges `patch` over the record with `id`. Returns the updated record.
    pub fn update(&self, id: &str, patch: MoviePatch) -> Option<Movie> {
        let mut movies = self.write();
        let movie = movies.iter_mut().find(|m| m.id == id)?;
        movie.apply(patch);
        Some(movie.clone())
    }

    /// Removes the record with `id`. Returns false if there was none.
    pub fn remove(&self, id: &str) -> bool {
        let mut movies = self.write();
        match movies.iter().position(|m| m.id == id) {
            Some(index) => {
                movies.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    // A panic while holding the lock cannot leave the Vec half-modified,
    // so a poisoned lock is still safe to use.
    fn read(&self) -> RwLockReadGuard<'_, Vec<Movie>> {
        self.movies.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<Movie>> {
        self.movies.write().unwrap_or_else(PoisonError::into_inner)
    }
}

fn duplicate_id(movies: &[Movie]) -> Option<&str> {
    let mut seen = HashSet::with_capacity(movies.len());
    movies
        .iter()
        .map(|m| m.id.as_str())
        .find(|id| !seen.insert(*id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Genre;

    fn movie(id: &str, title: &str, genre: Vec<Genre>) -> Movie {
        Movie {
            id: id.to_string(),
            title: title.to_string(),
            year: 2000,
            director: "Someone".to_string(),
            duration: 100,
            poster: "https://movies.com/p.jpg".to_string(),
            genre,
            rate: 7.0,
        }
    }

    fn new_movie(title: &str) -> NewMovie {
        NewMovie {
            title: title.to_string(),
            year: 2021,
            director: "D. Villeneuve".to_string(),
            duration: 155,
            poster: "https://x.com/p.jpg".to_string(),
            genre: vec![Genre::SciFi],
            rate: 5.0,
        }
    }

    fn small_store() -> MovieStore {
        MovieStore::new(vec![
            movie("a", "Airplane!", vec![Genre::Comedy]),
            movie("b", "Heat", vec![Genre::Crime, Genre::Drama]),
            movie("c", "Titanic", vec![Genre::Drama]),
        ])
        .unwrap()
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let result = MovieStore::new(vec![
            movie("a", "One", vec![Genre::Drama]),
            movie("a", "Two", vec![Genre::Drama]),
        ]);
        assert!(matches!(result, Err(StoreError::DuplicateId(id)) if id == "a"));
    }

    #[test]
    fn test_seeded_store_is_populated() {
        let store = MovieStore::seeded().unwrap();
        assert!(!store.is_empty());
    }

    #[test]
    fn test_filter_by_genre() {
        let store = small_store();
        assert_eq!(store.filter_by_genre("Comedy").len(), 1);
        assert_eq!(store.filter_by_genre("drama").len(), 2);
        assert!(store.filter_by_genre("Western").is_empty());
    }

    #[test]
    fn test_find() {
        let store = small_store();
        assert_eq!(store.find("b").unwrap().title, "Heat");
        assert!(store.find("zzz").is_none());
    }

    #[test]
    fn test_create_appends_with_fresh_id() {
        let store = small_store();
        let first = store.create(new_movie("Dune"));
        let second = store.create(new_movie("Dune"));

        assert_ne!(first.id, second.id);
        assert!(Uuid::parse_str(&first.id).is_ok());
        assert_eq!(store.len(), 5);
        assert_eq!(store.all().last().unwrap().id, second.id);
    }

    #[test]
    fn test_update_merges_fields() {
        let store = small_store();
        let patch = MoviePatch {
            year: Some(1995),
            ..Default::default()
        };

        let updated = store.update("b", patch).unwrap();
        assert_eq!(updated.id, "b");
        assert_eq!(updated.year, 1995);
        assert_eq!(updated.title, "Heat");
        assert_eq!(store.find("b").unwrap(), updated);
    }

    #[test]
    fn test_update_unknown_id() {
        let store = small_store();
        assert!(store.update("nope", MoviePatch::default()).is_none());
    }

    #[test]
    fn test_remove_twice() {
        let store = small_store();
        assert!(store.remove("a"));
        assert!(!store.remove("a"));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_order_is_preserved_after_remove() {
        let store = small_store();
        store.remove("b");
        let ids: Vec<_> = store.all().into_iter().map(|m| m.id).collect();
        assert_eq!(ids, vec!["a", "c"]);
    }
}
