//! Memoized color assignments keyed by category-set content

use std::collections::HashMap;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use log::debug;

use super::{ColorAssigner, ColorAssignment};

fn category_key<S: AsRef<str>>(categories: &[S]) -> u64 {
    let mut hasher = DefaultHasher::new();
    categories.len().hash(&mut hasher);
    for category in categories {
        category.as_ref().hash(&mut hasher);
    }
    hasher.finish()
}

/// Computes each distinct category universe once and reuses the result
#[derive(Debug, Default)]
pub struct ColorCache {
    assigner: ColorAssigner,
    entries: HashMap<u64, (Vec<String>, ColorAssignment)>,
    computed: usize,
}

impl ColorCache {
    pub fn new(assigner: ColorAssigner) -> Self {
        Self {
            assigner,
            entries: HashMap::new(),
            computed: 0,
        }
    }

    /// Cached assignment for this exact ordered list, computing it on first use
    pub fn get_or_assign<S: AsRef<str>>(&mut self, categories: &[S]) -> &ColorAssignment {
        let key = category_key(categories);

        let hit = self.entries.get(&key).is_some_and(|(cached, _)| {
            cached.len() == categories.len()
                && cached.iter().zip(categories).all(|(a, b)| a == b.as_ref())
        });

        if !hit {
            debug!("Assigning colors for {} categories", categories.len());
            let owned: Vec<String> = categories.iter().map(|c| c.as_ref().to_string()).collect();
            let assignment = self.assigner.assign(categories);
            self.entries.insert(key, (owned, assignment));
            self.computed += 1;
        }

        &self.entries[&key].1
    }

    /// Number of cached category universes
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// How many assignments have been computed (cache misses)
    pub fn computations(&self) -> usize {
        self.computed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeat_lookup_hits_cache() {
        let mut cache = ColorCache::default();
        let cats = ["Soy", "Oil", "Steel"];
        let first = cache.get_or_assign(&cats).clone();
        let second = cache.get_or_assign(&cats).clone();
        assert_eq!(first, second);
        assert_eq!(cache.computations(), 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_distinct_universes_cached_separately() {
        let mut cache = ColorCache::default();
        cache.get_or_assign(&["A", "B"]);
        cache.get_or_assign(&["B", "A"]);
        cache.get_or_assign(&["A", "B"]);
        assert_eq!(cache.computations(), 2);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_owned_and_borrowed_keys_agree() {
        let mut cache = ColorCache::default();
        let owned = vec!["Soy".to_string(), "Oil".to_string()];
        cache.get_or_assign(&owned);
        cache.get_or_assign(&["Soy", "Oil"]);
        assert_eq!(cache.computations(), 1);
    }
}
