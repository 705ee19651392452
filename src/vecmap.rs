//! An insertion-ordered vector of pairs, used for [maps][`crate::Value::Map`].
//!
//! Keys are arbitrary values, so the map only needs `PartialEq` on its keys. Lookups are
//! linear, which is fine for the payload sizes this format carries.
//!
//! # Example
//!
//! ```
//! use repy_serial::prelude::*;
//!
//! let mut vmap = VecMap::new();
//! vmap.insert(Value::from("b"), Value::from(1));
//! vmap.insert(Value::from("a"), Value::from(2));
//!
//! // insertion order is kept
//! let keys: Vec<&Value> = vmap.keys().collect();
//! assert_eq!(keys, vec![&Value::from("b"), &Value::from("a")]);
//!
//! // but equality ignores it
//! let other = VecMap::from(vec![
//!     (Value::from("a"), Value::from(2)),
//!     (Value::from("b"), Value::from(1)),
//! ]);
//! assert_eq!(vmap, other);
//! ```

use std::{
    collections::HashMap,
    hash::*,
    iter::FromIterator,
    slice::Iter,
    vec::IntoIter,
};

#[derive(Clone, Debug)]
/// A map implemented as a [`Vec`] of pairs in insertion order.
///
/// See also: [module level documentation](`crate::vecmap`).
pub struct VecMap<K, V>(Vec<(K, V)>);

impl<K, V> VecMap<K, V> {
    /// Creates an empty [`VecMap`].
    pub fn new() -> Self { VecMap(Vec::new()) }

    /// Returns length.
    ///
    /// # Example
    ///
    /// ```
    /// use repy_serial::prelude::*;
    ///
    /// let vmap = VecMap::from(vec![("foo", "bar")]);
    ///
    /// assert_eq!(vmap.len(), 1);
    /// ```
    pub fn len(&self) -> usize { self.0.len() }

    /// Indicates whether the [`VecMap`] is empty.
    pub fn is_empty(&self) -> bool { self.0.is_empty() }

    /// Returns an [`Iter`] of the key value pairs, in insertion order.
    pub fn iter(&self) -> Iter<(K, V)> { self.0.iter() }

    /// Returns the keys, in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &K> { self.0.iter().map(|(k, _)| k) }

    /// Returns the values, in insertion order.
    pub fn values(&self) -> impl Iterator<Item = &V> { self.0.iter().map(|(_, v)| v) }

    /// Consumes the map, returning its pairs.
    pub fn into_vec(self) -> Vec<(K, V)> { self.0 }
}

impl<K: PartialEq, V> VecMap<K, V> {
    /// Inserts a pair. If an equal key is already present its value is replaced in place
    /// and the old value is returned.
    ///
    /// # Example
    ///
    /// ```
    /// use repy_serial::prelude::*;
    ///
    /// let mut vmap = VecMap::from(vec![(1, "foo"), (2, "bar")]);
    ///
    /// assert_eq!(vmap.insert(1, "baz"), Some("foo"));
    /// assert_eq!(vmap.iter().next(), Some(&(1, "baz")));
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some((_, v)) => Some(std::mem::replace(v, value)),
            None => {
                self.0.push((key, value));
                None
            }
        }
    }

    /// Returns the value of the first pair whose key equals `key`.
    pub fn get(&self, key: &K) -> Option<&V> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Indicates whether some pair has a key equal to `key`.
    pub fn contains_key(&self, key: &K) -> bool { self.get(key).is_some() }
}

impl<K: Eq + Hash, V> VecMap<K, V> {
    /// Consumes a [`VecMap`], producing a [`HashMap`] from the entries.
    /// Later pairs win over earlier pairs with the same key.
    pub fn into_hashmap<S: BuildHasher + Default>(self) -> HashMap<K, V, S> {
        self.into_iter().collect()
    }
}

impl<K, V> Default for VecMap<K, V> {
    fn default() -> Self { VecMap::new() }
}

/// Two maps are equal when they hold the same pairs, in any order.
impl<K: PartialEq, V: PartialEq> PartialEq for VecMap<K, V> {
    fn eq(&self, other: &Self) -> bool {
        if self.len() != other.len() {
            return false;
        }
        let mut used = vec![false; other.len()];
        self.0.iter().all(|pair| {
            let found = other
                .0
                .iter()
                .enumerate()
                .position(|(i, o)| !used[i] && o == pair);
            match found {
                Some(i) => {
                    used[i] = true;
                    true
                }
                None => false,
            }
        })
    }
}

impl<K, V> From<Vec<(K, V)>> for VecMap<K, V> {
    fn from(v: Vec<(K, V)>) -> Self { VecMap(v) }
}

impl<K: Hash + Eq, V, S: BuildHasher> From<HashMap<K, V, S>> for VecMap<K, V> {
    fn from(hm: HashMap<K, V, S>) -> Self { VecMap(hm.into_iter().collect()) }
}

impl<K, V> IntoIterator for VecMap<K, V> {
    type IntoIter = IntoIter<(K, V)>;
    type Item = (K, V);

    fn into_iter(self) -> IntoIter<(K, V)> { self.0.into_iter() }
}

impl<'a, K, V> IntoIterator for &'a VecMap<K, V> {
    type IntoIter = Iter<'a, (K, V)>;
    type Item = &'a (K, V);

    fn into_iter(self) -> Iter<'a, (K, V)> { self.0.iter() }
}

impl<K, V> FromIterator<(K, V)> for VecMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> VecMap<K, V> {
        VecMap(Vec::from_iter(iter))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_insensitive_eq() {
        let a = VecMap::from(vec![(1, 'a'), (2, 'b')]);
        let b = VecMap::from(vec![(2, 'b'), (1, 'a')]);
        let c = VecMap::from(vec![(1, 'a'), (2, 'c')]);
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, VecMap::from(vec![(1, 'a')]));
    }

    #[test]
    fn duplicate_pairs_counted() {
        let a = VecMap::from(vec![(1, 'a'), (1, 'a')]);
        let b = VecMap::from(vec![(1, 'a'), (2, 'b')]);
        assert_ne!(a, b);
        assert_ne!(b, a);
    }

    #[test]
    fn insert_replaces_in_place() {
        let mut m = VecMap::new();
        assert_eq!(m.insert("x", 1), None);
        assert_eq!(m.insert("y", 2), None);
        assert_eq!(m.insert("x", 3), Some(1));
        assert_eq!(m.into_vec(), vec![("x", 3), ("y", 2)]);
    }
}
