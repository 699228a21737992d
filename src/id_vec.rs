/// A key into an `IdVec`.  Keys are handed out in increasing order and are
/// never reused, so a key taken from a removed entry stays dead.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IdVecKey(usize);

impl IdVecKey {
    pub fn index(self) -> usize {
        self.0
    }
}

impl From<usize> for IdVecKey {
    fn from(value: usize) -> Self {
        IdVecKey(value)
    }
}

/// A map-like structure that assigns stable keys to inserted values.  Keys
/// remain valid across insertions and removals of other entries.  Removed
/// slots are left vacant rather than recycled.
#[derive(Clone, Debug)]
pub struct IdVec<T> {
    vec: Vec<Option<T>>,
    len: usize,
}

impl<T> IdVec<T> {
    /// Creates a new, empty IdVec.
    pub fn new() -> Self {
        IdVec {
            vec: Vec::new(),
            len: 0,
        }
    }

    /// Gets the number of live entries in the `IdVec`.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Checks if the `IdVec` is empty.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Gets the number of slots ever allocated, live or vacant.  Every key
    /// handed out so far has an index below this bound.
    pub fn slot_count(&self) -> usize {
        self.vec.len()
    }

    /// Reserves capacity for at least `additional` more elements to be inserted.
    pub fn reserve(&mut self, additional: usize) {
        self.vec.reserve(additional);
    }

    /// Inserts a new value into the `IdVec`, returning its key.
    pub fn insert(&mut self, value: T) -> IdVecKey {
        let key = IdVecKey(self.vec.len());
        self.vec.push(Some(value));
        self.len += 1;
        key
    }

    /// Removes the value at the given key from the `IdVec`, returning it if it exists.
    pub fn remove(&mut self, key: IdVecKey) -> Option<T> {
        let removed = self.vec.get_mut(key.0).and_then(Option::take);
        if removed.is_some() {
            self.len -= 1;
        }
        removed
    }

    /// Gets a reference to the item at the given key, if it exists.
    pub fn get(&self, key: IdVecKey) -> Option<&T> {
        self.vec.get(key.0).and_then(Option::as_ref)
    }

    /// Gets a mutable reference to the item at the given key, if it exists.
    pub fn get_mut(&mut self, key: IdVecKey) -> Option<&mut T> {
        self.vec.get_mut(key.0).and_then(Option::as_mut)
    }

    pub fn contains_key(&self, key: IdVecKey) -> bool {
        self.get(key).is_some()
    }

    /// Iterates over live keys in insertion order.
    pub fn iter_keys(&self) -> impl Iterator<Item = IdVecKey> + '_ {
        self.iter().map(|(key, _)| key)
    }

    /// Iterates over live entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (IdVecKey, &T)> + '_ {
        self.vec
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|value| (IdVecKey(i), value)))
    }
}

impl<T> Default for IdVec<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use quickcheck_macros::quickcheck;

    use super::*;

    #[test]
    fn test_insert_and_get() {
        let mut vec = IdVec::new();
        let a = vec.insert("a");
        let b = vec.insert("b");
        assert_eq!(vec.get(a), Some(&"a"));
        assert_eq!(vec.get(b), Some(&"b"));
        assert_eq!(vec.len(), 2);
    }

    #[test]
    fn test_removed_keys_are_not_reused() {
        let mut vec = IdVec::new();
        let a = vec.insert(1);
        assert_eq!(vec.remove(a), Some(1));
        assert_eq!(vec.remove(a), None);
        let b = vec.insert(2);
        assert_ne!(a, b);
        assert_eq!(vec.get(a), None);
        assert_eq!(vec.get(b), Some(&2));
        assert_eq!(vec.len(), 1);
        assert_eq!(vec.slot_count(), 2);
    }

    #[test]
    fn test_iter_skips_vacant_slots() {
        let mut vec = IdVec::new();
        let keys: Vec<_> = (0..5).map(|i| vec.insert(i)).collect();
        vec.remove(keys[1]);
        vec.remove(keys[3]);
        let live: Vec<_> = vec.iter().map(|(_, v)| *v).collect();
        assert_eq!(live, vec![0, 2, 4]);
        assert_eq!(
            vec.iter_keys().collect::<Vec<_>>(),
            vec![keys[0], keys[2], keys[4]]
        );
    }

    #[test]
    fn test_out_of_range_key() {
        let vec: IdVec<i32> = IdVec::new();
        assert_eq!(vec.get(IdVecKey::from(7)), None);
        assert!(!vec.contains_key(IdVecKey::from(0)));
    }

    #[quickcheck]
    fn prop_len_counts_live_entries(values: Vec<u8>, removals: Vec<usize>) -> bool {
        let mut vec = IdVec::new();
        let keys: Vec<_> = values.iter().map(|&v| vec.insert(v)).collect();
        let mut live = keys.len();
        for r in removals {
            if !keys.is_empty() && vec.remove(keys[r % keys.len()]).is_some() {
                live -= 1;
            }
        }
        vec.len() == live && vec.iter().count() == live && vec.slot_count() == keys.len()
    }
}
