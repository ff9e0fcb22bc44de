/// A cached key/value pair plus the access count it has accumulated.
///
/// Entries are the unit that composite policies move between segments: a
/// segment hands one out from `remove`/`pop_*` or as an eviction byproduct and
/// another segment accepts it through `push_entry`. The `frequency` travels
/// with the entry, so a frequency-ordered segment can restore the count an
/// entry had before it was promoted out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry<K, V> {
    pub key: K,
    pub value: V,
    pub frequency: u64,
}

impl<K, V> Entry<K, V> {
    /// Creates an entry with an access count of 1.
    pub fn new(key: K, value: V) -> Self {
        Self {
            key,
            value,
            frequency: 1,
        }
    }

    /// Splits the entry into its key and value.
    pub fn into_pair(self) -> (K, V) {
        (self.key, self.value)
    }
}
