//! # Common Types

cfg_if::cfg_if! {
    if #[cfg(feature = "ahash")] {
        /// Type Alias for hash maps in this crate.
        pub type MWHashMap<K, V> = ahash::AHashMap<K, V>;

        /// Type Alias for hash sets in this crate.
        pub type MWHashSet<V> = ahash::AHashSet<V>;
    } else {
        /// Type Alias for hash maps in this crate.
        pub type MWHashMap<K, V> = std::collections::HashMap<K, V>;

        /// Type Alias for hash sets in this crate.
        pub type MWHashSet<V> = std::collections::HashSet<V>;
    }
}

/// A Unicode code point value.
///
/// Stored as `u32` rather than `char` because text is viewed as UTF-16
/// code units, where lone surrogates are observable values.
pub type CodePoint = u32;
