//! String interner for identifier storage.
//!
//! Provides O(1) interning and lookup. The evaluator is single-threaded,
//! so interior mutability is a `RefCell`, not a lock.

use rustc_hash::FxHashMap;
use std::cell::RefCell;

use super::Name;

/// String interner backing `Name` identifiers.
///
/// Interned strings are leaked to obtain the `'static` lifetime; the
/// interner lives as long as the program it names, so the leak is bounded
/// by the identifier set of a single parsed program.
pub struct StringInterner {
    /// Map from string content to index.
    map: RefCell<FxHashMap<&'static str, u32>>,
    /// Storage for string contents, indexed by `Name`.
    strings: RefCell<Vec<&'static str>>,
}

impl StringInterner {
    /// Create a new interner with the empty string pre-interned at index 0.
    pub fn new() -> Self {
        let empty: &'static str = "";
        let mut map = FxHashMap::default();
        map.insert(empty, 0);
        StringInterner {
            map: RefCell::new(map),
            strings: RefCell::new(vec![empty]),
        }
    }

    /// Intern a string, returning its `Name`.
    ///
    /// Interning the same content twice returns the same `Name`.
    pub fn intern(&self, s: &str) -> Name {
        if let Some(&index) = self.map.borrow().get(s) {
            return Name::from_raw(index);
        }

        let leaked: &'static str = Box::leak(s.to_owned().into_boxed_str());
        let mut strings = self.strings.borrow_mut();
        assert!(
            u32::try_from(strings.len()).is_ok(),
            "interner exceeded capacity"
        );
        #[expect(
            clippy::cast_possible_truncation,
            reason = "length checked against u32 capacity above"
        )]
        let index = strings.len() as u32;
        strings.push(leaked);
        self.map.borrow_mut().insert(leaked, index);
        Name::from_raw(index)
    }

    /// Look up the string content of a `Name`.
    ///
    /// A `Name` from a different interner may resolve to the empty string.
    pub fn lookup(&self, name: Name) -> &'static str {
        self.strings
            .borrow()
            .get(name.index())
            .copied()
            .unwrap_or("")
    }

    /// Number of interned strings (including the pre-interned empty string).
    pub fn len(&self) -> usize {
        self.strings.borrow().len()
    }

    /// Check whether only the pre-interned empty string is present.
    pub fn is_empty(&self) -> bool {
        self.len() <= 1
    }
}

impl Default for StringInterner {
    fn default() -> Self {
        Self::new()
    }
}
