//! String interner implementation.
//!
//! The compiler runs as a single synchronous pipeline (lex -> parse -> check
//! -> optimize -> emit) within one process, so the interner does not need to
//! support concurrent access. It is a plain `RefCell`-guarded hash map keyed
//! by string content, with interned strings leaked to `'static` so `Symbol`
//! can carry string slices without lifetime tracking.
//!
//! # Performance Characteristics
//!
//! - **Interning (hit)**: O(1) - hash lookup only
//! - **Interning (miss)**: O(1) amortized - hash insert + allocation
//! - **Symbol comparison**: O(1) - index comparison
//! - **String retrieval**: O(1) - direct vector index

use rustc_hash::FxHashMap;
use std::cell::RefCell;
use std::sync::OnceLock;

use super::{InternerStats, Symbol};

/// Global string table instance, initialized on first use.
///
/// All known keywords are pre-interned during initialization so they have
/// stable, predictable indices matching the constants in `symbol::mod`.
pub static STRING_TABLE: OnceLockTable = OnceLockTable::new();

/// A lazily-initialized [`StringTable`] behind a [`OnceLock`].
///
/// Wrapping `OnceLock` lets `STRING_TABLE` be used with the same `STRING_TABLE.intern(...)`
/// call syntax as the rest of the crate expects from a plain static.
pub struct OnceLockTable(OnceLock<StringTable>);

impl OnceLockTable {
    const fn new() -> Self {
        Self(OnceLock::new())
    }

    fn table(&self) -> &StringTable {
        self.0.get_or_init(|| {
            let table = StringTable::new();
            table.initialize_known_symbols();
            table
        })
    }

    pub fn intern(&self, string: &str) -> Symbol {
        self.table().intern(string)
    }

    pub fn get(&self, symbol: Symbol) -> Option<&'static str> {
        self.table().get(symbol)
    }

    pub fn stats(&self) -> InternerStats {
        self.table().stats()
    }

    #[cfg(test)]
    pub(crate) fn reset_stats(&self) {
        self.table().reset_stats()
    }
}

/// A single-threaded string table.
///
/// Strings are leaked onto the heap to obtain `'static` lifetime references.
/// This is acceptable because the table lives for the whole process and
/// interned strings are never removed.
pub struct StringTable {
    /// Maps string content to symbol index
    map: RefCell<FxHashMap<&'static str, u32>>,
    /// Strings in index order, for `get()`
    strings: RefCell<Vec<&'static str>>,
    /// Number of cache hits (string already interned)
    hits: RefCell<usize>,
    /// Number of cache misses (new string allocation)
    misses: RefCell<usize>,
}

/// Number of symbols reserved for known keywords.
///
/// All symbols with index < this value are known at compile time and
/// correspond to the constants declared in `symbol::mod`.
const RESERVED_SYMBOLS_END: u32 = 64;

impl StringTable {
    fn new() -> Self {
        Self {
            map: RefCell::new(FxHashMap::default()),
            strings: RefCell::new(Vec::new()),
            hits: RefCell::new(0),
            misses: RefCell::new(0),
        }
    }

    /// Pre-intern every known keyword, type name, and built-in function name
    /// in the exact order their constants are declared in `symbol::mod`, so
    /// that indices line up.
    fn initialize_known_symbols(&self) {
        let known_symbols = [
            // Verbs
            "transforms", "inputs", "outputs", "validates", "reads", "creates", "matches",
            // Declarations and control flow
            "main", "type", "const", "import", "module", "from", "if", "else", "for",
            "while", "return", "match", "in", "let", "mut", "where", "invariant",
            // Contract and epistemic keywords
            "ensures", "requires", "proof", "know", "assume", "believe", "why_not",
            "chosen", "near_miss", "intent", "satisfies", "result", "when",
            // Boolean literals
            "true", "false",
            // Built-in types
            "Integer", "Decimal", "Boolean", "Character", "String", "Byte", "Result",
            "Option", "List", "Error",
            // Built-in functions
            "println", "print", "readln", "read_file", "write_file", "open", "close",
            "flush", "sleep", "len", "map", "filter", "reduce", "to_string", "clamp",
        ];

        debug_assert_eq!(known_symbols.len(), RESERVED_SYMBOLS_END as usize);

        let mut map = self.map.borrow_mut();
        let mut strings = self.strings.borrow_mut();
        for symbol in known_symbols.iter() {
            let interned: &'static str = Box::leak(symbol.to_string().into_boxed_str());
            let idx = strings.len() as u32;
            strings.push(interned);
            map.insert(interned, idx);
        }
    }

    /// Intern a string, returning its symbol.
    pub fn intern(&self, string: &str) -> Symbol {
        if let Some(&idx) = self.map.borrow().get(string) {
            *self.hits.borrow_mut() += 1;
            return Symbol { index: idx };
        }

        *self.misses.borrow_mut() += 1;
        let interned: &'static str = Box::leak(string.to_string().into_boxed_str());
        let mut strings = self.strings.borrow_mut();
        let idx = strings.len() as u32;
        strings.push(interned);
        self.map.borrow_mut().insert(interned, idx);
        Symbol { index: idx }
    }

    /// Get string by symbol. O(1) direct index.
    pub fn get(&self, symbol: Symbol) -> Option<&'static str> {
        self.strings.borrow().get(symbol.index as usize).copied()
    }

    /// Get statistics about the string table for profiling.
    pub fn stats(&self) -> InternerStats {
        let count = self.strings.borrow().len();
        let capacity = self.map.borrow().capacity();
        InternerStats {
            count,
            capacity,
            collisions: 0,
            hits: *self.hits.borrow(),
            misses: *self.misses.borrow(),
        }
    }

    #[cfg(test)]
    pub(crate) fn reset_stats(&self) {
        *self.hits.borrow_mut() = 0;
        *self.misses.borrow_mut() = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intern_same_string() {
        let s1 = STRING_TABLE.intern("hello");
        let s2 = STRING_TABLE.intern("hello");
        assert_eq!(s1, s2);
    }

    #[test]
    fn test_intern_different_strings() {
        let s1 = STRING_TABLE.intern("hello");
        let s2 = STRING_TABLE.intern("world");
        assert_ne!(s1, s2);
    }

    #[test]
    fn test_get_string() {
        let symbol = STRING_TABLE.intern("test_string");
        let string = STRING_TABLE.get(symbol);
        assert_eq!(string, Some("test_string"));
    }

    #[test]
    fn test_stats_tracking() {
        STRING_TABLE.reset_stats();

        let _ = STRING_TABLE.intern("new_unique_string_12345");
        let stats = STRING_TABLE.stats();
        assert!(stats.misses >= 1);

        let _ = STRING_TABLE.intern("new_unique_string_12345");
        let stats = STRING_TABLE.stats();
        assert!(stats.hits >= 1);
    }

    #[test]
    fn test_stats_struct() {
        let stats = STRING_TABLE.stats();
        assert!(stats.count > 0); // Known symbols are pre-interned
        assert!(stats.load_factor() >= 0.0);
        assert!(stats.load_factor() <= 1.0);
    }

    #[test]
    fn test_empty_string() {
        let s = STRING_TABLE.intern("");
        assert_eq!(STRING_TABLE.get(s), Some(""));
    }

    #[test]
    fn test_unicode_strings() {
        let test_cases = ["你好", "世界", "🦀", "こんにちは", "Привет"];

        for test in &test_cases {
            let sym = STRING_TABLE.intern(test);
            assert_eq!(STRING_TABLE.get(sym), Some(*test));
        }
    }

    #[test]
    fn test_long_strings() {
        let long_string = "a".repeat(10000);
        let sym = STRING_TABLE.intern(&long_string);
        assert_eq!(STRING_TABLE.get(sym), Some(long_string.as_str()));
    }

    #[test]
    fn test_many_unique_strings_stay_distinct() {
        let mut symbols = Vec::new();
        for i in 0..1000 {
            let s = STRING_TABLE.intern(&format!("unique_test_{}", i));
            symbols.push(s);
        }

        for i in 0..symbols.len() {
            for j in (i + 1)..symbols.len() {
                assert_ne!(symbols[i], symbols[j]);
            }
        }

        for (i, sym) in symbols.iter().enumerate() {
            let expected = format!("unique_test_{}", i);
            assert_eq!(STRING_TABLE.get(*sym), Some(expected.as_str()));
        }
    }
}
