//! A dual-trie store for phone-number forwarding rules.
//!
//! A [`Registry`] holds a set of rules `source -> image`, each a pair of
//! phone numbers over the alphabet `{0-9, *, #}`. [`Registry::get`] looks
//! up the image of the *longest* registered prefix of a number (forwarding
//! lookup); [`Registry::reverse`] and [`Registry::get_reverse`] answer the
//! dual question, which numbers forward to (a prefix of) a given number.
//!
//! ```
//! use numtrie_store::Registry;
//!
//! let mut registry = Registry::new();
//! assert!(registry.add("22", "1800"));
//! assert_eq!(registry.get("2234").unwrap().get(0), Some("180034"));
//! ```
//!
//! One module per concern (`symbol`, `dlist`, `trie`, `registry`,
//! `phone_numbers`, `error`), with the public surface re-exported at the
//! crate root.

mod dlist;
mod error;
mod phone_numbers;
mod registry;
mod symbol;
mod trie;

pub use error::RegistryError;
pub use phone_numbers::PhoneNumbers;
pub use registry::Registry;
pub use symbol::Number;
