//! # `matchweave` Matcher Combinator Suite
//!
//! A text pattern-matching engine built from composable matcher objects
//! over Unicode code points, with explicit backtracking, bounded
//! repetition, lookaround assertions, and a named-capture tree.
//!
//! Matchers are built programmatically (there is no pattern-string
//! syntax) and driven over a UTF-16 view of the source text.
//!
//! See:
//! * [`text`] for the [`text::Utf16Text`] source view.
//! * [`navigator`] for the match cursor.
//! * [`matchers`] to build matcher trees.
//! * [`capture`] for the named-capture variants.
//! * [`scanner`] for the find / find-all façade.
//!
//! ```rust
//! use matchweave::matchers::{CategoryMatcher, Matcher, Repeat, Times};
//! use matchweave::scanner::TextScanner;
//! use matchweave::text::Utf16Text;
//!
//! let number = Repeat::new(
//!     CategoryMatcher::new("Nd")?.boxed(),
//!     Times::one_or_more(),
//! );
//!
//! let text = Utf16Text::new("ab12cd");
//! let scanner = TextScanner::new(number.boxed());
//! assert_eq!(scanner.find(&text), Some(2..4));
//! # Ok::<(), matchweave::errors::MatchweaveError>(())
//! ```
//!
//! ## Crate Features
//!
//! #### feature: ``ahash``
//!
//! This swaps all HashMap/HashSet implementations for ``ahash``; which
//! is a performance win on many/(most?) modern CPUs.
//!
//! This is done by the ``types::MWHash{*}`` type alias machinery.
#![warn(missing_docs, unused)]

pub mod capture;
pub mod errors;
pub mod matchers;
pub mod navigator;
pub mod prefix_index;
pub mod scanner;
pub mod text;
pub mod types;
