//! Extractors Crate
//!
//! Turns raw financial emails into structured records via regex pattern
//! matching. It is pure library code: no I/O, no shared mutable state.
//!
//! # Architecture
//!
//! - **Types**: Domain records and enums live in the `shared-types` crate
//! - **Patterns**: [`PatternLibrary`] is an immutable table of compiled
//!   regexes and keyword sets, built once at process start and passed by
//!   reference into the classifier and extractor
//! - **Classifier**: [`EmailClassifier`] decides what kind of email it is
//!   looking at (promotional, transaction alert, payment confirmation, a
//!   spend category, or unknown)
//! - **Fields**: [`FieldExtractor`] pulls amounts, merchants, card numbers
//!   and statement fields out of a classified email
//!
//! # Example
//!
//! ```rust,ignore
//! use extractors::{EmailClassifier, FieldExtractor, PatternLibrary};
//!
//! let patterns = PatternLibrary::new();
//! let classifier = EmailClassifier::new(&patterns);
//! let classification = classifier.classify(&email);
//! ```

pub mod classifier;
pub mod fields;
pub mod patterns;

pub use classifier::EmailClassifier;
pub use fields::FieldExtractor;
pub use patterns::PatternLibrary;
