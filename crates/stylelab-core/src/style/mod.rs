//! Style composition - interpolated base stylesheet plus cached overrides
//!
//! The final preview stylesheet is built from three parts in fixed cascade
//! order: the interpolated base template, the per-document-type header
//! fragment, and the global override from settings.

pub mod builtin;
pub mod cache;
pub mod compose;

pub use builtin::{builtin_defaults, builtin_template};
pub use cache::StyleCache;
pub use compose::StyleComposer;
