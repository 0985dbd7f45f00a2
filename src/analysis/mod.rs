//! Heuristic outline inference.
//!
//! The stages consume the same read-only inputs, the block sequence and the
//! per-document [`DocumentStats`] baselines, and are combined by
//! [`OutlineBuilder`] in a single forward scan. Title extraction is an
//! independent consumer of the same pair.

mod builder;
mod classifier;
mod level;
mod lexicon;
mod stats;
mod title;

pub use builder::OutlineBuilder;
pub use classifier::HeadingClassifier;
pub use level::LevelAssigner;
pub use lexicon::{BoilerplateLexicon, HeadingLexicon, LevelLexicon, TitleLexicon};
pub use stats::DocumentStats;
pub use title::{extract_title, UNTITLED};
