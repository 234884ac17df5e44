// Crisis keyword detection

mod classifier;

pub use classifier::{CrisisMatch, KeywordClassifier, Severity};
