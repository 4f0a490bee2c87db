//! Document-level analyses built on the NLP core.

pub mod sentiment;
pub mod similarity;
pub mod visualize;
