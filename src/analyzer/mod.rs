//! Analyzer module - SEO scoring engine

pub mod engine;
pub mod rules;
pub mod scoring;
pub mod text;

pub use engine::{AggregateStats, AnalysisEngine, FieldOverrides, SeoAnalyzer};
pub use scoring::ScoreCalculator;
