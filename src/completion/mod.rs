//! Completion engine: recognising sets and runs, and solving for Wild values.

pub mod pattern;

pub use pattern::{
    classify, completes_with, completion_type, is_ascending_run, is_descending_run, is_set,
    is_triad_complete, wild_value_for_completion, CompletionType,
};
