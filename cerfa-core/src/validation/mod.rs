pub mod rules;
mod steps;

pub use steps::{validate_step, validate_step_index};
