pub mod action_plan;
pub mod grading;
pub mod handlers;
pub mod keywords;
pub mod normalizer;
pub mod pipeline;
pub mod prompts;
pub mod renderer;
pub mod suggestions;
