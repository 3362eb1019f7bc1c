pub mod annotator;
pub mod color;
pub mod config;
pub mod error;
pub mod highlights;
pub mod markup;
pub mod model;
pub mod notifier;
pub mod plugin;
pub mod rules;
pub mod script;
pub mod tracker;
