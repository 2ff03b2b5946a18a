pub mod admin;
pub mod components;
pub mod layout;
pub mod student;

// Re-export commonly used functions from layout
pub use layout::{page, render, titled};
