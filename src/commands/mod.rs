pub mod show_support;

pub use show_support::show_support;
