// Adapters layer: concrete implementations of the domain ports (http, terminal).

pub mod galaxy;

#[cfg(feature = "cli")]
pub mod prompt;
