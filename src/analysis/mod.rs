pub mod analyzer;

#[cfg(test)]
mod tests;

pub use analyzer::*;
