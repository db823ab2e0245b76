//! Semantic analysis: declaration, name resolution, and linking.
//!
//! Entry point is [`link`]; everything else here is a pass it drives.

mod constants;
mod declare;
pub(crate) mod dependencies;
mod link;
mod resolve;
mod symbol_table;
mod typedef_cycles;

#[cfg(test)]
mod typedef_cycles_tests;

pub use link::{LinkOptions, LinkOutput, link};
