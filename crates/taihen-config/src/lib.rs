//! Tokenizer, validator and section filter for taiHEN plugin configuration
//! files.
//!
//! A configuration lists module paths grouped under section headers:
//!
//! ```text
//! # comments and blank lines are ignored
//! *KERNEL
//! ur0:tai/kernel_plugin.skprx
//! *ALL
//! ux0:tai/everywhere.suprx
//! *!PCSE00000
//! ux0:tai/game_only.suprx
//! ```
//!
//! [`validate`] checks a document; [`for_each_path`] (or the lazy
//! [`PathFilter`]) streams the paths that apply to one section, honoring the
//! `ALL`/`KERNEL` rules and the `!` halt marker. Both are built on the
//! allocation-free [`Tokenizer`].

#![no_std]
extern crate alloc;

#[cfg(test)]
extern crate std;

mod error;
mod filter;
mod line;
mod options;
mod token;
mod tokenizer;
mod utf8;
mod validate;

#[cfg(test)]
mod tests;

pub use error::{TokenizeError, ValidationError};
pub use filter::{
    ALL_SECTION, KERNEL_SECTION, PathFilter, collect_paths, filter_paths, for_each_path,
    try_for_each_path,
};
pub use options::FilterOptions;
pub use token::{MAX_LINE_LENGTH, Payload, Token, TokenKind};
pub use tokenizer::Tokenizer;
pub use utf8::is_well_formed;
pub use validate::{check, validate};

pub use bstr::{BStr, BString};
