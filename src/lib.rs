//! # despool
//!
//! despool is a library for segmenting bulk statement print dumps: one large
//! plaintext blob, in which many customers' multi-page account statements are
//! concatenated back-to-back with embedded page markers, line-number footers,
//! and mailing-address blocks, is turned into an ordered document model of
//! pages, addresses, and per-account statements. Rendering the resulting
//! pages is left to an external consumer.

mod document;
pub mod parse;
pub mod utils;

pub use document::*;
