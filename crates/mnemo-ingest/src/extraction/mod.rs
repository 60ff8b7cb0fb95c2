//! Structure extraction from source text.

mod lexical;

pub use lexical::LexicalExtractor;
