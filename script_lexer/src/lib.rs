// Internal modules
pub mod config;
pub mod file_processor;
pub mod lexical;
#[macro_use]
pub mod logging;
pub mod tokens;
pub mod utils;

// Re-export key types for library consumers
pub use lexical::{tokenize, tokenize_stream, tokenize_strict, LexerError, LexicalOutput};
pub use tokens::{Token, TokenKind, TokenReader, TokenStream, TokenStreamError};
