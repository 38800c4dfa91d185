//! Token model and token stream
//!
//! The scanner in [`crate::lexical`] produces a `Vec<Token>`; the parser
//! consumes it through the [`TokenReader`] interface of [`TokenStream`].
//!
//! ## Token kinds
//!
//! | Kind         | Lexeme                        |
//! |--------------|-------------------------------|
//! | `Identifier` | letter, then letters/digits   |
//! | `IntLiteral` | one or more decimal digits    |
//! | `Int`        | the keyword `int`             |
//! | `Assignment` | `=`                           |
//! | `GT`         | `>`                           |
//! | `GE`         | `>=`                          |

pub mod token;
pub mod token_stream;

pub use token::{Token, TokenKind};
pub use token_stream::{TokenReader, TokenStream, TokenStreamError};
