//! Core domain types for dtk.
//!
//! - `Token` - a single design token leaf
//! - `Dictionary` - the transformed token set handed to formats
//! - `TokenGroup` / `TokenNode` - the nested, ordered token tree
//! - `Attributes` - the six positional CTI slots plus extras
//! - `Category` - token category and its branded TypeScript type name
//! - `Colour` - RGBA colour values for colour transforms

mod attributes;
mod category;
mod colour;
mod dictionary;
mod token;
mod tree;

pub use attributes::{Attributes, CTI_LABELS};
pub use category::{distinct_categories, type_name_collision, Category};
pub use colour::Colour;
pub use dictionary::Dictionary;
pub use token::Token;
pub use tree::{Collision, TokenGroup, TokenNode};
