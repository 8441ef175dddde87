pub mod length;
pub mod parsers;
pub mod stylesheet;
pub mod value;

pub use length::{Length, Unit};
pub use parsers::{DeclarationParser, InlineDeclarations, StyleParseError};
pub use stylesheet::{StyleProperty, StyleRule, StyleSelector, StyleSheet};
pub use value::StyleValue;
