//! Defines the selector sequence a path expression compiles to.

use std::fmt;

/// One step applied to the working list during resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// Replaces the list with the document's root element.
    Root,
    /// Leaves the list as it is (`.`).
    Current,
    /// Replaces each element with its children, or with all its descendants when
    /// `any_depth` is set. The elements themselves are never included, so `//document`
    /// resolved from the root element finds nothing.
    Subelements { any_depth: bool },
    /// Replaces each element with its parent. Never produced by the parser.
    Superelement,
    /// Keeps elements with this tag name.
    ElementName(String),
    /// Replaces each element with its attributes.
    Attributes,
    /// Keeps attributes with this name.
    AttributeName(String),
}

/// A compiled path: an immutable, ordered selector sequence.
///
/// Resolution only reads the selectors, so one expression can be resolved
/// any number of times.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathExpression {
    selectors: Vec<Selector>,
}

impl PathExpression {
    pub fn new(selectors: Vec<Selector>) -> Self {
        Self { selectors }
    }

    pub fn selectors(&self) -> &[Selector] {
        &self.selectors
    }

    pub fn len(&self) -> usize {
        self.selectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selectors.is_empty()
    }
}

impl fmt::Display for PathExpression {
    /// Writes the expression back in path syntax.
    ///
    /// For expressions produced by [`crate::parse_path`], parsing the output
    /// yields the same selectors. Hand-built sequences the parser never emits,
    /// such as `[Root, Subelements { any_depth: false }, ElementName("p")]`
    /// (written `/p`), have no exact textual form.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let selectors = &self.selectors;
        for (i, selector) in selectors.iter().enumerate() {
            let previous = i.checked_sub(1).and_then(|j| selectors.get(j));
            let next = selectors.get(i + 1);
            match selector {
                Selector::Root => f.write_str("/")?,
                Selector::Current => f.write_str(".")?,
                Selector::Superelement => f.write_str("..")?,
                Selector::Subelements { any_depth } => {
                    // The leading `/` already written for `Root` doubles as the first slash.
                    let slash = match (previous == Some(&Selector::Root), any_depth) {
                        (true, false) => "",
                        (true, true) | (false, false) => "/",
                        (false, true) => "//",
                    };
                    f.write_str(slash)?;
                    if !matches!(next, Some(Selector::ElementName(_))) {
                        f.write_str("*")?;
                    }
                }
                Selector::ElementName(name) => f.write_str(name)?,
                Selector::Attributes => {
                    f.write_str("@")?;
                    if !matches!(next, Some(Selector::AttributeName(_))) {
                        f.write_str("*")?;
                    }
                }
                Selector::AttributeName(name) => f.write_str(name)?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_path;

    #[test]
    fn test_hand_built_child_step_has_no_exact_text() {
        let expression = PathExpression::new(vec![
            Selector::Root,
            Selector::Subelements { any_depth: false },
            Selector::ElementName("p".to_string()),
        ]);
        assert_eq!(expression.to_string(), "/p");
        let reparsed = parse_path("/p").unwrap();
        assert_eq!(reparsed.selectors(), &[Selector::Root, Selector::ElementName("p".to_string())]);
        assert_eq!(reparsed.to_string(), "/p");
    }
}
