//! A `nom`-based parser for path expressions.
//!
//! Tokens: `/` (child step, or the root when nothing precedes it), `//`
//! (descendant step), `@` (attribute step), `.` (current element, first token
//! only), names made of `[A-Za-z0-9_-]`, and the `*` wildcard.

use super::ast::{PathExpression, Selector};
use crate::error::XPathError;
use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::{tag, take_while1},
    character::complete::char,
    combinator::{eof, map, value},
    sequence::{preceded, terminated},
};

// --- Main Public Parser ---

/// Compiles `input` into a selector sequence.
///
/// A first step written as `/name` or `//name` is preceded by an implicit
/// [`Selector::Root`]; a lone `/` is just the root.
pub fn parse_path(input: &str) -> Result<PathExpression, XPathError> {
    let mut selectors = Vec::new();
    let mut rest = input;

    if let Ok((remaining, first)) = leading(rest) {
        selectors.push(first);
        rest = remaining;
    }

    while !rest.is_empty() {
        let offset = input.len() - rest.len();
        let (remaining, step) = step(rest).map_err(|_| XPathError::unexpected(input, offset))?;
        match step {
            Step::Root => {
                if !selectors.is_empty() {
                    return Err(XPathError::unexpected(input, offset));
                }
                selectors.push(Selector::Root);
            }
            Step::Child(target) => {
                if selectors.is_empty() {
                    selectors.push(Selector::Root);
                    match target {
                        Some(name) => selectors.push(Selector::ElementName(name.to_string())),
                        None => selectors.push(Selector::Subelements { any_depth: false }),
                    }
                } else {
                    selectors.push(Selector::Subelements { any_depth: false });
                    if let Some(name) = target {
                        selectors.push(Selector::ElementName(name.to_string()));
                    }
                }
            }
            Step::Descendant(target) => {
                if selectors.is_empty() {
                    selectors.push(Selector::Root);
                }
                selectors.push(Selector::Subelements { any_depth: true });
                if let Some(name) = target {
                    selectors.push(Selector::ElementName(name.to_string()));
                }
            }
            Step::Attribute(target) => {
                selectors.push(Selector::Attributes);
                if let Some(name) = target {
                    selectors.push(Selector::AttributeName(name.to_string()));
                }
            }
        }
        rest = remaining;
    }

    log::trace!("Parsed path '{}' into {} selectors", input, selectors.len());
    Ok(PathExpression::new(selectors))
}

// --- Combinators ---

/// A single step after the optional leading token. `None` targets are `*`.
#[derive(Debug, Clone, PartialEq)]
enum Step<'a> {
    Root,
    Child(Option<&'a str>),
    Descendant(Option<&'a str>),
    Attribute(Option<&'a str>),
}

fn name(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_ascii_alphanumeric() || c == '-' || c == '_').parse(input)
}

fn target(input: &str) -> IResult<&str, Option<&str>> {
    alt((value(None, char('*')), map(name, Some))).parse(input)
}

/// `.` or a bare element name, only accepted as the very first token.
fn leading(input: &str) -> IResult<&str, Selector> {
    alt((
        value(Selector::Current, char('.')),
        map(name, |n| Selector::ElementName(n.to_string())),
    ))
    .parse(input)
}

fn step(input: &str) -> IResult<&str, Step<'_>> {
    alt((
        map(preceded(tag("//"), target), Step::Descendant),
        value(Step::Root, terminated(char('/'), eof)),
        map(preceded(char('/'), target), Step::Child),
        map(preceded(char('@'), target), Step::Attribute),
    ))
    .parse(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sel(path: &str) -> Vec<Selector> {
        parse_path(path).unwrap().selectors().to_vec()
    }

    #[test]
    fn test_selector_counts_and_round_trip() {
        let cases = [
            ("/document/title", 4),
            ("/document/sections/section", 6),
            ("/document/sections/*", 5),
            ("/document//p", 4),
            ("/document//section//p", 6),
            ("/document//section@ptr", 6),
            ("/document//section@*", 5),
            ("/", 1),
            ("//p", 3),
            ("//*", 2),
            ("/*", 2),
            (".", 1),
            ("./p", 3),
            (".//p", 3),
            ("p/q", 3),
            ("@id", 2),
            ("", 0),
        ];
        for (path, count) in cases {
            let expression = parse_path(path).unwrap();
            assert_eq!(expression.len(), count, "path {path:?}");
            assert_eq!(expression.to_string(), path);
        }
    }

    #[test]
    fn test_absolute_path_selectors() {
        assert_eq!(
            sel("/document/title"),
            vec![
                Selector::Root,
                Selector::ElementName("document".into()),
                Selector::Subelements { any_depth: false },
                Selector::ElementName("title".into()),
            ]
        );
    }

    #[test]
    fn test_root_only_synthesized_for_empty_expression() {
        assert_eq!(
            sel("//p"),
            vec![
                Selector::Root,
                Selector::Subelements { any_depth: true },
                Selector::ElementName("p".into()),
            ]
        );
        assert_eq!(
            sel(".//p"),
            vec![
                Selector::Current,
                Selector::Subelements { any_depth: true },
                Selector::ElementName("p".into()),
            ]
        );
        assert_eq!(sel("/"), vec![Selector::Root]);
    }

    #[test]
    fn test_attribute_steps() {
        assert_eq!(
            sel("/a@*"),
            vec![Selector::Root, Selector::ElementName("a".into()), Selector::Attributes]
        );
        assert_eq!(
            sel("/a@id"),
            vec![
                Selector::Root,
                Selector::ElementName("a".into()),
                Selector::Attributes,
                Selector::AttributeName("id".into()),
            ]
        );
    }

    #[test]
    fn test_invalid_paths() {
        for path in ["///", "..", "#", "!", "/a/", "/a//", "/a#b", "*", "/a/.", "@", "a b"] {
            assert!(parse_path(path).is_err(), "path {path:?} should fail");
        }
    }

    #[test]
    fn test_error_reports_offset_and_context() {
        let err = parse_path("/document/title!and-a-long-tail-beyond-twenty").unwrap_err();
        match err {
            XPathError::UnexpectedInput { offset, context } => {
                assert_eq!(offset, 15);
                assert_eq!(context, "!and-a-long-tail-bey");
                assert_eq!(context.chars().count(), 20);
            }
        }
    }
}
