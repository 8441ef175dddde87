//! Low-level nom parser functions for style values and inline declarations.
//!
//! Values are written the way style sheets and `style="..."` attributes write
//! them: `1cm`, `1cm 2cm`, `"Times New Roman"`, `bold`, `true`, `inherit`.

use crate::length::{Length, Unit};
use crate::stylesheet::StyleProperty;
use crate::value::StyleValue;
use nom::branch::alt;
use nom::bytes::complete::{is_not, tag, take_till, take_while1};
use nom::character::complete::{char, digit1, multispace0, space1};
use nom::combinator::{map, map_res, opt, recognize, value};
use nom::multi::{many1, separated_list0, separated_list1};
use nom::sequence::{delimited, pair, preceded, separated_pair, terminated};
use nom::{IResult, Parser};
use thiserror::Error;

/// Errors that can occur during style parsing.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StyleParseError {
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Invalid value for '{property}': {value}")]
    InvalidValue { property: String, value: String },

    #[error("Invalid style value: '{0}'")]
    InvalidStyleValue(String),
}

// --- Helper Parsers ---

fn ws<'a, F, O>(inner: F) -> impl Parser<&'a str, Output = O, Error = nom::error::Error<&'a str>>
where
    F: Parser<&'a str, Output = O, Error = nom::error::Error<&'a str>>,
{
    delimited(multispace0, inner, multispace0)
}

fn parse_f64(input: &str) -> IResult<&str, f64> {
    map_res(
        recognize(pair(
            opt(alt((char('+'), char('-')))),
            alt((
                recognize(pair(digit1, opt(pair(char('.'), digit1)))),
                recognize(pair(char('.'), digit1)),
            )),
        )),
        |s: &str| s.parse::<f64>(),
    )
    .parse(input)
}

/// Helper to run a nom parser and convert its result to a `Result<T, StyleParseError>`.
///
/// Surrounding whitespace is ignored; anything else left over is an error.
pub fn run_parser<'a, T, F>(mut parser: F, input: &'a str) -> Result<T, StyleParseError>
where
    F: Parser<&'a str, Output = T, Error = nom::error::Error<&'a str>>,
{
    match parser.parse(input.trim()) {
        Ok(("", result)) => Ok(result),
        Ok((rem, _)) => Err(StyleParseError::Parse(format!(
            "Parser did not consume all input. Remainder: '{}'",
            rem
        ))),
        Err(e) => Err(StyleParseError::Parse(e.to_string())),
    }
}

// --- Unit & Length Parsers ---

/// Parses a unit suffix. `mm` is tried before `m`.
pub fn parse_unit(input: &str) -> IResult<&str, Unit> {
    alt((
        value(Unit::Mm, tag("mm")),
        value(Unit::Cm, tag("cm")),
        value(Unit::Dm, tag("dm")),
        value(Unit::M, tag("m")),
        value(Unit::In, tag("in")),
        value(Unit::Pt, tag("pt")),
    ))
    .parse(input)
}

/// Parses a length with a mandatory unit (e.g., "12pt", "1in", "-2.5mm").
pub fn parse_length(input: &str) -> IResult<&str, Length> {
    map(pair(parse_f64, parse_unit), |(number, unit)| Length::new(number, unit)).parse(input)
}

/// Parses space-separated lengths (e.g., "1cm 2cm").
pub fn parse_length_list(input: &str) -> IResult<&str, Vec<Length>> {
    separated_list1(space1, parse_length).parse(input)
}

fn quoted_inner(input: &str) -> IResult<&str, &str> {
    alt((
        delimited(char('"'), take_till(|c: char| c == '"'), char('"')),
        delimited(char('\''), take_till(|c: char| c == '\''), char('\'')),
    ))
    .parse(input)
}

/// Parses a single- or double-quoted string, returning its contents.
pub fn parse_quoted(input: &str) -> IResult<&str, String> {
    map(quoted_inner, str::to_string).parse(input)
}

// --- Value Parsing ---

/// Interprets a textual style value.
///
/// Tried in order: `inherit`, a single length, a set of two or four lengths,
/// a quoted string, `true`/`false`, and finally a bare keyword. Text that
/// starts like a number but is not a valid length or length set is rejected.
pub fn parse_value(input: &str) -> Result<StyleValue, StyleParseError> {
    let text = input.trim();
    if text.is_empty() {
        return Err(StyleParseError::InvalidStyleValue(input.to_string()));
    }
    if text == "inherit" {
        return Ok(StyleValue::Inherit);
    }
    if let Ok(length) = run_parser(parse_length, text) {
        return Ok(StyleValue::Length(length));
    }
    if let Ok(lengths) = run_parser(parse_length_list, text) {
        return match lengths.len() {
            2 | 4 => Ok(StyleValue::LengthSet(lengths)),
            _ => Err(StyleParseError::InvalidStyleValue(text.to_string())),
        };
    }
    if let Ok(quoted) = run_parser(parse_quoted, text) {
        return Ok(StyleValue::Keyword(quoted));
    }
    match text {
        "true" => return Ok(StyleValue::Bool(true)),
        "false" => return Ok(StyleValue::Bool(false)),
        _ => {}
    }
    if text.starts_with(|c: char| c.is_ascii_digit() || matches!(c, '+' | '-' | '.')) {
        return Err(StyleParseError::InvalidStyleValue(text.to_string()));
    }
    Ok(StyleValue::Keyword(text.to_string()))
}

// --- Declaration Parsers ---

fn property_name(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_ascii_alphanumeric() || c == '-' || c == '_').parse(input)
}

/// Raw value text up to the next `;` outside quotes.
fn value_text(input: &str) -> IResult<&str, &str> {
    recognize(many1(alt((recognize(quoted_inner), is_not(";\"'"))))).parse(input)
}

fn declaration(input: &str) -> IResult<&str, (&str, &str)> {
    separated_pair(ws(property_name), char(':'), value_text).parse(input)
}

/// Parses `name: value; name: value;` into raw `(name, value)` pairs.
pub fn parse_declaration_list(input: &str) -> IResult<&str, Vec<(&str, &str)>> {
    terminated(
        preceded(multispace0, separated_list0(char(';'), declaration)),
        pair(opt(char(';')), multispace0),
    )
    .parse(input)
}

/// Turns inline style text into style properties.
pub trait DeclarationParser {
    fn parse_declarations(&self, text: &str) -> Result<Vec<StyleProperty>, StyleParseError>;
}

/// The default [`DeclarationParser`] for `style="..."` attributes.
#[derive(Debug, Clone, Copy, Default)]
pub struct InlineDeclarations;

impl DeclarationParser for InlineDeclarations {
    fn parse_declarations(&self, text: &str) -> Result<Vec<StyleProperty>, StyleParseError> {
        run_parser(parse_declaration_list, text)?
            .into_iter()
            .map(|(name, raw)| {
                let value = parse_value(raw).map_err(|_| StyleParseError::InvalidValue {
                    property: name.to_string(),
                    value: raw.trim().to_string(),
                })?;
                Ok(StyleProperty::new(name, value))
            })
            .collect()
    }
}
