//! Defines the already-parsed style sheet: ordered rules of selectors and properties.
//!
//! In JSON a sheet looks like
//! `{"rules":[{"selectors":[{"element-name":"p"},"subelement"],"properties":[{"name":"margin","value":"1cm"}]}]}`.

use crate::value::StyleValue;
use serde::{Deserialize, Serialize};

/// One step of a rule's selector chain.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum StyleSelector {
    /// Keeps elements whose tag-name set contains the name.
    ElementName(String),
    /// Keeps elements carrying the class token.
    Class(String),
    /// Keeps the first element with this id.
    Id(String),
    /// Replaces the candidates with all of their descendants.
    Subelement,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct StyleProperty {
    pub name: String,
    pub value: StyleValue,
}

impl StyleProperty {
    pub fn new(name: impl Into<String>, value: impl Into<StyleValue>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct StyleRule {
    #[serde(default)]
    pub selectors: Vec<StyleSelector>,
    #[serde(default)]
    pub properties: Vec<StyleProperty>,
}

impl StyleRule {
    pub fn new(selectors: Vec<StyleSelector>, properties: Vec<StyleProperty>) -> Self {
        Self { selectors, properties }
    }
}

/// Rules in source order. Later rules override earlier ones.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct StyleSheet {
    #[serde(default)]
    pub rules: Vec<StyleRule>,
}

impl StyleSheet {
    pub fn new(rules: Vec<StyleRule>) -> Self {
        Self { rules }
    }

    pub fn push(&mut self, rule: StyleRule) {
        self.rules.push(rule);
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
