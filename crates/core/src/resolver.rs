//! The style cascade: selector matching, shorthand expansion and inheritance.
//!
//! Resolution runs in three steps over the content tree:
//! 1. every rule of the sheet is matched against the linearised tree
//!    (sections flattened depth-first, parent before children);
//! 2. each element receives the properties of its matching rules in sheet
//!    order, then its own inline `style` text;
//! 3. a top-down pass replaces every `inherit` with the parent's value.

use graphe_idf::{ContentDocument, ContentElement};
use graphe_style::{
    DeclarationParser, InlineDeclarations, Length, StyleRule, StyleSelector, StyleSheet, StyleValue,
};
use itertools::Itertools;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

type StyleProperties = BTreeMap<String, StyleValue>;

const MARGIN_SIDES: [&str; 4] = ["margin-top", "margin-right", "margin-bottom", "margin-left"];

/// An element in pre-order together with the index one past its last descendant.
struct Entry<'a> {
    element: &'a ContentElement,
    end: usize,
}

fn linearise<'a>(sections: &'a [ContentElement]) -> Vec<Entry<'a>> {
    enum Visit<'a> {
        Enter(&'a ContentElement),
        Exit(usize),
    }

    let mut entries = Vec::new();
    let mut stack: Vec<Visit<'a>> = sections.iter().rev().map(Visit::Enter).collect();
    while let Some(visit) = stack.pop() {
        match visit {
            Visit::Enter(element) => {
                let index = entries.len();
                entries.push(Entry { element, end: index + 1 });
                stack.push(Visit::Exit(index));
                stack.extend(element.subelements.iter().rev().map(Visit::Enter));
            }
            Visit::Exit(index) => entries[index].end = entries.len(),
        }
    }
    entries
}

/// Applies a style sheet and inline styles to content elements.
///
/// Inline `style` text is turned into properties by the injected
/// [`DeclarationParser`]; [`InlineDeclarations`] is used by default.
pub struct StyleResolver {
    declarations: Box<dyn DeclarationParser>,
}

impl Default for StyleResolver {
    fn default() -> Self {
        Self::new(InlineDeclarations)
    }
}

impl fmt::Debug for StyleResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StyleResolver").finish_non_exhaustive()
    }
}

impl StyleResolver {
    pub fn new(declarations: impl DeclarationParser + 'static) -> Self {
        Self {
            declarations: Box::new(declarations),
        }
    }

    pub fn resolve_document(&self, sheet: &StyleSheet, document: &mut ContentDocument) {
        self.resolve(sheet, &mut document.sections);
    }

    /// Resolves the properties of `sections` and everything below them.
    ///
    /// Running this twice on an already resolved tree overwrites values
    /// rather than merging them.
    pub fn resolve(&self, sheet: &StyleSheet, sections: &mut [ContentElement]) {
        let matches = self.match_rules(sheet, sections);
        self.apply(sections, sheet, &matches);
        cascade(sections);
    }

    /// For every element (by pre-order index), the indices of the rules that match it, in sheet order.
    fn match_rules(&self, sheet: &StyleSheet, sections: &[ContentElement]) -> Vec<Vec<usize>> {
        let entries = linearise(sections);

        let mut matches = vec![Vec::new(); entries.len()];
        for (rule_index, rule) in sheet.rules.iter().enumerate() {
            let selected = select(&entries, rule);
            log::debug!(
                "Style rule {} ({} selectors) matched {} elements",
                rule_index,
                rule.selectors.len(),
                selected.len()
            );
            for index in selected {
                matches[index].push(rule_index);
            }
        }
        matches
    }

    /// Visits elements in the same pre-order as [`linearise`], so the visit
    /// counter indexes `matches`.
    fn apply(&self, sections: &mut [ContentElement], sheet: &StyleSheet, matches: &[Vec<usize>]) {
        let mut stack: Vec<&mut ContentElement> = sections.iter_mut().rev().collect();
        let mut index = 0;
        while let Some(element) = stack.pop() {
            for &rule_index in &matches[index] {
                for property in &sheet.rules[rule_index].properties {
                    assign(&mut element.style_properties, &property.name, &property.value);
                }
            }
            index += 1;

            if !element.style.trim().is_empty() {
                match self.declarations.parse_declarations(&element.style) {
                    Ok(properties) => {
                        for property in &properties {
                            assign(&mut element.style_properties, &property.name, &property.value);
                        }
                    }
                    Err(e) => log::warn!(
                        "Ignoring inline style '{}' on {}: {}",
                        element.style,
                        element.kind.label(),
                        e
                    ),
                }
            }

            stack.extend(element.subelements.iter_mut().rev());
        }
    }
}

/// Narrows the whole linearised tree down by the rule's selector chain.
fn select(entries: &[Entry<'_>], rule: &StyleRule) -> Vec<usize> {
    let mut candidates: Vec<usize> = (0..entries.len()).collect();
    for selector in &rule.selectors {
        candidates = match selector {
            StyleSelector::ElementName(name) => candidates
                .into_iter()
                .filter(|&i| entries[i].element.kind.has_tag_name(name))
                .collect(),
            StyleSelector::Class(class) => candidates
                .into_iter()
                .filter(|&i| entries[i].element.has_style_class(class))
                .collect(),
            StyleSelector::Id(id) => candidates
                .into_iter()
                .find(|&i| entries[i].element.id == *id)
                .into_iter()
                .collect(),
            StyleSelector::Subelement => candidates
                .into_iter()
                .flat_map(|i| i + 1..entries[i].end)
                .unique()
                .collect(),
        };
        if candidates.is_empty() {
            break;
        }
    }
    candidates
}

/// Writes one property, expanding `page-size` and `margin` shorthands.
fn assign(properties: &mut StyleProperties, name: &str, value: &StyleValue) {
    let mut set = |key: &str, value: StyleValue| {
        log::trace!("Setting {} = {}", key, value);
        properties.insert(key.to_string(), value);
    };

    match (name, value) {
        ("page-size", StyleValue::LengthSet(lengths)) if lengths.len() == 2 => {
            set("page-width", StyleValue::Length(lengths[0]));
            set("page-height", StyleValue::Length(lengths[1]));
        }
        ("page-size", StyleValue::Inherit) => {
            set("page-width", StyleValue::Inherit);
            set("page-height", StyleValue::Inherit);
        }
        ("margin", StyleValue::Inherit) => {
            for side in MARGIN_SIDES {
                set(side, StyleValue::Inherit);
            }
        }
        ("margin", _) => match margin_sides(value) {
            Some(sides) => {
                for (side, length) in MARGIN_SIDES.into_iter().zip(sides) {
                    set(side, StyleValue::Length(length));
                }
            }
            None => set(name, value.clone()),
        },
        _ => set(name, value.clone()),
    }
}

/// Top, right, bottom and left for a 1, 2 or 4 length margin.
fn margin_sides(value: &StyleValue) -> Option<[Length; 4]> {
    match value.lengths()?.as_slice() {
        [all] => Some([*all; 4]),
        [vertical, horizontal] => Some([*vertical, *horizontal, *vertical, *horizontal]),
        [top, right, bottom, left] => Some([*top, *right, *bottom, *left]),
        _ => None,
    }
}

/// Replaces `inherit` values with the parent's resolved values, parents first.
///
/// Keys missing from an element are never added. An `inherit` with nothing to
/// inherit from is dropped.
fn cascade(sections: &mut [ContentElement]) {
    let mut stack: Vec<(&mut ContentElement, Option<Rc<StyleProperties>>)> =
        sections.iter_mut().rev().map(|section| (section, None)).collect();

    while let Some((element, parent)) = stack.pop() {
        let inherited: Vec<String> = element
            .style_properties
            .iter()
            .filter(|(_, value)| value.is_inherit())
            .map(|(key, _)| key.clone())
            .collect();

        for key in inherited {
            match parent.as_ref().and_then(|p| p.get(&key)) {
                Some(value) => {
                    element.style_properties.insert(key, value.clone());
                }
                None => {
                    log::debug!("No parent value for inherited '{}' on {}; dropping it", key, element.kind.label());
                    element.style_properties.remove(&key);
                }
            }
        }

        if element.subelements.is_empty() {
            continue;
        }
        let resolved = Rc::new(element.style_properties.clone());
        stack.extend(
            element
                .subelements
                .iter_mut()
                .rev()
                .map(|child| (child, Some(Rc::clone(&resolved)))),
        );
    }
}
