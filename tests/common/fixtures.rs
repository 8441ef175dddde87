use serde_json::{Value, json};

/// The smallest document the importer accepts.
pub const MINIMAL_DOCUMENT: &str =
    r#"<?xml version="1.0"?><document version="0.1"><title>T</title><sections/></document>"#;

/// Wraps section markup in a valid document.
pub fn document_with_sections(sections: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="utf-8"?>
<document version="0.1">
    <title>Fixture</title>
    <sections>{}</sections>
</document>"#,
        sections
    )
}

/// A report with headings, paragraphs, inline formatting and metadata.
pub fn report_document() -> String {
    r#"<?xml version="1.0" encoding="utf-8"?>
<document version="0.1">
    <title>Quarterly Report</title>
    <subtitle>Q3</subtitle>
    <keywords>finance, report</keywords>
    <contributors>
        <contributor><name>Ada</name></contributor>
    </contributors>
    <variables>
        <variable name="year" value="2024"/>
    </variables>
    <sections>
        <section id="summary" class="lead">
            <h1>Summary</h1>
            <p>Revenue grew <b>strongly</b> in <i>all <u>regions</u></i>.</p>
            <p class="note" style="margin: 2mm 4mm">Figures are preliminary.</p>
        </section>
        <section id="details" exclude="true">
            <h2>Details</h2>
            <div>
                <p>See <a url="https://example.org/data" title="Data">the data</a>.</p>
            </div>
        </section>
    </sections>
</document>"#
        .to_string()
}

/// A rule as the style sheet JSON writes it.
pub fn rule(selectors: Value, properties: Value) -> Value {
    json!({ "selectors": selectors, "properties": properties })
}

pub fn property(name: &str, value: Value) -> Value {
    json!({ "name": name, "value": value })
}

pub fn sheet(rules: Vec<Value>) -> Value {
    json!({ "rules": rules })
}

/// Base fonts on sections, paragraph spacing, and heading weights.
pub fn report_sheet() -> Value {
    sheet(vec![
        rule(
            json!([{ "element-name": "section" }]),
            json!([
                property("font-name", json!("\"Times New Roman\"")),
                property("font-height", json!("11pt")),
                property("page-size", json!("210mm 297mm")),
            ]),
        ),
        rule(
            json!([{ "element-name": "p" }]),
            json!([
                property("margin", json!("1cm")),
                property("font-name", json!("inherit")),
                property("font-height", json!("inherit")),
            ]),
        ),
        rule(
            json!([{ "element-name": "h1" }]),
            json!([property("font-weight", json!("bold"))]),
        ),
        rule(
            json!([{ "class": "lead" }, "subelement", { "element-name": "h1" }]),
            json!([property("font-weight", json!("black"))]),
        ),
        rule(
            json!([{ "id": "details" }]),
            json!([property("exclude-from-toc", json!(true))]),
        ),
    ])
}
