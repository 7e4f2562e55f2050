use anyhow::Context as _;
use kuchiki::traits::TendrilSink as _;
use kuchiki::{ElementData, NodeDataRef, NodeRef};

pub type Element = NodeDataRef<ElementData>;

pub fn parse_document(html: &str) -> NodeRef {
    kuchiki::parse_html().one(html)
}

pub fn serialize_document(document: &NodeRef) -> anyhow::Result<String> {
    let mut out = Vec::new();
    document.serialize(&mut out).context("serialize document")?;
    String::from_utf8(out).context("document html not utf-8")
}

pub fn body(document: &NodeRef) -> Option<Element> {
    document.select_first("body").ok()
}

pub fn element_by_id(document: &NodeRef, id: &str) -> Option<Element> {
    let nodes = document.select("[id]").ok()?;
    nodes
        .into_iter()
        .find(|node| node.attributes.borrow().get("id") == Some(id))
}

pub fn select_all(document: &NodeRef, selector: &str) -> Vec<Element> {
    match document.select(selector) {
        Ok(nodes) => nodes.collect(),
        Err(()) => {
            tracing::warn!(selector, "invalid css selector");
            Vec::new()
        }
    }
}

fn class_tokens(el: &ElementData) -> Vec<String> {
    let attrs = el.attributes.borrow();
    let mut tokens = Vec::<String>::new();
    for token in attrs.get("class").unwrap_or("").split_ascii_whitespace() {
        if !tokens.iter().any(|t| t == token) {
            tokens.push(token.to_string());
        }
    }
    tokens
}

fn write_class_tokens(el: &ElementData, tokens: &[String]) {
    el.attributes
        .borrow_mut()
        .insert("class", tokens.join(" "));
}

pub fn has_class(el: &ElementData, class: &str) -> bool {
    class_tokens(el).iter().any(|t| t == class)
}

/// Appends each missing class token. Returns how many were added; the `class`
/// attribute is left untouched when that is zero.
pub fn add_classes(el: &ElementData, classes: &[&str]) -> usize {
    let mut tokens = class_tokens(el);
    let mut added = 0;
    for class in classes {
        if !tokens.iter().any(|t| t == class) {
            tokens.push((*class).to_string());
            added += 1;
        }
    }
    if added > 0 {
        write_class_tokens(el, &tokens);
    }
    added
}

pub fn remove_classes(el: &ElementData, classes: &[&str]) -> usize {
    let mut tokens = class_tokens(el);
    let before = tokens.len();
    tokens.retain(|t| !classes.contains(&t.as_str()));
    let removed = before - tokens.len();
    if removed > 0 {
        write_class_tokens(el, &tokens);
    }
    removed
}

pub fn set_checked(el: &ElementData, checked: bool) {
    let mut attrs = el.attributes.borrow_mut();
    if checked {
        attrs.insert("checked", String::new());
    } else {
        attrs.remove("checked");
    }
}

pub fn is_checked(el: &ElementData) -> bool {
    el.attributes.borrow().contains("checked")
}
