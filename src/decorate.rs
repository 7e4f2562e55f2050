use kuchiki::NodeRef;

use crate::dom;

pub const CONTAINER_SELECTOR: &str = ".markdown-container";

#[derive(Debug, Clone, Copy)]
pub struct DecorationRule {
    pub selector: &'static str,
    pub classes: &'static [&'static str],
}

/// Bootstrap classes for rendered Markdown, each scoped under the container.
pub const RULES: &[DecorationRule] = &[
    DecorationRule {
        selector: "table",
        classes: &["table", "table-dark", "table-striped", "table-bordered"],
    },
    DecorationRule {
        selector: "th",
        classes: &["thead-light"],
    },
    DecorationRule {
        selector: ".toctitle",
        classes: &["h1"],
    },
    DecorationRule {
        selector: ".toc",
        classes: &["my-5", "fs-5"],
    },
    DecorationRule {
        selector: ".toc > ul",
        classes: &["pt-5"],
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleOutcome {
    pub selector: &'static str,
    pub matched: usize,
    pub changed: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecorationReport {
    pub rules: Vec<RuleOutcome>,
}

impl DecorationReport {
    pub fn matched(&self) -> usize {
        self.rules.iter().map(|r| r.matched).sum()
    }

    pub fn changed(&self) -> usize {
        self.rules.iter().map(|r| r.changed).sum()
    }
}

pub fn decorate(document: &NodeRef) -> DecorationReport {
    if document.select_first(CONTAINER_SELECTOR).is_err() {
        tracing::debug!("no {CONTAINER_SELECTOR} on page; nothing to decorate");
    }

    let mut report = DecorationReport::default();
    for rule in RULES {
        let scoped = format!("{CONTAINER_SELECTOR} {}", rule.selector);
        let mut outcome = RuleOutcome {
            selector: rule.selector,
            matched: 0,
            changed: 0,
        };
        for el in dom::select_all(document, &scoped) {
            outcome.matched += 1;
            if dom::add_classes(&el, rule.classes) > 0 {
                outcome.changed += 1;
            }
        }
        tracing::debug!(
            selector = rule.selector,
            matched = outcome.matched,
            changed = outcome.changed,
            "applied decoration rule"
        );
        report.rules.push(outcome);
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{parse_document, serialize_document};

    const MARKDOWN_PAGE: &str = r##"<html><body>
<div class="markdown-container">
  <div class="toc"><span class="toctitle">Table of Contents</span>
    <ul><li><a href="#intro">Intro</a><ul><li><a href="#more">More</a></li></ul></li></ul>
  </div>
  <h1 id="intro">Intro</h1>
  <table><thead><tr><th>A</th><th>B</th></tr></thead><tbody><tr><td>1</td><td>2</td></tr></tbody></table>
  <table><thead><tr><th>C</th></tr></thead><tbody><tr><td>3</td></tr></tbody></table>
</div>
<table id="outside"><tr><th>x</th></tr></table>
</body></html>"##;

    fn classes(doc: &NodeRef, selector: &str) -> Vec<String> {
        dom::select_all(doc, selector)
            .iter()
            .map(|el| {
                el.attributes
                    .borrow()
                    .get("class")
                    .unwrap_or("")
                    .to_string()
            })
            .collect()
    }

    #[test]
    fn each_rule_applies_its_classes() {
        let doc = parse_document(MARKDOWN_PAGE);
        let report = decorate(&doc);

        assert_eq!(
            classes(&doc, ".markdown-container table"),
            [
                "table table-dark table-striped table-bordered",
                "table table-dark table-striped table-bordered"
            ]
        );
        assert_eq!(
            classes(&doc, ".markdown-container th"),
            ["thead-light", "thead-light", "thead-light"]
        );
        assert_eq!(classes(&doc, ".toctitle"), ["toctitle h1"]);
        assert_eq!(classes(&doc, "div.toc"), ["toc my-5 fs-5"]);
        assert_eq!(classes(&doc, ".toc > ul"), ["pt-5"]);
        assert_eq!(classes(&doc, ".toc ul ul"), [""]);

        let matched: Vec<_> = report.rules.iter().map(|r| r.matched).collect();
        assert_eq!(matched, [2, 3, 1, 1, 1]);
        assert_eq!(report.changed(), 8);
    }

    #[test]
    fn elements_outside_container_are_untouched() {
        let doc = parse_document(MARKDOWN_PAGE);
        decorate(&doc);
        assert_eq!(classes(&doc, "#outside"), [""]);
        assert_eq!(classes(&doc, "#outside th"), [""]);
    }

    #[test]
    fn second_pass_adds_nothing() {
        let doc = parse_document(MARKDOWN_PAGE);
        decorate(&doc);
        let first = serialize_document(&doc).unwrap();

        let report = decorate(&doc);
        assert_eq!(report.matched(), 8);
        assert_eq!(report.changed(), 0);
        assert_eq!(serialize_document(&doc).unwrap(), first);
        assert!(!first.contains("table-dark table-dark"));
    }

    #[test]
    fn existing_classes_are_kept() {
        let doc = parse_document(
            r#"<div class="markdown-container"><table class="wide table"></table></div>"#,
        );
        decorate(&doc);
        assert_eq!(
            classes(&doc, "table"),
            ["wide table table-dark table-striped table-bordered"]
        );
    }

    #[test]
    fn empty_container_is_left_alone() {
        let html = r#"<html><head></head><body><div class="markdown-container"><p>plain</p></div></body></html>"#;
        let doc = parse_document(html);
        let before = serialize_document(&doc).unwrap();

        let report = decorate(&doc);
        assert_eq!(report.matched(), 0);
        assert_eq!(serialize_document(&doc).unwrap(), before);
    }

    #[test]
    fn page_without_container_is_a_no_op() {
        let doc = parse_document("<body><table><tr><th>x</th></tr></table></body>");
        let report = decorate(&doc);
        assert_eq!(report.matched(), 0);
        assert_eq!(classes(&doc, "table"), [""]);
    }
}
