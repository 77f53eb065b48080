//! Predicate-based element queries over a parsed document
//!
//! An [`ElementQuery`] is a set of predicates (tag name, attribute equality or
//! substring, class membership). It renders to a CSS selector list and is
//! compiled once into a [`CompiledQuery`], which is what the parser runs.

use scraper::{ElementRef, Selector};
use std::fmt;

use super::{DictError, DictResult};

/// Attribute predicate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrPredicate {
    Present { name: String },
    Equals { name: String, value: String },
    Contains { name: String, needle: String },
}

impl AttrPredicate {
    fn name(&self) -> &str {
        match self {
            Self::Present { name } | Self::Equals { name, .. } | Self::Contains { name, .. } => name,
        }
    }
}

impl fmt::Display for AttrPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Present { name } => write!(f, "[{name}]"),
            Self::Equals { name, value } => write!(f, "[{name}=\"{}\"]", escape_value(value)),
            Self::Contains { name, needle } => write!(f, "[{name}*=\"{}\"]", escape_value(needle)),
        }
    }
}

/// Element matching predicate set
///
/// All predicates must hold. `any_of_classes` is satisfied when the element
/// carries at least one of the listed classes (or the list is empty).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElementQuery {
    tag: Option<String>,
    classes: Vec<String>,
    any_of_classes: Vec<String>,
    attrs: Vec<AttrPredicate>,
}

impl ElementQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tag(mut self, name: impl Into<String>) -> Self {
        self.tag = Some(name.into());
        self
    }

    /// Require the element to carry `class`
    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    /// Require the element to carry at least one of `classes`
    pub fn any_class<I, S>(mut self, classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.any_of_classes.extend(classes.into_iter().map(Into::into));
        self
    }

    pub fn attr_present(mut self, name: impl Into<String>) -> Self {
        self.attrs.push(AttrPredicate::Present { name: name.into() });
        self
    }

    pub fn attr_eq(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.push(AttrPredicate::Equals {
            name: name.into(),
            value: value.into(),
        });
        self
    }

    pub fn attr_contains(mut self, name: impl Into<String>, needle: impl Into<String>) -> Self {
        self.attrs.push(AttrPredicate::Contains {
            name: name.into(),
            needle: needle.into(),
        });
        self
    }

    /// Compile the predicate set into a selector
    ///
    /// Names are checked first so that a marker such as `x>y` cannot smuggle a
    /// combinator into the rendered CSS; the rendered list must then parse.
    pub fn compile(&self) -> DictResult<CompiledQuery> {
        let css = self.to_string();

        if self.tag.as_deref().is_some_and(|t| !is_identifier(t)) {
            return Err(DictError::invalid_selector(&css, "tag name is not a CSS identifier"));
        }
        if let Some(class) = self
            .classes
            .iter()
            .chain(&self.any_of_classes)
            .find(|c| !is_identifier(c))
        {
            return Err(DictError::invalid_selector(
                &css,
                &format!("class name {class:?} is not a CSS identifier"),
            ));
        }
        if let Some(attr) = self.attrs.iter().find(|a| !is_identifier(a.name())) {
            return Err(DictError::invalid_selector(
                &css,
                &format!("attribute name {:?} is not a CSS identifier", attr.name()),
            ));
        }

        let selector = Selector::parse(&css)
            .map_err(|e| DictError::invalid_selector(&css, &e.to_string()))?;

        Ok(CompiledQuery { css, selector })
    }

    /// One compound selector: tag, required classes, attributes
    fn write_compound(&self, f: &mut fmt::Formatter<'_>, extra_class: Option<&str>) -> fmt::Result {
        write!(f, "{}", self.tag.as_deref().unwrap_or("*"))?;
        for class in self.classes.iter().map(String::as_str).chain(extra_class) {
            write!(f, ".{class}")?;
        }
        for attr in &self.attrs {
            write!(f, "{attr}")?;
        }
        Ok(())
    }
}

/// CSS rendering; a class whitelist expands into a selector list
impl fmt::Display for ElementQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.any_of_classes.is_empty() {
            return self.write_compound(f, None);
        }
        for (i, class) in self.any_of_classes.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            self.write_compound(f, Some(class))?;
        }
        Ok(())
    }
}

/// An [`ElementQuery`] compiled into a [`Selector`]
#[derive(Debug, Clone)]
pub struct CompiledQuery {
    css: String,
    selector: Selector,
}

impl CompiledQuery {
    pub fn css(&self) -> &str {
        &self.css
    }

    pub fn matches(&self, element: &ElementRef<'_>) -> bool {
        self.selector.matches(element)
    }

    /// All matching descendants of `scope` (excluding `scope`), in document order
    pub fn find_all<'a>(&self, scope: ElementRef<'a>) -> Vec<ElementRef<'a>> {
        scope.select(&self.selector).collect()
    }

    /// First matching descendant of `scope`
    pub fn find_first<'a>(&self, scope: ElementRef<'a>) -> Option<ElementRef<'a>> {
        scope.select(&self.selector).next()
    }
}

impl fmt::Display for CompiledQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.css)
    }
}

fn is_identifier(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
}

fn escape_value(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    const DOC: &str = r#"
        <div id="root">
            <a href="/word/view.do?wordid=ekw1" class="txt_searchword">one</a>
            <a href="/word/view.do?wordid=ekw2" class="txt_cleansch extra">two</a>
            <a href="/word/view.do?wordid=ekw3" class="txt_emph">three</a>
            <a href="/search.do?q=four" class="txt_searchword">four</a>
            <a class="txt_searchword">five</a>
            <a href="/say?&quot;hi&quot;" class="quoted">six</a>
        </div>
    "#;

    fn texts(elements: &[ElementRef<'_>]) -> Vec<String> {
        elements.iter().map(|e| e.text().collect::<String>()).collect()
    }

    fn compiled(query: ElementQuery) -> CompiledQuery {
        query.compile().unwrap()
    }

    #[test]
    fn test_attr_substring_and_class_whitelist() {
        let html = Html::parse_document(DOC);
        let query = compiled(
            ElementQuery::new()
                .tag("a")
                .attr_contains("href", "wordid")
                .any_class(["txt_searchword", "txt_cleansch"]),
        );

        let found = query.find_all(html.root_element());

        assert_eq!(texts(&found), vec!["one", "two"]);
    }

    #[test]
    fn test_required_class_and_attr_eq() {
        let html = Html::parse_document(DOC);
        let query = compiled(
            ElementQuery::new()
                .class("extra")
                .attr_eq("href", "/word/view.do?wordid=ekw2"),
        );

        assert_eq!(texts(&query.find_all(html.root_element())), vec!["two"]);
    }

    #[test]
    fn test_quoted_attribute_value() {
        let html = Html::parse_document(DOC);
        let query = compiled(ElementQuery::new().attr_contains("href", "\"hi\""));

        assert_eq!(texts(&query.find_all(html.root_element())), vec!["six"]);
    }

    #[test]
    fn test_find_first_excludes_scope_itself() {
        let html = Html::parse_document(r#"<div class="card"><div class="card">inner</div></div>"#);
        let card = compiled(ElementQuery::new().class("card"));
        let outer = card.find_first(html.root_element()).unwrap();

        let inner = card.find_first(outer).unwrap();

        assert_eq!(inner.text().collect::<String>(), "inner");
        assert!(card.find_first(inner).is_none());
        assert!(card.matches(&outer));
    }

    #[test]
    fn test_attr_present() {
        let html = Html::parse_document(DOC);
        let found = compiled(ElementQuery::new().tag("a").attr_present("href"))
            .find_all(html.root_element());
        assert_eq!(found.len(), 5);
    }

    #[test]
    fn test_compile_rejects_malformed_markers() {
        let result = ElementQuery::new().tag("a[").class("x>y").compile();
        assert!(matches!(result, Err(DictError::InvalidSelector { .. })));

        let result = ElementQuery::new().tag("ul").class("x>y").compile();
        assert!(matches!(result, Err(DictError::InvalidSelector { .. })));

        let result = ElementQuery::new().tag("ul").class("list search").compile();
        assert!(matches!(result, Err(DictError::InvalidSelector { .. })));

        assert!(ElementQuery::new().tag("").compile().is_err());
        assert!(ElementQuery::new().attr_present("href]").compile().is_err());
    }

    #[test]
    fn test_compile_reports_selector_parse_errors() {
        // Passes the name check but is not a valid CSS class selector
        let result = ElementQuery::new().tag("ul").class("1st").compile();

        match result {
            Err(DictError::InvalidSelector { selector, .. }) => assert_eq!(selector, "ul.1st"),
            other => panic!("expected InvalidSelector, got {other:?}"),
        }
    }

    #[test]
    fn test_display_renders_selector_list() {
        let query = ElementQuery::new()
            .tag("a")
            .attr_contains("href", "wordid")
            .any_class(["txt_searchword", "txt_cleansch"]);
        assert_eq!(
            query.to_string(),
            "a.txt_searchword[href*=\"wordid\"], a.txt_cleansch[href*=\"wordid\"]"
        );
        assert_eq!(compiled(query).css(), "a.txt_searchword[href*=\"wordid\"], a.txt_cleansch[href*=\"wordid\"]");
    }
}
