//! Common helpers shared by the parser and the domain projection

/// One top-level element of a possibly nested sequence: either a single value
/// or a group of values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Nested<T> {
    Item(T),
    Group(Vec<T>),
}

impl<T> IntoIterator for Nested<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        match self {
            Self::Item(value) => vec![value].into_iter(),
            Self::Group(values) => values.into_iter(),
        }
    }
}

impl<T> From<Vec<T>> for Nested<T> {
    fn from(values: Vec<T>) -> Self {
        Self::Group(values)
    }
}

/// Collapse exactly one level of nesting, preserving order.
///
/// Empty groups contribute nothing; any number of top-level groups is fine.
pub fn flatten<I>(nested: I) -> Vec<<I::Item as IntoIterator>::Item>
where
    I: IntoIterator,
    I::Item: IntoIterator,
{
    nested.into_iter().flatten().collect()
}

/// Trim and collapse every run of whitespace (newlines included) to one space.
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
