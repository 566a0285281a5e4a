//! Left-to-right element paths where a missing step ends the lookup.

use super::tree::Element;

/// One level of a lookup path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// First direct child `{ns}name`.
    Child(&'static str, &'static str),
    /// First descendant `{ns}name` in document order.
    Descendant(&'static str, &'static str),
}

impl Step {
    fn apply(self, element: Element<'_>) -> Option<Element<'_>> {
        match self {
            Step::Child(ns, name) => element.child(ns, name),
            Step::Descendant(ns, name) => element.descendant(ns, name),
        }
    }
}

/// Follow `path` from `start`. The first level that is missing yields `None`.
pub fn lookup<'a>(start: Element<'a>, path: &[Step]) -> Option<Element<'a>> {
    path.iter().try_fold(start, |current, step| step.apply(current))
}

/// Text at the end of `path`, or `""` when any level is missing.
pub fn text_at<'a>(start: Element<'a>, path: &[Step]) -> &'a str {
    lookup(start, path).map(Element::text).unwrap_or("")
}
