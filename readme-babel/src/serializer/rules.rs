//! Conversion rules and the rule set
//!
//! A [`ConversionRule`] pairs a predicate over an element with a replacement that builds the
//! element's Markdown from its already-converted children. A [`RuleSet`] keeps rules in
//! preference order; the first rule whose predicate matches wins and the generic conversion
//! is only used when none does.
//!
//! Rule sets are assembled once and moved into a [`MarkdownSerializer`]; nothing can register
//! into a serializer after it has been built.

use super::MarkdownSerializer;
use crate::dom::{Element, Node};

/// Where an element sits in the tree.
#[derive(Debug, Clone, Copy)]
pub struct NodeContext<'a> {
    pub element: &'a Element,
    pub parent: Option<&'a Element>,
    /// Position of `element` among all of the parent's children (text included).
    pub index: usize,
}

impl<'a> NodeContext<'a> {
    pub fn new(element: &'a Element, parent: Option<&'a Element>, index: usize) -> Self {
        Self {
            element,
            parent,
            index,
        }
    }

    /// A context for an element with no parent, e.g. a fragment root in tests.
    pub fn root(element: &'a Element) -> Self {
        Self::new(element, None, 0)
    }

    pub fn parent_is(&self, tag: &str) -> bool {
        self.parent.is_some_and(|parent| parent.is(tag))
    }

    /// Position among the parent's element children.
    pub fn element_index(&self) -> usize {
        match self.parent {
            Some(parent) => parent.children[..self.index.min(parent.children.len())]
                .iter()
                .filter(|node| matches!(node, Node::Element(_)))
                .count(),
            None => 0,
        }
    }

    pub fn next_element(&self) -> Option<&'a Element> {
        self.parent?
            .children
            .get(self.index + 1..)?
            .iter()
            .find_map(Node::as_element)
    }

    pub fn is_last_element(&self) -> bool {
        self.parent.is_some() && self.next_element().is_none()
    }
}

/// One element-to-Markdown conversion.
pub trait ConversionRule: Send + Sync {
    /// Name used in logs and diagnostics.
    fn name(&self) -> &'static str;

    fn matches(&self, ctx: &NodeContext<'_>) -> bool;

    /// Build the Markdown for `ctx.element`. `content` is the element's children, already
    /// converted; `serializer` allows rules to convert sub-trees on their own terms.
    fn replacement(
        &self,
        content: &str,
        ctx: &NodeContext<'_>,
        serializer: &MarkdownSerializer,
    ) -> String;
}

type Predicate = dyn Fn(&NodeContext<'_>) -> bool + Send + Sync;
type Replacement = dyn Fn(&str, &NodeContext<'_>, &MarkdownSerializer) -> String + Send + Sync;

/// A rule assembled from two closures.
pub struct FnRule {
    name: &'static str,
    predicate: Box<Predicate>,
    replacement: Box<Replacement>,
}

impl FnRule {
    pub fn new<P, R>(name: &'static str, predicate: P, replacement: R) -> Self
    where
        P: Fn(&NodeContext<'_>) -> bool + Send + Sync + 'static,
        R: Fn(&str, &NodeContext<'_>, &MarkdownSerializer) -> String + Send + Sync + 'static,
    {
        Self {
            name,
            predicate: Box::new(predicate),
            replacement: Box::new(replacement),
        }
    }
}

impl ConversionRule for FnRule {
    fn name(&self) -> &'static str {
        self.name
    }

    fn matches(&self, ctx: &NodeContext<'_>) -> bool {
        (self.predicate)(ctx)
    }

    fn replacement(
        &self,
        content: &str,
        ctx: &NodeContext<'_>,
        serializer: &MarkdownSerializer,
    ) -> String {
        (self.replacement)(content, ctx, serializer)
    }
}

/// Ordered collection of conversion rules.
///
/// # Examples
///
/// ```ignore
/// let rules = RuleSet::empty().with_rule(FnRule::new(
///     "mark",
///     |ctx| ctx.element.is("mark"),
///     |content, _, _| format!("=={content}=="),
/// ));
/// let serializer = MarkdownSerializer::new(rules, SerializeOptions::default());
/// ```
pub struct RuleSet {
    rules: Vec<Box<dyn ConversionRule>>,
}

impl RuleSet {
    /// A rule set with no rules; every element gets the generic conversion.
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// The built-in GitHub README rules, in preference order.
    pub fn builtin() -> Self {
        super::builtin::rules()
    }

    /// Append a rule with the lowest preference so far.
    pub fn with_rule<R: ConversionRule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Insert a rule ahead of every existing rule.
    pub fn with_rule_first<R: ConversionRule + 'static>(mut self, rule: R) -> Self {
        self.rules.insert(0, Box::new(rule));
        self
    }

    /// First rule matching `ctx`.
    pub fn find(&self, ctx: &NodeContext<'_>) -> Option<&dyn ConversionRule> {
        self.rules
            .iter()
            .map(|rule| rule.as_ref())
            .find(|rule| rule.matches(ctx))
    }

    /// Rule names in preference order.
    pub fn names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|rule| rule.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl std::fmt::Debug for RuleSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}
