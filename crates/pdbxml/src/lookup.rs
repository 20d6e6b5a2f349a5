// Element and `<tag name="...">` lookup over a parsed PDBXML tree.
// Lookups never fail: anything missing is simply absent.

use std::borrow::Cow;
use std::collections::HashMap;

use roxmltree::Node;

/// How a `tag@name` attribute is compared against the requested name
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TagMatch {
    #[default]
    CaseInsensitive,
    Exact,
}

impl TagMatch {
    fn normalize(self, name: &str) -> Cow<'_, str> {
        match self {
            TagMatch::CaseInsensitive => Cow::Owned(name.to_lowercase()),
            TagMatch::Exact => Cow::Borrowed(name),
        }
    }
}

/// Matches PDBXML element names, optionally restricted to one namespace URI
#[derive(Debug, Clone, Copy, Default)]
pub struct Elements<'o> {
    namespace: Option<&'o str>,
}

impl<'o> Elements<'o> {
    pub fn new(namespace: Option<&'o str>) -> Self {
        Self { namespace }
    }

    /// Element in the configured namespace, any local name
    pub fn in_namespace(&self, node: &Node) -> bool {
        node.is_element() && node.tag_name().namespace() == self.namespace
    }

    pub fn is(&self, node: &Node, name: &str) -> bool {
        self.in_namespace(node) && node.tag_name().name() == name
    }

    /// Immediate children called `name`, in document order
    pub fn children<'a, 'input>(
        self,
        parent: Node<'a, 'input>,
        name: &'static str,
    ) -> impl Iterator<Item = Node<'a, 'input>> {
        parent.children().filter(move |n| self.is(n, name))
    }

    /// Every element called `name` below `parent` (excluding `parent` itself), in document order
    pub fn descendants<'a, 'input>(
        self,
        parent: Node<'a, 'input>,
        name: &'static str,
    ) -> impl Iterator<Item = Node<'a, 'input>> {
        parent.descendants().skip(1).filter(move |n| self.is(n, name))
    }

    /// First immediate child called `name`
    pub fn first_child<'a, 'input>(
        self,
        parent: Node<'a, 'input>,
        name: &'static str,
    ) -> Option<Node<'a, 'input>> {
        self.children(parent, name).next()
    }
}

/// Look up the text of the first `<tag>` child of `parent` whose `name` matches.
///
/// Returns `None` when no tag matches or the first match has no text. Tags
/// without a `name` attribute never match.
pub fn find_tag<'a>(
    parent: Node<'a, '_>,
    elements: Elements,
    tag_match: TagMatch,
    name: &str,
) -> Option<&'a str> {
    let wanted = tag_match.normalize(name);
    elements
        .children(parent, "tag")
        .find(|tag| {
            tag.attribute("name")
                .is_some_and(|candidate| tag_match.normalize(candidate) == wanted)
        })
        .and_then(|tag| tag.text())
}

/// Normalized name -> text index of one parent's `<tag>` children.
///
/// Built once per parent so that a batch of fixed lookups does not rescan
/// (and re-lowercase) every candidate. Same answers as [`find_tag`].
#[derive(Debug)]
pub struct TagIndex<'a> {
    tag_match: TagMatch,
    entries: HashMap<String, Option<&'a str>>,
}

impl<'a> TagIndex<'a> {
    pub fn build(parent: Node<'a, '_>, elements: Elements, tag_match: TagMatch) -> Self {
        let mut entries = HashMap::new();
        for tag in elements.children(parent, "tag") {
            let Some(name) = tag.attribute("name") else {
                continue;
            };
            entries
                .entry(tag_match.normalize(name).into_owned())
                .or_insert(tag.text());
        }
        Self { tag_match, entries }
    }

    pub fn get(&self, name: &str) -> Option<&'a str> {
        self.entries
            .get(&*self.tag_match.normalize(name))
            .copied()
            .flatten()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
