//! Keyboard focus containment for modal surfaces.
//!
//! Works over [`ElementTree`], a small arena model of a document: enough
//! structure to decide which elements can take focus and in which order.

const NATIVE_INTERACTIVE_TAGS: [&str; 4] = ["button", "input", "select", "textarea"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementId(usize);

#[derive(Debug, Clone, Default)]
pub struct Element {
    pub tag: String,
    pub disabled: bool,
    pub hidden: bool,
    pub aria_hidden: bool,
    pub tab_index: Option<i32>,
    pub href: Option<String>,
    attached: bool,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
}

impl Element {
    pub fn new(tag: &str) -> Self {
        Element {
            tag: tag.to_ascii_lowercase(),
            ..Default::default()
        }
    }

    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    pub fn aria_hidden(mut self) -> Self {
        self.aria_hidden = true;
        self
    }

    pub fn tab_index(mut self, index: i32) -> Self {
        self.tab_index = Some(index);
        self
    }

    pub fn href(mut self, href: &str) -> Self {
        self.href = Some(href.to_string());
        self
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    fn is_native_interactive(&self) -> bool {
        NATIVE_INTERACTIVE_TAGS.contains(&self.tag.as_str()) || self.href.is_some()
    }

    pub fn is_focusable(&self) -> bool {
        if self.disabled || self.hidden || self.aria_hidden {
            return false;
        }
        self.is_native_interactive() || self.tab_index.is_some_and(|i| i >= 0)
    }
}

/// Arena-backed element tree with a single focused element.
#[derive(Debug, Clone)]
pub struct ElementTree {
    elements: Vec<Element>,
    focused: Option<ElementId>,
}

impl Default for ElementTree {
    fn default() -> Self {
        Self::new()
    }
}

impl ElementTree {
    pub fn new() -> Self {
        let mut body = Element::new("body");
        body.attached = true;
        ElementTree {
            elements: vec![body],
            focused: None,
        }
    }

    pub fn root(&self) -> ElementId {
        ElementId(0)
    }

    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(id.0)
    }

    /// Appends `element` as the last child of `parent`.
    pub fn append(&mut self, parent: ElementId, mut element: Element) -> ElementId {
        let id = ElementId(self.elements.len());
        element.parent = Some(parent);
        element.attached = self.get(parent).is_some_and(Element::is_attached);
        element.children.clear();
        self.elements.push(element);
        if let Some(p) = self.elements.get_mut(parent.0) {
            p.children.push(id);
        }
        id
    }

    /// Removes the subtree rooted at `id` from the document. Focus inside it
    /// is dropped.
    pub fn detach(&mut self, id: ElementId) {
        if id == self.root() {
            return;
        }
        if let Some(parent) = self.get(id).and_then(|e| e.parent) {
            if let Some(p) = self.elements.get_mut(parent.0) {
                p.children.retain(|child| *child != id);
            }
        }
        let subtree = self.subtree(id);
        for node in &subtree {
            if let Some(e) = self.elements.get_mut(node.0) {
                e.attached = false;
            }
        }
        if self.focused.is_some_and(|f| subtree.contains(&f)) {
            self.focused = None;
        }
    }

    pub fn focused(&self) -> Option<ElementId> {
        self.focused
    }

    /// Moves focus to `id`. Detached elements cannot take focus.
    pub fn focus(&mut self, id: ElementId) -> bool {
        if self.get(id).is_some_and(Element::is_attached) {
            self.focused = Some(id);
            true
        } else {
            false
        }
    }

    pub fn blur(&mut self) {
        self.focused = None;
    }

    /// `id` and all its descendants in document order.
    fn subtree(&self, id: ElementId) -> Vec<ElementId> {
        let mut order = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            order.push(current);
            if let Some(e) = self.get(current) {
                stack.extend(e.children.iter().rev());
            }
        }
        order
    }

    /// Focusable descendants of `container` in document order. The
    /// container itself is excluded.
    pub fn focusable_within(&self, container: ElementId) -> Vec<ElementId> {
        self.subtree(container)
            .into_iter()
            .skip(1)
            .filter(|id| self.get(*id).is_some_and(Element::is_focusable))
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabOutcome {
    /// Focus moved to the next element in order.
    Moved,
    /// Focus was at an edge and wrapped to the opposite end.
    Wrapped,
    /// Nothing focusable inside the container.
    Ignored,
}

/// Active focus containment over one container.
#[derive(Debug)]
pub struct FocusTrap {
    container: ElementId,
    previous: Option<ElementId>,
}

impl FocusTrap {
    /// Starts trapping focus inside `container`, remembering what was
    /// focused before.
    pub fn activate(tree: &ElementTree, container: ElementId) -> Self {
        FocusTrap {
            container,
            previous: tree.focused(),
        }
    }

    pub fn container(&self) -> ElementId {
        self.container
    }

    pub fn previous(&self) -> Option<ElementId> {
        self.previous
    }

    /// Tab (or Shift+Tab when `shift`) inside the trap.
    pub fn handle_tab(&self, tree: &mut ElementTree, shift: bool) -> TabOutcome {
        let focusable = tree.focusable_within(self.container);
        let (Some(&first), Some(&last)) = (focusable.first(), focusable.last()) else {
            return TabOutcome::Ignored;
        };

        let position = tree
            .focused()
            .and_then(|f| focusable.iter().position(|id| *id == f));

        let (target, outcome) = match (position, shift) {
            (Some(i), false) if focusable[i] == last => (first, TabOutcome::Wrapped),
            (Some(i), true) if focusable[i] == first => (last, TabOutcome::Wrapped),
            (Some(i), false) => (focusable[i + 1], TabOutcome::Moved),
            (Some(i), true) => (focusable[i - 1], TabOutcome::Moved),
            // Focus escaped the container; pull it back in.
            (None, false) => (first, TabOutcome::Moved),
            (None, true) => (last, TabOutcome::Moved),
        };

        tree.focus(target);
        outcome
    }

    /// Ends the trap. Focus returns to the previously focused element only
    /// if it is still in the document.
    pub fn deactivate(self, tree: &mut ElementTree) -> bool {
        match self.previous {
            Some(previous) => tree.focus(previous),
            None => false,
        }
    }
}
