//! Renderable node trees returned by group templates.
//!
//! A [`Node`] is the DOM-equivalent value a template hands back to the
//! widget: elements with children, text leaves, and optional activation
//! handlers. The widget treats an unhandled activation on a group label
//! as an expand/collapse gesture, so interactive sub-elements must stop
//! propagation (see [`Node::on_activate`]).

use std::fmt;
use std::rc::Rc;

/// Element or text content of a node.
#[derive(Debug, Clone)]
enum NodeKind {
    /// Element with a tag (e.g. "group-label", "action-button").
    Element { tag: String },
    /// Text leaf.
    Text { text: String },
}

/// Activation (click) handler attached to a node.
#[derive(Clone)]
struct ActivateHandler {
    run: Rc<dyn Fn()>,
    stop_propagation: bool,
}

/// A renderable DOM-equivalent node.
#[derive(Clone)]
pub struct Node {
    kind: NodeKind,
    children: Vec<Node>,
    handler: Option<ActivateHandler>,
}

/// Result of dispatching an activation through a node tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivationOutcome {
    /// At least one handler ran.
    pub handled: bool,
    /// A handler stopped propagation before the root was reached.
    pub contained: bool,
}

impl Node {
    /// Create an element node.
    pub fn element(tag: impl Into<String>) -> Self {
        Self {
            kind: NodeKind::Element { tag: tag.into() },
            children: Vec::new(),
            handler: None,
        }
    }

    /// Create a text leaf.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            kind: NodeKind::Text { text: text.into() },
            children: Vec::new(),
            handler: None,
        }
    }

    /// Append a child node.
    #[must_use]
    pub fn child(mut self, node: Node) -> Self {
        self.children.push(node);
        self
    }

    /// Attach an activation handler that stops propagation.
    ///
    /// Stopping propagation is the default because the surrounding
    /// widget interprets any activation that bubbles out of a group
    /// label as an expand/collapse gesture.
    #[must_use]
    pub fn on_activate(mut self, run: impl Fn() + 'static) -> Self {
        self.handler = Some(ActivateHandler {
            run: Rc::new(run),
            stop_propagation: true,
        });
        self
    }

    /// Let activations bubble past this node's handler.
    ///
    /// This reproduces the uncontained behavior (the widget will also
    /// see the activation and toggle collapse); tests use it to pin
    /// down the difference.
    #[must_use]
    pub fn bubbling(mut self) -> Self {
        if let Some(ref mut handler) = self.handler {
            handler.stop_propagation = false;
        }
        self
    }

    /// The element tag, if this is an element node.
    pub fn tag(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Element { tag } => Some(tag),
            NodeKind::Text { .. } => None,
        }
    }

    /// The text content, if this is a text leaf.
    pub fn text_content(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Text { text } => Some(text),
            NodeKind::Element { .. } => None,
        }
    }

    /// Child nodes.
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Whether this node carries an activation handler.
    pub fn has_handler(&self) -> bool {
        self.handler.is_some()
    }

    /// Resolve a child-index path to a node.
    pub fn node_at(&self, path: &[usize]) -> Option<&Node> {
        let mut node = self;
        for &index in path {
            node = node.children.get(index)?;
        }
        Some(node)
    }

    /// All visible text in document order, space-joined.
    pub fn visible_text(&self) -> String {
        let mut parts = Vec::new();
        self.collect_text(&mut parts);
        parts.join(" ")
    }

    fn collect_text(&self, parts: &mut Vec<String>) {
        if let NodeKind::Text { text } = &self.kind {
            if !text.is_empty() {
                parts.push(text.clone());
            }
        }
        for child in &self.children {
            child.collect_text(parts);
        }
    }

    /// Dispatch an activation at the node addressed by `path`.
    ///
    /// Handlers run from the target toward the root. The first handler
    /// that stops propagation ends the walk; an activation that reaches
    /// past the root is the widget's to interpret (collapse toggle).
    /// An unresolvable path is reported as unhandled.
    pub fn activate(&self, path: &[usize]) -> ActivationOutcome {
        let mut chain: Vec<&Node> = Vec::with_capacity(path.len() + 1);
        let mut node = self;
        chain.push(node);
        for &index in path {
            match node.children.get(index) {
                Some(child) => {
                    node = child;
                    chain.push(node);
                }
                None => {
                    return ActivationOutcome {
                        handled: false,
                        contained: false,
                    }
                }
            }
        }

        let mut outcome = ActivationOutcome {
            handled: false,
            contained: false,
        };
        for node in chain.iter().rev() {
            if let Some(ref handler) = node.handler {
                (handler.run)();
                outcome.handled = true;
                if handler.stop_propagation {
                    outcome.contained = true;
                    break;
                }
            }
        }
        outcome
    }

    /// Child-index paths of every node carrying a handler, in document
    /// order.
    pub fn activatable_paths(&self) -> Vec<Vec<usize>> {
        let mut paths = Vec::new();
        self.collect_activatable(&mut Vec::new(), &mut paths);
        paths
    }

    fn collect_activatable(&self, prefix: &mut Vec<usize>, paths: &mut Vec<Vec<usize>>) {
        if self.handler.is_some() {
            paths.push(prefix.clone());
        }
        for (index, child) in self.children.iter().enumerate() {
            prefix.push(index);
            child.collect_activatable(prefix, paths);
            prefix.pop();
        }
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("kind", &self.kind)
            .field("children", &self.children)
            .field("has_handler", &self.handler.is_some())
            .finish()
    }
}
