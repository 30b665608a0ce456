// ============================================================================
// Meta Core - Menu Tree
// File: crates/meta-core/src/domain/menu_node.rs
// Description: In-memory menu hierarchy built from the flat menu table
// ============================================================================

use std::collections::HashMap;

use tracing::warn;
use uuid::Uuid;

use super::menu_record::MenuRecord;

/// Index of a node inside its [`MenuTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// One entry of the hierarchy. The root sentinel carries no record.
#[derive(Debug)]
pub struct MenuNode {
    record: Option<MenuRecord>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl MenuNode {
    fn root() -> Self {
        Self {
            record: None,
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn is_root(&self) -> bool {
        self.record.is_none()
    }

    pub fn record(&self) -> Option<&MenuRecord> {
        self.record.as_ref()
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

/// Answer of a visitor hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuNodeResult {
    /// Keep walking into the node
    Continue,
    /// Skip the node and its whole subtree
    Terminate,
}

/// Hooks called during [`MenuTree::traverse`].
pub trait MenuNodeVisitor {
    /// Called before entering any non-root node.
    fn pre_child_visit(&mut self, _tree: &MenuTree, _child: NodeId) -> MenuNodeResult {
        MenuNodeResult::Continue
    }

    /// Called for every entered node, root included.
    fn visit(&mut self, _tree: &MenuTree, _node: NodeId) -> MenuNodeResult {
        MenuNodeResult::Continue
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Link {
    Root,
    Node(NodeId),
    /// Parent reference points at a record that is not in the input
    Orphan,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    InProgress,
    Done,
}

/// Arena of menu nodes, rebuilt for every menu resolution.
#[derive(Debug)]
pub struct MenuTree {
    nodes: Vec<MenuNode>,
    index: HashMap<Uuid, NodeId>,
    detached: Vec<Uuid>,
    reparented: Vec<Uuid>,
}

impl MenuTree {
    pub const ROOT: NodeId = NodeId(0);

    /// Build the hierarchy from flat records.
    ///
    /// Children keep the input order. A record whose parent chain loops back
    /// onto itself is attached to the root instead. Records pointing at an
    /// unknown parent are left out together with their descendants, and
    /// duplicated identifiers keep the first occurrence.
    pub fn build(records: Vec<MenuRecord>) -> Self {
        let mut nodes = Vec::with_capacity(records.len() + 1);
        nodes.push(MenuNode::root());

        let mut index: HashMap<Uuid, NodeId> = HashMap::with_capacity(records.len());
        let mut detached = Vec::new();

        for record in records {
            if index.contains_key(&record.id) {
                warn!("Duplicate menu id {} ({}), keeping first occurrence", record.id, record.name);
                detached.push(record.id);
                continue;
            }
            index.insert(record.id, NodeId(nodes.len()));
            nodes.push(MenuNode {
                record: Some(record),
                parent: None,
                children: Vec::new(),
            });
        }

        let mut links: Vec<Link> = nodes
            .iter()
            .map(|node| match node.record.as_ref().and_then(|r| r.parent_id) {
                None => Link::Root,
                Some(parent_id) => index.get(&parent_id).map_or(Link::Orphan, |&id| Link::Node(id)),
            })
            .collect();

        let reparented = break_cycles(&nodes, &mut links);

        for i in 1..nodes.len() {
            let parent = match links[i] {
                Link::Root => Self::ROOT,
                Link::Node(parent) => parent,
                Link::Orphan => {
                    if let Some(record) = &nodes[i].record {
                        warn!(
                            "Menu {} references unknown parent {:?}, skipping its subtree",
                            record.name, record.parent_id
                        );
                        detached.push(record.id);
                    }
                    continue;
                }
            };
            nodes[i].parent = Some(parent);
            nodes[parent.0].children.push(NodeId(i));
        }

        Self {
            nodes,
            index,
            detached,
            reparented,
        }
    }

    pub fn root(&self) -> &MenuNode {
        &self.nodes[Self::ROOT.0]
    }

    pub fn node(&self, id: NodeId) -> &MenuNode {
        &self.nodes[id.0]
    }

    pub fn record(&self, id: NodeId) -> Option<&MenuRecord> {
        self.nodes[id.0].record()
    }

    /// Record of the enclosing menu, `None` for top-level menus.
    pub fn parent_record(&self, id: NodeId) -> Option<&MenuRecord> {
        self.nodes[id.0].parent.and_then(|p| self.record(p))
    }

    pub fn find(&self, id: &Uuid) -> Option<NodeId> {
        self.index.get(id).copied()
    }

    /// Number of menu nodes, root excluded.
    pub fn len(&self) -> usize {
        self.nodes.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Records left out of the hierarchy (unknown parent or duplicate id).
    pub fn detached(&self) -> &[Uuid] {
        &self.detached
    }

    /// Records moved under the root to break a parent cycle.
    pub fn reparented(&self) -> &[Uuid] {
        &self.reparented
    }

    /// Depth-first pre-order walk from the root.
    ///
    /// When `pre_child_visit` or `visit` answers [`MenuNodeResult::Terminate`]
    /// the children of that node are never reached.
    pub fn traverse<V: MenuNodeVisitor + ?Sized>(&self, visitor: &mut V) {
        let mut stack = vec![Self::ROOT];

        while let Some(id) = stack.pop() {
            if id != Self::ROOT && visitor.pre_child_visit(self, id) == MenuNodeResult::Terminate {
                continue;
            }
            if visitor.visit(self, id) == MenuNodeResult::Terminate {
                continue;
            }
            stack.extend(self.nodes[id.0].children.iter().rev().copied());
        }
    }
}

/// Walk each parent chain with an in-progress marker; the link that closes a
/// loop is redirected to the root. Returns the redirected record ids.
fn break_cycles(nodes: &[MenuNode], links: &mut [Link]) -> Vec<Uuid> {
    let mut marks = vec![Mark::Unvisited; nodes.len()];
    let mut reparented = Vec::new();
    let mut chain: Vec<usize> = Vec::new();

    for start in 1..nodes.len() {
        let mut current = start;
        chain.clear();

        loop {
            match marks[current] {
                Mark::Done => break,
                Mark::InProgress => {
                    if let Some(&closing) = chain.last() {
                        if let Some(record) = &nodes[closing].record {
                            warn!(
                                "Menu {} is part of a parent cycle, attaching it to the root",
                                record.name
                            );
                            reparented.push(record.id);
                        }
                        links[closing] = Link::Root;
                    }
                    break;
                }
                Mark::Unvisited => {
                    marks[current] = Mark::InProgress;
                    chain.push(current);
                    match links[current] {
                        Link::Node(parent) => current = parent.0,
                        Link::Root | Link::Orphan => break,
                    }
                }
            }
        }

        for &done in &chain {
            marks[done] = Mark::Done;
        }
    }

    reparented
}
