//! Arena-allocated game tree shared by both search strategies
//!
//! Nodes live in one growable `Vec` and refer to each other by [`NodeId`].
//! A parent owns its children in the sense that they are only reachable
//! through it; the child's `parent` index is a plain back-reference used by
//! MCTS backpropagation. Children of one expansion are allocated together, so
//! they always occupy a contiguous index range.

use crate::{board::PlayPosition, game_state::Position, utils, EngineError, Result};

/// Index of a node inside a [`GameTree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

/// Contiguous range of child ids produced by one expansion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Children {
    start: usize,
    end: usize,
}

impl Children {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn first(&self) -> Option<NodeId> {
        if self.is_empty() {
            None
        } else {
            Some(NodeId(self.start))
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = NodeId> {
        (self.start..self.end).map(NodeId)
    }
}

/// A game-state node
#[derive(Debug, Clone)]
pub struct Node {
    /// Position at this node
    pub position: Position,

    parent: Option<NodeId>,

    children: Option<Children>,

    /// Static evaluation, filled in once and never recomputed
    static_score: Option<i32>,

    /// Value from the most recent negamax visit, in the colour it was searched with
    pub score: Option<i32>,

    /// Number of MCTS rollouts backpropagated through this node
    pub visits: u64,

    /// Sum of rollout rewards, from the engine's side
    pub total_score: i64,
}

impl Node {
    fn new(position: Position, parent: Option<NodeId>) -> Self {
        Node {
            position,
            parent,
            children: None,
            static_score: None,
            score: None,
            visits: 0,
            total_score: 0,
        }
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Children, or `None` until the node is expanded
    pub fn children(&self) -> Option<Children> {
        self.children
    }

    pub fn is_expanded(&self) -> bool {
        self.children.is_some()
    }

    pub fn static_score(&self) -> Option<i32> {
        self.static_score
    }

    /// Play that produced this node; `None` only for a fresh root
    pub fn last_play(&self) -> Option<PlayPosition> {
        self.position.last_play()
    }

    /// Average rollout reward, from the engine's side
    pub fn mean_score(&self) -> f64 {
        utils::mean_score(self.total_score, self.visits)
    }
}

/// Arena of [`Node`]s rooted at [`GameTree::root`]
#[derive(Debug, Clone)]
pub struct GameTree {
    nodes: Vec<Node>,
    root: NodeId,
}

impl GameTree {
    /// Creates a tree holding only `position`
    pub fn new(position: Position) -> Self {
        GameTree {
            nodes: vec![Node::new(position, None)],
            root: NodeId(0),
        }
    }

    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    #[inline]
    pub fn get(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    /// Number of nodes in the arena
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).parent
    }

    pub fn children(&self, id: NodeId) -> Option<Children> {
        self.get(id).children
    }

    /// Materializes one ply of children if the node has none yet
    ///
    /// Returns the children and how many nodes were created by this call.
    /// Terminal nodes expand to an empty range.
    pub fn expand(&mut self, id: NodeId) -> (Children, usize) {
        if let Some(children) = self.get(id).children {
            return (children, 0);
        }

        let position = self.get(id).position.clone();
        let start = self.nodes.len();
        for play in position.legal_moves() {
            self.nodes.push(Node::new(position.child(play), Some(id)));
        }
        let children = Children {
            start,
            end: self.nodes.len(),
        };
        self.get_mut(id).children = Some(children);
        (children, children.len())
    }

    /// Returns the static evaluation of a node, computing it on first use
    pub fn static_score_with<F>(&mut self, id: NodeId, evaluate: F) -> i32
    where
        F: FnOnce(&Position) -> i32,
    {
        let node = self.get_mut(id);
        match node.static_score {
            Some(score) => score,
            None => {
                let score = evaluate(&node.position);
                node.static_score = Some(score);
                score
            }
        }
    }

    /// Finds the child of `id` reached by `play`, expanding `id` if needed
    pub fn advance(&mut self, id: NodeId, play: PlayPosition) -> Result<NodeId> {
        if self.get(id).position.is_terminal() {
            return Err(EngineError::GameOver);
        }
        let (children, _) = self.expand(id);
        children
            .iter()
            .find(|&child| self.get(child).last_play() == Some(play))
            .ok_or(EngineError::IllegalMove(play))
    }

    /// Iterates from `id` up to and including the root
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(Some(id), move |&node| self.parent(node))
    }

    /// Distance from the root to `id`
    pub fn depth(&self, id: NodeId) -> usize {
        self.ancestors(id).count() - 1
    }

    /// Discards everything outside the subtree of `id`, which becomes the root
    ///
    /// Surviving nodes are compacted to the front of the arena in breadth-first
    /// order, so each expansion stays contiguous. All previously handed out
    /// [`NodeId`]s are invalidated.
    pub fn reroot(&mut self, id: NodeId) -> NodeId {
        let old = std::mem::take(&mut self.nodes);
        let mut kept = Vec::with_capacity(old.len());

        let mut root = old[id.0].clone();
        root.parent = None;
        kept.push(root);

        // Each kept node still carries its old child range until it is visited.
        let mut index = 0;
        while index < kept.len() {
            if let Some(range) = kept[index].children {
                let start = kept.len();
                for child in range.iter() {
                    let mut node = old[child.0].clone();
                    node.parent = Some(NodeId(index));
                    kept.push(node);
                }
                kept[index].children = Some(Children {
                    start,
                    end: kept.len(),
                });
            }
            index += 1;
        }

        kept.shrink_to_fit();
        self.nodes = kept;
        self.root = NodeId(0);
        self.root
    }
}
