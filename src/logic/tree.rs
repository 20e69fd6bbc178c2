use std::collections::HashMap;

use super::{Direction, State};

pub(crate) type NodeId = usize;

#[derive(Debug)]
struct Node {
    state: State,
    parent: Option<(NodeId, Direction)>,
    g: u32,
    closed: bool,
}

/// Discovered states with parent links along the cheapest known route.
#[derive(Debug)]
pub(crate) struct SearchTree {
    nodes: Vec<Node>,
    index: HashMap<State, NodeId>,
}

impl SearchTree {
    pub(crate) fn new(root: State) -> (Self, NodeId) {
        let mut tree = SearchTree {
            nodes: Vec::new(),
            index: HashMap::new(),
        };
        let id = tree.push(root, None, 0);
        (tree, id)
    }

    fn push(&mut self, state: State, parent: Option<(NodeId, Direction)>, g: u32) -> NodeId {
        let id = self.nodes.len();
        self.index.insert(state.clone(), id);
        self.nodes.push(Node {
            state,
            parent,
            g,
            closed: false,
        });
        id
    }

    pub(crate) fn lookup(&self, state: &State) -> Option<NodeId> {
        self.index.get(state).copied()
    }

    pub(crate) fn insert(
        &mut self,
        state: State,
        parent: NodeId,
        direction: Direction,
        g: u32,
    ) -> NodeId {
        debug_assert!(!self.index.contains_key(&state));
        self.push(state, Some((parent, direction)), g)
    }

    /// Reroutes `id` through a cheaper parent.
    pub(crate) fn relax(&mut self, id: NodeId, parent: NodeId, direction: Direction, g: u32) {
        let node = &mut self.nodes[id];
        debug_assert!(g < node.g);
        node.parent = Some((parent, direction));
        node.g = g;
    }

    pub(crate) fn state(&self, id: NodeId) -> &State {
        &self.nodes[id].state
    }

    pub(crate) fn g(&self, id: NodeId) -> u32 {
        self.nodes[id].g
    }

    pub(crate) fn is_closed(&self, id: NodeId) -> bool {
        self.nodes[id].closed
    }

    pub(crate) fn close(&mut self, id: NodeId) {
        self.nodes[id].closed = true;
    }

    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Moves leading from the root to `id`.
    pub(crate) fn path_to(&self, id: NodeId) -> Vec<Direction> {
        let mut path = Vec::with_capacity(self.nodes[id].g as usize);
        let mut current = id;

        while let Some((parent, direction)) = self.nodes[current].parent {
            path.push(direction);
            current = parent;
        }

        path.reverse();
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::Board;

    #[test]
    fn path_walks_parent_links() {
        let mut board = Board::new(3).unwrap();
        let (mut tree, root) = SearchTree::new(board.state());

        board.apply_move(Direction::Up);
        let a = tree.insert(board.state(), root, Direction::Up, 1);
        board.apply_move(Direction::Left);
        let b = tree.insert(board.state(), a, Direction::Left, 2);

        assert_eq!(tree.len(), 3);
        assert_eq!(tree.lookup(&board.state()), Some(b));
        assert_eq!(tree.path_to(b), vec![Direction::Up, Direction::Left]);
        assert!(tree.path_to(root).is_empty());
    }

    #[test]
    fn relax_reroutes_path() {
        let mut board = Board::new(3).unwrap();
        let (mut tree, root) = SearchTree::new(board.state());

        board.apply_move(Direction::Up);
        let up = board.state();
        let a = tree.insert(up.clone(), root, Direction::Up, 1);
        board.apply_move(Direction::Left);
        let b = tree.insert(board.state(), a, Direction::Left, 5);

        tree.relax(b, root, Direction::Left, 1);
        assert_eq!(tree.g(b), 1);
        assert_eq!(tree.path_to(b), vec![Direction::Left]);
        assert_eq!(tree.state(a), &up);
    }

    #[test]
    fn closing_is_sticky() {
        let (mut tree, root) = SearchTree::new(State::goal(2));
        assert!(!tree.is_closed(root));
        tree.close(root);
        assert!(tree.is_closed(root));
    }
}
