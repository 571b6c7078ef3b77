use shakmaty::{Chess, Move};
use smallvec::SmallVec;
use std::collections::BTreeSet;

/// Index of a node inside its [`GameTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

pub type Variations = SmallVec<[NodeId; 2]>;

/// Position reached after a move, with everything attached to it in the PGN.
#[derive(Debug, Clone)]
pub struct MoveNode {
    /// Move that led here; `None` only at the root.
    pub mv: Option<Move>,
    /// Back-link to the previous position, `None` only at the root.
    pub parent: Option<NodeId>,
    /// First entry continues the main line, the rest are side variations.
    pub variations: Variations,
    pub position: Chess,
    pub comment: String,
    /// Comment written before the first move of a variation.
    pub starting_comment: String,
    pub nags: BTreeSet<u8>,
    pub main_line: bool,
}

impl MoveNode {
    pub fn is_end(&self) -> bool {
        self.variations.is_empty()
    }
}

/// Arena holding every node of one game; node 0 is the root.
#[derive(Debug, Clone)]
pub struct GameTree {
    nodes: Vec<MoveNode>,
}

impl GameTree {
    pub fn new(start: Chess) -> Self {
        Self {
            nodes: vec![MoveNode {
                mv: None,
                parent: None,
                variations: Variations::new(),
                position: start,
                comment: String::new(),
                starting_comment: String::new(),
                nags: BTreeSet::new(),
                main_line: true,
            }],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn node(&self, id: NodeId) -> &MoveNode {
        &self.nodes[id.0]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut MoveNode {
        &mut self.nodes[id.0]
    }

    /// Every node in creation order, root first.
    pub fn nodes(&self) -> impl Iterator<Item = &MoveNode> {
        self.nodes.iter()
    }

    /// Number of moves across all lines; the root does not count.
    pub fn move_count(&self) -> usize {
        self.nodes.len() - 1
    }

    /// Append `mv` (already played into `position`) as the last variation of `parent`.
    pub fn add_variation(&mut self, parent: NodeId, mv: Move, position: Chess) -> NodeId {
        let id = NodeId(self.nodes.len());
        let parent_node = &self.nodes[parent.0];
        let main_line = parent_node.main_line && parent_node.variations.is_empty();

        self.nodes.push(MoveNode {
            mv: Some(mv),
            parent: Some(parent),
            variations: Variations::new(),
            position,
            comment: String::new(),
            starting_comment: String::new(),
            nags: BTreeSet::new(),
            main_line,
        });
        self.nodes[parent.0].variations.push(id);
        id
    }
}

/// One parsed game record.
#[derive(Debug, Clone)]
pub struct Game {
    /// Headers in file order; first occurrence of a key wins on lookup.
    pub headers: Vec<(String, String)>,
    pub tree: GameTree,
}

impl Game {
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Event name used as the section title; PGN's seven tag roster default is `?`.
    pub fn event(&self) -> &str {
        self.header("Event").unwrap_or("?")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shakmaty::{Position, san::San};

    fn play(tree: &mut GameTree, parent: NodeId, san: &str) -> NodeId {
        let pos = tree.node(parent).position.clone();
        let san: San = san.parse().unwrap();
        let m = san.to_move(&pos).unwrap();
        let mut next = pos;
        next.play_unchecked(m);
        tree.add_variation(parent, m, next)
    }

    #[test]
    fn test_root_is_main_line_without_move() {
        let tree = GameTree::new(Chess::default());
        let root = tree.node(tree.root());

        assert!(root.mv.is_none());
        assert!(root.parent.is_none());
        assert!(root.main_line);
        assert!(root.is_end());
        assert_eq!(tree.move_count(), 0);
    }

    #[test]
    fn test_first_child_inherits_main_line() {
        let mut tree = GameTree::new(Chess::default());
        let root = tree.root();
        let e4 = play(&mut tree, root, "e4");
        let d4 = play(&mut tree, root, "d4");
        let d5 = play(&mut tree, d4, "d5");

        assert!(tree.node(e4).main_line);
        assert!(!tree.node(d4).main_line);
        assert!(!tree.node(d5).main_line);
        assert_eq!(tree.node(root).variations.as_slice(), &[e4, d4]);
        assert_eq!(tree.node(d5).parent, Some(d4));
        assert_eq!(tree.move_count(), 3);
        assert_eq!(tree.nodes().filter(|n| n.main_line).count(), 2);
    }

    #[test]
    fn test_event_defaults_to_question_mark() {
        let game = Game {
            headers: vec![("Site".to_string(), "Internet".to_string())],
            tree: GameTree::new(Chess::default()),
        };

        assert_eq!(game.event(), "?");
        assert_eq!(game.header("Site"), Some("Internet"));
    }
}
