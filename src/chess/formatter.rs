use super::diagram::{self, BRANCH_SCALE, Placement};
use super::directive::{has_diagram_directive, parse_marks};
use super::error::Result;
use super::line;
use super::nag;
use super::options::FormatOptions;
use super::types::{Game, GameTree, NodeId};
use std::collections::HashSet;

/// Number of `varN` colors defined in the document preamble.
pub const PALETTE_SIZE: usize = 6;

/// Per-game counter picking the palette color of each colored variation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColorCycle(usize);

impl ColorCycle {
    /// Palette index for the next variation; advances the counter.
    pub fn next_color(&mut self) -> usize {
        let color = self.0 % PALETTE_SIZE;
        self.0 += 1;
        color
    }

    pub fn count(&self) -> usize {
        self.0
    }

    pub fn reset(&mut self) {
        self.0 = 0;
    }
}

/// Walks a game tree and produces its LaTeX body.
///
/// State carried across the walk (palette position and which nodes already
/// have a board drawn) belongs to one game and is cleared by [`Self::begin_game`].
pub struct GameTreeFormatter {
    options: FormatOptions,
    colors: ColorCycle,
    diagrammed: HashSet<NodeId>,
}

impl GameTreeFormatter {
    pub fn new(options: FormatOptions) -> Self {
        Self {
            options,
            colors: ColorCycle::default(),
            diagrammed: HashSet::new(),
        }
    }

    pub fn begin_game(&mut self) {
        self.colors.reset();
        self.diagrammed.clear();
    }

    pub fn colors(&self) -> ColorCycle {
        self.colors
    }

    /// Format a whole game, starting from a fresh per-game state.
    ///
    /// Annotation codes and directives of every node are checked first, so a
    /// bad one fails the game even on a move that renders no text.
    pub fn format_game(&mut self, game: &Game) -> Result<String> {
        self.begin_game();
        validate(&game.tree)?;
        self.render(&game.tree, game.tree.root(), 0)
    }

    /// Format the subtree starting at `node`, nested `level` variations deep.
    pub fn render(&mut self, tree: &GameTree, node: NodeId, level: usize) -> Result<String> {
        if tree.node(node).is_end() {
            return Ok(String::new());
        }

        let mut out = String::new();
        let mut start = node;
        let mut opens_variation = true;

        loop {
            let run = straight_run(tree, start);
            let (Some(&first), Some(&branch)) = (run.first(), run.last()) else {
                return Ok(out);
            };

            if opens_variation && tree.node(first).parent.is_some() {
                out.push_str(&self.diagram(tree, first, Some(BRANCH_SCALE), Placement::Center)?);
            }

            out.push_str(&line::render(tree, &run, level, &self.options)?);

            let branch_node = tree.node(branch);
            if branch_node.is_end() {
                out.push_str(&self.diagram(tree, branch, Some(BRANCH_SCALE), Placement::FlushRight)?);
                return Ok(out);
            }

            if has_diagram_directive(&branch_node.comment) && !self.diagrammed.contains(&branch) {
                out.push_str(&self.diagram(tree, branch, None, Placement::Center)?);
            }

            // A run cut short by a directive resumes the same line.
            if let [next] = branch_node.variations.as_slice() {
                start = *next;
                opens_variation = false;
                continue;
            }

            self.render_variations(tree, branch, level, &mut out)?;
            return Ok(out);
        }
    }

    fn render_variations(
        &mut self,
        tree: &GameTree,
        branch: NodeId,
        level: usize,
        out: &mut String,
    ) -> Result<()> {
        let variations = &tree.node(branch).variations;
        let order = variations[1..].iter().chain(variations.first());
        let last = variations.len();

        for (i, &variation) in order.enumerate() {
            let index = i + 1;
            tracing::debug!(level, index, "rendering variation");
            let mut text = self.render(tree, variation, level + 1)?;

            if self.options.number_variations {
                text = format!("\\N{{{level}.{index}}} {text}");
            }

            if self.options.color && index != last {
                let color = self.colors.next_color();
                text = format!("{{\\color{{var{color}}}{text}}}");
            }

            out.push_str(&text);
        }

        Ok(())
    }

    fn diagram(
        &mut self,
        tree: &GameTree,
        node: NodeId,
        scale: Option<f64>,
        placement: Placement,
    ) -> Result<String> {
        self.diagrammed.insert(node);
        diagram::render(tree.node(node), &self.options, scale, placement)
    }
}

fn validate(tree: &GameTree) -> Result<()> {
    for node in tree.nodes() {
        nag::glyphs(&node.nags)?;
        parse_marks(&node.comment)?;
        parse_marks(&node.starting_comment)?;
    }
    Ok(())
}

/// Nodes from `start` up to the first branch point, terminal node or node
/// whose comment asks for arrows or marked squares, inclusive.
fn straight_run(tree: &GameTree, start: NodeId) -> Vec<NodeId> {
    let mut run = Vec::new();
    let mut current = start;

    loop {
        let node = tree.node(current);
        run.push(current);
        if node.variations.len() != 1 || has_diagram_directive(&node.comment) {
            return run;
        }
        current = node.variations[0];
    }
}
