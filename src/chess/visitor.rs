use super::error::{Error, Result};
use super::types::{Game, GameTree, NodeId};
use pgn_reader::{Nag, RawComment, RawTag, SanPlus, Skip, Visitor};
use shakmaty::fen::Fen;
use shakmaty::{CastlingMode, Chess, Position};
use std::mem;
use std::ops::ControlFlow;

/// Streaming PGN visitor (pgn-reader) that keeps the full move tree.
///
/// Every SAN is resolved against the position it is played from, so each
/// node carries its own `Chess` position. Variations branch from the parent
/// of the last played move. An illegal move or unusable `FEN` header breaks
/// out of the record with [`Error::Malformed`].
#[derive(Default)]
pub struct GameTreeVisitor;

pub struct Movetext {
    headers: Vec<(String, String)>,
    tree: GameTree,
    current: NodeId,
    variation_stack: Vec<NodeId>,
    at_variation_start: bool,
    starting_comment: String,
}

impl GameTreeVisitor {
    pub fn new() -> Self {
        Self
    }

    fn starting_position(headers: &[(String, String)]) -> Result<Chess> {
        let Some((_, fen)) = headers.iter().find(|(k, _)| k == "FEN") else {
            return Ok(Chess::default());
        };

        let parsed = Fen::from_ascii(fen.as_bytes())
            .map_err(|e| Error::Malformed(format!("invalid FEN '{fen}': {e}")))?;
        parsed
            .into_position(CastlingMode::Standard)
            .map_err(|e| Error::Malformed(format!("illegal FEN position '{fen}': {e}")))
    }
}

fn append_comment(target: &mut String, text: &str) {
    let text = text.trim();
    if text.is_empty() {
        return;
    }
    if !target.is_empty() {
        target.push(' ');
    }
    target.push_str(text);
}

impl Visitor for GameTreeVisitor {
    type Tags = Vec<(String, String)>;
    type Movetext = Movetext;
    type Output = Result<Game>;

    fn begin_tags(&mut self) -> ControlFlow<Self::Output, Self::Tags> {
        ControlFlow::Continue(Vec::new())
    }

    fn tag(
        &mut self,
        tags: &mut Self::Tags,
        key: &[u8],
        value: RawTag<'_>,
    ) -> ControlFlow<Self::Output> {
        let key = String::from_utf8_lossy(key);
        if !tags.iter().any(|(k, _)| *k == key) {
            tags.push((
                key.into_owned(),
                String::from_utf8_lossy(value.as_bytes()).into_owned(),
            ));
        }
        ControlFlow::Continue(())
    }

    fn begin_movetext(&mut self, tags: Self::Tags) -> ControlFlow<Self::Output, Self::Movetext> {
        let start = match Self::starting_position(&tags) {
            Ok(pos) => pos,
            Err(e) => return ControlFlow::Break(Err(e)),
        };
        let tree = GameTree::new(start);
        let current = tree.root();

        ControlFlow::Continue(Movetext {
            headers: tags,
            tree,
            current,
            variation_stack: Vec::new(),
            at_variation_start: false,
            starting_comment: String::new(),
        })
    }

    fn san(&mut self, movetext: &mut Self::Movetext, san_plus: SanPlus) -> ControlFlow<Self::Output> {
        let parent = movetext.current;
        let mut pos = movetext.tree.node(parent).position.clone();

        let m = match san_plus.san.to_move(&pos) {
            Ok(m) => m,
            Err(e) => {
                return ControlFlow::Break(Err(Error::Malformed(format!(
                    "illegal move {san_plus} in position {}: {e}",
                    super::moves::fen(&pos)
                ))));
            }
        };
        pos.play_unchecked(m);

        let child = movetext.tree.add_variation(parent, m, pos);
        movetext.tree.node_mut(child).starting_comment = mem::take(&mut movetext.starting_comment);
        movetext.current = child;
        movetext.at_variation_start = false;
        ControlFlow::Continue(())
    }

    fn nag(&mut self, movetext: &mut Self::Movetext, nag: Nag) -> ControlFlow<Self::Output> {
        movetext.tree.node_mut(movetext.current).nags.insert(nag.0);
        ControlFlow::Continue(())
    }

    fn comment(
        &mut self,
        movetext: &mut Self::Movetext,
        comment: RawComment<'_>,
    ) -> ControlFlow<Self::Output> {
        let text = String::from_utf8_lossy(comment.as_bytes());
        if movetext.at_variation_start {
            append_comment(&mut movetext.starting_comment, &text);
        } else {
            let current = movetext.current;
            append_comment(&mut movetext.tree.node_mut(current).comment, &text);
        }
        ControlFlow::Continue(())
    }

    fn begin_variation(
        &mut self,
        movetext: &mut Self::Movetext,
    ) -> ControlFlow<Self::Output, Skip> {
        let Some(parent) = movetext.tree.node(movetext.current).parent else {
            tracing::warn!("skipping variation that precedes the first move");
            return ControlFlow::Continue(Skip(true));
        };

        movetext.variation_stack.push(movetext.current);
        movetext.current = parent;
        movetext.at_variation_start = true;
        movetext.starting_comment.clear();
        ControlFlow::Continue(Skip(false))
    }

    fn end_variation(&mut self, movetext: &mut Self::Movetext) -> ControlFlow<Self::Output> {
        if let Some(resume) = movetext.variation_stack.pop() {
            movetext.current = resume;
        }
        movetext.at_variation_start = false;
        movetext.starting_comment.clear();
        ControlFlow::Continue(())
    }

    fn end_game(&mut self, movetext: Self::Movetext) -> Self::Output {
        Ok(Game {
            headers: movetext.headers,
            tree: movetext.tree,
        })
    }
}
