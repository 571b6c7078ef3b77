use super::directive::parse_marks;
use super::error::Result;
use super::moves::{fen, move_squares};
use super::options::FormatOptions;
use super::types::MoveNode;
use std::fmt::Write;

pub const MAIN_LINE_SCALE: f64 = 0.95;
pub const SIDE_LINE_SCALE: f64 = 0.8;
pub const BRANCH_SCALE: f64 = 0.5;

/// Horizontal placement of a board; also the LaTeX environment wrapping it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Center,
    /// End of a line; drawn on a grayed board.
    FlushRight,
}

impl Placement {
    fn environment(self) -> &'static str {
        match self {
            Self::Center => "center",
            Self::FlushRight => "flushright",
        }
    }
}

/// Render the position at `node` as a `chessboard` block.
///
/// `scale` defaults to 0.95 on the main line and 0.8 elsewhere. Marks come
/// from the last move (when enabled) and from `[%cal]`/`[%csl]` directives in
/// the node's comment.
pub fn render(
    node: &MoveNode,
    options: &FormatOptions,
    scale: Option<f64>,
    placement: Placement,
) -> Result<String> {
    let scale = scale.unwrap_or(if node.main_line {
        MAIN_LINE_SCALE
    } else {
        SIDE_LINE_SCALE
    });

    let mut marks = String::new();

    if options.arrow_last_move
        && let Some((from, to)) = node.mv.and_then(move_squares)
    {
        let _ = write!(marks, ",pgfstyle=straightmove,markmoves={{{from}-{to}}}");
    }

    let requested = parse_marks(&node.comment)?;
    if !requested.arrows.is_empty() {
        marks.push_str(",pgfstyle=straightmove");
        for arrow in &requested.arrows {
            let _ = write!(
                marks,
                ",color={},markmoves={{{}-{}}}",
                arrow.color.name(),
                arrow.from,
                arrow.to
            );
        }
    }
    if !requested.highlights.is_empty() {
        marks.push_str(",pgfstyle=circle");
        for highlight in &requested.highlights {
            let _ = write!(
                marks,
                ",color={},markfields={}",
                highlight.color.name(),
                highlight.square
            );
        }
    }

    if placement == Placement::FlushRight {
        marks.push_str(",color=lightgray!60,colorbackboard");
    }

    let flip = if options.flip { ",inverse" } else { "" };
    let env = placement.environment();

    Ok(format!(
        "\\begin{{{env}}}\\scalebox{{{scale:.6}}}{{\\chessboard[setfen={},vmarginwidth=.3em{flip}{marks}]}}\\vspace{{1ex}}\\end{{{env}}}\n",
        fen(&node.position)
    ))
}
