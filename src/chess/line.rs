use super::directive::strip_commands;
use super::error::Result;
use super::moves::line_san;
use super::nag;
use super::options::FormatOptions;
use super::types::{GameTree, NodeId};

/// Render an unbranched run of moves, one paragraph per commented stretch.
///
/// A node with a comment closes its paragraph so the comment follows the
/// move it belongs to. Whatever is left after the last comment is flushed
/// as a final paragraph.
pub fn render(
    tree: &GameTree,
    run: &[NodeId],
    level: usize,
    options: &FormatOptions,
) -> Result<String> {
    let mut out = String::new();
    let mut start = 0;

    for (i, &id) in run.iter().enumerate() {
        if !tree.node(id).comment.is_empty() {
            out.push_str(&render_segment(tree, &run[start..=i], level, options)?);
            start = i + 1;
        }
    }
    out.push_str(&render_segment(tree, &run[start..], level, options)?);

    Ok(out)
}

fn render_segment(
    tree: &GameTree,
    segment: &[NodeId],
    level: usize,
    options: &FormatOptions,
) -> Result<String> {
    let segment = match segment.split_first() {
        Some((&first, rest)) if tree.node(first).mv.is_none() => rest,
        Some(_) => segment,
        None => return Ok(String::new()),
    };
    let (Some(&first_id), Some(&last_id)) = (segment.first(), segment.last()) else {
        return Ok(String::new());
    };

    let first = tree.node(first_id);
    let last = tree.node(last_id);
    let Some(parent) = first.parent else {
        return Ok(String::new());
    };

    let moves: Vec<_> = segment.iter().filter_map(|&id| tree.node(id).mv).collect();
    let mut text = line_san(&tree.node(parent).position, &moves);

    let glyphs = nag::glyphs(&first.nags)?;
    if !glyphs.is_empty() {
        let at = first_move_end(&text);
        text.insert_str(at, &glyphs);
    }

    let style = if first.main_line {
        "mainline"
    } else {
        "variation"
    };

    let mut out = String::from("\\par\n");
    let starting = strip_commands(&first.starting_comment);
    if !starting.is_empty() {
        out.push_str(&starting);
        out.push(' ');
    }
    out.push_str(&format!("\\{style}{{{text} }}"));

    let comment = strip_commands(&last.comment);
    if !comment.is_empty() {
        out.push(' ');
        out.push_str(&comment);
        out.push('\n');
    }

    if options.indent_variations {
        out = format!(
            "\\begin{{addmargin}}[{}em]{{0cm}}{out}\\end{{addmargin}}",
            2 * level
        );
    }

    Ok(out)
}

/// Byte offset just past the first move's SAN: after `1...e5`, or after the
/// second token of `1. e4`.
fn first_move_end(text: &str) -> usize {
    let black_first = text
        .split(' ')
        .next()
        .is_some_and(|token| token.contains("..."));
    let tokens = if black_first { 1 } else { 2 };

    text.match_indices(' ')
        .nth(tokens - 1)
        .map_or(text.len(), |(i, _)| i)
}
