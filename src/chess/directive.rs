//! Diagram directives embedded in PGN comments.
//!
//! Two commands are understood: `[%cal Ge2e4,Rd1h5]` draws arrows and
//! `[%csl Ge4,Rd5]` circles squares. The leading letter of every entry is a
//! color code; only `G` and `R` exist. Anything else inside these commands
//! is rejected instead of dropped, since a missing mark silently changes what
//! the diagram says.

use super::error::{Error, Result};
use shakmaty::Square;
use std::sync::LazyLock;

static COMMAND_RE: LazyLock<regex::Regex> = LazyLock::new(|| {
    regex::Regex::new(r"\[%([A-Za-z]+)([^\]]*)\]").expect("valid comment command regex")
});

static WHITESPACE_RE: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r"\s+").expect("valid whitespace regex"));

const ARROW_COMMAND: &str = "cal";
const SQUARE_COMMAND: &str = "csl";
const ARROW_PREFIX: &str = "[%cal";
const SQUARE_PREFIX: &str = "[%csl";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkColor {
    Green,
    Red,
}

impl MarkColor {
    fn from_code(code: char) -> Result<Self> {
        match code {
            'G' => Ok(Self::Green),
            'R' => Ok(Self::Red),
            other => Err(Error::UnknownColor(other)),
        }
    }

    /// xcolor name used in the board options.
    pub fn name(self) -> &'static str {
        match self {
            Self::Green => "green",
            Self::Red => "red",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arrow {
    pub color: MarkColor,
    pub from: Square,
    pub to: Square,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Highlight {
    pub color: MarkColor,
    pub square: Square,
}

/// Marks requested by one comment, in the order they were written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Marks {
    pub arrows: Vec<Arrow>,
    pub highlights: Vec<Highlight>,
}

pub fn has_diagram_directive(comment: &str) -> bool {
    directive_starts(comment).next().is_some()
}

/// Arrows and marked squares requested by `comment`.
///
/// Every `[%cal` or `[%csl` in the comment must open a complete block; an
/// unterminated or misspelled one is an error like any other bad entry.
pub fn parse_marks(comment: &str) -> Result<Marks> {
    let mut marks = Marks::default();
    let mut parsed = Vec::new();

    for caps in COMMAND_RE.captures_iter(comment) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        let directive = whole.as_str();
        let args = &caps[2];
        match &caps[1] {
            ARROW_COMMAND => {
                parsed.push(whole.start());
                for entry in entries(directive, args)? {
                    marks.arrows.push(parse_arrow(directive, entry)?);
                }
            }
            SQUARE_COMMAND => {
                parsed.push(whole.start());
                for entry in entries(directive, args)? {
                    marks.highlights.push(parse_highlight(directive, entry)?);
                }
            }
            _ => {}
        }
    }

    if let Some(start) = directive_starts(comment).find(|start| !parsed.contains(start)) {
        return Err(malformed(comment[start..].trim_end(), "unterminated command"));
    }

    Ok(marks)
}

/// Comment text meant for the reader: every `[%...]` command removed and
/// whitespace collapsed.
pub fn strip_commands(comment: &str) -> String {
    let stripped = COMMAND_RE.replace_all(comment, " ");
    WHITESPACE_RE.replace_all(stripped.trim(), " ").into_owned()
}

fn directive_starts(comment: &str) -> impl Iterator<Item = usize> + '_ {
    [ARROW_PREFIX, SQUARE_PREFIX]
        .into_iter()
        .flat_map(move |prefix| comment.match_indices(prefix).map(|(start, _)| start))
}

fn entries<'a>(directive: &str, args: &'a str) -> Result<Vec<&'a str>> {
    let list: Vec<&str> = args.split(',').map(str::trim).collect();
    if list.iter().any(|entry| entry.is_empty()) {
        return Err(malformed(directive, "empty entry"));
    }
    Ok(list)
}

fn parse_arrow(directive: &str, entry: &str) -> Result<Arrow> {
    let (color, squares) = split_color(directive, entry)?;
    if squares.len() != 4 || !squares.is_ascii() {
        return Err(malformed(
            directive,
            &format!("arrow '{entry}' must be a color and two squares"),
        ));
    }

    Ok(Arrow {
        color,
        from: parse_square(directive, &squares[..2])?,
        to: parse_square(directive, &squares[2..])?,
    })
}

fn parse_highlight(directive: &str, entry: &str) -> Result<Highlight> {
    let (color, square) = split_color(directive, entry)?;
    if square.len() != 2 {
        return Err(malformed(
            directive,
            &format!("square mark '{entry}' must be a color and one square"),
        ));
    }

    Ok(Highlight {
        color,
        square: parse_square(directive, square)?,
    })
}

fn split_color<'a>(directive: &str, entry: &'a str) -> Result<(MarkColor, &'a str)> {
    let mut chars = entry.chars();
    let code = chars
        .next()
        .ok_or_else(|| malformed(directive, "empty entry"))?;
    Ok((MarkColor::from_code(code)?, chars.as_str()))
}

fn parse_square(directive: &str, text: &str) -> Result<Square> {
    text.parse::<Square>()
        .map_err(|_| malformed(directive, &format!("'{text}' is not a square")))
}

fn malformed(directive: &str, reason: &str) -> Error {
    Error::Directive {
        directive: directive.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_arrow() {
        let marks = parse_marks("[%cal Ge2e4] good move").unwrap();

        assert_eq!(
            marks.arrows,
            vec![Arrow {
                color: MarkColor::Green,
                from: Square::E2,
                to: Square::E4,
            }]
        );
        assert!(marks.highlights.is_empty());
    }

    #[test]
    fn test_parse_arrows_and_squares() {
        let marks = parse_marks("plan [%csl Rd5,Ge4] with [%cal Gf3d4, Rc6d4]").unwrap();

        assert_eq!(marks.arrows.len(), 2);
        assert_eq!(marks.arrows[1].color, MarkColor::Red);
        assert_eq!(marks.arrows[1].from, Square::C6);
        assert_eq!(
            marks.highlights,
            vec![
                Highlight {
                    color: MarkColor::Red,
                    square: Square::D5,
                },
                Highlight {
                    color: MarkColor::Green,
                    square: Square::E4,
                },
            ]
        );
    }

    #[test]
    fn test_other_commands_are_not_marks() {
        let marks = parse_marks("[%clk 0:03:00] [%eval 0.3]").unwrap();
        assert_eq!(marks, Marks::default());
    }

    #[test]
    fn test_unknown_color_is_rejected() {
        let err = parse_marks("[%cal Ye2e4]").unwrap_err();
        assert!(matches!(err, Error::UnknownColor('Y')));
    }

    #[test]
    fn test_bad_square_is_rejected() {
        let err = parse_marks("[%csl Gz9]").unwrap_err();
        assert!(matches!(err, Error::Directive { .. }));
        assert!(err.to_string().contains("'z9' is not a square"));
    }

    #[test]
    fn test_truncated_arrow_is_rejected() {
        assert!(matches!(
            parse_marks("[%cal Ge2e]"),
            Err(Error::Directive { .. })
        ));
    }

    #[test]
    fn test_empty_list_is_rejected() {
        assert!(matches!(
            parse_marks("[%cal ]"),
            Err(Error::Directive { .. })
        ));
        assert!(matches!(
            parse_marks("[%csl Ge4,]"),
            Err(Error::Directive { .. })
        ));
    }

    #[test]
    fn test_unterminated_command_is_rejected() {
        let err = parse_marks("[%cal Ge2e4 good move").unwrap_err();
        assert!(matches!(err, Error::Directive { .. }));
        assert!(err.to_string().contains("unterminated command"));

        assert!(matches!(
            parse_marks("[%csl Gd4] then [%cal Gd4e5"),
            Err(Error::Directive { .. })
        ));
        assert!(matches!(
            parse_marks("[%calGe2e4]"),
            Err(Error::Directive { .. })
        ));
    }

    #[test]
    fn test_strip_commands() {
        assert_eq!(strip_commands("[%cal Ge2e4] good move"), "good move");
        assert_eq!(
            strip_commands("strong [%csl Rd5]  outpost [%clk 0:01:00]"),
            "strong outpost"
        );
        assert_eq!(strip_commands("[%cal Ge2e4]"), "");
        assert_eq!(strip_commands("plain text"), "plain text");
    }

    #[test]
    fn test_has_diagram_directive() {
        assert!(has_diagram_directive("[%cal Ge2e4]"));
        assert!(has_diagram_directive("see [%csl Gd4]"));
        assert!(!has_diagram_directive("[%clk 0:01:00]"));
        assert!(!has_diagram_directive("calm position"));
    }
}
