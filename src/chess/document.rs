use super::error::{Error, Result};
use super::formatter::GameTreeFormatter;
use super::options::FormatOptions;
use super::reader::PgnGames;
use super::types::Game;
use std::fs;
use std::path::{Path, PathBuf};

/// Page setup, board packages and the `var0`..`var5` palette.
pub const PREAMBLE: &str = r"
\documentclass[10pt,DIV=20,twocolumn]{scrreprt}
\usepackage{chessboard,xskak}
\usepackage{latexsym}
\usepackage[utf8]{inputenc}
\usepackage{graphicx}
\usepackage{xcolor}
\usepackage[margin=0.5in]{geometry}
\setlength{\columnsep}{1cm}

\setlength{\parindent}{0cm}

\definecolor{var0}{HTML}{1B6031}
\definecolor{var1}{HTML}{601b28}
\definecolor{var2}{HTML}{541b60}

\definecolor{var3}{HTML}{0d0d4b}
\definecolor{var4}{HTML}{4b2c0d}
\definecolor{var5}{HTML}{0d4b4b}

\newcommand\N[1]{%
  \noindent
  \makebox[0pt][r]{\makebox[1cm][l]{\textbf{#1}}}%
  \hspace*{\parindent}\ignorespaces}

\begin{document}
\newgame
";

pub const TRAILER: &str = "\\end{document}\n";

/// LaTeX document collecting one section per game.
pub struct Document {
    formatter: GameTreeFormatter,
    body: String,
    games: usize,
}

impl Document {
    pub fn new(options: FormatOptions) -> Self {
        Self {
            formatter: GameTreeFormatter::new(options),
            body: String::new(),
            games: 0,
        }
    }

    pub fn push_game(&mut self, game: &Game) -> Result<()> {
        let text = self.formatter.format_game(game)?;
        tracing::debug!(
            moves = game.tree.move_count(),
            colored_variations = self.formatter.colors().count(),
            "formatted game"
        );

        self.body.push_str(&format!("\\chapter*{{{}}}\n\\newgame\n", game.event()));
        self.body.push_str(&text);
        self.games += 1;
        Ok(())
    }

    pub fn games(&self) -> usize {
        self.games
    }

    pub fn finish(self) -> String {
        let mut out = String::with_capacity(PREAMBLE.len() + self.body.len() + TRAILER.len() + 1);
        out.push_str(PREAMBLE);
        out.push_str(&self.body);
        out.push('\n');
        out.push_str(TRAILER);
        out
    }
}

/// `games.pgn` becomes `games.tex`, `games.pgn.zst` also becomes `games.tex`;
/// names not ending in `pgn` get `.tex` appended.
pub fn output_path_for(input: &Path) -> PathBuf {
    let mut name = input.to_string_lossy().into_owned();
    if has_suffix_ignore_case(&name, ".zst") {
        name.truncate(name.len() - 4);
    }

    if has_suffix_ignore_case(&name, "pgn") {
        name.truncate(name.len() - 3);
        name.push_str("tex");
    } else {
        name.push_str(".tex");
    }
    PathBuf::from(name)
}

fn has_suffix_ignore_case(name: &str, suffix: &str) -> bool {
    name.get(name.len().saturating_sub(suffix.len())..)
        .is_some_and(|tail| tail.eq_ignore_ascii_case(suffix))
}

/// Render every game of `input` and write the document to `output`.
///
/// The document is built in memory first; nothing is written unless every
/// game converts.
pub fn convert_file(input: &Path, output: &Path, options: FormatOptions) -> Result<usize> {
    let mut document = Document::new(options);

    for game in PgnGames::open(input)? {
        let game = game?;
        tracing::info!(event = game.event(), "formatting game {}", document.games() + 1);
        document.push_game(&game)?;
    }

    let games = document.games();
    fs::write(output, document.finish()).map_err(|source| Error::Write {
        path: output.to_path_buf(),
        source,
    })?;

    tracing::info!(
        "wrote {} game(s) from '{}' to '{}'",
        games,
        input.display(),
        output.display()
    );
    Ok(games)
}
