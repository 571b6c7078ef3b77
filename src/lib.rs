//! Typeset PGN games as LaTeX: move text via `xskak`, variations as nested
//! paragraphs and `chessboard` diagrams at every branch point.

pub mod chess;

pub use chess::{
    ColorCycle, Document, Error, FormatOptions, Game, GameTree, GameTreeFormatter, MoveNode,
    NodeId, PgnGames, Result, convert_file, expand_inputs, output_path_for,
};
