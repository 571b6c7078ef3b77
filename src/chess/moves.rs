use shakmaty::fen::Fen;
use shakmaty::san::SanPlus;
use shakmaty::uci::UciMove;
use shakmaty::{CastlingMode, Chess, Color, EnPassantMode, Move, Position, Square};
use std::fmt::Write;

/// Render `moves`, played from `pos`, as a variation line: `1. e4 e5 2. Nf3`.
///
/// A line starting with black is numbered `1...e5` (no space), so the first
/// move is always the first token containing a SAN.
pub fn line_san(pos: &Chess, moves: &[Move]) -> String {
    let mut pos = pos.clone();
    let mut line = String::new();

    for (i, &m) in moves.iter().enumerate() {
        let turn = pos.turn();
        let move_no = pos.fullmoves();

        if i > 0 {
            line.push(' ');
        }
        if turn == Color::White {
            let _ = write!(line, "{}. ", move_no);
        } else if i == 0 {
            let _ = write!(line, "{}...", move_no);
        }

        let san = SanPlus::from_move_and_play_unchecked(&mut pos, m);
        let _ = write!(line, "{}", san);
    }

    line
}

pub fn fen(pos: &Chess) -> String {
    Fen::from_position(pos, EnPassantMode::Legal).to_string()
}

/// Origin and destination squares of `m`; castling ends on the king's target square.
pub fn move_squares(m: Move) -> Option<(Square, Square)> {
    match m.to_uci(CastlingMode::Standard) {
        UciMove::Normal { from, to, .. } => Some((from, to)),
        _ => None,
    }
}
