/// Formatting switches, resolved once from the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FormatOptions {
    /// Prefix each variation with a bold `level.index` label.
    pub number_variations: bool,
    /// Indent lines by `2 * level` em.
    pub indent_variations: bool,
    /// Draw an arrow for the move leading to each diagram.
    pub arrow_last_move: bool,
    /// Print side variations in the `var0`..`var5` palette.
    pub color: bool,
    /// Show boards from black's side.
    pub flip: bool,
    /// Reserved; accepted but has no effect on the output.
    pub diagrams_start_variation: bool,
    /// Reserved; accepted but has no effect on the output.
    pub diagrams_end_variation: bool,
}
