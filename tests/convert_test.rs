use pgn2tex::{Error, FormatOptions, convert_file, output_path_for};
use std::fs;
use std::io::Write;
use tempfile::TempDir;

const ANNOTATED: &str = r#"[Event "Club Championship"]
[White "A"]
[Black "B"]
[Result "1-0"]

1. e4 $1 e5 2. Nf3 Nc6 3. Bb5 { [%cal Gb5c6] the Ruy Lopez } a6
(3... Nf6 4. O-O Nxe4)
(3... d6 4. d4 Bd7)
4. Ba4 Nf6 5. O-O 1-0

[Event "Blitz"]
1. d4 d5 (1... Nf6 2. c4) 2. c4 *
"#;

fn write_pgn(dir: &TempDir, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    let mut file = fs::File::create(&path).unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    path
}

#[test]
fn test_convert_writes_tex_next_to_input() {
    let dir = TempDir::new().unwrap();
    let input = write_pgn(&dir, "games.pgn", ANNOTATED);
    let output = output_path_for(&input);

    let games = convert_file(&input, &output, FormatOptions::default()).unwrap();
    assert_eq!(games, 2);
    assert_eq!(output, dir.path().join("games.tex"));

    let tex = fs::read_to_string(&output).unwrap();
    assert!(tex.contains("\\documentclass[10pt,DIV=20,twocolumn]{scrreprt}"));
    assert!(tex.contains("\\chapter*{Club Championship}\n\\newgame\n"));
    assert!(tex.contains("\\chapter*{Blitz}\n\\newgame\n"));
    assert!(tex.trim_end().ends_with("\\end{document}"));
}

#[test]
fn test_convert_renders_annotations() {
    let dir = TempDir::new().unwrap();
    let input = write_pgn(&dir, "ruy.pgn", ANNOTATED);
    let output = dir.path().join("ruy.tex");

    convert_file(&input, &output, FormatOptions::default()).unwrap();
    let tex = fs::read_to_string(&output).unwrap();

    assert!(tex.contains("\\mainline{1. e4! e5 2. Nf3 Nc6 3. Bb5 } the Ruy Lopez\n"));
    assert!(tex.contains("markmoves={b5-c6}"));
    assert!(!tex.contains("[%cal"));

    let nf6 = tex.find("\\variation{3...Nf6 4. O-O Nxe4 }").unwrap();
    let d6 = tex.find("\\variation{3...d6 4. d4 Bd7 }").unwrap();
    let a6 = tex.find("\\mainline{3...a6 4. Ba4 Nf6 5. O-O }").unwrap();
    assert!(nf6 < d6 && d6 < a6);
}

#[test]
fn test_convert_with_all_flags() {
    let dir = TempDir::new().unwrap();
    let input = write_pgn(&dir, "flags.pgn", ANNOTATED);
    let output = dir.path().join("flags.tex");
    let options = FormatOptions {
        number_variations: true,
        indent_variations: true,
        arrow_last_move: true,
        color: true,
        flip: true,
        ..Default::default()
    };

    convert_file(&input, &output, options).unwrap();
    let tex = fs::read_to_string(&output).unwrap();

    assert!(tex.contains("{\\color{var0}\\N{0.1} "));
    assert!(tex.contains("{\\color{var1}\\N{0.2} "));
    assert!(tex.contains("\\N{0.3} "));
    assert!(tex.contains("\\begin{addmargin}[2em]{0cm}\\par\n\\variation{3...Nf6"));
    assert!(tex.contains(",inverse,pgfstyle=straightmove,markmoves="));
    // The color counter restarts with the second game.
    let blitz = tex.find("\\chapter*{Blitz}").unwrap();
    assert!(tex[blitz..].contains("{\\color{var0}"));
    assert!(!tex[blitz..].contains("{\\color{var2}"));
}

#[test]
fn test_malformed_game_aborts_without_output() {
    let dir = TempDir::new().unwrap();
    let input = write_pgn(
        &dir,
        "bad.pgn",
        "[Event \"Ok\"]\n1. e4 e5 *\n\n[Event \"Bad\"]\n1. e4 e5 2. Ke3 *\n",
    );
    let output = dir.path().join("bad.tex");

    let err = convert_file(&input, &output, FormatOptions::default()).unwrap_err();
    assert!(matches!(err, Error::MalformedGame { index: 2, .. }));
    assert!(!output.exists());
}

#[test]
fn test_unknown_nag_aborts() {
    let dir = TempDir::new().unwrap();
    let input = write_pgn(&dir, "nag.pgn", "1. e4 $14 e5 2. Nf3 (2. f4) Nc6 *\n");
    let output = dir.path().join("nag.tex");

    let err = convert_file(&input, &output, FormatOptions::default()).unwrap_err();
    assert!(matches!(err, Error::UnknownNag(14)));
}

#[test]
fn test_missing_input_fails() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("missing.pgn");

    let err = convert_file(&input, &dir.path().join("missing.tex"), FormatOptions::default())
        .unwrap_err();
    assert!(matches!(err, Error::Open { .. }));
}

#[test]
fn test_zstd_input() {
    let dir = TempDir::new().unwrap();
    let compressed = zstd::encode_all(ANNOTATED.as_bytes(), 0).unwrap();
    let input = dir.path().join("games.pgn.zst");
    fs::write(&input, compressed).unwrap();
    let output = output_path_for(&input);

    assert_eq!(output, dir.path().join("games.tex"));
    assert_eq!(convert_file(&input, &output, FormatOptions::default()).unwrap(), 2);
}
