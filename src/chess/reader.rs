use super::error::{Error, Result};
use super::types::Game;
use super::visitor::GameTreeVisitor;
use pgn_reader::Reader;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use zstd::stream::read::Decoder as ZstdDecoder;

pub type PgnInput = Box<dyn Read>;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CompressionMode {
    Plain,
    Zstd,
}

impl CompressionMode {
    pub fn for_path(path: &Path) -> Self {
        match path.extension() {
            Some(ext) if ext.eq_ignore_ascii_case("zst") => Self::Zstd,
            _ => Self::Plain,
        }
    }
}

/// Expand every input into file paths. Arguments containing `*` or `?` are
/// glob patterns and must match at least one file; anything else is taken
/// as a path as-is.
pub fn expand_inputs(inputs: &[String]) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();

    for input in inputs {
        if input.contains('*') || input.contains('?') {
            let matched: Vec<PathBuf> = glob::glob(input)
                .map_err(|source| Error::Pattern {
                    pattern: input.clone(),
                    source,
                })?
                .filter_map(|entry| match entry {
                    Ok(path) => Some(path),
                    Err(e) => {
                        tracing::warn!("skipping unreadable match for '{}': {}", input, e);
                        None
                    }
                })
                .collect();

            if matched.is_empty() {
                return Err(Error::NoMatch(input.clone()));
            }
            paths.extend(matched);
        } else {
            paths.push(PathBuf::from(input));
        }
    }

    Ok(paths)
}

pub fn open_input_stream(path: &Path, compression: CompressionMode) -> Result<PgnInput> {
    let file = File::open(path).map_err(|source| Error::Open {
        path: path.to_path_buf(),
        source,
    })?;

    match compression {
        CompressionMode::Plain => Ok(Box::new(file)),
        CompressionMode::Zstd => ZstdDecoder::new(file)
            .map(|decoder| Box::new(decoder) as PgnInput)
            .map_err(|source| Error::Open {
                path: path.to_path_buf(),
                source,
            }),
    }
}

/// Games of one PGN source, parsed lazily one record at a time.
pub struct PgnGames {
    // No BufReader: pgn-reader buffers the underlying reader itself.
    pgn_reader: Reader<PgnInput>,
    visitor: GameTreeVisitor,
    path: PathBuf,
    next_game_index: usize,
}

impl PgnGames {
    pub fn open(path: &Path) -> Result<Self> {
        let input = open_input_stream(path, CompressionMode::for_path(path))?;
        Ok(Self::from_input(input, path))
    }

    pub fn from_input(input: PgnInput, path: &Path) -> Self {
        Self {
            pgn_reader: Reader::new(input),
            visitor: GameTreeVisitor::new(),
            path: path.to_path_buf(),
            next_game_index: 1,
        }
    }
}

impl Iterator for PgnGames {
    type Item = Result<Game>;

    fn next(&mut self) -> Option<Self::Item> {
        let game_index = self.next_game_index;

        match self.pgn_reader.read_game(&mut self.visitor) {
            Ok(Some(parsed)) => {
                self.next_game_index += 1;
                Some(parsed.map_err(|e| e.in_game(&self.path, game_index)))
            }
            Ok(None) => None,
            Err(source) => Some(Err(Error::Read {
                path: self.path.clone(),
                source,
            })),
        }
    }
}
