//! Loader for RON content files at startup.

use ron::Options;
use std::fs;
use std::path::Path;

use super::data::*;
use super::registry::ContentRegistry;

/// A content file that could not be read or parsed.
#[derive(Debug)]
pub struct ContentLoadError {
    pub file: String,
    pub message: String,
}

impl std::fmt::Display for ContentLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Failed to load {}: {}", self.file, self.message)
    }
}

/// `IMPLICIT_SOME` lets optional fields skip the `Some(..)` wrapper.
fn ron_options() -> Options {
    Options::default().with_default_extension(ron::extensions::Extensions::IMPLICIT_SOME)
}

/// Parse RON text; `file` only labels the error.
pub fn parse_ron<T>(file: &str, contents: &str) -> Result<T, ContentLoadError>
where
    T: for<'de> serde::Deserialize<'de>,
{
    ron_options()
        .from_str(contents)
        .map_err(|e| ContentLoadError {
            file: file.to_string(),
            message: format!("Parse error: {}", e),
        })
}

fn read_file(path: &Path) -> Result<String, ContentLoadError> {
    fs::read_to_string(path).map_err(|e| ContentLoadError {
        file: path.display().to_string(),
        message: format!("IO error: {}", e),
    })
}

/// Reads a list file shaped as `(items: [...])`.
fn load_data_file<T>(path: &Path) -> Result<Vec<T>, ContentLoadError>
where
    T: for<'de> serde::Deserialize<'de>,
{
    let contents = read_file(path)?;
    let data: DataFile<T> = parse_ron(&path.display().to_string(), &contents)?;
    Ok(data.items)
}

/// Reads a file holding one bare struct.
fn load_single_file<T>(path: &Path) -> Result<T, ContentLoadError>
where
    T: for<'de> serde::Deserialize<'de>,
{
    let contents = read_file(path)?;
    parse_ron(&path.display().to_string(), &contents)
}

/// Reads `player.ron`, `enemies.ron` and `arena.ron` under `base_path`.
/// Every failing file is reported, not only the first.
pub fn load_all_content(base_path: &Path) -> Result<ContentRegistry, Vec<ContentLoadError>> {
    let mut errors = Vec::new();

    let player = match load_single_file::<PlayerDef>(&base_path.join("player.ron")) {
        Ok(player) => Some(player),
        Err(e) => {
            errors.push(e);
            None
        }
    };

    let mut enemies = std::collections::HashMap::new();
    match load_data_file::<EnemyDef>(&base_path.join("enemies.ron")) {
        Ok(items) => {
            for item in items {
                enemies.insert(item.id.clone(), item);
            }
        }
        Err(e) => errors.push(e),
    }

    let arena = match load_single_file::<ArenaDef>(&base_path.join("arena.ron")) {
        Ok(arena) => Some(arena),
        Err(e) => {
            errors.push(e);
            None
        }
    };

    match (player, arena) {
        (Some(player), Some(arena)) if errors.is_empty() => Ok(ContentRegistry {
            player,
            enemies,
            arena,
        }),
        _ => Err(errors),
    }
}
