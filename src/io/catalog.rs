//! Catalog files: TOML layout, category name resolution and the built-in road set

use serde::Deserialize;
use std::path::Path;

use crate::io::error::{AlgorithmError, Result, file_system_error, invalid_catalog};
use crate::spatial::tiles::{
    BorderTile, CLOSED, CLOSED_NAME, Category, TileCatalog, TileDefinition,
};

/// Road network tiles; `land` doubles as the border
pub const ROAD_CATALOG: &str = r#"
categories = ["road"]

[border]
name = "land"
sides = ["closed", "closed", "closed", "closed"]

[[tiles]]
name = "fourway"
sides = ["road", "road", "road", "road"]

[[tiles]]
name = "land"
sides = ["closed", "closed", "closed", "closed"]

[[tiles]]
name = "roadend"
sides = ["road", "closed", "closed", "closed"]

[[tiles]]
name = "roadstraight"
sides = ["closed", "road", "closed", "road"]

[[tiles]]
name = "troad"
sides = ["road", "road", "road", "closed"]

[[tiles]]
name = "turnroad"
sides = ["road", "closed", "closed", "road"]
"#;

/// A validated catalog together with the border tile it declares
#[derive(Debug, Clone)]
pub struct LoadedCatalog {
    /// Interior tiles
    pub catalog: TileCatalog,
    /// Tile for the outer ring
    pub border: BorderTile,
}

/// TOML structure for deserializing catalogs
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlCatalog {
    #[serde(default)]
    categories: Vec<String>,
    border: TomlTile,
    tiles: Vec<TomlTile>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlTile {
    name: String,
    sides: Vec<String>,
}

impl TomlTile {
    fn to_definition(&self, categories: &[String]) -> Result<TileDefinition> {
        let sides = self
            .sides
            .iter()
            .enumerate()
            .map(|(index, side)| {
                resolve_category(categories, side).ok_or_else(|| {
                    invalid_catalog(
                        &self.name,
                        &format!("side {index} references undefined category '{side}'"),
                    )
                })
            })
            .collect::<Result<Vec<Category>>>()?;
        Ok(TileDefinition::new(self.name.clone(), sides))
    }
}

fn resolve_category(categories: &[String], name: &str) -> Option<Category> {
    if name == CLOSED_NAME {
        return Some(CLOSED);
    }
    categories
        .iter()
        .position(|category| category == name)
        .and_then(|index| Category::try_from(index).ok())
}

/// Parse catalog TOML
///
/// `origin` names the source in error messages.
///
/// # Errors
///
/// Returns an error if the text is not valid catalog TOML or the catalog fails validation
pub fn parse_catalog(content: &str, origin: &Path) -> Result<LoadedCatalog> {
    let parsed: TomlCatalog =
        toml::from_str(content).map_err(|source| AlgorithmError::TomlParse {
            path: origin.to_path_buf(),
            source,
        })?;

    let definitions = parsed
        .tiles
        .iter()
        .map(|tile| tile.to_definition(&parsed.categories))
        .collect::<Result<Vec<_>>>()?;
    let border_definition = parsed.border.to_definition(&parsed.categories)?;

    let catalog = TileCatalog::new(parsed.categories, &definitions)?;
    let border = BorderTile::from_definition(&border_definition, &catalog)?;

    Ok(LoadedCatalog { catalog, border })
}

/// Read and parse a catalog file
///
/// # Errors
///
/// Returns an error if the file cannot be read or its contents fail [`parse_catalog`]
pub fn load_catalog(path: &Path) -> Result<LoadedCatalog> {
    let content =
        std::fs::read_to_string(path).map_err(file_system_error(path, "read catalog"))?;
    parse_catalog(&content, path)
}

/// The road network catalog compiled into the crate
///
/// # Errors
///
/// Returns an error only if the embedded catalog text is malformed
pub fn builtin_catalog() -> Result<LoadedCatalog> {
    parse_catalog(ROAD_CATALOG, Path::new("<builtin>"))
}
