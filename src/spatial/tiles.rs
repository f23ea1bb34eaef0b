//! Tile catalog, side signatures and rotation handling
//!
//! Every tile type carries four side categories ordered North, East, South, West.
//! Two touching sides are compatible when they hold the same category. The reserved
//! [`CLOSED`] category only ever matches another closed side.

use crate::io::error::{AlgorithmError, Result, invalid_catalog};
use std::collections::HashSet;
use std::fmt;

/// Side category value; non-negative values index the catalog's declared categories
pub type Category = i32;

/// Reserved category for a side that admits nothing but another closed side
pub const CLOSED: Category = -1;

/// Name used for [`CLOSED`] in catalog files
pub const CLOSED_NAME: &str = "closed";

/// Compass direction of a tile side or grid neighbor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Towards decreasing `z`
    North,
    /// Towards increasing `x`
    East,
    /// Towards increasing `z`
    South,
    /// Towards decreasing `x`
    West,
}

impl Direction {
    /// All directions in signature order
    pub const ALL: [Self; 4] = [Self::North, Self::East, Self::South, Self::West];

    /// Position of this direction inside a side signature
    pub const fn index(self) -> usize {
        match self {
            Self::North => 0,
            Self::East => 1,
            Self::South => 2,
            Self::West => 3,
        }
    }

    /// Direction pointing the other way
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::North => Self::South,
            Self::East => Self::West,
            Self::South => Self::North,
            Self::West => Self::East,
        }
    }

    /// Grid step `[dx, dz]` taken when moving in this direction
    pub const fn offset(self) -> [i32; 2] {
        match self {
            Self::North => [0, -1],
            Self::East => [1, 0],
            Self::South => [0, 1],
            Self::West => [-1, 0],
        }
    }
}

/// Clockwise quarter-turn applied to a tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Rotation {
    /// Unrotated
    R0,
    /// One quarter-turn clockwise
    R90,
    /// Half turn
    R180,
    /// Three quarter-turns clockwise
    R270,
}

impl Rotation {
    /// All rotations in ascending angle order
    pub const ALL: [Self; 4] = [Self::R0, Self::R90, Self::R180, Self::R270];

    /// Number of quarter-turns
    pub const fn steps(self) -> usize {
        match self {
            Self::R0 => 0,
            Self::R90 => 1,
            Self::R180 => 2,
            Self::R270 => 3,
        }
    }

    /// Rotation angle in degrees
    pub const fn degrees(self) -> u16 {
        match self {
            Self::R0 => 0,
            Self::R90 => 90,
            Self::R180 => 180,
            Self::R270 => 270,
        }
    }

    /// Parse an angle in degrees, accepting only multiples of 90 below 360
    pub const fn from_degrees(degrees: u16) -> Option<Self> {
        match degrees {
            0 => Some(Self::R0),
            90 => Some(Self::R90),
            180 => Some(Self::R180),
            270 => Some(Self::R270),
            _ => None,
        }
    }

    /// Rotation from a quarter-turn count, wrapping modulo 4
    pub const fn from_steps(steps: usize) -> Self {
        match steps % 4 {
            0 => Self::R0,
            1 => Self::R90,
            2 => Self::R180,
            _ => Self::R270,
        }
    }
}

/// Side categories of a tile ordered North, East, South, West
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SideSignature(pub [Category; 4]);

impl SideSignature {
    /// Signature with every side closed
    pub const CLOSED: Self = Self([CLOSED; 4]);

    /// Category on the given side
    pub const fn side(&self, direction: Direction) -> Category {
        let [north, east, south, west] = self.0;
        match direction {
            Direction::North => north,
            Direction::East => east,
            Direction::South => south,
            Direction::West => west,
        }
    }

    /// Rotate the signature clockwise
    ///
    /// A quarter-turn moves what faced west to face north, so entry `i` of the result
    /// is entry `(i + 3) % 4` of the input. Larger rotations repeat the step.
    #[must_use]
    pub const fn rotate(self, rotation: Rotation) -> Self {
        let [north, east, south, west] = self.0;
        match rotation {
            Rotation::R0 => self,
            Rotation::R90 => Self([west, north, east, south]),
            Rotation::R180 => Self([south, west, north, east]),
            Rotation::R270 => Self([east, south, west, north]),
        }
    }

    /// True when any side is not closed
    pub fn is_open(&self) -> bool {
        self.0.iter().any(|&category| category != CLOSED)
    }
}

/// Compact tile identifier, the index of the tile inside its catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileId(pub usize);

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A tile type together with its orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Placement {
    /// Tile type
    pub tile: TileId,
    /// Clockwise rotation
    pub rotation: Rotation,
}

impl Placement {
    /// Create a placement
    pub const fn new(tile: TileId, rotation: Rotation) -> Self {
        Self { tile, rotation }
    }
}

/// Unvalidated tile description as written in a catalog file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileDefinition {
    /// Display name, unique within a catalog
    pub name: String,
    /// Side categories, expected to hold exactly four entries
    pub sides: Vec<Category>,
}

impl TileDefinition {
    /// Create a definition from a name and side list
    pub fn new(name: impl Into<String>, sides: impl Into<Vec<Category>>) -> Self {
        Self {
            name: name.into(),
            sides: sides.into(),
        }
    }

    /// Check the definition against a category count and build its signature
    ///
    /// # Errors
    ///
    /// Returns an error if the name is empty, the side list does not hold exactly four
    /// entries, or any side references a category that was not declared
    pub fn validate(&self, category_count: usize) -> Result<SideSignature> {
        if self.name.trim().is_empty() {
            return Err(invalid_catalog(&self.name, &"tile name must not be empty"));
        }

        let sides: [Category; 4] =
            self.sides
                .as_slice()
                .try_into()
                .map_err(|_len_mismatch| AlgorithmError::SignatureLength {
                    tile: self.name.clone(),
                    len: self.sides.len(),
                })?;

        for (direction, &category) in Direction::ALL.iter().zip(sides.iter()) {
            let declared = usize::try_from(category).is_ok_and(|index| index < category_count);
            if category != CLOSED && !declared {
                return Err(AlgorithmError::UndefinedCategory {
                    tile: self.name.clone(),
                    side: *direction,
                    category,
                });
            }
        }

        Ok(SideSignature(sides))
    }
}

/// A validated tile type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileType {
    /// Catalog identifier
    pub id: TileId,
    /// Display name
    pub name: String,
    /// Unrotated side signature
    pub signature: SideSignature,
}

/// Validated set of tile types available to the solver
///
/// Tiles are addressed by [`TileId`], which doubles as the index into the catalog.
/// Candidates (tile and rotation pairs) are addressed by `tile * 4 + rotation steps`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileCatalog {
    categories: Vec<String>,
    tiles: Vec<TileType>,
}

impl TileCatalog {
    /// Validate tile definitions against the declared categories
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog is empty, a tile name repeats, a category name
    /// repeats or shadows the reserved closed name, or any tile fails validation
    pub fn new(categories: Vec<String>, definitions: &[TileDefinition]) -> Result<Self> {
        if definitions.is_empty() {
            return Err(invalid_catalog(&"<catalog>", &"catalog holds no tiles"));
        }

        let mut seen_categories = HashSet::new();
        for category in &categories {
            if category == CLOSED_NAME || !seen_categories.insert(category.as_str()) {
                return Err(invalid_catalog(
                    &category,
                    &"category names must be unique and must not be 'closed'",
                ));
            }
        }

        let mut seen_names = HashSet::new();
        let mut tiles = Vec::with_capacity(definitions.len());
        for (index, definition) in definitions.iter().enumerate() {
            let signature = definition.validate(categories.len())?;
            if !seen_names.insert(definition.name.as_str()) {
                return Err(invalid_catalog(&definition.name, &"duplicate tile name"));
            }
            tiles.push(TileType {
                id: TileId(index),
                name: definition.name.clone(),
                signature,
            });
        }

        Ok(Self { categories, tiles })
    }

    /// Number of tile types
    pub const fn len(&self) -> usize {
        self.tiles.len()
    }

    /// True when the catalog holds no tiles (never the case for a validated catalog)
    pub const fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Declared category names, indexed by category value
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// All tile types in identifier order
    pub fn tiles(&self) -> &[TileType] {
        &self.tiles
    }

    /// Look up a tile type
    pub fn get(&self, tile: TileId) -> Option<&TileType> {
        self.tiles.get(tile.0)
    }

    /// Find a tile type by name
    pub fn find(&self, name: &str) -> Option<&TileType> {
        self.tiles.iter().find(|tile| tile.name == name)
    }

    /// Unrotated side signature of a tile
    pub fn side_signature(&self, tile: TileId) -> Option<SideSignature> {
        self.get(tile).map(|tile_type| tile_type.signature)
    }

    /// Side signature of a tile after applying a rotation
    pub fn rotated_signature(&self, placement: Placement) -> Option<SideSignature> {
        self.side_signature(placement.tile)
            .map(|signature| signature.rotate(placement.rotation))
    }

    /// Total number of tile and rotation pairs
    pub const fn candidate_count(&self) -> usize {
        self.tiles.len() * 4
    }

    /// Dense index of a candidate placement
    pub const fn candidate_index(placement: Placement) -> usize {
        placement.tile.0 * 4 + placement.rotation.steps()
    }

    /// Placement addressed by a dense candidate index
    pub const fn candidate(index: usize) -> Placement {
        Placement::new(TileId(index / 4), Rotation::from_steps(index % 4))
    }

    /// Display name for a category value
    pub fn category_name(&self, category: Category) -> &str {
        usize::try_from(category)
            .ok()
            .and_then(|index| self.categories.get(index))
            .map_or(CLOSED_NAME, String::as_str)
    }

    /// Resolve a category name to its value
    pub fn category_value(&self, name: &str) -> Option<Category> {
        if name == CLOSED_NAME {
            return Some(CLOSED);
        }
        self.categories
            .iter()
            .position(|category| category == name)
            .and_then(|index| Category::try_from(index).ok())
    }
}

/// Tile that fills the immutable outer ring of the grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BorderTile {
    /// Display name
    pub name: String,
    /// Signature presented to the interior from every border cell
    pub signature: SideSignature,
}

impl BorderTile {
    /// Border tile closed on all four sides
    pub fn closed(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            signature: SideSignature::CLOSED,
        }
    }

    /// Validate a definition against the categories of a catalog
    ///
    /// # Errors
    ///
    /// Returns an error under the same rules as [`TileDefinition::validate`]
    pub fn from_definition(definition: &TileDefinition, catalog: &TileCatalog) -> Result<Self> {
        let signature = definition.validate(catalog.categories().len())?;
        Ok(Self {
            name: definition.name.clone(),
            signature,
        })
    }
}
