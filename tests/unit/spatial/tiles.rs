//! Tests for side signatures, rotations and catalog validation

#[cfg(test)]
mod tests {
    use roadtiles::AlgorithmError;
    use roadtiles::spatial::tiles::{
        BorderTile, CLOSED, Direction, Placement, Rotation, SideSignature, TileCatalog,
        TileDefinition, TileId,
    };

    fn road_catalog() -> TileCatalog {
        TileCatalog::new(
            vec!["road".to_string()],
            &[
                TileDefinition::new("fourway", [0, 0, 0, 0]),
                TileDefinition::new("roadend", [0, CLOSED, CLOSED, CLOSED]),
                TileDefinition::new("turnroad", [0, CLOSED, CLOSED, 0]),
            ],
        )
        .unwrap_or_else(|error| panic!("catalog should validate: {error}"))
    }

    // Tests a quarter-turn moves the west side to the north
    // Verified by rotating counter-clockwise instead
    #[test]
    fn test_rotate_quarter_turn() {
        let signature = SideSignature([1, 2, 3, 4]);

        assert_eq!(signature.rotate(Rotation::R0), SideSignature([1, 2, 3, 4]));
        assert_eq!(signature.rotate(Rotation::R90), SideSignature([4, 1, 2, 3]));
        assert_eq!(signature.rotate(Rotation::R180), SideSignature([3, 4, 1, 2]));
        assert_eq!(signature.rotate(Rotation::R270), SideSignature([2, 3, 4, 1]));
    }

    // Tests each side reads the signature entry for its direction
    // Verified by swapping the east and west entries
    #[test]
    fn test_side_lookup() {
        let signature = SideSignature([1, 2, 3, 4]);

        for direction in Direction::ALL {
            assert_eq!(signature.side(direction) as usize, direction.index() + 1);
        }
        let turned = signature.rotate(Rotation::R90);
        assert_eq!(turned.side(Direction::North), signature.side(Direction::West));
        assert_eq!(turned.side(Direction::East), signature.side(Direction::North));
    }

    // Tests four quarter-turns return the original signature
    // Verified by skipping one rotation step
    #[test]
    fn test_rotation_cycle() {
        let signature = SideSignature([0, CLOSED, CLOSED, 0]);
        let mut rotated = signature;
        for _ in 0..4 {
            rotated = rotated.rotate(Rotation::R90);
        }
        assert_eq!(rotated, signature);

        for rotation in Rotation::ALL {
            let back = Rotation::from_steps(4 - rotation.steps());
            assert_eq!(signature.rotate(rotation).rotate(back), signature);
        }
    }

    // Tests degree conversion accepts only right angles
    // Verified by accepting 45 degrees
    #[test]
    fn test_rotation_degrees() {
        for rotation in Rotation::ALL {
            assert_eq!(Rotation::from_degrees(rotation.degrees()), Some(rotation));
        }
        assert_eq!(Rotation::from_degrees(45), None);
        assert_eq!(Rotation::from_degrees(360), None);
        assert_eq!(Rotation::from_steps(5), Rotation::R90);
    }

    // Tests opposite directions and grid offsets
    // Verified by swapping east and west offsets
    #[test]
    fn test_direction_geometry() {
        for direction in Direction::ALL {
            assert_eq!(direction.opposite().opposite(), direction);
            let [dx, dz] = direction.offset();
            let [ox, oz] = direction.opposite().offset();
            assert_eq!((dx + ox, dz + oz), (0, 0));
        }
        assert_eq!(Direction::North.offset(), [0, -1]);
        assert_eq!(Direction::East.offset(), [1, 0]);
        assert_eq!(Direction::North.index(), 0);
        assert_eq!(Direction::West.index(), 3);
    }

    // Tests catalog lookup by identifier and name
    // Verified by assigning identifiers from one
    #[test]
    fn test_catalog_lookup() {
        let catalog = road_catalog();

        assert_eq!(catalog.len(), 3);
        assert!(!catalog.is_empty());
        assert_eq!(catalog.candidate_count(), 12);
        assert_eq!(catalog.find("roadend").map(|tile| tile.id), Some(TileId(1)));
        assert_eq!(
            catalog.side_signature(TileId(2)),
            Some(SideSignature([0, CLOSED, CLOSED, 0]))
        );
        assert!(catalog.get(TileId(3)).is_none());
        assert_eq!(catalog.category_name(0), "road");
        assert_eq!(catalog.category_name(CLOSED), "closed");
        assert_eq!(catalog.category_value("road"), Some(0));
        assert_eq!(catalog.category_value("closed"), Some(CLOSED));
        assert_eq!(catalog.category_value("river"), None);
    }

    // Tests rotated signature lookup applies the rotation
    // Verified by returning the unrotated signature
    #[test]
    fn test_rotated_signature() {
        let catalog = road_catalog();
        let placement = Placement::new(TileId(1), Rotation::R90);

        assert_eq!(
            catalog.rotated_signature(placement),
            Some(SideSignature([CLOSED, 0, CLOSED, CLOSED]))
        );
    }

    // Tests candidate indices map back to the same placement
    // Verified by ordering candidates rotation-major
    #[test]
    fn test_candidate_index_bijection() {
        for index in 0..12 {
            let placement = TileCatalog::candidate(index);
            assert_eq!(TileCatalog::candidate_index(placement), index);
        }
        assert_eq!(
            TileCatalog::candidate_index(Placement::new(TileId(2), Rotation::R270)),
            11
        );
    }

    // Tests wrong side counts are rejected
    // Verified by truncating signatures silently
    #[test]
    fn test_signature_length_rejected() {
        let result = TileCatalog::new(
            vec!["road".to_string()],
            &[TileDefinition::new("short", [0, 0, 0])],
        );

        assert!(matches!(
            result,
            Err(AlgorithmError::SignatureLength { len: 3, .. })
        ));
    }

    // Tests references to undeclared categories are rejected
    // Verified by removing the category range check
    #[test]
    fn test_undefined_category_rejected() {
        let result = TileCatalog::new(
            vec!["road".to_string()],
            &[TileDefinition::new("river", [0, 1, 0, CLOSED])],
        );

        assert!(matches!(
            result,
            Err(AlgorithmError::UndefinedCategory {
                side: Direction::East,
                category: 1,
                ..
            })
        ));

        let negative = TileCatalog::new(
            vec!["road".to_string()],
            &[TileDefinition::new("odd", [-2, 0, 0, 0])],
        );
        assert!(negative.is_err());
    }

    // Tests empty catalogs and duplicate names are rejected
    // Verified by dropping the duplicate name check
    #[test]
    fn test_invalid_catalogs_rejected() {
        assert!(TileCatalog::new(vec![], &[]).is_err());

        let duplicate_tiles = TileCatalog::new(
            vec![],
            &[
                TileDefinition::new("land", [CLOSED; 4]),
                TileDefinition::new("land", [CLOSED; 4]),
            ],
        );
        assert!(matches!(
            duplicate_tiles,
            Err(AlgorithmError::InvalidCatalog { .. })
        ));

        let duplicate_categories = TileCatalog::new(
            vec!["road".to_string(), "road".to_string()],
            &[TileDefinition::new("land", [CLOSED; 4])],
        );
        assert!(duplicate_categories.is_err());

        let reserved = TileCatalog::new(
            vec!["closed".to_string()],
            &[TileDefinition::new("land", [CLOSED; 4])],
        );
        assert!(reserved.is_err());

        let unnamed = TileCatalog::new(vec![], &[TileDefinition::new("  ", [CLOSED; 4])]);
        assert!(unnamed.is_err());
    }

    // Tests border tiles validate against the catalog's categories
    // Verified by skipping border validation
    #[test]
    fn test_border_tile() {
        let catalog = road_catalog();

        let closed = BorderTile::closed("land");
        assert_eq!(closed.signature, SideSignature::CLOSED);
        assert!(!closed.signature.is_open());

        let open = BorderTile::from_definition(&TileDefinition::new("ring", [0; 4]), &catalog);
        assert!(open.is_ok_and(|border| border.signature.is_open()));

        let undefined =
            BorderTile::from_definition(&TileDefinition::new("ring", [4; 4]), &catalog);
        assert!(undefined.is_err());
    }
}
