//! Tests for the lowest-entropy frontier

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use roadtiles::algorithm::frontier::{Frontier, FrontierEntry};
    use roadtiles::spatial::grid::Position;

    // Tests pops come out by ascending entropy
    // Verified by reversing the heap ordering
    #[test]
    fn test_pop_ascending_entropy() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut frontier = Frontier::new(5, 5);
        frontier.insert(Position::new(1, 1), 12, &mut rng);
        frontier.insert(Position::new(2, 1), 3, &mut rng);
        frontier.insert(Position::new(3, 1), 8, &mut rng);

        let order: Vec<usize> = std::iter::from_fn(|| frontier.pop_min_entropy())
            .map(|entry| entry.entropy)
            .collect();
        assert_eq!(order, vec![3, 8, 12]);
        assert!(frontier.is_empty());
    }

    // Tests updates replace the previous key instead of adding a cell
    // Verified by popping stale entries
    #[test]
    fn test_update_supersedes_old_key() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut frontier = Frontier::new(5, 5);
        frontier.insert(Position::new(1, 1), 10, &mut rng);
        frontier.insert(Position::new(2, 2), 5, &mut rng);
        frontier.update_entropy(Position::new(1, 1), 2, &mut rng);

        assert_eq!(frontier.len(), 2);
        assert_eq!(
            frontier.pop_min_entropy().map(|entry| entry.position),
            Some(Position::new(1, 1))
        );
        assert_eq!(
            frontier.pop_min_entropy().map(|entry| entry.position),
            Some(Position::new(2, 2))
        );
        assert_eq!(frontier.pop_min_entropy(), None);
    }

    // Tests updates ignore cells that left the frontier
    // Verified by inserting on update unconditionally
    #[test]
    fn test_update_ignores_removed_cells() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut frontier = Frontier::new(4, 4);
        frontier.insert(Position::new(1, 1), 4, &mut rng);

        let removed = frontier.remove(Position::new(1, 1));
        assert!(removed.is_some());
        frontier.update_entropy(Position::new(1, 1), 1, &mut rng);

        assert!(!frontier.contains(Position::new(1, 1)));
        assert_eq!(frontier.pop_min_entropy(), None);
    }

    // Tests restoring saved keys restores the exact ordering
    // Verified by drawing a new tie-break on restore
    #[test]
    fn test_restore_reproduces_ordering() {
        let mut rng = StdRng::seed_from_u64(99);
        let mut frontier = Frontier::new(6, 6);
        for x in 1..5 {
            for z in 1..5 {
                frontier.insert(Position::new(x, z), 6, &mut rng);
            }
        }
        let before = frontier.ordered();

        let saved: Vec<FrontierEntry> = [Position::new(2, 2), Position::new(3, 4)]
            .into_iter()
            .filter_map(|position| frontier.entry(position))
            .collect();
        frontier.update_entropy(Position::new(2, 2), 1, &mut rng);
        frontier.remove(Position::new(3, 4));
        assert_ne!(frontier.ordered(), before);

        for entry in saved {
            frontier.restore(entry);
        }
        assert_eq!(frontier.ordered(), before);
        assert_eq!(frontier.peek_min_entropy(), before.first().copied());
        assert_eq!(frontier.pop_min_entropy(), before.first().copied());
    }

    // Tests equal-entropy cells are ordered by their tie-break
    // Verified by comparing positions before tie-breaks
    #[test]
    fn test_entry_ordering() {
        let low_tie = FrontierEntry {
            position: Position::new(3, 3),
            entropy: 2,
            tie: 1,
        };
        let high_tie = FrontierEntry {
            position: Position::new(1, 1),
            entropy: 2,
            tie: 9,
        };
        let lower_entropy = FrontierEntry {
            position: Position::new(2, 2),
            entropy: 1,
            tie: 100,
        };

        assert!(low_tie < high_tie);
        assert!(lower_entropy < low_tie);
    }

    // Tests heavy churn keeps the live count and pop order intact
    // Verified by skipping the live-count update in restore
    #[test]
    fn test_churn_compacts_without_losing_cells() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut frontier = Frontier::new(4, 4);
        frontier.insert(Position::new(1, 1), 5, &mut rng);
        frontier.insert(Position::new(2, 2), 6, &mut rng);

        for round in 0..200 {
            frontier.update_entropy(Position::new(1, 1), 5 + round % 3, &mut rng);
        }

        assert_eq!(frontier.len(), 2);
        let popped: Vec<Position> = std::iter::from_fn(|| frontier.pop_min_entropy())
            .map(|entry| entry.position)
            .collect();
        assert_eq!(popped.len(), 2);
        assert!(popped.contains(&Position::new(1, 1)));
        assert!(popped.contains(&Position::new(2, 2)));
    }
}
