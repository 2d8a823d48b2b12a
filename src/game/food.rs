use rand::Rng;
use std::collections::HashSet;

use super::state::Position;

/// Where food starts before the first placement
const INITIAL_FOOD: Position = Position { x: 5, y: 5 };

/// The single piece of food on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Food {
    position: Position,
}

impl Food {
    pub fn new(position: Position) -> Self {
        Self { position }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// Move the food to a uniformly random cell not listed in `excluding`.
    ///
    /// Cells are sampled until a free one turns up. If `excluding` already
    /// covers the whole board there is nothing to sample, so the position is
    /// left as is and `None` is returned.
    pub fn place<'a, R: Rng + ?Sized>(
        &mut self,
        excluding: impl IntoIterator<Item = &'a Position>,
        grid_size: usize,
        rng: &mut R,
    ) -> Option<Position> {
        let taken: HashSet<Position> = excluding
            .into_iter()
            .copied()
            .filter(|pos| pos.is_within(grid_size))
            .collect();

        if taken.len() >= grid_size * grid_size {
            return None;
        }

        loop {
            let pos = Position::new(
                rng.gen_range(0..grid_size) as i32,
                rng.gen_range(0..grid_size) as i32,
            );

            if !taken.contains(&pos) {
                self.position = pos;
                return Some(pos);
            }
        }
    }
}

impl Default for Food {
    fn default() -> Self {
        Self::new(INITIAL_FOOD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn all_cells(grid_size: usize) -> Vec<Position> {
        (0..grid_size as i32)
            .flat_map(|y| (0..grid_size as i32).map(move |x| Position::new(x, y)))
            .collect()
    }

    #[test]
    fn test_place_avoids_excluded_cells() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut food = Food::default();
        let excluded: Vec<Position> = all_cells(5).into_iter().filter(|p| p.x < 4).collect();

        for _ in 0..50 {
            let pos = food.place(&excluded, 5, &mut rng).unwrap();
            assert!(!excluded.contains(&pos));
            assert_eq!(pos.x, 4);
            assert_eq!(food.position(), pos);
        }
    }

    #[test]
    fn test_place_stays_on_grid() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut food = Food::default();

        for _ in 0..200 {
            let pos = food.place(std::iter::empty(), 30, &mut rng).unwrap();
            assert!(pos.is_within(30));
        }
    }

    #[test]
    fn test_place_finds_last_free_cell() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut food = Food::default();
        let free = Position::new(2, 3);
        let excluded: Vec<Position> = all_cells(4).into_iter().filter(|p| *p != free).collect();

        assert_eq!(food.place(&excluded, 4, &mut rng), Some(free));
    }

    #[test]
    fn test_place_on_full_board_returns_none() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut food = Food::new(Position::new(1, 1));
        let excluded = all_cells(3);

        assert_eq!(food.place(&excluded, 3, &mut rng), None);
        assert_eq!(food.position(), Position::new(1, 1));
    }

    #[test]
    fn test_off_grid_exclusions_do_not_count() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut food = Food::default();
        let mut excluded: Vec<Position> = all_cells(2);
        excluded.pop();
        excluded.push(Position::new(-1, 0));

        assert_eq!(food.place(&excluded, 2, &mut rng), Some(Position::new(1, 1)));
    }
}
