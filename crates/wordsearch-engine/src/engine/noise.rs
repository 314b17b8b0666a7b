use rand::Rng;

use crate::core::grid::{Cell, Grid};

/// Fills every empty cell with a uniformly random letter `A`–`Z`.
///
/// Cells that already hold a letter are never touched. Returns the number of
/// cells filled.
pub fn fill<R>(grid: &mut Grid, rng: &mut R) -> usize
where
    R: Rng + ?Sized,
{
    let empty: Vec<_> = grid.positions().filter(|&pos| grid.get(pos).is_none()).collect();
    for &pos in &empty {
        let letter = char::from(rng.random_range(b'A'..=b'Z'));
        grid.set(pos, Cell::new(letter));
    }
    empty.len()
}

#[cfg(test)]
mod tests {
    use crate::{GameSeed, Position};

    use super::*;

    #[test]
    fn test_fills_every_empty_cell_with_ascii_uppercase() {
        let mut grid = Grid::new(12, 12).unwrap();
        let filled = fill(&mut grid, &mut GameSeed::from_bytes([1; 16]).rng());
        assert_eq!(filled, 144);
        assert!(grid.is_filled());
        for pos in grid.positions() {
            assert!(grid.get(pos).unwrap().letter().is_ascii_uppercase());
        }
    }

    #[test]
    fn test_keeps_existing_letters() {
        let mut grid = Grid::new(5, 5).unwrap();
        for col in 0..5 {
            grid.set(Position::new(3, col), Cell::new('É'));
        }
        let filled = fill(&mut grid, &mut GameSeed::from_bytes([2; 16]).rng());
        assert_eq!(filled, 20);
        for col in 0..5 {
            assert_eq!(grid.get(Position::new(3, col)), Cell::new('É'));
        }
    }

    #[test]
    fn test_full_grid_is_untouched() {
        let mut grid = Grid::new(5, 5).unwrap();
        fill(&mut grid, &mut GameSeed::from_bytes([3; 16]).rng());
        let before = grid.clone();
        assert_eq!(fill(&mut grid, &mut GameSeed::from_bytes([4; 16]).rng()), 0);
        assert_eq!(grid, before);
    }
}
