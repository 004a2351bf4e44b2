use std::collections::HashSet;

use rand::Rng;

use crate::config::GridSize;
use crate::snake::{Cell, Snake};

/// Random draws tried before falling back to scanning every free cell.
const MAX_RANDOM_DRAWS: usize = 32;

/// Picks a uniformly random interior cell that the snake does not occupy.
///
/// While the body covers less than half of the interior, cells are drawn at
/// random and redrawn when occupied. Denser boards scan the free cells instead.
/// Returns `None` once the snake fills the whole interior.
#[must_use]
pub fn spawn_position<R: Rng + ?Sized>(rng: &mut R, bounds: GridSize, snake: &Snake) -> Option<Cell> {
    if snake.len() * 2 < bounds.interior_cell_count() {
        for _ in 0..MAX_RANDOM_DRAWS {
            let cell = random_interior_cell(rng, bounds);
            if !snake.occupies(cell) {
                return Some(cell);
            }
        }
    }

    spawn_from_free_cells(rng, bounds, snake)
}

fn random_interior_cell<R: Rng + ?Sized>(rng: &mut R, bounds: GridSize) -> Cell {
    Cell::new(
        rng.gen_range(1..i32::from(bounds.width()) - 1),
        rng.gen_range(1..i32::from(bounds.height()) - 1),
    )
}

fn spawn_from_free_cells<R: Rng + ?Sized>(
    rng: &mut R,
    bounds: GridSize,
    snake: &Snake,
) -> Option<Cell> {
    let occupied: HashSet<Cell> = snake.cells().collect();
    let candidates: Vec<Cell> = bounds
        .interior_cells()
        .filter(|cell| !occupied.contains(cell))
        .collect();

    if candidates.is_empty() {
        return None;
    }

    let index = rng.gen_range(0..candidates.len());
    Some(candidates[index])
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use crate::config::GridSize;
    use crate::input::Direction;
    use crate::snake::{Cell, Snake};

    use super::{spawn_from_free_cells, spawn_position};

    #[test]
    fn apple_spawn_never_overlaps_snake() {
        let mut rng = StdRng::seed_from_u64(7);
        let bounds = GridSize::new(8, 6).expect("valid grid");
        let snake = Snake::from_cells(
            vec![Cell::new(1, 1), Cell::new(2, 1), Cell::new(3, 1)],
            Direction::Right,
        )
        .expect("valid body");

        for _ in 0..100 {
            let apple = spawn_position(&mut rng, bounds, &snake).expect("free cells remain");
            assert!(!snake.occupies(apple));
            assert!(bounds.is_interior(apple));
        }
    }

    #[test]
    fn apple_spawn_reaches_the_last_free_cell() {
        let mut rng = StdRng::seed_from_u64(11);
        let bounds = GridSize::new(5, 5).expect("valid grid");
        // Interior is 3x3; leave only (3, 3) free.
        let snake = Snake::from_cells(
            vec![
                Cell::new(3, 2),
                Cell::new(3, 1),
                Cell::new(2, 1),
                Cell::new(1, 1),
                Cell::new(1, 2),
                Cell::new(1, 3),
                Cell::new(2, 3),
                Cell::new(2, 2),
            ],
            Direction::Right,
        )
        .expect("valid body");

        for _ in 0..10 {
            assert_eq!(
                spawn_position(&mut rng, bounds, &snake),
                Some(Cell::new(3, 3))
            );
        }
    }

    #[test]
    fn apple_spawn_gives_up_on_a_full_interior() {
        let mut rng = StdRng::seed_from_u64(3);
        let bounds = GridSize::new(5, 5).expect("valid grid");
        let snake = Snake::from_cells(
            vec![
                Cell::new(3, 3),
                Cell::new(3, 2),
                Cell::new(3, 1),
                Cell::new(2, 1),
                Cell::new(1, 1),
                Cell::new(1, 2),
                Cell::new(1, 3),
                Cell::new(2, 3),
                Cell::new(2, 2),
            ],
            Direction::Right,
        )
        .expect("valid body");

        assert_eq!(spawn_position(&mut rng, bounds, &snake), None);
    }

    #[test]
    fn same_seed_gives_same_apple() {
        let bounds = GridSize::new(10, 10).expect("valid grid");
        let snake = Snake::new(Cell::new(5, 5), Direction::Down);

        let first = spawn_position(&mut StdRng::seed_from_u64(42), bounds, &snake);
        let second = spawn_position(&mut StdRng::seed_from_u64(42), bounds, &snake);

        assert_eq!(first, second);
    }

    #[test]
    fn apple_spawn_on_a_huge_board_draws_a_free_cell() {
        let mut rng = StdRng::seed_from_u64(5);
        let bounds = GridSize::new(4000, 4000).expect("valid grid");
        let snake = Snake::from_cells(
            vec![Cell::new(1, 1), Cell::new(2, 1), Cell::new(3, 1)],
            Direction::Right,
        )
        .expect("valid body");

        for _ in 0..1000 {
            let apple = spawn_position(&mut rng, bounds, &snake).expect("free cells remain");
            assert!(bounds.is_interior(apple));
            assert!(!snake.occupies(apple));
        }
    }

    #[test]
    fn free_cell_scan_picks_only_free_cells() {
        let mut rng = StdRng::seed_from_u64(8);
        let bounds = GridSize::new(5, 5).expect("valid grid");
        let snake = Snake::from_cells(
            vec![Cell::new(1, 1), Cell::new(2, 1), Cell::new(3, 1)],
            Direction::Right,
        )
        .expect("valid body");

        for _ in 0..50 {
            let apple = spawn_from_free_cells(&mut rng, bounds, &snake).expect("free cells remain");
            assert!(bounds.is_interior(apple));
            assert!(!snake.occupies(apple));
        }
    }
}
