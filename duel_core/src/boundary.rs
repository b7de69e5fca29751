use crate::geometry::Geometry;
use crate::side::Side;
use crate::systems::movement::Direction;

/// Confines a ship to its half of the arena
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundaryPolicy {
    area: Geometry,
}

impl BoundaryPolicy {
    pub fn new(area: Geometry) -> Self {
        Self { area }
    }

    /// Derive a side's area from the arena and the centre barrier.
    /// Each side's inner edge abuts the barrier.
    pub fn for_side(side: Side, arena: &Geometry, barrier: &Geometry) -> Self {
        let area = match side {
            Side::Yellow => Geometry::new(
                arena.left(),
                arena.top(),
                barrier.left() - arena.left(),
                arena.height(),
            ),
            Side::Red => Geometry::new(
                barrier.right(),
                arena.top(),
                arena.right() - barrier.right(),
                arena.height(),
            ),
        };
        Self::new(area)
    }

    pub fn area(&self) -> &Geometry {
        &self.area
    }

    /// Approve a move if the edge that moved is still inside the area.
    /// Rejected moves are dropped whole, never shortened.
    pub fn allows(&self, direction: Direction, proposed: &Geometry) -> bool {
        match direction {
            Direction::Up => proposed.top() >= self.area.top(),
            Direction::Down => proposed.bottom() <= self.area.bottom(),
            Direction::Left => proposed.left() >= self.area.left(),
            Direction::Right => proposed.right() <= self.area.right(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arena_and_barrier() -> (Geometry, Geometry) {
        let arena = Geometry::new(0, 0, 900, 500);
        let barrier = Geometry::new(445, 0, 10, 500);
        (arena, barrier)
    }

    #[test]
    fn test_side_areas_abut_barrier() {
        let (arena, barrier) = arena_and_barrier();
        let left = BoundaryPolicy::for_side(Side::Yellow, &arena, &barrier);
        let right = BoundaryPolicy::for_side(Side::Red, &arena, &barrier);

        assert_eq!(*left.area(), Geometry::new(0, 0, 445, 500));
        assert_eq!(*right.area(), Geometry::new(455, 0, 445, 500));
        assert!(!left.area().overlaps(right.area()));
        assert!(!left.area().overlaps(&barrier));
        assert!(!right.area().overlaps(&barrier));
        // Together with the barrier they span the arena width
        assert_eq!(
            left.area().width() + barrier.width() + right.area().width(),
            arena.width()
        );
    }

    #[test]
    fn test_allows_move_up_to_the_edge() {
        let policy = BoundaryPolicy::new(Geometry::new(0, 0, 445, 500));
        assert!(policy.allows(Direction::Up, &Geometry::new(10, 0, 55, 40)));
        assert!(!policy.allows(Direction::Up, &Geometry::new(10, -5, 55, 40)));
        assert!(policy.allows(Direction::Down, &Geometry::new(10, 460, 55, 40)));
        assert!(!policy.allows(Direction::Down, &Geometry::new(10, 461, 55, 40)));
    }

    #[test]
    fn test_rejects_crossing_the_barrier() {
        let policy = BoundaryPolicy::new(Geometry::new(0, 0, 445, 500));
        assert!(policy.allows(Direction::Right, &Geometry::new(390, 100, 55, 40)));
        assert!(!policy.allows(Direction::Right, &Geometry::new(391, 100, 55, 40)));
        assert!(!policy.allows(Direction::Left, &Geometry::new(-1, 100, 55, 40)));
    }
}
