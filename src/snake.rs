use std::collections::{HashSet, VecDeque};
use std::fmt;
use std::iter;

use crate::error::{GeometryError, SetupError};
use crate::input::{Direction, direction_change_is_valid};

/// Grid cell as (column, row); rows grow downward.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the neighbor one step along `direction`.
    #[must_use]
    pub fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self::new(self.x + dx, self.y + dy)
    }

    /// Returns the direction leading to `other` when it is a unit neighbor.
    #[must_use]
    pub fn direction_to(self, other: Self) -> Option<Direction> {
        Direction::from_delta(other.x - self.x, other.y - self.y)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Rendering hint for one segment, derived from its neighbors.
///
/// Heads are named after the heading they were placed with, tails after the
/// side their neighbor sits on, corners after the two sides they connect.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Orientation {
    HeadUp,
    HeadDown,
    HeadLeft,
    HeadRight,
    TailUp,
    TailDown,
    TailLeft,
    TailRight,
    Vertical,
    Horizontal,
    /// `└`: the upright "L".
    CornerUpRight,
    /// `┌`: "L" turned 90 degrees clockwise.
    CornerDownRight,
    /// `┐`: "L" turned 180 degrees.
    CornerDownLeft,
    /// `┘`: "L" turned 270 degrees clockwise.
    CornerUpLeft,
}

impl Orientation {
    #[must_use]
    pub fn head(direction: Direction) -> Self {
        match direction {
            Direction::Up => Self::HeadUp,
            Direction::Down => Self::HeadDown,
            Direction::Left => Self::HeadLeft,
            Direction::Right => Self::HeadRight,
        }
    }

    #[must_use]
    pub fn tail(direction: Direction) -> Self {
        match direction {
            Direction::Up => Self::TailUp,
            Direction::Down => Self::TailDown,
            Direction::Left => Self::TailLeft,
            Direction::Right => Self::TailRight,
        }
    }

    /// Quarter turns clockwise from the upright "L", for corners only.
    #[must_use]
    pub fn corner_variant(self) -> Option<u8> {
        match self {
            Self::CornerUpRight => Some(0),
            Self::CornerDownRight => Some(1),
            Self::CornerDownLeft => Some(2),
            Self::CornerUpLeft => Some(3),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_head(self) -> bool {
        matches!(
            self,
            Self::HeadUp | Self::HeadDown | Self::HeadLeft | Self::HeadRight
        )
    }

    #[must_use]
    pub fn is_tail(self) -> bool {
        matches!(
            self,
            Self::TailUp | Self::TailDown | Self::TailLeft | Self::TailRight
        )
    }
}

/// One body cell and how to draw it.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Segment {
    pub cell: Cell,
    pub orientation: Orientation,
}

impl Segment {
    #[must_use]
    pub fn new(cell: Cell, orientation: Orientation) -> Self {
        Self { cell, orientation }
    }
}

/// Classifies the middle cell of three consecutive body cells.
///
/// The result depends only on which two sides of `at` the neighbors occupy,
/// so `classify(a, b, c) == classify(c, b, a)`.
pub fn classify(prev: Cell, at: Cell, next: Cell) -> Result<Orientation, GeometryError> {
    let towards_prev = neighbor_direction(at, prev)?;
    let towards_next = neighbor_direction(at, next)?;

    let orientation = match (towards_prev, towards_next) {
        (Direction::Up, Direction::Down) | (Direction::Down, Direction::Up) => {
            Orientation::Vertical
        }
        (Direction::Left, Direction::Right) | (Direction::Right, Direction::Left) => {
            Orientation::Horizontal
        }
        (Direction::Up, Direction::Right) | (Direction::Right, Direction::Up) => {
            Orientation::CornerUpRight
        }
        (Direction::Down, Direction::Right) | (Direction::Right, Direction::Down) => {
            Orientation::CornerDownRight
        }
        (Direction::Down, Direction::Left) | (Direction::Left, Direction::Down) => {
            Orientation::CornerDownLeft
        }
        (Direction::Up, Direction::Left) | (Direction::Left, Direction::Up) => {
            Orientation::CornerUpLeft
        }
        _ => return Err(GeometryError::Folded { at }),
    };

    Ok(orientation)
}

/// Tags the tail after the side its neighbor sits on.
pub fn tail_orientation(tail: Cell, next: Cell) -> Result<Orientation, GeometryError> {
    neighbor_direction(tail, next).map(Orientation::tail)
}

fn neighbor_direction(from: Cell, to: Cell) -> Result<Direction, GeometryError> {
    from.direction_to(to)
        .ok_or(GeometryError::NotAdjacent { from, to })
}

/// Snake body and heading.
///
/// The head is stored apart from the remaining segments so the body can never
/// be empty. `rest` runs from the tail (front) up to the neck (back).
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Snake {
    rest: VecDeque<Segment>,
    head: Segment,
    heading: Direction,
}

impl Snake {
    /// Creates a one-cell snake at `start` facing `heading`.
    #[must_use]
    pub fn new(start: Cell, heading: Direction) -> Self {
        Self {
            rest: VecDeque::new(),
            head: Segment::new(start, Orientation::head(heading)),
            heading,
        }
    }

    /// Creates a snake from cells ordered tail first, deriving every tag.
    pub fn from_cells(cells: Vec<Cell>, heading: Direction) -> Result<Self, SetupError> {
        let mut seen = HashSet::with_capacity(cells.len());
        if let Some(duplicate) = cells.iter().find(|cell| !seen.insert(**cell)) {
            return Err(SetupError::Overlap(*duplicate));
        }

        let (&head_cell, body_cells) = cells.split_last().ok_or(SetupError::EmptyBody)?;

        let head_orientation = match body_cells.last() {
            Some(&neck) => {
                let travel = neighbor_direction(neck, head_cell)?;
                if heading == travel.opposite() {
                    return Err(SetupError::HeadingIntoNeck);
                }
                Orientation::head(travel)
            }
            None => Orientation::head(heading),
        };

        let mut rest = VecDeque::with_capacity(body_cells.len());
        for (index, &cell) in body_cells.iter().enumerate() {
            let next = cells[index + 1];
            let orientation = match index.checked_sub(1) {
                None => tail_orientation(cell, next)?,
                Some(prev_index) => classify(cells[prev_index], cell, next)?,
            };
            rest.push_back(Segment::new(cell, orientation));
        }

        Ok(Self {
            rest,
            head: Segment::new(head_cell, head_orientation),
            heading,
        })
    }

    #[must_use]
    pub fn head(&self) -> Segment {
        self.head
    }

    /// Oldest segment; the head itself on a one-cell snake.
    #[must_use]
    pub fn tail(&self) -> Segment {
        self.rest.front().copied().unwrap_or(self.head)
    }

    #[must_use]
    pub fn heading(&self) -> Direction {
        self.heading
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rest.len() + 1
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Iterates segments from tail to head.
    pub fn segments(&self) -> impl Iterator<Item = &Segment> {
        self.rest.iter().chain(iter::once(&self.head))
    }

    /// Iterates occupied cells from tail to head.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.segments().map(|segment| segment.cell)
    }

    /// Returns true if any segment occupies `cell`.
    #[must_use]
    pub fn occupies(&self, cell: Cell) -> bool {
        self.cells().any(|occupied| occupied == cell)
    }

    /// Returns true if `cell` hits a segment that will still be there after a
    /// plain move, i.e. any segment except the current tail.
    #[must_use]
    pub fn collides_with_body(&self, cell: Cell) -> bool {
        self.cells().skip(1).any(|occupied| occupied == cell)
    }

    /// Applies a directional intent under the perpendicular-turn rule.
    ///
    /// Returns true when the heading changed.
    pub fn turn(&mut self, intent: Direction) -> bool {
        if !direction_change_is_valid(self.heading, intent) {
            return false;
        }

        self.heading = intent;
        true
    }

    /// Candidate head one cell along the heading, tagged for that heading.
    #[must_use]
    pub fn next_head(&self) -> Segment {
        Segment::new(
            self.head.cell.step(self.heading),
            Orientation::head(self.heading),
        )
    }

    /// Pushes `new_head` and drops the tail unless `grow` is set, then re-tags
    /// the tail and the former head.
    ///
    /// Only the former head can change shape: a turn always happens at the
    /// cell the head just left.
    pub fn advance(&mut self, new_head: Segment, grow: bool) -> Result<(), GeometryError> {
        let old_head = std::mem::replace(&mut self.head, new_head);
        self.rest.push_back(old_head);
        if !grow {
            let _ = self.rest.pop_front();
        }

        self.retag_tail()?;
        self.retag_neck()
    }

    fn retag_tail(&mut self) -> Result<(), GeometryError> {
        let next = self.rest.get(1).map_or(self.head.cell, |segment| segment.cell);
        if let Some(tail) = self.rest.front_mut() {
            tail.orientation = tail_orientation(tail.cell, next)?;
        }
        Ok(())
    }

    fn retag_neck(&mut self) -> Result<(), GeometryError> {
        let len = self.rest.len();
        if len < 2 {
            return Ok(());
        }

        let prev = self.rest[len - 2].cell;
        let head = self.head.cell;
        if let Some(neck) = self.rest.back_mut() {
            neck.orientation = classify(prev, neck.cell, head)?;
        }
        Ok(())
    }
}
