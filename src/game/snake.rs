use std::collections::VecDeque;

use super::direction::Direction;
use super::grid::CellState;
use super::point::Point;

/// A single cell change produced by the snake
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellUpdate {
    pub point: Point,
    pub state: CellState,
}

impl CellUpdate {
    pub fn new(point: Point, state: CellState) -> Self {
        Self { point, state }
    }
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at the front
    body: VecDeque<Point>,
    /// Current direction of movement
    direction: Direction,
    /// At most one queued turn, applied at the start of the next update
    pending: Option<Direction>,
    /// Cell left behind by the latest update, available to `grow` once
    vacated: Option<Point>,
    width: usize,
    height: usize,
}

impl Snake {
    /// Create a snake whose body trails behind `head`, opposite to `direction`.
    /// `width` and `height` are the bounds it must stay within to live.
    pub fn new(head: Point, direction: Direction, length: usize, width: usize, height: usize) -> Self {
        let (dx, dy) = direction.opposite().delta();
        let mut body = VecDeque::from([head]);
        let mut last = head;
        while body.len() < length {
            last = last.moved_by(dx, dy);
            body.push_back(last);
        }

        Self {
            body,
            direction,
            pending: None,
            vacated: None,
            width,
            height,
        }
    }

    /// Create a snake from explicit segments, head first.
    ///
    /// # Panics
    ///
    /// Panics if `segments` is empty.
    pub fn from_segments(
        segments: impl IntoIterator<Item = Point>,
        direction: Direction,
        width: usize,
        height: usize,
    ) -> Self {
        let body: VecDeque<Point> = segments.into_iter().collect();
        assert!(!body.is_empty(), "a snake needs at least one segment");

        Self {
            body,
            direction,
            pending: None,
            vacated: None,
            width,
            height,
        }
    }

    /// Get the head position
    pub fn head(&self) -> Point {
        self.body[0]
    }

    /// Get the tail position (last segment)
    pub fn tail(&self) -> Point {
        self.body[self.body.len() - 1]
    }

    pub fn segments(&self) -> impl Iterator<Item = Point> + '_ {
        self.body.iter().copied()
    }

    pub fn contains(&self, point: Point) -> bool {
        self.body.contains(&point)
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn pending_direction(&self) -> Option<Direction> {
        self.pending
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Always false; a snake is never built without segments
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Queue a turn for the next update.
    ///
    /// Ignored when a turn is already queued, when it would reverse the
    /// snake onto itself, or when it is the current heading. Returns whether
    /// the turn was queued.
    pub fn request_direction(&mut self, direction: Direction) -> bool {
        if self.pending.is_some()
            || direction == self.direction
            || direction.is_opposite(self.direction)
        {
            return false;
        }
        self.pending = Some(direction);
        true
    }

    /// Advance one cell.
    ///
    /// The tail segment is moved to the new head position. Returns the cell
    /// changes, vacated tail first so that a head entering the cell the tail
    /// just left ends up occupied.
    pub fn update(&mut self) -> [CellUpdate; 2] {
        if let Some(direction) = self.pending.take() {
            self.direction = direction;
        }

        let next = self.head().moved_in_direction(self.direction);
        let tail = self.body.pop_back().unwrap_or(next);
        self.body.push_front(next);
        self.vacated = Some(tail);

        [
            CellUpdate::new(tail, CellState::Empty),
            CellUpdate::new(next, CellState::Occupied),
        ]
    }

    /// Extend the body into the cell vacated by the latest update.
    ///
    /// The vacated cell can be used once; further calls before the next
    /// update return `None` and leave the snake unchanged.
    pub fn grow(&mut self) -> Option<CellUpdate> {
        let cell = self.vacated.take()?;
        self.body.push_back(cell);
        Some(CellUpdate::new(cell, CellState::Occupied))
    }

    /// False once the head is off the grid or on another segment
    pub fn is_alive(&self) -> bool {
        let head = self.head();
        head.is_within(self.width, self.height) && !self.body.iter().skip(1).any(|p| *p == head)
    }
}
