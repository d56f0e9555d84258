// src/types.rs
use std::fmt;

/// Extracted position of a single tracker record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub x: i32,
    pub y: i32,
    pub angle: i32,
}

impl Position {
    pub const ZERO: Position = Position { x: 0, y: 0, angle: 0 };

    pub fn new(x: i32, y: i32, angle: i32) -> Self {
        Position { x, y, angle }
    }

    /// A position is "zero" when the tracker lost the target: both
    /// coordinates are exactly 0. The angle does not take part in the test.
    pub fn is_zero(&self) -> bool {
        self.x == 0 && self.y == 0
    }

    /// Component-wise average of two positions, truncated toward zero.
    ///
    /// Sums are taken in 64 bits so extreme coordinates cannot overflow.
    ///
    /// # Example
    ///
    /// ```
    /// use nvtfix::Position;
    ///
    /// let a = Position::new(5, 5, 90);
    /// let b = Position::new(9, 9, -3);
    /// assert_eq!(a.midpoint(&b), Position::new(7, 7, 43));
    /// ```
    pub fn midpoint(&self, other: &Position) -> Position {
        Position {
            x: average(self.x, other.x),
            y: average(self.y, other.y),
            angle: average(self.angle, other.angle),
        }
    }
}

fn average(a: i32, b: i32) -> i32 {
    ((a as i64 + b as i64) / 2) as i32
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.angle)
    }
}

/// A record index paired with the position found at that index.
///
/// Used both as the scanner's "previous record" state and as the start/stop
/// boundaries of a zero interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Boundary {
    pub index: u64,
    pub position: Position,
}

impl Boundary {
    pub fn new(index: u64, position: Position) -> Self {
        Boundary { index, position }
    }
}

impl fmt::Display for Boundary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {}", self.index, self.position)
    }
}
