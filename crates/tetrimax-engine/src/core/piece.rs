use std::{fmt, str::FromStr};

use rand::{Rng, distr::StandardUniform, prelude::Distribution};

use crate::StateError;

/// Enum representing the type of piece.
///
/// The discriminant order matches [`PieceKind::ALL`], which is the order every
/// chance layer iterates the seven pieces in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
#[repr(u8)]
pub enum PieceKind {
    /// O-piece.
    O = 0,
    /// I-piece.
    I = 1,
    /// S-piece.
    S = 2,
    /// Z-piece.
    Z = 3,
    /// L-piece.
    L = 4,
    /// J-piece.
    J = 5,
    /// T-piece.
    T = 6,
}

impl Distribution<PieceKind> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceKind {
        PieceKind::ALL[rng.random_range(0..PieceKind::LEN)]
    }
}

impl PieceKind {
    /// Number of piece types (7).
    pub const LEN: usize = 7;

    /// All piece types in canonical order.
    pub const ALL: [PieceKind; Self::LEN] = [
        PieceKind::O,
        PieceKind::I,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::L,
        PieceKind::J,
        PieceKind::T,
    ];

    /// Returns every distinct orientation of this piece, indexed by [`Orientation`].
    #[must_use]
    pub const fn shapes(self) -> &'static [PieceShape] {
        match self {
            PieceKind::O => &O_SHAPES,
            PieceKind::I => &I_SHAPES,
            PieceKind::S => &S_SHAPES,
            PieceKind::Z => &Z_SHAPES,
            PieceKind::L => &L_SHAPES,
            PieceKind::J => &J_SHAPES,
            PieceKind::T => &T_SHAPES,
        }
    }

    /// Number of distinct orientations (1 for O, 2 for I/S/Z, 4 for L/J/T).
    #[must_use]
    pub const fn orientation_count(self) -> usize {
        self.shapes().len()
    }

    /// Returns the shape for `orientation`, or `None` if the piece has no such orientation.
    #[must_use]
    pub fn shape(self, orientation: Orientation) -> Option<&'static PieceShape> {
        self.shapes().get(orientation.index())
    }

    /// Iterates the valid orientations of this piece in ascending order.
    pub fn orientations(self) -> impl Iterator<Item = Orientation> {
        (0..self.orientation_count()).map(Orientation::from_index)
    }

    /// Returns the single character representation of this piece kind.
    ///
    /// # Examples
    ///
    /// ```
    /// use tetrimax_engine::PieceKind;
    ///
    /// assert_eq!(PieceKind::I.as_char(), 'I');
    /// assert_eq!(PieceKind::T.as_char(), 'T');
    /// ```
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            PieceKind::O => 'O',
            PieceKind::I => 'I',
            PieceKind::S => 'S',
            PieceKind::Z => 'Z',
            PieceKind::L => 'L',
            PieceKind::J => 'J',
            PieceKind::T => 'T',
        }
    }

    /// Parses a piece kind from a single character.
    ///
    /// # Examples
    ///
    /// ```
    /// use tetrimax_engine::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_char('L'), Some(PieceKind::L));
    /// assert_eq!(PieceKind::from_char('X'), None);
    /// ```
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'O' => Some(PieceKind::O),
            'I' => Some(PieceKind::I),
            'S' => Some(PieceKind::S),
            'Z' => Some(PieceKind::Z),
            'L' => Some(PieceKind::L),
            'J' => Some(PieceKind::J),
            'T' => Some(PieceKind::T),
            _ => None,
        }
    }
}

impl FromStr for PieceKind {
    type Err = StateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::from_char(c),
            _ => None,
        }
        .ok_or_else(|| StateError::UnknownPiece { name: s.to_owned() })
    }
}

/// Index into a piece's list of distinct rotations.
///
/// An orientation is only meaningful together with a [`PieceKind`]; whether it
/// is valid for a given piece is checked with [`PieceKind::shape`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Orientation(u8);

impl Orientation {
    #[must_use]
    pub const fn new(index: u8) -> Self {
        Self(index)
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[expect(clippy::cast_possible_truncation)]
    const fn from_index(index: usize) -> Self {
        Self(index as u8)
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Binary occupancy grid of one piece orientation.
///
/// Every tetromino covers exactly four cells; they are stored as `(row, col)`
/// offsets from the top-left corner of the grid, in row-major order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceShape {
    width: usize,
    height: usize,
    cells: [(usize, usize); 4],
}

impl PieceShape {
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Filled cells as `(row, col)` offsets within the grid.
    #[must_use]
    pub const fn cells(&self) -> &[(usize, usize); 4] {
        &self.cells
    }

    /// Returns whether the grid cell at `(row, col)` is filled.
    #[must_use]
    pub fn is_filled(&self, row: usize, col: usize) -> bool {
        self.cells.contains(&(row, col))
    }
}

/// Builds a [`PieceShape`] from a row-major 0/1 grid.
const fn shape<const H: usize, const W: usize>(grid: [[u8; W]; H]) -> PieceShape {
    let mut cells = [(0, 0); 4];
    let mut n = 0;
    let mut row = 0;
    while row < H {
        let mut col = 0;
        while col < W {
            if grid[row][col] == 1 {
                cells[n] = (row, col);
                n += 1;
            }
            col += 1;
        }
        row += 1;
    }
    assert!(n == 4, "a tetromino covers exactly four cells");
    PieceShape {
        width: W,
        height: H,
        cells,
    }
}

const O_SHAPES: [PieceShape; 1] = [shape([[1, 1], [1, 1]])];

const I_SHAPES: [PieceShape; 2] = [shape([[1], [1], [1], [1]]), shape([[1, 1, 1, 1]])];

const S_SHAPES: [PieceShape; 2] = [
    shape([[0, 1, 1], [1, 1, 0]]),
    shape([[1, 0], [1, 1], [0, 1]]),
];

const Z_SHAPES: [PieceShape; 2] = [
    shape([[1, 1, 0], [0, 1, 1]]),
    shape([[0, 1], [1, 1], [1, 0]]),
];

const L_SHAPES: [PieceShape; 4] = [
    shape([[1, 0], [1, 0], [1, 1]]),
    shape([[1, 1, 1], [1, 0, 0]]),
    shape([[1, 1], [0, 1], [0, 1]]),
    shape([[0, 0, 1], [1, 1, 1]]),
];

const J_SHAPES: [PieceShape; 4] = [
    shape([[0, 1], [0, 1], [1, 1]]),
    shape([[1, 0, 0], [1, 1, 1]]),
    shape([[1, 1], [1, 0], [1, 0]]),
    shape([[1, 1, 1], [0, 0, 1]]),
];

const T_SHAPES: [PieceShape; 4] = [
    shape([[1, 1, 1], [0, 1, 0]]),
    shape([[1, 0], [1, 1], [1, 0]]),
    shape([[0, 1, 0], [1, 1, 1]]),
    shape([[0, 1], [1, 1], [0, 1]]),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orientation_counts() {
        assert_eq!(PieceKind::O.orientation_count(), 1);
        for kind in [PieceKind::I, PieceKind::S, PieceKind::Z] {
            assert_eq!(kind.orientation_count(), 2, "{kind}");
        }
        for kind in [PieceKind::L, PieceKind::J, PieceKind::T] {
            assert_eq!(kind.orientation_count(), 4, "{kind}");
        }
    }

    #[test]
    fn test_every_shape_fits_its_grid() {
        for kind in PieceKind::ALL {
            for orientation in kind.orientations() {
                let shape = kind.shape(orientation).unwrap();
                for &(row, col) in shape.cells() {
                    assert!(row < shape.height() && col < shape.width());
                }
                // no empty top row or left column in any grid
                assert!(shape.cells().iter().any(|&(row, _)| row == 0));
                assert!(shape.cells().iter().any(|&(_, col)| col == 0));
            }
        }
    }

    #[test]
    fn test_i_piece_orientations() {
        let vertical = PieceKind::I.shape(Orientation::new(0)).unwrap();
        assert_eq!((vertical.width(), vertical.height()), (1, 4));
        let horizontal = PieceKind::I.shape(Orientation::new(1)).unwrap();
        assert_eq!((horizontal.width(), horizontal.height()), (4, 1));
        assert!(PieceKind::I.shape(Orientation::new(2)).is_none());
    }

    #[test]
    fn test_t_piece_grid() {
        let t = PieceKind::T.shape(Orientation::new(0)).unwrap();
        assert!(t.is_filled(0, 0) && t.is_filled(0, 1) && t.is_filled(0, 2));
        assert!(t.is_filled(1, 1));
        assert!(!t.is_filled(1, 0) && !t.is_filled(1, 2));
    }

    #[test]
    fn test_piece_kind_parsing() {
        for kind in PieceKind::ALL {
            assert_eq!(kind.to_string().parse::<PieceKind>(), Ok(kind));
            assert_eq!(PieceKind::from_char(kind.as_char()), Some(kind));
        }
        assert_eq!(
            "X".parse::<PieceKind>(),
            Err(StateError::UnknownPiece {
                name: "X".to_owned()
            })
        );
        assert!("".parse::<PieceKind>().is_err());
        assert!("II".parse::<PieceKind>().is_err());
        assert!("i".parse::<PieceKind>().is_err());
    }

    #[test]
    fn test_uniform_sampling_covers_all_kinds() {
        use rand::SeedableRng as _;

        let mut rng = rand_pcg::Pcg32::seed_from_u64(7);
        let mut seen = [false; PieceKind::LEN];
        for _ in 0..500 {
            let kind: PieceKind = rng.random();
            seen[kind as usize] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }
}
