//! Pixel connectivity

/// Neighbor offsets `(drow, dcol)` sharing an edge with a pixel
const FOUR_WAY_OFFSETS: [(i64, i64); 4] = [(-1, 0), (0, -1), (0, 1), (1, 0)];

/// Neighbor offsets `(drow, dcol)` sharing an edge or a corner with a pixel
const EIGHT_WAY_OFFSETS: [(i64, i64); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Connectivity type for region growing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectivityType {
    /// 4-way connectivity (up, down, left, right)
    FourWay,
    /// 8-way connectivity (includes diagonals)
    #[default]
    EightWay,
}

impl ConnectivityType {
    /// Offsets `(drow, dcol)` of the neighbors of a pixel.
    pub fn offsets(self) -> &'static [(i64, i64)] {
        match self {
            ConnectivityType::FourWay => &FOUR_WAY_OFFSETS,
            ConnectivityType::EightWay => &EIGHT_WAY_OFFSETS,
        }
    }
}
