//! Matrix coordinate mapping
//!
//! `(0, 0)` is the bottom-left cell, `x` grows to the right and `y` grows
//! up. The wiring is described by the corner holding the first LED and the
//! axis along which the chain runs. Mapping first rotates the coordinate
//! into chain space, where `cx` is the position along a line and `cy` the
//! line number, then flips every odd line of a serpentine matrix.

/// Line-to-line wiring
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MatrixTopology {
    /// Every other line runs backwards
    #[default]
    Serpentine,
    /// Every line starts at the same side
    RowMajor,
}

/// Corner of the first LED
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MatrixCorner {
    #[default]
    LeftBottom,
    LeftTop,
    RightTop,
    RightBottom,
}

/// Axis along which consecutive LEDs run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MatrixOrientation {
    /// Lines are rows
    #[default]
    Horizontal,
    /// Lines are columns
    Vertical,
}

/// Size and wiring of an LED matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MatrixDescriptor {
    width: u16,
    height: u16,
    topology: MatrixTopology,
    corner: MatrixCorner,
    orientation: MatrixOrientation,
}

impl MatrixDescriptor {
    /// Serpentine matrix starting bottom-left with horizontal lines
    pub const fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            topology: MatrixTopology::Serpentine,
            corner: MatrixCorner::LeftBottom,
            orientation: MatrixOrientation::Horizontal,
        }
    }

    #[must_use]
    pub const fn with_topology(mut self, topology: MatrixTopology) -> Self {
        self.topology = topology;
        self
    }

    #[must_use]
    pub const fn with_corner(mut self, corner: MatrixCorner) -> Self {
        self.corner = corner;
        self
    }

    #[must_use]
    pub const fn with_orientation(mut self, orientation: MatrixOrientation) -> Self {
        self.orientation = orientation;
        self
    }

    pub const fn width(&self) -> u16 {
        self.width
    }

    pub const fn height(&self) -> u16 {
        self.height
    }

    pub const fn topology(&self) -> MatrixTopology {
        self.topology
    }

    pub const fn corner(&self) -> MatrixCorner {
        self.corner
    }

    pub const fn orientation(&self) -> MatrixOrientation {
        self.orientation
    }

    /// Number of cells
    pub const fn len(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub const fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < self.width as i32 && y < self.height as i32
    }

    /// Buffer index of `(x, y)`, `None` outside the matrix
    #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
    pub const fn coordinate_to_index(&self, x: i32, y: i32) -> Option<usize> {
        if !self.contains(x, y) {
            return None;
        }
        Some(self.index_of(x as u16, y as u16))
    }

    /// Buffer index of an in-range `(x, y)`, checked by the caller
    const fn index_of(&self, x: u16, y: u16) -> usize {
        let (x, y) = (x as usize, y as usize);
        let (w, h) = (self.width as usize, self.height as usize);

        let (cx, cy) = match (self.corner, self.orientation) {
            (MatrixCorner::LeftBottom, MatrixOrientation::Horizontal) => (x, y),
            (MatrixCorner::LeftBottom, MatrixOrientation::Vertical) => (y, x),
            (MatrixCorner::LeftTop, MatrixOrientation::Horizontal) => (x, h - 1 - y),
            (MatrixCorner::LeftTop, MatrixOrientation::Vertical) => (h - 1 - y, x),
            (MatrixCorner::RightTop, MatrixOrientation::Horizontal) => (w - 1 - x, h - 1 - y),
            (MatrixCorner::RightTop, MatrixOrientation::Vertical) => (h - 1 - y, w - 1 - x),
            (MatrixCorner::RightBottom, MatrixOrientation::Horizontal) => (w - 1 - x, y),
            (MatrixCorner::RightBottom, MatrixOrientation::Vertical) => (y, w - 1 - x),
        };

        let line = self.line_len();
        cy * line + self.line_offset(cx, cy)
    }

    /// Coordinate of the cell wired at `index`, `None` past the last cell
    #[allow(clippy::cast_possible_truncation)]
    pub const fn index_to_coordinate(&self, index: usize) -> Option<(u16, u16)> {
        if index >= self.len() {
            return None;
        }

        let line = self.line_len();
        let cy = index / line;
        let cx = self.line_offset(index % line, cy);
        let (w, h) = (self.width as usize, self.height as usize);

        let (x, y) = match (self.corner, self.orientation) {
            (MatrixCorner::LeftBottom, MatrixOrientation::Horizontal) => (cx, cy),
            (MatrixCorner::LeftBottom, MatrixOrientation::Vertical) => (cy, cx),
            (MatrixCorner::LeftTop, MatrixOrientation::Horizontal) => (cx, h - 1 - cy),
            (MatrixCorner::LeftTop, MatrixOrientation::Vertical) => (cy, h - 1 - cx),
            (MatrixCorner::RightTop, MatrixOrientation::Horizontal) => (w - 1 - cx, h - 1 - cy),
            (MatrixCorner::RightTop, MatrixOrientation::Vertical) => (w - 1 - cy, h - 1 - cx),
            (MatrixCorner::RightBottom, MatrixOrientation::Horizontal) => (w - 1 - cx, cy),
            (MatrixCorner::RightBottom, MatrixOrientation::Vertical) => (w - 1 - cy, cx),
        };
        Some((x as u16, y as u16))
    }

    /// LEDs per line of the chain
    const fn line_len(&self) -> usize {
        match self.orientation {
            MatrixOrientation::Horizontal => self.width as usize,
            MatrixOrientation::Vertical => self.height as usize,
        }
    }

    /// Position along line `line` of the LED `offset` cells from its start
    ///
    /// Its own inverse.
    const fn line_offset(&self, offset: usize, line: usize) -> usize {
        match self.topology {
            MatrixTopology::Serpentine if line % 2 == 1 => self.line_len() - 1 - offset,
            _ => offset,
        }
    }
}
