use crate::{
    foundation::{
        core::{Canvas, Point, Vec2},
        error::{DotwalkError, DotwalkResult},
    },
    grid::{
        dot::{Dot, DotId, Generation},
        palette::Palette,
    },
};

/// Fixed rows x cols grid of square cells, centered in the canvas.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GridLayout {
    /// Cells per column.
    pub rows: u32,
    /// Cells per row.
    pub cols: u32,
    /// Cell edge in pixels.
    pub cell_size: f64,
}

impl Default for GridLayout {
    fn default() -> Self {
        Self {
            rows: 60,
            cols: 30,
            cell_size: 10.0,
        }
    }
}

impl GridLayout {
    /// Reject empty grids, bad cell sizes and grids whose ids would overflow.
    pub fn validate(&self) -> DotwalkResult<()> {
        if self.rows == 0 || self.cols == 0 {
            return Err(DotwalkError::validation("grid rows/cols must be non-zero"));
        }
        if !self.cell_size.is_finite() || self.cell_size <= 0.0 {
            return Err(DotwalkError::validation(
                "grid cell_size must be finite and > 0",
            ));
        }
        if u64::from(self.rows) * u64::from(self.cols) > u64::from(u32::MAX) {
            return Err(DotwalkError::validation("grid has too many cells"));
        }
        Ok(())
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.rows as usize * self.cols as usize
    }

    /// True for a grid with no cells.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Offset that centers the `cols*cell` by `rows*cell` block. Negative when the grid is
    /// larger than the canvas.
    pub fn offset(&self, canvas: Canvas) -> Vec2 {
        let block_w = f64::from(self.cols) * self.cell_size;
        let block_h = f64::from(self.rows) * self.cell_size;
        Vec2::new(
            (f64::from(canvas.width) - block_w) / 2.0,
            (f64::from(canvas.height) - block_h) / 2.0,
        )
    }

    /// Top-left of cell (`row`, `col`) on `canvas`.
    pub fn cell_origin(&self, canvas: Canvas, row: u32, col: u32) -> Point {
        let offset = self.offset(canvas);
        Point::new(
            f64::from(col) * self.cell_size + offset.x,
            f64::from(row) * self.cell_size + offset.y,
        )
    }

    /// Populate a fresh generation of dots in row-major order.
    pub fn build(
        &self,
        canvas: Canvas,
        palette: &Palette,
        generation: Generation,
        rng: &mut impl rand::Rng,
    ) -> DotwalkResult<Vec<Dot>> {
        self.validate()?;

        let mut dots = Vec::with_capacity(self.len());
        for row in 0..self.rows {
            for col in 0..self.cols {
                let id = DotId(row * self.cols + col);
                let position = self.cell_origin(canvas, row, col);
                dots.push(Dot::new(
                    id,
                    generation,
                    position,
                    self.cell_size,
                    palette.pick(rng),
                ));
            }
        }
        Ok(dots)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/grid/layout.rs"]
mod tests;
