//! Character-cell canvas
//!
//! A fixed grid of chars the scene is drawn into before the platform presents
//! it. World coordinates (800x600, y down) are scaled to the grid.

use crate::consts::{FIELD_HEIGHT, FIELD_WIDTH};
use crate::sim::Aabb;

/// Inclusive-exclusive cell rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRect {
    pub col0: usize,
    pub row0: usize,
    pub col1: usize,
    pub row1: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Canvas {
    cols: usize,
    rows: usize,
    cells: Vec<char>,
}

impl Canvas {
    pub fn new(cols: usize, rows: usize) -> Self {
        Self {
            cols,
            rows,
            cells: vec![' '; cols * rows],
        }
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn clear(&mut self) {
        self.cells.fill(' ');
    }

    pub fn get(&self, col: usize, row: usize) -> Option<char> {
        if col < self.cols && row < self.rows {
            Some(self.cells[row * self.cols + col])
        } else {
            None
        }
    }

    /// Set one cell; out-of-range writes are dropped
    pub fn put(&mut self, col: usize, row: usize, ch: char) {
        if col < self.cols && row < self.rows {
            self.cells[row * self.cols + col] = ch;
        }
    }

    /// Write a string starting at `(col, row)`, clipped at the right edge
    pub fn text(&mut self, col: usize, row: usize, text: &str) {
        for (i, ch) in text.chars().enumerate() {
            self.put(col + i, row, ch);
        }
    }

    /// Write a string centred horizontally on `row`
    pub fn text_centered(&mut self, row: usize, text: &str) {
        let len = text.chars().count();
        let col = self.cols.saturating_sub(len) / 2;
        self.text(col, row, text);
    }

    pub fn fill(&mut self, rect: CellRect, ch: char) {
        for row in rect.row0..rect.row1.min(self.rows) {
            for col in rect.col0..rect.col1.min(self.cols) {
                self.cells[row * self.cols + col] = ch;
            }
        }
    }

    /// Cell row containing world y
    pub fn row_of(&self, y: f32) -> usize {
        let r = (y * self.rows as f32 / FIELD_HEIGHT).floor();
        (r.max(0.0) as usize).min(self.rows.saturating_sub(1))
    }

    /// Cells covered by a world-space box, clipped to the grid
    ///
    /// Any box with positive area covers at least one cell if it is on screen.
    pub fn project(&self, aabb: &Aabb) -> Option<CellRect> {
        let sx = self.cols as f32 / FIELD_WIDTH;
        let sy = self.rows as f32 / FIELD_HEIGHT;

        let col0 = (aabb.min.x * sx).floor().max(0.0);
        let col1 = (aabb.max.x * sx).ceil().min(self.cols as f32);
        let row0 = (aabb.min.y * sy).floor().max(0.0);
        let row1 = (aabb.max.y * sy).ceil().min(self.rows as f32);

        if col0 >= col1 || row0 >= row1 {
            return None;
        }
        Some(CellRect {
            col0: col0 as usize,
            row0: row0 as usize,
            col1: col1 as usize,
            row1: row1 as usize,
        })
    }

    /// One row as a string
    pub fn line(&self, row: usize) -> String {
        let start = row * self.cols;
        self.cells[start..start + self.cols].iter().collect()
    }

    pub fn lines(&self) -> impl Iterator<Item = String> + '_ {
        (0..self.rows).map(|row| self.line(row))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    #[test]
    fn test_put_and_clip() {
        let mut canvas = Canvas::new(4, 2);
        canvas.put(1, 1, 'x');
        canvas.put(10, 10, 'y');
        assert_eq!(canvas.get(1, 1), Some('x'));
        assert_eq!(canvas.get(10, 10), None);
        assert_eq!(canvas.line(1), " x  ");
    }

    #[test]
    fn test_text_clips_at_edge() {
        let mut canvas = Canvas::new(5, 1);
        canvas.text(3, 0, "abc");
        assert_eq!(canvas.line(0), "   ab");
    }

    #[test]
    fn test_text_centered() {
        let mut canvas = Canvas::new(9, 1);
        canvas.text_centered(0, "abc");
        assert_eq!(canvas.line(0), "   abc   ");
    }

    #[test]
    fn test_project_full_field() {
        let canvas = Canvas::new(80, 30);
        let rect = canvas
            .project(&Aabb::new(Vec2::ZERO, Vec2::new(FIELD_WIDTH, FIELD_HEIGHT)))
            .unwrap();
        assert_eq!(
            rect,
            CellRect {
                col0: 0,
                row0: 0,
                col1: 80,
                row1: 30
            }
        );
    }

    #[test]
    fn test_project_clips_and_rejects_off_screen() {
        let canvas = Canvas::new(80, 30);
        let partly = Aabb::new(Vec2::new(-50.0, 500.0), Vec2::new(20.0, 564.0));
        let rect = canvas.project(&partly).unwrap();
        assert_eq!(rect.col0, 0);
        assert_eq!(rect.col1, 2);

        let gone = Aabb::new(Vec2::new(-100.0, 500.0), Vec2::new(-10.0, 564.0));
        assert_eq!(canvas.project(&gone), None);
    }

    #[test]
    fn test_fill_and_clear() {
        let mut canvas = Canvas::new(3, 2);
        canvas.fill(
            CellRect {
                col0: 0,
                row0: 0,
                col1: 2,
                row1: 5,
            },
            '#',
        );
        assert_eq!(canvas.lines().collect::<Vec<_>>(), vec!["## ", "## "]);
        canvas.clear();
        assert_eq!(canvas.line(0), "   ");
    }

    #[test]
    fn test_row_of() {
        let canvas = Canvas::new(80, 30);
        assert_eq!(canvas.row_of(0.0), 0);
        assert_eq!(canvas.row_of(564.0), 28);
        assert_eq!(canvas.row_of(10_000.0), 29);
    }
}
