//! A rectangular, band-selecting view onto an image segment's pixels
//!.

#[derive(Debug, Clone)]
pub struct SubWindow {
    pub start_row: u64,
    pub start_col: u64,
    pub num_rows: u64,
    pub num_cols: u64,
    pub bands: Vec<u32>,
}

impl SubWindow {
    pub fn full(num_rows: u64, num_cols: u64, nbands: u32) -> Self {
        Self {
            start_row: 0,
            start_col: 0,
            num_rows,
            num_cols,
            bands: (0..nbands).collect(),
        }
    }

    pub fn end_row(&self) -> u64 {
        self.start_row + self.num_rows
    }

    pub fn end_col(&self) -> u64 {
        self.start_col + self.num_cols
    }
}
