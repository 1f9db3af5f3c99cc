use super::{
    RowValue,
    SliceValue,
    NR_ROWS_AND_COLUMNS,
};

/// Maximum value of a slice, for loops over all the possible slice values.
pub const MAX_SLICE_VALUE: SliceValue = 0x1FF_FFFF;

/// Mask of the 5 bits of a row.
pub const ROW_MASK: RowValue = 0x1F;

/// Slice with all bits zero except at row y, which is set to `row`.
#[inline]
pub fn slice_from_row(row: RowValue, y: u32) -> SliceValue {
    (row as SliceValue) << (5 * y)
}

/// Row y of the given slice.
#[inline]
pub fn row_from_slice(slice: SliceValue, y: u32) -> RowValue {
    ((slice >> (5 * y)) & ROW_MASK as SliceValue) as RowValue
}

/// Slice made of 5 rows, `rows[y]` at row y.
pub fn slice_value(rows: [RowValue; 5]) -> SliceValue {
    rows.iter()
        .enumerate()
        .fold(0, |slice, (y, row)| slice | slice_from_row(*row & ROW_MASK, y as u32))
}

/// Translates a row along x by `dx` positions, `0 <= dx < 5`.
#[inline]
pub fn translate_row(row: RowValue, dx: u32) -> RowValue {
    if dx == 0 {
        row
    } else {
        ((row << dx) | (row >> (5 - dx))) & ROW_MASK
    }
}

/// Same as `translate_row`, any positive or negative `dx`.
pub fn translate_row_safely(row: RowValue, dx: i32) -> RowValue {
    translate_row(row, dx.rem_euclid(NR_ROWS_AND_COLUMNS as i32) as u32)
}

/// Translates a slice along x by `dx` and along y by `dy`, `0 <= dx, dy < 5`.
///
/// Every row is rotated by `dx`, then row y moves to row `y + dy`.
pub fn translate_slice(slice: SliceValue, dx: u32, dy: u32) -> SliceValue {
    (0..NR_ROWS_AND_COLUMNS).fold(0, |result, y| {
        let row = translate_row(row_from_slice(slice, y), dx);
        result | slice_from_row(row, (y + dy) % NR_ROWS_AND_COLUMNS)
    })
}

/// Same as `translate_slice`, any positive or negative `dx` and `dy`.
pub fn translate_slice_safely(slice: SliceValue, dx: i32, dy: i32) -> SliceValue {
    let n = NR_ROWS_AND_COLUMNS as i32;
    translate_slice(slice, dx.rem_euclid(n) as u32, dy.rem_euclid(n) as u32)
}
