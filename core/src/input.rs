use crate::*;

/// Parses a `row,col` pair typed by the player and checks it against a board of side `size`.
pub fn parse_coords(text: &str, size: Coord) -> MoveResult<Coord2> {
    let mut parts = text.split(',');
    let (Some(row), Some(col), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(MoveError::InvalidFormat);
    };

    let row: i64 = row.trim().parse().map_err(|_| MoveError::InvalidNumber)?;
    let col: i64 = col.trim().parse().map_err(|_| MoveError::InvalidNumber)?;

    let out_of_bounds = MoveError::OutOfBounds {
        max: size.saturating_sub(1),
    };
    let in_bounds = |value: i64| {
        Coord::try_from(value)
            .ok()
            .filter(|&value| value < size)
            .ok_or(out_of_bounds)
    };

    Ok((in_bounds(row)?, in_bounds(col)?))
}
