//! Normalization geometry.

/// Scale `(width, height)` down so the longer edge equals `max_dimension`.
///
/// Images whose longer edge is already within the limit are returned
/// unchanged. The shorter edge is truncated and never drops below 1.
pub fn scale_to_fit(width: u32, height: u32, max_dimension: u32) -> (u32, u32) {
    let longer = width.max(height);
    if longer <= max_dimension || longer == 0 {
        return (width, height);
    }

    let scale = |edge: u32| -> u32 {
        let scaled = (edge as u64 * max_dimension as u64) / longer as u64;
        (scaled as u32).max(1)
    };

    if width >= height {
        (max_dimension, scale(height))
    } else {
        (scale(width), max_dimension)
    }
}

/// Largest centered square inside `(width, height)`: `(x, y, side)`.
///
/// The crop is symmetric along the longer axis; an odd remainder leaves the
/// extra pixel on the right/bottom.
pub fn center_square(width: u32, height: u32) -> (u32, u32, u32) {
    let side = width.min(height);
    ((width - side) / 2, (height - side) / 2, side)
}
