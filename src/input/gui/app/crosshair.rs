/// Half-width of the centre marker, in physical pixels.
pub const CROSSHAIR_RADIUS: i32 = 7;

/// Light outline: both diagonals and both axes, each three pixels thick.
#[must_use]
pub fn in_outline(x: i32, y: i32) -> bool {
    x.abs() == y.abs() || x.abs() <= 1 || y.abs() <= 1 || (x - y).abs() <= 1 || (x + y).abs() <= 1
}

/// Dark one-pixel lines drawn over the outline, stopping short of its edge.
#[must_use]
pub fn in_inline(x: i32, y: i32) -> bool {
    (x.abs() == y.abs() || x == 0 || y == 0) && x.abs() < CROSSHAIR_RADIUS && y.abs() < CROSSHAIR_RADIUS
}

/// Offsets from the screen centre covered by `shape`, row by row.
pub fn crosshair_offsets(shape: fn(i32, i32) -> bool) -> impl Iterator<Item = (i32, i32)> {
    (-CROSSHAIR_RADIUS..=CROSSHAIR_RADIUS)
        .flat_map(|y| (-CROSSHAIR_RADIUS..=CROSSHAIR_RADIUS).map(move |x| (x, y)))
        .filter(move |&(x, y)| shape(x, y))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inline_sits_inside_outline() {
        for (x, y) in crosshair_offsets(in_inline) {
            assert!(in_outline(x, y), "({x}, {y}) is not outlined");
        }
    }

    #[test]
    fn centre_and_axes_are_marked() {
        assert!(in_inline(0, 0));
        assert!(in_inline(6, 0));
        assert!(in_inline(-4, -4));
        assert!(!in_inline(7, 0));
        assert!(in_outline(7, 7));
        assert!(in_outline(7, -1));
    }

    #[test]
    fn gaps_between_arms_stay_clear() {
        assert!(!in_outline(3, 6));
        assert!(!in_outline(-6, 2));
        assert!(!in_inline(2, 5));
    }

    #[test]
    fn offsets_are_symmetric() {
        let outline: Vec<_> = crosshair_offsets(in_outline).collect();

        for &(x, y) in &outline {
            assert!(outline.contains(&(-x, y)));
            assert!(outline.contains(&(x, -y)));
        }
    }
}
