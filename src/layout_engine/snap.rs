/// Correction that aligns an edge of a moving window with a reference edge.
///
/// `n0`/`n1` are the near and far edges of the window, `e0`/`e1` the matching
/// reference edges. An edge snaps when it is within `dist` pixels. When both
/// could snap the smaller correction wins, with ties going to the far edge.
pub fn snap(n0: i32, n1: i32, e0: i32, e1: i32, dist: i32) -> i32 {
    let s0 = if (e0 - n0).abs() <= dist { e0 - n0 } else { 0 };
    let s1 = if (e1 - n1).abs() <= dist { e1 - n1 } else { 0 };

    match (s0, s1) {
        (0, 0) => 0,
        (s0, 0) => s0,
        (0, s1) => s1,
        (s0, s1) if s0.abs() < s1.abs() => s0,
        (_, s1) => s1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn near_edge_pulls_when_far_edge_is_out_of_range() {
        assert_eq!(snap(100, 140, 98, 200, 5), -2);
    }

    #[test]
    fn nothing_in_range_gives_zero() {
        assert_eq!(snap(100, 140, 50, 200, 5), 0);
        assert_eq!(snap(100, 140, 98, 142, 0), 0);
    }

    #[test]
    fn smaller_correction_wins() {
        assert_eq!(snap(10, 90, 7, 91, 5), 1);
        assert_eq!(snap(10, 90, 11, 95, 5), 1);
    }

    #[test]
    fn ties_prefer_the_far_edge() {
        assert_eq!(snap(10, 90, 12, 88, 5), -2);
    }
}
