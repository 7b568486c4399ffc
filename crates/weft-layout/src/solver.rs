//! The box-layout solver.
//!
//! [`solve`] turns a list of per-child [`SizePolicy`]s and an available
//! extent into concrete extents, one axis at a time. The algorithm is a
//! two-phase greedy distribution:
//!
//! 1. every child starts at its (clamped) hint;
//! 2. positive slack is handed to growth-capable children proportionally
//!    to their stretch, iterating as children hit their maximums;
//! 3. negative slack is taken from shrink-capable children the same way,
//!    clamped at each child's minimum.
//!
//! Iteration is always in input order, so identical inputs produce
//! identical extents. When integer division leaves remainder cells, they
//! go one at a time to the earliest-indexed still-eligible child.

use crate::policy::SizePolicy;

/// The result of solving one axis of a container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolveOutcome {
    /// Concrete extents, in input order.
    Fit(Vec<u16>),
    /// The children's effective minimums exceed the available extent.
    ///
    /// Not an error: the container paints a "too small" indicator instead
    /// of children until it is resized large enough.
    Undersized,
}

impl SolveOutcome {
    /// Returns the extents, or `None` when undersized.
    #[inline]
    pub fn extents(&self) -> Option<&[u16]> {
        match self {
            Self::Fit(extents) => Some(extents),
            Self::Undersized => None,
        }
    }

    /// Returns `true` when the container cannot fit its children.
    #[inline]
    pub const fn is_undersized(&self) -> bool {
        matches!(self, Self::Undersized)
    }
}

/// Solves one axis: turns child policies plus available space into
/// concrete extents.
///
/// Extents sum to `available` whenever the policies permit it; every
/// extent lies in `[floor, ceiling]` of its policy. See the module
/// documentation for the distribution rules.
pub fn solve(policies: &[SizePolicy], available: u16) -> SolveOutcome {
    if policies.is_empty() {
        return SolveOutcome::Fit(Vec::new());
    }

    let mut extents: Vec<u16> = policies.iter().map(SizePolicy::clamped_hint).collect();
    let total: i64 = extents.iter().map(|&e| e as i64).sum();
    let slack = available as i64 - total;

    if slack > 0 {
        grow(policies, &mut extents, slack);
    } else if slack < 0 {
        let deficit = shrink(policies, &mut extents, -slack);
        if deficit > 0 {
            return SolveOutcome::Undersized;
        }
    }

    SolveOutcome::Fit(extents)
}

/// Distributes positive slack among growth-capable children.
fn grow(policies: &[SizePolicy], extents: &mut [u16], mut slack: i64) {
    while slack > 0 {
        let eligible: Vec<usize> = (0..policies.len())
            .filter(|&i| policies[i].kind.can_grow() && extents[i] < policies[i].ceiling())
            .collect();
        if eligible.is_empty() {
            break;
        }

        let total_stretch: i64 = eligible.iter().map(|&i| policies[i].stretch as i64).sum();
        let mut granted = 0i64;

        for &i in &eligible {
            let share = slack * policies[i].stretch as i64 / total_stretch;
            let headroom = (policies[i].ceiling() - extents[i]) as i64;
            let grant = share.min(headroom);
            extents[i] += grant as u16;
            granted += grant;
        }

        if granted == 0 {
            // Shares floored to zero: hand out the remainder one cell at a
            // time, earliest-indexed eligible child first.
            for &i in &eligible {
                if granted == slack {
                    break;
                }
                if extents[i] < policies[i].ceiling() {
                    extents[i] += 1;
                    granted += 1;
                }
            }
            if granted == 0 {
                break;
            }
        }

        slack -= granted;
    }
}

/// Takes a deficit back from shrink-capable children.
///
/// Returns the deficit that could not be recovered; a non-zero return
/// means the layout is undersized.
fn shrink(policies: &[SizePolicy], extents: &mut [u16], mut deficit: i64) -> i64 {
    while deficit > 0 {
        let eligible: Vec<usize> = (0..policies.len())
            .filter(|&i| policies[i].kind.can_shrink() && extents[i] > policies[i].floor())
            .collect();
        if eligible.is_empty() {
            break;
        }

        let total_stretch: i64 = eligible.iter().map(|&i| policies[i].stretch as i64).sum();
        let mut taken = 0i64;

        for &i in &eligible {
            let share = deficit * policies[i].stretch as i64 / total_stretch;
            let leeway = (extents[i] - policies[i].floor()) as i64;
            let take = share.min(leeway);
            extents[i] -= take as u16;
            taken += take;
        }

        if taken == 0 {
            for &i in &eligible {
                if taken == deficit {
                    break;
                }
                if extents[i] > policies[i].floor() {
                    extents[i] -= 1;
                    taken += 1;
                }
            }
            if taken == 0 {
                break;
            }
        }

        deficit -= taken;
    }

    deficit
}

/// Turns extents into cumulative offsets.
///
/// Children are placed at the running sum of their predecessors' extents,
/// so there are no gaps and no overlaps by construction.
pub fn positions(extents: &[u16]) -> Vec<u16> {
    let mut offsets = Vec::with_capacity(extents.len());
    let mut cursor = 0u16;
    for &extent in extents {
        offsets.push(cursor);
        cursor = cursor.saturating_add(extent);
    }
    offsets
}

/// Solves the orthogonal axis for a single child.
///
/// Growth-capable children fill the available cross extent (up to their
/// maximum); other children hold their clamped hint, giving way only if
/// they can shrink and would not fit.
pub fn solve_cross(policy: &SizePolicy, available: u16) -> u16 {
    let mut extent = policy.clamped_hint();

    if policy.kind.can_grow() {
        extent = extent.max(policy.max.min(available));
    }
    if extent > available && policy.kind.can_shrink() {
        extent = available.max(policy.min);
    }

    extent
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::PolicyKind;
    use pretty_assertions::assert_eq;

    fn fit(policies: &[SizePolicy], available: u16) -> Vec<u16> {
        match solve(policies, available) {
            SolveOutcome::Fit(extents) => extents,
            SolveOutcome::Undersized => panic!("unexpected undersized layout"),
        }
    }

    #[test]
    fn test_empty_children() {
        assert_eq!(solve(&[], 42), SolveOutcome::Fit(vec![]));
    }

    #[test]
    fn test_fixed_plus_expanding() {
        // A fixed 3-cell child next to an expanding child in 10 cells.
        let policies = [SizePolicy::fixed(3), SizePolicy::expanding(2)];
        assert_eq!(fit(&policies, 10), vec![3, 7]);
    }

    #[test]
    fn test_fixed_plus_expanding_shrinks() {
        // Same pair squeezed into 4 cells: the expanding child gives way.
        let policies = [SizePolicy::fixed(3), SizePolicy::expanding(2)];
        assert_eq!(fit(&policies, 4), vec![3, 1]);
    }

    #[test]
    fn test_undersized_when_fixed_children_cannot_give() {
        let policies = [SizePolicy::fixed(3), SizePolicy::fixed(3)];
        assert!(solve(&policies, 4).is_undersized());
    }

    #[test]
    fn test_undersized_when_minimums_exceed_available() {
        let policies = [
            SizePolicy::preferred(10).with_range(5, 20),
            SizePolicy::preferred(10).with_range(5, 20),
        ];
        assert!(solve(&policies, 8).is_undersized());
        // 10 is exactly the sum of minimums.
        assert_eq!(fit(&policies, 10), vec![5, 5]);
    }

    #[test]
    fn test_stretch_weights_growth() {
        let policies = [
            SizePolicy::expanding(0).with_stretch(1),
            SizePolicy::expanding(0).with_stretch(3),
        ];
        assert_eq!(fit(&policies, 8), vec![2, 6]);
    }

    #[test]
    fn test_remainder_goes_to_earliest_children() {
        let policies = [
            SizePolicy::expanding(0),
            SizePolicy::expanding(0),
            SizePolicy::expanding(0),
        ];
        // 10 / 3 leaves one remainder cell for the first child.
        assert_eq!(fit(&policies, 10), vec![4, 3, 3]);
    }

    #[test]
    fn test_growth_respects_maximums() {
        let policies = [
            SizePolicy::expanding(0).with_range(0, 3),
            SizePolicy::expanding(0),
        ];
        // First child caps at 3; the rest flows to the second.
        assert_eq!(fit(&policies, 10), vec![3, 7]);
    }

    #[test]
    fn test_shrink_respects_minimums() {
        let policies = [
            SizePolicy::preferred(10).with_range(8, 20),
            SizePolicy::preferred(10).with_range(0, 20),
        ];
        // Deficit of 8: child 0 can only give 2, child 1 gives the rest.
        assert_eq!(fit(&policies, 12), vec![8, 4]);
    }

    #[test]
    fn test_non_shrinking_kinds_hold_their_hint() {
        let policies = [
            SizePolicy::minimum(6).with_range(2, 20),
            SizePolicy::preferred(6).with_range(2, 20),
        ];
        // Minimum cannot shrink below its hint even though min is 2.
        assert_eq!(fit(&policies, 10), vec![6, 4]);
    }

    #[test]
    fn test_conservation() {
        let policies = [
            SizePolicy::preferred(7).with_range(2, 40),
            SizePolicy::expanding(3).with_stretch(2),
            SizePolicy::minimum(5),
            SizePolicy::maximum(9),
        ];
        for available in [17u16, 24, 31, 60, 200] {
            let extents = fit(&policies, available);
            let total: u32 = extents.iter().map(|&e| e as u32).sum();
            assert_eq!(total, available as u32, "available={available}");
            for (extent, policy) in extents.iter().zip(&policies) {
                assert!(*extent >= policy.floor());
                assert!(*extent <= policy.ceiling());
            }
        }
    }

    #[test]
    fn test_determinism() {
        let policies = [
            SizePolicy::expanding(1).with_stretch(2),
            SizePolicy::preferred(4),
            SizePolicy::expanding(1).with_stretch(2),
            SizePolicy::new(PolicyKind::Ignored, 0),
        ];
        let first = solve(&policies, 37);
        for _ in 0..10 {
            assert_eq!(solve(&policies, 37), first);
        }
    }

    #[test]
    fn test_positions_are_cumulative() {
        assert_eq!(positions(&[3, 7, 2]), vec![0, 3, 10]);
        assert_eq!(positions(&[]), Vec::<u16>::new());
    }

    #[test]
    fn test_solve_cross() {
        // Growth-capable children fill the cross axis.
        assert_eq!(solve_cross(&SizePolicy::expanding(1), 24), 24);
        // Capped by their maximum.
        assert_eq!(solve_cross(&SizePolicy::expanding(1).with_range(0, 10), 24), 10);
        // Fixed children hold their hint.
        assert_eq!(solve_cross(&SizePolicy::fixed(5), 24), 5);
        // Oversized shrink-capable children give way.
        assert_eq!(solve_cross(&SizePolicy::preferred(30), 24), 24);
        // Oversized fixed children do not.
        assert_eq!(solve_cross(&SizePolicy::fixed(30), 24), 30);
    }
}
