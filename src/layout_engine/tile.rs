//! Group tiling.
//!
//! The triggering window keeps its extent on the stacking axis and spans the
//! region on the other axis. The remaining members fill the space before and
//! after it. Vertical tiling is horizontal tiling on transposed rectangles.

use crate::sys::geometry::{Orientation, Rect};
use crate::sys::window_system::WindowId;

/// What tiling needs to know about the triggering window.
#[derive(Debug, Clone, Copy)]
pub struct TileTrigger {
    pub geometry: Rect,
    pub border_width: i32,
    pub default_border: i32,
    /// Already maximized along the stacking axis.
    pub maximized_across: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TilePlan {
    pub trigger: Rect,
    pub members: Vec<(WindowId, Rect)>,
}

/// Lays out a group. `stacking` is the axis members are stacked along:
/// `Vertical` for htile (full-width rows), `Horizontal` for vtile.
///
/// `members` are the other tileable windows in group order, each with the
/// border width it will have once tiled. Returns `None` when tiling is not
/// possible.
pub fn plan(
    trigger: TileTrigger,
    members: &[(WindowId, i32)],
    area: Rect,
    stacking: Orientation,
) -> Option<TilePlan> {
    let flip = |r: Rect| match stacking {
        Orientation::Vertical => r,
        Orientation::Horizontal => transpose(r),
    };
    let trigger = TileTrigger {
        geometry: flip(trigger.geometry),
        ..trigger
    };
    let plan = plan_rows(trigger, members, flip(area))?;
    Some(TilePlan {
        trigger: flip(plan.trigger),
        members: plan.members.into_iter().map(|(w, r)| (w, flip(r))).collect(),
    })
}

fn transpose(r: Rect) -> Rect { Rect::new(r.y, r.x, r.h, r.w) }

/// htile: rows stacked top to bottom.
fn plan_rows(trigger: TileTrigger, members: &[(WindowId, i32)], area: Rect) -> Option<TilePlan> {
    let n = members.len() as i32;
    if n == 0 || trigger.maximized_across {
        return None;
    }
    if trigger.geometry.h + trigger.border_width * 2 >= area.h {
        return None;
    }

    let bw = trigger.default_border;
    let own_h = trigger.geometry.h + bw * 2;
    if own_h >= area.h {
        return None;
    }
    let mut y = trigger.geometry.y.min(area.max_y() - own_h).max(area.y);

    let before = y - area.y;
    let after = area.max_y() - (y + own_h);
    let n_before = share_before(n, before, after);

    // A segment with no members would leave a hole; close it by moving the
    // trigger against that edge.
    if n_before == 0 && before > 0 {
        y = area.y;
    } else if n_before == n && after > 0 {
        y = area.max_y() - own_h;
    }

    let mut rows = Vec::with_capacity(members.len());
    let (above, below) = members.split_at(n_before as usize);
    fill(&mut rows, above, area, area.y, y)?;
    fill(&mut rows, below, area, y + own_h, area.max_y())?;

    Some(TilePlan {
        trigger: Rect::new(area.x, y, area.w - bw * 2, trigger.geometry.h),
        members: rows,
    })
}

/// Members assigned to the segment above the trigger, proportional to the
/// segment lengths. Both segments get someone when both are non-empty and
/// there are enough members.
fn share_before(n: i32, before: i32, after: i32) -> i32 {
    if before <= 0 {
        return 0;
    }
    if after <= 0 {
        return n;
    }
    if n == 1 {
        return if before > after { 1 } else { 0 };
    }
    let total = before + after;
    let rounded = (2 * n * before + total) / (2 * total);
    rounded.clamp(1, n - 1)
}

/// Stacks `members` between `start` and `end`. Fails when a share cannot hold
/// a member's borders and at least one pixel.
fn fill(
    out: &mut Vec<(WindowId, Rect)>,
    members: &[(WindowId, i32)],
    area: Rect,
    start: i32,
    end: i32,
) -> Option<()> {
    let Some(count) = i32::try_from(members.len()).ok().filter(|&c| c > 0) else { return Some(()) };
    let share = (end - start) / count;
    if members.iter().any(|&(_, bw)| share < bw * 2 + 1) {
        return None;
    }
    let mut y = start;
    for (i, &(window, bw)) in members.iter().enumerate() {
        let outer_h = if i + 1 == members.len() { end - y } else { share };
        out.push((window, Rect::new(area.x, y, area.w - bw * 2, outer_h - bw * 2)));
        y += outer_h;
    }
    Some(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const AREA: Rect = Rect::new(0, 0, 900, 600);

    fn trigger(geometry: Rect) -> TileTrigger {
        TileTrigger {
            geometry,
            border_width: 1,
            default_border: 1,
            maximized_across: false,
        }
    }

    fn members(ids: &[u32]) -> Vec<(WindowId, i32)> { ids.iter().map(|&i| (WindowId::new(i), 1)).collect() }

    fn outer_extent(plan: &TilePlan, bw: i32) -> i32 {
        plan.trigger.h + bw * 2 + plan.members.iter().map(|(_, r)| r.h + bw * 2).sum::<i32>()
    }

    #[test]
    fn htile_with_trigger_at_the_top() {
        let plan = plan(trigger(Rect::new(40, 0, 300, 200)), &members(&[2, 3]), AREA, Orientation::Vertical).unwrap();
        assert_eq!(plan.trigger, Rect::new(0, 0, 898, 200));
        assert_eq!(plan.members, vec![
            (WindowId::new(2), Rect::new(0, 202, 898, 197)),
            (WindowId::new(3), Rect::new(0, 401, 898, 197)),
        ]);
        assert_eq!(outer_extent(&plan, 1), 600);
    }

    #[test]
    fn last_member_absorbs_the_remainder() {
        let plan = plan(trigger(Rect::new(0, 0, 300, 99)), &members(&[2, 3, 4]), AREA, Orientation::Vertical).unwrap();
        let heights: Vec<i32> = plan.members.iter().map(|(_, r)| r.h).collect();
        assert_eq!(heights, vec![164, 164, 165]);
        assert_eq!(outer_extent(&plan, 1), 600);
    }

    #[test]
    fn trigger_in_the_middle_splits_members_around_it() {
        let plan =
            plan(trigger(Rect::new(0, 250, 300, 98)), &members(&[2, 3, 4, 5]), AREA, Orientation::Vertical).unwrap();
        assert_eq!(plan.trigger.y, 250);
        let above: Vec<_> = plan.members.iter().filter(|(_, r)| r.y < 250).collect();
        assert_eq!(above.len(), 2);
        assert_eq!(outer_extent(&plan, 1), 600);
    }

    #[test]
    fn single_member_pulls_trigger_to_an_edge() {
        let plan = plan(trigger(Rect::new(0, 250, 300, 98)), &members(&[2]), AREA, Orientation::Vertical).unwrap();
        assert_eq!(plan.trigger.y, 0);
        assert_eq!(plan.members, vec![(WindowId::new(2), Rect::new(0, 100, 898, 498))]);
    }

    #[test]
    fn vtile_is_transposed() {
        let plan =
            plan(trigger(Rect::new(0, 40, 200, 300)), &members(&[2, 3]), AREA, Orientation::Horizontal).unwrap();
        assert_eq!(plan.trigger, Rect::new(0, 0, 200, 598));
        assert_eq!(plan.members, vec![
            (WindowId::new(2), Rect::new(202, 0, 347, 598)),
            (WindowId::new(3), Rect::new(551, 0, 347, 598)),
        ]);
    }

    #[test]
    fn refuses_impossible_layouts() {
        assert_eq!(plan(trigger(Rect::new(0, 0, 300, 200)), &[], AREA, Orientation::Vertical), None);
        assert_eq!(
            plan(trigger(Rect::new(0, 0, 300, 598)), &members(&[2]), AREA, Orientation::Vertical),
            None
        );
        // One member squeezed into a two pixel strip.
        let thick = TileTrigger { border_width: 4, default_border: 4, ..trigger(Rect::new(0, 1, 300, 590)) };
        assert_eq!(plan(thick, &[(WindowId::new(2), 4)], AREA, Orientation::Vertical), None);
        let maximized = TileTrigger { maximized_across: true, ..trigger(Rect::new(0, 0, 300, 200)) };
        assert_eq!(plan(maximized, &members(&[2]), AREA, Orientation::Vertical), None);
    }
}
