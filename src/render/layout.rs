//! Axis layout arithmetic for the report charts.
//!
//! Positions are in data units. A cursor walks the slots left to right: each
//! Games group sits at the cursor and advances it by `group_width + gap`;
//! the transition marker gets a tick pulled back by `gap * transition_offset`
//! and advances the cursor by `gap` alone.

use std::collections::HashSet;

use crate::model::{GamesId, Slot};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutParams {
    pub group_width: f64,
    /// Offset from the group start to its tick.
    pub group_center: f64,
    pub gap: f64,
    pub transition_offset: f64,
}

impl LayoutParams {
    /// `n` side-by-side bars of `bar_width`, bar `i` centred at
    /// `start + i * bar_width`.
    pub fn grouped(n: usize, bar_width: f64, gap: f64, transition_offset: f64) -> Self {
        Self {
            group_width: n as f64 * bar_width,
            group_center: n.saturating_sub(1) as f64 * bar_width / 2.0,
            gap,
            transition_offset,
        }
    }

    /// One bar or point per slot, one `gap` apart.
    pub fn single(gap: f64) -> Self {
        Self {
            group_width: 0.0,
            group_center: 0.0,
            gap,
            transition_offset: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlacedSlot {
    pub slot: Slot,
    pub start: f64,
    pub tick: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SlotLayout {
    params: LayoutParams,
    placed: Vec<PlacedSlot>,
}

impl SlotLayout {
    pub fn compute(slots: &[Slot], params: LayoutParams) -> Self {
        let mut cursor = 0.0;
        let mut placed = Vec::with_capacity(slots.len());
        for slot in slots {
            match slot {
                Slot::Games(_) => {
                    placed.push(PlacedSlot {
                        slot: slot.clone(),
                        start: cursor,
                        tick: cursor + params.group_center,
                    });
                    cursor += params.group_width + params.gap;
                }
                Slot::Transition { .. } => {
                    let tick = cursor - params.gap * params.transition_offset;
                    placed.push(PlacedSlot {
                        slot: slot.clone(),
                        start: tick,
                        tick,
                    });
                    cursor += params.gap;
                }
            }
        }
        Self { params, placed }
    }

    #[cfg(test)]
    pub fn slots(&self) -> &[PlacedSlot] {
        &self.placed
    }

    pub fn games(&self) -> impl Iterator<Item = (GamesId, &PlacedSlot)> {
        self.placed
            .iter()
            .filter_map(|p| p.slot.games().map(|g| (g, p)))
    }

    /// Where the dashed reference line goes.
    pub fn transition_x(&self) -> Option<f64> {
        self.placed
            .iter()
            .find(|p| p.slot.is_transition())
            .map(|p| p.tick)
    }

    pub fn ticks(&self) -> Vec<Tick> {
        self.placed
            .iter()
            .map(|p| Tick {
                x: p.tick,
                label: p.slot.to_string(),
            })
            .collect()
    }

    /// Data-space x range covering every slot with `pad` on both sides.
    pub fn x_bounds(&self, pad: f64) -> (f64, f64) {
        let lo = self
            .placed
            .iter()
            .map(|p| p.start)
            .fold(f64::INFINITY, f64::min);
        let hi = self
            .placed
            .iter()
            .map(|p| p.start + self.params.group_width)
            .fold(f64::NEG_INFINITY, f64::max);
        if lo.is_finite() && hi.is_finite() {
            (lo - pad, hi + pad)
        } else {
            (-pad, pad)
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    pub x: f64,
    pub label: String,
}

/// Centre of bar `index` inside a group starting at `start`.
pub fn bar_x(start: f64, index: usize, bar_width: f64) -> f64 {
    start + index as f64 * bar_width
}

/// `(bottom, top)` of each stacked segment, in input order.
pub fn stack_segments(values: &[usize]) -> Vec<(f64, f64)> {
    let mut bottom = 0.0;
    values
        .iter()
        .map(|v| {
            let top = bottom + *v as f64;
            let segment = (bottom, top);
            bottom = top;
            segment
        })
        .collect()
}

/// Splits `[from, to]` into dashes of length `dash` separated by `space`.
pub fn dash_segments(from: f64, to: f64, dash: f64, space: f64) -> Vec<(f64, f64)> {
    let mut segments = Vec::new();
    if !(to > from) || dash <= 0.0 || space < 0.0 {
        return segments;
    }
    let mut y = from;
    while y < to {
        segments.push((y, (y + dash).min(to)));
        y += dash + space;
    }
    segments
}

/// Upper y bound with headroom. Never below 1 so an empty chart still has
/// an axis.
pub fn y_upper<I: IntoIterator<Item = f64>>(values: I, headroom: f64) -> f64 {
    let max = values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold(0.0, f64::max);
    (max * headroom).max(1.0)
}

/// Hands out each legend label once, on first sight.
#[derive(Debug, Default)]
pub struct LegendTracker {
    seen: HashSet<String>,
}

impl LegendTracker {
    pub fn first(&mut self, label: &str) -> Option<String> {
        if self.seen.insert(label.to_string()) {
            Some(label.to_string())
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PeriodConfig;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_grouped_layout_positions() {
        let slots = PeriodConfig::default().slots();
        let layout = SlotLayout::compute(&slots, LayoutParams::grouped(3, 0.5, 1.0, 0.25));
        let starts: Vec<f64> = layout.slots().iter().map(|p| p.start).collect();
        let ticks: Vec<f64> = layout.slots().iter().map(|p| p.tick).collect();

        assert_eq!(starts, vec![0.0, 2.5, 4.75, 6.0, 8.5]);
        assert_eq!(ticks, vec![0.5, 3.0, 4.75, 6.5, 9.0]);
        assert_eq!(layout.transition_x(), Some(4.75));
    }

    #[test]
    fn test_single_layout_positions() {
        let slots = PeriodConfig::default().slots();
        let layout = SlotLayout::compute(&slots, LayoutParams::single(1.0));
        let ticks: Vec<f64> = layout.slots().iter().map(|p| p.tick).collect();

        assert_eq!(ticks, vec![0.0, 1.0, 2.0, 3.0, 4.0]);
        assert_eq!(layout.transition_x(), Some(2.0));
    }

    #[test]
    fn test_transition_tick_is_between_periods() {
        let slots = PeriodConfig::default().slots();
        for params in [
            LayoutParams::grouped(3, 0.5, 1.0, 0.25),
            LayoutParams::single(1.0),
            LayoutParams::grouped(2, 0.4, 2.0, 0.5),
        ] {
            let layout = SlotLayout::compute(&slots, params);
            let t = layout.transition_x().unwrap();
            let ticks = layout.slots();
            assert!(ticks[1].tick < t, "{params:?}");
            assert!(t < ticks[3].tick, "{params:?}");
        }
    }

    #[test]
    fn test_games_iter_skips_transition() {
        let slots = PeriodConfig::default().slots();
        let layout = SlotLayout::compute(&slots, LayoutParams::single(1.0));
        let games: Vec<GamesId> = layout.games().map(|(g, _)| g).collect();
        assert_eq!(
            games,
            vec![
                GamesId::winter(1988),
                GamesId::summer(1988),
                GamesId::winter(1994),
                GamesId::summer(1996)
            ]
        );
    }

    #[test]
    fn test_tick_labels() {
        let slots = PeriodConfig::default().slots();
        let layout = SlotLayout::compute(&slots, LayoutParams::single(1.0));
        let labels: Vec<String> = layout.ticks().into_iter().map(|t| t.label).collect();
        assert_eq!(labels[2], "1992 Transition");
        assert_eq!(labels[4], "1996 Summer");
    }

    #[test]
    fn test_x_bounds_cover_groups() {
        let slots = PeriodConfig::default().slots();
        let layout = SlotLayout::compute(&slots, LayoutParams::grouped(3, 0.5, 1.0, 0.25));
        let (lo, hi) = layout.x_bounds(1.0);
        assert!((lo + 1.0).abs() < EPS);
        assert!((hi - 11.0).abs() < EPS);
    }

    #[test]
    fn test_bar_x() {
        assert_eq!(bar_x(6.0, 0, 0.5), 6.0);
        assert_eq!(bar_x(6.0, 2, 0.5), 7.0);
    }

    #[test]
    fn test_stack_segments_run_baseline() {
        assert_eq!(
            stack_segments(&[5, 0, 3]),
            vec![(0.0, 5.0), (5.0, 5.0), (5.0, 8.0)]
        );
        assert!(stack_segments(&[]).is_empty());
    }

    #[test]
    fn test_dash_segments() {
        let dashes = dash_segments(0.0, 10.0, 2.0, 1.0);
        assert_eq!(dashes.first(), Some(&(0.0, 2.0)));
        assert_eq!(dashes.last(), Some(&(9.0, 10.0)));
        assert_eq!(dashes.len(), 4);
        assert!(dash_segments(5.0, 5.0, 1.0, 1.0).is_empty());
    }

    #[test]
    fn test_y_upper() {
        assert!((y_upper([2.0, 10.0, 4.0], 1.2) - 12.0).abs() < EPS);
        assert_eq!(y_upper(Vec::<f64>::new(), 1.1), 1.0);
        assert_eq!(y_upper([f64::NAN, 0.5], 1.1), 1.0);
    }

    #[test]
    fn test_legend_first_occurrence_only() {
        let mut legend = LegendTracker::default();
        assert_eq!(legend.first("Gold").as_deref(), Some("Gold"));
        assert_eq!(legend.first("Silver").as_deref(), Some("Silver"));
        assert_eq!(legend.first("Gold"), None);
    }
}
