//! Flex distribution for children of a node carrying a [`FlexContainer`].
//!
//! Runs in four steps over the already-filtered children: resolve the sizes that
//! need no distribution context, break into lines, hand leftover main-axis space
//! to `Fill` children per line, then place each line on both axes.

use std::ops::Range;

use crate::align::MainAxisAlign;
use crate::layout::{FlexContainer, Rect, SizeMode};
use crate::math::{Axis, BoundingBox, Dimensions};

/// A visible child taking part in the flex flow.
#[derive(Debug, Clone, Copy)]
pub(crate) struct FlexItem<'a> {
    pub(crate) rect: &'a Rect,
    /// Measured content size, used by `FitContent` axes.
    pub(crate) intrinsic: Dimensions,
}

#[derive(Debug, Clone, Copy)]
struct Slot {
    index: usize,
    main: f32,
    cross: f32,
    fill_main: bool,
    fill_cross: bool,
}

/// Computes bounds for `items` inside `content`. The result is indexed like `items`.
pub(crate) fn arrange_flex(
    container: &FlexContainer,
    content: BoundingBox,
    items: &[FlexItem<'_>],
    epsilon: f32,
) -> Vec<BoundingBox> {
    let mut out = vec![BoundingBox::ZERO; items.len()];
    if items.is_empty() {
        return out;
    }

    let main_axis = container.direction.main_axis();
    let cross_axis = main_axis.cross();
    let main_extent = content.extent(main_axis);
    let cross_extent = content.extent(cross_axis);
    let spacing = container.spacing;

    let mut slots: Vec<Slot> = Vec::with_capacity(items.len());
    let mut push_slot = |index: usize| {
        let item = &items[index];
        let rect = item.rect;
        let fill_main = rect.mode(main_axis) == SizeMode::Fill;
        let fill_cross = rect.mode(cross_axis) == SizeMode::Fill;
        // Fill sizes start at their minimum until the line is known.
        let main = if fill_main {
            rect.clamp(main_axis, 0.0)
        } else {
            rect.resolve(main_axis, main_extent, item.intrinsic, None)
        };
        let cross = if fill_cross {
            rect.clamp(cross_axis, 0.0)
        } else {
            rect.resolve(cross_axis, cross_extent, item.intrinsic, None)
        };
        slots.push(Slot {
            index,
            main,
            cross,
            fill_main,
            fill_cross,
        });
    };
    if container.reverse_order {
        (0..items.len()).rev().for_each(&mut push_slot);
    } else {
        (0..items.len()).for_each(&mut push_slot);
    }

    let lines = if container.wrap {
        break_lines(&slots, main_extent, spacing, epsilon)
    } else {
        vec![0..slots.len()]
    };

    let mut cross_cursor = content.start(cross_axis);
    for line in lines {
        let line_slots = &mut slots[line];
        let count = line_slots.len();
        let gaps = spacing * count.saturating_sub(1) as f32;

        // Fill distribution
        let fill_count = line_slots.iter().filter(|slot| slot.fill_main).count();
        if fill_count > 0 {
            let resolved: f32 = line_slots
                .iter()
                .filter(|slot| !slot.fill_main)
                .map(|slot| slot.main)
                .sum();
            let share = ((main_extent - resolved - gaps) / fill_count as f32).max(0.0);
            for slot in line_slots.iter_mut().filter(|slot| slot.fill_main) {
                let item = &items[slot.index];
                slot.main = item
                    .rect
                    .resolve(main_axis, main_extent, item.intrinsic, Some(share));
            }
        }

        let line_cross = if container.wrap {
            line_slots
                .iter()
                .filter(|slot| !slot.fill_cross)
                .map(|slot| slot.cross)
                .reduce(f32::max)
                .unwrap_or(cross_extent)
        } else {
            cross_extent
        };
        for slot in line_slots.iter_mut().filter(|slot| slot.fill_cross) {
            let item = &items[slot.index];
            slot.cross = item
                .rect
                .resolve(cross_axis, line_cross, item.intrinsic, Some(line_cross));
        }

        // Main axis placement
        let total: f32 = line_slots.iter().map(|slot| slot.main).sum::<f32>() + gaps;
        let free = main_extent - total;
        let (lead, between) = match container.main_axis_align {
            MainAxisAlign::Start => (0.0, spacing),
            MainAxisAlign::End => (free, spacing),
            MainAxisAlign::Center => (free / 2.0, spacing),
            MainAxisAlign::SpaceBetween => {
                if count > 1 {
                    (0.0, spacing + free.max(0.0) / (count - 1) as f32)
                } else {
                    (0.0, spacing)
                }
            }
            MainAxisAlign::SpaceAround => {
                let gap = free.max(0.0) / count as f32;
                (gap / 2.0, spacing + gap)
            }
            MainAxisAlign::SpaceEvenly => {
                let gap = free.max(0.0) / (count + 1) as f32;
                (gap, spacing + gap)
            }
        };

        let mut main_cursor = content.start(main_axis) + lead;
        for slot in line_slots.iter() {
            let cross_position =
                cross_cursor + container.cross_axis_align.offset(line_cross, slot.cross);
            out[slot.index] = box_from_axes(
                main_axis,
                main_cursor,
                cross_position,
                slot.main,
                slot.cross,
            );
            main_cursor += slot.main + between;
        }

        cross_cursor += line_cross + spacing;
    }

    out
}

/// Splits `slots` into lines. A child starts a new line when it would push the
/// running extent past `main_extent`, unless the line is still empty.
fn break_lines(slots: &[Slot], main_extent: f32, spacing: f32, epsilon: f32) -> Vec<Range<usize>> {
    let mut lines = Vec::new();
    let mut line_start = 0;
    let mut used = 0.0;

    for (i, slot) in slots.iter().enumerate() {
        if i == line_start {
            used = slot.main;
            continue;
        }
        if used + spacing + slot.main > main_extent + epsilon {
            lines.push(line_start..i);
            line_start = i;
            used = slot.main;
        } else {
            used += spacing + slot.main;
        }
    }
    if line_start < slots.len() {
        lines.push(line_start..slots.len());
    }
    lines
}

fn box_from_axes(main_axis: Axis, main: f32, cross: f32, main_size: f32, cross_size: f32) -> BoundingBox {
    match main_axis {
        Axis::X => BoundingBox::new(main, cross, main_size, cross_size),
        Axis::Y => BoundingBox::new(cross, main, cross_size, main_size),
    }
}
