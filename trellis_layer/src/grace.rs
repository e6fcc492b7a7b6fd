// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer grace areas between a submenu trigger and its content.

use kurbo::{Point, Rect};
use smallvec::SmallVec;
use trellis_event_state::PointerType;

/// Side of the trigger on which a submenu opens.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Side {
    /// Above the trigger.
    Top,
    /// To the right of the trigger.
    #[default]
    Right,
    /// Below the trigger.
    Bottom,
    /// To the left of the trigger.
    Left,
}

/// Polygon vertices, in order.
pub type Polygon = SmallVec<[Point; 5]>;

/// Distance the polygon's apex is pulled back behind the pointer.
pub const GRACE_BUFFER: f64 = 5.0;

/// The polygon spanning from the pointer to the far edges of `content`.
///
/// The apex sits [`GRACE_BUFFER`] behind the pointer, away from the content,
/// so small jitter at the moment of leaving stays inside.
pub fn grace_area(side: Side, pointer: Point, content: Rect) -> Polygon {
    let Point { x, y } = pointer;
    let mut polygon = Polygon::new();
    match side {
        Side::Top => {
            polygon.push(Point::new(x, y + GRACE_BUFFER));
            polygon.push(Point::new(content.x0, content.y1));
            polygon.push(Point::new(content.x0, content.y0));
            polygon.push(Point::new(content.x1, content.y0));
            polygon.push(Point::new(content.x1, content.y1));
        }
        Side::Right => {
            polygon.push(Point::new(x - GRACE_BUFFER, y));
            polygon.push(Point::new(content.x0, content.y0));
            polygon.push(Point::new(content.x1, content.y0));
            polygon.push(Point::new(content.x1, content.y1));
            polygon.push(Point::new(content.x0, content.y1));
        }
        Side::Bottom => {
            polygon.push(Point::new(x, y - GRACE_BUFFER));
            polygon.push(Point::new(content.x1, content.y0));
            polygon.push(Point::new(content.x1, content.y1));
            polygon.push(Point::new(content.x0, content.y1));
            polygon.push(Point::new(content.x0, content.y0));
        }
        Side::Left => {
            polygon.push(Point::new(x + GRACE_BUFFER, y));
            polygon.push(Point::new(content.x1, content.y1));
            polygon.push(Point::new(content.x0, content.y1));
            polygon.push(Point::new(content.x0, content.y0));
            polygon.push(Point::new(content.x1, content.y0));
        }
    }
    polygon
}

/// Even-odd ray-casting point-in-polygon test.
pub fn is_point_in_polygon(point: Point, polygon: &[Point]) -> bool {
    let mut inside = false;
    let mut j = polygon.len().wrapping_sub(1);
    for (i, pi) in polygon.iter().enumerate() {
        let pj = polygon[j];
        if (pi.y > point.y) != (pj.y > point.y)
            && point.x < (pj.x - pi.x) * (point.y - pi.y) / (pj.y - pi.y) + pi.x
        {
            inside = !inside;
        }
        j = i;
    }
    inside
}

#[derive(Clone, Debug)]
struct GraceIntent {
    area: Polygon,
    side: Side,
    expires_at: u64,
}

/// Keeps a submenu open while the pointer travels diagonally toward it.
///
/// When the pointer leaves a submenu trigger, [`on_trigger_leave`] records a
/// grace polygon toward the submenu content. For the next
/// [`GRACE_TIMEOUT_MS`](Self::GRACE_TIMEOUT_MS), a pointer inside that polygon and
/// moving toward the submenu's side is "moving to the submenu", and the
/// parent menu should ignore item enter and leave events.
///
/// Pointer direction is tracked on both axes from mouse moves. Left and
/// right submenus compare against the horizontal direction, top and bottom
/// submenus against the vertical one.
///
/// ```rust
/// use kurbo::{Point, Rect};
/// use trellis_event_state::PointerType;
/// use trellis_layer::{PointerGraceTracker, Side};
///
/// let mut grace = PointerGraceTracker::new();
/// let submenu = Rect::new(100.0, 0.0, 200.0, 100.0);
/// grace.on_pointer_move(Point::new(95.0, 10.0), PointerType::Mouse);
/// grace.on_trigger_leave(Side::Right, Point::new(95.0, 10.0), submenu, 0);
///
/// grace.on_pointer_move(Point::new(98.0, 20.0), PointerType::Mouse);
/// assert!(grace.is_pointer_moving_to_submenu(Point::new(98.0, 20.0), 100));
/// assert!(!grace.is_pointer_moving_to_submenu(Point::new(98.0, 20.0), 300));
/// ```
///
/// [`on_trigger_leave`]: Self::on_trigger_leave
#[derive(Clone, Debug)]
pub struct PointerGraceTracker {
    intent: Option<GraceIntent>,
    pointer_dir: Side,
    vertical_pointer_dir: Side,
    last_pointer: Point,
}

impl Default for PointerGraceTracker {
    fn default() -> Self {
        Self {
            intent: None,
            pointer_dir: Side::Right,
            vertical_pointer_dir: Side::Bottom,
            last_pointer: Point::ZERO,
        }
    }
}

impl PointerGraceTracker {
    /// How long a grace area stays active after the pointer leaves the trigger.
    pub const GRACE_TIMEOUT_MS: u64 = 300;

    /// A tracker with no active grace area, assuming rightward and downward motion.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the grace area for a submenu opening on `side` with bounds
    /// `content`, as the pointer leaves its trigger at `pointer`.
    ///
    /// Replaces any earlier area and restarts the timeout.
    pub fn on_trigger_leave(&mut self, side: Side, pointer: Point, content: Rect, now: u64) {
        self.intent = Some(GraceIntent {
            area: grace_area(side, pointer, content),
            side,
            expires_at: now.saturating_add(Self::GRACE_TIMEOUT_MS),
        });
    }

    /// Track pointer direction. Only mouse moves count, and an axis without
    /// motion keeps its last direction.
    pub fn on_pointer_move(&mut self, pointer: Point, pointer_type: PointerType) {
        if pointer_type != PointerType::Mouse {
            return;
        }
        let last = self.last_pointer;
        if pointer.x != last.x {
            self.pointer_dir = if pointer.x > last.x {
                Side::Right
            } else {
                Side::Left
            };
        }
        if pointer.y != last.y {
            self.vertical_pointer_dir = if pointer.y > last.y {
                Side::Bottom
            } else {
                Side::Top
            };
        }
        self.last_pointer = pointer;
    }

    /// The horizontal side the pointer is moving toward.
    pub fn pointer_dir(&self) -> Side {
        self.pointer_dir
    }

    /// The vertical side the pointer is moving toward.
    pub fn vertical_pointer_dir(&self) -> Side {
        self.vertical_pointer_dir
    }

    /// The active grace polygon, if it has not expired at `now`.
    pub fn area(&self, now: u64) -> Option<&[Point]> {
        self.active(now).map(|i| i.area.as_slice())
    }

    fn active(&self, now: u64) -> Option<&GraceIntent> {
        self.intent.as_ref().filter(|i| now < i.expires_at)
    }

    /// Whether the pointer is heading into the open submenu: inside the active
    /// grace area and moving toward its side.
    pub fn is_pointer_moving_to_submenu(&self, pointer: Point, now: u64) -> bool {
        self.active(now).is_some_and(|intent| {
            let heading = match intent.side {
                Side::Left | Side::Right => self.pointer_dir,
                Side::Top | Side::Bottom => self.vertical_pointer_dir,
            };
            intent.side == heading && is_point_in_polygon(pointer, &intent.area)
        })
    }

    /// Drop the grace area, for instance when the submenu closes.
    pub fn clear(&mut self) {
        self.intent = None;
    }
}
