//! Drag-to-reorder gesture on the tab strip.
//!
//! The controller only works in strip coordinates; the host supplies a
//! [`TabStripGeometry`] for hit testing. Tabs are swapped as soon as the
//! pointer crosses the dragged tab's edge, not when the button is released.

/// A point in tab-strip client coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    #[must_use]
    pub fn new(x: i32, y: i32) -> Self {
        Point { x, y }
    }
}

/// An axis-aligned rectangle, right and bottom exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Rect {
    #[must_use]
    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Rect {
            left,
            top,
            right,
            bottom,
        }
    }

    #[must_use]
    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.left && point.x < self.right && point.y >= self.top && point.y < self.bottom
    }
}

/// Layout queries the host's tab control answers.
pub trait TabStripGeometry {
    /// Index of the tab under `point`.
    fn hit_test(&self, point: Point) -> Option<usize>;

    /// Bounds of the tab at `index`.
    fn item_rect(&self, index: usize) -> Option<Rect>;

    /// Width of the whole strip.
    fn strip_width(&self) -> i32;
}

/// A single row of equally wide tabs starting at x = 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedWidthStrip {
    pub tab_width: i32,
    pub height: i32,
    pub tab_count: usize,
}

impl FixedWidthStrip {
    #[must_use]
    pub fn new(tab_width: i32, height: i32, tab_count: usize) -> Self {
        FixedWidthStrip {
            tab_width,
            height,
            tab_count,
        }
    }

    /// Horizontal centre of the tab at `index`.
    #[must_use]
    pub fn center_of(&self, index: usize) -> Point {
        let left = self.tab_width * index as i32;
        Point::new(left + self.tab_width / 2, self.height / 2)
    }
}

impl TabStripGeometry for FixedWidthStrip {
    fn hit_test(&self, point: Point) -> Option<usize> {
        if self.tab_width <= 0 || point.x < 0 || point.y < 0 || point.y >= self.height {
            return None;
        }
        let index = (point.x / self.tab_width) as usize;
        (index < self.tab_count).then_some(index)
    }

    fn item_rect(&self, index: usize) -> Option<Rect> {
        if index >= self.tab_count {
            return None;
        }
        let left = self.tab_width * index as i32;
        Some(Rect::new(left, 0, left + self.tab_width, self.height))
    }

    fn strip_width(&self) -> i32 {
        self.tab_width * self.tab_count as i32
    }
}

/// Where the gesture is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        /// Index the dragged tab started at
        start: usize,
        /// Index the dragged tab is at now
        end: usize,
        /// Region the pointer has to leave before the next swap
        bounds: Rect,
    },
}

/// The `Idle -> Dragging -> Idle` state machine.
#[derive(Debug, Clone, Default)]
pub struct DragReorder {
    state: DragState,
}

impl DragReorder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> DragState {
        self.state
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    /// Starts dragging the tab at `index`. Returns false if the geometry
    /// has no such tab.
    pub fn begin(&mut self, index: usize, geometry: &dyn TabStripGeometry) -> bool {
        let Some(bounds) = geometry.item_rect(index) else {
            return false;
        };

        self.state = DragState::Dragging {
            start: index,
            end: index,
            bounds,
        };
        true
    }

    /// Tracks the pointer. Returns the `(current, target)` pair to swap
    /// when the pointer has crossed into a neighbour's territory.
    pub fn on_pointer_move(
        &mut self,
        point: Point,
        geometry: &dyn TabStripGeometry,
    ) -> Option<(usize, usize)> {
        let DragState::Dragging { end, bounds, .. } = &mut self.state else {
            return None;
        };

        let target = geometry.hit_test(point)?;
        if target == *end || (point.x >= bounds.left && point.x <= bounds.right) {
            return None;
        }

        let swap_rect = geometry.item_rect(target)?;
        if point.x > bounds.right {
            bounds.left = bounds.right;
            bounds.right = swap_rect.right;
        } else {
            bounds.right = bounds.left;
            bounds.left = swap_rect.left;
        }

        let current = *end;
        *end = target;
        Some((current, target))
    }

    /// Releases the button. Returns `(start, end)` when the tab ended up
    /// somewhere else.
    pub fn finish(&mut self) -> Option<(usize, usize)> {
        match std::mem::take(&mut self.state) {
            DragState::Dragging { start, end, .. } if start != end => Some((start, end)),
            _ => None,
        }
    }

    /// Abandons the gesture, e.g. on capture loss. Returns true if a drag
    /// was in progress.
    pub fn cancel(&mut self) -> bool {
        let was_dragging = self.is_dragging();
        self.state = DragState::Idle;
        was_dragging
    }
}
