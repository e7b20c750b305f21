//! Hover affordances while a drag-and-drop is over the tab strip: switching
//! to the hovered tab after a delay and scrolling at the strip edges.
//!
//! Timers are plain deadlines. The host calls [`DropHover::poll`] from its
//! timer tick; each timer fires once and is then disarmed.

use explorer_tabs_core::DropConfig;
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDirection {
    Left,
    Right,
}

/// Something a fired timer asks the host to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropHoverAction {
    /// Select the tab at this index unless it already is.
    SwitchTo(usize),
    /// Scroll the strip one step.
    Scroll(ScrollDirection),
}

#[derive(Debug, Clone)]
pub struct DropHover {
    config: DropConfig,
    target: Option<usize>,
    switch_deadline: Option<Instant>,
    scroll: Option<(ScrollDirection, Instant)>,
}

impl DropHover {
    #[must_use]
    pub fn new(config: DropConfig) -> Self {
        DropHover {
            config,
            target: None,
            switch_deadline: None,
            scroll: None,
        }
    }

    /// Updates both timers for a drag positioned at `x` over `target`.
    pub fn update_for_drop(&mut self, target: Option<usize>, x: i32, strip_width: i32, now: Instant) {
        self.update_target(target, now);
        self.update_scroll(x, strip_width, now);
    }

    fn update_target(&mut self, target: Option<usize>, now: Instant) {
        match target {
            Some(index) if self.target != Some(index) => {
                // re-arming replaces the pending deadline
                self.switch_deadline = Some(now + self.config.switch_tab_delay());
            }
            Some(_) => {}
            None => self.switch_deadline = None,
        }
        self.target = target;
    }

    fn update_scroll(&mut self, x: i32, strip_width: i32, now: Instant) {
        let margin = self.config.scroll_margin;
        let direction = if x < margin {
            Some(ScrollDirection::Left)
        } else if x > strip_width - margin {
            Some(ScrollDirection::Right)
        } else {
            None
        };

        match direction {
            None => self.scroll = None,
            Some(direction) => {
                if self.scroll.map(|(current, _)| current) != Some(direction) {
                    self.scroll = Some((direction, now + self.config.scroll_delay()));
                }
            }
        }
    }

    /// Fires every timer whose deadline has passed.
    pub fn poll(&mut self, now: Instant) -> Vec<DropHoverAction> {
        let mut actions = Vec::new();

        if let Some(deadline) = self.switch_deadline {
            if now >= deadline {
                self.switch_deadline = None;
                if let Some(index) = self.target {
                    actions.push(DropHoverAction::SwitchTo(index));
                }
            }
        }

        if let Some((direction, deadline)) = self.scroll {
            if now >= deadline {
                self.scroll = None;
                actions.push(DropHoverAction::Scroll(direction));
            }
        }

        actions
    }

    /// Cancels everything; called when the drop ends or leaves the strip.
    pub fn reset(&mut self) {
        self.target = None;
        self.switch_deadline = None;
        self.scroll = None;
    }

    #[must_use]
    pub fn is_switch_pending(&self) -> bool {
        self.switch_deadline.is_some()
    }

    #[must_use]
    pub fn pending_scroll(&self) -> Option<ScrollDirection> {
        self.scroll.map(|(direction, _)| direction)
    }
}
