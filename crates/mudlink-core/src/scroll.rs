#![forbid(unsafe_code)]

//! Follow-the-bottom policy for the transcript container.
//!
//! New output keeps the view pinned to the bottom only while the user is
//! already there. Once they scroll back more than the threshold, appends
//! leave their position alone.
//!
//! The frontend measures the container *before* appending, asks
//! [`FollowPolicy::decide`], appends, and then scrolls to the new bottom if
//! the decision was [`FollowDecision::Follow`].

use crate::config::DEFAULT_FOLLOW_THRESHOLD_PX;

// ---------------------------------------------------------------------------
// Metrics
// ---------------------------------------------------------------------------

/// DOM scroll geometry of the transcript container, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollMetrics {
    /// `scrollHeight`: full content height.
    pub scroll_height: f64,
    /// `offsetHeight`: visible height including borders.
    pub offset_height: f64,
    /// `scrollTop`: current distance scrolled from the top.
    pub scroll_top: f64,
}

impl ScrollMetrics {
    #[must_use]
    pub const fn new(scroll_height: f64, offset_height: f64, scroll_top: f64) -> Self {
        Self {
            scroll_height,
            offset_height,
            scroll_top,
        }
    }

    /// Pixels between the current view and the bottom of the content.
    ///
    /// Content shorter than the viewport, and overscroll, read as zero.
    #[must_use]
    pub fn distance_from_bottom(&self) -> f64 {
        let max_top = (self.scroll_height - self.offset_height).max(0.0);
        (max_top - self.scroll_top).max(0.0)
    }
}

// ---------------------------------------------------------------------------
// Policy
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FollowDecision {
    /// Scroll to the new bottom after appending.
    Follow,
    /// Leave `scrollTop` untouched.
    Preserve,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FollowPolicy {
    threshold_px: f64,
}

impl Default for FollowPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_FOLLOW_THRESHOLD_PX)
    }
}

impl FollowPolicy {
    /// Non-finite or negative thresholds collapse to zero (follow only when
    /// exactly at the bottom).
    #[must_use]
    pub fn new(threshold_px: f64) -> Self {
        let threshold_px = if threshold_px.is_finite() {
            threshold_px.max(0.0)
        } else {
            0.0
        };
        Self { threshold_px }
    }

    #[must_use]
    pub const fn threshold_px(&self) -> f64 {
        self.threshold_px
    }

    #[must_use]
    pub fn decide(&self, before_append: ScrollMetrics) -> FollowDecision {
        if before_append.distance_from_bottom() <= self.threshold_px {
            FollowDecision::Follow
        } else {
            FollowDecision::Preserve
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn at_bottom_follows() {
        let policy = FollowPolicy::default();
        let metrics = ScrollMetrics::new(1000.0, 400.0, 600.0);
        assert_eq!(metrics.distance_from_bottom(), 0.0);
        assert_eq!(policy.decide(metrics), FollowDecision::Follow);
    }

    #[test]
    fn exactly_threshold_follows() {
        let policy = FollowPolicy::default();
        assert_eq!(
            policy.decide(ScrollMetrics::new(1000.0, 400.0, 550.0)),
            FollowDecision::Follow
        );
    }

    #[test]
    fn just_past_threshold_preserves() {
        let policy = FollowPolicy::default();
        assert_eq!(
            policy.decide(ScrollMetrics::new(1000.0, 400.0, 549.0)),
            FollowDecision::Preserve
        );
    }

    #[test]
    fn short_content_follows() {
        let policy = FollowPolicy::default();
        assert_eq!(
            policy.decide(ScrollMetrics::new(100.0, 400.0, 0.0)),
            FollowDecision::Follow
        );
    }

    #[test]
    fn invalid_thresholds_clamp_to_zero() {
        assert_eq!(FollowPolicy::new(-5.0).threshold_px(), 0.0);
        assert_eq!(FollowPolicy::new(f64::NAN).threshold_px(), 0.0);
        assert_eq!(FollowPolicy::new(f64::INFINITY).threshold_px(), 0.0);
    }

    proptest! {
        #[test]
        fn decision_matches_distance(
            height in 0.0f64..10_000.0,
            viewport in 1.0f64..2_000.0,
            top in 0.0f64..10_000.0,
            threshold in 0.0f64..200.0,
        ) {
            let metrics = ScrollMetrics::new(height, viewport, top);
            let decision = FollowPolicy::new(threshold).decide(metrics);
            let expected = if metrics.distance_from_bottom() <= threshold {
                FollowDecision::Follow
            } else {
                FollowDecision::Preserve
            };
            prop_assert_eq!(decision, expected);
        }
    }
}
