// Shake prevention: ignore centroid jumps that are too big to be real hand motion.
// Visual: a stray patch of marker color elsewhere in the frame no longer draws a
// long streak across the canvas.
use crate::types::Point;

/// What to do with a candidate centroid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    Accepted, // draw with it
    Rejected, // move the pen there, but do not draw
}

#[derive(Clone, Debug, Default)]
pub struct JitterFilter {
    threshold: Option<u32>, // None = disabled, everything passes
    previous: Option<Point>,
}

impl JitterFilter {
    pub fn new(threshold: u32) -> Self {
        Self { threshold: Some(threshold), previous: None }
    }

    pub fn disabled() -> Self {
        Self::default()
    }

    pub fn enabled(&self) -> bool {
        self.threshold.is_some()
    }

    /// Accept iff the Chebyshev distance to the last candidate is <= threshold.
    /// The candidate always becomes the new reference, so a sustained jump is
    /// accepted again from the next frame on.
    pub fn filter(&mut self, candidate: Point) -> Verdict {
        let verdict = match (self.threshold, self.previous) {
            (Some(t), Some(prev)) if prev.chebyshev(candidate) > t => Verdict::Rejected,
            _ => Verdict::Accepted,
        };
        self.previous = Some(candidate);
        verdict
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn first_centroid_is_always_accepted() {
        let mut f = JitterFilter::new(0);
        assert_eq!(f.filter(Point::new(300, 200)), Verdict::Accepted);
    }

    #[test]
    fn jump_is_rejected_then_reference_moves() {
        let mut f = JitterFilter::new(50);
        assert_eq!(f.filter(Point::new(10, 10)), Verdict::Accepted);
        assert_eq!(f.filter(Point::new(40, 60)), Verdict::Accepted); // d = 50
        assert_eq!(f.filter(Point::new(200, 60)), Verdict::Rejected);
        assert_eq!(f.filter(Point::new(205, 62)), Verdict::Accepted);
    }

    #[test]
    fn disabled_accepts_everything() {
        let mut f = JitterFilter::disabled();
        assert!(!f.enabled());
        assert_eq!(f.filter(Point::new(0, 0)), Verdict::Accepted);
        assert_eq!(f.filter(Point::new(600, 400)), Verdict::Accepted);
    }

    proptest! {
        #[test]
        fn accepted_iff_within_threshold(
            t in 0u32..200, ax in 0i32..640, ay in 0i32..480, bx in 0i32..640, by in 0i32..480,
        ) {
            let (a, b) = (Point::new(ax, ay), Point::new(bx, by));
            let mut f = JitterFilter::new(t);
            f.filter(a);
            let accepted = f.filter(b) == Verdict::Accepted;
            prop_assert_eq!(accepted, a.chebyshev(b) <= t);
        }

        #[test]
        fn raising_threshold_never_rejects_more(
            t in 0u32..200, extra in 0u32..200,
            ax in 0i32..640, ay in 0i32..480, bx in 0i32..640, by in 0i32..480,
        ) {
            let (a, b) = (Point::new(ax, ay), Point::new(bx, by));
            let mut low = JitterFilter::new(t);
            let mut high = JitterFilter::new(t + extra);
            low.filter(a);
            high.filter(a);
            if low.filter(b) == Verdict::Accepted {
                prop_assert_eq!(high.filter(b), Verdict::Accepted);
            }
        }
    }
}
