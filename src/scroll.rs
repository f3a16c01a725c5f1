use std::time::{Duration, Instant};

#[derive(Clone, Copy, Debug)]
struct Animation {
    from: f64,
    to: f64,
    started: Instant,
}

/// Vertical scroll position with an eased, redirectable animation.
#[derive(Clone, Debug)]
pub struct SmoothScroll {
    position: f64,
    duration: Duration,
    animation: Option<Animation>,
}

impl SmoothScroll {
    pub fn new(duration: Duration) -> Self {
        Self { position: 0.0, duration, animation: None }
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    /// Row offset used for drawing.
    pub fn row(&self) -> u16 {
        self.position.round().clamp(0.0, u16::MAX as f64) as u16
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    pub fn target(&self) -> f64 {
        self.animation.map(|a| a.to).unwrap_or(self.position)
    }

    /// Starts animating towards `to` from wherever the view is now.
    pub fn start(&mut self, to: f64, now: Instant) {
        if self.duration.is_zero() {
            self.jump(to);
            return;
        }
        self.animation = Some(Animation { from: self.position, to, started: now });
    }

    pub fn jump(&mut self, to: f64) {
        self.animation = None;
        self.position = to;
    }

    /// Advances the animation. Returns true if the position moved.
    pub fn tick(&mut self, now: Instant) -> bool {
        let Some(anim) = self.animation else {
            return false;
        };
        let elapsed = now.saturating_duration_since(anim.started);
        let t = (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0);
        let next = anim.from + (anim.to - anim.from) * ease_in_out_cubic(t);
        if t >= 1.0 {
            self.animation = None;
        }
        let moved = next != self.position;
        self.position = next;
        moved
    }

    /// Keeps the position and any running target within `[0, max]`.
    pub fn clamp(&mut self, max: f64) {
        let max = max.max(0.0);
        self.position = self.position.clamp(0.0, max);
        if let Some(anim) = self.animation.as_mut() {
            anim.to = anim.to.clamp(0.0, max);
        }
    }
}

fn ease_in_out_cubic(t: f64) -> f64 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}
