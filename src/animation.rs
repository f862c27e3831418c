use crate::types::Animation;
use std::f64::consts::TAU;
use std::time::Duration;

/// Length of one loop of every shape animation.
pub const CYCLE: Duration = Duration::from_secs(2);

/// Visual transform applied to a shape at one instant.
///
/// `translate_y` is a fraction of the shape's box height, negative is up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub scale: f64,
    pub rotation: f64,
    pub translate_y: f64,
    pub opacity: f64,
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        scale: 1.0,
        rotation: 0.0,
        translate_y: 0.0,
        opacity: 1.0,
    };

    fn lerp(self, to: Transform, t: f64) -> Transform {
        let mix = |a: f64, b: f64| a + (b - a) * t;
        Transform {
            scale: mix(self.scale, to.scale),
            rotation: mix(self.rotation, to.rotation),
            translate_y: mix(self.translate_y, to.translate_y),
            opacity: mix(self.opacity, to.opacity),
        }
    }
}

const FADE_LOW: Transform = Transform {
    scale: 0.8,
    opacity: 0.5,
    ..Transform::IDENTITY
};
const FADE_HIGH: Transform = Transform {
    scale: 1.2,
    opacity: 1.0,
    ..Transform::IDENTITY
};
const BOUNCE_TOP: Transform = Transform {
    translate_y: -0.25,
    ..Transform::IDENTITY
};
const SPIN_END: Transform = Transform {
    rotation: TAU,
    ..Transform::IDENTITY
};
const SCALE_PEAK: Transform = Transform {
    scale: 1.5,
    ..Transform::IDENTITY
};

const FADE: &[(f64, Transform)] = &[(0.0, FADE_LOW), (0.5, FADE_HIGH), (1.0, FADE_LOW)];
const BOUNCE: &[(f64, Transform)] = &[
    (0.0, Transform::IDENTITY),
    (0.5, BOUNCE_TOP),
    (1.0, Transform::IDENTITY),
];
const SPIN: &[(f64, Transform)] = &[(0.0, Transform::IDENTITY), (1.0, SPIN_END)];
const SCALE: &[(f64, Transform)] = &[
    (0.0, Transform::IDENTITY),
    (0.5, SCALE_PEAK),
    (1.0, Transform::IDENTITY),
];

impl Animation {
    fn keyframes(self) -> &'static [(f64, Transform)] {
        match self {
            Animation::Fade => FADE,
            Animation::Bounce => BOUNCE,
            Animation::Spin => SPIN,
            Animation::Scale => SCALE,
        }
    }

    /// Transform at `phase` in `[0, 1)` of the loop.
    pub fn sample(self, phase: f64) -> Transform {
        sample_keyframes(self.keyframes(), phase)
    }

    pub fn at(self, elapsed: Duration) -> Transform {
        self.sample(phase(elapsed, CYCLE))
    }
}

/// Position within a repeating period, in `[0, 1)`.
pub fn phase(elapsed: Duration, period: Duration) -> f64 {
    let period = period.as_secs_f64();
    if period <= 0.0 {
        return 0.0;
    }
    (elapsed.as_secs_f64() / period).fract()
}

/// Star brightness keyframes: `0%, 100%: 0.8; 50%: 0.2`.
pub fn twinkle(phase: f64) -> f64 {
    let (from, to, t) = if phase < 0.5 {
        (0.8, 0.2, phase * 2.0)
    } else {
        (0.2, 0.8, (phase - 0.5) * 2.0)
    };
    from + (to - from) * ease_in_out(t)
}

fn sample_keyframes(frames: &[(f64, Transform)], phase: f64) -> Transform {
    let phase = phase.clamp(0.0, 1.0);
    for pair in frames.windows(2) {
        let (start, from) = pair[0];
        let (end, to) = pair[1];
        if phase <= end {
            let span = end - start;
            let local = if span > 0.0 { (phase - start) / span } else { 1.0 };
            return from.lerp(to, ease_in_out(local));
        }
    }
    frames.last().map_or(Transform::IDENTITY, |(_, t)| *t)
}

/// `cubic-bezier(0.42, 0, 0.58, 1)`, applied per keyframe segment.
pub fn ease_in_out(x: f64) -> f64 {
    const X1: f64 = 0.42;
    const X2: f64 = 0.58;
    const Y1: f64 = 0.0;
    const Y2: f64 = 1.0;

    let x = x.clamp(0.0, 1.0);
    let bezier = |t: f64, p1: f64, p2: f64| {
        let u = 1.0 - t;
        3.0 * u * u * t * p1 + 3.0 * u * t * t * p2 + t * t * t
    };

    // x(t) is monotonic on [0, 1], bisect for the parameter.
    let (mut lo, mut hi) = (0.0, 1.0);
    for _ in 0..32 {
        let mid = (lo + hi) / 2.0;
        if bezier(mid, X1, X2) < x {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    bezier((lo + hi) / 2.0, Y1, Y2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn test_ease_endpoints_and_symmetry() {
        assert!(close(ease_in_out(0.0), 0.0));
        assert!(close(ease_in_out(1.0), 1.0));
        assert!(close(ease_in_out(0.5), 0.5));
        assert!(ease_in_out(0.25) < 0.25);
        assert!(close(ease_in_out(0.3) + ease_in_out(0.7), 1.0));
    }

    #[test]
    fn test_fade_keyframes() {
        let start = Animation::Fade.sample(0.0);
        assert!(close(start.opacity, 0.5));
        assert!(close(start.scale, 0.8));
        let mid = Animation::Fade.sample(0.5);
        assert!(close(mid.opacity, 1.0));
        assert!(close(mid.scale, 1.2));
    }

    #[test]
    fn test_motion_keyframes() {
        assert!(close(Animation::Spin.sample(0.5).rotation, PI));
        assert!(close(Animation::Bounce.sample(0.5).translate_y, -0.25));
        assert!(close(Animation::Bounce.sample(0.0).translate_y, 0.0));
        assert!(close(Animation::Scale.sample(0.5).scale, 1.5));
        assert!(close(Animation::Scale.sample(1.0).scale, 1.0));
    }

    #[test]
    fn test_phase_wraps() {
        assert!(close(phase(Duration::from_millis(500), CYCLE), 0.25));
        assert!(close(phase(Duration::from_millis(2_500), CYCLE), 0.25));
        assert!(close(phase(Duration::from_secs(3), Duration::ZERO), 0.0));
    }

    #[test]
    fn test_twinkle_range() {
        assert!(close(twinkle(0.0), 0.8));
        assert!(close(twinkle(0.5), 0.2));
        for i in 0..100 {
            let v = twinkle(i as f64 / 100.0);
            assert!((0.2 - 1e-9..=0.8 + 1e-9).contains(&v));
        }
    }
}
