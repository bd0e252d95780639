//! The orientation engine proper.

use statig::blocking::IntoStateMachineExt as _;

use crate::config::{Axes, EngineConfig, TiltAxis};
use crate::flip::{FlipEvent, FlipHsm};
use crate::table::{bucket_angle, sine_threshold};

/// Anything that can deliver a fresh 3-axis raw sample.
///
/// The three reads are assumed close enough in time to count as one
/// simultaneous sample; no timestamping is enforced. Implementations may
/// block on hardware.
pub trait SampleSource {
    fn read_sample(&mut self) -> Axes;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Polarity {
    Above,
    Below,
}

/// One orientation flag with a ~1%-wide hysteresis band around its trigger
/// level, so a reading sitting on the boundary cannot toggle the flag every
/// update.
#[derive(Clone, Copy, Debug)]
struct HysteresisFlag {
    trigger: i32,
    polarity: Polarity,
    set: bool,
}

impl HysteresisFlag {
    fn above(trigger: i32) -> Self {
        Self {
            trigger,
            polarity: Polarity::Above,
            set: false,
        }
    }

    fn below(trigger: i32) -> Self {
        Self {
            trigger,
            polarity: Polarity::Below,
            set: false,
        }
    }

    fn evaluate(&mut self, value: i32) -> bool {
        let hi = self.trigger * 101 / 100;
        let lo = self.trigger * 99 / 100;
        self.set = match self.polarity {
            Polarity::Above => {
                if self.set {
                    value >= lo
                } else {
                    value > hi
                }
            }
            Polarity::Below => {
                if self.set {
                    value <= hi
                } else {
                    value < lo
                }
            }
        };
        self.set
    }
}

fn deadband(value: Axes, threshold: i32) -> Axes {
    let clip = |v: i32| if v.abs() < threshold { 0 } else { v };
    Axes::new(clip(value.x), clip(value.y), clip(value.z))
}

/// State machine converting raw 3-axis samples into orientation facts.
///
/// One instance per physical sensor; all state is owned here and mutated
/// in place, so a single task must drive both [`update`](Self::update) and
/// the queries.
pub struct OrientationEngine {
    config: EngineConfig,
    sample: Axes,
    gravity: Axes,
    ak: Axes,
    ak2: i32,
    ag: Axes,
    ag2: i32,
    speed: Axes,
    quiet: bool,
    left: HysteresisFlag,
    right: HysteresisFlag,
    up: HysteresisFlag,
    down: HysteresisFlag,
    topdown: HysteresisFlag,
    flip: statig::blocking::StateMachine<FlipHsm>,
}

impl Default for OrientationEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl OrientationEngine {
    pub fn new(config: EngineConfig) -> Self {
        let calibration = config.calibration();
        Self {
            config,
            sample: calibration,
            gravity: calibration,
            ak: Axes::default(),
            ak2: 0,
            ag: Axes::default(),
            ag2: 0,
            speed: Axes::default(),
            quiet: false,
            left: HysteresisFlag::above(config.trig_x1),
            right: HysteresisFlag::below(config.trig_x0),
            up: HysteresisFlag::above(config.trig_y1),
            down: HysteresisFlag::below(config.trig_y0),
            topdown: HysteresisFlag::above(config.trig_z),
            flip: FlipHsm::new(config.shake_z_bottom, config.shake_z_top).state_machine(),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Most recent raw sample fed to [`update`](Self::update).
    pub fn sample(&self) -> Axes {
        self.sample
    }

    /// Current gravity estimate, refreshed only while quiet.
    pub fn gravity(&self) -> Axes {
        self.gravity
    }

    /// Acceleration relative to the calibration point.
    pub fn ak(&self) -> Axes {
        self.ak
    }

    /// Squared magnitude of [`ak`](Self::ak); what the quiet band tests.
    pub fn ak2(&self) -> i32 {
        self.ak2
    }

    /// Acceleration relative to the gravity reference.
    pub fn ag(&self) -> Axes {
        self.ag
    }

    /// Squared magnitude of [`ag`](Self::ag).
    pub fn ag2(&self) -> i32 {
        self.ag2
    }

    /// Deadbanded velocity integral, accumulated while moving.
    pub fn speed(&self) -> Axes {
        self.speed
    }

    /// Read one sample from the collaborator and run an update cycle.
    pub fn update_from<S: SampleSource>(&mut self, source: &mut S) {
        let sample = source.read_sample();
        self.update(sample);
    }

    /// One update cycle.
    ///
    /// Classifies the sample as quiet iff its squared acceleration relative
    /// to the calibration point falls strictly inside the 0.6..1.4 x (1g)^2
    /// band. While quiet the gravity reference tracks the sample and the
    /// velocity integral stays zeroed; while moving, the gravity-relative
    /// acceleration is deadbanded and accumulated.
    pub fn update(&mut self, sample: Axes) {
        self.sample = sample;
        self.ak = sample - self.config.calibration();
        self.ak2 = self.ak.magnitude_sq();
        self.ag = sample - self.gravity;
        self.ag2 = self.ag.magnitude_sq();
        self.quiet = self.ak2 > self.config.quiet_lo() && self.ak2 < self.config.quiet_hi();
        if self.quiet {
            self.gravity = sample;
            self.speed = Axes::default();
        } else {
            self.speed += deadband(self.ag, self.config.deadband);
        }
    }

    /// Whether the last update saw gravity-only dynamics.
    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    pub fn is_left(&mut self) -> bool {
        self.left.evaluate(self.sample.x)
    }

    pub fn is_right(&mut self) -> bool {
        self.right.evaluate(self.sample.x)
    }

    pub fn is_up(&mut self) -> bool {
        self.up.evaluate(self.sample.y)
    }

    pub fn is_down(&mut self) -> bool {
        self.down.evaluate(self.sample.y)
    }

    pub fn is_topdown(&mut self) -> bool {
        self.topdown.evaluate(self.sample.z)
    }

    /// Flip-gesture edge detector.
    ///
    /// `stop` is the caller-managed reset: it forces the latch clear for
    /// this and subsequent calls until a full flip sequence completes
    /// again. Without `stop`, the current z reading advances the detector
    /// and the latch is returned.
    pub fn is_shake(&mut self, stop: bool) -> bool {
        if stop {
            self.flip.handle(&FlipEvent::Stop);
        } else {
            self.flip.handle(&FlipEvent::Sample { z: self.sample.z });
        }
        self.flip.latched()
    }

    /// Tests whether the x tilt exceeds the given absolute angle.
    ///
    /// Returns +1 or -1 when `|ak.x|` crosses `sin(angle) * one_g` with the
    /// matching sign, 0 otherwise. Callers bucket tilt by testing from the
    /// largest angle down; the first non-zero answer wins.
    pub fn angle_x(&self, abs_angle_deg: i32) -> i32 {
        Self::angle_test(self.ak.x, sine_threshold(self.config.one_g, abs_angle_deg))
    }

    /// Same as [`angle_x`](Self::angle_x) for the y axis.
    pub fn angle_y(&self, abs_angle_deg: i32) -> i32 {
        Self::angle_test(self.ak.y, sine_threshold(self.config.one_g, abs_angle_deg))
    }

    fn angle_test(component: i32, threshold: i32) -> i32 {
        if component > threshold {
            1
        } else if component < -threshold {
            -1
        } else {
            0
        }
    }

    /// Table-driven compass heading for one tilt axis, 0..=359 degrees.
    ///
    /// The 19-entry sine table is scanned from 90 degrees down; the first
    /// threshold reached by `|ak.axis|` selects the base angle, and the
    /// signs of the tilt axis and of `ak.z` pick the quadrant:
    /// `+/+ -> a`, `+/- -> 180-a`, `-/- -> 180+a`, `-/+ -> 360-a`.
    pub fn measure(&self, axis: TiltAxis) -> i32 {
        let component = match axis {
            TiltAxis::X => self.ak.x,
            TiltAxis::Y => self.ak.y,
        };
        let angle = bucket_angle(self.config.one_g, component.abs());
        match (component >= 0, self.ak.z >= 0) {
            (true, true) => angle,
            (true, false) => 180 - angle,
            (false, false) => 180 + angle,
            (false, true) => (360 - angle) % 360,
        }
    }
}
