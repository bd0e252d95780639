//! Engine tuning values.
//!
//! The defaults reproduce the calibration of the reference board: a 10-bit
//! ADC reading right-shifted by [`ACC_SHIFT`] to drop the noisy low bits,
//! a mid-scale zero point and a 1g magnitude taken from the sensor
//! datasheet. Every value is runtime-settable so per-unit calibration does
//! not require a rebuild.

/// Right shift applied to raw ADC conversions before they enter the engine.
pub const ACC_SHIFT: u32 = 2;

const ACC_ZERO_RAW: i32 = 512;
const ACC_1G_RAW: i32 = 205;

const ACC_ZERO: i32 = ACC_ZERO_RAW >> ACC_SHIFT; // 128
const ACC_1G: i32 = ACC_1G_RAW >> ACC_SHIFT; // 51

// The z axis is calibrated at its 1g-down reading, not at mid-scale: a
// device lying flat reads ACC_MIN on z, so ak is all-zero at rest.
const ACC_MIN: i32 = ACC_ZERO - ACC_1G; // 77

// Tilt triggers sit half a g away from mid-scale, roughly a 30 degree tilt.
const TILT_TRIG_HIGH: i32 = ACC_ZERO + ACC_1G / 2; // 153
const TILT_TRIG_LOW: i32 = ACC_ZERO - ACC_1G / 2; // 103

const SPEED_DEADBAND: i32 = 16;

/// A 3-axis vector of right-shifted ADC counts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Axes {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Axes {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Squared magnitude, used to classify quiet vs. moving without a
    /// square root.
    pub fn magnitude_sq(self) -> i32 {
        let x2 = self.x.saturating_mul(self.x);
        let y2 = self.y.saturating_mul(self.y);
        let z2 = self.z.saturating_mul(self.z);
        x2.saturating_add(y2).saturating_add(z2)
    }
}

impl core::ops::Add for Axes {
    type Output = Axes;

    fn add(self, rhs: Axes) -> Axes {
        Axes::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl core::ops::Sub for Axes {
    type Output = Axes;

    fn sub(self, rhs: Axes) -> Axes {
        Axes::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl core::ops::AddAssign for Axes {
    fn add_assign(&mut self, rhs: Axes) {
        self.x += rhs.x;
        self.y += rhs.y;
        self.z += rhs.z;
    }
}

/// Tilt axis selector for the angle queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TiltAxis {
    X,
    Y,
}

/// Runtime calibration and thresholds for one engine instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EngineConfig {
    /// Expected raw reading with the device at rest (z at its 1g-down
    /// value, see module docs).
    pub zero: Axes,
    /// Per-unit calibration offsets added on top of `zero`.
    pub offset: Axes,
    /// ADC counts per 1g, after the right shift.
    pub one_g: i32,
    /// `is_left` trigger: x rising above this level.
    pub trig_x1: i32,
    /// `is_right` trigger: x falling below this level.
    pub trig_x0: i32,
    /// `is_up` trigger: y rising above this level.
    pub trig_y1: i32,
    /// `is_down` trigger: y falling below this level.
    pub trig_y0: i32,
    /// `is_topdown` trigger: z rising above this level.
    pub trig_z: i32,
    /// Flip detector arm level: z rising above this marks "flipped over".
    pub shake_z_bottom: i32,
    /// Flip detector fire level: z falling back below this completes the
    /// gesture.
    pub shake_z_top: i32,
    /// Per-axis magnitude below which motion is not integrated.
    pub deadband: i32,
}

impl EngineConfig {
    /// Calibration point actually subtracted from samples.
    pub fn calibration(&self) -> Axes {
        self.zero + self.offset
    }

    /// Lower bound of the quiet band: 0.6 x (1g)^2, integer math.
    pub fn quiet_lo(&self) -> i32 {
        self.one_g * self.one_g * 6 / 10
    }

    /// Upper bound of the quiet band: 1.4 x (1g)^2, integer math.
    pub fn quiet_hi(&self) -> i32 {
        self.one_g * self.one_g * 14 / 10
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            zero: Axes::new(ACC_ZERO, ACC_ZERO, ACC_MIN),
            offset: Axes::default(),
            one_g: ACC_1G,
            trig_x1: TILT_TRIG_HIGH,
            trig_x0: TILT_TRIG_LOW,
            trig_y1: TILT_TRIG_HIGH,
            trig_y0: TILT_TRIG_LOW,
            trig_z: TILT_TRIG_HIGH,
            shake_z_bottom: TILT_TRIG_HIGH,
            shake_z_top: TILT_TRIG_LOW,
            deadband: SPEED_DEADBAND,
        }
    }
}
