//! Sine lookup shared by the angle queries.

/// `(angle_deg, sin(angle) * 1000)` for 0..=90 in 5 degree steps.
pub(crate) const MILLISIN: [(i32, i32); 19] = [
    (0, 0),
    (5, 87),
    (10, 174),
    (15, 259),
    (20, 342),
    (25, 423),
    (30, 500),
    (35, 574),
    (40, 643),
    (45, 707),
    (50, 766),
    (55, 819),
    (60, 866),
    (65, 906),
    (70, 940),
    (75, 966),
    (80, 985),
    (85, 996),
    (90, 1000),
];

/// `sin(angle) * 1000` rounded up to the next table step for angles that
/// fall between entries. Angles past 90 saturate at 1000.
pub(crate) fn millisin(angle_deg: i32) -> i32 {
    for &(deg, msin) in MILLISIN.iter() {
        if deg >= angle_deg {
            return msin;
        }
    }
    1000
}

/// ADC-count threshold matching `sin(angle) * one_g`.
pub(crate) fn sine_threshold(one_g: i32, angle_deg: i32) -> i32 {
    one_g * millisin(angle_deg) / 1000
}

/// Largest table angle whose threshold the given magnitude reaches,
/// scanning from 90 down so the first match wins.
pub(crate) fn bucket_angle(one_g: i32, magnitude: i32) -> i32 {
    for &(deg, msin) in MILLISIN.iter().rev() {
        if magnitude >= one_g * msin / 1000 {
            return deg;
        }
    }
    0
}
