//! Indicator state → concentric ring layout.
//!
//! The 110 rings are laid out as 10 nested groups of 11. Inside a group the
//! 10 minor rings come first at ascending radius, then the major ring sits
//! outermost. Group 0 is innermost. Every ring is one `spacing` further out
//! than the previous one, so ring `n` (0-based, in output order) sits at
//! `base + n * spacing`.

use dclock_types::ClockAppearance;
use serde::Serialize;

use crate::encoder::{GROUP_COUNT, IndicatorState, SLOTS_PER_GROUP};
use crate::error::ClockError;

/// Rings per group: the minors plus one major
pub const RINGS_PER_GROUP: usize = SLOTS_PER_GROUP + 1;
/// Total rings in a layout
pub const RING_COUNT: usize = GROUP_COUNT * RINGS_PER_GROUP;

/// Radial placement constants
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RingGeometry {
    base: f32,
    spacing: f32,
}

impl Default for RingGeometry {
    fn default() -> Self {
        Self {
            base: dclock_types::DEFAULT_BASE_RADIUS,
            spacing: dclock_types::DEFAULT_SPACING,
        }
    }
}

impl RingGeometry {
    /// # Errors
    ///
    /// Returns [`ClockError::InvalidGeometry`] if `base` is negative or
    /// non-finite, `spacing` is not strictly positive and finite, or the
    /// pair cannot place every ring strictly outside the previous one in
    /// `f32` (e.g. a spacing too small for the base radius).
    pub fn new(base: f32, spacing: f32) -> Result<Self, ClockError> {
        let invalid = ClockError::InvalidGeometry { base, spacing };
        if !(base.is_finite() && base >= 0.0 && spacing.is_finite() && spacing > 0.0) {
            return Err(invalid);
        }

        let geometry = Self { base, spacing };
        let increasing = (0..=RING_COUNT)
            .map(|ring| geometry.ring_radius(ring))
            .try_fold(f32::NEG_INFINITY, |prev, radius| {
                (radius.is_finite() && radius > prev).then_some(radius)
            })
            .is_some();
        if !increasing {
            return Err(invalid);
        }
        Ok(geometry)
    }

    pub fn from_appearance(appearance: &ClockAppearance) -> Result<Self, ClockError> {
        Self::new(appearance.base_radius, appearance.spacing)
    }

    /// Innermost radius
    pub fn base(&self) -> f32 {
        self.base
    }

    pub fn spacing(&self) -> f32 {
        self.spacing
    }

    /// Base radius of `group`: `base + 11 * group * spacing`
    pub fn group_radius(&self, group: usize) -> f32 {
        self.ring_radius(RINGS_PER_GROUP * group)
    }

    /// Radius of ring `ring` counted from the innermost, `base + ring * spacing`
    pub fn ring_radius(&self, ring: usize) -> f32 {
        self.base + ring as f32 * self.spacing
    }

    /// Outermost extent of the display for viewport sizing
    pub fn bounding_radius(&self) -> f32 {
        self.ring_radius(RING_COUNT)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IndicatorRole {
    /// Thermometer-coded decimal digit, one per group
    Major,
    /// Positional progress within a digit, ten per group
    Minor,
}

/// One ring ready to hand to a drawing surface
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Indicator {
    pub radius: f32,
    pub is_on: bool,
    pub role: IndicatorRole,
    /// Group index, 0 innermost
    pub group: u8,
    /// Position within the group: 0-9 for minors, 10 for the major
    pub slot: u8,
}

/// Flat, inner-to-outer list of all 110 rings
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    indicators: Vec<Indicator>,
    base_radius: f32,
    bounding_radius: f32,
}

impl Layout {
    pub fn indicators(&self) -> &[Indicator] {
        &self.indicators
    }

    pub fn len(&self) -> usize {
        self.indicators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indicators.is_empty()
    }

    pub fn base_radius(&self) -> f32 {
        self.base_radius
    }

    pub fn bounding_radius(&self) -> f32 {
        self.bounding_radius
    }

    /// The 10 groups of 11 rings, innermost first
    pub fn groups(&self) -> impl Iterator<Item = &[Indicator]> {
        self.indicators.chunks(RINGS_PER_GROUP)
    }

    /// Rings that are currently on
    pub fn lit(&self) -> impl Iterator<Item = &Indicator> {
        self.indicators.iter().filter(|ind| ind.is_on)
    }

    pub fn with_role(&self, role: IndicatorRole) -> impl Iterator<Item = &Indicator> {
        self.indicators.iter().filter(move |ind| ind.role == role)
    }
}

/// Lay out an indicator state as concentric rings.
pub fn compose(state: &IndicatorState, geometry: &RingGeometry) -> Layout {
    let mut indicators = Vec::with_capacity(RING_COUNT);

    for group in 0..GROUP_COUNT {
        let first_ring = group * RINGS_PER_GROUP;
        let chunk = state.minor_chunk(group);

        for (slot, &is_on) in chunk.iter().enumerate() {
            indicators.push(Indicator {
                radius: geometry.ring_radius(first_ring + slot),
                is_on,
                role: IndicatorRole::Minor,
                group: group as u8,
                slot: slot as u8,
            });
        }

        indicators.push(Indicator {
            radius: geometry.ring_radius(first_ring + SLOTS_PER_GROUP),
            is_on: state.major_digits()[group],
            role: IndicatorRole::Major,
            group: group as u8,
            slot: SLOTS_PER_GROUP as u8,
        });
    }

    Layout {
        indicators,
        base_radius: geometry.base,
        bounding_radius: geometry.bounding_radius(),
    }
}

/// [`compose`] with the default geometry
pub fn compose_default(state: &IndicatorState) -> Layout {
    compose(state, &RingGeometry::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::{SECONDS_PER_DAY, encode};

    fn layout_at(t: f64) -> Layout {
        compose_default(&encode(t).unwrap())
    }

    #[test]
    fn test_ring_count_matches_appearance() {
        assert_eq!(RING_COUNT, dclock_types::RING_COUNT);
        let appearance = ClockAppearance::default();
        assert_eq!(
            RingGeometry::from_appearance(&appearance).unwrap().bounding_radius(),
            appearance.bounding_radius()
        );
    }

    #[test]
    fn test_counts() {
        let layout = layout_at(12_345.0);
        assert_eq!(layout.len(), RING_COUNT);
        assert_eq!(layout.with_role(IndicatorRole::Minor).count(), 100);
        assert_eq!(layout.with_role(IndicatorRole::Major).count(), 10);
        assert_eq!(layout.groups().count(), GROUP_COUNT);
        assert!(layout.groups().all(|g| g.len() == RINGS_PER_GROUP));
    }

    #[test]
    fn test_radii_strictly_increasing() {
        let mut t = 0.0;
        while t < SECONDS_PER_DAY {
            let layout = layout_at(t);
            assert!(
                layout
                    .indicators()
                    .windows(2)
                    .all(|pair| pair[0].radius < pair[1].radius),
                "radii not increasing at t={t}"
            );
            t += 3_600.0;
        }
    }

    #[test]
    fn test_major_is_outermost_in_group() {
        let layout = layout_at(50_000.0);
        let groups: Vec<&[Indicator]> = layout.groups().collect();
        for (g, group) in groups.iter().enumerate() {
            let major = group[SLOTS_PER_GROUP];
            assert_eq!(major.role, IndicatorRole::Major);
            assert_eq!(major.group as usize, g);
            assert!(group[..SLOTS_PER_GROUP].iter().all(|m| m.radius < major.radius));
            if let Some(next) = groups.get(g + 1) {
                assert!(next.iter().all(|ind| ind.radius > major.radius));
            }
        }
    }

    #[test]
    fn test_radius_formula() {
        let geometry = RingGeometry::new(20.0, 5.0).unwrap();
        let layout = compose(&encode(0.0).unwrap(), &geometry);
        let rings = layout.indicators();

        assert_eq!(rings[0].radius, 20.0);
        // group 3, slot 4: 20 + 11*3*5 + 4*5
        assert_eq!(rings[3 * RINGS_PER_GROUP + 4].radius, 20.0 + 165.0 + 20.0);
        // major of group 9: 20 + 99*5 + 10*5
        assert_eq!(rings[RING_COUNT - 1].radius, 20.0 + 495.0 + 50.0);
        assert_eq!(layout.base_radius(), 20.0);
        assert_eq!(layout.bounding_radius(), 20.0 + 5.0 * 110.0);
    }

    #[test]
    fn test_on_states_follow_encoder() {
        // 33/64 of a day: 5 majors, coarse 15, fine 62
        let layout = layout_at(44_550.0);
        let lit: Vec<(IndicatorRole, u8, u8)> =
            layout.lit().map(|ind| (ind.role, ind.group, ind.slot)).collect();
        assert_eq!(
            lit,
            vec![
                (IndicatorRole::Major, 0, 10),
                (IndicatorRole::Minor, 1, 5),
                (IndicatorRole::Major, 1, 10),
                (IndicatorRole::Major, 2, 10),
                (IndicatorRole::Major, 3, 10),
                (IndicatorRole::Major, 4, 10),
                (IndicatorRole::Minor, 6, 2),
            ]
        );
    }

    #[test]
    fn test_midnight_layout() {
        let layout = layout_at(0.0);
        let lit: Vec<&Indicator> = layout.lit().collect();
        assert_eq!(lit.len(), 1);
        assert_eq!((lit[0].group, lit[0].slot), (0, 0));
        assert_eq!(lit[0].role, IndicatorRole::Minor);
    }

    #[test]
    fn test_compose_is_idempotent() {
        let state = encode(71_234.5).unwrap();
        assert_eq!(compose_default(&state), compose_default(&state));
    }

    #[test]
    fn test_invalid_geometry() {
        assert!(RingGeometry::new(-1.0, 8.0).is_err());
        assert!(RingGeometry::new(30.0, 0.0).is_err());
        assert!(RingGeometry::new(30.0, f32::NAN).is_err());
        assert!(RingGeometry::new(0.0, 1.0).is_ok());
    }

    #[test]
    fn test_collapsing_radii_are_rejected() {
        // Spacing below f32 resolution at this base puts neighbours on the same radius
        assert!(matches!(
            RingGeometry::new(1_000.0, 1e-5),
            Err(ClockError::InvalidGeometry { .. })
        ));
        // Outer rings overflow to infinity
        assert!(RingGeometry::new(0.0, f32::MAX / 2.0).is_err());
    }

    #[test]
    fn test_accepted_geometry_keeps_radii_increasing() {
        for (base, spacing) in [(1_000.0, 1e-3), (0.0, 1e-3), (30.0, 8.0), (1e6, 0.5)] {
            let geometry = RingGeometry::new(base, spacing).unwrap();
            let layout = compose(&encode(0.0).unwrap(), &geometry);
            assert!(
                layout
                    .indicators()
                    .windows(2)
                    .all(|pair| pair[0].radius < pair[1].radius),
                "radii collapse for base={base} spacing={spacing}"
            );
            assert!(layout.bounding_radius() > layout.indicators()[RING_COUNT - 1].radius);
        }
    }

    #[test]
    fn test_geometry_from_appearance() {
        let appearance = ClockAppearance::default();
        let geometry = RingGeometry::from_appearance(&appearance).unwrap();
        assert_eq!(geometry, RingGeometry::default());
        assert_eq!(geometry.bounding_radius(), appearance.bounding_radius());
    }
}
