use beamx::{Beam, BeamEditError, PointLoad, SupportKind};

/// Problem data for the propped-cantilever demonstration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProppedCantileverProperties {
    /// Beam length in metres.
    pub length: f64,
    /// Elastic modulus; unit values keep the hand calculation readable.
    pub elastic_modulus: f64,
    /// Second moment of area.
    pub second_moment: f64,
    /// Position of the point load from the fixed end.
    pub load_position: f64,
    /// Signed point load, upward positive.
    pub load: f64,
}

impl Default for ProppedCantileverProperties {
    fn default() -> Self {
        Self {
            length: 10.0,
            elastic_modulus: 1.0,
            second_moment: 1.0,
            load_position: 3.0,
            load: -1.0,
        }
    }
}

/// Build a beam fixed at the left end and pinned at the right, loaded by a
/// single downward point load.
///
/// A propped cantilever is statically indeterminate to the first degree, so
/// equilibrium alone cannot give the reactions; the stiffness method can (see
/// <https://en.wikipedia.org/wiki/Direct_stiffness_method>).
pub fn build_propped_cantilever() -> Result<(Beam, ProppedCantileverProperties), BeamEditError> {
    let properties = ProppedCantileverProperties::default();
    let mut beam = Beam::new(properties.length);

    // Section properties are uniform along the whole beam.
    beam.set_section(properties.elastic_modulus, properties.second_moment)?;

    // The fixed end stops both deflection and rotation, the pin only deflection.
    beam.set_support(0.0, SupportKind::Fixed)?;
    beam.set_support(properties.length, SupportKind::Pinned)?;

    // Negative because the load acts downwards.
    beam.set_point_load(PointLoad::new(properties.load_position, properties.load))?;

    Ok((beam, properties))
}
