use beamx::{Beam, DistributedLoad, PointLoad, SolverOptions, SupportKind};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // 8 m steel beam: E = 200 000 MPa, I = 10^7 mm^4.
    let mut beam = Beam::new(8.0);
    beam.set_section_mpa_mm4(200_000.0, 10_000_000.0)?;
    beam.set_support(0.0, SupportKind::Pinned)?;
    beam.set_support(8.0, SupportKind::Rolled)?;
    beam.set_point_load(PointLoad::downward(4.0, 10.0))?;
    beam.add_distributed_load(DistributedLoad::downward(0.0, 4.0, 2.0))?;

    let options = SolverOptions::default();
    let solution = beam.solve(&options)?;

    for (node, position) in solution.nodes.iter().enumerate() {
        let deflection = solution.displacement(node).unwrap_or_default();
        let reaction = solution.reaction_force(node).unwrap_or_default();
        println!("x = {position:>4} m  w = {deflection:>+12.5e} m  R = {reaction:>+9.3} kN");
    }

    Ok(())
}
