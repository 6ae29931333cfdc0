use beamx::{SolverOptions, SpringChain};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // Two springs in series, fixed at the right-hand wall.
    let chain = SpringChain::new(vec![100.0, 200.0])
        .with_fixed(2)
        .with_load(0, 10.0)
        .with_load(1, 20.0);

    let solution = chain.solve(&SolverOptions::default())?;

    println!("K =\n{}", solution.stiffness);
    for (node, displacement) in solution.displacements.iter().enumerate() {
        println!(
            "node {node}: u = {displacement:.5}  R = {:.5}",
            solution.reactions[node]
        );
    }
    for (spring, force) in solution.spring_forces.iter().enumerate() {
        println!("spring {spring}: N = {force:.5}");
    }

    Ok(())
}
