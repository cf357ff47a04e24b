use shaftx::{solve, ShaftSpec};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Analyse the reference countershaft
    let analysis = solve(&ShaftSpec::default())?;

    // Bearing reactions in both transverse planes
    let reactions = analysis.reactions;
    println!("Ay = {:+.1} lb, By = {:+.1} lb", reactions.near.y, reactions.far.y);
    println!("Az = {:+.1} lb, Bz = {:+.1} lb", reactions.near.z, reactions.far.z);

    // Print the x-y bending moment diagram as a plotter would receive it
    for sample in analysis.diagrams.moment_y.samples() {
        println!("x = {:>5.2} in  My = {:>9.1} lb-in", sample.position, sample.value);
    }

    Ok(())
}
