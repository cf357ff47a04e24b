use shaftx::{solve, ShaftSpec};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Try a few shaft diameters for the reference gearbox
    for shaft_diameter in [1.25, 1.5, 1.75, 2.0] {
        let spec = ShaftSpec {
            shaft_diameter,
            ..ShaftSpec::default()
        };
        let analysis = solve(&spec)?;

        // Report the governing station and its factor of safety against yielding
        if let Some(critical) = analysis.stress.critical_point() {
            println!(
                "d = {shaft_diameter:.2} in: critical at {} (x = {:.2} in), factor of safety {:.2}",
                critical.label, critical.position, critical.yield_factor_of_safety
            );
        } else {
            println!("d = {shaft_diameter:.2} in: no stations to evaluate");
        }
    }

    // All done
    Ok(())
}
