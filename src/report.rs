use crate::analysis::AnalysisSummary;
use std::fmt::Write;

/// Render a textual summary of the shaft analysis.
///
/// The report walks through the pipeline in order: mesh forces, bearing
/// reactions with the equilibrium residual, a table of the diagrams at every
/// station, and the governing stress state.
#[must_use]
pub fn render_summary(summary: &AnalysisSummary) -> String {
    let mut output = String::new();
    let analysis = &summary.analysis;
    let spec = &analysis.spec;
    let forces = &analysis.forces;

    writeln!(
        &mut output,
        "Shaft analysis ({:.1} hp at {:.3} rpm, torque = {:.1} lb-in)",
        spec.power_hp, spec.speed_rpm, forces.torque
    )
    .expect("writing to string cannot fail");

    output.push_str("\nGear mesh forces (lb):\n");
    for mesh in &forces.meshes {
        writeln!(
            &mut output,
            "  {:<3} x = {:>5.2} in  tangential = {:>9.1}  radial = {:>9.1}  axial = {:>9.1}",
            mesh.label, mesh.position, mesh.tangential, mesh.radial, mesh.axial
        )
        .expect("writing to string cannot fail");
    }

    let reactions = &analysis.reactions;
    output.push_str("\nBearing reactions (lb):\n");
    for (name, position, reaction) in [
        ("near", spec.near_bearing, reactions.near),
        ("far", spec.far_bearing, reactions.far),
    ] {
        writeln!(
            &mut output,
            "  {name:<4} x = {position:>5.2} in  Rx = {:+10.1}  Ry = {:+10.1}  Rz = {:+10.1}",
            reaction.x, reaction.y, reaction.z
        )
        .expect("writing to string cannot fail");
    }
    let (force, moment) = summary.residual;
    writeln!(
        &mut output,
        "  equilibrium residual: |F| = {:.3e} lb, |M| = {:.3e} lb-in",
        force.to_vector().norm(),
        moment.to_vector().norm()
    )
    .expect("writing to string cannot fail");

    // One row per station; a jump in the moment shows as "before -> after".
    let diagrams = &analysis.diagrams;
    output.push_str(
        "\nDiagrams at each station (value just past the station):\n  \
         station          x (in)    Vy (lb)    Vz (lb)     N (lb)    T (lb-in)   My (lb-in)   Mz (lb-in)\n",
    );
    for (label, position) in spec.stations() {
        let moment_y = match diagrams
            .moment_y
            .jumps()
            .iter()
            .find(|jump| jump.position == position)
        {
            Some(jump) => format!("{:.0} -> {:.0}", jump.before, jump.after),
            None => format!("{:.0}", diagrams.moment_y.value_at(position)),
        };
        writeln!(
            &mut output,
            "  {label:<14} {position:>8.2} {:>10.1} {:>10.1} {:>10.1} {:>12.1} {:>12} {:>12.0}",
            diagrams.shear_y.value_at(position),
            diagrams.shear_z.value_at(position),
            diagrams.axial.value_at(position),
            diagrams.torque.value_at(position),
            moment_y,
            diagrams.moment_z.value_at(position),
        )
        .expect("writing to string cannot fail");
    }

    // The factor of safety gives a simple go/no-go check against yielding.
    if let Some(critical) = analysis.stress.critical_point() {
        writeln!(
            &mut output,
            "\nCritical station: {} at x = {:.2} in (M = {:.0} lb-in, T = {:.0} lb-in)",
            critical.label, critical.position, critical.bending_moment, critical.torque
        )
        .expect("writing to string cannot fail");
        writeln!(
            &mut output,
            "  von Mises stress = {:.0} psi on a {:.3} in diameter",
            critical.von_mises, spec.shaft_diameter
        )
        .expect("writing to string cannot fail");
        writeln!(
            &mut output,
            "  factor of safety: yield = {:.2}, ultimate = {:.2}",
            critical.yield_factor_of_safety, critical.ultimate_factor_of_safety
        )
        .expect("writing to string cannot fail");
    }

    output
}
