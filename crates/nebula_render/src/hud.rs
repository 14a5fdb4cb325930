use nebula_physics::energy;
use nebula_sim::Nebula;

/// One-line status shown above the grid
pub fn status_line(nebula: &Nebula) -> String {
    let (faint, bright) = energy::brightness_census(nebula.store());
    format!(
        "Step {}  Alive: {}  (bright {}, faint {})  Energy: {}",
        nebula.step(),
        nebula.alive_count(),
        bright,
        faint,
        nebula.total_energy()
    )
}
