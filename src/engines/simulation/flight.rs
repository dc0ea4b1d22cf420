use crate::config::{FlightCondition, SimulationConfig};
use crate::engines::geometry::FoldGeometry;
use crate::engines::simulation::aerodynamics::{AeroModel, ThinAirfoil};
use crate::types::{FlightOutcome, Termination, TrajectorySample, Vec3};
use std::sync::Arc;

/// Pitch-rate damping coefficient for the rotational degree of freedom.
const PITCH_DAMPING: f64 = 1.5;

/// Zero-lift pitching moment from the reflexed trailing edge of a folded
/// sheet. Sets the trim angle of attack together with the static margin.
const CM0: f64 = 0.03;

/// Relative airspeed below which the aero forces are treated as zero.
const MIN_AIRSPEED: f64 = 1e-6;

/// Integrates a fold geometry through one flight condition.
///
/// Each call is independent and side-effect-free: the full state lives on the
/// stack, so simulations can run concurrently over a shared simulator.
#[derive(Clone)]
pub struct FlightSimulator {
    config: SimulationConfig,
    model: Arc<dyn AeroModel>,
}

impl FlightSimulator {
    pub fn new(config: SimulationConfig) -> Self {
        Self {
            config,
            model: Arc::new(ThinAirfoil::default()),
        }
    }

    /// Swap in a different coefficient model without touching the integrator.
    pub fn with_model(mut self, model: Arc<dyn AeroModel>) -> Self {
        self.model = model;
        self
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Forward-integrate until landing, timeout or divergence.
    ///
    /// Semi-implicit Euler over translation (3D) plus longitudinal pitch.
    /// Never emits a non-finite sample: the step that would diverge is
    /// dropped and the outcome is flagged [`Termination::Unstable`].
    pub fn simulate(&self, geometry: &FoldGeometry, condition: &FlightCondition) -> FlightOutcome {
        let dt = self.config.time_step;
        let launch_rad = condition.launch_angle_deg.to_radians();

        let mut position = Vec3::new(0.0, 0.0, condition.launch_height);
        let mut velocity = Vec3::new(
            condition.launch_speed * launch_rad.cos(),
            0.0,
            condition.launch_speed * launch_rad.sin(),
        );
        let mut pitch = launch_rad;
        let mut pitch_rate = 0.0;
        let mut time = 0.0;

        // Dihedral trades projected lifting area for lateral settling.
        let lift_area = geometry.wing_area * geometry.dihedral_rad.cos().powi(2);

        let capacity = (self.config.max_duration / dt).ceil() as usize;
        let mut samples = Vec::with_capacity(capacity.min(4096));
        let mut termination = Termination::Timeout;

        while time < self.config.max_duration {
            let relative = velocity - condition.wind;
            let airspeed = relative.norm();

            let (alpha, lift, drag, acceleration, pitch_acceleration) = if airspeed > MIN_AIRSPEED
            {
                let unit = relative.scale(1.0 / airspeed);
                let gamma = relative.z.atan2(relative.horizontal_norm());
                let alpha = pitch - gamma;

                let coefficients = self.model.coefficients(alpha, geometry.aspect_ratio);
                let dynamic_pressure = 0.5 * condition.air_density * airspeed * airspeed;
                let lift = dynamic_pressure * lift_area * coefficients.cl;
                let drag = dynamic_pressure * geometry.wing_area * coefficients.cd;

                // Lift is perpendicular to the relative wind in its vertical
                // plane; drag opposes it.
                let horizontal = unit.horizontal_norm();
                let lift_dir = if horizontal > MIN_AIRSPEED {
                    Vec3::new(
                        -unit.z * unit.x / horizontal,
                        -unit.z * unit.y / horizontal,
                        horizontal,
                    )
                } else {
                    Vec3::new(0.0, 0.0, 1.0)
                };

                let force = lift_dir * lift - unit * drag
                    + Vec3::new(0.0, 0.0, -geometry.mass * self.config.gravity);
                let acceleration = force.scale(1.0 / geometry.mass);

                // Restoring moment from the cop/com offset, damped by pitch rate.
                let chord = geometry.mean_chord;
                let moment_ref = dynamic_pressure * geometry.wing_area * chord;
                let restoring = (CM0 - geometry.static_margin * coefficients.cl) * moment_ref;
                let damping =
                    -PITCH_DAMPING * pitch_rate * chord / (2.0 * airspeed) * moment_ref;
                let pitch_acceleration = (restoring + damping) / geometry.pitch_inertia;

                (alpha, lift, drag, acceleration, pitch_acceleration)
            } else {
                (
                    pitch,
                    0.0,
                    0.0,
                    Vec3::new(0.0, 0.0, -self.config.gravity),
                    0.0,
                )
            };

            velocity = velocity + acceleration * dt;
            position = position + velocity * dt;
            pitch_rate += pitch_acceleration * dt;
            pitch += pitch_rate * dt;
            time += dt;

            if !velocity.is_finite()
                || !position.is_finite()
                || !pitch.is_finite()
                || velocity.norm() > self.config.max_speed
            {
                log::debug!(
                    "flight diverged at t={:.2}s (speed {:.1} m/s)",
                    time,
                    velocity.norm()
                );
                termination = Termination::Unstable;
                break;
            }

            samples.push(TrajectorySample {
                time,
                position,
                velocity,
                alpha,
                lift,
                drag,
            });

            if position.z <= 0.0 {
                termination = Termination::Landed;
                break;
            }
        }

        FlightOutcome {
            samples,
            termination,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::genes::{
        GENE_BODY_LENGTH, GENE_COUNT, GENE_DIHEDRAL, GENE_FOLD_BASE, GENE_NOSE_WEIGHT,
        GENE_ROOT_CHORD, GENE_SWEEP, GENE_WING_SPAN,
    };
    use crate::engines::geometry::GeometryDecoder;

    fn glider_geometry() -> FoldGeometry {
        let mut genome = vec![0.0; GENE_COUNT];
        genome[GENE_WING_SPAN] = 22.0;
        genome[GENE_ROOT_CHORD] = 10.0;
        genome[GENE_BODY_LENGTH] = 22.0;
        genome[GENE_FOLD_BASE] = 25.0;
        genome[GENE_NOSE_WEIGHT] = 0.4;
        genome[GENE_DIHEDRAL] = 6.0;
        genome[GENE_SWEEP] = 25.0;
        GeometryDecoder::new(80.0).decode(&genome).unwrap()
    }

    fn calm() -> FlightCondition {
        FlightCondition::new("calm", Vec3::zero())
    }

    #[test]
    fn calm_launch_flies_forward_and_lands() {
        let simulator = FlightSimulator::new(SimulationConfig::default());
        let outcome = simulator.simulate(&glider_geometry(), &calm());

        assert_eq!(outcome.termination, Termination::Landed);
        let last = outcome.final_sample().unwrap();
        assert!(last.position.z <= 0.0);
        assert!(last.position.x > 0.0);
    }

    #[test]
    fn samples_are_always_finite() {
        let simulator = FlightSimulator::new(SimulationConfig::default());
        let mut gusty = calm();
        gusty.wind = Vec3::new(-8.0, 2.0, 0.0);
        for condition in [calm(), gusty] {
            let outcome = simulator.simulate(&glider_geometry(), &condition);
            for sample in &outcome.samples {
                assert!(sample.position.is_finite());
                assert!(sample.velocity.is_finite());
                assert!(sample.alpha.is_finite());
                assert!(sample.lift.is_finite() && sample.drag.is_finite());
            }
        }
    }

    #[test]
    fn tailwind_extends_range() {
        let simulator = FlightSimulator::new(SimulationConfig::default());
        let geometry = glider_geometry();

        let calm_outcome = simulator.simulate(&geometry, &calm());
        let mut tailwind = calm();
        tailwind.wind = Vec3::new(3.0, 0.0, 0.0);
        let tail_outcome = simulator.simulate(&geometry, &tailwind);

        let calm_range = calm_outcome.final_sample().unwrap().position.horizontal_norm();
        let tail_range = tail_outcome.final_sample().unwrap().position.horizontal_norm();
        assert!(tail_range > calm_range);
    }

    #[test]
    fn repeated_simulations_are_identical() {
        let simulator = FlightSimulator::new(SimulationConfig::default());
        let geometry = glider_geometry();
        let a = simulator.simulate(&geometry, &calm());
        let b = simulator.simulate(&geometry, &calm());
        assert_eq!(a.samples.len(), b.samples.len());
        assert_eq!(a.termination, b.termination);
        let (fa, fb) = (a.final_sample().unwrap(), b.final_sample().unwrap());
        assert_eq!(fa.position, fb.position);
        assert_eq!(fa.velocity, fb.velocity);
    }

    #[test]
    fn timeout_returns_partial_trajectory() {
        let mut config = SimulationConfig::default();
        config.max_duration = 0.05;
        let simulator = FlightSimulator::new(config);
        let outcome = simulator.simulate(&glider_geometry(), &calm());
        assert_eq!(outcome.termination, Termination::Timeout);
        assert!(!outcome.samples.is_empty());
    }
}
