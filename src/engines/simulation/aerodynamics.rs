/// Lift and drag coefficients at one flight state.
#[derive(Debug, Clone, Copy)]
pub struct AeroCoefficients {
    pub cl: f64,
    pub cd: f64,
}

/// Reduced-order coefficient model: (angle of attack, aspect ratio) in,
/// (cl, cd) out. Kept behind a trait so the integrator never depends on a
/// particular model.
pub trait AeroModel: Send + Sync {
    fn coefficients(&self, alpha_rad: f64, aspect_ratio: f64) -> AeroCoefficients;
}

/// Thin-airfoil model with a finite-wing lift slope and a stall branch.
///
/// Below stall the lift slope is `2*pi*AR / (AR + 2)`; past stall the lift
/// decays linearly to zero at 90 degrees. Drag is parasite plus induced,
/// with a separation penalty once stalled.
#[derive(Debug, Clone)]
pub struct ThinAirfoil {
    pub stall_angle_rad: f64,
    pub parasite_drag: f64,
    pub oswald_efficiency: f64,
}

impl Default for ThinAirfoil {
    fn default() -> Self {
        Self {
            stall_angle_rad: 15.0_f64.to_radians(),
            parasite_drag: 0.02,
            oswald_efficiency: 0.8,
        }
    }
}

impl AeroModel for ThinAirfoil {
    fn coefficients(&self, alpha_rad: f64, aspect_ratio: f64) -> AeroCoefficients {
        let ar = aspect_ratio.max(0.1);
        let lift_slope = 2.0 * std::f64::consts::PI * ar / (ar + 2.0);
        let abs_alpha = alpha_rad.abs();
        let sign = alpha_rad.signum();

        let cl = if abs_alpha <= self.stall_angle_rad {
            lift_slope * alpha_rad
        } else {
            // Linear post-stall decay from the stall peak down to zero lift
            // at 90 degrees.
            let peak = lift_slope * self.stall_angle_rad;
            let remaining = (std::f64::consts::FRAC_PI_2 - abs_alpha)
                .max(0.0)
                / (std::f64::consts::FRAC_PI_2 - self.stall_angle_rad);
            sign * peak * remaining
        };

        let induced = cl * cl / (std::f64::consts::PI * self.oswald_efficiency * ar);
        let separation = if abs_alpha > self.stall_angle_rad {
            0.8 * (abs_alpha - self.stall_angle_rad)
        } else {
            0.0
        };
        let cd = self.parasite_drag + induced + separation;

        AeroCoefficients { cl, cd }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_lift_at_zero_alpha() {
        let model = ThinAirfoil::default();
        let c = model.coefficients(0.0, 5.0);
        assert_eq!(c.cl, 0.0);
        assert!(c.cd > 0.0);
    }

    #[test]
    fn lift_is_antisymmetric() {
        let model = ThinAirfoil::default();
        let up = model.coefficients(0.1, 5.0);
        let down = model.coefficients(-0.1, 5.0);
        assert!((up.cl + down.cl).abs() < 1e-12);
        assert!((up.cd - down.cd).abs() < 1e-12);
    }

    #[test]
    fn stall_reduces_lift_and_raises_drag() {
        let model = ThinAirfoil::default();
        let near_stall = model.coefficients(model.stall_angle_rad, 5.0);
        let stalled = model.coefficients(model.stall_angle_rad + 0.3, 5.0);
        assert!(stalled.cl < near_stall.cl);
        assert!(stalled.cd > near_stall.cd);
    }

    #[test]
    fn higher_aspect_ratio_lifts_harder() {
        let model = ThinAirfoil::default();
        let low = model.coefficients(0.1, 2.0);
        let high = model.coefficients(0.1, 8.0);
        assert!(high.cl > low.cl);
        assert!(high.cd < low.cd);
    }

    #[test]
    fn coefficients_stay_finite_over_full_alpha_sweep() {
        let model = ThinAirfoil::default();
        let mut alpha = -std::f64::consts::PI;
        while alpha <= std::f64::consts::PI {
            let c = model.coefficients(alpha, 4.0);
            assert!(c.cl.is_finite() && c.cd.is_finite());
            alpha += 0.05;
        }
    }
}
