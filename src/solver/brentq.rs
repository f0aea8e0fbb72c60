use crate::config::SolverConfig;

/// Find a root of `f` in `[xa, xb]` with Brent's method.
///
/// Combines bisection with secant and inverse quadratic steps, so it never
/// does worse than bisection on a valid bracket.
///
/// # Arguments
/// * `f` - Scalar function
/// * `xa`, `xb` - Bracket ends; `f(xa)` and `f(xb)` must not share a sign
/// * `config` - Bracket-width tolerances and iteration cap
///
/// # Returns
/// `None` when the bracket is invalid, `f` is not finite at an end, or the
/// iteration cap is reached.
pub fn brentq<F>(f: F, xa: f64, xb: f64, config: &SolverConfig) -> Option<f64>
where
    F: Fn(f64) -> f64,
{
    let mut xpre = xa;
    let mut xcur = xb;
    let mut fpre = f(xpre);
    let mut fcur = f(xcur);

    if !fpre.is_finite() || !fcur.is_finite() || fpre * fcur > 0.0 {
        return None;
    }
    if fpre == 0.0 {
        return Some(xpre);
    }
    if fcur == 0.0 {
        return Some(xcur);
    }

    let mut xblk = 0.0;
    let mut fblk = 0.0;
    let mut spre = 0.0;
    let mut scur = 0.0;

    for _ in 0..config.max_iterations {
        if fpre * fcur < 0.0 {
            xblk = xpre;
            fblk = fpre;
            spre = xcur - xpre;
            scur = spre;
        }
        if fblk.abs() < fcur.abs() {
            xpre = xcur;
            xcur = xblk;
            xblk = xpre;

            fpre = fcur;
            fcur = fblk;
            fblk = fpre;
        }

        let delta = (config.xtol + config.rtol * xcur.abs()) / 2.0;
        let sbis = (xblk - xcur) / 2.0;
        if fcur == 0.0 || sbis.abs() < delta {
            return Some(xcur);
        }

        if spre.abs() > delta && fcur.abs() < fpre.abs() {
            let stry = if xpre == xblk {
                // secant
                -fcur * (xcur - xpre) / (fcur - fpre)
            } else {
                // inverse quadratic
                let dpre = (fpre - fcur) / (xpre - xcur);
                let dblk = (fblk - fcur) / (xblk - xcur);
                -fcur * (fblk * dblk - fpre * dpre) / (dblk * dpre * (fblk - fpre))
            };

            if 2.0 * stry.abs() < spre.abs().min(3.0 * sbis.abs() - delta) {
                spre = scur;
                scur = stry;
            } else {
                spre = sbis;
                scur = sbis;
            }
        } else {
            spre = sbis;
            scur = sbis;
        }

        xpre = xcur;
        fpre = fcur;
        if scur.abs() > delta {
            xcur += scur;
        } else {
            xcur += delta.copysign(sbis);
        }
        fcur = f(xcur);
        if !fcur.is_finite() {
            return None;
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_brentq_sqrt_two() {
        let root = brentq(|x| x * x - 2.0, 0.0, 2.0, &SolverConfig::default()).unwrap();
        assert!((root - 2.0_f64.sqrt()).abs() < 1e-11);
    }

    #[test]
    fn test_brentq_reversed_bracket() {
        let root = brentq(|x| x.cos(), 3.0, 1.0, &SolverConfig::default()).unwrap();
        assert!((root - std::f64::consts::FRAC_PI_2).abs() < 1e-11);
    }

    #[test]
    fn test_brentq_root_at_end() {
        let root = brentq(|x| x - 1.0, 1.0, 4.0, &SolverConfig::default()).unwrap();
        assert_eq!(root, 1.0);
    }

    #[test]
    fn test_brentq_invalid_bracket() {
        assert!(brentq(|x| x * x + 1.0, -1.0, 1.0, &SolverConfig::default()).is_none());
    }

    #[test]
    fn test_brentq_iteration_cap() {
        let config = SolverConfig {
            max_iterations: 1,
            ..SolverConfig::default()
        };
        assert!(brentq(|x| x.powi(3) - 0.3, 0.0, 10.0, &config).is_none());
    }
}
