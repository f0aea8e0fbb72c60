use crate::config::SolverConfig;

/// Golden-section step fraction, (3 - sqrt(5)) / 2
const GOLDEN: f64 = 0.381_966_011_250_105_1;

/// Locate a local minimum of `f` with Brent's parabolic method.
///
/// `bracket` is `(a, b, c)` with `b` strictly between `a` and `c` and
/// `f(b) <= f(a)`, `f(b) <= f(c)`. The search never leaves `[a, c]`.
///
/// Returns `None` for an invalid bracket or when the iteration cap is hit.
pub fn minimize_bracketed<F>(
    f: F,
    bracket: (f64, f64, f64),
    config: &SolverConfig,
) -> Option<f64>
where
    F: Fn(f64) -> f64,
{
    let (a, b, c) = bracket;
    let mut lo = a.min(c);
    let mut hi = a.max(c);
    if !(lo < b && b < hi) {
        return None;
    }

    let fb = f(b);
    if !fb.is_finite() || fb > f(a) || fb > f(c) {
        return None;
    }

    // A minimum is only resolved to about sqrt(eps) relative.
    let rtol = config.rtol.max(f64::EPSILON.sqrt());

    let (mut x, mut w, mut v) = (b, b, b);
    let (mut fx, mut fw, mut fv) = (fb, fb, fb);
    let mut d: f64 = 0.0;
    let mut e: f64 = 0.0;

    for _ in 0..config.max_iterations {
        let xm = 0.5 * (lo + hi);
        let tol1 = rtol * x.abs() + config.xtol;
        let tol2 = 2.0 * tol1;

        if (x - xm).abs() <= tol2 - 0.5 * (hi - lo) {
            return Some(x);
        }

        let mut golden = true;
        if e.abs() > tol1 {
            let r = (x - w) * (fx - fv);
            let mut q = (x - v) * (fx - fw);
            let mut p = (x - v) * q - (x - w) * r;
            q = 2.0 * (q - r);
            if q > 0.0 {
                p = -p;
            }
            q = q.abs();
            let etemp = e;
            e = d;

            if p.abs() < (0.5 * q * etemp).abs() && p > q * (lo - x) && p < q * (hi - x) {
                d = p / q;
                let u = x + d;
                if u - lo < tol2 || hi - u < tol2 {
                    d = tol1.copysign(xm - x);
                }
                golden = false;
            }
        }
        if golden {
            e = if x >= xm { lo - x } else { hi - x };
            d = GOLDEN * e;
        }

        let u = if d.abs() >= tol1 {
            x + d
        } else {
            x + tol1.copysign(d)
        };
        let fu = f(u);
        if !fu.is_finite() {
            return None;
        }

        if fu <= fx {
            if u >= x {
                lo = x;
            } else {
                hi = x;
            }
            v = w;
            fv = fw;
            w = x;
            fw = fx;
            x = u;
            fx = fu;
        } else {
            if u < x {
                lo = u;
            } else {
                hi = u;
            }
            if fu <= fw || w == x {
                v = w;
                fv = fw;
                w = u;
                fw = fu;
            } else if fu <= fv || v == x || v == w {
                v = u;
                fv = fu;
            }
        }
    }

    None
}
