#![allow(dead_code)]

use loopmargin::system::{FrequencyEvaluator, TransferFunction};

/// Loop transfer function with independently known margins
pub struct LoopCase {
    pub name: &'static str,
    pub num: Vec<f64>,
    pub den: Vec<f64>,
}

impl LoopCase {
    pub fn tf(&self) -> TransferFunction {
        TransferFunction::siso(self.num.clone(), self.den.clone()).unwrap()
    }
}

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Loops covering single and double integrators, repeated poles, a zero,
/// a lightly damped resonance, a non-minimum-phase delay approximation and
/// a system without a phase margin.
pub fn battery() -> Vec<LoopCase> {
    vec![
        LoopCase {
            name: "2/(s(s+1)(s+2))",
            num: vec![2.0],
            den: vec![1.0, 3.0, 2.0, 0.0],
        },
        LoopCase {
            name: "1/(s^3+2s^2+3s+4)",
            num: vec![1.0],
            den: vec![1.0, 2.0, 3.0, 4.0],
        },
        LoopCase {
            name: "4/(s+1)^3",
            num: vec![4.0],
            den: vec![1.0, 3.0, 3.0, 1.0],
        },
        LoopCase {
            name: "10/((s+1)(s+2)(s+3))",
            num: vec![10.0],
            den: vec![1.0, 6.0, 11.0, 6.0],
        },
        LoopCase {
            name: "(3s+6)/(s+1)^4",
            num: vec![3.0, 6.0],
            den: vec![1.0, 4.0, 6.0, 4.0, 1.0],
        },
        LoopCase {
            name: "1/(s(s+1))",
            num: vec![1.0],
            den: vec![1.0, 1.0, 0.0],
        },
        LoopCase {
            name: "(s+0.5)/(s^2(s+5))",
            num: vec![1.0, 0.5],
            den: vec![1.0, 5.0, 0.0, 0.0],
        },
        LoopCase {
            name: "0.5/(s(s^2+0.2s+1))",
            num: vec![0.5],
            den: vec![1.0, 0.2, 1.0, 0.0],
        },
        LoopCase {
            name: "(s^2-6s+12)/(s(s^2+6s+12)(s+1))",
            num: vec![1.0, -6.0, 12.0],
            den: vec![1.0, 7.0, 18.0, 12.0, 0.0],
        },
    ]
}

pub fn logspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    (0..n)
        .map(|i| 10f64.powf(start + (stop - start) * i as f64 / (n - 1) as f64))
        .collect()
}

/// Interior local minima of `|G(jω) + 1|` on a dense grid, as `(ω, distance)`
pub fn brute_force_distance_minima(tf: &TransferFunction, omega: &[f64]) -> Vec<(f64, f64)> {
    let d: Vec<f64> = omega
        .iter()
        .map(|&w| (tf.evaluate(w).unwrap() + 1.0).norm())
        .collect();
    (1..d.len() - 1)
        .filter(|&k| d[k] < d[k - 1] && d[k] <= d[k + 1])
        .map(|k| (omega[k], d[k]))
        .collect()
}
