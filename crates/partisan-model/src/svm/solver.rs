use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::debug;

/// Output of the SMO solver: Lagrange multipliers and bias.
pub struct Solution {
    pub alphas: Vec<f64>,
    pub bias: f64,
}

/// Simplified sequential minimal optimization for the C-SVM dual.
///
/// `gram[i * n + j]` is the kernel value between training rows `i` and `j`;
/// `y` holds the class signs (+1/-1). The first multiplier is chosen by KKT
/// violation, the second uniformly at random from a seeded generator so runs
/// are reproducible.
pub fn solve(gram: &[f64], y: &[f64], c: f64, tol: f64, max_passes: usize) -> Solution {
    let n = y.len();
    debug_assert_eq!(gram.len(), n * n);

    let mut alphas = vec![0.0_f64; n];
    let mut bias = 0.0_f64;
    let mut rng = StdRng::seed_from_u64(0x5eed);

    // decision(i) - y[i], with the current alphas
    let error = |alphas: &[f64], bias: f64, i: usize| -> f64 {
        let mut f = bias;
        for j in 0..n {
            if alphas[j] > 0.0 {
                f += alphas[j] * y[j] * gram[i * n + j];
            }
        }
        f - y[i]
    };

    let mut passes = 0;
    let mut iterations = 0usize;
    // Hard cap so pathological kernels cannot loop forever
    let max_iterations = 100 * max_passes.max(1) * n.max(1);

    while passes < max_passes && iterations < max_iterations {
        iterations += 1;
        let mut num_changed = 0;

        for i in 0..n {
            let e_i = error(&alphas, bias, i);
            let r_i = y[i] * e_i;
            if !((r_i < -tol && alphas[i] < c) || (r_i > tol && alphas[i] > 0.0)) {
                continue;
            }

            let j = pick_other(&mut rng, n, i);
            let e_j = error(&alphas, bias, j);

            let alpha_i_old = alphas[i];
            let alpha_j_old = alphas[j];

            let (low, high) = if (y[i] - y[j]).abs() > f64::EPSILON {
                let diff = alphas[j] - alphas[i];
                (diff.max(0.0), (c + diff).min(c))
            } else {
                let sum = alphas[i] + alphas[j];
                ((sum - c).max(0.0), sum.min(c))
            };
            if (high - low).abs() < 1e-12 {
                continue;
            }

            let k_ii = gram[i * n + i];
            let k_jj = gram[j * n + j];
            let k_ij = gram[i * n + j];
            let eta = 2.0 * k_ij - k_ii - k_jj;
            if eta >= 0.0 {
                continue;
            }

            let mut alpha_j = alpha_j_old - y[j] * (e_i - e_j) / eta;
            alpha_j = alpha_j.clamp(low, high);
            if (alpha_j - alpha_j_old).abs() < 1e-5 {
                continue;
            }
            let alpha_i = alpha_i_old + y[i] * y[j] * (alpha_j_old - alpha_j);

            alphas[i] = alpha_i;
            alphas[j] = alpha_j;

            let b1 = bias
                - e_i
                - y[i] * (alpha_i - alpha_i_old) * k_ii
                - y[j] * (alpha_j - alpha_j_old) * k_ij;
            let b2 = bias
                - e_j
                - y[i] * (alpha_i - alpha_i_old) * k_ij
                - y[j] * (alpha_j - alpha_j_old) * k_jj;
            bias = if alpha_i > 0.0 && alpha_i < c {
                b1
            } else if alpha_j > 0.0 && alpha_j < c {
                b2
            } else {
                (b1 + b2) / 2.0
            };

            num_changed += 1;
        }

        if num_changed == 0 {
            passes += 1;
        } else {
            passes = 0;
        }
    }

    debug!(
        iterations,
        support_vectors = alphas.iter().filter(|&&a| a > 0.0).count(),
        "SMO converged"
    );
    Solution { alphas, bias }
}

fn pick_other(rng: &mut StdRng, n: usize, i: usize) -> usize {
    let j = rng.gen_range(0..n - 1);
    if j >= i {
        j + 1
    } else {
        j
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Linear Gram matrix for 1-D points.
    fn linear_gram(points: &[f64]) -> Vec<f64> {
        let n = points.len();
        let mut gram = vec![0.0; n * n];
        for i in 0..n {
            for j in 0..n {
                gram[i * n + j] = points[i] * points[j];
            }
        }
        gram
    }

    #[test]
    fn separates_one_dimensional_classes() {
        let points = [1.0, 2.0, 8.0, 9.0];
        let y = [-1.0, -1.0, 1.0, 1.0];
        let solution = solve(&linear_gram(&points), &y, 1.0, 1e-3, 10);

        // Decision value at each training point must carry its own sign
        for (i, &point) in points.iter().enumerate() {
            let decision: f64 = solution
                .alphas
                .iter()
                .zip(&y)
                .zip(&points)
                .map(|((&alpha, &label), &sv)| alpha * label * sv * point)
                .sum::<f64>()
                + solution.bias;
            assert!(decision * y[i] > 0.0, "point {i} misclassified");
        }
    }

    #[test]
    fn multipliers_stay_in_the_box() {
        let points = [0.0, 1.0, 5.0, 6.0];
        let y = [-1.0, -1.0, 1.0, 1.0];
        let c = 1.0;
        let solution = solve(&linear_gram(&points), &y, c, 1e-3, 10);
        for &alpha in &solution.alphas {
            assert!((0.0..=c).contains(&alpha));
        }
    }
}
