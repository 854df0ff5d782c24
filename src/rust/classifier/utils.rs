use ndarray::Array1;

/// Scales `vec` to unit L2 norm. Zero vectors are returned unchanged.
pub(crate) fn normalize_vector(vec: &Array1<f64>) -> Array1<f64> {
    let norm: f64 = vec.iter().map(|&x| x * x).sum::<f64>().sqrt();
    if norm > 0.0 {
        vec / norm
    } else {
        Array1::zeros(vec.len())
    }
}

/// Logistic function, split on sign so large margins don't overflow `exp`.
pub(crate) fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}
