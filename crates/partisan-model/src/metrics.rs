use crate::ModelError;

/// Fraction of predictions equal to the true labels, in `[0, 1]`.
///
/// Fails with [`ModelError::InvalidData`] when the slices differ in length
/// or are empty.
pub fn accuracy<L: PartialEq>(y_true: &[L], y_pred: &[L]) -> Result<f64, ModelError> {
    if y_true.len() != y_pred.len() {
        return Err(ModelError::InvalidData(format!(
            "got {} labels but {} predictions",
            y_true.len(),
            y_pred.len()
        )));
    }
    if y_true.is_empty() {
        return Err(ModelError::InvalidData(
            "cannot score an empty label vector".into(),
        ));
    }

    let correct = y_true
        .iter()
        .zip(y_pred)
        .filter(|(truth, pred)| truth == pred)
        .count();
    Ok(correct as f64 / y_true.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_of_four_correct() {
        let accuracy = accuracy(&[0, 1, 0, 0], &[0, 1, 1, 0]).unwrap();
        assert!((accuracy - 0.75).abs() < f64::EPSILON);
    }

    #[test]
    fn all_correct_and_none_correct() {
        assert!((accuracy(&[1, 1], &[1, 1]).unwrap() - 1.0).abs() < f64::EPSILON);
        assert!(accuracy(&[0, 0], &[1, 1]).unwrap().abs() < f64::EPSILON);
    }

    #[test]
    fn length_mismatch_fails() {
        assert!(matches!(
            accuracy(&[0, 1], &[0]),
            Err(ModelError::InvalidData(_))
        ));
    }

    #[test]
    fn empty_labels_fail() {
        let empty: [i64; 0] = [];
        assert!(matches!(
            accuracy(&empty, &empty),
            Err(ModelError::InvalidData(_))
        ));
    }
}
