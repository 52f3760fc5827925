use spam_classifier::{ClassifierError, LinearClassifier, SparseVector};

// --- Construction ---

#[test]
fn test_rejects_weight_vector_of_wrong_length() {
    let result = LinearClassifier::new(vec![0.0, 0.0, 0.0], 0.0, 3);

    assert!(matches!(
        result,
        Err(ClassifierError::DimensionMismatch {
            vocabulary_size: 3,
            expected: 4,
            found: 3,
        })
    ));
}

#[test]
fn test_rejects_non_finite_weight() {
    let result = LinearClassifier::new(vec![0.0, f64::NAN], 0.0, 1);
    assert!(matches!(result, Err(ClassifierError::NonFiniteParameter(_))));

    let result = LinearClassifier::new(vec![0.0, f64::INFINITY], 0.0, 1);
    assert!(matches!(result, Err(ClassifierError::NonFiniteParameter(_))));
}

#[test]
fn test_rejects_non_finite_bias() {
    let result = LinearClassifier::new(vec![0.0, 0.0], f64::NAN, 1);
    assert!(matches!(result, Err(ClassifierError::NonFiniteParameter(_))));
}

#[test]
fn test_dimension_is_weight_length() {
    let classifier = LinearClassifier::new(vec![0.0, 1.0, 2.0], 0.0, 2).unwrap();
    assert_eq!(classifier.dimension(), 3);
}

// --- Prediction ---

#[test]
fn test_positive_score_classifies_as_spam() {
    let classifier = LinearClassifier::new(vec![0.0, 1.0], 0.0, 1).unwrap();
    let features = SparseVector::from_entries(2, [(1, 1)]);

    let prediction = classifier.predict(&features);

    assert_eq!(prediction.classification, 1);
    assert!(prediction.is_spam());
    assert!((prediction.probability - 0.731_058_578_630_004_9).abs() < 1e-12);
}

#[test]
fn test_negative_score_classifies_as_ham() {
    let classifier = LinearClassifier::new(vec![0.0, -2.0], 0.0, 1).unwrap();
    let features = SparseVector::from_entries(2, [(1, 3)]);

    let prediction = classifier.predict(&features);

    assert_eq!(prediction.classification, 0);
    assert!(!prediction.is_spam());
    assert!(prediction.probability < 0.5);
}

#[test]
fn test_zero_score_sits_exactly_on_the_threshold() {
    let classifier = LinearClassifier::new(vec![0.0, 0.0], 0.0, 1).unwrap();
    let features = SparseVector::from_entries(2, [(1, 7)]);

    let prediction = classifier.predict(&features);

    assert!((prediction.probability - 0.5).abs() < f64::EPSILON);
    assert_eq!(prediction.classification, 1);
}

#[test]
fn test_bias_shifts_the_score() {
    let classifier = LinearClassifier::new(vec![0.0, 0.0], -3.0, 1).unwrap();
    let features = SparseVector::zeros(2);

    let prediction = classifier.predict(&features);

    assert_eq!(prediction.classification, 0);
    assert!(prediction.probability < 0.1);
}

#[test]
fn test_probability_stays_in_unit_interval_for_extreme_scores() {
    let classifier = LinearClassifier::new(vec![0.0, 1000.0], 0.0, 1).unwrap();

    let huge = classifier.predict(&SparseVector::from_entries(2, [(1, 100)]));
    assert!(huge.probability <= 1.0);
    assert_eq!(huge.classification, 1);

    let classifier = LinearClassifier::new(vec![0.0, -1000.0], 0.0, 1).unwrap();
    let tiny = classifier.predict(&SparseVector::from_entries(2, [(1, 100)]));
    assert!(tiny.probability >= 0.0);
    assert_eq!(tiny.classification, 0);
}

#[test]
fn test_out_of_vocabulary_slot_contributes_to_score() {
    let classifier = LinearClassifier::new(vec![2.0, 0.0], 0.0, 1).unwrap();
    let features = SparseVector::from_entries(2, [(0, 1)]);

    let prediction = classifier.predict(&features);

    assert_eq!(prediction.classification, 1);
    assert!(prediction.probability > 0.85);
}

// --- Batch ---

#[test]
fn test_predict_batch_preserves_order() {
    let classifier = LinearClassifier::new(vec![0.0, 5.0], 0.0, 1).unwrap();
    let spam = SparseVector::from_entries(2, [(1, 2)]);
    let ham = SparseVector::zeros(2);

    let predictions = classifier.predict_batch(&[spam.clone(), ham.clone()]);

    assert_eq!(predictions.len(), 2);
    assert_eq!(predictions[0], classifier.predict(&spam));
    assert_eq!(predictions[1], classifier.predict(&ham));
    assert_eq!(predictions[0].classification, 1);
    assert_eq!(predictions[1].classification, 1); // zero score lands on the threshold
}
