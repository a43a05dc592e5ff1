use gesture_pose::{Keypoint, NormalizedPose, PartName, PoseSample, TRACKED_PARTS, extract};

fn kp(part: PartName, y: f32, confidence: f32) -> Keypoint {
    Keypoint::new(part, 100.0, y, confidence)
}

#[test]
fn test_extract_reads_tracked_parts() {
    let pose = PoseSample::new(vec![
        kp(PartName::Nose, 300.0, 0.9),
        kp(PartName::LeftShoulder, 450.0, 0.8),
        kp(PartName::RightShoulder, 455.0, 0.8),
        kp(PartName::LeftWrist, 100.0, 0.7),
        kp(PartName::RightWrist, 150.0, 0.7),
    ]);

    let normalized = extract(&pose, 0.1);

    assert_eq!(normalized.y(PartName::Nose), 300.0);
    assert_eq!(normalized.y(PartName::LeftShoulder), 450.0);
    assert_eq!(normalized.y(PartName::RightShoulder), 455.0);
    assert_eq!(normalized.y(PartName::LeftWrist), 100.0);
    assert_eq!(normalized.y(PartName::RightWrist), 150.0);
    for part in TRACKED_PARTS {
        assert!(normalized.is_present(part), "{part} should be present");
    }
}

#[test]
fn test_extract_last_match_wins() {
    let pose = PoseSample::new(vec![
        kp(PartName::Nose, 100.0, 0.9),
        kp(PartName::Nose, 250.0, 0.9),
    ]);

    assert_eq!(extract(&pose, 0.1).y(PartName::Nose), 250.0);
}

#[test]
fn test_extract_low_confidence_last_match_hides_earlier_match() {
    // The last duplicate decides, even when an earlier one was confident
    let pose = PoseSample::new(vec![
        kp(PartName::Nose, 100.0, 0.9),
        kp(PartName::Nose, 250.0, 0.05),
    ]);

    let normalized = extract(&pose, 0.1);
    assert_eq!(normalized.get(PartName::Nose), None);
    assert_eq!(normalized.y(PartName::Nose), 0.0);
}

#[test]
fn test_extract_low_confidence_defaults_to_zero() {
    let pose = PoseSample::new(vec![
        kp(PartName::Nose, 300.0, 0.9),
        kp(PartName::LeftWrist, 500.0, 0.3),
    ]);

    let normalized = extract(&pose, 0.5);

    assert_eq!(normalized.y(PartName::Nose), 300.0);
    assert_eq!(normalized.y(PartName::LeftWrist), 0.0);
    assert!(!normalized.is_present(PartName::LeftWrist));
}

#[test]
fn test_extract_confidence_at_threshold_is_kept() {
    let pose = PoseSample::new(vec![kp(PartName::RightWrist, 420.0, 0.5)]);
    assert_eq!(extract(&pose, 0.5).get(PartName::RightWrist), Some(420.0));
}

#[test]
fn test_extract_empty_pose_is_all_absent() {
    let normalized = extract(&PoseSample::new(Vec::new()), 0.1);

    for part in TRACKED_PARTS {
        assert_eq!(normalized.get(part), None);
        assert_eq!(normalized.y(part), 0.0);
    }
    assert_eq!(normalized, NormalizedPose::default());
}

#[test]
fn test_extract_ignores_untracked_parts() {
    let pose = PoseSample::new(vec![
        kp(PartName::LeftEye, 280.0, 0.9),
        kp(PartName::LeftKnee, 900.0, 0.9),
    ]);

    let normalized = extract(&pose, 0.1);
    assert_eq!(normalized, NormalizedPose::default());
    assert_eq!(normalized.get(PartName::LeftEye), None);
}

#[test]
fn test_detected_zero_coordinate_is_distinguishable() {
    let pose = PoseSample::new(vec![kp(PartName::Nose, 0.0, 0.9)]);
    let normalized = extract(&pose, 0.1);

    assert_eq!(normalized.get(PartName::Nose), Some(0.0));
    assert_eq!(normalized.get(PartName::LeftWrist), None);
    assert_eq!(normalized.y(PartName::Nose), normalized.y(PartName::LeftWrist));
}

#[test]
fn test_extract_ignores_pose_score() {
    let keypoints = vec![kp(PartName::Nose, 300.0, 0.9)];
    let confident = PoseSample::new(keypoints.clone());
    let doubtful = PoseSample::new(keypoints).with_score(0.01);

    assert_eq!(extract(&confident, 0.1), extract(&doubtful, 0.1));
}

#[test]
fn test_from_parts_matches_extract() {
    let built = NormalizedPose::from_parts(&[
        (PartName::Nose, 300.0),
        (PartName::LeftWrist, 100.0),
        (PartName::LeftEye, 1.0),
    ]);
    let extracted = extract(
        &PoseSample::new(vec![
            kp(PartName::Nose, 300.0, 1.0),
            kp(PartName::LeftWrist, 100.0, 1.0),
        ]),
        0.1,
    );

    assert_eq!(built, extracted);
}
