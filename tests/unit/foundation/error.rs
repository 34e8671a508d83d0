use super::*;

#[test]
fn constructor_helpers_map_to_variants() {
    assert!(matches!(
        LimelightError::validation("x"),
        LimelightError::Validation(_)
    ));
    assert!(matches!(
        LimelightError::trigger("x"),
        LimelightError::Trigger(_)
    ));
    assert!(matches!(LimelightError::stage("x"), LimelightError::Stage(_)));
}

#[test]
fn display_includes_category_prefix() {
    assert_eq!(
        LimelightError::validation("bad catalog").to_string(),
        "validation error: bad catalog"
    );
    assert_eq!(
        LimelightError::stage("dead parent").to_string(),
        "stage error: dead parent"
    );
}

#[test]
fn other_wraps_anyhow_transparently() {
    let err: LimelightError = anyhow::anyhow!("backend exploded").into();
    assert_eq!(err.to_string(), "backend exploded");
}
