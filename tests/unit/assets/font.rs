use super::*;

#[test]
fn missing_font_file_is_a_hard_error() {
    let err = FontFace::load("definitely/missing/NotoSansTC-Bold.ttf").unwrap_err();
    assert!(matches!(err, CardError::Font(_)));
    assert!(err.to_string().contains("NotoSansTC-Bold.ttf"));
}

#[test]
fn garbage_bytes_are_rejected() {
    let err = FontFace::from_bytes(b"not a font at all".to_vec()).unwrap_err();
    assert!(matches!(err, CardError::Font(_)));
}

#[test]
fn system_font_exposes_family_and_digest() {
    let Ok(face) = FontFace::system(&["Noto Sans CJK TC", "Noto Sans TC"]) else {
        eprintln!("no system fonts installed; skipping");
        return;
    };
    assert!(!face.family().trim().is_empty());
    assert!(!face.bytes().is_empty());
    assert_eq!(face.origin(), &FontOrigin::System);
    assert_eq!(face.sha256_hex().len(), 64);
}

#[test]
fn clones_share_one_copy_of_the_font_bytes() {
    let Ok(face) = FontFace::system(&["Noto Sans CJK TC", "Noto Sans TC"]) else {
        eprintln!("no system fonts installed; skipping");
        return;
    };
    let copy = face.clone();
    let ptr = face.bytes().as_ptr();
    assert_eq!(copy.bytes().as_ptr(), ptr);
    assert_eq!(copy.blob().data().as_ptr(), ptr);
    assert_eq!(copy.font_data().data.data().as_ptr(), ptr);
    assert_eq!(copy.font_data().index, face.index());
}
