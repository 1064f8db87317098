use super::*;

#[test]
fn collect_pages_filters_and_orders_naturally() {
    let dir = tempfile::tempdir().unwrap();
    for n in ["page-10.jpg", "page-2.jpg", "page-1.jpg", "other-1.jpg", "page-3.png"] {
        std::fs::write(dir.path().join(n), b"").unwrap();
    }
    let pages = collect_pages(dir.path()).unwrap();
    let names: Vec<_> = pages
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, ["page-1.jpg", "page-2.jpg", "page-10.jpg"]);
}

#[test]
fn missing_program_is_a_collaborator_error() {
    let dir = tempfile::tempdir().unwrap();
    let raster = Pdftoppm {
        program: PathBuf::from("ptv-test-no-such-rasterizer"),
        ..Pdftoppm::default()
    };
    let err = raster
        .rasterize(Path::new("deck.pdf"), dir.path())
        .unwrap_err();
    assert!(matches!(err, PtvError::Collaborator { .. }));
}

#[test]
fn default_uses_fixed_dpi() {
    assert_eq!(Pdftoppm::default().dpi, DEFAULT_RASTER_DPI);
}
