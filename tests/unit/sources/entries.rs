use std::sync::Mutex;

use image::{Rgba, RgbaImage};

use super::*;

fn touch(dir: &Path, name: &str) -> PathBuf {
    let p = dir.join(name);
    std::fs::write(&p, b"").unwrap();
    p
}

fn names(entries: &[SourceEntry]) -> Vec<String> {
    entries
        .iter()
        .map(|e| {
            let p = match e {
                SourceEntry::Image(p) | SourceEntry::Pdf(p) | SourceEntry::Gif(p) => p,
            };
            p.file_name().unwrap().to_string_lossy().into_owned()
        })
        .collect()
}

fn write_gif(path: &Path, frames: usize) {
    let file = std::fs::File::create(path).unwrap();
    let mut enc = image::codecs::gif::GifEncoder::new(file);
    let frames = (0..frames).map(|i| {
        image::Frame::new(RgbaImage::from_pixel(4, 4, Rgba([i as u8 * 40, 0, 0, 255])))
    });
    enc.encode_frames(frames).unwrap();
}

struct FakeRasterizer {
    calls: Mutex<Vec<(PathBuf, PathBuf)>>,
    pages: usize,
}

impl PageRasterizer for FakeRasterizer {
    fn rasterize(&self, pdf: &Path, out_dir: &Path) -> PtvResult<Vec<PathBuf>> {
        self.calls
            .lock()
            .unwrap()
            .push((pdf.to_path_buf(), out_dir.to_path_buf()));
        Ok((1..=self.pages)
            .map(|i| out_dir.join(format!("page-{i}.jpg")))
            .collect())
    }
}

#[test]
fn extension_checks_are_case_insensitive() {
    assert!(is_pdf(Path::new("a/B.PDF")));
    assert!(is_gif(Path::new("x.Gif")));
    assert!(is_image(Path::new("x.JPeG")));
    assert!(is_image(Path::new("x.webp")));
    assert!(!is_image(Path::new("notes.txt")));
    assert!(!is_pdf(Path::new("pdf")));
}

#[test]
fn list_dir_filters_and_sorts_naturally() {
    let dir = tempfile::tempdir().unwrap();
    for n in ["s10.png", "s2.jpg", "s1.png", "notes.txt", "deck.pdf", "anim.gif"] {
        touch(dir.path(), n);
    }
    std::fs::create_dir(dir.path().join("s3.png")).unwrap();

    let entries = list_dir(dir.path(), false, false).unwrap();
    assert_eq!(names(&entries), ["deck.pdf", "s1.png", "s2.jpg", "s10.png"]);
    assert!(matches!(entries[0], SourceEntry::Pdf(_)));
    assert!(matches!(entries[1], SourceEntry::Image(_)));
}

#[test]
fn list_dir_keeps_gifs_when_enabled_and_reverses_once() {
    let dir = tempfile::tempdir().unwrap();
    for n in ["b.gif", "a1.png", "a2.png"] {
        touch(dir.path(), n);
    }
    let entries = list_dir(dir.path(), true, true).unwrap();
    assert_eq!(names(&entries), ["b.gif", "a2.png", "a1.png"]);
    assert!(matches!(entries[0], SourceEntry::Gif(_)));
}

#[test]
fn plan_entries_keeps_input_order_and_rejects_plain_files() {
    let dir = tempfile::tempdir().unwrap();
    let sub = dir.path().join("shots");
    std::fs::create_dir(&sub).unwrap();
    touch(&sub, "2.png");
    touch(&sub, "1.png");
    let pdf = dir.path().join("intro.pdf");

    let entries = plan_entries(&[pdf.clone(), sub.clone()], false, true).unwrap();
    assert_eq!(entries[0], SourceEntry::Pdf(pdf));
    assert_eq!(names(&entries), ["intro.pdf", "2.png", "1.png"]);

    let lone = touch(dir.path(), "lone.png");
    let err = plan_entries(&[lone], false, false).unwrap_err();
    assert!(matches!(err, PtvError::Input { .. }));
    assert!(err.to_string().contains("lone.png"));

    let missing = dir.path().join("missing");
    assert!(matches!(
        plan_entries(&[missing], false, false).unwrap_err(),
        PtvError::Input { .. }
    ));
}

#[test]
fn expand_gives_each_pdf_its_own_render_dir() {
    let render = tempfile::tempdir().unwrap();
    let raster = FakeRasterizer {
        calls: Mutex::new(Vec::new()),
        pages: 2,
    };
    let entries = vec![
        SourceEntry::Pdf(PathBuf::from("a.pdf")),
        SourceEntry::Image(PathBuf::from("x.png")),
        SourceEntry::Pdf(PathBuf::from("b.pdf")),
    ];
    let mut loader = SourceLoader::new();
    let items = expand_entries(&entries, &raster, render.path(), &mut loader).unwrap();

    assert_eq!(items.len(), 5);
    assert_eq!(items[2], SourceItem::StaticImage(PathBuf::from("x.png")));
    let calls = raster.calls.lock().unwrap();
    assert_eq!(calls.len(), 2);
    assert_ne!(calls[0].1, calls[1].1);
    assert!(calls.iter().all(|(_, d)| d.is_dir()));
    assert_eq!(
        items[4],
        SourceItem::PdfPage {
            pdf: PathBuf::from("b.pdf"),
            page: calls[1].1.join("page-2.jpg"),
        }
    );
}

#[test]
fn expand_turns_gifs_into_forward_frames() {
    let dir = tempfile::tempdir().unwrap();
    let gif = dir.path().join("spin.gif");
    write_gif(&gif, 3);
    let raster = FakeRasterizer {
        calls: Mutex::new(Vec::new()),
        pages: 0,
    };
    let mut loader = SourceLoader::new();
    let items = expand_entries(
        &[SourceEntry::Gif(gif.clone())],
        &raster,
        dir.path(),
        &mut loader,
    )
    .unwrap();
    let indices: Vec<usize> = items
        .iter()
        .map(|i| match i {
            SourceItem::GifFrame { index, .. } => *index,
            other => panic!("unexpected {other:?}"),
        })
        .collect();
    assert_eq!(indices, [0, 1, 2]);
}
