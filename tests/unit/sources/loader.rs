use image::Rgba;

use super::*;

fn write_png(path: &Path, w: u32, h: u32, px: Rgba<u8>) {
    RgbaImage::from_pixel(w, h, px).save(path).unwrap();
}

#[test]
fn decodes_png_and_jpeg_to_rgba() {
    let dir = tempfile::tempdir().unwrap();
    let png = dir.path().join("a.png");
    write_png(&png, 5, 3, Rgba([1, 2, 3, 255]));
    let img = decode_image(&png).unwrap();
    assert_eq!(img.dimensions(), (5, 3));
    assert_eq!(*img.get_pixel(4, 2), Rgba([1, 2, 3, 255]));

    let jpg = dir.path().join("b.jpg");
    image::DynamicImage::ImageRgba8(RgbaImage::from_pixel(8, 6, Rgba([200, 10, 10, 255])))
        .to_rgb8()
        .save(&jpg)
        .unwrap();
    let img = decode_image(&jpg).unwrap();
    assert_eq!(img.dimensions(), (8, 6));
    assert_eq!(img.get_pixel(0, 0)[3], 255);
}

#[test]
fn format_is_sniffed_not_taken_from_extension() {
    let dir = tempfile::tempdir().unwrap();
    let png = dir.path().join("a.png");
    write_png(&png, 2, 2, Rgba([9, 9, 9, 255]));
    let misnamed = dir.path().join("really-a-png.jpg");
    std::fs::copy(&png, &misnamed).unwrap();
    assert_eq!(decode_image(&misnamed).unwrap().dimensions(), (2, 2));
}

#[test]
fn decode_errors_name_the_path() {
    let dir = tempfile::tempdir().unwrap();
    let junk = dir.path().join("junk.png");
    std::fs::write(&junk, b"not an image").unwrap();
    let err = decode_image(&junk).unwrap_err();
    assert!(matches!(err, PtvError::Input { .. }));
    assert!(err.to_string().contains("junk.png"));

    let missing = dir.path().join("missing.png");
    assert!(decode_image(&missing).unwrap_err().to_string().contains("missing.png"));
}

#[test]
fn gif_frames_are_decoded_once_and_indexed() {
    let dir = tempfile::tempdir().unwrap();
    let gif = dir.path().join("a.gif");
    {
        let file = File::create(&gif).unwrap();
        let mut enc = image::codecs::gif::GifEncoder::new(file);
        enc.encode_frames((0..2).map(|i| {
            image::Frame::new(RgbaImage::from_pixel(3, 3, Rgba([255 * i as u8, 0, 0, 255])))
        }))
        .unwrap();
    }

    let mut loader = SourceLoader::new();
    assert_eq!(loader.gif_frame_count(&gif).unwrap(), 2);
    // The cache answers even after the file is gone.
    std::fs::remove_file(&gif).unwrap();
    let second = loader
        .load(&SourceItem::GifFrame {
            gif: gif.clone(),
            index: 1,
        })
        .unwrap();
    assert_eq!(second.dimensions(), (3, 3));
    assert!(second.get_pixel(1, 1)[0] > 200);

    let err = loader
        .load(&SourceItem::GifFrame { gif, index: 7 })
        .unwrap_err();
    assert!(matches!(err, PtvError::Input { .. }));
}

#[test]
fn load_all_keeps_item_order() {
    let dir = tempfile::tempdir().unwrap();
    let a = dir.path().join("a.png");
    let b = dir.path().join("b.png");
    write_png(&a, 1, 1, Rgba([10, 0, 0, 255]));
    write_png(&b, 2, 1, Rgba([20, 0, 0, 255]));
    let items = [
        SourceItem::StaticImage(b.clone()),
        SourceItem::PdfPage {
            pdf: PathBuf::from("doc.pdf"),
            page: a.clone(),
        },
    ];
    let images = SourceLoader::new().load_all(&items).unwrap();
    assert_eq!(images[0].dimensions(), (2, 1));
    assert_eq!(images[1].dimensions(), (1, 1));
}

fn write_two_frame_gif(path: &Path) {
    let file = File::create(path).unwrap();
    let mut enc = image::codecs::gif::GifEncoder::new(file);
    enc.encode_frames((0..2).map(|i| {
        image::Frame::new(RgbaImage::from_pixel(3, 3, Rgba([255 * i as u8, 0, 0, 255])))
    }))
    .unwrap();
}

#[test]
fn taking_a_gif_frame_leaves_no_copy_in_the_cache() {
    let dir = tempfile::tempdir().unwrap();
    let gif = dir.path().join("a.gif");
    write_two_frame_gif(&gif);

    let mut loader = SourceLoader::new();
    let taken = loader.gif_frame(&gif, 1, true).unwrap();
    assert_eq!(taken.dimensions(), (3, 3));
    assert!(loader.gifs[&gif][1].is_none());
    assert!(loader.gifs[&gif][0].is_some());

    let err = loader.gif_frame(&gif, 1, false).unwrap_err();
    assert!(err.to_string().contains("already consumed"), "{err}");
}

#[test]
fn load_all_serves_repeated_gif_frames_from_one_decode() {
    let dir = tempfile::tempdir().unwrap();
    let gif = dir.path().join("a.gif");
    write_two_frame_gif(&gif);

    let mut loader = SourceLoader::new();
    assert_eq!(loader.gif_frame_count(&gif).unwrap(), 2);
    std::fs::remove_file(&gif).unwrap();

    let frame = |index| SourceItem::GifFrame {
        gif: gif.clone(),
        index,
    };
    // The same GIF listed twice: every use still gets its frame.
    let items = [frame(0), frame(1), frame(0), frame(1)];
    let images = loader.load_all(&items).unwrap();
    assert_eq!(images.len(), 4);
    assert!(images[1].get_pixel(0, 0)[0] > 200);
    assert_eq!(images[0], images[2]);
    assert_eq!(images[1], images[3]);
}
