mod common;

use common::*;
use coinshaper::DetectionPipeline;
use image::DynamicImage;

#[test]
fn single_image_two_blobs() -> anyhow::Result<()> {
    let (dir, out) = temp_workspace();
    let blobs = [Rect::new(40, 50, 40, 40), Rect::new(220, 50, 40, 40)];
    let input = save_png(dir.path(), "coins.png", &bright_blobs(300, 140, &blobs));

    let config = ShaperConfig::new()
        .with_output_dir(&out)
        .with_min_size(10)
        .with_padding(30);
    let shaper = Shaper::new(config);
    let summary = shaper.run(&input, None)?;

    assert_eq!(summary.first_count, 2);
    assert_eq!(summary.second_count, None);
    assert_eq!(summary.written, vec![out.join("coin0.jpg"), out.join("coin1.jpg")]);
    for path in &summary.written {
        // 40px blob, a pixel or two of blur spill, 30px either side
        let (w, h) = image_dimensions(path);
        assert!((100..=106).contains(&w) && (100..=106).contains(&h), "{}x{}", w, h);
    }
    Ok(())
}

#[test]
fn single_image_crops_do_not_reach_other_blob() {
    let blobs = [Rect::new(40, 50, 40, 40), Rect::new(220, 50, 40, 40)];
    let img = DynamicImage::ImageRgb8(bright_blobs(300, 140, &blobs));

    let config = ShaperConfig::new().with_min_size(10).with_padding(30);
    let rects = DetectionPipeline::new(&config).detect(&img).rects;

    assert_eq!(rects.len(), 2);
    for rect in &rects {
        let covered: Vec<_> = blobs.iter().filter(|b| rect.intersection(b).is_some()).collect();
        assert_eq!(covered.len(), 1, "{:?} covers {:?}", rect, covered);
        let blob = covered[0];
        // the whole blob plus margin is inside the crop
        assert!(rect.x <= blob.x && rect.y <= blob.y);
        assert!(rect.right() >= blob.right() && rect.bottom() >= blob.bottom());
    }
}

#[test]
fn two_images_same_framing_give_one_composite() -> anyhow::Result<()> {
    let (dir, out) = temp_workspace();
    let first = save_png(dir.path(), "front.png", &bright_blobs(200, 160, &[Rect::new(70, 50, 50, 50)]));
    let second = save_png(dir.path(), "back.png", &bright_blobs(200, 160, &[Rect::new(75, 55, 50, 50)]));

    let config = ShaperConfig::new().with_output_dir(&out).with_blur(0.0);
    let summary = Shaper::new(config).run(&first, Some(&second))?;

    assert_eq!(summary.first_count, 1);
    assert_eq!(summary.second_count, Some(1));
    assert_eq!(summary.pair_count, 1);
    assert_eq!(summary.written, vec![out.join("coin0.jpg")]);
    // two 110x110 padded crops side by side
    assert_eq!(image_dimensions(&summary.written[0]), (220, 110));
    Ok(())
}

#[test]
fn two_images_without_overlap_give_nothing() -> anyhow::Result<()> {
    let (dir, out) = temp_workspace();
    let first = save_png(dir.path(), "a.png", &bright_blobs(300, 100, &[Rect::new(10, 10, 40, 40)]));
    let second = save_png(dir.path(), "b.png", &bright_blobs(300, 100, &[Rect::new(220, 10, 40, 40)]));

    let config = ShaperConfig::new().with_output_dir(&out).with_padding(5);
    let summary = Shaper::new(config).run(&first, Some(&second))?;

    assert_eq!(summary.pair_count, 0);
    assert!(summary.written.is_empty());
    Ok(())
}

#[test]
fn zero_blur_runs() -> anyhow::Result<()> {
    let (dir, out) = temp_workspace();
    let input = save_png(dir.path(), "coin.png", &bright_blobs(120, 120, &[Rect::new(40, 40, 30, 30)]));

    let config = ShaperConfig::new().with_output_dir(&out).with_blur(0.0);
    let summary = Shaper::new(config).run(&input, None)?;

    assert_eq!(summary.first_count, 1);
    assert_eq!(image_dimensions(&summary.written[0]), (90, 90));
    Ok(())
}

#[test]
fn blur_is_clamped_into_range() {
    assert_eq!(ShaperConfig::new().with_blur(-2.0).blur, 0.0);
    assert_eq!(ShaperConfig::new().with_blur(7.5).blur, 1.0);
    assert_eq!(ShaperConfig::new().with_blur(f32::NAN).blur, 0.0);
}

#[test]
fn sobel_mode_finds_each_blob_once() {
    let blobs = [Rect::new(30, 30, 40, 40), Rect::new(150, 30, 40, 40)];
    let img = DynamicImage::ImageRgb8(bright_blobs(240, 120, &blobs));

    let config = ShaperConfig::new()
        .with_binarization(Binarization::Sobel)
        .with_padding(0);
    let rects = DetectionPipeline::new(&config).detect(&img).rects;

    assert_eq!(rects.len(), 2);
    for (rect, blob) in rects.iter().zip(&blobs) {
        assert!(rect.intersection(blob).is_some());
    }
}

#[test]
fn inverted_mode_finds_dark_blobs() {
    let blobs = [Rect::new(20, 20, 30, 30), Rect::new(100, 20, 30, 30)];
    let img = DynamicImage::ImageRgb8(blobs_image(160, 80, &blobs, DARK, BRIGHT));

    let config = ShaperConfig::new()
        .with_binarization(Binarization::Otsu)
        .with_invert(true)
        .with_padding(0);
    let rects = DetectionPipeline::new(&config).detect(&img).rects;

    assert_eq!(rects, blobs.to_vec());
}

#[test]
fn saves_processed_stages() -> anyhow::Result<()> {
    let (dir, out) = temp_workspace();
    let first = save_png(dir.path(), "a.png", &bright_blobs(100, 100, &[Rect::new(30, 30, 30, 30)]));
    let second = save_png(dir.path(), "b.png", &bright_blobs(100, 100, &[Rect::new(32, 30, 30, 30)]));

    let config = ShaperConfig::new().with_output_dir(&out).with_save_processed(true);
    Shaper::new(config).run(&first, Some(&second))?;

    for name in ["firstGray.jpg", "firstThreshold.jpg", "secondGray.jpg", "secondThreshold.jpg"] {
        assert!(out.join(name).exists(), "missing {}", name);
    }
    assert!(!out.join("firstSobel.jpg").exists());
    Ok(())
}

#[test]
fn saves_sobel_stage_name() -> anyhow::Result<()> {
    let (dir, out) = temp_workspace();
    let input = save_png(dir.path(), "a.png", &bright_blobs(100, 100, &[Rect::new(30, 30, 30, 30)]));

    let config = ShaperConfig::new()
        .with_output_dir(&out)
        .with_save_processed(true)
        .with_binarization(Binarization::Sobel);
    Shaper::new(config).run(&input, None)?;

    assert!(out.join("firstGray.jpg").exists());
    assert!(out.join("firstSobel.jpg").exists());
    assert!(!out.join("firstThreshold.jpg").exists());
    Ok(())
}

#[test]
fn stages_not_saved_by_default() -> anyhow::Result<()> {
    let (dir, out) = temp_workspace();
    let input = save_png(dir.path(), "a.png", &bright_blobs(100, 100, &[Rect::new(30, 30, 30, 30)]));

    Shaper::new(ShaperConfig::new().with_output_dir(&out)).run(&input, None)?;

    assert!(!out.join("firstGray.jpg").exists());
    assert!(out.join("coin0.jpg").exists());
    Ok(())
}

#[test]
fn undecodable_input_is_fatal() -> anyhow::Result<()> {
    let (dir, out) = temp_workspace();
    let bogus = dir.path().join("not_an_image.jpg");
    std::fs::write(&bogus, b"definitely not a jpeg")?;

    let err = Shaper::new(ShaperConfig::new().with_output_dir(&out))
        .run(&bogus, None)
        .unwrap_err();
    assert!(matches!(err, ShaperError::Decode { .. }));
    Ok(())
}

#[test]
fn missing_input_is_a_decode_error() {
    let (dir, out) = temp_workspace();
    let missing = dir.path().join("nope.png");

    let err = Shaper::new(ShaperConfig::new().with_output_dir(&out))
        .run(&missing, None)
        .unwrap_err();
    assert!(matches!(err, ShaperError::Decode { .. }));
}

#[test]
fn output_dir_is_created_with_parents() -> anyhow::Result<()> {
    let (dir, _) = temp_workspace();
    let nested = dir.path().join("a").join("b").join("c");
    let input = save_png(dir.path(), "a.png", &bright_blobs(100, 100, &[Rect::new(30, 30, 30, 30)]));

    let summary = Shaper::new(ShaperConfig::new().with_output_dir(&nested)).run(&input, None)?;

    assert!(nested.is_dir());
    assert_eq!(summary.written, vec![nested.join("coin0.jpg")]);
    Ok(())
}

#[test]
fn output_dir_blocked_by_file() -> anyhow::Result<()> {
    let (dir, _) = temp_workspace();
    let blocker = dir.path().join("taken");
    std::fs::write(&blocker, b"file")?;
    let input = save_png(dir.path(), "a.png", &bright_blobs(100, 100, &[Rect::new(30, 30, 30, 30)]));

    let err = Shaper::new(ShaperConfig::new().with_output_dir(&blocker))
        .run(&input, None)
        .unwrap_err();
    assert!(matches!(err, ShaperError::OutputDir { .. }));
    Ok(())
}

#[test]
fn detection_is_printable() {
    let img = DynamicImage::ImageRgb8(bright_blobs(60, 60, &[Rect::new(20, 20, 20, 20)]));
    let detection = DetectionPipeline::default().detect(&img);
    assert!(format!("{:?}", detection).contains("rects"));
}
