//! Run orchestration: decode, detect, match, crop, write.

use std::fs;
use std::path::{Path, PathBuf};

use image::{DynamicImage, GrayImage, ImageReader, RgbImage};

use crate::compose;
use crate::config::ShaperConfig;
use crate::detection::{Detection, DetectionPipeline};
use crate::error::{Result, ShaperError};
use crate::matching;

/// What a run found and wrote
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    /// Regions detected in the first photo
    pub first_count: usize,
    /// Regions detected in the second photo, if one was given
    pub second_count: Option<usize>,
    /// Matched pairs (two-photo mode only)
    pub pair_count: usize,
    /// Crop files in the order they were written
    pub written: Vec<PathBuf>,
}

pub struct Shaper {
    config: ShaperConfig,
    detector: DetectionPipeline,
}

impl Shaper {
    pub fn new(config: ShaperConfig) -> Self {
        let detector = DetectionPipeline::new(&config);
        Self { config, detector }
    }

    pub fn config(&self) -> &ShaperConfig {
        &self.config
    }

    /// Crop objects out of one photo, or pair them up across two.
    pub fn run(&self, first: &Path, second: Option<&Path>) -> Result<RunSummary> {
        prepare_output_dir(&self.config.output_dir)?;

        let first_img = load_image(first)?;
        let first_det = self.detect_stage(&first_img, "first")?;
        log::info!("Found {} coins in {}", first_det.rects.len(), first.display());

        let mut summary = RunSummary {
            first_count: first_det.rects.len(),
            ..RunSummary::default()
        };
        let first_rgb = first_img.to_rgb8();

        match second {
            Some(second) => {
                let second_img = load_image(second)?;
                let second_det = self.detect_stage(&second_img, "second")?;
                log::info!("Found {} coins in {}", second_det.rects.len(), second.display());
                summary.second_count = Some(second_det.rects.len());

                let second_rgb = second_img.to_rgb8();
                let pairs = matching::match_rects(&first_det.rects, &second_det.rects);
                log::info!("Matched {} pairs", pairs.len());
                summary.pair_count = pairs.len();

                for pair in &pairs {
                    let composite =
                        compose::compose(&first_rgb, &pair.first, &second_rgb, &pair.second)?;
                    summary.written.push(self.write_crop(&composite, summary.written.len())?);
                }
            }
            None => {
                for rect in &first_det.rects {
                    let cropped = compose::crop(&first_rgb, rect)?;
                    summary.written.push(self.write_crop(&cropped, summary.written.len())?);
                }
            }
        }

        log::info!(
            "Wrote {} crops to {}",
            summary.written.len(),
            self.config.output_dir.display()
        );
        Ok(summary)
    }

    fn detect_stage(&self, img: &DynamicImage, prefix: &str) -> Result<Detection> {
        let detection = self.detector.detect(img);

        if self.config.save_processed {
            self.save_stage(&detection.gray, &format!("{}Gray.jpg", prefix))?;
            let stage = self.config.binarization.stage_name();
            self.save_stage(&detection.mask, &format!("{}{}.jpg", prefix, stage))?;
        }

        Ok(detection)
    }

    fn save_stage(&self, img: &GrayImage, filename: &str) -> Result<()> {
        let path = self.config.output_dir.join(filename);
        img.save(&path).map_err(|e| ShaperError::encode(&path, e))?;
        log::debug!("  Debug: saved {}", path.display());
        Ok(())
    }

    fn write_crop(&self, img: &RgbImage, index: usize) -> Result<PathBuf> {
        let path = self.config.output_dir.join(crop_filename(index));
        img.save(&path).map_err(|e| ShaperError::encode(&path, e))?;
        log::debug!("  Saved {} ({}x{})", path.display(), img.width(), img.height());
        Ok(path)
    }
}

/// Output name for the `index`-th crop of a run
pub fn crop_filename(index: usize) -> String {
    format!("coin{}.jpg", index)
}

/// Decode an image file, failing the run if it is unreadable
pub fn load_image(path: &Path) -> Result<DynamicImage> {
    log::debug!("Loading image: {}", path.display());
    let img = ImageReader::open(path)
        .map_err(|e| ShaperError::decode(path, image::ImageError::IoError(e)))?
        .with_guessed_format()
        .map_err(|e| ShaperError::decode(path, image::ImageError::IoError(e)))?
        .decode()
        .map_err(|e| ShaperError::decode(path, e))?;
    log::debug!("Image loaded: {}x{}", img.width(), img.height());
    Ok(img)
}

/// Create the output directory (and parents), world-writable on unix
pub fn prepare_output_dir(dir: &Path) -> Result<()> {
    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o777);
    }

    builder.create(dir).map_err(|source| ShaperError::OutputDir {
        path: dir.to_path_buf(),
        source,
    })
}
