use std::collections::HashSet;
use std::path::{Path, PathBuf};

use image::error::{ImageFormatHint, UnsupportedError, UnsupportedErrorKind};
use image::{DynamicImage, ImageError, ImageFormat, ImageReader};

use crate::error::{BatchError, ConvertError};
use crate::selection::SelectionList;
use crate::types::{BatchSummary, ConversionSettings, FileOutcome};

/// Largest width or height an ICO entry can hold.
const ICO_MAX_SIZE: u32 = 256;

/// Converts one image, writing it to `output_path` in the format its extension names.
///
/// Failures are logged here and returned to the caller, which only counts them.
pub fn convert(input_path: &Path, output_path: &Path) -> Result<(), ConvertError> {
    match convert_image(input_path, output_path) {
        Ok(()) => {
            log::info!("Converted {} to {}", input_path.display(), output_path.display());
            Ok(())
        }
        Err(e) => {
            log::error!("Error converting {}: {}", input_path.display(), e);
            Err(e)
        }
    }
}

fn convert_image(input_path: &Path, output_path: &Path) -> Result<(), ConvertError> {
    // The reader owns the file handle and is consumed by `decode`
    let reader = ImageReader::open(input_path)
        .and_then(|reader| reader.with_guessed_format())
        .map_err(|source| ConvertError::Open {
            path: input_path.to_path_buf(),
            source,
        })?;
    let source_format = reader.format();
    let image = reader.decode().map_err(|source| ConvertError::Decode {
        path: input_path.to_path_buf(),
        source,
    })?;

    let encode_error = |source| ConvertError::Encode {
        path: output_path.to_path_buf(),
        source,
    };

    let mut image = normalize(image, source_format);
    match ImageFormat::from_path(output_path).ok() {
        Some(ImageFormat::Jpeg) if image.color().has_alpha() => {
            return Err(encode_error(ImageError::Unsupported(
                UnsupportedError::from_format_and_kind(
                    ImageFormatHint::Exact(ImageFormat::Jpeg),
                    UnsupportedErrorKind::Color(image.color().into()),
                ),
            )));
        }
        Some(ImageFormat::Ico)
            if image.width() > ICO_MAX_SIZE || image.height() > ICO_MAX_SIZE =>
        {
            image = image.thumbnail(ICO_MAX_SIZE, ICO_MAX_SIZE);
        }
        _ => {}
    }

    image.save(output_path).map_err(encode_error)
}

/// Reduces any decoded image to 8-bit RGBA if it carries alpha, 8-bit RGB otherwise.
///
/// GIF is paletted; its decoder always yields RGBA, but it is treated as having no alpha.
pub fn normalize(image: DynamicImage, source_format: Option<ImageFormat>) -> DynamicImage {
    if has_alpha_layout(&image, source_format) {
        DynamicImage::ImageRgba8(image.into_rgba8())
    } else {
        DynamicImage::ImageRgb8(image.into_rgb8())
    }
}

pub fn has_alpha_layout(image: &DynamicImage, source_format: Option<ImageFormat>) -> bool {
    image.color().has_alpha() && source_format != Some(ImageFormat::Gif)
}

/// `<output_dir>/<input base name><output_extension>`
pub fn output_path_for(input: &Path, output_dir: &Path, output_extension: &str) -> PathBuf {
    let stem = input.file_stem().unwrap_or(input.as_os_str());
    let mut file_name = stem.to_os_string();
    file_name.push(output_extension);
    output_dir.join(file_name)
}

/// Iteration state of one conversion batch, advanced one file at a time so the
/// UI can repaint between files.
pub struct BatchJob {
    files: Vec<PathBuf>,
    output_dir: PathBuf,
    output_extension: &'static str,
    next: usize,
    succeeded: usize,
    written: HashSet<PathBuf>,
}

impl BatchJob {
    /// Expands the selection and creates the output folder.
    ///
    /// Nothing touches the filesystem unless at least one image was found.
    pub fn prepare(
        selection: &SelectionList,
        settings: &ConversionSettings,
    ) -> Result<Self, BatchError> {
        if selection.is_empty() {
            return Err(BatchError::EmptySelection);
        }

        let files = selection.expand();
        log::debug!("Expanded {} selected path(s) to {} image(s)", selection.len(), files.len());
        if files.is_empty() {
            return Err(BatchError::NoSupportedImages);
        }

        std::fs::create_dir_all(&settings.output_dir).map_err(|source| BatchError::OutputDir {
            path: settings.output_dir.clone(),
            source,
        })?;

        log::info!(
            "Converting {} image(s) to {} into {}",
            files.len(),
            settings.output_extension,
            settings.output_dir.display()
        );

        Ok(Self {
            files,
            output_dir: settings.output_dir.clone(),
            output_extension: settings.output_extension,
            next: 0,
            succeeded: 0,
            written: HashSet::new(),
        })
    }

    pub fn total(&self) -> usize {
        self.files.len()
    }

    pub fn completed(&self) -> usize {
        self.next
    }

    pub fn is_finished(&self) -> bool {
        self.next >= self.files.len()
    }

    /// The file the next `step` will convert.
    pub fn current_file(&self) -> Option<&Path> {
        self.files.get(self.next).map(PathBuf::as_path)
    }

    /// `round(100 * completed / total)`
    pub fn progress_percent(&self) -> u8 {
        progress_percent(self.next, self.files.len())
    }

    /// Converts the next file. Returns `None` once every file has been processed.
    pub fn step(&mut self) -> Option<FileOutcome> {
        if self.is_finished() {
            return None;
        }
        let input = self.files[self.next].clone();
        self.next += 1;

        let output = output_path_for(&input, &self.output_dir, self.output_extension);
        let overwrote = !self.written.insert(output.clone());
        if overwrote {
            log::warn!(
                "{} overwrites an output written earlier in this batch: {}",
                input.display(),
                output.display()
            );
        }

        let result = convert(&input, &output);
        if result.is_ok() {
            self.succeeded += 1;
        }

        Some(FileOutcome {
            input,
            output,
            result,
            overwrote,
        })
    }

    pub fn summary(&self) -> BatchSummary {
        BatchSummary {
            succeeded: self.succeeded,
            total: self.files.len(),
        }
    }
}

pub fn progress_percent(completed: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    (100.0 * completed as f64 / total as f64).round() as u8
}
