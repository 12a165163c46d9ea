use std::fs;
use std::path::{Path, PathBuf};
use anyhow::{Context, Result};
use log::{info, warn};
use crate::constants::PLACEHOLDER_COUNT;

pub const IMAGE_EXTENSIONS: [&str; 7] = ["png", "jpg", "jpeg", "bmp", "gif", "tga", "qoi"];

/// Turns an uploaded file into something the preview can draw.
pub trait MediaLoader {
    type Handle;
    fn load(&mut self, path: &Path) -> Result<Self::Handle>;
}

/// One entry of the active sequence.
#[derive(Debug)]
pub enum ImageRef<H> {
    /// Stand-in shown when nothing was uploaded (position in the fallback set).
    Placeholder(usize),
    Loaded { path: PathBuf, handle: H },
    /// Uploaded file that could not be decoded; drawn as a broken image.
    Broken { path: PathBuf },
}

impl<H> ImageRef<H> {
    pub fn path(&self) -> Option<&Path> {
        match self {
            ImageRef::Loaded { path, .. } | ImageRef::Broken { path } => Some(path),
            ImageRef::Placeholder(_) => None,
        }
    }

    pub fn file_name(&self) -> Option<String> {
        self.path()
            .and_then(Path::file_name)
            .map(|name| name.to_string_lossy().into_owned())
    }
}

/// Ordered, never empty list of images being played back.
///
/// The sequence owns the display handles of its uploaded entries, so they are
/// released as soon as the sequence is replaced or the session ends.
#[derive(Debug)]
pub struct MediaSequence<H> {
    entries: Vec<ImageRef<H>>,
    uploaded: bool,
}

impl<H> MediaSequence<H> {
    pub fn placeholder() -> Self {
        Self {
            entries: (0..PLACEHOLDER_COUNT).map(ImageRef::Placeholder).collect(),
            uploaded: false,
        }
    }

    /// Builds the sequence for an upload: one entry per file, in order, or the
    /// placeholder set when the upload is empty.
    pub fn resolve<L>(files: &[PathBuf], loader: &mut L) -> Self
    where
        L: MediaLoader<Handle = H> + ?Sized,
    {
        if files.is_empty() {
            return Self::placeholder();
        }

        let mut entries = Vec::with_capacity(files.len());
        for path in files {
            if !is_image_path(path) {
                warn!("{:?} does not look like an image, loading it anyway", path);
            }
            match loader.load(path) {
                Ok(handle) => entries.push(ImageRef::Loaded { path: path.clone(), handle }),
                Err(e) => {
                    warn!("Could not load {:?}: {:#}", path, e);
                    entries.push(ImageRef::Broken { path: path.clone() });
                }
            }
        }

        info!("Loaded {} uploaded image(s)", entries.len());
        Self { entries, uploaded: true }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_uploaded(&self) -> bool {
        self.uploaded
    }

    pub fn entries(&self) -> &[ImageRef<H>] {
        &self.entries
    }

    /// Entry at an unnormalized playback index.
    pub fn get(&self, index: usize) -> &ImageRef<H> {
        &self.entries[index % self.entries.len()]
    }
}

pub fn is_image_path(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Expands command line inputs: files are kept as given, directories are
/// replaced by the image files they contain, sorted by file name.
pub fn expand_inputs(inputs: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for input in inputs {
        if input.is_dir() {
            files.extend(sorted_image_paths(input)?);
        } else {
            files.push(input.clone());
        }
    }
    Ok(files)
}

fn sorted_image_paths(dir_path: &Path) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    let entries = fs::read_dir(dir_path)
        .with_context(|| format!("Failed to read directory {:?}", dir_path))?;

    for entry in entries {
        let path = entry.context("Failed to read directory entry")?.path();
        if path.is_file() && is_image_path(&path) {
            paths.push(path);
        }
    }
    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    if paths.is_empty() {
        warn!("No image files found in directory {:?}", dir_path);
    }
    Ok(paths)
}
