//! Background icon decoder.
//!
//! Decodes image icons on worker threads into RGBA buffers ready for egui
//! texture upload. Glyph icons never come through here.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::mpsc;

/// Icons larger than this are downscaled (longest side, pixels).
const MAX_ICON_SIDE: u32 = 256;

/// Decoded icon pixels (RGBA, unpremultiplied).
pub struct IconImage {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl IconImage {
    pub fn to_color_image(&self) -> egui::ColorImage {
        egui::ColorImage::from_rgba_unmultiplied(
            [self.width as usize, self.height as usize],
            &self.rgba,
        )
    }
}

/// Manages background icon decoding.
pub struct IconLoader {
    pending: HashMap<PathBuf, mpsc::Receiver<Option<IconImage>>>,
    loaded: HashMap<PathBuf, IconImage>,
    failed: HashSet<PathBuf>,
}

impl IconLoader {
    pub fn new() -> Self {
        Self {
            pending: HashMap::new(),
            loaded: HashMap::new(),
            failed: HashSet::new(),
        }
    }

    /// Queue `path` for decoding unless it is already known.
    pub fn request(&mut self, path: &Path) {
        if self.loaded.contains_key(path)
            || self.pending.contains_key(path)
            || self.failed.contains(path)
        {
            return;
        }

        let (tx, rx) = mpsc::channel();
        let owned = path.to_path_buf();

        std::thread::spawn(move || {
            let result = decode_icon(&owned);
            let _ = tx.send(result);
        });

        self.pending.insert(path.to_path_buf(), rx);
    }

    /// Collect finished decodes. Call every frame.
    pub fn poll(&mut self) {
        let mut completed = Vec::new();
        for (path, rx) in &self.pending {
            match rx.try_recv() {
                Ok(Some(icon)) => {
                    self.loaded.insert(path.clone(), icon);
                    completed.push(path.clone());
                }
                Ok(None) | Err(mpsc::TryRecvError::Disconnected) => {
                    self.failed.insert(path.clone());
                    completed.push(path.clone());
                }
                Err(mpsc::TryRecvError::Empty) => {}
            }
        }
        for path in completed {
            self.pending.remove(&path);
        }
    }

    pub fn get(&self, path: &Path) -> Option<&IconImage> {
        self.loaded.get(path)
    }

    pub fn loaded_paths(&self) -> Vec<PathBuf> {
        self.loaded.keys().cloned().collect()
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn failed_count(&self) -> usize {
        self.failed.len()
    }
}

impl Default for IconLoader {
    fn default() -> Self {
        Self::new()
    }
}

fn decode_icon(path: &Path) -> Option<IconImage> {
    let img = match image::open(path) {
        Ok(img) => img,
        Err(e) => {
            log::warn!("icons: cannot decode {}: {}", path.display(), e);
            return None;
        }
    };
    let img = if img.width() > MAX_ICON_SIDE || img.height() > MAX_ICON_SIDE {
        img.thumbnail(MAX_ICON_SIDE, MAX_ICON_SIDE)
    } else {
        img
    };
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    log::debug!("icons: decoded {} ({}x{})", path.display(), width, height);

    Some(IconImage {
        width,
        height,
        rgba: rgba.into_raw(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn wait_for(loader: &mut IconLoader) {
        for _ in 0..500 {
            loader.poll();
            if loader.pending_count() == 0 {
                return;
            }
            std::thread::sleep(Duration::from_millis(10));
        }
        panic!("icon decode did not finish");
    }

    #[test]
    fn loader_deduplicates() {
        let mut loader = IconLoader::new();
        loader.request(Path::new("/nonexistent/icon.png"));
        loader.request(Path::new("/nonexistent/icon.png"));
        assert_eq!(loader.pending_count(), 1);
    }

    #[test]
    fn missing_file_is_not_retried() {
        let mut loader = IconLoader::new();
        let path = Path::new("/nonexistent/missing.png");
        loader.request(path);
        wait_for(&mut loader);
        assert_eq!(loader.failed_count(), 1);

        loader.request(path);
        assert_eq!(loader.pending_count(), 0);
    }

    #[test]
    fn decodes_and_downscales_png() {
        let dir = tempfile::tempdir().unwrap();
        let small = dir.path().join("small.png");
        let large = dir.path().join("large.png");
        image::RgbaImage::from_pixel(8, 4, image::Rgba([255, 0, 0, 255]))
            .save(&small)
            .unwrap();
        image::RgbaImage::new(512, 256).save(&large).unwrap();

        let mut loader = IconLoader::new();
        loader.request(&small);
        loader.request(&large);
        wait_for(&mut loader);

        let icon = loader.get(&small).unwrap();
        assert_eq!((icon.width, icon.height), (8, 4));
        assert_eq!(icon.rgba.len(), 8 * 4 * 4);
        assert_eq!(&icon.rgba[..4], &[255, 0, 0, 255]);

        let icon = loader.get(&large).unwrap();
        assert_eq!((icon.width, icon.height), (256, 128));
        assert_eq!(loader.loaded_paths().len(), 2);
    }
}
