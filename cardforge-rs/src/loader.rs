//! Illustration loading.
//!
//! Loads resolve a source into a decoded raster image off the render thread.
//! Every load takes a new [`LoadToken`]; a finished load only applies when its
//! token is still the latest one issued, so starting a new load supersedes any
//! load still in flight.

use crate::error::{CardError, CardResult};
use cardforge_canvas2d::CanvasImageDataRef;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

pub const DEFAULT_PLACEHOLDER_TILE: u32 = 32;

const PLACEHOLDER_LIGHT: [u8; 4] = [204, 204, 204, 255];
const PLACEHOLDER_DARK: [u8; 4] = [153, 153, 153, 255];

/// Decoded raster image, premultiplied RGBA8.
#[derive(Clone, PartialEq, Eq)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl std::fmt::Debug for DecodedImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DecodedImage")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

impl DecodedImage {
    /// Wrap straight-alpha RGBA8 pixels, premultiplying them.
    pub fn from_straight_rgba(width: u32, height: u32, mut data: Vec<u8>) -> CardResult<Self> {
        let expected = width as usize * height as usize * 4;
        if data.len() != expected {
            return Err(CardError::ImageDecode(format!(
                "expected {expected} bytes of RGBA data, got {}",
                data.len()
            )));
        }
        for px in data.chunks_exact_mut(4) {
            let a = px[3] as u16;
            match a {
                255 => {}
                0 => px[..3].fill(0),
                _ => {
                    for c in &mut px[..3] {
                        *c = ((*c as u16 * a + 127) / 255) as u8;
                    }
                }
            }
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn as_image_data(&self) -> CardResult<CanvasImageDataRef<'_>> {
        Ok(CanvasImageDataRef::new(&self.data, self.width, self.height)?)
    }
}

/// Built-in placeholder: a 2×2 checkerboard of two grays, each tile `tile_size` pixels.
pub fn placeholder_image(tile_size: u32) -> DecodedImage {
    let tile = tile_size.max(1);
    let side = tile * 2;
    let mut data = Vec::with_capacity((side * side * 4) as usize);
    for y in 0..side {
        for x in 0..side {
            let light = (x / tile + y / tile) % 2 == 0;
            data.extend_from_slice(if light {
                &PLACEHOLDER_LIGHT
            } else {
                &PLACEHOLDER_DARK
            });
        }
    }
    DecodedImage {
        width: side,
        height: side,
        data,
    }
}

/// Decode raster image bytes (PNG, JPEG, GIF, WebP).
pub fn decode_image(bytes: &[u8]) -> CardResult<DecodedImage> {
    let img = image::load_from_memory(bytes)?;
    let width = img.width();
    let height = img.height();
    if width == 0 || height == 0 {
        return Err(CardError::ImageDecode("image has no pixels".to_string()));
    }
    DecodedImage::from_straight_rgba(width, height, img.to_rgba8().into_raw())
}

/// Where the illustration comes from.
#[derive(Debug, Clone)]
pub enum IllustrationSource {
    Placeholder,
    Upload(Arc<[u8]>),
}

/// Pick the uploaded bytes when present and selected, otherwise the placeholder.
pub fn resolve_source(upload: Option<Arc<[u8]>>, use_upload: bool) -> IllustrationSource {
    match upload {
        Some(bytes) if use_upload => IllustrationSource::Upload(bytes),
        _ => IllustrationSource::Placeholder,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LoadToken(u64);

#[derive(Debug, Clone)]
pub enum LoadOutcome {
    /// The load was still the latest when it finished. `image` is `None` when
    /// decoding failed.
    Applied {
        token: LoadToken,
        image: Option<Arc<DecodedImage>>,
    },
    /// A newer load started before this one finished.
    Superseded,
}

/// Issues load tokens and runs loads. Clones share the same token counter.
#[derive(Debug, Clone)]
pub struct ImageLoader {
    latest: Arc<AtomicU64>,
    placeholder_tile_size: u32,
}

impl Default for ImageLoader {
    fn default() -> Self {
        Self::new(DEFAULT_PLACEHOLDER_TILE)
    }
}

impl ImageLoader {
    pub fn new(placeholder_tile_size: u32) -> Self {
        Self {
            latest: Arc::new(AtomicU64::new(0)),
            placeholder_tile_size,
        }
    }

    /// Start a new request, superseding every earlier one.
    pub fn begin(&self) -> LoadToken {
        LoadToken(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, token: LoadToken) -> bool {
        self.latest.load(Ordering::SeqCst) == token.0
    }

    /// Invalidate any load in flight without starting a new one.
    pub fn cancel(&self) {
        self.begin();
    }

    /// Resolve `source` into a decoded image.
    pub async fn load(&self, source: IllustrationSource) -> LoadOutcome {
        let token = self.begin();
        let tile = self.placeholder_tile_size;
        log::debug!("illustration load {token:?} started");

        let decoded = tokio::task::spawn_blocking(move || match source {
            IllustrationSource::Placeholder => Ok(placeholder_image(tile)),
            IllustrationSource::Upload(bytes) => decode_image(&bytes),
        })
        .await;

        let image = match decoded {
            Ok(Ok(image)) => Some(Arc::new(image)),
            Ok(Err(err)) => {
                log::warn!("Illustration could not be decoded, drawing none: {err}");
                None
            }
            Err(err) => {
                log::warn!("Illustration decode task failed: {err}");
                None
            }
        };

        if self.is_current(token) {
            LoadOutcome::Applied { token, image }
        } else {
            log::debug!("illustration load {token:?} superseded");
            LoadOutcome::Superseded
        }
    }
}
