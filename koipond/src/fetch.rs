//! Background texture download
//!
//! Textures come from the network so startup never blocks on them; the
//! scene renders with flat fallbacks until real images arrive. A single
//! worker thread drives all downloads on a small current-thread runtime
//! and hands decoded RGBA images back over a channel the frame loop
//! polls without blocking.

use std::sync::mpsc;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::params;

/// Which material slot a downloaded image belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureKind {
    /// Scrolling skin texture for the outer tube
    EelAlbedo,
    /// Skin and alpha texture for the coiled tube
    KoiAlbedo,
    /// Equirectangular environment used for reflections
    Environment,
}

/// A downloaded image, decoded to tightly packed RGBA8.
pub struct FetchedImage {
    pub kind: TextureKind,
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("image decode failed: {0}")]
    Decode(#[from] image::ImageError),
    #[error("runtime setup failed: {0}")]
    Runtime(#[from] std::io::Error),
}

/// Start downloading every scene texture in the background.
///
/// Returns immediately with the receiving end of the channel; images are
/// delivered in completion order. Failed downloads are logged and simply
/// never arrive, leaving the fallback texture in place. Dropping the
/// receiver ends the worker after its in-flight requests finish.
pub fn spawn_fetches() -> mpsc::Receiver<FetchedImage> {
    let (tx, rx) = mpsc::channel();
    std::thread::spawn(move || {
        if let Err(e) = fetch_worker(tx) {
            warn!("texture fetch worker failed: {e}");
        }
    });
    rx
}

fn fetch_worker(tx: mpsc::Sender<FetchedImage>) -> Result<(), FetchError> {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    rt.block_on(async {
        let client = reqwest::Client::builder()
            .timeout(params::FETCH_TIMEOUT)
            .build()?;

        tokio::join!(
            fetch_and_send(&client, &tx, TextureKind::EelAlbedo, params::EEL_ALBEDO_URL),
            fetch_and_send(&client, &tx, TextureKind::KoiAlbedo, params::KOI_ALBEDO_URL),
            fetch_and_send(&client, &tx, TextureKind::Environment, params::ENV_MAP_URL),
        );

        Ok(())
    })
}

/// Download one texture and push it into the channel, logging failures
/// instead of propagating them so the other downloads keep going.
async fn fetch_and_send(
    client: &reqwest::Client,
    tx: &mpsc::Sender<FetchedImage>,
    kind: TextureKind,
    url: &str,
) {
    match fetch_texture(client, kind, url).await {
        Ok(img) => {
            info!("texture ready: {:?} ({}x{})", img.kind, img.width, img.height);
            if tx.send(img).is_err() {
                debug!("texture receiver dropped, discarding {kind:?}");
            }
        }
        Err(e) => warn!("texture fetch failed for {kind:?}: {e}"),
    }
}

async fn fetch_texture(
    client: &reqwest::Client,
    kind: TextureKind,
    url: &str,
) -> Result<FetchedImage, FetchError> {
    debug!("fetching {kind:?} from {url}");
    let bytes = client
        .get(url)
        .send()
        .await?
        .error_for_status()?
        .bytes()
        .await?;

    let image = image::load_from_memory(&bytes)?.to_rgba8();
    let (width, height) = image.dimensions();
    Ok(FetchedImage {
        kind,
        width,
        height,
        pixels: image.into_raw(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decoded_images_are_tightly_packed_rgba() {
        // A tiny PNG through the same decode path the worker uses.
        let mut png = Vec::new();
        let img = image::RgbaImage::from_pixel(2, 3, image::Rgba([10, 20, 30, 255]));
        img.write_to(
            &mut std::io::Cursor::new(&mut png),
            image::ImageFormat::Png,
        )
        .unwrap();

        let decoded = image::load_from_memory(&png).unwrap().to_rgba8();
        assert_eq!(decoded.dimensions(), (2, 3));
        assert_eq!(decoded.as_raw().len(), 2 * 3 * 4);
        assert_eq!(&decoded.as_raw()[..4], &[10, 20, 30, 255]);
    }

    #[test]
    fn receiver_survives_worker_thread_exit() {
        // Worker sends then hangs up; pending items stay readable.
        let (tx, rx) = mpsc::channel();
        std::thread::spawn(move || {
            tx.send(FetchedImage {
                kind: TextureKind::EelAlbedo,
                width: 1,
                height: 1,
                pixels: vec![255; 4],
            })
            .unwrap();
        })
        .join()
        .unwrap();

        let img = rx.recv().unwrap();
        assert_eq!(img.kind, TextureKind::EelAlbedo);
        assert!(matches!(
            rx.try_recv(),
            Err(mpsc::TryRecvError::Disconnected)
        ));
    }
}
