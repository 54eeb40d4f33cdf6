//! Background texture loading.
//!
//! Each requested image is decoded on its own thread and the RGBA pixels are
//! handed back over a channel. The main thread drains finished decodes once
//! per frame and uploads them; nothing here ever blocks the render loop.
//!
//! A failed load logs a warning and delivers nothing — the material keeps
//! rendering with its base color.

use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver};
use std::thread;

use super::material::MaterialId;

/// One texture to fetch for one material.
pub struct TextureRequest {
    pub material: MaterialId,
    pub path: PathBuf,
}

/// A decoded image ready for GPU upload.
pub struct LoadedTexture {
    pub material: MaterialId,
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

pub struct TextureLoader {
    receiver: Receiver<LoadedTexture>,
}

impl TextureLoader {
    /// Spawns one decode thread per request.
    pub fn spawn(requests: Vec<TextureRequest>) -> Self {
        let (sender, receiver) = channel();

        for request in requests {
            let sender = sender.clone();
            thread::spawn(move || match image::open(&request.path) {
                Ok(img) => {
                    let rgba = img.to_rgba8();
                    let (width, height) = rgba.dimensions();
                    // Receiver may be gone if the app shut down mid-load
                    let _ = sender.send(LoadedTexture {
                        material: request.material,
                        width,
                        height,
                        pixels: rgba.into_raw(),
                    });
                }
                Err(err) => {
                    log::warn!(
                        "failed to load texture {:?}, keeping base color: {}",
                        request.path,
                        err
                    );
                }
            });
        }

        Self { receiver }
    }

    /// Non-blocking drain of every decode finished so far.
    pub fn poll(&self) -> Vec<LoadedTexture> {
        self.receiver.try_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_delivers_nothing() {
        let loader = TextureLoader::spawn(vec![TextureRequest {
            material: "earth".to_string(),
            path: PathBuf::from("assets/textures/definitely_missing.jpg"),
        }]);

        // Wait for the decode thread to finish by observing the channel close.
        let deadline = std::time::Instant::now() + std::time::Duration::from_secs(5);
        loop {
            match loader.receiver.try_recv() {
                Ok(_) => panic!("missing file must not produce a texture"),
                Err(std::sync::mpsc::TryRecvError::Disconnected) => break,
                Err(std::sync::mpsc::TryRecvError::Empty) => {
                    assert!(std::time::Instant::now() < deadline, "loader thread hung");
                    thread::yield_now();
                }
            }
        }
        assert!(loader.poll().is_empty());
    }
}
