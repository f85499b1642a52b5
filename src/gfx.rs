use crate::error::{Error, Result};
use crate::img::RasterImage;
use log::{debug, error};
use pixels::{Pixels, SurfaceTexture};
use std::cmp::min;
use winit::{
    dpi::PhysicalSize,
    event::{Event, WindowEvent},
    event_loop::{ControlFlow, EventLoop},
    window::{Window, WindowBuilder},
};

const MAX_WIDTH: u32 = 1500;
const MAX_HEIGHT: u32 = 1000;
/// Columns between images shown side by side.
pub const GAP: u32 = 8;
const BACKGROUND: [u8; 4] = [32, 32, 32, 255];

/// RGBA frame holding `images` left to right, top aligned.
#[derive(Debug, PartialEq, Eq)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

pub fn compose(images: &[&RasterImage]) -> Result<Frame> {
    let gaps = GAP * images.len().saturating_sub(1) as u32;
    let width = images.iter().map(|i| i.width()).sum::<u32>() + gaps;
    let height = images.iter().map(|i| i.height()).max().unwrap_or(0);
    if images.iter().any(|i| i.is_empty()) || width == 0 || height == 0 {
        return Err(Error::EmptyImage);
    }

    let stride = width as usize * 4;
    let mut rgba = BACKGROUND.repeat(width as usize * height as usize);
    let mut left = 0usize;
    for img in images {
        let src = img.to_rgba();
        let row_len = img.width() as usize * 4;
        for (y, row) in src.chunks_exact(row_len).enumerate() {
            let start = y * stride + left * 4;
            rgba[start..start + row_len].copy_from_slice(row);
        }
        left += (img.width() + GAP) as usize;
    }
    Ok(Frame {
        width,
        height,
        rgba,
    })
}

pub fn pixel_scale(width: u32, height: u32) -> u32 {
    min(MAX_HEIGHT / height.max(1), MAX_WIDTH / width.max(1)).max(1)
}

pub struct Gfx {
    window: Window,
    pixels: Pixels,
}

impl Gfx {
    pub fn new(width: u32, height: u32, title: &str) -> Result<(Self, EventLoop<()>)> {
        let scale = pixel_scale(width, height);
        let event_loop = EventLoop::new();
        // physical window size = virtual size × scale
        let physical_size = PhysicalSize::new(width * scale, height * scale);

        let window = WindowBuilder::new()
            .with_title(title)
            .with_inner_size(physical_size)
            .with_resizable(false)
            .build(&event_loop)
            .map_err(|e| Error::Display(e.to_string()))?;

        let surface_texture =
            SurfaceTexture::new(physical_size.width, physical_size.height, &window);
        let pixels = Pixels::new(width, height, surface_texture)
            .map_err(|e| Error::Display(e.to_string()))?;

        Ok((
            Gfx {
                window,
                pixels,
            },
            event_loop,
        ))
    }

    pub fn render(&mut self) -> Result<()> {
        self.pixels
            .render()
            .map_err(|e| Error::Display(e.to_string()))
    }

    pub fn request_redraw(&self) {
        self.window.request_redraw();
    }

    pub fn display(&mut self, frame: &Frame) {
        self.pixels.frame_mut().copy_from_slice(&frame.rgba);
    }
}

/// Opens a window with `images` side by side. Returns only on setup failure.
pub fn show(images: &[&RasterImage], title: &str) -> Result<()> {
    let frame = compose(images)?;
    debug!(
        "showing {} image(s) in a {}x{} frame",
        images.len(),
        frame.width,
        frame.height
    );
    let (mut gfx, event_loop) = Gfx::new(frame.width, frame.height, title)?;
    gfx.display(&frame);
    gfx.render()?;

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Wait;

        match event {
            Event::WindowEvent {
                event: WindowEvent::CloseRequested,
                ..
            } => *control_flow = ControlFlow::Exit,
            Event::WindowEvent {
                event: WindowEvent::Resized(_) | WindowEvent::ScaleFactorChanged { .. },
                ..
            } => gfx.request_redraw(),
            Event::RedrawRequested(_) => {
                if let Err(e) = gfx.render() {
                    error!("{}", e);
                    *control_flow = ControlFlow::Exit;
                }
            }
            _ => {}
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_image_fills_frame() {
        let img = RasterImage::new(2, 1, vec![0, 10]).unwrap();
        let frame = compose(&[&img]).unwrap();
        assert_eq!((frame.width, frame.height), (2, 1));
        assert_eq!(frame.rgba, vec![0, 0, 0, 255, 255, 255, 255, 255]);
    }

    #[test]
    fn pair_is_side_by_side_with_gap() {
        let src = RasterImage::new(1, 1, vec![5]).unwrap();
        let dst = RasterImage::new(2, 2, vec![0, 1, 2, 3]).unwrap();
        let frame = compose(&[&src, &dst]).unwrap();
        assert_eq!(frame.width, 1 + GAP + 2);
        assert_eq!(frame.height, 2);

        let px = |x: u32, y: u32| {
            let i = (y * frame.width + x) as usize * 4;
            frame.rgba[i..i + 4].to_vec()
        };
        // flat source maps to black
        assert_eq!(px(0, 0), vec![0, 0, 0, 255]);
        // below the shorter image is background
        assert_eq!(px(0, 1), BACKGROUND.to_vec());
        assert_eq!(px(1, 0), BACKGROUND.to_vec());
        assert_eq!(px(1 + GAP, 0), vec![0, 0, 0, 255]);
        assert_eq!(px(2 + GAP, 1), vec![255, 255, 255, 255]);
    }

    #[test]
    fn empty_images_cannot_be_shown() {
        let img = RasterImage::new(0, 3, vec![]).unwrap();
        assert!(matches!(compose(&[&img]), Err(Error::EmptyImage)));
        assert!(matches!(compose(&[]), Err(Error::EmptyImage)));
    }

    #[test]
    fn scale_fits_window() {
        assert_eq!(pixel_scale(100, 100), 10);
        assert_eq!(pixel_scale(512, 512), 1);
        assert_eq!(pixel_scale(4000, 10), 1);
    }
}
