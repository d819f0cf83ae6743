//! Layout composition

use std::sync::Arc;

use contracts::{Channel, Composed, CompositeFrame, Frame, Layout, OverlayConfig};
use frame_store::FrameStore;
use tracing::trace;

use crate::resize::resize_nearest;

/// Minimap border fill colour (grey panel behind the minimap).
const BORDER_FILL: [u8; 3] = [50, 50, 50];

/// Minimap border outline colour.
const BORDER_OUTLINE: [u8; 3] = [255, 255, 255];

/// Outline thickness in pixels.
const BORDER_THICKNESS: usize = 2;

/// Assembles composites from the frame store.
///
/// Holds only configuration; every `compose` call reads the store fresh, so
/// the same compositor is safely shared by consecutive ticks. With no
/// intervening writes, two calls produce byte-identical output.
pub struct Compositor {
    overlay: OverlayConfig,
}

impl Compositor {
    /// Create a compositor with the given overlay parameters.
    pub fn new(overlay: OverlayConfig) -> Self {
        Self { overlay }
    }

    /// Assemble one composite for the layout, or report what is missing.
    ///
    /// Panorama and cubemap need every referenced channel; the overlay needs
    /// only its primary and degrades to primary-alone when the minimap
    /// channel has not delivered.
    pub fn compose(&self, layout: &Layout, store: &FrameStore, tick: u64) -> Composed {
        match layout {
            Layout::PanoramaStrip => {
                let strip = Layout::PANORAMA_CHANNELS;
                self.compose_grid(&[&strip], store, tick)
            }
            Layout::CubemapGrid => {
                let [top, bottom] = Layout::CUBEMAP_ROWS;
                self.compose_grid(&[&top, &bottom], store, tick)
            }
            Layout::Overlay { primary, minimap } => {
                self.compose_overlay(*primary, *minimap, store, tick)
            }
        }
    }

    /// Concatenate rows of equally sized cells. All cells are required; the
    /// cell geometry follows the front camera's frame, and any cell whose
    /// frame has different dimensions is nearest-resized to fit.
    fn compose_grid(&self, rows: &[&[Channel]], store: &FrameStore, tick: u64) -> Composed {
        let mut missing = Vec::new();
        let mut cells: Vec<(Channel, Arc<Frame>)> = Vec::new();

        for &channel in rows.iter().flat_map(|row| row.iter()) {
            match store.read(channel) {
                Some(frame) => cells.push((channel, frame)),
                None => missing.push(channel),
            }
        }

        if !missing.is_empty() {
            trace!(missing = ?missing, "grid compose incomplete");
            return Composed::Incomplete { missing };
        }

        let reference = cells
            .iter()
            .find(|(c, _)| *c == Channel::Front)
            .map(|(_, f)| Arc::clone(f))
            .unwrap_or_else(|| Arc::clone(&cells[0].1));
        let (cell_w, cell_h) = (reference.width, reference.height);

        let cols = rows[0].len();
        let width = cell_w * cols as u32;
        let height = cell_h * rows.len() as u32;
        let mut pixels = vec![0u8; width as usize * height as usize * 3];
        let mut timestamp = f64::NEG_INFINITY;

        // cells were collected in row-major order above
        for (idx, (_, frame)) in cells.iter().enumerate() {
            let row_idx = idx / cols;
            let col_idx = idx % cols;
            timestamp = timestamp.max(frame.timestamp);

            let resized;
            let cell_pixels = if frame.width == cell_w && frame.height == cell_h {
                &frame.pixels[..]
            } else {
                resized = resize_nearest(&frame.pixels, frame.width, frame.height, cell_w, cell_h);
                &resized[..]
            };

            blit(
                &mut pixels,
                width,
                col_idx as u32 * cell_w,
                row_idx as u32 * cell_h,
                cell_pixels,
                cell_w,
                cell_h,
            );
        }

        Composed::Frame(CompositeFrame {
            width,
            height,
            pixels,
            tick,
            timestamp,
        })
    }

    /// Full-size primary with the minimap drawn bottom-right behind a
    /// bordered panel, using the original view's offsets.
    fn compose_overlay(
        &self,
        primary: Channel,
        minimap: Channel,
        store: &FrameStore,
        tick: u64,
    ) -> Composed {
        let Some(primary_frame) = store.read(primary) else {
            trace!(channel = %primary, "overlay primary missing");
            return Composed::Incomplete {
                missing: vec![primary],
            };
        };

        let width = primary_frame.width;
        let height = primary_frame.height;
        let mut pixels = primary_frame.pixels.to_vec();
        let mut timestamp = primary_frame.timestamp;

        if let Some(minimap_frame) = store.read(minimap) {
            let size = self.overlay.minimap_size;
            if width >= size + 15 && height >= size + 35 {
                timestamp = timestamp.max(minimap_frame.timestamp);

                let panel_x = (width - size - 15) as usize;
                let panel_y = (height - size - 35) as usize;
                let panel_w = (size + 10) as usize;
                let panel_h = (size + 30) as usize;

                fill_rect(&mut pixels, width, panel_x, panel_y, panel_w, panel_h, BORDER_FILL);
                outline_rect(
                    &mut pixels,
                    width,
                    panel_x,
                    panel_y,
                    panel_w,
                    panel_h,
                    BORDER_THICKNESS,
                    BORDER_OUTLINE,
                );

                let scaled = resize_nearest(
                    &minimap_frame.pixels,
                    minimap_frame.width,
                    minimap_frame.height,
                    size,
                    size,
                );
                blit(
                    &mut pixels,
                    width,
                    width - size - 10,
                    height - size - 10,
                    &scaled,
                    size,
                    size,
                );
            } else {
                trace!(
                    channel = %minimap,
                    "primary too small for minimap panel, skipping minimap"
                );
            }
        }

        Composed::Frame(CompositeFrame {
            width,
            height,
            pixels,
            tick,
            timestamp,
        })
    }
}

/// Copy a full source raster onto the destination at (x, y).
fn blit(dst: &mut [u8], dst_w: u32, x: u32, y: u32, src: &[u8], src_w: u32, src_h: u32) {
    let dst_w = dst_w as usize;
    let (x, y) = (x as usize, y as usize);
    let row_bytes = src_w as usize * 3;

    for sy in 0..src_h as usize {
        let src_off = sy * row_bytes;
        let dst_off = ((y + sy) * dst_w + x) * 3;
        dst[dst_off..dst_off + row_bytes].copy_from_slice(&src[src_off..src_off + row_bytes]);
    }
}

/// Fill a rectangle with one colour.
fn fill_rect(dst: &mut [u8], dst_w: u32, x: usize, y: usize, w: usize, h: usize, color: [u8; 3]) {
    let dst_w = dst_w as usize;
    for row in y..y + h {
        for col in x..x + w {
            let i = (row * dst_w + col) * 3;
            dst[i..i + 3].copy_from_slice(&color);
        }
    }
}

/// Draw a rectangle outline of the given thickness, inside the rect bounds.
fn outline_rect(
    dst: &mut [u8],
    dst_w: u32,
    x: usize,
    y: usize,
    w: usize,
    h: usize,
    thickness: usize,
    color: [u8; 3],
) {
    fill_rect(dst, dst_w, x, y, w, thickness, color);
    fill_rect(dst, dst_w, x, y + h - thickness, w, thickness, color);
    fill_rect(dst, dst_w, x, y, thickness, h, color);
    fill_rect(dst, dst_w, x + w - thickness, y, thickness, h, color);
}
