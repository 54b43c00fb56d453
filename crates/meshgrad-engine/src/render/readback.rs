//! Texture → CPU copy.

use std::sync::mpsc;

use crate::coords::PixelSize;

use super::{RenderCtx, RenderError};

/// Row pitch wgpu requires for texture-to-buffer copies.
pub(crate) fn padded_bytes_per_row(width: u32) -> u32 {
    let unpadded = width * 4;
    unpadded.div_ceil(wgpu::COPY_BYTES_PER_ROW_ALIGNMENT) * wgpu::COPY_BYTES_PER_ROW_ALIGNMENT
}

/// Copies an RGBA8 texture into a tightly packed buffer, rows in the
/// texture's own order.
///
/// Blocks until the GPU has finished the copy.
pub(crate) fn read_rgba8(
    ctx: &RenderCtx<'_>,
    texture: &wgpu::Texture,
    size: PixelSize,
) -> Result<Vec<u8>, RenderError> {
    let padded_row = padded_bytes_per_row(size.width);
    let tight_row = (size.width * 4) as usize;

    let staging = ctx.device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("meshgrad readback staging"),
        size: padded_row as u64 * size.height as u64,
        usage: wgpu::BufferUsages::MAP_READ | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });

    let mut encoder = ctx.device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
        label: Some("meshgrad readback encoder"),
    });
    encoder.copy_texture_to_buffer(
        wgpu::TexelCopyTextureInfo {
            texture,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        wgpu::TexelCopyBufferInfo {
            buffer: &staging,
            layout: wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(padded_row),
                rows_per_image: Some(size.height),
            },
        },
        wgpu::Extent3d {
            width: size.width,
            height: size.height,
            depth_or_array_layers: 1,
        },
    );
    ctx.queue.submit(std::iter::once(encoder.finish()));

    let slice = staging.slice(..);
    let (tx, rx) = mpsc::channel();
    slice.map_async(wgpu::MapMode::Read, move |result| {
        let _ = tx.send(result);
    });
    ctx.device
        .poll(wgpu::PollType::wait_indefinitely())
        .map_err(|err| RenderError::Readback(format!("device poll failed: {err}")))?;

    match rx.recv() {
        Ok(Ok(())) => {}
        Ok(Err(err)) => return Err(RenderError::Readback(format!("buffer map failed: {err}"))),
        Err(_) => return Err(RenderError::Readback("map callback never ran".into())),
    }

    let mut pixels = Vec::with_capacity(size.rgba_len());
    {
        let mapped = slice.get_mapped_range();
        for row in mapped.chunks_exact(padded_row as usize) {
            pixels.extend_from_slice(&row[..tight_row]);
        }
    }
    staging.unmap();
    staging.destroy();

    Ok(pixels)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_pad_to_256_bytes() {
        assert_eq!(padded_bytes_per_row(1), 256);
        assert_eq!(padded_bytes_per_row(64), 256);
        assert_eq!(padded_bytes_per_row(65), 512);
    }
}
