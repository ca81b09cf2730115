use std::{
    path::{Path, PathBuf},
    process::{Child, ChildStdin, Command, Stdio},
};

use crate::{
    encode::sink::{FrameSink, SinkConfig},
    foundation::{
        core::{Fps, FrameIndex},
        error::{SlidecastError, SlidecastResult},
    },
    render::frame::FrameRGBA,
};

#[derive(Clone, Debug)]
pub struct EncodeConfig {
    pub width: u32,
    pub height: u32,
    pub fps: Fps,
    pub out_path: PathBuf,
    pub overwrite: bool,
}

impl EncodeConfig {
    pub fn validate(&self) -> SlidecastResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(SlidecastError::configuration(
                "encode width/height must be non-zero",
            ));
        }
        if self.fps.num == 0 || self.fps.den == 0 {
            return Err(SlidecastError::configuration(
                "encode fps must have num>0 and den>0",
            ));
        }
        Ok(())
    }
}

pub fn default_mp4_config(
    out_path: impl Into<PathBuf>,
    width: u32,
    height: u32,
    fps: Fps,
) -> EncodeConfig {
    EncodeConfig {
        width,
        height,
        fps,
        out_path: out_path.into(),
        overwrite: true,
    }
}

pub fn is_ffmpeg_on_path() -> bool {
    Command::new("ffmpeg")
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

pub fn ensure_parent_dir(path: &Path) -> SlidecastResult<()> {
    if let Some(parent) = path.parent() {
        use anyhow::Context as _;
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

/// Streams raw RGBA frames into the system `ffmpeg` binary (silent H.264 MP4).
///
/// Dropping the encoder before [`FfmpegEncoder::finish`] kills ffmpeg and removes the partial
/// output file.
pub struct FfmpegEncoder {
    cfg: EncodeConfig,
    child: Option<Child>,
    stdin: Option<ChildStdin>,
    scratch: Vec<u8>,
}

impl FfmpegEncoder {
    pub fn new(cfg: EncodeConfig) -> SlidecastResult<Self> {
        cfg.validate()?;
        ensure_parent_dir(&cfg.out_path)?;

        if !cfg.overwrite && cfg.out_path.exists() {
            return Err(SlidecastError::configuration(format!(
                "output file '{}' already exists",
                cfg.out_path.display()
            )));
        }

        if !is_ffmpeg_on_path() {
            return Err(SlidecastError::encode(
                "ffmpeg is required for MP4 encoding, but was not found on PATH",
            ));
        }

        let mut cmd = Command::new("ffmpeg");
        cmd.stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());

        if cfg.overwrite {
            cmd.arg("-y");
        } else {
            cmd.arg("-n");
        }

        // yuv420p needs even dimensions; odd canvases get one padding row/column.
        cmd.args([
            "-loglevel",
            "error",
            "-f",
            "rawvideo",
            "-pix_fmt",
            "rgba",
            "-s",
            &format!("{}x{}", cfg.width, cfg.height),
            "-r",
            &format!("{}/{}", cfg.fps.num, cfg.fps.den),
            "-i",
            "pipe:0",
            "-an",
            "-vf",
            "pad=ceil(iw/2)*2:ceil(ih/2)*2",
            "-c:v",
            "libx264",
            "-pix_fmt",
            "yuv420p",
            "-movflags",
            "+faststart",
        ])
        .arg(&cfg.out_path);

        tracing::debug!(out = %cfg.out_path.display(), "spawning ffmpeg");
        let mut child = cmd.spawn().map_err(|e| {
            SlidecastError::encode(format!(
                "failed to spawn ffmpeg (is it installed and on PATH?): {e}"
            ))
        })?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| SlidecastError::encode("failed to open ffmpeg stdin (unexpected)"))?;

        Ok(Self {
            scratch: vec![0u8; (cfg.width as usize) * (cfg.height as usize) * 4],
            cfg,
            child: Some(child),
            stdin: Some(stdin),
        })
    }

    pub fn encode_frame(&mut self, frame: &FrameRGBA) -> SlidecastResult<()> {
        if frame.width != self.cfg.width || frame.height != self.cfg.height {
            return Err(SlidecastError::configuration(format!(
                "frame size mismatch: got {}x{}, expected {}x{}",
                frame.width, frame.height, self.cfg.width, self.cfg.height
            )));
        }

        if frame.data.len() != self.scratch.len() {
            return Err(SlidecastError::configuration(
                "frame.data size mismatch with width*height*4",
            ));
        }

        flatten_to_opaque_rgba8(&mut self.scratch, &frame.data, frame.premultiplied)?;

        let Some(stdin) = self.stdin.as_mut() else {
            return Err(SlidecastError::encode(
                "ffmpeg encoder is already finalized",
            ));
        };

        use std::io::Write as _;
        stdin.write_all(&self.scratch).map_err(|e| {
            SlidecastError::encode(format!("failed to write frame to ffmpeg stdin: {e}"))
        })?;

        Ok(())
    }

    pub fn finish(mut self) -> SlidecastResult<()> {
        drop(self.stdin.take());

        let Some(child) = self.child.take() else {
            return Err(SlidecastError::encode(
                "ffmpeg encoder is already finalized",
            ));
        };
        let output = child.wait_with_output().map_err(|e| {
            SlidecastError::encode(format!("failed to wait for ffmpeg to finish: {e}"))
        })?;

        if !output.status.success() {
            let _ = std::fs::remove_file(&self.cfg.out_path);
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(SlidecastError::encode(format!(
                "ffmpeg exited with status {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        Ok(())
    }
}

impl Drop for FfmpegEncoder {
    fn drop(&mut self) {
        drop(self.stdin.take());
        if let Some(mut child) = self.child.take() {
            let _ = child.kill();
            let _ = child.wait();
            let _ = std::fs::remove_file(&self.cfg.out_path);
            tracing::warn!(
                out = %self.cfg.out_path.display(),
                "ffmpeg encoder dropped before finish; partial output removed"
            );
        }
    }
}

/// [`FrameSink`] that encodes to an MP4 file through [`FfmpegEncoder`].
pub struct FfmpegSink {
    out_path: PathBuf,
    overwrite: bool,
    encoder: Option<FfmpegEncoder>,
}

impl FfmpegSink {
    pub fn new(out_path: impl Into<PathBuf>, overwrite: bool) -> Self {
        Self {
            out_path: out_path.into(),
            overwrite,
            encoder: None,
        }
    }
}

impl FrameSink for FfmpegSink {
    fn begin(&mut self, cfg: SinkConfig) -> SlidecastResult<()> {
        let enc_cfg = EncodeConfig {
            overwrite: self.overwrite,
            ..default_mp4_config(self.out_path.clone(), cfg.width, cfg.height, cfg.fps)
        };
        self.encoder = Some(FfmpegEncoder::new(enc_cfg)?);
        Ok(())
    }

    fn push_frame(&mut self, _idx: FrameIndex, frame: &FrameRGBA) -> SlidecastResult<()> {
        let Some(enc) = self.encoder.as_mut() else {
            return Err(SlidecastError::encode("push_frame called before begin"));
        };
        enc.encode_frame(frame)
    }

    fn end(&mut self) -> SlidecastResult<()> {
        let Some(enc) = self.encoder.take() else {
            return Err(SlidecastError::encode("end called before begin"));
        };
        enc.finish()
    }
}

fn flatten_to_opaque_rgba8(dst: &mut [u8], src: &[u8], src_is_premul: bool) -> SlidecastResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(SlidecastError::configuration(
            "flatten_to_opaque_rgba8 expects equal-length rgba8 buffers",
        ));
    }

    // Flattened over black, so only the source contributes.
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let a = s[3] as u16;
        if a == 255 || src_is_premul {
            d[..3].copy_from_slice(&s[..3]);
        } else {
            d[0] = mul_div255(s[0] as u16, a);
            d[1] = mul_div255(s[1] as u16, a);
            d[2] = mul_div255(s[2] as u16, a);
        }
        d[3] = 255;
    }

    Ok(())
}

fn mul_div255(x: u16, y: u16) -> u8 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/encode/ffmpeg.rs"]
mod tests;
