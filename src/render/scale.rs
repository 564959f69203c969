//! Pixel-art upscaling.
//!
//! The scaler prefers an external high-quality upscaler when one is on the
//! PATH, with a bounded wait; otherwise it falls back to a deterministic
//! edge-aware doubling algorithm plus a nearest-neighbour finish for
//! non-power-of-two factors. The external tool is a capability, not a
//! dependency: unavailability and timeouts are silent.

use std::path::PathBuf;
use std::process::Command;
use std::time::{Duration, Instant};

use crate::types::Colour;

use super::png::{read_png, write_png};

/// Default external upscaler binary.
pub const DEFAULT_TOOL: &str = "xbrzscale";

/// Default bound on the external tool's runtime.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(2);

/// An external upscaler resolved from the PATH.
#[derive(Debug, Clone)]
pub struct ExternalTool {
    program: PathBuf,
    timeout: Duration,
}

impl ExternalTool {
    /// Probe for an upscaler binary. Returns `None` when the tool is not
    /// on the PATH; the caller then uses the builtin algorithm.
    pub fn probe(name: &str, timeout: Duration) -> Option<Self> {
        which::which(name)
            .ok()
            .map(|program| Self { program, timeout })
    }

    /// Run the tool on a pixel grid. Any failure (spawn error, non-zero
    /// exit, timeout, unreadable output) yields `None` so the caller can
    /// fall back.
    fn run(&self, pixels: &[Vec<Colour>], factor: u32) -> Option<Vec<Vec<Colour>>> {
        let dir = tempfile::tempdir().ok()?;
        let input = dir.path().join("in.png");
        let output = dir.path().join("out.png");
        write_png(pixels, &input).ok()?;

        let mut child = Command::new(&self.program)
            .arg(factor.to_string())
            .arg(&input)
            .arg(&output)
            .spawn()
            .ok()?;

        let deadline = Instant::now() + self.timeout;
        loop {
            match child.try_wait() {
                Ok(Some(status)) if status.success() => break,
                Ok(Some(_)) => return None,
                Ok(None) if Instant::now() >= deadline => {
                    let _ = child.kill();
                    let _ = child.wait();
                    return None;
                }
                Ok(None) => std::thread::sleep(Duration::from_millis(25)),
                Err(_) => return None,
            }
        }

        read_png(&output).ok()
    }
}

/// Integer pixel-art scaler.
#[derive(Debug, Clone, Default)]
pub struct Scaler {
    external: Option<ExternalTool>,
}

impl Scaler {
    /// A scaler that only uses the builtin algorithm.
    pub fn builtin() -> Self {
        Self { external: None }
    }

    /// A scaler that tries `tool` first and falls back to the builtin
    /// algorithm.
    pub fn with_tool(tool: ExternalTool) -> Self {
        Self {
            external: Some(tool),
        }
    }

    /// Scale a pixel grid by an integer factor.
    ///
    /// Factor 0 and 1 return the grid unchanged.
    pub fn scale(&self, pixels: &[Vec<Colour>], factor: u32) -> Vec<Vec<Colour>> {
        if factor <= 1 || pixels.is_empty() {
            return pixels.to_vec();
        }

        if let Some(tool) = &self.external {
            if let Some(scaled) = tool.run(pixels, factor) {
                return scaled;
            }
        }

        scale_builtin(pixels, factor)
    }
}

/// Builtin scaling: repeated edge-aware doubling for the largest power of
/// two within the factor, then a nearest-neighbour resize to the exact
/// target for any remainder.
pub fn scale_builtin(pixels: &[Vec<Colour>], factor: u32) -> Vec<Vec<Colour>> {
    let target_w = pixels.first().map_or(0, |r| r.len()) * factor as usize;
    let target_h = pixels.len() * factor as usize;

    let doublings = 31 - factor.leading_zeros();
    let mut scaled = pixels.to_vec();
    for _ in 0..doublings {
        scaled = scale_double(&scaled);
    }

    if factor.is_power_of_two() {
        scaled
    } else {
        resize_nearest(&scaled, target_w, target_h)
    }
}

/// Edge-aware 2× doubling.
///
/// For each source pixel P with 4-neighbours A (up), B (right), C (left)
/// and D (down), each defaulting to P at an image edge, the four output
/// sub-pixels copy a neighbour only where two adjacent neighbours agree
/// and the opposite pair disagrees, which propagates diagonal edges
/// without inventing colours:
///
/// ```text
///   top-left     = A if C==A and C!=D and A!=B else P
///   top-right    = B if A==B and A!=C and B!=D else P
///   bottom-left  = C if D==C and D!=B and C!=A else P
///   bottom-right = D if B==D and B!=A and D!=C else P
/// ```
pub fn scale_double(pixels: &[Vec<Colour>]) -> Vec<Vec<Colour>> {
    let height = pixels.len();
    let width = pixels.first().map_or(0, |r| r.len());
    let mut out = vec![vec![Colour::TRANSPARENT; width * 2]; height * 2];

    for y in 0..height {
        for x in 0..width {
            let p = pixels[y][x];
            let a = if y > 0 { pixels[y - 1][x] } else { p };
            let b = if x + 1 < width { pixels[y][x + 1] } else { p };
            let c = if x > 0 { pixels[y][x - 1] } else { p };
            let d = if y + 1 < height { pixels[y + 1][x] } else { p };

            out[y * 2][x * 2] = if c == a && c != d && a != b { a } else { p };
            out[y * 2][x * 2 + 1] = if a == b && a != c && b != d { b } else { p };
            out[y * 2 + 1][x * 2] = if d == c && d != b && c != a { c } else { p };
            out[y * 2 + 1][x * 2 + 1] = if b == d && b != a && d != c { d } else { p };
        }
    }

    out
}

/// Nearest-neighbour resize to exact target dimensions.
fn resize_nearest(pixels: &[Vec<Colour>], target_w: usize, target_h: usize) -> Vec<Vec<Colour>> {
    let height = pixels.len();
    let width = pixels.first().map_or(0, |r| r.len());
    if width == 0 || height == 0 {
        return vec![vec![Colour::TRANSPARENT; target_w]; target_h];
    }

    (0..target_h)
        .map(|y| {
            let sy = y * height / target_h;
            (0..target_w)
                .map(|x| pixels[sy][x * width / target_w])
                .collect()
        })
        .collect()
}
