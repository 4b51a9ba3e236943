//! Framebuffer and 2D drawing primitives
//! DDA lines and scanline triangle fill

use super::math::Vec2;
use super::types::{Color, Texture};

/// Receives a finished frame. Called once per frame with the whole buffer;
/// `stride` is the row pitch in bytes (`width * 4`).
pub trait PixelSink {
    fn present(&mut self, pixels: &[u32], stride: usize);
}

/// Framebuffer for software rendering
pub struct Framebuffer {
    /// Packed ARGB, one per pixel, addressed as `y * width + x`
    pub pixels: Vec<u32>,
    pub width: usize,
    pub height: usize,
}

impl Framebuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            pixels: vec![Color::BLACK.to_argb(); width * height],
            width,
            height,
        }
    }

    /// Row pitch in bytes
    pub fn stride(&self) -> usize {
        self.width * 4
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        (x < self.width && y < self.height).then(|| y * self.width + x)
    }

    pub fn clear(&mut self, color: Color) {
        self.pixels.fill(color.to_argb());
    }

    /// Writes outside the buffer are dropped
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Color) {
        if let Some(idx) = self.index(x, y) {
            self.pixels[idx] = color.to_argb();
        }
    }

    pub fn get_pixel(&self, x: i32, y: i32) -> Option<Color> {
        self.index(x, y).map(|idx| Color::from_argb(self.pixels[idx]))
    }

    /// Draw a line from (x0, y0) to (x1, y1) with a DDA.
    ///
    /// Steps along the dominant axis, so there are no gaps; both endpoints
    /// are written.
    pub fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Color) {
        let dx = x1 - x0;
        let dy = y1 - y0;
        let steps = dx.abs().max(dy.abs());

        if steps == 0 {
            self.set_pixel(x0, y0, color);
            return;
        }

        let x_inc = dx as f32 / steps as f32;
        let y_inc = dy as f32 / steps as f32;
        let mut x = x0 as f32;
        let mut y = y0 as f32;

        for _ in 0..=steps {
            self.set_pixel(x.round() as i32, y.round() as i32, color);
            x += x_inc;
            y += y_inc;
        }
    }

    /// Triangle outline
    pub fn draw_triangle(&mut self, p0: Vec2, p1: Vec2, p2: Vec2, color: Color) {
        let [a, b, c] = [p0, p1, p2].map(to_pixel);
        self.draw_line(a.0, a.1, b.0, b.1, color);
        self.draw_line(b.0, b.1, c.0, c.1, color);
        self.draw_line(c.0, c.1, a.0, a.1, color);
    }

    /// Filled triangle via flat-bottom / flat-top decomposition.
    ///
    /// Points are rounded to pixel centers, sorted by y and split at the
    /// middle vertex. Halves with no vertical extent are skipped, so no
    /// slope ever divides by zero.
    pub fn draw_filled_triangle(&mut self, p0: Vec2, p1: Vec2, p2: Vec2, color: Color) {
        let mut pts = [p0, p1, p2].map(to_pixel);
        pts.sort_by_key(|p| p.1);
        let [(x0, y0), (x1, y1), (x2, y2)] = pts;

        if y0 == y2 {
            // Zero height: a single span
            let left = x0.min(x1).min(x2);
            let right = x0.max(x1).max(x2);
            self.fill_span(y0, left as f32, right as f32, color);
        } else if y1 == y2 {
            self.fill_flat_bottom((x0, y0), x1, x2, y1, color);
        } else if y0 == y1 {
            self.fill_flat_top(x0, x1, y0, (x2, y2), color);
        } else {
            // Point on the long edge at the middle vertex's height
            let mx = x0 as f32 + (x2 - x0) as f32 * (y1 - y0) as f32 / (y2 - y0) as f32;
            let mx = mx.round() as i32;
            self.fill_flat_bottom((x0, y0), x1, mx, y1, color);
            self.fill_flat_top(x1, mx, y1, (x2, y2), color);
        }
    }

    /// Apex on top, horizontal edge `xa..xb` at row `y_base` (> apex y)
    fn fill_flat_bottom(&mut self, top: (i32, i32), xa: i32, xb: i32, y_base: i32, color: Color) {
        let (x0, y0) = top;
        let height = (y_base - y0) as f32;
        let slope_a = (xa - x0) as f32 / height;
        let slope_b = (xb - x0) as f32 / height;

        for y in y0.max(0)..=y_base.min(self.height as i32 - 1) {
            let t = (y - y0) as f32;
            self.fill_span(y, x0 as f32 + slope_a * t, x0 as f32 + slope_b * t, color);
        }
    }

    /// Horizontal edge `xa..xb` at row `y_top`, apex below
    fn fill_flat_top(&mut self, xa: i32, xb: i32, y_top: i32, bottom: (i32, i32), color: Color) {
        let (x2, y2) = bottom;
        let height = (y2 - y_top) as f32;
        let slope_a = (xa - x2) as f32 / height;
        let slope_b = (xb - x2) as f32 / height;

        for y in y_top.max(0)..=y2.min(self.height as i32 - 1) {
            let t = (y2 - y) as f32;
            self.fill_span(y, x2 as f32 + slope_a * t, x2 as f32 + slope_b * t, color);
        }
    }

    /// Inclusive horizontal span, clipped to the buffer
    fn fill_span(&mut self, y: i32, xa: f32, xb: f32, color: Color) {
        if y < 0 || y as usize >= self.height || self.width == 0 {
            return;
        }
        let left = xa.min(xb).round() as i64;
        let right = xa.max(xb).round() as i64;
        if right < 0 || left >= self.width as i64 {
            return;
        }
        let left = left.max(0) as usize;
        let right = right.min(self.width as i64 - 1) as usize;
        let row = y as usize * self.width;
        self.pixels[row + left..=row + right].fill(color.to_argb());
    }

    /// Filled rectangle with its top-left corner at (x, y)
    pub fn draw_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: Color) {
        for row in y..y.saturating_add(h) {
            for col in x..x.saturating_add(w) {
                self.set_pixel(col, row, color);
            }
        }
    }

    /// Dot grid: one pixel at every multiple of `spacing` on both axes
    pub fn draw_grid(&mut self, spacing: usize, color: Color) {
        if spacing == 0 {
            return;
        }
        let argb = color.to_argb();
        for y in (0..self.height).step_by(spacing) {
            for x in (0..self.width).step_by(spacing) {
                self.pixels[y * self.width + x] = argb;
            }
        }
    }

    /// Copy a texture with its top-left corner at (x, y), clipped
    pub fn blit(&mut self, x: i32, y: i32, texture: &Texture) {
        for ty in 0..texture.height {
            for tx in 0..texture.width {
                let argb = texture.pixels[ty * texture.width + tx];
                if let Some(idx) = self.index(x + tx as i32, y + ty as i32) {
                    self.pixels[idx] = argb;
                }
            }
        }
    }

    /// Hand the full frame to a sink
    pub fn present<S: PixelSink + ?Sized>(&self, sink: &mut S) {
        sink.present(&self.pixels, self.stride());
    }
}

/// Convert packed ARGB pixels to RGBA8 bytes (for GPU texture upload)
pub fn argb_to_rgba8(pixels: &[u32], out: &mut Vec<u8>) {
    out.clear();
    out.reserve(pixels.len() * 4);
    for &argb in pixels {
        out.extend_from_slice(&Color::from_argb(argb).to_bytes());
    }
}

/// Projected points very close to the camera plane land far off screen;
/// clamping keeps edge deltas well inside i32.
const COORD_LIMIT: f32 = (1 << 20) as f32;

fn to_pixel(p: Vec2) -> (i32, i32) {
    let clamp = |v: f32| v.clamp(-COORD_LIMIT, COORD_LIMIT).round() as i32;
    (clamp(p.x), clamp(p.y))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit(fb: &Framebuffer) -> Vec<(usize, usize)> {
        let bg = Color::BLACK.to_argb();
        (0..fb.height)
            .flat_map(|y| (0..fb.width).map(move |x| (x, y)))
            .filter(|&(x, y)| fb.pixels[y * fb.width + x] != bg)
            .collect()
    }

    #[test]
    fn pixel_addressing() {
        let mut fb = Framebuffer::new(4, 3);
        fb.set_pixel(2, 1, Color::RED);
        assert_eq!(fb.pixels[1 * 4 + 2], 0xFFFF_0000);
        assert_eq!(fb.stride(), 16);
    }

    #[test]
    fn out_of_bounds_writes_are_dropped() {
        let mut fb = Framebuffer::new(4, 4);
        fb.set_pixel(-1, 0, Color::RED);
        fb.set_pixel(0, -1, Color::RED);
        fb.set_pixel(4, 0, Color::RED);
        fb.set_pixel(0, 4, Color::RED);
        assert!(lit(&fb).is_empty());
        assert_eq!(fb.get_pixel(4, 0), None);
    }

    #[test]
    fn horizontal_line_is_inclusive() {
        let mut fb = Framebuffer::new(8, 8);
        fb.draw_line(0, 0, 4, 0, Color::WHITE);
        assert_eq!(lit(&fb), vec![(0, 0), (1, 0), (2, 0), (3, 0), (4, 0)]);
    }

    #[test]
    fn line_has_no_gaps_along_dominant_axis() {
        let mut fb = Framebuffer::new(16, 16);
        fb.draw_line(1, 2, 11, 6, Color::WHITE);
        let pixels = lit(&fb);
        assert_eq!(pixels.len(), 11);
        for x in 1..=11 {
            assert_eq!(pixels.iter().filter(|p| p.0 == x).count(), 1, "column {x}");
        }

        // Reverse direction covers the same columns
        let mut fb = Framebuffer::new(16, 16);
        fb.draw_line(11, 6, 1, 2, Color::WHITE);
        assert_eq!(lit(&fb).len(), 11);
    }

    #[test]
    fn zero_length_line_draws_start_only() {
        let mut fb = Framebuffer::new(8, 8);
        fb.draw_line(3, 3, 3, 3, Color::WHITE);
        assert_eq!(lit(&fb), vec![(3, 3)]);
    }

    #[test]
    fn line_clips_outside_viewport() {
        let mut fb = Framebuffer::new(4, 4);
        fb.draw_line(-10, 1, 10, 1, Color::WHITE);
        assert_eq!(lit(&fb).len(), 4);
    }

    #[test]
    fn filled_right_triangle() {
        let mut fb = Framebuffer::new(8, 8);
        fb.draw_filled_triangle(
            Vec2::new(0.0, 0.0),
            Vec2::new(4.0, 0.0),
            Vec2::new(0.0, 4.0),
            Color::GREEN,
        );
        let pixels = lit(&fb);
        // rows 0..=4 hold 5, 4, 3, 2, 1 pixels
        assert_eq!(pixels.len(), 15);
        for (x, y) in &pixels {
            assert!(x + y <= 4, "({x}, {y}) outside");
        }
        // strictly interior
        assert_eq!(fb.get_pixel(1, 1), Some(Color::GREEN));
        assert_eq!(fb.get_pixel(1, 2), Some(Color::GREEN));
        assert_eq!(fb.get_pixel(2, 1), Some(Color::GREEN));
    }

    #[test]
    fn filled_triangle_vertex_order_does_not_matter() {
        let pts = [Vec2::new(2.0, 1.0), Vec2::new(9.0, 5.0), Vec2::new(4.0, 10.0)];
        let mut a = Framebuffer::new(12, 12);
        a.draw_filled_triangle(pts[0], pts[1], pts[2], Color::WHITE);
        let mut b = Framebuffer::new(12, 12);
        b.draw_filled_triangle(pts[2], pts[0], pts[1], Color::WHITE);
        assert_eq!(a.pixels, b.pixels);
        // general triangle is split at the middle vertex row
        assert_eq!(a.get_pixel(9, 5), Some(Color::WHITE));
        assert_eq!(a.get_pixel(2, 1), Some(Color::WHITE));
        assert_eq!(a.get_pixel(4, 10), Some(Color::WHITE));
    }

    #[test]
    fn flat_bottom_triangle() {
        let mut fb = Framebuffer::new(8, 8);
        fb.draw_filled_triangle(
            Vec2::new(2.0, 0.0),
            Vec2::new(0.0, 2.0),
            Vec2::new(4.0, 2.0),
            Color::WHITE,
        );
        // 1 + 3 + 5
        assert_eq!(lit(&fb).len(), 9);
    }

    #[test]
    fn degenerate_triangles_do_not_divide_by_zero() {
        let mut fb = Framebuffer::new(8, 8);
        fb.draw_filled_triangle(
            Vec2::new(1.0, 3.0),
            Vec2::new(5.0, 3.0),
            Vec2::new(3.0, 3.0),
            Color::WHITE,
        );
        assert_eq!(lit(&fb), (1..=5).map(|x| (x, 3)).collect::<Vec<_>>());

        let mut fb = Framebuffer::new(8, 8);
        let p = Vec2::new(2.0, 2.0);
        fb.draw_filled_triangle(p, p, p, Color::WHITE);
        assert_eq!(lit(&fb), vec![(2, 2)]);
    }

    #[test]
    fn filled_triangle_clips() {
        let mut fb = Framebuffer::new(4, 4);
        fb.draw_filled_triangle(
            Vec2::new(-100.0, -100.0),
            Vec2::new(100.0, -100.0),
            Vec2::new(0.0, 100.0),
            Color::WHITE,
        );
        assert!(!lit(&fb).is_empty());
        assert_eq!(fb.pixels.len(), 16);
    }

    #[test]
    fn outline_draws_edges_only() {
        let mut fb = Framebuffer::new(8, 8);
        fb.draw_triangle(
            Vec2::new(0.0, 0.0),
            Vec2::new(6.0, 0.0),
            Vec2::new(0.0, 6.0),
            Color::WHITE,
        );
        assert_eq!(fb.get_pixel(3, 0), Some(Color::WHITE));
        assert_eq!(fb.get_pixel(0, 3), Some(Color::WHITE));
        assert_eq!(fb.get_pixel(3, 3), Some(Color::WHITE));
        assert_eq!(fb.get_pixel(1, 1), Some(Color::BLACK));
    }

    #[test]
    fn rect_grid_and_clear() {
        let mut fb = Framebuffer::new(10, 10);
        fb.draw_rect(8, 8, 4, 4, Color::RED);
        assert_eq!(lit(&fb).len(), 4);

        fb.clear(Color::BLACK);
        fb.draw_grid(5, Color::GRAY);
        assert_eq!(lit(&fb), vec![(0, 0), (5, 0), (0, 5), (5, 5)]);

        fb.draw_grid(0, Color::WHITE);
        fb.clear(Color::BLUE);
        assert!(fb.pixels.iter().all(|&p| p == Color::BLUE.to_argb()));
    }

    #[test]
    fn blit_clips() {
        let mut fb = Framebuffer::new(4, 4);
        let tex = Texture::new(3, 3);
        fb.blit(2, 2, &tex);
        assert_eq!(lit(&fb), vec![(2, 2), (3, 2), (2, 3), (3, 3)]);
    }

    struct Recorder {
        frames: Vec<(usize, usize)>,
    }

    impl PixelSink for Recorder {
        fn present(&mut self, pixels: &[u32], stride: usize) {
            self.frames.push((pixels.len(), stride));
        }
    }

    #[test]
    fn present_hands_over_full_buffer() {
        let fb = Framebuffer::new(6, 5);
        let mut sink = Recorder { frames: Vec::new() };
        fb.present(&mut sink);
        assert_eq!(sink.frames, vec![(30, 24)]);

        let mut bytes = Vec::new();
        argb_to_rgba8(&fb.pixels, &mut bytes);
        assert_eq!(bytes.len(), 120);
        assert_eq!(&bytes[..4], &[0, 0, 0, 255]);
    }
}
