use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::render::{DrawCommand, Surface};

/// Paints draw commands onto a browser 2D canvas context.
pub struct CanvasSurface {
	ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
	pub fn new(ctx: CanvasRenderingContext2d) -> Self {
		Self { ctx }
	}
}

impl Surface for CanvasSurface {
	fn paint(&mut self, commands: &[DrawCommand]) {
		let ctx = &self.ctx;
		for command in commands {
			match command {
				DrawCommand::Clear {
					width,
					height,
					color,
				} => {
					ctx.set_fill_style_str(color);
					ctx.fill_rect(0.0, 0.0, *width, *height);
				}
				DrawCommand::Transform { x, y, k } => {
					ctx.save();
					let _ = ctx.translate(*x, *y);
					let _ = ctx.scale(*k, *k);
				}
				DrawCommand::Restore => ctx.restore(),
				DrawCommand::Line {
					from,
					to,
					width,
					color,
				} => {
					ctx.set_stroke_style_str(color);
					ctx.set_line_width(*width);
					ctx.begin_path();
					ctx.move_to(from.0, from.1);
					ctx.line_to(to.0, to.1);
					ctx.stroke();
				}
				DrawCommand::Circle {
					x,
					y,
					radius,
					fill,
					stroke,
				} => {
					ctx.begin_path();
					let _ = ctx.arc(*x, *y, *radius, 0.0, 2.0 * PI);
					ctx.set_fill_style_str(fill);
					ctx.fill();
					if let Some(stroke) = stroke {
						ctx.set_stroke_style_str(&stroke.color);
						ctx.set_line_width(stroke.width);
						ctx.stroke();
					}
				}
				DrawCommand::Rect {
					x,
					y,
					width,
					height,
					fill,
				} => {
					ctx.set_fill_style_str(fill);
					ctx.fill_rect(*x, *y, *width, *height);
				}
				DrawCommand::Text {
					x,
					y,
					text,
					size,
					color,
				} => {
					ctx.set_fill_style_str(color);
					ctx.set_font(&format!("{}px sans-serif", size));
					ctx.set_text_align("center");
					ctx.set_text_baseline("middle");
					let _ = ctx.fill_text(text, *x, *y);
				}
			}
		}
	}
}
