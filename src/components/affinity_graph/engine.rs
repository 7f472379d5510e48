use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::canvas::CanvasSurface;
use super::error::GraphError;

/// Load state of the rendering engine. Only `Loaded` carries a surface, so
/// the draw path cannot reach a canvas that isn't there.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Engine<S> {
	Unloaded,
	Loaded(S),
	Failed,
}

/// Engine state with the surface erased, for signals and the view.
pub type EngineStatus = Engine<()>;

impl<S> Engine<S> {
	pub fn status(&self) -> EngineStatus {
		match self {
			Engine::Unloaded => Engine::Unloaded,
			Engine::Loaded(_) => Engine::Loaded(()),
			Engine::Failed => Engine::Failed,
		}
	}

	pub fn is_loaded(&self) -> bool {
		matches!(self, Engine::Loaded(_))
	}
}

/// Waits for the canvas to be laid out, then acquires its 2D context.
pub async fn load(canvas: HtmlCanvasElement) -> Result<CanvasSurface, GraphError> {
	next_frame().await?;
	let ctx: CanvasRenderingContext2d = canvas
		.get_context("2d")
		.map_err(js_error)?
		.ok_or_else(|| GraphError::EngineLoad("canvas has no 2d context".into()))?
		.dyn_into()
		.map_err(|_| GraphError::EngineLoad("context is not a CanvasRenderingContext2d".into()))?;
	Ok(CanvasSurface::new(ctx))
}

async fn next_frame() -> Result<(), GraphError> {
	let window = web_sys::window().ok_or_else(|| GraphError::EngineLoad("no window".into()))?;
	let mut scheduled = Ok(0);
	let promise = js_sys::Promise::new(&mut |resolve, _reject| {
		scheduled = window.request_animation_frame(&resolve);
	});
	scheduled.map_err(js_error)?;
	JsFuture::from(promise).await.map_err(js_error)?;
	Ok(())
}

fn js_error(value: JsValue) -> GraphError {
	GraphError::EngineLoad(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn status_erases_surface() {
		let loaded: Engine<String> = Engine::Loaded("ctx".into());
		assert_eq!(loaded.status(), Engine::Loaded(()));
		assert!(loaded.is_loaded());
		assert_eq!(Engine::<String>::Unloaded.status(), Engine::Unloaded);
		assert!(!Engine::<String>::Failed.is_loaded());
	}
}
