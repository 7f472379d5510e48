use std::cell::{Cell, RefCell};
use std::rc::Rc;

use leptos::prelude::*;
use leptos::task::spawn_local;
use log::{debug, error, info, warn};
use wasm_bindgen::prelude::*;
use web_sys::{Event, HtmlCanvasElement, MouseEvent, WheelEvent, Window};

use super::canvas::CanvasSurface;
use super::controller::{InteractionState, ViewOption};
use super::encoding::Palette;
use super::engine::{self, Engine, EngineStatus};
use super::export;
use super::layout::{COOLDOWN_SECS, FRAME_DT, LayoutState};
use super::model::GraphModel;
use super::render::RenderSurface;
use super::types::GraphData;

type SharedSurface = Rc<RefCell<Option<RenderSurface<CanvasSurface>>>>;
type SharedClosure = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Browser resources owned by one mounted graph. Released on unmount.
struct RenderLoop {
	surface: SharedSurface,
	animate: SharedClosure,
	resize: SharedClosure,
	frame_id: Rc<Cell<Option<i32>>>,
}

impl RenderLoop {
	fn release(&self) {
		if let Some(window) = web_sys::window() {
			if let Some(id) = self.frame_id.take() {
				let _ = window.cancel_animation_frame(id);
			}
			if let Some(ref cb) = *self.resize.borrow() {
				let _ = window
					.remove_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
		}
		self.animate.borrow_mut().take();
		self.resize.borrow_mut().take();
		self.surface.borrow_mut().take();
		debug!("affinity graph: render loop released");
	}
}

impl Drop for RenderLoop {
	fn drop(&mut self) {
		self.release();
	}
}

fn measure(
	window: &Window,
	canvas: &HtmlCanvasElement,
	fullscreen: bool,
	width: Option<f64>,
	height: Option<f64>,
) -> (f64, f64) {
	if fullscreen {
		let dim = |v: Result<JsValue, JsValue>, fallback: f64| {
			v.ok().and_then(|v| v.as_f64()).unwrap_or(fallback)
		};
		return (
			dim(window.inner_width(), 800.0),
			dim(window.inner_height(), 600.0),
		);
	}
	(
		width.unwrap_or_else(|| {
			canvas
				.parent_element()
				.map(|p| p.client_width() as f64)
				.unwrap_or(800.0)
		}),
		height.unwrap_or_else(|| {
			canvas
				.parent_element()
				.map(|p| p.client_height() as f64)
				.unwrap_or(600.0)
		}),
	)
}

fn pointer(canvas_ref: NodeRef<leptos::html::Canvas>, ev: &MouseEvent) -> Option<(f64, f64)> {
	let canvas: HtmlCanvasElement = canvas_ref.get()?.into();
	let rect = canvas.get_bounding_client_rect();
	Some((
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}

/// Force-directed affinity graph with search, zoom, view filter and export.
///
/// The snapshot is validated once at mount; a dangling edge or duplicate id
/// is returned as an error for the surrounding `ErrorBoundary`.
#[component]
pub fn AffinityGraph(
	#[prop(into)] data: Signal<GraphData>,
	#[prop(default = false)] fullscreen: bool,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
	#[prop(default = Palette::default())] palette: Palette,
	#[prop(default = COOLDOWN_SECS)] cooldown: f32,
) -> impl IntoView {
	let model = match GraphModel::new(data.get_untracked()) {
		Ok(model) => Rc::new(model),
		Err(err) => {
			error!("affinity graph: rejected snapshot: {}", err);
			return Err(err);
		}
	};
	info!(
		"affinity graph: mounted with {} nodes, {} edges",
		model.node_count(),
		model.edge_count()
	);

	let palette = Rc::new(palette);
	let interaction = RwSignal::new(InteractionState::default());
	let engine_status = RwSignal::new(EngineStatus::Unloaded);
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();

	let render_loop = RenderLoop {
		surface: Rc::new(RefCell::new(None)),
		animate: Rc::new(RefCell::new(None)),
		resize: Rc::new(RefCell::new(None)),
		frame_id: Rc::new(Cell::new(None)),
	};
	let (surface, animate, resize_cb, frame_id) = (
		render_loop.surface.clone(),
		render_loop.animate.clone(),
		render_loop.resize.clone(),
		render_loop.frame_id.clone(),
	);
	let handle = StoredValue::new_local(render_loop);
	on_cleanup(move || handle.dispose());

	// Animation frame: physics until cooldown, then stop scheduling.
	{
		let (surface, animate_inner, frame_id, palette) =
			(surface.clone(), animate.clone(), frame_id.clone(), palette.clone());
		*animate.borrow_mut() = Some(Closure::new(move || {
			frame_id.set(None);
			let state = interaction.get_untracked();
			let keep_going = match *surface.borrow_mut() {
				Some(ref mut s) => s.step(FRAME_DT, &state, &palette),
				None => return,
			};
			if !keep_going {
				debug!("affinity graph: layout settled");
				return;
			}
			if let (Some(window), Some(cb)) = (web_sys::window(), animate_inner.borrow().as_ref()) {
				frame_id.set(window.request_animation_frame(cb.as_ref().unchecked_ref()).ok());
			}
		}));
	}

	let schedule_frame = {
		let (animate, frame_id) = (animate.clone(), frame_id.clone());
		move || {
			if frame_id.get().is_some() {
				return;
			}
			if let (Some(window), Some(cb)) = (web_sys::window(), animate.borrow().as_ref()) {
				frame_id.set(window.request_animation_frame(cb.as_ref().unchecked_ref()).ok());
			}
		}
	};

	// Mount: size the canvas, seed the layout and load the engine once.
	{
		let (surface, model, schedule_frame, palette) =
			(surface.clone(), model.clone(), schedule_frame.clone(), palette.clone());
		Effect::new(move |mounted: Option<bool>| {
			if mounted == Some(true) {
				return true;
			}
			let Some(canvas) = canvas_ref.get() else {
				return false;
			};
			let canvas: HtmlCanvasElement = canvas.into();
			let Some(window) = web_sys::window() else {
				return false;
			};

			let (w, h) = measure(&window, &canvas, fullscreen, width, height);
			canvas.set_width(w as u32);
			canvas.set_height(h as u32);
			*surface.borrow_mut() = Some(RenderSurface::new(LayoutState::new(&model, w, h, cooldown)));

			let (surface_resize, canvas_resize, palette_resize) =
				(surface.clone(), canvas.clone(), palette.clone());
			*resize_cb.borrow_mut() = Some(Closure::new(move || {
				let Some(win) = web_sys::window() else {
					return;
				};
				let (nw, nh) = measure(&win, &canvas_resize, fullscreen, width, height);
				canvas_resize.set_width(nw as u32);
				canvas_resize.set_height(nh as u32);
				if let Some(ref mut s) = *surface_resize.borrow_mut() {
					s.layout.resize(nw, nh);
					s.draw(&interaction.get_untracked(), &palette_resize);
				}
			}));
			if let Some(ref cb) = *resize_cb.borrow() {
				let _ = window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}

			let (surface_load, schedule_frame) = (surface.clone(), schedule_frame.clone());
			spawn_local(async move {
				let loaded = engine::load(canvas).await;
				let mut guard = surface_load.borrow_mut();
				// Unmounted while loading.
				let Some(s) = guard.as_mut() else {
					return;
				};
				match loaded {
					Ok(canvas_surface) => {
						s.attach(canvas_surface);
						info!("affinity graph: rendering engine loaded");
					}
					Err(err) => s.fail(&err),
				}
				let status = s.status();
				drop(guard);
				engine_status.set(status);
				if status.is_loaded() {
					schedule_frame();
				}
			});
			true
		});
	}

	// Redraw whenever interaction state or engine status changes.
	{
		let (surface, palette) = (surface.clone(), palette.clone());
		Effect::new(move |_| {
			let state = interaction.get();
			if !engine_status.get().is_loaded() {
				return;
			}
			if let Some(ref mut s) = *surface.borrow_mut() {
				s.draw(&state, &palette);
			}
		});
	}

	let with_layout = {
		let (surface, palette) = (surface.clone(), palette.clone());
		move |f: &dyn Fn(&mut LayoutState) -> bool| {
			if let Some(ref mut s) = *surface.borrow_mut() {
				if f(&mut s.layout) {
					s.draw(&interaction.get_untracked(), &palette);
				}
			}
		}
	};

	let on_mousedown = {
		let with_layout = with_layout.clone();
		move |ev: MouseEvent| {
			if let Some((x, y)) = pointer(canvas_ref, &ev) {
				with_layout(&|layout| {
					layout.pointer_down(x, y);
					false
				});
			}
		}
	};

	let on_mousemove = {
		let with_layout = with_layout.clone();
		move |ev: MouseEvent| {
			if let Some((x, y)) = pointer(canvas_ref, &ev) {
				with_layout(&|layout| layout.pointer_move(x, y));
			}
		}
	};

	let on_mouseup = {
		let with_layout = with_layout.clone();
		move |_: MouseEvent| {
			with_layout(&|layout| {
				layout.pointer_up();
				false
			})
		}
	};
	let on_mouseleave = on_mouseup.clone();

	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		if ev.delta_y() > 0.0 {
			interaction.update(|s| s.zoom_out());
		} else {
			interaction.update(|s| s.zoom_in());
		}
	};

	let on_search = move |ev: Event| interaction.update(|s| s.set_search(event_target_value(&ev)));
	let on_view = move |ev: Event| {
		let mut next = interaction.get_untracked();
		match next.select_view(&event_target_value(&ev)) {
			Ok(_) => interaction.set(next),
			Err(err) => warn!("affinity graph: {}", err),
		}
	};

	let export_model = model.clone();
	let on_export = move |_: MouseEvent| {
		if let Err(err) = export::download(&export_model) {
			error!("affinity graph: {}", err);
			wasm_bindgen::throw_str(&err.to_string());
		}
	};

	let summary = format!("{} nodos · {} conexiones", model.node_count(), model.edge_count());

	Ok(view! {
		<div class="affinity-graph">
			<div class="graph-toolbar">
				<input
					id="search-graph"
					type="search"
					placeholder="Buscar nodo..."
					prop:value=move || interaction.with(|s| s.search_query.clone())
					on:input=on_search
				/>
				<select
					id="view-select"
					prop:value=move || interaction.with(|s| s.selected_view.label())
					on:change=on_view
				>
					{ViewOption::ALL
						.into_iter()
						.map(|option| view! { <option value=option.label()>{option.label()}</option> })
						.collect_view()}
				</select>
				<button class="icon-button" title="Acercar" on:click=move |_| interaction.update(|s| s.zoom_in())>
					"+"
				</button>
				<button class="icon-button" title="Alejar" on:click=move |_| interaction.update(|s| s.zoom_out())>
					"−"
				</button>
				<button class="icon-button" title="Restablecer" on:click=move |_| interaction.update(|s| s.reset())>
					"⟲"
				</button>
				<button class="icon-button" title="Exportar" on:click=on_export>
					"⤓"
				</button>
				<button class="icon-button" title="Configuración" disabled=true>
					"⚙"
				</button>
			</div>
			<div class="graph-stage">
				<canvas
					node_ref=canvas_ref
					class="affinity-graph-canvas"
					on:mousedown=on_mousedown
					on:mousemove=on_mousemove
					on:mouseup=on_mouseup
					on:mouseleave=on_mouseleave
					on:wheel=on_wheel
					style="display: block; cursor: grab;"
				/>
				<Show when=move || !engine_status.get().is_loaded()>
					<div class="graph-placeholder">
						{move || match engine_status.get() {
							Engine::Failed => "No se pudo cargar la visualización",
							_ => "Cargando grafo...",
						}}
					</div>
				</Show>
			</div>
			<p class="graph-summary">{summary}</p>
		</div>
	})
}
