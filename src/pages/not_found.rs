use leptos::prelude::*;

/// 404 - Not Found
#[component]
pub fn NotFound() -> impl IntoView {
	view! { <h1>"Página no encontrada"</h1> }
}
