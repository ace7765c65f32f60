use leptos::prelude::*;

/// Typing indicator shown while a request is in flight.
#[component]
pub fn Loader() -> impl IntoView {
    view! {
        <div class="loader" aria-label="Assistant is typing">
            <span class="loader__dot"></span>
            <span class="loader__dot"></span>
            <span class="loader__dot"></span>
        </div>
    }
}
