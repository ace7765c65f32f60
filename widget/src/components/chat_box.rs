//! Scrolling message list with the active prompt and loader.

use leptos::prelude::*;

use crate::components::loader::Loader;
use crate::components::message_bubble::MessageBubble;
use crate::components::prompt_bar::PromptBar;
use crate::runtime::Controller;

#[component]
pub fn ChatBox() -> impl IntoView {
    let controller = expect_context::<Controller>();
    let entries = controller.entries();
    let loading = controller.loading();
    let scroll_key = controller.scroll_key();
    let messages_ref = NodeRef::<leptos::html::Div>::new();

    // Stick to the bottom whenever the list, prompt or loader changes.
    Effect::new(move || {
        scroll_key.track();

        #[cfg(feature = "csr")]
        {
            if let Some(el) = messages_ref.get() {
                el.set_scroll_top(el.scroll_height());
            }
        }
    });

    view! {
        <div class="chat-box" node_ref=messages_ref>
            {move || {
                entries
                    .get()
                    .into_iter()
                    .map(|entry| view! { <MessageBubble entry=entry/> })
                    .collect_view()
            }}
            <PromptBar/>
            {move || loading.get().then(|| view! { <Loader/> })}
        </div>
    }
}
