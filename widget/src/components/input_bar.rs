//! Message composer.
//!
//! Enter submits, Shift+Enter inserts a newline, and the textarea grows with
//! its content up to a fixed height. Input is disabled while a request is
//! awaited.

use conversation::{Msg, Session};
use leptos::prelude::*;

use crate::runtime::Controller;

#[cfg(feature = "csr")]
const MAX_INPUT_HEIGHT_PX: i32 = 120;

#[component]
pub fn InputBar() -> impl IntoView {
    let controller = expect_context::<Controller>();
    let session = controller.session();

    let input = RwSignal::new(String::new());
    let input_ref = NodeRef::<leptos::html::Textarea>::new();

    let loading = controller.loading();
    let accepts_input = move || !loading.get();
    let placeholder = move || session.with(|s| s.stage().input_hint());
    let can_send = move || accepts_input() && !input.get().trim().is_empty();

    Effect::new(move || {
        let _ = input.get();
        #[cfg(feature = "csr")]
        {
            if let Some(el) = input_ref.get() {
                let style = el.style();
                let _ = style.set_property("height", "auto");
                let height = el.scroll_height().min(MAX_INPUT_HEIGHT_PX);
                let _ = style.set_property("height", &format!("{height}px"));
            }
        }
    });

    // Hand focus back once the reply lands.
    Effect::new(move || {
        if accepts_input() {
            #[cfg(feature = "csr")]
            {
                if let Some(el) = input_ref.get() {
                    let _ = el.focus();
                }
            }
        }
    });

    let do_send = move || {
        let text = input.get_untracked();
        if text.trim().is_empty() || !session.with_untracked(Session::accepts_input) {
            return;
        }
        input.set(String::new());
        controller.dispatch(Msg::Submit(text));
    };

    let on_keydown = move |ev: leptos::ev::KeyboardEvent| {
        if ev.key() == "Enter" && !ev.shift_key() {
            ev.prevent_default();
            do_send();
        }
    };

    view! {
        <div class="input-bar">
            <textarea
                class="input-bar__input"
                rows="1"
                node_ref=input_ref
                placeholder=placeholder
                disabled=move || !accepts_input()
                prop:value=move || input.get()
                on:input=move |ev| input.set(event_target_value(&ev))
                on:keydown=on_keydown
            ></textarea>
            <button class="input-bar__send" on:click=move |_| do_send() disabled=move || !can_send()>
                "Send"
            </button>
        </div>
    }
}
