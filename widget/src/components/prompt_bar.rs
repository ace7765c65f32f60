//! Transient choice buttons: intents, agent handoff, feedback.

use conversation::copy::{HANDOFF_NO, HANDOFF_YES};
use conversation::{Intent, Msg, Prompt};
use leptos::prelude::*;

use crate::runtime::Controller;

#[component]
pub fn PromptBar() -> impl IntoView {
    let controller = expect_context::<Controller>();
    let prompt = controller.prompt();
    let loading = controller.loading();

    view! {
        {move || {
            let buttons = match prompt.get()? {
                Prompt::Intents => {
                    Intent::ALL
                        .into_iter()
                        .map(|intent| {
                            view! {
                                <button
                                    class="option-button"
                                    disabled=move || loading.get()
                                    on:click=move |_| controller.dispatch(Msg::IntentChosen(intent))
                                >
                                    {intent.label()}
                                </button>
                            }
                        })
                        .collect_view()
                        .into_any()
                }
                Prompt::AgentHandoff => {
                    view! {
                        <button
                            class="option-button option-button--primary"
                            disabled=move || loading.get()
                            on:click=move |_| controller.dispatch(Msg::HandoffChosen(true))
                        >
                            {HANDOFF_YES}
                        </button>
                        <button
                            class="option-button"
                            disabled=move || loading.get()
                            on:click=move |_| controller.dispatch(Msg::HandoffChosen(false))
                        >
                            {HANDOFF_NO}
                        </button>
                    }
                        .into_any()
                }
                Prompt::Feedback => {
                    view! {
                        <button
                            class="feedback-button"
                            title="Helpful"
                            disabled=move || loading.get()
                            on:click=move |_| controller.dispatch(Msg::FeedbackGiven(true))
                        >
                            "👍"
                        </button>
                        <button
                            class="feedback-button"
                            title="Not helpful"
                            disabled=move || loading.get()
                            on:click=move |_| controller.dispatch(Msg::FeedbackGiven(false))
                        >
                            "👎"
                        </button>
                    }
                        .into_any()
                }
            };
            Some(view! { <div class="options-container">{buttons}</div> })
        }}
    }
}
