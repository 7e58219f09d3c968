//! "Ask AI about users" section and the answer block.

use leptos::prelude::*;

use crate::auth::AuthState;
use crate::backend::AskResult;
use crate::home::AskStatus;
use crate::ui::components::{
    Button, ButtonVariant, Card, CardContent, CardHeader, LoaderIcon, SparklesIcon,
};

/// The ask section, swapped as a whole by `/ask` and `/fragments/ask`.
#[component]
pub fn AskSection(
    /// Auth state gating the form.
    auth: AuthState,
    /// Text to prefill the question input with.
    question: String,
    /// Where the last ask stands.
    status: AskStatus,
) -> impl IntoView {
    let gate = match auth {
        AuthState::Loading => view! {
            <div
                class="flex items-center gap-2 text-textMuted"
                hx-get="/fragments/ask"
                hx-trigger="load"
                hx-target="#ask-section"
                hx-swap="outerHTML"
            >
                <LoaderIcon />
                "Checking login..."
            </div>
        }
        .into_any(),
        AuthState::SignedIn(_) => view! {
            <AskForm question=question pending={status.is_pending()} />
        }
        .into_any(),
        AuthState::Anonymous => view! {
            <div class="text-textMuted">"Please login to use the AI feature"</div>
        }
        .into_any(),
    };

    let outcome = match status {
        AskStatus::Failed(message) => view! {
            <div role="alert" class="ask-error text-danger">{message}</div>
        }
        .into_any(),
        AskStatus::Answered(result) => view! { <AnswerBlock result=result /> }.into_any(),
        AskStatus::Idle | AskStatus::Pending => ().into_any(),
    };

    view! {
        <section id="ask-section" class="w-full max-w-2xl mx-auto space-y-3">
            <div class="flex items-center gap-2 text-lg font-semibold">
                <SparklesIcon class="text-primary" />
                "Ask AI about users"
            </div>
            {gate}
            {outcome}
        </section>
    }
}

/// Question form. HTMX disables the submit button while the post is in
/// flight; a pending ask rendered from session state disables it too.
#[component]
fn AskForm(question: String, pending: bool) -> impl IntoView {
    let label = if pending { "Asking..." } else { "Ask" };

    view! {
        <form
            class="flex gap-2"
            hx-post="/ask"
            hx-target="#ask-section"
            hx-swap="outerHTML"
            hx-disabled-elt="find button"
        >
            <input
                name="question"
                value=question
                placeholder="e.g. Who are admins?"
                autocomplete="off"
                class="flex-1 h-10 px-4 rounded-xl border border-panelBorder bg-background \
                       focus:outline-none focus:ring-2 focus:ring-primary"
            />
            <Button variant=ButtonVariant::Primary button_type="submit" disabled=pending>
                {label}
            </Button>
        </form>
    }
}

/// Answer text plus one entry per source record.
#[component]
pub fn AnswerBlock(
    /// The backend's answer.
    result: AskResult,
) -> impl IntoView {
    let AskResult { answer, sources } = result;
    let answer = if answer.is_empty() {
        "(no answer)".to_string()
    } else {
        answer
    };

    let sources = if sources.is_empty() {
        view! { <div class="text-textMuted">"No sources found."</div> }.into_any()
    } else {
        view! {
            <ul class="ask-sources list-disc pl-6">
                {sources
                    .into_iter()
                    .map(|source| {
                        let line = format!(
                            "{} ({}) - {}",
                            source.username,
                            source.role,
                            source.email
                        );
                        let id = source.id;
                        view! { <li data-id=id>{line}</li> }
                    })
                    .collect_view()}
            </ul>
        }
        .into_any()
    };

    view! {
        <Card class="answer-block">
            <CardHeader class="pb-2">
                <div class="font-semibold">"Answer"</div>
            </CardHeader>
            <CardContent class="space-y-2">
                <div class="whitespace-pre-wrap">{answer}</div>
                <div class="font-semibold">"Sources"</div>
                {sources}
            </CardContent>
        </Card>
    }
}
