//! Home page sections.
//!
//! The page is split along the regions HTMX swaps: `#ask-section` and
//! `#main-section` are each rendered by one component so a fragment
//! response is exactly that component.

mod ask;
mod main_section;
mod page;
mod tables;

pub use ask::{AnswerBlock, AskSection};
pub use main_section::MainSection;
pub use page::HomePage;
pub use tables::{AdminTable, UserTable};

use leptos::prelude::*;

use crate::auth::{AuthContext, AuthState};
use crate::home::HomeState;
use crate::ui::render;

/// The page body for a full load.
pub fn home_page(title: String, subtitle: String, state: HomeState, context: AuthContext) -> String {
    render(move || {
        view! { <HomePage title=title subtitle=subtitle state=state context=context /> }
    })
}

/// The `#ask-section` fragment.
pub fn ask_fragment(auth: AuthState, state: HomeState) -> String {
    let HomeState { question, ask, .. } = state;
    render(move || view! { <AskSection auth=auth question=question status=ask /> })
}

/// The `#main-section` fragment.
pub fn main_fragment(context: AuthContext, state: HomeState) -> String {
    let HomeState {
        view: section,
        users,
        admin_notice,
        ..
    } = state;
    render(move || {
        view! { <MainSection section=section context=context users=users notice=admin_notice /> }
    })
}
