//! The settings page.

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::html;

use crate::{
    AppState, endpoints,
    html::{CARD_STYLE, CARD_TITLE_STYLE, PAGE_CONTAINER_STYLE, base},
    navigation::NavBar,
};

#[derive(Debug, Clone)]
pub struct SettingsState {
    pub local_timezone: String,
}

impl FromRef<AppState> for SettingsState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// Display the settings page.
///
/// Settings cannot be changed yet, so this only shows how the server is configured.
pub async fn get_settings_page(State(state): State<SettingsState>) -> Response {
    let nav_bar = NavBar::new(endpoints::SETTINGS_VIEW).into_html();
    let content = html! {
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            section class=(CARD_STYLE)
            {
                h2 class=(CARD_TITLE_STYLE) { "Settings" }

                p class="text-gray-500 dark:text-gray-400" { "Settings coming soon." }

                dl class="mt-4"
                {
                    dt class="text-sm font-medium text-gray-500 dark:text-gray-400" { "Timezone" }
                    dd id="timezone" class="mt-1" { (state.local_timezone) }
                }
            }
        }
    };

    base("Settings", &content).into_response()
}
