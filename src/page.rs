use maud::{DOCTYPE, Markup, PreEscaped, html};

use crate::theme::TOGGLE_ID;

/// Wraps a rendered Markdown fragment in the site's page layout: the theme
/// toggle in the navbar and the fragment inside `.markdown-container`.
pub fn build_page(title: &str, markdown_html: &str) -> String {
    let markup: Markup = html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
            }
            body {
                (navbar(title))
                main class="container py-4" {
                    div class="markdown-container" {
                        (PreEscaped(markdown_html))
                    }
                }
            }
        }
    };
    markup.into_string()
}

fn navbar(title: &str) -> Markup {
    html! {
        nav class="navbar navbar-expand-lg" {
            div class="container-fluid" {
                span class="navbar-brand" { (title) }
                div class="form-check form-switch" {
                    input class="form-check-input" type="checkbox" role="switch" id=(TOGGLE_ID);
                    label class="form-check-label" for=(TOGGLE_ID) { "Dark mode" }
                }
            }
        }
    }
}
