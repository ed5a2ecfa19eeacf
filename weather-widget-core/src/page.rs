//! The surface the orchestrator writes to.

use maud::{DOCTYPE, PreEscaped, html};

/// Something that happened on the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageEvent {
    /// Initial activation; renders the preset list.
    Load,
    /// The search field's text changed.
    Input(String),
    /// The search form was submitted.
    Submit,
}

/// Input field and output regions of the widget.
pub trait Page {
    fn input_value(&self) -> String;
    fn set_input(&mut self, value: &str);
    fn clear_input(&mut self);
    fn set_heading(&mut self, text: &str);
    fn set_search_content(&mut self, html: String);
    fn set_list_content(&mut self, html: String);
}

/// In-memory page that can be serialized into a standalone HTML document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HtmlPage {
    input: String,
    heading: String,
    search_content: String,
    list_content: String,
    stylesheet: Option<String>,
}

impl HtmlPage {
    pub fn new(heading: &str) -> Self {
        Self {
            heading: heading.to_string(),
            ..Self::default()
        }
    }

    pub fn with_stylesheet(mut self, href: Option<String>) -> Self {
        self.stylesheet = href;
        self
    }

    pub fn heading(&self) -> &str {
        &self.heading
    }

    pub fn search_content(&self) -> &str {
        &self.search_content
    }

    pub fn list_content(&self) -> &str {
        &self.list_content
    }

    /// Full document; the search and list regions are inserted as already-rendered markup.
    pub fn to_document(&self) -> String {
        html! {
            (DOCTYPE)
            html lang="en" {
                head {
                    meta charset="utf-8";
                    title { "Weather" }
                    @if let Some(href) = &self.stylesheet {
                        link rel="stylesheet" href=(href);
                    }
                }
                body {
                    section class="top-banner" {
                        form {
                            input type="text" placeholder="Search for a city" value=(self.input);
                            button type="submit" { "Submit" }
                        }
                    }
                    h1 class="heading" { (self.heading) }
                    section class="container" {
                        div class="search-content" { (PreEscaped(&self.search_content)) }
                        div class="list-container" { (PreEscaped(&self.list_content)) }
                    }
                }
            }
        }
        .into_string()
    }
}

impl Page for HtmlPage {
    fn input_value(&self) -> String {
        self.input.clone()
    }

    fn set_input(&mut self, value: &str) {
        self.input = value.to_string();
    }

    fn clear_input(&mut self) {
        self.input.clear();
    }

    fn set_heading(&mut self, text: &str) {
        self.heading = text.to_string();
    }

    fn set_search_content(&mut self, html: String) {
        self.search_content = html;
    }

    fn set_list_content(&mut self, html: String) {
        self.list_content = html;
    }
}
