//! Routes of the reader and the query-string writer built on them.

use crate::components::{AppShell, Reader};
use crate::query_param::{QueryParam, QueryParamWriter};
use dioxus::prelude::*;
use dioxus::router::Navigator;

#[derive(Routable, Clone, PartialEq, Debug)]
#[rustfmt::skip]
pub enum AppView {
    #[layout(AppShell)]
        #[route("/?:translations")]
        Reader { translations: String },
}

/// Pushes the current route with an updated query parameter. Client-side
/// navigation only, the page is never reloaded.
#[derive(Clone)]
pub struct RouterQueryWriter {
    navigator: Navigator,
}

impl RouterQueryWriter {
    pub fn new(navigator: Navigator) -> Self {
        Self { navigator }
    }
}

impl QueryParamWriter for RouterQueryWriter {
    fn set_query_param(&mut self, param: QueryParam, value: String) {
        let target = match param {
            QueryParam::Translations => AppView::Reader {
                translations: value,
            },
        };
        if self.navigator.push(target).is_some() {
            tracing::warn!(param = param.as_str(), "query parameter navigation failed");
        }
    }
}
