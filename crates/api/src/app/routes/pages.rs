//! Page placeholders. Rendering is out of scope; these only show what a
//! page sees after EdgeGate let it through.

use axum::Extension;

use crate::context::EdgeIdentity;

pub async fn home(edge: Option<Extension<EdgeIdentity>>) -> String {
    greeting("Backstage", edge)
}

pub async fn dashboard(edge: Option<Extension<EdgeIdentity>>) -> String {
    greeting("Dashboard", edge)
}

fn greeting(title: &str, edge: Option<Extension<EdgeIdentity>>) -> String {
    match edge {
        Some(Extension(EdgeIdentity(identity))) => format!("{title}: signed in as {}", identity.name),
        None => title.to_string(),
    }
}
