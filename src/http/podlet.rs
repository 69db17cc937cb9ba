//! Podlet fragment handler.

use std::collections::BTreeMap;

use axum::{Extension, Json};
use serde::Serialize;

use crate::context::{wire, InboundRequest};

/// Fragment rendered by a podlet: what it received and what it resolved.
#[derive(Debug, Serialize)]
pub struct PodletFragment {
    pub name: String,
    /// Context received from the requesting layout.
    pub upstream: BTreeMap<String, String>,
    /// Locally resolved context, in wire form.
    pub context: BTreeMap<String, String>,
}

pub async fn podlet_handler(Extension(incoming): Extension<InboundRequest>) -> Json<PodletFragment> {
    let context = wire::encode(&incoming.context, &incoming.name);
    Json(PodletFragment {
        name: incoming.name,
        upstream: incoming.upstream,
        context,
    })
}
