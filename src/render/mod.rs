//! Schema-to-interface renderer
//!
//! Maps a finished analysis into a render plan: the grouped field layout,
//! the per-kind value-collection mapping the host must honor, and a request
//! schema comment documenting the wire contract. `html` additionally emits
//! a complete standalone page for webview hosts.

pub mod collect;
pub mod html;
pub mod layout;

use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

use crate::core::Analysis;

pub use collect::{collection_mapping, CollectionEntry, CollectionRule};
pub use html::generate_page;
pub use layout::{group_fields, FieldGroup, GroupLayout};

/// Everything the hosting interface needs to present one analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderPlan {
    pub groups: Vec<FieldGroup>,
    pub collection: Vec<CollectionEntry>,
    pub schema_comment: String,
}

/// Render an analysis into its interface plan
pub fn render(analysis: &Analysis) -> RenderPlan {
    RenderPlan {
        groups: group_fields(&analysis.parameters),
        collection: collection_mapping(&analysis.parameters),
        schema_comment: schema_comment(analysis),
    }
}

/// Documentation block describing the generated backend's request schema
fn schema_comment(analysis: &Analysis) -> String {
    let mut out = String::from("// POST /generate request schema:\n");
    for param in &analysis.parameters {
        let _ = write!(
            out,
            "//   {}: {} (default: {})",
            param.name,
            param.kind.display_name(),
            param.effective_default()
        );
        if !param.required {
            out.push_str(" [optional]");
        }
        out.push('\n');
    }
    out.push_str("// response: {success: bool, image?: base64, error?: string}\n");
    out
}
