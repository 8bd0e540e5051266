//! URL sync - exactly one push or replace per stack mutation

use crate::codec;
use crate::commands::Cmd;
use crate::history::location;
use crate::model::{SheetModel, Suppression, UrlSync};

/// Which history write a mutation calls for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncIntent {
    /// A new sheet was opened: add a revisitable entry
    Push,
    /// Anything else: overwrite the current entry
    Replace,
}

/// Bring the URL in line with the open subset
///
/// Updates `location` and `marker` optimistically; a failed write is
/// reported back as `NavMsg::WriteFailed` and rolls them back. A replace
/// that would not change anything is skipped.
pub fn sync_url(model: &mut SheetModel, intent: SyncIntent) -> Option<Cmd> {
    let open = model.stack.open_ids();

    if !model.config.enabled {
        model.url_sync = if open.is_empty() {
            UrlSync::InSync
        } else {
            UrlSync::Suppressed(Suppression::Disabled)
        };
        return None;
    }

    let payload = codec::encode(&model.stack.open_records(), model.config.compress_data);
    let url = match location::with_param(&model.location, &model.config.param_name, &payload) {
        Ok(url) => url,
        Err(e) => {
            tracing::warn!(
                "Cannot write sheet stack into URL {}: {}",
                model.location,
                e
            );
            model.url_sync = UrlSync::Suppressed(Suppression::InvalidLocation);
            return None;
        }
    };

    if url.len() > model.config.max_url_length {
        tracing::warn!(
            "Sheet stack URL would be {} chars (max {}); keeping {} sheets in memory only",
            url.len(),
            model.config.max_url_length,
            open.len()
        );
        model.url_sync = UrlSync::Suppressed(Suppression::TooLong { length: url.len() });
        return None;
    }

    model.url_sync = UrlSync::InSync;

    let cmd = match intent {
        SyncIntent::Push => {
            let marker = model.marker.pushed(open);
            model.marker = marker.clone();
            Cmd::PushEntry {
                url: url.clone(),
                marker,
            }
        }
        SyncIntent::Replace => {
            if url == model.location && model.marker.open == open {
                return None;
            }
            let marker = model.marker.replaced(open);
            model.marker = marker.clone();
            Cmd::ReplaceEntry {
                url: url.clone(),
                marker,
            }
        }
    };

    model.location = url;
    Some(cmd)
}
